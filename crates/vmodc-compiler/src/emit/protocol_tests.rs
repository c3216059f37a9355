use indoc::indoc;
use serde_json::json;

use crate::emit::{ABI_SYMBOL, AbiBinding, LateBound, Protocol, VersionField};
use crate::module::AbiMode;
use crate::test_utils::parse_ok;

fn protocol(source: &str) -> Protocol {
    Protocol::build(&parse_ok(source))
}

#[test]
fn entries_follow_declaration_order() {
    let protocol = protocol(include_str!("../../fixtures/basic/vmod.vcc"));
    let entries = protocol.entries();

    assert_eq!(entries.len(), 4);
    assert_eq!(entries[0], json!(["$EVENT", "Vmod_vmod_m_Func._event"]));
    assert_eq!(entries[3], json!(["$ALIAS", "foo.baz", "foo.bar"]));
    assert_eq!(
        entries[1],
        json!([
            "$FUNC",
            "is_even",
            [["BOOL"], "Vmod_vmod_m_Func.is_even", "", ["INT", "n"]]
        ])
    );
}

#[test]
fn object_entry() {
    let protocol = protocol(indoc! {r#"
        $Module m 3 "test"
        $Object NULL_OK foo(STRING s, [INT n])
        $Method VOID .bar()
    "#});

    assert_eq!(
        protocol.entries()[0],
        json!([
            "$OBJ",
            "foo",
            {"NULL_OK": true},
            "struct vmod_m_foo",
            ["$INIT", [
                ["VOID"],
                "Vmod_vmod_m_Func.foo__init",
                "struct arg_vmod_m_foo__init",
                ["STRING", "s"],
                ["INT", "n", null, null, true]
            ]],
            ["$FINI", [["VOID"], "Vmod_vmod_m_Func.foo__fini", ""]],
            ["$METHOD", "bar", [["VOID"], "Vmod_vmod_m_Func.foo_bar", ""]]
        ])
    );
}

#[test]
fn module_entry_and_prototypes() {
    let protocol = protocol(indoc! {r#"
        $Module m 3 "test"
        $Function VOID f()
    "#});
    let value = protocol.to_value();
    let head = &value[0];

    assert_eq!(head[0], "$VMOD");
    assert_eq!(head[1], "1.0");
    assert_eq!(head[2], "m");
    assert_eq!(head[3], "Vmod_vmod_m_Func");
    assert_eq!(head[4].as_str().map(str::len), Some(64));
    assert_eq!(head.as_array().map(Vec::len), Some(5));

    let cproto = protocol.prototypes();
    assert_eq!(cproto[0], "#define VPFX(a) vmod_##a");
    assert!(cproto.contains(&"/* Functions */".to_string()));
    assert!(cproto.contains(&"typedef VCL_VOID td_vmod_m_f(VRT_CTX);".to_string()));
    assert_eq!(
        cproto.last().map(String::as_str),
        Some("static struct Vmod_vmod_m_Func Vmod_vmod_m_Func;")
    );
    assert_eq!(value[1][0], "$CPROTO");
}

#[test]
fn late_bound_fields() {
    assert_eq!(
        LateBound::for_mode(AbiMode::Strict),
        LateBound {
            abi_symbol: ABI_SYMBOL,
            major: VersionField::Literal(0),
            minor: VersionField::Literal(0),
        }
    );

    let vrt = LateBound::for_mode(AbiMode::Vrt);
    assert_eq!(vrt.major.to_string(), "VRT_MAJOR_VERSION");
    assert_eq!(vrt.minor.to_string(), "VRT_MINOR_VERSION");
}

#[test]
fn resolve_fills_version_fields() {
    let source = "$Module m 3 \"test\"\n$ABI vrt\n";
    let binding = AbiBinding::new("Varnish trunk", 19, 1);
    let value = protocol(source).resolve(&binding);

    assert_eq!(value[0][5], "Varnish trunk");
    assert_eq!(value[0][6], "19");
    assert_eq!(value[0][7], "1");

    let strict = protocol("$Module m 3 \"test\"\n").resolve(&binding);
    assert_eq!(strict[0][6], "0");
    assert_eq!(strict[0][7], "0");
}

#[test]
fn splice_line_holds_the_fingerprint() {
    let protocol = protocol("$Module m 3 \"test\"\n");
    let json = protocol.to_json();
    let line = json.lines().nth(protocol.splice_line()).unwrap();

    assert_eq!(protocol.splice_line(), 6);
    assert!(line.starts_with("    \""));
    assert_eq!(line.trim().len(), 66);
}
