use std::path::PathBuf;

use vmodc_compiler::emit::AbiBinding;

use super::dump::{DumpArgs, dump};
use super::input::Input;

fn input() -> Input {
    Input {
        path: PathBuf::from("vmod.vcc"),
        source: "$Module m 3 \"test\"\n$ABI vrt\n".to_string(),
    }
}

fn args(binding: Option<AbiBinding>) -> DumpArgs {
    DumpArgs {
        files: Vec::new(),
        strict: false,
        binding,
        color: false,
    }
}

#[test]
fn resolved_protocol() {
    let binding = AbiBinding::new("Varnish trunk", 19, 1);
    let json = dump(&args(Some(binding)), &input()).unwrap();

    insta::assert_snapshot!(json, @r##"
    [
      [
        "$VMOD",
        "1.0",
        "m",
        "Vmod_vmod_m_Func",
        "dba307126c1f07228a96def8dad7d25a91bbb5f2575328c934dcc3bd73101991",
        "Varnish trunk",
        "19",
        "1"
      ],
      [
        "$CPROTO",
        "#define VPFX(a) vmod_##a",
        "#define VARGS(a) arg_vmod_m_##a",
        "#define VENUM(a) enum_vmod_m_##a",
        "//lint -esym(755, VPFX)",
        "//lint -esym(767, VPFX)",
        "//lint -esym(755, VARGS)",
        "//lint -esym(767, VARGS)",
        "//lint -esym(755, VENUM)",
        "//lint -esym(767, VENUM)",
        "//lint -esym(755, VARGS)",
        "//lint -esym(755, VENUM)",
        "",
        "/* Functions */",
        "",
        "struct Vmod_vmod_m_Func {",
        "};",
        "#undef VPFX",
        "#undef VARGS",
        "#undef VENUM",
        "static struct Vmod_vmod_m_Func Vmod_vmod_m_Func;"
      ]
    ]
    "##);
}

#[test]
fn unresolved_protocol_stops_at_fingerprint() {
    let json = dump(&args(None), &input()).unwrap();
    let head: Vec<&str> = json.lines().take(8).collect();

    assert_eq!(
        head[6],
        "    \"dba307126c1f07228a96def8dad7d25a91bbb5f2575328c934dcc3bd73101991\""
    );
    assert_eq!(head[7], "  ],");
}
