use serde_json::json;
use vmodc_core::ValueKind;

use crate::types::{Argument, TypeSpec};

fn arg(kind: ValueKind, name: Option<&str>) -> Argument {
    Argument {
        ty: TypeSpec::new(kind),
        name: name.map(String::from),
        default: None,
        optional: false,
        slot: name.unwrap_or("arg1").to_string(),
    }
}

fn mode_arg() -> Argument {
    let mut mode = arg(ValueKind::Enum, Some("mode"));
    mode.ty.enum_values = Some(vec!["fast".to_string(), "slow".to_string()]);
    mode.default = Some("fast".to_string());
    mode
}

#[test]
fn json_drops_trailing_nulls() {
    assert_eq!(arg(ValueKind::Int, Some("n")).to_json(), json!(["INT", "n"]));
    assert_eq!(arg(ValueKind::String, None).to_json(), json!(["STRING"]));
}

#[test]
fn json_keeps_inner_nulls_of_optional_arguments() {
    let mut s = arg(ValueKind::String, Some("s"));
    s.optional = true;
    assert_eq!(s.to_json(), json!(["STRING", "s", null, null, true]));
}

#[test]
fn json_enum_with_default() {
    assert_eq!(
        mode_arg().to_json(),
        json!(["ENUM", "mode", "fast", ["fast", "slow"]])
    );
}

#[test]
fn vcl_spelling() {
    let mode = mode_arg();
    assert_eq!(mode.vcl(false).as_deref(), Some("ENUM {fast, slow} mode=fast"));
    assert_eq!(mode.vcl(true).as_deref(), Some("ENUM mode"));

    let mut n = arg(ValueKind::Int, Some("n"));
    n.default = Some("3".to_string());
    n.optional = true;
    assert_eq!(n.vcl(false).as_deref(), Some("[INT n=3]"));
    assert_eq!(n.vcl(true).as_deref(), Some("[INT n]"));

    assert_eq!(arg(ValueKind::Strands, Some("s")).vcl(false).as_deref(), Some("STRING s"));
    assert_eq!(arg(ValueKind::Bool, None).vcl(false).as_deref(), Some("BOOL"));
}

#[test]
fn private_state_is_not_documented() {
    assert_eq!(arg(ValueKind::PrivTask, None).vcl(false), None);
    assert_eq!(arg(ValueKind::PrivCall, None).vcl(true), None);
}

#[test]
fn type_spec() {
    let mut ty = TypeSpec::new(ValueKind::Enum);
    assert_eq!(ty.vcl(false), "ENUM");
    ty.enum_values = Some(vec!["a".to_string()]);
    assert_eq!(ty.vcl(false), "ENUM {a}");
    assert_eq!(ty.vcl(true), "ENUM");
    assert_eq!(ty.c_type(), "VCL_ENUM");
    assert_eq!(TypeSpec::void().c_type(), "VCL_VOID");
}
