use indoc::indoc;

use super::native::{argument_struct, banner, struct_line};
use crate::test_utils::parse_ok;

#[test]
fn struct_line_aligns_to_column_40() {
    assert_eq!(struct_line("td_vmod_m_f", "*f;"), "\ttd_vmod_m_f\t\t\t*f;\n");
    assert_eq!(struct_line(".f =", "vmod_f,"), "\t.f =\t\t\t\tvmod_f,\n");
    assert_eq!(
        struct_line("td_vmod_m_a_rather_long_function", "*x;"),
        "\ttd_vmod_m_a_rather_long_function\t*x;\n"
    );
}

#[test]
fn struct_line_breaks_long_left_cells() {
    let left = "td_vmod_m_an_even_longer_function_name_here";
    assert_eq!(
        struct_line(left, "*x;"),
        format!("\t{left}\n\t\t\t\t\t*x;\n")
    );
}

#[test]
fn argument_struct_layout() {
    let module = parse_ok(indoc! {r#"
        $Module m 3 "test"
        $Function VOID f(INT a, [STRING b], PRIV_TASK, [ENUM {x} c])
    "#});
    let f = module.functions().next().unwrap();

    insta::assert_snapshot!(argument_struct(f).trim_start(), @r"
    struct VARGS(f) {
    	char			valid_b;
    	char			valid_c;
    	VCL_INT			a;
    	VCL_STRING		b;
    	struct vmod_priv *	arg3;
    	VCL_ENUM		c;
    };
    ");
}

#[test]
fn banner_comment_styles() {
    assert_eq!(
        banner("vmod.vcc", "..", "..", ".."),
        "..\n.. NB:  This file is machine generated, DO NOT EDIT!\n..\n.. Edit vmod.vcc and run make instead\n..\n\n"
    );
}
