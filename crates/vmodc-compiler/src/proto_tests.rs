use indoc::indoc;

use crate::test_utils::parse_ok;

#[test]
fn function_declaration() {
    let module = parse_ok(indoc! {r#"
        $Module m 3 "test"
        $Function BOOL is_even(INT n)
    "#});
    let f = module.functions().next().unwrap();

    assert_eq!(f.leading_args(), ["VRT_CTX"]);
    assert_eq!(
        f.declaration("vmod_is_even"),
        "VCL_BOOL vmod_is_even(VRT_CTX, VCL_INT);"
    );
}

#[test]
fn argument_struct_replaces_arguments() {
    let module = parse_ok(indoc! {r#"
        $Module m 3 "test"
        $Function VOID f(INT a, [INT b])
    "#});
    let f = module.functions().next().unwrap();

    assert_eq!(f.argstruct_name(), "struct VARGS(f)");
    assert_eq!(f.declaration("f"), "VCL_VOID f(VRT_CTX, struct VARGS(f)*);");
}

#[test]
fn lifecycle_and_method_declarations() {
    let module = parse_ok(indoc! {r#"
        $Module m 3 "test"
        $Object foo(STRING s, [INT n])
        $Method REAL .ratio(PRIV_TASK, INT d)
    "#});
    let foo = module.objects().next().unwrap();

    assert_eq!(
        foo.init.declaration("foo__init"),
        "VCL_VOID foo__init(VRT_CTX, struct VPFX(m_foo) **, const char *, struct VARGS(foo__init)*);"
    );
    assert_eq!(
        foo.fini.declaration("foo__fini"),
        "VCL_VOID foo__fini(struct VPFX(m_foo) **);"
    );
    assert_eq!(
        foo.methods[0].proto.declaration("foo_ratio"),
        "VCL_REAL foo_ratio(VRT_CTX, struct VPFX(m_foo) *, struct vmod_priv *, VCL_INT);"
    );
}

#[test]
fn constructor_keeps_declared_shape() {
    let module = parse_ok(indoc! {r#"
        $Module m 3 "test"
        $Object foo(STRING s)
    "#});
    let foo = module.objects().next().unwrap();

    assert_eq!(foo.constructor.name, "foo");
    assert!(foo.constructor.implicit.is_empty());
    assert_eq!(foo.init.args, foo.constructor.args);
}
