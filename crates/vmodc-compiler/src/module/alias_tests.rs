use indoc::indoc;

use crate::diagnostics::DiagnosticKind;
use crate::module::Alias;
use crate::test_utils::{parse_err, parse_ok};

const OBJECTS: &str = indoc! {r#"
    $Module m 3 "test"
    $Function VOID f()
    $Object foo()
    $Method VOID .bar()
"#};

fn alias(line: &str) -> Alias {
    let module = parse_ok(&format!("{OBJECTS}{line}\n"));
    module.aliases().next().cloned().expect("an alias")
}

fn rejected(line: &str) -> (DiagnosticKind, String) {
    let diagnostics = parse_err(&format!("{OBJECTS}{line}\n"));
    let diag = diagnostics.iter().next().expect("a diagnostic");
    (diag.kind(), diag.message().to_string())
}

#[test]
fn function_alias() {
    let alias = alias("$Alias old_f f");
    assert_eq!(alias.alias, "old_f");
    assert_eq!(alias.target, "f");
    assert_eq!(alias.doc_alias, "old_f");
    assert_eq!(alias.doc_target, "f");
}

#[test]
fn object_alias() {
    let alias = alias("$Alias old_foo foo");
    assert_eq!(alias.alias, "old_foo");
    assert_eq!(alias.target, "foo");
}

#[test]
fn method_alias() {
    let alias = alias("$Alias .old foo.bar");
    assert_eq!(alias.alias, "foo.old");
    assert_eq!(alias.target, "foo.bar");
    assert_eq!(alias.doc_alias, "xfoo.old");
    assert_eq!(alias.doc_target, "xfoo.bar");
}

#[test]
fn alias_is_a_stanza_in_order() {
    let module = parse_ok(&format!("{OBJECTS}$Alias old_f f\n\nStill here.\n"));
    let last = module.stanzas().last().unwrap();
    assert_eq!(last.doc, ["Still here."]);
    assert!(module.symbol("old_f").is_none());
}

#[test]
fn unknown_target() {
    let (kind, message) = rejected("$Alias old g");
    assert_eq!(kind, DiagnosticKind::UnresolvedSymbol);
    assert_eq!(message, "symbol `g` not found");
}

#[test]
fn plain_alias_cannot_name_a_method() {
    let (kind, _) = rejected("$Alias old foo.bar");
    assert_eq!(kind, DiagnosticKind::UnresolvedSymbol);
}

#[test]
fn method_alias_needs_dotted_target() {
    let (kind, message) = rejected("$Alias .old bar");
    assert_eq!(kind, DiagnosticKind::StanzaSyntax);
    assert_eq!(message, "syntax error: expected `$Alias <.alias> <obj.method>`");

    let (kind, _) = rejected("$Alias .old foo.bar.baz");
    assert_eq!(kind, DiagnosticKind::StanzaSyntax);
}

#[test]
fn method_alias_unknown_object_or_method() {
    let (kind, message) = rejected("$Alias .old nope.bar");
    assert_eq!(kind, DiagnosticKind::UnresolvedSymbol);
    assert_eq!(message, "symbol `nope` not found");

    let (kind, message) = rejected("$Alias .old foo.nope");
    assert_eq!(kind, DiagnosticKind::UnresolvedSymbol);
    assert_eq!(message, "symbol `foo.nope` not found");

    let (kind, _) = rejected("$Alias .old f.bar");
    assert_eq!(kind, DiagnosticKind::UnresolvedSymbol);
}

#[test]
fn alias_shape() {
    let (kind, _) = rejected("$Alias only_one");
    assert_eq!(kind, DiagnosticKind::StanzaSyntax);

    let (kind, message) = rejected("$Alias bad-name f");
    assert_eq!(kind, DiagnosticKind::IllegalNativeName);
    assert_eq!(message, "`bad-name()`: illegal native name");
}

#[test]
fn alias_cannot_precede_its_target() {
    let source = indoc! {r#"
        $Module m 3 "test"
        $Alias early f
        $Function VOID f()
    "#};
    let diagnostics = parse_err(source);
    assert_eq!(
        diagnostics.iter().next().unwrap().kind(),
        DiagnosticKind::UnresolvedSymbol
    );
}
