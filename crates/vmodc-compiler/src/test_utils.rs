//! Test utilities and snapshot macros.

use crate::diagnostics::Diagnostics;
use crate::module::{Module, ParseOptions, parse};

/// Parses `source`, panicking with rendered diagnostics if it is rejected.
pub fn parse_ok(source: &str) -> Module {
    parse_with(source, &ParseOptions::new()).0
}

/// Parses `source` and returns the module together with its warnings.
pub fn parse_with(source: &str, options: &ParseOptions) -> (Module, Diagnostics) {
    match parse(source, options) {
        Ok(result) => result,
        Err(err) => {
            let rendered = err
                .diagnostics()
                .map(|d| d.render(source))
                .unwrap_or_else(|| err.to_string());
            panic!("expected valid input, got:\n{rendered}");
        }
    }
}

/// Parses `source`, expecting rejection, and returns the collected diagnostics.
pub fn parse_err(source: &str) -> Diagnostics {
    parse_err_with(source, &ParseOptions::new())
}

pub fn parse_err_with(source: &str, options: &ParseOptions) -> Diagnostics {
    match parse(source, options) {
        Ok(_) => panic!("expected rejection of:\n{source}"),
        Err(err) => err
            .diagnostics()
            .cloned()
            .unwrap_or_else(|| panic!("expected diagnostics, got {err}")),
    }
}

/// Rendered diagnostics of rejected input.
pub fn expect_invalid(source: &str) -> String {
    parse_err(source).render(source)
}

/// Inline snapshot of the diagnostics for rejected input.
#[macro_export]
macro_rules! shot_error {
    ($source:literal, @$snapshot:literal) => {{
        let source = indoc::indoc!($source);
        let output = $crate::test_utils::expect_invalid(source);
        insta::assert_snapshot!(output, @$snapshot);
    }};
}
