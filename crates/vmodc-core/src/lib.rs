#![cfg_attr(coverage_nightly, feature(coverage_attribute))]

//! Core building blocks shared by the vmodc crates.
//!
//! - [`ValueKind`]: the closed catalogue of argument and return kinds
//! - [`text`]: quoting, prototype wrapping and tab-stop arithmetic
//! - [`Colors`]: terminal palette for CLI output

mod colors;
mod kind;
pub mod text;


pub use colors::Colors;
pub use kind::ValueKind;
