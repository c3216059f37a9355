//! Front end: declaration splitting and header tokenization.

mod cursor;
pub mod lexer;
pub mod split;


pub(crate) use cursor::{Cursor, Fatal, PResult, ParseCtx, report};
pub use lexer::{Token, TokenKind, canonical_line, lex};
pub use split::{Declaration, Document, split, trim_doc};
