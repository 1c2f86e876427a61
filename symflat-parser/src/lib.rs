//! Reader for the statement language consumed by `symflat-core`.
//!
//! The [`tokenizer`] splits source code into tokens with [`logos`], and the [`parser`] turns them
//! into a span-carrying abstract syntax tree, one [`Stmt`](parser::ast::Stmt) at a time.

pub mod parser;
pub mod tokenizer;

pub use parser::{Parse, Parser};
