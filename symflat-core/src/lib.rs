//! Symbolic flattening engine.
//!
//! Expressions are trees of [`Expression`]s (sums of terms), [`Term`]s (products of powers),
//! [`Power`]s (right-associative towers of factors) and [`Factor`]s. The engine rewrites these
//! trees into a canonical, flattened form: like terms are combined, repeated factors become powers,
//! constants are folded with exact decimal arithmetic, and unnecessary parentheses are removed.
//!
//! Most users will want a [`Session`], which parses statements with `symflat-parser`, keeps
//! variables and user-defined functions between submissions, and reports errors with spans into
//! the source. The lower-level [`Toolset`] drives the engine directly over already-built trees.

pub mod command;
pub mod config;
pub mod error;
pub mod flatten;
pub mod number;
pub mod random;
pub mod session;
pub mod table;
pub mod tree;

pub use config::EvalConfig;
pub use error::Error;
pub use flatten::{Output, Toolset};
pub use number::{Context, FormatOptions, FormatWith, Number, RoundingMode};
pub use session::{Session, StatementError, StatementOutcome};
pub use tree::{Equation, Expression, Factor, Power, Term};
