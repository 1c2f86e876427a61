pub mod atom;
pub mod call;
pub mod chain;
pub mod equation;
pub mod literal;
pub mod product;
pub mod stmt;
pub mod sum;

pub use atom::Atom;
pub use call::Call;
pub use chain::Chain;
pub use equation::Equation;
pub use literal::{LitNum, LitStr, LitSym};
pub use product::{MulOp, Product};
pub use stmt::{FuncHeader, Stmt};
pub use sum::{AddOp, Sum};
