// Passes over a parsed module. Each one is an `ASTVisitor`.

pub mod checker;
pub mod counter;
pub mod evaluator;
pub mod printer;

pub use checker::Checker;
pub use counter::NodeCounter;
pub use evaluator::{Evaluator, Value};
pub use printer::Printer;
