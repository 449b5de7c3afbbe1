pub mod symboltable;
pub mod visiters;
pub mod walk;

pub use symboltable::{Symbol, SymbolTable, SymbolType};
pub use visiters::ASTVisitor;
