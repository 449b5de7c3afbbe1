pub mod config;
pub mod diagnostics;
pub mod errors;

pub use diagnostics::{Diagnostic, DiagnosticLevel, DiagnosticSink};
pub use errors::*;
