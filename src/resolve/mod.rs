pub mod index;
pub mod resolver;

pub use index::{FindResult, ImportIndex, ImportSpec, RuleIndex};
pub use resolver::{ImportResolver, Resolution, ResolveDiagnostic};
