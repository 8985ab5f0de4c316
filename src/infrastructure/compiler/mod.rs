//! Compiler adapters

mod external;

pub use external::ExternalCompiler;
