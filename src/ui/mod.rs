//! Console presentation

pub mod progress;
pub mod terminal;

pub use progress::{ConsoleProgress, ProgressBar};
pub use terminal::{detect_capabilities, TerminalCapabilities};
