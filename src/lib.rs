pub mod config;
pub mod error;
pub mod format;
pub mod logging;
pub mod parse;
pub mod stats;
pub mod system;

pub use error::{ParseError, ProbeError};
pub use system::collector::Collector;
pub use system::report::Report;
