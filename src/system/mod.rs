//! I/O side of the probes: OS-API readings, command execution and the collector.

pub mod collector;
pub mod command;
pub mod host;
pub mod report;
