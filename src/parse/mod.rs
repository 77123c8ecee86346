//! Pure parsers from pseudo-file and command text to typed records.
//!
//! Nothing in here performs I/O; the caller supplies the raw text and any
//! OS-API readings.

pub mod cpuinfo;
pub mod df;
pub mod meminfo;
pub mod net_dev;
pub mod speedtest;

use crate::error::ParseError;

pub(crate) fn parse_u64(input: &'static str, field: &str, value: &str) -> Result<u64, ParseError> {
    value.parse().map_err(|_| ParseError::InvalidNumber {
        input,
        field: field.to_string(),
        value: value.to_string(),
    })
}
