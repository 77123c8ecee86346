use std::collections::HashMap;

use super::parse_u64;
use crate::error::ParseError;
use crate::format::{host_bytes_to_gb, meminfo_kb_to_gb};
use crate::stats::{HostMemory, MemoryStats};

const INPUT: &str = "meminfo";

/// The kernel lists these three first; only the leading lines are read.
const LEADING_LINES: usize = 3;

/// Parse the leading `Key: value kB` lines into GB values keyed by name.
pub fn parse_meminfo(text: &str) -> Result<HashMap<String, f64>, ParseError> {
    let mut values = HashMap::with_capacity(LEADING_LINES);
    for (index, line) in text.trim().lines().take(LEADING_LINES).enumerate() {
        let Some((key, rest)) = line.split_once(':') else {
            return Err(ParseError::MalformedLine {
                input: INPUT,
                line: index + 1,
                reason: "expected `Key: value kB`".to_string(),
            });
        };
        let key = key.trim();
        let kb = rest.split_whitespace().next().unwrap_or_default();
        let kb = parse_u64(INPUT, key, kb)?;
        values.insert(key.to_string(), meminfo_kb_to_gb(kb));
    }
    Ok(values)
}

pub fn memory_stats(text: &str, host: HostMemory) -> Result<MemoryStats, ParseError> {
    let values = parse_meminfo(text)?;
    let field = |name: &str| {
        values
            .get(name)
            .copied()
            .ok_or_else(|| ParseError::MissingField {
                input: INPUT,
                field: name.to_string(),
            })
    };

    Ok(MemoryStats {
        proc_total_memory: field("MemTotal")?,
        node_total_memory: host_bytes_to_gb(host.total_bytes),
        proc_free_memory: field("MemFree")?,
        proc_available_memory: field("MemAvailable")?,
        node_available_memory: host_bytes_to_gb(host.available_bytes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMINFO: &str = "MemTotal:       16384000 kB
MemFree:         1234567 kB
MemAvailable:    9876543 kB
Buffers:          456789 kB
Cached:          5678901 kB
";

    #[test]
    fn converts_leading_lines_to_gb() {
        let host = HostMemory {
            total_bytes: 16_777_216_000,
            available_bytes: 10_240_000_000,
        };
        let stats = memory_stats(MEMINFO, host).unwrap();
        assert_eq!(
            stats,
            MemoryStats {
                proc_total_memory: 16.4,
                node_total_memory: 16.4,
                proc_free_memory: 1.2,
                proc_available_memory: 9.9,
                node_available_memory: 10.0,
            }
        );
    }

    #[test]
    fn only_first_three_lines_are_read() {
        let values = parse_meminfo(MEMINFO).unwrap();
        assert_eq!(values.len(), 3);
        assert!(!values.contains_key("Buffers"));
    }

    #[test]
    fn missing_key_is_an_error() {
        let text = "MemTotal: 1000 kB\nMemFree: 500 kB\nBuffers: 10 kB\n";
        let err = memory_stats(text, HostMemory::default()).unwrap_err();
        match err {
            ParseError::MissingField { field, .. } => assert_eq!(field, "MemAvailable"),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn short_file_is_an_error() {
        let err = memory_stats("MemTotal: 1000 kB\n", HostMemory::default()).unwrap_err();
        assert!(matches!(err, ParseError::MissingField { .. }));
    }

    #[test]
    fn line_without_colon_is_malformed() {
        let err = parse_meminfo("MemTotal 1000 kB\n").unwrap_err();
        assert!(matches!(err, ParseError::MalformedLine { line: 1, .. }));
    }

    #[test]
    fn non_numeric_value_is_rejected() {
        let err = parse_meminfo("MemTotal: lots kB\n").unwrap_err();
        match err {
            ParseError::InvalidNumber { field, value, .. } => {
                assert_eq!(field, "MemTotal");
                assert_eq!(value, "lots");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
