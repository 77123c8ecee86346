//! `/proc/net/dev` parsing.
//!
//! Counter positions are resolved through a [`NetDevSchema`] built from the
//! kernel's column header, so a layout change fails instead of silently
//! reading the wrong column.

use super::parse_u64;
use crate::error::ParseError;
use crate::stats::NicSample;

const INPUT: &str = "net_dev";

pub const RECEIVE_COLUMNS: [&str; 8] = [
    "bytes",
    "packets",
    "errs",
    "drop",
    "fifo",
    "frame",
    "compressed",
    "multicast",
];

pub const TRANSMIT_COLUMNS: [&str; 8] = [
    "bytes",
    "packets",
    "errs",
    "drop",
    "fifo",
    "colls",
    "carrier",
    "compressed",
];

/// Ordered receive and transmit column names of a `/proc/net/dev` row.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NetDevSchema {
    receive: Vec<String>,
    transmit: Vec<String>,
}

/// Offsets of the four counters a [`NicSample`] needs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CounterOffsets {
    pub bytes_received: usize,
    pub packets_received: usize,
    pub bytes_sent: usize,
    pub packets_sent: usize,
}

impl Default for NetDevSchema {
    fn default() -> Self {
        Self {
            receive: RECEIVE_COLUMNS.iter().map(|c| c.to_string()).collect(),
            transmit: TRANSMIT_COLUMNS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

impl NetDevSchema {
    /// Build from the column header line, e.g.
    /// ` face |bytes    packets errs ...|bytes    packets errs ...`.
    pub fn from_header(line: &str) -> Result<Self, ParseError> {
        let groups: Vec<&str> = line.split('|').collect();
        if groups.len() != 3 {
            return Err(ParseError::SchemaMismatch {
                input: INPUT,
                reason: format!("expected 3 header groups, found {}", groups.len()),
            });
        }
        let names = |group: &str| -> Vec<String> {
            group.split_whitespace().map(str::to_string).collect()
        };
        let schema = Self {
            receive: names(groups[1]),
            transmit: names(groups[2]),
        };
        schema.offsets()?;
        Ok(schema)
    }

    pub fn width(&self) -> usize {
        self.receive.len() + self.transmit.len()
    }

    pub fn offsets(&self) -> Result<CounterOffsets, ParseError> {
        let find = |group: &[String], direction: &str, column: &str| {
            group
                .iter()
                .position(|name| name == column)
                .ok_or_else(|| ParseError::SchemaMismatch {
                    input: INPUT,
                    reason: format!("no `{column}` column in the {direction} group"),
                })
        };
        let tx_base = self.receive.len();
        Ok(CounterOffsets {
            bytes_received: find(self.receive.as_slice(), "receive", "bytes")?,
            packets_received: find(self.receive.as_slice(), "receive", "packets")?,
            bytes_sent: tx_base + find(self.transmit.as_slice(), "transmit", "bytes")?,
            packets_sent: tx_base + find(self.transmit.as_slice(), "transmit", "packets")?,
        })
    }
}

fn is_column_header(line: &str) -> bool {
    line.split('|').nth(1).is_some_and(|group| {
        group
            .split_whitespace()
            .any(|name| name == RECEIVE_COLUMNS[0])
    })
}

/// Parse every interface row. Header lines are consumed to build the schema;
/// without them the kernel default layout applies.
pub fn parse_net_dev(text: &str) -> Result<Vec<NicSample>, ParseError> {
    let mut schema = NetDevSchema::default();
    let mut offsets = schema.offsets()?;
    let mut samples = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        if line.trim().is_empty() {
            continue;
        }
        if line.contains('|') {
            if is_column_header(line) {
                schema = NetDevSchema::from_header(line)?;
                offsets = schema.offsets()?;
            }
            continue;
        }

        let Some((name, counters)) = line.split_once(':') else {
            return Err(ParseError::MalformedLine {
                input: INPUT,
                line: line_no,
                reason: "expected `interface: counters`".to_string(),
            });
        };
        let interface = name.trim();
        let counters: Vec<&str> = counters.split_whitespace().collect();
        if counters.len() != schema.width() {
            return Err(ParseError::MalformedLine {
                input: INPUT,
                line: line_no,
                reason: format!(
                    "{interface}: expected {} counters, found {}",
                    schema.width(),
                    counters.len()
                ),
            });
        }

        let counter = |offset: usize, field: &str| {
            parse_u64(INPUT, &format!("{interface}.{field}"), counters[offset])
        };
        samples.push(NicSample {
            interface: interface.to_string(),
            bytes_received: counter(offsets.bytes_received, "bytes_received")?,
            bytes_sent: counter(offsets.bytes_sent, "bytes_sent")?,
            packets_received: counter(offsets.packets_received, "packets_received")?,
            packets_sent: counter(offsets.packets_sent, "packets_sent")?,
        });
    }

    Ok(samples)
}

pub fn is_eligible(sample: &NicSample, excluded: &[String]) -> bool {
    sample.bytes_received != 0
        && sample.bytes_sent != 0
        && !excluded.iter().any(|name| name == &sample.interface)
}

/// Eligible interfaces ordered by ascending sent packets; ties keep file order.
pub fn eligible_interfaces(samples: Vec<NicSample>, excluded: &[String]) -> Vec<NicSample> {
    let mut eligible: Vec<NicSample> = samples
        .into_iter()
        .filter(|sample| is_eligible(sample, excluded))
        .collect();
    eligible.sort_by_key(|sample| sample.packets_sent);
    eligible
}

/// The eligible interface with the fewest sent packets, if any.
pub fn primary_interface(text: &str, excluded: &[String]) -> Result<Option<NicSample>, ParseError> {
    Ok(eligible_interfaces(parse_net_dev(text)?, excluded)
        .into_iter()
        .next())
}
