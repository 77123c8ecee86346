use super::parse_u64;
use crate::error::ParseError;
use crate::stats::DiskStats;

const INPUT: &str = "df";

/// Parse `df -B <unit> <path>` output: a header line, then one data row.
pub fn parse_df(output: &str, unit: &str) -> Result<DiskStats, ParseError> {
    let Some(row) = output.trim().lines().nth(1) else {
        return Err(ParseError::MissingField {
            input: INPUT,
            field: "data row".to_string(),
        });
    };

    let fields: Vec<&str> = row
        .split_whitespace()
        .map(|field| field.strip_suffix(unit).unwrap_or(field))
        .collect();
    if fields.len() < 4 {
        return Err(ParseError::MalformedLine {
            input: INPUT,
            line: 2,
            reason: format!("expected at least 4 columns, found {}", fields.len()),
        });
    }

    Ok(DiskStats {
        total_disk: parse_u64(INPUT, "total", fields[1])?,
        used_disk: parse_u64(INPUT, "used", fields[2])?,
        available_disk: parse_u64(INPUT, "available", fields[3])?,
    })
}
