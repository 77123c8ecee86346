use crate::error::ParseError;
use crate::stats::SpeedtestResult;

pub fn parse_speedtest(stdout: &str) -> Result<SpeedtestResult, ParseError> {
    Ok(SpeedtestResult(serde_json::from_str(stdout.trim())?))
}
