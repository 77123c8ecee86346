use std::fmt;

use serde::Serialize;

use crate::stats::{CpuStats, DiskStats, MemoryStats, NicSample, SpeedtestResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ProbeKind {
    Memory,
    Disk,
    Cpu,
    Nic,
    Speedtest,
}

impl fmt::Display for ProbeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProbeKind::Memory => "memory",
            ProbeKind::Disk => "disk",
            ProbeKind::Cpu => "cpu",
            ProbeKind::Nic => "nic",
            ProbeKind::Speedtest => "speedtest",
        })
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProbeFailure {
    pub probe: ProbeKind,
    pub message: String,
}

/// Result of one reporting cycle over every probe.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct Report {
    pub memory: Option<MemoryStats>,
    pub disk: Option<DiskStats>,
    pub cpu: Option<CpuStats>,
    pub nic: Option<NicSample>,
    pub speedtest: Option<SpeedtestResult>,
    pub failures: Vec<ProbeFailure>,
}

impl Report {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    pub fn failed(&self, probe: ProbeKind) -> bool {
        self.failures.iter().any(|failure| failure.probe == probe)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(memory) = &self.memory {
            writeln!(f, "{memory}")?;
        }
        if let Some(disk) = &self.disk {
            writeln!(f, "{disk}")?;
        }
        if let Some(cpu) = &self.cpu {
            writeln!(f, "{cpu}")?;
        }
        match &self.nic {
            Some(nic) => writeln!(f, "NIC: {nic}")?,
            None if self.failed(ProbeKind::Nic) => {}
            None => writeln!(f, "NIC: no eligible interface")?,
        }
        if let Some(speedtest) = &self.speedtest {
            writeln!(f, "{}", speedtest.summary())?;
        }
        for failure in &self.failures {
            writeln!(f, "{} probe failed: {}", failure.probe, failure.message)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn failures_serialize_with_probe_names() {
        let report = Report {
            failures: vec![ProbeFailure {
                probe: ProbeKind::Disk,
                message: "`df` exited with exit status: 1: no such file".to_string(),
            }],
            ..Report::default()
        };
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(value["failures"][0]["probe"], "disk");
        assert!(value["memory"].is_null());
        assert!(!report.is_complete());
    }

    #[test]
    fn text_rendering_lists_failures() {
        let report = Report {
            disk: Some(DiskStats {
                total_disk: 100,
                used_disk: 40,
                available_disk: 60,
            }),
            failures: vec![ProbeFailure {
                probe: ProbeKind::Memory,
                message: "meminfo: missing required field `MemAvailable`".to_string(),
            }],
            ..Report::default()
        };
        assert_eq!(
            report.to_string(),
            "Total disk: 100 GB Used: 40 GB Available: 60 GB\n\
             NIC: no eligible interface\n\
             memory probe failed: meminfo: missing required field `MemAvailable`\n"
        );
    }

    #[test]
    fn failed_nic_is_not_reported_as_ineligible() {
        let report = Report {
            failures: vec![ProbeFailure {
                probe: ProbeKind::Nic,
                message: "failed to read /nonexistent: No such file or directory".to_string(),
            }],
            ..Report::default()
        };
        assert!(report.failed(ProbeKind::Nic));
        assert!(!report.failed(ProbeKind::Disk));
        assert_eq!(
            report.to_string(),
            "nic probe failed: failed to read /nonexistent: No such file or directory\n"
        );
    }
}
