use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::format::{format_bits_per_second, format_bytes};

/// Memory as reported by the OS API, in bytes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct HostMemory {
    pub total_bytes: u64,
    pub available_bytes: u64,
}

/// CPU count and load averages as reported by the OS API.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct HostCpu {
    pub logical_cpus: usize,
    pub load_average: [f64; 3],
}

/// Memory in GB from both `/proc/meminfo` (`proc*`) and the OS API (`node*`).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MemoryStats {
    pub proc_total_memory: f64,
    pub node_total_memory: f64,
    pub proc_free_memory: f64,
    pub proc_available_memory: f64,
    pub node_available_memory: f64,
}

impl MemoryStats {
    /// `/proc/meminfo` should never report more available than total memory.
    pub fn available_exceeds_total(&self) -> bool {
        self.proc_available_memory > self.proc_total_memory
    }
}

impl fmt::Display for MemoryStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total memory: {} GB / {} GB Free: {} GB Available: {} GB / {} GB",
            self.proc_total_memory,
            self.node_total_memory,
            self.proc_free_memory,
            self.proc_available_memory,
            self.node_available_memory
        )
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiskStats {
    pub total_disk: u64,
    pub used_disk: u64,
    pub available_disk: u64,
}

impl fmt::Display for DiskStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Total disk: {} GB Used: {} GB Available: {} GB",
            self.total_disk, self.used_disk, self.available_disk
        )
    }
}

/// CPU counts from `/proc/cpuinfo` and the OS API, left unreconciled.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CpuStats {
    #[serde(rename = "procCPUs")]
    pub proc_cpus: usize,
    #[serde(rename = "nodeCPUs")]
    pub node_cpus: usize,
    #[serde(rename = "loadAvgs")]
    pub load_avgs: [f64; 3],
}

impl fmt::Display for CpuStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [one, five, fifteen] = self.load_avgs;
        write!(
            f,
            "CPUs: {} / {} ({one}, {five}, {fifteen})",
            self.proc_cpus, self.node_cpus
        )
    }
}

/// Counters for one interface row of `/proc/net/dev`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NicSample {
    pub interface: String,
    pub bytes_received: u64,
    pub bytes_sent: u64,
    pub packets_received: u64,
    pub packets_sent: u64,
}

impl fmt::Display for NicSample {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: rx {} ({} packets) tx {} ({} packets)",
            self.interface,
            format_bytes(self.bytes_received),
            self.packets_received,
            format_bytes(self.bytes_sent),
            self.packets_sent
        )
    }
}

/// Whatever the speedtest tool printed, unvalidated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SpeedtestResult(pub Value);

/// Typed view over the fields of a speedtest result that are commonly reported.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SpeedtestSummary {
    pub download_bps: Option<f64>,
    pub upload_bps: Option<f64>,
    pub ping_ms: Option<f64>,
    pub server: Option<String>,
}

impl SpeedtestResult {
    /// `bandwidth` is reported in bytes per second; the summary uses bits.
    pub fn summary(&self) -> SpeedtestSummary {
        let bandwidth = |direction: &str| {
            self.0
                .get(direction)
                .and_then(|d| d.get("bandwidth"))
                .and_then(Value::as_f64)
                .map(|bytes| bytes * 8.0)
        };
        SpeedtestSummary {
            download_bps: bandwidth("download"),
            upload_bps: bandwidth("upload"),
            ping_ms: self
                .0
                .get("ping")
                .and_then(|p| p.get("latency"))
                .and_then(Value::as_f64),
            server: self
                .0
                .get("server")
                .and_then(|s| s.get("name"))
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

impl fmt::Display for SpeedtestSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rate = |v: Option<f64>| v.map(format_bits_per_second).unwrap_or_else(|| "-".into());
        write!(
            f,
            "Download: {} Upload: {} Ping: {}",
            rate(self.download_bps),
            rate(self.upload_bps),
            self.ping_ms
                .map(|ms| format!("{ms:.1} ms"))
                .unwrap_or_else(|| "-".into())
        )?;
        if let Some(server) = &self.server {
            write!(f, " Server: {server}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn wire_names_match_telemetry_fields() {
        let cpu = CpuStats {
            proc_cpus: 4,
            node_cpus: 4,
            load_avgs: [0.5, 0.25, 0.0],
        };
        assert_eq!(
            serde_json::to_value(&cpu).unwrap(),
            json!({"procCPUs": 4, "nodeCPUs": 4, "loadAvgs": [0.5, 0.25, 0.0]})
        );

        let mem = MemoryStats {
            proc_total_memory: 16.4,
            node_total_memory: 16.0,
            proc_free_memory: 1.2,
            proc_available_memory: 9.8,
            node_available_memory: 9.6,
        };
        let value = serde_json::to_value(&mem).unwrap();
        assert_eq!(value["procTotalMemory"], json!(16.4));
        assert_eq!(value["nodeAvailableMemory"], json!(9.6));
    }

    #[test]
    fn available_above_total_is_flagged() {
        let mut mem = MemoryStats {
            proc_total_memory: 8.0,
            node_total_memory: 7.8,
            proc_free_memory: 1.0,
            proc_available_memory: 4.0,
            node_available_memory: 3.9,
        };
        assert!(!mem.available_exceeds_total());
        mem.proc_available_memory = 8.0;
        assert!(!mem.available_exceeds_total());
        mem.proc_available_memory = 9.5;
        assert!(mem.available_exceeds_total());
    }

    #[test]
    fn summary_reads_ookla_fields() {
        let result = SpeedtestResult(json!({
            "type": "result",
            "ping": {"jitter": 0.4, "latency": 11.5},
            "download": {"bandwidth": 11_676_500, "bytes": 100},
            "upload": {"bandwidth": 2_500_000},
            "server": {"name": "Example ISP", "id": 1}
        }));
        let summary = result.summary();
        assert_eq!(summary.download_bps, Some(93_412_000.0));
        assert_eq!(summary.upload_bps, Some(20_000_000.0));
        assert_eq!(summary.ping_ms, Some(11.5));
        assert_eq!(summary.server.as_deref(), Some("Example ISP"));
        assert_eq!(
            summary.to_string(),
            "Download: 93.41 Mbps Upload: 20.00 Mbps Ping: 11.5 ms Server: Example ISP"
        );
    }

    #[test]
    fn summary_tolerates_unexpected_shapes() {
        let summary = SpeedtestResult(json!([1, 2, 3])).summary();
        assert_eq!(summary, SpeedtestSummary::default());
        assert_eq!(summary.to_string(), "Download: - Upload: - Ping: -");
    }
}
