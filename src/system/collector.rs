use std::path::Path;

use tracing::{debug, instrument, warn};

use super::command;
use super::host;
use super::report::{ProbeFailure, ProbeKind, Report};
use crate::config::Config;
use crate::error::ProbeError;
use crate::parse::{cpuinfo, df, meminfo, net_dev, speedtest};
use crate::stats::{CpuStats, DiskStats, MemoryStats, NicSample, SpeedtestResult};

/// Runs the probes described by a [`Config`]. Holds no state between calls.
#[derive(Debug, Clone, Default)]
pub struct Collector {
    config: Config,
}

async fn read_source(path: &Path) -> Result<String, ProbeError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| ProbeError::Io {
            path: path.to_path_buf(),
            source,
        })
}

impl Collector {
    pub fn new(config: Config) -> Self {
        Collector { config }
    }

    #[instrument(name = "probe.memory", skip_all)]
    pub async fn memory(&self) -> Result<MemoryStats, ProbeError> {
        let (text, host) = tokio::join!(
            read_source(&self.config.sources.meminfo),
            host::memory()
        );
        let stats = meminfo::memory_stats(&text?, host?)?;
        if stats.available_exceeds_total() {
            warn!(
                available = stats.proc_available_memory,
                total = stats.proc_total_memory,
                "meminfo reports more available than total memory"
            );
        }
        debug!("{stats}");
        Ok(stats)
    }

    #[instrument(name = "probe.disk", skip_all, fields(target = %self.config.disk.target.display()))]
    pub async fn disk(&self) -> Result<DiskStats, ProbeError> {
        let disk = &self.config.disk;
        let output = command::run(&disk.program, &disk.args()).await?;
        let stats = df::parse_df(&output, &disk.block_size)?;
        debug!("{stats}");
        Ok(stats)
    }

    #[instrument(name = "probe.cpu", skip_all)]
    pub async fn cpu(&self) -> Result<CpuStats, ProbeError> {
        let (text, host) = tokio::join!(read_source(&self.config.sources.cpuinfo), host::cpu());
        let stats = cpuinfo::cpu_stats(&text?, host?);
        debug!("{stats}");
        Ok(stats)
    }

    /// The primary interface, or `None` when no interface is eligible.
    #[instrument(name = "probe.nic", skip_all)]
    pub async fn nic(&self) -> Result<Option<NicSample>, ProbeError> {
        let text = read_source(&self.config.sources.net_dev).await?;
        let eligible = net_dev::eligible_interfaces(
            net_dev::parse_net_dev(&text)?,
            &self.config.network.excluded_interfaces,
        );
        debug!(?eligible, "eligible interfaces");
        let primary = eligible.into_iter().next();
        if primary.is_none() {
            debug!("no eligible network interface");
        }
        Ok(primary)
    }

    #[instrument(name = "probe.speedtest", skip_all)]
    pub async fn speedtest(&self) -> Result<SpeedtestResult, ProbeError> {
        let cfg = &self.config.speedtest;
        debug!(command = %command::render(&cfg.program, &cfg.args), "executing speedtest");
        let output = command::run(&cfg.program, &cfg.args).await?;
        let result = speedtest::parse_speedtest(&output)?;
        debug!(result = %result.0, "speedtest finished");
        Ok(result)
    }

    /// Run every probe concurrently. A failed probe is recorded in
    /// [`Report::failures`] and does not prevent the others from reporting.
    pub async fn report(&self, include_speedtest: bool) -> Report {
        let speedtest = async {
            if include_speedtest {
                Some(self.speedtest().await)
            } else {
                None
            }
        };
        let (memory, disk, cpu, nic, speedtest) = tokio::join!(
            self.memory(),
            self.disk(),
            self.cpu(),
            self.nic(),
            speedtest
        );

        let mut failures = Vec::new();
        let mut keep = |probe: ProbeKind, err: ProbeError| {
            warn!(%probe, error = %err, "probe failed");
            failures.push(ProbeFailure {
                probe,
                message: err.to_string(),
            });
        };

        let memory = memory.map_err(|e| keep(ProbeKind::Memory, e)).ok();
        let disk = disk.map_err(|e| keep(ProbeKind::Disk, e)).ok();
        let cpu = cpu.map_err(|e| keep(ProbeKind::Cpu, e)).ok();
        let nic = nic.map_err(|e| keep(ProbeKind::Nic, e)).ok().flatten();
        let speedtest = speedtest.and_then(|r| r.map_err(|e| keep(ProbeKind::Speedtest, e)).ok());

        Report {
            memory,
            disk,
            cpu,
            nic,
            speedtest,
            failures,
        }
    }
}
