use sysinfo::System;

use crate::error::ProbeError;
use crate::stats::{HostCpu, HostMemory};

fn read_memory() -> HostMemory {
    let mut sys = System::new();
    sys.refresh_memory();
    HostMemory {
        total_bytes: sys.total_memory(),
        available_bytes: sys.available_memory(),
    }
}

fn read_cpu() -> HostCpu {
    let mut sys = System::new();
    sys.refresh_cpu_all();
    let load = System::load_average();
    HostCpu {
        logical_cpus: sys.cpus().len(),
        load_average: [load.one, load.five, load.fifteen],
    }
}

// sysinfo reads /proc synchronously; keep it off the async executor.
pub async fn memory() -> Result<HostMemory, ProbeError> {
    tokio::task::spawn_blocking(read_memory)
        .await
        .map_err(ProbeError::HostReading)
}

pub async fn cpu() -> Result<HostCpu, ProbeError> {
    tokio::task::spawn_blocking(read_cpu)
        .await
        .map_err(ProbeError::HostReading)
}
