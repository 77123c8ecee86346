/// Divisor for byte counts reported by the OS API.
pub const HOST_BYTES_PER_GB: f64 = 1_024_000_000.0;
/// Divisor for the kB values in `/proc/meminfo`.
pub const MEMINFO_KB_PER_GB: f64 = 1_000_000.0;

pub fn round_1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

pub fn host_bytes_to_gb(bytes: u64) -> f64 {
    round_1(bytes as f64 / HOST_BYTES_PER_GB)
}

pub fn meminfo_kb_to_gb(kb: u64) -> f64 {
    round_1(kb as f64 / MEMINFO_KB_PER_GB)
}

pub fn format_bytes(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = 1024 * 1024;
    const GB: u64 = 1024 * 1024 * 1024;

    if bytes >= GB {
        format!("{:.1} GB", bytes as f64 / GB as f64)
    } else if bytes >= MB {
        format!("{:.1} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.0} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

pub fn format_bits_per_second(bps: f64) -> String {
    if bps >= 1_000_000_000.0 {
        format!("{:.2} Gbps", bps / 1_000_000_000.0)
    } else if bps >= 1_000_000.0 {
        format!("{:.2} Mbps", bps / 1_000_000.0)
    } else if bps >= 1_000.0 {
        format!("{:.0} Kbps", bps / 1_000.0)
    } else {
        format!("{bps:.0} bps")
    }
}
