use crate::stats::{CpuStats, HostCpu};

/// Count the blank-line separated per-CPU blocks of `/proc/cpuinfo`.
pub fn count_cpu_blocks(text: &str) -> usize {
    let text = text.trim();
    if text.is_empty() {
        return 0;
    }
    text.split("\n\n").count()
}

pub fn cpu_stats(text: &str, host: HostCpu) -> CpuStats {
    CpuStats {
        proc_cpus: count_cpu_blocks(text),
        node_cpus: host.logical_cpus,
        load_avgs: host.load_average,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn block(n: usize) -> String {
        format!("processor\t: {n}\nvendor_id\t: GenuineIntel\nmodel name\t: Example CPU @ 2.40GHz\nflags\t\t: fpu vme de pse")
    }

    #[test]
    fn counts_blocks_and_keeps_host_values() {
        let text = format!("{}\n\n{}\n\n", block(0), block(1));
        let stats = cpu_stats(
            &text,
            HostCpu {
                logical_cpus: 8,
                load_average: [1.5, 0.75, 0.25],
            },
        );
        assert_eq!(stats.proc_cpus, 2);
        assert_eq!(stats.node_cpus, 8);
        assert_eq!(stats.load_avgs, [1.5, 0.75, 0.25]);
    }

    #[test]
    fn empty_text_has_no_cpus() {
        assert_eq!(count_cpu_blocks(""), 0);
        assert_eq!(count_cpu_blocks("\n\n"), 0);
    }

    proptest! {
        #[test]
        fn counts_n_blocks(n in 1usize..256) {
            let text = (0..n).map(block).collect::<Vec<_>>().join("\n\n") + "\n\n";
            prop_assert_eq!(count_cpu_blocks(&text), n);
        }
    }
}
