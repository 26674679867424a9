//! Parsing helpers for `/proc/self/status`.

/// Extracts the resident set size from `/proc/self/status` content.
///
/// Returns the value in bytes. The kernel reports `VmRSS` in KiB.
pub fn parse_vm_rss_bytes(content: &str) -> Option<u64> {
    for line in content.lines() {
        if let Some(value) = line.strip_prefix("VmRSS:") {
            return value
                .split_whitespace()
                .next()
                .and_then(|num| num.parse::<u64>().ok())
                .map(|kb| kb * 1024);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_vm_rss_converts_kib_to_bytes() {
        let data = "Name:\tcat\nVmPeak:\t  1000 kB\nVmRSS:\t    512 kB\n";
        assert_eq!(parse_vm_rss_bytes(data), Some(512 * 1024));
    }

    #[test]
    fn parse_vm_rss_missing_returns_none() {
        // Kernel threads have no VmRSS line.
        let data = "Name:\tkthreadd\nState:\tS (sleeping)\n";
        assert_eq!(parse_vm_rss_bytes(data), None);
    }
}
