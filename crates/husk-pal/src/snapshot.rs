//! One-shot capture of the host facts the PAL exposes.

use crate::pal::{HostOps, OsInfo, ProcOps};
use crate::PalResult;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Everything the host queries report, gathered at one point in time.
///
/// Values that move (tick count, working set) are whatever they were at
/// collection; re-collect rather than reuse a stale snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostSnapshot {
    pub machine_name: String,
    pub user_name: String,
    pub user_domain_name: String,
    pub os: OsInfo,
    pub is_64bit_process: bool,
    pub is_64bit_os: bool,
    pub processor_count: usize,
    pub page_size: u64,
    pub tick_count_ms: u64,
    pub working_set_bytes: u64,
    pub process_id: u32,
    pub interactive: bool,
}

/// Collects a [`HostSnapshot`] through any PAL.
pub fn collect<P>(pal: &P) -> PalResult<HostSnapshot>
where
    P: HostOps + ProcOps + ?Sized,
{
    Ok(HostSnapshot {
        machine_name: pal.machine_name()?,
        user_name: pal.user_name()?,
        user_domain_name: pal.user_domain_name()?,
        os: pal.os_info()?,
        is_64bit_process: pal.is_64bit_process(),
        is_64bit_os: pal.is_64bit_os()?,
        processor_count: pal.processor_count()?,
        page_size: pal.page_size()?,
        tick_count_ms: pal.tick_count()?,
        working_set_bytes: pal.working_set()?,
        process_id: pal.process_id(),
        interactive: pal.is_interactive(),
    })
}

impl fmt::Display for HostSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "host      : {} ({})", self.machine_name, self.os.describe())?;
        writeln!(
            f,
            "user      : {} @ {}",
            self.user_name, self.user_domain_name
        )?;
        writeln!(
            f,
            "arch      : {} ({}-bit os, {}-bit process)",
            self.os.machine,
            if self.is_64bit_os { 64 } else { 32 },
            if self.is_64bit_process { 64 } else { 32 },
        )?;
        writeln!(
            f,
            "cpu/mem   : {} cpus, {} B pages, {} B resident",
            self.processor_count, self.page_size, self.working_set_bytes
        )?;
        writeln!(f, "uptime    : {} ms", self.tick_count_ms)?;
        write!(
            f,
            "process   : pid {} ({})",
            self.process_id,
            if self.interactive {
                "interactive"
            } else {
                "non-interactive"
            }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pal::FakePal;

    #[test]
    fn collect_reads_arranged_facts() {
        let pal = FakePal::new();
        pal.set_machine_name("build-07");
        pal.set_user_name("ci");
        pal.set_processor_count(16);
        pal.set_tick_count(90_000);
        pal.set_working_set(64 * 1024 * 1024);

        let snap = collect(&pal).unwrap();

        assert_eq!(snap.machine_name, "build-07");
        assert_eq!(snap.user_name, "ci");
        assert_eq!(snap.user_domain_name, "build-07");
        assert_eq!(snap.processor_count, 16);
        assert_eq!(snap.tick_count_ms, 90_000);
        assert_eq!(snap.working_set_bytes, 64 * 1024 * 1024);
        assert_eq!(snap.process_id, 4242);
    }

    #[test]
    fn snapshot_serializes_to_json() {
        let snap = collect(&FakePal::new()).unwrap();
        let json = serde_json::to_string(&snap).unwrap();
        assert!(json.contains("\"machine_name\":\"fakehost\""));

        let back: HostSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(back.machine_name, snap.machine_name);
    }

    #[test]
    fn display_mentions_host_and_pid() {
        let snap = collect(&FakePal::new()).unwrap();
        let text = snap.to_string();
        assert!(text.contains("fakehost"));
        assert!(text.contains("pid 4242"));
    }
}
