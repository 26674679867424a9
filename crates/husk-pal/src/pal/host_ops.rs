//! Host identity and capacity queries (read-only).
//!
//! Everything here reads live platform state (`/proc`, `/etc`, uname) and is
//! re-queried on every call. Values like tick count and working set move
//! between calls; nothing is cached.

use crate::PalResult;
use serde::{Deserialize, Serialize};

/// Operating system identification assembled from uname and os-release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsInfo {
    /// Kernel name (e.g. "Linux").
    pub sysname: String,
    /// Kernel release string (e.g. "6.8.0-45-generic").
    pub kernel_release: String,
    /// Machine hardware name (e.g. "x86_64").
    pub machine: String,
    /// Distribution id, lowercased (e.g. "fedora").
    pub distro_id: Option<String>,
    /// Distribution version, kept verbatim ("43", "24.04").
    pub distro_version: Option<String>,
    /// Human-readable description (PRETTY_NAME).
    pub pretty_name: Option<String>,
}

impl OsInfo {
    /// One-line summary for logs and display.
    pub fn describe(&self) -> String {
        match &self.pretty_name {
            Some(pretty) => format!("{} ({} {})", pretty, self.sysname, self.kernel_release),
            None => format!("{} {}", self.sysname, self.kernel_release),
        }
    }
}

/// Trait for host identity and capacity queries.
pub trait HostOps {
    /// The host's name.
    fn machine_name(&self) -> PalResult<String>;

    /// The account name the process runs under.
    fn user_name(&self) -> PalResult<String>;

    /// The network domain associated with the current user.
    fn user_domain_name(&self) -> PalResult<String>;

    /// Operating system identification.
    fn os_info(&self) -> PalResult<OsInfo>;

    /// Whether this process runs with a 64-bit address space.
    fn is_64bit_process(&self) -> bool;

    /// Whether the underlying OS is 64-bit (it can be while the process
    /// is not).
    fn is_64bit_os(&self) -> PalResult<bool>;

    /// Number of processors available to this process.
    fn processor_count(&self) -> PalResult<usize>;

    /// Memory page size in bytes.
    fn page_size(&self) -> PalResult<u64>;

    /// Milliseconds since the system booted.
    fn tick_count(&self) -> PalResult<u64>;

    /// Physical memory mapped into this process, in bytes.
    fn working_set(&self) -> PalResult<u64>;

    /// Whether the process is attached to an interactive terminal.
    fn is_interactive(&self) -> bool;
}
