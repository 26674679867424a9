//! Native PAL implementation backed by real platform state.

use super::env_ops::{validate_var_name, validate_var_write};
use super::{DirOps, EnvOps, EnvScope, HostOps, OsInfo, ProcOps, SpecialDirOption, SpecialFolder};
use crate::procfs::{cmdline, mountinfo, status, uptime};
use crate::{os_release, PalError, PalResult};
use std::collections::BTreeMap;
use std::fs;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicI32, Ordering};

/// Where system executables live on a conventional Linux layout.
const SYSTEM_DIR: &str = "/usr/bin";

/// Exit code staged by [`ProcOps::set_exit_code`] for a later normal exit.
/// Process-wide by nature, like the environment block itself.
static PENDING_EXIT_CODE: AtomicI32 = AtomicI32::new(0);

/// Real PAL implementation for Linux systems.
///
/// Probe file locations are fields so tests can point the adapter at
/// fixture files instead of the live `/proc` and `/etc`.
#[derive(Debug, Clone)]
pub struct NativePal {
    proc_root: PathBuf,
    os_release_path: PathBuf,
}

impl Default for NativePal {
    fn default() -> Self {
        Self {
            proc_root: PathBuf::from("/proc"),
            os_release_path: PathBuf::from("/etc/os-release"),
        }
    }
}

impl NativePal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds an adapter reading `/proc`-style and `os-release`-style data
    /// from the given locations instead of the defaults.
    pub fn with_probe_paths(
        proc_root: impl Into<PathBuf>,
        os_release_path: impl Into<PathBuf>,
    ) -> Self {
        Self {
            proc_root: proc_root.into(),
            os_release_path: os_release_path.into(),
        }
    }

    fn read_proc(&self, rel: &str) -> PalResult<String> {
        let path = self.proc_root.join(rel);
        fs::read_to_string(&path).map_err(|err| PalError::from_path_io(&path, err))
    }
}

fn scope_unsupported(scope: EnvScope) -> PalError {
    PalError::Unsupported(format!(
        "no persistent {scope}-scope environment store on this platform"
    ))
}

fn is_64bit_machine(machine: &str) -> bool {
    machine.contains("64") || machine == "s390x"
}

fn lossy(value: std::ffi::OsString) -> String {
    value.to_string_lossy().into_owned()
}

impl EnvOps for NativePal {
    fn var_in(&self, name: &str, scope: EnvScope) -> PalResult<Option<String>> {
        validate_var_name(name)?;
        match scope {
            EnvScope::Process => Ok(std::env::var_os(name).map(lossy)),
            other => Err(scope_unsupported(other)),
        }
    }

    fn set_var_in(&self, name: &str, value: &str, scope: EnvScope) -> PalResult<()> {
        validate_var_write(name, value, scope)?;
        match scope {
            EnvScope::Process => {
                if value.is_empty() {
                    std::env::remove_var(name);
                } else {
                    std::env::set_var(name, value);
                }
                Ok(())
            }
            other => Err(scope_unsupported(other)),
        }
    }

    fn vars_in(&self, scope: EnvScope) -> PalResult<BTreeMap<String, String>> {
        match scope {
            EnvScope::Process => Ok(std::env::vars_os()
                .map(|(key, value)| (lossy(key), lossy(value)))
                .collect()),
            other => Err(scope_unsupported(other)),
        }
    }
}

impl DirOps for NativePal {
    fn current_dir(&self) -> PalResult<PathBuf> {
        std::env::current_dir().map_err(PalError::Io)
    }

    fn set_current_dir(&self, path: &Path) -> PalResult<()> {
        if path.as_os_str().is_empty() {
            return Err(PalError::InvalidArgument(
                "current directory path is empty".to_string(),
            ));
        }
        std::env::set_current_dir(path).map_err(|err| PalError::from_path_io(path, err))
    }

    fn home_dir(&self) -> Option<PathBuf> {
        dirs::home_dir()
    }

    fn temp_dir(&self) -> PathBuf {
        std::env::temp_dir()
    }

    fn system_dir(&self) -> PathBuf {
        PathBuf::from(SYSTEM_DIR)
    }

    fn special_dir_with(
        &self,
        folder: SpecialFolder,
        option: SpecialDirOption,
    ) -> PalResult<Option<PathBuf>> {
        let Some(path) = resolve_special_dir(folder) else {
            return Ok(None);
        };
        match option {
            SpecialDirOption::DoNotVerify => Ok(Some(path)),
            SpecialDirOption::VerifyExists => Ok(path.is_dir().then_some(path)),
            SpecialDirOption::Create => {
                fs::create_dir_all(&path).map_err(|err| PalError::from_path_io(&path, err))?;
                Ok(Some(path))
            }
        }
    }

    fn logical_drives(&self) -> PalResult<Vec<PathBuf>> {
        let content = self.read_proc("self/mountinfo")?;
        Ok(mountinfo::logical_roots(&content))
    }
}

fn resolve_special_dir(folder: SpecialFolder) -> Option<PathBuf> {
    match folder {
        SpecialFolder::Home => dirs::home_dir(),
        SpecialFolder::Cache => dirs::cache_dir(),
        SpecialFolder::Config => dirs::config_dir(),
        SpecialFolder::Data => dirs::data_dir(),
        SpecialFolder::DataLocal => dirs::data_local_dir(),
        SpecialFolder::State => dirs::state_dir(),
        SpecialFolder::Runtime => dirs::runtime_dir(),
        SpecialFolder::Executables => dirs::executable_dir(),
        SpecialFolder::Fonts => dirs::font_dir(),
        SpecialFolder::Desktop => dirs::desktop_dir(),
        SpecialFolder::Documents => dirs::document_dir(),
        SpecialFolder::Downloads => dirs::download_dir(),
        SpecialFolder::Music => dirs::audio_dir(),
        SpecialFolder::Pictures => dirs::picture_dir(),
        SpecialFolder::Public => dirs::public_dir(),
        SpecialFolder::Templates => dirs::template_dir(),
        SpecialFolder::Videos => dirs::video_dir(),
    }
}

impl HostOps for NativePal {
    fn machine_name(&self) -> PalResult<String> {
        let name = nix::unistd::gethostname().map_err(PalError::Nix)?;
        Ok(lossy(name))
    }

    fn user_name(&self) -> PalResult<String> {
        let uid = nix::unistd::getuid();
        if let Some(user) = nix::unistd::User::from_uid(uid).map_err(PalError::Nix)? {
            return Ok(user.name);
        }
        // Minimal containers can run under a uid with no passwd entry.
        for key in ["USER", "LOGNAME"] {
            if let Some(name) = std::env::var_os(key) {
                log::warn!("no passwd entry for uid {uid}, using ${key}");
                return Ok(lossy(name));
            }
        }
        Err(PalError::Platform(format!("no user record for uid {uid}")))
    }

    fn user_domain_name(&self) -> PalResult<String> {
        // Unix hosts have no directory domain; the machine name stands in.
        self.machine_name()
    }

    fn os_info(&self) -> PalResult<OsInfo> {
        let uts = nix::sys::utsname::uname().map_err(PalError::Nix)?;
        // A host without os-release is a supported configuration.
        let release = match fs::read_to_string(&self.os_release_path) {
            Ok(content) => os_release::parse_os_release(&content),
            Err(_) => os_release::OsRelease::default(),
        };
        Ok(OsInfo {
            sysname: uts.sysname().to_string_lossy().into_owned(),
            kernel_release: uts.release().to_string_lossy().into_owned(),
            machine: uts.machine().to_string_lossy().into_owned(),
            distro_id: release.id,
            distro_version: release.version_id,
            pretty_name: release.pretty_name,
        })
    }

    fn is_64bit_process(&self) -> bool {
        cfg!(target_pointer_width = "64")
    }

    fn is_64bit_os(&self) -> PalResult<bool> {
        if self.is_64bit_process() {
            return Ok(true);
        }
        // A 32-bit process can still be on a 64-bit kernel.
        let uts = nix::sys::utsname::uname().map_err(PalError::Nix)?;
        Ok(is_64bit_machine(&uts.machine().to_string_lossy()))
    }

    fn processor_count(&self) -> PalResult<usize> {
        Ok(std::thread::available_parallelism()
            .map_err(PalError::Io)?
            .get())
    }

    fn page_size(&self) -> PalResult<u64> {
        match nix::unistd::sysconf(nix::unistd::SysconfVar::PAGE_SIZE).map_err(PalError::Nix)? {
            Some(size) if size > 0 => Ok(size as u64),
            _ => Err(PalError::Platform("page size is indeterminate".to_string())),
        }
    }

    fn tick_count(&self) -> PalResult<u64> {
        let content = self.read_proc("uptime")?;
        uptime::parse_uptime_ms(&content).ok_or_else(|| {
            PalError::Parse(format!(
                "unrecognized uptime format in {}",
                self.proc_root.join("uptime").display()
            ))
        })
    }

    fn working_set(&self) -> PalResult<u64> {
        let content = self.read_proc("self/status")?;
        status::parse_vm_rss_bytes(&content).ok_or_else(|| {
            PalError::Parse(format!(
                "no VmRSS line in {}",
                self.proc_root.join("self/status").display()
            ))
        })
    }

    fn is_interactive(&self) -> bool {
        std::io::stdin().is_terminal() || std::io::stdout().is_terminal()
    }
}

impl ProcOps for NativePal {
    fn args(&self) -> PalResult<Vec<String>> {
        Ok(std::env::args_os().map(lossy).collect())
    }

    fn command_line(&self) -> PalResult<String> {
        let path = self.proc_root.join("self/cmdline");
        let raw = fs::read(&path).map_err(|err| PalError::from_path_io(&path, err))?;
        Ok(cmdline::join_command_line(&cmdline::parse_cmdline(&raw)))
    }

    fn current_exe(&self) -> PalResult<PathBuf> {
        std::env::current_exe().map_err(PalError::Io)
    }

    fn process_id(&self) -> u32 {
        std::process::id()
    }

    fn thread_id(&self) -> i32 {
        nix::unistd::gettid().as_raw()
    }

    fn exit_code(&self) -> i32 {
        PENDING_EXIT_CODE.load(Ordering::SeqCst)
    }

    fn set_exit_code(&self, code: i32) {
        PENDING_EXIT_CODE.store(code, Ordering::SeqCst);
    }

    fn has_shutdown_started(&self) -> bool {
        // A plain Unix process gets no advance notice of system shutdown.
        false
    }

    fn exit(&self, code: i32) -> ! {
        log::debug!("process exit requested (code {code})");
        std::process::exit(code)
    }

    fn fail_fast(&self, message: &str, cause: Option<&dyn std::error::Error>) -> ! {
        log::error!("fail-fast: {message}");
        eprintln!("fatal: {message}");
        if let Some(cause) = cause {
            eprintln!("cause: {cause}");
            let mut source = cause.source();
            while let Some(err) = source {
                eprintln!("  caused by: {err}");
                source = err.source();
            }
        }
        std::process::abort()
    }
}
