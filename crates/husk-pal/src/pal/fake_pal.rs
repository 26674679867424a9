//! Fake PAL implementation for testing.
//!
//! This implementation answers every query from in-memory state and records
//! every mutation without touching the real process or host, allowing
//! CI-safe testing of environment- and lifecycle-dependent code.

use super::env_ops::{validate_var_name, validate_var_write};
use super::{DirOps, EnvOps, EnvScope, HostOps, OsInfo, ProcOps, SpecialDirOption, SpecialFolder};
use crate::procfs::cmdline;
use crate::{PalError, PalResult};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// Operation records for testing and verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Operation {
    SetVar {
        name: String,
        value: String,
        scope: EnvScope,
    },
    RemoveVar {
        name: String,
        scope: EnvScope,
    },
    SetCurrentDir {
        path: PathBuf,
    },
    CreateSpecialDir {
        folder: SpecialFolder,
        path: PathBuf,
    },
    SetExitCode {
        code: i32,
    },
    Exit {
        code: i32,
    },
    FailFast {
        message: String,
        cause: Option<String>,
    },
}

/// Shared state for FakePal operations.
#[derive(Debug, Clone)]
struct FakePalState {
    /// All mutations that were recorded
    operations: Vec<Operation>,
    process_env: BTreeMap<String, String>,
    user_env: BTreeMap<String, String>,
    machine_env: BTreeMap<String, String>,
    cwd: PathBuf,
    /// Directories that "exist" in the fake filesystem
    known_dirs: HashSet<PathBuf>,
    special_dirs: HashMap<SpecialFolder, PathBuf>,
    drives: Vec<PathBuf>,
    temp_dir: PathBuf,
    system_dir: PathBuf,
    machine_name: String,
    user_name: String,
    os_info: OsInfo,
    args: Vec<String>,
    exit_code: i32,
    shutdown_started: bool,
    interactive: bool,
    is_64bit_process: bool,
    is_64bit_os: bool,
    processor_count: usize,
    page_size: u64,
    tick_count_ms: u64,
    working_set_bytes: u64,
    process_id: u32,
    thread_id: i32,
}

impl Default for FakePalState {
    fn default() -> Self {
        let home = PathBuf::from("/home/fake");
        let mut known_dirs = HashSet::new();
        known_dirs.insert(PathBuf::from("/"));
        known_dirs.insert(PathBuf::from("/tmp"));
        known_dirs.insert(home.clone());
        let mut special_dirs = HashMap::new();
        special_dirs.insert(SpecialFolder::Home, home);

        Self {
            operations: Vec::new(),
            process_env: BTreeMap::new(),
            user_env: BTreeMap::new(),
            machine_env: BTreeMap::new(),
            cwd: PathBuf::from("/"),
            known_dirs,
            special_dirs,
            drives: vec![PathBuf::from("/")],
            temp_dir: PathBuf::from("/tmp"),
            system_dir: PathBuf::from("/usr/bin"),
            machine_name: "fakehost".to_string(),
            user_name: "fakeuser".to_string(),
            os_info: OsInfo {
                sysname: "FakeOS".to_string(),
                kernel_release: "0.0.0-fake".to_string(),
                machine: "x86_64".to_string(),
                distro_id: Some("fakeos".to_string()),
                distro_version: Some("1".to_string()),
                pretty_name: Some("FakeOS 1".to_string()),
            },
            args: vec!["/usr/bin/husk-fake".to_string()],
            exit_code: 0,
            shutdown_started: false,
            interactive: false,
            is_64bit_process: true,
            is_64bit_os: true,
            processor_count: 1,
            page_size: 4096,
            tick_count_ms: 0,
            working_set_bytes: 0,
            process_id: 4242,
            thread_id: 4243,
        }
    }
}

impl FakePalState {
    fn env_map(&self, scope: EnvScope) -> &BTreeMap<String, String> {
        match scope {
            EnvScope::Process => &self.process_env,
            EnvScope::User => &self.user_env,
            EnvScope::Machine => &self.machine_env,
        }
    }

    fn env_map_mut(&mut self, scope: EnvScope) -> &mut BTreeMap<String, String> {
        match scope {
            EnvScope::Process => &mut self.process_env,
            EnvScope::User => &mut self.user_env,
            EnvScope::Machine => &mut self.machine_env,
        }
    }
}

/// Fake PAL implementation that simulates a host in memory.
///
/// Queries are answered from arranged state; mutations update that state and
/// are recorded for later inspection. The terminal operations (`exit`,
/// `fail_fast`) record the request and then panic, so tests observe them
/// with `std::panic::catch_unwind`.
#[derive(Debug, Clone, Default)]
pub struct FakePal {
    state: Arc<Mutex<FakePalState>>,
}

impl FakePal {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded operations.
    pub fn operations(&self) -> Vec<Operation> {
        self.state.lock().unwrap().operations.clone()
    }

    /// Get the number of operations recorded.
    pub fn operation_count(&self) -> usize {
        self.state.lock().unwrap().operations.len()
    }

    /// Check if a specific operation was recorded.
    pub fn has_operation(&self, check: impl Fn(&Operation) -> bool) -> bool {
        self.state.lock().unwrap().operations.iter().any(check)
    }

    /// Clear the recorded operation log, keeping the arranged world.
    pub fn clear(&self) {
        self.state.lock().unwrap().operations.clear();
    }

    fn record_operation(&self, op: Operation) {
        self.state.lock().unwrap().operations.push(op);
    }

    // World arrangement, for test setup. None of these record operations.

    /// Seed a variable directly, bypassing validation and recording.
    pub fn seed_var(&self, name: &str, value: &str, scope: EnvScope) {
        self.state
            .lock()
            .unwrap()
            .env_map_mut(scope)
            .insert(name.to_string(), value.to_string());
    }

    /// Make a directory "exist" in the fake filesystem.
    pub fn add_dir(&self, path: impl Into<PathBuf>) {
        self.state.lock().unwrap().known_dirs.insert(path.into());
    }

    /// Give a special folder a location (it does not "exist" until
    /// [`FakePal::add_dir`] or a create-mode lookup adds it).
    pub fn set_special_dir(&self, folder: SpecialFolder, path: impl Into<PathBuf>) {
        self.state
            .lock()
            .unwrap()
            .special_dirs
            .insert(folder, path.into());
    }

    pub fn set_drives(&self, drives: Vec<PathBuf>) {
        let mut state = self.state.lock().unwrap();
        state.drives = drives;
        state.drives.sort();
        state.drives.dedup();
    }

    pub fn set_machine_name(&self, name: impl Into<String>) {
        self.state.lock().unwrap().machine_name = name.into();
    }

    pub fn set_user_name(&self, name: impl Into<String>) {
        self.state.lock().unwrap().user_name = name.into();
    }

    pub fn set_os_info(&self, info: OsInfo) {
        self.state.lock().unwrap().os_info = info;
    }

    pub fn set_args(&self, args: Vec<String>) {
        self.state.lock().unwrap().args = args;
    }

    pub fn set_interactive(&self, interactive: bool) {
        self.state.lock().unwrap().interactive = interactive;
    }

    pub fn set_shutdown_started(&self, started: bool) {
        self.state.lock().unwrap().shutdown_started = started;
    }

    pub fn set_bitness(&self, process_64bit: bool, os_64bit: bool) {
        let mut state = self.state.lock().unwrap();
        state.is_64bit_process = process_64bit;
        state.is_64bit_os = os_64bit;
    }

    pub fn set_processor_count(&self, count: usize) {
        self.state.lock().unwrap().processor_count = count;
    }

    pub fn set_page_size(&self, bytes: u64) {
        self.state.lock().unwrap().page_size = bytes;
    }

    pub fn set_tick_count(&self, ms: u64) {
        self.state.lock().unwrap().tick_count_ms = ms;
    }

    pub fn set_working_set(&self, bytes: u64) {
        self.state.lock().unwrap().working_set_bytes = bytes;
    }
}

impl EnvOps for FakePal {
    fn var_in(&self, name: &str, scope: EnvScope) -> PalResult<Option<String>> {
        validate_var_name(name)?;
        Ok(self.state.lock().unwrap().env_map(scope).get(name).cloned())
    }

    fn set_var_in(&self, name: &str, value: &str, scope: EnvScope) -> PalResult<()> {
        validate_var_write(name, value, scope)?;
        let mut state = self.state.lock().unwrap();
        if value.is_empty() {
            log::info!("FAKE PAL: remove {scope} var {name}");
            state.env_map_mut(scope).remove(name);
            state.operations.push(Operation::RemoveVar {
                name: name.to_string(),
                scope,
            });
        } else {
            log::info!("FAKE PAL: set {scope} var {name}={value}");
            state
                .env_map_mut(scope)
                .insert(name.to_string(), value.to_string());
            state.operations.push(Operation::SetVar {
                name: name.to_string(),
                value: value.to_string(),
                scope,
            });
        }
        Ok(())
    }

    fn vars_in(&self, scope: EnvScope) -> PalResult<BTreeMap<String, String>> {
        Ok(self.state.lock().unwrap().env_map(scope).clone())
    }
}

impl DirOps for FakePal {
    fn current_dir(&self) -> PalResult<PathBuf> {
        Ok(self.state.lock().unwrap().cwd.clone())
    }

    fn set_current_dir(&self, path: &Path) -> PalResult<()> {
        if path.as_os_str().is_empty() {
            return Err(PalError::InvalidArgument(
                "current directory path is empty".to_string(),
            ));
        }
        let mut state = self.state.lock().unwrap();
        if !state.known_dirs.contains(path) {
            return Err(PalError::NotFound(path.display().to_string()));
        }
        log::info!("FAKE PAL: cd {}", path.display());
        state.cwd = path.to_path_buf();
        state.operations.push(Operation::SetCurrentDir {
            path: path.to_path_buf(),
        });
        Ok(())
    }

    fn home_dir(&self) -> Option<PathBuf> {
        self.state
            .lock()
            .unwrap()
            .special_dirs
            .get(&SpecialFolder::Home)
            .cloned()
    }

    fn temp_dir(&self) -> PathBuf {
        self.state.lock().unwrap().temp_dir.clone()
    }

    fn system_dir(&self) -> PathBuf {
        self.state.lock().unwrap().system_dir.clone()
    }

    fn special_dir_with(
        &self,
        folder: SpecialFolder,
        option: SpecialDirOption,
    ) -> PalResult<Option<PathBuf>> {
        let mut state = self.state.lock().unwrap();
        let Some(path) = state.special_dirs.get(&folder).cloned() else {
            return Ok(None);
        };
        match option {
            SpecialDirOption::DoNotVerify => Ok(Some(path)),
            SpecialDirOption::VerifyExists => {
                if state.known_dirs.contains(&path) {
                    Ok(Some(path))
                } else {
                    Ok(None)
                }
            }
            SpecialDirOption::Create => {
                log::info!("FAKE PAL: create {} dir {}", folder.name(), path.display());
                state.known_dirs.insert(path.clone());
                state.operations.push(Operation::CreateSpecialDir {
                    folder,
                    path: path.clone(),
                });
                Ok(Some(path))
            }
        }
    }

    fn logical_drives(&self) -> PalResult<Vec<PathBuf>> {
        Ok(self.state.lock().unwrap().drives.clone())
    }
}

impl HostOps for FakePal {
    fn machine_name(&self) -> PalResult<String> {
        Ok(self.state.lock().unwrap().machine_name.clone())
    }

    fn user_name(&self) -> PalResult<String> {
        Ok(self.state.lock().unwrap().user_name.clone())
    }

    fn user_domain_name(&self) -> PalResult<String> {
        self.machine_name()
    }

    fn os_info(&self) -> PalResult<OsInfo> {
        Ok(self.state.lock().unwrap().os_info.clone())
    }

    fn is_64bit_process(&self) -> bool {
        self.state.lock().unwrap().is_64bit_process
    }

    fn is_64bit_os(&self) -> PalResult<bool> {
        Ok(self.state.lock().unwrap().is_64bit_os)
    }

    fn processor_count(&self) -> PalResult<usize> {
        Ok(self.state.lock().unwrap().processor_count)
    }

    fn page_size(&self) -> PalResult<u64> {
        Ok(self.state.lock().unwrap().page_size)
    }

    fn tick_count(&self) -> PalResult<u64> {
        Ok(self.state.lock().unwrap().tick_count_ms)
    }

    fn working_set(&self) -> PalResult<u64> {
        Ok(self.state.lock().unwrap().working_set_bytes)
    }

    fn is_interactive(&self) -> bool {
        self.state.lock().unwrap().interactive
    }
}

impl ProcOps for FakePal {
    fn args(&self) -> PalResult<Vec<String>> {
        Ok(self.state.lock().unwrap().args.clone())
    }

    fn command_line(&self) -> PalResult<String> {
        Ok(cmdline::join_command_line(
            &self.state.lock().unwrap().args,
        ))
    }

    fn current_exe(&self) -> PalResult<PathBuf> {
        let state = self.state.lock().unwrap();
        state
            .args
            .first()
            .map(PathBuf::from)
            .ok_or_else(|| PalError::Platform("fake argument vector is empty".to_string()))
    }

    fn process_id(&self) -> u32 {
        self.state.lock().unwrap().process_id
    }

    fn thread_id(&self) -> i32 {
        self.state.lock().unwrap().thread_id
    }

    fn exit_code(&self) -> i32 {
        self.state.lock().unwrap().exit_code
    }

    fn set_exit_code(&self, code: i32) {
        let mut state = self.state.lock().unwrap();
        state.exit_code = code;
        state.operations.push(Operation::SetExitCode { code });
    }

    fn has_shutdown_started(&self) -> bool {
        self.state.lock().unwrap().shutdown_started
    }

    fn exit(&self, code: i32) -> ! {
        log::info!("FAKE PAL: exit({code})");
        // Record before panicking; the lock must be released by then or the
        // panic poisons the state mutex.
        self.record_operation(Operation::Exit { code });
        panic!("FakePal: exit({code}) requested");
    }

    fn fail_fast(&self, message: &str, cause: Option<&dyn std::error::Error>) -> ! {
        log::info!("FAKE PAL: fail_fast({message})");
        self.record_operation(Operation::FailFast {
            message: message.to_string(),
            cause: cause.map(|err| err.to_string()),
        });
        panic!("FakePal: fail_fast requested: {message}");
    }
}
