//! Process lifecycle and invocation operations trait.

use crate::PalResult;
use std::path::PathBuf;

/// Trait for the process's own invocation, identity, and termination.
pub trait ProcOps {
    /// The argument vector this process was started with.
    ///
    /// The first element is the executable path.
    fn args(&self) -> PalResult<Vec<String>>;

    /// The invocation reassembled as a single display string.
    fn command_line(&self) -> PalResult<String>;

    /// Path of the running executable.
    fn current_exe(&self) -> PalResult<PathBuf>;

    /// Process id.
    fn process_id(&self) -> u32;

    /// Kernel thread id of the calling thread.
    fn thread_id(&self) -> i32;

    /// The exit code a normal process exit would currently report.
    fn exit_code(&self) -> i32;

    /// Stage the exit code for a later normal exit.
    fn set_exit_code(&self, code: i32);

    /// Whether an orderly shutdown of the hosting environment has begun.
    fn has_shutdown_started(&self) -> bool;

    /// Terminate the process with `code`, running normal runtime teardown.
    ///
    /// Never returns. Destructors of values on the current stack do not run.
    fn exit(&self, code: i32) -> !;

    /// Terminate immediately after writing `message` (and the chain of
    /// `cause`, when given) to standard error.
    ///
    /// Bypasses all cleanup, exit-code staging included. Never returns.
    fn fail_fast(&self, message: &str, cause: Option<&dyn std::error::Error>) -> !;
}
