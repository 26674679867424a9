//! Environment variable operations trait.

use crate::{PalError, PalResult};
use std::collections::BTreeMap;
use std::fmt;

/// Where an environment variable lives.
///
/// `Process` is the calling process's own environment block. `User` and
/// `Machine` address persistent per-user / system-wide stores on platforms
/// that have them; adapters without such a store report them as unsupported.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum EnvScope {
    #[default]
    Process,
    User,
    Machine,
}

impl fmt::Display for EnvScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnvScope::Process => write!(f, "process"),
            EnvScope::User => write!(f, "user"),
            EnvScope::Machine => write!(f, "machine"),
        }
    }
}

/// Combined name + value byte length cap for a single variable write.
pub const MAX_VAR_TOTAL_LEN: usize = 32_767;

/// Name byte length cap for writes to the user and machine scopes.
pub const MAX_SCOPED_NAME_LEN: usize = 255;

/// Trait for reading, writing, and expanding environment variables.
pub trait EnvOps {
    /// Look up a variable in the given scope.
    ///
    /// Returns `Ok(None)` when the variable is not set. Values that are not
    /// valid UTF-8 are replaced lossily.
    fn var_in(&self, name: &str, scope: EnvScope) -> PalResult<Option<String>>;

    /// Set a variable in the given scope.
    ///
    /// An empty `value` deletes the variable; deleting a variable that does
    /// not exist is a no-op.
    fn set_var_in(&self, name: &str, value: &str, scope: EnvScope) -> PalResult<()>;

    /// Snapshot every variable in the given scope, sorted by name.
    fn vars_in(&self, scope: EnvScope) -> PalResult<BTreeMap<String, String>>;

    fn var(&self, name: &str) -> PalResult<Option<String>> {
        self.var_in(name, EnvScope::Process)
    }

    fn set_var(&self, name: &str, value: &str) -> PalResult<()> {
        self.set_var_in(name, value, EnvScope::Process)
    }

    fn vars(&self) -> PalResult<BTreeMap<String, String>> {
        self.vars_in(EnvScope::Process)
    }

    /// Substitute `$NAME` / `${NAME}` references with process-scope values.
    ///
    /// References to unset variables are left in the input verbatim, so the
    /// operation never fails and expanding a literal string is the identity.
    fn expand(&self, input: &str) -> String {
        shellexpand::env_with_context_no_errors(input, |name| self.var(name).ok().flatten())
            .into_owned()
    }
}

/// Shared name validation for reads and writes.
pub(crate) fn validate_var_name(name: &str) -> PalResult<()> {
    if name.is_empty() {
        return Err(PalError::InvalidArgument(
            "environment variable name is empty".to_string(),
        ));
    }
    if name.contains('=') {
        return Err(PalError::InvalidArgument(format!(
            "environment variable name contains '=': {name:?}"
        )));
    }
    if name.contains('\0') {
        return Err(PalError::InvalidArgument(
            "environment variable name contains NUL".to_string(),
        ));
    }
    Ok(())
}

/// Shared write validation: name rules plus value and length limits.
pub(crate) fn validate_var_write(name: &str, value: &str, scope: EnvScope) -> PalResult<()> {
    validate_var_name(name)?;
    if value.contains('\0') {
        return Err(PalError::InvalidArgument(format!(
            "value for {name:?} contains NUL"
        )));
    }
    // Name, '=', value, and the trailing NUL of one environment block entry.
    if name.len() + value.len() + 2 > MAX_VAR_TOTAL_LEN {
        return Err(PalError::InvalidArgument(format!(
            "environment entry for {name:?} exceeds {MAX_VAR_TOTAL_LEN} bytes"
        )));
    }
    if scope != EnvScope::Process && name.len() > MAX_SCOPED_NAME_LEN {
        return Err(PalError::InvalidArgument(format!(
            "name for {scope} scope exceeds {MAX_SCOPED_NAME_LEN} bytes"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_name_rejects_empty_equals_and_nul() {
        assert!(validate_var_name("HOME").is_ok());
        assert!(validate_var_name("").is_err());
        assert!(validate_var_name("A=B").is_err());
        assert!(validate_var_name("A\0B").is_err());
    }

    #[test]
    fn validate_write_rejects_nul_value() {
        let err = validate_var_write("KEY", "a\0b", EnvScope::Process).unwrap_err();
        assert!(matches!(err, PalError::InvalidArgument(_)));
    }

    #[test]
    fn validate_write_enforces_total_length() {
        let value = "v".repeat(MAX_VAR_TOTAL_LEN);
        assert!(validate_var_write("KEY", &value, EnvScope::Process).is_err());
        // Just under the cap is fine.
        let value = "v".repeat(MAX_VAR_TOTAL_LEN - "KEY".len() - 2);
        assert!(validate_var_write("KEY", &value, EnvScope::Process).is_ok());
    }

    #[test]
    fn validate_write_caps_scoped_names() {
        let name = "N".repeat(MAX_SCOPED_NAME_LEN + 1);
        assert!(validate_var_write(&name, "v", EnvScope::Process).is_ok());
        assert!(validate_var_write(&name, "v", EnvScope::User).is_err());
        assert!(validate_var_write(&name, "v", EnvScope::Machine).is_err());
    }

    #[test]
    fn scope_display_names() {
        assert_eq!(EnvScope::Process.to_string(), "process");
        assert_eq!(EnvScope::User.to_string(), "user");
        assert_eq!(EnvScope::Machine.to_string(), "machine");
    }
}
