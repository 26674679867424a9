//! Directory and well-known location operations trait.

use crate::PalResult;
use std::path::{Path, PathBuf};

/// Well-known per-user and system locations.
///
/// On Linux these resolve through the XDG base-directory and user-dirs
/// conventions. Not every folder exists on every host; lookups return
/// `None` rather than failing when a folder has no defined location.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialFolder {
    Home,
    Cache,
    Config,
    Data,
    DataLocal,
    State,
    Runtime,
    Executables,
    Fonts,
    Desktop,
    Documents,
    Downloads,
    Music,
    Pictures,
    Public,
    Templates,
    Videos,
}

impl SpecialFolder {
    /// Every folder, in display order.
    pub fn all() -> &'static [SpecialFolder] {
        &[
            SpecialFolder::Home,
            SpecialFolder::Cache,
            SpecialFolder::Config,
            SpecialFolder::Data,
            SpecialFolder::DataLocal,
            SpecialFolder::State,
            SpecialFolder::Runtime,
            SpecialFolder::Executables,
            SpecialFolder::Fonts,
            SpecialFolder::Desktop,
            SpecialFolder::Documents,
            SpecialFolder::Downloads,
            SpecialFolder::Music,
            SpecialFolder::Pictures,
            SpecialFolder::Public,
            SpecialFolder::Templates,
            SpecialFolder::Videos,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            SpecialFolder::Home => "home",
            SpecialFolder::Cache => "cache",
            SpecialFolder::Config => "config",
            SpecialFolder::Data => "data",
            SpecialFolder::DataLocal => "data-local",
            SpecialFolder::State => "state",
            SpecialFolder::Runtime => "runtime",
            SpecialFolder::Executables => "executables",
            SpecialFolder::Fonts => "fonts",
            SpecialFolder::Desktop => "desktop",
            SpecialFolder::Documents => "documents",
            SpecialFolder::Downloads => "downloads",
            SpecialFolder::Music => "music",
            SpecialFolder::Pictures => "pictures",
            SpecialFolder::Public => "public",
            SpecialFolder::Templates => "templates",
            SpecialFolder::Videos => "videos",
        }
    }
}

/// How a special folder lookup treats the filesystem.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SpecialDirOption {
    /// Resolve, but report `None` unless the directory exists on disk.
    #[default]
    VerifyExists,
    /// Resolve the configured location without touching the filesystem.
    DoNotVerify,
    /// Resolve and create the directory if it is missing.
    Create,
}

/// Trait for working directory, well-known folders, and volume roots.
pub trait DirOps {
    /// The process's current working directory.
    fn current_dir(&self) -> PalResult<PathBuf>;

    /// Change the current working directory.
    ///
    /// Fails with an invalid-argument error for an empty path, not-found if
    /// the path does not exist, and permission-denied without search access.
    fn set_current_dir(&self, path: &Path) -> PalResult<()>;

    /// The current user's home directory, if one is configured.
    fn home_dir(&self) -> Option<PathBuf>;

    /// The directory for temporary files.
    fn temp_dir(&self) -> PathBuf;

    /// The directory holding system executables.
    fn system_dir(&self) -> PathBuf;

    /// Resolve a well-known folder with the given lookup behavior.
    ///
    /// `Ok(None)` means the folder has no defined location on this host (or,
    /// under [`SpecialDirOption::VerifyExists`], that it is not present).
    fn special_dir_with(
        &self,
        folder: SpecialFolder,
        option: SpecialDirOption,
    ) -> PalResult<Option<PathBuf>>;

    fn special_dir(&self, folder: SpecialFolder) -> PalResult<Option<PathBuf>> {
        self.special_dir_with(folder, SpecialDirOption::VerifyExists)
    }

    /// Mount points of the volumes visible to this process, sorted.
    fn logical_drives(&self) -> PalResult<Vec<PathBuf>>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_folders_have_unique_names() {
        let mut names: Vec<&str> = SpecialFolder::all().iter().map(|f| f.name()).collect();
        let total = names.len();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), total);
    }

    #[test]
    fn default_option_verifies_existence() {
        assert_eq!(SpecialDirOption::default(), SpecialDirOption::VerifyExists);
    }
}
