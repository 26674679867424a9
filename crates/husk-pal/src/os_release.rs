//! Parsing helpers for `/etc/os-release`.

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OsRelease {
    /// Lowercased `ID` value, with `NAME` as a fallback.
    pub id: Option<String>,
    /// `VERSION_ID` kept verbatim ("43", "24.04", rolling distros omit it).
    pub version_id: Option<String>,
    /// `PRETTY_NAME` with surrounding quotes stripped.
    pub pretty_name: Option<String>,
}

/// Parses `os-release` content.
///
/// Unknown keys are ignored; missing keys stay `None`. Never fails, since a
/// host without the file is a supported configuration.
pub fn parse_os_release(content: &str) -> OsRelease {
    let mut release = OsRelease::default();
    let mut name_fallback: Option<String> = None;

    for line in content.lines() {
        if let Some(value) = line.strip_prefix("ID=") {
            release.id = Some(unquote(value).to_lowercase());
        } else if let Some(value) = line.strip_prefix("VERSION_ID=") {
            release.version_id = Some(unquote(value));
        } else if let Some(value) = line.strip_prefix("PRETTY_NAME=") {
            release.pretty_name = Some(unquote(value));
        } else if let Some(value) = line.strip_prefix("NAME=") {
            name_fallback = Some(unquote(value).to_lowercase());
        }
    }

    if release.id.is_none() {
        release.id = name_fallback;
    }
    release
}

fn unquote(raw: &str) -> String {
    raw.trim().trim_matches('"').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_os_release_extracts_fields() {
        let release = "NAME=\"Fedora Linux\"\nID=fedora\nVERSION_ID=\"43\"\n\
                       PRETTY_NAME=\"Fedora Linux 43 (Workstation Edition)\"\n";
        let parsed = parse_os_release(release);
        assert_eq!(parsed.id.as_deref(), Some("fedora"));
        assert_eq!(parsed.version_id.as_deref(), Some("43"));
        assert_eq!(
            parsed.pretty_name.as_deref(),
            Some("Fedora Linux 43 (Workstation Edition)")
        );
    }

    #[test]
    fn parse_os_release_keeps_dotted_versions() {
        let release = "ID=ubuntu\nVERSION_ID=\"24.04\"\n";
        let parsed = parse_os_release(release);
        assert_eq!(parsed.version_id.as_deref(), Some("24.04"));
    }

    #[test]
    fn parse_os_release_falls_back_to_name() {
        let release = "NAME=\"Arch Linux\"\n";
        let parsed = parse_os_release(release);
        assert_eq!(parsed.id.as_deref(), Some("arch linux"));
        assert_eq!(parsed.version_id, None);
    }

    #[test]
    fn parse_os_release_empty_content() {
        assert_eq!(parse_os_release(""), OsRelease::default());
    }
}
