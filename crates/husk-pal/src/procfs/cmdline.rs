//! Parsing helpers for `/proc/self/cmdline`.

/// Splits raw `/proc/<pid>/cmdline` content into its argument vector.
///
/// Arguments are NUL-separated with a trailing NUL. Interior empty arguments
/// are legitimate and preserved; only the trailing empty slot from the final
/// NUL is dropped. Non-UTF-8 bytes are replaced.
pub fn parse_cmdline(raw: &[u8]) -> Vec<String> {
    let mut args: Vec<String> = raw
        .split(|byte| *byte == 0)
        .map(|part| String::from_utf8_lossy(part).into_owned())
        .collect();
    if args.last().is_some_and(|arg| arg.is_empty()) {
        args.pop();
    }
    args
}

/// Reassembles an argument vector into a single display string.
///
/// Arguments containing whitespace or quotes are double-quoted so the result
/// reads unambiguously. This is a reconstruction for display, not the
/// kernel's raw buffer.
pub fn join_command_line(args: &[String]) -> String {
    args.iter()
        .map(|arg| quote_arg(arg))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote_arg(arg: &str) -> String {
    let needs_quotes =
        arg.is_empty() || arg.chars().any(|c| c.is_whitespace()) || arg.contains('"');
    if needs_quotes {
        format!("\"{}\"", arg.replace('"', "\\\""))
    } else {
        arg.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_cmdline_splits_on_nul() {
        let raw = b"/usr/bin/cat\0-n\0file.txt\0";
        assert_eq!(parse_cmdline(raw), vec!["/usr/bin/cat", "-n", "file.txt"]);
    }

    #[test]
    fn parse_cmdline_keeps_interior_empty_args() {
        let raw = b"prog\0\0last\0";
        assert_eq!(parse_cmdline(raw), vec!["prog", "", "last"]);
    }

    #[test]
    fn parse_cmdline_handles_missing_trailing_nul() {
        let raw = b"prog\0arg";
        assert_eq!(parse_cmdline(raw), vec!["prog", "arg"]);
    }

    #[test]
    fn parse_cmdline_empty_input() {
        assert!(parse_cmdline(b"").is_empty());
    }

    #[test]
    fn join_command_line_quotes_whitespace() {
        let args = vec![
            "prog".to_string(),
            "two words".to_string(),
            "plain".to_string(),
        ];
        assert_eq!(join_command_line(&args), "prog \"two words\" plain");
    }

    #[test]
    fn join_command_line_escapes_quotes() {
        let args = vec!["prog".to_string(), "say \"hi\"".to_string()];
        assert_eq!(join_command_line(&args), "prog \"say \\\"hi\\\"\"");
    }
}
