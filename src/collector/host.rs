//! Host identity: hostname and effective user.

/// Extracts the effective UID from `/proc/[pid]/status` content.
///
/// The `Uid:` line holds real, effective, saved and filesystem UIDs.
pub fn parse_effective_uid(status: &str) -> Option<u32> {
    status
        .lines()
        .filter_map(|line| line.split_once(':'))
        .find(|(key, _)| key.trim() == "Uid")
        .and_then(|(_, value)| value.split_whitespace().nth(1))
        .and_then(|euid| euid.parse().ok())
}

/// Reduces a hostname to characters that are safe in a file name.
pub fn sanitize_hostname(raw: &str) -> Option<String> {
    let name: String = raw
        .trim()
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.') {
                c
            } else {
                '_'
            }
        })
        .collect();

    if name.is_empty() { None } else { Some(name) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_effective_uid() {
        let status = "Name:\tbash\nPid:\t1234\nUid:\t1000\t0\t1000\t1000\nGid:\t1000\t1000\t1000\t1000\n";
        assert_eq!(parse_effective_uid(status), Some(0));
    }

    #[test]
    fn test_parse_effective_uid_missing() {
        assert_eq!(parse_effective_uid("Name:\tbash\n"), None);
        assert_eq!(parse_effective_uid("Uid:\t1000\n"), None);
    }

    #[test]
    fn test_sanitize_hostname() {
        assert_eq!(sanitize_hostname("db-01\n"), Some("db-01".to_string()));
        assert_eq!(
            sanitize_hostname("web 1/a"),
            Some("web_1_a".to_string())
        );
        assert_eq!(sanitize_hostname("  \n"), None);
    }
}
