//! Field name normalization.
//!
//! Table headers and map keys are normalized differently: header tokens
//! lose their punctuation entirely (`Use%` -> `use`), while map keys have
//! each punctuation run replaced by one underscore (`CPU MHz` -> `cpu_mhz`).

/// Normalizes a raw header token into a column name.
///
/// Lowercases, trims, then deletes every character that is not a letter,
/// digit or underscore.
pub fn header_field_name(token: &str) -> String {
    token
        .to_lowercase()
        .trim()
        .chars()
        .filter(|c| is_word_char(*c))
        .collect()
}

/// Normalizes a raw key token into a map key.
///
/// Lowercases, trims, then replaces every maximal run of characters that
/// are not letters, digits or underscores with a single `_`.
pub fn key_field_name(token: &str) -> String {
    let lowered = token.to_lowercase();
    let mut name = String::with_capacity(lowered.len());
    let mut in_run = false;

    for c in lowered.trim().chars() {
        if is_word_char(c) {
            name.push(c);
            in_run = false;
        } else if !in_run {
            name.push('_');
            in_run = true;
        }
    }

    name
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_field_name_deletes_punctuation() {
        assert_eq!(header_field_name("PID"), "pid");
        assert_eq!(header_field_name("User%"), "user");
        assert_eq!(header_field_name("Use%"), "use");
        assert_eq!(header_field_name("Recv-Q"), "recvq");
        assert_eq!(header_field_name("MAJ:MIN"), "majmin");
        assert_eq!(header_field_name("#blocks"), "blocks");
        assert_eq!(header_field_name("#subsys_name"), "subsys_name");
    }

    #[test]
    fn test_header_field_name_deletes_inner_whitespace() {
        assert_eq!(header_field_name("CPU Usage"), "cpuusage");
        assert_eq!(header_field_name("Local-Address-Port"), "localaddressport");
    }

    #[test]
    fn test_key_field_name_collapses_runs() {
        assert_eq!(key_field_name("Model name"), "model_name");
        assert_eq!(key_field_name("CPU MHz"), "cpu_mhz");
        assert_eq!(key_field_name("  address sizes\t"), "address_sizes");
        assert_eq!(key_field_name("a - b"), "a_b");
        assert_eq!(key_field_name("cpu family"), "cpu_family");
    }

    #[test]
    fn test_key_field_name_keeps_underscores() {
        assert_eq!(key_field_name("nr_free_pages"), "nr_free_pages");
        assert_eq!(key_field_name("flags\t\t"), "flags");
    }

    #[test]
    fn test_normalization_is_deterministic() {
        assert_eq!(key_field_name("TLB size"), key_field_name("TLB size"));
        assert_eq!(header_field_name("Avail"), header_field_name("Avail"));
    }
}
