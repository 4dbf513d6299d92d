//! DATACO key normalization.

/// Literal prefix JIRA exports put in front of DATACO numbers.
pub const DATACO_PREFIX: &str = "DATACO-";

/// Strip a leading, case-insensitive `DATACO-` prefix from an external key.
///
/// Surrounding whitespace is trimmed first. Keys without the prefix are
/// returned trimmed but otherwise unchanged.
pub fn strip_dataco_prefix(key: &str) -> &str {
    let key = key.trim();
    match key.get(..DATACO_PREFIX.len()) {
        Some(head) if head.eq_ignore_ascii_case(DATACO_PREFIX) => &key[DATACO_PREFIX.len()..],
        _ => key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_upper_case_prefix() {
        assert_eq!(strip_dataco_prefix("DATACO-1234"), "1234");
    }

    #[test]
    fn strips_prefix_case_insensitively() {
        assert_eq!(strip_dataco_prefix("dataco-1234"), "1234");
        assert_eq!(strip_dataco_prefix("Dataco-77"), "77");
    }

    #[test]
    fn leaves_bare_numbers_alone() {
        assert_eq!(strip_dataco_prefix("5678"), "5678");
        assert_eq!(strip_dataco_prefix(" 5678 "), "5678");
    }

    #[test]
    fn only_strips_a_leading_prefix() {
        assert_eq!(strip_dataco_prefix("X-DATACO-1"), "X-DATACO-1");
    }

    #[test]
    fn short_and_multibyte_keys_do_not_panic() {
        assert_eq!(strip_dataco_prefix("DAT"), "DAT");
        assert_eq!(strip_dataco_prefix("דאטה-12345"), "דאטה-12345");
    }
}
