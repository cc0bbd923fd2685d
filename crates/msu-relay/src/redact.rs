//! Keeps session and 3DS tokens out of the logs.

/// Characters of a secret that may appear in a log line.
pub const VISIBLE_PREFIX: usize = 8;

/// First [`VISIBLE_PREFIX`] characters of `secret` followed by `...`.
///
/// Slices on char boundaries, so multi-byte input never panics.
pub fn prefix(secret: &str) -> String {
    match secret.char_indices().nth(VISIBLE_PREFIX) {
        Some((idx, _)) => format!("{}...", &secret[..idx]),
        None => format!("{secret}..."),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prefix_truncates_long_secret() {
        assert_eq!(prefix("abcdefghijklmnop"), "abcdefgh...");
    }

    #[test]
    fn test_prefix_short_secret() {
        assert_eq!(prefix("abc"), "abc...");
        assert_eq!(prefix(""), "...");
    }

    #[test]
    fn test_prefix_multibyte() {
        assert_eq!(prefix("ğüşıöçĞÜŞİ"), "ğüşıöçĞÜ...");
    }
}
