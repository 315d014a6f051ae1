//! Sender / content splitting for header remainders.
//!
//! The remainder of a header line is either `sender: content` or an
//! unattributed system notice such as `Alice created group "Trip"`.

use std::sync::LazyLock;

use regex::Regex;

/// Whitespace and Unicode punctuation (general category `P`) only.
static PUNCTUATION_ONLY_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[\s\p{P}]+$").unwrap());

/// Who a header remainder is attributed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribution<'a> {
    /// `sender: content`, both trimmed.
    User { sender: &'a str, content: &'a str },
    /// No usable sender; `content` is the whole remainder.
    System { content: &'a str },
}

impl<'a> Attribution<'a> {
    pub fn is_system(&self) -> bool {
        matches!(self, Attribution::System { .. })
    }

    pub fn content(&self) -> &'a str {
        match *self {
            Attribution::User { content, .. } | Attribution::System { content } => content,
        }
    }

    pub fn sender(&self) -> Option<&'a str> {
        match *self {
            Attribution::User { sender, .. } => Some(sender),
            Attribution::System { .. } => None,
        }
    }
}

/// Splits a header remainder at its first colon.
///
/// The split is rejected, and the remainder becomes a system notice, when
/// there is no colon, when the colon sits `colon_limit` or more characters
/// into the remainder, or when the text before it is empty or made only
/// of whitespace and punctuation.
///
/// # Example
///
/// ```rust
/// use chatarchive::parsing::sender::{Attribution, split_sender};
///
/// assert_eq!(
///     split_sender("Alice:  hello ", 100),
///     Attribution::User { sender: "Alice", content: "hello" }
/// );
/// assert!(split_sender("Alice left", 100).is_system());
/// assert!(split_sender("...: nothing", 100).is_system());
/// ```
pub fn split_sender(remainder: &str, colon_limit: usize) -> Attribution<'_> {
    let system = Attribution::System { content: remainder };

    let Some(colon) = remainder.find(':') else {
        return system;
    };

    let before = &remainder[..colon];
    if before.chars().count() >= colon_limit {
        return system;
    }

    let sender = before.trim();
    if sender.is_empty() || is_punctuation_only(sender) {
        return system;
    }

    Attribution::User {
        sender,
        content: remainder[colon + 1..].trim(),
    }
}

/// Returns `true` if `s` consists only of whitespace and punctuation.
pub fn is_punctuation_only(s: &str) -> bool {
    PUNCTUATION_ONLY_RE.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_split() {
        let a = split_sender("A: first line", 100);
        assert_eq!(a.sender(), Some("A"));
        assert_eq!(a.content(), "first line");
        assert!(!a.is_system());
    }

    #[test]
    fn test_splits_at_first_colon_only() {
        let a = split_sender("Bob: meet at 10:30: ok?", 100);
        assert_eq!(a.sender(), Some("Bob"));
        assert_eq!(a.content(), "meet at 10:30: ok?");
    }

    #[test]
    fn test_no_colon_is_system() {
        let a = split_sender("Alice created group \"Trip\"", 100);
        assert!(a.is_system());
        assert_eq!(a.content(), "Alice created group \"Trip\"");
        assert_eq!(a.sender(), None);
    }

    #[test]
    fn test_leading_colon_is_system() {
        assert!(split_sender(": hello", 100).is_system());
        assert!(split_sender("   : hello", 100).is_system());
    }

    #[test]
    fn test_colon_beyond_limit_is_system() {
        let long = format!("{}: tail", "x".repeat(100));
        assert!(split_sender(&long, 100).is_system());

        let just_under = format!("{}: tail", "x".repeat(99));
        assert_eq!(split_sender(&just_under, 100).content(), "tail");
    }

    #[test]
    fn test_limit_counts_characters() {
        // 60 two-byte characters: 120 bytes but only 60 chars.
        let sender = "é".repeat(60);
        let line = format!("{sender}: hi");
        assert_eq!(split_sender(&line, 100).sender(), Some(sender.as_str()));
    }

    #[test]
    fn test_configurable_limit() {
        assert!(split_sender("Alice: hi", 5).is_system());
        assert!(!split_sender("Alice: hi", 6).is_system());
    }

    #[test]
    fn test_punctuation_sender_is_system() {
        assert!(split_sender("...: something", 100).is_system());
        assert!(split_sender("- - -: something", 100).is_system());
    }

    #[test]
    fn test_unicode_punctuation_sender_is_system() {
        assert!(split_sender("「」: notice", 100).is_system());
        assert!(split_sender("،؛: notice", 100).is_system());
        assert!(split_sender("¿¡: notice", 100).is_system());
    }

    #[test]
    fn test_symbols_are_not_punctuation() {
        // Emoji and currency signs are symbols, not punctuation.
        assert_eq!(split_sender("🖤: hi", 100).sender(), Some("🖤"));
        assert_eq!(split_sender("$: hi", 100).sender(), Some("$"));
    }

    #[test]
    fn test_non_latin_sender() {
        let a = split_sender("Муха: Добрый вечер", 100);
        assert_eq!(a.sender(), Some("Муха"));
        assert_eq!(a.content(), "Добрый вечер");
    }

    #[test]
    fn test_system_content_is_untrimmed() {
        let a = split_sender("notice with trailing space ", 100);
        assert_eq!(a.content(), "notice with trailing space ");
    }

    #[test]
    fn test_is_punctuation_only() {
        assert!(is_punctuation_only("..."));
        assert!(is_punctuation_only(" - "));
        assert!(!is_punctuation_only("A."));
        assert!(!is_punctuation_only(""));
    }
}
