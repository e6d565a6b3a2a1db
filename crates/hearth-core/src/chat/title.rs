//! Chat title policies.
//!
//! Titles are display strings with a hard cap of 100 characters. When a
//! chat is created implicitly by sending the first message, its title is
//! derived from that message: the first 30 characters, with a trailing
//! ellipsis when truncation occurred.

/// Hard cap applied to every stored title.
pub const MAX_TITLE_CHARS: usize = 100;

/// Prefix length used when deriving a title from the first message.
pub const DERIVED_TITLE_CHARS: usize = 30;

/// Truncate a title to [`MAX_TITLE_CHARS`] characters.
///
/// Operates on characters, not bytes, so multi-byte input never splits a
/// code point.
pub fn truncate_title(title: &str) -> String {
    title.chars().take(MAX_TITLE_CHARS).collect()
}

/// Derive a chat title from the first message sent into it.
///
/// First [`DERIVED_TITLE_CHARS`] characters of the message, plus `"..."`
/// iff the message was longer than that.
pub fn derive_title(message: &str) -> String {
    let mut title: String = message.chars().take(DERIVED_TITLE_CHARS).collect();
    if message.chars().count() > DERIVED_TITLE_CHARS {
        title.push_str("...");
    }
    title
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derive_short_message_untouched() {
        assert_eq!(derive_title("Good morning"), "Good morning");
    }

    #[test]
    fn test_derive_exactly_thirty_chars_no_ellipsis() {
        let msg = "a".repeat(30);
        assert_eq!(derive_title(&msg), msg);
    }

    #[test]
    fn test_derive_long_message_truncates_with_ellipsis() {
        let msg = "Hello there, how are you doing today, friend?";
        assert_eq!(msg.len(), 45);
        assert_eq!(derive_title(msg), "Hello there, how are you doing...");
    }

    #[test]
    fn test_derive_counts_characters_not_bytes() {
        let msg = "é".repeat(31);
        let title = derive_title(&msg);
        assert_eq!(title.chars().count(), 33);
        assert!(title.ends_with("..."));
    }

    #[test]
    fn test_truncate_title_caps_at_hundred() {
        let long = "x".repeat(150);
        let truncated = truncate_title(&long);
        assert_eq!(truncated.chars().count(), 100);
        assert_eq!(truncated, "x".repeat(100));
    }

    #[test]
    fn test_truncate_title_short_unchanged() {
        assert_eq!(truncate_title("Groceries"), "Groceries");
    }
}
