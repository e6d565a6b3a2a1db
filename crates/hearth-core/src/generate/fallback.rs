//! Pre-authored fallback replies.
//!
//! The conversational experience is never interrupted by an error: when no
//! model credential is configured, every call returns one of a fixed set of
//! offline replies after a short "typing" delay; when a live call fails or
//! comes back empty, a single canned reply stands in.

use std::time::Duration;

use rand::Rng;

/// Replies used when no model credential is configured at all.
pub const OFFLINE_REPLIES: [&str; 5] = [
    "I hear you, dear. I'm running without my full voice right now, but I \
     want you to know that whatever you're carrying, you don't have to carry \
     it alone. Take a slow breath with me. What's one small kind thing you \
     could do for yourself today?",
    "Oh sweetie, I can't reach my full thoughts at the moment, but I \
     couldn't let you go without saying this: you are enough, exactly as you \
     are. Whatever brought you here today, trust that you have more strength \
     than you realize.",
    "I'm listening, even if my words are limited right now. Reaching out \
     the way you just did takes real self-awareness, and that matters. Be \
     gentle with yourself today; you're doing better than you think.",
    "Honey, my full voice is resting at the moment, but here's what I know \
     for certain: feelings are allowed to just be felt. There doesn't have \
     to be an answer tonight. I'm glad you came to talk.",
    "I wish I could give you my whole attention right now, dear, but please \
     hold on to this: growth takes time, and you are exactly where you need \
     to be. Keep being kind to yourself; that's never wasted.",
];

/// Reply used when a live model call fails.
pub const ERROR_REPLY: &str = "Oh sweetie, I'm having a little trouble \
     finding my words right now, but I'm still here with you. Give me a \
     moment and ask me again. Whatever it is, we'll sit with it together.";

/// Reply used when the model answers with empty content.
pub const BLANK_REPLY: &str = "I'm here for you, dear, but my thoughts came \
     out empty just now. Would you try asking me once more?";

/// Pick one of the offline replies at random.
pub fn offline_reply() -> &'static str {
    let idx = rand::thread_rng().gen_range(0..OFFLINE_REPLIES.len());
    OFFLINE_REPLIES[idx]
}

/// A 1-2 second artificial delay preserving the "typing" affordance in
/// offline mode.
pub fn typing_delay() -> Duration {
    Duration::from_millis(rand::thread_rng().gen_range(1_000..=2_000))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_offline_replies_nonempty() {
        for reply in OFFLINE_REPLIES {
            assert!(!reply.is_empty());
        }
        assert!(!ERROR_REPLY.is_empty());
        assert!(!BLANK_REPLY.is_empty());
    }

    #[test]
    fn test_offline_reply_drawn_from_fixed_set() {
        for _ in 0..50 {
            let reply = offline_reply();
            assert!(OFFLINE_REPLIES.contains(&reply));
        }
    }

    #[test]
    fn test_typing_delay_bounds() {
        for _ in 0..50 {
            let delay = typing_delay();
            assert!(delay >= Duration::from_millis(1_000));
            assert!(delay <= Duration::from_millis(2_000));
        }
    }
}
