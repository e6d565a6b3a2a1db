//! Response generation for one conversation turn.
//!
//! The `ResponseGenerator` assembles the persona prompt, a bounded slice of
//! prior conversation, and the new user message, and always hands back a
//! reply string -- canned fallbacks cover every provider failure mode.

pub mod fallback;
pub mod persona;
pub mod responder;

pub use responder::ResponseGenerator;
