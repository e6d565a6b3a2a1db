//! Authentication gate and identity port.

pub mod gate;
pub mod identity;

pub use gate::AuthGate;
pub use identity::IdentityProvider;
