//! Identity provider seam

pub mod identity;

pub use identity::{AuthEvent, IdentityError, IdentityProvider, MockIdentity};
