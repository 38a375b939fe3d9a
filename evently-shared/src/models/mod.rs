//! Wire types exchanged with the auth provider.

pub mod errors;
pub mod session;

pub use errors::ErrorResponse;
pub use session::{AuthSession, AuthUser, Credentials};
