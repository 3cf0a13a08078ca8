//! Credential model: unverified JWT claim decoding, redacted token secrets, and the
//! token + claims pair handed out by token providers.

pub mod claims;
pub mod credential;
pub mod secret;

pub use claims::*;
pub use credential::*;
pub use secret::*;
