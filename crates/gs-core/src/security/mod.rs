//! Secret handling for user-supplied passphrases.

mod secret;

pub use secret::SecretString;
