//! Challenge-response authentication for the `edsu` helper binary.
//!
//! A session issues a 32-byte challenge (a 32-bit timestamp followed by 28
//! bytes from the system random source), printed as 64 lowercase hex
//! characters. The caller answers with an Ed25519 signature over the exact
//! 65 bytes that were printed after the `Challenge: ` label (the hex text
//! plus its trailing line feed), encoded as 128 hex characters plus a line
//! feed. If the signature verifies against the installed public key the
//! session grants access; any framing or verification failure denies it.
//!
//! Protocol failures (a malformed response line, a signature that does not
//! verify) surface as [`SessionOutcome::Denied`]. Only environment failures
//! (unreadable random source or key file, broken streams) are errors; they
//! carry their own exit-status mapping in [`FatalError`] and are acted on
//! once, at the binary's entry point.

mod challenge;
mod error;
mod paths;
mod session;
mod source;
mod verify;

pub use challenge::CHALLENGE_HEX_LEN;
pub use challenge::CHALLENGE_LEN;
pub use challenge::CHALLENGE_MESSAGE_LEN;
pub use challenge::Challenge;
pub use challenge::ChallengeMessage;
pub use challenge::RANDOM_LEN;
pub use challenge::TIMESTAMP_LEN;
pub use error::FatalError;
pub use error::Result;
pub use paths::SuPaths;
pub use session::AuthSession;
pub use session::MAX_RESPONSE_READ;
pub use session::RESPONSE_LINE_LEN;
pub use session::SIGNATURE_HEX_LEN;
pub use session::SessionOutcome;
pub use verify::PUBLIC_KEY_LEN;
pub use verify::SIGNATURE_LEN;
pub use verify::load_public_key;
pub use verify::verify_signature;
