use std::path::Path;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use crate::error::Result;
use crate::source::read_exactly;

/// Total challenge size in bytes.
pub const CHALLENGE_LEN: usize = 32;

/// Leading bytes holding the generation timestamp.
pub const TIMESTAMP_LEN: usize = 4;

/// Trailing bytes drawn from the random source.
pub const RANDOM_LEN: usize = CHALLENGE_LEN - TIMESTAMP_LEN;

/// Hex text form of the challenge.
pub const CHALLENGE_HEX_LEN: usize = CHALLENGE_LEN * 2;

/// Hex text plus the trailing line feed: the exact payload that is signed.
pub const CHALLENGE_MESSAGE_LEN: usize = CHALLENGE_HEX_LEN + 1;

/// A session-unique 32-byte value presented to the caller to sign.
///
/// Bytes `0..4` are the generation time in seconds since the epoch,
/// truncated to 32 bits in native byte order; the value is never parsed
/// back, so no endianness contract applies. Bytes `4..32` come from the
/// random source. A challenge lives for one session and is never reused or
/// persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Challenge([u8; CHALLENGE_LEN]);

impl Challenge {
    /// Build a fresh challenge stamped with the current wall-clock time.
    ///
    /// Fails only on environment errors from the random source (cannot
    /// open, cannot read, fewer than [`RANDOM_LEN`] bytes before EOF). The
    /// timestamp is not validated for monotonicity or bounds.
    pub fn generate(random_source: &Path) -> Result<Self> {
        let seconds = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_secs()) as u32;
        Self::generate_at(seconds, random_source)
    }

    /// Build a challenge stamped with an explicit timestamp.
    pub fn generate_at(seconds: u32, random_source: &Path) -> Result<Self> {
        let mut bytes = [0u8; CHALLENGE_LEN];
        bytes[..TIMESTAMP_LEN].copy_from_slice(&seconds.to_ne_bytes());
        read_exactly(random_source, &mut bytes[TIMESTAMP_LEN..])?;
        tracing::debug!(seconds, "generated challenge");
        Ok(Self(bytes))
    }

    pub fn as_bytes(&self) -> &[u8; CHALLENGE_LEN] {
        &self.0
    }

    /// Derive the exact byte sequence the caller must sign: 64 lowercase
    /// hex characters followed by a line feed.
    pub fn message(&self) -> ChallengeMessage {
        let hex = edsu_utils_hex::encode_lower(&self.0);
        let mut bytes = [0u8; CHALLENGE_MESSAGE_LEN];
        bytes[..CHALLENGE_HEX_LEN].copy_from_slice(hex.as_bytes());
        bytes[CHALLENGE_HEX_LEN] = b'\n';
        ChallengeMessage(bytes)
    }
}

/// The hex-encoded, newline-terminated text form of a [`Challenge`].
///
/// Signatures are only ever verified against this 65-byte sequence, never
/// against the raw challenge bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChallengeMessage([u8; CHALLENGE_MESSAGE_LEN]);

impl ChallengeMessage {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}
