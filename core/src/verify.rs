use std::path::Path;

use ed25519_dalek::Signature;
use ed25519_dalek::Verifier;
use ed25519_dalek::VerifyingKey;

use crate::error::Result;
use crate::source::read_exactly;

/// Raw Ed25519 public key size.
pub const PUBLIC_KEY_LEN: usize = 32;

/// Raw Ed25519 signature size.
pub const SIGNATURE_LEN: usize = 64;

/// Read the 32 raw public-key bytes from `path`.
///
/// The key is loaded fresh for every verification and never cached across
/// sessions. Open/read failures and files shorter than 32 bytes are fatal;
/// trailing bytes beyond the first 32 are left unread.
pub fn load_public_key(path: &Path) -> Result<[u8; PUBLIC_KEY_LEN]> {
    let mut key = [0u8; PUBLIC_KEY_LEN];
    read_exactly(path, &mut key)?;
    Ok(key)
}

/// Check `signature` over `message` with `public_key`.
///
/// Accept/reject is atomic: key bytes that do not decode to a valid curve
/// point reject the same way a wrong signature does. Nothing here is
/// fatal; only key *loading* can fail the environment.
pub fn verify_signature(
    message: &[u8],
    signature: &[u8; SIGNATURE_LEN],
    public_key: &[u8; PUBLIC_KEY_LEN],
) -> bool {
    let Ok(key) = VerifyingKey::from_bytes(public_key) else {
        return false;
    };
    let signature = Signature::from_bytes(signature);
    key.verify(message, &signature).is_ok()
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use ed25519_dalek::Signer;
    use ed25519_dalek::SigningKey;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::*;
    use crate::error::FatalError;

    const SEED: [u8; 32] = [0x42; 32];

    #[test]
    fn accepts_a_valid_signature_over_the_exact_message() {
        let key = SigningKey::from_bytes(&SEED);
        let message = b"0123456789abcdef0123456789abcdef\n";
        let signature = key.sign(message).to_bytes();
        assert!(verify_signature(
            message,
            &signature,
            key.verifying_key().as_bytes()
        ));
    }

    #[test]
    fn rejects_any_single_bit_flip_in_message_signature_or_key() {
        let key = SigningKey::from_bytes(&SEED);
        let message = *b"0123456789abcdef0123456789abcdef\n";
        let signature = key.sign(&message).to_bytes();
        let public_key = *key.verifying_key().as_bytes();

        let mut tampered_message = message;
        tampered_message[0] ^= 0x01;
        assert!(!verify_signature(&tampered_message, &signature, &public_key));

        let mut tampered_signature = signature;
        tampered_signature[63] ^= 0x80;
        assert!(!verify_signature(&message, &tampered_signature, &public_key));

        let mut tampered_key = public_key;
        tampered_key[17] ^= 0x04;
        assert!(!verify_signature(&message, &signature, &tampered_key));
    }

    #[test]
    fn rejects_a_signature_from_a_different_key() {
        let key = SigningKey::from_bytes(&SEED);
        let other = SigningKey::from_bytes(&[0x43; 32]);
        let message = b"a message";
        let signature = other.sign(message).to_bytes();
        assert!(!verify_signature(
            message,
            &signature,
            key.verifying_key().as_bytes()
        ));
    }

    #[test]
    fn loads_exactly_32_key_bytes_and_ignores_the_rest() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("public_key");
        let key = SigningKey::from_bytes(&SEED);
        let mut contents = key.verifying_key().as_bytes().to_vec();
        contents.extend_from_slice(b"trailing junk");
        std::fs::write(&path, &contents)?;

        let loaded = load_public_key(&path)?;
        assert_eq!(&loaded, key.verifying_key().as_bytes());
        Ok(())
    }

    #[test]
    fn short_key_file_is_fatal() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("public_key");
        std::fs::write(&path, [0u8; 31])?;

        match load_public_key(&path) {
            Err(FatalError::ShortRead {
                path: reported,
                expected,
                actual,
            }) => {
                assert_eq!(reported, path);
                assert_eq!(expected, PUBLIC_KEY_LEN);
                assert_eq!(actual, 31);
            }
            other => anyhow::bail!("expected ShortRead, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn missing_key_file_is_fatal() {
        let path = PathBuf::from("/nonexistent/edsu/public_key");
        match load_public_key(&path) {
            Err(FatalError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected Io, got {other:?}"),
        }
    }
}
