use std::path::PathBuf;

/// Installed location of the 32-byte raw Ed25519 public key.
pub const PUBLIC_KEY_PATH: &str = "/etc/edsu/public_key";

/// System random source backing challenge generation.
pub const RANDOM_PATH: &str = "/dev/urandom";

/// Shell that replaces the process image once access is granted.
pub const SHELL_PATH: &str = "/bin/sh";

/// The filesystem collaborators of one session.
///
/// The defaults are the fixed install paths; there is no environment or
/// flag override. Tests substitute temporary files here.
#[derive(Debug, Clone)]
pub struct SuPaths {
    pub public_key: PathBuf,
    pub random_source: PathBuf,
    pub shell: PathBuf,
}

impl Default for SuPaths {
    fn default() -> Self {
        Self {
            public_key: PathBuf::from(PUBLIC_KEY_PATH),
            random_source: PathBuf::from(RANDOM_PATH),
            shell: PathBuf::from(SHELL_PATH),
        }
    }
}
