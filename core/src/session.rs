use std::io;
use std::io::Read;
use std::io::Write;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use crate::challenge::Challenge;
use crate::challenge::ChallengeMessage;
use crate::error::FatalError;
use crate::error::Result;
use crate::paths::SuPaths;
use crate::verify;
use crate::verify::SIGNATURE_LEN;

/// Hex characters of a well-formed response.
pub const SIGNATURE_HEX_LEN: usize = SIGNATURE_LEN * 2;

/// Exact size of a well-formed response line: 128 hex characters plus LF.
pub const RESPONSE_LINE_LEN: usize = SIGNATURE_HEX_LEN + 1;

/// Upper bound for the single response read.
pub const MAX_RESPONSE_READ: usize = 256;

/// Pacing delay between the standby notice and its terminating newline.
const STANDBY_PAUSE: Duration = Duration::from_secs(1);

/// Terminal result of one authentication session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionOutcome {
    Granted,
    Denied,
}

/// One challenge-response exchange over a pair of byte streams.
///
/// The session walks `START -> CHALLENGE_ISSUED -> RESPONSE_RECEIVED ->
/// {GRANTED | DENIED}` exactly once: it issues one challenge, performs one
/// read, and terminates. No transition is retried, and a denial consumes
/// the process invocation.
///
/// Streams are injected so the binary can pass locked stdin/stdout while
/// tests drive the session with in-memory buffers.
pub struct AuthSession<R, W> {
    input: R,
    output: W,
    paths: SuPaths,
    standby_pause: Duration,
}

impl<R: Read, W: Write> AuthSession<R, W> {
    pub fn new(input: R, output: W, paths: SuPaths) -> Self {
        Self {
            input,
            output,
            paths,
            standby_pause: STANDBY_PAUSE,
        }
    }

    #[cfg(test)]
    fn with_standby_pause(mut self, pause: Duration) -> Self {
        self.standby_pause = pause;
        self
    }

    /// Drive the session to a terminal state.
    ///
    /// `Ok` carries the protocol outcome; `Err` is reserved for environment
    /// failures (unreadable random source or key file, broken streams). A
    /// malformed or unverifiable response is `Ok(Denied)`, never an error.
    pub fn run(mut self) -> Result<SessionOutcome> {
        let message = self.issue_challenge()?;
        let response = self.read_response()?;

        let granted = match signature_from_response(&response) {
            Some(signature) => {
                // Framing failures must never touch the key file, so the
                // key is loaded only on this arm.
                let public_key = verify::load_public_key(&self.paths.public_key)?;
                verify::verify_signature(message.as_bytes(), &signature, &public_key)
            }
            None => {
                tracing::debug!(len = response.len(), "malformed response line");
                false
            }
        };

        if granted {
            self.write_out(b"ACCESS GRANTED\n")?;
            self.flush_out()?;
            tracing::debug!("session granted");
            Ok(SessionOutcome::Granted)
        } else {
            self.write_out(b"ACCESS DENIED\n")?;
            self.flush_out()?;
            tracing::debug!("session denied");
            Ok(SessionOutcome::Denied)
        }
    }

    /// `START -> CHALLENGE_ISSUED`: standby notice, pacing pause, then the
    /// challenge line. Returns the exact 65-byte message the response must
    /// sign.
    fn issue_challenge(&mut self) -> Result<ChallengeMessage> {
        self.write_out(b"Standby...")?;
        self.flush_out()?;
        thread::sleep(self.standby_pause);
        self.write_out(b"\n")?;

        let challenge = Challenge::generate(&self.paths.random_source)?;
        let message = challenge.message();
        self.write_out(b"Challenge: ")?;
        // The message carries its own trailing line feed.
        self.write_out(message.as_bytes())?;
        self.flush_out()?;
        tracing::debug!("challenge issued");
        Ok(message)
    }

    /// `CHALLENGE_ISSUED -> RESPONSE_RECEIVED`: one single read call;
    /// whatever bytes it returns are the entire response.
    ///
    /// A peer that delivers the line across several writes may therefore be
    /// judged malformed. Kept byte-for-byte compatible with the original
    /// wire protocol rather than accumulating a full line.
    fn read_response(&mut self) -> Result<Vec<u8>> {
        let mut buf = [0u8; MAX_RESPONSE_READ];
        let n = self.input.read(&mut buf).map_err(|source| FatalError::Io {
            path: PathBuf::from("<response>"),
            source,
        })?;
        Ok(buf[..n].to_vec())
    }

    fn write_out(&mut self, bytes: &[u8]) -> Result<()> {
        self.output.write_all(bytes).map_err(stdout_error)
    }

    fn flush_out(&mut self) -> Result<()> {
        self.output.flush().map_err(stdout_error)
    }
}

fn stdout_error(source: io::Error) -> FatalError {
    FatalError::Io {
        path: PathBuf::from("<stdout>"),
        source,
    }
}

/// Extract the signature from a response line, or `None` if the line is
/// malformed.
///
/// Framing is strict: exactly [`RESPONSE_LINE_LEN`] bytes with a line feed
/// at offset [`SIGNATURE_HEX_LEN`]. This is the only rejection layer before
/// verification; the hex decoder itself never rejects (see
/// `edsu-utils-hex`).
fn signature_from_response(line: &[u8]) -> Option<[u8; SIGNATURE_LEN]> {
    if line.len() != RESPONSE_LINE_LEN || line[SIGNATURE_HEX_LEN] != b'\n' {
        return None;
    }
    edsu_utils_hex::decode(&line[..SIGNATURE_HEX_LEN])
        .try_into()
        .ok()
}
