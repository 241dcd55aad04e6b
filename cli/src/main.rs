//! Entry point for `edsu`, a setuid root helper that authenticates its
//! caller with an Ed25519 challenge-response exchange instead of an
//! interactive confirmation prompt.
//!
//! The binary takes no arguments. It must run with effective uid 0 (i.e.
//! installed setuid root); a caller whose real uid is already 0 skips
//! authentication. Everyone else is walked through one challenge-response
//! session on stdin/stdout, and on `ACCESS GRANTED` the process becomes
//! root and replaces itself with the shell. Denial exits 1; environment
//! failures exit 125; a failed shell exec exits 126, or 127 when the shell
//! path does not exist.

use std::env;
use std::io;
use std::process::ExitCode;

use edsu_core::AuthSession;
use edsu_core::FatalError;
use edsu_core::SessionOutcome;
use edsu_core::SuPaths;
use tracing_subscriber::EnvFilter;

mod escalate;

const DENIED_EXIT_CODE: u8 = 1;

/// How a run of the helper terminates when the exec did not happen.
///
/// This is the single place fatal errors and denial meet the process exit
/// status; everything below returns values.
enum Exit {
    Fatal(FatalError),
    Denied,
}

fn main() -> ExitCode {
    // Diagnostics go to stderr only; stdout carries the wire protocol.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();

    match run() {
        Exit::Fatal(err) => {
            eprintln!("edsu: {err}");
            ExitCode::from(err.exit_code())
        }
        Exit::Denied => ExitCode::from(DENIED_EXIT_CODE),
    }
}

/// Returns only when the shell exec did not happen.
fn run() -> Exit {
    // Rejected before any file is opened.
    if env::args_os().len() > 1 {
        return Exit::Fatal(FatalError::ArgumentsNotAllowed);
    }

    // SAFETY: geteuid/getuid cannot fail.
    let effective_uid = unsafe { libc::geteuid() };
    if effective_uid != 0 {
        return Exit::Fatal(FatalError::NotEffectiveRoot);
    }

    let paths = SuPaths::default();

    let real_uid = unsafe { libc::getuid() };
    if real_uid != 0 {
        let stdin = io::stdin();
        let stdout = io::stdout();
        let session = AuthSession::new(stdin.lock(), stdout.lock(), paths.clone());
        match session.run() {
            Ok(SessionOutcome::Granted) => {}
            Ok(SessionOutcome::Denied) => return Exit::Denied,
            Err(err) => return Exit::Fatal(err),
        }
    }

    Exit::Fatal(escalate::become_root_shell(&paths.shell))
}
