use std::ffi::CString;
use std::io;
use std::os::unix::ffi::OsStrExt;
use std::path::Path;

use edsu_core::FatalError;

/// Become root and replace the process image with the shell at `shell`.
///
/// Group identity is set before user identity, both to 0, then the shell
/// is exec'd with `argv[0] = "sh"`. Returns only on failure; success never
/// comes back to the caller.
pub fn become_root_shell(shell: &Path) -> FatalError {
    // SAFETY: setgid/setuid take no pointers; failure is reported via the
    // return value and errno.
    if unsafe { libc::setgid(0) } < 0 {
        return FatalError::Identity {
            call: "setgid",
            source: io::Error::last_os_error(),
        };
    }
    if unsafe { libc::setuid(0) } < 0 {
        return FatalError::Identity {
            call: "setuid",
            source: io::Error::last_os_error(),
        };
    }

    let Ok(shell_path) = CString::new(shell.as_os_str().as_bytes()) else {
        return FatalError::Exec {
            shell: shell.to_path_buf(),
            source: io::Error::new(io::ErrorKind::InvalidInput, "path contains a NUL byte"),
        };
    };
    let argv: [*const libc::c_char; 2] = [c"sh".as_ptr(), std::ptr::null()];

    // SAFETY: both pointers reference NUL-terminated storage that outlives
    // the call; execv only returns on failure.
    unsafe {
        libc::execv(shell_path.as_ptr(), argv.as_ptr());
    }

    let source = io::Error::last_os_error();
    tracing::debug!(shell = %shell.display(), "execv returned");
    FatalError::Exec {
        shell: shell.to_path_buf(),
        source,
    }
}
