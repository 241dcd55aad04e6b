use assert_cmd::Command;
use predicates::prelude::*;

const GENERIC_FAILURE_EXIT_CODE: i32 = 125;

#[test]
fn rejects_any_argument_before_any_io() -> anyhow::Result<()> {
    Command::cargo_bin("edsu")?
        .arg("extra")
        .assert()
        .failure()
        .code(GENERIC_FAILURE_EXIT_CODE)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("no arguments are allowed"));
    Ok(())
}

#[test]
fn rejects_help_and_version_like_any_other_argument() -> anyhow::Result<()> {
    for arg in ["--help", "--version", "-h"] {
        Command::cargo_bin("edsu")?
            .arg(arg)
            .assert()
            .failure()
            .code(GENERIC_FAILURE_EXIT_CODE)
            .stdout(predicate::str::is_empty())
            .stderr(predicate::str::contains("no arguments are allowed"));
    }
    Ok(())
}

#[test]
fn refuses_to_run_without_effective_root() -> anyhow::Result<()> {
    // SAFETY: geteuid cannot fail.
    if unsafe { libc::geteuid() } == 0 {
        // The gate is only observable from an unprivileged test run.
        return Ok(());
    }
    Command::cargo_bin("edsu")?
        .write_stdin("")
        .assert()
        .failure()
        .code(GENERIC_FAILURE_EXIT_CODE)
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("not running as root (is it setuid?)"));
    Ok(())
}
