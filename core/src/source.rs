use std::fs::File;
use std::io::ErrorKind;
use std::io::Read;
use std::path::Path;

use crate::error::FatalError;
use crate::error::Result;

/// Fill `buf` from the start of the file at `path`.
///
/// Short reads and `EINTR` are retried; end-of-file before `buf` is full is
/// a [`FatalError::ShortRead`] naming the path. Bytes past `buf.len()` are
/// left unread.
pub(crate) fn read_exactly(path: &Path, buf: &mut [u8]) -> Result<()> {
    let mut file = File::open(path).map_err(|source| FatalError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut filled = 0;
    while filled < buf.len() {
        match file.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(source) if source.kind() == ErrorKind::Interrupted => continue,
            Err(source) => {
                return Err(FatalError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        }
    }

    if filled != buf.len() {
        return Err(FatalError::ShortRead {
            path: path.to_path_buf(),
            expected: buf.len(),
            actual: filled,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    use super::read_exactly;
    use crate::error::FatalError;

    #[test]
    fn fills_the_buffer_and_ignores_trailing_bytes() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("source");
        std::fs::write(&path, b"0123456789abcdef")?;

        let mut buf = [0u8; 8];
        read_exactly(&path, &mut buf)?;
        assert_eq!(&buf, b"01234567");
        Ok(())
    }

    #[test]
    fn reports_short_sources_with_the_byte_counts() -> anyhow::Result<()> {
        let dir = TempDir::new()?;
        let path = dir.path().join("short");
        std::fs::write(&path, b"abc")?;

        let mut buf = [0u8; 8];
        match read_exactly(&path, &mut buf) {
            Err(FatalError::ShortRead {
                path: reported,
                expected,
                actual,
            }) => {
                assert_eq!(reported, path);
                assert_eq!(expected, 8);
                assert_eq!(actual, 3);
            }
            other => anyhow::bail!("expected ShortRead, got {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn reports_missing_files_as_io_errors() {
        let path = PathBuf::from("/nonexistent/edsu/source");
        let mut buf = [0u8; 4];
        match read_exactly(&path, &mut buf) {
            Err(FatalError::Io { path: reported, .. }) => assert_eq!(reported, path),
            other => panic!("expected Io, got {other:?}"),
        }
    }
}
