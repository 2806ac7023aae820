use crate::error::{GumError, Result};
use crate::fs::FileSystem;
use std::path::Path;

const GO_MOD: &str = "go.mod";

/// Read `go.mod` in the current directory and extract the declared Go
/// version.
///
/// A missing `go.mod` is not an error, just the absence of a hint; a file
/// without a usable `go` directive is.
pub fn version_from_gomod(fs: &dyn FileSystem) -> Result<Option<String>> {
    let path = Path::new(GO_MOD);

    if !fs.exists(path) {
        return Ok(None);
    }

    let contents = fs.read_to_string(path)?;

    // The first line declaring a version wins
    for line in contents.lines() {
        let line = line.trim();
        if let Some(version) = line.strip_prefix("go ") {
            let version = version.trim();
            if version.is_empty() {
                return Err(GumError::DetectionFailed(
                    "invalid go directive in go.mod".to_string(),
                ));
            }
            return Ok(Some(version.to_string()));
        }
    }

    Err(GumError::DetectionFailed(
        "no go version declaration found in go.mod".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io;
    use std::path::PathBuf;

    struct FileMapFs(HashMap<PathBuf, String>);

    impl FileSystem for FileMapFs {
        fn exists(&self, path: &Path) -> bool {
            self.0.contains_key(path)
        }
        fn is_dir(&self, _: &Path) -> bool {
            false
        }
        fn create_dir_all(&self, _: &Path) -> io::Result<()> {
            Ok(())
        }
        fn remove_dir_all(&self, _: &Path) -> io::Result<()> {
            Ok(())
        }
        fn remove_file(&self, _: &Path) -> io::Result<()> {
            Ok(())
        }
        fn symlink(&self, _: &Path, _: &Path) -> io::Result<()> {
            Ok(())
        }
        fn read_link(&self, _: &Path) -> io::Result<PathBuf> {
            Err(io::Error::from(io::ErrorKind::NotFound))
        }
        fn canonicalize(&self, _: &Path) -> io::Result<PathBuf> {
            Err(io::Error::from(io::ErrorKind::NotFound))
        }
        fn list_dir(&self, _: &Path) -> io::Result<Vec<PathBuf>> {
            Ok(Vec::new())
        }
        fn read_to_string(&self, path: &Path) -> io::Result<String> {
            self.0
                .get(path)
                .cloned()
                .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))
        }
        fn home_dir(&self) -> Option<PathBuf> {
            None
        }
    }

    fn fs_with_gomod(contents: &str) -> FileMapFs {
        let mut files = HashMap::new();
        files.insert(PathBuf::from("go.mod"), contents.to_string());
        FileMapFs(files)
    }

    #[test]
    fn test_detects_version() {
        let fs = fs_with_gomod("module example.com/app\n\ngo 1.24\n");
        assert_eq!(version_from_gomod(&fs).unwrap(), Some("1.24".to_string()));
    }

    #[test]
    fn test_first_declaration_wins() {
        let fs = fs_with_gomod("go 1.22\ngo 1.24\n");
        assert_eq!(version_from_gomod(&fs).unwrap(), Some("1.22".to_string()));
    }

    #[test]
    fn test_leading_whitespace_is_trimmed() {
        let fs = fs_with_gomod("module example.com/app\n  go 1.23\n");
        assert_eq!(version_from_gomod(&fs).unwrap(), Some("1.23".to_string()));
    }

    #[test]
    fn test_missing_file_is_no_hint() {
        let fs = FileMapFs(HashMap::new());
        assert_eq!(version_from_gomod(&fs).unwrap(), None);
    }

    #[test]
    fn test_empty_directive_fails() {
        let fs = fs_with_gomod("go \n");
        let err = version_from_gomod(&fs).unwrap_err();
        assert!(matches!(err, GumError::DetectionFailed(_)));
    }

    #[test]
    fn test_no_declaration_fails() {
        let fs = fs_with_gomod("module example.com/app\n");
        let err = version_from_gomod(&fs).unwrap_err();
        assert!(matches!(err, GumError::DetectionFailed(_)));
    }

    #[test]
    fn test_godebug_line_is_not_a_declaration() {
        let fs = fs_with_gomod("godebug default=go1.21\ngo 1.24\n");
        assert_eq!(version_from_gomod(&fs).unwrap(), Some("1.24".to_string()));
    }
}
