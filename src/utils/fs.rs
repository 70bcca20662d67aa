use crate::error::{FetchError, Result};
use std::path::Path;

fn map_io(path: &Path, e: std::io::Error) -> FetchError {
    match e.kind() {
        std::io::ErrorKind::PermissionDenied => FetchError::PermissionDenied {
            path: path.to_path_buf(),
        },
        _ => FetchError::from(e),
    }
}

/// Creates `path` and any missing parents. Succeeds if it already exists.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    if !path.exists() {
        std::fs::create_dir_all(path).map_err(|e| map_io(path, e))?;
    }
    Ok(())
}

pub fn is_dir_empty(path: &Path) -> Result<bool> {
    let mut entries = std::fs::read_dir(path).map_err(|e| map_io(path, e))?;
    Ok(entries.next().is_none())
}

pub fn count_entries(path: &Path) -> Result<usize> {
    if !path.is_dir() {
        return Ok(0);
    }
    Ok(std::fs::read_dir(path).map_err(|e| map_io(path, e))?.count())
}

pub fn remove_file_if_exists(path: &Path) -> Result<bool> {
    if path.exists() {
        std::fs::remove_file(path).map_err(|e| map_io(path, e))?;
        return Ok(true);
    }
    Ok(false)
}

pub fn remove_dir_recursive(path: &Path) -> Result<()> {
    if path.exists() {
        std::fs::remove_dir_all(path).map_err(|e| map_io(path, e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_dir_exists_is_idempotent() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b").join("c");

        ensure_dir_exists(&nested).unwrap();
        ensure_dir_exists(&nested).unwrap();
        assert!(nested.is_dir());
    }

    #[test]
    fn test_permission_denied_keeps_path() {
        let path = Path::new("/data/celeba/img");
        let error = map_io(
            path,
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(matches!(
            error,
            FetchError::PermissionDenied { path: p } if p == path
        ));

        let error = map_io(
            path,
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
        );
        assert!(matches!(error, FetchError::Io(_)));
    }

    #[test]
    fn test_ensure_dir_exists_under_file_fails() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("celeba");
        std::fs::write(&file, b"x").unwrap();

        let result = ensure_dir_exists(&file.join("img"));
        assert!(matches!(result, Err(FetchError::Io(_))));
    }

    #[test]
    fn test_is_dir_empty() {
        let temp = TempDir::new().unwrap();
        assert!(is_dir_empty(temp.path()).unwrap());

        std::fs::write(temp.path().join("x.jpg"), b"x").unwrap();
        assert!(!is_dir_empty(temp.path()).unwrap());
        assert_eq!(count_entries(temp.path()).unwrap(), 1);
    }

    #[test]
    fn test_is_dir_empty_missing_dir_errors() {
        let temp = TempDir::new().unwrap();
        assert!(is_dir_empty(&temp.path().join("missing")).is_err());
        assert_eq!(count_entries(&temp.path().join("missing")).unwrap(), 0);
    }

    #[test]
    fn test_remove_helpers() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("img.zip");
        std::fs::write(&file, b"zip").unwrap();

        assert!(remove_file_if_exists(&file).unwrap());
        assert!(!remove_file_if_exists(&file).unwrap());

        let dir = temp.path().join("img");
        std::fs::create_dir_all(dir.join("sub")).unwrap();
        remove_dir_recursive(&dir).unwrap();
        assert!(!dir.exists());
        remove_dir_recursive(&dir).unwrap();
    }
}
