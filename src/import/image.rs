/// Copies a picked photo into private storage as `<name>.jpg`
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

/// Why a photo could not be imported
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("no image selected")]
    NoImageSelected,
    #[error("cannot read {}: {source}", path.display())]
    SourceUnreadable { path: PathBuf, source: io::Error },
    #[error("cannot write to {}: {source}", path.display())]
    DestinationUnwritable { path: PathBuf, source: io::Error },
    #[error("copy to {} failed: {source}", path.display())]
    Copy { path: PathBuf, source: io::Error },
    #[error("import task failed: {0}")]
    TaskFailed(String),
}

/// Destination file name for a contact photo.
///
/// Path separators are percent-escaped (and so is `%` itself) so the file
/// stays inside the images dir and distinct names never share a photo.
pub fn image_file_name(contact_name: &str) -> String {
    let mut safe = String::with_capacity(contact_name.len());
    for c in contact_name.chars() {
        match c {
            '%' => safe.push_str("%25"),
            '/' => safe.push_str("%2F"),
            '\\' => safe.push_str("%5C"),
            _ => safe.push(c),
        }
    }
    format!("{}.jpg", safe)
}

/// Import a photo on the blocking pool so the UI thread never waits on disk
pub async fn import_image_async(
    source: PathBuf,
    images_dir: PathBuf,
    contact_name: String,
) -> Result<PathBuf, ImportError> {
    tokio::task::spawn_blocking(move || import_image(&source, &images_dir, &contact_name))
        .await
        .map_err(|e| ImportError::TaskFailed(e.to_string()))?
}

/// Copy `source` into `images_dir/<contact_name>.jpg` and return the absolute path.
///
/// An existing file with the same name is replaced. The bytes are written to
/// a temp file in `images_dir` and renamed into place, so a failed copy never
/// leaves a partial photo behind.
pub fn import_image(
    source: &Path,
    images_dir: &Path,
    contact_name: &str,
) -> Result<PathBuf, ImportError> {
    // Open the source first: an unreadable pick must not touch private storage
    let mut input = File::open(source).map_err(|e| ImportError::SourceUnreadable {
        path: source.to_path_buf(),
        source: e,
    })?;

    let unwritable = |e: io::Error| ImportError::DestinationUnwritable {
        path: images_dir.to_path_buf(),
        source: e,
    };

    fs::create_dir_all(images_dir).map_err(unwritable)?;
    let mut staged = NamedTempFile::new_in(images_dir).map_err(unwritable)?;

    let destination = images_dir.join(image_file_name(contact_name));

    // Temp file is deleted on drop if we bail out here
    let bytes = io::copy(&mut input, staged.as_file_mut()).map_err(|e| ImportError::Copy {
        path: destination.clone(),
        source: e,
    })?;

    staged
        .as_file()
        .sync_all()
        .map_err(|e| ImportError::Copy {
            path: destination.clone(),
            source: e,
        })?;

    staged
        .persist(&destination)
        .map_err(|e| ImportError::Copy {
            path: destination.clone(),
            source: e.error,
        })?;

    let destination = fs::canonicalize(&destination).map_err(|e| ImportError::Copy {
        path: destination.clone(),
        source: e,
    })?;

    log::debug!("Imported {} bytes to {}", bytes, destination.display());
    Ok(destination)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_source(dir: &Path, name: &str, bytes: &[u8]) -> PathBuf {
        let path = dir.join(name);
        fs::write(&path, bytes).unwrap();
        path
    }

    #[test]
    fn test_copy_preserves_bytes_and_returns_absolute_path() {
        let picked = tempfile::tempdir().unwrap();
        let private = tempfile::tempdir().unwrap();
        let bytes: Vec<u8> = (0..=255u8).cycle().take(70_000).collect();
        let source = write_source(picked.path(), "IMG_0001.png", &bytes);

        let path = import_image(&source, private.path(), "Ada").unwrap();

        assert!(path.is_absolute());
        assert_eq!(path.file_name().unwrap(), "Ada.jpg");
        assert_eq!(fs::read(&path).unwrap(), bytes);
    }

    #[test]
    fn test_creates_missing_images_dir() {
        let picked = tempfile::tempdir().unwrap();
        let private = tempfile::tempdir().unwrap();
        let images_dir = private.path().join("files");
        let source = write_source(picked.path(), "a.jpg", b"jpeg");

        let path = import_image(&source, &images_dir, "Grace").unwrap();
        assert_eq!(fs::read(path).unwrap(), b"jpeg");
    }

    #[test]
    fn test_unreadable_source_leaves_no_file() {
        let private = tempfile::tempdir().unwrap();
        let images_dir = private.path().join("files");
        let missing = private.path().join("does-not-exist.jpg");

        let err = import_image(&missing, &images_dir, "Ada").unwrap_err();

        assert!(matches!(err, ImportError::SourceUnreadable { .. }));
        assert!(!images_dir.exists());
    }

    #[test]
    fn test_failed_copy_leaves_no_partial_file() {
        let private = tempfile::tempdir().unwrap();
        let images_dir = private.path().join("files");
        // A directory opens on unix but fails on read
        let source_dir = tempfile::tempdir().unwrap();

        let result = import_image(source_dir.path(), &images_dir, "Ada");

        assert!(result.is_err());
        assert!(!images_dir.join("Ada.jpg").exists());
        if images_dir.exists() {
            assert_eq!(fs::read_dir(&images_dir).unwrap().count(), 0);
        }
    }

    #[test]
    fn test_same_name_overwrites_previous_photo() {
        let picked = tempfile::tempdir().unwrap();
        let private = tempfile::tempdir().unwrap();
        let first = write_source(picked.path(), "first.jpg", b"first photo");
        let second = write_source(picked.path(), "second.jpg", b"second");

        let a = import_image(&first, private.path(), "Ada").unwrap();
        let b = import_image(&second, private.path(), "Ada").unwrap();

        assert_eq!(a, b);
        assert_eq!(fs::read(&b).unwrap(), b"second");
        assert_eq!(fs::read_dir(private.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_name_with_separators_stays_in_images_dir() {
        assert_eq!(image_file_name("../etc/passwd"), "..%2Fetc%2Fpasswd.jpg");
        assert_eq!(image_file_name("a\\b"), "a%5Cb.jpg");
        assert_eq!(image_file_name(""), ".jpg");

        let picked = tempfile::tempdir().unwrap();
        let private = tempfile::tempdir().unwrap();
        let source = write_source(picked.path(), "p.jpg", b"x");

        let path = import_image(&source, private.path(), "../escape").unwrap();
        let root = fs::canonicalize(private.path()).unwrap();
        assert_eq!(path.parent().unwrap(), root.as_path());
    }

    #[test]
    fn test_distinct_names_get_distinct_photos() {
        let names = ["a/b", "a_b", "a%2Fb", "a\\b", "a%5Cb", "a%b"];
        let files: std::collections::HashSet<String> =
            names.iter().map(|n| image_file_name(n)).collect();
        assert_eq!(files.len(), names.len());

        let picked = tempfile::tempdir().unwrap();
        let private = tempfile::tempdir().unwrap();
        let slash = write_source(picked.path(), "1.jpg", b"slash");
        let underscore = write_source(picked.path(), "2.jpg", b"underscore");

        let a = import_image(&slash, private.path(), "a/b").unwrap();
        let b = import_image(&underscore, private.path(), "a_b").unwrap();

        assert_ne!(a, b);
        assert_eq!(fs::read(&a).unwrap(), b"slash");
        assert_eq!(fs::read(&b).unwrap(), b"underscore");
    }

    #[tokio::test]
    async fn test_async_import() {
        let picked = tempfile::tempdir().unwrap();
        let private = tempfile::tempdir().unwrap();
        let source = write_source(picked.path(), "p.jpg", b"async bytes");

        let path = import_image_async(source, private.path().to_path_buf(), "Linus".into())
            .await
            .unwrap();
        assert_eq!(fs::read(path).unwrap(), b"async bytes");

        let err = import_image_async(
            picked.path().join("missing.jpg"),
            private.path().to_path_buf(),
            "Linus".into(),
        )
        .await
        .unwrap_err();
        assert!(matches!(err, ImportError::SourceUnreadable { .. }));
    }
}
