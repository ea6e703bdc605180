//! Crash-safe JSONL file replacement.
//!
//! Records are written to a sibling temporary file (`<name>.tmp`), flushed,
//! and renamed over the target. A rename within one filesystem is atomic, so
//! readers observe either the previous file or the complete new one.

use crate::{JsonlWriter, Result};
use serde::Serialize;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use tokio::fs::File;

/// Atomically replaces `path` with one JSON line per element of `values`.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be written or the final
/// rename fails. The existing file is left untouched in either case.
///
/// # Examples
///
/// ```no_run
/// use issuedesk_jsonl::write_jsonl_atomic;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let rows = vec![serde_json::json!({"id": "desk-a1b2"})];
/// write_jsonl_atomic(".issuedesk/issues.jsonl", &rows).await?;
/// # Ok(())
/// # }
/// ```
pub async fn write_jsonl_atomic<T, P>(path: P, values: &[T]) -> Result<()>
where
    T: Serialize,
    P: AsRef<Path>,
{
    write_jsonl_atomic_iter(path, values.iter()).await
}

/// Iterator form of [`write_jsonl_atomic`].
///
/// # Errors
///
/// See [`write_jsonl_atomic`].
pub async fn write_jsonl_atomic_iter<T, I, P>(path: P, values: I) -> Result<()>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let temp_path = make_temp_path(path);

    if let Err(e) = write_to_temp_file(&temp_path, values).await {
        if let Err(cleanup) = tokio::fs::remove_file(&temp_path).await {
            tracing::debug!(path = %temp_path.display(), error = %cleanup, "temp file cleanup failed");
        }
        return Err(e);
    }

    tokio::fs::rename(&temp_path, path).await?;
    Ok(())
}

/// `issues.jsonl` becomes `issues.jsonl.tmp`; `issues` becomes `issues.tmp`.
fn make_temp_path(path: &Path) -> PathBuf {
    let extension = match path.extension() {
        Some(ext) => {
            let mut ext = ext.to_os_string();
            ext.push(".tmp");
            ext
        }
        None => OsString::from("tmp"),
    };
    path.with_extension(extension)
}

async fn write_to_temp_file<T, I>(temp_path: &Path, values: I) -> Result<()>
where
    T: Serialize,
    I: IntoIterator<Item = T>,
{
    let file = File::create(temp_path).await?;
    let mut writer = JsonlWriter::new(file);
    writer.write_all(values).await?;
    writer.flush().await?;
    writer.into_inner().into_inner().sync_all().await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde::Serialize;
    use tempfile::TempDir;

    #[derive(Serialize)]
    struct Row<'a> {
        id: &'a str,
    }

    #[rstest]
    #[case("/data/issues.jsonl", "/data/issues.jsonl.tmp")]
    #[case("/data/issues", "/data/issues.tmp")]
    #[case("backup.tar.gz", "backup.tar.gz.tmp")]
    #[case("issues.jsonl", "issues.jsonl.tmp")]
    fn temp_path_appends_tmp(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(make_temp_path(Path::new(input)), Path::new(expected));
    }

    #[tokio::test]
    async fn replaces_existing_file_and_removes_temp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("issues.jsonl");
        tokio::fs::write(&path, "old contents\n").await.unwrap();

        write_jsonl_atomic(&path, &[Row { id: "a" }, Row { id: "b" }])
            .await
            .unwrap();

        let contents = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(contents, "{\"id\":\"a\"}\n{\"id\":\"b\"}\n");
        assert!(!make_temp_path(&path).exists());
    }

    #[tokio::test]
    async fn failed_write_leaves_original_untouched() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing-dir").join("issues.jsonl");

        let result = write_jsonl_atomic(&path, &[Row { id: "a" }]).await;

        assert!(result.is_err());
        assert!(!path.exists());
    }
}
