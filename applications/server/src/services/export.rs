/// Snapshot export service - mirrors the users table to a CSV file
use crate::error::{Result, ServerError};
use roster_core::User;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Writes the full user listing to a fixed CSV file
///
/// The target is always fully overwritten, never appended to. Failures here
/// are reported by callers but never undo the store mutation that triggered
/// the resync.
#[derive(Debug, Clone)]
pub struct SnapshotExporter {
    target: PathBuf,
}

impl SnapshotExporter {
    pub fn new(target: PathBuf) -> Self {
        Self { target }
    }

    /// Path the snapshot is written to
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// Initialize the target directory
    pub async fn initialize(&self) -> Result<()> {
        if let Some(parent) = self.target.parent() {
            fs::create_dir_all(parent).await?;
        }
        Ok(())
    }

    /// Overwrite the snapshot with the given listing
    ///
    /// The rows are written to a temp file next to the target and renamed
    /// into place, so a reader never sees a torn snapshot.
    pub async fn resync(&self, users: &[User]) -> Result<()> {
        let mut contents = String::from("id,name,email\n");
        for user in users {
            contents.push_str(&format!(
                "{},{},{}\n",
                user.id,
                csv_field(&user.name),
                csv_field(&user.email)
            ));
        }

        let tmp = self.target.with_extension("csv.tmp");
        fs::write(&tmp, contents.as_bytes())
            .await
            .map_err(|e| ServerError::Export(format!("write {}: {e}", tmp.display())))?;
        fs::rename(&tmp, &self.target)
            .await
            .map_err(|e| ServerError::Export(format!("rename to {}: {e}", self.target.display())))?;

        Ok(())
    }
}

/// Quote a field per RFC 4180 when it contains a delimiter, quote, or newline
fn csv_field(value: &str) -> String {
    if value.contains(&[',', '"', '\n', '\r'][..]) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}
