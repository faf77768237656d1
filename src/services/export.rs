//! Saving downloaded spreadsheets.

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::repository::Download;
use crate::services::notifications::ActionMessages;
use crate::services::{ServiceError, ServiceResult};

pub const MSG_DOWNLOAD_SAVED: &str = "Archivo descargado.";
pub const MSG_DOWNLOAD_FAILED: &str = "No se pudo descargar el archivo.";

pub const DOWNLOAD: ActionMessages = ActionMessages::new(MSG_DOWNLOAD_SAVED, MSG_DOWNLOAD_FAILED);

/// Destination for downloaded files (browser download, disk, ...).
#[async_trait]
pub trait FileSaver: Send + Sync {
    /// Stores the file and returns where it ended up.
    async fn save(&self, download: &Download) -> std::io::Result<PathBuf>;
}

/// Writes downloads into a fixed directory.
pub struct DirectorySaver {
    dir: PathBuf,
}

impl DirectorySaver {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

/// Keeps only the final path component so a server-provided name cannot
/// escape the target directory.
fn safe_file_name(name: &str) -> Option<&str> {
    Path::new(name)
        .file_name()
        .and_then(|name| name.to_str())
        .filter(|name| !name.trim().is_empty())
}

#[async_trait]
impl FileSaver for DirectorySaver {
    async fn save(&self, download: &Download) -> std::io::Result<PathBuf> {
        let name = safe_file_name(&download.file_name).unwrap_or("descarga.xlsx");
        let path = self.dir.join(name);

        tokio::fs::create_dir_all(&self.dir).await?;
        tokio::fs::write(&path, &download.bytes).await?;

        Ok(path)
    }
}

/// Hands a finished download to `saver`.
pub async fn save_download<S>(saver: &S, download: Download) -> ServiceResult<PathBuf>
where
    S: FileSaver + ?Sized,
{
    let path = saver.save(&download).await.map_err(|err| {
        log::error!("Failed to save {}: {err}", download.file_name);
        ServiceError::Internal(err.to_string())
    })?;

    log::info!("Saved {} bytes to {}", download.bytes.len(), path.display());
    Ok(path)
}
