use std::fs;
use std::path::{Path, PathBuf};

use super::error::Result;

/// File exchange with the user: picking a file to import and handing over
/// an exported one.
pub trait FileTransfer {
    /// Bytes of the file the user picked, or `None` if they cancelled. A
    /// picked file that cannot be read is an error.
    fn prompt_file(&mut self) -> Result<Option<Vec<u8>>>;

    /// Deliver `bytes` to the user under `filename`. Returns where the file
    /// landed when it was written to disk.
    fn trigger_download(&mut self, bytes: &[u8], filename: &str) -> Result<Option<PathBuf>>;
}

/// Downloads land in a fixed directory; imports read whatever path the
/// front-end's file dialog chose last.
#[derive(Debug, Clone)]
pub struct DirectoryTransfer {
    download_dir: PathBuf,
    picked: Option<PathBuf>,
}

impl DirectoryTransfer {
    pub fn new(download_dir: impl Into<PathBuf>) -> Self {
        Self {
            download_dir: download_dir.into(),
            picked: None,
        }
    }

    /// The platform download directory, falling back to the working directory.
    pub fn downloads() -> Self {
        Self::new(dirs::download_dir().unwrap_or_else(|| PathBuf::from(".")))
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Record the file chosen in the open dialog; consumed by the next prompt.
    pub fn pick(&mut self, path: impl Into<PathBuf>) {
        self.picked = Some(path.into());
    }
}

impl FileTransfer for DirectoryTransfer {
    fn prompt_file(&mut self) -> Result<Option<Vec<u8>>> {
        let Some(path) = self.picked.take() else {
            return Ok(None);
        };
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) => {
                tracing::warn!("Failed to read {}: {}", path.display(), e);
                Err(e.into())
            }
        }
    }

    fn trigger_download(&mut self, bytes: &[u8], filename: &str) -> Result<Option<PathBuf>> {
        fs::create_dir_all(&self.download_dir)?;
        let target = self.download_dir.join(filename);
        fs::write(&target, bytes)?;
        tracing::info!("Exported {}", target.display());
        Ok(Some(target))
    }
}
