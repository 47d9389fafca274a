use crate::core::Storage;
use crate::utils::error::{EtlError, Result};
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    /// 先寫入同目錄的暫存檔再原子性地改名，失敗時不會留下半份檔案
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);
        let dir = match full_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        tokio::fs::create_dir_all(&dir).await?;

        let len = data.len();
        let data = data.to_vec();
        let target = full_path.clone();
        tokio::task::spawn_blocking(move || write_atomically(&dir, &target, &data))
            .await
            .map_err(|e| EtlError::IoError(std::io::Error::other(e)))??;

        tracing::debug!("Wrote {} bytes to {}", len, full_path.display());
        Ok(())
    }
}

/// 既有檔案沿用原本的權限；新檔案與 open(2) 一樣以 0666 扣掉 umask
fn write_atomically(dir: &Path, target: &Path, data: &[u8]) -> Result<()> {
    let existing_permissions = std::fs::metadata(target).ok().map(|m| m.permissions());

    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = tempfile::Builder::new();
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }

    let mut temp_file = builder.tempfile_in(dir)?;
    temp_file.write_all(data)?;
    if let Some(permissions) = existing_permissions {
        temp_file.as_file().set_permissions(permissions)?;
    }
    temp_file.as_file().sync_all()?;
    temp_file.persist(target).map_err(|e| e.error)?;

    Ok(())
}
