use crate::domain::ports::ObjectStore;
use crate::utils::error::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Filesystem-backed object store: keys map to paths under a base
/// directory. The development and test counterpart of the S3 store.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    base_path: String,
}

impl LocalObjectStore {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }

    fn full_path(&self, key: &str) -> PathBuf {
        Path::new(&self.base_path).join(key)
    }

    fn collect_keys(&self, dir: &Path, keys: &mut Vec<String>) -> std::io::Result<()> {
        for entry in fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_dir() {
                self.collect_keys(&path, keys)?;
            } else if let Ok(relative) = path.strip_prefix(&self.base_path) {
                keys.push(relative.to_string_lossy().into_owned());
            }
        }
        Ok(())
    }
}

impl ObjectStore for LocalObjectStore {
    async fn put(&self, key: &str, data: &[u8]) -> Result<String> {
        let full_path = self.full_path(key);
        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(full_path, data)?;
        Ok(self.uri(key))
    }

    async fn get(&self, key: &str) -> Result<Vec<u8>> {
        let data = fs::read(self.full_path(key))?;
        Ok(data)
    }

    async fn list(&self, prefix: &str) -> Result<Vec<String>> {
        let base = Path::new(&self.base_path);
        if !base.exists() {
            return Ok(Vec::new());
        }

        let mut keys = Vec::new();
        self.collect_keys(base, &mut keys)?;
        keys.retain(|key| key.starts_with(prefix));
        keys.sort();
        Ok(keys)
    }

    async fn copy(&self, src_key: &str, dst_key: &str) -> Result<()> {
        let dst = self.full_path(dst_key);
        if let Some(parent) = dst.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::copy(self.full_path(src_key), dst)?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        match fs::remove_file(self.full_path(key)) {
            Ok(()) => Ok(()),
            // absent objects are already deleted
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    fn uri(&self, key: &str) -> String {
        self.full_path(key).to_string_lossy().into_owned()
    }
}
