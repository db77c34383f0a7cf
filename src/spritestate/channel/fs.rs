use super::{as_fragment, HashChannel};
use crate::error::{Result, SpriteError};
use std::fs;
use std::path::{Path, PathBuf};

const HASH_FILENAME: &str = "hash";

/// Channel backed by a single file holding the fragment.
pub struct FileChannel {
    path: PathBuf,
}

impl FileChannel {
    /// Channel stored as `<dir>/hash`.
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(HASH_FILENAME),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn ensure_parent(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(SpriteError::Io)?;
            }
        }
        Ok(())
    }
}

impl HashChannel for FileChannel {
    fn get(&self) -> Result<String> {
        if !self.path.exists() {
            return Ok(String::new());
        }
        let content = fs::read_to_string(&self.path).map_err(SpriteError::Io)?;
        Ok(content.trim().to_string())
    }

    fn set(&mut self, params: &str) -> Result<()> {
        self.ensure_parent()?;

        // Write to a sibling then rename, so readers never see a half-written fragment.
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, format!("{}\n", as_fragment(params))).map_err(SpriteError::Io)?;
        fs::rename(&tmp, &self.path).map_err(SpriteError::Io)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let channel = FileChannel::new(dir.path());
        assert_eq!(channel.get().unwrap(), "");
    }

    #[test]
    fn set_then_get() {
        let dir = TempDir::new().unwrap();
        let mut channel = FileChannel::new(dir.path().join("nested"));
        channel.set("sex=male&body=Body_light").unwrap();
        assert_eq!(channel.get().unwrap(), "#sex=male&body=Body_light");
        assert!(!channel.path().with_extension("tmp").exists());
    }

    #[test]
    fn reads_hand_edited_file() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("hash"), "  #?body=Body_light \n").unwrap();
        let channel = FileChannel::new(dir.path());
        assert_eq!(channel.get().unwrap(), "#?body=Body_light");
    }
}
