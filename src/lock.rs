use crate::prelude::*;
use std::fs;

/// Advisory lock shared with the sibling environment-mutating tools: a file
/// whose content is `1` while some run is active, `0` (or absent) otherwise.
/// Purely cooperative, but good enough to keep two invocations from racing on
/// the manifest and the platform cache.
///
/// Released by writing `0` back in `Drop`, so the lock clears on success and
/// failure alike.
#[derive(Debug)]
pub struct RunLock {
    path: PathBuf,
}

impl RunLock {
    pub fn acquire(path: &Path) -> Result<RunLock> {
        if path.exists() {
            let text = fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read {}", path.display()))?;
            if text.trim() == "1" {
                return Err(PlatyError::LockHeld {
                    path: path.to_owned(),
                }
                .into());
            }
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
        fs::write(path, "1")
            .wrap_err_with(|| format!("failed to write {}", path.display()))?;
        Ok(RunLock {
            path: path.to_owned(),
        })
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        // nothing useful to do about a failure here
        let _ = fs::write(&self.path, "0");
    }
}
