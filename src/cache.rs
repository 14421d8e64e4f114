use crate::prelude::*;
use std::fs;
use std::io::Write;

/// The flat name->code table that lets repeat runs skip the registry
/// entirely.
///
/// Format: UTF-8 text, one `name:code` line per entry, in discovery order.
/// Lines without a colon are ignored on load. New entries are appended to the
/// backing file the moment they're discovered, one write per entry, so a run
/// that dies after N packages still keeps all N. Packages that turned out to
/// be available nowhere are deliberately *not* recorded -- they get re-queried
/// on every run, which is the behavior we want for transient registry lag.
pub struct PlatformCache {
    path: PathBuf,
    table: HashMap<String, String>,
}

impl PlatformCache {
    pub fn load(path: &Path) -> Result<PlatformCache> {
        let mut table = HashMap::new();
        if path.exists() {
            let text = fs::read_to_string(path)
                .wrap_err_with(|| format!("failed to read {}", path.display()))?;
            for line in text.lines() {
                if let Some((name, code)) = line.trim().split_once(':') {
                    table.insert(name.to_owned(), code.to_owned());
                }
            }
        }
        Ok(PlatformCache {
            path: path.to_owned(),
            table,
        })
    }

    pub fn contains(&self, name: &str) -> bool {
        self.table.contains_key(name)
    }

    /// Cache hit -> the decoded support triple. A hit with an unrecognized
    /// code is a `MalformedCache` error, not a guess.
    pub fn lookup(&self, name: &str) -> Option<Result<PlatformSupport, PlatyError>> {
        self.table
            .get(name)
            .map(|code| PlatformSupport::decode(name, code))
    }

    /// Record a freshly-discovered entry, flushing to disk immediately.
    /// Callers only invoke this for packages supported somewhere.
    pub fn insert(&mut self, name: &str, support: PlatformSupport) -> Result<()> {
        let code = support.file_code();
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .wrap_err_with(|| format!("failed to create {}", parent.display()))?;
        }
        let mut file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .wrap_err_with(|| format!("failed to open {}", self.path.display()))?;
        writeln!(file, "{name}:{code}")
            .wrap_err_with(|| format!("failed to append to {}", self.path.display()))?;
        self.table.insert(name.to_owned(), code.to_owned());
        Ok(())
    }
}
