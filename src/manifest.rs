use crate::prelude::*;
use serde_yaml::{Mapping, Value};
use std::fs;
use std::io::Write;

/// A conda `environment.yml`, held as a raw YAML mapping so every key we
/// don't care about survives a load/save round trip in its original order.
///
/// `dependencies` is a sequence of either plain strings (the specifiers we
/// annotate) or single-key mappings like `pip:` (a different dependency kind;
/// passed through untouched).
pub struct EnvFile {
    path: PathBuf,
    doc: Mapping,
}

impl EnvFile {
    pub fn load(path: &Path) -> Result<EnvFile> {
        let text = fs::read_to_string(path)
            .wrap_err_with(|| format!("failed to read {}", path.display()))?;
        let doc: Mapping = serde_yaml::from_str(&text)
            .wrap_err_with(|| format!("failed to parse {}", path.display()))?;
        Ok(EnvFile {
            path: path.to_owned(),
            doc,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn dependencies(&self) -> &[Value] {
        self.doc
            .get("dependencies")
            .and_then(Value::as_sequence)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn set_dependencies(&mut self, deps: Vec<Value>) {
        self.doc.insert(
            Value::String("dependencies".to_owned()),
            Value::Sequence(deps),
        );
    }

    /// Write the whole document back in one shot: serialize to a temp file in
    /// the same directory, then rename into place, so a crash mid-write can't
    /// leave a half-written manifest behind.
    pub fn save(&self) -> Result<()> {
        let text = serde_yaml::to_string(&self.doc)
            .wrap_err("failed to serialize environment file")?;
        let dir = self.path.parent().unwrap_or(Path::new("."));
        let mut tmp = tempfile::NamedTempFile::new_in(dir)
            .wrap_err_with(|| format!("failed to create temp file in {}", dir.display()))?;
        tmp.write_all(text.as_bytes())
            .wrap_err("failed to write environment file")?;
        tmp.persist(&self.path)
            .wrap_err_with(|| format!("failed to replace {}", self.path.display()))?;
        Ok(())
    }
}
