use crate::prelude::*;
use std::process::{Command, Stdio};

pub const DEFAULT_CHANNEL: &str = "conda-forge";

/// Boundary to the package registry: one raw-text query per
/// (package, platform) pair. Trait so the pipeline can run against a scripted
/// registry in tests.
pub trait RegistrySearch {
    fn search(&self, name: &str, platform: Platform) -> Result<String>;
}

/// The real thing: shells out to `conda search --info`.
pub struct CondaSearch {
    channel: String,
}

impl CondaSearch {
    pub fn new() -> CondaSearch {
        CondaSearch {
            channel: DEFAULT_CHANNEL.to_owned(),
        }
    }
}

impl RegistrySearch for CondaSearch {
    fn search(&self, name: &str, platform: Platform) -> Result<String> {
        debug!(name, platform = platform.subdir(), "querying registry");
        let output = Command::new("conda")
            .args([
                "search",
                "--info",
                name,
                "--platform",
                platform.subdir(),
                "-c",
                &self.channel,
            ])
            .stdin(Stdio::null())
            .stderr(Stdio::null())
            .output()
            .wrap_err_with(|| format!("failed to run conda search for {name:?}"))?;
        // A nonzero exit (e.g. "no match") still carries usable stdout; the
        // section parser turns whatever we got into zero or more sections.
        if !output.status.success() {
            debug!(name, status = %output.status, "conda search exited nonzero");
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
