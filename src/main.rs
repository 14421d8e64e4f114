mod analyze;
mod annotate;
mod cache;
mod error;
mod infer;
mod lock;
mod manifest;
mod output;
mod prelude;
mod search;
mod sections;
mod vocab;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::prelude::*;
use crate::{
    cache::PlatformCache, lock::RunLock, manifest::EnvFile, output::Report,
    search::CondaSearch,
};

/// Work out which platforms every dependency in a conda environment file is
/// available on, and rewrite the file with `# [win]`-style selectors.
#[derive(Parser)]
#[command(version)]
struct Opt {
    /// The environment.yml to annotate (rewritten in place).
    env_file: PathBuf,
    /// Don't narrate progress to the console.
    #[arg(long)]
    quiet: bool,
    /// Don't re-print rows for dependencies already in the platform cache.
    #[arg(long)]
    no_cache_output: bool,
    /// The platform cache file.
    #[arg(long, default_value = "parameters/conda_platform")]
    platform_file: PathBuf,
    /// The advisory lock file shared with the sibling environment tools.
    #[arg(long, default_value = "parameters/processing_conda")]
    lock_file: PathBuf,
}

fn main() -> Result<()> {
    let opt = Opt::parse();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    // Held (and released, even on error) for everything below: the manifest
    // rewrite and the cache appends must not race a sibling tool.
    let _lock = RunLock::acquire(&opt.lock_file)?;

    let mut env = EnvFile::load(&opt.env_file)?;
    let mut cache = PlatformCache::load(&opt.platform_file)?;
    let registry = CondaSearch::new();
    let report = Report::new(opt.quiet, !opt.no_cache_output);

    analyze::analyze(&mut env, &mut cache, &registry, &report)?;
    env.save()?;

    report.finished(env.path(), &opt.platform_file);
    Ok(())
}
