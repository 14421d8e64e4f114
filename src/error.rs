use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlatyError {
    #[error("unrecognized platform code {code:?} cached for {name:?}")]
    MalformedCache { name: String, code: String },
    #[error("another run holds the lock at {} -- aborting", path.display())]
    LockHeld { path: std::path::PathBuf },
}
