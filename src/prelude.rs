pub use std::collections::{HashMap, HashSet};
pub use std::fmt::Display;
pub use std::path::{Path, PathBuf};

pub use eyre::{Result, WrapErr};
pub use once_cell::sync::Lazy;
pub use regex::Regex;
pub use tracing::{debug, trace, warn};

pub use crate::error::PlatyError;
pub use crate::vocab::*;
