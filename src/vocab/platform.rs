use crate::prelude::*;

/// The three 64-bit platforms we annotate for, in the fixed order every part
/// of the pipeline uses (query order, selector order, console columns).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Win,
    Osx,
    Linux,
}

impl Platform {
    pub const ALL: [Platform; 3] = [Platform::Win, Platform::Osx, Platform::Linux];

    /// The conda subdir / `--platform` argument, e.g. `win-64`.
    pub fn subdir(&self) -> &'static str {
        match self {
            Platform::Win => "win-64",
            Platform::Osx => "osx-64",
            Platform::Linux => "linux-64",
        }
    }

    /// The short identifier used in subdir matching and selector comments.
    pub fn tag(&self) -> &'static str {
        match self {
            Platform::Win => "win",
            Platform::Osx => "osx",
            Platform::Linux => "linux",
        }
    }

    /// The virtual-package dependency marker a noarch package uses to pin
    /// itself to one platform, e.g. `__win`.
    pub fn virtual_marker(&self) -> &'static str {
        match self {
            Platform::Win => "__win",
            Platform::Osx => "__osx",
            Platform::Linux => "__linux",
        }
    }
}

impl Display for Platform {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Which of the three platforms a package is available on.
///
/// Round-trips through the compact codes used in the platform cache file:
/// `win-64`/`osx-64`/`linux-64` for exactly one platform, `wo-64`/`wl-64`/
/// `ol-64` for pairs, and the empty code for all three (written to disk as
/// `all-64` so every cache line has a visible code). The all-false triple has
/// no code: it is never cached, so it never needs one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlatformSupport {
    pub win: bool,
    pub osx: bool,
    pub linux: bool,
}

impl PlatformSupport {
    pub fn supports(&self, platform: Platform) -> bool {
        match platform {
            Platform::Win => self.win,
            Platform::Osx => self.osx,
            Platform::Linux => self.linux,
        }
    }

    pub fn any(&self) -> bool {
        self.win || self.osx || self.linux
    }

    pub fn all(&self) -> bool {
        self.win && self.osx && self.linux
    }

    pub fn code(&self) -> &'static str {
        match (self.win, self.osx, self.linux) {
            (true, true, true) => "",
            (true, false, false) => "win-64",
            (false, true, false) => "osx-64",
            (false, false, true) => "linux-64",
            (true, true, false) => "wo-64",
            (true, false, true) => "wl-64",
            (false, true, true) => "ol-64",
            (false, false, false) => "unknown",
        }
    }

    /// The form actually written to the cache file.
    pub fn file_code(&self) -> &'static str {
        match self.code() {
            "" => "all-64",
            code => code,
        }
    }

    /// Inverse of `code`. Accepts the on-disk `all-64` spelling as well as
    /// the empty code. Anything else means the cache file has been corrupted
    /// or hand-edited; guessing a default here would silently mis-annotate
    /// the manifest, so fail loudly instead.
    pub fn decode(name: &str, code: &str) -> Result<PlatformSupport, PlatyError> {
        let (win, osx, linux) = match code {
            "" | "all-64" => (true, true, true),
            "win-64" => (true, false, false),
            "osx-64" => (false, true, false),
            "linux-64" => (false, false, true),
            "wo-64" => (true, true, false),
            "wl-64" => (true, false, true),
            "ol-64" => (false, true, true),
            _ => {
                return Err(PlatyError::MalformedCache {
                    name: name.to_owned(),
                    code: code.to_owned(),
                })
            }
        };
        Ok(PlatformSupport { win, osx, linux })
    }
}
