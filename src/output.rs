use crate::prelude::*;
use console::style;

const CHECK: &str = "\u{2713}";

/// Console narration for a run: a header, one row per dependency with three
/// checkmark columns, and warnings for packages found nowhere. Pure side
/// effect; suppressing it never changes what gets written to the manifest or
/// the cache.
pub struct Report {
    quiet: bool,
    show_cached: bool,
}

impl Report {
    pub fn new(quiet: bool, show_cached: bool) -> Report {
        Report { quiet, show_cached }
    }

    fn say(&self, line: impl Display) {
        if !self.quiet {
            println!("{}", line);
        }
    }

    pub fn header(&self) {
        self.say(format!(
            "{:<40} {:<8} {:<8} {:<10}",
            "Package", "win-64", "osx-64", "linux-64"
        ));
        self.say("-".repeat(70));
    }

    pub fn cached_summary(&self, hits: usize, total: usize) {
        if hits > 0 {
            self.say(format!(
                "Found {} cached entries, remaining {} to process.",
                hits,
                total - hits
            ));
        }
    }

    /// One row per dependency. Freshly-queried rows are blue so they stand
    /// out from cache hits; cache-hit rows can be switched off entirely.
    pub fn entry(&self, name: &str, support: PlatformSupport, fresh: bool) {
        if !fresh && !self.show_cached {
            return;
        }
        let mark = |yes: bool| if yes { CHECK } else { "" };
        let line = format!(
            "{:<40}{:<8}{:<8}{:<10}",
            name,
            mark(support.win),
            mark(support.osx),
            mark(support.linux)
        );
        if fresh {
            self.say(style(line).blue());
        } else {
            self.say(line);
        }
    }

    pub fn not_found(&self, name: &str) {
        self.say(style(format!(
            "[WARN] {name} not found on any major platform, skipping."
        ))
        .yellow());
    }

    /// Printed even under --quiet, like the original tool's closing line.
    pub fn finished(&self, env_path: &Path, cache_path: &Path) {
        println!(
            "\nUpdated {} and appended new entries to {}",
            env_path.display(),
            cache_path.display()
        );
    }
}
