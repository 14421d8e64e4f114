use crate::prelude::*;
use crate::sections::Section;

/// Decide whether any of the pooled sections shows the package is available
/// on `platform`.
///
/// Direct evidence is a matching subdir. A `noarch` build is platform-
/// independent *unless* it pins itself via virtual-package dependency markers
/// (`__win`/`__osx`/`__linux`): then it counts for the named platforms only.
/// A noarch build with no `__*` marker at all is taken as universal -- that's
/// how conda-forge uses noarch today, though nothing guarantees it.
pub fn is_supported(sections: &[Section], platform: Platform) -> bool {
    let marker = platform.virtual_marker();
    let mut no_subdir_count = 0;
    for section in sections {
        let subdirs = section.subdirs();
        if subdirs.is_empty() {
            no_subdir_count += 1;
            continue;
        }
        if subdirs.contains(platform.tag()) {
            return true;
        }
        if subdirs.contains("noarch") {
            let tokens = section.dependency_tokens();
            let has_match = tokens.iter().any(|t| *t == marker);
            let has_other =
                tokens.iter().any(|t| t.starts_with("__") && *t != marker);
            if has_match || !has_other {
                return true;
            }
        }
    }
    if no_subdir_count > 0 {
        trace!(
            no_subdir_count,
            platform = platform.tag(),
            "sections without a subdir line contributed no verdict"
        );
    }
    false
}
