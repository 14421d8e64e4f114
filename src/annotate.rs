use crate::prelude::*;

/// Rewrite one dependency for the manifest: the bare specifier when it's
/// available everywhere, otherwise one copy per supported platform with that
/// platform's selector comment, win then osx then linux. An empty result
/// means the package was found nowhere and should be dropped (and warned
/// about) by the caller.
pub fn annotate(spec: &DepSpec, support: PlatformSupport) -> Vec<String> {
    if support.all() {
        return vec![spec.bare().to_owned()];
    }
    Platform::ALL
        .iter()
        .filter(|platform| support.supports(**platform))
        .map(|platform| format!("{} # [{}]", spec.bare(), platform.tag()))
        .collect()
}
