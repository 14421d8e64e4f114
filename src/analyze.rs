use crate::prelude::*;

use crate::annotate::annotate;
use crate::cache::PlatformCache;
use crate::infer::is_supported;
use crate::manifest::EnvFile;
use crate::output::Report;
use crate::search::RegistrySearch;
use crate::sections::{split_sections, Section};
use serde_yaml::Value;

/// Run the whole pipeline over one environment file: for every string
/// dependency, resolve its platform support (from the cache, or by querying
/// the registry once per platform and inferring), then rewrite the dependency
/// list with selector comments. Sequential by design; each dependency is
/// fully resolved and its cache line flushed before the next one starts, so
/// an interrupted run keeps everything it learned even though the manifest
/// itself is only rewritten at the end.
pub fn analyze(
    env: &mut EnvFile,
    cache: &mut PlatformCache,
    registry: &dyn RegistrySearch,
    report: &Report,
) -> Result<()> {
    let deps: Vec<Value> = env.dependencies().to_vec();

    report.header();
    let strings = deps.iter().filter_map(Value::as_str);
    let hits = strings
        .clone()
        .filter(|raw| cache.contains(DepSpec::from(*raw).name()))
        .count();
    report.cached_summary(hits, strings.count());

    let mut new_deps = Vec::with_capacity(deps.len());
    for value in &deps {
        let raw = match value.as_str() {
            Some(raw) => raw,
            None => {
                // a different dependency kind (e.g. `pip:`); not ours to touch
                new_deps.push(value.clone());
                continue;
            }
        };
        let spec = DepSpec::from(raw);

        let (support, fresh) = match cache.lookup(spec.name()) {
            Some(decoded) => (decoded?, false),
            None => (query_support(&spec, registry)?, true),
        };
        report.entry(spec.name(), support, fresh);

        let rewritten = annotate(&spec, support);
        if rewritten.is_empty() {
            warn!(name = spec.name(), "not found on any platform, dropping");
            report.not_found(spec.name());
        } else if fresh {
            cache.insert(spec.name(), support)?;
        }
        new_deps.extend(rewritten.into_iter().map(Value::String));
    }

    env.set_dependencies(new_deps);
    Ok(())
}

/// Cache-miss path: one registry query per platform, in the fixed
/// win/osx/linux order, with all resulting sections pooled before inference.
fn query_support(spec: &DepSpec, registry: &dyn RegistrySearch) -> Result<PlatformSupport> {
    let mut sections: Vec<Section> = Vec::new();
    for platform in Platform::ALL {
        let raw = registry.search(spec.name(), platform)?;
        sections.extend(split_sections(&raw, spec.name()));
    }
    Ok(PlatformSupport {
        win: is_supported(&sections, Platform::Win),
        osx: is_supported(&sections, Platform::Osx),
        linux: is_supported(&sections, Platform::Linux),
    })
}

#[cfg(test)]
mod test {
    use super::*;
    use std::cell::RefCell;
    use std::fs;

    /// Registry stand-in: canned output per (package, platform), counting
    /// every call; unknown pairs answer like conda's "no match".
    struct ScriptedRegistry {
        responses: HashMap<(String, Platform), String>,
        calls: RefCell<usize>,
    }

    impl ScriptedRegistry {
        fn new() -> ScriptedRegistry {
            ScriptedRegistry {
                responses: HashMap::new(),
                calls: RefCell::new(0),
            }
        }

        fn found(mut self, name: &str, platform: Platform) -> ScriptedRegistry {
            let raw = format!(
                "Loading channels: done\n{name} 1.0 h000_0\n{}\nsubdir      : {}\n",
                "-".repeat(30),
                platform.subdir()
            );
            self.responses.insert((name.to_owned(), platform), raw);
            self
        }

        fn calls(&self) -> usize {
            *self.calls.borrow()
        }
    }

    impl RegistrySearch for ScriptedRegistry {
        fn search(&self, name: &str, platform: Platform) -> Result<String> {
            *self.calls.borrow_mut() += 1;
            Ok(self
                .responses
                .get(&(name.to_owned(), platform))
                .cloned()
                .unwrap_or_else(|| {
                    format!(
                        "Loading channels: done\nNo match found for: {name}. \
                         Search: *{name}*\n"
                    )
                }))
        }
    }

    struct Fixture {
        _dir: tempfile::TempDir,
        env: EnvFile,
        cache: PlatformCache,
        cache_path: PathBuf,
    }

    fn fixture(env_yaml: &str, cache_lines: &str) -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let env_path = dir.path().join("environment.yml");
        fs::write(&env_path, env_yaml).unwrap();
        let cache_path = dir.path().join("conda_platform");
        if !cache_lines.is_empty() {
            fs::write(&cache_path, cache_lines).unwrap();
        }
        Fixture {
            env: EnvFile::load(&env_path).unwrap(),
            cache: PlatformCache::load(&cache_path).unwrap(),
            cache_path,
            _dir: dir,
        }
    }

    fn quiet_report() -> Report {
        Report::new(true, true)
    }

    fn dep_strings(env: &EnvFile) -> Vec<String> {
        env.dependencies()
            .iter()
            .map(|v| v.as_str().unwrap_or("<mapping>").to_owned())
            .collect()
    }

    #[test]
    fn test_fresh_dependency_queried_annotated_cached() {
        let mut fx = fixture("dependencies:\n  - foo==1.0\n", "");
        let registry = ScriptedRegistry::new()
            .found("foo", Platform::Win)
            .found("foo", Platform::Linux);

        analyze(&mut fx.env, &mut fx.cache, &registry, &quiet_report()).unwrap();

        assert_eq!(registry.calls(), 3);
        assert_eq!(
            dep_strings(&fx.env),
            ["foo==1.0 # [win]", "foo==1.0 # [linux]"]
        );
        assert_eq!(
            fs::read_to_string(&fx.cache_path).unwrap(),
            "foo:wl-64\n"
        );
    }

    #[test]
    fn test_cache_hit_issues_no_queries() {
        let mut fx = fixture("dependencies:\n  - bar\n", "bar:all-64\n");
        let registry = ScriptedRegistry::new();

        analyze(&mut fx.env, &mut fx.cache, &registry, &quiet_report()).unwrap();

        assert_eq!(registry.calls(), 0);
        assert_eq!(dep_strings(&fx.env), ["bar"]);
        // nothing new discovered, nothing appended
        assert_eq!(fs::read_to_string(&fx.cache_path).unwrap(), "bar:all-64\n");
    }

    #[test]
    fn test_unsupported_everywhere_dropped_and_not_cached() {
        let mut fx = fixture("dependencies:\n  - ghost==0.1\n  - real\n", "");
        let registry = ScriptedRegistry::new()
            .found("real", Platform::Win)
            .found("real", Platform::Osx)
            .found("real", Platform::Linux);

        analyze(&mut fx.env, &mut fx.cache, &registry, &quiet_report()).unwrap();

        assert_eq!(dep_strings(&fx.env), ["real"]);
        // ghost gets re-queried next run on purpose
        assert_eq!(fs::read_to_string(&fx.cache_path).unwrap(), "real:all-64\n");
        assert!(!fx.cache.contains("ghost"));
    }

    #[test]
    fn test_non_string_dependencies_pass_through() {
        let yaml = indoc::indoc! {"
            dependencies:
              - foo
              - pip:
                  - requests
        "};
        let mut fx = fixture(yaml, "foo:win-64\n");
        let registry = ScriptedRegistry::new();

        analyze(&mut fx.env, &mut fx.cache, &registry, &quiet_report()).unwrap();

        assert_eq!(registry.calls(), 0);
        assert_eq!(dep_strings(&fx.env), ["foo # [win]", "<mapping>"]);
    }

    #[test]
    fn test_noarch_marker_flows_end_to_end() {
        let mut fx = fixture("dependencies:\n  - winonly\n", "");
        let raw = indoc::indoc! {"
            Loading channels: done
            winonly 1.0 h000_0
            ------------------
            subdir      : noarch
            dependencies:
              - __win
        "};
        let mut registry = ScriptedRegistry::new();
        registry
            .responses
            .insert(("winonly".to_owned(), Platform::Win), raw.to_owned());

        analyze(&mut fx.env, &mut fx.cache, &registry, &quiet_report()).unwrap();

        assert_eq!(dep_strings(&fx.env), ["winonly # [win]"]);
        assert_eq!(
            fs::read_to_string(&fx.cache_path).unwrap(),
            "winonly:win-64\n"
        );
    }

    #[test]
    fn test_corrupt_cache_code_aborts() {
        let mut fx = fixture("dependencies:\n  - foo\n", "foo:bogus-64\n");
        let registry = ScriptedRegistry::new();

        let got = analyze(&mut fx.env, &mut fx.cache, &registry, &quiet_report());
        let err = got.unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PlatyError>(),
            Some(PlatyError::MalformedCache { .. })
        ));
    }
}
