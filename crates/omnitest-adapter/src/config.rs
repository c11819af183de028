use globset::{GlobBuilder, GlobSet, GlobSetBuilder};
use serde::{Deserialize, Serialize};

/// Adapter policy knobs.
///
/// The two dispatch generations of the adapter differ only in policy, not in
/// structure, so both live behind flags here rather than in parallel
/// implementations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdapterConfig {
    /// Issue one run/debug call per compilation unit instead of one per
    /// method. Halves backend round-trips when selected tests share a unit.
    pub group_runs_by_unit: bool,
    /// Value of the `noBuild` flag passed to discovery. Discovery usually
    /// follows a build-completion trigger, where a rebuild is a no-op.
    pub discovery_no_build: bool,
    /// Glob patterns restricting which discovered projects are admitted,
    /// matched against project paths case-insensitively. Absent or empty
    /// means admit all.
    pub project_filters: Option<Vec<String>>,
}

/// Compiled form of [`AdapterConfig::project_filters`].
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    set: Option<GlobSet>,
}

impl ProjectFilter {
    pub fn new(patterns: Option<&[String]>) -> Result<Self, globset::Error> {
        let Some(patterns) = patterns.filter(|p| !p.is_empty()) else {
            return Ok(Self { set: None });
        };

        let mut builder = GlobSetBuilder::new();
        for pattern in patterns {
            builder.add(GlobBuilder::new(pattern).case_insensitive(true).build()?);
        }
        Ok(Self {
            set: Some(builder.build()?),
        })
    }

    pub fn admits(&self, project_path: &str) -> bool {
        match &self.set {
            Some(set) => set.is_match(project_path),
            None => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn no_patterns_admits_everything() {
        let filter = ProjectFilter::new(None).unwrap();
        assert!(filter.admits("/ws/Anything/Anything.csproj"));

        let filter = ProjectFilter::new(Some(&[])).unwrap();
        assert!(filter.admits("/ws/Anything/Anything.csproj"));
    }

    #[test]
    fn patterns_match_case_insensitively() {
        let patterns = vec!["**/*Tests.csproj".to_string()];
        let filter = ProjectFilter::new(Some(&patterns)).unwrap();

        assert!(filter.admits("/ws/Foo/Foo.Tests.csproj"));
        assert!(filter.admits("/ws/Foo/FOO.TESTS.CSPROJ"));
        assert!(!filter.admits("/ws/Foo/Foo.csproj"));
    }

    #[test]
    fn invalid_patterns_are_rejected() {
        let patterns = vec!["[".to_string()];
        assert!(ProjectFilter::new(Some(&patterns)).is_err());
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let config: AdapterConfig = serde_json::from_value(serde_json::json!({})).unwrap();
        assert_eq!(config, AdapterConfig::default());
        assert!(!config.group_runs_by_unit);
        assert!(!config.discovery_no_build);
    }
}
