//! Host configuration from environment variables.
//!
//! | variable                | values                        | default      |
//! |-------------------------|-------------------------------|--------------|
//! | `STOCKPLAN_MATCH_MODE`  | `exact`, `suffix`             | `exact`      |
//! | `STOCKPLAN_SUFFIX_LEN`  | positive integer              | `7`          |
//! | `STOCKPLAN_CONSUMPTION` | `full_cover`, `incremental`   | policy's own |
//! | `STOCKPLAN_POLICY_FILE` | path to a JSON policy         | built-in     |
//!
//! Values in a request override these.

use std::path::PathBuf;

use anyhow::{Context, bail};

use stockplan_allocation::{ConsumptionMode, TranspositionPolicy};
use stockplan_inventory::{DEFAULT_SUFFIX_LEN, MatchMode};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct HostConfig {
    pub match_mode: MatchMode,
    /// Overrides the policy's own consumption mode when set.
    pub consumption: Option<ConsumptionMode>,
    pub policy_file: Option<PathBuf>,
}

impl HostConfig {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let suffix_len = match lookup("STOCKPLAN_SUFFIX_LEN") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .with_context(|| format!("STOCKPLAN_SUFFIX_LEN must be an integer, got {raw:?}"))?,
            None => DEFAULT_SUFFIX_LEN,
        };

        let match_mode = match lookup("STOCKPLAN_MATCH_MODE").as_deref().map(str::trim) {
            None | Some("exact") => MatchMode::ExactCode,
            Some("suffix") => MatchMode::SuffixCorrelation { suffix_len },
            Some(other) => bail!("STOCKPLAN_MATCH_MODE must be `exact` or `suffix`, got {other:?}"),
        };
        match_mode.validate()?;

        let consumption = match lookup("STOCKPLAN_CONSUMPTION").as_deref().map(str::trim) {
            None => None,
            Some("full_cover") => Some(ConsumptionMode::FullCover),
            Some("incremental") => Some(ConsumptionMode::Incremental),
            Some(other) => {
                bail!("STOCKPLAN_CONSUMPTION must be `full_cover` or `incremental`, got {other:?}")
            }
        };

        let policy_file = lookup("STOCKPLAN_POLICY_FILE")
            .filter(|p| !p.trim().is_empty())
            .map(PathBuf::from);

        Ok(Self {
            match_mode,
            consumption,
            policy_file,
        })
    }

    /// Policy from `policy_file`, or the built-in default, with any configured
    /// consumption override applied.
    pub fn load_policy(&self) -> anyhow::Result<TranspositionPolicy> {
        let policy = match &self.policy_file {
            Some(path) => {
                let raw = std::fs::read_to_string(path)
                    .with_context(|| format!("failed to read policy file {}", path.display()))?;
                let policy: TranspositionPolicy = serde_json::from_str(&raw)
                    .with_context(|| format!("failed to parse policy file {}", path.display()))?;
                tracing::info!(path = %path.display(), "loaded transposition policy");
                policy
            }
            None => TranspositionPolicy::default(),
        };
        policy.validate()?;
        Ok(self.apply_consumption(policy))
    }

    /// Apply the configured consumption override, if any, to `policy`.
    pub fn apply_consumption(&self, policy: TranspositionPolicy) -> TranspositionPolicy {
        match self.consumption {
            Some(consumption) => policy.with_consumption(consumption),
            None => policy,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn defaults_without_variables() {
        let config = HostConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config, HostConfig::default());
    }

    #[test]
    fn suffix_mode_picks_up_length() {
        let config = HostConfig::from_lookup(lookup(&[
            ("STOCKPLAN_MATCH_MODE", "suffix"),
            ("STOCKPLAN_SUFFIX_LEN", "5"),
            ("STOCKPLAN_CONSUMPTION", "incremental"),
        ]))
        .unwrap();
        assert_eq!(config.match_mode, MatchMode::SuffixCorrelation { suffix_len: 5 });
        assert_eq!(config.consumption, Some(ConsumptionMode::Incremental));
    }

    #[test]
    fn invalid_values_are_reported() {
        assert!(HostConfig::from_lookup(lookup(&[("STOCKPLAN_MATCH_MODE", "fuzzy")])).is_err());
        assert!(HostConfig::from_lookup(lookup(&[("STOCKPLAN_SUFFIX_LEN", "seven")])).is_err());
        assert!(
            HostConfig::from_lookup(lookup(&[
                ("STOCKPLAN_MATCH_MODE", "suffix"),
                ("STOCKPLAN_SUFFIX_LEN", "0"),
            ]))
            .is_err()
        );
    }

    #[test]
    fn missing_policy_file_is_an_error() {
        let config = HostConfig {
            policy_file: Some(PathBuf::from("/definitely/not/here.json")),
            ..HostConfig::default()
        };
        let err = config.load_policy().unwrap_err();
        assert!(err.to_string().contains("failed to read policy file"));
    }

    #[test]
    fn default_policy_carries_consumption_mode() {
        let config = HostConfig {
            consumption: Some(ConsumptionMode::Incremental),
            ..HostConfig::default()
        };
        let policy = config.load_policy().unwrap();
        assert_eq!(policy.consumption(), ConsumptionMode::Incremental);
    }
}
