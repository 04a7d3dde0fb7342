//! Transposition rule table.
//!
//! Maps each production destination to the ordered list of categories it may
//! draw from automatically, plus the categories that are only ever reported.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use stockplan_core::{DomainError, DomainResult};
use stockplan_inventory::{Category, CategoryPool};

/// How an automatic source covers the shortfall.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    /// Stock is re-categorized into the destination pool.
    #[default]
    Transpose,
    /// Stock is consumed as-is from its own pool.
    DirectUse,
}

/// One entry of a destination's automatic source list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AutomaticSource {
    pub category: Category,
    #[serde(default)]
    pub kind: SourceKind,
}

impl AutomaticSource {
    pub fn transpose(category: Category) -> Self {
        Self {
            category,
            kind: SourceKind::Transpose,
        }
    }

    pub fn direct_use(category: Category) -> Self {
        Self {
            category,
            kind: SourceKind::DirectUse,
        }
    }
}

/// Rules for a single destination category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationRule {
    /// Automatic sources in priority order.
    #[serde(default)]
    pub automatic: Vec<AutomaticSource>,
    /// Advisory-only categories, in reporting order.
    #[serde(default)]
    pub advisory: Vec<Category>,
    /// Treat every other category found in a pool as advisory too.
    #[serde(default = "default_true")]
    pub advise_unlisted: bool,
}

fn default_true() -> bool {
    true
}

impl DestinationRule {
    pub fn new(automatic: Vec<AutomaticSource>, advisory: Vec<Category>) -> Self {
        Self {
            automatic,
            advisory,
            advise_unlisted: true,
        }
    }

    fn is_automatic(&self, category: &Category) -> bool {
        self.automatic.iter().any(|s| &s.category == category)
    }

    /// Advisory categories relevant to `pool`: listed ones first, then any
    /// unlisted pool category when `advise_unlisted` is set.
    pub fn advisory_categories(&self, destination: &Category, pool: &CategoryPool) -> Vec<Category> {
        let mut out = self.advisory.clone();
        if self.advise_unlisted {
            out.extend(
                pool.categories()
                    .filter(|c| {
                        *c != destination && !self.is_automatic(c) && !self.advisory.contains(c)
                    })
                    .cloned(),
            );
        }
        out
    }

    fn validate(&self, destination: &Category) -> DomainResult<()> {
        let mut seen = BTreeSet::new();
        for source in &self.automatic {
            if &source.category == destination {
                return Err(DomainError::validation(format!(
                    "destination {destination} cannot list itself as an automatic source"
                )));
            }
            if !seen.insert(&source.category) {
                return Err(DomainError::validation(format!(
                    "automatic source {} listed twice for {destination}",
                    source.category
                )));
            }
        }
        for category in &self.advisory {
            if category == destination || seen.contains(category) {
                return Err(DomainError::validation(format!(
                    "advisory category {category} for {destination} overlaps destination or automatic sources"
                )));
            }
        }
        Ok(())
    }
}

/// Shortfall coverage strategy.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConsumptionMode {
    /// First automatic source that covers the whole shortfall wins; sources
    /// are never combined.
    #[default]
    FullCover,
    /// Drain automatic sources in order until the shortfall is covered.
    Incremental,
}

/// Destination → rule table plus the consumption strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TranspositionPolicy {
    rules: BTreeMap<Category, DestinationRule>,
    #[serde(default)]
    consumption: ConsumptionMode,
}

impl Default for TranspositionPolicy {
    /// PL draws from PV (transpose) then RP (direct use); PV draws from PL.
    /// Everything else is advisory.
    fn default() -> Self {
        Self::empty()
            .with_rule(
                Category::Pl,
                DestinationRule::new(
                    vec![
                        AutomaticSource::transpose(Category::Pv),
                        AutomaticSource::direct_use(Category::Rp),
                    ],
                    vec![Category::Mp, Category::Aa, Category::Oi],
                ),
            )
            .with_rule(
                Category::Pv,
                DestinationRule::new(
                    vec![AutomaticSource::transpose(Category::Pl)],
                    vec![Category::Rp, Category::Mp, Category::Aa, Category::Oi],
                ),
            )
    }
}

impl TranspositionPolicy {
    pub fn empty() -> Self {
        Self {
            rules: BTreeMap::new(),
            consumption: ConsumptionMode::default(),
        }
    }

    pub fn with_rule(mut self, destination: Category, rule: DestinationRule) -> Self {
        self.rules.insert(destination, rule);
        self
    }

    pub fn with_consumption(mut self, consumption: ConsumptionMode) -> Self {
        self.consumption = consumption;
        self
    }

    pub fn consumption(&self) -> ConsumptionMode {
        self.consumption
    }

    pub fn rule(&self, destination: &Category) -> DomainResult<&DestinationRule> {
        self.rules.get(destination).ok_or_else(|| {
            DomainError::validation(format!("no transposition rule for destination {destination}"))
        })
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.rules.is_empty() {
            return Err(DomainError::validation("transposition policy has no destinations"));
        }
        for (destination, rule) in &self.rules {
            rule.validate(destination)?;
        }
        Ok(())
    }
}
