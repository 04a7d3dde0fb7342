//! Batch evaluation: demand list + stock snapshot → decisions + summary.

use serde::{Deserialize, Serialize};

use stockplan_core::{DomainError, DomainResult};
use stockplan_inventory::{Category, MatchMode, StockIndex, StockSnapshot};

use crate::demand::{DemandLine, aggregate_demand};
use crate::engine::{AllocationDecision, AllocationEngine};
use crate::policy::TranspositionPolicy;
use crate::summary::SummaryStatistics;

/// Everything a caller chooses for one run besides the data itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationConfig {
    pub destination: Category,
    /// Number of finished units to produce; scales every demand line.
    #[serde(default = "default_multiplier")]
    pub multiplier: u32,
    #[serde(default)]
    pub match_mode: MatchMode,
    #[serde(default)]
    pub policy: TranspositionPolicy,
}

fn default_multiplier() -> u32 {
    1
}

impl EvaluationConfig {
    pub fn new(destination: Category) -> Self {
        Self {
            destination,
            multiplier: default_multiplier(),
            match_mode: MatchMode::default(),
            policy: TranspositionPolicy::default(),
        }
    }

    pub fn with_multiplier(mut self, multiplier: u32) -> Self {
        self.multiplier = multiplier;
        self
    }

    pub fn with_match_mode(mut self, match_mode: MatchMode) -> Self {
        self.match_mode = match_mode;
        self
    }

    pub fn with_policy(mut self, policy: TranspositionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.multiplier == 0 {
            return Err(DomainError::validation("production multiplier must be at least 1"));
        }
        self.match_mode.validate()?;
        self.policy.validate()?;
        self.policy.rule(&self.destination)?;
        Ok(())
    }
}

/// Result of one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub decisions: Vec<AllocationDecision>,
    pub summary: SummaryStatistics,
}

/// Evaluate every demanded item against the snapshot.
///
/// Configuration and demand are validated up front; a malformed input fails
/// the whole run before any item is decided. Decisions come out in item-code
/// order.
pub fn evaluate(
    demand: &[DemandLine],
    snapshot: &StockSnapshot,
    config: &EvaluationConfig,
) -> DomainResult<Evaluation> {
    config.validate()?;
    let items = aggregate_demand(demand, config.multiplier)?;
    let engine = AllocationEngine::new(&config.policy)?;
    let index = StockIndex::build(snapshot, config.match_mode)?;

    tracing::debug!(
        items = items.len(),
        stock_records = snapshot.len(),
        stock_items = index.distinct_items(),
        destination = %config.destination,
        "evaluating demand"
    );

    let decisions = items
        .iter()
        .map(|item| {
            let resolved = index.resolve(&item.item_code);
            let decision = engine.decide(item, &config.destination, &resolved)?;
            tracing::debug!(
                item = %decision.item_code,
                matched = resolved.records().len(),
                status = %decision.status,
                "item decided"
            );
            Ok(decision)
        })
        .collect::<DomainResult<Vec<_>>>()?;

    let summary = SummaryStatistics::from_decisions(&decisions);
    tracing::info!(
        items = summary.item_count,
        purchases = summary.purchase_count,
        purchase_quantity = summary.total_purchase_quantity,
        estimated_cost = summary.total_estimated_cost,
        "evaluation complete"
    );

    Ok(Evaluation { decisions, summary })
}
