//! Allocation & transposition decision engine.
//!
//! Given one item's category pool, decide whether the destination pool covers
//! the requirement, whether an automatic source can cover the shortfall, or
//! whether stock must be bought (or a person must decide).

use serde::{Deserialize, Serialize};

use stockplan_core::{DomainResult, clamp_non_negative};
use stockplan_inventory::{Category, CategoryPool, ResolvedStock};

use crate::cost::{estimate_cost, weighted_unit_cost};
use crate::demand::AggregatedDemand;
use crate::policy::{ConsumptionMode, DestinationRule, SourceKind, TranspositionPolicy};
use crate::status::{Alert, AllocationStatus, TransferLeg, TranspositionNote};

/// Outcome of the decision rules for one pool, before costing.
#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub direct_balance: f64,
    pub total_available: f64,
    pub status: AllocationStatus,
    pub transposition_note: Option<TranspositionNote>,
    pub alerts: Vec<Alert>,
    pub purchase_quantity: f64,
}

/// Apply the decision rules of `rule` to a single pool.
pub fn classify(
    required: f64,
    destination: &Category,
    pool: &CategoryPool,
    rule: &DestinationRule,
    consumption: ConsumptionMode,
) -> Classification {
    let required = clamp_non_negative(required);
    let direct_balance = pool.get(destination);
    let total_available = direct_balance + pool.total_except(destination);
    let shortfall = required - direct_balance;

    let mut out = Classification {
        direct_balance,
        total_available,
        status: AllocationStatus::Ok,
        transposition_note: None,
        alerts: Vec::new(),
        purchase_quantity: 0.0,
    };

    if shortfall <= 0.0 {
        return out;
    }

    let (legs, covered) = match consumption {
        ConsumptionMode::FullCover => match first_fit(shortfall, pool, rule) {
            Some(leg) => (vec![leg], true),
            None => (Vec::new(), false),
        },
        ConsumptionMode::Incremental => {
            let (legs, remaining) = drain_in_order(shortfall, pool, rule);
            (legs, remaining <= 0.0)
        }
    };

    if covered {
        out.status = resolved_status(shortfall, &legs);
    }
    // Partially drained legs stay visible even when a purchase follows.
    out.transposition_note = (!legs.is_empty()).then(|| TranspositionNote {
        destination: destination.clone(),
        legs,
    });
    if covered {
        return out;
    }

    out.alerts = shortfall_alerts(destination, pool, rule);

    if total_available < required {
        let amount = clamp_non_negative(required - total_available);
        out.purchase_quantity = amount;
        out.status = AllocationStatus::Purchase { amount };
    } else {
        out.status = AllocationStatus::RequiresManualDecision;
    }
    out
}

/// First automatic source holding the whole shortfall. Sources are never combined.
fn first_fit(shortfall: f64, pool: &CategoryPool, rule: &DestinationRule) -> Option<TransferLeg> {
    rule.automatic
        .iter()
        .find(|source| pool.get(&source.category) >= shortfall)
        .map(|source| TransferLeg {
            source: source.category.clone(),
            amount: shortfall,
            kind: source.kind,
        })
}

/// Take `min(remaining, available)` from each automatic source in order.
/// Returns the drained legs and whatever shortfall they leave uncovered.
fn drain_in_order(shortfall: f64, pool: &CategoryPool, rule: &DestinationRule) -> (Vec<TransferLeg>, f64) {
    let mut remaining = shortfall;
    let mut legs = Vec::new();

    for source in &rule.automatic {
        if remaining <= 0.0 {
            break;
        }
        let take = pool.get(&source.category).min(remaining);
        if take > 0.0 {
            legs.push(TransferLeg {
                source: source.category.clone(),
                amount: take,
                kind: source.kind,
            });
            remaining -= take;
        }
    }

    (legs, remaining.max(0.0))
}

fn resolved_status(shortfall: f64, legs: &[TransferLeg]) -> AllocationStatus {
    match legs {
        [leg] => match leg.kind {
            SourceKind::Transpose => AllocationStatus::Transpose {
                amount: shortfall,
                source: leg.source.clone(),
            },
            SourceKind::DirectUse => AllocationStatus::PurchaseOrDirectUse {
                amount: shortfall,
                category: leg.source.clone(),
            },
        },
        _ => AllocationStatus::TransposeSplit {
            amount: shortfall,
            sources: legs.iter().map(|l| l.source.clone()).collect(),
        },
    }
}

fn shortfall_alerts(destination: &Category, pool: &CategoryPool, rule: &DestinationRule) -> Vec<Alert> {
    let mut alerts = Vec::new();
    let mut advisory_found = false;

    for source in &rule.automatic {
        let available = pool.get(&source.category);
        if available > 0.0 {
            alerts.push(Alert::PartialSource {
                category: source.category.clone(),
                destination: destination.clone(),
                available,
            });
        }
    }

    for category in rule.advisory_categories(destination, pool) {
        let available = pool.get(&category);
        if available > 0.0 {
            advisory_found = true;
            alerts.push(Alert::AdvisoryStock {
                category,
                destination: destination.clone(),
                available,
            });
        }
    }

    if !advisory_found {
        alerts.push(Alert::NoAlternativeBalance);
    }
    alerts
}

/// Decision record for one demanded item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationDecision {
    pub item_code: String,
    pub destination: Category,
    pub required_quantity: f64,
    pub pool: CategoryPool,
    pub direct_balance: f64,
    pub total_available: f64,
    pub status: AllocationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transposition_note: Option<TranspositionNote>,
    #[serde(default)]
    pub alerts: Vec<Alert>,
    pub purchase_quantity: f64,
    /// Weighted-average unit cost; `None` when no monetary data exists.
    pub unit_cost: Option<f64>,
    pub estimated_cost: Option<f64>,
}

/// Applies a validated policy to resolved stock.
#[derive(Debug, Clone, Copy)]
pub struct AllocationEngine<'p> {
    policy: &'p TranspositionPolicy,
}

impl<'p> AllocationEngine<'p> {
    pub fn new(policy: &'p TranspositionPolicy) -> DomainResult<Self> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn decide(
        &self,
        demand: &AggregatedDemand,
        destination: &Category,
        resolved: &ResolvedStock<'_>,
    ) -> DomainResult<AllocationDecision> {
        let rule = self.policy.rule(destination)?;
        let pool = resolved.pool();
        let c = classify(
            demand.required_quantity,
            destination,
            &pool,
            rule,
            self.policy.consumption(),
        );

        let unit_cost = weighted_unit_cost(resolved.records().iter().copied());
        let estimated_cost = estimate_cost(unit_cost, c.purchase_quantity);

        Ok(AllocationDecision {
            item_code: demand.item_code.clone(),
            destination: destination.clone(),
            required_quantity: clamp_non_negative(demand.required_quantity),
            pool,
            direct_balance: c.direct_balance,
            total_available: c.total_available,
            status: c.status,
            transposition_note: c.transposition_note,
            alerts: c.alerts,
            purchase_quantity: c.purchase_quantity,
            unit_cost,
            estimated_cost,
        })
    }
}
