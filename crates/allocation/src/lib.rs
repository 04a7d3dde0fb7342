//! Allocation & transposition decisions for production demand.
//!
//! This crate contains the decision rules, implemented purely as deterministic
//! domain logic (no IO, no storage). Inputs are a demand list and a validated
//! stock snapshot; outputs are one decision per item plus a summary.

pub mod cost;
pub mod demand;
pub mod engine;
pub mod evaluate;
pub mod policy;
pub mod status;
pub mod summary;

pub use cost::{estimate_cost, weighted_unit_cost};
pub use demand::{AggregatedDemand, DemandLine, aggregate_demand};
pub use engine::{AllocationDecision, AllocationEngine, Classification, classify};
pub use evaluate::{Evaluation, EvaluationConfig, evaluate};
pub use policy::{AutomaticSource, ConsumptionMode, DestinationRule, SourceKind, TranspositionPolicy};
pub use status::{Alert, AllocationStatus, TransferLeg, TranspositionNote};
pub use summary::SummaryStatistics;

pub use stockplan_inventory::{MatchMode, resolve_stock};
