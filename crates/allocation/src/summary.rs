use serde::{Deserialize, Serialize};

use crate::engine::AllocationDecision;
use crate::status::AllocationStatus;

/// Totals over one evaluation run.
///
/// Always recomputed from the decision list; holds no state of its own.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SummaryStatistics {
    pub item_count: usize,
    pub purchase_count: usize,
    /// Share of items needing a purchase, 0–100.
    pub purchase_percentage: f64,
    pub total_purchase_quantity: f64,
    /// Undefined line costs count as zero here.
    pub total_estimated_cost: f64,
    pub ok_count: usize,
    pub transpose_count: usize,
    pub direct_use_count: usize,
    pub manual_decision_count: usize,
    /// Items whose cost could not be estimated.
    pub uncosted_count: usize,
}

impl SummaryStatistics {
    pub fn from_decisions(decisions: &[AllocationDecision]) -> Self {
        let mut summary = Self {
            item_count: decisions.len(),
            ..Self::default()
        };

        for decision in decisions {
            match decision.status {
                AllocationStatus::Ok => summary.ok_count += 1,
                AllocationStatus::Transpose { .. } | AllocationStatus::TransposeSplit { .. } => {
                    summary.transpose_count += 1
                }
                AllocationStatus::PurchaseOrDirectUse { .. } => summary.direct_use_count += 1,
                AllocationStatus::Purchase { .. } => summary.purchase_count += 1,
                AllocationStatus::RequiresManualDecision => summary.manual_decision_count += 1,
            }
            summary.total_purchase_quantity += decision.purchase_quantity;
            match decision.estimated_cost {
                Some(cost) => summary.total_estimated_cost += cost,
                None => summary.uncosted_count += 1,
            }
        }

        if summary.item_count > 0 {
            summary.purchase_percentage =
                summary.purchase_count as f64 / summary.item_count as f64 * 100.0;
        }
        summary
    }
}
