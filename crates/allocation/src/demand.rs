use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use stockplan_core::{DomainError, DomainResult, is_valid_quantity};

/// One raw line of the production structure (bill of materials).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemandLine {
    pub item_code: String,
    pub quantity: f64,
}

impl DemandLine {
    pub fn new(item_code: impl Into<String>, quantity: f64) -> Self {
        Self {
            item_code: item_code.into(),
            quantity,
        }
    }

    fn validate(&self, row: usize) -> DomainResult<()> {
        if self.item_code.trim().is_empty() {
            return Err(DomainError::input_shape(format!(
                "demand row {row}: item_code cannot be empty"
            )));
        }
        if !is_valid_quantity(self.quantity) {
            return Err(DomainError::input_shape(format!(
                "demand row {row} ({}): quantity must be a finite non-negative number, got {}",
                self.item_code, self.quantity
            )));
        }
        Ok(())
    }
}

/// Total requirement for one item after scaling and summing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregatedDemand {
    pub item_code: String,
    pub required_quantity: f64,
}

/// Scale every line by the production multiplier and sum per item code.
///
/// Output is ordered by item code. The whole list is rejected if any line is
/// malformed.
pub fn aggregate_demand(lines: &[DemandLine], multiplier: u32) -> DomainResult<Vec<AggregatedDemand>> {
    if multiplier == 0 {
        return Err(DomainError::validation("production multiplier must be at least 1"));
    }

    for (row, line) in lines.iter().enumerate() {
        line.validate(row)?;
    }

    let factor = f64::from(multiplier);
    let mut totals: BTreeMap<&str, f64> = BTreeMap::new();
    for line in lines {
        *totals.entry(line.item_code.as_str()).or_insert(0.0) += line.quantity * factor;
    }

    Ok(totals
        .into_iter()
        .map(|(item_code, required_quantity)| AggregatedDemand {
            item_code: item_code.to_string(),
            required_quantity,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_duplicate_items_and_scales_by_multiplier() {
        let lines = vec![
            DemandLine::new("PL0040029", 2.0),
            DemandLine::new("PL0010001", 1.0),
            DemandLine::new("PL0040029", 3.0),
        ];

        let aggregated = aggregate_demand(&lines, 4).unwrap();
        assert_eq!(
            aggregated,
            vec![
                AggregatedDemand {
                    item_code: "PL0010001".to_string(),
                    required_quantity: 4.0,
                },
                AggregatedDemand {
                    item_code: "PL0040029".to_string(),
                    required_quantity: 20.0,
                },
            ]
        );
    }

    #[test]
    fn zero_multiplier_is_rejected() {
        let err = aggregate_demand(&[DemandLine::new("A", 1.0)], 0).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn malformed_line_rejects_the_whole_list() {
        let lines = vec![DemandLine::new("A", 1.0), DemandLine::new("B", -2.0)];
        match aggregate_demand(&lines, 1).unwrap_err() {
            DomainError::InputShape(msg) if msg.contains("row 1") => {}
            other => panic!("expected input shape error, got {other:?}"),
        }
    }

    #[test]
    fn empty_demand_aggregates_to_nothing() {
        assert!(aggregate_demand(&[], 3).unwrap().is_empty());
    }
}
