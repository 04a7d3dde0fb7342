use serde::{Deserialize, Serialize};

use stockplan_inventory::Category;

use crate::policy::SourceKind;

/// Fulfilment status of one item.
///
/// Payloads carry quantities and categories; rendering to text is left to
/// the `Display` impl and whatever presents it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AllocationStatus {
    /// The destination pool alone covers the requirement.
    Ok,
    /// `amount` units are moved from `source` into the destination pool.
    Transpose { amount: f64, source: Category },
    /// `amount` units are drained across several sources (incremental mode).
    TransposeSplit { amount: f64, sources: Vec<Category> },
    /// `amount` units are used directly from `category` without transposing.
    PurchaseOrDirectUse { amount: f64, category: Category },
    /// Stock is insufficient in aggregate; `amount` units must be bought.
    Purchase { amount: f64 },
    /// Stock exists in aggregate but no automatic rule claims it.
    RequiresManualDecision,
}

impl core::fmt::Display for AllocationStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            AllocationStatus::Ok => f.write_str("ok"),
            AllocationStatus::Transpose { amount, source } => {
                write!(f, "transpose {amount} from {source}")
            }
            AllocationStatus::TransposeSplit { amount, sources } => {
                let labels: Vec<&str> = sources.iter().map(Category::label).collect();
                write!(f, "transpose {amount} from {}", labels.join(" + "))
            }
            AllocationStatus::PurchaseOrDirectUse { amount, category } => {
                write!(f, "use {amount} directly from {category}")
            }
            AllocationStatus::Purchase { amount } => write!(f, "purchase {amount}"),
            AllocationStatus::RequiresManualDecision => f.write_str("requires manual decision"),
        }
    }
}

/// One movement of stock towards the destination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransferLeg {
    pub source: Category,
    pub amount: f64,
    pub kind: SourceKind,
}

/// Movements that resolve a shortfall. Only present on transposition statuses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranspositionNote {
    pub destination: Category,
    pub legs: Vec<TransferLeg>,
}

impl core::fmt::Display for TranspositionNote {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        for (i, leg) in self.legs.iter().enumerate() {
            if i > 0 {
                f.write_str(" | ")?;
            }
            match leg.kind {
                SourceKind::Transpose => {
                    write!(f, "{} units {} -> {}", leg.amount, leg.source, self.destination)?
                }
                SourceKind::DirectUse => {
                    write!(f, "{} units {} -> direct use", leg.amount, leg.source)?
                }
            }
        }
        Ok(())
    }
}

/// Advisory message attached to an unresolved shortfall.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Alert {
    /// An automatic source holds stock but not enough to cover the shortfall.
    PartialSource {
        category: Category,
        destination: Category,
        available: f64,
    },
    /// An advisory-only category holds stock that a person may decide to use.
    AdvisoryStock {
        category: Category,
        destination: Category,
        available: f64,
    },
    NoAlternativeBalance,
}

impl core::fmt::Display for Alert {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Alert::PartialSource {
                category,
                destination,
                available,
            } => write!(
                f,
                "{category} has {available} units for {destination} (does not cover the shortfall alone)"
            ),
            Alert::AdvisoryStock {
                category,
                destination,
                available,
            } => write!(
                f,
                "{category} has {available} units that could serve {destination} (manual decision)"
            ),
            Alert::NoAlternativeBalance => f.write_str("no alternative balance available"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_renders_without_trailing_decimals() {
        let status = AllocationStatus::Transpose {
            amount: 100.0,
            source: Category::Pv,
        };
        assert_eq!(status.to_string(), "transpose 100 from PV");
        assert_eq!(AllocationStatus::Purchase { amount: 30.0 }.to_string(), "purchase 30");
    }

    #[test]
    fn status_serializes_with_tag_and_payload() {
        let json = serde_json::to_value(AllocationStatus::PurchaseOrDirectUse {
            amount: 5.0,
            category: Category::Rp,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({"status": "purchase_or_direct_use", "amount": 5.0, "category": "RP"})
        );
        let ok = serde_json::to_value(AllocationStatus::Ok).unwrap();
        assert_eq!(ok, serde_json::json!({"status": "ok"}));
    }

    #[test]
    fn note_lists_every_leg() {
        let note = TranspositionNote {
            destination: Category::Pl,
            legs: vec![
                TransferLeg {
                    source: Category::Pv,
                    amount: 10.0,
                    kind: SourceKind::Transpose,
                },
                TransferLeg {
                    source: Category::Rp,
                    amount: 2.5,
                    kind: SourceKind::DirectUse,
                },
            ],
        };
        assert_eq!(note.to_string(), "10 units PV -> PL | 2.5 units RP -> direct use");
    }
}
