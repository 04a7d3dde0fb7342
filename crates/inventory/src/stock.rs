use serde::{Deserialize, Serialize};

use stockplan_core::{DomainError, DomainResult, is_valid_quantity};

use crate::category::Category;

/// Optional monetary amount attached to a stock record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StockValue {
    /// Value of a single unit.
    Unit(f64),
    /// Value of the whole record (all units together).
    Total(f64),
}

impl StockValue {
    fn amount(&self) -> f64 {
        match self {
            StockValue::Unit(v) | StockValue::Total(v) => *v,
        }
    }
}

/// One row of the on-hand inventory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockRecord {
    /// Item code, possibly carrying a category prefix (e.g. `PV0040029`).
    pub item_code: String,
    pub category: Category,
    pub quantity: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<StockValue>,
}

impl StockRecord {
    pub fn new(item_code: impl Into<String>, category: Category, quantity: f64) -> Self {
        Self {
            item_code: item_code.into(),
            category,
            quantity,
            value: None,
        }
    }

    /// Build a record whose category is the code's prefix.
    pub fn from_prefixed_code(item_code: impl Into<String>, quantity: f64, suffix_len: usize) -> Self {
        let item_code = item_code.into();
        let category = Category::from_prefixed_code(&item_code, suffix_len);
        Self::new(item_code, category, quantity)
    }

    pub fn with_value(mut self, value: StockValue) -> Self {
        self.value = Some(value);
        self
    }

    /// Monetary value of the whole record, if any cost information exists.
    pub fn monetary_total(&self) -> Option<f64> {
        self.value.map(|v| match v {
            StockValue::Unit(unit) => unit * self.quantity,
            StockValue::Total(total) => total,
        })
    }

    fn validate(&self, row: usize) -> DomainResult<()> {
        if self.item_code.trim().is_empty() {
            return Err(DomainError::input_shape(format!(
                "stock row {row}: item_code cannot be empty"
            )));
        }
        if !is_valid_quantity(self.quantity) {
            return Err(DomainError::input_shape(format!(
                "stock row {row} ({}): quantity must be a finite non-negative number, got {}",
                self.item_code, self.quantity
            )));
        }
        if let Some(value) = self.value {
            if !is_valid_quantity(value.amount()) {
                return Err(DomainError::input_shape(format!(
                    "stock row {row} ({}): monetary value must be a finite non-negative number",
                    self.item_code
                )));
            }
        }
        Ok(())
    }
}

/// Validated, read-only inventory snapshot.
///
/// Records can only be read after construction; evaluation borrows the
/// snapshot immutably for the whole run.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(transparent)]
pub struct StockSnapshot {
    records: Vec<StockRecord>,
}

impl StockSnapshot {
    /// Validate every record and freeze the snapshot.
    ///
    /// Rejects the whole collection on the first malformed row.
    pub fn new(records: Vec<StockRecord>) -> DomainResult<Self> {
        for (row, record) in records.iter().enumerate() {
            record.validate(row)?;
        }

        let unclassified = records.iter().filter(|r| !r.category.is_classified()).count();
        if unclassified > 0 {
            tracing::warn!(
                unclassified,
                total = records.len(),
                "stock snapshot contains records outside the known categories"
            );
        }

        Ok(Self { records })
    }

    pub fn records(&self) -> &[StockRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'de> Deserialize<'de> for StockSnapshot {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let records = Vec::<StockRecord>::deserialize(deserializer)?;
        StockSnapshot::new(records).map_err(serde::de::Error::custom)
    }
}
