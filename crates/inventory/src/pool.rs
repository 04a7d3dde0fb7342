use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::stock::StockRecord;

/// Quantity on hand per category for one resolved item.
///
/// Categories are exactly those seen in the matched records; lookups of any
/// other category read as zero.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryPool {
    quantities: BTreeMap<Category, f64>,
}

impl CategoryPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a StockRecord>,
    {
        let mut pool = Self::new();
        for record in records {
            pool.add(record.category.clone(), record.quantity);
        }
        pool
    }

    pub fn add(&mut self, category: Category, quantity: f64) {
        *self.quantities.entry(category).or_insert(0.0) += quantity;
    }

    pub fn with(mut self, category: Category, quantity: f64) -> Self {
        self.add(category, quantity);
        self
    }

    pub fn get(&self, category: &Category) -> f64 {
        self.quantities.get(category).copied().unwrap_or(0.0)
    }

    /// Sum over every category.
    pub fn total(&self) -> f64 {
        self.quantities.values().sum()
    }

    /// Sum over every category except `excluded`.
    pub fn total_except(&self, excluded: &Category) -> f64 {
        self.quantities
            .iter()
            .filter(|(c, _)| *c != excluded)
            .map(|(_, q)| *q)
            .sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Category, f64)> {
        self.quantities.iter().map(|(c, q)| (c, *q))
    }

    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.quantities.keys()
    }

    /// Categories outside the fixed set, each by its own label.
    pub fn unclassified(&self) -> impl Iterator<Item = (&Category, f64)> {
        self.iter().filter(|(c, _)| !c.is_classified())
    }

    /// Aggregate quantity held in categories outside the fixed set.
    pub fn unclassified_total(&self) -> f64 {
        self.unclassified().map(|(_, q)| q).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.quantities.is_empty()
    }
}
