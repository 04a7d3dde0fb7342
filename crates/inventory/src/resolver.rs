//! Item identity resolution.
//!
//! Decides which stock records describe the same physical item as a demand
//! code. The allocation engine only ever sees the resolved set and stays
//! unaware of how "same item" is determined.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use stockplan_core::{DomainError, DomainResult};

use crate::pool::CategoryPool;
use crate::stock::{StockRecord, StockSnapshot};

/// Conventional length of the numeric identifier at the end of a code.
pub const DEFAULT_SUFFIX_LEN: usize = 7;

/// Strategy that maps an item code to the key used for correlation.
pub trait IdentityStrategy {
    /// Reject configurations under which keys would be meaningless.
    fn validate(&self) -> DomainResult<()> {
        Ok(())
    }

    fn correlation_key<'a>(&self, code: &'a str) -> &'a str;
}

/// How stock codes are matched against demand codes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum MatchMode {
    /// Codes must be equal verbatim; categories come from a separate column.
    #[default]
    ExactCode,
    /// Codes are `<category-prefix><identifier>`; the trailing `suffix_len`
    /// characters identify the item.
    SuffixCorrelation { suffix_len: usize },
}

impl MatchMode {
    pub fn suffix() -> Self {
        MatchMode::SuffixCorrelation {
            suffix_len: DEFAULT_SUFFIX_LEN,
        }
    }

    pub fn validate(&self) -> DomainResult<()> {
        match self {
            MatchMode::SuffixCorrelation { suffix_len: 0 } => {
                Err(DomainError::validation("suffix_len must be at least 1"))
            }
            _ => Ok(()),
        }
    }
}

impl IdentityStrategy for MatchMode {
    fn validate(&self) -> DomainResult<()> {
        MatchMode::validate(self)
    }

    fn correlation_key<'a>(&self, code: &'a str) -> &'a str {
        match *self {
            MatchMode::ExactCode => code,
            MatchMode::SuffixCorrelation { suffix_len } => trailing_chars(code, suffix_len),
        }
    }
}

/// Last `n` characters of `code`, or the whole code when it is shorter.
fn trailing_chars(code: &str, n: usize) -> &str {
    let count = code.chars().count();
    if count <= n {
        return code;
    }
    match code.char_indices().nth(count - n) {
        Some((start, _)) => &code[start..],
        None => code,
    }
}

/// Stock records resolved for one demand code.
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedStock<'a> {
    key: String,
    records: Vec<&'a StockRecord>,
}

impl<'a> ResolvedStock<'a> {
    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn records(&self) -> &[&'a StockRecord] {
        &self.records
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn pool(&self) -> CategoryPool {
        CategoryPool::from_records(self.records.iter().copied())
    }
}

/// Resolve every record of `snapshot` that correlates with `item_code`.
///
/// Returns an empty set when nothing correlates. Fails only when the
/// strategy itself is invalid (e.g. a zero suffix length).
pub fn resolve_stock<'a, S>(
    item_code: &str,
    snapshot: &'a StockSnapshot,
    strategy: &S,
) -> DomainResult<ResolvedStock<'a>>
where
    S: IdentityStrategy + ?Sized,
{
    strategy.validate()?;
    let key = strategy.correlation_key(item_code);
    let records = snapshot
        .records()
        .iter()
        .filter(|r| strategy.correlation_key(&r.item_code) == key)
        .collect();

    Ok(ResolvedStock {
        key: key.to_string(),
        records,
    })
}

/// Pre-computed correlation keys over a snapshot, for batch resolution.
///
/// Yields the same sets as [`resolve_stock`] with the same mode.
#[derive(Debug, Clone)]
pub struct StockIndex<'a> {
    mode: MatchMode,
    by_key: HashMap<&'a str, Vec<&'a StockRecord>>,
}

impl<'a> StockIndex<'a> {
    pub fn build(snapshot: &'a StockSnapshot, mode: MatchMode) -> DomainResult<Self> {
        mode.validate()?;
        let mut by_key: HashMap<&'a str, Vec<&'a StockRecord>> = HashMap::new();
        for record in snapshot.records() {
            by_key
                .entry(mode.correlation_key(&record.item_code))
                .or_default()
                .push(record);
        }
        Ok(Self { mode, by_key })
    }

    pub fn mode(&self) -> MatchMode {
        self.mode
    }

    pub fn resolve(&self, item_code: &str) -> ResolvedStock<'a> {
        let key = self.mode.correlation_key(item_code);
        ResolvedStock {
            key: key.to_string(),
            records: self.by_key.get(key).cloned().unwrap_or_default(),
        }
    }

    /// Number of distinct correlation keys in the snapshot.
    pub fn distinct_items(&self) -> usize {
        self.by_key.len()
    }
}
