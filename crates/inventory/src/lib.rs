//! Inventory snapshot model and item identity resolution.
//!
//! This crate contains the read-only view of on-hand stock, implemented purely
//! as deterministic domain logic (no IO, no storage). Nothing here mutates a
//! snapshot once it has been validated.

pub mod category;
pub mod pool;
pub mod resolver;
pub mod stock;

pub use category::Category;
pub use pool::CategoryPool;
pub use resolver::{
    DEFAULT_SUFFIX_LEN, IdentityStrategy, MatchMode, ResolvedStock, StockIndex, resolve_stock,
};
pub use stock::{StockRecord, StockSnapshot, StockValue};
