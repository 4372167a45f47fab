use thiserror::Error;

/// Caller precondition violations. Reported before any state change;
/// the store is untouched when one of these comes back.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("select at least one shop type")]
    NoShopTypes,

    #[error("select at least one game system")]
    NoSystems,

    #[error("item counts must be between 1 and 50 (got {min}..{max})")]
    ItemCountOutOfRange { min: u32, max: u32 },

    #[error("minimum item count {min} exceeds maximum {max}")]
    InvertedItemRange { min: u32, max: u32 },

    #[error("shop inventory is full (max {capacity} items)")]
    InventoryFull { capacity: usize },
}

/// A user-supplied payload that failed to parse or had the wrong shape.
/// Rejected as a whole; no partial import is ever applied.
#[derive(Debug, Error)]
#[error("invalid import payload: {0}")]
pub struct ImportError(#[from] serde_json::Error);

/// Backing-store failures. The store is best-effort durable, so these are
/// logged and tolerated rather than failing the mutation that hit them.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
}
