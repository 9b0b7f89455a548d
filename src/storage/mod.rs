//! Observation persistence
//!
//! Storage design:
//! - **Record**: typed `ObservationRecord`, one per completed tick
//! - **Format**: CSV with a fixed 11-column header written on first run
//! - **Durability**: each append is flushed and synced before it reports success
//! - **Failures**: reported to the caller; the row is dropped, never buffered

pub mod csv;
pub mod record;

use crate::error::WriteError;
use async_trait::async_trait;

pub use self::csv::CsvSink;
pub use record::{ObservationRecord, COLUMNS, TIMESTAMP_FORMAT};

/// Append-only destination for observation records
#[async_trait]
pub trait PersistenceSink: Send + Sync {
    async fn append(&self, record: &ObservationRecord) -> Result<(), WriteError>;
}
