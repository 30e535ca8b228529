//! Offline derivation and publication of the transliteration table.
//!
//! - [`source`] - where indexed values come from
//! - [`scan`] - the batch job that builds a table from them
//! - [`handle`] - the shared, atomically swapped table pointer

pub mod handle;
pub mod scan;
pub mod source;

pub use handle::TableHandle;
pub use scan::{CorpusScanJob, ScanReport};
pub use source::{InMemoryCorpus, IndexedValueSource, LineFileSource};
