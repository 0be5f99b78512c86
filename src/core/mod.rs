//! Detection and analysis engine.
//!
//! The pipeline for one document: [`region::segment`] splits it into typed
//! regions, [`scanner`] finds hardcoded text in each, [`extract`] plans keys
//! for the spans found and [`rewrite`] applies the replacements. [`usage`]
//! and [`references`] relate translation calls to the [`store`].

pub mod calls;
pub mod corpus;
pub mod document;
pub mod extract;
pub mod outcome;
pub mod position;
pub mod references;
pub mod region;
pub mod rewrite;
pub mod scanner;
pub mod span;
pub mod store;
pub mod usage;

pub use document::{DocumentKind, SourceDocument};
pub use outcome::{BatchFailure, BatchOutcome};
pub use position::{LineIndex, Position, offset_to_position};
pub use region::{Region, RegionKind, segment};
pub use scanner::{ScanOptions, scan_document, scan_range, scan_text};
pub use span::{SpanId, TextKind, TextSpan};
pub use store::{KeyAction, LocaleEntry, LocaleStore, StoreError, TranslationStatus};
