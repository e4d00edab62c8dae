//! Hydration props compressor. Shrinks a page's embedded hydration payloads
//! by replacing repeated values with short symbols, and emits the decoder
//! that restores them in the browser.
//!
//! Stages:
//! 1. Walker: count every value and key across all payloads
//! 2. Planner: rank repeated values and allocate symbol names
//! 3. Rewriter: substitute symbols into each payload
//! 4. Decoder: emit the shared dictionary/decoder script and payload scripts
//! 5. Reporter: size statistics for observers

pub mod decoder;
pub mod pipeline;
pub mod planner;
pub mod reporter;
pub mod rewriter;
pub mod substitute;
pub mod symbols;
pub mod walker;

pub use pipeline::{compress_props, CompressedProps, Payload, PropsCompressor};
pub use planner::{SubstitutionPlan, SymbolTable};
pub use reporter::{observer_fn, CompressionReport, PassObserver, TracingReporter};
pub use walker::{count_occurrences, OccurrenceTable};
