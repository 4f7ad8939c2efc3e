//! Diagnostics collection for documentation set builds.
//!
//! Structural problems found while resolving tables of contents or assembling
//! site navigation are not returned as errors. They are emitted into a
//! [`DiagnosticsCollector`] so a single build can report every problem at once.
//!
//! # Example
//!
//! ```
//! use docset_diagnostics::{Collector, DiagnosticsCollector};
//!
//! let collector = Collector::new();
//! collector.emit_hint("docs/docset.yml", "consider using 'folder'");
//! assert_eq!(collector.hints(), 1);
//! assert_eq!(collector.errors(), 0);
//! ```

mod collector;
mod hint;

pub use collector::{Collector, Diagnostic, DiagnosticsCollector, Severity};
pub use hint::{HintType, Suppressions};
