//! Report section data structures.
//!
//! Sections are the layout-independent content of a report. The PDF
//! backend in [`crate::pdf`] only positions what these structures hold.

pub mod closing;
pub mod header;
pub mod items;

pub use closing::{FooterLine, ObservationsBlock, SignatureBlock, SignatureColumn};
pub use header::{HeaderSection, METADATA_COLUMNS};
pub use items::{CategoryTable, ItemRow, ItemsSection, MARKER};
