//! External surfaces of the generator: mesh export and display.
//!
//! Nothing in here feeds back into the build; the pipeline's output is
//! final before any of this code runs.

pub mod metadata;
pub mod stl;
pub mod viewer;

pub use metadata::ExportMetadata;
pub use stl::{export_binary_stl, write_binary_stl, ExportError};
pub use viewer::{DisplayId, LogViewer, RecordingViewer, ShownSolid, Viewer};
