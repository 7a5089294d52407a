use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata recorded alongside an exported mesh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportMetadata {
    /// Name of the exported part.
    pub part_name: String,
    /// When the export was produced.
    pub exported_at: DateTime<Utc>,
    /// Number of triangles in the exported mesh.
    pub triangle_count: usize,
}

impl ExportMetadata {
    pub fn new(part_name: impl Into<String>, triangle_count: usize) -> Self {
        Self {
            part_name: part_name.into(),
            exported_at: Utc::now(),
            triangle_count,
        }
    }
}
