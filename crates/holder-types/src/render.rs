use serde::{Deserialize, Serialize};

/// Display hint attached to a solid registered with the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderHint {
    /// RGB color, each channel in [0, 1].
    pub color: [f32; 3],
    /// Opacity in [0, 1]; 1.0 is fully opaque.
    pub alpha: f32,
}

impl RenderHint {
    pub fn opaque(color: [f32; 3]) -> Self {
        Self { color, alpha: 1.0 }
    }

    pub fn translucent(color: [f32; 3], alpha: f32) -> Self {
        Self { color, alpha }
    }

    /// The hint used for informational reference volumes.
    pub fn reference_volume() -> Self {
        Self::translucent([0.0, 0.0, 1.0], 0.5)
    }
}

impl Default for RenderHint {
    fn default() -> Self {
        Self::opaque([0.8, 0.8, 0.8])
    }
}
