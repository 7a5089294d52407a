use serde::{Deserialize, Serialize};

/// Build fidelity switch.
///
/// The two variants differ only in ventilation hole size: fine holes are
/// correct for printing but expensive to compute, coarse holes rebuild fast
/// for iteration but are oversized. This is a performance/correctness
/// trade-off the caller must pick explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum BuildVariant {
    /// Coarse 7 mm holes. Fast rebuilds, geometrically invalid for printing.
    Preview,
    /// Fine 1.5 mm holes. Slow rebuilds, correct for production.
    Production,
}

impl BuildVariant {
    /// Side length of a single ventilation hole, before tolerance oversizing.
    pub fn hole_size(self) -> f64 {
        match self {
            BuildVariant::Preview => 7.0,
            BuildVariant::Production => 1.5,
        }
    }

    /// Map the presence of the final-build environment flag to a variant.
    pub fn from_final_build_flag(final_build: bool) -> Self {
        if final_build {
            BuildVariant::Production
        } else {
            BuildVariant::Preview
        }
    }
}

/// Immutable physical input for the generator. Built once at program start.
///
/// All lengths are in millimeters; volumes are in milliliters (== cm³).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PhysicalSpec {
    /// Bounding box of the rotating arm cross-section: (x, y, z).
    pub arm_size: [f64; 3],
    /// Total height of the device along the arm axis.
    pub holder_height: f64,
    /// Liquid capacity the base cup must hold, in mL.
    pub max_volume_ml: f64,
    /// Requested fill-level witness marks, in mL.
    pub volume_marks_ml: Vec<f64>,
    /// Minimum printable wall width of the target printer.
    pub wall_min: f64,
    /// Printer dimensional tolerance; holes are oversized by 2x this value.
    pub tolerance: f64,
    /// Hole size / rebuild time trade-off.
    pub variant: BuildVariant,
}

impl PhysicalSpec {
    /// The reference dishwasher this part was designed for.
    pub fn dishwasher_default(variant: BuildVariant) -> Self {
        Self {
            arm_size: [47.0, 60.0, 12.0],
            holder_height: 40.0,
            max_volume_ml: 40.0,
            volume_marks_ml: vec![20.0, 30.0],
            wall_min: 0.4,
            tolerance: 0.2,
            variant,
        }
    }
}
