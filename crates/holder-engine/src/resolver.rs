use holder_types::PhysicalSpec;
use serde::Serialize;
use tracing::debug;

/// A small number, used to keep chamfers and fillets just inside the
/// material they trim.
pub const EPS: f64 = 1e-5;

/// Recommended wall width, as a multiple of the printer's minimum.
const WALL_FACTOR: f64 = 6.0;
/// Bottom wall width, as a multiple of the printer's minimum.
const BOTTOM_WALL_FACTOR: f64 = 2.0;
/// Corner stick width, as a multiple of the recommended wall.
const STICK_WIDTH_FACTOR: f64 = 4.0;
/// Locking tongue cross-section (thickness, drop), mm.
const TONGUE: [f64; 2] = [4.0, 4.0];
/// Depth-limit tab cross-section (thickness, drop), mm.
const TAB: [f64; 2] = [4.0, 6.0];
/// Largest useful volume-mark notch, mm.
const NOTCH_MAX: f64 = 4.0;

/// Everything the pipeline needs, computed once from the physical input.
/// No kernel calls are made here; a failed resolve never touches geometry.
#[derive(Debug, Clone, Serialize)]
pub struct DerivedDimensions {
    /// Recommended wall width for most walls of this print.
    pub wall: f64,
    /// Thinned bottom wall width.
    pub bottom_wall: f64,
    /// Inner footprint of the cup, in cm².
    pub footprint_cm2: f64,
    /// Height of the liquid-holding base so it holds exactly `max_volume_ml`.
    pub base_height: f64,
    /// Height of each requested volume mark above the cavity floor, mm.
    pub mark_heights: Vec<f64>,
    /// Corner stick cross-section width along Y.
    pub stick_width: f64,
    /// Corner stick extrusion length above the cup rim.
    pub stick_height: f64,
    /// Locking tongue thickness along X.
    pub tongue_thickness: f64,
    /// Locking tongue drop below the stick tips.
    pub tongue_drop: f64,
    /// Depth-limit tab thickness along X.
    pub tab_thickness: f64,
    /// Depth-limit tab drop.
    pub tab_drop: f64,
    /// Volume-mark notch side length.
    pub notch: f64,
    /// Ventilation hole side length, before tolerance oversizing.
    pub hole_size: f64,
    /// Ventilation hole side length as actually cut.
    pub hole_cell: f64,
    /// Ventilation grid pitch.
    pub hole_pitch: f64,
}

/// Errors detected by the resolver. All of them are fatal and occur before
/// any kernel call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("target volume must be positive, got {volume_ml} mL")]
    NonPositiveVolume { volume_ml: f64 },

    #[error("minimum wall width must be positive, got {wall_min}")]
    NonPositiveWall { wall_min: f64 },

    #[error("print tolerance must not be negative, got {tolerance}")]
    NegativeTolerance { tolerance: f64 },

    #[error("derived {dimension} = {value} mm is below the printable minimum {wall_min} mm")]
    UnprintableDimension {
        dimension: &'static str,
        value: f64,
        wall_min: f64,
    },

    #[error("wall width {wall} leaves no cavity inside an arm {arm_y} deep")]
    WallTooLarge { wall: f64, arm_y: f64 },

    #[error("cup footprint is degenerate ({footprint_cm2} cm²)")]
    DegenerateFootprint { footprint_cm2: f64 },

    #[error("volume mark {mark_ml} mL is outside (0, {max_ml}]")]
    MarkOutOfRange { mark_ml: f64, max_ml: f64 },

    #[error("base height {base_height} mm leaves no room for the connector within {holder_height} mm")]
    BaseTooTall {
        base_height: f64,
        holder_height: f64,
    },
}

/// Turn the physical input into every derived dimension the pipeline uses.
///
/// The base height is chosen so that the inner cavity holds exactly
/// `max_volume_ml`; mark heights scale linearly with their volume.
pub fn resolve(spec: &PhysicalSpec) -> Result<DerivedDimensions, ConfigError> {
    if spec.max_volume_ml <= 0.0 {
        return Err(ConfigError::NonPositiveVolume {
            volume_ml: spec.max_volume_ml,
        });
    }
    if spec.wall_min <= 0.0 {
        return Err(ConfigError::NonPositiveWall {
            wall_min: spec.wall_min,
        });
    }
    if spec.tolerance < 0.0 {
        return Err(ConfigError::NegativeTolerance {
            tolerance: spec.tolerance,
        });
    }

    let wall = WALL_FACTOR * spec.wall_min;
    let [arm_x, arm_y, _] = spec.arm_size;
    if arm_y - 2.0 * wall <= 0.0 {
        return Err(ConfigError::WallTooLarge { wall, arm_y });
    }

    let footprint_cm2 = arm_x * (arm_y - 2.0 * wall) / 100.0;
    if footprint_cm2 <= 0.0 {
        return Err(ConfigError::DegenerateFootprint { footprint_cm2 });
    }

    let base_height_cm = spec.max_volume_ml / footprint_cm2;
    let base_height = base_height_cm * 10.0;

    let mut mark_heights = Vec::with_capacity(spec.volume_marks_ml.len());
    for &mark_ml in &spec.volume_marks_ml {
        if mark_ml <= 0.0 || mark_ml > spec.max_volume_ml {
            return Err(ConfigError::MarkOutOfRange {
                mark_ml,
                max_ml: spec.max_volume_ml,
            });
        }
        mark_heights.push(base_height * mark_ml / spec.max_volume_ml);
    }

    let stick_height = spec.holder_height - base_height + TONGUE[1] / 2.0;
    if stick_height <= 0.0 {
        return Err(ConfigError::BaseTooTall {
            base_height,
            holder_height: spec.holder_height,
        });
    }

    let hole_size = spec.variant.hole_size();
    let dims = DerivedDimensions {
        wall,
        bottom_wall: BOTTOM_WALL_FACTOR * spec.wall_min,
        footprint_cm2,
        base_height,
        mark_heights,
        stick_width: STICK_WIDTH_FACTOR * wall,
        stick_height,
        tongue_thickness: TONGUE[0],
        tongue_drop: TONGUE[1],
        tab_thickness: TAB[0],
        tab_drop: TAB[1],
        notch: NOTCH_MAX.min(2.0 * wall - EPS),
        hole_size,
        hole_cell: hole_size + 2.0 * spec.tolerance,
        hole_pitch: 2.0 * hole_size,
    };

    // Every printed feature must clear the printer's minimum wall; anything
    // below it is non-physical and must never reach the kernel.
    for (dimension, value) in [
        ("wall", dims.wall),
        ("bottom wall", dims.bottom_wall),
        ("stick width", dims.stick_width),
        ("stick height", dims.stick_height),
        ("tongue thickness", dims.tongue_thickness),
        ("tongue drop", dims.tongue_drop),
        ("tab thickness", dims.tab_thickness),
        ("tab drop", dims.tab_drop),
        ("mark notch", dims.notch),
        ("hole cell", dims.hole_cell),
        ("hole pitch", dims.hole_pitch),
    ] {
        if value < spec.wall_min {
            return Err(ConfigError::UnprintableDimension {
                dimension,
                value,
                wall_min: spec.wall_min,
            });
        }
    }

    debug!(
        wall = dims.wall,
        footprint_cm2 = dims.footprint_cm2,
        base_height = dims.base_height,
        hole_cell = dims.hole_cell,
        "dimensions resolved"
    );
    Ok(dims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use holder_types::BuildVariant;

    fn spec() -> PhysicalSpec {
        PhysicalSpec::dishwasher_default(BuildVariant::Production)
    }

    #[test]
    fn reference_dishwasher_dimensions() {
        let dims = resolve(&spec()).unwrap();
        assert!((dims.wall - 2.4).abs() < 1e-12);
        assert!((dims.bottom_wall - 0.8).abs() < 1e-12);
        assert!((dims.footprint_cm2 - 25.944).abs() < 1e-9);
        assert!((dims.base_height - 15.417823).abs() < 1e-3);
        assert!((dims.stick_width - 9.6).abs() < 1e-12);
        assert!((dims.notch - 4.0).abs() < 1e-12);
        assert!((dims.hole_cell - 1.9).abs() < 1e-12);
        assert!((dims.hole_pitch - 3.0).abs() < 1e-12);
    }

    #[test]
    fn base_height_inverts_the_volume() {
        let dims = resolve(&spec()).unwrap();
        let volume_ml = dims.footprint_cm2 * dims.base_height / 10.0;
        assert!((volume_ml - 40.0).abs() / 40.0 < 1e-6);
    }

    #[test]
    fn mark_heights_are_linear() {
        let dims = resolve(&spec()).unwrap();
        assert_eq!(dims.mark_heights.len(), 2);
        assert!((dims.mark_heights[0] - 7.708911).abs() < 1e-3);
        assert!((dims.mark_heights[1] - 11.563367).abs() < 1e-3);
        assert!(
            (dims.mark_heights[0] / dims.mark_heights[1] - 20.0 / 30.0).abs() < 1e-12
        );
    }

    #[test]
    fn mark_at_max_volume_lands_on_the_rim() {
        let mut s = spec();
        s.volume_marks_ml = vec![40.0];
        let dims = resolve(&s).unwrap();
        assert!((dims.mark_heights[0] - dims.base_height).abs() < 1e-12);
    }

    #[test]
    fn empty_mark_list_is_allowed() {
        let mut s = spec();
        s.volume_marks_ml.clear();
        assert!(resolve(&s).unwrap().mark_heights.is_empty());
    }

    #[test]
    fn mark_above_capacity_is_rejected() {
        let mut s = spec();
        s.volume_marks_ml = vec![20.0, 41.0];
        assert!(matches!(
            resolve(&s),
            Err(ConfigError::MarkOutOfRange { mark_ml, .. }) if mark_ml == 41.0
        ));
    }

    #[test]
    fn oversized_wall_is_rejected() {
        let mut s = spec();
        s.wall_min = 6.0;
        assert!(matches!(resolve(&s), Err(ConfigError::WallTooLarge { .. })));
    }

    #[test]
    fn non_positive_volume_is_rejected() {
        let mut s = spec();
        s.max_volume_ml = 0.0;
        assert!(matches!(
            resolve(&s),
            Err(ConfigError::NonPositiveVolume { .. })
        ));
    }

    #[test]
    fn negative_tolerance_is_rejected() {
        let mut s = spec();
        s.tolerance = -1.0;
        assert!(matches!(
            resolve(&s),
            Err(ConfigError::NegativeTolerance { .. })
        ));
    }

    #[test]
    fn hole_cell_below_the_printer_minimum_is_rejected() {
        // A 1.6 mm nozzle cannot print the 1.5 mm production holes
        let mut s = spec();
        s.wall_min = 1.6;
        s.tolerance = 0.0;
        assert!(matches!(
            resolve(&s),
            Err(ConfigError::UnprintableDimension {
                dimension: "hole cell",
                ..
            })
        ));
    }

    #[test]
    fn preview_variant_widens_the_holes() {
        let fine = resolve(&spec()).unwrap();
        let coarse =
            resolve(&PhysicalSpec::dishwasher_default(BuildVariant::Preview)).unwrap();
        assert!(coarse.hole_cell > fine.hole_cell);
        assert_eq!(fine.hole_cell, 1.5 + 2.0 * 0.2);
    }
}
