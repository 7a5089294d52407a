use holder_types::{ArrayPattern, CutDepth};
use kernel_bridge::{BooleanMode, KernelSolidHandle, Plane};
use tracing::{debug, warn};

use crate::kernel_ext::KernelBundle;
use crate::types::{Diagnostics, OpError, StepResult};

/// Extra travel added to a through-all cut so it clears both faces of the
/// stock even with tessellation tolerance on the bound.
const THROUGH_CLEARANCE: f64 = 1.0;

/// Cut a rectangular grid of cells into `solid` from a working plane.
///
/// An empty pattern is a successful no-op: the input handle is returned
/// unchanged with a warning diagnostic, so callers never have to special-case
/// faces too small to carry a single cell.
pub fn execute_pattern_cut(
    kb: &mut dyn KernelBundle,
    solid: &KernelSolidHandle,
    plane: &Plane,
    pattern: &ArrayPattern,
    center: [f64; 2],
    depth: CutDepth,
) -> Result<StepResult, OpError> {
    if pattern.cell <= 0.0 {
        return Err(OpError::InvalidParameter {
            reason: format!("pattern cell must be positive, got {}", pattern.cell),
        });
    }

    if pattern.is_empty() {
        warn!(pitch = pattern.pitch, "pattern fits zero cells, skipping cut");
        return Ok(StepResult {
            handle: solid.clone(),
            diagnostics: Diagnostics {
                warnings: vec!["empty pattern: no cells fit the target span".to_string()],
                kernel_time_ms: 0.0,
            },
        });
    }

    let cut_depth = match depth {
        CutDepth::Blind { depth } => {
            if depth <= 0.0 {
                return Err(OpError::InvalidParameter {
                    reason: format!("blind cut depth must be positive, got {depth}"),
                });
            }
            depth
        }
        CutDepth::ThroughAll => through_depth(kb.as_introspect(), solid, plane)?,
    };

    let profiles = pattern.cells(center);
    let started = std::time::Instant::now();
    let handle = kb.prism(solid, plane, &profiles, -cut_depth, 0.0, BooleanMode::Cut)?;
    let kernel_time_ms = started.elapsed().as_secs_f64() * 1000.0;
    debug!(
        cells = profiles.len(),
        cut_depth, kernel_time_ms, "pattern cut complete"
    );

    Ok(StepResult {
        handle,
        diagnostics: Diagnostics {
            warnings: Vec::new(),
            kernel_time_ms,
        },
    })
}

/// Depth that guarantees a cut from `plane` exits the far side of the solid.
fn through_depth(
    intro: &dyn kernel_bridge::KernelIntrospect,
    solid: &KernelSolidHandle,
    plane: &Plane,
) -> Result<f64, OpError> {
    let bbox = intro.bounding_box(solid).ok_or(OpError::InvalidParameter {
        reason: "cannot size a through-all cut: solid has no bounds".to_string(),
    })?;
    // Project both bound corners onto the plane normal and take the span.
    let corners = [
        [bbox[0], bbox[1], bbox[2]],
        [bbox[3], bbox[4], bbox[5]],
    ];
    let project = |p: [f64; 3]| {
        (p[0] - plane.origin[0]) * plane.normal[0]
            + (p[1] - plane.origin[1]) * plane.normal[1]
            + (p[2] - plane.origin[2]) * plane.normal[2]
    };
    let extent = (project(corners[0]) - project(corners[1])).abs();
    Ok(extent + 2.0 * THROUGH_CLEARANCE)
}
