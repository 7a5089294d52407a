use holder_types::{ArrayPattern, CutDepth, PhysicalSpec};
use kernel_bridge::{KernelSolidHandle, Plane};
use modeling_ops::{execute_pattern_cut, KernelBundle};
use tracing::debug;

use crate::pipeline::BuildError;
use crate::resolver::DerivedDimensions;

/// Cut the ventilation grids: pressurized water must flow through every
/// wall of the cup while detergent tabs stay inside.
///
/// Three passes: a blind grid through the thin bottom, then one through-all
/// grid per horizontal axis (each pass pierces both opposing walls). Side
/// spans shrink by one notch per end so the grids clear the volume-mark
/// notches at the cavity corners. A face too small for a single hole is a
/// warning, not an error.
pub fn cut_vents(
    kb: &mut dyn KernelBundle,
    spec: &PhysicalSpec,
    dims: &DerivedDimensions,
    solid: &KernelSolidHandle,
    warnings: &mut Vec<String>,
) -> Result<KernelSolidHandle, BuildError> {
    let [arm_x, arm_y, _] = spec.arm_size;
    let inner_y = arm_y - 2.0 * dims.wall;
    let mid_z = dims.base_height / 2.0;

    // Bottom: blind, exactly through the thinned floor.
    let bottom_plane = Plane::new(
        [0.0, 0.0, -dims.bottom_wall],
        [0.0, 0.0, -1.0],
        [1.0, 0.0, 0.0],
    );
    let bottom = ArrayPattern::fit(arm_x, inner_y, dims.hole_pitch, dims.hole_cell);
    let step = execute_pattern_cut(
        kb,
        solid,
        &bottom_plane,
        &bottom,
        [0.0, 0.0],
        CutDepth::Blind {
            depth: dims.bottom_wall,
        },
    )?;
    warnings.extend(step.diagnostics.warnings);
    debug!(cells = bottom.cell_count(), "bottom vents cut");

    // Both X walls in one through-all pass.
    let x_plane = Plane::new(
        [-(arm_x / 2.0 + dims.wall), 0.0, mid_z],
        [-1.0, 0.0, 0.0],
        [0.0, -1.0, 0.0],
    );
    let x_walls = ArrayPattern::fit(
        inner_y - 2.0 * dims.notch,
        dims.base_height,
        dims.hole_pitch,
        dims.hole_cell,
    );
    let step = execute_pattern_cut(
        kb,
        &step.handle,
        &x_plane,
        &x_walls,
        [0.0, 0.0],
        CutDepth::ThroughAll,
    )?;
    warnings.extend(step.diagnostics.warnings);
    debug!(cells = x_walls.cell_count(), "x-wall vents cut");

    // Both Y walls.
    let y_plane = Plane::new(
        [0.0, -arm_y / 2.0, mid_z],
        [0.0, -1.0, 0.0],
        [1.0, 0.0, 0.0],
    );
    let y_walls = ArrayPattern::fit(
        arm_x - 2.0 * dims.notch,
        dims.base_height,
        dims.hole_pitch,
        dims.hole_cell,
    );
    let step = execute_pattern_cut(
        kb,
        &step.handle,
        &y_plane,
        &y_walls,
        [0.0, 0.0],
        CutDepth::ThroughAll,
    )?;
    warnings.extend(step.diagnostics.warnings);
    debug!(cells = y_walls.cell_count(), "y-wall vents cut");

    Ok(step.handle)
}
