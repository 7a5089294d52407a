use holder_types::{Axis, Filter, PhysicalSpec, Profile2};
use kernel_bridge::{BooleanMode, KernelSolidHandle, Plane};
use modeling_ops::{
    execute_box, execute_chamfer, execute_fillet, execute_prism, select_edges, KernelBundle,
};

use crate::pipeline::BuildError;
use crate::resolver::EPS;

const EDGE_TOL: f64 = 1e-3;

/// A stand-in for the dishwasher's rotating arm, used to eyeball the
/// connector fit in the preview. Never part of the printed output.
///
/// The real arm narrows to a point at both X ends and carries a low round
/// boss on top; the stub reproduces both so the tongues and tabs can be
/// checked against something honest.
pub fn build_arm_stub(
    kb: &mut dyn KernelBundle,
    spec: &PhysicalSpec,
) -> Result<KernelSolidHandle, BuildError> {
    let [arm_x, arm_y, arm_z] = spec.arm_size;
    let base_z = spec.holder_height - arm_z;
    let stock = execute_box(kb, [arm_x + 2.0, arm_y, arm_z], [0.0, 0.0, base_z])?;

    // Taper the X ends to the arm's pointed profile.
    let half = (arm_x + 2.0) / 2.0;
    let mut ends = Vec::new();
    for side in [-1.0, 1.0] {
        ends.extend(select_edges(
            kb.as_introspect(),
            &stock.handle,
            &[
                Filter::ParallelTo { axis: Axis::Z },
                Filter::CentroidRange {
                    axis: Axis::X,
                    min: side * half - EDGE_TOL,
                    max: side * half + EDGE_TOL,
                },
            ],
        ));
    }
    let tapered = execute_chamfer(kb, &stock.handle, &ends, arm_y / 2.0 - EPS, Some(1.0))?;

    // Soften the horizontal rims.
    let rims = select_edges(
        kb.as_introspect(),
        &tapered.handle,
        &[Filter::ParallelTo { axis: Axis::Y }],
    );
    let softened = execute_fillet(kb, &tapered.handle, &rims, 3.0)?;

    // Round boss on top of the arm.
    let top_plane = Plane::new(
        [0.0, 0.0, spec.holder_height],
        [0.0, 0.0, 1.0],
        [1.0, 0.0, 0.0],
    );
    let boss = execute_prism(
        kb,
        &softened.handle,
        &top_plane,
        &[Profile2::Circle {
            center: [0.0, 0.0],
            radius: arm_x / 2.0 - 3.0,
        }],
        2.0,
        0.0,
        BooleanMode::Fuse,
    )?;

    // Blend the boss into the arm top.
    let seam = select_edges(
        kb.as_introspect(),
        &boss.handle,
        &[Filter::NearPoint {
            point: [0.0, 0.0, spec.holder_height],
            distance: 0.1,
        }],
    );
    let blended = execute_fillet(kb, &boss.handle, &seam, spec.wall_min)?;
    Ok(blended.handle)
}
