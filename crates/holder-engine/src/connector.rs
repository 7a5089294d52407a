use holder_types::{Axis, Extreme, Filter, PhysicalSpec, Profile2};
use kernel_bridge::{BooleanMode, KernelId, KernelIntrospect, KernelSolidHandle};
use modeling_ops::{
    execute_chamfer, execute_prism, face_plane, select_edges, select_one_face, KernelBundle,
    OpError,
};

use crate::pipeline::BuildError;
use crate::resolver::{DerivedDimensions, EPS};

const EDGE_TOL: f64 = 1e-3;

/// Attach the arm connector to the cup rim: four corner sticks, locking
/// tongues at the tips, and depth-limit tabs partway down.
///
/// Each hanging feature is chamfered immediately after its extrusion, while
/// its leading edges are still the freshest geometry; later passes must not
/// be able to disturb the insertion ramps.
pub fn attach_connector(
    kb: &mut dyn KernelBundle,
    spec: &PhysicalSpec,
    dims: &DerivedDimensions,
    solid: &KernelSolidHandle,
    warnings: &mut Vec<String>,
) -> Result<KernelSolidHandle, BuildError> {
    let [arm_x, arm_y, arm_z] = spec.arm_size;
    let sy = (arm_y - dims.stick_width) / 2.0;

    let rim = select_one_face(
        kb.as_introspect(),
        solid,
        &[
            Filter::NormalDirection {
                direction: [0.0, 0.0, 1.0],
                tolerance: 0.01,
            },
            Filter::AtExtreme {
                axis: Axis::Z,
                end: Extreme::Max,
                tolerance: 1e-6,
            },
        ],
        None,
    )?;
    let rim_plane = face_plane(kb.as_introspect(), rim, [1.0, 0.0, 0.0])?;
    let rim_z = rim_plane.origin[2];

    // Corner sticks, flush with the outer walls.
    let sx = (arm_x + dims.wall) / 2.0;
    let sticks = corner_profiles(sx, sy, dims.wall, dims.stick_width);
    let with_sticks = execute_prism(
        kb,
        solid,
        &rim_plane,
        &sticks,
        dims.stick_height,
        0.0,
        BooleanMode::Fuse,
    )?;

    // Locking tongues hang inward from the stick tips.
    let tip_plane = rim_plane.offset(dims.stick_height);
    let tx = (arm_x - dims.tongue_thickness) / 2.0;
    let tongues = corner_profiles(tx, sy, dims.tongue_thickness, dims.stick_width);
    let with_tongues = execute_prism(
        kb,
        &with_sticks.handle,
        &tip_plane,
        &tongues,
        -dims.tongue_drop,
        0.0,
        BooleanMode::Fuse,
    )?;
    let tongue_edges = leading_edges(
        kb.as_introspect(),
        &with_tongues.handle,
        arm_x / 2.0 - dims.tongue_thickness,
        rim_z + dims.stick_height - dims.tongue_drop,
    )?;
    let mut chamfered_tongues = execute_chamfer(
        kb,
        &with_tongues.handle,
        &tongue_edges,
        dims.tongue_thickness - EPS,
        Some(dims.tongue_drop - 100.0 * EPS),
    )?;
    warnings.append(&mut chamfered_tongues.diagnostics.warnings);

    // Depth-limit tabs stop the arm from bottoming out in the cup.
    let tab_plane = rim_plane.offset(dims.stick_height - arm_z - dims.tongue_drop / 2.0);
    let bx = (arm_x - dims.tab_thickness) / 2.0;
    let tabs = corner_profiles(bx, sy, dims.tab_thickness, dims.stick_width);
    let with_tabs = execute_prism(
        kb,
        &chamfered_tongues.handle,
        &tab_plane,
        &tabs,
        -dims.tab_drop,
        0.0,
        BooleanMode::Fuse,
    )?;
    let tab_edges = leading_edges(
        kb.as_introspect(),
        &with_tabs.handle,
        arm_x / 2.0 - dims.tab_thickness,
        tab_plane.origin[2] - dims.tab_drop,
    )?;
    let mut chamfered_tabs = execute_chamfer(
        kb,
        &with_tabs.handle,
        &tab_edges,
        dims.tab_thickness - EPS,
        Some(dims.tab_drop - EPS),
    )?;
    warnings.append(&mut chamfered_tabs.diagnostics.warnings);

    Ok(chamfered_tabs.handle)
}

/// The same rectangle stamped at the four (±cx, ±cy) corners.
fn corner_profiles(cx: f64, cy: f64, w: f64, h: f64) -> Vec<Profile2> {
    vec![
        Profile2::rect(-cx, -cy, w, h),
        Profile2::rect(cx, -cy, w, h),
        Profile2::rect(-cx, cy, w, h),
        Profile2::rect(cx, cy, w, h),
    ]
}

/// The Y-parallel bottom edges of a hanging feature at `|x| = inner_x`,
/// height `z`. These are the edges the arm hits first on insertion.
fn leading_edges(
    intro: &dyn KernelIntrospect,
    solid: &KernelSolidHandle,
    inner_x: f64,
    z: f64,
) -> Result<Vec<KernelId>, OpError> {
    let mut edges = Vec::new();
    for side in [-1.0, 1.0] {
        let x = side * inner_x;
        edges.extend(select_edges(
            intro,
            solid,
            &[
                Filter::ParallelTo { axis: Axis::Y },
                Filter::CentroidRange {
                    axis: Axis::X,
                    min: x - EDGE_TOL,
                    max: x + EDGE_TOL,
                },
                Filter::CentroidRange {
                    axis: Axis::Z,
                    min: z - EDGE_TOL,
                    max: z + EDGE_TOL,
                },
            ],
        ));
    }
    if edges.is_empty() {
        return Err(OpError::EmptySelection {
            query: format!("leading edges at |x|={inner_x}, z={z}"),
        });
    }
    Ok(edges)
}
