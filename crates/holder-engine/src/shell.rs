use holder_types::{Axis, Extreme, Filter, PhysicalSpec, Profile2};
use kernel_bridge::{BooleanMode, KernelSolidHandle};
use modeling_ops::{
    execute_box, execute_prism, execute_shell, face_plane, select_one_face, KernelBundle,
};

use crate::pipeline::BuildError;
use crate::resolver::DerivedDimensions;

const FACE_TOL: f64 = 1e-6;

/// Build the cup: a box hollowed from the top, then a thinner bottom.
///
/// The outer box is oversized by one wall on every closed side so that the
/// inner cavity is exactly `arm_x x (arm_y - 2 wall) x base_height` with its
/// floor at Z = 0. The bottom is then thinned from below to `bottom_wall`;
/// walls stay at full width while the floor prints faster and still seals.
pub fn build_cup_shell(
    kb: &mut dyn KernelBundle,
    spec: &PhysicalSpec,
    dims: &DerivedDimensions,
) -> Result<KernelSolidHandle, BuildError> {
    let [arm_x, arm_y, _] = spec.arm_size;
    let outer = [
        arm_x + 2.0 * dims.wall,
        arm_y,
        dims.base_height + dims.wall,
    ];
    let stock = execute_box(kb, outer, [0.0, 0.0, -dims.wall])?;

    let top = select_one_face(
        kb.as_introspect(),
        &stock.handle,
        &[
            Filter::NormalDirection {
                direction: [0.0, 0.0, 1.0],
                tolerance: 0.01,
            },
            Filter::AtExtreme {
                axis: Axis::Z,
                end: Extreme::Max,
                tolerance: FACE_TOL,
            },
        ],
        None,
    )?;
    let cup = execute_shell(kb, &stock.handle, top, dims.wall)?;

    let bottom = select_one_face(
        kb.as_introspect(),
        &cup.handle,
        &[
            Filter::NormalDirection {
                direction: [0.0, 0.0, -1.0],
                tolerance: 0.01,
            },
            Filter::AtExtreme {
                axis: Axis::Z,
                end: Extreme::Min,
                tolerance: FACE_TOL,
            },
        ],
        None,
    )?;
    let plane = face_plane(kb.as_introspect(), bottom, [1.0, 0.0, 0.0])?;
    let thinned = execute_prism(
        kb,
        &cup.handle,
        &plane,
        &[Profile2::rect(0.0, 0.0, outer[0], outer[1])],
        -(dims.wall - dims.bottom_wall),
        0.0,
        BooleanMode::Cut,
    )?;
    Ok(thinned.handle)
}
