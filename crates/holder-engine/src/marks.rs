use holder_types::{PhysicalSpec, Profile2};
use kernel_bridge::{BooleanMode, KernelSolidHandle, Plane};
use modeling_ops::{execute_prism, KernelBundle};
use tracing::debug;

use crate::pipeline::BuildError;
use crate::resolver::DerivedDimensions;

/// Travel far past the wall so the taper, not the depth, bounds the notch.
const MARK_CUT_OVERSHOOT: f64 = 999.0;
/// Taper angle of the witness pegs, degrees.
const MARK_TAPER_DEG: f64 = 30.0;

/// Cut a fill-level witness notch at each resolved mark height.
///
/// Each mark is four small tapered pegs cut downward into the inner cavity
/// corners. The cuts are independent of each other, so mark order does not
/// matter; an empty mark list leaves the solid untouched.
pub fn cut_volume_marks(
    kb: &mut dyn KernelBundle,
    spec: &PhysicalSpec,
    dims: &DerivedDimensions,
    solid: &KernelSolidHandle,
) -> Result<KernelSolidHandle, BuildError> {
    let cx = spec.arm_size[0] / 2.0;
    let cy = spec.arm_size[1] / 2.0 - dims.wall;
    let n = dims.notch;

    let mut handle = solid.clone();
    for &height in &dims.mark_heights {
        let plane = Plane::new([0.0, 0.0, height], [0.0, 0.0, 1.0], [1.0, 0.0, 0.0]);
        let profiles = [
            Profile2::square(-cx, -cy, n),
            Profile2::square(cx, -cy, n),
            Profile2::square(-cx, cy, n),
            Profile2::square(cx, cy, n),
        ];
        let step = execute_prism(
            kb,
            &handle,
            &plane,
            &profiles,
            -MARK_CUT_OVERSHOOT,
            MARK_TAPER_DEG,
            BooleanMode::Cut,
        )?;
        debug!(height, "volume mark cut");
        handle = step.handle;
    }
    Ok(handle)
}
