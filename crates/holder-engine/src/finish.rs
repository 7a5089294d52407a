use holder_types::{Axis, Extreme, Filter, PhysicalSpec};
use kernel_bridge::KernelSolidHandle;
use modeling_ops::{execute_fillet, select_edges, KernelBundle};

use crate::pipeline::BuildError;
use crate::resolver::{DerivedDimensions, EPS};

const EDGE_TOL: f64 = 1e-3;

/// Round the outer corners and the bottom perimeter at `wall - eps`.
///
/// Runs strictly after every cutting pass so no later boolean can expose a
/// sharp edge the fillet already softened.
pub fn finishing_fillets(
    kb: &mut dyn KernelBundle,
    spec: &PhysicalSpec,
    dims: &DerivedDimensions,
    solid: &KernelSolidHandle,
    warnings: &mut Vec<String>,
) -> Result<KernelSolidHandle, BuildError> {
    let ox = spec.arm_size[0] / 2.0 + dims.wall;
    let oy = spec.arm_size[1] / 2.0;
    let radius = dims.wall - EPS;

    // Vertical edges at all four outer corners; the corner sticks are flush
    // with the outer walls, so their edges round over in the same pass.
    let mut corners = Vec::new();
    for sx in [-1.0, 1.0] {
        for sy in [-1.0, 1.0] {
            corners.extend(select_edges(
                kb.as_introspect(),
                solid,
                &[
                    Filter::ParallelTo { axis: Axis::Z },
                    Filter::CentroidRange {
                        axis: Axis::X,
                        min: sx * ox - EDGE_TOL,
                        max: sx * ox + EDGE_TOL,
                    },
                    Filter::CentroidRange {
                        axis: Axis::Y,
                        min: sy * oy - EDGE_TOL,
                        max: sy * oy + EDGE_TOL,
                    },
                ],
            ));
        }
    }
    let mut rounded = execute_fillet(kb, solid, &corners, radius)?;
    warnings.append(&mut rounded.diagnostics.warnings);

    let bottom = select_edges(
        kb.as_introspect(),
        &rounded.handle,
        &[Filter::AtExtreme {
            axis: Axis::Z,
            end: Extreme::Min,
            tolerance: EDGE_TOL,
        }],
    );
    let mut finished = execute_fillet(kb, &rounded.handle, &bottom, radius)?;
    warnings.append(&mut finished.diagnostics.warnings);
    Ok(finished.handle)
}
