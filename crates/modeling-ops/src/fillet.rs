use kernel_bridge::{KernelError, KernelId, KernelSolidHandle};
use tracing::{debug, warn};

use crate::kernel_ext::KernelBundle;
use crate::types::{Diagnostics, OpError, StepResult};

/// Round the given edges with a constant radius.
///
/// A kernel without fillet support leaves the edges sharp: the step then
/// returns the input solid unchanged with a diagnostic warning, so a build
/// on such a kernel still completes.
pub fn execute_fillet(
    kb: &mut dyn KernelBundle,
    solid: &KernelSolidHandle,
    edges: &[KernelId],
    radius: f64,
) -> Result<StepResult, OpError> {
    if radius <= 0.0 {
        return Err(OpError::InvalidParameter {
            reason: format!("fillet radius must be positive, got {radius}"),
        });
    }
    if edges.is_empty() {
        return Err(OpError::EmptySelection {
            query: "fillet edge set".to_string(),
        });
    }

    let started = std::time::Instant::now();
    let handle = match kb.fillet_edges(solid, edges, radius) {
        Ok(handle) => handle,
        Err(KernelError::NotSupported { operation }) => {
            let warning = format!(
                "{operation} not supported by this kernel, {} edges left sharp",
                edges.len()
            );
            warn!(edge_count = edges.len(), radius, "{warning}");
            return Ok(StepResult {
                handle: solid.clone(),
                diagnostics: Diagnostics {
                    warnings: vec![warning],
                    kernel_time_ms: 0.0,
                },
            });
        }
        Err(err) => return Err(err.into()),
    };
    let kernel_time_ms = started.elapsed().as_secs_f64() * 1000.0;
    debug!(edge_count = edges.len(), radius, kernel_time_ms, "fillet complete");

    Ok(StepResult {
        handle,
        diagnostics: Diagnostics {
            warnings: Vec::new(),
            kernel_time_ms,
        },
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::select::select_edges;
    use holder_types::{Axis, Filter};
    use kernel_bridge::{Kernel, MockKernel, OpRecord};

    #[test]
    fn fillets_selected_edges() {
        let mut k = MockKernel::new();
        let h = k.make_box([10.0, 10.0, 10.0], [0.0, 0.0, 0.0]).unwrap();
        let edges = select_edges(&k, &h, &[Filter::ParallelTo { axis: Axis::Z }]);
        let result = execute_fillet(&mut k, &h, &edges, 1.5).unwrap();
        assert_ne!(result.handle, h);
        assert!(matches!(
            k.journal().last(),
            Some(OpRecord::Fillet {
                edge_count: 4,
                radius,
            }) if *radius == 1.5
        ));
    }

    #[test]
    fn rejects_empty_edge_set() {
        let mut k = MockKernel::new();
        let h = k.make_box([10.0, 10.0, 10.0], [0.0, 0.0, 0.0]).unwrap();
        let err = execute_fillet(&mut k, &h, &[], 1.5).unwrap_err();
        assert!(matches!(err, OpError::EmptySelection { .. }));
    }

    #[test]
    fn kernel_without_fillets_degrades_to_a_warning() {
        let mut k = kernel_bridge::TruckKernel::new();
        let h = k.make_box([10.0, 10.0, 10.0], [0.0, 0.0, 0.0]).unwrap();
        let edges = select_edges(&k, &h, &[Filter::ParallelTo { axis: Axis::Z }]);
        let result = execute_fillet(&mut k, &h, &edges, 1.5).unwrap();
        assert_eq!(result.handle, h);
        assert_eq!(result.diagnostics.warnings.len(), 1);
        assert!(result.diagnostics.warnings[0].contains("not supported"));
    }

    #[test]
    fn rejects_non_positive_radius() {
        let mut k = MockKernel::new();
        let h = k.make_box([10.0, 10.0, 10.0], [0.0, 0.0, 0.0]).unwrap();
        let edges = select_edges(&k, &h, &[Filter::ParallelTo { axis: Axis::Z }]);
        let err = execute_fillet(&mut k, &h, &edges, -0.5).unwrap_err();
        assert!(matches!(err, OpError::InvalidParameter { .. }));
    }
}
