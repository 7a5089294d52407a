use kernel_bridge::{KernelError, KernelId, KernelSolidHandle};
use tracing::{debug, warn};

use crate::kernel_ext::KernelBundle;
use crate::types::{Diagnostics, OpError, StepResult};

/// Bevel the given edges. A symmetric chamfer passes `distance2 = None`;
/// an asymmetric one gives the second leg explicitly.
///
/// As with fillets, a kernel without chamfer support leaves the edges
/// square and the step reports a diagnostic warning instead of failing.
pub fn execute_chamfer(
    kb: &mut dyn KernelBundle,
    solid: &KernelSolidHandle,
    edges: &[KernelId],
    distance: f64,
    distance2: Option<f64>,
) -> Result<StepResult, OpError> {
    if distance <= 0.0 {
        return Err(OpError::InvalidParameter {
            reason: format!("chamfer distance must be positive, got {distance}"),
        });
    }
    if let Some(d2) = distance2 {
        if d2 <= 0.0 {
            return Err(OpError::InvalidParameter {
                reason: format!("second chamfer distance must be positive, got {d2}"),
            });
        }
    }
    if edges.is_empty() {
        return Err(OpError::EmptySelection {
            query: "chamfer edge set".to_string(),
        });
    }

    let started = std::time::Instant::now();
    let handle = match kb.chamfer_edges(solid, edges, distance, distance2) {
        Ok(handle) => handle,
        Err(KernelError::NotSupported { operation }) => {
            let warning = format!(
                "{operation} not supported by this kernel, {} edges left square",
                edges.len()
            );
            warn!(edge_count = edges.len(), distance, "{warning}");
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
    debug!(
        edge_count = edges.len(),
        distance, kernel_time_ms, "chamfer complete"
    );

    Ok(StepResult {
        handle,
        diagnostics: Diagnostics {
            warnings: Vec::new(),
            kernel_time_ms,
        },
    })
}
