use kernel_bridge::{KernelId, KernelSolidHandle};
use tracing::debug;

use crate::kernel_ext::KernelBundle;
use crate::types::{Diagnostics, OpError, StepResult};

/// Execute a shell operation: hollow out a solid by removing one face and
/// offsetting the remaining faces inward.
pub fn execute_shell(
    kb: &mut dyn KernelBundle,
    solid: &KernelSolidHandle,
    open_face: KernelId,
    thickness: f64,
) -> Result<StepResult, OpError> {
    if thickness <= 0.0 {
        return Err(OpError::InvalidParameter {
            reason: format!("shell thickness must be positive, got {thickness}"),
        });
    }

    let started = std::time::Instant::now();
    let handle = kb.shell_open(solid, open_face, thickness)?;
    let kernel_time_ms = started.elapsed().as_secs_f64() * 1000.0;
    debug!(thickness, kernel_time_ms, "shell complete");

    Ok(StepResult {
        handle,
        diagnostics: Diagnostics {
            warnings: Vec::new(),
            kernel_time_ms,
        },
    })
}
