use holder_types::Profile2;
use kernel_bridge::{BooleanMode, KernelSolidHandle, Plane};
use tracing::debug;

use crate::kernel_ext::KernelBundle;
use crate::types::{Diagnostics, OpError, StepResult};

/// Create a base box solid.
pub fn execute_box(
    kb: &mut dyn KernelBundle,
    size: [f64; 3],
    base_center: [f64; 3],
) -> Result<StepResult, OpError> {
    if size.iter().any(|&s| s <= 0.0) {
        return Err(OpError::InvalidParameter {
            reason: format!("box size must be positive, got {size:?}"),
        });
    }

    let started = std::time::Instant::now();
    let handle = kb.make_box(size, base_center)?;
    let kernel_time_ms = started.elapsed().as_secs_f64() * 1000.0;
    debug!(?size, kernel_time_ms, "box complete");

    Ok(StepResult {
        handle,
        diagnostics: Diagnostics {
            warnings: Vec::new(),
            kernel_time_ms,
        },
    })
}

/// Extrude profiles from a working plane and fuse into or cut from `solid`.
///
/// Depth is signed along the plane normal; taper shrinks the profile along
/// the direction of travel.
pub fn execute_prism(
    kb: &mut dyn KernelBundle,
    solid: &KernelSolidHandle,
    plane: &Plane,
    profiles: &[Profile2],
    depth: f64,
    taper_deg: f64,
    mode: BooleanMode,
) -> Result<StepResult, OpError> {
    if profiles.is_empty() {
        return Err(OpError::InvalidParameter {
            reason: "prism needs at least one profile".to_string(),
        });
    }
    if depth == 0.0 {
        return Err(OpError::InvalidParameter {
            reason: "prism depth must be non-zero".to_string(),
        });
    }
    if !(0.0..90.0).contains(&taper_deg) {
        return Err(OpError::InvalidParameter {
            reason: format!("taper must be in [0, 90) degrees, got {taper_deg}"),
        });
    }

    let started = std::time::Instant::now();
    let handle = kb.prism(solid, plane, profiles, depth, taper_deg, mode)?;
    let kernel_time_ms = started.elapsed().as_secs_f64() * 1000.0;
    debug!(
        profile_count = profiles.len(),
        depth,
        taper_deg,
        ?mode,
        kernel_time_ms,
        "prism complete"
    );

    Ok(StepResult {
        handle,
        diagnostics: Diagnostics {
            warnings: Vec::new(),
            kernel_time_ms,
        },
    })
}
