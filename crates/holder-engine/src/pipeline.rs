use holder_types::PhysicalSpec;
use kernel_bridge::KernelSolidHandle;
use modeling_ops::{execute_box, KernelBundle, OpError};
use tracing::info;

use crate::arm;
use crate::connector::attach_connector;
use crate::finish::finishing_fillets;
use crate::marks::cut_volume_marks;
use crate::resolver::{resolve, ConfigError, DerivedDimensions};
use crate::shell::build_cup_shell;
use crate::vents::cut_vents;

/// A build failure, either before geometry starts or inside an operation.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("modeling: {0}")]
    Op(#[from] OpError),
}

/// Everything a successful build produces.
#[derive(Debug)]
pub struct HolderBuild {
    /// The printable part.
    pub holder: KernelSolidHandle,
    /// Reference solid filling the liquid cavity, for display only.
    pub liquid_reference: KernelSolidHandle,
    /// The dimensions the part was built from.
    pub dims: DerivedDimensions,
    /// Non-fatal diagnostics collected along the way.
    pub warnings: Vec<String>,
}

/// Run the whole pipeline: resolve, then fold the solid through
/// shell, connector, marks, vents and finishing, in that order.
///
/// Finishing runs after every cutting pass; a fillet applied earlier could
/// be re-exposed as a sharp edge by a later boolean. Each stage consumes the
/// previous handle, so a failed stage leaves no partially-updated state to
/// clean up.
pub fn build_holder(
    kb: &mut dyn KernelBundle,
    spec: &PhysicalSpec,
) -> Result<HolderBuild, BuildError> {
    let dims = resolve(spec)?;
    let mut warnings = Vec::new();

    let liquid_reference = execute_box(
        kb,
        [
            spec.arm_size[0],
            spec.arm_size[1] - 2.0 * dims.wall,
            dims.base_height,
        ],
        [0.0, 0.0, 0.0],
    )?
    .handle;

    let cup = build_cup_shell(kb, spec, &dims)?;
    info!("cup shell built");
    let connected = attach_connector(kb, spec, &dims, &cup, &mut warnings)?;
    info!("connector attached");
    let marked = cut_volume_marks(kb, spec, &dims, &connected)?;
    info!(marks = dims.mark_heights.len(), "volume marks cut");
    let vented = cut_vents(kb, spec, &dims, &marked, &mut warnings)?;
    info!("ventilation cut");
    let holder = finishing_fillets(kb, spec, &dims, &vented, &mut warnings)?;
    info!(warnings = warnings.len(), "holder finished");

    Ok(HolderBuild {
        holder,
        liquid_reference,
        dims,
        warnings,
    })
}

/// Build the debug arm stub for fit checks in the preview.
pub fn build_arm_stub(
    kb: &mut dyn KernelBundle,
    spec: &PhysicalSpec,
) -> Result<KernelSolidHandle, BuildError> {
    arm::build_arm_stub(kb, spec)
}
