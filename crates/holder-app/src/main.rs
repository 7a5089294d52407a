//! Generate the detergent-holder part for the reference dishwasher.
//!
//! Environment:
//! - `HOLDER_FINAL_BUILD` — set to build the slow production variant with
//!   1.5 mm ventilation holes; unset builds the fast coarse preview.
//! - `HOLDER_STL_PATH` — when set, the finished part is tessellated and
//!   written there as binary STL.

use std::path::PathBuf;

use holder_engine::{build_arm_stub, build_holder, BuildError};
use holder_types::{BuildVariant, PhysicalSpec, RenderHint};
use kernel_bridge::{Kernel, KernelError, TruckKernel};
use part_export::{write_binary_stl, ExportError, ExportMetadata, LogViewer, Viewer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Chord tolerance for the export tessellation, mm.
const MESH_TOLERANCE: f64 = 0.05;

#[derive(Debug, thiserror::Error)]
enum AppError {
    #[error(transparent)]
    Build(#[from] BuildError),

    #[error(transparent)]
    Kernel(#[from] KernelError),

    #[error(transparent)]
    Export(#[from] ExportError),
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    if let Err(err) = run() {
        tracing::error!(%err, "build failed");
        std::process::exit(1);
    }
}

fn run() -> Result<(), AppError> {
    let final_build = std::env::var_os("HOLDER_FINAL_BUILD").is_some();
    let variant = BuildVariant::from_final_build_flag(final_build);
    let stl_path = std::env::var_os("HOLDER_STL_PATH").map(PathBuf::from);

    let spec = PhysicalSpec::dishwasher_default(variant);
    info!(?variant, "building detergent holder");

    let mut kernel = TruckKernel::new();
    let mut viewer = LogViewer;

    if variant == BuildVariant::Preview {
        let stub = build_arm_stub(&mut kernel, &spec)?;
        viewer.show_debug(&stub, "dishwasher-rotating-arm");
    }

    let build = build_holder(&mut kernel, &spec)?;
    for warning in &build.warnings {
        warn!(warning, "non-fatal build diagnostic");
    }
    viewer.show(
        &build.liquid_reference,
        "liquid-area",
        RenderHint::reference_volume(),
    );
    viewer.show(&build.holder, "detergent-holder", RenderHint::default());
    info!(
        base_height = build.dims.base_height,
        footprint_cm2 = build.dims.footprint_cm2,
        "holder built"
    );

    if let Some(path) = stl_path {
        let mesh = kernel.tessellate(&build.holder, MESH_TOLERANCE)?;
        let meta = ExportMetadata::new("detergent-holder", mesh.triangle_count());
        write_binary_stl(&mesh, &meta.part_name, &path)?;
        info!(
            path = %path.display(),
            triangles = meta.triangle_count,
            "STL written"
        );
    }

    Ok(())
}
