//! Export and display scenarios: STL framing and viewer hand-off.

use holder_engine::{build_holder, resolve};
use holder_types::{BuildVariant, PhysicalSpec, RenderHint};
use kernel_bridge::{Kernel, MockKernel, TruckKernel};
use part_export::{export_binary_stl, ExportMetadata, RecordingViewer, Viewer};
use test_harness::{mesh_bounding_box, mesh_volume_ml};

#[test]
fn built_holder_exports_with_standard_framing() {
    let mut k = MockKernel::new();
    let spec = PhysicalSpec::dishwasher_default(BuildVariant::Preview);
    let build = build_holder(&mut k, &spec).unwrap();

    let mesh = k.tessellate(&build.holder, 0.05).unwrap();
    let tri_count = mesh.triangle_count();
    assert!(tri_count > 0);

    let bytes = export_binary_stl(&mesh, "detergent-holder").unwrap();
    assert_eq!(bytes.len(), 80 + 4 + tri_count * 50);
    assert_eq!(
        u32::from_le_bytes(bytes[80..84].try_into().unwrap()),
        tri_count as u32
    );
}

#[test]
fn exported_mesh_covers_the_part_bounds() {
    let mut k = MockKernel::new();
    let spec = PhysicalSpec::dishwasher_default(BuildVariant::Preview);
    let build = build_holder(&mut k, &spec).unwrap();

    let mesh = k.tessellate(&build.holder, 0.05).unwrap();
    let (min, max) = mesh_bounding_box(&mesh);
    // Cup spans the full oversized footprint; sticks reach above the rim.
    assert!(max[0] - min[0] > 50.0);
    assert!(max[2] > build.dims.base_height as f32);
}

#[test]
fn liquid_reference_solid_measures_the_target_capacity() {
    let mut k = TruckKernel::new();
    let spec = PhysicalSpec::dishwasher_default(BuildVariant::Production);
    let dims = resolve(&spec).unwrap();

    let liquid = k
        .make_box(
            [
                spec.arm_size[0],
                spec.arm_size[1] - 2.0 * dims.wall,
                dims.base_height,
            ],
            [0.0, 0.0, 0.0],
        )
        .unwrap();
    let mesh = k.tessellate(&liquid, 0.05).unwrap();
    assert!((mesh_volume_ml(&mesh) - spec.max_volume_ml).abs() < 0.01);
}

#[test]
fn liquid_reference_is_shown_translucent_blue() {
    let mut k = MockKernel::new();
    let spec = PhysicalSpec::dishwasher_default(BuildVariant::Production);
    let build = build_holder(&mut k, &spec).unwrap();

    let mut viewer = RecordingViewer::new();
    viewer.show(
        &build.liquid_reference,
        "liquid-area",
        RenderHint::reference_volume(),
    );
    viewer.show(&build.holder, "detergent-holder", RenderHint::default());

    let liquid = viewer.find("liquid-area").unwrap();
    assert_eq!(liquid.hint.color, [0.0, 0.0, 1.0]);
    assert!(liquid.hint.alpha < 1.0);
    let holder = viewer.find("detergent-holder").unwrap();
    assert_eq!(holder.hint.alpha, 1.0);
}

#[test]
fn export_metadata_names_the_part_and_counts_triangles() {
    let mut k = MockKernel::new();
    let spec = PhysicalSpec::dishwasher_default(BuildVariant::Preview);
    let build = build_holder(&mut k, &spec).unwrap();
    let mesh = k.tessellate(&build.holder, 0.05).unwrap();

    let meta = ExportMetadata::new("detergent-holder", mesh.triangle_count());
    assert_eq!(meta.part_name, "detergent-holder");
    assert_eq!(meta.triangle_count, mesh.triangle_count());
}
