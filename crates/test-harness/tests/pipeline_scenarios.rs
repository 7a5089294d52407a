//! Full-pipeline scenarios on the mock kernel: stage ordering, vent grids,
//! and the preview/production trade-off.

use holder_engine::{build_holder, resolve};
use holder_types::{BuildVariant, PhysicalSpec};
use kernel_bridge::{MockKernel, OpRecord};
use test_harness::{
    count_ops, first_index, grid_cut_counts, is_chamfer, is_cut, is_fillet, is_fuse, is_shell,
    last_index,
};

fn build(variant: BuildVariant) -> MockKernel {
    let mut k = MockKernel::new();
    let spec = PhysicalSpec::dishwasher_default(variant);
    build_holder(&mut k, &spec).unwrap();
    k
}

#[test]
fn stages_run_shell_connector_marks_vents_finish() {
    let k = build(BuildVariant::Production);
    let journal = k.journal();

    let shell = first_index(journal, is_shell);
    let first_fuse = first_index(journal, is_fuse);
    let first_mark = first_index(journal, |op| {
        matches!(op, OpRecord::Prism { taper_deg, .. } if *taper_deg > 0.0)
    });
    let first_grid = journal
        .iter()
        .position(|op| {
            matches!(
                op,
                OpRecord::Prism {
                    mode: kernel_bridge::BooleanMode::Cut,
                    profile_count,
                    taper_deg,
                    ..
                } if *profile_count > 1 && *taper_deg == 0.0
            )
        })
        .unwrap();
    let first_fillet = first_index(journal, is_fillet);

    assert!(shell < first_fuse);
    assert!(first_fuse < first_mark);
    assert!(first_mark < first_grid);
    assert!(first_grid < first_fillet);
}

#[test]
fn finishing_runs_after_every_cut() {
    let k = build(BuildVariant::Production);
    let journal = k.journal();
    assert!(last_index(journal, is_cut) < first_index(journal, is_fillet));
}

#[test]
fn every_hanging_connector_feature_gets_its_chamfer_immediately() {
    let k = build(BuildVariant::Production);
    let journal = k.journal();

    // Two hanging features, two chamfers, each directly after its extrusion.
    assert_eq!(count_ops(journal, is_chamfer), 2);
    for (i, op) in journal.iter().enumerate() {
        if is_chamfer(op) {
            assert!(is_fuse(&journal[i - 1]), "chamfer not preceded by extrude");
        }
    }
}

#[test]
fn production_vent_grids_match_the_formula() {
    let k = build(BuildVariant::Production);
    // floor(47/3) x floor(55.2/3) on the bottom,
    // floor(47.2/3) x floor(15.417/3) through the X walls,
    // floor(39/3) x floor(15.417/3) through the Y walls.
    assert_eq!(grid_cut_counts(k.journal()), vec![270, 75, 65]);
}

#[test]
fn preview_builds_strictly_fewer_holes() {
    let coarse = grid_cut_counts(build(BuildVariant::Preview).journal());
    let fine = grid_cut_counts(build(BuildVariant::Production).journal());
    assert_eq!(coarse.len(), fine.len());
    for (c, f) in coarse.iter().zip(&fine) {
        assert!(c < f);
    }
}

#[test]
fn mark_cuts_taper_and_overshoot_the_wall() {
    let k = build(BuildVariant::Production);
    let marks: Vec<&OpRecord> = k
        .journal()
        .iter()
        .filter(|op| matches!(op, OpRecord::Prism { taper_deg, .. } if *taper_deg > 0.0))
        .collect();
    assert_eq!(marks.len(), 2);
    for op in marks {
        match op {
            OpRecord::Prism {
                profile_count,
                depth,
                ..
            } => {
                assert_eq!(*profile_count, 4);
                assert!(*depth < -100.0);
            }
            _ => unreachable!(),
        }
    }
}

#[test]
fn no_marks_means_no_tapered_cuts() {
    let mut k = MockKernel::new();
    let mut spec = PhysicalSpec::dishwasher_default(BuildVariant::Production);
    spec.volume_marks_ml.clear();
    build_holder(&mut k, &spec).unwrap();
    let tapered = count_ops(k.journal(), |op| {
        matches!(op, OpRecord::Prism { taper_deg, .. } if *taper_deg > 0.0)
    });
    assert_eq!(tapered, 0);
}

#[test]
fn tiny_cup_degrades_to_warnings_not_errors() {
    let mut k = MockKernel::new();
    // A cup so shallow the coarse side grids fit zero rows.
    let spec = PhysicalSpec {
        arm_size: [47.0, 60.0, 12.0],
        holder_height: 40.0,
        max_volume_ml: 20.0,
        volume_marks_ml: vec![],
        wall_min: 0.4,
        tolerance: 0.2,
        variant: BuildVariant::Preview,
    };
    let dims = resolve(&spec).unwrap();
    assert!(dims.base_height < 2.0 * dims.hole_size);

    let build = build_holder(&mut k, &spec).unwrap();
    assert!(!build.warnings.is_empty());
}

#[test]
fn negative_tolerance_never_reaches_the_kernel() {
    let mut k = MockKernel::new();
    let mut spec = PhysicalSpec::dishwasher_default(BuildVariant::Production);
    spec.tolerance = -1.0;
    assert!(build_holder(&mut k, &spec).is_err());
    assert!(k.journal().is_empty());
}

#[test]
fn derived_dimensions_ride_along_with_the_build() {
    let mut k = MockKernel::new();
    let spec = PhysicalSpec::dishwasher_default(BuildVariant::Production);
    let build = build_holder(&mut k, &spec).unwrap();
    assert!((build.dims.footprint_cm2 - 25.944).abs() < 1e-9);
    assert!((build.dims.base_height - 15.4178).abs() < 1e-3);
}
