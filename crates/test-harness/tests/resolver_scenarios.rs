//! Resolver properties over a range of inputs, beyond the single reference
//! dishwasher covered by the unit tests.

use holder_engine::{resolve, ConfigError};
use holder_types::{BuildVariant, PhysicalSpec};

fn spec() -> PhysicalSpec {
    PhysicalSpec::dishwasher_default(BuildVariant::Production)
}

#[test]
fn base_height_inverts_volume_across_capacities() {
    for volume in [5.0, 20.0, 40.0, 75.0, 200.0] {
        let mut s = spec();
        s.max_volume_ml = volume;
        s.volume_marks_ml.clear();
        let dims = resolve(&s).unwrap();
        let recovered = dims.footprint_cm2 * dims.base_height / 10.0;
        assert!(
            (recovered - volume).abs() / volume < 1e-6,
            "volume {volume} round-tripped to {recovered}"
        );
    }
}

#[test]
fn base_height_grows_monotonically_with_volume() {
    let mut last = 0.0;
    for volume in [1.0, 10.0, 25.0, 40.0, 100.0] {
        let mut s = spec();
        s.max_volume_ml = volume;
        s.volume_marks_ml.clear();
        let dims = resolve(&s).unwrap();
        assert!(dims.base_height > last);
        last = dims.base_height;
    }
}

#[test]
fn mark_heights_preserve_volume_ratios() {
    let mut s = spec();
    s.volume_marks_ml = vec![5.0, 10.0, 25.0, 40.0];
    let dims = resolve(&s).unwrap();
    for (m, h) in s.volume_marks_ml.iter().zip(&dims.mark_heights) {
        assert!((h / dims.base_height - m / s.max_volume_ml).abs() < 1e-12);
    }
    // Sorted input gives sorted heights
    assert!(dims.mark_heights.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn every_derived_length_clears_the_printer_minimum() {
    let dims = resolve(&spec()).unwrap();
    for length in [
        dims.wall,
        dims.bottom_wall,
        dims.stick_width,
        dims.stick_height,
        dims.tongue_thickness,
        dims.tongue_drop,
        dims.tab_thickness,
        dims.tab_drop,
        dims.notch,
        dims.hole_cell,
    ] {
        assert!(length >= 0.4);
    }
}

#[test]
fn degenerate_inputs_each_name_their_error() {
    let mut wide_wall = spec();
    wide_wall.wall_min = 5.1;
    assert!(matches!(
        resolve(&wide_wall),
        Err(ConfigError::WallTooLarge { .. })
    ));

    let mut no_volume = spec();
    no_volume.max_volume_ml = -3.0;
    assert!(matches!(
        resolve(&no_volume),
        Err(ConfigError::NonPositiveVolume { .. })
    ));

    let mut bad_mark = spec();
    bad_mark.volume_marks_ml = vec![0.0];
    assert!(matches!(
        resolve(&bad_mark),
        Err(ConfigError::MarkOutOfRange { .. })
    ));

    let mut too_deep = spec();
    too_deep.max_volume_ml = 400.0;
    assert!(matches!(
        resolve(&too_deep),
        Err(ConfigError::BaseTooTall { .. })
    ));

    let mut shrinking = spec();
    shrinking.tolerance = -1.0;
    assert!(matches!(
        resolve(&shrinking),
        Err(ConfigError::NegativeTolerance { .. })
    ));

    let mut coarse_nozzle = spec();
    coarse_nozzle.wall_min = 1.6;
    coarse_nozzle.tolerance = 0.0;
    assert!(matches!(
        resolve(&coarse_nozzle),
        Err(ConfigError::UnprintableDimension { .. })
    ));
}
