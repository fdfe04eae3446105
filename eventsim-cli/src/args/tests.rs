use eventsim_core::cogs::IntensityMap;

use super::{parse::into_ron_args, SampleArgs};

const CONFIG: &str = r#"
    seed: 42,
    tmin: 0.0,
    tmax: 100.0,
    time_bins: 50,
    map: (
        axes: ["energy", "pixel"],
        shape: [2, 3],
        values: [0.5, 1.0, 1.5, 2.0, 2.5, 3.0],
    ),
    light_curve: (
        time: [0.0, 50.0, 100.0],
        norm: [1.0, 2.0, 1.0],
    ),
"#;

#[test]
fn wraps_bare_fields_into_a_struct() {
    assert_eq!(into_ron_args(" seed: 1 "), "(seed: 1)");
    assert_eq!(into_ron_args("(seed: 1)"), "(seed: 1)");
    assert_eq!(into_ron_args("Sample(seed: 1)"), "Sample(seed: 1)");
}

#[test]
fn parses_full_config() {
    let args = SampleArgs::try_parse(CONFIG).unwrap();

    assert_eq!(args.seed, 42);
    assert_eq!(args.time_bins, Some(50));
    assert_eq!(args.map.shape(), &[2, 3]);
    assert_eq!(args.map.axis_names(), &["energy", "pixel"]);
    assert_eq!(args.light_curve.as_ref().map(|lc| lc.times().len()), Some(3));

    let sampler = args.build_sampler().unwrap();

    assert_eq!(sampler.time_bins(), 50);
    assert_eq!(sampler.window().tmax(), 100.0);
}

#[test]
fn light_curve_and_time_bins_are_optional() {
    let args = SampleArgs::try_parse(
        "random_state: 7, tmin: 1.0, tmax: 2.0, map: (axes: [\"x\"], shape: [1], values: [3.0])",
    )
    .unwrap();

    assert_eq!(args.seed, 7);
    assert!(args.time_bins.is_none());
    assert!(args.light_curve.is_none());
    assert!(args.build_sampler().is_ok());
}

#[test]
fn rejects_unknown_fields() {
    let config = format!("{CONFIG} colour: \"blue\",");

    assert!(SampleArgs::try_parse(&config).is_err());
}

#[test]
fn rejects_inconsistent_map() {
    assert!(SampleArgs::try_parse(
        "seed: 0, tmin: 0.0, tmax: 1.0, map: (axes: [\"x\"], shape: [2], values: [1.0])",
    )
    .is_err());
    assert!(SampleArgs::try_parse(
        "seed: 0, tmin: 0.0, tmax: 1.0, map: (axes: [\"x\"], shape: [1], values: [-1.0])",
    )
    .is_err());
}

#[test]
fn invalid_window_fails_to_build() {
    let args = SampleArgs::try_parse(
        "seed: 0, tmin: 5.0, tmax: 1.0, map: (axes: [\"x\"], shape: [1], values: [1.0])",
    )
    .unwrap();

    assert!(args.build_sampler().is_err());
}
