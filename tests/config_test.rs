use clap::{CommandFactory, FromArgMatches, Parser};
use pillarforge::config::FixedParameters;
use pillarforge::error::PillarError;
use rstest::rstest;
use std::fs;

#[derive(Parser, Debug)]
struct TestCli {
    #[command(flatten)]
    params: FixedParameters,
}

fn parse(args: &[&str]) -> (FixedParameters, clap::ArgMatches) {
    let matches = TestCli::command()
        .try_get_matches_from(std::iter::once("test").chain(args.iter().copied()))
        .unwrap();
    let cli = TestCli::from_arg_matches(&matches).unwrap();
    (cli.params, matches)
}

#[test]
fn test_defaults_are_valid() {
    let p = FixedParameters::default();
    assert!(p.validate().is_ok());
    assert_eq!(p.material.fck, 30.0);
    assert_eq!(p.costs.concrete_price_m3, 450.0);
    assert_eq!(p.costs.steel_price_kg, 12.0);
    assert_eq!(p.rules.min_steel_ratio, 0.004);
    assert_eq!(p.rules.override_threshold, 0.4);
    assert!(p.rules.enforce_minimum_steel);
}

#[test]
fn test_cli_defaults_match_struct_defaults() {
    let (params, _) = parse(&[]);
    assert_eq!(params, FixedParameters::default());
}

#[rstest]
#[case::zero_fck(|p: &mut FixedParameters| p.material.fck = 0.0)]
#[case::negative_price(|p: &mut FixedParameters| p.costs.steel_price_kg = -1.0)]
#[case::nan_price(|p: &mut FixedParameters| p.costs.concrete_price_m3 = f64::NAN)]
#[case::inverted_width(|p: &mut FixedParameters| { p.bounds.width_min = 60.0; p.bounds.width_max = 20.0; })]
#[case::zero_step(|p: &mut FixedParameters| p.bounds.height_step = 0.0)]
#[case::negative_height(|p: &mut FixedParameters| p.bounds.height_min = -5.0)]
#[case::aspect_below_one(|p: &mut FixedParameters| p.bounds.aspect_min = 0.5)]
#[case::aspect_inverted(|p: &mut FixedParameters| { p.bounds.aspect_min = 3.0; p.bounds.aspect_max = 2.0; })]
#[case::zero_rho(|p: &mut FixedParameters| p.rules.min_steel_ratio = 0.0)]
#[case::huge_rho(|p: &mut FixedParameters| p.rules.min_steel_ratio = 0.2)]
#[case::threshold_above_one(|p: &mut FixedParameters| p.rules.feasibility_threshold = 1.5)]
#[case::threshold_zero(|p: &mut FixedParameters| p.rules.override_threshold = 0.0)]
fn test_invalid_parameters_rejected(#[case] mutate: fn(&mut FixedParameters)) {
    let mut p = FixedParameters::default();
    mutate(&mut p);
    assert!(matches!(p.validate(), Err(PillarError::InvalidInput(_))));
}

#[test]
fn test_partial_file_keeps_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("params.json");
    fs::write(
        &path,
        r#"{ "material": { "fck": 40.0 }, "costs": { "steel_price_kg": 9.5 } }"#,
    )
    .unwrap();

    let p = FixedParameters::load_from_file(&path).unwrap();
    assert_eq!(p.material.fck, 40.0);
    assert_eq!(p.costs.steel_price_kg, 9.5);
    assert_eq!(p.costs.concrete_price_m3, 450.0);
    assert_eq!(p.bounds, FixedParameters::default().bounds);
}

#[test]
fn test_unreadable_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.json");
    assert!(matches!(
        FixedParameters::load_from_file(&missing),
        Err(PillarError::Io(_))
    ));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ fck: ").unwrap();
    assert!(matches!(
        FixedParameters::load_from_file(&broken),
        Err(PillarError::Json(_))
    ));
}

#[test]
fn test_explicit_flags_override_file_values() {
    let mut from_file = FixedParameters::default();
    from_file.material.fck = 40.0;
    from_file.costs.steel_price_kg = 9.5;
    from_file.bounds.width_max = 80.0;

    let (cli, matches) = parse(&["--fck", "25", "--width-max", "50"]);
    from_file.merge_from_cli(&cli, &matches);

    assert_eq!(from_file.material.fck, 25.0);
    assert_eq!(from_file.bounds.width_max, 50.0);
    // untouched on the command line: file value survives
    assert_eq!(from_file.costs.steel_price_kg, 9.5);
}

#[test]
fn test_boolean_flag_merges() {
    let mut from_file = FixedParameters::default();
    let (cli, matches) = parse(&["--enforce-minimum-steel", "false"]);
    from_file.merge_from_cli(&cli, &matches);
    assert!(!from_file.rules.enforce_minimum_steel);
}
