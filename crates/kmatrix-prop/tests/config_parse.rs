use std::io::Write;

use kmatrix_core::{ChannelType, KMatrixError};
use kmatrix_prop::{KMatrixPropagator, ModelConfig};

const FIXTURE: &str = include_str!("../fixtures/scalar_swave.txt");

#[test]
fn parses_five_channel_fixture() {
    let config = ModelConfig::parse(FIXTURE, 5, 5).expect("fixture parses");

    assert_eq!(
        config.channels,
        vec![
            ChannelType::PiPi,
            ChannelType::KK,
            ChannelType::FourPi,
            ChannelType::EtaEta,
            ChannelType::EtaEtaPrime,
        ]
    );
    assert_eq!(config.n_poles(), 5);
    // Pole masses are stored squared.
    assert!((config.poles[0].mass_sq - 0.651 * 0.651).abs() < 1e-12);
    assert!((config.poles[4].mass_sq - 1.82206 * 1.82206).abs() < 1e-12);
    assert_eq!(config.poles[1].couplings.len(), 5);
    assert!((config.poles[1].couplings[0] - 0.94128).abs() < 1e-12);
    assert!((config.background[2] + 0.20545).abs() < 1e-12);
    assert!((config.adler.s0_scatt + 3.92637).abs() < 1e-12);
    assert!((config.adler.s_a0 + 0.15).abs() < 1e-12);
}

#[test]
fn comments_and_blank_lines_are_skipped() {
    let text = "\n# leading comment\n1\n\n# pole\n1.0 0.5\n0.0\n# constants\n0 0 0 0 0\n";
    let config = ModelConfig::parse(text, 1, 1).expect("minimal model parses");
    assert_eq!(config.channels, vec![ChannelType::PiPi]);
    assert!((config.poles[0].mass_sq - 1.0).abs() < 1e-12);
}

#[test]
fn rejects_out_of_range_channel_code() {
    let text = "1 9\n1.0 0.5 0.5\n0.0 0.0\n0 0 0 0 0\n";
    let err = ModelConfig::parse(text, 2, 1).expect_err("code 9 is invalid");
    assert!(matches!(err, KMatrixError::Config(_)));
    assert_eq!(err.info().code, "config-channel-code");
}

#[test]
fn rejects_wrong_channel_count() {
    let text = "1 2 3\n1.0 0.5 0.5\n0.0 0.0\n0 0 0 0 0\n";
    let err = ModelConfig::parse(text, 2, 1).expect_err("three codes for two channels");
    assert_eq!(err.info().code, "config-channel-count");
}

#[test]
fn rejects_short_pole_line() {
    // Two channels need a mass plus two couplings; only two numbers given.
    let text = "1 2\n1.0 0.5\n0.0 0.0\n0 0 0 0 0\n";
    let err = ModelConfig::parse(text, 2, 1).expect_err("pole line is short");
    assert_eq!(err.info().code, "config-pole-count");
}

#[test]
fn rejects_wrong_background_count() {
    let text = "1 2\n1.0 0.5 0.5\n0.0\n0 0 0 0 0\n";
    let err = ModelConfig::parse(text, 2, 1).expect_err("background line is short");
    assert_eq!(err.info().code, "config-background-count");
}

#[test]
fn rejects_short_constants_line() {
    let text = "1\n1.0 0.5\n0.0\n0 0 0 0\n";
    let err = ModelConfig::parse(text, 1, 1).expect_err("four constants instead of five");
    assert_eq!(err.info().code, "config-adler-count");
}

#[test]
fn rejects_unparsable_number() {
    let text = "1\n1.0 abc\n0.0\n0 0 0 0 0\n";
    let err = ModelConfig::parse(text, 1, 1).expect_err("coupling is not a number");
    assert_eq!(err.info().code, "config-number");
}

#[test]
fn failed_load_leaves_propagator_unconfigured() {
    let mut file = tempfile::NamedTempFile::new().expect("temp file");
    // Pole line carries only nChannels numbers instead of 1 + nChannels.
    write!(file, "1 2\n1.0 0.5\n0.0 0.0\n0 0 0 0 0\n").expect("write");

    let mut propagator = KMatrixPropagator::new("bad", 0, 2, 1).expect("construct");
    let err = propagator.load(file.path()).expect_err("load must fail");
    assert!(matches!(err, KMatrixError::Config(_)));
    assert!(!propagator.is_configured());

    // Queries against the unconfigured instance degrade to zeros.
    propagator.solve(1.0).expect("solve is a silent no-op");
    assert_eq!(propagator.real_propagator_term(0), 0.0);
    assert_eq!(propagator.imag_propagator_term(0), 0.0);
    assert_eq!(propagator.pole_denominator_term(0), 0.0);
    assert_eq!(propagator.coupling_constant(0, 0), 0.0);
    assert_eq!(propagator.recompute_count(), 0);
}

#[test]
fn reload_resets_previous_configuration() {
    let mut good = tempfile::NamedTempFile::new().expect("temp file");
    write!(good, "1\n1.0 1.0\n0.0\n0 0 0 0 0\n").expect("write");
    let mut bad = tempfile::NamedTempFile::new().expect("temp file");
    write!(bad, "1\n1.0\n0.0\n0 0 0 0 0\n").expect("write");

    let mut propagator = KMatrixPropagator::new("reload", 0, 1, 1).expect("construct");
    propagator.load(good.path()).expect("good file loads");
    propagator.solve(0.5).expect("solve");
    assert!(propagator.real_propagator_term(0) != 0.0);

    propagator.load(bad.path()).expect_err("bad file fails");
    assert!(!propagator.is_configured());
    assert_eq!(propagator.real_propagator_term(0), 0.0);
}

#[test]
fn config_serde_roundtrip() {
    let config = ModelConfig::parse(FIXTURE, 5, 5).expect("fixture parses");
    let json = serde_json::to_string(&config).expect("serialize");
    let restored: ModelConfig = serde_json::from_str(&json).expect("deserialize");
    assert_eq!(config, restored);
}
