use kmatrix_core::constants::{
    FOUR_PI_SQ, K_3PI_DIFF_SQ, K_3PI_MATCH_S, K_PI_SUM_SQ, TWO_ETA_SQ, TWO_K_SQ, TWO_PI_SQ,
};
use kmatrix_core::ChannelType;
use kmatrix_prop::phase_space::{rho, rho_matrices, sqrt_rho_diagonal};

// Two-body channels paired with their threshold squared.
const TWO_BODY: [(ChannelType, f64); 4] = [
    (ChannelType::PiPi, TWO_PI_SQ),
    (ChannelType::KK, TWO_K_SQ),
    (ChannelType::EtaEta, TWO_ETA_SQ),
    (ChannelType::KPi, K_PI_SUM_SQ),
];

#[test]
fn real_above_threshold_imaginary_below() {
    for (channel, threshold_sq) in TWO_BODY {
        let above = rho(channel, threshold_sq * 1.5);
        assert!(above.re > 0.0, "{channel:?} above threshold must be real");
        assert_eq!(above.im, 0.0);

        let below = rho(channel, threshold_sq * 0.5);
        assert_eq!(below.re, 0.0, "{channel:?} below threshold must be imaginary");
        assert!(below.im > 0.0);
    }
}

#[test]
fn magnitude_is_continuous_across_threshold() {
    for (channel, threshold_sq) in TWO_BODY {
        let just_above = rho(channel, threshold_sq * (1.0 + 1e-8));
        let just_below = rho(channel, threshold_sq * (1.0 - 1e-8));
        assert!(just_above.norm() < 1e-3);
        assert!(just_below.norm() < 1e-3);
    }
}

#[test]
fn vanishing_s_gives_zero_for_every_channel() {
    for channel in ChannelType::ALL {
        let factor = rho(channel, 1e-12);
        assert_eq!(factor.re, 0.0);
        assert_eq!(factor.im, 0.0);
    }
}

#[test]
fn four_pi_polynomial_matches_square_root_at_matching_point() {
    let polynomial = rho(ChannelType::FourPi, 1.0);
    let square_root = (1.0 - FOUR_PI_SQ / 1.0_f64).sqrt();
    assert!(polynomial.im == 0.0);
    assert!((polynomial.re - square_root).abs() < 1e-3);
}

#[test]
fn four_pi_fit_is_clamped_to_zero_at_small_s() {
    // Below the two-pion threshold the polynomial fit dips slightly
    // negative and must be clamped.
    let factor = rho(ChannelType::FourPi, 0.05);
    assert_eq!(factor.re, 0.0);
    assert_eq!(factor.im, 0.0);
}

#[test]
fn k_three_pi_is_unity_above_matching_point() {
    for s in [K_3PI_MATCH_S, 2.0, 10.0] {
        let factor = rho(ChannelType::KThreePi, s);
        assert_eq!(factor.re, 1.0);
        assert_eq!(factor.im, 0.0);
    }
}

#[test]
fn k_three_pi_power_law_is_continuous_at_matching_point() {
    let just_below = rho(ChannelType::KThreePi, K_3PI_MATCH_S - 1e-9);
    assert!((just_below.re - 1.0).abs() < 1e-6);
    assert_eq!(just_below.im, 0.0);
}

#[test]
fn k_three_pi_continues_below_its_power_law_threshold() {
    let below = rho(ChannelType::KThreePi, K_3PI_DIFF_SQ * 0.5);
    assert_eq!(below.re, 0.0);
    assert!(below.im > 0.0);
}

#[test]
fn eta_eta_prime_uses_sum_threshold_only() {
    // With the difference factor fixed to 1, the factor is a pure
    // equal-mass form in the sum threshold.
    let sum_sq = kmatrix_core::constants::ETA_ETAP_SUM_SQ;
    let s = sum_sq * 2.0;
    let factor = rho(ChannelType::EtaEtaPrime, s);
    assert!((factor.re - (1.0 - sum_sq / s).sqrt()).abs() < 1e-12);
}

#[test]
fn rho_matrices_are_diagonal() {
    let channels = [ChannelType::PiPi, ChannelType::KK, ChannelType::EtaEta];
    let (re, im) = rho_matrices(&channels, 0.7);
    for i in 0..3 {
        for j in 0..3 {
            if i != j {
                assert_eq!(re[(i, j)], 0.0);
                assert_eq!(im[(i, j)], 0.0);
            }
        }
    }
    // 0.7 GeV^2 is above the pipi threshold and below the KK threshold.
    assert!(re[(0, 0)] > 0.0 && im[(0, 0)] == 0.0);
    assert!(re[(1, 1)] == 0.0 && im[(1, 1)] > 0.0);
}

#[test]
fn sqrt_rho_squares_back_to_rho() {
    let channels = [ChannelType::PiPi, ChannelType::KK, ChannelType::KPi];
    for s in [0.3, 0.7, 1.5] {
        let roots = sqrt_rho_diagonal(&channels, s);
        for (&channel, root) in channels.iter().zip(&roots) {
            let squared = root * root;
            let expected = rho(channel, s);
            assert!((squared.re - expected.re).abs() < 1e-12);
            assert!((squared.im - expected.im).abs() < 1e-12);
        }
    }
}
