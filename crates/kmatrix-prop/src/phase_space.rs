//! Per-channel phase-space factors with analytic continuation.
//!
//! Each channel's factor is a dimensionless `sqrt(1 - threshold^2/s)`
//! term (or a product of two such terms for unequal-mass pairs). When
//! the argument under the square root turns negative the factor becomes
//! purely imaginary, continuing the amplitude below threshold. The
//! four-pion and K-three-pion channels use effective multi-body
//! parameterisations instead of a two-body square root.

use kmatrix_core::constants::{
    ETA_ETAP_SUM_SQ, FOUR_PI_SQ, K_3PI_DIFF_SQ, K_3PI_MATCH_S, K_ETAP_DIFF_SQ, K_ETAP_SUM_SQ,
    K_PI_DIFF_SQ, K_PI_SUM_SQ, NEAR_ZERO_S, TWO_ETA_SQ, TWO_K_SQ, TWO_PI_SQ,
};
use kmatrix_core::ChannelType;
use nalgebra::DMatrix;
use num_complex::Complex64;

/// Computes the phase-space factor for one channel at the given `s`.
///
/// The result is real and non-negative above the channel threshold,
/// purely imaginary (with non-negative magnitude) below it, and exactly
/// zero when `|s|` is vanishingly small.
pub fn rho(channel: ChannelType, s: f64) -> Complex64 {
    if s.abs() < NEAR_ZERO_S {
        return Complex64::new(0.0, 0.0);
    }
    match channel {
        ChannelType::PiPi => equal_mass_rho(s, TWO_PI_SQ),
        ChannelType::KK => equal_mass_rho(s, TWO_K_SQ),
        ChannelType::FourPi => four_pi_rho(s),
        ChannelType::EtaEta => equal_mass_rho(s, TWO_ETA_SQ),
        // The (m_eta - m_eta')^2 difference factor corresponds to a t/u-channel
        // crossing that cannot be continued below threshold; Anisovich and
        // Sarantsev (hep-ph/0204328) fix it to unity, as done here.
        ChannelType::EtaEtaPrime => equal_mass_rho(s, ETA_ETAP_SUM_SQ),
        ChannelType::KPi => unequal_mass_rho(s, K_PI_SUM_SQ, K_PI_DIFF_SQ),
        ChannelType::KEtaPrime => unequal_mass_rho(s, K_ETAP_SUM_SQ, K_ETAP_DIFF_SQ),
        ChannelType::KThreePi => k_three_pi_rho(s),
    }
}

/// Assembles the diagonal real and imaginary phase-space matrices for
/// all channels of a model.
pub fn rho_matrices(channels: &[ChannelType], s: f64) -> (DMatrix<f64>, DMatrix<f64>) {
    let n = channels.len();
    let mut re = DMatrix::<f64>::zeros(n, n);
    let mut im = DMatrix::<f64>::zeros(n, n);
    for (index, &channel) in channels.iter().enumerate() {
        let factor = rho(channel, s);
        re[(index, index)] = factor.re;
        im[(index, index)] = factor.im;
    }
    (re, im)
}

/// Diagonal entries of the complex square root of the phase-space matrix.
///
/// For `rho = a + ib` with magnitude `r`, `sqrt(rho) = c + id` with
/// `c = sqrt((r + a)/2)` and `d = sqrt((r - a)/2)`.
pub fn sqrt_rho_diagonal(channels: &[ChannelType], s: f64) -> Vec<Complex64> {
    channels
        .iter()
        .map(|&channel| {
            let factor = rho(channel, s);
            let magnitude = factor.norm();
            let sum = magnitude + factor.re;
            let diff = magnitude - factor.re;
            let re = if sum > 0.0 { (0.5 * sum).sqrt() } else { 0.0 };
            let im = if diff > 0.0 { (0.5 * diff).sqrt() } else { 0.0 };
            Complex64::new(re, im)
        })
        .collect()
}

fn sqrt_or_continue(arg: f64) -> Complex64 {
    if arg < 0.0 {
        Complex64::new(0.0, (-arg).sqrt())
    } else {
        Complex64::new(arg.sqrt(), 0.0)
    }
}

fn equal_mass_rho(s: f64, threshold_sq: f64) -> Complex64 {
    sqrt_or_continue(1.0 - threshold_sq / s)
}

fn unequal_mass_rho(s: f64, sum_sq: f64, diff_sq: f64) -> Complex64 {
    sqrt_or_continue((1.0 - sum_sq / s) * (1.0 - diff_sq / s))
}

// 6th-order polynomial fit to the four-pion phase-space double integral
// of hep-ph/0204328 (Eq 4), valid for s <= 1 GeV^2; normalised so the
// integral at s = 1 matches sqrt(1 - 16 m_pi^2 / s).
fn four_pi_rho(s: f64) -> Complex64 {
    if s <= 1.0 {
        let mut term = ((1.07885 * s + 0.13655) * s - 0.29744) * s - 0.20840;
        term = ((term * s + 0.13851) * s - 0.01933) * s + 0.00051;
        // Slightly below the two-pion threshold the fit dips negative.
        Complex64::new(term.max(0.0), 0.0)
    } else {
        Complex64::new((1.0 - FOUR_PI_SQ / s).sqrt(), 0.0)
    }
}

// Simplest K pi pi pi parameterisation of hep-ph/9705401 (Eq 14): a
// (1 - (m_K - 3 m_pi)^2/s)^{5/2} power law normalised to reach 1 at the
// matching point s = 1.44 GeV^2, unit phase space above it.
fn k_three_pi_rho(s: f64) -> Complex64 {
    if s < K_3PI_MATCH_S {
        let norm = ((K_3PI_MATCH_S - K_3PI_DIFF_SQ) / K_3PI_MATCH_S).powf(-2.5);
        let term = 1.0 - K_3PI_DIFF_SQ / s;
        if term < 0.0 {
            Complex64::new(0.0, norm * (-term).powf(2.5))
        } else {
            Complex64::new(norm * term.powf(2.5), 0.0)
        }
    } else {
        Complex64::new(1.0, 0.0)
    }
}
