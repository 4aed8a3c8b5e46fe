//! Real symmetric scattering K-matrix and its scalar ingredients.

use kmatrix_core::constants::{M_PI_SQ, S_TOLERANCE};
use kmatrix_core::{AdlerZero, Pole};
use nalgebra::DMatrix;

use crate::config::ModelConfig;

/// Computes the `1/(m_pole^2 - s)` denominators for all poles.
///
/// A denominator closer than the fixed tolerance to zero is substituted
/// by 0 rather than inverted, so an `s` landing exactly on a bare pole
/// never produces an infinity.
pub fn pole_denominators(poles: &[Pole], s: f64) -> Vec<f64> {
    poles
        .iter()
        .map(|pole| {
            let term = pole.mass_sq - s;
            if term.abs() > S_TOLERANCE {
                1.0 / term
            } else {
                0.0
            }
        })
        .collect()
}

/// Slowly-varying-part term `(m0^2 - s0)/(s - s0)`, zero-guarded.
pub fn svp_term(s: f64, s0: f64, m0_sq: f64) -> f64 {
    let delta_s = s - s0;
    if delta_s.abs() > S_TOLERANCE {
        (m0_sq - s0) / delta_s
    } else {
        0.0
    }
}

/// Adler-zero suppression factor `(s - sA m_pi^2/2)(1 - sA0)/(s - sA0)`,
/// zero-guarded on the denominator.
pub fn adler_zero_factor(adler: &AdlerZero, s: f64) -> f64 {
    let delta_s = s - adler.s_a0;
    if delta_s.abs() > S_TOLERANCE {
        (s - 0.5 * adler.s_a * M_PI_SQ) * (1.0 - adler.s_a0) / delta_s
    } else {
        0.0
    }
}

/// Builds the real symmetric scattering K-matrix for the given `s`.
///
/// `K_ij = adler(s) * [ sum_p g_pi g_pj / (m_p^2 - s) + f_j * svp(s) ]`,
/// where the background term enters only on the configured `row` (the
/// single SVP coefficient row this instance carries); symmetry mirrors
/// it into column `row` as well.
pub fn scattering_matrix(
    config: &ModelConfig,
    row: usize,
    s: f64,
    denominators: &[f64],
    scatt_svp: f64,
    adler_factor: f64,
) -> DMatrix<f64> {
    let n = config.n_channels();
    let mut k = DMatrix::<f64>::zeros(n, n);

    for i in 0..n {
        for j in i..n {
            let mut k_ij: f64 = config
                .poles
                .iter()
                .zip(denominators)
                .map(|(pole, denom)| denom * pole.couplings[i] * pole.couplings[j])
                .sum();

            if i == row {
                k_ij += config.background[j] * scatt_svp;
            }
            k_ij *= adler_factor;

            k[(i, j)] = k_ij;
            k[(j, i)] = k_ij;
        }
    }

    k
}
