//! Physical particle masses and derived channel thresholds.
//!
//! Masses are in GeV, squared quantities in GeV^2. The derived sums and
//! differences are the threshold combinations entering the phase-space
//! factors of the eight scattering channels.

/// Charged pion mass.
pub const M_PI: f64 = 0.13957039;

/// Charged kaon mass.
pub const M_K: f64 = 0.493677;

/// Eta mass.
pub const M_ETA: f64 = 0.547862;

/// Eta-prime mass.
pub const M_ETA_PRIME: f64 = 0.95778;

/// Pion mass squared.
pub const M_PI_SQ: f64 = M_PI * M_PI;

/// Two-pion threshold squared, (2 m_pi)^2.
pub const TWO_PI_SQ: f64 = 4.0 * M_PI_SQ;

/// Two-kaon threshold squared, (2 m_K)^2.
pub const TWO_K_SQ: f64 = 4.0 * M_K * M_K;

/// Two-eta threshold squared, (2 m_eta)^2.
pub const TWO_ETA_SQ: f64 = 4.0 * M_ETA * M_ETA;

/// Eta eta-prime threshold squared, (m_eta + m_eta')^2.
pub const ETA_ETAP_SUM_SQ: f64 = (M_ETA + M_ETA_PRIME) * (M_ETA + M_ETA_PRIME);

/// K pi sum squared, (m_K + m_pi)^2.
pub const K_PI_SUM_SQ: f64 = (M_K + M_PI) * (M_K + M_PI);

/// K pi difference squared, (m_K - m_pi)^2.
pub const K_PI_DIFF_SQ: f64 = (M_K - M_PI) * (M_K - M_PI);

/// K eta-prime sum squared, (m_K + m_eta')^2.
pub const K_ETAP_SUM_SQ: f64 = (M_K + M_ETA_PRIME) * (M_K + M_ETA_PRIME);

/// K eta-prime difference squared, (m_K - m_eta')^2.
pub const K_ETAP_DIFF_SQ: f64 = (M_K - M_ETA_PRIME) * (M_K - M_ETA_PRIME);

/// K three-pion difference squared, (m_K - 3 m_pi)^2.
pub const K_3PI_DIFF_SQ: f64 = (M_K - 3.0 * M_PI) * (M_K - 3.0 * M_PI);

/// Four-pion threshold squared, (4 m_pi)^2, used above s = 1 GeV^2.
pub const FOUR_PI_SQ: f64 = 16.0 * M_PI_SQ;

/// Matching point (GeV^2) between the K3pi power-law and unit phase space.
pub const K_3PI_MATCH_S: f64 = 1.44;

/// Absolute tolerance guarding pole, SVP and Adler-zero denominators,
/// and deciding propagator cache reuse.
pub const S_TOLERANCE: f64 = 1e-6;

/// Below this |s| every phase-space factor is defined to vanish.
pub const NEAR_ZERO_S: f64 = 1e-10;
