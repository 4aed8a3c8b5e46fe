use serde::{Deserialize, Serialize};

/// Phase-space behaviour of one scattering channel.
///
/// The wire codes are the stable 1-based integers used in model
/// configuration files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelType {
    /// Two-pion channel.
    PiPi,
    /// Two-kaon channel.
    KK,
    /// Four-pion (multi-body) channel.
    FourPi,
    /// Two-eta channel.
    EtaEta,
    /// Eta eta-prime channel.
    EtaEtaPrime,
    /// K pi channel.
    KPi,
    /// K eta-prime channel.
    KEtaPrime,
    /// K three-pion (multi-meson) channel.
    KThreePi,
}

impl ChannelType {
    /// All channel types in wire-code order.
    pub const ALL: [ChannelType; 8] = [
        ChannelType::PiPi,
        ChannelType::KK,
        ChannelType::FourPi,
        ChannelType::EtaEta,
        ChannelType::EtaEtaPrime,
        ChannelType::KPi,
        ChannelType::KEtaPrime,
        ChannelType::KThreePi,
    ];

    /// Decodes a 1-based wire code; `None` for anything outside 1..=8.
    pub fn from_code(code: u32) -> Option<Self> {
        match code {
            1 => Some(ChannelType::PiPi),
            2 => Some(ChannelType::KK),
            3 => Some(ChannelType::FourPi),
            4 => Some(ChannelType::EtaEta),
            5 => Some(ChannelType::EtaEtaPrime),
            6 => Some(ChannelType::KPi),
            7 => Some(ChannelType::KEtaPrime),
            8 => Some(ChannelType::KThreePi),
            _ => None,
        }
    }

    /// Returns the stable 1-based wire code for this channel type.
    pub fn code(&self) -> u32 {
        match self {
            ChannelType::PiPi => 1,
            ChannelType::KK => 2,
            ChannelType::FourPi => 3,
            ChannelType::EtaEta => 4,
            ChannelType::EtaEtaPrime => 5,
            ChannelType::KPi => 6,
            ChannelType::KEtaPrime => 7,
            ChannelType::KThreePi => 8,
        }
    }
}

/// One bare resonance pole of the K-matrix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pole {
    /// Bare pole mass squared (GeV^2).
    pub mass_sq: f64,
    /// Coupling constant g_i to each channel, length `n_channels`.
    pub couplings: Vec<f64>,
}

/// Adler-zero and slowly-varying-part constants, global to one model.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdlerZero {
    /// Mass-scale constant m0^2 entering the SVP numerators.
    pub m0_sq: f64,
    /// Reference scale s0 of the scattering SVP.
    pub s0_scatt: f64,
    /// Reference scale s0 of the production SVP.
    pub s0_prod: f64,
    /// Adler-zero position scale s_A (multiplies m_pi^2 / 2).
    pub s_a: f64,
    /// Adler-zero denominator constant s_A0.
    pub s_a0: f64,
}
