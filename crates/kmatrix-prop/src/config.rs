//! Line-based parser for K-matrix model configuration files.
//!
//! The file format is positional. Comment lines start with `#` and blank
//! lines are skipped; the remaining data lines are, in order:
//!
//! ```text
//! <type_1> ... <type_nChannels>           # channel phase-space codes, 1-based
//! <poleMass> <g_1> ... <g_nChannels>      # repeated nPoles times
//! <f_1> ... <f_nChannels>                 # background row coefficients
//! <m0Sq> <s0Scatt> <s0Prod> <sA> <sA0>    # Adler-zero constants
//! ```
//!
//! Pole masses are given in GeV and stored squared.

use std::fs;
use std::path::Path;

use kmatrix_core::{AdlerZero, ChannelType, ErrorInfo, KMatrixError, Pole};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// Fully parsed, immutable model configuration for one propagator row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Phase-space type of each channel, length `n_channels`.
    pub channels: Vec<ChannelType>,
    /// Bare poles with their per-channel couplings, length `n_poles`.
    pub poles: Vec<Pole>,
    /// Background (SVP) coefficients for the configured row only.
    pub background: Vec<f64>,
    /// Adler-zero and SVP constants.
    pub adler: AdlerZero,
}

impl ModelConfig {
    /// Reads and parses a configuration file.
    pub fn from_file(
        path: &Path,
        n_channels: usize,
        n_poles: usize,
    ) -> Result<Self, KMatrixError> {
        let text = fs::read_to_string(path).map_err(|err| {
            KMatrixError::Config(
                ErrorInfo::new("config-read", err.to_string())
                    .with_context("path", path.display().to_string()),
            )
        })?;
        Self::parse(&text, n_channels, n_poles)
    }

    /// Parses configuration text for a model with the given dimensions.
    pub fn parse(text: &str, n_channels: usize, n_poles: usize) -> Result<Self, KMatrixError> {
        let data_lines: Vec<(usize, Vec<&str>)> = text
            .lines()
            .enumerate()
            .map(|(idx, line)| (idx + 1, line.trim()))
            .filter(|(_, line)| !line.is_empty() && !line.starts_with('#'))
            .map(|(number, line)| (number, line.split_whitespace().collect()))
            .collect();

        let expected_lines = 1 + n_poles + 2;
        if data_lines.len() < expected_lines {
            return Err(KMatrixError::Config(
                ErrorInfo::new(
                    "config-missing-lines",
                    format!(
                        "expected {} data lines but found {}",
                        expected_lines,
                        data_lines.len()
                    ),
                )
                .with_hint("channels, poles, background and Adler-zero lines are all required"),
            ));
        }
        if data_lines.len() > expected_lines {
            warn!(
                extra = data_lines.len() - expected_lines,
                "ignoring trailing configuration lines"
            );
        }

        let channels = parse_channels(&data_lines[0], n_channels)?;
        let mut poles = Vec::with_capacity(n_poles);
        for (pole_index, line) in data_lines[1..1 + n_poles].iter().enumerate() {
            poles.push(parse_pole(line, pole_index, n_channels)?);
        }
        let background = parse_background(&data_lines[1 + n_poles], n_channels)?;
        let adler = parse_adler(&data_lines[2 + n_poles])?;

        Ok(Self {
            channels,
            poles,
            background,
            adler,
        })
    }

    /// Number of channels in the model.
    pub fn n_channels(&self) -> usize {
        self.channels.len()
    }

    /// Number of poles in the model.
    pub fn n_poles(&self) -> usize {
        self.poles.len()
    }
}

fn parse_channels(
    (number, tokens): &(usize, Vec<&str>),
    n_channels: usize,
) -> Result<Vec<ChannelType>, KMatrixError> {
    if tokens.len() != n_channels {
        return Err(field_count_error(
            "config-channel-count",
            "channel type",
            *number,
            n_channels,
            tokens.len(),
        ));
    }

    let mut channels = Vec::with_capacity(n_channels);
    for token in tokens {
        let code: u32 = token.parse().map_err(|_| {
            KMatrixError::Config(
                ErrorInfo::new(
                    "config-channel-code",
                    format!("invalid channel code `{token}`"),
                )
                .with_context("line", number.to_string()),
            )
        })?;
        let channel = ChannelType::from_code(code).ok_or_else(|| {
            KMatrixError::Config(
                ErrorInfo::new(
                    "config-channel-code",
                    format!("channel code {code} is outside the valid range 1..=8"),
                )
                .with_context("line", number.to_string()),
            )
        })?;
        info!(code, ?channel, "accepted phase-space channel");
        channels.push(channel);
    }
    Ok(channels)
}

fn parse_pole(
    (number, tokens): &(usize, Vec<&str>),
    pole_index: usize,
    n_channels: usize,
) -> Result<Pole, KMatrixError> {
    if tokens.len() != n_channels + 1 {
        return Err(field_count_error(
            "config-pole-count",
            "pole",
            *number,
            n_channels + 1,
            tokens.len(),
        ));
    }

    let mass = parse_number(tokens[0], *number)?;
    info!(pole = pole_index, mass, "accepted bare pole mass (GeV)");

    let mut couplings = Vec::with_capacity(n_channels);
    for (channel, token) in tokens[1..].iter().copied().enumerate() {
        let coupling = parse_number(token, *number)?;
        info!(pole = pole_index, channel, coupling, "accepted coupling constant");
        couplings.push(coupling);
    }

    Ok(Pole {
        mass_sq: mass * mass,
        couplings,
    })
}

fn parse_background(
    (number, tokens): &(usize, Vec<&str>),
    n_channels: usize,
) -> Result<Vec<f64>, KMatrixError> {
    if tokens.len() != n_channels {
        return Err(field_count_error(
            "config-background-count",
            "background",
            *number,
            n_channels,
            tokens.len(),
        ));
    }

    let mut background = Vec::with_capacity(n_channels);
    for (channel, token) in tokens.iter().copied().enumerate() {
        let coefficient = parse_number(token, *number)?;
        info!(channel, coefficient, "accepted background coefficient");
        background.push(coefficient);
    }
    Ok(background)
}

fn parse_adler((number, tokens): &(usize, Vec<&str>)) -> Result<AdlerZero, KMatrixError> {
    if tokens.len() != 5 {
        return Err(field_count_error(
            "config-adler-count",
            "Adler-zero constants",
            *number,
            5,
            tokens.len(),
        ));
    }

    let mut values = [0.0; 5];
    for (slot, token) in values.iter_mut().zip(tokens.iter().copied()) {
        *slot = parse_number(token, *number)?;
    }
    let adler = AdlerZero {
        m0_sq: values[0],
        s0_scatt: values[1],
        s0_prod: values[2],
        s_a: values[3],
        s_a0: values[4],
    };
    info!(
        m0_sq = adler.m0_sq,
        s0_scatt = adler.s0_scatt,
        s0_prod = adler.s0_prod,
        s_a = adler.s_a,
        s_a0 = adler.s_a0,
        "accepted Adler-zero constants"
    );
    Ok(adler)
}

fn parse_number(token: &str, line: usize) -> Result<f64, KMatrixError> {
    token.parse().map_err(|_| {
        KMatrixError::Config(
            ErrorInfo::new("config-number", format!("invalid number `{token}`"))
                .with_context("line", line.to_string()),
        )
    })
}

fn field_count_error(
    code: &str,
    what: &str,
    line: usize,
    expected: usize,
    found: usize,
) -> KMatrixError {
    KMatrixError::Config(
        ErrorInfo::new(
            code,
            format!("expected {expected} values on the {what} line but found {found}"),
        )
        .with_context("line", line.to_string()),
    )
}
