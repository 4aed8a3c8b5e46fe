//! Cached propagator solve and the row-wise query interface.
//!
//! The propagator is `(I - iK rho)^-1`, found for each requested `s` by
//! splitting the complex system into real blocks: with
//! `A = I + K Im(rho)` and `B = -K Re(rho)`, the real and imaginary
//! parts `C` and `D` of the propagator satisfy `(A + iB)(C + iD) = I`,
//! giving `C = (A + B A^-1 B)^-1` and `D = -A^-1 B C`. The result is
//! cached against `s` so repeated per-event evaluations at the same
//! kinematic point skip the matrix inversions.

use std::path::Path;

use kmatrix_core::constants::S_TOLERANCE;
use kmatrix_core::{ErrorInfo, KMatrixError};
use nalgebra::DMatrix;
use num_complex::Complex64;
use tracing::{debug, info};

use crate::config::ModelConfig;
use crate::{phase_space, scattering};

/// Cached numerical state of the most recent solve.
#[derive(Debug, Clone)]
struct PropagatorState {
    last_s: Option<f64>,
    pole_denominators: Vec<f64>,
    scattering_svp: f64,
    production_svp: f64,
    adler_zero_factor: f64,
    re_prop: DMatrix<f64>,
    neg_im_prop: DMatrix<f64>,
    recompute_count: u64,
}

impl PropagatorState {
    fn empty(n_channels: usize) -> Self {
        Self {
            last_s: None,
            pole_denominators: Vec::new(),
            scattering_svp: 0.0,
            production_svp: 0.0,
            adler_zero_factor: 0.0,
            re_prop: DMatrix::zeros(n_channels, n_channels),
            neg_im_prop: DMatrix::zeros(n_channels, n_channels),
            recompute_count: 0,
        }
    }
}

/// Multi-channel K-matrix propagator for one configured row.
///
/// An instance represents a single row of the propagator matrix (the
/// channel the production amplitude couples to). Queries against an
/// unconfigured instance, or before any successful [`solve`], return
/// zero values rather than failing, so a likelihood evaluation keeps
/// running on defined output.
///
/// [`solve`]: KMatrixPropagator::solve
#[derive(Debug, Clone)]
pub struct KMatrixPropagator {
    name: String,
    row: usize,
    n_channels: usize,
    n_poles: usize,
    config: Option<ModelConfig>,
    state: PropagatorState,
}

impl KMatrixPropagator {
    /// Creates an unconfigured propagator for the given dimensions.
    ///
    /// `row` is the 0-based channel index this instance represents and
    /// must lie in `[0, n_channels)`.
    pub fn new(
        name: impl Into<String>,
        row: usize,
        n_channels: usize,
        n_poles: usize,
    ) -> Result<Self, KMatrixError> {
        if n_channels == 0 || n_poles == 0 {
            return Err(KMatrixError::Model(
                ErrorInfo::new("model-empty", "a model needs at least one channel and one pole")
                    .with_context("n_channels", n_channels.to_string())
                    .with_context("n_poles", n_poles.to_string()),
            ));
        }
        if row >= n_channels {
            return Err(KMatrixError::Model(
                ErrorInfo::new(
                    "model-row",
                    format!("row index {row} is outside the {n_channels} channels"),
                )
                .with_hint("the row must name one of the model's channels"),
            ));
        }
        Ok(Self {
            name: name.into(),
            row,
            n_channels,
            n_poles,
            config: None,
            state: PropagatorState::empty(n_channels),
        })
    }

    /// Creates a propagator and loads its configuration file.
    pub fn from_file(
        name: impl Into<String>,
        path: &Path,
        row: usize,
        n_channels: usize,
        n_poles: usize,
    ) -> Result<Self, KMatrixError> {
        let mut propagator = Self::new(name, row, n_channels, n_poles)?;
        propagator.load(path)?;
        Ok(propagator)
    }

    /// Loads (or reloads) the model configuration from a file.
    ///
    /// On any failure the instance is left unconfigured and all queries
    /// return zero values until a subsequent load succeeds.
    pub fn load(&mut self, path: &Path) -> Result<(), KMatrixError> {
        self.config = None;
        self.state = PropagatorState::empty(self.n_channels);
        let config = ModelConfig::from_file(path, self.n_channels, self.n_poles)?;
        self.configure(config)
    }

    /// Installs an already-parsed configuration, resetting cached state.
    pub fn configure(&mut self, config: ModelConfig) -> Result<(), KMatrixError> {
        self.config = None;
        self.state = PropagatorState::empty(self.n_channels);
        if config.n_channels() != self.n_channels || config.n_poles() != self.n_poles {
            return Err(KMatrixError::Model(
                ErrorInfo::new("model-shape", "configuration does not match the declared model")
                    .with_context("expected_channels", self.n_channels.to_string())
                    .with_context("found_channels", config.n_channels().to_string())
                    .with_context("expected_poles", self.n_poles.to_string())
                    .with_context("found_poles", config.n_poles().to_string()),
            ));
        }
        info!(
            name = %self.name,
            n_channels = self.n_channels,
            n_poles = self.n_poles,
            row = self.row,
            "configured K-matrix propagator"
        );
        self.config = Some(config);
        Ok(())
    }

    /// Whether a configuration has been installed successfully.
    pub fn is_configured(&self) -> bool {
        self.config.is_some()
    }

    /// Number of channels in the model.
    pub fn n_channels(&self) -> usize {
        self.n_channels
    }

    /// Number of poles in the model.
    pub fn n_poles(&self) -> usize {
        self.n_poles
    }

    /// The 0-based channel row this instance represents.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Number of full recomputations performed so far; cache hits leave
    /// this unchanged.
    pub fn recompute_count(&self) -> u64 {
        self.state.recompute_count
    }

    /// Updates the cached propagator for the given `s`.
    ///
    /// A no-op when `s` is within the cache tolerance of the previous
    /// solve, and a silent no-op when the instance is unconfigured. A
    /// singular block matrix surfaces as a numerics error with the
    /// cached state left untouched.
    pub fn solve(&mut self, s: f64) -> Result<(), KMatrixError> {
        let Some(config) = &self.config else {
            return Ok(());
        };
        if let Some(last_s) = self.state.last_s {
            if (s - last_s).abs() < S_TOLERANCE {
                return Ok(());
            }
        }

        let pole_denominators = scattering::pole_denominators(&config.poles, s);
        let adler_zero_factor = scattering::adler_zero_factor(&config.adler, s);
        let scattering_svp = scattering::svp_term(s, config.adler.s0_scatt, config.adler.m0_sq);
        let production_svp = scattering::svp_term(s, config.adler.s0_prod, config.adler.m0_sq);

        let k = scattering::scattering_matrix(
            config,
            self.row,
            s,
            &pole_denominators,
            scattering_svp,
            adler_zero_factor,
        );
        let (re_rho, im_rho) = phase_space::rho_matrices(&config.channels, s);

        let identity = DMatrix::<f64>::identity(self.n_channels, self.n_channels);
        let a = &identity + &k * im_rho;
        let b = -(&k * re_rho);

        let inv_a = a
            .clone()
            .try_inverse()
            .ok_or_else(|| singular("propagator-singular-a", s))?;
        let re_prop = (&a + &b * &inv_a * &b)
            .try_inverse()
            .ok_or_else(|| singular("propagator-singular-c", s))?;
        let neg_im_prop = &inv_a * &b * &re_prop;

        debug!(name = %self.name, s, "recomputed K-matrix propagator");

        self.state.pole_denominators = pole_denominators;
        self.state.scattering_svp = scattering_svp;
        self.state.production_svp = production_svp;
        self.state.adler_zero_factor = adler_zero_factor;
        self.state.re_prop = re_prop;
        self.state.neg_im_prop = neg_im_prop;
        self.state.last_s = Some(s);
        self.state.recompute_count += 1;
        Ok(())
    }

    /// Complex propagator entry `(row, channel)` from the cached state.
    pub fn propagator_term(&self, channel: usize) -> Complex64 {
        Complex64::new(
            self.real_propagator_term(channel),
            self.imag_propagator_term(channel),
        )
    }

    /// Real part of the cached propagator entry `(row, channel)`.
    pub fn real_propagator_term(&self, channel: usize) -> f64 {
        if self.config.is_none() || channel >= self.n_channels {
            return 0.0;
        }
        self.state.re_prop[(self.row, channel)]
    }

    /// Imaginary part of the cached propagator entry `(row, channel)`.
    pub fn imag_propagator_term(&self, channel: usize) -> f64 {
        if self.config.is_none() || channel >= self.n_channels {
            return 0.0;
        }
        -self.state.neg_im_prop[(self.row, channel)]
    }

    /// Cached `1/(m_pole^2 - s)` term for one pole (0 at a guarded pole,
    /// or before any solve).
    pub fn pole_denominator_term(&self, pole: usize) -> f64 {
        self.state.pole_denominators.get(pole).copied().unwrap_or(0.0)
    }

    /// Static coupling constant `g` of a pole to a channel.
    pub fn coupling_constant(&self, pole: usize, channel: usize) -> f64 {
        self.config
            .as_ref()
            .and_then(|config| config.poles.get(pole))
            .and_then(|p| p.couplings.get(channel))
            .copied()
            .unwrap_or(0.0)
    }

    /// Background (SVP) coefficient `f_ij`. Only the configured row is
    /// stored; every other row's coefficient is zero.
    pub fn scattering_constant(&self, channel_row: usize, channel: usize) -> f64 {
        if channel_row != self.row {
            return 0.0;
        }
        self.config
            .as_ref()
            .and_then(|config| config.background.get(channel))
            .copied()
            .unwrap_or(0.0)
    }

    /// Cached production SVP term `(m0^2 - s0Prod)/(s - s0Prod)`.
    pub fn production_svp_term(&self) -> f64 {
        self.state.production_svp
    }

    /// Cached scattering SVP term `(m0^2 - s0Scatt)/(s - s0Scatt)`.
    pub fn scattering_svp_term(&self) -> f64 {
        self.state.scattering_svp
    }

    /// Cached Adler-zero suppression factor.
    pub fn adler_zero_term(&self) -> f64 {
        self.state.adler_zero_factor
    }

    /// Real part of the cached propagator matrix (zero before any solve).
    pub fn real_propagator_matrix(&self) -> &DMatrix<f64> {
        &self.state.re_prop
    }

    /// Negative imaginary part of the cached propagator matrix.
    pub fn neg_imag_propagator_matrix(&self) -> &DMatrix<f64> {
        &self.state.neg_im_prop
    }

    /// Phase-space factor of one channel at the given `s`, bypassing the
    /// cache (the per-channel formula is cheap).
    pub fn phase_space_term(&self, s: f64, channel: usize) -> Complex64 {
        match &self.config {
            Some(config) if channel < self.n_channels => {
                phase_space::rho(config.channels[channel], s)
            }
            _ => Complex64::new(0.0, 0.0),
        }
    }

    /// Scattering K-matrix at the given `s`, built from the current
    /// configuration without touching the cache.
    pub fn scattering_k_matrix(&self, s: f64) -> Option<DMatrix<f64>> {
        let config = self.config.as_ref()?;
        let denominators = scattering::pole_denominators(&config.poles, s);
        let adler_factor = scattering::adler_zero_factor(&config.adler, s);
        let svp = scattering::svp_term(s, config.adler.s0_scatt, config.adler.m0_sq);
        Some(scattering::scattering_matrix(
            config,
            self.row,
            s,
            &denominators,
            svp,
            adler_factor,
        ))
    }

    /// Row entry of the Lorentz-invariant `T_hat = (I - iK rho)^-1 K`.
    pub fn t_hat(&mut self, s: f64, channel: usize) -> Result<Complex64, KMatrixError> {
        match self.t_hat_matrices(s)? {
            Some((re, im)) if channel < self.n_channels => {
                Ok(Complex64::new(re[(self.row, channel)], im[(self.row, channel)]))
            }
            _ => Ok(Complex64::new(0.0, 0.0)),
        }
    }

    /// Row entry of the unitary transition matrix
    /// `T = sqrt(rho)^* T_hat sqrt(rho)`.
    ///
    /// Not needed for building amplitudes, but useful for inspecting the
    /// energy dependence of the transition strength.
    pub fn transition_amplitude(
        &mut self,
        s: f64,
        channel: usize,
    ) -> Result<Complex64, KMatrixError> {
        let Some((re_t_hat, im_t_hat)) = self.t_hat_matrices(s)? else {
            return Ok(Complex64::new(0.0, 0.0));
        };
        if channel >= self.n_channels {
            return Ok(Complex64::new(0.0, 0.0));
        }
        let Some(config) = &self.config else {
            return Ok(Complex64::new(0.0, 0.0));
        };
        // sqrt(rho) is diagonal, so the matrix sandwich reduces to a
        // per-entry product with the first factor conjugated.
        let sqrt_rho = phase_space::sqrt_rho_diagonal(&config.channels, s);
        let t_hat = Complex64::new(
            re_t_hat[(self.row, channel)],
            im_t_hat[(self.row, channel)],
        );
        Ok(sqrt_rho[self.row].conj() * t_hat * sqrt_rho[channel])
    }

    /// Solves for `s` and returns the real and imaginary parts of the
    /// full `T_hat` matrix, or `None` when unconfigured.
    fn t_hat_matrices(
        &mut self,
        s: f64,
    ) -> Result<Option<(DMatrix<f64>, DMatrix<f64>)>, KMatrixError> {
        self.solve(s)?;
        let Some(config) = &self.config else {
            return Ok(None);
        };
        let k = scattering::scattering_matrix(
            config,
            self.row,
            s,
            &self.state.pole_denominators,
            self.state.scattering_svp,
            self.state.adler_zero_factor,
        );
        let re = &self.state.re_prop * &k;
        let im = -(&self.state.neg_im_prop * &k);
        Ok(Some((re, im)))
    }
}

fn singular(code: &str, s: f64) -> KMatrixError {
    KMatrixError::Numerics(
        ErrorInfo::new(code, "propagator block matrix is singular")
            .with_context("s", format!("{s}")),
    )
}
