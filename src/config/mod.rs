// src/config/mod.rs
//
// Tunables the design notes call out as "tunables, not contracts": the
// smoothness-cutoff fraction, sieve half-width, relation margin, and
// factor-base size heuristics. Loaded with the same three-tier precedence
// (defaults -> file -> environment) as the teacher repository's
// `GnfsConfig::load`.

use config::{Config, ConfigError, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SieveConfig {
    /// Fraction of `log2(2*|u|*sqrt(N))` a sieve slot must reach to be
    /// trial-divided (spec default 2/3).
    pub smoothness_multiplier: f64,

    /// Sieve half-width M: candidates range over `[-M, M]`.
    pub sieve_half_width: i64,

    /// Relations collected beyond the factor-base size before the linear
    /// algebra stage is asked for a dependency.
    pub relation_margin: usize,

    /// Factor-base tuning, scaled by digit count of N.
    pub factor_base: FactorBaseConfig,

    /// Upper bound (in prime value) for the pre-pass trial-division sweep.
    pub prepass_trial_division_bound: u64,

    /// Maximum Floyd-cycle iterations per Pollard's rho attempt in the
    /// pre-pass.
    pub prepass_pollard_rho_iterations: u64,

    /// Failed re-initializations (fresh base-prime subset) tolerated before
    /// `siqs::factor` gives up and returns `None`.
    pub max_reinitializations: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FactorBaseConfig {
    /// Baseline factor-base size for small N; scaled up by digit count at
    /// call sites the same way the teacher's `SIQSParameters::from_number_size`
    /// scales `smoothness_bound`.
    pub base_size: usize,

    /// Multiplier applied per decimal digit of N above the baseline.
    pub size_per_digit: f64,
}

impl Default for SieveConfig {
    fn default() -> Self {
        SieveConfig {
            smoothness_multiplier: 2.0 / 3.0,
            sieve_half_width: 15_000,
            relation_margin: 10,
            factor_base: FactorBaseConfig::default(),
            prepass_trial_division_bound: 1_000_000,
            prepass_pollard_rho_iterations: 1_000_000,
            max_reinitializations: 20,
        }
    }
}

impl Default for FactorBaseConfig {
    fn default() -> Self {
        FactorBaseConfig { base_size: 100, size_per_digit: 8.0 }
    }
}

impl SieveConfig {
    /// Factor-base target size for a given decimal digit count of N.
    pub fn factor_base_size_for_digits(&self, digits: usize) -> usize {
        let scaled = self.factor_base.base_size as f64 + self.factor_base.size_per_digit * digits as f64;
        scaled.round() as usize
    }

    /// Loads configuration with precedence: defaults -> `qsieve.toml`/
    /// `qsieve.yaml` in the working directory -> `QSIEVE_`-prefixed
    /// environment variables.
    pub fn load() -> Result<Self, ConfigError> {
        let mut builder = Self::builder_with_defaults()?;

        if Path::new("qsieve.toml").exists() {
            builder = builder.add_source(File::with_name("qsieve.toml"));
        } else if Path::new("qsieve.yaml").exists() {
            builder = builder.add_source(File::with_name("qsieve.yaml"));
        }

        builder = builder.add_source(Environment::with_prefix("QSIEVE").separator("_").try_parsing(true));

        let config = builder.build()?;
        config.try_deserialize()
    }

    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let mut builder = Self::builder_with_defaults()?;

        if path.as_ref().exists() {
            builder = builder.add_source(File::from(path.as_ref()));
        }

        builder = builder.add_source(Environment::with_prefix("QSIEVE").separator("_").try_parsing(true));

        let config = builder.build()?;
        config.try_deserialize()
    }

    fn builder_with_defaults() -> Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
        let defaults = SieveConfig::default();
        Config::builder()
            .set_default("smoothness_multiplier", defaults.smoothness_multiplier)?
            .set_default("sieve_half_width", defaults.sieve_half_width)?
            .set_default("relation_margin", defaults.relation_margin as i64)?
            .set_default("factor_base.base_size", defaults.factor_base.base_size as i64)?
            .set_default("factor_base.size_per_digit", defaults.factor_base.size_per_digit)?
            .set_default("prepass_trial_division_bound", defaults.prepass_trial_division_bound as i64)?
            .set_default("prepass_pollard_rho_iterations", defaults.prepass_pollard_rho_iterations as i64)?
            .set_default("max_reinitializations", defaults.max_reinitializations as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_matches_spec_defaults() {
        let config = SieveConfig::default();
        assert!((config.smoothness_multiplier - 2.0 / 3.0).abs() < 1e-12);
        assert_eq!(config.sieve_half_width, 15_000);
        assert_eq!(config.relation_margin, 10);
    }

    #[test]
    fn load_without_file_falls_back_to_defaults() {
        let config = SieveConfig::load().unwrap_or_else(|_| SieveConfig::default());
        assert_eq!(config.sieve_half_width, 15_000);
    }

    #[test]
    fn factor_base_size_scales_with_digits() {
        let config = SieveConfig::default();
        assert!(config.factor_base_size_for_digits(40) > config.factor_base_size_for_digits(20));
    }
}
