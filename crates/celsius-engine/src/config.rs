//! Simulation knobs, validation, and error types.
//!
//! [`ThermalConfig`] is a plain struct passed explicitly into
//! [`ThermalWorld`](crate::ThermalWorld). Derived constants (the cached
//! air relaxation factor) live in the [`DiffusionEngine`] built from it,
//! so changing the config means rebuilding that engine.

use std::error::Error;
use std::fmt;

use celsius_core::ThermalProperties;
use celsius_diffusion::DiffusionEngine;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected by [`ThermalConfig::validate()`].
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `heat_conductivity_factor` is NaN, infinite or negative.
    InvalidConductivityFactor {
        /// The invalid value.
        value: f32,
    },
    /// `air_heat_capacity` is NaN, infinite, zero or negative.
    InvalidAirCapacity {
        /// The invalid value.
        value: f32,
    },
    /// `air_heat_conductivity` is NaN, infinite or negative.
    InvalidAirConductivity {
        /// The invalid value.
        value: f32,
    },
    /// `convection_conductivity_effect` is NaN, infinite or negative.
    InvalidConvectionEffect {
        /// The invalid value.
        value: f32,
    },
    /// `heat_push_effect` is NaN, infinite or negative.
    InvalidHeatPushEffect {
        /// The invalid value.
        value: f32,
    },
    /// `ticks_per_second` is zero.
    ZeroTicksPerSecond,
    /// `ticks_per_update` is zero.
    ZeroTicksPerUpdate,
    /// The diffusion engine builder rejected the derived parameters.
    Diffusion {
        /// Builder message.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConductivityFactor { value } => {
                write!(f, "heat_conductivity_factor must be finite and >= 0, got {value}")
            }
            Self::InvalidAirCapacity { value } => {
                write!(f, "air_heat_capacity must be finite and positive, got {value}")
            }
            Self::InvalidAirConductivity { value } => {
                write!(f, "air_heat_conductivity must be finite and >= 0, got {value}")
            }
            Self::InvalidConvectionEffect { value } => {
                write!(f, "convection_conductivity_effect must be finite and >= 0, got {value}")
            }
            Self::InvalidHeatPushEffect { value } => {
                write!(f, "heat_push_effect must be finite and >= 0, got {value}")
            }
            Self::ZeroTicksPerSecond => write!(f, "ticks_per_second must be at least 1"),
            Self::ZeroTicksPerUpdate => write!(f, "ticks_per_update must be at least 1"),
            Self::Diffusion { reason } => write!(f, "diffusion engine: {reason}"),
        }
    }
}

impl Error for ConfigError {}

// ── ThermalConfig ──────────────────────────────────────────────────

/// Tunables for the thermal simulation.
#[derive(Clone, Debug, PartialEq)]
pub struct ThermalConfig {
    /// Multiplier on every conductivity. Default: 1.
    pub heat_conductivity_factor: f32,
    /// Heat capacity of an empty cell. Default: 1200.
    pub air_heat_capacity: f32,
    /// Heat conductivity of an empty cell. Default: 0.03.
    pub air_heat_conductivity: f32,
    /// Extra multiplier for air-to-air exchange only. Default: 10.
    pub convection_conductivity_effect: f32,
    /// Multiplier on pushed heat. Default: 5.
    pub heat_push_effect: f32,
    /// Host ticks per in-game second. Default: 60.
    pub ticks_per_second: u32,
    /// Host ticks between update passes. Default: 250.
    pub ticks_per_update: u32,
    /// Whether water freezes and ice melts. Default: true.
    pub freezing_and_melting: bool,
    /// Whether hot cells ignite flammable things, and extinguished fires
    /// cool their cell to the ignition point. Default: true.
    pub autoignition: bool,
    /// Whether to track terrain surface temperatures. Default: true.
    pub terrain_temperatures: bool,
}

impl Default for ThermalConfig {
    fn default() -> Self {
        Self {
            heat_conductivity_factor: 1.0,
            air_heat_capacity: 1200.0,
            air_heat_conductivity: 0.03,
            convection_conductivity_effect: 10.0,
            heat_push_effect: 5.0,
            ticks_per_second: 60,
            ticks_per_update: 250,
            freezing_and_melting: true,
            autoignition: true,
            terrain_temperatures: true,
        }
    }
}

impl ThermalConfig {
    /// Check every knob.
    pub fn validate(&self) -> Result<(), ConfigError> {
        fn non_negative(v: f32) -> bool {
            v.is_finite() && v >= 0.0
        }
        if !non_negative(self.heat_conductivity_factor) {
            return Err(ConfigError::InvalidConductivityFactor {
                value: self.heat_conductivity_factor,
            });
        }
        if !self.air_heat_capacity.is_finite() || self.air_heat_capacity <= 0.0 {
            return Err(ConfigError::InvalidAirCapacity {
                value: self.air_heat_capacity,
            });
        }
        if !non_negative(self.air_heat_conductivity) {
            return Err(ConfigError::InvalidAirConductivity {
                value: self.air_heat_conductivity,
            });
        }
        if !non_negative(self.convection_conductivity_effect) {
            return Err(ConfigError::InvalidConvectionEffect {
                value: self.convection_conductivity_effect,
            });
        }
        if !non_negative(self.heat_push_effect) {
            return Err(ConfigError::InvalidHeatPushEffect {
                value: self.heat_push_effect,
            });
        }
        if self.ticks_per_second == 0 {
            return Err(ConfigError::ZeroTicksPerSecond);
        }
        if self.ticks_per_update == 0 {
            return Err(ConfigError::ZeroTicksPerUpdate);
        }
        Ok(())
    }

    /// In-game seconds covered by one update pass.
    pub fn seconds_per_update(&self) -> f32 {
        self.ticks_per_update as f32 / self.ticks_per_second as f32
    }

    /// Thermal properties of an empty cell.
    pub fn air(&self) -> ThermalProperties {
        ThermalProperties::new(self.air_heat_capacity, self.air_heat_conductivity)
    }

    /// Validate, then build the diffusion engine with its cached air
    /// constants.
    pub fn diffusion_engine(&self) -> Result<DiffusionEngine, ConfigError> {
        self.validate()?;
        DiffusionEngine::builder()
            .conductivity_factor(self.heat_conductivity_factor)
            .air(self.air())
            .convection_effect(self.convection_conductivity_effect)
            .seconds_per_update(self.seconds_per_update())
            .build()
            .map_err(|reason| ConfigError::Diffusion { reason })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        let cfg = ThermalConfig::default();
        assert!(cfg.validate().is_ok());
        assert!((cfg.seconds_per_update() - 250.0 / 60.0).abs() < 1e-6);
        assert_eq!(cfg.air(), ThermalProperties::new(1200.0, 0.03));
    }

    fn assert_rejected(mutate: impl FnOnce(&mut ThermalConfig), expected: ConfigError) {
        let mut cfg = ThermalConfig::default();
        mutate(&mut cfg);
        assert_eq!(cfg.validate(), Err(expected.clone()));
        assert_eq!(cfg.diffusion_engine().unwrap_err(), expected);
    }

    #[test]
    fn validate_rejects_each_knob() {
        assert_rejected(
            |c| c.heat_conductivity_factor = -1.0,
            ConfigError::InvalidConductivityFactor { value: -1.0 },
        );
        assert_rejected(
            |c| c.air_heat_capacity = 0.0,
            ConfigError::InvalidAirCapacity { value: 0.0 },
        );
        assert_rejected(
            |c| c.air_heat_conductivity = -0.5,
            ConfigError::InvalidAirConductivity { value: -0.5 },
        );
        assert_rejected(
            |c| c.convection_conductivity_effect = f32::INFINITY,
            ConfigError::InvalidConvectionEffect {
                value: f32::INFINITY,
            },
        );
        assert_rejected(
            |c| c.heat_push_effect = -2.0,
            ConfigError::InvalidHeatPushEffect { value: -2.0 },
        );
        assert_rejected(|c| c.ticks_per_second = 0, ConfigError::ZeroTicksPerSecond);
        assert_rejected(|c| c.ticks_per_update = 0, ConfigError::ZeroTicksPerUpdate);
    }

    #[test]
    fn nan_capacity_is_rejected() {
        let cfg = ThermalConfig {
            air_heat_capacity: f32::NAN,
            ..ThermalConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidAirCapacity { .. })
        ));
    }

    #[test]
    fn engine_reflects_config() {
        let cfg = ThermalConfig {
            convection_conductivity_effect: 1.0,
            ticks_per_update: 60,
            ..ThermalConfig::default()
        };
        let engine = cfg.diffusion_engine().unwrap();
        assert!((engine.air_conductivity() - 0.03).abs() < 1e-7);
        assert_eq!(engine.seconds_per_update(), 1.0);
        assert_eq!(engine.air(), cfg.air());
    }

    #[test]
    fn error_display() {
        assert_eq!(
            ConfigError::ZeroTicksPerUpdate.to_string(),
            "ticks_per_update must be at least 1"
        );
    }
}
