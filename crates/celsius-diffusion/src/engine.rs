//! Single-sided and mutual heat exchange with a capped relaxation factor.
//!
//! Both exchange patterns move temperatures toward an equilibrium by a
//! fraction `r` of the gap, where
//!
//! ```text
//! r = min(1 - (1 - k / c)^dt, 0.25)
//! ```
//!
//! for effective conductivity `k`, heat capacity `c` and update period
//! `dt` in seconds. The cap keeps every update stable however large
//! `k * dt / c` grows: a side never crosses the equilibrium.
//!
//! Air-to-air exchange is by far the most common pair, so its
//! conductivity (including the convection boost) and relaxation factor
//! are computed once when the engine is built.

use celsius_core::ThermalProperties;

/// Temperature gaps smaller than this produce no exchange.
pub const TEMPERATURE_CHANGE_PRECISION: f32 = 0.01;

/// Upper bound on the fraction of a gap closed in one update.
pub const MAX_RELAXATION: f32 = 0.25;

/// Pure heat-exchange calculator.
///
/// Immutable once built. Changing any knob means building a new engine,
/// which recomputes the cached air constants.
///
/// # Examples
///
/// ```
/// use celsius_core::ThermalProperties;
/// use celsius_diffusion::DiffusionEngine;
///
/// let engine = DiffusionEngine::builder()
///     .air(ThermalProperties::new(1200.0, 0.03))
///     .seconds_per_update(250.0 / 60.0)
///     .build()
///     .unwrap();
///
/// let air = engine.air();
/// let (hot, cold) = engine.diffuse_mutual(30.0, air, 10.0, air);
/// assert!(hot < 0.0 && cold > 0.0);
/// assert_eq!(engine.diffuse_mutual(20.0, air, 20.005, air), (0.0, 0.0));
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct DiffusionEngine {
    conductivity_factor: f32,
    air: ThermalProperties,
    convection_effect: f32,
    seconds_per_update: f32,
    air_conductivity: f32,
    air_relaxation: f32,
}

/// Builder for [`DiffusionEngine`].
///
/// Defaults: conductivity factor 1, air `(1200, 0.03)`, convection
/// effect 10, update period 250 ticks at 60 ticks per second.
#[derive(Clone, Debug)]
pub struct DiffusionEngineBuilder {
    conductivity_factor: f32,
    air: ThermalProperties,
    convection_effect: f32,
    seconds_per_update: f32,
}

impl DiffusionEngine {
    /// Create a builder with default air properties and update period.
    pub fn builder() -> DiffusionEngineBuilder {
        DiffusionEngineBuilder {
            conductivity_factor: 1.0,
            air: ThermalProperties::new(1200.0, 0.03),
            convection_effect: 10.0,
            seconds_per_update: 250.0 / 60.0,
        }
    }

    /// Thermal properties of an empty (air) cell.
    pub fn air(&self) -> ThermalProperties {
        self.air
    }

    /// Global multiplier applied to every conductivity.
    pub fn conductivity_factor(&self) -> f32 {
        self.conductivity_factor
    }

    /// Update period in seconds.
    pub fn seconds_per_update(&self) -> f32 {
        self.seconds_per_update
    }

    /// Effective air-to-air conductivity, convection included.
    pub fn air_conductivity(&self) -> f32 {
        self.air_conductivity
    }

    /// Cached relaxation factor for air-to-air exchange.
    pub fn air_relaxation(&self) -> f32 {
        self.air_relaxation
    }

    /// Whether `props` are exactly the air defaults.
    pub fn is_air(&self, props: ThermalProperties) -> bool {
        props == self.air
    }

    /// Relaxation factor for an effective `conductivity` against
    /// `capacity` over one update period, always in `[0, 0.25]`.
    ///
    /// `capacity` must be positive.
    pub fn relaxation_factor(&self, conductivity: f32, capacity: f32) -> f32 {
        relaxation(conductivity, capacity, self.seconds_per_update)
    }

    /// Temperature change of a side exchanging with a fixed reservoir.
    ///
    /// The reservoir (typically the outdoors) is not affected. Returns
    /// zero when the gap is below [`TEMPERATURE_CHANGE_PRECISION`].
    pub fn diffuse_single(&self, old_temp: f32, neighbour_temp: f32, props: ThermalProperties) -> f32 {
        if (old_temp - neighbour_temp).abs() < TEMPERATURE_CHANGE_PRECISION {
            return 0.0;
        }
        let final_temp = (old_temp + neighbour_temp) / 2.0;
        let r = if self.is_air(props) {
            self.air_relaxation
        } else {
            self.relaxation_factor(
                props.heat_conductivity * self.conductivity_factor,
                props.heat_capacity,
            )
        };
        r * (final_temp - old_temp)
    }

    /// Temperature changes of two sides exchanging heat with each other.
    ///
    /// Both move toward the capacity-weighted equilibrium. The combined
    /// conductivity is the geometric mean of the two sides' times the
    /// global factor, or the cached convective air conductivity when both
    /// sides are air. Each side's relaxation factor is computed against
    /// its own capacity and the pair exchanges at the smaller of the two,
    /// so the energy one side gains is exactly what the other loses:
    /// `cap1 * delta1 + cap2 * delta2 == 0` up to rounding.
    ///
    /// Returns `(0, 0)` when the gap is below
    /// [`TEMPERATURE_CHANGE_PRECISION`].
    pub fn diffuse_mutual(
        &self,
        temp1: f32,
        props1: ThermalProperties,
        temp2: f32,
        props2: ThermalProperties,
    ) -> (f32, f32) {
        if (temp1 - temp2).abs() < TEMPERATURE_CHANGE_PRECISION {
            return (0.0, 0.0);
        }
        let (c1, c2) = (props1.heat_capacity, props2.heat_capacity);
        let r = if self.is_air(props1) && self.is_air(props2) {
            self.air_relaxation
        } else {
            let k = (props1.heat_conductivity * props2.heat_conductivity).sqrt()
                * self.conductivity_factor;
            self.relaxation_factor(k, c1)
                .min(self.relaxation_factor(k, c2))
        };
        // Energy moving from side 2 to side 1. Dividing one quantity by
        // each capacity keeps the exchange conservative.
        let energy = r * (c1 * c2 / (c1 + c2)) * (temp2 - temp1);
        (energy / c1, -energy / c2)
    }
}

impl DiffusionEngineBuilder {
    /// Global multiplier applied to every conductivity. Must be `>= 0`.
    pub fn conductivity_factor(mut self, factor: f32) -> Self {
        self.conductivity_factor = factor;
        self
    }

    /// Properties of empty cells.
    pub fn air(mut self, air: ThermalProperties) -> Self {
        self.air = air;
        self
    }

    /// Extra multiplier on air-to-air conductivity. Must be `>= 0`.
    pub fn convection_effect(mut self, effect: f32) -> Self {
        self.convection_effect = effect;
        self
    }

    /// Update period in seconds. Must be positive.
    pub fn seconds_per_update(mut self, seconds: f32) -> Self {
        self.seconds_per_update = seconds;
        self
    }

    /// Validate the parameters and compute the cached air constants.
    pub fn build(self) -> Result<DiffusionEngine, String> {
        if !self.conductivity_factor.is_finite() || self.conductivity_factor < 0.0 {
            return Err(format!(
                "conductivity_factor must be finite and >= 0, got {}",
                self.conductivity_factor
            ));
        }
        if !self.air.is_valid() {
            return Err(format!(
                "air properties must have finite positive capacity and non-negative conductivity, got {:?}",
                self.air
            ));
        }
        if !self.convection_effect.is_finite() || self.convection_effect < 0.0 {
            return Err(format!(
                "convection_effect must be finite and >= 0, got {}",
                self.convection_effect
            ));
        }
        if !self.seconds_per_update.is_finite() || self.seconds_per_update <= 0.0 {
            return Err(format!(
                "seconds_per_update must be finite and positive, got {}",
                self.seconds_per_update
            ));
        }

        let air_conductivity =
            self.air.heat_conductivity * self.conductivity_factor * self.convection_effect;
        let air_relaxation = relaxation(
            air_conductivity,
            self.air.heat_capacity,
            self.seconds_per_update,
        );
        log::debug!(
            "air conductivity {:.2}, air relaxation {:.1}%",
            air_conductivity,
            air_relaxation * 100.0
        );

        Ok(DiffusionEngine {
            conductivity_factor: self.conductivity_factor,
            air: self.air,
            convection_effect: self.convection_effect,
            seconds_per_update: self.seconds_per_update,
            air_conductivity,
            air_relaxation,
        })
    }
}

/// `min(1 - (1 - k/c)^dt, 0.25)`, with the base floored at zero so that
/// `k > c` saturates at the cap instead of producing NaN.
fn relaxation(conductivity: f32, capacity: f32, dt: f32) -> f32 {
    let base = (1.0 - conductivity / capacity).max(0.0);
    let r = 1.0 - base.powf(dt);
    if r.is_nan() {
        return MAX_RELAXATION;
    }
    r.clamp(0.0, MAX_RELAXATION)
}
