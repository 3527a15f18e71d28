//! Thermal properties of a cell.

/// A `(heat capacity, heat conductivity)` pair.
///
/// Resolved per cell on demand, never stored per cell. Capacity must be
/// strictly positive; conductivity must be non-negative.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ThermalProperties {
    /// Energy needed to change the temperature by one degree.
    pub heat_capacity: f32,
    /// How readily heat flows to and from this cell.
    pub heat_conductivity: f32,
}

impl ThermalProperties {
    /// Create a property pair.
    pub const fn new(heat_capacity: f32, heat_conductivity: f32) -> Self {
        Self {
            heat_capacity,
            heat_conductivity,
        }
    }

    /// Whether the pair can take part in diffusion.
    pub fn is_valid(&self) -> bool {
        self.heat_capacity.is_finite()
            && self.heat_capacity > 0.0
            && self.heat_conductivity.is_finite()
            && self.heat_conductivity >= 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validity() {
        assert!(ThermalProperties::new(1200.0, 0.03).is_valid());
        assert!(ThermalProperties::new(1.0, 0.0).is_valid());
        assert!(!ThermalProperties::new(0.0, 0.03).is_valid());
        assert!(!ThermalProperties::new(-5.0, 0.03).is_valid());
        assert!(!ThermalProperties::new(f32::NAN, 0.03).is_valid());
        assert!(!ThermalProperties::new(10.0, -1.0).is_valid());
    }
}
