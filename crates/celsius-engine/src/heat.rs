//! Heat injection, temperature control and fire helpers.

use celsius_core::Thing;
use celsius_diffusion::TEMPERATURE_CHANGE_PRECISION;

/// Energy a ritual fire pushes per second, per unit of fire size.
pub const HEAT_PUSH_PER_FIRE_SIZE: f32 = 21.0;

/// How far outside a safe range a temperature stays merely unpleasant.
pub const DANGER_MARGIN: f32 = 80.0;

/// Temperature change from pushing `energy` into a cell of `capacity`.
///
/// `Δt = energy × ticks_per_second × push_effect / capacity`. Not capped:
/// a large push into a low-capacity cell moves it arbitrarily far.
pub fn heat_push_delta(energy: f32, ticks_per_second: u32, push_effect: f32, capacity: f32) -> f32 {
    energy * ticks_per_second as f32 * push_effect / capacity
}

/// Energy a heater or cooler should push this tick.
///
/// A heater (`energy_limit > 0`) works only while the room is colder
/// than `target` by more than the precision; a cooler only while it is
/// warmer. Returns `energy_limit` when working, otherwise 0.
pub fn control_energy(energy_limit: f32, target: f32, room_temperature: f32) -> f32 {
    let working = if energy_limit > 0.0 {
        room_temperature < target - TEMPERATURE_CHANGE_PRECISION
    } else {
        room_temperature > target + TEMPERATURE_CHANGE_PRECISION
    };
    if working {
        energy_limit
    } else {
        0.0
    }
}

/// Energy a fire of `fire_size` pushes each second.
pub fn fire_heat_push(fire_size: f32) -> f32 {
    fire_size * HEAT_PUSH_PER_FIRE_SIZE
}

/// Lowest ignition temperature among `things`, if any is flammable.
pub fn ignition_temperature(things: &[Thing]) -> Option<f32> {
    things
        .iter()
        .filter_map(|t| t.ignition_temperature)
        .min_by(f32::total_cmp)
}

/// Whether a cell at `temperature` holding `things` should catch fire.
pub fn should_ignite(temperature: f32, things: &[Thing]) -> bool {
    ignition_temperature(things).is_some_and(|ignition| temperature >= ignition)
}

/// How dangerous a temperature is for someone with a safe range.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Danger {
    /// Inside the safe range.
    None,
    /// Outside it, but within [`DANGER_MARGIN`].
    Some,
    /// Far outside the safe range.
    Deadly,
}

/// Classify `temperature` against the inclusive range `[safe_min, safe_max]`.
pub fn classify_danger(temperature: f32, safe_min: f32, safe_max: f32) -> Danger {
    if (safe_min..=safe_max).contains(&temperature) {
        Danger::None
    } else if (safe_min - DANGER_MARGIN..=safe_max + DANGER_MARGIN).contains(&temperature) {
        Danger::Some
    } else {
        Danger::Deadly
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use celsius_core::{ThingId, ThingKind};

    #[test]
    fn push_delta_scales_inversely_with_capacity() {
        assert_eq!(heat_push_delta(10.0, 60, 5.0, 1200.0), 2.5);
        assert_eq!(heat_push_delta(10.0, 60, 5.0, 3000.0), 1.0);
        assert_eq!(heat_push_delta(-10.0, 60, 5.0, 3000.0), -1.0);
    }

    #[test]
    fn heater_stops_at_target() {
        assert_eq!(control_energy(21.0, 20.0, 15.0), 21.0);
        assert_eq!(control_energy(21.0, 20.0, 19.995), 0.0);
        assert_eq!(control_energy(21.0, 20.0, 25.0), 0.0);
    }

    #[test]
    fn cooler_stops_at_target() {
        assert_eq!(control_energy(-21.0, 20.0, 25.0), -21.0);
        assert_eq!(control_energy(-21.0, 20.0, 20.005), 0.0);
        assert_eq!(control_energy(-21.0, 20.0, 10.0), 0.0);
    }

    #[test]
    fn fire_push() {
        assert_eq!(fire_heat_push(2.0), 42.0);
        assert_eq!(fire_heat_push(0.0), 0.0);
    }

    #[test]
    fn lowest_ignition_wins() {
        let things = vec![
            Thing::new(ThingId(1), "stone", ThingKind::Item),
            Thing::new(ThingId(2), "wood", ThingKind::Item).with_ignition(300.0),
            Thing::new(ThingId(3), "cloth", ThingKind::Item).with_ignition(230.0),
        ];
        assert_eq!(ignition_temperature(&things), Some(230.0));
        assert!(should_ignite(230.0, &things));
        assert!(!should_ignite(229.9, &things));
        assert!(!should_ignite(5000.0, &things[..1]));
    }

    #[test]
    fn danger_bands() {
        assert_eq!(classify_danger(10.0, -10.0, 30.0), Danger::None);
        assert_eq!(classify_danger(30.0, -10.0, 30.0), Danger::None);
        assert_eq!(classify_danger(-50.0, -10.0, 30.0), Danger::Some);
        assert_eq!(classify_danger(110.0, -10.0, 30.0), Danger::Some);
        assert_eq!(classify_danger(110.5, -10.0, 30.0), Danger::Deadly);
        assert_eq!(classify_danger(-91.0, -10.0, 30.0), Danger::Deadly);
        assert!(Danger::Deadly > Danger::Some);
    }
}
