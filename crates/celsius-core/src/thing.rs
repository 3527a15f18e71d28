//! Objects occupying map cells, as seen by the thermal simulation.

use crate::id::ThingId;
use crate::terrain::Affordances;
use crate::thermal::ThermalProperties;

/// What kind of object a [`Thing`] is. Drives melt consequences.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThingKind {
    /// A mobile living entity.
    Pawn,
    /// A grave-like container.
    Grave {
        /// Whether anything is buried inside.
        has_contents: bool,
    },
    /// Surface covering such as blood or dirt.
    Filth,
    /// A structure.
    Building,
    /// Anything else (items, plants, corpses).
    Item,
}

/// A host object, with the stats the simulation reads.
#[derive(Clone, Debug, PartialEq)]
pub struct Thing {
    /// Host identity.
    pub id: ThingId,
    /// Short label for logs and letters.
    pub label: String,
    /// Object kind.
    pub kind: ThingKind,
    /// Heat capacity stat; zero for non-thermal things.
    pub heat_capacity: f32,
    /// Heat conductivity stat.
    pub heat_conductivity: f32,
    /// Affordance the object needs from the terrain under it.
    pub terrain_affordance: Option<Affordances>,
    /// Whether the player's faction owns it.
    pub player_owned: bool,
    /// Temperature at which the object catches fire, if flammable.
    pub ignition_temperature: Option<f32>,
    /// An open door. Open things stop insulating and the cell diffuses
    /// as air until the host closes them again.
    pub open: bool,
}

impl Thing {
    /// A non-thermal object with no terrain requirements.
    pub fn new(id: ThingId, label: &str, kind: ThingKind) -> Self {
        Self {
            id,
            label: label.to_string(),
            kind,
            heat_capacity: 0.0,
            heat_conductivity: 0.0,
            terrain_affordance: None,
            player_owned: false,
            ignition_temperature: None,
            open: false,
        }
    }

    /// Builder-style setter for thermal stats.
    pub fn with_thermal(mut self, props: ThermalProperties) -> Self {
        self.heat_capacity = props.heat_capacity;
        self.heat_conductivity = props.heat_conductivity;
        self
    }

    /// Builder-style setter for the needed terrain affordance.
    pub fn with_affordance(mut self, affordance: Affordances) -> Self {
        self.terrain_affordance = Some(affordance);
        self
    }

    /// Builder-style setter for player ownership.
    pub fn owned_by_player(mut self) -> Self {
        self.player_owned = true;
        self
    }

    /// Builder-style setter for the ignition temperature.
    pub fn with_ignition(mut self, temperature: f32) -> Self {
        self.ignition_temperature = Some(temperature);
        self
    }

    /// Builder-style setter for the open state.
    pub fn with_open(mut self, open: bool) -> Self {
        self.open = open;
        self
    }

    /// A thing participates in heat exchange when its capacity is positive
    /// and it is not standing open.
    pub fn is_thermal(&self) -> bool {
        self.heat_capacity > 0.0 && !self.open
    }

    /// Thermal stats, if this is a thermal thing.
    pub fn thermal_properties(&self) -> Option<ThermalProperties> {
        self.is_thermal()
            .then(|| ThermalProperties::new(self.heat_capacity, self.heat_conductivity))
    }

    /// Whether this is a mobile living entity.
    pub fn is_pawn(&self) -> bool {
        matches!(self.kind, ThingKind::Pawn)
    }
}
