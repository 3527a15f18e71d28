//! Traits a host map implements so the simulation can read and change it.
//!
//! The simulation never owns host objects or terrain. It reads through
//! [`MapReader`] during diffusion and mutates through [`MapWriter`] only
//! from phase change and autoignition, between diffusion passes.

use crate::id::{Cell, ThingId, TerrainId};
use crate::terrain::{Biome, TerrainRegistry};
use crate::thing::Thing;

/// Read-only view of a host map.
///
/// Cells passed in are always within `size()`; callers check bounds.
pub trait MapReader {
    /// Map size as `(width, height)`.
    fn size(&self) -> (u32, u32);

    /// Objects occupying `cell`, in host order.
    fn things_at(&self, cell: Cell) -> &[Thing];

    /// Visible terrain at `cell`.
    fn terrain_at(&self, cell: Cell) -> TerrainId;

    /// The terrain catalogue the ids refer to.
    fn terrains(&self) -> &TerrainRegistry;

    /// The map's biome.
    fn biome(&self) -> Biome;

    /// Map-wide outdoor temperature.
    fn outdoor_temperature(&self) -> f32;

    /// Whether `cell` is open to the sky and exchanges heat with the
    /// outdoor temperature.
    fn is_exposed(&self, _cell: Cell) -> bool {
        false
    }
}

/// Severity of a player-facing letter.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LetterKind {
    /// A colonist or other player-owned entity died.
    Death,
    /// Something the player should know about.
    Neutral,
}

/// A player-facing notification.
#[derive(Clone, Debug, PartialEq)]
pub struct Letter {
    /// Letter severity.
    pub kind: LetterKind,
    /// Short title.
    pub label: String,
    /// Body text.
    pub text: String,
    /// Where the event happened.
    pub cell: Cell,
}

/// Mutating access to a host map.
pub trait MapWriter: MapReader {
    /// Replace the visible terrain at `cell`.
    fn set_terrain(&mut self, cell: Cell, terrain: TerrainId);

    /// Set the snow depth at `cell`.
    fn set_snow_depth(&mut self, cell: Cell, depth: f32);

    /// Kill a living entity. Returns its remains, if any were created.
    fn kill(&mut self, thing: ThingId) -> Option<ThingId>;

    /// Remove an object from the map.
    fn destroy(&mut self, thing: ThingId);

    /// Drop a container's contents next to it.
    fn eject_contents(&mut self, thing: ThingId);

    /// Deliver a letter to the player.
    fn send_letter(&mut self, letter: Letter);

    /// Start a fire at `cell`. Returns `false` if the host refused.
    fn start_fire(&mut self, cell: Cell) -> bool;
}
