//! Welcome to `stow-core`!
//!
//! This crate is the placement, retrieval and waste-consolidation engine for
//! a cargo stowage system: it decides where a newly arrived item goes inside
//! a rectangular container, how to retrieve an already-stowed item with the
//! fewest disturbances, which items have become waste, and how to build a
//! mass-capped return manifest for them.
//!
//! Everything here is owned by an explicit [`Engine`] value — there is no
//! process-wide registry or clock. A host builds one `Engine` per vehicle
//! (or per test) and drives it through its public methods.

mod clock;
mod common;
mod container;
mod engine;
mod item;
mod placement;
mod retrieval;
mod waste;

pub mod config;

pub use crate::common::*;
pub use clock::{ExpiredEvent, OutOfUsesEvent, SimulationChanges, SimulatedClock, UsedEvent};
pub use config::EngineConfig;
pub use engine::Engine;
pub use placement::PlacementOutcome;
pub use retrieval::RetrievalStep;
pub use waste::{ReturnManifest, ReturnPlanEntry, ReturnPlanResult, WasteItem, WasteReason};

/// An item of cargo: a rectangular box with a nominal orientation, a usage
/// budget, and an optional expiry.
///
/// Invariant: `uses_remaining <= usage_limit`, enforced at construction and
/// by every mutation in [`crate::clock`]. If [`Item::current_placement`] is
/// `Some`, the placement's box lies entirely inside its container and does
/// not overlap any other occupant — enforced by [`Engine`], never by `Item`
/// itself.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub name: String,
    pub width: Cm,
    pub depth: Cm,
    pub height: Cm,
    pub mass: f64,
    pub priority: u8,
    pub expiry_date: Option<jiff::civil::Date>,
    pub usage_limit: u32,
    uses_remaining: u32,
    pub preferred_zone: String,
    placement: Option<(ContainerId, BoxRegion)>,
}

/// A rectangular stowage container: fixed interior dimensions plus a flat
/// occupancy list.
///
/// Invariant: no two occupancy entries' boxes overlap (half-open semantics,
/// see [`BoxRegion::overlaps`]), and every occupancy box lies within
/// `[0,width) x [0,depth) x [0,height)`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Container {
    pub id: ContainerId,
    pub zone: String,
    pub width: Cm,
    pub depth: Cm,
    pub height: Cm,
    occupancy: Vec<(ItemId, BoxRegion)>,
}
