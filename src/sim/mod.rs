//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only arrives as an explicit `dt` / timestamp argument
//! - Stable iteration order (insertion order of entities)
//! - No rendering, storage or platform dependencies

pub mod collision;
pub mod invader;
pub mod phase;
pub mod player;
pub mod projectile;
pub mod state;
pub mod swarm;
pub mod tick;

pub use collision::{Aabb, overlaps};
pub use invader::{Invader, InvaderType, Part};
pub use phase::{GamePhase, PhaseError, PhaseMachine};
pub use player::Player;
pub use projectile::{Projectile, ProjectileKind};
pub use state::{GameEvent, GameState, Playfield};
pub use swarm::Swarm;
pub use tick::{resolve_hits, tick};
