//! Ball simulation module
//!
//! All physics lives here. One call to [`tick`] advances the world by a
//! single frame:
//! - Pointer repulsion, drag and speed cap per ball
//! - Wall bounce and integration with a hard clamp into the bounds
//! - Pairwise elastic contacts, each pair visited once
//! - No rendering, audio or platform dependencies

pub mod ball;
pub mod collision;
pub mod pointer;
pub mod state;
pub mod tick;

pub use ball::{Ball, PALETTE_SIZE};
pub use collision::{
    CollisionEvent, CollisionSource, Contact, WallHits, bounce_off_walls, resolve_pair,
};
pub use pointer::PointerField;
pub use state::World;
pub use tick::{TickOutcome, tick};
