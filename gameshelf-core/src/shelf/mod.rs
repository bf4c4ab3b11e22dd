//! Shelf navigation and selection engine
//!
//! Leaf-first: `asset` addresses slot artwork, `windower` pages the
//! displayed sequence, `gesture` classifies pointer contacts, `arrows` drives
//! page navigation and bounce feedback, and `model` composes them into the
//! host-facing contract. `directives` projects the model for rendering and
//! `update` dispatches discrete messages.

pub mod arrows;
pub mod asset;
pub mod directives;
pub mod gesture;
pub mod messages;
pub mod model;
pub mod timer;
pub mod types;
pub mod update;
pub mod windower;

pub use arrows::{ArrowController, ArrowOutcome};
pub use asset::{ADD_MARKER, AssetRef, resolve};
pub use directives::{ShelfDirectives, VisibleTile, directives};
pub use gesture::{
    Gesture, GestureConfig, GestureDetector, GesturePhase, GestureTarget,
};
pub use messages::ShelfMessage;
pub use model::{Navigation, ShelfModel, ShelfOptions, ShelfState, Viewport};
pub use timer::{TimerKind, TimerRequest, TimerToken};
pub use types::{
    Direction, LongPressPolicy, RowMode, ShelfHost, ShelfSignal, Slot,
};
pub use update::{UpdateOutcome, update};
pub use windower::Windower;
