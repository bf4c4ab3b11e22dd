//! gameshelf core
//!
//! The shelf navigation and selection engine behind the gameshelf library
//! shell. The engine presents an ordered collection of cover-art tiles plus
//! one trailing "add new" slot as a windowed grid, classifies pointer
//! contacts into selects and long-presses, pages through the collection with
//! the directional arrows, and keeps a single authoritative selection.
//!
//! Notes
//! - The engine is synchronous and takes the current [`std::time::Instant`]
//!   as an argument. Timer deadlines are handed back to the caller as
//!   [`TimerRequest`]s.
//! - [`runtime::ShelfRuntime`] is a tokio driver that arms those timers and
//!   forwards outward signals to a [`ShelfHost`].
//! - Rendering, asset loading, persistence and process launch belong to the
//!   host application.

pub mod collection;
pub mod config;
pub mod constants;
pub mod error;
pub mod runtime;
pub mod shelf;

pub use config::ShelfConfig;
pub use error::{Result, ShelfError};
pub use runtime::{RuntimeStopped, ShelfHandle, ShelfRuntime};
pub use shelf::{
    ArrowController, AssetRef, Direction, Gesture, GestureDetector,
    GestureTarget, LongPressPolicy, RowMode, ShelfDirectives, ShelfHost,
    ShelfMessage, ShelfModel, ShelfOptions, ShelfSignal, ShelfState, Slot,
    TimerKind, TimerRequest, TimerToken, UpdateOutcome, VisibleTile,
    Windower,
};
