//! Frame-driven world for the pickup simulation.
//!
//! This crate owns items and receiving agents in generational registries and
//! advances them once per [`World::tick`]. It turns the core crate's per-item
//! results into world follow-ups (stowing, absorbing, swapping, equip sounds)
//! and a stream of [`WorldEvent`]s.
//!
//! Modules are organized by responsibility:
//! - [`world`] hosts the frame loop and the interaction API
//! - [`registry`] provides handle-based storage with stale-handle detection
//! - [`events`] defines what the world reports to its embedder
//! - [`host`] ships an in-memory presentation host for tests and tooling
pub mod error;
pub mod events;
pub mod host;
pub mod registry;
pub mod world;

pub use error::{Result, RuntimeError};
pub use events::{FrameEvent, WorldEvent};
pub use host::{ItemRecord, RecordingHost};
pub use registry::{Registry, RegistryKey};
pub use world::World;
