//! Deterministic item pickup logic shared by every host.
//!
//! `pickup-core` defines the item lifecycle state machine, the interpolated
//! transfer that pulls an item into a receiving agent's hand slot, and the
//! ambient glow pulse. The crate never renders, simulates physics or plays
//! audio: those concerns reach the host through [`host::ItemHost`], and the
//! agent side of a pickup is described by [`agent::ReceivingAgent`].
//!
//! Time only advances through explicit `tick(dt)` calls, so every run with the
//! same inputs produces the same poses and events.
pub mod agent;
pub mod config;
pub mod curve;
pub mod error;
pub mod host;
pub mod item;
pub mod math;
pub mod timer;

pub use agent::{
    AgentError, AgentId, Character, InterpSlot, Placement, ReceivingAgent, SlotIndex, SoundGate,
    SoundKind, Viewpoint,
};
pub use config::{AgentConfig, ConfigError, ItemConfig, PickupConfig};
pub use curve::{Curve, CurveError, CurveId, FnCurve, ItemCurves, Keyframe, ScalarCurve, VectorCurve};
pub use error::{CoreError, ErrorSeverity};
pub use host::{ItemHost, MaterialParam, NullHost, SoundCue};
pub use item::{
    CollisionChannel, CollisionEnabled, CollisionResponse, CollisionSetup, Item, ItemEvent,
    ItemId, ItemKind, ItemSpec, ItemState, MaterialParams, Presentation, Rarity, StarFlags,
    Transfer, TransferError, TransferTicket, TransitionError, WidgetPolicy,
};
pub use math::{Pose, Rotator};
pub use timer::Countdown;
