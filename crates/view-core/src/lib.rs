//! Cappy View Core
//!
//! The interactive view-and-selection engine:
//! - **Camera:** world/screen transform with zoom-to-point
//! - **AnimatedCamera:** polled zoom ramps and inertial fling
//! - **StateMachine:** owner of the single active interaction mode
//! - **Modes:** move, color pick, flashlight and crop drawing
//! - **Selection:** crop rectangle hit-testing, resize and commit
//! - **Session:** default event handling and the per-frame entry point
//!
//! Nothing here performs I/O. Drawing goes through a [`render::RenderSink`]
//! and side effects the host must carry out are queued as
//! [`context::HostRequest`]s.

pub mod animated;
pub mod animation;
pub mod bindings;
pub mod camera;
pub mod context;
pub mod machine;
pub mod modes;
pub mod render;
pub mod selection;
pub mod session;

pub use animated::AnimatedCamera;
pub use camera::Camera;
pub use context::{CursorIcon, CursorState, HostRequest, ViewContext};
pub use machine::{EventOutcome, Mode, StateMachine};
pub use modes::ModeTag;
pub use render::{DrawCommand, RecordingSink, RenderSink, Rgba};
pub use selection::{classify, CropSelection, ResizeHandle};
pub use session::{SessionSummary, ViewSession};
