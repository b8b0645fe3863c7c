//! Cappy View Model
//!
//! Defines the data contracts shared by the view core and its hosts:
//! - **Geometry:** Points and rectangles in world or screen space
//! - **Crop:** The active sub-region of the capture, in image pixels
//! - **Events:** Input events and timed JSONL event scripts
//! - **Capture:** The read-only pixel surface and RGB color formatting
//!
//! World space is the captured image's pixel space (origin at its top-left
//! pixel); screen space is the window's pixel space.

pub mod capture;
pub mod crop;
pub mod event;
pub mod geometry;

pub use capture::*;
pub use crop::*;
pub use event::*;
pub use geometry::*;
