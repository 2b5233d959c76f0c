// SPDX-License-Identifier: MIT OR Apache-2.0
//! Host session model for the ReSTIR DI pipeline.
//!
//! A [`Session`] holds everything a pipeline script configures on the
//! renderer before the first frame:
//! - Registered render graphs and the active graph
//! - Loaded scene with render settings and camera speed
//! - Framebuffer size and UI toggle
//! - Simulation clock
//! - Frame capture destination
//!
//! ## Architecture
//!
//! The session is an explicit value owned by the caller and passed by
//! `&mut` to whatever configures it. Once configured, the host consumes it
//! as an opaque [`SessionSnapshot`].

pub mod scene;
pub mod clock;
pub mod capture;
pub mod session;

pub use scene::{Scene, SceneError, SceneRenderSettings};
pub use clock::{Clock, ClockError};
pub use capture::{CaptureError, FrameCapture};
pub use session::{FrameBufferSize, Session, SessionError, SessionSnapshot};
