//! The frame-loop glue around the state machine.
//!
//! A [`ViewSession`] owns the shared [`ViewContext`] and the mode machine.
//! Hosts feed it input events and call [`ViewSession::frame`] once per
//! displayed frame. Everything a mode does not consume goes through the
//! session's default handling: quitting, crop reset, save requests, the
//! grid toggle, mode keys, panning with fling, wheel zoom and starting a
//! new crop selection.

use std::sync::Arc;

use serde::Serialize;

use cappy_common::clock::FrameClock;
use cappy_common::config::AppConfig;
use cappy_view_model::capture::CaptureSurface;
use cappy_view_model::crop::CropBounds;
use cappy_view_model::event::{InputEvent, MouseButton};
use cappy_view_model::geometry::Point2D;

use crate::animated::AnimatedCamera;
use crate::bindings::{resolve, KeyAction};
use crate::context::{CursorIcon, CursorState, HostRequest, ViewContext};
use crate::modes::{ColorPickMode, DrawCropMode, FlashlightMode, ModeTag, MoveMode, ViewMachine};
use crate::render::RenderSink;

/// A release later than this after the last drag motion does not fling.
const FLING_WINDOW_MS: u64 = 50;

/// Snapshot of a session for reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionSummary {
    pub mode: ModeTag,
    pub crop: CropBounds,
    pub camera_position: Point2D,
    pub camera_scale: f64,
    pub cursor: CursorState,
    pub grid_enabled: bool,
    pub frames: u64,
    pub events: u64,
    pub quit_requested: bool,
}

pub struct ViewSession {
    ctx: ViewContext,
    machine: ViewMachine,
    clock: Box<dyn FrameClock>,
    quit_requested: bool,
    frames: u64,
    events: u64,
}

impl ViewSession {
    /// Start a session in move mode.
    pub fn new(
        capture: Arc<dyn CaptureSurface>,
        config: AppConfig,
        clock: Box<dyn FrameClock>,
    ) -> Self {
        let mut ctx = ViewContext::new(capture, config);
        ctx.now_ms = clock.now_ms();
        let machine = ViewMachine::new(&mut ctx, MoveMode);

        tracing::info!(
            width = ctx.capture.width(),
            height = ctx.capture.height(),
            crop = %ctx.crop,
            "View session started"
        );

        Self {
            ctx,
            machine,
            clock,
            quit_requested: false,
            frames: 0,
            events: 0,
        }
    }

    /// Feed one input event. Returns whether the active mode consumed it.
    pub fn handle_event(&mut self, event: &InputEvent) -> bool {
        self.ctx.now_ms = self.clock.now_ms();
        self.events += 1;
        self.track_pointer(event);

        if self.machine.handle_event(&mut self.ctx, event) {
            return true;
        }
        self.default_handling(event);
        false
    }

    /// Animate and draw one frame. Returns whether anything is still
    /// animating, in which case the host should keep scheduling frames.
    pub fn frame(&mut self, sink: &mut dyn RenderSink) -> bool {
        self.ctx.now_ms = self.clock.now_ms();
        self.frames += 1;
        self.machine.advance_and_render(&mut self.ctx, sink)
    }

    pub fn mode(&self) -> ModeTag {
        self.machine.current_tag()
    }

    pub fn crop(&self) -> CropBounds {
        self.ctx.crop
    }

    pub fn camera(&self) -> &AnimatedCamera {
        &self.ctx.camera
    }

    pub fn cursor(&self) -> CursorState {
        self.ctx.cursor
    }

    pub fn context(&self) -> &ViewContext {
        &self.ctx
    }

    pub fn should_quit(&self) -> bool {
        self.quit_requested
    }

    pub fn drain_requests(&mut self) -> Vec<HostRequest> {
        self.ctx.drain_requests()
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            mode: self.mode(),
            crop: self.ctx.crop,
            camera_position: self.ctx.camera.position(),
            camera_scale: self.ctx.camera.scale(),
            cursor: self.ctx.cursor,
            grid_enabled: self.ctx.grid_enabled,
            frames: self.frames,
            events: self.events,
            quit_requested: self.quit_requested,
        }
    }

    fn track_pointer(&mut self, event: &InputEvent) {
        let pointer = &mut self.ctx.pointer;
        if let Some(position) = event.pointer_position() {
            pointer.position = position;
        }
        if let Some(modifiers) = event.modifiers() {
            pointer.modifiers = modifiers;
        }
        match event {
            InputEvent::MouseButtonDown { button, .. } => pointer.buttons.set(*button, true),
            InputEvent::MouseButtonUp { button, .. } => pointer.buttons.set(*button, false),
            InputEvent::MouseMotion { buttons, .. } => pointer.buttons = *buttons,
            InputEvent::WindowResized { width, height } => {
                self.ctx.viewport = Point2D::new(*width, *height);
            }
            _ => {}
        }
    }

    fn default_handling(&mut self, event: &InputEvent) {
        match event {
            InputEvent::Quit => self.request_quit(),
            InputEvent::KeyDown { key, modifiers } => {
                if let Some(action) = resolve(&self.ctx.config.keys, key, *modifiers) {
                    self.apply_key_action(action);
                }
            }
            InputEvent::MouseButtonDown { button, x, y, .. } => match button {
                MouseButton::Primary => {
                    self.ctx.camera.cancel_pan();
                    self.ctx.cursor.icon = CursorIcon::Move;
                }
                MouseButton::Secondary => {
                    let mode = DrawCropMode::new(Point2D::new(*x, *y), *self.ctx.camera.camera());
                    self.machine.set_mode(&mut self.ctx, mode);
                }
                MouseButton::Middle => {}
            },
            InputEvent::MouseButtonUp {
                button: MouseButton::Primary,
                ..
            } => {
                self.release_fling();
                self.ctx.cursor.icon = if self.ctx.pointer.buttons.secondary {
                    CursorIcon::Crosshair
                } else {
                    CursorIcon::Default
                };
            }
            InputEvent::MouseMotion {
                xrel, yrel, buttons, ..
            } if buttons.primary => {
                self.ctx.camera.pan(*xrel, *yrel);
                self.ctx.pointer.last_drag = Point2D::new(*xrel, *yrel);
                self.ctx.pointer.last_drag_ms = self.ctx.now_ms;
            }
            InputEvent::MouseWheel { delta, x, y, .. } => {
                self.ctx.zoom_step(*delta > 0.0, Point2D::new(*x, *y));
            }
            _ => {}
        }
    }

    fn apply_key_action(&mut self, action: KeyAction) {
        match action {
            KeyAction::Quit => self.request_quit(),
            KeyAction::ColorPick => self.machine.set_mode(&mut self.ctx, ColorPickMode),
            KeyAction::Flashlight => {
                self.machine
                    .set_mode(&mut self.ctx, FlashlightMode::default());
            }
            KeyAction::Reset => {
                self.ctx.reset_crop();
                self.machine.set_mode(&mut self.ctx, MoveMode);
            }
            KeyAction::Save => {
                tracing::info!(crop = %self.ctx.crop, "Save requested");
                let crop = self.ctx.crop;
                self.ctx.push_request(HostRequest::SaveCrop(crop));
            }
            KeyAction::ToggleGrid => {
                self.ctx.grid_enabled = !self.ctx.grid_enabled;
                tracing::debug!(enabled = self.ctx.grid_enabled, "Grid toggled");
            }
            KeyAction::Commit | KeyAction::Cancel | KeyAction::Copy { .. } => {}
        }
    }

    /// Turn the last drag motion into an inertial pan.
    fn release_fling(&mut self) {
        let pointer = self.ctx.pointer;
        if self.ctx.now_ms.saturating_sub(pointer.last_drag_ms) > FLING_WINDOW_MS {
            return;
        }
        let view = &self.ctx.config.view;
        let velocity = pointer.last_drag * view.fling_gain;
        let (damping, tick_ms, epsilon) = (view.fling_damping, view.fling_tick_ms, view.pan_stop_epsilon);
        self.ctx
            .camera
            .start_pan(velocity, damping, tick_ms, epsilon, self.ctx.now_ms);
        self.ctx.pointer.last_drag = Point2D::ZERO;
    }

    fn request_quit(&mut self) {
        if !self.quit_requested {
            tracing::info!(frames = self.frames, "Quit requested");
        }
        self.quit_requested = true;
    }
}
