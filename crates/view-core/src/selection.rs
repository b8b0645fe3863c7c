//! Crop selection: hit-testing and drag/resize of the selection rectangle.
//!
//! While a handle is being dragged the two corners live in screen space,
//! so they track the pointer exactly. Once committed they are rounded,
//! clamped into the working crop and stored in world space, where they
//! stay put under pan and zoom.

use serde::{Deserialize, Serialize};

use cappy_view_model::crop::CropBounds;
use cappy_view_model::geometry::{Point2D, ScreenRect};

use crate::camera::Camera;

/// The zone of a selection rectangle a screen point refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResizeHandle {
    #[default]
    None,
    Center,
    N,
    E,
    S,
    W,
    NE,
    SE,
    SW,
    NW,
}

/// Classify `point` against the rectangle spanned by `start` and `end`.
///
/// Corner squares are `handle_size` wide, shrunk to half the rectangle when
/// it is smaller than two handles. Zones are tested in a fixed order: side
/// bands (W, E) when the rectangle is tall enough, top/bottom bands (N, S)
/// when it is wide enough, the four corners, and finally the interior when
/// both dimensions are large enough. All zones include their edges.
pub fn classify(point: Point2D, start: Point2D, end: Point2D, handle_size: f64) -> ResizeHandle {
    let min = start.min(end);
    let max = start.max(end);
    let w = max.x - min.x;
    let h = max.y - min.y;

    let corner_w = (w / 2.0).min(handle_size);
    let corner_h = (h / 2.0).min(handle_size);
    let tall = h / 2.0 > handle_size;
    let wide = w / 2.0 > handle_size;

    let hit = |x: f64, y: f64, rw: f64, rh: f64| ScreenRect::new(x, y, rw, rh).contains(point);

    if tall {
        let band_h = h - 2.0 * corner_h;
        if hit(min.x, min.y + corner_h, corner_w, band_h) {
            return ResizeHandle::W;
        }
        if hit(max.x - corner_w, min.y + corner_h, corner_w, band_h) {
            return ResizeHandle::E;
        }
    }

    if wide {
        let band_w = w - 2.0 * corner_w;
        if hit(min.x + corner_w, min.y, band_w, corner_h) {
            return ResizeHandle::N;
        }
        if hit(min.x + corner_w, max.y - corner_h, band_w, corner_h) {
            return ResizeHandle::S;
        }
    }

    if hit(min.x, min.y, corner_w, corner_h) {
        return ResizeHandle::NW;
    }
    if hit(min.x, max.y - corner_h, corner_w, corner_h) {
        return ResizeHandle::SW;
    }
    if hit(max.x - corner_w, max.y - corner_h, corner_w, corner_h) {
        return ResizeHandle::SE;
    }
    if hit(max.x - corner_w, min.y, corner_w, corner_h) {
        return ResizeHandle::NE;
    }

    if tall
        && wide
        && hit(
            min.x + corner_w,
            min.y + corner_h,
            w - 2.0 * corner_w,
            h - 2.0 * corner_h,
        )
    {
        return ResizeHandle::Center;
    }

    ResizeHandle::None
}

/// Where `end` lies relative to `start`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Quadrant {
    BottomRight,
    TopRight,
    BottomLeft,
    TopLeft,
}

impl Quadrant {
    fn of(start: Point2D, end: Point2D) -> Self {
        match (start.x < end.x, start.y < end.y) {
            (true, true) => Self::BottomRight,
            (true, false) => Self::TopRight,
            (false, true) => Self::BottomLeft,
            (false, false) => Self::TopLeft,
        }
    }

    fn x_sign(self) -> f64 {
        match self {
            Self::BottomRight | Self::TopRight => 1.0,
            Self::BottomLeft | Self::TopLeft => -1.0,
        }
    }

    fn y_sign(self) -> f64 {
        match self {
            Self::BottomRight | Self::BottomLeft => 1.0,
            Self::TopRight | Self::TopLeft => -1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionPhase {
    /// A handle is being dragged; corners are in screen space.
    Drawing { handle: ResizeHandle },
    /// Committed selection; corners are in world space.
    Idle { hover: ResizeHandle },
}

/// Result of finishing a drag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragOutcome {
    Selected(CropBounds),
    /// The selection collapsed to nothing.
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropSelection {
    start: Point2D,
    end: Point2D,
    phase: SelectionPhase,
}

impl CropSelection {
    /// A new selection being drawn from the screen point `at`.
    pub fn new(at: Point2D) -> Self {
        Self {
            start: at,
            end: at,
            phase: SelectionPhase::Drawing {
                handle: ResizeHandle::SE,
            },
        }
    }

    pub fn start(&self) -> Point2D {
        self.start
    }

    pub fn end(&self) -> Point2D {
        self.end
    }

    pub fn phase(&self) -> SelectionPhase {
        self.phase
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.phase, SelectionPhase::Drawing { .. })
    }

    /// The handle being dragged, or the one under the pointer when idle.
    pub fn handle(&self) -> ResizeHandle {
        match self.phase {
            SelectionPhase::Drawing { handle } => handle,
            SelectionPhase::Idle { hover } => hover,
        }
    }

    /// Update the hovered handle of an idle selection.
    pub fn hover(&mut self, pointer: Point2D, camera: &Camera, handle_size: f64) -> ResizeHandle {
        if let SelectionPhase::Idle { .. } = self.phase {
            let hover = classify(
                pointer,
                camera.world_to_screen(self.start),
                camera.world_to_screen(self.end),
                handle_size,
            );
            self.phase = SelectionPhase::Idle { hover };
            hover
        } else {
            ResizeHandle::None
        }
    }

    /// Start dragging the hovered handle. Returns `false` when nothing is
    /// hovered or a drag is already running.
    ///
    /// The corners are reordered so the dragged corner is always `end` and
    /// the dragged edge always belongs to the corner the edge rules move.
    pub fn begin_drag(&mut self, camera: &Camera) -> bool {
        let handle = match self.phase {
            SelectionPhase::Idle { hover } => hover,
            SelectionPhase::Drawing { .. } => return false,
        };

        let (s, e) = (self.start, self.end);
        let (start, end) = match handle {
            ResizeHandle::None => return false,
            ResizeHandle::NW => (e, s),
            ResizeHandle::NE => (Point2D::new(s.x, e.y), Point2D::new(e.x, s.y)),
            ResizeHandle::SW => (Point2D::new(e.x, s.y), Point2D::new(s.x, e.y)),
            _ => (s, e),
        };

        self.start = camera.world_to_screen(start);
        self.end = camera.world_to_screen(end);
        self.phase = SelectionPhase::Drawing { handle };
        true
    }

    /// Move the dragged handle to the screen point `pointer`.
    ///
    /// With `square` set, the secondary dimension is rewritten so the
    /// rectangle stays square, keeping the quadrant the drag is in. The N
    /// and S handles only move a horizontal edge, so for them the width
    /// follows the height (`end.x` is rewritten); every other handle
    /// rewrites `end.y` from the width.
    pub fn drag_to(&mut self, pointer: Point2D, square: bool) {
        let handle = match self.phase {
            SelectionPhase::Drawing { handle } => handle,
            SelectionPhase::Idle { .. } => return,
        };

        match handle {
            ResizeHandle::Center => return,
            ResizeHandle::N => self.start.y = pointer.y,
            ResizeHandle::E => self.end.x = pointer.x,
            ResizeHandle::S => self.end.y = pointer.y,
            ResizeHandle::W => self.start.x = pointer.x,
            _ => self.end = pointer,
        }

        if square {
            let quadrant = Quadrant::of(self.start, self.end);
            let dx = (self.end.x - self.start.x).abs();
            let dy = (self.end.y - self.start.y).abs();
            if matches!(handle, ResizeHandle::N | ResizeHandle::S) {
                self.end.x = self.start.x + quadrant.x_sign() * dy;
            } else {
                self.end.y = self.start.y + quadrant.y_sign() * dx;
            }
        }
    }

    /// Shift both corners of a drawing selection by a screen delta.
    pub fn translate(&mut self, dx: f64, dy: f64) {
        if self.is_drawing() {
            let delta = Point2D::new(dx, dy);
            self.start += delta;
            self.end += delta;
        }
    }

    /// Keep a drawing selection attached to the same world points after
    /// the camera changed from `from` to `to`.
    pub fn reproject(&mut self, from: &Camera, to: &Camera) {
        if self.is_drawing() {
            self.start = to.world_to_screen(from.screen_to_world(self.start));
            self.end = to.world_to_screen(from.screen_to_world(self.end));
        }
    }

    /// Finish the drag: normalize, convert to world space, round to whole
    /// pixels and clamp into `working`.
    pub fn commit(&mut self, camera: &Camera, working: CropBounds) -> DragOutcome {
        if !self.is_drawing() {
            return match self.bounds() {
                Some(bounds) => DragOutcome::Selected(bounds),
                None => DragOutcome::Cancelled,
            };
        }
        if self.start == self.end {
            return DragOutcome::Cancelled;
        }

        let round = |p: Point2D| Point2D::new(p.x.round(), p.y.round());
        let start = camera.screen_to_world(self.start.min(self.end));
        let end = camera.screen_to_world(self.start.max(self.end));
        let start = working.clamp_point(round(start));
        let end = working.clamp_point(round(end));

        if end.x - start.x == 0.0 || end.y - start.y == 0.0 {
            return DragOutcome::Cancelled;
        }

        self.start = start;
        self.end = end;
        self.phase = SelectionPhase::Idle {
            hover: ResizeHandle::None,
        };

        tracing::debug!(
            x = start.x,
            y = start.y,
            w = end.x - start.x,
            h = end.y - start.y,
            "Selection committed"
        );

        DragOutcome::Selected(self.world_bounds())
    }

    /// Committed selection in image pixels, `None` while drawing.
    pub fn bounds(&self) -> Option<CropBounds> {
        if self.is_drawing() {
            None
        } else {
            Some(self.world_bounds())
        }
    }

    fn world_bounds(&self) -> CropBounds {
        CropBounds::new(
            self.start.x as u32,
            self.start.y as u32,
            (self.end.x - self.start.x) as u32,
            (self.end.y - self.start.y) as u32,
        )
    }

    /// The selection rectangle on screen.
    pub fn screen_rect(&self, camera: &Camera) -> ScreenRect {
        if self.is_drawing() {
            ScreenRect::from_corners(self.start, self.end)
        } else {
            ScreenRect::from_corners(
                camera.world_to_screen(self.start),
                camera.world_to_screen(self.end),
            )
        }
    }

    /// Corners in world space, unnormalized.
    pub fn world_corners(&self, camera: &Camera) -> (Point2D, Point2D) {
        if self.is_drawing() {
            (
                camera.screen_to_world(self.start),
                camera.screen_to_world(self.end),
            )
        } else {
            (self.start, self.end)
        }
    }
}
