use std::sync::Arc;

use cappy_common::clock::ManualClock;
use cappy_common::config::AppConfig;
use cappy_view_core::{ModeTag, RecordingSink, ViewSession};
use cappy_view_model::capture::RgbImage;
use cappy_view_model::crop::CropBounds;
use cappy_view_model::event::{ButtonMask, InputEvent, Modifiers, MouseButton};

struct Driver {
    session: ViewSession,
    clock: ManualClock,
    sink: RecordingSink,
    pointer: (f64, f64),
}

impl Driver {
    fn new(width: u32, height: u32) -> Self {
        let clock = ManualClock::new(0);
        let session = ViewSession::new(
            Arc::new(RgbImage::gradient(width, height)),
            AppConfig::default(),
            Box::new(clock.clone()),
        );
        Self {
            session,
            clock,
            sink: RecordingSink::new(),
            pointer: (0.0, 0.0),
        }
    }

    fn send(&mut self, event: InputEvent) {
        self.clock.advance(16);
        self.session.handle_event(&event);
        self.session.frame(&mut self.sink);
    }

    fn secondary_down(&mut self, x: f64, y: f64) {
        self.pointer = (x, y);
        self.send(InputEvent::button_down(MouseButton::Secondary, x, y));
    }

    fn secondary_drag(&mut self, x: f64, y: f64, modifiers: Modifiers) {
        let (px, py) = self.pointer;
        self.pointer = (x, y);
        let held = ButtonMask::default().with(MouseButton::Secondary);
        self.send(InputEvent::motion(x, y, x - px, y - py, held).with_modifiers(modifiers));
    }

    fn secondary_up(&mut self) {
        let (x, y) = self.pointer;
        self.send(InputEvent::button_up(MouseButton::Secondary, x, y));
    }

    fn key(&mut self, key: &str) {
        self.send(InputEvent::key(key, Modifiers::NONE));
    }
}

#[test]
fn shift_drag_commits_a_square_crop() {
    let mut driver = Driver::new(400, 300);

    driver.secondary_down(10.0, 10.0);
    assert_eq!(driver.session.mode(), ModeTag::DrawCrop);

    driver.secondary_drag(60.0, 30.0, Modifiers::SHIFT);
    driver.secondary_up();
    assert_eq!(driver.session.mode(), ModeTag::DrawCrop);

    driver.key("x");
    assert_eq!(driver.session.mode(), ModeTag::Move);
    assert_eq!(driver.session.crop(), CropBounds::new(10, 10, 50, 50));
}

#[test]
fn secondary_press_away_from_selection_starts_a_new_one() {
    let mut driver = Driver::new(400, 300);

    driver.secondary_down(10.0, 10.0);
    driver.secondary_drag(60.0, 30.0, Modifiers::NONE);
    driver.secondary_up();
    assert_eq!(driver.session.mode(), ModeTag::DrawCrop);

    // Nothing of the first selection is under the pointer, so the press
    // falls through to the session and replaces it.
    driver.secondary_down(200.0, 200.0);
    assert_eq!(driver.session.mode(), ModeTag::DrawCrop);
    driver.secondary_drag(260.0, 240.0, Modifiers::NONE);
    driver.secondary_up();

    driver.key("x");
    assert_eq!(driver.session.mode(), ModeTag::Move);
    assert_eq!(driver.session.crop(), CropBounds::new(200, 200, 60, 40));
}
