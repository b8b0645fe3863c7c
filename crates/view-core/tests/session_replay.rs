use std::path::PathBuf;
use std::sync::Arc;

use cappy_common::clock::ManualClock;
use cappy_common::config::AppConfig;
use cappy_view_core::{HostRequest, ModeTag, RecordingSink, ViewSession};
use cappy_view_model::capture::RgbImage;
use cappy_view_model::crop::CropBounds;
use cappy_view_model::event::{parse_script, ScriptedEvent};

fn load_fixture_script() -> Vec<ScriptedEvent> {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
        .join("fixtures")
        .join("sample-session")
        .join("events.jsonl");

    let content = std::fs::read_to_string(path).expect("fixture script should be readable");
    parse_script(&content).expect("fixture script should parse")
}

fn replay(events: &[ScriptedEvent]) -> (ViewSession, Vec<HostRequest>, Vec<ModeTag>) {
    let clock = ManualClock::new(0);
    let mut session = ViewSession::new(
        Arc::new(RgbImage::gradient(200, 150)),
        AppConfig::default(),
        Box::new(clock.clone()),
    );

    let mut sink = RecordingSink::new();
    let mut requests = Vec::new();
    let mut modes = Vec::new();
    for scripted in events {
        clock.set(scripted.time_ms);
        session.handle_event(&scripted.event);
        session.frame(&mut sink);
        requests.extend(session.drain_requests());
        modes.push(session.mode());
    }
    (session, requests, modes)
}

#[test]
fn fixture_session_ends_in_expected_state() {
    let events = load_fixture_script();
    assert_eq!(events.len(), 12);

    let (session, requests, _) = replay(&events);

    assert!(session.should_quit());
    assert_eq!(session.mode(), ModeTag::Flashlight);
    assert_eq!(session.crop(), CropBounds::new(10, 10, 100, 80));
    assert!((session.camera().scale() - 1.2).abs() < 1e-9);
    assert!(!session.camera().is_animating());

    assert_eq!(
        requests,
        vec![
            HostRequest::CopyToClipboard("0x264446".to_string()),
            HostRequest::SaveCrop(CropBounds::new(10, 10, 100, 80)),
        ]
    );
}

#[test]
fn fixture_session_mode_sequence() {
    let events = load_fixture_script();
    let (_, _, modes) = replay(&events);

    use ModeTag::*;
    assert_eq!(
        modes,
        vec![
            ColorPick, ColorPick, ColorPick, Move, DrawCrop, DrawCrop, DrawCrop, Move, Move, Move,
            Flashlight, Flashlight,
        ]
    );
}

#[test]
fn wheel_zoom_keeps_anchor_world_point() {
    let events = load_fixture_script();
    let (session, _, _) = replay(&events);

    // The world point under (50, 50) before zooming was (50, 50).
    let world = session.camera().screen_to_world((50.0, 50.0).into());
    assert!((world.x - 50.0).abs() < 1e-9);
    assert!((world.y - 50.0).abs() < 1e-9);
}
