//! Replay a scripted input session headlessly.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;

use cappy_common::clock::{ManualClock, MonotonicClock};
use cappy_common::config::AppConfig;
use cappy_common::error::CappyError;
use cappy_view_core::{HostRequest, RecordingSink, SessionSummary, ViewSession};
use cappy_view_model::capture::RgbImage;
use cappy_view_model::event::parse_script;

#[derive(Debug, Serialize)]
struct ReplayReport {
    script: PathBuf,
    started_at: String,
    capture_width: u32,
    capture_height: u32,
    events_in_script: usize,
    events_replayed: usize,
    draw_commands: usize,
    wall_secs: f64,
    session: SessionSummary,
    requests: Vec<HostRequest>,
}

pub fn run(
    script: PathBuf,
    width: u32,
    height: u32,
    json: bool,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    if width == 0 || height == 0 {
        return Err(CappyError::invalid_argument(format!(
            "capture size must be non-zero (got {width}x{height})"
        ))
        .into());
    }

    let config = match &config_path {
        Some(path) => AppConfig::load_from(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {e}"))?,
        None => AppConfig::load(),
    };

    let content = std::fs::read_to_string(&script)
        .with_context(|| format!("Failed to read script {}", script.display()))?;
    let events = parse_script(&content)?;

    let wall = MonotonicClock::start();
    let clock = ManualClock::new(events.first().map(|e| e.time_ms).unwrap_or(0));
    let mut session = ViewSession::new(
        Arc::new(RgbImage::gradient(width, height)),
        config,
        Box::new(clock.clone()),
    );

    let mut sink = RecordingSink::new();
    let mut requests = Vec::new();
    let mut draw_commands = 0;
    let mut replayed = 0;

    for scripted in &events {
        clock.set(scripted.time_ms);
        session.handle_event(&scripted.event);
        session.frame(&mut sink);
        draw_commands += sink.take().len();
        requests.extend(session.drain_requests());
        replayed += 1;

        if session.should_quit() {
            break;
        }
    }

    // Let running animations settle so the report shows where they land.
    let mut settle_frames = 0;
    while !session.should_quit() && session.camera().is_animating() && settle_frames < 1_000 {
        clock.advance(16);
        session.frame(&mut sink);
        draw_commands += sink.take().len();
        settle_frames += 1;
    }

    tracing::debug!(replayed, settle_frames, "Replay finished");

    let report = ReplayReport {
        script,
        started_at: wall.epoch_wall().to_string(),
        capture_width: width,
        capture_height: height,
        events_in_script: events.len(),
        events_replayed: replayed,
        draw_commands,
        wall_secs: wall.elapsed_secs(),
        session: session.summary(),
        requests,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    let s = &report.session;
    println!("Replayed {} of {} events", report.events_replayed, report.events_in_script);
    println!("  Capture: {}x{}", report.capture_width, report.capture_height);
    println!("  Mode: {}", s.mode);
    println!("  Crop: {}", s.crop);
    println!(
        "  Camera: scale {:.4} at ({:.2}, {:.2})",
        s.camera_scale, s.camera_position.x, s.camera_position.y
    );
    println!(
        "  Cursor: {:?}{}",
        s.cursor.icon,
        if s.cursor.visible { "" } else { " (hidden)" }
    );
    println!("  Grid: {}", if s.grid_enabled { "on" } else { "off" });
    println!("  Frames: {} ({} draw commands)", s.frames, report.draw_commands);
    println!("  Quit requested: {}", s.quit_requested);

    if report.requests.is_empty() {
        println!("Host requests: none");
    } else {
        println!("Host requests:");
        for request in &report.requests {
            match request {
                HostRequest::CopyToClipboard(text) => println!("  copy {text}"),
                HostRequest::SaveCrop(crop) => println!("  save {crop}"),
            }
        }
    }

    Ok(())
}
