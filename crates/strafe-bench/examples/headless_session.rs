//! Headless training session.
//!
//! Demonstrates: shared input cell → simulated player thread → frame
//! driver → HUD events → shutdown. Run with `RUST_LOG=debug` to see
//! catch-up frames.

use std::sync::Arc;
use std::thread;
use std::time::Duration;

use log::info;
use strafe_core::{ControlKey, InputWriter, SharedInput, SyncGrade};
use strafe_engine::{DriverConfig, EngineConfig, EngineEvent, FrameDriver, StrafeEngine};
use strafe_render::{DisplayList, DrawOp};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    println!("=== Strafe Headless Session ===\n");

    let cell = SharedInput::shared();
    let writer = InputWriter::new(Arc::clone(&cell));
    let mut engine = StrafeEngine::new(EngineConfig::default(), cell).unwrap();
    let events = engine.subscribe();

    let driver = FrameDriver::spawn(
        engine,
        DisplayList::new(1280.0, 720.0),
        DriverConfig::default(),
    )
    .unwrap();

    // Key codes as a keyboard listener would see them: Space toggles the
    // session, anything else is ignored.
    let press = |code: &str| match ControlKey::from_key_code(code) {
        Some(ControlKey::TogglePause) => driver.toggle().unwrap(),
        None => info!("ignored key {code}"),
    };
    press("Space");
    press("Enter");

    // A player sweeping the pointer left and right, pressing the matching
    // key most of the time and occasionally the wrong one.
    let player = thread::spawn(move || {
        let mut x = 1000.0f32;
        for step in 0..300u32 {
            let going_right = (step / 30) % 2 == 0;
            let sloppy = step % 11 == 0;
            let press_right = going_right != sloppy;
            writer.key_event("d", press_right);
            writer.key_event("a", !press_right);
            x += if going_right { 6.0 } else { -6.0 };
            writer.pointer_moved(x);
            thread::sleep(Duration::from_millis(5));
        }
    });

    // The HUD reads events while the session runs so its queue never fills.
    let mut progress = 0;
    let mut high = false;
    let mut on_event = |event: EngineEvent| match event {
        EngineEvent::Started => println!("started"),
        EngineEvent::Paused => println!("paused"),
        EngineEvent::SyncChanged(p) if p.grade() == SyncGrade::High => {
            if !high {
                println!("sync {p} (high)");
            }
            high = true;
        }
        EngineEvent::SyncChanged(_) => high = false,
        EngineEvent::Progress { total_ticks } => progress = total_ticks,
    };
    while !player.is_finished() {
        events.try_iter().for_each(&mut on_event);
        thread::sleep(Duration::from_millis(20));
    }
    player.join().unwrap();

    press("Space");
    thread::sleep(Duration::from_millis(50));
    let report = driver.shutdown().unwrap();
    events.try_iter().for_each(&mut on_event);

    let engine = &report.engine;
    info!("session finished after {} frames", report.frames);
    println!("\nTicks:        {}", engine.total_ticks());
    println!("Last progress: {progress}");
    println!("History:      {}", engine.history_len());
    println!("Sync:         {}", engine.sync_percent());
    println!("Scroll speed: {}", engine.scroll_speed());
    if let Some(m) = engine.last_metrics() {
        println!(
            "Last frame:   {} ticks, {} segments, {} µs",
            m.ticks_executed, m.segments_drawn, m.total_us
        );
    }
    let strokes = report
        .surface
        .ops()
        .iter()
        .filter(|op| matches!(op, DrawOp::Stroke(_)))
        .count();
    println!("Strokes on surface: {strokes}");
}
