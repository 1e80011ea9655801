// Timetable Layout
// Prints the column layout of a schedule file as JSON

use std::env;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use serde_json::json;

use timetable_layout::models::conference::Conference;
use timetable_layout::models::layout::RoomLayout;
use timetable_layout::models::settings::LayoutSettings;
use timetable_layout::services::collision::LogCollisionSink;
use timetable_layout::services::schedule::load_lectures;
use timetable_layout::services::settings::{default_settings_path, layout_engine, SettingsService};

const USAGE: &str = "usage: timetable-layout <schedule.json> [room-index]";

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    let mut args = env::args().skip(1);
    let Some(schedule_path) = args.next().map(PathBuf::from) else {
        bail!(USAGE);
    };
    let room_index = args
        .next()
        .map(|arg| {
            arg.parse::<i32>()
                .with_context(|| format!("invalid room index '{}'", arg))
        })
        .transpose()?;

    let settings = match default_settings_path() {
        Some(path) => SettingsService::new(path).get()?,
        None => {
            log::warn!("No configuration directory available, using default settings");
            LayoutSettings::default()
        }
    };

    let lectures = load_lectures(&schedule_path)?;
    let engine = layout_engine(&settings)?;

    let mut conference = Conference::calculate_time_frame(&lectures, engine.time_zone())?;
    if let Some(reference_start) = settings.reference_start {
        conference.first_event_starts_at = reference_start;
    }
    log::info!(
        "Schedule runs from minute {} to {}",
        conference.first_event_starts_at,
        conference.last_event_ends_at
    );

    let rooms: Vec<RoomLayout> = match room_index {
        Some(room_index) => vec![engine.calculate_layout_params(
            room_index,
            &lectures,
            &conference,
            LogCollisionSink,
        )?],
        None => engine
            .layout_schedule(&lectures, &conference, LogCollisionSink)?
            .rooms()
            .cloned()
            .collect(),
    };

    let output: Vec<_> = rooms
        .iter()
        .map(|room| {
            json!({
                "roomIndex": room.room_index(),
                "leadingMargin": room.leading_margin(),
                "totalHeight": room.total_height(),
                "lectures": room.entries(),
                "collisions": room.collisions(),
            })
        })
        .collect();

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
