use std::io::Write as _;
use std::time::Duration;

use clap::Subcommand;
use meditime_core::{
    Config, Event, Playback, PlaybackError, SystemClock, TimerService, TimerSettings, TimerState,
};

use super::common;

#[derive(Subcommand)]
pub enum TimerAction {
    /// Run a meditation session in the foreground (Ctrl-C stops early)
    Run {
        /// Session length in minutes (1-120)
        #[arg(long)]
        minutes: Option<u32>,
        /// Chime every N remaining minutes (0 disables)
        #[arg(long)]
        interval: Option<u32>,
    },
    /// Run a session with the last-used settings
    Quick,
    /// Print the last-used settings as JSON
    Settings,
}

/// Terminal playback collaborator: the chime becomes a terminal bell,
/// ambient sounds and the background video have no terminal rendition.
struct TerminalPlayback;

impl Playback for TerminalPlayback {
    fn begin(&mut self, resource: &str, _volume: u8) -> Result<(), PlaybackError> {
        if resource == meditime_core::timer::CHIME_RESOURCE {
            print!("\x07");
            let _ = std::io::stdout().flush();
        }
        Ok(())
    }
    fn pause(&mut self, _resource: &str) -> Result<(), PlaybackError> {
        Ok(())
    }
    fn stop(&mut self, _resource: &str) -> Result<(), PlaybackError> {
        Ok(())
    }
    fn fade_out_then_stop(&mut self, _resource: &str) -> Result<(), PlaybackError> {
        Ok(())
    }
}

pub fn run(action: TimerAction) -> Result<(), Box<dyn std::error::Error>> {
    let storage = common::open_storage();
    let config = Config::load_or_default();
    let mut service = TimerService::new(storage, Box::new(SystemClock), Box::new(TerminalPlayback));
    service.set_background_video(config.background_video);

    match action {
        TimerAction::Run { minutes, interval } => {
            let mut settings =
                TimerSettings::load(service.storage()).unwrap_or_default();
            settings.duration_min = minutes
                .unwrap_or(config.timer.default_duration_min);
            settings.interval_chime_min = interval
                .unwrap_or(config.timer.default_interval_min);

            let events = service.start(settings)?;
            report(&events);
            countdown(service)
        }
        TimerAction::Quick => {
            let events = service.start_with_last_settings()?;
            report(&events);
            countdown(service)
        }
        TimerAction::Settings => {
            let settings = TimerSettings::load(service.storage())?;
            println!("{}", serde_json::to_string_pretty(&settings)?);
            Ok(())
        }
    }
}

/// Drive the caller-ticked engine once per second until completion or
/// Ctrl-C. This loop owns the "schedule every 1000 ms" half of the
/// clock boundary.
fn countdown(mut service: TimerService) -> Result<(), Box<dyn std::error::Error>> {
    render_remaining(service.remaining_secs());

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async {
        let mut ticker = tokio::time::interval(Duration::from_secs(1));
        ticker.tick().await; // first tick resolves immediately
        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let events = service.tick();
                    report(&events);
                    if service.state() == TimerState::Completed {
                        break;
                    }
                }
                _ = tokio::signal::ctrl_c() => {
                    println!();
                    if let Ok(events) = service.stop() {
                        report(&events);
                    }
                    break;
                }
            }
        }
    });
    Ok(())
}

fn report(events: &[Event]) {
    for event in events {
        match event {
            Event::Tick { remaining_secs } => render_remaining(*remaining_secs),
            Event::IntervalChime { remaining_min } => {
                println!();
                println!("* interval chime -- {remaining_min} minutes remaining");
            }
            Event::TimerStarted {
                duration_min,
                interval_chime_min,
                ..
            } => {
                if *interval_chime_min > 0 {
                    println!(
                        "Meditating for {duration_min} minutes (chime every {interval_chime_min})"
                    );
                } else {
                    println!("Meditating for {duration_min} minutes");
                }
            }
            Event::TimerStopped { elapsed_secs, .. } => {
                println!("Stopped after {}:{:02}", elapsed_secs / 60, elapsed_secs % 60);
            }
            Event::TimerCompleted { .. } => println!(),
            Event::SessionRecorded {
                date,
                minutes,
                day_total_minutes,
                ..
            } => {
                println!("Recorded {minutes} min for {date} (day total: {day_total_minutes} min)");
            }
            Event::SessionCompleted { total_minutes, .. } => {
                println!("Meditation completed! You meditated for {total_minutes} minutes.");
            }
            Event::PlaybackUnavailable { resource, detail } => {
                eprintln!("warning: playback '{resource}' unavailable: {detail}");
            }
            Event::PersistenceUnavailable { detail } => {
                eprintln!("warning: could not save: {detail}");
            }
            Event::StateChanged { .. } | Event::TimerPaused { .. } | Event::TimerResumed { .. } => {}
        }
    }
}

fn render_remaining(remaining_secs: u32) {
    print!("\r  {:02}:{:02} ", remaining_secs / 60, remaining_secs % 60);
    let _ = std::io::stdout().flush();
}
