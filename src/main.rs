//! Neural HUD demo driver
//!
//! Feeds a scripted (or seeded random) event stream through the HUD on a
//! fixed timestep and prints HUD frames as JSON lines.
//!
//! ```text
//! neural-hud [SCRIPT.json] [--settings FILE] [--seed N] [--seconds S]
//! ```

use std::io::{self, Write};
use std::process::ExitCode;

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Deserialize;
use thiserror::Error;

use neural_hud::consts::*;
use neural_hud::hud::IconKind;
use neural_hud::{
    DomainEvent, EventBus, Hud, HudFrame, HudPresenter, HudSettings, PresenterStatus,
    SettingsError, Unlock, UpgradeKind,
};

#[derive(Debug, Error)]
enum DemoError {
    #[error("{0}")]
    Usage(String),
    #[error(transparent)]
    Settings(#[from] SettingsError),
    #[error("failed to read script: {0}")]
    Io(#[from] io::Error),
    #[error("failed to parse script: {0}")]
    Script(#[from] serde_json::Error),
}

/// An event and the simulated time it fires at
#[derive(Debug, Clone, Deserialize)]
struct ScriptedEvent {
    at: f32,
    event: DomainEvent,
}

#[derive(Debug)]
struct Args {
    script: Option<String>,
    settings: Option<String>,
    seed: u64,
    seconds: f32,
}

impl Args {
    fn parse() -> Result<Self, DemoError> {
        let mut args = Args {
            script: None,
            settings: None,
            seed: 12345,
            seconds: 20.0,
        };
        let mut it = std::env::args().skip(1);
        while let Some(arg) = it.next() {
            match arg.as_str() {
                "--seed" => args.seed = parse_value(&mut it, "--seed")?,
                "--seconds" => args.seconds = parse_value(&mut it, "--seconds")?,
                "--settings" => args.settings = Some(value(&mut it, "--settings")?),
                s if s.starts_with("--") => {
                    return Err(DemoError::Usage(format!("unknown option {s}")));
                }
                path => args.script = Some(path.to_string()),
            }
        }
        Ok(args)
    }
}

fn value(it: &mut impl Iterator<Item = String>, flag: &str) -> Result<String, DemoError> {
    it.next()
        .ok_or_else(|| DemoError::Usage(format!("{flag} needs a value")))
}

fn parse_value<T: std::str::FromStr>(
    it: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<T, DemoError> {
    let raw = value(it, flag)?;
    raw.parse()
        .map_err(|_| DemoError::Usage(format!("bad value for {flag}: {raw}")))
}

/// Writes one JSON line every `every` frames
struct JsonLinePresenter {
    out: io::Stdout,
    every: u32,
    frames: u32,
}

impl HudPresenter for JsonLinePresenter {
    fn present(&mut self, frame: &HudFrame) -> PresenterStatus {
        self.frames += 1;
        if self.frames % self.every != 0 && frame.expired.is_empty() {
            return PresenterStatus::Attached;
        }
        let line = match serde_json::to_string(frame) {
            Ok(line) => line,
            Err(e) => {
                log::warn!("Frame not serializable: {}", e);
                return PresenterStatus::Attached;
            }
        };
        // Closed stdout (e.g. `| head`) means nobody is watching any more
        match writeln!(self.out.lock(), "{line}") {
            Ok(()) => PresenterStatus::Attached,
            Err(_) => PresenterStatus::Detached,
        }
    }
}

/// Seeded random run: an unlock burst, heat swings and upgrade pickups
fn generate_script(seed: u64, seconds: f32) -> Vec<ScriptedEvent> {
    let mut rng = Pcg32::seed_from_u64(seed);
    let mut script = vec![
        ScriptedEvent {
            at: 0.5,
            event: DomainEvent::Unlock(Unlock::new(
                "First Blood",
                "Kill your first enemy",
                IconKind::Combat,
            )),
        },
        ScriptedEvent {
            at: 0.6,
            event: DomainEvent::Unlock(Unlock::new(
                "Survivor",
                "Survive for 60 seconds",
                IconKind::Survival,
            )),
        },
    ];

    // Heat: fire in bursts, cool down in between
    let mut heat: f32 = 0.0;
    let mut t: f32 = 0.0;
    while t < seconds {
        let firing = rng.random_bool(0.6);
        heat = if firing {
            (heat + rng.random_range(5.0_f32..20.0)).min(100.0)
        } else {
            (heat - rng.random_range(10.0_f32..25.0)).max(0.0)
        };
        script.push(ScriptedEvent {
            at: t,
            event: DomainEvent::MeterChanged {
                current: heat,
                max: 100.0,
                overheated: heat >= 100.0,
            },
        });
        t += 0.25;
    }

    // Upgrades every couple of seconds, sometimes refreshed
    let mut t: f32 = 1.0;
    let mut unlocks = 0;
    while t < seconds {
        let kind = UpgradeKind::ALL[rng.random_range(0..UpgradeKind::ALL.len())];
        script.push(ScriptedEvent {
            at: t,
            event: DomainEvent::BadgeActivated {
                kind,
                duration: rng.random_range(3.0_f32..10.0),
            },
        });
        if rng.random_bool(0.2) {
            unlocks += 1;
            script.push(ScriptedEvent {
                at: t,
                event: DomainEvent::Unlock(Unlock::new(
                    format!("Collector {unlocks}"),
                    format!("Pick up {}", kind.as_str()),
                    IconKind::Score,
                )),
            });
        }
        t += rng.random_range(1.0_f32..3.0);
    }

    script.sort_by(|a, b| a.at.total_cmp(&b.at));
    script
}

fn load_script(path: &str) -> Result<Vec<ScriptedEvent>, DemoError> {
    let json = std::fs::read_to_string(path)?;
    let mut script: Vec<ScriptedEvent> = serde_json::from_str(&json)?;
    script.sort_by(|a, b| a.at.total_cmp(&b.at));
    log::info!("Loaded {} scripted events from {}", script.len(), path);
    Ok(script)
}

fn run(args: Args) -> Result<(), DemoError> {
    let settings = match &args.settings {
        Some(path) => HudSettings::load(path)?,
        None => HudSettings::default(),
    };
    let script = match &args.script {
        Some(path) => load_script(path)?,
        None => {
            log::info!("Generating events with seed {}", args.seed);
            generate_script(args.seed, args.seconds)
        }
    };

    let bus = EventBus::new();
    let mut hud = Hud::new(&bus, &settings)?;
    hud.activate();

    let mut presenter = JsonLinePresenter {
        out: io::stdout(),
        every: (0.5 / FRAME_DT).round() as u32,
        frames: 0,
    };

    // Host frames arrive with jitter; the HUD steps at a fixed rate
    let mut jitter = Pcg32::seed_from_u64(args.seed ^ 0x5eed);
    let mut clock: f32 = 0.0;
    let mut accumulator: f32 = 0.0;
    let mut next_event = 0;
    while clock < args.seconds && hud.is_active() {
        let host_dt: f32 = (FRAME_DT * jitter.random_range(0.5_f32..2.0)).min(0.1);
        accumulator += host_dt;

        let mut substeps = 0;
        while accumulator >= FRAME_DT && substeps < MAX_SUBSTEPS {
            while next_event < script.len() && script[next_event].at <= clock {
                bus.publish(script[next_event].event.clone());
                next_event += 1;
            }
            if !hud.frame(FRAME_DT, &mut presenter) {
                break;
            }
            clock += FRAME_DT;
            accumulator -= FRAME_DT;
            substeps += 1;
        }
    }

    hud.teardown();
    log::info!("Demo finished after {:.1}s ({} events)", clock, next_event);
    Ok(())
}

fn main() -> ExitCode {
    #[cfg(not(target_arch = "wasm32"))]
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    match Args::parse().and_then(run) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
