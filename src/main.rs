//! Hoopstreak - headless basketball arcade round
//!
//! Plays one round without rendering and prints the final scores as JSON.
//!
//! Usage:
//!   cargo run -- --autoplay
//!   cargo run -- --mode versus --seed 7 --autoplay
//!   cargo run -- --settings config/game_settings.json

use hoopstreak::ai::ScriptedShooter;
use hoopstreak::session::{GameMode, JsonHighScoreStore};
use hoopstreak::settings::GameSettings;
use hoopstreak::simulation::{HeadlessAppBuilder, run_match};

/// Frames allowed past the round length before giving up
const FRAME_SLACK: u64 = 600;

struct Args {
    settings: Option<String>,
    mode: Option<GameMode>,
    seed: Option<u64>,
    autoplay: bool,
}

impl Args {
    fn from_env() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut parsed = Args {
            settings: None,
            mode: None,
            seed: None,
            autoplay: false,
        };

        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--settings" => {
                    if i + 1 < args.len() {
                        parsed.settings = Some(args[i + 1].clone());
                        i += 1;
                    }
                }
                "--mode" => {
                    if i + 1 < args.len() {
                        parsed.mode = match args[i + 1].as_str() {
                            "single" => Some(GameMode::SinglePlayer),
                            "versus" => Some(GameMode::VersusAi),
                            other => {
                                eprintln!("Warning: unknown mode '{}', using settings", other);
                                None
                            }
                        };
                        i += 1;
                    }
                }
                "--seed" => {
                    if i + 1 < args.len() {
                        parsed.seed = args[i + 1].parse().ok();
                        i += 1;
                    }
                }
                "--autoplay" => parsed.autoplay = true,
                "--help" | "-h" => {
                    print_help();
                    std::process::exit(0);
                }
                other => eprintln!("Warning: ignoring argument '{}'", other),
            }
            i += 1;
        }
        parsed
    }
}

fn print_help() {
    println!("hoopstreak - headless basketball arcade round");
    println!();
    println!("Options:");
    println!("  --settings <path>      Settings JSON (default: config/game_settings.json)");
    println!("  --mode single|versus   Override the game mode");
    println!("  --seed <n>             Seed the session RNG");
    println!("  --autoplay             Let a scripted shooter play the human side");
}

fn main() {
    let args = Args::from_env();

    let mut settings = GameSettings::load(args.settings.as_deref());
    if let Some(mode) = args.mode {
        settings.session.mode = mode;
    }
    let fps = 60;
    let max_frames = u64::from(settings.session.duration) * fps + FRAME_SLACK;

    let mut builder = HeadlessAppBuilder::new()
        .with_settings(settings)
        .with_logging()
        .with_high_score_store(Box::new(JsonHighScoreStore::default()));
    if let Some(seed) = args.seed {
        builder = builder.with_seed(seed);
    }
    if args.autoplay {
        builder = builder.with_autoplay(ScriptedShooter::default());
    } else {
        println!("No human input in headless mode; pass --autoplay to shoot");
    }

    let result = run_match(builder, max_frames);
    match serde_json::to_string_pretty(&result) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize result: {}", e),
    }
}
