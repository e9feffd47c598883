use clap::{Args, Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;

use athlete_scores::config::{self, Config};
use athlete_scores::scoring::{
    self, CombinedEvent, EventTable, HealthCheck, Mark, Measurements, MetricTable,
};
use athlete_scores::{logging, output, request, training};

const EXIT_SUCCESS: i32 = 0;
const EXIT_INPUT: i32 = 1;
const EXIT_IO: i32 = 2;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score one mark (cm for jumps and throws, seconds for races)
    Event {
        /// Event name as listed by `events`, e.g. 100m, Longueur, Poids
        event: String,
        /// M or F
        sex: String,
        performance: f64,
        /// Fail instead of printing 0 when the mark cannot be scored
        #[arg(long)]
        strict: bool,
        /// Print {"score": N}
        #[arg(long)]
        json: bool,
    },
    /// Score and total the marks of a multi-event competition
    Combined {
        /// M or F
        sex: String,
        /// Marks as EVENT=PERFORMANCE, e.g. 100m=11.2 Poids=1450
        #[arg(required = true, value_parser = parse_mark)]
        marks: Vec<Mark>,
        /// Report events of this competition that have no mark
        #[arg(long, value_enum)]
        format: Option<CombinedEvent>,
        /// Tab-separated output for scripting
        #[arg(long, conflicts_with = "json")]
        tsv: bool,
        #[arg(long)]
        json: bool,
    },
    /// Compute the 0-10 recovery index from today's readings
    Recovery(RecoveryArgs),
    /// Answer a JSON scoring request read from FILE, or stdin for '-'
    Request {
        file: String,
        #[arg(long)]
        strict: bool,
    },
    /// Summarise training load from a JSON or YAML sessions file
    Load {
        file: PathBuf,
        /// Only count sessions in this window, e.g. 7d or 4w
        #[arg(long, value_parser = humantime::parse_duration)]
        window: Option<std::time::Duration>,
        /// Last day of the window (YYYY-MM-DD, default today)
        #[arg(long)]
        until: Option<chrono::NaiveDate>,
        #[arg(long)]
        json: bool,
    },
    /// List the configured points table
    Events,
    /// Write the built-in tables to a config file
    Init {
        /// Where to write (defaults to ~/.config/athlete-scores/config.yaml)
        #[arg(long)]
        path: Option<PathBuf>,
        /// Replace an existing file
        #[arg(long)]
        force: bool,
    },
}

#[derive(Args, Debug)]
struct RecoveryArgs {
    /// Hours slept
    #[arg(long)]
    sleep_duration: Option<f64>,
    /// Sleep quality, 0-10
    #[arg(long)]
    sleep_quality: Option<f64>,
    /// Resting heart rate, bpm
    #[arg(long)]
    resting_heart_rate: Option<f64>,
    /// Hand grip, kg
    #[arg(long)]
    hand_grip_test: Option<f64>,
    /// Longest expiration, seconds
    #[arg(long)]
    longest_expiration_test: Option<f64>,
    /// Single-leg balance, seconds
    #[arg(long)]
    single_leg_proprio_test: Option<f64>,
    /// Any other configured metric as NAME=VALUE
    #[arg(long = "metric", value_parser = parse_metric)]
    metrics: Vec<(String, f64)>,
    #[arg(long)]
    json: bool,
}

impl RecoveryArgs {
    fn measurements(&self) -> Measurements {
        let check = HealthCheck {
            sleep_duration: self.sleep_duration,
            sleep_quality: self.sleep_quality,
            resting_heart_rate: self.resting_heart_rate,
            hand_grip_test: self.hand_grip_test,
            longest_expiration_test: self.longest_expiration_test,
            single_leg_proprio_test: self.single_leg_proprio_test,
        };
        let mut measurements = check.measurements();
        for (name, value) in &self.metrics {
            measurements.insert(name.clone(), Some(*value));
        }
        measurements
    }
}

#[derive(Parser, Debug)]
#[command(name = "athlete-scores")]
#[command(about = "Points-table and recovery scoring for athletes", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging and score breakdowns
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/athlete-scores/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

fn parse_mark(s: &str) -> Result<Mark, String> {
    Mark::parse(s).map_err(|e| e.to_string())
}

fn parse_metric(s: &str) -> Result<(String, f64), String> {
    let (name, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got '{}'", s))?;
    let value: f64 = value
        .trim()
        .parse()
        .map_err(|e| format!("invalid value for {}: {}", name.trim(), e))?;
    Ok((name.trim().to_string(), value))
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string(value) {
        Ok(s) => println!("{}", s),
        Err(e) => {
            eprintln!("Failed to serialize output: {}", e);
            std::process::exit(EXIT_IO);
        }
    }
}

/// Load and validate the config, exiting on any problem.
fn load_tables(config_path: Option<PathBuf>) -> (EventTable, MetricTable) {
    let config: Config = match config::load_config(config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    // Validate tables at startup
    if let Err(errors) = config::validate_config(&config) {
        eprintln!("Scoring config errors:");
        for error in errors {
            eprintln!("  - {}", error);
        }
        std::process::exit(EXIT_CONFIG);
    }

    (config.event_table(), config.metric_table())
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config_path = cli.config.map(PathBuf::from);
    let use_colors = output::should_use_colors();

    match cli.command {
        Commands::Event {
            event,
            sex,
            performance,
            strict,
            json,
        } => {
            let (events, _) = load_tables(config_path);
            match scoring::evaluate_event(&events, &event, &sex, performance) {
                Ok(score) => {
                    if json {
                        print_json(&request::EventScoreResponse { score: score.points });
                    } else {
                        println!("{}", output::format_event_score(&score, use_colors));
                        if cli.verbose {
                            println!("{}", output::format_event_detail(&score));
                        }
                    }
                }
                Err(e) if strict => {
                    eprintln!("Cannot score mark: {}", e);
                    std::process::exit(EXIT_INPUT);
                }
                Err(e) => {
                    tracing::warn!("{}; scoring as 0", e);
                    if json {
                        print_json(&request::EventScoreResponse { score: 0 });
                    } else {
                        println!("{} ({}) {} -> 0 pts", event, sex, performance);
                    }
                }
            }
        }
        Commands::Combined {
            sex,
            marks,
            format,
            tsv,
            json,
        } => {
            let (events, _) = load_tables(config_path);
            let result = scoring::score_combined(&events, &sex, &marks, format);
            if json {
                print_json(&result);
            } else if tsv {
                println!("{}", output::format_combined_tsv(&result));
            } else {
                println!("{}", output::format_combined(&result, format, use_colors));
            }
        }
        Commands::Recovery(args) => {
            let (_, metrics) = load_tables(config_path);
            let result = scoring::evaluate_recovery(&metrics, &args.measurements());
            if args.json {
                print_json(&request::RecoveryResponse {
                    recovery_score: result.score,
                });
            } else {
                println!("{}", output::format_recovery(&result, cli.verbose, use_colors));
            }
        }
        Commands::Request { file, strict } => {
            let (events, metrics) = load_tables(config_path);
            let mut body = String::new();
            let read = if file == "-" {
                std::io::stdin().read_to_string(&mut body).map(|_| ())
            } else {
                std::fs::read_to_string(&file).map(|s| body = s)
            };
            if let Err(e) = read {
                eprintln!("Failed to read request {}: {}", file, e);
                std::process::exit(EXIT_IO);
            }

            let req = match request::ScoreRequest::parse(&body) {
                Ok(r) => r,
                Err(e) => {
                    eprintln!("Bad request: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };
            match req.respond(&events, &metrics, strict) {
                Ok(response) => print_json(&response),
                Err(e) => {
                    eprintln!("Cannot score mark: {}", e);
                    std::process::exit(EXIT_INPUT);
                }
            }
        }
        Commands::Load {
            file,
            window,
            until,
            json,
        } => {
            let sessions = match training::load_sessions(&file) {
                Ok(s) => s,
                Err(e) => {
                    eprintln!("{:#}", e);
                    std::process::exit(EXIT_IO);
                }
            };
            let window = window.map(|w| {
                let end = until.unwrap_or_else(|| chrono::Local::now().date_naive());
                let days = (w.as_secs() / 86_400).max(1);
                training::DateWindow::ending_on(end, u32::try_from(days).unwrap_or(u32::MAX))
            });
            if cli.verbose {
                if let Some(w) = window {
                    eprintln!("Window: {} to {}", w.start, w.end);
                }
            }
            let summary = training::summarize_load(&sessions, window);
            if json {
                print_json(&summary);
            } else {
                println!("{}", output::format_load_summary(&summary));
            }
        }
        Commands::Events => {
            let (events, _) = load_tables(config_path);
            println!("{}", output::format_event_table(&events, use_colors));
        }
        Commands::Init { path, force } => match config::write_default_config(path, force) {
            Ok(written) => println!("Config written to {}", written.display()),
            Err(e) => {
                eprintln!("Init failed: {:#}", e);
                std::process::exit(EXIT_CONFIG);
            }
        },
    }

    std::process::exit(EXIT_SUCCESS);
}
