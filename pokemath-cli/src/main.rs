mod commands;
mod reports;
mod util;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use log::LevelFilter;
use pokemath_game::{FeatureFlags, StarDustRequest};
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;

use reports::{Report, ReportFormat, render};
use util::{parse_csv_dates, parse_csv_numbers, parse_date};

#[derive(Debug, Parser)]
#[command(name = "pokemath", version = "0.1.0")]
#[command(about = "Economy calculator and table checker for Pokémon Math Adventure")]
struct Args {
    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console, global = true)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    /// Feature flag document (JSON); defaults to the environment
    #[arg(long, global = true)]
    flags: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Level, remaining experience and band progress for an experience total
    Level { experience: f64 },
    /// Star dust and experience for one correctly answered problem
    Reward {
        /// easy, normal (medium) or hard
        #[arg(long, default_value = "normal")]
        difficulty: String,
        #[arg(long, default_value_t = 2)]
        table: u32,
        #[arg(long, default_value_t = 0)]
        hints: u32,
        #[arg(long, default_value_t = 0)]
        streak: u32,
    },
    /// Daily login bonus for a streak length
    DailyBonus { streak: u32 },
    /// Catch probability, reward and an optional seeded simulation
    Catch {
        rarity: String,
        #[arg(allow_negative_numbers = true)]
        level: i32,
        /// Simulated attempts
        #[arg(long, default_value_t = 0)]
        attempts: u32,
        #[arg(long, default_value_t = 1337)]
        seed: u64,
    },
    /// Roll wild encounter rarities for a table
    Encounter {
        table: u32,
        #[arg(long, default_value_t = 100)]
        count: u32,
        #[arg(long, default_value_t = 1337)]
        seed: u64,
    },
    /// Migrate completed region ids (comma-separated) to the reduced layout
    Migrate { regions: String },
    /// Aggregate stage and play-time savings of the reduction
    MigrationStats,
    /// Resolve a stored stage under the active stage layout
    Stage { region: u32, stage: u32 },
    /// Leaderboard score from experience, catches and completed tables
    Leaderboard {
        experience: f64,
        caught: u32,
        /// Completed table numbers (comma-separated)
        #[arg(long, default_value = "")]
        tables: String,
    },
    /// Summary and achievements for a trainer snapshot
    Trainer {
        #[arg(long)]
        file: PathBuf,
    },
    /// Consecutive-day streak from activity dates (YYYY-MM-DD, comma-separated)
    Streak {
        dates: String,
        /// Reference day; defaults to the local date
        #[arg(long)]
        today: Option<String>,
    },
    /// Check the stage reduction table invariants
    Verify,
}

fn main() -> Result<()> {
    let args = Args::parse();
    let flags = resolve_flags(&args)?;
    init_logging(args.verbose || flags.debug_logs);

    if args.report == ReportFormat::Console && args.output.is_none() {
        announce_banner();
    }

    let report = build_report(&args.command, &flags)?;
    let mut output_target = OutputTarget::new(args.output.clone())?;
    render(output_target.writer(), &report, args.report)?;
    output_target.flush_inner()?;

    if !report.passed {
        std::process::exit(1);
    }
    Ok(())
}

fn resolve_flags(args: &Args) -> Result<FeatureFlags> {
    let Some(path) = args.flags.as_ref() else {
        return Ok(FeatureFlags::from_env());
    };
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    FeatureFlags::from_json(&raw).with_context(|| format!("failed to load {}", path.display()))
}

fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_default_env();
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.init();
}

fn announce_banner() {
    println!("{}", "🎮 Pokémon Math Adventure Economy".bright_cyan().bold());
    println!("{}", "==================================".cyan());
}

fn build_report(command: &Command, flags: &FeatureFlags) -> Result<Report> {
    let report = match command {
        Command::Level { experience } => commands::level_report(*experience),
        Command::Reward {
            difficulty,
            table,
            hints,
            streak,
        } => commands::reward_report(&StarDustRequest {
            hints_used: *hints,
            streak: *streak,
            difficulty: commands::parse_difficulty(difficulty)?,
            table_number: *table,
        }),
        Command::DailyBonus { streak } => commands::daily_bonus_report(*streak),
        Command::Catch {
            rarity,
            level,
            attempts,
            seed,
        } => commands::catch_report(rarity, *level, *attempts, *seed),
        Command::Encounter { table, count, seed } => {
            commands::encounter_report(*table, *count, *seed)
        }
        Command::Migrate { regions } => commands::migrate_report(&parse_csv_numbers(regions)?),
        Command::MigrationStats => commands::migration_stats_report(),
        Command::Stage { region, stage } => commands::stage_report(flags, *region, *stage),
        Command::Leaderboard {
            experience,
            caught,
            tables,
        } => commands::leaderboard_report(*experience, *caught, &parse_csv_numbers(tables)?),
        Command::Trainer { file } => commands::trainer_report(file)?,
        Command::Streak { dates, today } => {
            let today = match today {
                Some(raw) => parse_date(raw)?,
                None => chrono::Local::now().date_naive(),
            };
            commands::streak_report(&parse_csv_dates(dates)?, today)
        }
        Command::Verify => commands::verify_report(),
    };
    Ok(report)
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}
