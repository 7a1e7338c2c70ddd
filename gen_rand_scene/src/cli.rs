use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use ricochet::Float;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "gen_rand_scene")]
#[command(about = "Generate a random scene file, to be run with run_scene_json")]
pub struct Args {
    /// Where to write the scene
    pub output: PathBuf,

    #[arg(long, default_value_t = 12)]
    pub surfaces: usize,

    #[arg(long, default_value_t = 4)]
    pub rays: usize,

    #[arg(long, default_value_t = 1)]
    pub rectangles: usize,

    /// Travel budgets are drawn from `1..max_budget`
    #[arg(long, default_value_t = 50.)]
    pub max_budget: Float,

    /// Seed for reproducible scenes, random if omitted
    #[arg(long)]
    pub seed: Option<u64>,

    #[arg(long, value_enum, default_value = "info", help = "Set the logging level")]
    pub log_level: LogLevel,
}
