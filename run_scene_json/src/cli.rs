use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;
use ricochet::{Float, ReflectionMode};

#[derive(Debug, Clone, Copy, ValueEnum)]
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

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum Reflection {
    Rotation,
    Householder,
}

impl From<Reflection> for ReflectionMode {
    fn from(reflection: Reflection) -> Self {
        match reflection {
            Reflection::Rotation => Self::Rotation,
            Reflection::Householder => Self::Householder,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "run_scene_json")]
#[command(about = "Trace every ray and project every rectangle of a JSON scene")]
pub struct Args {
    /// Path to the scene file
    pub scene: PathBuf,

    /// Write the results there instead of stdout
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Overrides the scene's segment cap
    #[arg(long)]
    pub max_segments: Option<usize>,

    /// Overrides the scene's safety padding
    #[arg(long)]
    pub safety_padding: Option<Float>,

    /// Overrides the scene's reflection formula
    #[arg(long, value_enum)]
    pub reflection: Option<Reflection>,

    #[arg(long, value_enum, default_value = "info", help = "Set the logging level")]
    pub log_level: LogLevel,
}
