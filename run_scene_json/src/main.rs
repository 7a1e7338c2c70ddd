mod cli;
mod logger;

use std::{
    error::Error,
    fs::File,
    io::{self, BufReader, BufWriter, Write},
};

use clap::Parser;
use cli::Args;
use log::info;
use ricochet_json::{serde_json, DynSurface, JsonDes, JsonSer, SceneFile};

fn load_scene(args: &Args) -> Result<SceneFile<DynSurface>, Box<dyn Error>> {
    let json: serde_json::Value =
        serde_json::from_reader(BufReader::new(File::open(&args.scene)?))?;

    let mut scene = SceneFile::from_json(&json)
        .map_err(|e| format!("invalid scene {}: {e}", args.scene.display()))?;

    if let Some(max_segments) = args.max_segments {
        scene.config.max_segments = max_segments;
    }
    if let Some(safety_padding) = args.safety_padding {
        scene.config.safety_padding = safety_padding;
    }
    if let Some(reflection) = args.reflection {
        scene.config.reflection = reflection.into();
    }

    scene.config.validate()?;
    Ok(scene)
}

fn run(args: &Args) -> Result<(), Box<dyn Error>> {
    let scene = load_scene(args)?;
    let results = scene.run()?.to_json();

    match &args.output {
        Some(path) => {
            let mut file = BufWriter::new(File::create(path)?);
            serde_json::to_writer_pretty(&mut file, &results)?;
            file.flush()?;
            info!("results written to {}", path.display());
        }
        None => {
            let mut stdout = io::stdout().lock();
            serde_json::to_writer_pretty(&mut stdout, &results)?;
            writeln!(stdout)?;
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();
    logger::init_logger(args.log_level.into());
    run(&args)
}
