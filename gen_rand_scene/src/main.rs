mod cli;
mod logger;

use std::{
    error::Error,
    fs::File,
    io::{BufWriter, Write},
    iter,
};

use clap::Parser;
use cli::Args;
use log::info;
use ricochet::*;
use ricochet_json::{serde_json, DynSurface, JsonSer, RayLaunch, RectangleLaunch, SceneFile};
use ricochet_random::{
    rand::{rngs::StdRng, Rng, SeedableRng},
    rand_budget, Random,
};
use ricochet_shapes::{BoxMirror, Circle, Segment};

fn random_surface(rng: &mut impl Rng) -> DynSurface {
    match rng.gen_range(0usize..3) {
        0 => DynSurface::boxed(Segment::random(rng)),
        1 => DynSurface::boxed(Circle::random(rng)),
        _ => DynSurface::boxed(BoxMirror::random(rng)),
    }
}

fn generate_random_scene(args: &Args, rng: &mut impl Rng) -> SceneFile<DynSurface> {
    let max_budget = args.max_budget;

    SceneFile {
        config: TraceConfig::default(),
        surfaces: iter::repeat_with(|| random_surface(rng))
            .take(args.surfaces)
            .collect(),
        rays: iter::repeat_with(|| RayLaunch {
            ray: Ray::random(rng),
            budget: rand_budget(rng, max_budget),
        })
        .take(args.rays)
        .collect(),
        rectangles: iter::repeat_with(|| RectangleLaunch {
            rect: Rectangle::random(rng),
            dir: Direction::random(rng),
            budget: rand_budget(rng, max_budget),
            edge_rays: EdgeRays::default(),
        })
        .take(args.rectangles)
        .collect(),
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    logger::init_logger(args.log_level.into());

    let seed = args.seed.unwrap_or_else(rand_seed);
    info!("generating scene with seed {seed}");

    let scene = generate_random_scene(&args, &mut StdRng::seed_from_u64(seed));

    let mut file = BufWriter::new(File::create(&args.output)?);
    serde_json::to_writer_pretty(&mut file, &scene.to_json())?;
    file.flush()?;

    info!(
        "wrote {} surfaces, {} rays and {} rectangles to {}",
        scene.surfaces.len(),
        scene.rays.len(),
        scene.rectangles.len(),
        args.output.display()
    );

    Ok(())
}

fn rand_seed() -> u64 {
    StdRng::from_entropy().gen()
}
