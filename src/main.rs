//! Game of Life CLI - Run a simulation seeded from an RLE file or a random grid.

#[cfg(feature = "dhat-heap")]
#[global_allocator]
static ALLOC: dhat::Alloc = dhat::Alloc;

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::thread;
use std::time::Duration;

use conway_life::{
    compute::{BoundaryMode, EvolutionEngine},
    render::TerminalRenderer,
    schema::{Seed, SimulationConfig},
};

/// Command-line options. Flags override values from `--config`.
#[derive(Debug, Default)]
struct Args {
    config: Option<PathBuf>,
    file: Option<PathBuf>,
    rsize: Option<usize>,
    seed: Option<u64>,
    boundary: Option<BoundaryMode>,
    generations: Option<u64>,
    interval: Option<u64>,
    example: bool,
}

fn parse_args(raw: &[String]) -> Result<Args, String> {
    let mut args = Args::default();
    let mut iter = raw.iter();

    while let Some(flag) = iter.next() {
        if flag == "--example" {
            args.example = true;
            continue;
        }

        let value = iter
            .next()
            .ok_or_else(|| format!("Missing value for {}", flag))?;
        match flag.as_str() {
            "--config" => args.config = Some(PathBuf::from(value)),
            "--file" => args.file = Some(PathBuf::from(value)),
            "--rsize" => args.rsize = Some(parse_value(flag, value)?),
            "--seed" => args.seed = Some(parse_value(flag, value)?),
            "--generations" => args.generations = Some(parse_value(flag, value)?),
            "--interval" => args.interval = Some(parse_value(flag, value)?),
            "--boundary" => args.boundary = Some(parse_value(flag, value)?),
            "--periodic" => {
                let periodic: bool = parse_value(flag, value)?;
                args.boundary = Some(if periodic {
                    BoundaryMode::Periodic
                } else {
                    BoundaryMode::ZeroPadded
                });
            }
            other => return Err(format!("Unknown argument: {}", other)),
        }
    }

    Ok(args)
}

fn parse_value<T>(flag: &str, value: &str) -> Result<T, String>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse()
        .map_err(|e| format!("Invalid value '{}' for {}: {}", value, flag, e))
}

fn print_usage(program: &str) {
    eprintln!("Usage: {} (--file <pattern.rle> | --rsize <n>) [options]", program);
    eprintln!();
    eprintln!("Run Conway's Game of Life in the terminal.");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --file <path>         RLE pattern file to seed the grid");
    eprintln!("  --rsize <n>           Random n x n grid");
    eprintln!("  --seed <u64>          RNG seed for --rsize");
    eprintln!("  --periodic <bool>     Periodic (true) or zero-padded (false) boundary");
    eprintln!("  --boundary <mode>     periodic | zero-padded");
    eprintln!("  --generations <n>     Stop after n generations (default: run forever)");
    eprintln!("  --interval <ms>       Delay between frames (default: 100)");
    eprintln!("  --config <path>       JSON configuration; seed read from <config>.seed.json");
    eprintln!("  --example             Print an example configuration");
}

fn main() {
    #[cfg(feature = "dhat-heap")]
    let _profiler = dhat::Profiler::new_heap();

    env_logger::init();

    let raw: Vec<String> = std::env::args().collect();
    let program = raw.first().map(String::as_str).unwrap_or("conway-life");

    let args = parse_args(raw.get(1..).unwrap_or_default()).unwrap_or_else(|e| {
        eprintln!("{}", e);
        print_usage(program);
        std::process::exit(1);
    });

    if args.example {
        print_example_config();
        return;
    }

    // Load configuration
    let mut config = match &args.config {
        Some(path) => SimulationConfig::from_json_file(path).unwrap_or_else(|e| {
            eprintln!("Error loading config: {}", e);
            std::process::exit(1);
        }),
        None => SimulationConfig::default(),
    };
    if let Some(boundary) = args.boundary {
        config.boundary = boundary;
    }
    if let Some(generations) = args.generations {
        config.generations = generations;
    }
    if let Some(interval) = args.interval {
        config.frame_interval_ms = interval;
    }

    // Pick the seed: explicit flags first, then a seed file next to the config
    let seed = if let Some(file) = &args.file {
        Seed::rle_file(file)
    } else if let Some(side) = args.rsize {
        Seed::random(side, args.seed)
    } else if let Some(seed) = args.config.as_ref().and_then(|c| load_seed_file(c)) {
        seed
    } else {
        print_usage(program);
        std::process::exit(1);
    };

    // Decode failures abort before anything is drawn
    let grid = seed.generate().unwrap_or_else(|e| {
        eprintln!("Error creating initial grid: {}", e);
        std::process::exit(1);
    });

    let mut engine = EvolutionEngine::new(grid, config.boundary);
    let mut renderer = TerminalRenderer::new(io::stdout().lock(), config.render.clone());
    let interval = Duration::from_millis(config.frame_interval_ms);

    loop {
        if let Err(e) = renderer.draw(&engine.stats(), engine.current_state()) {
            log::warn!("Stopping: cannot write frame: {}", e);
            break;
        }
        if config.generations > 0 && engine.generation() >= config.generations {
            break;
        }
        thread::sleep(interval);
        engine.evolve();
    }

    let stats = engine.stats();
    log::info!(
        "Finished after {} generations, population {}",
        stats.generation,
        stats.population
    );
}

/// Read `<config>.seed.json` if it exists.
fn load_seed_file(config_path: &Path) -> Option<Seed> {
    let seed_path = config_path.with_extension("seed.json");
    if !seed_path.exists() {
        return None;
    }

    let seed_str = fs::read_to_string(&seed_path).unwrap_or_else(|e| {
        eprintln!("Error reading seed file: {}", e);
        std::process::exit(1);
    });
    Some(serde_json::from_str(&seed_str).unwrap_or_else(|e| {
        eprintln!("Error parsing seed: {}", e);
        std::process::exit(1);
    }))
}

fn print_example_config() {
    let config = SimulationConfig::default();
    let seed = Seed::rle_file("patterns/gosper_glider_gun.rle");

    println!("Example configuration (config.json):");
    println!("{}", serde_json::to_string_pretty(&config).unwrap_or_default());
    println!();
    println!("Example seed (config.seed.json):");
    println!("{}", serde_json::to_string_pretty(&seed).unwrap_or_default());
}
