use anyhow::{bail, Context};
use clap::Parser;
use fire_grid_core::{ActionOutcome, FireSimulation, SimConfig};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Fire grid demo with configurable parameters
#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
#[command(name = "fire-grid-headless")]
#[command(about = "Headless driver for the fire spread cellular automaton", long_about = None)]
struct Args {
    /// Cells per side of the square grid
    #[arg(short, long, default_value_t = 32)]
    size: usize,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 200)]
    ticks: u64,

    /// Ticks a cell burns before turning to ash
    #[arg(long, default_value_t = 40)]
    fuel: u32,

    /// Heat a tree must accumulate to ignite
    #[arg(long, default_value_t = 5)]
    heat: u32,

    /// Ticks a cell stays as ash before regrowing
    #[arg(long, default_value_t = 80)]
    ash_time: u32,

    /// Cell to ignite as `row,col` (repeatable, default: grid centre)
    #[arg(short, long = "ignite", value_parser = parse_cell)]
    ignite: Vec<(usize, usize)>,

    /// Cell to turn into a wall as `row,col` (repeatable)
    #[arg(short, long = "wall", value_parser = parse_cell)]
    wall: Vec<(usize, usize)>,

    /// Fraction of cells turned into walls at random (0-1)
    #[arg(long, default_value_t = 0.0)]
    wall_density: f64,

    /// Seed for random wall placement
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Report interval in ticks (0 = only the final report)
    #[arg(short, long, default_value_t = 20)]
    report_every: u64,

    /// Sleep the configured tick interval between ticks
    #[arg(long)]
    realtime: bool,

    /// Print the grid with every report
    #[arg(long)]
    show_grid: bool,

    /// Stop early once nothing is burning
    #[arg(long)]
    stop_when_out: bool,

    /// Print final statistics as JSON
    #[arg(long)]
    json: bool,
}

fn parse_cell(value: &str) -> Result<(usize, usize), String> {
    let (row, col) = value
        .split_once(',')
        .ok_or_else(|| format!("expected `row,col`, got `{value}`"))?;
    let row = row
        .trim()
        .parse()
        .map_err(|e| format!("invalid row `{row}`: {e}"))?;
    let col = col
        .trim()
        .parse()
        .map_err(|e| format!("invalid column `{col}`: {e}"))?;
    Ok((row, col))
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    if !(0.0..=1.0).contains(&args.wall_density) {
        bail!("--wall-density must be between 0 and 1, got {}", args.wall_density);
    }

    let config = SimConfig::default()
        .with_grid_size(args.size)
        .with_fuel_capacity(args.fuel)
        .with_heat_to_ignite(args.heat)
        .with_ash_time(args.ash_time);
    let mut sim = FireSimulation::new(&config).context("invalid simulation options")?;

    println!("=== Fire Grid Demo ===\n");
    println!(
        "Grid {}x{}, fuel={}, heat_to_ignite={}, ash_time={}",
        args.size, args.size, args.fuel, args.heat, args.ash_time
    );

    let ignitions = if args.ignite.is_empty() {
        vec![(args.size / 2, args.size / 2)]
    } else {
        args.ignite.clone()
    };

    for &(row, col) in &args.wall {
        sim.toggle_wall_at(row, col);
    }
    if args.wall_density > 0.0 {
        let mut rng = StdRng::seed_from_u64(args.seed);
        let mut placed = 0;
        for row in 0..args.size {
            for col in 0..args.size {
                if ignitions.contains(&(row, col)) || args.wall.contains(&(row, col)) {
                    continue;
                }
                if rng.random_bool(args.wall_density) {
                    sim.toggle_wall_at(row, col);
                    placed += 1;
                }
            }
        }
        info!("Placed {} random walls (seed {})", placed, args.seed);
    }
    for &(row, col) in &ignitions {
        sim.ignite_at(row, col);
    }

    for _ in 0..args.ticks {
        sim.update();

        for executed in sim.executed_actions() {
            if let ActionOutcome::Rejected(err) = executed.outcome {
                warn!("Initial action rejected: {}", err);
            }
        }

        let tick = sim.tick();
        if args.report_every > 0 && tick % args.report_every == 0 {
            report(&sim, args.show_grid);
        }
        if args.stop_when_out && sim.stats().cells.is_extinguished() {
            println!("Fire is out after {} ticks", tick);
            break;
        }
        if args.realtime {
            std::thread::sleep(sim.tick_interval());
        }
    }

    println!("\n=== Final State ===");
    report(&sim, args.show_grid);
    if args.json {
        println!("{}", serde_json::to_string_pretty(&sim.stats())?);
    }

    Ok(())
}

fn report(sim: &FireSimulation, show_grid: bool) {
    let stats = sim.stats();
    let cells = stats.cells;
    println!(
        "Tick {:>5}: trees={:>5} burning={:>5} (+{:>3}) ash={:>5} walls={:>5}",
        stats.tick, cells.dormant, cells.ignited, cells.ignited_last_tick, cells.ash, cells.walls
    );
    if show_grid {
        print!("{}", sim.grid().to_text());
    }
}
