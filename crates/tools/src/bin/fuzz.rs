use anyhow::{Context, Result, ensure};
use clap::Parser;
use mapgen::{DungeonRng, Grid, MapConfig, MapGenerator, Tile};
use rand_chacha::{
    ChaCha8Rng,
    rand_core::{Rng, SeedableRng},
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 500)]
    count: u64,
}

fn choose<T: Clone>(rng: &mut ChaCha8Rng, slice: &[T]) -> T {
    let p = rng.next_u64() as usize % slice.len();
    slice[p].clone()
}

fn odd_between(rng: &mut ChaCha8Rng, min: usize, max: usize) -> usize {
    let steps = (max - min) / 2 + 1;
    min + 2 * (rng.next_u64() as usize % steps)
}

fn unit(rng: &mut ChaCha8Rng) -> f64 {
    (rng.next_u64() >> 11) as f64 / (1_u64 << 53) as f64
}

fn random_config(rng: &mut ChaCha8Rng) -> MapConfig {
    let min_room_size = choose(rng, &[3, 5, 7]);
    MapConfig {
        width: odd_between(rng, 15, 99),
        height: odd_between(rng, 15, 61),
        min_room_size,
        max_room_size: min_room_size + choose(rng, &[0, 2, 4, 6]),
        allow_room_overlap: choose(rng, &[false, false, true]),
        num_room_attempts: rng.next_u64() as usize % 200,
        cave_width: odd_between(rng, 5, 31),
        cave_height: odd_between(rng, 5, 15),
        num_caves: rng.next_u64() as usize % 25,
        cave_setting: choose(rng, &[vec![], vec![], vec![6, 7, 8], vec![5, 6, 7, 8]]),
        cave_wall_chance: 0.25 + 0.15 * unit(rng),
        num_extra_connectors: rng.next_u64() as usize % 20,
        connector_thickness: choose(rng, &[1, 1, 2, 3]),
        straight_tendency: unit(rng),
        ..MapConfig::default()
    }
}

fn floor_is_connected(grid: &Grid) -> bool {
    let mut copy = grid.clone();
    let total = copy.count(Tile::Floor);
    let Some(start) = copy.positions_of(Tile::Floor).next() else {
        return true;
    };
    copy.flood_fill(start.x, start.y, Tile::Door) == total
}

fn border_is_wall(grid: &Grid) -> bool {
    let (width, height) = (grid.width() as i32, grid.height() as i32);
    (0..width).all(|x| grid.get(x, 0) == Tile::Wall && grid.get(x, height - 1) == Tile::Wall)
        && (0..height).all(|y| grid.get(0, y) == Tile::Wall && grid.get(width - 1, y) == Tile::Wall)
}

/// Runs one seed with the given knobs and checks the structural invariants.
fn check_seed(config: &MapConfig, seed: u64) -> Result<()> {
    let mut generator = MapGenerator::new(config.clone())
        .with_context(|| format!("fuzz drew an invalid config for seed {seed}: {config:?}"))?;
    generator.generate(&mut DungeonRng::new(seed));

    let grid = generator.grid();
    ensure!(
        !grid.tiles().iter().any(|tile| tile.is_scratch()),
        "Invariant failed: scratch markers left on seed {seed} with {config:?}"
    );
    ensure!(border_is_wall(grid), "Invariant failed: open border on seed {seed}");
    ensure!(floor_is_connected(grid), "Invariant failed: split floor on seed {seed}");
    ensure!(!generator.kill_dead_ends(), "Invariant failed: dead end left on seed {seed}");
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    println!("Starting map fuzz harness on {} seeds from {}...", args.count, args.seed);
    let mut knobs = ChaCha8Rng::seed_from_u64(args.seed);

    for offset in 0..args.count {
        let seed = args.seed.wrapping_add(offset);
        let config = random_config(&mut knobs);
        check_seed(&config, seed)?;
    }

    println!("Fuzzing completed successfully.");
    Ok(())
}
