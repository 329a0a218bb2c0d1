//! Generate a cave, print it, and walk an agent across it.
//!
//! Run: cargo run --bin cave -- [seed] [width] [height]
//! Set `RUST_LOG=debug` to see generation and search details.

use std::collections::HashSet;
use std::process;

use delve_core::{Point, TileGrid, TileMap, grid_to_world, world_to_grid};
use delve_gen::{LevelConfig, generate_level};
use delve_paths::PathProvider;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn parse_arg<T: std::str::FromStr>(args: &[String], i: usize, default: T) -> T {
    match args.get(i) {
        Some(s) => s.parse().unwrap_or_else(|_| {
            eprintln!("Error: invalid argument \u{201c}{s}\u{201d}");
            process::exit(2);
        }),
        None => default,
    }
}

/// First and last open tiles in row-major order.
fn endpoints(grid: &TileGrid) -> Option<(Point, Point)> {
    let mut open = grid.iter().filter(|t| t.is_open()).map(|t| t.pos);
    let first = open.next()?;
    Some((first, open.last().unwrap_or(first)))
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let seed: u64 = parse_arg(&args, 1, 1);
    let mut config = LevelConfig::default();
    config.cave.width = parse_arg(&args, 2, 64);
    config.cave.height = parse_arg(&args, 3, 40);

    let grid = match generate_level(&config, StdRng::seed_from_u64(seed)) {
        Ok(grid) => grid,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };
    log::info!("seed {seed}: {} open tiles", grid.count_open());

    let Some((from, to)) = endpoints(&grid) else {
        print!("{grid}");
        println!("no open tiles");
        return;
    };

    let tile_size = grid.tile_size();
    let mut provider = PathProvider::new(grid);
    let path = provider.find_path(grid_to_world(from, tile_size), grid_to_world(to, tile_size));
    let steps: HashSet<Point> = path.iter().map(|&w| world_to_grid(w, tile_size)).collect();

    let grid = provider.grid();
    for y in 0..grid.height() {
        let row: String = (0..grid.width())
            .map(|x| {
                let p = Point::new(x, y);
                if p == from {
                    '@'
                } else if p == to {
                    '>'
                } else if steps.contains(&p) {
                    '*'
                } else {
                    grid.tile_at(p).map_or(' ', |t| t.kind.glyph())
                }
            })
            .collect();
        println!("{row}");
    }
    println!(
        "{} -> {}: {} waypoints ({:?})",
        from,
        to,
        path.len(),
        provider.last_outcome()
    );
}
