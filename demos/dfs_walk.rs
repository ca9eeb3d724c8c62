//! Depth-first walk through a cave or a map file.
//!
//! Run: cargo run --bin dfs-walk -- --policy always
//!      cargo run --bin dfs-walk -- --map cave.txt --from 0,0 --to 9,4
//!
//! Set `RUST_LOG=debug` to see search statistics.

use std::path::PathBuf;

use anyhow::{Context, bail};
use clap::Parser;
use gridwalk_core::{Point, WalkGrid};
use gridwalk_demos::{carve_cave, cave_center, parse_point, random_open_cell, render};
use gridwalk_paths::{DepthFirstFinder, DiagonalMovement, FinderOptions, path_length};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(about = "Find a route with depth-first search and draw it")]
struct Args {
    /// ASCII map to load (`.` walkable, `#` blocked). A random cave is
    /// carved when omitted.
    #[arg(long)]
    map: Option<PathBuf>,
    /// Diagonal movement policy. Overrides the legacy switches.
    #[arg(long)]
    policy: Option<DiagonalMovement>,
    /// Legacy switch: allow diagonal steps when no policy is given.
    #[arg(long)]
    allow_diagonal: bool,
    /// Legacy switch: forbid cutting corners when no policy is given.
    #[arg(long)]
    dont_cross_corners: bool,
    /// Start cell as `x,y`.
    #[arg(long, value_parser = parse_point)]
    from: Option<Point>,
    /// Goal cell as `x,y`.
    #[arg(long, value_parser = parse_point)]
    to: Option<Point>,
    /// Cave width.
    #[arg(long, default_value_t = 60)]
    width: i32,
    /// Cave height.
    #[arg(long, default_value_t = 20)]
    height: i32,
    /// Fraction of the cave to carve out.
    #[arg(long, default_value_t = 0.45)]
    fill: f64,
}

impl Args {
    fn options(&self) -> FinderOptions {
        FinderOptions {
            diagonal_movement: self.policy,
            allow_diagonal: self.allow_diagonal,
            dont_cross_corners: self.dont_cross_corners,
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Args::parse()) {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> anyhow::Result<()> {
    let mut rng = rand::rng();
    let (grid, from, to) = match &args.map {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()))?;
            let grid = WalkGrid::from_ascii(&text)
                .with_context(|| format!("parsing {}", path.display()))?;
            let (Some(from), Some(to)) = (args.from, args.to) else {
                bail!("--from and --to are required with --map");
            };
            (grid, from, to)
        }
        None => {
            let grid = carve_cave(args.width, args.height, args.fill, 64, &mut rng);
            let from = args.from.unwrap_or_else(|| cave_center(&grid));
            let to = match args.to {
                Some(to) => to,
                None => random_open_cell(&grid, &mut rng).context("cave has no open cells")?,
            };
            (grid, from, to)
        }
    };

    let mut finder = DepthFirstFinder::new(args.options());
    let path = finder.find(from, to, &grid)?;

    println!("{}", render(&grid, &path));
    if path.is_empty() {
        println!("no route from {from} to {to} ({})", finder.policy());
    } else {
        let stats = finder.last_stats();
        println!(
            "{} cells, length {:.2}, {} expanded, depth {} ({})",
            path.len(),
            path_length(&path),
            stats.expanded,
            stats.max_depth,
            finder.policy(),
        );
    }
    Ok(())
}
