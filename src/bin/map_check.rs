//! Headless map validator.
//!
//! ```bash
//! cargo run --bin map_check -- assets/demo.map other.map
//! ```

use anyhow::Context;
use clap::Parser;
use log::{error, info};
use std::path::PathBuf;

use yaportal_rs::mapfile::{dump, load_map};

#[derive(Parser, Debug)]
#[command(about = "Load map files and report the first error", version)]
struct Args {
    /// Map files to check
    #[arg(required = true)]
    maps: Vec<PathBuf>,

    /// Only report failures
    #[arg(long)]
    quiet: bool,
}

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    for path in &args.maps {
        let map = match load_map(path) {
            Ok(map) => map,
            Err(e) => {
                error!("{}: {e}", path.display());
                return Err(e).with_context(|| format!("checking {}", path.display()));
            }
        };
        if !args.quiet {
            println!("{}:\n{}", path.display(), dump(&map));
        }
    }

    info!("{} map(s) ok", args.maps.len());
    Ok(())
}
