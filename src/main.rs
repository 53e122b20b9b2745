use std::{path::PathBuf, time::Duration};

use clap::Parser;
use mazewalk::{app::App, generators::Bias, logging};

/// Largest accepted number of rows or columns
const MAX_SIDE: i64 = 255;

/// Watch a perfect maze being carved, then solve it or walk it yourself
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Number of cell rows (1 to 255)
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..=MAX_SIDE))]
    rows: u16,

    /// Number of cell columns (1 to 255)
    #[arg(long, default_value_t = 30, value_parser = clap::value_parser!(u16).range(1..=MAX_SIDE))]
    cols: u16,

    /// Seed for the first maze; later mazes are always random
    #[arg(long)]
    seed: Option<u64>,

    /// Weight skew: none, horizontal or vertical
    #[arg(long, default_value_t = Bias::None)]
    bias: Bias,

    /// Milliseconds between animation steps
    #[arg(long, default_value_t = 20)]
    tick_ms: u64,

    /// Directory for mazewalk.log
    #[arg(long, default_value = ".")]
    log_dir: PathBuf,

    /// Log every step, not just lifecycle events
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    let _guard = logging::init_file_logging(&args.log_dir, "mazewalk.log", args.verbose);
    tracing::info!("[main] starting with {:?}", args);

    let app = App::new(
        args.rows,
        args.cols,
        args.bias,
        args.seed,
        Duration::from_millis(args.tick_ms),
    );

    let mut stdout = std::io::stdout();
    App::setup_terminal(&mut stdout)?;
    let result = app.run();
    App::restore_terminal(&mut stdout)?;

    if let Err(e) = &result {
        eprintln!("mazewalk: {}", e);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions_are_capped() {
        let args = Args::try_parse_from(["mazewalk", "--rows", "255", "--cols", "1"]).unwrap();
        assert_eq!((args.rows, args.cols), (255, 1));
        assert!(Args::try_parse_from(["mazewalk", "--cols", "256"]).is_err());
        assert!(Args::try_parse_from(["mazewalk", "--rows", "0"]).is_err());
        assert!(Args::try_parse_from(["mazewalk", "--cols", "40000"]).is_err());
    }
}
