use std::{path::Path, time::Instant};

use mazewalk::{MazeError, MazeSession, Tick, generators::Bias, logging, solvers::Solver};

/// Step a session until it goes idle and return how many units of work it did.
fn drain(session: &mut MazeSession) -> Result<usize, MazeError> {
    let mut ticks = 0;
    while session.step()? != Tick::Idle {
        ticks += 1;
    }
    Ok(ticks)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = logging::init_file_logging(Path::new("."), "profile.log", false);

    let mut args = std::env::args();
    args.next(); // Skip executable name
    let rows = args.next().and_then(|s| s.parse::<u16>().ok()).unwrap_or(100);
    let cols = args.next().and_then(|s| s.parse::<u16>().ok()).unwrap_or(100);
    let num_iters = args.next().and_then(|s| s.parse::<u64>().ok()).unwrap_or(1);

    for seed in 0..num_iters {
        let start = Instant::now();
        let mut session = MazeSession::new(rows, cols, Bias::None, Some(seed))?;
        let build_ticks = drain(&mut session)?;

        for solver in [Solver::Bfs, Solver::Dfs] {
            session.refresh();
            session.start_search(solver)?;
            let ticks = drain(&mut session)?;
            println!(
                "seed {seed}: {solver}: {ticks} ticks, {} steps, {} wrong moves, path {} cells",
                session.steps(),
                session.wrong_moves(),
                session.path().len()
            );
        }
        println!(
            "seed {seed}: {rows}x{cols} built in {build_ticks} ticks, total {:?}",
            start.elapsed()
        );
    }
    Ok(())
}
