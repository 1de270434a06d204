//! Solve a grid with A* and print the search as text.
//!
//! Run: cargo run --bin astar-trace -- --size 20 --walls 0.3 --animate
//!
//! With `--map FILE` the grid comes from a text layout (`#` wall, `.` open,
//! `S` start, `G` goal). `--animate` prints one frame per step, pacing the
//! engine from this loop; `--json` dumps every frame instead.

use std::error::Error;
use std::path::PathBuf;
use std::thread;
use std::time::Duration;

use clap::Parser;
use gridstar_core::{Layout, ObstacleGrid, Point};
use gridstar_demos::{DEFAULT_SIZE, MAX_SIZE, MIN_SIZE, render, scatter_walls};
use gridstar_search::{EngineError, EngineResult, PathfindingEngine, SearchConfig, Status, record};
use rand::SeedableRng;
use rand::rngs::StdRng;

#[derive(Parser, Debug)]
#[command(name = "astar-trace", version, about = "Step-by-step A* on a grid")]
struct Args {
    /// Text layout to load instead of a random grid
    #[arg(long)]
    map: Option<PathBuf>,

    /// Side length of the random square grid
    #[arg(long, default_value_t = DEFAULT_SIZE,
          value_parser = clap::value_parser!(i32).range(MIN_SIZE as i64..=MAX_SIZE as i64))]
    size: i32,

    /// Probability that a random grid cell is a wall
    #[arg(long, default_value_t = 0.25)]
    walls: f64,

    /// Seed for the random grid
    #[arg(long)]
    seed: Option<u64>,

    /// Start cell as `x,y` (defaults to the layout's `S` or the top-left corner)
    #[arg(long, value_parser = parse_point)]
    start: Option<Point>,

    /// Goal cell as `x,y` (defaults to the layout's `G` or the bottom-right corner)
    #[arg(long, value_parser = parse_point)]
    goal: Option<Point>,

    /// Print every step instead of only the result
    #[arg(long)]
    animate: bool,

    /// Pause between animated frames
    #[arg(long, default_value_t = 100)]
    delay_ms: u64,

    /// Step budget (defaults to one more than the number of cells)
    #[arg(long)]
    max_steps: Option<usize>,

    /// Reject searches whose start equals the goal
    #[arg(long)]
    forbid_same_endpoint: bool,

    /// Print all frames as JSON
    #[arg(long, conflicts_with = "animate")]
    json: bool,
}

fn parse_point(s: &str) -> Result<Point, String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected x,y, got {s:?}"))?;
    let x = x.trim().parse::<i32>().map_err(|e| format!("bad x in {s:?}: {e}"))?;
    let y = y.trim().parse::<i32>().map_err(|e| format!("bad y in {s:?}: {e}"))?;
    Ok(Point::new(x, y))
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let (grid, start, goal) = build_grid(&args)?;
    let config = SearchConfig {
        allow_same_endpoint: !args.forbid_same_endpoint,
        step_limit: args.max_steps,
    };
    let mut engine = PathfindingEngine::with_grid(grid, config);
    engine.set_endpoints(start, goal)?;
    log::info!(
        "searching {start} -> {goal} on {}x{} grid with {} walls",
        engine.grid().width(),
        engine.grid().height(),
        engine.grid().blocked_count()
    );

    if args.json {
        let limit = engine.step_limit();
        let frames = record(&mut engine, limit)?;
        println!("{}", serde_json::to_string_pretty(&frames)?);
        return Ok(());
    }

    engine.start()?;
    if args.animate {
        animate(&mut engine, Duration::from_millis(args.delay_ms), print_frame)?;
    } else {
        engine.run_to_completion()?;
        print_frame(&engine);
    }

    match engine.current_path() {
        Ok(path) => log::info!(
            "path found with length {} after {} steps",
            path.len(),
            engine.steps()
        ),
        Err(_) if engine.status() == Status::Failed => log::warn!("no path found"),
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

/// Step a started search until it resolves, showing the state before the
/// first step and after every step.
///
/// Fails with [`EngineError::StepLimitExceeded`] once the engine's step
/// budget is spent; the search is left running.
fn animate(
    engine: &mut PathfindingEngine,
    delay: Duration,
    mut show: impl FnMut(&PathfindingEngine),
) -> EngineResult<Status> {
    let max_steps = engine.step_limit();
    show(engine);
    let mut taken = 0;
    while engine.status() == Status::Running {
        if taken == max_steps {
            log::warn!("stopped after {taken} steps");
            return Err(EngineError::StepLimitExceeded { max_steps });
        }
        thread::sleep(delay);
        engine.step();
        taken += 1;
        show(engine);
    }
    Ok(engine.status())
}

/// Grid plus endpoints, from `--map` or a random fill.
fn build_grid(args: &Args) -> Result<(ObstacleGrid, Point, Point), Box<dyn Error>> {
    if let Some(path) = &args.map {
        let text = std::fs::read_to_string(path)?;
        let layout = Layout::parse(&text)?;
        let last = layout.grid.size() - Point::new(1, 1);
        let start = args.start.or(layout.start).unwrap_or(Point::ZERO);
        let goal = args.goal.or(layout.goal).unwrap_or(last);
        return Ok((layout.grid, start, goal));
    }

    let mut grid = ObstacleGrid::new(args.size, args.size);
    let start = args.start.unwrap_or(Point::ZERO);
    let goal = args.goal.unwrap_or(Point::new(args.size - 1, args.size - 1));
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    scatter_walls(&mut grid, args.walls, &[start, goal], &mut rng);
    Ok((grid, start, goal))
}

fn print_frame(engine: &PathfindingEngine) {
    let frame = engine.frame();
    println!(
        "step {} [{}] open {} closed {}",
        frame.step,
        frame.status,
        frame.open.len(),
        frame.closed.len()
    );
    println!("{}\n", render(engine.grid(), engine.endpoints(), &frame));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_point_accepts_spaces() {
        assert_eq!(parse_point("3, 4"), Ok(Point::new(3, 4)));
        assert!(parse_point("3;4").is_err());
        assert!(parse_point("a,4").is_err());
    }

    #[test]
    fn args_parse_defaults() {
        let args = Args::try_parse_from(["astar-trace", "--seed", "1"]).unwrap();
        assert_eq!(args.size, DEFAULT_SIZE);
        assert!(!args.animate);
        let (grid, start, goal) = build_grid(&args).unwrap();
        assert_eq!(grid.size(), Point::new(DEFAULT_SIZE, DEFAULT_SIZE));
        assert_eq!(start, Point::ZERO);
        assert_eq!(goal, Point::new(DEFAULT_SIZE - 1, DEFAULT_SIZE - 1));
        assert!(!grid.is_blocked(start));
        assert!(!grid.is_blocked(goal));
    }

    fn started(size: i32, step_limit: Option<usize>) -> PathfindingEngine {
        let config = SearchConfig {
            step_limit,
            ..SearchConfig::default()
        };
        let mut engine = PathfindingEngine::with_grid(ObstacleGrid::new(size, size), config);
        engine.set_endpoints((0, 0), (size - 1, size - 1)).unwrap();
        engine.start().unwrap();
        engine
    }

    #[test]
    fn animate_shows_every_step() {
        let mut engine = started(5, None);
        let mut shown = Vec::new();
        let status = animate(&mut engine, Duration::ZERO, |e| shown.push(e.frame()));
        assert_eq!(status, Ok(Status::Solved));
        assert_eq!(shown.len(), engine.closed_set_snapshot().len() + 1);
        assert_eq!(shown.last().unwrap().path.len(), 9);
    }

    #[test]
    fn animate_reports_exhausted_budget() {
        let mut engine = started(10, Some(2));
        let mut shown = 0;
        let err = animate(&mut engine, Duration::ZERO, |_| shown += 1);
        assert_eq!(err, Err(EngineError::StepLimitExceeded { max_steps: 2 }));
        assert_eq!(shown, 3);
        assert_eq!(engine.status(), Status::Running);
    }

    #[test]
    fn size_is_range_checked() {
        assert!(Args::try_parse_from(["astar-trace", "--size", "4"]).is_err());
        assert!(Args::try_parse_from(["astar-trace", "--size", "51"]).is_err());
    }
}
