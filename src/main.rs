use std::{
    fmt::Display,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use tracing::{debug, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use aoc2024::{load_input, Config, ALL_SOLUTIONS};

fn main() -> Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.rust_log))
                .context("invalid log filter")?,
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Some(threads) = config.threads {
        rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build_global()
            .context("failed to configure the global worker pool")?;
    }
    info!(
        threads = rayon::current_num_threads(),
        input_dir = %config.input_dir.display(),
        "starting"
    );

    let mut total = Duration::default();
    for &(day, solution) in ALL_SOLUTIONS {
        if !config.runs_day(day) {
            debug!(day, "skipped");
            continue;
        }
        total += execute_day(day, solution, |n| load_input(&config.input_path(n)))?;
    }
    println!("Total processing time: {}", format_duration(total));
    Ok(())
}

fn format_duration(dur: Duration) -> String {
    if dur.as_millis() != 0 {
        format!("{} ms", dur.as_millis())
    } else {
        format!("{} us", dur.as_micros())
    }
}

fn execute_day<I: ?Sized, J: AsRef<I>, S: Display, T: Display>(
    n: usize,
    f: fn(&I) -> Result<(S, T)>,
    input_loader: impl Fn(usize) -> Result<J>,
) -> Result<Duration> {
    println!("Day {}:", n);
    let input = input_loader(n)?;

    let start = Instant::now();
    let (part1, part2) = f(input.as_ref()).with_context(|| format!("day {n} failed"))?;
    let elapsed = start.elapsed();

    println!("  Part 1: {}", part1);
    println!("  Part 2: {}", part2);
    println!("  Finished in {}", format_duration(elapsed));
    println!("---------------------");
    Ok(elapsed)
}
