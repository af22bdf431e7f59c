//! Command-line entry point: solve a seeded random instance with a chosen
//! formulation and report the tour.

use std::process::ExitCode;
use std::time::Duration;

use tsp_cutplane::driver::{CutPlaneConfig, CutPlaneRunner, Termination};
use tsp_cutplane::formulation::FormulationKind;
use tsp_cutplane::instance::Instance;
use tsp_cutplane::lp::MicrolpSolver;

const USAGE: &str = "\
usage: tsp-cutplane [options]
  -n, --points <count>        number of random points (default 30)
      --seed <seed>           random seed (default 25)
  -f, --formulation <name>    subtour | relaxation | mtz | flow | time-indexed
                              (default subtour)
      --rounds <count>        cutting-plane round budget, 0 = unlimited
                              (default 10)
      --time-limit <seconds>  wall-clock limit checked between rounds
  -h, --help                  print this help
";

struct Args {
    points: usize,
    seed: u64,
    formulation: FormulationKind,
    rounds: usize,
    time_limit: Option<Duration>,
}

fn parse_args() -> Result<Args, String> {
    let mut args = Args {
        points: 30,
        seed: 25,
        formulation: FormulationKind::Subtour,
        rounds: 10,
        time_limit: None,
    };

    let mut iter = std::env::args().skip(1);
    while let Some(flag) = iter.next() {
        match flag.as_str() {
            "-n" | "--points" => args.points = parse_value(&mut iter, &flag)?,
            "--seed" => args.seed = parse_value(&mut iter, &flag)?,
            "-f" | "--formulation" => args.formulation = parse_value(&mut iter, &flag)?,
            "--rounds" => args.rounds = parse_value(&mut iter, &flag)?,
            "--time-limit" => {
                args.time_limit = Some(Duration::from_secs(parse_value(&mut iter, &flag)?));
            }
            "-h" | "--help" => {
                print!("{USAGE}");
                std::process::exit(0);
            }
            other => return Err(format!("unknown flag '{other}'\n{USAGE}")),
        }
    }
    Ok(args)
}

fn parse_value<T: std::str::FromStr>(
    iter: &mut impl Iterator<Item = String>,
    flag: &str,
) -> Result<T, String>
where
    T::Err: std::fmt::Display,
{
    let raw = iter.next().ok_or_else(|| format!("{flag} needs a value"))?;
    raw.parse()
        .map_err(|e| format!("invalid value '{raw}' for {flag}: {e}"))
}

fn main() -> ExitCode {
    env_logger::init();

    let args = match parse_args() {
        Ok(args) => args,
        Err(message) => {
            eprintln!("{message}");
            return ExitCode::FAILURE;
        }
    };

    let instance = Instance::random(args.points, args.seed);
    let mut config = CutPlaneConfig::default()
        .with_formulation(args.formulation)
        .with_max_rounds(args.rounds);
    if let Some(limit) = args.time_limit {
        config = config.with_time_limit(limit);
    }

    match CutPlaneRunner::run(&instance, &config, &MicrolpSolver::new()) {
        Ok(result) => {
            println!("points:      {} (seed {})", args.points, args.seed);
            println!("objective:   {:.4}", result.objective);
            println!("rounds:      {} ({} cuts)", result.rounds, result.cuts.len());
            println!("elapsed:     {:.3?}", result.elapsed);
            match result.termination {
                Termination::Converged => println!("status:      converged"),
                Termination::RoundBudgetExhausted => {
                    println!("status:      round budget exhausted (bound only)")
                }
                Termination::TimeLimitReached => println!("status:      time limit reached"),
                Termination::Cancelled => println!("status:      cancelled"),
            }
            match result.tour {
                Some(tour) => println!("tour:        {tour:?}"),
                None => println!("tour:        not proven"),
            }
            ExitCode::SUCCESS
        }
        Err(error) => {
            eprintln!("solve failed: {error}");
            ExitCode::FAILURE
        }
    }
}
