//! semiprime-finder CLI: run the search for one or more limits.
//!
//! Modes:
//!   --mode=evaluate --sizes=100000          Write CSV/text/JSON reports per size
//!   --mode=find --sizes=1000                Print every record
//!   --mode=endings --sizes=1000000          Runs of primes sharing a last digit
//!   --mode=primes --sizes=1000              Print the prime table
//!
//! See `config` for the full list of flags. Log verbosity follows `RUST_LOG`.

use std::time::Instant;

use semiprime_finder::config::{CliConfig, Mode};
use semiprime_finder::endings::consecutive_endings;
use semiprime_finder::report::{evaluate_sizes, prime_table, semiprime_listing};
use semiprime_finder::{SemiprimeFinder, Sieve};

/// Buckets with more runs than this are summarised by count only.
const MAX_LISTED_RUNS: usize = 100;

fn main() {
    env_logger::init();

    let config = match CliConfig::from_args(std::env::args().skip(1)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    };

    let start = Instant::now();
    let failures = match config.mode {
        Mode::Evaluate => run_evaluate_mode(&config),
        Mode::Find => run_find_mode(&config),
        Mode::Endings => run_endings_mode(&config),
        Mode::Primes => run_primes_mode(&config),
    };

    println!();
    println!("Done in {:.2}s ({} of {} sizes failed)", start.elapsed().as_secs_f64(), failures, config.sizes.len());
    if failures == config.sizes.len() {
        std::process::exit(1);
    }
}

fn run_evaluate_mode(config: &CliConfig) -> usize {
    println!("--- Evaluate Mode ---");
    println!("  Output: {}", config.out_dir.display());
    println!();
    println!("  {:>12} | {:>10} | {:>10} | {:>8} | {:>8} | {:>8}", "N", "Primes", "Found", "Missing", "Allowed", "Time(s)");
    println!("  {}", "-".repeat(72));

    let mut failures = 0;
    for (limit, result) in evaluate_sizes(&config.sizes, &config.out_dir) {
        match result {
            Ok(s) => println!(
                "  {:>12} | {:>10} | {:>10} | {:>8} | {:>8} | {:>8.2}",
                limit, s.primes, s.semiprimes, s.missing, s.allowed, s.elapsed_secs
            ),
            Err(e) => {
                println!("  {:>12} | FAILED: {}", limit, e);
                failures += 1;
            }
        }
    }
    failures
}

fn run_find_mode(config: &CliConfig) -> usize {
    let mut failures = 0;
    for &limit in &config.sizes {
        match SemiprimeFinder::new(limit) {
            Ok(finder) => {
                println!("--- N = {} ({} found) ---", limit, finder.semiprimes().len());
                print!("{}", semiprime_listing(finder.semiprimes()));
            }
            Err(e) => {
                log::error!("N={}: {}", limit, e);
                failures += 1;
            }
        }
    }
    failures
}

fn run_endings_mode(config: &CliConfig) -> usize {
    let mut failures = 0;
    for &limit in &config.sizes {
        let sieve = match Sieve::new(limit) {
            Ok(sieve) => sieve,
            Err(e) => {
                log::error!("N={}: {}", limit, e);
                failures += 1;
                continue;
            }
        };
        println!("--- N = {}: runs of at least {} ---", limit, config.min_run);
        for (len, runs) in consecutive_endings(sieve.primes(), config.min_run) {
            println!("{}", len);
            println!("-------------------");
            if runs.len() > MAX_LISTED_RUNS {
                println!("Size: {}", runs.len());
            } else {
                for run in &runs {
                    println!(" {:?}", run);
                }
            }
        }
    }
    failures
}

fn run_primes_mode(config: &CliConfig) -> usize {
    let mut failures = 0;
    for &limit in &config.sizes {
        match Sieve::new(limit) {
            Ok(sieve) => {
                println!("--- N = {} ({} primes) ---", limit, sieve.prime_count());
                print!("{}", prime_table(&sieve, config.per_line));
            }
            Err(e) => {
                log::error!("N={}: {}", limit, e);
                failures += 1;
            }
        }
    }
    failures
}
