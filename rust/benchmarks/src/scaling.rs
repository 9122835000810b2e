//! Scaling runs for the sieve and the combination search.
//!
//! Runs both stages for limits of increasing size, measuring wall-clock time
//! and result counts, and reports the empirical growth exponent between
//! consecutive sizes (log t2/t1 over log N2/N1).

use std::time::{Duration, Instant};

use semiprime_finder::{find_semiprimes_in, Sieve};

const LIMITS: [u64; 6] = [1_000, 10_000, 100_000, 1_000_000, 10_000_000, 50_000_000];

struct Measurement {
    limit: u64,
    primes: usize,
    found: usize,
    sieve_time: Duration,
    search_time: Duration,
}

fn main() {
    println!("================================================================");
    println!("  SCALING: Sieve + Combination Search");
    println!("================================================================\n");

    println!(
        "  {:>10} {:>10} {:>10} {:>12} {:>12} {:>8}",
        "N", "primes", "found", "sieve_us", "search_us", "exp"
    );
    println!("  {}", "-".repeat(68));

    let mut previous: Option<Measurement> = None;
    for &limit in &LIMITS {
        let m = match measure(limit) {
            Some(m) => m,
            None => {
                println!("  {:>10} {:>10}", limit, "SKIP");
                continue;
            }
        };

        let exponent = previous
            .as_ref()
            .map(|p| growth_exponent(p.limit, total(p), m.limit, total(&m)))
            .map(|e| format!("{:.2}", e))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  {:>10} {:>10} {:>10} {:>12} {:>12} {:>8}",
            m.limit,
            m.primes,
            m.found,
            m.sieve_time.as_micros(),
            m.search_time.as_micros(),
            exponent
        );
        previous = Some(m);
    }

    println!();
    println!("  exp = growth exponent of total time relative to the previous row");
}

fn measure(limit: u64) -> Option<Measurement> {
    let start = Instant::now();
    let sieve = Sieve::new(limit).ok()?;
    let sieve_time = start.elapsed();

    let start = Instant::now();
    let found = find_semiprimes_in(&sieve);
    let search_time = start.elapsed();

    Some(Measurement {
        limit,
        primes: sieve.prime_count(),
        found: found.len(),
        sieve_time,
        search_time,
    })
}

fn total(m: &Measurement) -> f64 {
    (m.sieve_time + m.search_time).as_secs_f64()
}

fn growth_exponent(n1: u64, t1: f64, n2: u64, t2: f64) -> f64 {
    if t1 <= 0.0 || t2 <= 0.0 {
        return f64::NAN;
    }
    (t2 / t1).ln() / (n2 as f64 / n1 as f64).ln()
}
