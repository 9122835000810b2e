//! Report generation: CSV evaluation table, plain-text listings and a JSON
//! run summary, written per size into an output directory.

use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use crate::evaluate::{allowed_map, factor_occurrences, last_digit_counts, missing_primes};
use crate::search::{SearchStats, SemiprimeFinder};
use crate::sequence::SemiprimeMap;
use crate::sieve::{Sieve, SieveError};

pub const CSV_HEADER: &str = "Prime,Sign,Allowed?,FactorCount,Factors";

/// Errors that can occur while producing reports.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("{0}")]
    Sieve(#[from] SieveError),

    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to serialize summary: {0}")]
    Json(#[from] serde_json::Error),
}

/// Summary of one evaluated size, saved as `{N}_summary.json`.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationSummary {
    pub limit: u64,
    pub primes: usize,
    pub semiprimes: usize,
    pub missing: usize,
    pub allowed: usize,
    pub max_factor_count: usize,
    pub stats: SearchStats,
    pub elapsed_secs: f64,
}

/// One CSV row per prime in the sieve, ascending, preceded by the header.
///
/// Every row has `4 + max_factor_count` columns; missing factor columns and
/// the fields of primes without a record are left empty or zero.
pub fn csv_lines(sieve: &Sieve, semiprimes: &SemiprimeMap) -> Vec<String> {
    let width = semiprimes.max_factor_count();
    let allowed = allowed_map(semiprimes);

    let mut lines = Vec::with_capacity(sieve.prime_count() + 1);
    lines.push(CSV_HEADER.to_string());
    for prime in sieve.primes() {
        let mut line = String::new();
        match semiprimes.get(prime) {
            Some(sequence) => {
                let is_allowed = allowed.get(&prime).copied().unwrap_or(false);
                let _ = write!(
                    line,
                    "{},{},{},{}",
                    prime,
                    sequence.sign(),
                    u8::from(is_allowed),
                    sequence.factor_count()
                );
                for factor in sequence.factors() {
                    let _ = write!(line, ",{}", factor);
                }
                line.push_str(&",".repeat(width - sequence.factor_count()));
            }
            None => {
                let _ = write!(line, "{},0,0,0", prime);
                line.push_str(&",".repeat(width));
            }
        }
        lines.push(line);
    }
    lines
}

/// Numbers one per line.
pub fn number_lines(numbers: &[u64]) -> String {
    let mut out = String::new();
    for n in numbers {
        let _ = writeln!(out, "{}", n);
    }
    out
}

/// `key<TAB>value` lines, in the iteration order given.
pub fn tabbed_lines<K, V, I>(pairs: I) -> String
where
    K: std::fmt::Display,
    V: std::fmt::Display,
    I: IntoIterator<Item = (K, V)>,
{
    let mut out = String::new();
    for (k, v) in pairs {
        let _ = writeln!(out, "{}\t{}", k, v);
    }
    out
}

/// Primes as a right-aligned table with `per_line` entries per line.
pub fn prime_table(sieve: &Sieve, per_line: usize) -> String {
    let per_line = per_line.max(1);
    let width = sieve.limit().to_string().len();
    let mut out = String::new();
    for (i, prime) in sieve.primes().enumerate() {
        let _ = write!(out, "{:>width$}, ", prime, width = width);
        if (i + 1) % per_line == 0 {
            out.push('\n');
        }
    }
    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

/// Human-readable `target: factors ± 1` listing of every record.
pub fn semiprime_listing(semiprimes: &SemiprimeMap) -> String {
    let mut out = String::new();
    for (target, sequence) in semiprimes.iter() {
        let _ = writeln!(out, "{}: {}", target, sequence);
    }
    out
}

fn write_file(path: &Path, contents: &str) -> Result<(), ReportError> {
    fs::write(path, contents).map_err(|source| ReportError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Run the search for `limit` and write all reports into `out_dir`.
pub fn evaluate_size(limit: u64, out_dir: &Path) -> Result<EvaluationSummary, ReportError> {
    let start = Instant::now();
    let finder = SemiprimeFinder::new(limit)?;
    let sieve = finder.sieve();
    let semiprimes = finder.semiprimes();

    fs::create_dir_all(out_dir).map_err(|source| ReportError::Io {
        path: out_dir.to_path_buf(),
        source,
    })?;

    let missing = missing_primes(sieve, semiprimes);
    let allowed = allowed_map(semiprimes)
        .iter()
        .filter(|(&p, &ok)| ok && semiprimes.contains(p))
        .count();

    let mut csv = csv_lines(sieve, semiprimes).join("\n");
    csv.push('\n');
    write_file(&out_dir.join(format!("{}_eval.csv", limit)), &csv)?;
    write_file(
        &out_dir.join(format!("{}_missingPrimes.txt", limit)),
        &number_lines(&missing),
    )?;
    write_file(
        &out_dir.join(format!("{}_factorCount.txt", limit)),
        &tabbed_lines(factor_occurrences(semiprimes)),
    )?;
    write_file(
        &out_dir.join(format!("{}_digitCount.txt", limit)),
        &tabbed_lines(last_digit_counts(semiprimes).iter().enumerate()),
    )?;

    let summary = EvaluationSummary {
        limit,
        primes: sieve.prime_count(),
        semiprimes: semiprimes.len(),
        missing: missing.len(),
        allowed,
        max_factor_count: semiprimes.max_factor_count(),
        stats: finder.stats().clone(),
        elapsed_secs: start.elapsed().as_secs_f64(),
    };
    let json = serde_json::to_string_pretty(&summary)?;
    write_file(&out_dir.join(format!("{}_summary.json", limit)), &json)?;

    log::info!(
        "Wrote evaluation for N={} to {} ({} semiprimes, {} missing primes)",
        limit,
        out_dir.display(),
        summary.semiprimes,
        summary.missing
    );
    Ok(summary)
}

/// Evaluate each size in turn with fresh state. A failure for one size is
/// logged and does not stop the remaining sizes.
pub fn evaluate_sizes(limits: &[u64], out_dir: &Path) -> Vec<(u64, Result<EvaluationSummary, ReportError>)> {
    limits
        .iter()
        .map(|&limit| {
            let result = evaluate_size(limit, out_dir);
            if let Err(e) = &result {
                log::error!("Evaluation for N={} failed: {}", limit, e);
            }
            (limit, result)
        })
        .collect()
}
