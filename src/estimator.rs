// Copyright 2023 Rémy Oudompheng. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Monte Carlo estimation of the permanent.
//!
//! Each trial draws a random sign-root matrix B, reduces it and
//! squares its determinant: the expected value of det(B)² is exactly
//! the permanent. The estimate is the mean over t trials; there is no
//! stopping rule, callers choose t for the accuracy they need.
//!
//! Trials are independent, so they can run on a thread pool. In that
//! case trials are grouped in blocks, each block using its own
//! generator seeded from the main one, and the result only depends
//! on the seed, not on the number of threads.

use std::cmp::min;
use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::gauss;
use crate::matrix::{IntMatrix, Mat};
use crate::signroot::random_sign_root;
use crate::{Error, Preferences, Verbosity};

/// Number of trials sharing a generator when running in parallel.
pub const TRIAL_BLOCK: usize = 256;

/// Runs a single trial and returns the squared determinant.
pub fn trial<R: Rng + ?Sized>(m: &IntMatrix, rng: &mut R) -> f64 {
    let mut b: Mat<f64> = random_sign_root(m, rng);
    gauss::reduce(&mut b);
    let det = gauss::determinant(&b);
    det * det
}

/// Estimates the permanent of `m` as the mean of `t` sequential trials
/// using random bits from `rng`.
pub fn compute_permanent<R: Rng + ?Sized>(
    m: &IntMatrix,
    t: usize,
    rng: &mut R,
) -> Result<f64, Error> {
    if t == 0 {
        return Err(Error::NoTrials);
    }
    Ok(partial_sum(m, t, t, rng))
}

// Sum of det²/t over `count` trials.
fn partial_sum<R: Rng + ?Sized>(m: &IntMatrix, count: usize, t: usize, rng: &mut R) -> f64 {
    let t = t as f64;
    let mut result = 0.0;
    for _ in 0..count {
        result += trial(m, rng) / t;
    }
    result
}

/// Estimates the permanent of `m` with `t` trials, according to
/// preferences (seed, verbosity). Trials are run on the thread pool
/// if one is given.
pub fn estimate(
    m: &IntMatrix,
    t: usize,
    prefs: &Preferences,
    tpool: Option<&rayon::ThreadPool>,
) -> Result<f64, Error> {
    if t == 0 {
        return Err(Error::NoTrials);
    }
    let start = Instant::now();
    let mut rng = match prefs.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    if prefs.verbose(Verbosity::Debug) {
        // Show the first trial without consuming randomness.
        show_trial(m, &mut rng.clone());
    }
    let result = if let Some(pool) = tpool {
        let blocks: Vec<(u64, usize)> = (0..t)
            .step_by(TRIAL_BLOCK)
            .map(|first| (rng.gen(), min(TRIAL_BLOCK, t - first)))
            .collect();
        if prefs.verbose(Verbosity::Verbose) {
            eprintln!(
                "Running {} blocks of {TRIAL_BLOCK} trials on {} threads",
                blocks.len(),
                pool.current_num_threads()
            );
        }
        let sums: Vec<f64> = pool.install(|| {
            blocks
                .par_iter()
                .map(|&(seed, count)| {
                    let mut rng = StdRng::seed_from_u64(seed);
                    partial_sum(m, count, t, &mut rng)
                })
                .collect()
        });
        // Sum in block order to keep results reproducible.
        sums.iter().sum()
    } else {
        partial_sum(m, t, t, &mut rng)
    };
    if prefs.verbose(Verbosity::Info) {
        let n = m.size();
        eprintln!(
            "Estimated permanent of {n}x{n} matrix ({t} trials) in {:.3}s: {result:.6e}",
            start.elapsed().as_secs_f64()
        );
    }
    Ok(result)
}

fn show_trial(m: &IntMatrix, rng: &mut StdRng) {
    let mut b: Mat<f64> = random_sign_root(m, rng);
    eprint!("Sign-root matrix:\n{b}");
    let e = gauss::reduce(&mut b);
    if e.is_singular() {
        eprintln!("Trial matrix is singular ({e:?})");
    }
    eprint!("Reduced matrix:\n{b}");
    eprintln!("Determinant {}", gauss::determinant(&b));
}

#[cfg(test)]
const MATRIX1: &str = "1 2 3 4; 5 6 7 8; 9 13 31 6; 13 2 2 7";

#[cfg(test)]
const MATRIX2: &str = "12 21 13 4 67; 15 26 17 8 14; 9 13 31 6 12; 13 2 2 7 8; 22 11 20 20 0";

// Sum over permutations, for small matrices.
#[cfg(test)]
fn exact_permanent(m: &IntMatrix) -> u64 {
    fn expand(m: &IntMatrix, row: usize, used: u32) -> u64 {
        if row == m.size() {
            return 1;
        }
        (0..m.size())
            .filter(|&j| used & (1 << j) == 0)
            .map(|j| m.get(row, j) * expand(m, row + 1, used | (1 << j)))
            .sum()
    }
    expand(m, 0, 0)
}

// Mean of det² over all 2^(n*n) sign patterns.
#[cfg(test)]
fn exact_mean(m: &IntMatrix) -> f64 {
    use crate::signroot::sign_root;

    let cells = m.size() * m.size();
    let patterns = 1u64 << cells;
    let mut sum = 0.0;
    for mask in 0..patterns {
        let mut k = 0;
        let mut b: Mat<f64> = sign_root(m, || {
            let negative = (mask >> k) & 1 == 1;
            k += 1;
            negative
        });
        gauss::reduce(&mut b);
        let det = gauss::determinant(&b);
        sum += det * det;
    }
    sum / patterns as f64
}

#[test]
fn test_expectation() {
    use std::str::FromStr;

    let m1 = IntMatrix::from_str(MATRIX1).unwrap();
    assert_eq!(exact_permanent(&m1), 39470);
    let m2 = IntMatrix::from_str(MATRIX2).unwrap();
    assert_eq!(exact_permanent(&m2), 73166432);

    for s in [
        "1 2; 3 4",
        "0 1 2; 3 0 4; 5 6 0",
        "1 2 3; 4 5 6; 7 8 9",
        "0 0 1; 0 1 0; 1 0 0",
        MATRIX1,
    ] {
        let m = IntMatrix::from_str(s).unwrap();
        let exact = exact_permanent(&m) as f64;
        let mean = exact_mean(&m);
        eprintln!("perm={exact} mean={mean}");
        assert!((mean - exact).abs() <= 1e-9 * exact, "{s}: {mean} != {exact}");
    }
}

#[test]
fn test_estimate_reference() {
    use std::str::FromStr;

    let mut rng = StdRng::seed_from_u64(2023);
    let m1 = IntMatrix::from_str(MATRIX1).unwrap();
    let est = compute_permanent(&m1, 200_000, &mut rng).unwrap();
    eprintln!("matrix1 estimate {est:.1} (exact 39470)");
    assert!((est - 39470.0).abs() < 0.1 * 39470.0);

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .unwrap();
    let mut prefs = Preferences::default();
    prefs.seed = Some(2023);
    prefs.verbosity = Verbosity::Silent;
    let m2 = IntMatrix::from_str(MATRIX2).unwrap();
    let est = estimate(&m2, 500_000, &prefs, Some(&pool)).unwrap();
    eprintln!("matrix2 estimate {est:.1} (exact 73166432)");
    assert!((est - 73166432.0).abs() < 0.1 * 73166432.0);

    // Low trial counts are noisy but never negative.
    let est = compute_permanent(&m2, 100, &mut rng).unwrap();
    assert!(est.is_finite() && est >= 0.0);
}

#[test]
fn test_estimate_permutation() {
    use std::str::FromStr;

    let m = IntMatrix::from_str(MATRIX1).unwrap();
    let perm = [3, 1, 0, 2];
    let rows = (0..4)
        .map(|i| (0..4).map(|j| m.get(perm[i], perm[j])).collect())
        .collect();
    let p = IntMatrix::from_rows(rows).unwrap();
    assert_eq!(exact_permanent(&p), exact_permanent(&m));

    let mut rng = StdRng::seed_from_u64(77);
    let e1 = compute_permanent(&m, 100_000, &mut rng).unwrap();
    let e2 = compute_permanent(&p, 100_000, &mut rng).unwrap();
    assert!((e1 - e2).abs() < 0.1 * 39470.0, "{e1} vs {e2}");
}

#[test]
fn test_estimate_degenerate() {
    use std::str::FromStr;

    let mut rng = StdRng::seed_from_u64(1);
    // A zero row or column forces every determinant to 0.
    for s in ["1 2 3; 0 0 0; 4 5 6", "1 0 3; 2 0 4; 5 0 6", "0"] {
        let m = IntMatrix::from_str(s).unwrap();
        assert_eq!(compute_permanent(&m, 500, &mut rng).unwrap(), 0.0);
    }
    // Signs do not matter for 1x1 and diagonal matrices.
    let m = IntMatrix::from_str("5").unwrap();
    for t in [1, 7, 100] {
        let est = compute_permanent(&m, t, &mut rng).unwrap();
        assert!((est - 5.0).abs() < 1e-12, "t={t}: {est}");
    }
    let m = IntMatrix::from_str("1 0; 0 1").unwrap();
    for t in [1, 10, 1000] {
        let est = compute_permanent(&m, t, &mut rng).unwrap();
        assert!((est - 1.0).abs() < 1e-12, "t={t}: {est}");
    }

    assert_eq!(compute_permanent(&m, 0, &mut rng), Err(Error::NoTrials));
    let prefs = Preferences::default();
    assert_eq!(estimate(&m, 0, &prefs, None), Err(Error::NoTrials));
}

#[test]
fn test_estimate_reproducible() {
    use std::str::FromStr;

    let m = IntMatrix::from_str(MATRIX1).unwrap();
    let mut prefs = Preferences::default();
    prefs.seed = Some(99);
    prefs.verbosity = Verbosity::Silent;
    let pool2 = rayon::ThreadPoolBuilder::new()
        .num_threads(2)
        .build()
        .unwrap();
    let pool3 = rayon::ThreadPoolBuilder::new()
        .num_threads(3)
        .build()
        .unwrap();
    // Not a multiple of the block size.
    let t = 10 * TRIAL_BLOCK + 17;
    let e2 = estimate(&m, t, &prefs, Some(&pool2)).unwrap();
    let e3 = estimate(&m, t, &prefs, Some(&pool3)).unwrap();
    assert_eq!(e2.to_bits(), e3.to_bits());

    let s1 = estimate(&m, t, &prefs, None).unwrap();
    let s2 = estimate(&m, t, &prefs, None).unwrap();
    assert_eq!(s1.to_bits(), s2.to_bits());
    let mut rng = StdRng::seed_from_u64(99);
    assert_eq!(s1, compute_permanent(&m, t, &mut rng).unwrap());
}

#[test]
fn test_estimate_debug() {
    use std::str::FromStr;

    // Debug output shows a singular first trial.
    let mut prefs = Preferences::default();
    prefs.seed = Some(5);
    prefs.verbosity = Verbosity::Debug;
    let m = IntMatrix::from_str("1 2 3; 0 0 0; 4 5 6").unwrap();
    assert_eq!(estimate(&m, 10, &prefs, None), Ok(0.0));
    let m = IntMatrix::from_str("1 2; 3 4").unwrap();
    let est = estimate(&m, 10, &prefs, None).unwrap();
    assert!(est.is_finite() && est >= 0.0);
}
