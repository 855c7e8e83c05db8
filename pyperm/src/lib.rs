// Copyright 2023 Rémy Oudompheng. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use std::str::FromStr;

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::pyfunction;

use permest::{self, IntMatrix, Preferences, Verbosity};

#[pymodule]
fn pyperm(_: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(permanent, m)?)?;
    Ok(())
}

#[pyfunction]
#[pyo3(signature = (matrix, trials = 1000, threads = None, seed = None, verbose = "silent"))]
/// Estimates the permanent of a square matrix of non-negative integers
/// as the mean of squared determinants of random sign-root matrices.
///
/// The estimate is unbiased but noisy: its precision grows with the
/// number of trials.
fn permanent(
    py: Python<'_>,
    matrix: Vec<Vec<u64>>,
    trials: usize,
    threads: Option<usize>,
    seed: Option<u64>,
    verbose: &str,
) -> PyResult<f64> {
    let verbosity =
        Verbosity::from_str(verbose).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let mut prefs = Preferences::default();
    prefs.threads = threads;
    prefs.seed = seed;
    prefs.verbosity = verbosity;
    let m = IntMatrix::from_rows(matrix).map_err(|e| PyValueError::new_err(e.to_string()))?;
    let tpool = match threads {
        None | Some(1) => None,
        Some(t) => Some(
            rayon::ThreadPoolBuilder::new()
                .num_threads(t)
                .build()
                .map_err(|e| PyValueError::new_err(e.to_string()))?,
        ),
    };
    py.allow_threads(|| permest::estimate(&m, trials, &prefs, tpool.as_ref()))
        .map_err(|e| PyValueError::new_err(e.to_string()))
}
