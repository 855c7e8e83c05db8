// Copyright 2023 Rémy Oudompheng. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

use thiserror::Error;

/// Violations of the input contract of the estimator.
///
/// A singular trial matrix is not an error: its determinant is zero
/// and it takes part in the average like any other trial.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("matrix has no rows")]
    Empty,
    #[error("row {row} has {len} entries, expected {size}")]
    NotSquare { row: usize, len: usize, size: usize },
    #[error("negative entry at row {row}, column {col}")]
    NegativeEntry { row: usize, col: usize },
    #[error("cannot parse matrix: {0}")]
    Parse(String),
    #[error("trial count must be positive")]
    NoTrials,
    #[error("invalid verbosity level {0:?} (expected silent|info|verbose|debug)")]
    InvalidVerbosity(String),
}
