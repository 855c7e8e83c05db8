// Copyright 2023 Rémy Oudompheng. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Randomized estimation of the permanent of non-negative matrices.
//!
//! The permanent of an n×n matrix A is the sum over all permutations σ
//! of the products A[i][σ(i)]. Computing it exactly is #P-hard, but
//! if B is obtained from A by replacing each entry with ±sqrt(A[i][j])
//! using independent fair signs, then E[det(B)²] = perm(A).
//! Each determinant costs O(n³) by Gaussian elimination.
//!
//! Bibliography:
//!
//! C.D. Godsil, I. Gutman, On the matching polynomial of a graph, 1981
//!
//! N. Karmarkar, R. Karp, R. Lipton, L. Lovász, M. Luby,
//! A Monte-Carlo algorithm for estimating the permanent
//! SIAM J. Comput. 22 (2), 1993
//! <https://doi.org/10.1137/0222020>

use std::str::FromStr;

pub mod error;
pub mod estimator;
pub mod gauss;
pub mod matrix;
pub mod signroot;

pub use error::Error;
pub use estimator::{compute_permanent, estimate};
pub use matrix::{IntMatrix, Mat};

/// Number of trials when the user does not choose one.
pub const DEFAULT_TRIALS: usize = 1000;

#[derive(Clone, Debug, Default)]
pub struct Preferences {
    pub trials: Option<usize>,
    pub threads: Option<usize>,
    pub seed: Option<u64>,
    pub verbosity: Verbosity,
}

impl Preferences {
    pub fn verbose(&self, v: Verbosity) -> bool {
        self.verbosity >= v
    }

    pub fn trials(&self) -> usize {
        self.trials.unwrap_or(DEFAULT_TRIALS)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Silent,
    #[default]
    Info,
    Verbose,
    Debug,
}

impl FromStr for Verbosity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "silent" => Ok(Self::Silent),
            "info" => Ok(Self::Info),
            "verbose" => Ok(Self::Verbose),
            "debug" => Ok(Self::Debug),
            _ => Err(Error::InvalidVerbosity(s.into())),
        }
    }
}

#[test]
fn test_verbosity() {
    assert_eq!(Verbosity::from_str("debug").unwrap(), Verbosity::Debug);
    assert!(Verbosity::from_str("loud").is_err());

    let mut prefs = Preferences::default();
    assert_eq!(prefs.trials(), DEFAULT_TRIALS);
    assert!(prefs.verbose(Verbosity::Info));
    assert!(!prefs.verbose(Verbosity::Verbose));
    prefs.verbosity = Verbosity::Silent;
    assert!(!prefs.verbose(Verbosity::Info));
}
