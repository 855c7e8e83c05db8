// Copyright 2023 Rémy Oudompheng. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Random sign-root matrices.
//!
//! For an integer matrix A, a sign-root matrix B has entries
//! B[i][j] = ±sqrt(A[i][j]) where signs are independent and uniform.
//! Only the sign is random: |B[i][j]|² = A[i][j].

use num_traits::Float;
use rand::Rng;

use crate::matrix::{IntMatrix, Mat};

/// Build the sign-root matrix of `m`, reading signs from `signs`
/// in row-major order (`true` means a negative entry).
pub fn sign_root<F: Float>(m: &IntMatrix, mut signs: impl FnMut() -> bool) -> Mat<F> {
    let n = m.size();
    let mut b = Mat::zeros(n);
    for i in 0..n {
        for j in 0..n {
            // Entries above 2^53 are rounded, like any conversion to f64.
            let x = F::from(m.get(i, j)).unwrap_or_else(F::infinity).sqrt();
            b[(i, j)] = if signs() { -x } else { x };
        }
    }
    b
}

pub fn random_sign_root<F: Float, R: Rng + ?Sized>(m: &IntMatrix, rng: &mut R) -> Mat<F> {
    sign_root(m, || rng.gen::<bool>())
}

#[test]
fn test_sign_root() {
    use std::str::FromStr;

    let m = IntMatrix::from_str("4 9; 0 2").unwrap();
    let b: Mat<f64> = sign_root(&m, || false);
    assert_eq!(b.row(0), &[2.0, 3.0]);
    assert_eq!(b.row(1), &[0.0, 2f64.sqrt()]);

    let mut k = 0;
    let b: Mat<f64> = sign_root(&m, || {
        k += 1;
        k % 2 == 1
    });
    assert_eq!(b.row(0), &[-2.0, 3.0]);
    assert_eq!(b[(1, 1)], 2f64.sqrt());
}

#[test]
fn test_random_sign_root() {
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::str::FromStr;

    let m = IntMatrix::from_str("1 2 3; 5 0 7; 9 13 31").unwrap();
    let mut rng = StdRng::seed_from_u64(1234);
    let mut negatives = 0;
    for _ in 0..1000 {
        let b: Mat<f64> = random_sign_root(&m, &mut rng);
        for i in 0..3 {
            for j in 0..3 {
                let x = b[(i, j)];
                assert_eq!(x.abs(), (m.get(i, j) as f64).sqrt());
                if x.is_sign_negative() && x != 0.0 {
                    negatives += 1;
                }
            }
        }
    }
    // 8000 non-zero entries, about half of them negative.
    assert!(3600 < negatives && negatives < 4400, "{negatives} negatives");
}
