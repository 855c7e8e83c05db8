// Copyright 2023 Rémy Oudompheng. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Gauss reduction and determinants of real matrices
//!
//! Matrices are reduced in place to upper-triangular form using only
//! row swaps and row additions, so that the determinant is the product
//! of the diagonal entries.
//!
//! Pivots are compared to zero exactly, there is no tolerance: a tiny
//! pivot is used like any other. Trial matrices are random, so exact
//! zeros only appear when the input has zero entries.

use num_traits::Float;

use crate::matrix::Mat;

/// Final state of a Gauss reduction.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Elimination {
    /// The matrix is upper-triangular.
    Triangular,
    /// No non-zero pivot exists for this column: the determinant is zero
    /// and the following columns were left unreduced.
    Singular { column: usize },
}

impl Elimination {
    pub fn is_singular(&self) -> bool {
        matches!(self, Elimination::Singular { .. })
    }
}

/// Makes matrix upper-triangular in O(n^3), preserving its determinant.
pub fn reduce<F: Float>(m: &mut Mat<F>) -> Elimination {
    let n = m.size();
    for i in 0..n.saturating_sub(1) {
        if m[(i, i)] == F::zero() {
            if let Some(j) = (i + 1..n).find(|&j| m[(j, i)] != F::zero()) {
                // The swap flips the sign of the determinant. Negate the
                // whole row: negating only the pivot entry would change |det|.
                m.swap_rows(i, j);
                m.negate_row(i);
            }
        }
        let pivot = m[(i, i)];
        if pivot == F::zero() {
            return Elimination::Singular { column: i };
        }
        for j in i + 1..n {
            let x = m[(j, i)];
            if x != F::zero() {
                m.subtract_rows(i, j, x / pivot);
                // x - (x/pivot)*pivot may leave a rounding residue.
                m[(j, i)] = F::zero();
            }
        }
    }
    Elimination::Triangular
}

/// Computes the determinant of an upper-triangular matrix in O(n).
pub fn determinant<F: Float>(m: &Mat<F>) -> F {
    m.diagonal().fold(F::one(), |det, x| det * x)
}

#[cfg(test)]
fn reduced_det(rows: &[&[f64]]) -> (Elimination, f64, Mat<f64>) {
    let mut m = Mat::from_rows(rows);
    let e = reduce(&mut m);
    (e, determinant(&m), m)
}

#[test]
fn test_reduce_small() {
    let (e, det, m) = reduced_det(&[&[2., 1., 1.], &[4., -6., 0.], &[-2., 7., 2.]]);
    assert_eq!(e, Elimination::Triangular);
    assert_eq!(det, -16.0);
    for i in 0..3 {
        for j in 0..i {
            assert_eq!(m[(i, j)], 0.0);
        }
    }

    // 1x1 matrices are already triangular.
    let (e, det, _) = reduced_det(&[&[-3.5]]);
    assert_eq!(e, Elimination::Triangular);
    assert_eq!(det, -3.5);

    let (_, det, _) = reduced_det(&[&[0., 1.], &[1., 0.]]);
    assert_eq!(det, -1.0);
}

#[test]
fn test_reduce_swap() {
    // det = -2*(6-4) + 3*(5-4) = -1
    let (e, det, m) = reduced_det(&[&[0., 2., 3.], &[1., 1., 1.], &[4., 5., 6.]]);
    assert_eq!(e, Elimination::Triangular);
    assert_eq!(det, -1.0);
    assert_eq!(m.row(0), &[-1., -1., -1.]);
    assert_eq!(m.row(1), &[0., 2., 3.]);
    assert_eq!(m.row(2), &[0., 0., 0.5]);

    // Zero pivot found again after elimination.
    let (e, det, _) = reduced_det(&[&[1., 2., 3.], &[2., 4., 7.], &[1., 1., 1.]]);
    assert_eq!(e, Elimination::Triangular);
    // det = 1*(4-7) - 2*(2-7) + 3*(2-4) = 1
    assert_eq!(det, 1.0);
}

#[test]
fn test_reduce_singular() {
    let (e, det, m) = reduced_det(&[&[0., 1., 2.], &[0., 3., 4.], &[0., 6., 7.]]);
    assert_eq!(e, Elimination::Singular { column: 0 });
    assert!(e.is_singular());
    assert_eq!(det, 0.0);
    // Nothing was touched.
    assert_eq!(m.row(2), &[0., 6., 7.]);

    let (e, det, _) = reduced_det(&[&[1., 2., 3.], &[2., 4., 6.], &[1., 2., 4.]]);
    assert_eq!(e, Elimination::Singular { column: 1 });
    assert_eq!(det, 0.0);

    // The last column is never checked but its zero pivot
    // still cancels the product.
    let (e, det, _) = reduced_det(&[&[1., 2., 3.], &[2., 4., 6.], &[1., 1., 1.]]);
    assert_eq!(e, Elimination::Triangular);
    assert_eq!(det, 0.0);

    let (e, det, _) = reduced_det(&[&[0., 0.], &[1., 1.]]);
    assert_eq!(e, Elimination::Triangular);
    assert_eq!(det, 0.0);
}

#[test]
fn test_reduce_deterministic() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let mut rng = StdRng::seed_from_u64(42);
    for n in 1..12 {
        let mut m: Mat<f64> = Mat::zeros(n);
        for i in 0..n {
            for j in 0..n {
                m[(i, j)] = rng.gen_range(-10.0..10.0);
            }
        }
        let mut m1 = m.clone();
        let mut m2 = m.clone();
        reduce(&mut m1);
        reduce(&mut m2);
        let (d1, d2) = (determinant(&m1), determinant(&m2));
        assert_eq!(d1.to_bits(), d2.to_bits());
        assert_eq!(m1, m2);
    }
}

#[test]
fn test_reduce_permutation() {
    // Applying the same permutation to rows and columns
    // leaves the determinant unchanged.
    let rows: &[&[f64]] = &[
        &[1.0, 2f64.sqrt(), -3f64.sqrt(), 2.0],
        &[-5f64.sqrt(), 0.0, 7f64.sqrt(), -8f64.sqrt()],
        &[3.0, -13f64.sqrt(), 31f64.sqrt(), 0.0],
        &[13f64.sqrt(), 2f64.sqrt(), -2f64.sqrt(), 7f64.sqrt()],
    ];
    let perm = [2, 0, 3, 1];
    let mut p = Mat::zeros(4);
    for i in 0..4 {
        for j in 0..4 {
            p[(i, j)] = rows[perm[i]][perm[j]];
        }
    }
    let (_, d1, _) = reduced_det(rows);
    reduce(&mut p);
    let d2 = determinant(&p);
    assert!((d1 - d2).abs() < 1e-9 * d1.abs(), "{d1} != {d2}");
}

#[test]
fn test_reduce_f32() {
    let mut m: Mat<f32> = Mat::from_rows(&[&[0., 2.], &[3., 1.]]);
    assert_eq!(reduce(&mut m), Elimination::Triangular);
    assert_eq!(determinant(&m), -6.0);
}
