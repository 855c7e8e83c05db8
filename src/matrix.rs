// Copyright 2023 Rémy Oudompheng. All rights reserved.
// Use of this source code is governed by a BSD-style
// license that can be found in the LICENSE file.

//! Square matrices used by the estimator.
//!
//! Input matrices have non-negative integer entries and are never
//! modified. Trial matrices are dense row-major float matrices,
//! allocated for a single trial and reduced in place.

use std::fmt;
use std::ops::{Index, IndexMut};
use std::str::FromStr;

use num_traits::Float;

use crate::Error;

/// A square matrix of non-negative integers.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct IntMatrix {
    n: usize,
    data: Vec<u64>,
}

impl IntMatrix {
    /// Build a matrix from its rows, checking that it is square
    /// and non-empty.
    pub fn from_rows(rows: Vec<Vec<u64>>) -> Result<Self, Error> {
        let n = rows.len();
        if n == 0 {
            return Err(Error::Empty);
        }
        let mut data = Vec::with_capacity(n * n);
        for (i, r) in rows.into_iter().enumerate() {
            if r.len() != n {
                return Err(Error::NotSquare {
                    row: i,
                    len: r.len(),
                    size: n,
                });
            }
            data.extend(r);
        }
        Ok(IntMatrix { n, data })
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn get(&self, i: usize, j: usize) -> u64 {
        self.data[i * self.n + j]
    }

    pub fn row(&self, i: usize) -> &[u64] {
        &self.data[i * self.n..(i + 1) * self.n]
    }
}

impl FromStr for IntMatrix {
    type Err = Error;

    /// Rows are separated by semicolons or newlines,
    /// entries by commas or whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows = vec![];
        for line in s.split(|c: char| c == ';' || c == '\n') {
            let mut row = vec![];
            for word in line.split(|c: char| c == ',' || c.is_whitespace()) {
                if word.is_empty() {
                    continue;
                }
                if word.starts_with('-') {
                    return Err(Error::NegativeEntry {
                        row: rows.len(),
                        col: row.len(),
                    });
                }
                let x = u64::from_str(word)
                    .map_err(|_| Error::Parse(format!("invalid entry {word:?}")))?;
                row.push(x);
            }
            if !row.is_empty() {
                rows.push(row);
            }
        }
        Self::from_rows(rows)
    }
}

impl fmt::Display for IntMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, self.n, &self.data)
    }
}

/// A dense square matrix of floating-point numbers.
#[derive(Clone, Debug, PartialEq)]
pub struct Mat<F> {
    n: usize,
    data: Vec<F>,
}

impl<F: Float> Mat<F> {
    pub fn zeros(n: usize) -> Self {
        Mat {
            n,
            data: vec![F::zero(); n * n],
        }
    }

    pub fn from_rows<R: AsRef<[F]>>(rows: &[R]) -> Self {
        let n = rows.len();
        assert!(rows.iter().all(|r| r.as_ref().len() == n));
        Mat {
            n,
            data: rows.iter().flat_map(|r| r.as_ref().iter().copied()).collect(),
        }
    }

    pub fn size(&self) -> usize {
        self.n
    }

    pub fn row(&self, i: usize) -> &[F] {
        &self.data[i * self.n..(i + 1) * self.n]
    }

    pub fn diagonal(&self) -> impl Iterator<Item = F> + '_ {
        self.data.iter().step_by(self.n + 1).copied()
    }

    pub fn swap_rows(&mut self, r1: usize, r2: usize) {
        if r1 == r2 {
            return;
        }
        let n = self.n;
        for k in 0..n {
            self.data.swap(r1 * n + k, r2 * n + k);
        }
    }

    pub fn negate_row(&mut self, r: usize) {
        let n = self.n;
        for x in &mut self.data[r * n..(r + 1) * n] {
            *x = -*x;
        }
    }

    /// Subtracts `factor` times row `src` from row `dst`.
    pub fn subtract_rows(&mut self, src: usize, dst: usize, factor: F) {
        debug_assert!(src != dst);
        let n = self.n;
        for k in 0..n {
            let x = self.data[src * n + k];
            let y = &mut self.data[dst * n + k];
            *y = *y - factor * x;
        }
    }
}

impl<F> Index<(usize, usize)> for Mat<F> {
    type Output = F;

    fn index(&self, (i, j): (usize, usize)) -> &F {
        &self.data[i * self.n + j]
    }
}

impl<F> IndexMut<(usize, usize)> for Mat<F> {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut F {
        &mut self.data[i * self.n + j]
    }
}

impl<F: fmt::Display> fmt::Display for Mat<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_rows(f, self.n, &self.data)
    }
}

// One row per line, entries separated by a space.
fn write_rows<T: fmt::Display>(f: &mut fmt::Formatter<'_>, n: usize, data: &[T]) -> fmt::Result {
    for row in data.chunks(n) {
        for (j, x) in row.iter().enumerate() {
            if j > 0 {
                write!(f, " ")?;
            }
            write!(f, "{x}")?;
        }
        writeln!(f)?;
    }
    Ok(())
}

#[test]
fn test_intmatrix_parse() {
    let m = IntMatrix::from_str("1 2 3; 4,5,6\n7 8 9\n").unwrap();
    assert_eq!(m.size(), 3);
    assert_eq!(m.row(1), &[4, 5, 6]);
    assert_eq!(m.get(2, 0), 7);
    assert_eq!(m.to_string(), "1 2 3\n4 5 6\n7 8 9\n");

    assert_eq!(IntMatrix::from_str(""), Err(Error::Empty));
    assert_eq!(
        IntMatrix::from_str("1 2; 3"),
        Err(Error::NotSquare {
            row: 1,
            len: 1,
            size: 2
        })
    );
    assert_eq!(
        IntMatrix::from_str("1 2; 3 -4"),
        Err(Error::NegativeEntry { row: 1, col: 1 })
    );
    assert!(matches!(IntMatrix::from_str("1 x; 3 4"), Err(Error::Parse(_))));
    assert!(matches!(
        IntMatrix::from_rows(vec![vec![1, 2, 3], vec![4, 5, 6]]),
        Err(Error::NotSquare { .. })
    ));
}

#[test]
fn test_mat_rows() {
    let mut m: Mat<f64> = Mat::from_rows(&[&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0], &[7.0, 8.0, 10.0]]);
    m.swap_rows(0, 2);
    assert_eq!(m.row(0), &[7.0, 8.0, 10.0]);
    assert_eq!(m.row(2), &[1.0, 2.0, 3.0]);
    m.negate_row(1);
    assert_eq!(m.row(1), &[-4.0, -5.0, -6.0]);
    m.subtract_rows(2, 0, 2.0);
    assert_eq!(m.row(0), &[5.0, 4.0, 4.0]);
    assert_eq!(m.diagonal().collect::<Vec<_>>(), vec![5.0, -5.0, 3.0]);
    m[(1, 0)] = 0.5;
    assert_eq!(m.to_string(), "5 4 4\n0.5 -5 -6\n1 2 3\n");
}
