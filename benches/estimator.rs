use std::str::FromStr;

use brunch::Bench;
use permest::estimator::trial;
use permest::signroot::random_sign_root;
use permest::{compute_permanent, IntMatrix};

const MATRIX2: &str = "12 21 13 4 67; 15 26 17 8 14; 9 13 31 6 12; 13 2 2 7 8; 22 11 20 20 0";

fn main() {
    let m2 = IntMatrix::from_str(MATRIX2).unwrap();
    let rows: Vec<Vec<u64>> = (0..20)
        .map(|i| (0..20).map(|j| ((7 * i + 3 * j) % 17) as u64).collect())
        .collect();
    let m20 = IntMatrix::from_rows(rows).unwrap();

    brunch::benches! {
        inline:
        {
            Bench::new("random_sign_root (5x5)")
            .run_seeded(&m2, |m| random_sign_root::<f64, _>(m, &mut rand::thread_rng()))
        },
        {
            Bench::new("trial (5x5)")
            .run_seeded(&m2, |m| trial(m, &mut rand::thread_rng()))
        },
        {
            Bench::new("trial (20x20)")
            .run_seeded(&m20, |m| trial(m, &mut rand::thread_rng()))
        },
        {
            Bench::new("compute_permanent(5x5, t=100)")
            .run_seeded(&m2, |m| compute_permanent(m, 100, &mut rand::thread_rng()).unwrap())
        },
    }
}
