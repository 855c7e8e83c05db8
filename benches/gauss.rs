use brunch::Bench;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use permest::gauss::{determinant, reduce};
use permest::Mat;

fn random_mat(rng: &mut StdRng, n: usize) -> Mat<f64> {
    let mut m = Mat::zeros(n);
    for i in 0..n {
        for j in 0..n {
            m[(i, j)] = rng.gen_range(-8.0..8.0);
        }
    }
    m
}

fn main() {
    let mut rng = StdRng::seed_from_u64(0xcafe1337);
    let m8 = random_mat(&mut rng, 8);
    let m32 = random_mat(&mut rng, 32);
    let m128 = random_mat(&mut rng, 128);

    brunch::benches! {
        inline:
        {
            Bench::new("reduce+determinant (8x8)")
            .run_seeded(m8.clone(), |mut m| { reduce(&mut m); determinant(&m) })
        },
        {
            Bench::new("reduce+determinant (32x32)")
            .run_seeded(m32.clone(), |mut m| { reduce(&mut m); determinant(&m) })
        },
        {
            Bench::new("reduce+determinant (128x128)")
            .run_seeded(m128.clone(), |mut m| { reduce(&mut m); determinant(&m) })
        },
    }
}
