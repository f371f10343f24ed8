//! Flat-fading MIMO channel model used to exercise the decoders.

use ndarray::Array2;
use num_complex::Complex;
use rand_distr::{Distribution, Normal};

/// Draw a 2x2 Rayleigh channel matrix with i.i.d. complex Gaussian
/// entries (unit variance per real dimension).
pub fn rayleigh_channel() -> Array2<Complex<f64>> {
    let normal = Normal::new(0f64, 1f64).unwrap();
    let mut rng = rand::rng();
    Array2::from_shape_simple_fn((2, 2), || {
        Complex::new(normal.sample(&mut rng), normal.sample(&mut rng))
    })
}

/// Propagate a transmitted codeword through the channel: `Y = H·X`.
pub fn apply_channel(
    channel: &Array2<Complex<f64>>,
    codeword: &Array2<Complex<f64>>,
) -> Array2<Complex<f64>> {
    channel.dot(codeword)
}

/// Add white Gaussian noise to every entry of a received block.
pub fn awgn_block(block: &Array2<Complex<f64>>, sigma: f64) -> Array2<Complex<f64>> {
    let normal = Normal::new(0f64, sigma).unwrap();
    let mut rng = rand::rng();
    block.mapv(|sample| {
        sample + Complex::new(normal.sample(&mut rng), normal.sample(&mut rng))
    })
}
