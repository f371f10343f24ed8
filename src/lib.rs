use num_complex::Complex;
use rand::Rng;
use rand_distr::{Distribution, Normal};

use itertools::Itertools;

pub mod channel;
pub mod diff_stbc;
pub mod qpsk;
pub mod stbc;

pub type Bit = bool;

/// Pack bits into 2-bit symbol indices, MSB-first: `(b0, b1) -> b0·2 + b1`.
///
/// A trailing unpaired bit is dropped.
pub fn bits_to_symbol_indices<I: Iterator<Item = Bit>>(bits: I) -> impl Iterator<Item = u8> {
    bits.tuples()
        .map(|(bit1, bit2)| ((bit1 as u8) << 1) | (bit2 as u8))
}

/// Unpack 2-bit symbol indices back into bits, MSB-first.
pub fn symbol_indices_to_bits<I: Iterator<Item = u8>>(indices: I) -> impl Iterator<Item = Bit> {
    indices.flat_map(|index| [index & 0b10 != 0, index & 0b01 != 0])
}

pub fn random_bits(num_bits: usize) -> Vec<Bit> {
    let mut rng = rand::rng();
    (0..num_bits).map(|_| rng.random::<Bit>()).collect()
}

#[inline]
pub fn db(x: f64) -> f64 {
    10f64 * x.log10()
}

#[inline]
pub fn undb(x: f64) -> f64 {
    10f64.powf(x / 10f64)
}

#[inline]
pub fn ber(tx: &[Bit], rx: &[Bit]) -> f64 {
    let len: usize = std::cmp::min(tx.len(), rx.len());
    let errors: usize = tx
        .iter()
        .zip(rx.iter())
        .map(|(&ti, &ri)| if ti == ri { 0 } else { 1 })
        .sum();
    (errors as f64) / (len as f64)
}

pub fn awgn<I: Iterator<Item = Complex<f64>>>(
    signal: I,
    sigma: f64,
) -> impl Iterator<Item = Complex<f64>> {
    signal
        .zip(Normal::new(0f64, sigma).unwrap().sample_iter(rand::rng()))
        .zip(Normal::new(0f64, sigma).unwrap().sample_iter(rand::rng()))
        .map(|((sample, n_1), n_2)| sample + Complex::new(n_1, n_2))
}

#[inline]
/// Calculates the energy per sample.
pub fn avg_energy(signal: &[Complex<f64>]) -> f64 {
    signal.iter().map(|&sample| sample.norm_sqr()).sum::<f64>() / signal.len() as f64
}
