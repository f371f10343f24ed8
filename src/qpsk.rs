use num::complex::Complex;

/// The fixed QPSK constellation used by the space-time encoders.
///
/// Index 0 ↔ bits `00`, index 1 ↔ bits `01`, index 2 ↔ bits `10`,
/// index 3 ↔ bits `11`. The points are the four corners of the unit
/// square, `±1 ± 1i`.
pub const QPSK_MAP: [Complex<f64>; 4] = [
    Complex { re: 1f64, im: 1f64 },
    Complex { re: 1f64, im: -1f64 },
    Complex { re: -1f64, im: 1f64 },
    Complex { re: -1f64, im: -1f64 },
];

/// Map a 2-bit symbol index onto the QPSK constellation.
///
/// # Panics
///
/// Panics if `index` is not in `0..=3`. Callers are responsible for
/// constraining their input; see [`crate::bits_to_symbol_indices`].
#[inline]
pub fn map_symbol(index: u8) -> Complex<f64> {
    QPSK_MAP[index as usize]
}

/// Hard-decision demap of a (possibly noisy) symbol estimate back to its
/// 2-bit index. Decisions are per-quadrant, so any positive real scaling
/// of the estimate demaps identically.
#[inline]
pub fn demap_symbol(symbol: Complex<f64>) -> u8 {
    match (symbol.re >= 0f64, symbol.im >= 0f64) {
        (true, true) => 0,
        (true, false) => 1,
        (false, true) => 2,
        (false, false) => 3,
    }
}

pub fn tx_qpsk_symbols<I: Iterator<Item = u8>>(indices: I) -> impl Iterator<Item = Complex<f64>> {
    indices.map(map_symbol)
}

pub fn rx_qpsk_symbols<I: Iterator<Item = Complex<f64>>>(symbols: I) -> impl Iterator<Item = u8> {
    symbols.map(demap_symbol)
}
