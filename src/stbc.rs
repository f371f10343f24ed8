use itertools::Itertools;
use num::complex::Complex;

/// Alamouti space-time block encoding of a symbol stream for two transmit
/// antennas.
///
/// Symbols are consumed in pairs `(s0, s1)` and spread over two antennas
/// and two time slots:
///
/// ```text
///            time t      time t+1
/// antenna 0:   s0        -conj(s1)
/// antenna 1:   s1         conj(s0)
/// ```
///
/// Each yielded item is the `(antenna0, antenna1)` sample pair for one
/// time slot, so the output is twice as long as the number of consumed
/// pairs. The encoder is stateless; a trailing unpaired symbol is dropped.
pub fn tx_stbc_signal<I: Iterator<Item = Complex<f64>>>(
    symbols: I,
) -> impl Iterator<Item = (Complex<f64>, Complex<f64>)> {
    symbols
        .tuples()
        .flat_map(|(s0, s1)| [(s0, s1), (-s1.conj(), s0.conj())])
}

/// Alamouti combining for a 2x1 MISO receiver with channel knowledge.
///
/// `signal` is the single receive antenna's sample stream; `channel`
/// yields one `(h0, h1)` estimate per symbol pair (the channel is assumed
/// constant over the pair's two time slots). For each received pair
/// `(r0, r1)`:
///
/// ```text
/// s0_hat = (conj(h0)·r0 + h1·conj(r1)) / (|h0|² + |h1|²)
/// s1_hat = (conj(h1)·r0 - h0·conj(r1)) / (|h0|² + |h1|²)
/// ```
///
/// The orthogonality of the codeword makes this recovery exact in the
/// absence of noise. `|h0|² + |h1|²` must be nonzero; a zero channel
/// produces non-finite estimates.
pub fn rx_stbc_signal<I, C>(signal: I, channel: C) -> impl Iterator<Item = Complex<f64>>
where
    I: Iterator<Item = Complex<f64>>,
    C: Iterator<Item = (Complex<f64>, Complex<f64>)>,
{
    signal.tuples().zip(channel).flat_map(|((r0, r1), (h0, h1))| {
        let gain = h0.norm_sqr() + h1.norm_sqr();
        let s0_hat = (h0.conj() * r0 + h1 * r1.conj()) / gain;
        let s1_hat = (h1.conj() * r0 - h0 * r1.conj()) / gain;
        [s0_hat, s1_hat]
    })
}
