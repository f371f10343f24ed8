//! Differential (non-coherent) Alamouti coding.
//!
//! The transmitter turns each symbol pair into a unitary-up-to-scale 2x2
//! matrix and multiplies it onto the previously transmitted codeword, so
//! the information lives in the *transition* between consecutive
//! codewords. The receiver equalizes each block against a projector built
//! from the block before it, and therefore never needs a channel
//! estimate.

use itertools::Itertools;
use ndarray::{arr2, array, Array1, Array2};
use num_complex::Complex;
use thiserror::Error;

/// Gains below this are treated as a degenerate channel realization.
const GAIN_EPSILON: f64 = 1e-12;

/// Initial value of the encoder's recursion matrix.
///
/// Any fixed matrix with orthogonal, equal-norm columns works; this one is
/// part of the wire contract and must match between interoperating
/// transmitters and receivers.
pub const ENCODER_SEED: [[Complex<f64>; 2]; 2] = [
    [Complex { re: 1f64, im: 0f64 }, Complex { re: -1f64, im: 0f64 }],
    [Complex { re: 1f64, im: 0f64 }, Complex { re: 1f64, im: 0f64 }],
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DecodeError {
    /// The previous block's projector gain was (numerically) zero, so
    /// there is nothing to equalize the current block against.
    #[error("degenerate projector gain {0:e}; channel block is unusable")]
    DegenerateGain(f64),
}

/// Differential Alamouti encoder.
///
/// Owns the recursion matrix `X`; one encoder instance corresponds to one
/// transmit session and must see its symbol pairs in timeline order.
#[derive(Debug, Clone)]
pub struct DifferentialEncoder {
    x: Array2<Complex<f64>>,
}

impl DifferentialEncoder {
    pub fn new() -> Self {
        Self {
            x: arr2(&ENCODER_SEED),
        }
    }

    /// Encode one symbol pair, returning the next transmitted codeword
    /// (rows are antennas, columns are time slots).
    ///
    /// The pair is first brought into space-time format,
    ///
    /// ```text
    /// S_st = | s0  -conj(s1) |
    ///        | s1   conj(s0) |
    /// ```
    ///
    /// which is the transpose of `s0·I + s1·R` (with `R = [[0, 1], [-1, 0]]`)
    /// with its second column conjugated. The recursion then advances as
    /// `X ← (1/√2)·X·S_st`; the scale is applied exactly once per step.
    pub fn encode_pair(&mut self, s0: Complex<f64>, s1: Complex<f64>) -> Array2<Complex<f64>> {
        let s_st: Array2<Complex<f64>> = array![
            [s0, -s1.conj()],
            [s1, s0.conj()],
        ];
        self.x = self.x.dot(&s_st).mapv(|value| value / 2f64.sqrt());
        self.x.clone()
    }

    /// The current recursion matrix.
    pub fn state(&self) -> &Array2<Complex<f64>> {
        &self.x
    }
}

impl Default for DifferentialEncoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Encode a symbol stream with a fresh [`DifferentialEncoder`], yielding
/// one 2x2 codeword per symbol pair. A trailing unpaired symbol is
/// dropped.
pub fn tx_diff_stbc_signal<I: Iterator<Item = Complex<f64>>>(
    symbols: I,
) -> impl Iterator<Item = Array2<Complex<f64>>> {
    let mut encoder = DifferentialEncoder::new();
    symbols
        .tuples()
        .map(move |(s0, s1)| encoder.encode_pair(s0, s1))
}

/// Stack a received 2x2 block into the column vector
/// `[Y00, conj(Y01), Y10, conj(Y11)]`.
fn stack_received(block: &Array2<Complex<f64>>) -> Array1<Complex<f64>> {
    array![
        block[[0, 0]],
        block[[0, 1]].conj(),
        block[[1, 0]],
        block[[1, 1]].conj(),
    ]
}

/// The receive-side projector derived from one block.
///
/// `a`'s first column is the stacked block itself; the second column is
/// the pairwise-reversed, conjugated, sign-alternated copy that rebuilds
/// the transmitted orthogonal structure from receive data alone. For an
/// ideal orthogonal codeword `a_h·a` is a scalar multiple of the identity,
/// and `gain` is that scalar.
#[derive(Debug, Clone)]
pub struct Projector {
    pub a: Array2<Complex<f64>>,
    pub a_h: Array2<Complex<f64>>,
    pub gain: Complex<f64>,
}

impl Projector {
    pub fn from_received(block: &Array2<Complex<f64>>) -> Self {
        Self::from_stacked(&stack_received(block))
    }

    fn from_stacked(y_tilde: &Array1<Complex<f64>>) -> Self {
        let a: Array2<Complex<f64>> = array![
            [y_tilde[0], y_tilde[1].conj()],
            [y_tilde[1], -y_tilde[0].conj()],
            [y_tilde[2], y_tilde[3].conj()],
            [y_tilde[3], -y_tilde[2].conj()],
        ]
        .mapv(|value| value / 2f64.sqrt());

        let a_h = a.t().mapv(|value| value.conj());
        let a_i = a_h.dot(&a);

        Self {
            a,
            a_h,
            gain: a_i[[0, 0]],
        }
    }
}

/// Differential Alamouti decoder.
///
/// Consumes received 2x2 blocks in strict arrival order. The first block
/// only bootstraps the rolling projector; every later block is decoded
/// against the projector of the block before it, so no channel estimate
/// ever enters the computation.
#[derive(Debug, Clone, Default)]
pub struct DifferentialDecoder {
    prev: Option<Projector>,
}

impl DifferentialDecoder {
    pub fn new() -> Self {
        Self { prev: None }
    }

    /// Process one received block.
    ///
    /// Returns `Ok(None)` for the bootstrap block and
    /// `Ok(Some([s0_hat, s1_hat]))` for every block after it. If the
    /// previous block's gain was degenerate the current block cannot be
    /// decoded and [`DecodeError::DegenerateGain`] is returned; the
    /// projector still advances, so decoding resumes on the next block.
    pub fn decode_block(
        &mut self,
        block: &Array2<Complex<f64>>,
    ) -> Result<Option<Array1<Complex<f64>>>, DecodeError> {
        let y_tilde = stack_received(block);
        let previous = self.prev.replace(Projector::from_stacked(&y_tilde));

        match previous {
            None => Ok(None),
            Some(projector) => {
                if projector.gain.norm() < GAIN_EPSILON {
                    return Err(DecodeError::DegenerateGain(projector.gain.norm()));
                }
                let estimate = projector
                    .a_h
                    .dot(&y_tilde)
                    .mapv(|value| value / projector.gain);
                Ok(Some(estimate))
            }
        }
    }
}

/// Decode a block stream with a fresh [`DifferentialDecoder`].
///
/// The bootstrap block yields no item, so the output carries one estimate
/// (or one error) fewer than the number of input blocks.
pub fn rx_diff_stbc_signal<I: Iterator<Item = Array2<Complex<f64>>>>(
    blocks: I,
) -> impl Iterator<Item = Result<Array1<Complex<f64>>, DecodeError>> {
    let mut decoder = DifferentialDecoder::new();
    blocks.filter_map(move |block| decoder.decode_block(&block).transpose())
}
