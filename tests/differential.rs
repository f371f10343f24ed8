use ndarray::{array, Array2};
use num_complex::Complex;

use spactempo::channel::{apply_channel, awgn_block, rayleigh_channel};
use spactempo::diff_stbc::{rx_diff_stbc_signal, tx_diff_stbc_signal};
use spactempo::qpsk::{demap_symbol, tx_qpsk_symbols};
use spactempo::{ber, bits_to_symbol_indices, random_bits, symbol_indices_to_bits, Bit};

/// Decode a block stream and flatten the pair estimates back to symbol
/// indices.
fn decode_to_indices(blocks: Vec<Array2<Complex<f64>>>) -> Vec<u8> {
    rx_diff_stbc_signal(blocks.into_iter())
        .map(|estimate| estimate.expect("non-degenerate channel"))
        .flat_map(|pair| [demap_symbol(pair[0]), demap_symbol(pair[1])])
        .collect()
}

#[test]
fn noncoherent_chain_over_unknown_channel() {
    let data_bits: Vec<Bit> = random_bits(400);

    // The channel stays fixed over the burst and is never shown to the
    // receiver.
    let channel = rayleigh_channel();

    let blocks: Vec<Array2<Complex<f64>>> = tx_diff_stbc_signal(tx_qpsk_symbols(
        bits_to_symbol_indices(data_bits.iter().cloned()),
    ))
    .map(|codeword| apply_channel(&channel, &codeword))
    .collect();

    let rx_bits: Vec<Bit> =
        symbol_indices_to_bits(decode_to_indices(blocks).into_iter()).collect();

    // The bootstrap pair carries no decodable payload.
    assert_eq!(rx_bits.len(), data_bits.len() - 4);
    assert_eq!(data_bits[4..].to_vec(), rx_bits);
}

#[test]
fn noncoherent_chain_tolerates_mild_noise() {
    let data_bits: Vec<Bit> = random_bits(400);
    let channel = rayleigh_channel();

    let blocks: Vec<Array2<Complex<f64>>> = tx_diff_stbc_signal(tx_qpsk_symbols(
        bits_to_symbol_indices(data_bits.iter().cloned()),
    ))
    .map(|codeword| {
        let received = apply_channel(&channel, &codeword);
        // Noise scaled to the block so every interval sees the same SNR.
        let rms = (received.iter().map(|y| y.norm_sqr()).sum::<f64>() / 4f64).sqrt();
        awgn_block(&received, 0.02 * rms)
    })
    .collect();

    let rx_bits: Vec<Bit> =
        symbol_indices_to_bits(decode_to_indices(blocks).into_iter()).collect();

    let error_rate = ber(&data_bits[4..], &rx_bits);
    println!("differential BER: {}", error_rate);
    assert!(error_rate <= 0.05);
}

#[test]
fn known_channel_known_message_decodes_exactly() {
    // Deterministic variant of the chain with a hand-picked channel.
    let channel: Array2<Complex<f64>> = array![
        [Complex::new(0.3, 0.5), Complex::new(-0.4, 0.6)],
        [Complex::new(0.9, -0.2), Complex::new(0.1, 0.8)],
    ];

    let indices = [3u8, 0, 1, 2, 0, 0, 2, 3];
    let blocks: Vec<Array2<Complex<f64>>> =
        tx_diff_stbc_signal(tx_qpsk_symbols(indices.iter().cloned()))
            .map(|codeword| apply_channel(&channel, &codeword))
            .collect();

    let decoded = decode_to_indices(blocks);
    assert_eq!(decoded, indices[2..].to_vec());
}
