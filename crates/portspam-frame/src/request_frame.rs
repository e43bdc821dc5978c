//! 12-bit request frame: `[init(4) | hamming(8)]`, where the hamming
//! codeword protects the 4-bit sequence number the receiver is asking for
//! (spec.md §4.8).

use crate::hamming;

pub const REQUEST_FRAME_SIZE: usize = 12;
const INIT_PREAMBLE: [bool; 4] = [true, false, true, false];
const VALID_INIT_SEQ: u8 = 10;

/// A decoded request frame. `init_seq != 10` (or `0`, on a rejected
/// codeword) marks the frame as invalid — see [`RequestFrame::is_valid`].
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct RequestFrame {
    pub init_seq: u8,
    pub sequence_number: u8,
}

impl RequestFrame {
    pub fn is_valid(&self) -> bool {
        self.init_seq == VALID_INIT_SEQ && self.sequence_number < 16
    }
}

fn bits_msb_first(value: u8, count: usize) -> impl Iterator<Item = bool> {
    (0..count).map(move |i| (value >> (count - 1 - i)) & 1 != 0)
}

fn from_bits_msb_first(bits: &[bool]) -> u8 {
    bits.iter().fold(0u8, |acc, &b| (acc << 1) | u8::from(b))
}

/// Encodes a request for `sequence_number` (0..16) into a 12-bit frame.
pub fn encode(sequence_number: u8) -> [bool; REQUEST_FRAME_SIZE] {
    let m: [bool; 4] = std::array::from_fn(|i| (sequence_number >> (3 - i)) & 1 != 0);
    let e = hamming::encode(m);
    let mut frame = [false; REQUEST_FRAME_SIZE];
    frame[0..4].copy_from_slice(&INIT_PREAMBLE);
    frame[4..12].copy_from_slice(&e);
    frame
}

/// Decodes a 12-bit request frame. A Hamming error (of either weight)
/// yields `init_seq: 0, sequence_number: 0` — an invalid frame the caller
/// discards and waits for the next one, matching the original's handling
/// (it never distinguishes single- from double-bit rejection here).
pub fn decode(frame: [bool; REQUEST_FRAME_SIZE]) -> RequestFrame {
    let init_seq = from_bits_msb_first(&frame[0..4]);
    let mut e = [false; 8];
    e.copy_from_slice(&frame[4..12]);

    match hamming::decode(e) {
        Ok(sequence_number) => RequestFrame { init_seq, sequence_number },
        Err(_) => RequestFrame { init_seq: 0, sequence_number: 0 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_all_sequence_numbers() {
        for seq in 0u8..16 {
            let frame = encode(seq);
            let decoded = decode(frame);
            assert_eq!(decoded.init_seq, VALID_INIT_SEQ);
            assert_eq!(decoded.sequence_number, seq);
            assert!(decoded.is_valid());
        }
    }

    #[test]
    fn decode_is_idempotent_on_the_same_wire_bits() {
        let frame = encode(7);
        assert_eq!(decode(frame), decode(frame));
    }

    #[test]
    fn single_bit_corruption_in_the_hamming_field_is_rejected() {
        let mut frame = encode(5);
        frame[9] = !frame[9];
        let decoded = decode(frame);
        assert_eq!(decoded, RequestFrame { init_seq: 0, sequence_number: 0 });
        assert!(!decoded.is_valid());
    }

    #[test]
    fn a_frame_whose_preamble_is_not_1010_is_invalid() {
        let mut frame = encode(5);
        frame[1] = !frame[1];
        assert!(!decode(frame).is_valid());
    }
}
