//! 21-bit data frame: `[init(4) | seq(4) | data(8) | berger(5)]` (spec.md
//! §4.8).

use crate::{FrameError, berger};

pub const DATA_FRAME_SIZE: usize = 21;
const INIT_PREAMBLE: [bool; 4] = [true, false, true, false];

/// A decoded, integrity-checked data frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct DecodedDataFrame {
    pub init_seq: u8,
    pub sequence_number: u8,
    pub data: u8,
    pub berger: u8,
}

fn bits_msb_first(value: u8, count: usize) -> impl Iterator<Item = bool> {
    (0..count).map(move |i| (value >> (count - 1 - i)) & 1 != 0)
}

fn from_bits_msb_first(bits: &[bool]) -> u8 {
    bits.iter().fold(0u8, |acc, &b| (acc << 1) | u8::from(b))
}

/// Encodes `data` and `sequence_number` (0..16) into a 21-bit data frame.
pub fn encode(data: u8, sequence_number: u8) -> [bool; DATA_FRAME_SIZE] {
    let mut frame = [false; DATA_FRAME_SIZE];
    frame[0..4].copy_from_slice(&INIT_PREAMBLE);
    for (i, bit) in bits_msb_first(sequence_number, 4).enumerate() {
        frame[4 + i] = bit;
    }
    for (i, bit) in bits_msb_first(data, 8).enumerate() {
        frame[8 + i] = bit;
    }
    let code = berger::encode(&frame[0..16]);
    frame[16..21].copy_from_slice(&code);
    frame
}

/// Decodes a 21-bit data frame, verifying its Berger check. The init
/// preamble and sequence number are extracted regardless; only a Berger
/// mismatch is treated as an error (spec.md §8: "for a tampered DataFrame
/// in which any single bit of the first 16 is flipped, the Berger check
/// fails").
pub fn decode(frame: [bool; DATA_FRAME_SIZE]) -> Result<DecodedDataFrame, FrameError> {
    let init_seq = from_bits_msb_first(&frame[0..4]);
    let sequence_number = from_bits_msb_first(&frame[4..8]);
    let data = from_bits_msb_first(&frame[8..16]);
    let mut code = [false; 5];
    code.copy_from_slice(&frame[16..21]);
    let berger = berger::decode(code);
    let counted = frame[0..16].iter().filter(|&&b| !b).count() as u8;

    if berger != counted {
        return Err(FrameError::BergerMismatch { claimed: berger, counted });
    }

    Ok(DecodedDataFrame { init_seq, sequence_number, data, berger })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip_all_data_and_sequence_numbers() {
        for data in 0u16..256 {
            for seq in 0u8..16 {
                let frame = encode(data as u8, seq);
                let decoded = decode(frame).unwrap();
                assert_eq!(decoded.init_seq, 10);
                assert_eq!(decoded.sequence_number, seq);
                assert_eq!(decoded.data, data as u8);
                let zero_count = frame[0..16].iter().filter(|&&b| !b).count() as u8;
                assert_eq!(decoded.berger, zero_count);
            }
        }
    }

    #[test]
    fn scenario_berger_round_trip() {
        let frame = encode(0x4A, 3);
        assert_eq!(&frame[0..4], &[true, false, true, false]);
        assert_eq!(&frame[4..8], &[false, false, true, true]);
        let decoded = decode(frame).unwrap();
        assert_eq!(decoded.berger, 10);
    }

    #[test]
    fn tampering_any_of_the_first_sixteen_bits_breaks_berger() {
        let frame = encode(0x4A, 3);
        for i in 0..16 {
            let mut tampered = frame;
            tampered[i] = !tampered[i];
            assert!(decode(tampered).is_err(), "bit {i} flip should break the Berger check");
        }
    }
}
