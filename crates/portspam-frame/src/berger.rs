//! Berger code: a unidirectional error-detecting check symbol equal to the
//! count of zero bits in the protected information symbol (spec.md §4.8).

/// Counts the zero bits in `bits` and encodes the count as a 5-bit,
/// MSB-first field — enough to represent counts `0..=16` for the
/// [`crate::DataFrame`]'s 16-bit protected prefix.
pub fn encode(bits: &[bool]) -> [bool; 5] {
    let zero_count = bits.iter().filter(|&&b| !b).count() as u8;
    let mut code = [false; 5];
    for (i, slot) in code.iter_mut().enumerate() {
        *slot = (zero_count >> (4 - i)) & 1 != 0;
    }
    code
}

/// Decodes a 5-bit Berger code field back into the claimed zero count.
pub fn decode(code: [bool; 5]) -> u8 {
    code.iter().fold(0u8, |acc, &b| (acc << 1) | u8::from(b))
}

/// Returns `true` iff `code` is the correct Berger check for `bits`.
pub fn check(bits: &[bool], code: [bool; 5]) -> bool {
    decode(code) == bits.iter().filter(|&&b| !b).count() as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scenario_ten_zeros_in_sixteen_bits() {
        // data = 0x4A (01001010), seq = 3 (0011)
        // frame bits[0..16] = init(1010) seq(0011) data(01001010)
        let bits = [
            true, false, true, false, // init
            false, false, true, true, // seq = 3
            false, true, false, false, true, false, true, false, // data = 0x4A
        ];
        let zeros = bits.iter().filter(|&&b| !b).count();
        assert_eq!(zeros, 10);
        let code = encode(&bits);
        assert_eq!(code, [false, true, false, true, false]); // 01010 = 10
        assert!(check(&bits, code));
    }

    #[test]
    fn single_bit_flip_breaks_the_check() {
        let bits = [true, false, true, false, false, false, false, false];
        let code = encode(&bits);
        let mut tampered = bits;
        tampered[2] = !tampered[2];
        assert!(!check(&tampered, code));
    }
}
