/// Bytes needed to hold `bits` bits.
pub(crate) const fn bytes_for_bits(bits: usize) -> usize {
    bits / 8 + (bits % 8 != 0) as usize
}

#[cfg(test)]
mod tests {
    use super::bytes_for_bits;

    #[test]
    fn rounds_partial_bytes_up() {
        assert_eq!(bytes_for_bits(0), 0);
        assert_eq!(bytes_for_bits(1), 1);
        assert_eq!(bytes_for_bits(8), 1);
        assert_eq!(bytes_for_bits(17), 3);
        assert_eq!(bytes_for_bits(16 * 2), 4);
    }
}
