//! # Byte-Order Normalization
//!
//! SMBus block data arrives least-significant byte first. The renderer and the
//! bit-field decoder read status words most-significant byte first, so a
//! received block is reversed in place before it is interpreted.
//!
//! ## Usage
//!
//! ```rust
//! use bqmba_rs::util::byteorder::reverse_bytes;
//!
//! let mut word = [0x12, 0x34, 0x56, 0x78];
//! reverse_bytes(&mut word);
//! assert_eq!(word, [0x78, 0x56, 0x34, 0x12]);
//! ```

/// Reverse a slice of bytes in place
///
/// Involution: applying it twice restores the input, for any length.
#[inline]
pub fn reverse_bytes(data: &mut [u8]) {
    let len = data.len();
    for i in 0..len / 2 {
        data.swap(i, len - 1 - i);
    }
}

/// Reverse the first `len` bytes in place, clamped to the slice length
///
/// Returns the number of bytes actually reversed.
pub fn reverse_prefix(data: &mut [u8], len: usize) -> usize {
    let region = len.min(data.len());
    reverse_bytes(&mut data[..region]);
    region
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reverse_bytes_basic() {
        let mut data = [0x12, 0x34, 0x56, 0x78];
        reverse_bytes(&mut data);
        assert_eq!(data, [0x78, 0x56, 0x34, 0x12]);
    }

    #[test]
    fn test_reverse_bytes_odd_length() {
        let mut data = [0x01, 0x02, 0x03];
        reverse_bytes(&mut data);
        assert_eq!(data, [0x03, 0x02, 0x01]);
    }

    #[test]
    fn test_reverse_bytes_trivial_lengths() {
        let mut empty: [u8; 0] = [];
        reverse_bytes(&mut empty);
        assert_eq!(empty, [0u8; 0]);

        let mut one = [0xAB];
        reverse_bytes(&mut one);
        assert_eq!(one, [0xAB]);
    }

    #[test]
    fn test_reverse_bytes_invertible() {
        let original: Vec<u8> = (0..=31).collect();
        let mut data = original.clone();
        reverse_bytes(&mut data);
        assert_ne!(data, original);
        reverse_bytes(&mut data);
        assert_eq!(data, original);
    }

    #[test]
    fn test_reverse_prefix_response_block() {
        // len=4 covers the echoed sub-command 0x0024 and payload AA BB
        let mut data = [0x24, 0x00, 0xAA, 0xBB, 0xEE];
        assert_eq!(reverse_prefix(&mut data, 4), 4);
        assert_eq!(data, [0xBB, 0xAA, 0x00, 0x24, 0xEE]);
    }

    #[test]
    fn test_reverse_prefix_clamped() {
        let mut data = [0x01, 0x02];
        assert_eq!(reverse_prefix(&mut data, 10), 2);
        assert_eq!(data, [0x02, 0x01]);
    }
}
