//! Property-based tests for byte-order normalization, request encoding and
//! bit-field lookup.

use bqmba_rs::mba::encode_request;
use bqmba_rs::registry::{CommandDescriptor, WriteData};
use bqmba_rs::render::{bit_is_set, byte_index_for};
use bqmba_rs::util::byteorder::{reverse_bytes, reverse_prefix};
use proptest::prelude::*;

proptest! {
    /// Reversing twice restores the buffer, for any length.
    #[test]
    fn reversal_is_involution(data in prop::collection::vec(any::<u8>(), 0..64)) {
        let mut buf = data.clone();
        reverse_bytes(&mut buf);
        reverse_bytes(&mut buf);
        prop_assert_eq!(buf, data);
    }

    /// Bytes past the reversal region are never touched.
    #[test]
    fn prefix_reversal_keeps_tail(
        data in prop::collection::vec(any::<u8>(), 0..40),
        len in 0usize..48,
    ) {
        let mut buf = data.clone();
        let region = reverse_prefix(&mut buf, len);
        prop_assert_eq!(region, len.min(data.len()));
        prop_assert_eq!(&buf[region..], &data[region..]);
    }

    /// The length byte always counts the sub-command plus payload.
    #[test]
    fn encoded_length_is_two_plus_payload(
        sub in any::<u16>(),
        payload in prop::collection::vec(any::<u8>(), 0..=8),
    ) {
        let data = WriteData::from_slice(&payload).unwrap();
        let cmd = CommandDescriptor::write("Prop", sub, data, "");
        let frame = encode_request(&cmd);

        prop_assert_eq!(frame[0], 0x44);
        prop_assert_eq!(frame[1] as usize, 2 + payload.len());
        prop_assert_eq!(frame.len(), 4 + payload.len());
        prop_assert_eq!(u16::from_le_bytes([frame[2], frame[3]]), sub);
        prop_assert_eq!(&frame[4..], payload.as_slice());
    }

    /// Bit lookup never panics and agrees with the byte mapping.
    #[test]
    fn bit_lookup_is_total(
        buf in prop::collection::vec(any::<u8>(), 0..8),
        bytes in 0usize..8,
        bit in any::<u8>(),
    ) {
        let total_bits = bytes * 8;
        let set = bit_is_set(&buf, total_bits, bit);
        match byte_index_for(total_bits, bit) {
            Some(idx) if idx < buf.len() => {
                prop_assert_eq!(set, buf[idx] & (1 << (bit % 8)) != 0);
            }
            _ => prop_assert!(!set),
        }
    }
}

#[test]
fn oversized_payload_is_rejected() {
    assert!(WriteData::from_slice(&[0u8; 9]).is_none());
}
