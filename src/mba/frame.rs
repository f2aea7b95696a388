//! # MBA Wire Format
//!
//! Request (block write, SMBus length-of-remainder convention):
//!
//! ```text
//! [0x44][N = 2 + data_len][sub lo][sub hi][data ...]
//! ```
//!
//! Response (after re-issuing 0x44 with a repeated start):
//!
//! ```text
//! [len][echoed sub lo][echoed sub hi][payload ...]      len counts what follows it
//! ```

use bytes::{BufMut, Bytes, BytesMut};

use crate::constants::{MANUFACTURER_BLOCK_ACCESS_COMMAND, SUB_COMMAND_LEN};
use crate::registry::CommandDescriptor;

/// Encode the block write that issues `cmd`.
pub fn encode_request(cmd: &CommandDescriptor) -> Bytes {
    let data = cmd.write_data.as_slice();
    let mut buf = BytesMut::with_capacity(2 + SUB_COMMAND_LEN + data.len());
    buf.put_u8(MANUFACTURER_BLOCK_ACCESS_COMMAND);
    buf.put_u8((SUB_COMMAND_LEN + data.len()) as u8);
    buf.put_u16_le(cmd.sub_command);
    buf.put_slice(data);
    buf.freeze()
}

/// Bytes received by one read, after the length byte.
///
/// Owned by the call that produced it; capacity is fixed at construction and
/// bytes beyond it are dropped, never written past the end.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    bytes: Vec<u8>,
    capacity: usize,
    declared_len: usize,
    available: usize,
}

impl RawResponse {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            bytes: Vec::with_capacity(capacity),
            capacity,
            declared_len: 0,
            available: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Block length announced by the device (excluding the length byte)
    pub fn declared_len(&self) -> usize {
        self.declared_len
    }

    /// Bytes the bus had available when the block was copied
    pub fn available(&self) -> usize {
        self.available
    }

    /// The device announced more than fits
    pub fn is_truncated(&self) -> bool {
        self.declared_len > self.capacity
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes
    }

    pub fn as_mut_slice(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Echoed sub-command, valid before byte-order normalization only
    pub fn echoed_sub_command(&self) -> Option<u16> {
        match self.bytes.as_slice() {
            [lo, hi, ..] => Some(u16::from_le_bytes([*lo, *hi])),
            _ => None,
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub(crate) fn reset(&mut self, declared_len: usize, available: usize) {
        self.bytes.clear();
        self.declared_len = declared_len;
        self.available = available;
    }

    /// Append one byte; `false` once the buffer is full.
    pub(crate) fn push(&mut self, byte: u8) -> bool {
        if self.bytes.len() < self.capacity {
            self.bytes.push(byte);
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::lookup;

    #[test]
    fn test_encode_write_without_data() {
        let frame = encode_request(lookup("PermanentFailure").unwrap());
        assert_eq!(&frame[..], &[0x44, 0x02, 0x24, 0x00]);
    }

    #[test]
    fn test_encode_write_with_data() {
        let frame = encode_request(lookup("ClearPF2").unwrap());
        assert_eq!(&frame[..], &[0x44, 0x06, 0x62, 0x40, 0x01, 0x23, 0x45, 0x67]);
    }

    #[test]
    fn test_encode_sub_command_little_endian() {
        let frame = encode_request(lookup("UnsealKey2").unwrap());
        assert_eq!(&frame[..], &[0x44, 0x02, 0xDF, 0xCC]);
    }

    #[test]
    fn test_response_capacity_bound() {
        let mut response = RawResponse::with_capacity(2);
        response.reset(4, 4);
        assert!(response.push(1));
        assert!(response.push(2));
        assert!(!response.push(3));
        assert_eq!(response.as_slice(), &[1, 2]);
        assert!(response.is_truncated());
    }

    #[test]
    fn test_echoed_sub_command() {
        let mut response = RawResponse::with_capacity(8);
        response.reset(4, 4);
        for b in [0x54, 0x00, 0x01, 0x02] {
            response.push(b);
        }
        assert_eq!(response.echoed_sub_command(), Some(0x0054));
        assert!(!response.is_truncated());
    }
}
