//! Bus port abstraction
//!
//! The physical two-wire transport lives outside this crate. `SmbusPort`
//! captures what the MBA engine needs from it: a master that transmits with
//! or without a stop condition, clocks a block into a receive buffer, and
//! lets the caller drain that buffer byte by byte.

use async_trait::async_trait;

use crate::constants::WIRE_BUFFER_SIZE;

/// Trait for SMBus master operations
///
/// `transmit` returns the driver's completion code: 0 on success, 1 buffer
/// overflow, 2 address NACK, 3 data NACK, 4 other, 5 timeout. Classification
/// happens in [`crate::error::TransportError::from_code`].
#[async_trait]
pub trait SmbusPort: Send {
    /// Write `bytes` to `address`. With `stop = false` the bus stays owned
    /// for a repeated start.
    async fn transmit(&mut self, address: u8, bytes: &[u8], stop: bool) -> u8;

    /// Read up to `max_len` bytes from `address` into the receive buffer.
    /// Returns the number of bytes received.
    async fn request_from(&mut self, address: u8, max_len: usize) -> usize;

    /// Bytes waiting in the receive buffer.
    fn available(&mut self) -> usize;

    /// Take the next byte from the receive buffer.
    fn read_byte(&mut self) -> Option<u8>;

    /// Hard capacity of the receive buffer.
    fn buffer_size(&self) -> usize {
        WIRE_BUFFER_SIZE
    }
}

#[async_trait]
impl<P: SmbusPort + ?Sized> SmbusPort for Box<P> {
    async fn transmit(&mut self, address: u8, bytes: &[u8], stop: bool) -> u8 {
        (**self).transmit(address, bytes, stop).await
    }

    async fn request_from(&mut self, address: u8, max_len: usize) -> usize {
        (**self).request_from(address, max_len).await
    }

    fn available(&mut self) -> usize {
        (**self).available()
    }

    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }

    fn buffer_size(&self) -> usize {
        (**self).buffer_size()
    }
}
