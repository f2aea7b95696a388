//! Mock SMBus port implementation for testing
//!
//! This module provides a mock port that can be used to test the MBA
//! engine without a battery on the bench. Clones share state, so a test
//! keeps one clone for scripting and inspection while the handle owns
//! another.

use std::collections::VecDeque;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::constants::{BUS_STATUS_SUCCESS, WIRE_BUFFER_SIZE};
use crate::mba::port::SmbusPort;

/// One write seen on the bus
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transmission {
    pub address: u8,
    pub bytes: Vec<u8>,
    pub stop: bool,
}

/// Scripted answer to the next `request_from`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockReply {
    pub bytes: Vec<u8>,
    /// Bytes present right after the request; the rest arrive one per
    /// `available()` poll.
    pub immediate: usize,
}

/// Mock port that records writes and plays back scripted replies
#[derive(Clone)]
pub struct MockSmbusPort {
    /// Every transmission, in order
    pub tx_log: Arc<Mutex<Vec<Transmission>>>,
    /// Completion codes for upcoming transmissions (empty = success)
    pub status_codes: Arc<Mutex<VecDeque<u8>>>,
    /// Replies for upcoming requests (empty = nothing on the bus)
    pub replies: Arc<Mutex<VecDeque<MockReply>>>,
    /// Receive buffer
    pub rx_buffer: Arc<Mutex<VecDeque<u8>>>,
    /// Bytes of the current reply that have not arrived yet
    pub in_flight: Arc<Mutex<VecDeque<u8>>>,
    /// Sizes passed to `request_from`
    pub requests: Arc<Mutex<Vec<usize>>>,
    buffer_size: usize,
}

impl Default for MockSmbusPort {
    fn default() -> Self {
        Self::new()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl MockSmbusPort {
    pub fn new() -> Self {
        Self::with_buffer_size(WIRE_BUFFER_SIZE)
    }

    pub fn with_buffer_size(buffer_size: usize) -> Self {
        MockSmbusPort {
            tx_log: Arc::new(Mutex::new(Vec::new())),
            status_codes: Arc::new(Mutex::new(VecDeque::new())),
            replies: Arc::new(Mutex::new(VecDeque::new())),
            rx_buffer: Arc::new(Mutex::new(VecDeque::new())),
            in_flight: Arc::new(Mutex::new(VecDeque::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            buffer_size,
        }
    }

    /// Completion code for the next transmission
    pub fn queue_status(&self, code: u8) {
        lock(&self.status_codes).push_back(code);
    }

    /// Reply that is fully present when requested
    pub fn queue_reply(&self, bytes: &[u8]) {
        self.queue_trickled_reply(bytes, bytes.len());
    }

    /// Reply whose tail arrives one byte per poll
    pub fn queue_trickled_reply(&self, bytes: &[u8], immediate: usize) {
        lock(&self.replies).push_back(MockReply {
            bytes: bytes.to_vec(),
            immediate,
        });
    }

    /// Reply for a readable command: `[len][sub lo][sub hi][payload..]`
    pub fn queue_block_reply(&self, sub_command: u16, payload: &[u8]) {
        let mut bytes = Vec::with_capacity(3 + payload.len());
        bytes.push((2 + payload.len()) as u8);
        bytes.extend_from_slice(&sub_command.to_le_bytes());
        bytes.extend_from_slice(payload);
        self.queue_reply(&bytes);
    }

    pub fn transmissions(&self) -> Vec<Transmission> {
        lock(&self.tx_log).clone()
    }

    /// Bytes of every transmission, in order
    pub fn tx_frames(&self) -> Vec<Vec<u8>> {
        lock(&self.tx_log).iter().map(|t| t.bytes.clone()).collect()
    }

    pub fn request_sizes(&self) -> Vec<usize> {
        lock(&self.requests).clone()
    }

    /// Clear all buffers and scripts
    pub fn clear(&self) {
        lock(&self.tx_log).clear();
        lock(&self.status_codes).clear();
        lock(&self.replies).clear();
        lock(&self.rx_buffer).clear();
        lock(&self.in_flight).clear();
        lock(&self.requests).clear();
    }
}

#[async_trait]
impl SmbusPort for MockSmbusPort {
    async fn transmit(&mut self, address: u8, bytes: &[u8], stop: bool) -> u8 {
        lock(&self.tx_log).push(Transmission {
            address,
            bytes: bytes.to_vec(),
            stop,
        });
        lock(&self.status_codes)
            .pop_front()
            .unwrap_or(BUS_STATUS_SUCCESS)
    }

    async fn request_from(&mut self, _address: u8, max_len: usize) -> usize {
        lock(&self.requests).push(max_len);

        let mut rx = lock(&self.rx_buffer);
        let mut in_flight = lock(&self.in_flight);
        rx.clear();
        in_flight.clear();

        if let Some(reply) = lock(&self.replies).pop_front() {
            let limit = max_len.min(self.buffer_size);
            let bytes = &reply.bytes[..reply.bytes.len().min(limit)];
            let split = reply.immediate.min(bytes.len());
            rx.extend(&bytes[..split]);
            in_flight.extend(&bytes[split..]);
        }
        rx.len()
    }

    fn available(&mut self) -> usize {
        let mut rx = lock(&self.rx_buffer);
        if let Some(byte) = lock(&self.in_flight).pop_front() {
            rx.push_back(byte);
        }
        rx.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        lock(&self.rx_buffer).pop_front()
    }

    fn buffer_size(&self) -> usize {
        self.buffer_size
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_records_transmissions() {
        let mock = MockSmbusPort::new();
        let mut port = mock.clone();

        assert_eq!(port.transmit(0x0B, &[0x44, 0x02, 0x01, 0x00], true).await, 0);
        let tx = mock.transmissions();
        assert_eq!(tx.len(), 1);
        assert_eq!(tx[0].address, 0x0B);
        assert!(tx[0].stop);
    }

    #[tokio::test]
    async fn test_scripted_status() {
        let mock = MockSmbusPort::new();
        mock.queue_status(2);
        let mut port = mock.clone();

        assert_eq!(port.transmit(0x0B, &[0x44], false).await, 2);
        assert_eq!(port.transmit(0x0B, &[0x44], false).await, 0);
    }

    #[tokio::test]
    async fn test_reply_limited_to_request() {
        let mock = MockSmbusPort::new();
        mock.queue_reply(&[1, 2, 3, 4, 5]);
        let mut port = mock.clone();

        assert_eq!(port.request_from(0x0B, 3).await, 3);
        assert_eq!(port.read_byte(), Some(1));
        assert_eq!(port.available(), 2);
    }

    #[tokio::test]
    async fn test_trickled_reply() {
        let mock = MockSmbusPort::new();
        mock.queue_trickled_reply(&[1, 2, 3, 4], 2);
        let mut port = mock.clone();

        assert_eq!(port.request_from(0x0B, 32).await, 2);
        assert_eq!(port.available(), 3);
        assert_eq!(port.available(), 4);
        assert_eq!(port.available(), 4);
    }

    #[tokio::test]
    async fn test_no_reply() {
        let mut port = MockSmbusPort::new();
        assert_eq!(port.request_from(0x0B, 32).await, 0);
        assert_eq!(port.read_byte(), None);
    }
}
