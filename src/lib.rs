//! # bqmba-rs - ManufacturerBlockAccess for Smart Battery Controllers
//!
//! The bqmba-rs crate talks to fuel-gauge / protection controllers of the
//! bq40z50 family over SMBus using the ManufacturerBlockAccess (MBA,
//! command `0x44`) protocol: a 16-bit sub-command is written as a block,
//! and for read commands the answer is fetched back as a length-prefixed
//! block through the same command code.
//!
//! ## Features
//!
//! - Static registry of named MBA sub-commands with bit-field tables
//! - Request encoding and two-phase block reads with timeout handling
//! - Byte-order normalization of little-endian answers
//! - Human-readable reports: hex/dec/bin/text dumps and per-bit status lines
//! - Command sequences with a write policy guarding state-changing commands
//! - Pluggable bus backends: a mock port for tests, Raspberry Pi I2C via `rppal`
//!
//! ## Usage
//!
//! ```rust
//! use bqmba_rs::{MbaDeviceHandle, MbaTiming, MockSmbusPort};
//!
//! # #[tokio::main]
//! # async fn main() {
//! let port = MockSmbusPort::new();
//! port.queue_block_reply(0x0001, &[0x50, 0x45]);
//!
//! let mut battery = MbaDeviceHandle::with_sink(port, Vec::new(), MbaTiming::default());
//! battery.run(0x0B, "DeviceType").await.unwrap();
//! assert!(battery.sink().iter().any(|l| l == "Response length: 4 bytes"));
//! # }
//! ```

pub mod constants;
pub mod error;
pub mod hal;
pub mod logging;
pub mod mba;
pub mod registry;
pub mod render;
pub mod sequence;
pub mod sink;
pub mod util;

pub use crate::error::{MbaError, TransportError};
pub use crate::logging::{init_logger, log_info};

// Engine types
pub use mba::{encode_request, MbaDeviceHandle, MbaTiming, MockSmbusPort, RawResponse, SmbusPort};
pub use registry::{
    lookup, registry, AccessMode, BitFieldDescriptor, CommandDescriptor, CommandRegistry,
    DisplayFormat, WriteData,
};
pub use render::{decode_bitfields, describe_command, render_bitfields, render_buffer, BitFieldState};
pub use sequence::{
    run_sequence, SequenceOptions, SequenceReport, WritePolicy, CLEAR_PF2_SEQUENCE,
    DIAGNOSTIC_SEQUENCE,
};
pub use sink::{NullSink, ReportSink, StdoutSink};

#[cfg(feature = "raspberry-pi")]
pub use hal::RaspberryPiSmbus;

/// Run one named command against the device at `address`.
///
/// # Arguments
/// * `handle` - Device handle to communicate through
/// * `address` - 7-bit SMBus address (the bq40z50 answers on 0x0B)
/// * `name` - Registry name, case-sensitive
///
/// # Returns
/// * `Ok(())` - Command sent, and for read commands, answered and reported
/// * `Err(MbaError)` - Unknown name, bus failure, or incomplete answer
pub async fn run_command<P: SmbusPort, S: ReportSink>(
    handle: &mut MbaDeviceHandle<P, S>,
    address: u8,
    name: &str,
) -> Result<(), MbaError> {
    handle.run(address, name).await
}

/// Run the read-only diagnostic sequence.
///
/// # Arguments
/// * `handle` - Device handle to communicate through
/// * `address` - 7-bit SMBus address
///
/// # Returns
/// * `SequenceReport` - Outcome of every command; failures do not stop the run
pub async fn diagnose<P: SmbusPort, S: ReportSink>(
    handle: &mut MbaDeviceHandle<P, S>,
    address: u8,
) -> SequenceReport {
    run_sequence(handle, address, DIAGNOSTIC_SEQUENCE, SequenceOptions::default()).await
}
