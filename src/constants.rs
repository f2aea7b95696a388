//! ManufacturerBlockAccess Protocol Constants
//!
//! This module defines constants used by the MBA command engine, based on the
//! bq40z50-R2 technical reference and the SMBus block transfer conventions.

/// ManufacturerBlockAccess() command code; every sub-command travels behind it
pub const MANUFACTURER_BLOCK_ACCESS_COMMAND: u8 = 0x44;

/// Default SMBus address of a smart battery
pub const DEFAULT_DEVICE_ADDRESS: u8 = 0x0B;

/// Hard size of the bus driver's receive buffer
pub const WIRE_BUFFER_SIZE: usize = 32;

/// Length byte plus the two echoed sub-command bytes
pub const MIN_RESPONSE_BYTES: usize = 3;

/// Capacity of a descriptor's write payload
pub const MAX_WRITE_DATA: usize = 8;

/// Sub-command bytes counted by the block-write length byte
pub const SUB_COMMAND_LEN: usize = 2;

// ----------------------------------------------------------------------------
// Timing defaults (device requirements, see `mba::MbaTiming`)
// ----------------------------------------------------------------------------

/// Settle time after a block write before the next bus operation
pub const DEFAULT_SETTLE_DELAY_MS: u64 = 20;

/// Pacing delay after a completed command
pub const DEFAULT_POST_COMMAND_DELAY_MS: u64 = 100;

/// Ceiling for waiting on a full response block
pub const DEFAULT_READ_TIMEOUT_MS: u64 = 10_000;

/// Step between receive-buffer polls
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 10;

// ----------------------------------------------------------------------------
// Bus driver completion codes
// ----------------------------------------------------------------------------

pub const BUS_STATUS_SUCCESS: u8 = 0;
pub const BUS_STATUS_BUFFER_OVERFLOW: u8 = 1;
pub const BUS_STATUS_ADDRESS_NACK: u8 = 2;
pub const BUS_STATUS_DATA_NACK: u8 = 3;
pub const BUS_STATUS_OTHER: u8 = 4;
pub const BUS_STATUS_TIMEOUT: u8 = 5;
