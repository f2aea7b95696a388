//! # MBA Error Handling
//!
//! This module defines the error types that can occur in the bqmba-rs crate:
//! `TransportError` classifies the bus driver's completion codes, and `MbaError`
//! covers everything a command run can fail with.

use crate::constants::*;
use thiserror::Error;

/// Classified bus driver completion code. Success (code 0) is never an error.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum TransportError {
    /// Code 1: the frame did not fit the driver's transmit buffer.
    #[error("Error: Data too long to fit in transmit buffer.")]
    BufferOverflow,

    /// Code 2: nobody acknowledged the target address.
    #[error("Error: Received NACK on transmit of address.")]
    AddressNack,

    /// Code 3: the target refused a data byte.
    #[error("Error: Received NACK on transmit of data.")]
    DataNack,

    /// Code 4: any other bus failure reported by the driver.
    #[error("Error: Other error occurred.")]
    Other,

    /// Code 5: the bus transaction timed out.
    #[error("Error: Timeout occurred.")]
    Timeout,

    /// Any code outside the driver contract.
    #[error("Error: Unknown error code.")]
    Unknown(u8),
}

impl TransportError {
    /// Classifies a driver completion code, `None` for success.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            BUS_STATUS_SUCCESS => None,
            BUS_STATUS_BUFFER_OVERFLOW => Some(TransportError::BufferOverflow),
            BUS_STATUS_ADDRESS_NACK => Some(TransportError::AddressNack),
            BUS_STATUS_DATA_NACK => Some(TransportError::DataNack),
            BUS_STATUS_OTHER => Some(TransportError::Other),
            BUS_STATUS_TIMEOUT => Some(TransportError::Timeout),
            other => Some(TransportError::Unknown(other)),
        }
    }

    /// Turns a completion code into a `Result`.
    pub fn check(code: u8) -> Result<(), Self> {
        match Self::from_code(code) {
            None => Ok(()),
            Some(err) => Err(err),
        }
    }

    /// The completion code this error was classified from.
    pub fn code(&self) -> u8 {
        match self {
            TransportError::BufferOverflow => BUS_STATUS_BUFFER_OVERFLOW,
            TransportError::AddressNack => BUS_STATUS_ADDRESS_NACK,
            TransportError::DataNack => BUS_STATUS_DATA_NACK,
            TransportError::Other => BUS_STATUS_OTHER,
            TransportError::Timeout => BUS_STATUS_TIMEOUT,
            TransportError::Unknown(code) => *code,
        }
    }
}

/// Represents the different error types that can occur while running MBA commands.
#[derive(Debug, Error)]
pub enum MbaError {
    /// The command name is not in the registry.
    #[error("Command not found: {0}")]
    UnknownCommand(String),

    /// The bus driver reported a failed transmission.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// Fewer than length byte + echoed sub-command were received.
    #[error("No data available to read ({available} bytes received)")]
    ShortResponse { available: usize },

    /// The declared block never arrived completely.
    #[error("Timeout waiting for full data block, only {available} bytes readable.")]
    ReadTimeout { available: usize },

    /// A write-mode command was refused by the active write policy.
    #[error("Command {0} writes to the device and writes are not enabled")]
    WriteNotAllowed(String),

    /// Invalid configuration (timing file, CLI arguments).
    #[error("Configuration error: {0}")]
    Config(String),

    /// The bus backend could not be opened or configured.
    #[error("Bus error: {0}")]
    Bus(String),
}

impl From<serde_json::Error> for MbaError {
    fn from(err: serde_json::Error) -> Self {
        MbaError::Config(err.to_string())
    }
}

impl From<std::io::Error> for MbaError {
    fn from(err: std::io::Error) -> Self {
        MbaError::Config(err.to_string())
    }
}
