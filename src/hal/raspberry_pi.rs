//! # Raspberry Pi SMBus Backend
//!
//! [`SmbusPort`] over the Linux I2C character device, via `rppal`.
//!
//! ## Hardware Setup
//!
//! ```text
//! Pi Pin │ BCM GPIO │ Battery  │ Function
//! ───────┼──────────┼──────────┼──────────
//! 3      │ GPIO 2   │ SMBD     │ I2C1 data
//! 5      │ GPIO 3   │ SMBC     │ I2C1 clock
//! 6      │ GND      │ VSS      │ Ground
//! ```
//!
//! Enable the bus with `dtparam=i2c_arm=on`; the battery pack must be awake
//! (charger attached or a button press) to answer on 0x0B.
//!
//! ## Repeated start
//!
//! The kernel only produces a repeated start inside one combined transfer.
//! A transmit without stop is therefore held back and issued together with
//! the following `request_from` as a single write-read. A NACK on the held
//! back write surfaces as an empty receive buffer.
//!
//! ## Usage Example
//!
//! ```rust,no_run
//! use bqmba_rs::hal::RaspberryPiSmbus;
//! use bqmba_rs::mba::MbaDeviceHandle;
//!
//! # async fn demo() -> Result<(), bqmba_rs::MbaError> {
//! let port = RaspberryPiSmbus::open(1)?;
//! let mut battery = MbaDeviceHandle::new(port);
//! battery.run(0x0B, "OperationStatus").await?;
//! # Ok(())
//! # }
//! ```

use std::collections::VecDeque;
use std::io;

use async_trait::async_trait;
use rppal::i2c::{Error as I2cError, I2c};

use crate::constants::*;
use crate::error::MbaError;
use crate::mba::SmbusPort;

/// SMBus master on a Raspberry Pi I2C bus
pub struct RaspberryPiSmbus {
    i2c: I2c,
    bus: u8,
    address: Option<u8>,
    pending: Option<Vec<u8>>,
    rx: VecDeque<u8>,
}

impl std::fmt::Debug for RaspberryPiSmbus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RaspberryPiSmbus")
            .field("bus", &self.bus)
            .field("address", &self.address)
            .field("rx", &self.rx.len())
            .finish()
    }
}

/// Map a failed transfer to the completion code the engine classifies.
fn status_for(err: &I2cError) -> u8 {
    match err {
        I2cError::Io(io_err) => status_for_io(io_err),
        I2cError::InvalidSlaveAddress(_) => BUS_STATUS_ADDRESS_NACK,
        _ => BUS_STATUS_OTHER,
    }
}

fn status_for_io(err: &io::Error) -> u8 {
    match err.raw_os_error() {
        Some(libc::ENXIO) => BUS_STATUS_ADDRESS_NACK,
        Some(libc::EREMOTEIO) => BUS_STATUS_DATA_NACK,
        Some(libc::ETIMEDOUT) => BUS_STATUS_TIMEOUT,
        Some(libc::EMSGSIZE) | Some(libc::EINVAL) => BUS_STATUS_BUFFER_OVERFLOW,
        _ => BUS_STATUS_OTHER,
    }
}

impl RaspberryPiSmbus {
    /// Open `/dev/i2c-<bus>`.
    pub fn open(bus: u8) -> Result<Self, MbaError> {
        let i2c = I2c::with_bus(bus)
            .map_err(|e| MbaError::Bus(format!("cannot open I2C bus {bus}: {e}")))?;

        log::info!("Raspberry Pi SMBus initialized:");
        log::info!("  Bus: /dev/i2c-{bus}");
        if let Ok(speed) = i2c.clock_speed() {
            log::info!("  Clock: {speed} Hz");
        }

        Ok(RaspberryPiSmbus {
            i2c,
            bus,
            address: None,
            pending: None,
            rx: VecDeque::with_capacity(WIRE_BUFFER_SIZE),
        })
    }

    pub fn bus(&self) -> u8 {
        self.bus
    }

    fn select(&mut self, address: u8) -> Result<(), I2cError> {
        if self.address != Some(address) {
            self.i2c.set_slave_address(address as u16)?;
            self.address = Some(address);
        }
        Ok(())
    }
}

#[async_trait]
impl SmbusPort for RaspberryPiSmbus {
    async fn transmit(&mut self, address: u8, bytes: &[u8], stop: bool) -> u8 {
        if bytes.len() > WIRE_BUFFER_SIZE {
            return BUS_STATUS_BUFFER_OVERFLOW;
        }
        if let Err(e) = self.select(address) {
            log::error!("I2C address select 0x{address:02X} failed: {e}");
            return status_for(&e);
        }

        if !stop {
            self.pending = Some(bytes.to_vec());
            return BUS_STATUS_SUCCESS;
        }

        log::trace!("I2C write 0x{address:02X}, {} bytes", bytes.len());
        match self.i2c.write(bytes) {
            Ok(_) => BUS_STATUS_SUCCESS,
            Err(e) => {
                log::error!("I2C write failed: {e}");
                status_for(&e)
            }
        }
    }

    async fn request_from(&mut self, address: u8, max_len: usize) -> usize {
        self.rx.clear();
        let pending = self.pending.take();

        if let Err(e) = self.select(address) {
            log::error!("I2C address select 0x{address:02X} failed: {e}");
            return 0;
        }

        let mut buf = vec![0u8; max_len.min(WIRE_BUFFER_SIZE)];
        let result = match &pending {
            Some(command) => {
                log::trace!("I2C write-read 0x{address:02X}, {} bytes", buf.len());
                self.i2c.write_read(command, &mut buf)
            }
            None => self.i2c.read(&mut buf).map(|n| buf.truncate(n)),
        };

        match result {
            Ok(()) => {
                self.rx.extend(buf);
                self.rx.len()
            }
            Err(e) => {
                log::error!("I2C read failed (status {}): {e}", status_for(&e));
                0
            }
        }
    }

    fn available(&mut self) -> usize {
        self.rx.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.rx.pop_front()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_errno_mapping() {
        let code = |errno| status_for_io(&io::Error::from_raw_os_error(errno));
        assert_eq!(code(libc::ENXIO), BUS_STATUS_ADDRESS_NACK);
        assert_eq!(code(libc::EREMOTEIO), BUS_STATUS_DATA_NACK);
        assert_eq!(code(libc::ETIMEDOUT), BUS_STATUS_TIMEOUT);
        assert_eq!(code(libc::EMSGSIZE), BUS_STATUS_BUFFER_OVERFLOW);
        assert_eq!(code(libc::EIO), BUS_STATUS_OTHER);
    }
}
