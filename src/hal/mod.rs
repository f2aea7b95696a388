//! # Bus Backends
//!
//! Concrete [`SmbusPort`](crate::mba::SmbusPort) implementations for real
//! hardware. Tests and host builds use
//! [`MockSmbusPort`](crate::mba::MockSmbusPort) instead.

// Platform implementations
#[cfg(feature = "raspberry-pi")]
pub mod raspberry_pi;

#[cfg(feature = "raspberry-pi")]
pub use raspberry_pi::RaspberryPiSmbus;
