//! # Utility Modules
//!
//! Byte-order normalization and hex helpers shared by the transport, the
//! renderer and the CLI.

pub mod byteorder;
pub mod hex;

pub use byteorder::{reverse_bytes, reverse_prefix};
pub use hex::{encode_hex_upper, format_hex_compact, format_hex_prefixed, parse_u8_lenient};
