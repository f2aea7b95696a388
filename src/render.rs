//! # Response Rendering
//!
//! Turns raw response bytes into report lines: a hex dump plus one secondary
//! representation, and the named bits of a status word.
//!
//! Bit fields are numbered MSB-first across the whole word, over a buffer
//! that has already been reversed into big-endian order, so bit 0 lives in
//! the last byte of the word:
//!
//! ```text
//! total_bits = 32      byte 0    byte 1    byte 2    byte 3
//!                      31..24    23..16    15..8     7..0
//! ```
//!
//! ```rust
//! use bqmba_rs::render::byte_index_for;
//!
//! assert_eq!(byte_index_for(32, 0), Some(3));
//! assert_eq!(byte_index_for(32, 31), Some(0));
//! assert_eq!(byte_index_for(16, 16), None);
//! ```

use serde::Serialize;

use crate::constants::MANUFACTURER_BLOCK_ACCESS_COMMAND;
use crate::registry::{BitFieldDescriptor, CommandDescriptor, DisplayFormat};
use crate::util::hex::{encode_hex_upper, format_hex_prefixed};

/// Placeholder for non-printable bytes in the text projection
pub const NON_PRINTABLE: char = '.';

/// Render a byte sequence: always hex, plus the secondary `format`.
///
/// `Hex` and `Mixed` produce the hex line only.
pub fn render_buffer(data: &[u8], format: DisplayFormat) -> Vec<String> {
    let mut lines = vec![format!("Data (hex): {}", format_hex_prefixed(data))];

    match format {
        DisplayFormat::Decimal => {
            let values: Vec<String> = data.iter().map(|b| b.to_string()).collect();
            lines.push(format!("Data (dec): {}", values.join(" ")));
        }
        DisplayFormat::Binary => {
            let values: Vec<String> = data.iter().map(|b| format!("{b:08b}")).collect();
            lines.push(format!("Data (bin): {}", values.join(" ")));
        }
        DisplayFormat::Text => {
            lines.push(format!("Data (txt): {}", ascii_projection(data)));
        }
        DisplayFormat::Hex | DisplayFormat::Mixed => {}
    }

    lines
}

/// Bytes in 32..=126 as characters, everything else as [`NON_PRINTABLE`]
pub fn ascii_projection(data: &[u8]) -> String {
    data.iter()
        .map(|&b| {
            if (32..=126).contains(&b) {
                b as char
            } else {
                NON_PRINTABLE
            }
        })
        .collect()
}

/// Byte holding `bit_index` in a big-endian word of `total_bits`.
///
/// `None` when the bit lies outside the declared word.
pub fn byte_index_for(total_bits: usize, bit_index: u8) -> Option<usize> {
    (total_bits / 8)
        .checked_sub(bit_index as usize / 8)?
        .checked_sub(1)
}

/// Reads one bit; anything outside the declared word or the buffer reads as 0.
pub fn bit_is_set(buffer: &[u8], total_bits: usize, bit_index: u8) -> bool {
    byte_index_for(total_bits, bit_index)
        .and_then(|idx| buffer.get(idx))
        .map(|byte| (byte >> (bit_index % 8)) & 0x01 == 1)
        .unwrap_or(false)
}

/// A bit-field descriptor resolved against a response
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BitFieldState<'a> {
    pub field: &'a BitFieldDescriptor,
    pub set: bool,
}

impl BitFieldState<'_> {
    pub fn meaning(&self) -> &str {
        self.field.meaning(self.set)
    }

    /// "Bit 12 (PF): 1 = Active - Permanent Failure mode"
    pub fn to_line(&self) -> String {
        let mut line = format!(
            "Bit {} ({}): {} = {}",
            self.field.bit_index,
            self.field.label,
            u8::from(self.set),
            self.meaning()
        );
        if let Some(description) = self.field.description {
            line.push_str(" - ");
            line.push_str(description);
        }
        line
    }
}

/// Resolve every field of a status word against `buffer`.
pub fn decode_bitfields<'a>(
    buffer: &[u8],
    total_bits: usize,
    fields: &'a [BitFieldDescriptor],
) -> Vec<BitFieldState<'a>> {
    fields
        .iter()
        .map(|field| BitFieldState {
            field,
            set: bit_is_set(buffer, total_bits, field.bit_index),
        })
        .collect()
}

/// One report line per field, in table order.
pub fn render_bitfields(
    buffer: &[u8],
    total_bits: usize,
    fields: &[BitFieldDescriptor],
) -> Vec<String> {
    decode_bitfields(buffer, total_bits, fields)
        .iter()
        .map(BitFieldState::to_line)
        .collect()
}

/// "ClearPF2 : CMD=0x44, SUBCMD=0x4062 DATA=0x01234567"
pub fn describe_command(cmd: &CommandDescriptor) -> String {
    let mut text = format!(
        "{} : CMD=0x{:02X}, SUBCMD=0x{:04X}",
        cmd.name, MANUFACTURER_BLOCK_ACCESS_COMMAND, cmd.sub_command
    );
    if !cmd.write_data.is_empty() {
        text.push_str(" DATA=0x");
        text.push_str(&encode_hex_upper(cmd.write_data.as_slice()));
    }
    text
}
