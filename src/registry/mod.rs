//! # ManufacturerBlockAccess Command Registry
//!
//! Immutable table of the MBA sub-commands this crate knows how to issue,
//! keyed by a human-readable name. The table is built once on first use and
//! never mutated afterwards.
//!
//! ## Usage Example
//!
//! ```rust
//! use bqmba_rs::registry::{lookup, AccessMode};
//!
//! let cmd = lookup("DeviceType").unwrap();
//! assert_eq!(cmd.sub_command, 0x0001);
//! assert_eq!(cmd.access, AccessMode::Read);
//!
//! // Names are case-sensitive
//! assert!(lookup("devicetype").is_none());
//! ```

pub mod tables;

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Serialize, Serializer};

use crate::constants::MAX_WRITE_DATA;

/// Meaning printed for a cleared bit that has no explicit inactive value
pub const DEFAULT_INACTIVE_VALUE: &str = "Inactive";

/// Whether the controller answers a sub-command with a data block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum AccessMode {
    Read,
    Write,
}

/// Secondary representation printed after the hex dump
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DisplayFormat {
    Decimal,
    Hex,
    Binary,
    Text,
    Mixed,
}

/// Fixed-capacity payload appended after the sub-command
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct WriteData {
    bytes: [u8; MAX_WRITE_DATA],
    len: u8,
}

impl WriteData {
    pub const EMPTY: WriteData = WriteData {
        bytes: [0; MAX_WRITE_DATA],
        len: 0,
    };

    /// Builds a payload; more than `MAX_WRITE_DATA` bytes fails at compile time
    /// in a `static` context.
    pub const fn new<const N: usize>(data: [u8; N]) -> Self {
        assert!(N <= MAX_WRITE_DATA, "write payload exceeds capacity");
        let mut bytes = [0u8; MAX_WRITE_DATA];
        let mut i = 0;
        while i < N {
            bytes[i] = data[i];
            i += 1;
        }
        WriteData {
            bytes,
            len: N as u8,
        }
    }

    /// Runtime counterpart of [`WriteData::new`]; `None` past capacity.
    pub fn from_slice(data: &[u8]) -> Option<Self> {
        if data.len() > MAX_WRITE_DATA {
            return None;
        }
        let mut bytes = [0u8; MAX_WRITE_DATA];
        bytes[..data.len()].copy_from_slice(data);
        Some(WriteData {
            bytes,
            len: data.len() as u8,
        })
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.bytes[..self.len as usize]
    }

    pub fn len(&self) -> usize {
        self.len as usize
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

impl fmt::Debug for WriteData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

impl Serialize for WriteData {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.as_slice())
    }
}

/// One named bit of a status word.
///
/// `bit_index` numbers bits MSB-first across the whole response: bit 0 is the
/// least significant bit of the last byte of the big-endian word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BitFieldDescriptor {
    pub bit_index: u8,
    pub label: &'static str,
    pub description: Option<&'static str>,
    pub active_value: &'static str,
    pub inactive_value: Option<&'static str>,
}

impl BitFieldDescriptor {
    pub const fn new(
        bit_index: u8,
        label: &'static str,
        description: &'static str,
        active_value: &'static str,
        inactive_value: &'static str,
    ) -> Self {
        Self {
            bit_index,
            label,
            description: Some(description),
            active_value,
            inactive_value: Some(inactive_value),
        }
    }

    /// Meaning of the bit for the given state.
    pub fn meaning(&self, set: bool) -> &'static str {
        if set {
            self.active_value
        } else {
            self.inactive_value.unwrap_or(DEFAULT_INACTIVE_VALUE)
        }
    }
}

/// Identifies one MBA protocol operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CommandDescriptor {
    pub name: &'static str,
    pub sub_command: u16,
    pub write_data: WriteData,
    pub access: AccessMode,
    pub format: DisplayFormat,
    pub bit_fields: &'static [BitFieldDescriptor],
    pub description: &'static str,
}

impl CommandDescriptor {
    /// A sub-command the controller answers with a data block.
    pub const fn read(
        name: &'static str,
        sub_command: u16,
        format: DisplayFormat,
        bit_fields: &'static [BitFieldDescriptor],
        description: &'static str,
    ) -> Self {
        Self {
            name,
            sub_command,
            write_data: WriteData::EMPTY,
            access: AccessMode::Read,
            format,
            bit_fields,
            description,
        }
    }

    /// A sub-command that is only written; no read is ever attempted.
    pub const fn write(
        name: &'static str,
        sub_command: u16,
        write_data: WriteData,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            sub_command,
            write_data,
            access: AccessMode::Write,
            format: DisplayFormat::Hex,
            bit_fields: &[],
            description,
        }
    }

    pub fn write_len(&self) -> usize {
        self.write_data.len()
    }

    pub fn is_readable(&self) -> bool {
        self.access == AccessMode::Read
    }

    /// Declared width of the status word, in bits (one descriptor per bit).
    pub fn total_bits(&self) -> usize {
        self.bit_fields.len()
    }
}

/// Read-only name → descriptor lookup service.
#[derive(Debug)]
pub struct CommandRegistry {
    commands: &'static [CommandDescriptor],
    by_name: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    /// Indexes a command table. On a duplicated name the first entry wins.
    pub fn new(commands: &'static [CommandDescriptor]) -> Self {
        let mut by_name = HashMap::with_capacity(commands.len());
        for (idx, cmd) in commands.iter().enumerate() {
            match by_name.entry(cmd.name) {
                Entry::Occupied(_) => {
                    log::warn!("Duplicate MBA command name {}, keeping first entry", cmd.name);
                }
                Entry::Vacant(slot) => {
                    slot.insert(idx);
                }
            }
        }
        Self { commands, by_name }
    }

    /// Exact, case-sensitive lookup. An empty name never matches.
    pub fn lookup(&self, name: &str) -> Option<&'static CommandDescriptor> {
        let commands = self.commands;
        self.by_name.get(name).map(|&idx| &commands[idx])
    }

    /// Commands in table order.
    pub fn iter(&self) -> impl Iterator<Item = &'static CommandDescriptor> {
        self.commands.iter()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> {
        self.commands.iter().map(|cmd| cmd.name)
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }
}

impl Serialize for CommandRegistry {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.commands)
    }
}

/// The bq40z50-R2 command set, indexed on first use
pub static REGISTRY: Lazy<CommandRegistry> =
    Lazy::new(|| CommandRegistry::new(tables::MBA_COMMANDS));

pub fn registry() -> &'static CommandRegistry {
    &REGISTRY
}

/// Shorthand for `registry().lookup(name)`.
pub fn lookup(name: &str) -> Option<&'static CommandDescriptor> {
    REGISTRY.lookup(name)
}
