//! Command sequences
//!
//! Runs a list of named commands against one device, in order, and collects
//! the outcome of each. Commands that change device state only go out when
//! the caller's [`WritePolicy`] allows them.

use log::{info, warn};

use crate::error::MbaError;
use crate::mba::{MbaDeviceHandle, SmbusPort};
use crate::registry::{AccessMode, CommandDescriptor};
use crate::sink::ReportSink;

/// Read-only health check: identity, status words and failure registers
pub const DIAGNOSTIC_SEQUENCE: &[&str] = &[
    "DeviceType",
    "FirmwareVersion",
    "HardwareVersion",
    "OperationStatus",
    "ManufacturingStatus",
    "SafetyAlert",
    "SafetyStatus",
    "PFAlert",
    "PFStatus",
    "PF2RegisterRead",
];

/// Unseal, clear the secondary permanent-failure flag, read it back
pub const CLEAR_PF2_SEQUENCE: &[&str] = &["UnsealKey1", "UnsealKey2", "ClearPF2", "PF2RegisterRead"];

/// Whether state-changing commands may be sent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WritePolicy {
    #[default]
    ReadOnly,
    AllowWrite,
}

impl WritePolicy {
    pub fn permits(&self, cmd: &CommandDescriptor) -> bool {
        match self {
            WritePolicy::AllowWrite => true,
            WritePolicy::ReadOnly => cmd.access == AccessMode::Read,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SequenceOptions {
    pub policy: WritePolicy,
    /// Skip the remaining commands after the first failure
    pub stop_on_error: bool,
}

/// Result of one command in a sequence
#[derive(Debug)]
pub struct CommandOutcome {
    pub name: String,
    pub result: Result<(), MbaError>,
}

#[derive(Debug, Default)]
pub struct SequenceReport {
    pub outcomes: Vec<CommandOutcome>,
}

impl SequenceReport {
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    pub fn failed(&self) -> impl Iterator<Item = &CommandOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn is_success(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }
}

/// Run `names` against `address` in order.
///
/// Names that are not in the registry fail the same way a single run does.
/// Write commands refused by the policy fail with
/// [`MbaError::WriteNotAllowed`] and never reach the bus.
pub async fn run_sequence<P, S>(
    handle: &mut MbaDeviceHandle<P, S>,
    address: u8,
    names: &[&str],
    options: SequenceOptions,
) -> SequenceReport
where
    P: SmbusPort,
    S: ReportSink,
{
    let mut report = SequenceReport::default();

    for name in names {
        let result = match handle.registry().lookup(name) {
            Some(cmd) if !options.policy.permits(cmd) => {
                warn!("Refusing write command {name} under read-only policy");
                handle
                    .sink_mut()
                    .emit(&format!("Skipping {name}: write commands not allowed"));
                Err(MbaError::WriteNotAllowed(name.to_string()))
            }
            Some(cmd) => handle.run_descriptor(address, cmd).await,
            None => handle.run(address, name).await,
        };

        let failed = result.is_err();
        report.outcomes.push(CommandOutcome {
            name: name.to_string(),
            result,
        });
        if failed && options.stop_on_error {
            warn!("Stopping sequence after {name}");
            break;
        }
    }

    info!(
        "Sequence finished: {}/{} commands succeeded",
        report.succeeded(),
        names.len()
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mba::{MbaTiming, MockSmbusPort};
    use crate::registry::{lookup, registry};
    use std::time::Duration;

    fn handle(mock: &MockSmbusPort) -> MbaDeviceHandle<MockSmbusPort, Vec<String>> {
        let timing = MbaTiming {
            settle_delay: Duration::ZERO,
            post_command_delay: Duration::ZERO,
            read_timeout: Duration::from_millis(20),
            poll_interval: Duration::from_millis(1),
        };
        MbaDeviceHandle::with_sink(mock.clone(), Vec::new(), timing)
    }

    #[test]
    fn test_sequences_resolve() {
        for name in DIAGNOSTIC_SEQUENCE.iter().chain(CLEAR_PF2_SEQUENCE) {
            assert!(registry().lookup(name).is_some(), "{name}");
        }
        assert!(DIAGNOSTIC_SEQUENCE
            .iter()
            .all(|n| lookup(n).is_some_and(|c| c.is_readable())));
    }

    #[test]
    fn test_policy() {
        let seal = lookup("SealDevice").unwrap();
        let status = lookup("SafetyStatus").unwrap();
        assert!(!WritePolicy::ReadOnly.permits(seal));
        assert!(WritePolicy::ReadOnly.permits(status));
        assert!(WritePolicy::AllowWrite.permits(seal));
    }

    #[tokio::test]
    async fn test_read_only_refuses_writes() {
        let mock = MockSmbusPort::new();
        let mut h = handle(&mock);

        let report = run_sequence(&mut h, 0x0B, &["SealDevice"], SequenceOptions::default()).await;
        assert!(matches!(
            report.outcomes[0].result,
            Err(MbaError::WriteNotAllowed(_))
        ));
        assert!(mock.transmissions().is_empty());
    }

    #[tokio::test]
    async fn test_stop_on_error() {
        let mock = MockSmbusPort::new();
        let mut h = handle(&mock);
        let options = SequenceOptions {
            policy: WritePolicy::AllowWrite,
            stop_on_error: true,
        };

        let report = run_sequence(&mut h, 0x0B, &["Bogus", "SealDevice"], options).await;
        assert_eq!(report.outcomes.len(), 1);
        assert!(!report.is_success());
        assert!(mock.transmissions().is_empty());
    }

    #[tokio::test]
    async fn test_continue_after_error() {
        let mock = MockSmbusPort::new();
        let mut h = handle(&mock);
        let options = SequenceOptions {
            policy: WritePolicy::AllowWrite,
            stop_on_error: false,
        };

        let report = run_sequence(&mut h, 0x0B, &["Bogus", "SealDevice"], options).await;
        assert_eq!(report.outcomes.len(), 2);
        assert_eq!(report.succeeded(), 1);
        assert_eq!(report.failed().next().unwrap().name, "Bogus");
        assert_eq!(mock.tx_frames(), vec![vec![0x44, 0x02, 0x30, 0x00]]);
    }
}
