//! MBA device handle
//!
//! Drives one battery controller through a [`SmbusPort`]: encodes and sends
//! sub-commands, performs the two-phase block read, and runs named commands
//! end to end with their report going to a [`ReportSink`].
//!
//! One command runs to completion before the next starts; the two-phase read
//! relies on owning the bus across the repeated start.

use log::{debug, error, warn};
use tokio::time::{sleep, Instant};

use crate::constants::{MANUFACTURER_BLOCK_ACCESS_COMMAND, MIN_RESPONSE_BYTES};
use crate::error::{MbaError, TransportError};
use crate::logging::log_frame_hex;
use crate::mba::frame::{encode_request, RawResponse};
use crate::mba::port::SmbusPort;
use crate::mba::timing::MbaTiming;
use crate::registry::{registry, CommandDescriptor, CommandRegistry};
use crate::render::{describe_command, render_bitfields, render_buffer};
use crate::sink::{ReportSink, StdoutSink};
use crate::util::byteorder::reverse_prefix;

/// Handle to a battery controller on an SMBus port
pub struct MbaDeviceHandle<P: SmbusPort, S: ReportSink = StdoutSink> {
    port: P,
    sink: S,
    timing: MbaTiming,
    registry: &'static CommandRegistry,
}

impl<P: SmbusPort> MbaDeviceHandle<P, StdoutSink> {
    /// Handle reporting to stdout with default timing
    pub fn new(port: P) -> Self {
        Self::with_sink(port, StdoutSink, MbaTiming::default())
    }
}

impl<P: SmbusPort, S: ReportSink> MbaDeviceHandle<P, S> {
    pub fn with_sink(port: P, sink: S, timing: MbaTiming) -> Self {
        MbaDeviceHandle {
            port,
            sink,
            timing,
            registry: registry(),
        }
    }

    /// Resolve names against another command table
    pub fn with_registry(mut self, registry: &'static CommandRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn registry(&self) -> &'static CommandRegistry {
        self.registry
    }

    pub fn timing(&self) -> &MbaTiming {
        &self.timing
    }

    pub fn set_timing(&mut self, timing: MbaTiming) {
        self.timing = timing;
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_parts(self) -> (P, S) {
        (self.port, self.sink)
    }

    fn report_error(&mut self, err: &dyn std::fmt::Display) {
        let line = err.to_string();
        error!("{line}");
        self.sink.emit(&line);
    }

    /// Send `cmd` as a block write to `address`.
    ///
    /// The settle delay is always observed after the write, so a follow-up
    /// read or command never hits a controller that is still busy.
    pub async fn send(
        &mut self,
        address: u8,
        cmd: &CommandDescriptor,
    ) -> Result<(), TransportError> {
        let frame = encode_request(cmd);
        log_frame_hex(&format!("TX {} @0x{address:02X}", cmd.name), &frame);

        let status = self.port.transmit(address, &frame, true).await;
        sleep(self.timing.settle_delay).await;

        if let Err(err) = TransportError::check(status) {
            self.report_error(&err);
            return Err(err);
        }
        Ok(())
    }

    /// Read the block answering the last sent sub-command into `response`.
    ///
    /// Returns the number of bytes the bus had available after the length
    /// byte. The raw bytes are reported before the first `declared_len`
    /// bytes of `response` are reversed into big-endian order.
    pub async fn read(
        &mut self,
        address: u8,
        cmd: &CommandDescriptor,
        response: &mut RawResponse,
    ) -> Result<usize, MbaError> {
        response.reset(0, 0);
        let capacity = response.capacity();
        let bus_limit = self.port.buffer_size();
        if capacity > bus_limit {
            let line = format!("Warning: bufferSize exceeds Wire buffer max ({bus_limit} bytes).");
            warn!("{line}");
            self.sink.emit(&line);
        }

        // Phase 1: address the block-access register, keep the bus for the read.
        let status = self
            .port
            .transmit(address, &[MANUFACTURER_BLOCK_ACCESS_COMMAND], false)
            .await;
        if let Err(err) = TransportError::check(status) {
            self.report_error(&err);
            return Err(err.into());
        }

        // Phase 2: block read.
        self.port.request_from(address, capacity).await;

        let available = self.port.available();
        if available < MIN_RESPONSE_BYTES {
            self.sink.emit("No data available to read");
            error!("{} answered with {available} bytes", cmd.name);
            return Err(MbaError::ShortResponse { available });
        }
        let declared_len = match self.port.read_byte() {
            Some(len) => len as usize,
            None => return Err(MbaError::ShortResponse { available: 0 }),
        };

        // Only `capacity` bytes were requested; waiting past them cannot succeed.
        let ceiling = capacity.min(bus_limit).saturating_sub(1);
        let deadline = Instant::now() + self.timing.read_timeout;
        loop {
            let available = self.port.available();
            if available >= declared_len || available >= ceiling {
                break;
            }
            if Instant::now() >= deadline {
                let err = MbaError::ReadTimeout { available };
                self.report_error(&err);
                return Err(err);
            }
            sleep(self.timing.poll_interval).await;
        }

        if declared_len > capacity {
            let line = format!(
                "Warning: Block length ({declared_len} bytes) exceeds buffer limit ({capacity} bytes). Truncation may occur."
            );
            warn!("{line}");
            self.sink.emit(&line);
        } else {
            self.sink
                .emit(&format!("Response length: {declared_len} bytes"));
        }

        let available = self.port.available();
        response.reset(declared_len, available);
        for _ in 0..available {
            match self.port.read_byte() {
                Some(byte) => {
                    response.push(byte);
                }
                None => break,
            }
        }
        debug!(
            "{}: declared {declared_len}, available {available}, kept {}, echoed {:?}",
            cmd.name,
            response.len(),
            response.echoed_sub_command()
        );

        let shown = available.min(declared_len).min(response.len());
        for line in render_buffer(&response.as_slice()[..shown], cmd.format) {
            self.sink.emit(&line);
        }

        reverse_prefix(response.as_mut_slice(), declared_len);
        Ok(available)
    }

    /// Look up `name` and run it. See [`Self::run_descriptor`].
    pub async fn run(&mut self, address: u8, name: &str) -> Result<(), MbaError> {
        let Some(cmd) = self.registry.lookup(name) else {
            warn!("Unknown MBA command {name:?}");
            self.sink.emit(&format!("Command not found: {name}"));
            self.sink.emit("");
            return Err(MbaError::UnknownCommand(name.to_string()));
        };
        self.run_descriptor(address, cmd).await
    }

    /// Send `cmd`, read and report its answer when it has one, then pace the
    /// bus. No retries: the first failure ends the command.
    pub async fn run_descriptor(
        &mut self,
        address: u8,
        cmd: &CommandDescriptor,
    ) -> Result<(), MbaError> {
        let steps = self.run_steps(address, cmd);
        #[cfg(feature = "tracing")]
        let steps = {
            use tracing::Instrument;
            steps.instrument(crate::logging::span_command(cmd.name, address))
        };
        steps.await
    }

    async fn run_steps(&mut self, address: u8, cmd: &CommandDescriptor) -> Result<(), MbaError> {
        self.sink
            .emit(&format!("Starting command {}", describe_command(cmd)));

        if let Err(err) = self.send(address, cmd).await {
            self.sink.emit("Failed to send command.");
            self.sink.emit("");
            return Err(err.into());
        }

        if cmd.is_readable() {
            let mut response = RawResponse::with_capacity(self.port.buffer_size());
            if let Err(err) = self.read(address, cmd, &mut response).await {
                self.sink.emit("Failed to read command response");
                self.sink.emit("");
                return Err(err);
            }
            if !cmd.bit_fields.is_empty() {
                for line in render_bitfields(response.as_slice(), cmd.total_bits(), cmd.bit_fields) {
                    self.sink.emit(&line);
                }
            }
        }

        self.sink.emit("");
        sleep(self.timing.post_command_delay).await;
        Ok(())
    }
}
