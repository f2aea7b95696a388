use log::{info, log_enabled, Level};

/// Initializes the logger with the `env_logger` crate.
///
/// Verbosity follows `RUST_LOG`; the command report itself goes to a
/// `ReportSink`, not to the log.
pub fn init_logger() {
    env_logger::init();
}

/// Logs an informational message.
pub fn log_info(message: &str) {
    if log_enabled!(Level::Info) {
        info!("{message}");
    }
}

/// Log frame data in hex format for debugging
///
/// SMBus blocks are short, but long dumps are still capped to keep the
/// log readable.
pub fn log_frame_hex(prefix: &str, data: &[u8]) {
    const MAX_LOG_BYTES: usize = 64;

    let display_data = &data[..data.len().min(MAX_LOG_BYTES)];
    let hex_str = crate::util::hex::format_hex_compact(display_data);
    let suffix = if data.len() > MAX_LOG_BYTES {
        format!(" ... ({} bytes total)", data.len())
    } else {
        String::new()
    };

    log::debug!(target: "bqmba::frame", "{prefix}: {hex_str}{suffix}");
}

/// Create a tracing span covering one command run
#[cfg(feature = "tracing")]
pub fn span_command(name: &str, address: u8) -> tracing::Span {
    tracing::info_span!("mba_command", name = name, address = address)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_helpers_without_logger() {
        // No logger installed: every helper must be a silent no-op.
        log_info("info");
        log_frame_hex("tx", &[0x44, 0x02, 0x01, 0x00]);
        log_frame_hex("rx", &[0u8; 100]);
    }
}
