//! Console output for command reports.
//!
//! The engine writes human-readable report lines (banners, dumps, bit
//! fields, failure lines) to a `ReportSink`. Where they end up is the
//! caller's business: stdout for the CLI, a `Vec<String>` in tests.

/// Destination for report lines
pub trait ReportSink {
    fn emit(&mut self, line: &str);
}

/// Prints every line to stdout
#[derive(Debug, Default, Clone, Copy)]
pub struct StdoutSink;

impl ReportSink for StdoutSink {
    fn emit(&mut self, line: &str) {
        println!("{line}");
    }
}

/// Collects lines in memory
impl ReportSink for Vec<String> {
    fn emit(&mut self, line: &str) {
        self.push(line.to_string());
    }
}

/// Discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl ReportSink for NullSink {
    fn emit(&mut self, _line: &str) {}
}

impl<S: ReportSink + ?Sized> ReportSink for &mut S {
    fn emit(&mut self, line: &str) {
        (**self).emit(line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn emit_twice<S: ReportSink>(mut sink: S) {
        sink.emit("one");
        sink.emit("two");
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut lines: Vec<String> = Vec::new();
        emit_twice(&mut lines);
        assert_eq!(lines, vec!["one".to_string(), "two".to_string()]);
    }

    #[test]
    fn test_null_sink() {
        emit_twice(NullSink);
    }
}
