// Result Sink - Filter, deduplicate and write harvested domains
//
// Called concurrently by every worker. Each domain is written as one complete
// line under the writer lock; ordering across hosts is whatever order the
// workers finish in.

use crate::certificates::CertificateResult;
use crate::output::dedup::DedupSet;
use crate::scanner::config::{FilterMode, PipelineConfig};
use crate::scanner::stats::StatsTracker;
use std::io::{self, Write};
use std::sync::Mutex;
use tracing::debug;

/// Destination of harvested domains
pub struct ResultSink {
    filter: FilterMode,
    dedup: Option<DedupSet>,
    writer: Mutex<Box<dyn Write + Send>>,
    stats: StatsTracker,
}

impl ResultSink {
    /// Create a sink writing to `writer`
    pub fn new<W>(config: &PipelineConfig, writer: W, stats: StatsTracker) -> Self
    where
        W: Write + Send + 'static,
    {
        Self {
            filter: config.filter,
            dedup: config.dedup.then(DedupSet::new),
            writer: Mutex::new(Box::new(writer)),
            stats,
        }
    }

    /// Create a sink writing to standard output
    pub fn stdout(config: &PipelineConfig, stats: StatsTracker) -> Self {
        Self::new(config, io::stdout(), stats)
    }

    /// Names of `result` selected by `filter`: plain names first, then wildcards
    pub fn select(filter: FilterMode, result: &CertificateResult) -> impl Iterator<Item = &str> {
        let plain: &[String] = if filter.includes_plain() {
            result.domains()
        } else {
            &[]
        };
        let wild: &[String] = if filter.includes_wildcards() {
            result.wildcards()
        } else {
            &[]
        };

        plain.iter().chain(wild.iter()).map(String::as_str)
    }

    /// Emit the selected names of one result
    pub fn emit(&self, result: &CertificateResult) {
        for domain in Self::select(self.filter, result) {
            if let Some(dedup) = &self.dedup {
                if !dedup.insert_if_absent(domain) {
                    self.stats.increment_duplicates();
                    continue;
                }
            }
            self.write_line(domain);
        }
    }

    /// Flush the underlying writer
    pub fn flush(&self) {
        if let Ok(mut writer) = self.writer.lock() {
            if let Err(e) = writer.flush() {
                debug!("Failed to flush output: {}", e);
            }
        }
    }

    /// Distinct domains seen so far, when deduplication is on
    pub fn unique_count(&self) -> Option<usize> {
        self.dedup.as_ref().map(DedupSet::len)
    }

    fn write_line(&self, domain: &str) {
        let line = format!("{}\n", domain);
        let mut writer = match self.writer.lock() {
            Ok(writer) => writer,
            Err(poisoned) => poisoned.into_inner(),
        };

        match writer.write_all(line.as_bytes()) {
            Ok(()) => self.stats.increment_emitted(),
            Err(e) => debug!("Failed to write {}: {}", domain, e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    impl SharedBuffer {
        fn lines(&self) -> Vec<String> {
            String::from_utf8(self.0.lock().unwrap().clone())
                .unwrap()
                .lines()
                .map(str::to_string)
                .collect()
        }
    }

    fn make_sink(filter: FilterMode, dedup: bool) -> (ResultSink, SharedBuffer, StatsTracker) {
        let config = PipelineConfig {
            filter,
            dedup,
            ..PipelineConfig::default()
        };
        let buffer = SharedBuffer::default();
        let stats = StatsTracker::new();
        (ResultSink::new(&config, buffer.clone(), stats.clone()), buffer, stats)
    }

    fn result() -> CertificateResult {
        CertificateResult::from_names("h", ["a.com", "*.a.com", "b.com", "*.b.com"])
    }

    #[test]
    fn test_wildcards_only() {
        let (sink, out, _) = make_sink(FilterMode::WildcardsOnly, false);
        sink.emit(&result());
        assert_eq!(out.lines(), vec!["*.a.com", "*.b.com"]);
    }

    #[test]
    fn test_non_wildcards_only() {
        let (sink, out, _) = make_sink(FilterMode::NonWildcardsOnly, false);
        sink.emit(&result());
        assert_eq!(out.lines(), vec!["a.com", "b.com"]);
    }

    #[test]
    fn test_all_and_silent_emit_plain_then_wildcards() {
        for mode in [FilterMode::All, FilterMode::Silent] {
            let (sink, out, _) = make_sink(mode, false);
            sink.emit(&result());
            assert_eq!(out.lines(), vec!["a.com", "b.com", "*.a.com", "*.b.com"]);
        }
    }

    #[test]
    fn test_duplicates_kept_without_dedup() {
        let (sink, out, _) = make_sink(FilterMode::WildcardsOnly, false);
        let shared = CertificateResult::from_names("h1", ["*.shared.com"]);
        sink.emit(&shared);
        sink.emit(&shared);

        assert_eq!(out.lines(), vec!["*.shared.com", "*.shared.com"]);
        assert_eq!(sink.unique_count(), None);
    }

    #[test]
    fn test_dedup_emits_once() {
        let (sink, out, stats) = make_sink(FilterMode::WildcardsOnly, true);
        sink.emit(&CertificateResult::from_names("h1", ["*.shared.com"]));
        sink.emit(&CertificateResult::from_names("h2", ["*.shared.com"]));

        assert_eq!(out.lines(), vec!["*.shared.com"]);
        assert_eq!(stats.snapshot().domains_emitted, 1);
        assert_eq!(stats.snapshot().duplicates_suppressed, 1);
        assert_eq!(sink.unique_count(), Some(1));
    }

    #[test]
    fn test_dedup_within_one_result() {
        let (sink, out, _) = make_sink(FilterMode::All, true);
        sink.emit(&CertificateResult::from_names("h", ["a.com", "A.com", "*.a.com"]));

        assert_eq!(out.lines(), vec!["a.com", "*.a.com"]);
    }

    #[test]
    fn test_concurrent_dedup_stress() {
        let (sink, out, _) = make_sink(FilterMode::All, true);
        let sink = Arc::new(sink);
        let mut handles = Vec::new();

        for worker in 0..32 {
            let sink = Arc::clone(&sink);
            handles.push(std::thread::spawn(move || {
                for _ in 0..20 {
                    let result = CertificateResult::from_names(
                        format!("host{}", worker),
                        ["shared.com", "*.shared.com", "www.shared.com"],
                    );
                    sink.emit(&result);
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let mut lines = out.lines();
        lines.sort();
        assert_eq!(lines, vec!["*.shared.com", "shared.com", "www.shared.com"]);
    }

    #[test]
    fn test_lines_are_never_torn() {
        let (sink, out, _) = make_sink(FilterMode::All, false);
        let sink = Arc::new(sink);
        let mut handles = Vec::new();

        for worker in 0..8 {
            let sink = Arc::clone(&sink);
            handles.push(std::thread::spawn(move || {
                let name = format!("worker{}.{}.example.com", worker, "x".repeat(200));
                for _ in 0..50 {
                    sink.emit(&CertificateResult::from_names("h", [name.as_str()]));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        let lines = out.lines();
        assert_eq!(lines.len(), 400);
        assert!(lines.iter().all(|l| l.starts_with("worker") && l.ends_with(".example.com")));
    }
}
