//! Compression statistics and the observers that receive them.

use serde::Serialize;

/// Sizes in UTF-8 bytes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompressionReport {
    /// Plain JSON of every payload.
    pub original_len: usize,
    /// The shared decoder fragment.
    pub decoder_len: usize,
    /// Rewritten JSON of every payload.
    pub payload_len: usize,
    pub emitted_len: usize,
    pub reduction_ratio: f64,
    pub symbols: usize,
    pub payloads: usize,
}

impl CompressionReport {
    pub fn new(original_len: usize, decoder_len: usize, payload_len: usize, symbols: usize, payloads: usize) -> Self {
        let emitted_len = decoder_len + payload_len;
        let reduction_ratio = if original_len > 0 {
            1.0 - emitted_len as f64 / original_len as f64
        } else {
            0.0
        };
        Self { original_len, decoder_len, payload_len, emitted_len, reduction_ratio, symbols, payloads }
    }

    /// Reduction counting only the payloads, without the one-off decoder.
    pub fn payload_ratio(&self) -> f64 {
        if self.original_len == 0 { return 0.0; }
        1.0 - self.payload_len as f64 / self.original_len as f64
    }
}

/// Receives one report per pass. Errors are logged and otherwise ignored.
pub trait PassObserver: Send + Sync {
    fn observe(&self, report: &CompressionReport) -> anyhow::Result<()>;
}

/// Logs each report as a structured `info` record.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingReporter;

impl PassObserver for TracingReporter {
    fn observe(&self, report: &CompressionReport) -> anyhow::Result<()> {
        tracing::info!(
            original_length = report.original_len,
            emitted_length = report.emitted_len,
            reduction_ratio = report.reduction_ratio,
            symbols = report.symbols,
            "hydration props compressed"
        );
        Ok(())
    }
}

/// Adapts a closure into an observer.
pub struct FnObserver<F>(pub F);

impl<F> PassObserver for FnObserver<F>
where
    F: Fn(&CompressionReport) -> anyhow::Result<()> + Send + Sync,
{
    fn observe(&self, report: &CompressionReport) -> anyhow::Result<()> {
        (self.0)(report)
    }
}

pub fn observer_fn<F>(f: F) -> FnObserver<F>
where
    F: Fn(&CompressionReport) -> anyhow::Result<()> + Send + Sync,
{
    FnObserver(f)
}

pub(crate) fn notify(observer: &dyn PassObserver, report: &CompressionReport) {
    if let Err(e) = observer.observe(report) {
        tracing::warn!(error = %e, "compression observer failed");
    }
}
