//! The compression pass: count, plan, rewrite, emit, report.

use hydrate_core::{CompressConfig, Result, ScriptFragment, ScriptSink, Value};
use serde_json::Value as Json;

use crate::decoder::{self, DECODER_SOURCE};
use crate::planner::{self, SymbolTable};
use crate::reporter::{self, CompressionReport, PassObserver, TracingReporter};
use crate::rewriter;
use crate::walker;

/// A named hydration payload.
pub type Payload = (String, Value);

/// Everything one pass produced, before it is pushed anywhere.
#[derive(Debug, Clone)]
pub struct CompressedProps {
    pub decoder: ScriptFragment,
    pub payloads: Vec<ScriptFragment>,
    pub table: SymbolTable,
    /// Rewritten values, in payload order.
    pub rewritten: Vec<(String, Json)>,
    pub report: CompressionReport,
}

impl CompressedProps {
    /// Push the decoder onto `pre_hydrate` and the payload scripts onto `hydrate`.
    pub fn emit(self, pre_hydrate: &mut dyn ScriptSink, hydrate: &mut dyn ScriptSink) -> CompressionReport {
        pre_hydrate.push(self.decoder);
        for fragment in self.payloads {
            hydrate.push(fragment);
        }
        self.report
    }
}

/// Compresses one page's payload set per call. Holds no state between passes.
pub struct PropsCompressor {
    config: CompressConfig,
    observer: Box<dyn PassObserver>,
}

impl PropsCompressor {
    pub fn new(config: CompressConfig) -> Self {
        Self { config, observer: Box::new(TracingReporter) }
    }

    pub fn with_observer(mut self, observer: impl PassObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn config(&self) -> &CompressConfig {
        &self.config
    }

    /// Run a pass and push its fragments. On error nothing is pushed.
    pub fn compress(
        &self,
        payloads: &[Payload],
        pre_hydrate: &mut dyn ScriptSink,
        hydrate: &mut dyn ScriptSink,
    ) -> Result<CompressionReport> {
        Ok(self.prepare(payloads)?.emit(pre_hydrate, hydrate))
    }

    /// Run a pass without touching any sink.
    pub fn prepare(&self, payloads: &[Payload]) -> Result<CompressedProps> {
        let _span = tracing::info_span!("prepare_props", payloads = payloads.len()).entered();
        let config = &self.config;

        decoder::validate_config(config)?;
        for (name, _) in payloads {
            decoder::validate_payload_name(name, config)?;
        }

        let occurrences = walker::count_occurrences(payloads.iter().map(|(_, v)| v))?;
        let mut original_len = 0;
        for (_, value) in payloads {
            original_len += decoder::to_script_json(&value.to_json()?, config.script_safe)?.len();
        }

        let (plan, table) = planner::plan(&occurrences, &config.alphabet_chars())?;

        let decoder_script = decoder::decoder_script(&table, config)?;
        let decoder_len = decoder_script.len();
        let decoder = ScriptFragment::new(DECODER_SOURCE, decoder_script, config.priority);

        let mut payload_len = 0;
        let mut fragments = Vec::with_capacity(payloads.len());
        let mut rewritten = Vec::with_capacity(payloads.len());
        for (name, value) in payloads {
            let substituted = rewriter::rewrite(value, &plan)?;
            payload_len += decoder::to_script_json(&substituted, config.script_safe)?.len();
            let script = decoder::payload_script(name, &substituted, config)?;
            fragments.push(ScriptFragment::new(name.clone(), script, config.priority));
            rewritten.push((name.clone(), substituted));
        }

        let report = CompressionReport::new(original_len, decoder_len, payload_len, table.len(), payloads.len());
        reporter::notify(self.observer.as_ref(), &report);

        Ok(CompressedProps { decoder, payloads: fragments, table, rewritten, report })
    }
}

impl Default for PropsCompressor {
    fn default() -> Self {
        Self::new(CompressConfig::default())
    }
}

/// One pass with the default configuration and reporter.
pub fn compress_props(
    payloads: &[Payload],
    pre_hydrate: &mut dyn ScriptSink,
    hydrate: &mut dyn ScriptSink,
) -> Result<CompressionReport> {
    PropsCompressor::default().compress(payloads, pre_hydrate, hydrate)
}
