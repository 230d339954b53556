use std::marker::PhantomData;

use anyhow::Result;
use serde::Serialize;
use tracing::{info, warn, Span};

use super::config;
use crate::output::config::OutputConfig;
use crate::output::types::Envelope;
use crate::output::Emitter;

pub trait PhaseSpan {
    fn name(&self) -> &'static str;
    fn span(&self) -> Span;
}

pub trait OpMarker {
    const NAME: &'static str;
    type Phase: PhaseSpan;
    fn root_span() -> Span;
}

/// Type-state log context: one marker type per op keeps span names and
/// the `op` field consistent across every log line of that command.
pub struct LogCtx<O: OpMarker> {
    json: bool,
    _marker: PhantomData<O>,
}

impl<O: OpMarker> LogCtx<O> {
    pub(crate) fn new() -> Self {
        LogCtx { json: config::logs_are_json(), _marker: PhantomData }
    }

    fn op_name(&self) -> &'static str {
        O::NAME
    }

    pub fn root_span(&self) -> Span {
        O::root_span()
    }

    pub fn root_span_kv<'a, T>(&self, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let span = self.root_span();
        let details = kv_to_string(fields);
        if details.is_empty() {
            info!(op = %self.op_name(), "start");
        } else {
            info!(op = %self.op_name(), details = %details, "start");
        }
        span
    }

    pub fn span(&self, ph: &O::Phase) -> Span {
        ph.span()
    }

    pub fn span_kv<'a, T>(&self, ph: &O::Phase, fields: T) -> Span
    where
        T: IntoIterator<Item = (&'a str, String)>,
    {
        let span = self.span(ph);
        let details = kv_to_string(fields);
        if !details.is_empty() {
            info!(op = %self.op_name(), phase = ph.name(), details = %details, "span_start");
        }
        span
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        if self.json { info!(op = %self.op_name(), "{}", msg.as_ref()); } else { info!("{}", msg.as_ref()); }
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        if self.json { warn!(op = %self.op_name(), "{}", msg.as_ref()); } else { warn!("{}", msg.as_ref()); }
    }

    pub fn plan<T: Serialize>(&self, plan: &T) -> Result<()> {
        emit(Envelope::plan(O::NAME, plan, None)?)
    }

    pub fn result<T: Serialize>(&self, result: &T) -> Result<()> {
        emit(Envelope::result(O::NAME, result, None)?)
    }
}

// Search-specific helpers remain available on the typed context
impl LogCtx<super::ops::search::Search> {
    pub fn page_summary(&self, total: usize, reported: usize, blank: usize) {
        if self.json {
            info!(op = %self.op_name(), total, reported, blank, "page_summary");
        } else {
            info!("📊 Page — containers={} reported={} blank={}", total, reported, blank);
        }
    }
}

fn emit(env: Envelope) -> Result<()> {
    let emitter = Emitter::from_env(OutputConfig::from_env());
    emitter.emit(&env).map_err(anyhow::Error::from)
}

fn kv_to_string<'a, T>(kv: T) -> String
where
    T: IntoIterator<Item = (&'a str, String)>,
{
    let mut parts: Vec<String> = Vec::new();
    for (k, v) in kv {
        parts.push(format!("{}={}", k, v));
    }
    parts.join(" ")
}
