use tracing::info_span;
use tracing::Span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Inspect;

#[derive(Copy, Clone, Debug)]
pub enum Phase { ReadFile, Extract }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::ReadFile => "read_file",
        Phase::Extract => "extract",
    }}
    fn span(&self) -> Span { match self {
        Phase::ReadFile => info_span!("read_file"),
        Phase::Extract => info_span!("extract"),
    }}
}

impl OpMarker for Inspect {
    const NAME: &'static str = "inspect";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("inspect") }
}
