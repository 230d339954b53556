use tracing::info_span;
use tracing::Span;

use crate::telemetry::ctx::{OpMarker, PhaseSpan};

#[derive(Copy, Clone, Debug)]
pub struct Search;

#[derive(Copy, Clone, Debug)]
pub enum Phase { BuildUrl, FetchPage, Extract }

impl PhaseSpan for Phase {
    fn name(&self) -> &'static str { match self {
        Phase::BuildUrl => "build_url",
        Phase::FetchPage => "fetch_page",
        Phase::Extract => "extract",
    }}
    fn span(&self) -> Span { match self {
        Phase::BuildUrl => info_span!("build_url"),
        Phase::FetchPage => info_span!("fetch_page"),
        Phase::Extract => info_span!("extract"),
    }}
}

impl OpMarker for Search {
    const NAME: &'static str = "search";
    type Phase = Phase;
    fn root_span() -> Span { info_span!("search") }
}
