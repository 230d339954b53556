use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use crate::search::extractor::{self, Selectors};
use crate::search::types::SearchResultItem;
use crate::telemetry::{self};
use crate::telemetry::ops::inspect::Phase as InspectPhase;

/// Run the extraction pass over a results page saved on disk.
#[derive(Args, Debug)]
pub struct InspectCmd {
    /// Path to a saved HTML page
    pub file: PathBuf,
    /// Override the result-block selector
    #[arg(long)] pub container_selector: Option<String>,
    /// Override the sub-element selector (applied to every slot)
    #[arg(long)] pub sub_selector: Option<String>,
    /// Cap on reported items; 0 means all
    #[arg(long, default_value_t = 0)] pub limit: usize,
}

#[derive(Serialize)]
struct InspectApply {
    file: String,
    total: usize,
    truncated: bool,
    items: Vec<SearchResultItem>,
}

pub fn run(args: InspectCmd) -> Result<()> {
    let log = telemetry::inspect();
    let _g = log.root_span_kv([
        ("file", args.file.display().to_string()),
        ("limit", args.limit.to_string()),
    ]).entered();

    let selectors = Selectors::with_overrides(
        args.container_selector.as_deref(),
        args.sub_selector.as_deref(),
    )?;

    let html = {
        let _s = log.span(&InspectPhase::ReadFile).entered();
        fs::read_to_string(&args.file)
            .with_context(|| format!("Failed to read {}", args.file.display()))?
    };

    let page = {
        let _s = log.span_kv(&InspectPhase::Extract, [("bytes", html.len().to_string())]).entered();
        extractor::extract(&selectors, &html)
    };

    let total = page.len();
    let truncated = args.limit > 0 && total > args.limit;
    let mut items = page.items;
    if args.limit > 0 {
        items.truncate(args.limit);
    }

    log.info(format!("📄 {} — containers={}", args.file.display(), total));
    for (idx, item) in items.iter().enumerate() {
        log.info(format!(
            "🔎 [{}] populated={} first={:?}",
            idx,
            item.populated(),
            item.fields[0]
        ));
    }

    if telemetry::config::json_mode() {
        let result = InspectApply {
            file: args.file.display().to_string(),
            total,
            truncated,
            items,
        };
        log.result(&result)?;
    }
    Ok(())
}
