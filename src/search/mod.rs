use std::env;

use anyhow::Result;
use clap::Args;

use crate::telemetry::{self};
use crate::telemetry::ops::search::Phase as SearchPhase;
use crate::util::time::parse_date_opt;

pub mod extractor;
mod fetch;
mod query;
pub mod types;

use types::{SearchApply, SearchPlan};

#[derive(Args)]
pub struct SearchCmd {
    /// Keyword to search for
    pub keyword: String,
    /// Lower date bound: YYYY-MM-DD or relative like "7d"
    #[arg(long)] pub since: Option<String>,
    /// Upper date bound: YYYY-MM-DD or relative like "2d"
    #[arg(long)] pub until: Option<String>,
    /// Search endpoint; falls back to SCOUT_BASE_URL, then the built-in default
    #[arg(long)] pub base_url: Option<String>,
    /// Override the result-block selector
    #[arg(long)] pub container_selector: Option<String>,
    /// Override the sub-element selector (applied to every slot)
    #[arg(long)] pub sub_selector: Option<String>,
    /// Cap on reported items; 0 means all
    #[arg(long, default_value_t = 0)] pub limit: usize,
    #[arg(long, default_value_t = false)] pub apply: bool,
}

pub async fn run(args: SearchCmd) -> Result<()> {
    let log = telemetry::search();
    let _g = log.root_span_kv([
        ("apply", args.apply.to_string()),
        ("keyword", args.keyword.clone()),
        ("since", format!("{:?}", args.since)),
        ("until", format!("{:?}", args.until)),
        ("limit", args.limit.to_string()),
    ]).entered();

    // validate selectors before any I/O; a typo should fail here
    let selectors = extractor::Selectors::with_overrides(
        args.container_selector.as_deref(),
        args.sub_selector.as_deref(),
    )?;

    let since = parse_date_opt(&args.since)?;
    let until = parse_date_opt(&args.until)?;
    let base = args
        .base_url
        .or_else(|| env::var("SCOUT_BASE_URL").ok())
        .unwrap_or_else(|| query::DEFAULT_BASE_URL.to_string());

    let url = {
        let _s = log.span(&SearchPhase::BuildUrl).entered();
        query::build_search_url(&base, &args.keyword, since, until)?
    };

    let container_rule = args
        .container_selector
        .unwrap_or_else(|| extractor::DEFAULT_CONTAINER_SELECTOR.to_string());
    let sub_rule = args
        .sub_selector
        .unwrap_or_else(|| extractor::DEFAULT_SUB_SELECTOR.to_string());

    if !args.apply {
        log.info(format!("📝 Search plan — url={}", url));
        log.info(format!("   container={} sub={} limit={}", container_rule, sub_rule, args.limit));
        log.info("   Use --apply to execute.");
        if telemetry::config::json_mode() {
            let plan = SearchPlan {
                url: url.to_string(),
                container_selector: container_rule,
                sub_selector: sub_rule,
                limit: args.limit,
            };
            log.plan(&plan)?;
        }
        return Ok(());
    }

    let client = fetch::build_client()?;

    let html = {
        let _s = log.span_kv(&SearchPhase::FetchPage, [("url", url.to_string())]).entered();
        fetch::fetch_page(&client, url.as_str()).await?
    };

    let page = {
        let _s = log.span_kv(&SearchPhase::Extract, [("bytes", html.len().to_string())]).entered();
        extractor::extract(&selectors, &html)
    };

    let total = page.len();
    let truncated = args.limit > 0 && total > args.limit;
    let mut items = page.items;
    if args.limit > 0 {
        items.truncate(args.limit);
    }

    let blank = items.iter().filter(|i| i.is_blank()).count();
    for (idx, item) in items.iter().enumerate() {
        log.info(format!(
            "🔎 [{}] populated={} first={:?}",
            idx,
            item.populated(),
            item.fields[0]
        ));
    }
    log.page_summary(total, items.len(), blank);

    if total == 0 {
        log.warn("⚠️ No result containers matched; the container selector may be stale");
    } else if blank == items.len() {
        log.warn("⚠️ Containers matched but no sub-elements did; the sub selector may be stale");
    }

    if telemetry::config::json_mode() {
        let result = SearchApply { url: url.to_string(), total, truncated, items };
        log.result(&result)?;
    }
    Ok(())
}
