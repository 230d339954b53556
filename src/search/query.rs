use anyhow::{bail, Result};
use chrono::NaiveDate;
use url::Url;

/// Search endpoint used when neither --base-url nor SCOUT_BASE_URL is set.
pub const DEFAULT_BASE_URL: &str = "https://x.com/search";

/// Build the single results-page URL for a keyword query. Optional date
/// bounds are encoded as `since:`/`until:` operators inside the `q`
/// parameter, the form the target site's search box produces itself.
pub fn build_search_url(
    base: &str,
    keyword: &str,
    since: Option<NaiveDate>,
    until: Option<NaiveDate>,
) -> Result<Url> {
    let keyword = keyword.trim();
    if keyword.is_empty() {
        bail!("Keyword must not be empty");
    }

    let mut q = keyword.to_string();
    if let Some(d) = since {
        q.push_str(&format!(" since:{}", d.format("%Y-%m-%d")));
    }
    if let Some(d) = until {
        q.push_str(&format!(" until:{}", d.format("%Y-%m-%d")));
    }

    let mut url = Url::parse(base)?;
    url.query_pairs_mut().clear().append_pair("q", &q);
    Ok(url)
}
