use anyhow::{anyhow, Result};
use scraper::{ElementRef, Html, Selector};

use super::types::{SearchResultItem, SearchResultPage, FIELD_SLOTS};

/// One result block on the page. Style classes lifted from the live
/// markup; they churn without notice, hence the CLI overrides.
pub const DEFAULT_CONTAINER_SELECTOR: &str = "article.css-175oi2r[data-testid=tweet]";

/// Sub-element rule applied within a container. Every slot currently
/// shares this rule: the markup never told the seven lookups apart.
pub const DEFAULT_SUB_SELECTOR: &str = "div.css-146c3p1.r-bcqeeo.r-qvutc0";

/// Per-slot rule table. Distinct per-field rules would land here.
pub const SUB_SELECTOR_SLOTS: [&str; FIELD_SLOTS] = [DEFAULT_SUB_SELECTOR; FIELD_SLOTS];

/// Selector set parsed and validated up front, so a typo in a rule is a
/// startup error instead of a silent zero-match at scrape time.
pub struct Selectors {
    container: Selector,
    slots: Vec<Selector>, // invariant: len == FIELD_SLOTS
}

impl Selectors {
    pub fn from_rules(container: &str, slots: [&str; FIELD_SLOTS]) -> Result<Self> {
        let container = parse_rule(container)?;
        let slots = slots.iter().map(|r| parse_rule(r)).collect::<Result<Vec<_>>>()?;
        Ok(Selectors { container, slots })
    }

    /// Built-in rules, with optional CLI overrides. A sub override
    /// replaces every slot, matching the fixed-rule extraction scheme.
    pub fn with_overrides(container: Option<&str>, sub: Option<&str>) -> Result<Self> {
        let container = container.unwrap_or(DEFAULT_CONTAINER_SELECTOR);
        match sub {
            Some(rule) => Selectors::from_rules(container, [rule; FIELD_SLOTS]),
            None => Selectors::from_rules(container, SUB_SELECTOR_SLOTS),
        }
    }
}

fn parse_rule(rule: &str) -> Result<Selector> {
    Selector::parse(rule).map_err(|e| anyhow!("Invalid CSS selector {:?}: {}", rule, e))
}

/// Single pass over the document: every container matched by the
/// container rule becomes one item, in document order. A slot whose rule
/// matches nothing stays None; that is a normal state, not an error.
pub fn extract(selectors: &Selectors, html: &str) -> SearchResultPage {
    let doc = Html::parse_document(html);

    let mut items = Vec::new();
    for container in doc.select(&selectors.container) {
        let mut item = SearchResultItem::empty();
        for (slot, sel) in selectors.slots.iter().enumerate() {
            item.fields[slot] = field_text(&container, sel);
        }
        items.push(item);
    }
    SearchResultPage { items }
}

fn field_text(container: &ElementRef<'_>, sel: &Selector) -> Option<String> {
    let node = container.select(sel).next()?;
    let text = node.text().collect::<String>();
    let s = collapse_whitespace(&text);
    if s.is_empty() { None } else { Some(s) }
}

fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sel() -> Selectors {
        Selectors::from_rules("div.result", ["span.txt"; FIELD_SLOTS]).unwrap()
    }

    #[test]
    fn zero_containers_yield_empty_page() {
        let html = r#"<html><body><p>nothing to see</p></body></html>"#;
        let page = extract(&sel(), html);
        assert!(page.is_empty());
    }

    #[test]
    fn one_item_per_container_in_document_order() {
        let html = r#"
        <html><body>
          <div class="result"><span class="txt">first</span></div>
          <div class="result"><span class="txt">second</span></div>
          <div class="result"><span class="txt">third</span></div>
        </body></html>
        "#;
        let page = extract(&sel(), html);
        assert_eq!(page.len(), 3);
        let firsts: Vec<_> = page.items.iter().map(|i| i.fields[0].as_deref()).collect();
        assert_eq!(firsts, vec![Some("first"), Some("second"), Some("third")]);
    }

    #[test]
    fn shared_rule_fills_every_slot_with_same_match() {
        let html = r#"
        <html><body>
          <div class="result"><span class="txt">payload</span></div>
        </body></html>
        "#;
        let page = extract(&sel(), html);
        assert_eq!(page.len(), 1);
        let item = &page.items[0];
        assert_eq!(item.populated(), FIELD_SLOTS);
        for f in &item.fields {
            assert_eq!(f.as_deref(), Some("payload"));
        }
    }

    #[test]
    fn missing_sub_elements_leave_slots_none() {
        let html = r#"
        <html><body>
          <div class="result"><em>no span here</em></div>
        </body></html>
        "#;
        let page = extract(&sel(), html);
        assert_eq!(page.len(), 1);
        assert!(page.items[0].is_blank());
    }

    #[test]
    fn blank_container_does_not_affect_neighbours() {
        let html = r#"
        <html><body>
          <div class="result"><span class="txt">kept</span></div>
          <div class="result"></div>
          <div class="result"><span class="txt">also kept</span></div>
        </body></html>
        "#;
        let page = extract(&sel(), html);
        assert_eq!(page.len(), 3);
        assert_eq!(page.items[0].fields[0].as_deref(), Some("kept"));
        assert!(page.items[1].is_blank());
        assert_eq!(page.items[2].fields[0].as_deref(), Some("also kept"));
    }

    #[test]
    fn whitespace_is_collapsed() {
        let html = "<div class=\"result\"><span class=\"txt\">  spread\n  over \t lines  </span></div>";
        let page = extract(&sel(), html);
        assert_eq!(page.items[0].fields[0].as_deref(), Some("spread over lines"));
    }

    #[test]
    fn whitespace_only_text_is_none() {
        let html = r#"<div class="result"><span class="txt">   </span></div>"#;
        let page = extract(&sel(), html);
        assert_eq!(page.len(), 1);
        assert!(page.items[0].fields[0].is_none());
    }

    #[test]
    fn extract_is_idempotent() {
        let html = r#"
        <html><body>
          <div class="result"><span class="txt">stable</span></div>
          <div class="result"></div>
        </body></html>
        "#;
        let s = sel();
        assert_eq!(extract(&s, html), extract(&s, html));
    }

    #[test]
    fn slots_with_distinct_rules_match_independently() {
        let selectors = Selectors::from_rules(
            "div.result",
            ["span.a", "span.b", "span.a", "span.a", "span.a", "span.a", "span.missing"],
        )
        .unwrap();
        let html = r#"
        <div class="result">
          <span class="a">alpha</span>
          <span class="b">beta</span>
        </div>
        "#;
        let page = extract(&selectors, html);
        let item = &page.items[0];
        assert_eq!(item.fields[0].as_deref(), Some("alpha"));
        assert_eq!(item.fields[1].as_deref(), Some("beta"));
        assert!(item.fields[6].is_none());
    }

    #[test]
    fn default_rules_match_live_style_markup() {
        let html = r#"
        <html><body>
          <article class="css-175oi2r" data-testid="tweet">
            <div class="css-146c3p1 r-bcqeeo r-qvutc0">status text</div>
          </article>
        </body></html>
        "#;
        let selectors = Selectors::with_overrides(None, None).unwrap();
        let page = extract(&selectors, html);
        assert_eq!(page.len(), 1);
        assert_eq!(page.items[0].fields[0].as_deref(), Some("status text"));
    }

    #[test]
    fn malformed_rule_is_rejected_up_front() {
        assert!(Selectors::with_overrides(Some("div[["), None).is_err());
        assert!(Selectors::with_overrides(None, Some("span..")).is_err());
    }
}
