use serde::Serialize;

/// Number of sub-element lookups attempted per result container.
pub const FIELD_SLOTS: usize = 7;

/// One scraped entry. Slots are positional: the markup gives no stable
/// way to tell the sub-elements apart, so no semantic names are assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResultItem {
    pub fields: [Option<String>; FIELD_SLOTS],
}

impl SearchResultItem {
    pub fn empty() -> Self {
        SearchResultItem { fields: Default::default() }
    }

    /// Count of slots that matched something.
    pub fn populated(&self) -> usize {
        self.fields.iter().filter(|f| f.is_some()).count()
    }

    pub fn is_blank(&self) -> bool {
        self.populated() == 0
    }
}

/// Ordered items scraped from one fetched page, in document order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
pub struct SearchResultPage {
    pub items: Vec<SearchResultItem>,
}

impl SearchResultPage {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

// Plan envelope types
#[derive(Serialize)]
pub struct SearchPlan {
    pub url: String,
    pub container_selector: String,
    pub sub_selector: String,
    pub limit: usize,
}

// Apply/result envelope types
#[derive(Serialize)]
pub struct SearchApply {
    pub url: String,
    pub total: usize,
    pub truncated: bool,
    pub items: Vec<SearchResultItem>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn populated_counts_present_slots() {
        let mut item = SearchResultItem::empty();
        assert!(item.is_blank());
        item.fields[0] = Some("a".into());
        item.fields[6] = Some("b".into());
        assert_eq!(item.populated(), 2);
        assert!(!item.is_blank());
    }

    #[test]
    fn item_serializes_absent_slots_as_null() {
        let mut item = SearchResultItem::empty();
        item.fields[1] = Some("hello".into());
        let s = serde_json::to_string(&item).unwrap();
        assert_eq!(s, r#"{"fields":[null,"hello",null,null,null,null,null]}"#);
    }
}
