//! Substring filter over the cards present when the page loaded.

use std::sync::LazyLock;

use regex::Regex;

/// The browser's `\s` set, spelled out so page-side and in-process
/// filtering agree. Notably includes U+FEFF and excludes U+0085.
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"[\t\n\x0B\x0C\r \u{00A0}\u{1680}\u{2000}-\u{200A}\u{2028}\u{2029}\u{202F}\u{205F}\u{3000}\u{FEFF}]+",
    )
    .expect("whitespace regex")
});

/// Lowercase, fold `ё` into `е`, collapse whitespace runs, trim.
///
/// Only that single letter pair is folded; this is not general
/// transliteration.
pub fn normalize(text: Option<&str>) -> String {
    let lowered = text.unwrap_or("").to_lowercase().replace('ё', "е");
    WHITESPACE_RUN
        .replace_all(&lowered, " ")
        .trim_matches(' ')
        .to_string()
}

/// The searchable parts of one card as read from the page.
#[derive(Debug, Clone)]
pub struct CardFields<H> {
    pub handle: H,
    pub name: Option<String>,
    pub tags: Option<String>,
    pub description: Option<String>,
}

impl<H> CardFields<H> {
    pub fn text(&self) -> String {
        format!(
            "{} {} {}",
            self.name.as_deref().unwrap_or(""),
            self.tags.as_deref().unwrap_or(""),
            self.description.as_deref().unwrap_or("")
        )
    }
}

#[derive(Debug, Clone)]
pub struct CardRecord<H> {
    pub handle: H,
    pub normalized_text: String,
}

impl<H> CardRecord<H> {
    pub fn from_fields(fields: CardFields<H>) -> Self {
        let normalized_text = normalize(Some(&fields.text()));
        Self {
            handle: fields.handle,
            normalized_text,
        }
    }

    pub fn matches(&self, normalized_query: &str) -> bool {
        self.normalized_text.contains(normalized_query)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CardDisplay {
    Flex,
    Hidden,
}

impl CardDisplay {
    pub fn as_css(self) -> &'static str {
        match self {
            CardDisplay::Flex => "flex",
            CardDisplay::Hidden => "none",
        }
    }
}

pub trait CardSource {
    type Handle;

    /// Whether the page has the search input at all.
    fn has_search_input(&self) -> bool;
    fn cards(&self) -> Vec<CardFields<Self::Handle>>;
}

pub trait CardVisibility<H> {
    fn set_display(&mut self, card: &H, display: CardDisplay);
}

pub struct CardSearchFilter<H> {
    index: Vec<CardRecord<H>>,
}

impl<H> CardSearchFilter<H> {
    /// Builds the index once. Returns `None` if the page has no search input.
    pub fn initialize<C>(source: &C) -> Option<Self>
    where
        C: CardSource<Handle = H> + ?Sized,
    {
        if !source.has_search_input() {
            tracing::trace!("no search input on page");
            return None;
        }

        let index: Vec<_> = source
            .cards()
            .into_iter()
            .map(CardRecord::from_fields)
            .collect();
        tracing::debug!(cards = index.len(), "built card index");
        Some(Self { index })
    }

    pub fn records(&self) -> &[CardRecord<H>] {
        &self.index
    }

    /// Handles one input event with the control's current value.
    pub fn on_input<V>(&self, value: &str, sink: &mut V)
    where
        V: CardVisibility<H> + ?Sized,
    {
        let query = normalize(Some(value));
        for record in &self.index {
            let display = if query.is_empty() || record.matches(&query) {
                CardDisplay::Flex
            } else {
                CardDisplay::Hidden
            };
            sink.set_display(&record.handle, display);
        }
    }

    /// Cards that the given query leaves visible.
    pub fn visible<'a>(&'a self, value: &str) -> impl Iterator<Item = &'a H> + use<'a, H> {
        let query = normalize(Some(value));
        self.index
            .iter()
            .filter(move |record| query.is_empty() || record.matches(&query))
            .map(|record| &record.handle)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::*;
    use proptest::prelude::*;

    struct Cards {
        input: bool,
        cards: Vec<CardFields<usize>>,
    }

    impl CardSource for Cards {
        type Handle = usize;

        fn has_search_input(&self) -> bool {
            self.input
        }

        fn cards(&self) -> Vec<CardFields<usize>> {
            self.cards.clone()
        }
    }

    #[derive(Default)]
    struct Shown(BTreeMap<usize, CardDisplay>);

    impl CardVisibility<usize> for Shown {
        fn set_display(&mut self, card: &usize, display: CardDisplay) {
            self.0.insert(*card, display);
        }
    }

    impl Shown {
        fn visible(&self) -> Vec<usize> {
            self.0
                .iter()
                .filter(|(_, d)| **d == CardDisplay::Flex)
                .map(|(h, _)| *h)
                .collect()
        }
    }

    fn card(handle: usize, name: &str, tags: &str, description: &str) -> CardFields<usize> {
        CardFields {
            handle,
            name: Some(name.to_string()),
            tags: Some(tags.to_string()),
            description: Some(description.to_string()),
        }
    }

    fn page(cards: Vec<CardFields<usize>>) -> Cards {
        Cards { input: true, cards }
    }

    #[test]
    fn normalize_folds_case_whitespace_and_yo() {
        assert_eq!(normalize(None), "");
        assert_eq!(normalize(Some("  Hello \t\n  World ")), "hello world");
        assert_eq!(normalize(Some("ЁЛКА ёлка")), "елка елка");
    }

    #[test]
    fn whitespace_set_matches_browser_regex() {
        assert_eq!(normalize(Some("\u{FEFF}")), "");
        assert_eq!(normalize(Some("\u{FEFF}a\u{3000}\u{00A0}b\u{2028}")), "a b");
        assert_eq!(normalize(Some("a\u{0085}b")), "a\u{0085}b");
        assert_eq!(normalize(Some("\u{0085}a")), "\u{0085}a");
    }

    #[test]
    fn missing_parts_contribute_empty_strings() {
        let fields = CardFields {
            handle: 0,
            name: Some("Redis".to_string()),
            tags: None,
            description: None,
        };
        assert_eq!(CardRecord::from_fields(fields).normalized_text, "redis");
    }

    #[test]
    fn no_search_input_disables_filter() {
        let source = Cards {
            input: false,
            cards: vec![card(0, "a", "", "")],
        };
        assert!(CardSearchFilter::initialize(&source).is_none());
    }

    #[test]
    fn redis_card_matches_tags_not_other_words() {
        let source = page(vec![card(0, "Redis", "cache db", "In-memory store")]);
        let filter = CardSearchFilter::initialize(&source).unwrap();
        let mut shown = Shown::default();

        filter.on_input("cache", &mut shown);
        assert_eq!(shown.visible(), vec![0]);

        filter.on_input("postgres", &mut shown);
        assert!(shown.visible().is_empty());
        assert_eq!(shown.0[&0], CardDisplay::Hidden);
    }

    #[test]
    fn query_spans_field_boundaries() {
        let source = page(vec![card(0, "Redis", "cache db", "In-memory store")]);
        let filter = CardSearchFilter::initialize(&source).unwrap();
        assert_eq!(filter.visible("db in-memory").count(), 1);
    }

    #[test]
    fn yo_in_query_matches_plain_e_in_card() {
        let source = page(vec![
            card(0, "Алёна", "", ""),
            card(1, "Федор", "", ""),
            card(2, "Иван", "", ""),
        ]);
        let filter = CardSearchFilter::initialize(&source).unwrap();
        let mut shown = Shown::default();

        filter.on_input("фЁдор", &mut shown);
        assert_eq!(shown.visible(), vec![1]);

        filter.on_input("алена", &mut shown);
        assert_eq!(shown.visible(), vec![0]);
    }

    #[test]
    fn whitespace_query_shows_everything() {
        let source = page(vec![card(0, "a", "", ""), card(1, "b", "", "")]);
        let filter = CardSearchFilter::initialize(&source).unwrap();
        let mut shown = Shown::default();

        filter.on_input("a", &mut shown);
        assert_eq!(shown.visible(), vec![0]);

        filter.on_input(" \t ", &mut shown);
        assert_eq!(shown.visible(), vec![0, 1]);
    }

    #[test]
    fn index_is_not_rebuilt_after_load() {
        let mut source = page(vec![card(0, "first", "", "")]);
        let filter = CardSearchFilter::initialize(&source).unwrap();
        source.cards.push(card(1, "first too", "", ""));
        assert_eq!(filter.records().len(), 1);
        assert_eq!(filter.visible("first").count(), 1);
    }

    fn arb_cards() -> impl Strategy<Value = Vec<CardFields<usize>>> {
        prop::collection::vec(
            (
                prop::option::of("[a-zA-Zа-яёЁ ]{0,12}"),
                prop::option::of("[a-z ]{0,8}"),
                prop::option::of("[a-zA-Zа-яё \t]{0,20}"),
            ),
            0..8,
        )
        .prop_map(|parts| {
            parts
                .into_iter()
                .enumerate()
                .map(|(handle, (name, tags, description))| CardFields {
                    handle,
                    name,
                    tags,
                    description,
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn filtering_twice_is_the_same_as_once(cards in arb_cards(), query in "[a-zа-яё ]{0,4}") {
            let filter = CardSearchFilter::initialize(&page(cards)).unwrap();
            let mut once = Shown::default();
            filter.on_input(&query, &mut once);
            let mut twice = Shown::default();
            filter.on_input(&query, &mut twice);
            filter.on_input(&query, &mut twice);
            prop_assert_eq!(once.0, twice.0);
        }

        #[test]
        fn blank_query_shows_all(cards in arb_cards(), query in "[ \t\n]{0,5}") {
            let count = cards.len();
            let filter = CardSearchFilter::initialize(&page(cards)).unwrap();
            let mut shown = Shown::default();
            filter.on_input(&query, &mut shown);
            prop_assert_eq!(shown.visible().len(), count);
        }

        #[test]
        fn visible_iff_normalized_text_contains_query(
            cards in arb_cards(),
            query in "[a-zA-Zа-яёЁ ]{1,4}",
        ) {
            let expected: Vec<usize> = cards
                .iter()
                .filter(|c| {
                    let q = normalize(Some(&query));
                    q.is_empty() || normalize(Some(&c.text())).contains(&q)
                })
                .map(|c| c.handle)
                .collect();
            let filter = CardSearchFilter::initialize(&page(cards)).unwrap();
            let mut shown = Shown::default();
            filter.on_input(&query, &mut shown);
            prop_assert_eq!(shown.visible(), expected);
        }
    }
}
