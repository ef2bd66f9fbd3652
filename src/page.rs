use anyhow::Context as _;
use kuchiki::traits::TendrilSink as _;
use kuchiki::{ElementData, NodeDataRef, NodeRef};

use crate::search::{CardDisplay, CardFields, CardSource, CardVisibility};
use crate::theme::{SystemTheme, ThemeTarget};

pub const DARK_CLASS: &str = "dark";
pub const TOGGLE_SELECTOR: &str = ".theme-toggle";
pub const SEARCH_INPUT_ID: &str = "search";
pub const CARD_SELECTOR: &str = ".card";
pub const DESCRIPTION_SELECTOR: &str = ".card-content p";

pub type CardHandle = NodeDataRef<ElementData>;

/// A parsed HTML document exposing the page capabilities the theme
/// controller and card filter need.
pub struct Page {
    document: NodeRef,
}

impl Page {
    pub fn parse(html: &str) -> Self {
        Self {
            document: kuchiki::parse_html().one(html),
        }
    }

    pub fn to_html(&self) -> anyhow::Result<String> {
        let mut out = Vec::new();
        self.document
            .serialize(&mut out)
            .context("serialize page")?;
        String::from_utf8(out).context("page html not utf-8")
    }

    fn body(&self) -> Option<NodeDataRef<ElementData>> {
        self.document.select_first("body").ok()
    }

    fn search_input(&self) -> Option<NodeDataRef<ElementData>> {
        self.document
            .select_first(&format!("#{SEARCH_INPUT_ID}"))
            .ok()
    }

    /// Mirrors a typed query into the input's `value` attribute.
    pub fn set_search_value(&mut self, value: &str) {
        if let Some(input) = self.search_input() {
            input
                .attributes
                .borrow_mut()
                .insert("value", value.to_string());
        }
    }
}

impl ThemeTarget for Page {
    fn is_dark(&self) -> bool {
        self.body().is_some_and(|body| {
            body.attributes
                .borrow()
                .get("class")
                .is_some_and(|class| class.split_whitespace().any(|c| c == DARK_CLASS))
        })
    }

    fn set_dark(&mut self, dark: bool) {
        let Some(body) = self.body() else { return };
        let mut attrs = body.attributes.borrow_mut();
        let current = attrs.get("class").unwrap_or("").to_string();
        let mut classes: Vec<&str> = current
            .split_whitespace()
            .filter(|c| *c != DARK_CLASS)
            .collect();
        if dark {
            classes.push(DARK_CLASS);
        }
        if classes.is_empty() {
            attrs.remove("class");
        } else {
            attrs.insert("class", classes.join(" "));
        }
    }

    fn has_toggle(&self) -> bool {
        self.document.select_first(TOGGLE_SELECTOR).is_ok()
    }
}

impl CardSource for Page {
    type Handle = CardHandle;

    fn has_search_input(&self) -> bool {
        self.search_input().is_some()
    }

    fn cards(&self) -> Vec<CardFields<CardHandle>> {
        let Ok(nodes) = self.document.select(CARD_SELECTOR) else {
            return Vec::new();
        };
        nodes
            .map(|node| {
                let (name, tags) = {
                    let attrs = node.attributes.borrow();
                    (
                        attrs.get("data-name").map(str::to_string),
                        attrs.get("data-tags").map(str::to_string),
                    )
                };
                let description = node
                    .as_node()
                    .select_first(DESCRIPTION_SELECTOR)
                    .ok()
                    .map(|p| p.as_node().text_contents());
                CardFields {
                    handle: node,
                    name,
                    tags,
                    description,
                }
            })
            .collect()
    }
}

impl CardVisibility<CardHandle> for Page {
    fn set_display(&mut self, card: &CardHandle, display: CardDisplay) {
        let mut attrs = card.attributes.borrow_mut();
        let style = set_style_property(
            attrs.get("style").unwrap_or(""),
            "display",
            display.as_css(),
        );
        attrs.insert("style", style);
    }
}

/// Sets one declaration in an inline `style` value, keeping the others.
fn set_style_property(style: &str, property: &str, value: &str) -> String {
    let mut declarations: Vec<String> = style
        .split(';')
        .map(str::trim)
        .filter(|decl| !decl.is_empty())
        .filter(|decl| {
            decl.split(':')
                .next()
                .is_none_or(|name| !name.trim().eq_ignore_ascii_case(property))
        })
        .map(str::to_string)
        .collect();
    declarations.push(format!("{property}: {value}"));
    declarations.join("; ")
}

/// A system dark-mode answer fixed up front. `None` stands for a platform
/// without the media query.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedSystemTheme(pub Option<bool>);

impl SystemTheme for FixedSystemTheme {
    fn prefers_dark(&self) -> Option<bool> {
        self.0
    }
}
