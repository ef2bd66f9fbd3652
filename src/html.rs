use maud::{DOCTYPE, Markup, PreEscaped, html};

use crate::builtin;
use crate::page::SEARCH_INPUT_ID;
use crate::profile::Profile;

pub fn build_index_html(title: &str, profiles: &[&Profile]) -> String {
    let markup: Markup = html! {
        (DOCTYPE)
        html lang="ru" {
            head {
                meta charset="utf-8";
                meta name="viewport" content="width=device-width, initial-scale=1";
                meta name="color-scheme" content="light dark";
                title { (title) }
                style { (PreEscaped(builtin::BUILTIN_CSS)) }
            }
            body {
                header class="pc-topbar" {
                    div class="pc-container pc-topbar-inner" {
                        h1 { (title) }
                        button type="button" class="theme-toggle" aria-label="Toggle theme" { "Theme" }
                    }
                }
                main class="pc-container" {
                    input type="search" id=(SEARCH_INPUT_ID) class="pc-search"
                        placeholder="Search" autocomplete="off";
                    @if profiles.is_empty() {
                        div class="pc-empty" { "No profiles yet." }
                    } @else {
                        section class="pc-cards" {
                            @for profile in profiles {
                                (render_card(profile))
                            }
                        }
                    }
                }
                script { (PreEscaped(builtin::PAGE_JS)) }
            }
        }
    };
    markup.into_string()
}

fn render_card(profile: &Profile) -> Markup {
    let avatar = profile.avatar.as_deref().map(str::trim).filter(|s| !s.is_empty());

    html! {
        article class="card" data-name=(profile.name) data-tags=(profile.title) {
            @if let Some(src) = avatar {
                img class="card-avatar" src=(src) alt=(profile.name) width="64" height="64";
            }
            div class="card-content" {
                h2 { (profile.name) }
                @if !profile.title.is_empty() {
                    span class="card-title" { (profile.title) }
                }
                p { (profile.description) }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::page::Page;
    use crate::search::{CardSearchFilter, CardSource};
    use crate::theme::ThemeTarget;

    fn profile(name: &str, title: &str, description: &str) -> Profile {
        Profile {
            name: name.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            avatar: None,
            created_at: None,
        }
    }

    #[test]
    fn rendered_cards_follow_page_contract() {
        let profiles = [
            profile("Илья Девопсевич", "Девопс-богатырь", "Автоматизирует развёртывания"),
            profile("Redis", "cache db", "In-memory store"),
        ];
        let refs: Vec<&Profile> = profiles.iter().collect();
        let html = build_index_html("Анкеты", &refs);

        let page = Page::parse(&html);
        assert!(page.has_toggle());
        let cards = page.cards();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].name.as_deref(), Some("Redis"));
        assert_eq!(cards[1].tags.as_deref(), Some("cache db"));
        assert_eq!(cards[1].description.as_deref(), Some("In-memory store"));

        let filter = CardSearchFilter::initialize(&page).unwrap();
        assert_eq!(filter.visible("развертывания").count(), 1);
        assert_eq!(filter.visible("cache").count(), 1);
    }

    #[test]
    fn markup_is_escaped() {
        let profiles = [profile("<b>x</b>", "a\"b", "1 < 2")];
        let refs: Vec<&Profile> = profiles.iter().collect();
        let html = build_index_html("t", &refs);
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
        assert!(html.contains(r#"data-tags="a&quot;b""#));
        assert!(!html.contains("<b>x</b>"));
    }

    #[test]
    fn empty_list_still_has_search_input() {
        let html = build_index_html("t", &[]);
        let page = Page::parse(&html);
        assert!(page.has_search_input());
        assert!(page.cards().is_empty());
        assert!(html.contains("No profiles yet."));
    }
}
