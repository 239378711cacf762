//! DramaCool markup parsing
//!
//! Pure functions over page bodies. Each one parses and drops its document
//! before returning, so callers can hold the results across `.await`.

use scraper::{ElementRef, Html, Selector};

use super::LABELS;
use crate::models::{normalize_episode_order, EpisodeRef, MediaInfo, Search, SearchResult};
use crate::provider::html::{first_attr, first_text, selector, text};
use crate::provider::ProviderError;

/// Compiled selectors for every DramaCool page
pub struct Selectors {
    search_item: Selector,
    link: Selector,
    search_title: Selector,
    search_image: Selector,
    pagination: Selector,
    title: Selector,
    other_name: Selector,
    cover: Selector,
    description: Selector,
    info_paragraph: Selector,
    episode_item: Selector,
    episode_title: Selector,
    episode_time: Selector,
}

impl Selectors {
    pub fn new() -> Result<Self, ProviderError> {
        Ok(Self {
            search_item: selector("div.block > div.tab-content > ul.list-episode-item > li")?,
            link: selector("a")?,
            search_title: selector("a > h3")?,
            search_image: selector("a > img")?,
            pagination: selector("ul.pagination")?,
            title: selector(".info > h1:nth-child(1)")?,
            other_name: selector(".other_name > a")?,
            cover: selector("div.details > div.img > img")?,
            description: selector("div.details div.info p:nth-child(6)")?,
            info_paragraph: selector("div.details div.info p")?,
            episode_item: selector("div.content-left > div.block-tab > div > div > ul > li")?,
            episode_title: selector("h3")?,
            episode_time: selector("span.time")?,
        })
    }
}

/// `base` joined with a site path, without doubling the slash
fn site_url(base: &str, href: &str) -> String {
    format!("{base}/{}", href.trim_start_matches('/'))
}

/// Parse one search results page.
pub fn parse_search(sel: &Selectors, body: &str, base: &str, page: u32) -> Search<SearchResult> {
    let document = Html::parse_document(body);

    let has_next_page = document.select(&sel.pagination).next().is_some_and(|nav| {
        nav.children()
            .filter_map(ElementRef::wrap)
            .last()
            .is_some_and(|last| !last.value().classes().any(|c| c == "selected"))
    });

    let results = document
        .select(&sel.search_item)
        .filter_map(|item| {
            let Some(href) = first_attr(item, &sel.link, "href") else {
                tracing::warn!(page, "search result without link skipped");
                return None;
            };
            Some(SearchResult {
                id: href.trim_start_matches('/').to_string(),
                title: first_text(item, &sel.search_title).unwrap_or_default(),
                url: site_url(base, &href),
                image: first_attr(item, &sel.search_image, "data-original"),
            })
        })
        .collect();

    Search { current_page: page, has_next_page, results }
}

/// Parse a drama info page.
///
/// `id` is echoed into the result unchanged; `page_url` is only used in errors.
pub fn parse_media_info(
    sel: &Selectors,
    body: &str,
    id: &str,
    page_url: &str,
    base: &str,
) -> Result<MediaInfo, ProviderError> {
    let document = Html::parse_document(body);
    let root = document.root_element();

    let title = first_text(root, &sel.title).ok_or_else(|| ProviderError::Parse {
        field: "title",
        url: page_url.to_string(),
    })?;

    let other_names = document
        .select(&sel.other_name)
        .map(text)
        .filter(|name| !name.is_empty())
        .collect();

    let release_date = document
        .select(&sel.info_paragraph)
        .map(text)
        .find(|p| LABELS.matches("release_date", p))
        .and_then(|p| LABELS.strip("release_date", &p));

    let mut episodes: Vec<EpisodeRef> = document
        .select(&sel.episode_item)
        .filter_map(|item| parse_episode(sel, item, &title, base))
        .collect();
    normalize_episode_order(&mut episodes);

    Ok(MediaInfo {
        id: id.to_string(),
        other_names,
        image: first_attr(root, &sel.cover, "src"),
        description: first_text(root, &sel.description),
        release_date,
        episodes,
        title,
    })
}

fn parse_episode(sel: &Selectors, item: ElementRef<'_>, media_title: &str, base: &str) -> Option<EpisodeRef> {
    let Some(href) = first_attr(item, &sel.link, "href") else {
        tracing::warn!("episode entry without link skipped");
        return None;
    };
    let Some(episode) = episode_number(&href) else {
        tracing::warn!(href = %href, "episode entry without episode number skipped");
        return None;
    };

    let id = href
        .split(".html")
        .next()
        .unwrap_or_default()
        .trim_start_matches('/')
        .to_string();
    let title = first_text(item, &sel.episode_title)
        .map(|t| t.replace(media_title, "").trim().to_string())
        .unwrap_or_default();

    Some(EpisodeRef {
        id,
        title,
        episode,
        release_date: first_text(item, &sel.episode_time),
        url: site_url(base, &href),
    })
}

/// Episode number from an episode href.
///
/// Takes the segment after the last `-episode-`, up to `.html`; remaining
/// hyphens are decimal points, so `-episode-5-5.html` is `5.5`.
#[must_use]
pub fn episode_number(href: &str) -> Option<f64> {
    let (_, tail) = href.rsplit_once("-episode-")?;
    let raw = tail.split(".html").next()?.trim_end_matches('/');
    raw.replace('-', ".").parse::<f64>().ok().filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const BASE: &str = "https://www1.dramacool.cr";

    const SEARCH_PAGE: &str = r#"<html><body>
<div class="block"><div class="tab-content"><ul class="list-episode-item">
  <li><a href="/drama-detail/vincenzo" class="img"><img data-original="https://img.example/vincenzo.png"><h3 class="title">Vincenzo</h3></a></li>
  <li><a href="/drama-detail/vincenzo-special"><h3>Vincenzo <b>Special</b></h3></a></li>
  <li><span>broken</span></li>
</ul></div></div>
<ul class="pagination"><li class="selected"><a>1</a></li><li><a href="?page=2">2</a></li></ul>
</body></html>"#;

    const INFO_PAGE: &str = r#"<html><body>
<div class="details">
  <div class="img"><img src="https://img.example/cover.png"></div>
  <div class="info">
    <h1>Vincenzo</h1>
    <p><span>Other name:</span></p>
    <p class="other_name"><a>빈센조</a> <a> Vincenzo Cassano </a></p>
    <p>Description</p>
    <p></p>
    <p>A lawyer returns to Korea.</p>
    <p><span>Released:</span>
       2021</p>
  </div>
</div>
<div class="content-left"><div class="block-tab"><div><div><ul class="list-episode-item-2 all-episode">
  <li><a href="/vincenzo-2021-episode-3.html"><h3 class="title">Vincenzo Episode 3</h3><span class="time">2021-02-27</span></a></li>
  <li><a href="/vincenzo-2021-episode-2-5.html"><h3 class="title">Vincenzo Episode 2.5</h3></a></li>
  <li><a href="/vincenzo-2021-episode-2.html"><h3 class="title">Vincenzo Episode 2</h3><span class="time">2021-02-21</span></a></li>
  <li><a href="/vincenzo-2021-preview.html"><h3 class="title">Vincenzo Preview</h3></a></li>
  <li><a href="/vincenzo-2021-episode-1.html"><h3 class="title">Vincenzo Episode 1</h3><span class="time">2021-02-20</span></a></li>
</ul></div></div></div></div>
</body></html>"#;

    #[test]
    fn test_parse_search() {
        let sel = Selectors::new().unwrap();
        let search = parse_search(&sel, SEARCH_PAGE, BASE, 1);

        assert_eq!(search.current_page, 1);
        assert!(search.has_next_page);
        assert_eq!(search.results.len(), 2);

        let first = &search.results[0];
        assert_eq!(first.id, "drama-detail/vincenzo");
        assert_eq!(first.title, "Vincenzo");
        assert_eq!(first.url, "https://www1.dramacool.cr/drama-detail/vincenzo");
        assert_eq!(first.image.as_deref(), Some("https://img.example/vincenzo.png"));
        assert_eq!(search.results[1].title, "Vincenzo Special");
        assert_eq!(search.results[1].image, None);
    }

    #[test]
    fn test_parse_search_last_page() {
        let sel = Selectors::new().unwrap();
        let body = SEARCH_PAGE.replace(r#"<li class="selected"><a>1</a></li><li><a href="?page=2">2</a></li>"#,
            r#"<li><a href="?page=1">1</a></li><li class="selected"><a>2</a></li>"#);
        assert!(!parse_search(&sel, &body, BASE, 2).has_next_page);

        let no_nav = parse_search(&sel, "<html><body></body></html>", BASE, 1);
        assert!(!no_nav.has_next_page);
        assert!(no_nav.results.is_empty());
    }

    #[test]
    fn test_parse_media_info() {
        let sel = Selectors::new().unwrap();
        let info = parse_media_info(&sel, INFO_PAGE, "drama-detail/vincenzo", "page", BASE).unwrap();

        assert_eq!(info.id, "drama-detail/vincenzo");
        assert_eq!(info.title, "Vincenzo");
        assert_eq!(info.other_names, vec!["빈센조".to_string(), "Vincenzo Cassano".to_string()]);
        assert_eq!(info.image.as_deref(), Some("https://img.example/cover.png"));
        assert_eq!(info.description.as_deref(), Some("A lawyer returns to Korea."));
        assert_eq!(info.release_date.as_deref(), Some("2021"));

        let numbers: Vec<f64> = info.episodes.iter().map(|e| e.episode).collect();
        assert_eq!(numbers, vec![1.0, 2.0, 2.5, 3.0]);

        let first = &info.episodes[0];
        assert_eq!(first.id, "vincenzo-2021-episode-1");
        assert_eq!(first.title, "Episode 1");
        assert_eq!(first.release_date.as_deref(), Some("2021-02-20"));
        assert_eq!(first.url, "https://www1.dramacool.cr/vincenzo-2021-episode-1.html");
        assert_eq!(info.episodes[2].release_date, None);
    }

    #[test]
    fn test_parse_media_info_is_idempotent() {
        let sel = Selectors::new().unwrap();
        let a = parse_media_info(&sel, INFO_PAGE, "drama-detail/vincenzo", "page", BASE).unwrap();
        let b = parse_media_info(&sel, INFO_PAGE, "drama-detail/vincenzo", "page", BASE).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_parse_media_info_requires_title() {
        let sel = Selectors::new().unwrap();
        let body = INFO_PAGE.replace("<h1>Vincenzo</h1>", "<h1>  </h1>");
        let err = parse_media_info(&sel, &body, "x", "https://site/x", BASE).unwrap_err();
        assert!(matches!(err, ProviderError::Parse { field: "title", .. }));
    }

    #[test]
    fn test_parse_media_info_optional_fields_absent() {
        let sel = Selectors::new().unwrap();
        let body = r#"<div class="details"><div class="info"><h1>Solo</h1></div></div>"#;
        let info = parse_media_info(&sel, body, "drama-detail/solo", "page", BASE).unwrap();
        assert_eq!(info.title, "Solo");
        assert!(info.other_names.is_empty());
        assert_eq!(info.image, None);
        assert_eq!(info.description, None);
        assert_eq!(info.release_date, None);
        assert!(info.episodes.is_empty());
    }

    #[test]
    fn test_episode_number() {
        assert_eq!(episode_number("/vincenzo-2021-episode-1.html"), Some(1.0));
        assert_eq!(episode_number("/vincenzo-2021-episode-5-5.html"), Some(5.5));
        assert_eq!(episode_number("/a-episode-show-episode-12.html"), Some(12.0));
        assert_eq!(episode_number("/vincenzo-2021-preview.html"), None);
        assert_eq!(episode_number("/vincenzo-episode-inf.html"), None);
    }
}
