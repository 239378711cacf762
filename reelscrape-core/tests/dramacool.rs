//! Integration tests for the DramaCool provider against a mock site
//!
//! Run with: cargo test --test dramacool

use reelscrape_core::provider::{DramaCool, MediaParser, ProviderContext, ProviderError, ProviderRegistry};
use reelscrape_core::{Config, StreamingServer};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SEARCH_PAGE: &str = r#"<html><body>
<div class="block"><div class="tab-content"><ul class="list-episode-item">
  <li><a href="/drama-detail/vincenzo" class="img"><img data-original="https://img.example/vincenzo.png"><h3 class="title">Vincenzo</h3></a></li>
  <li><a href="/drama-detail/vincenzo-making"><img data-original="https://img.example/making.png"><h3 class="title">Vincenzo Making</h3></a></li>
</ul></div></div>
<ul class="pagination"><li class="selected"><a>1</a></li><li><a href="?page=2">2</a></li><li><a href="?page=3">Last</a></li></ul>
</body></html>"#;

const INFO_PAGE: &str = r#"<html><body>
<div class="details">
  <div class="img"><img src="https://img.example/cover.png"></div>
  <div class="info">
    <h1>Vincenzo</h1>
    <p><span>Other name:</span></p>
    <p class="other_name"><a>빈센조</a></p>
    <p>Description</p>
    <p></p>
    <p>During a visit to his motherland, a Korean-Italian mafia lawyer gives an unrivaled conglomerate a taste of its own medicine.</p>
    <p><span>Released:</span> <a href="/released-in-2021.html">2021</a></p>
  </div>
</div>
<div class="content-left"><div class="block-tab"><div><div><ul class="list-episode-item-2 all-episode">
  <li><a href="/vincenzo-2021-episode-2.html"><h3 class="title">Vincenzo Episode 2</h3><span class="time">2021-02-21</span></a></li>
  <li><a href="/vincenzo-2021-episode-1.html"><h3 class="title">Vincenzo Episode 1</h3><span class="time">2021-02-20</span></a></li>
</ul></div></div></div></div>
</body></html>"#;

const MIXDROP_PAGE: &str = r#"<html><body>
<script>
eval(function(p,a,c,k,e,d){while(c--)if(k[c])p=p.replace(new RegExp('\\b'+c.toString(a)+'\\b','g'),k[c]);return p}('0.1="//2.3/4.5?s=6";0.7="//2.3/8.9"',36,10,'MDCore|wurl|delivery|mxcontent|v|mp4|abc|poster|thumb|jpg'.split('|'),0,{}))
</script></body></html>"#;

fn episode_page(mixdrop: &str, streamtape: &str) -> String {
    format!(
        r#"<html><body><div class="anime_muti_link"><ul>
<li class="Standard" data-video="//asianload.example/streaming.php?id=MzUw">Standard Server</li>
<li class="mixdrop" data-video="{mixdrop}">Mixdrop</li>
<li class="streamtape" data-video="{streamtape}">Streamtape</li>
</ul></div></body></html>"#
    )
}

fn drama(site: &MockServer) -> DramaCool {
    let ctx = ProviderContext::new(Config::default()).unwrap();
    DramaCool::with_base_url(&ctx, &site.uri()).unwrap()
}

async fn mount_html(site: &MockServer, at: &str, body: impl Into<String>) {
    Mock::given(method("GET"))
        .and(path(at))
        .respond_with(ResponseTemplate::new(200).set_body_string(body.into()))
        .mount(site)
        .await;
}

#[tokio::test]
async fn test_search_results_and_pagination() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("keyword", "vincenzo"))
        .and(query_param("page", "1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(SEARCH_PAGE))
        .expect(1)
        .mount(&site)
        .await;

    let search = drama(&site).search("vincenzo", 1).await.unwrap();
    assert_eq!(search.current_page, 1);
    assert!(search.has_next_page);
    assert_eq!(search.results.len(), 2);
    assert_eq!(search.results[0].id, "drama-detail/vincenzo");
    assert_eq!(search.results[0].url, format!("{}/drama-detail/vincenzo", site.uri()));
}

#[tokio::test]
async fn test_search_normalizes_keyword() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .and(query_param("keyword", "Hotel-del-Luna"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html><body></body></html>"))
        .expect(1)
        .mount(&site)
        .await;

    let search = drama(&site).search("Hotel del Luna", 2).await.unwrap();
    assert_eq!(search.current_page, 2);
    assert!(!search.has_next_page);
    assert!(search.results.is_empty());
}

#[tokio::test]
async fn test_search_result_id_round_trips_into_media_info() {
    let site = MockServer::start().await;
    mount_html(&site, "/search", SEARCH_PAGE).await;
    mount_html(&site, "/drama-detail/vincenzo", INFO_PAGE).await;

    let drama = drama(&site);
    let search = drama.search("vincenzo", 1).await.unwrap();
    let id = &search.results[0].id;

    let info = drama.fetch_media_info(id).await.unwrap();
    assert_eq!(&info.id, id);
    assert_eq!(info.title, "Vincenzo");
    assert_eq!(info.release_date.as_deref(), Some("2021"));
    assert_eq!(info.other_names, vec!["빈센조".to_string()]);

    let numbers: Vec<f64> = info.episodes.iter().map(|e| e.episode).collect();
    assert_eq!(numbers, vec![1.0, 2.0]);
    assert!(info.episodes.windows(2).all(|w| w[0].episode < w[1].episode));

    let again = drama.fetch_media_info(id).await.unwrap();
    assert_eq!(info, again);
}

#[tokio::test]
async fn test_media_info_accepts_absolute_url() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/drama-detail/vincenzo"))
        .respond_with(ResponseTemplate::new(200).set_body_string(INFO_PAGE))
        .expect(1)
        .mount(&site)
        .await;

    let id = format!("{}/drama-detail/vincenzo", site.uri());
    let info = drama(&site).fetch_media_info(&id).await.unwrap();
    assert_eq!(info.id, id);
}

#[tokio::test]
async fn test_media_info_without_title_is_parse_error() {
    let site = MockServer::start().await;
    mount_html(&site, "/drama-detail/empty", "<html><body><div class=\"info\"></div></body></html>").await;

    let err = drama(&site).fetch_media_info("drama-detail/empty").await.unwrap_err();
    assert!(matches!(err, ProviderError::Parse { field: "title", .. }));
}

#[tokio::test]
async fn test_media_info_http_error() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&site)
        .await;

    let err = drama(&site).fetch_media_info("drama-detail/gone").await.unwrap_err();
    assert!(matches!(err, ProviderError::Http { status, .. } if status.as_u16() == 404));
    assert!(err.is_fetch());
}

#[tokio::test]
async fn test_search_server_error_is_not_an_empty_result() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&site)
        .await;

    let err = drama(&site).search("vincenzo", 1).await.unwrap_err();
    assert!(matches!(err, ProviderError::Http { status, .. } if status.as_u16() == 503));
    assert!(err.is_fetch());
    assert!(!err.is_retryable_elsewhere());
}

#[tokio::test]
async fn test_episode_page_server_error_propagates() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/x-episode-1.html"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&site)
        .await;

    let err = drama(&site)
        .fetch_episode_sources("x-episode-1", StreamingServer::AsianLoad)
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Http { status, .. } if status.as_u16() == 500));
    assert!(err.is_fetch());
}

#[tokio::test]
async fn test_own_origin_episode_url_gets_page_suffix() {
    let site = MockServer::start().await;
    let host = MockServer::start().await;
    mount_html(
        &site,
        "/vincenzo-2021-episode-1.html",
        episode_page(&format!("{}/mixdrop/e/abc", host.uri()), ""),
    )
    .await;
    mount_html(&host, "/mixdrop/e/abc", MIXDROP_PAGE).await;

    let id = format!("{}/vincenzo-2021-episode-1", site.uri());
    let sources = drama(&site)
        .fetch_episode_sources(&id, StreamingServer::MixDrop)
        .await
        .unwrap();
    assert_eq!(sources.sources.len(), 1);
}

#[tokio::test]
async fn test_unsupported_server_makes_no_request() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&site)
        .await;

    let err = drama(&site)
        .fetch_episode_sources("vincenzo-2021-episode-1", StreamingServer::Filemoon)
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::UnsupportedServer { server: StreamingServer::Filemoon, .. }));
}

#[tokio::test]
async fn test_server_signature_mismatch() {
    let site = MockServer::start().await;
    let page = episode_page("https://mixdrop.example/e/abc", "https://dood.example/e/xyz");
    Mock::given(method("GET"))
        .and(path("/vincenzo-2021-episode-1.html"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .expect(1)
        .mount(&site)
        .await;

    let err = drama(&site)
        .fetch_episode_sources("vincenzo-2021-episode-1", StreamingServer::StreamTape)
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::ServerMismatch { server: StreamingServer::StreamTape, .. }));
    assert!(err.is_retryable_elsewhere());
    assert!(err.to_string().starts_with("Try another server"));
}

#[tokio::test]
async fn test_episode_page_to_mixdrop_sources() {
    let site = MockServer::start().await;
    let host = MockServer::start().await;
    let host_url = format!("{}/mixdrop/e/abc", host.uri());
    mount_html(&site, "/vincenzo-2021-episode-1.html", episode_page(&host_url, "")).await;
    Mock::given(method("GET"))
        .and(path("/mixdrop/e/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MIXDROP_PAGE))
        .expect(1)
        .mount(&host)
        .await;

    let sources = drama(&site)
        .fetch_episode_sources("vincenzo-2021-episode-1", StreamingServer::MixDrop)
        .await
        .unwrap();
    assert_eq!(sources.sources.len(), 1);
    assert_eq!(sources.sources[0].url, "https://delivery.mxcontent/v.mp4?s=abc");
}

#[tokio::test]
async fn test_protocol_relative_locator_inherits_page_scheme() {
    let site = MockServer::start().await;
    let authority = site.uri().trim_start_matches("http://").to_string();
    let locator = format!("//{authority}/mixdrop/e/abc");
    mount_html(&site, "/vincenzo-2021-episode-1.html", episode_page(&locator, "")).await;
    mount_html(&site, "/mixdrop/e/abc", MIXDROP_PAGE).await;

    let sources = drama(&site)
        .fetch_episode_sources("/vincenzo-2021-episode-1.html", StreamingServer::MixDrop)
        .await
        .unwrap();
    assert_eq!(sources.sources[0].url, "https://delivery.mxcontent/v.mp4?s=abc");
}

#[tokio::test]
async fn test_host_url_dispatches_without_page_fetch() {
    let site = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&site)
        .await;
    let host = MockServer::start().await;
    mount_html(&host, "/e/abc", MIXDROP_PAGE).await;

    let sources = drama(&site)
        .fetch_episode_sources(&format!("{}/e/abc", host.uri()), StreamingServer::MixDrop)
        .await
        .unwrap();
    assert_eq!(sources.sources.len(), 1);
}

#[tokio::test]
async fn test_host_failure_is_extraction_error() {
    let site = MockServer::start().await;
    let host = MockServer::start().await;
    let host_url = format!("{}/mixdrop/e/gone", host.uri());
    mount_html(&site, "/vincenzo-2021-episode-1.html", episode_page(&host_url, "")).await;
    mount_html(&host, "/mixdrop/e/gone", "<html>File not found</html>").await;

    let err = drama(&site)
        .fetch_episode_sources("vincenzo-2021-episode-1", StreamingServer::MixDrop)
        .await
        .unwrap_err();
    assert!(matches!(err, ProviderError::Extraction { server: StreamingServer::MixDrop, .. }));
    assert!(err.is_retryable_elsewhere());
}

#[tokio::test]
async fn test_episode_servers_not_implemented() {
    let site = MockServer::start().await;
    let err = drama(&site).fetch_episode_servers("vincenzo-2021-episode-1").await.unwrap_err();
    assert!(matches!(err, ProviderError::NotImplemented(_)));
}

/// search -> info -> first episode -> sources, through the registry
#[tokio::test]
async fn test_vincenzo_end_to_end() {
    let site = MockServer::start().await;
    let host = MockServer::start().await;
    mount_html(&site, "/search", SEARCH_PAGE).await;
    mount_html(&site, "/drama-detail/vincenzo", INFO_PAGE).await;
    mount_html(
        &site,
        "/vincenzo-2021-episode-1.html",
        episode_page(&format!("{}/mixdrop/e/abc", host.uri()), ""),
    )
    .await;
    mount_html(&host, "/mixdrop/e/abc", MIXDROP_PAGE).await;

    let mut config = Config::default();
    config.providers.dramacool.base_url = site.uri();
    let mut registry = ProviderRegistry::with_defaults(ProviderContext::new(config).unwrap());
    let provider = registry.create_instance("dramacool").unwrap();

    let search = provider.search("vincenzo", 1).await.unwrap();
    assert!(!search.results.is_empty());
    let hit = &search.results[0];
    assert!(hit.title.to_lowercase().contains("vincenzo"));
    assert!(!hit.id.is_empty() && !hit.id.starts_with("http"));

    let info = provider.fetch_media_info(&hit.id).await.unwrap();
    assert_eq!(info.title.trim(), hit.title.trim());
    assert!(!info.episodes.is_empty());
    assert!(info.episodes[0].episode <= info.episodes[info.episodes.len() - 1].episode);

    let first = &info.episodes[0];
    assert_eq!(first.episode, 1.0);
    let sources = provider
        .fetch_episode_sources(&first.id, StreamingServer::MixDrop)
        .await
        .unwrap();
    assert!(!sources.sources.is_empty());
}
