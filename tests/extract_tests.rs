//! End-to-end extraction tests
//!
//! These tests serve synthetic catalog pages from a wiremock server and run
//! the full fetch-then-assemble path for each entity kind, including the
//! structured not-found outcomes.

use mal_crawler::config::{SiteConfig, UserAgentConfig};
use mal_crawler::crawler::build_http_client;
use mal_crawler::records::{crawl_anime, crawl_characters, crawl_episodes, Outcome};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_site(base_url: &str) -> SiteConfig {
    SiteConfig {
        base_url: base_url.to_string(),
        anime_path: "/anime".to_string(),
        genres_path: "/anime.php".to_string(),
        genre_path: "/anime/genre".to_string(),
        season_path: "/anime/season/archive".to_string(),
        description_not_found: "Description not found".to_string(),
    }
}

fn test_client() -> reqwest::Client {
    build_http_client(&UserAgentConfig {
        crawler_name: "TestCrawler".to_string(),
        crawler_version: "1.0.0".to_string(),
        contact_url: "https://example.com/contact".to_string(),
    })
    .expect("Failed to build client")
}

const DETAIL_PAGE: &str = r#"<html>
<head>
  <meta property="og:title" content="Foo">
  <meta property="og:url" content="https://example/anime/1/foo">
</head>
<body>
  <div><span>Episodes:</span> 12</div>
  <div><span>Status:</span> Finished Airing</div>
  <div><span>Premiered:</span> ?</div>
  <div><span>Studios:</span> None found</div>
  <div><span>Members:</span> 1,234,567</div>
  <div><span>Popularity:</span> #42</div>
  <p itemprop="description">No synopsis information has been added to this title.</p>
</body>
</html>"#;

#[tokio::test]
async fn test_anime_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anime/1"))
        .respond_with(ResponseTemplate::new(200).set_body_string(DETAIL_PAGE))
        .mount(&server)
        .await;

    let outcome = crawl_anime(&test_client(), &test_site(&server.uri()), 1)
        .await
        .unwrap();

    let Outcome::Found(record) = outcome else {
        panic!("expected a found record");
    };

    assert_eq!(record.name, "Foo");
    assert_eq!(record.mal_url, "https://example/anime/1/foo");
    assert_eq!(record.slug.as_deref(), Some("foo"));
    assert_eq!(record.episodes, Some(12));
    assert_eq!(record.status.as_deref(), Some("Finished Airing"));
    // Placeholders resolve to absent, "None found" to an empty list.
    assert_eq!(record.premiered, None);
    assert_eq!(record.synopsis, None);
    assert!(record.studios.is_empty());
    // Numeric cleanup.
    assert_eq!(record.members, Some(1_234_567));
    assert_eq!(record.popularity, Some(42));
}

#[tokio::test]
async fn test_anime_not_found_is_a_record() {
    // No mocks: every request answers 404.
    let server = MockServer::start().await;

    let outcome = crawl_anime(&test_client(), &test_site(&server.uri()), 7)
        .await
        .unwrap();

    assert!(!outcome.is_found());
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"malId": 7, "error": "Anime Not Found"})
    );
}

#[tokio::test]
async fn test_episodes_end_to_end() {
    let page = r#"<html><body>
        <table class="episode_list">
          <tr>
            <td class="episode-number">1</td>
            <td class="episode-title"><a href="/anime/1/foo/episode/1">First</a>
              <span class="di-ib">First (最初)</span></td>
            <td class="episode-aired">Jan 1, 2000</td>
          </tr>
        </table>
    </body></html>"#;

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anime/1/_/episode"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&server)
        .await;

    let outcome = crawl_episodes(&test_client(), &test_site(&server.uri()), 1)
        .await
        .unwrap();

    let Outcome::Found(rows) = outcome else {
        panic!("expected episode rows");
    };
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, 1);
    assert_eq!(rows[0].title.as_deref(), Some("First"));
    assert_eq!(rows[0].romanji.as_deref(), Some("First"));
    assert_eq!(rows[0].japanese.as_deref(), Some("最初"));
    assert_eq!(rows[0].aired.as_deref(), Some("Jan 1, 2000"));
    assert_eq!(rows[0].score, None);
}

#[tokio::test]
async fn test_episodes_empty_table_is_found_and_empty() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anime/2/_/episode"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_string(r#"<html><body><table class="episode_list"></table></body></html>"#),
        )
        .mount(&server)
        .await;

    let outcome = crawl_episodes(&test_client(), &test_site(&server.uri()), 2)
        .await
        .unwrap();

    let Outcome::Found(rows) = outcome else {
        panic!("expected an empty episode list");
    };
    assert!(rows.is_empty());
}

#[tokio::test]
async fn test_episodes_not_found_message() {
    let server = MockServer::start().await;

    let outcome = crawl_episodes(&test_client(), &test_site(&server.uri()), 9)
        .await
        .unwrap();

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"malId": 9, "error": "Anime episodes Not Found"})
    );
}

#[tokio::test]
async fn test_characters_end_to_end() {
    let page = r#"<html><body>
        <div class="anime-character-container">
          <table><tr><td>
            <a class="fw-n" href="/character/532/Faye_Valentine"></a>
            <div class="spaceit_pad"><a href="/character/532/Faye_Valentine"><h3 class="h3_character_name">Faye Valentine</h3></a></div>
            <div class="spaceit_pad">Main</div>
          </td></tr></table>
        </div>
    </body></html>"#;

    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anime/1/_/characters"))
        .respond_with(ResponseTemplate::new(200).set_body_string(page))
        .mount(&server)
        .await;

    let outcome = crawl_characters(&test_client(), &test_site(&server.uri()), 1)
        .await
        .unwrap();

    let Outcome::Found(entries) = outcome else {
        panic!("expected character entries");
    };
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].name, "Faye Valentine");
    assert_eq!(entries[0].slug, "faye-valentine");
    assert_eq!(entries[0].id, Some(532));
    assert_eq!(entries[0].role.as_deref(), Some("Main"));
    assert!(entries[0].voice_actors.is_empty());
}

#[tokio::test]
async fn test_characters_not_found_message() {
    let server = MockServer::start().await;

    let outcome = crawl_characters(&test_client(), &test_site(&server.uri()), 3)
        .await
        .unwrap();

    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(
        json,
        serde_json::json!({"malId": 3, "error": "Characters and staff Not Found"})
    );
}

#[tokio::test]
async fn test_server_error_is_not_found_too() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/anime/4"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let outcome = crawl_anime(&test_client(), &test_site(&server.uri()), 4)
        .await
        .unwrap();
    assert!(!outcome.is_found());
}
