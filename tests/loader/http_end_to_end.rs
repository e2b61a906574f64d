use anime_garden::{GardenClient, LoadOptions, ProfileLoader, ProfileSource, StatusSlug};
use httpmock::Method::GET;

use crate::common::{self, fixture, server_site};

#[tokio::test]
async fn loads_through_the_http_client() {
    let server = common::setup_server();

    let summary = server.mock(|when, then| {
        when.method(GET)
            .path("/users/Swmarly/anime")
            .is_true(|req| !req.query_params().iter().any(|(k, _)| k == "status"));
        then.status(200)
            .header("content-type", "text/html")
            .body(fixture("summary_Swmarly.html"));
    });
    let watching = server.mock(|when, then| {
        when.method(GET)
            .path("/users/Swmarly/anime")
            .query_param("ajax", "1")
            .query_param("status", "2")
            .query_param("page", "1");
        then.status(200)
            .header("content-type", "text/html")
            .body(fixture("listing_watching_p2.html"));
    });
    let completed = server.mock(|when, then| {
        when.method(GET)
            .path("/users/Swmarly/anime")
            .query_param("status", "1");
        then.status(200)
            .header("content-type", "application/json")
            .body(fixture("listing_completed_ajax.json"));
    });
    let rest: Vec<_> = ["5", "3", "4"]
        .into_iter()
        .map(|id| {
            server.mock(move |when, then| {
                when.method(GET)
                    .path("/users/Swmarly/anime")
                    .query_param("status", id);
                then.status(200).body("<html><body></body></html>");
            })
        })
        .collect();

    let client = GardenClient::builder()
        .base_site(server_site(&server))
        .build()
        .unwrap();
    let loader = ProfileLoader::from_client(client);
    let snap = loader.load("Swmarly", LoadOptions::default()).await.unwrap().unwrap();

    summary.assert();
    watching.assert();
    completed.assert();
    for mock in &rest {
        mock.assert();
    }

    assert_eq!(snap.source, ProfileSource::Remote);
    let apothecary = &snap.profile.status(StatusSlug::Watching).unwrap().items[0];
    assert_eq!(
        apothecary.url,
        format!("{}/anime/the-apothecary-diaries", server.base_url()),
        "relative links resolve against the configured site"
    );
    assert_eq!(
        snap.profile.status(StatusSlug::Completed).unwrap().items[0].url,
        "https://www.anime-planet.com/anime/cowboy-bebop"
    );
}

#[tokio::test]
async fn upstream_error_mid_load_falls_back() {
    let server = common::setup_server();

    let summary = server.mock(|when, then| {
        when.method(GET)
            .path("/users/Swmarly/anime")
            .is_true(|req| !req.query_params().iter().any(|(k, _)| k == "status"));
        then.status(200).body(fixture("summary_Swmarly.html"));
    });
    let broken = server.mock(|when, then| {
        when.method(GET)
            .path("/users/Swmarly/anime")
            .query_param("status", "2");
        then.status(503).body("busy");
    });

    let client = GardenClient::builder()
        .base_site(server_site(&server))
        .build()
        .unwrap();
    let snap = ProfileLoader::from_client(client)
        .load("Swmarly", LoadOptions::default())
        .await
        .unwrap()
        .unwrap();

    summary.assert();
    broken.assert();
    assert_eq!(snap.source, ProfileSource::Sample);
    assert!(snap.error.unwrap().contains("503"));
}
