use anime_garden::{
    EnvelopeBody, EnvelopeSource, GardenClient, ProfileQuery, SampleProvider, SampleSource,
    handle_profile_request,
};
use httpmock::Method::GET;
use serde_json::Value;

use crate::common::{self, ScriptedRelay, anime_planet, server_site};

#[tokio::test]
async fn success_relays_the_page() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/users/Swmarly/anime")
            .query_param("ajax", "1")
            .query_param("status", "2")
            .query_param("page", "1");
        then.status(200)
            .header("content-type", "text/html")
            .body("<ul class=\"cardDeck\"></ul>");
    });

    let client = GardenClient::builder()
        .base_site(server_site(&server))
        .build()
        .unwrap();
    let query = ProfileQuery::from_query("status=2&cacheBust=1715500000");
    let (http_status, envelope) =
        handle_profile_request(&client, client.base_site(), &SampleProvider::default(), &query)
            .await;
    mock.assert();

    assert_eq!(http_status, 200);
    assert!(envelope.ok);
    assert_eq!(envelope.status_code, 200);
    assert_eq!(envelope.source, EnvelopeSource::Remote);
    assert_eq!(
        envelope.body,
        Some(EnvelopeBody::Html("<ul class=\"cardDeck\"></ul>".into()))
    );
    assert_eq!(
        envelope.headers.get("content-type").map(String::as_str),
        Some("text/html")
    );

    let json = serde_json::to_value(&envelope).unwrap();
    assert_eq!(json["ok"], Value::Bool(true));
    assert_eq!(json["statusCode"], 200);
    assert_eq!(json["source"], "remote");
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn failure_serves_the_sample() {
    let relay = ScriptedRelay::new().fail_summary();
    let (http_status, envelope) = handle_profile_request(
        &relay,
        &anime_planet(),
        &SampleProvider::default(),
        &ProfileQuery::default(),
    )
    .await;

    assert_eq!(http_status, 200);
    assert!(!envelope.ok);
    assert_eq!(envelope.status_code, 503);
    assert_eq!(envelope.source, EnvelopeSource::Sample);
    assert!(envelope.error.as_deref().unwrap().contains("500"));

    let json = serde_json::to_value(&envelope).unwrap();
    assert_eq!(json["source"], "sample");
    assert_eq!(json["body"]["username"], "Swmarly");
    assert_eq!(json["body"]["statuses"].as_array().unwrap().len(), 5);
}

#[tokio::test]
async fn failure_without_sample_is_a_500() {
    let relay = ScriptedRelay::new().fail_summary();
    let (http_status, envelope) = handle_profile_request(
        &relay,
        &anime_planet(),
        &SampleProvider::new(SampleSource::Disabled),
        &ProfileQuery::default(),
    )
    .await;

    assert_eq!(http_status, 500);
    assert!(!envelope.ok);
    assert_eq!(envelope.status_code, 500);
    assert_eq!(envelope.source, EnvelopeSource::Error);
    assert_eq!(envelope.body, None);

    let json = serde_json::to_value(&envelope).unwrap();
    assert_eq!(json["source"], "error");
    assert!(json["error"].as_str().unwrap().contains("Upstream"));
    assert!(json.get("body").is_none());
}

#[tokio::test]
async fn blank_username_falls_back_to_default_profile_page() {
    let server = common::setup_server();
    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/users/Swmarly/anime")
            .is_true(|req| req.query_params().is_empty());
        then.status(200).body("<html></html>");
    });

    let site = server_site(&server);
    let client = GardenClient::builder().base_site(site.clone()).build().unwrap();
    let (_, envelope) = handle_profile_request(
        &client,
        &site,
        &SampleProvider::default(),
        &ProfileQuery::from_query("username=&page=4"),
    )
    .await;

    mock.assert();
    assert!(envelope.ok, "page without status still fetches the summary");
}

#[tokio::test]
async fn dot_username_is_never_relayed() {
    let relay = ScriptedRelay::new().summary("<html>not this</html>");
    let (http_status, envelope) = handle_profile_request(
        &relay,
        &anime_planet(),
        &SampleProvider::default(),
        &ProfileQuery::from_query("username=.."),
    )
    .await;

    assert!(relay.calls().is_empty());
    assert_eq!(http_status, 200);
    assert_eq!(envelope.source, EnvelopeSource::Sample);
    assert_eq!(envelope.status_code, 503);
    assert!(envelope.error.unwrap().contains("cannot be addressed"));
}
