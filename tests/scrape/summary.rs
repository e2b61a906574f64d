use anime_garden::ExtractionStrategy;
use anime_garden::profile::scrape::parse_summary_page;

use crate::common::fixture;

#[test]
fn summary_fixture_scalars() {
    let summary = parse_summary_page(&fixture("summary_Swmarly.html"), &ExtractionStrategy::default());

    assert_eq!(
        summary.avatar.as_deref(),
        Some("//cdn.anime-planet.com/images/users/avatars/swmarly.jpg"),
        "data-src beats the blank src placeholder"
    );
    assert_eq!(
        summary.banner.as_deref(),
        Some("/images/users/banners/swmarly.jpg")
    );
    assert_eq!(
        summary.bio.as_deref(),
        Some("Slice-of-life enjoyer. Always one episode behind.")
    );
}

#[test]
fn summary_fixture_stats_and_synthesized_total() {
    let stats = parse_summary_page(&fixture("summary_Swmarly.html"), &ExtractionStrategy::default())
        .stats;

    assert_eq!(stats.watching, Some(3));
    assert_eq!(stats.completed, Some(10));
    assert_eq!(stats.on_hold, Some(0));
    assert_eq!(stats.dropped, Some(1));
    assert_eq!(stats.want_to_watch, Some(2));
    assert_eq!(stats.episodes_watched, None);
    assert_eq!(stats.total_entries, Some(16));
}

#[test]
fn explicit_total_is_kept() {
    let html = r#"
        <ul class="userStats">
          <li class="stat">4 Watching</li>
          <li class="stat">1,204 Episodes Watched</li>
          <li class="stat">Total entries: 99</li>
        </ul>"#;
    let stats = parse_summary_page(html, &ExtractionStrategy::default()).stats;

    assert_eq!(stats.watching, Some(4));
    assert_eq!(stats.episodes_watched, Some(1204));
    assert_eq!(stats.total_entries, Some(99));
    assert_eq!(stats.completed, None);
}

#[test]
fn first_value_per_stat_wins() {
    let html = r#"
        <div class="stats">
          <span class="statWatching">7 Watching</span>
          <span class="statWatchingAgain">8 Watching</span>
        </div>"#;
    let stats = parse_summary_page(html, &ExtractionStrategy::default()).stats;

    assert_eq!(stats.watching, Some(7));
    assert_eq!(stats.total_entries, Some(7));
}

#[test]
fn unrecognised_markup_yields_empty_summary() {
    let html = "<html><body><p>Scheduled maintenance</p><div class=\"stats\">soon</div></body></html>";
    let summary = parse_summary_page(html, &ExtractionStrategy::default());

    assert_eq!(summary.avatar, None);
    assert_eq!(summary.banner, None);
    assert_eq!(summary.bio, None);
    assert!(summary.stats.is_empty());
    assert_eq!(summary.stats.total_entries, None, "no total without any stat");
}

#[test]
fn avatar_falls_back_to_og_image() {
    let html = r#"<html><head><meta property="og:image" content="https://img.example/og.png"></head><body></body></html>"#;
    let summary = parse_summary_page(html, &ExtractionStrategy::default());
    assert_eq!(summary.avatar.as_deref(), Some("https://img.example/og.png"));
}
