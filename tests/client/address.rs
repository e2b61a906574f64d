use anime_garden::{GardenError, ListingPage, StatusSlug, listing_address, page_address, summary_address};

use crate::common::anime_planet;

#[test]
fn summary_address_shape() {
    let url = summary_address(&anime_planet(), "Swmarly").unwrap();
    assert_eq!(url.as_str(), "https://www.anime-planet.com/users/Swmarly/anime");
}

#[test]
fn listing_address_shape() {
    let url =
        listing_address(&anime_planet(), "Swmarly", StatusSlug::OnHold.remote_id(), 3).unwrap();
    assert_eq!(
        url.as_str(),
        "https://www.anime-planet.com/users/Swmarly/anime?ajax=1&status=5&page=3"
    );
}

#[test]
fn listing_page_defaults_to_first() {
    let listing = ListingPage {
        status: "2".into(),
        page: None,
    };
    let url = page_address(&anime_planet(), "Swmarly", Some(&listing)).unwrap();
    assert_eq!(url.query(), Some("ajax=1&status=2&page=1"));
}

#[test]
fn caller_values_are_encoded() {
    let url = listing_address(&anime_planet(), "a b/c?d", "1&x=2", 1).unwrap();
    assert_eq!(url.path(), "/users/a%20b%2Fc%3Fd/anime");
    assert_eq!(url.query(), Some("ajax=1&status=1%26x%3D2&page=1"));
}

#[test]
fn dot_usernames_are_rejected() {
    for name in [".", ".."] {
        let err = summary_address(&anime_planet(), name).unwrap_err();
        assert!(matches!(err, GardenError::InvalidParams(_)), "{name}: {err:?}");
        let err = listing_address(&anime_planet(), name, "1", 1).unwrap_err();
        assert!(matches!(err, GardenError::InvalidParams(_)), "{name}: {err:?}");
    }

    // Only exact dot segments are special.
    let url = summary_address(&anime_planet(), "...").unwrap();
    assert_eq!(url.path(), "/users/.../anime");
    let url = summary_address(&anime_planet(), ".hidden").unwrap();
    assert_eq!(url.path(), "/users/.hidden/anime");
}

#[test]
fn site_path_is_kept() {
    let site = url::Url::parse("http://127.0.0.1:9000/mirror/").unwrap();
    let url = summary_address(&site, "Swmarly").unwrap();
    assert_eq!(url.as_str(), "http://127.0.0.1:9000/mirror/users/Swmarly/anime");
}

#[test]
fn status_ids_match_upstream() {
    let ids: Vec<_> = StatusSlug::ALL.iter().map(|s| s.remote_id()).collect();
    assert_eq!(ids, ["2", "1", "5", "3", "4"]);
}
