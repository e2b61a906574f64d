use anime_garden::ProfileQuery;

#[test]
fn parses_known_keys() {
    let q = ProfileQuery::from_query("?username=Swm%20arly&status=5&page=2&cacheBust=99&other=x");
    assert_eq!(q.username.as_deref(), Some("Swm arly"));
    assert_eq!(q.status.as_deref(), Some("5"));
    assert_eq!(q.page.as_deref(), Some("2"));
    assert_eq!(q.cache_bust.as_deref(), Some("99"));
}

#[test]
fn empty_query_is_default() {
    assert_eq!(ProfileQuery::from_query(""), ProfileQuery::default());
}

#[test]
fn deserializes_from_camel_case_json() {
    let q: ProfileQuery =
        serde_json::from_str(r#"{"username": "Swmarly", "cacheBust": "1"}"#).unwrap();
    assert_eq!(q.cache_bust.as_deref(), Some("1"));
    assert_eq!(q.status, None);
}
