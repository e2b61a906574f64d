use std::borrow::Cow;

use serde_json::Value;

/// Listing pages requested with `ajax=1` sometimes come back as a JSON object carrying the
/// markup. Return the markup in either case.
pub(crate) fn unwrap_ajax_body(body: &str) -> Cow<'_, str> {
    let trimmed = body.trim_start();
    if !trimmed.starts_with('{') {
        return Cow::Borrowed(body);
    }
    let Ok(Value::Object(map)) = serde_json::from_str::<Value>(trimmed) else {
        return Cow::Borrowed(body);
    };
    ["html", "content", "body"]
        .iter()
        .find_map(|key| map.get(*key).and_then(Value::as_str))
        .map_or(Cow::Borrowed(body), |html| Cow::Owned(html.to_string()))
}

/// Join text nodes and collapse every whitespace run into a single space.
pub(crate) fn collapse_whitespace<'a>(parts: impl Iterator<Item = &'a str>) -> String {
    let mut out = String::new();
    for word in parts.flat_map(str::split_whitespace) {
        if !out.is_empty() {
            out.push(' ');
        }
        out.push_str(word);
    }
    out
}

/// First run of digits in `text` (`1,234` reads as 1234).
pub(crate) fn first_number(text: &str) -> Option<u64> {
    let start = text.find(|c: char| c.is_ascii_digit())?;
    let rest = &text[start..];
    let bytes = rest.as_bytes();

    let mut digits = String::new();
    let mut i = 0;
    while i < bytes.len() {
        match bytes[i] {
            b if b.is_ascii_digit() => digits.push(char::from(b)),
            b',' if bytes.get(i + 1).is_some_and(u8::is_ascii_digit) => {}
            _ => break,
        }
        i += 1;
    }
    digits.parse().ok()
}

pub(crate) fn truncate(s: &str, n: usize) -> String {
    if s.len() <= n {
        return s.to_string();
    }
    let mut end = n;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    format!("{} …[trunc]", &s[..end])
}
