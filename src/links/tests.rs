// Link extraction tests.

use super::*;

fn as_strings(links: &[CanonicalUrl]) -> Vec<String> {
    links.iter().map(|link| link.as_str().to_string()).collect()
}

#[test]
fn test_extract_links_empty_text() {
    assert!(extract_links("").is_empty());
    assert!(extract_links("no links in here").is_empty());
}

#[test]
fn test_extract_links_basic() {
    let links = extract_links("check this https://www.facebook.com/somepage/posts/123 out");
    assert_eq!(
        as_strings(&links),
        vec!["https://www.facebook.com/somepage/posts/123"]
    );
}

#[test]
fn test_extract_links_strips_trailing_punctuation() {
    let text = "(see https://www.facebook.com/watch?v=42) and \"https://fb.watch/abc/\". Also https://m.facebook.com/story.php?id=1!";
    let links = extract_links(text);
    assert_eq!(
        as_strings(&links),
        vec![
            "https://www.facebook.com/watch?v=42",
            "https://fb.watch/abc/",
            "https://m.facebook.com/story.php?id=1",
        ]
    );
}

#[test]
fn test_extract_links_strips_fragment() {
    let links = extract_links("https://www.facebook.com/groups/1/permalink/2/#comment");
    assert_eq!(
        as_strings(&links),
        vec!["https://www.facebook.com/groups/1/permalink/2/"]
    );
}

#[test]
fn test_extract_links_dedupes_in_first_seen_order() {
    let text = "https://www.facebook.com/b https://www.facebook.com/a https://www.facebook.com/b#x https://www.facebook.com/a";
    let links = extract_links(text);
    assert_eq!(
        as_strings(&links),
        vec!["https://www.facebook.com/b", "https://www.facebook.com/a"]
    );
}

#[test]
fn test_extract_links_dedup_is_case_sensitive_on_path() {
    let links = extract_links("https://www.facebook.com/Page https://www.facebook.com/page");
    assert_eq!(links.len(), 2);
}

#[test]
fn test_extract_links_case_insensitive_host() {
    let links = extract_links("HTTPS://WWW.FACEBOOK.COM/Page");
    assert_eq!(as_strings(&links), vec!["https://www.facebook.com/Page"]);
}

#[test]
fn test_extract_links_ignores_other_domains() {
    let text = "https://example.com/facebook.com/x https://notfacebook.com/x https://www.youtube.com/watch?v=1";
    assert!(extract_links(text).is_empty());
}

#[test]
fn test_extract_links_requires_path() {
    assert!(extract_links("visit https://facebook.com today").is_empty());
}

#[test]
fn test_extract_links_accepts_alias_domains() {
    let links = extract_links("https://fb.com/page https://business.facebook.com/page https://fb.watch/xyz");
    assert_eq!(
        as_strings(&links),
        vec![
            "https://fb.com/page",
            "https://business.facebook.com/page",
            "https://fb.watch/xyz",
        ]
    );
}

#[test]
fn test_extract_links_unwraps_forwarding_wrapper() {
    let text = "https://l.facebook.com/l.php?u=https%3A%2F%2Fwww.facebook.com%2Fevents%2F99%2F&h=AT0";
    let links = extract_links(text);
    assert_eq!(as_strings(&links), vec!["https://www.facebook.com/events/99/"]);
}

#[test]
fn test_extract_links_drops_wrapper_to_foreign_domain() {
    let text = "https://l.facebook.com/l.php?u=https%3A%2F%2Fexample.com%2F&h=AT0";
    assert!(extract_links(text).is_empty());
}

#[test]
fn test_extract_links_keeps_forwarding_host_without_destination() {
    assert_eq!(
        as_strings(&extract_links("https://l.facebook.com/some/page")),
        vec!["https://l.facebook.com/some/page"]
    );
    assert_eq!(
        as_strings(&extract_links("https://l.facebook.com/l.php?h=AT0")),
        vec!["https://l.facebook.com/l.php?h=AT0"]
    );
}

#[test]
fn test_extract_links_drops_wrapper_with_unparsable_destination() {
    assert!(extract_links("https://l.facebook.com/l.php?u=not%20a%20url").is_empty());
}

#[test]
fn test_extract_links_strips_punctuation_exposed_by_normalization() {
    assert_eq!(
        as_strings(&extract_links("https://www.facebook.com/x?#frag")),
        vec!["https://www.facebook.com/x"]
    );
    assert_eq!(
        as_strings(&extract_links("https://www.facebook.com/a.#b")),
        vec!["https://www.facebook.com/a"]
    );
}

#[test]
fn test_normalize_unwraps_nested_wrappers() {
    let inner = "https://www.facebook.com/reel/777";
    let once = format!("https://l.facebook.com/l.php?u={}", urlencoding::encode(inner));
    let twice = format!("https://lm.facebook.com/l.php?u={}", urlencoding::encode(&once));
    let normalized = normalize_facebook_url(&twice).expect("nested wrapper should unwrap");
    assert_eq!(normalized.as_str(), inner);
}

#[test]
fn test_normalize_unwraps_double_encoded_wrapper() {
    let raw = "https://l.facebook.com/l.php?u=https%253A%252F%252Fwww.facebook.com%252Fphoto%252F1";
    let normalized = normalize_facebook_url(raw).expect("double-encoded wrapper should unwrap");
    assert_eq!(normalized.as_str(), "https://www.facebook.com/photo/1");
}

#[test]
fn test_normalize_caps_forwarding_depth() {
    let mut url = "https://www.facebook.com/deep".to_string();
    for _ in 0..(MAX_FORWARDING_DEPTH + 1) {
        // Encode twice so each level survives the query parser and the second decode
        let encoded = urlencoding::encode(&urlencoding::encode(&url).into_owned()).into_owned();
        url = format!("https://l.facebook.com/l.php?u={}", encoded);
    }
    assert!(normalize_facebook_url(&url).is_none());
}

#[test]
fn test_normalize_rejects_malformed() {
    assert!(normalize_facebook_url("not a url").is_none());
    assert!(normalize_facebook_url("https://").is_none());
    assert!(normalize_facebook_url("ftp://www.facebook.com/file").is_none());
}

#[test]
fn test_is_facebook_host() {
    assert!(is_facebook_host("facebook.com"));
    assert!(is_facebook_host("www.facebook.com"));
    assert!(is_facebook_host("web.facebook.com"));
    assert!(is_facebook_host("fb.watch"));
    assert!(is_facebook_host("FB.COM"));
    assert!(!is_facebook_host("notfacebook.com"));
    assert!(!is_facebook_host("facebook.com.evil.org"));
    assert!(!is_facebook_host("fbcdn.net"));
}

#[test]
fn test_extract_links_is_idempotent() {
    let text = "a https://www.facebook.com/watch?v=1#t, b https://l.facebook.com/l.php?u=https%3A%2F%2Ffb.watch%2Fq%2F c https://m.facebook.com/story.php?story_fbid=2&id=3.";
    let first = extract_links(text);
    let joined = as_strings(&first).join(" ");
    let second = extract_links(&joined);
    assert_eq!(first, second);
    assert_eq!(first.len(), 3);

    for text in [
        "https://www.facebook.com/x?#frag",
        "https://www.facebook.com/a.#b",
        "https://l.facebook.com/some/page",
    ] {
        let first = extract_links(text);
        let second = extract_links(&as_strings(&first).join(" "));
        assert_eq!(first, second, "{}", text);
        assert_eq!(first.len(), 1, "{}", text);
    }
}

#[test]
fn test_extracted_hosts_are_always_in_target_set() {
    let text = "https://www.facebook.com/x https://l.facebook.com/l.php?u=https%3A%2F%2Fevil.org%2F https://sub.fb.watch/y";
    for link in extract_links(text) {
        assert!(is_facebook_host(link.host().unwrap_or_default()));
    }
}
