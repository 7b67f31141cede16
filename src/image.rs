//! Best-effort background image resolution for feed entries.
//!
//! Feeds are inconsistent about image metadata: some supply a media group
//! with an explicit URL, others only embed an `<img>` tag somewhere in the
//! entry's HTML content, and plenty supply neither. Whatever URL turns up
//! is only accepted with a known image file extension, to avoid picking up
//! tracking pixels and ads.

use crate::feed::FeedEntry;

const ALLOWED_EXTENSIONS: [&str; 4] = ["jpg", "png", "gif", "jpeg"];

/// Resolve a background image URL for an entry, if it has a usable one.
/// Never fails: an entry with no discoverable image is a normal case.
pub fn resolve_image(entry: &FeedEntry) -> Option<&str> {
    let url = media_group_url(entry).or_else(|| first_img_src(&entry.content))?;

    if has_image_extension(url) {
        Some(url)
    } else {
        None
    }
}

fn media_group_url(entry: &FeedEntry) -> Option<&str> {
    entry
        .media_groups
        .as_ref()?
        .first()?
        .contents
        .first()
        .map(|content| content.url.as_str())
}

/// Scan an HTML fragment for the first `<img>` tag's `src` value. This is
/// deliberately not an HTML parser; it only needs to cope with the markup
/// feeds actually emit.
fn first_img_src(html: &str) -> Option<&str> {
    let tag_start = find_ascii_ci(html, "<img")?;
    let tag = &html[tag_start..];
    let tag = match tag.find('>') {
        Some(end) => &tag[..end],
        None => tag,
    };

    let src = find_ascii_ci(tag, "src")?;
    let after_src = &tag[src + 3..];
    let eq = after_src.find('=')?;
    let value = after_src[eq + 1..].trim_start();

    match value.chars().next()? {
        quote @ ('"' | '\'') => {
            let inner = &value[1..];
            let end = inner.find(quote)?;
            Some(&inner[..end])
        }
        _ => {
            let end = value
                .find(|c: char| c.is_whitespace())
                .unwrap_or(value.len());
            Some(&value[..end])
        }
    }
}

/// The extension check mirrors a plain "text after the last dot"
/// comparison and is case-sensitive on purpose: the allow-list matches
/// how feed CDNs actually name files.
fn has_image_extension(url: &str) -> bool {
    match url.rsplit('.').next() {
        Some(ext) => ALLOWED_EXTENSIONS.contains(&ext),
        None => false,
    }
}

fn find_ascii_ci(haystack: &str, needle: &str) -> Option<usize> {
    let h = haystack.as_bytes();
    let n = needle.as_bytes();
    if n.is_empty() || h.len() < n.len() {
        return None;
    }
    (0..=h.len() - n.len()).find(|&i| h[i..i + n.len()].eq_ignore_ascii_case(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::{MediaContent, MediaGroup};

    fn entry_with(content: &str, media_groups: Option<Vec<MediaGroup>>) -> FeedEntry {
        FeedEntry {
            title: "t".to_string(),
            content: content.to_string(),
            content_snippet: String::new(),
            published_date: None,
            link: "http://example.com/e".to_string(),
            media_groups,
        }
    }

    fn media(url: &str) -> Vec<MediaGroup> {
        vec![MediaGroup {
            contents: vec![MediaContent {
                url: url.to_string(),
            }],
        }]
    }

    #[test]
    fn test_media_group_url_is_preferred() {
        let entry = entry_with(
            "<p><img src='http://x/fallback.gif'></p>",
            Some(media("http://x/a.png")),
        );
        assert_eq!(resolve_image(&entry), Some("http://x/a.png"));
    }

    #[test]
    fn test_falls_back_to_img_tag_in_content() {
        let entry = entry_with("<p><img src='http://x/b.gif'></p>", None);
        assert_eq!(resolve_image(&entry), Some("http://x/b.gif"));
    }

    #[test]
    fn test_double_quoted_src() {
        let entry = entry_with(r#"<div><img alt="pic" src="http://x/c.jpeg"></div>"#, None);
        assert_eq!(resolve_image(&entry), Some("http://x/c.jpeg"));
    }

    #[test]
    fn test_unquoted_src() {
        let entry = entry_with("<img src=http://x/d.jpg width=100>", None);
        assert_eq!(resolve_image(&entry), Some("http://x/d.jpg"));
    }

    #[test]
    fn test_uppercase_img_tag() {
        let entry = entry_with(r#"<IMG SRC="http://x/e.png">"#, None);
        assert_eq!(resolve_image(&entry), Some("http://x/e.png"));
    }

    #[test]
    fn test_disallowed_extension_yields_no_image() {
        let entry = entry_with("<img src='http://x/malware.exe'>", None);
        assert_eq!(resolve_image(&entry), None);
    }

    #[test]
    fn test_uppercase_extension_is_rejected() {
        // The allow-list is case-sensitive
        let entry = entry_with("<img src='http://x/f.PNG'>", None);
        assert_eq!(resolve_image(&entry), None);
    }

    #[test]
    fn test_media_group_with_bad_extension_does_not_fall_through() {
        let entry = entry_with(
            "<img src='http://x/good.jpg'>",
            Some(media("http://x/banner.svg")),
        );
        assert_eq!(resolve_image(&entry), None);
    }

    #[test]
    fn test_no_media_and_no_img_tag_is_not_an_error() {
        let entry = entry_with("<p>Just words, no pictures.</p>", None);
        assert_eq!(resolve_image(&entry), None);
    }

    #[test]
    fn test_empty_media_groups_falls_back_to_content() {
        let entry = entry_with("<img src='http://x/g.jpg'>", Some(vec![]));
        assert_eq!(resolve_image(&entry), Some("http://x/g.jpg"));
    }

    #[test]
    fn test_media_group_with_no_contents_falls_back() {
        let entry = entry_with(
            "<img src='http://x/h.png'>",
            Some(vec![MediaGroup { contents: vec![] }]),
        );
        assert_eq!(resolve_image(&entry), Some("http://x/h.png"));
    }

    #[test]
    fn test_img_tag_without_src() {
        let entry = entry_with("<img class='lazy'>", None);
        assert_eq!(resolve_image(&entry), None);
    }

    #[test]
    fn test_empty_content() {
        let entry = entry_with("", None);
        assert_eq!(resolve_image(&entry), None);
    }

    #[test]
    fn test_url_without_extension() {
        let entry = entry_with("<img src='http://x/no-dot-here'>", None);
        assert_eq!(resolve_image(&entry), None);
    }

    #[test]
    fn test_first_of_multiple_images_wins() {
        let entry = entry_with(
            "<img src='http://x/first.jpg'><img src='http://x/second.png'>",
            None,
        );
        assert_eq!(resolve_image(&entry), Some("http://x/first.jpg"));
    }
}
