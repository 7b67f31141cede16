use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};

/// Envelope returned by the feed-conversion API.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiResponse {
    #[serde(rename = "responseData")]
    pub response_data: ResponseData,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResponseData {
    pub feed: Feed,
}

/// One converted feed: a title plus its entries, in the order the
/// conversion service returned them.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct Feed {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub entries: Vec<FeedEntry>,
}

/// A single feed entry as produced by the conversion API. Read-only on
/// our side; `content` is an HTML fragment.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub content_snippet: String,
    #[serde(default, deserialize_with = "deserialize_published")]
    pub published_date: Option<DateTime<Utc>>,
    #[serde(default)]
    pub link: String,
    #[serde(default)]
    pub media_groups: Option<Vec<MediaGroup>>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MediaGroup {
    #[serde(default)]
    pub contents: Vec<MediaContent>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct MediaContent {
    #[serde(default)]
    pub url: String,
}

/// The conversion API emits RFC 2822 date strings. Dates are best-effort
/// metadata, so anything unparseable becomes `None` rather than failing
/// the whole payload.
fn deserialize_published<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(parse_published))
}

pub fn parse_published(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc2822(raw)
        .or_else(|_| DateTime::parse_from_rfc3339(raw))
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_parse_rfc2822_published_date() {
        let parsed = parse_published("Mon, 13 Apr 2015 17:00:00 +0000").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2015, 4, 13, 17, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_rfc3339_published_date() {
        let parsed = parse_published("2015-04-13T17:00:00Z").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2015, 4, 13, 17, 0, 0).unwrap());
    }

    #[test]
    fn test_parse_garbage_published_date() {
        assert_eq!(parse_published("yesterday-ish"), None);
    }

    #[test]
    fn test_deserialize_full_api_response() {
        let json = r#"{
            "responseData": {
                "feed": {
                    "title": "Example Feed",
                    "entries": [
                        {
                            "title": "First Post",
                            "content": "<p>Hello <img src='http://x/a.png'></p>",
                            "contentSnippet": "Hello",
                            "publishedDate": "Mon, 13 Apr 2015 17:00:00 +0000",
                            "link": "http://example.com/first",
                            "mediaGroups": [
                                {"contents": [{"url": "http://x/hero.jpg"}]}
                            ]
                        }
                    ]
                }
            }
        }"#;

        let response: ApiResponse = serde_json::from_str(json).unwrap();
        let feed = response.response_data.feed;

        assert_eq!(feed.title, "Example Feed");
        assert_eq!(feed.entries.len(), 1);

        let entry = &feed.entries[0];
        assert_eq!(entry.title, "First Post");
        assert_eq!(entry.content_snippet, "Hello");
        assert_eq!(entry.link, "http://example.com/first");
        assert!(entry.published_date.is_some());
        assert_eq!(
            entry.media_groups.as_ref().unwrap()[0].contents[0].url,
            "http://x/hero.jpg"
        );
    }

    #[test]
    fn test_deserialize_entry_with_missing_fields() {
        let json = r#"{"title": "Bare"}"#;
        let entry: FeedEntry = serde_json::from_str(json).unwrap();

        assert_eq!(entry.title, "Bare");
        assert_eq!(entry.content, "");
        assert_eq!(entry.published_date, None);
        assert!(entry.media_groups.is_none());
    }

    #[test]
    fn test_deserialize_entry_with_unparseable_date() {
        let json = r#"{"title": "Odd", "publishedDate": "not a date"}"#;
        let entry: FeedEntry = serde_json::from_str(json).unwrap();
        assert_eq!(entry.published_date, None);
    }
}
