//! DTOs for slug creation.

use serde::{Deserialize, Serialize};

use crate::application::services::CreateSlug;

/// Form body of `POST /new`.
///
/// Field names are the public form contract: `gurl` (or `url`) is the
/// primary destination, `burl` the secondary one, and `gcount` / `bcount`
/// their allotments. Everything is optional at this layer; counters that are
/// missing or not integers become 0.
#[derive(Debug, Default, Deserialize)]
pub struct NewSlugForm {
    pub gurl: Option<String>,
    pub url: Option<String>,
    pub burl: Option<String>,
    pub gcount: Option<String>,
    pub bcount: Option<String>,
}

/// Parses a counter field, treating anything unparsable as 0.
pub fn parse_count(raw: Option<&str>) -> i64 {
    raw.and_then(|v| v.trim().parse::<i64>().ok()).unwrap_or(0)
}

impl From<NewSlugForm> for CreateSlug {
    fn from(form: NewSlugForm) -> Self {
        let primary_url = form
            .gurl
            .filter(|u| !u.trim().is_empty())
            .or(form.url)
            .unwrap_or_default();

        CreateSlug {
            primary_url,
            secondary_url: form.burl,
            primary_remaining: parse_count(form.gcount.as_deref()),
            secondary_remaining: parse_count(form.bcount.as_deref()),
        }
    }
}

/// Response carrying a slug.
#[derive(Debug, Serialize, Deserialize)]
pub struct SlugResponse {
    pub slug: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_count() {
        assert_eq!(parse_count(Some("5")), 5);
        assert_eq!(parse_count(Some(" 12 ")), 12);
        assert_eq!(parse_count(Some("-3")), -3);
        assert_eq!(parse_count(Some("five")), 0);
        assert_eq!(parse_count(Some("")), 0);
        assert_eq!(parse_count(Some("99999999999999999999999")), 0);
        assert_eq!(parse_count(None), 0);
    }

    #[test]
    fn test_form_prefers_gurl_over_url() {
        let form = NewSlugForm {
            gurl: Some("https://good.example".to_string()),
            url: Some("https://other.example".to_string()),
            ..NewSlugForm::default()
        };

        let request = CreateSlug::from(form);
        assert_eq!(request.primary_url, "https://good.example");
    }

    #[test]
    fn test_form_falls_back_to_url_field() {
        let form = NewSlugForm {
            gurl: Some("".to_string()),
            url: Some("https://example.com".to_string()),
            ..NewSlugForm::default()
        };

        let request = CreateSlug::from(form);
        assert_eq!(request.primary_url, "https://example.com");
    }

    #[test]
    fn test_form_maps_counters() {
        let form = NewSlugForm {
            gurl: Some("https://good.example".to_string()),
            burl: Some("https://bad.example".to_string()),
            gcount: Some("3".to_string()),
            bcount: Some("oops".to_string()),
            ..NewSlugForm::default()
        };

        let request = CreateSlug::from(form);
        assert_eq!(request.secondary_url.as_deref(), Some("https://bad.example"));
        assert_eq!(request.primary_remaining, 3);
        assert_eq!(request.secondary_remaining, 0);
    }

    #[test]
    fn test_empty_form_has_empty_primary() {
        let request = CreateSlug::from(NewSlugForm::default());
        assert!(request.primary_url.is_empty());
    }
}
