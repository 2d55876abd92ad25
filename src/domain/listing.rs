use serde::{Deserialize, Serialize};

/// One app returned by the storefront search endpoint. Upstream listing data
/// is inconsistent, so every field is optional and defaults instead of
/// failing the decode.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AppListing {
    pub track_name: Option<String>,
    pub artist_name: Option<String>,
    pub user_rating_count: Option<u64>,
    pub average_user_rating: Option<f64>,
    pub primary_genre_name: Option<String>,
    pub release_date: Option<String>,
    pub current_version_release_date: Option<String>,
}

impl AppListing {
    pub fn title(&self) -> &str {
        self.track_name.as_deref().unwrap_or("")
    }

    pub fn rating_count(&self) -> u64 {
        self.user_rating_count.unwrap_or(0)
    }

    /// Last-activity timestamp: the current version's release date, falling
    /// back to the original release date.
    pub fn last_updated(&self) -> Option<&str> {
        self.current_version_release_date
            .as_deref()
            .or(self.release_date.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_default() {
        let listing: AppListing = serde_json::from_str("{}").unwrap();
        assert_eq!(listing.title(), "");
        assert_eq!(listing.rating_count(), 0);
        assert_eq!(listing.last_updated(), None);
    }

    #[test]
    fn last_updated_prefers_current_version() {
        let listing = AppListing {
            release_date: Some("2020-01-01T00:00:00Z".to_string()),
            current_version_release_date: Some("2024-06-01T00:00:00Z".to_string()),
            ..AppListing::default()
        };
        assert_eq!(listing.last_updated(), Some("2024-06-01T00:00:00Z"));

        let listing = AppListing {
            release_date: Some("2020-01-01T00:00:00Z".to_string()),
            ..AppListing::default()
        };
        assert_eq!(listing.last_updated(), Some("2020-01-01T00:00:00Z"));
    }
}
