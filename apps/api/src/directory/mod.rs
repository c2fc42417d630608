//! People directory — the primary candidate data source.
//!
//! The selection pipeline only talks to the `PeopleDirectory` trait. `TmdbClient`
//! is the production backend; tests plug in an in-memory directory.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[cfg(test)]
pub mod fake;
pub mod tmdb;

pub use tmdb::TmdbClient;

const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";
const IMAGE_SIZE: &str = "w342";
pub const PLACEHOLDER_IMAGE: &str = "/placeholder-person.svg";
pub const KNOWN_FOR_FALLBACK: &str = "Actor/Actress";

#[derive(Debug, Error)]
pub enum DirectoryError {
    #[error("Directory credential is not configured")]
    MissingCredential,

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Directory returned status {status} for {resource}")]
    Status { status: u16, resource: String },
}

// ────────────────────────────────────────────────────────────────────────────
// Data models
// ────────────────────────────────────────────────────────────────────────────

/// Gender as coded by the directory: 1 = female, 2 = male, anything else unknown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gender {
    Female,
    Male,
    Unknown,
}

impl Gender {
    pub fn from_code(code: u8) -> Self {
        match code {
            1 => Gender::Female,
            2 => Gender::Male,
            _ => Gender::Unknown,
        }
    }
}

/// A title the person is known for. Movies carry `title`, TV shows carry `name`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KnownForWork {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A person as listed on a directory page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawCandidate {
    pub id: u64,
    pub name: String,
    pub profile_path: Option<String>,
    #[serde(default)]
    pub gender: u8,
    #[serde(default)]
    pub known_for: Vec<KnownForWork>,
    #[serde(default)]
    pub popularity: f64,
}

impl RawCandidate {
    pub fn gender(&self) -> Gender {
        Gender::from_code(self.gender)
    }

    pub fn has_photo(&self) -> bool {
        self.profile_path.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Display string for the first known-for work, falling back to a generic label.
    pub fn known_for_label(&self) -> String {
        self.known_for
            .first()
            .and_then(|work| {
                [work.title.as_deref(), work.name.as_deref()]
                    .into_iter()
                    .flatten()
                    .find(|s| !s.is_empty())
            })
            .unwrap_or(KNOWN_FOR_FALLBACK)
            .to_string()
    }

    pub fn image_url(&self) -> String {
        image_url(self.profile_path.as_deref())
    }
}

/// One page of the popular-people listing.
#[derive(Debug, Clone, Deserialize)]
pub struct PopularPage {
    pub page: u32,
    pub total_pages: u32,
    pub results: Vec<RawCandidate>,
}

/// Lazily fetched enrichment for a single candidate. Both fields are commonly absent.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CandidateDetail {
    #[serde(rename = "birthday", default)]
    pub birth_date: Option<String>,
    #[serde(default)]
    pub place_of_birth: Option<String>,
}

/// Resolves a profile path to a full image URL, or the placeholder when missing.
pub fn image_url(profile_path: Option<&str>) -> String {
    match profile_path {
        Some(path) if !path.is_empty() => format!("{IMAGE_BASE_URL}/{IMAGE_SIZE}{path}"),
        _ => PLACEHOLDER_IMAGE.to_string(),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

#[async_trait]
pub trait PeopleDirectory: Send + Sync {
    async fn popular_page(&self, page: u32) -> Result<PopularPage, DirectoryError>;

    async fn person_details(&self, id: u64) -> Result<CandidateDetail, DirectoryError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn candidate(known_for: Vec<KnownForWork>) -> RawCandidate {
        RawCandidate {
            id: 1,
            name: "Test Person".to_string(),
            profile_path: Some("/abc.jpg".to_string()),
            gender: 1,
            known_for,
            popularity: 10.0,
        }
    }

    #[test]
    fn test_gender_codes() {
        assert_eq!(Gender::from_code(1), Gender::Female);
        assert_eq!(Gender::from_code(2), Gender::Male);
        assert_eq!(Gender::from_code(0), Gender::Unknown);
        assert_eq!(Gender::from_code(3), Gender::Unknown);
    }

    #[test]
    fn test_image_url_resolves_path() {
        assert_eq!(
            image_url(Some("/abc.jpg")),
            "https://image.tmdb.org/t/p/w342/abc.jpg"
        );
    }

    #[test]
    fn test_image_url_placeholder_when_missing() {
        assert_eq!(image_url(None), PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_known_for_prefers_title_then_name() {
        let movie = candidate(vec![KnownForWork {
            title: Some("Dune".to_string()),
            name: None,
        }]);
        assert_eq!(movie.known_for_label(), "Dune");

        let show = candidate(vec![KnownForWork {
            title: None,
            name: Some("Euphoria".to_string()),
        }]);
        assert_eq!(show.known_for_label(), "Euphoria");
    }

    #[test]
    fn test_known_for_fallback_when_empty() {
        assert_eq!(candidate(vec![]).known_for_label(), KNOWN_FOR_FALLBACK);
        assert_eq!(
            candidate(vec![KnownForWork::default()]).known_for_label(),
            KNOWN_FOR_FALLBACK
        );
    }

    #[test]
    fn test_popular_page_deserializes_directory_payload() {
        let json = r#"{
            "page": 2,
            "total_pages": 500,
            "results": [
                {
                    "id": 1245,
                    "name": "Scarlett Johansson",
                    "profile_path": "/6NsMbJXRlDZuDzatN2akFdGuTvx.jpg",
                    "gender": 1,
                    "popularity": 88.2,
                    "known_for_department": "Acting",
                    "known_for": [{"title": "The Avengers", "media_type": "movie"}]
                },
                {
                    "id": 99,
                    "name": "No Photo",
                    "profile_path": null,
                    "gender": 2,
                    "popularity": 1.0,
                    "known_for": []
                }
            ]
        }"#;

        let page: PopularPage = serde_json::from_str(json).unwrap();
        assert_eq!(page.page, 2);
        assert_eq!(page.results.len(), 2);
        assert_eq!(page.results[0].gender(), Gender::Female);
        assert_eq!(page.results[0].known_for_label(), "The Avengers");
        assert!(!page.results[1].has_photo());
    }

    #[test]
    fn test_candidate_detail_tolerates_nulls() {
        let json = r#"{"id": 5, "birthday": null, "place_of_birth": null, "name": "X"}"#;
        let detail: CandidateDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail, CandidateDetail::default());

        let json = r#"{"birthday": "1984-11-22", "place_of_birth": "New York City, New York, USA"}"#;
        let detail: CandidateDetail = serde_json::from_str(json).unwrap();
        assert_eq!(detail.birth_date.as_deref(), Some("1984-11-22"));
    }
}
