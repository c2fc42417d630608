use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{CandidateDetail, DirectoryError, KnownForWork, PeopleDirectory, PopularPage, RawCandidate};

/// In-memory directory for pipeline tests. Records detail lookups in call order.
#[derive(Default)]
pub struct FakeDirectory {
    pages: HashMap<u32, Vec<RawCandidate>>,
    details: HashMap<u64, CandidateDetail>,
    failing_pages: Vec<u32>,
    detail_calls: Mutex<Vec<u64>>,
}

impl FakeDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page(mut self, page: u32, people: Vec<RawCandidate>) -> Self {
        self.pages.insert(page, people);
        self
    }

    pub fn with_detail(mut self, id: u64, birth_date: Option<&str>, place_of_birth: Option<&str>) -> Self {
        self.details.insert(
            id,
            CandidateDetail {
                birth_date: birth_date.map(str::to_string),
                place_of_birth: place_of_birth.map(str::to_string),
            },
        );
        self
    }

    pub fn with_failing_page(mut self, page: u32) -> Self {
        self.failing_pages.push(page);
        self
    }

    pub fn detail_calls(&self) -> Vec<u64> {
        self.detail_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl PeopleDirectory for FakeDirectory {
    async fn popular_page(&self, page: u32) -> Result<PopularPage, DirectoryError> {
        if self.failing_pages.contains(&page) {
            return Err(DirectoryError::Status {
                status: 503,
                resource: format!("popular page {page}"),
            });
        }
        Ok(PopularPage {
            page,
            total_pages: self.pages.len() as u32,
            results: self.pages.get(&page).cloned().unwrap_or_default(),
        })
    }

    async fn person_details(&self, id: u64) -> Result<CandidateDetail, DirectoryError> {
        self.detail_calls.lock().unwrap().push(id);
        Ok(self.details.get(&id).cloned().unwrap_or_default())
    }
}

pub fn person(id: u64, gender: u8, photo: bool, work: &str) -> RawCandidate {
    RawCandidate {
        id,
        name: format!("Person {id}"),
        profile_path: photo.then(|| format!("/p{id}.jpg")),
        gender,
        known_for: vec![KnownForWork {
            title: Some(work.to_string()),
            name: None,
        }],
        popularity: 100.0 - id as f64 / 10.0,
    }
}
