//! Candidate Pool Builder — narrows the directory listing to a seeded shortlist.
//!
//! Algorithm:
//! 1. Fetch the configured pages concurrently; concatenate in page order
//! 2. Drop repeated ids (listings shift between pages), keeping the first occurrence
//! 3. Apply the listing checks (photo, gender)
//! 4. Seeded-sample `oversample_count` candidates for (date, mode, salt)
//! 5. Walk the sample in order, fetching details one at a time, until
//!    `shortlist_target` candidates pass the full eligibility chain
//! 6. Project accepted candidates to `ShortlistEntry`

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;
use futures::future::try_join_all;
use tracing::{debug, info};

use crate::directory::{DirectoryError, PeopleDirectory, RawCandidate};
use crate::selection::eligibility::{EligibilityFilter, EligibleCandidate};
use crate::selection::policy::PipelineConfig;
use crate::selection::rng::SelectionSeed;
use crate::selection::sampler::seeded_sample;
use crate::selection::{GameMode, ShortlistEntry};

impl From<EligibleCandidate> for ShortlistEntry {
    fn from(eligible: EligibleCandidate) -> Self {
        let candidate = eligible.candidate();
        ShortlistEntry {
            id: candidate.id,
            name: candidate.name.clone(),
            image_url: candidate.image_url(),
            known_for: candidate.known_for_label(),
        }
    }
}

pub struct PoolBuilder {
    directory: Arc<dyn PeopleDirectory>,
    config: PipelineConfig,
}

impl PoolBuilder {
    pub fn new(directory: Arc<dyn PeopleDirectory>, config: PipelineConfig) -> Self {
        Self { directory, config }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// All listed people across the configured pages, in page order then in-page order.
    pub async fn fetch_candidates(&self) -> Result<Vec<RawCandidate>, DirectoryError> {
        let pages = try_join_all(
            self.config
                .pages
                .iter()
                .map(|&page| self.directory.popular_page(page)),
        )
        .await?;

        let mut seen = HashSet::new();
        Ok(pages
            .into_iter()
            .flat_map(|page| page.results)
            .filter(|candidate| seen.insert(candidate.id))
            .collect())
    }

    /// Builds the shortlist for one day and mode. `today` anchors the age checks.
    pub async fn build(
        &self,
        date: NaiveDate,
        mode: GameMode,
        today: NaiveDate,
    ) -> Result<Vec<ShortlistEntry>, DirectoryError> {
        let filter = EligibilityFilter::new(&self.config, mode, today);

        let listed = self.fetch_candidates().await?;
        let listed_count = listed.len();
        let pool: Vec<RawCandidate> = listed
            .into_iter()
            .filter(|candidate| filter.check_listing(candidate).is_ok())
            .collect();

        let seed = SelectionSeed::new(date, mode, &self.config.seed_version_salt);
        let mut rng = seed.rng();
        let sampled = seeded_sample(&pool, self.config.oversample_count(), &mut rng);

        info!(
            "Pool for {}: {} listed, {} with photo and matching gender, {} sampled",
            seed.as_str(),
            listed_count,
            pool.len(),
            sampled.len()
        );

        let target = self.config.shortlist_target;
        let mut accepted: Vec<EligibleCandidate> = Vec::with_capacity(target);
        let mut inspected = 0usize;

        for candidate in sampled {
            if accepted.len() >= target {
                break;
            }
            inspected += 1;

            let detail = self.directory.person_details(candidate.id).await?;
            let (id, name) = (candidate.id, candidate.name.clone());
            match filter.admit(candidate, &detail) {
                Ok(eligible) => accepted.push(eligible),
                Err(reason) => debug!("Rejected {name} ({id}): {reason}"),
            }
        }

        info!(
            "Shortlist for {}: {} accepted after {} detail lookups",
            seed.as_str(),
            accepted.len(),
            inspected
        );

        Ok(accepted.into_iter().map(ShortlistEntry::from).collect())
    }
}
