//! Eligibility Filter — the ordered AND-chain a candidate must pass.
//!
//! Order: photo → gender → age → birthplace. The first two only need the listing
//! record; the last two need a `CandidateDetail`, so the Pool Builder checks the
//! cheap half up front and the full chain after each detail fetch.

use chrono::{Datelike, NaiveDate};
use thiserror::Error;

use crate::directory::{CandidateDetail, RawCandidate};
use crate::selection::policy::{AgePolicy, PipelineConfig};
use crate::selection::GameMode;

/// Substrings that disqualify a birthplace outright. Checked before the allow-list.
const NON_WESTERN_REGIONS: &[&str] = &[
    "india", "mumbai", "delhi", "chennai", "kolkata", "bangalore", "hyderabad", "pune",
    "china", "beijing", "shanghai", "hong kong",
    "korea", "seoul", "busan",
    "japan", "tokyo", "osaka",
    "thailand", "bangkok",
    "philippines", "manila",
    "indonesia", "jakarta",
    "vietnam", "hanoi",
    "pakistan", "karachi", "lahore",
    "bangladesh", "dhaka",
    "malaysia", "singapore",
    "taiwan", "taipei",
    "nigeria", "lagos",
    "brazil", "mexico", "argentina",
];

const WESTERN_REGIONS: &[&str] = &[
    "usa", "united states", "u.s.", "america",
    "uk", "united kingdom", "england", "scotland", "wales", "ireland", "britain", "british",
    "canada", "australia", "new zealand",
    "california", "new york", "texas", "florida", "illinois", "pennsylvania", "ohio", "georgia",
    "michigan", "new jersey", "massachusetts", "washington", "arizona", "colorado", "tennessee",
    "north carolina",
    "los angeles", "chicago", "houston", "phoenix", "philadelphia", "san antonio", "san diego",
    "dallas", "brooklyn", "manhattan", "queens", "bronx", "hollywood", "beverly hills",
    "santa monica",
    "london", "manchester", "birmingham", "liverpool", "glasgow", "edinburgh", "dublin", "belfast",
    "sydney", "melbourne", "brisbane", "perth", "auckland",
    "toronto", "vancouver", "montreal", "calgary",
];

/// Why a candidate was dropped. Only used for logging and tests.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    #[error("no photo")]
    NoPhoto,
    #[error("gender does not match mode")]
    GenderMismatch,
    #[error("age unknown")]
    AgeUnknown,
    #[error("age {0} out of range")]
    AgeOutOfRange(i32),
    #[error("birthplace unknown")]
    BirthplaceUnknown,
    #[error("birthplace '{0}' not in allowed regions")]
    BirthplaceExcluded(String),
}

/// A candidate that passed the whole chain. Only `EligibilityFilter::admit` builds one.
#[derive(Debug, Clone)]
pub struct EligibleCandidate(RawCandidate);

impl EligibleCandidate {
    pub fn candidate(&self) -> &RawCandidate {
        &self.0
    }
}

/// Calendar age: year difference, minus one if the birthday hasn't come yet this year.
pub fn calculate_age(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

/// Parses a directory birth date (`YYYY-MM-DD`). Anything else counts as unknown.
pub fn parse_birth_date(raw: Option<&str>) -> Option<NaiveDate> {
    raw.map(str::trim)
        .filter(|s| !s.is_empty())
        .and_then(|s| NaiveDate::parse_from_str(s, "%Y-%m-%d").ok())
}

/// Case-insensitive substring match: deny-list wins, then the allow-list must hit.
pub fn is_western_birthplace(place_of_birth: &str) -> bool {
    let place = place_of_birth.to_lowercase();
    if NON_WESTERN_REGIONS.iter().any(|region| place.contains(region)) {
        return false;
    }
    WESTERN_REGIONS.iter().any(|region| place.contains(region))
}

pub struct EligibilityFilter<'a> {
    config: &'a PipelineConfig,
    mode: GameMode,
    today: NaiveDate,
}

impl<'a> EligibilityFilter<'a> {
    pub fn new(config: &'a PipelineConfig, mode: GameMode, today: NaiveDate) -> Self {
        Self {
            config,
            mode,
            today,
        }
    }

    /// Photo and gender checks. Needs no detail fetch.
    pub fn check_listing(&self, candidate: &RawCandidate) -> Result<(), Rejection> {
        if !candidate.has_photo() {
            return Err(Rejection::NoPhoto);
        }
        if candidate.gender() != self.mode.gender() {
            return Err(Rejection::GenderMismatch);
        }
        Ok(())
    }

    pub fn check_age(&self, detail: &CandidateDetail) -> Result<(), Rejection> {
        match parse_birth_date(detail.birth_date.as_deref()) {
            None => match self.config.age_policy {
                AgePolicy::Permissive => Ok(()),
                AgePolicy::Strict => Err(Rejection::AgeUnknown),
            },
            Some(birth) => {
                let age = calculate_age(birth, self.today);
                let in_range = u32::try_from(age)
                    .map(|a| self.config.age_range.contains(a))
                    .unwrap_or(false);
                if in_range {
                    Ok(())
                } else {
                    Err(Rejection::AgeOutOfRange(age))
                }
            }
        }
    }

    pub fn check_birthplace(&self, detail: &CandidateDetail) -> Result<(), Rejection> {
        if !self.config.require_western_birthplace {
            return Ok(());
        }
        match detail.place_of_birth.as_deref().map(str::trim) {
            None | Some("") => Err(Rejection::BirthplaceUnknown),
            Some(place) if is_western_birthplace(place) => Ok(()),
            Some(place) => Err(Rejection::BirthplaceExcluded(place.to_string())),
        }
    }

    /// Runs the full chain and promotes the candidate on success.
    pub fn admit(
        &self,
        candidate: RawCandidate,
        detail: &CandidateDetail,
    ) -> Result<EligibleCandidate, Rejection> {
        self.check_listing(&candidate)?;
        self.check_age(detail)?;
        self.check_birthplace(detail)?;
        Ok(EligibleCandidate(candidate))
    }
}
