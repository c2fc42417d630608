use std::str::FromStr;

/// Number of celebrities in a finished daily selection.
pub const PICK_COUNT: usize = 3;

/// How a candidate with an unknown birth date is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AgePolicy {
    /// Unknown age is accepted; known ages must fall in range.
    Permissive,
    /// Unknown age is rejected; known ages must fall in range.
    Strict,
}

/// Inclusive age bounds. `max: None` means no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgeRange {
    pub min: u32,
    pub max: Option<u32>,
}

impl AgeRange {
    pub fn contains(&self, age: u32) -> bool {
        age >= self.min && self.max.map_or(true, |max| age <= max)
    }
}

/// Every knob of the daily selection pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Sample size is `oversample_multiplier * PICK_COUNT`.
    pub oversample_multiplier: usize,
    /// Eligible entries collected before handing off to ranking.
    pub shortlist_target: usize,
    pub age_policy: AgePolicy,
    pub age_range: AgeRange,
    pub require_western_birthplace: bool,
    /// Part of the seed key. Changing it breaks reproducibility of past days.
    pub seed_version_salt: String,
    /// Directory pages fetched, in this order.
    pub pages: Vec<u32>,
}

impl PipelineConfig {
    /// Adults or unknown age, any birthplace.
    pub fn permissive() -> Self {
        Self {
            oversample_multiplier: 10,
            shortlist_target: 15,
            age_policy: AgePolicy::Permissive,
            age_range: AgeRange { min: 18, max: None },
            require_western_birthplace: false,
            seed_version_salt: "v3".to_string(),
            pages: (1..=8).collect(),
        }
    }

    /// Known age within 20–60 and a known Western birthplace.
    pub fn strict() -> Self {
        Self {
            oversample_multiplier: 10,
            shortlist_target: 15,
            age_policy: AgePolicy::Strict,
            age_range: AgeRange {
                min: 20,
                max: Some(60),
            },
            require_western_birthplace: true,
            seed_version_salt: "v2-strict".to_string(),
            pages: (1..=10).collect(),
        }
    }

    pub fn with_pages(mut self, pages: Vec<u32>) -> Self {
        self.pages = pages;
        self
    }

    pub fn oversample_count(&self) -> usize {
        self.oversample_multiplier * PICK_COUNT
    }
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self::permissive()
    }
}

impl FromStr for PipelineConfig {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "permissive" => Ok(Self::permissive()),
            "strict" => Ok(Self::strict()),
            other => Err(format!(
                "unknown selection policy '{other}' (expected 'permissive' or 'strict')"
            )),
        }
    }
}

/// Parses a comma-separated page list such as `"1,2,3"`.
pub fn parse_pages(raw: &str) -> Result<Vec<u32>, String> {
    let pages = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<u32>()
                .ok()
                .filter(|p| *p > 0)
                .ok_or_else(|| format!("invalid page number '{s}'"))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if pages.is_empty() {
        return Err("page list cannot be empty".to_string());
    }
    Ok(pages)
}
