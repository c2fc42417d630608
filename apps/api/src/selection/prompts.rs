// Ranking prompt for the daily trio.

use chrono::NaiveDate;

use crate::selection::{GameMode, ShortlistEntry};

/// Ranking prompt template.
/// Replace: {date}, {mode}, {candidates}
pub const RANKING_PROMPT_TEMPLATE: &str = r#"You are selecting 3 celebrities for a "Kiss, Marry, Kill" game. The goal is to make the choice DIFFICULT and FUN for players.

Today's date: {date}
Game mode: {mode}

Available celebrities:
{candidates}

Select exactly 3 celebrities that would make for an interesting game. Consider:
1. They could be similar in appeal (hard to choose between)
2. They could have a funny connection (co-stars, rivals, same franchise)
3. They could be from the same era or genre
4. They could have contrasting personalities that make the choice interesting

Respond with ONLY a JSON object in this exact format:
{
  "selectedIndices": [1, 5, 8],
  "theme": "A one-line witty description of why these 3 are grouped together"
}

The indices are 1-based from the list above. Make the theme fun and short (under 50 characters)."#;

/// One line per entry: `"{n}. {name} (Known for: {known_for})"`, numbered from 1.
pub fn format_candidates(shortlist: &[ShortlistEntry]) -> String {
    shortlist
        .iter()
        .enumerate()
        .map(|(i, entry)| format!("{}. {} (Known for: {})", i + 1, entry.name, entry.known_for))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn build_ranking_prompt(shortlist: &[ShortlistEntry], mode: GameMode, date: NaiveDate) -> String {
    RANKING_PROMPT_TEMPLATE
        .replace("{date}", &date.format("%Y-%m-%d").to_string())
        .replace("{mode}", mode.as_str())
        .replace("{candidates}", &format_candidates(shortlist))
}
