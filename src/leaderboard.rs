//! Leaderboard view model
//!
//! Turns the ranked submission list into display rows: rank badge, initials,
//! `m:ss` time, score band, relative date.

use chrono::{DateTime, Datelike, Utc};

use crate::celebration::{Category, classify};
use crate::submission::{Submission, SubmissionId};

/// Podium badge for the top three, plain number for everyone else
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RankBadge {
    /// Rank 1 (trophy)
    Gold,
    /// Rank 2 (medal)
    Silver,
    /// Rank 3 (award)
    Bronze,
    Numbered(usize),
}

impl RankBadge {
    pub fn for_rank(rank: usize) -> Self {
        match rank {
            1 => RankBadge::Gold,
            2 => RankBadge::Silver,
            3 => RankBadge::Bronze,
            n => RankBadge::Numbered(n),
        }
    }

    pub fn label(&self) -> String {
        match self {
            RankBadge::Gold => "🏆".to_string(),
            RankBadge::Silver => "🥈".to_string(),
            RankBadge::Bronze => "🥉".to_string(),
            RankBadge::Numbered(n) => format!("#{}", n),
        }
    }
}

/// One rendered leaderboard line
#[derive(Debug, Clone, PartialEq)]
pub struct LeaderboardRow {
    pub id: SubmissionId,
    /// 1-based
    pub rank: usize,
    pub badge: RankBadge,
    pub initials: String,
    pub name: String,
    pub score: f64,
    /// Score band, for coloring
    pub band: Category,
    /// `m:ss`
    pub time: String,
    pub has_audio: bool,
    pub created_at: DateTime<Utc>,
}

/// Build display rows from an already ranked list
pub fn rows(ranked: &[Submission]) -> Vec<LeaderboardRow> {
    ranked
        .iter()
        .enumerate()
        .map(|(i, s)| LeaderboardRow {
            id: s.id,
            rank: i + 1,
            badge: RankBadge::for_rank(i + 1),
            initials: initials(&s.name),
            name: s.name.clone(),
            score: s.score,
            band: classify(s.score),
            time: format_duration(s.time),
            has_audio: s.has_audio(),
            created_at: s.created_at,
        })
        .collect()
}

/// Seconds as `m:ss`; fractional seconds are truncated
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds as u64
    } else {
        0
    };
    format!("{}:{:02}", total / 60, total % 60)
}

/// First letter of up to the first two words, upper-cased
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Format a timestamp relative to `now`
pub fn format_relative(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let diff = now.signed_duration_since(timestamp);
    let days = diff.num_days();
    let hours = diff.num_hours();
    let mins = diff.num_minutes();

    if days >= 1 {
        if days == 1 {
            "Yesterday".to_string()
        } else if days < 7 {
            format!("{} days ago", days)
        } else {
            format!(
                "{}/{}/{:02}",
                timestamp.month(),
                timestamp.day(),
                timestamp.year() % 100
            )
        }
    } else if hours >= 1 {
        if hours == 1 {
            "1 hour ago".to_string()
        } else {
            format!("{} hours ago", hours)
        }
    } else if mins >= 1 {
        if mins == 1 {
            "1 min ago".to_string()
        } else {
            format!("{} mins ago", mins)
        }
    } else {
        "Just now".to_string()
    }
}
