//! Celebration feedback shown after a submission
//!
//! Scores fall into four fixed bands. Each band picks the dialog copy.

use serde::{Deserialize, Serialize};

use crate::consts::{SCORE_MAX, SCORE_MIN};

/// Score band used to choose celebration content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// 90 and up
    Excellent,
    /// [80, 90)
    Good,
    /// [70, 80)
    Average,
    /// Below 70
    NeedsImprovement,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Excellent,
        Category::Good,
        Category::Average,
        Category::NeedsImprovement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Excellent => "excellent",
            Category::Good => "good",
            Category::Average => "average",
            Category::NeedsImprovement => "needs_improvement",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "excellent" => Some(Category::Excellent),
            "good" => Some(Category::Good),
            "average" => Some(Category::Average),
            "needs_improvement" | "needs-improvement" => Some(Category::NeedsImprovement),
            _ => None,
        }
    }

    /// Dialog heading
    pub fn title(&self) -> &'static str {
        match self {
            Category::Excellent => "🏆 Excellent!",
            Category::Good => "⭐ Great job!",
            Category::Average => "🎯 Pretty good!",
            Category::NeedsImprovement => "👍 Keep going!",
        }
    }

    /// Dialog body text
    pub fn message(&self) -> &'static str {
        match self {
            Category::Excellent => "Outstanding score! You did really well!",
            Category::Good => "A solid score! Keep it up!",
            Category::Average => "Not bad! Push a little harder next time!",
            Category::NeedsImprovement => "Don't give up! Next time will be better!",
        }
    }
}

/// Map a score to its band. Lower bounds are inclusive.
///
/// Out-of-range scores are clamped to [0, 100] first; NaN falls through
/// every comparison and lands in [`Category::NeedsImprovement`].
pub fn classify(score: f64) -> Category {
    let score = score.clamp(SCORE_MIN, SCORE_MAX);
    if score >= 90.0 {
        Category::Excellent
    } else if score >= 80.0 {
        Category::Good
    } else if score >= 70.0 {
        Category::Average
    } else {
        Category::NeedsImprovement
    }
}

/// Transient payload for the celebration dialog. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CelebrationEvent {
    pub category: Category,
    pub score: f64,
    pub name: String,
}

impl CelebrationEvent {
    pub fn new(name: impl Into<String>, score: f64) -> Self {
        Self {
            category: classify(score),
            score,
            name: name.into(),
        }
    }
}
