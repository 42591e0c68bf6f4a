//! The canned insight catalog.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};

/// Kind of insight message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InsightCategory {
    Recommendation,
    Alert,
    Achievement,
    Info,
}

impl InsightCategory {
    pub fn icon(&self) -> &'static str {
        match self {
            InsightCategory::Recommendation => "✦",
            InsightCategory::Alert => "⚠",
            InsightCategory::Achievement => "✔",
            InsightCategory::Info => "ℹ",
        }
    }
}

/// Priority of an insight message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    Low,
    Medium,
    High,
}

impl Priority {
    pub fn label(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

/// A canned insight shown in the insights panel.
///
/// The category is serialized as `type`, as the backend sends it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Insight {
    pub id: Cow<'static, str>,
    #[serde(rename = "type")]
    pub category: InsightCategory,
    pub title: Cow<'static, str>,
    pub message: Cow<'static, str>,
    /// Relative time label, e.g. "2 minutes ago".
    pub timestamp: Cow<'static, str>,
    pub priority: Priority,
}

impl Insight {
    const fn canned(
        id: &'static str,
        category: InsightCategory,
        title: &'static str,
        message: &'static str,
        timestamp: &'static str,
        priority: Priority,
    ) -> Self {
        Self {
            id: Cow::Borrowed(id),
            category,
            title: Cow::Borrowed(title),
            message: Cow::Borrowed(message),
            timestamp: Cow::Borrowed(timestamp),
            priority,
        }
    }
}

static INSIGHTS: [Insight; 4] = [
    Insight::canned(
        "1",
        InsightCategory::Recommendation,
        "Hydration Reminder",
        "Your water intake is below the recommended 2L daily goal. Consider drinking a glass of water now.",
        "2 minutes ago",
        Priority::Medium,
    ),
    Insight::canned(
        "2",
        InsightCategory::Achievement,
        "Sleep Goal Achieved!",
        "Great job! You've maintained 7+ hours of sleep for 5 consecutive nights.",
        "1 hour ago",
        Priority::Low,
    ),
    Insight::canned(
        "3",
        InsightCategory::Alert,
        "Elevated Heart Rate",
        "Your resting heart rate has been consistently above normal. Consider reducing caffeine intake.",
        "3 hours ago",
        Priority::High,
    ),
    Insight::canned(
        "4",
        InsightCategory::Recommendation,
        "Activity Suggestion",
        "You've been sedentary for 2 hours. A 5-minute walk could help improve circulation.",
        "30 minutes ago",
        Priority::Medium,
    ),
];

/// The fixed insight catalog, in display order.
pub fn list_insights() -> &'static [Insight] {
    &INSIGHTS
}
