use std::{fmt, str::FromStr};

pub(super) const COMMENTS_COUNT: &str =
    "(SELECT COUNT(*) FROM comments WHERE comments.post_id = posts.id)";
pub(super) const LIKES_COUNT: &str =
    "(SELECT COUNT(*) FROM post_likes WHERE post_likes.post_id = posts.id)";

/// How "popular" posts are ranked. Ties always fall back to the post id,
/// lowest first, so the order is stable between requests.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PopularityMetric {
    #[default]
    Likes,
    Comments,
    /// Likes and comments added together.
    Engagement,
}

impl PopularityMetric {
    pub(super) fn order_clause(self) -> String {
        let score = match self {
            PopularityMetric::Likes => LIKES_COUNT.to_string(),
            PopularityMetric::Comments => COMMENTS_COUNT.to_string(),
            PopularityMetric::Engagement => format!("({LIKES_COUNT} + {COMMENTS_COUNT})"),
        };
        format!("{score} DESC, posts.id ASC")
    }
}

#[derive(Debug, thiserror::Error)]
#[error("expected one of: likes, comments, engagement")]
pub struct UnknownMetric;

impl FromStr for PopularityMetric {
    type Err = UnknownMetric;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "likes" => Ok(PopularityMetric::Likes),
            "comments" => Ok(PopularityMetric::Comments),
            "engagement" => Ok(PopularityMetric::Engagement),
            _ => Err(UnknownMetric),
        }
    }
}

impl fmt::Display for PopularityMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PopularityMetric::Likes => "likes",
            PopularityMetric::Comments => "comments",
            PopularityMetric::Engagement => "engagement",
        };
        f.write_str(name)
    }
}
