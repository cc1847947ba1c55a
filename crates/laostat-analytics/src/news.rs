//! News metrics and the article search filter.

use chrono::NaiveDate;
use laostat_core::NewsArticle;
use serde::{Deserialize, Serialize};

/// Tag tallies plus recency of the newest article.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsMetrics {
  pub total_articles: usize,
  pub press_releases: usize,
  pub newsletters:    usize,
  pub statements:     usize,
  /// Days since the first (newest) article; `None` when the list is empty
  /// or its date failed coercion.
  pub days_ago:       Option<i64>,
}

/// Articles arrive newest-first from the scraper; recency reads row zero.
pub fn metrics(articles: &[NewsArticle], today: NaiveDate) -> NewsMetrics {
  let tag_count = |t: &str| articles.iter().filter(|a| a.tag == t).count();
  NewsMetrics {
    total_articles: articles.len(),
    press_releases: tag_count("Press Release"),
    newsletters:    tag_count("Newsletter"),
    statements:     tag_count("Statement") + tag_count("Joint Statement"),
    days_ago:       articles
      .first()
      .and_then(|a| a.date)
      .map(|d| (today - d).num_days()),
  }
}

/// Result of an article search. `NoMatches` is an explicit sentinel so the
/// presentation layer can distinguish "no results" from "no query".
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SearchOutcome {
  Matches { articles: Vec<NewsArticle> },
  NoMatches,
}

/// Case-insensitive substring match against title or body. An empty or
/// whitespace-only query returns the full unfiltered list.
pub fn search(articles: &[NewsArticle], query: &str) -> SearchOutcome {
  let query = query.trim().to_lowercase();
  if query.is_empty() {
    return SearchOutcome::Matches { articles: articles.to_vec() };
  }

  let matches: Vec<NewsArticle> = articles
    .iter()
    .filter(|a| {
      a.title.to_lowercase().contains(&query)
        || a.main_text.to_lowercase().contains(&query)
    })
    .cloned()
    .collect();

  if matches.is_empty() {
    SearchOutcome::NoMatches
  } else {
    SearchOutcome::Matches { articles: matches }
  }
}
