//! News article rows from the `news_data` sheet.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One scraped article. `tag` is an open vocabulary ("Press Release",
/// "Newsletter", "Statement", "Joint Statement", …); metric code matches on
/// the known values and ignores the rest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsArticle {
  pub title:     String,
  pub date:      Option<NaiveDate>,
  pub tag:       String,
  pub main_text: String,
  pub image_url: String,
  pub url:       String,
}
