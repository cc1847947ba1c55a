//! One handler module per dashboard tab, plus the refresh operation.
//!
//! | Method | Path | Module |
//! |--------|------|--------|
//! | `GET`  | `/api/overview` | [`overview`] |
//! | `GET`  | `/api/diseases` | [`diseases`] |
//! | `GET`  | `/api/neighbours` | [`neighbours`] |
//! | `GET`  | `/api/weather` | [`weather`] |
//! | `GET`  | `/api/news` | [`news`] |
//! | `POST` | `/api/refresh` | [`refresh`] |

pub mod diseases;
pub mod neighbours;
pub mod news;
pub mod overview;
pub mod refresh;
pub mod weather;
