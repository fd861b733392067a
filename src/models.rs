/// Data structures for TV shows and their episodes.
///
/// These are immutable value records produced by the builders from a single
/// show-detail document. Optional fields are `None` when the service left
/// them blank; a few counters default to zero instead, mirroring how the
/// service reports them.
use std::fmt;

use chrono::{NaiveDate, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Airing status of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// New episodes are still being produced
    Continuing,
    /// The series has finished
    Ended,
    /// The service did not report a status
    Unknown,
}

impl Status {
    const TABLE: &'static [(&'static str, Status)] = &[
        ("Continuing", Status::Continuing),
        ("Ended", Status::Ended),
        ("Unknown", Status::Unknown),
    ];

    /// Looks up the variant for the service's status text.
    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(name, _)| *name == raw)
            .map(|(_, status)| *status)
    }

    /// The status text as the service spells it.
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Continuing => "Continuing",
            Status::Ended => "Ended",
            Status::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// US TV parental guideline rating of a series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ContentRating {
    /// All children
    TvY,
    /// Directed to older children
    TvY7,
    /// General audience
    TvG,
    /// Parental guidance suggested
    TvPg,
    /// Parents strongly cautioned
    Tv14,
    /// Mature audience only
    TvMa,
    /// Missing or unrecognized certification
    Unknown,
}

impl ContentRating {
    const TABLE: &'static [(&'static str, ContentRating)] = &[
        ("TV-Y", ContentRating::TvY),
        ("TV-Y7", ContentRating::TvY7),
        ("TV-G", ContentRating::TvG),
        ("TV-PG", ContentRating::TvPg),
        ("TV-14", ContentRating::Tv14),
        ("TV-MA", ContentRating::TvMa),
    ];

    /// Looks up the category for a certification string such as `TV-14`.
    pub fn from_wire(raw: &str) -> Option<Self> {
        Self::TABLE
            .iter()
            .find(|(name, _)| *name == raw)
            .map(|(_, rating)| *rating)
    }

    /// The certification string, `Unknown` for the fallback category.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentRating::TvY => "TV-Y",
            ContentRating::TvY7 => "TV-Y7",
            ContentRating::TvG => "TV-G",
            ContentRating::TvPg => "TV-PG",
            ContentRating::Tv14 => "TV-14",
            ContentRating::TvMa => "TV-MA",
            ContentRating::Unknown => "Unknown",
        }
    }
}

impl fmt::Display for ContentRating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single episode of a show.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Episode {
    /// Episode id on the service
    pub id: String,
    /// Episode number within its season
    pub episode_number: Option<i32>,
    /// The episode title
    pub title: String,
    /// Plot summary
    pub description: String,
    pub director: String,
    /// Path of the episode image, relative to the banner mirror
    pub file_name: String,
    pub first_aired: Option<NaiveDate>,
    pub guest_stars: Vec<String>,
    pub imdb_id: String,
    pub language: String,
    /// Epoch seconds of the last edit, 0 when never reported
    pub last_updated: i64,
    pub rating: Option<f64>,
    pub rating_count: i32,
    pub season_id: String,
    pub season_number: Option<i32>,
    /// Id of the show this episode belongs to
    pub series_id: String,
    pub thumb_height: Option<i32>,
    pub thumb_width: Option<i32>,
    pub writers: Vec<String>,
}

/// A TV show with its descriptive metadata and all of its episodes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Show {
    /// Series id on the service
    pub id: String,
    pub imdb_id: Option<String>,
    pub name: String,
    pub language: String,
    pub network: String,
    /// Plot summary
    pub description: String,
    pub rating: Option<f64>,
    pub rating_count: i32,
    /// Typical episode length in minutes
    pub runtime: Option<i32>,
    pub banner: Option<String>,
    pub fanart: Option<String>,
    pub poster: Option<String>,
    /// Epoch seconds of the last edit
    pub last_updated: Option<i64>,
    pub zap2it_id: String,
    pub first_aired: Option<NaiveDate>,
    pub air_time: Option<NaiveTime>,
    pub air_day: Option<Weekday>,
    pub status: Status,
    pub content_rating: ContentRating,
    pub genres: Vec<String>,
    pub actors: Vec<String>,
    /// Episodes in the order the service listed them
    pub episodes: Vec<Episode>,
}

impl Show {
    /// Returns the distinct season numbers present in the episode list, ascending.
    pub fn season_numbers(&self) -> Vec<i32> {
        let mut seasons: Vec<i32> = self
            .episodes
            .iter()
            .filter_map(|e| e.season_number)
            .collect();
        seasons.sort_unstable();
        seasons.dedup();
        seasons
    }

    /// Returns the episodes of one season, keeping their listed order.
    pub fn episodes_in_season(&self, season_number: i32) -> Vec<&Episode> {
        self.episodes
            .iter()
            .filter(|e| e.season_number == Some(season_number))
            .collect()
    }

    /// Finds an episode by season and episode number.
    pub fn episode(&self, season_number: i32, episode_number: i32) -> Option<&Episode> {
        self.episodes.iter().find(|e| {
            e.season_number == Some(season_number) && e.episode_number == Some(episode_number)
        })
    }
}
