//! tvdb_client - Typed access to the TheTVDB XML API
//!
//! This library fetches show-detail, IMDb lookup and search documents from
//! the service and maps them into [`Show`] and [`Episode`] records. Missing
//! fields become `None` (or a documented default), malformed fields are
//! reported as errors instead of being papered over.
//!
//! # Examples
//!
//! ```no_run
//! use tvdb_client::{Tvdb, TvdbError};
//!
//! let tvdb = Tvdb::new("MY_API_KEY");
//!
//! match tvdb.get_show_by_imdb_id("tt0411008") {
//!     Ok(show) => {
//!         for season in show.season_numbers() {
//!             println!("Season {}: {} episode(s)", season, show.episodes_in_season(season).len());
//!         }
//!     }
//!     Err(TvdbError::NotFound(id)) => eprintln!("No series for {}", id),
//!     Err(e) => eprintln!("Lookup failed: {}", e),
//! }
//! ```

mod builder;
mod client;
mod coercion;
mod models;
mod transport;
mod xml_document;

pub use builder::{build_episode, build_show};
pub use client::{DEFAULT_SEARCH_RESULTS, Tvdb, TvdbConfig};
pub use models::{ContentRating, Episode, Show, Status};
pub use transport::{HttpTransport, Transport, TransportError};
pub use xml_document::{Element, XmlDocument};

// Re-export the chrono types used in public fields
pub use chrono::{NaiveDate, NaiveTime, Weekday};

use thiserror::Error;

/// Errors surfaced by every client operation
#[derive(Debug, Error)]
pub enum TvdbError {
    /// Fetching a document failed
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),

    /// The IMDb lookup did not resolve to a series
    #[error("No series found for IMDb id: {0}")]
    NotFound(String),

    /// A non-blank field could not be converted to its expected type
    #[error("Invalid value '{value}' for field {field}: {reason}")]
    Format {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// The response was not valid XML or lacked an expected element
    #[error("Malformed document: {0}")]
    MalformedDocument(String),
}

/// Result alias for client operations
pub type Result<T> = std::result::Result<T, TvdbError>;
