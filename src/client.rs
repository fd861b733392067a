//! Client facade for the TheTVDB XML API
//!
//! Each operation is a linear pipeline: build the URL, fetch the text
//! through the configured [`Transport`], parse it, and map it. Nothing is
//! retried or cached between calls.

use crate::builder::{SERIES_ELEMENT, build_show};
use crate::models::Show;
use crate::transport::{HttpTransport, Transport};
use crate::xml_document::XmlDocument;
use crate::TvdbError;

/// Result limit used by [`Tvdb::search_default`].
pub const DEFAULT_SEARCH_RESULTS: usize = 5;

const DEFAULT_BASE_URL: &str = "http://thetvdb.com";

/// Immutable connection settings for a [`Tvdb`] client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TvdbConfig {
    api_key: String,
    base_url: String,
}

impl TvdbConfig {
    /// Creates a configuration for the public service with the given API key.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Points the client at a different host, e.g. a mirror or a local stub.
    ///
    /// A trailing slash is ignored.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn show_url(&self, show_id: &str) -> String {
        format!(
            "{}/api/{}/series/{}/all/",
            self.base_url,
            urlencoding::encode(&self.api_key),
            urlencoding::encode(show_id)
        )
    }

    fn imdb_lookup_url(&self, imdb_id: &str) -> String {
        format!(
            "{}/api/GetSeriesByRemoteID.php?imdbid={}",
            self.base_url,
            urlencoding::encode(imdb_id)
        )
    }

    fn search_url(&self, query: &str) -> String {
        format!(
            "{}/api/GetSeries.php?seriesname={}",
            self.base_url,
            urlencoding::encode(query)
        )
    }
}

/// Client for looking up shows by id, IMDb id, or name.
///
/// # Examples
///
/// ```no_run
/// use tvdb_client::{Tvdb, DEFAULT_SEARCH_RESULTS};
///
/// let tvdb = Tvdb::new("MY_API_KEY");
///
/// let lost = tvdb.get_show("73739")?;
/// println!("{} has {} episode(s)", lost.name, lost.episodes.len());
///
/// for show in tvdb.search("Doctor Who", DEFAULT_SEARCH_RESULTS)? {
///     println!("{} ({})", show.name, show.id);
/// }
/// # Ok::<(), tvdb_client::TvdbError>(())
/// ```
pub struct Tvdb<T = HttpTransport> {
    config: TvdbConfig,
    transport: T,
}

impl Tvdb<HttpTransport> {
    /// Creates a client for the public service using the default HTTP transport.
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_transport(TvdbConfig::new(api_key), HttpTransport::new())
    }
}

impl<T> Tvdb<T>
where
    T: Transport,
{
    /// Creates a client with an explicit configuration and transport.
    pub fn with_transport(config: TvdbConfig, transport: T) -> Self {
        Self { config, transport }
    }

    pub fn config(&self) -> &TvdbConfig {
        &self.config
    }

    /// Fetches a show and all of its episodes by series id.
    pub fn get_show(&self, show_id: &str) -> Result<Show, TvdbError> {
        let doc = self.fetch_document(&self.config.show_url(show_id))?;
        build_show(&doc)
    }

    /// Resolves an IMDb id (e.g. `tt0411008`) to a series and fetches that show.
    ///
    /// Fails with [`TvdbError::NotFound`] without a second request when the
    /// service knows no series for the id.
    pub fn get_show_by_imdb_id(&self, imdb_id: &str) -> Result<Show, TvdbError> {
        let doc = self.fetch_document(&self.config.imdb_lookup_url(imdb_id))?;

        let show_id = doc
            .first("seriesid")
            .map(|element| element.text().to_string())
            .filter(|id| !id.is_empty())
            .ok_or_else(|| TvdbError::NotFound(imdb_id.to_string()))?;

        tracing::debug!("IMDb id {} resolved to series {}", imdb_id, show_id);
        self.get_show(&show_id)
    }

    /// Searches shows by name and fetches up to `max_results` of them in full.
    ///
    /// Results keep the order of the search response. Every hit costs one
    /// additional request, and the first failing hit aborts the whole search.
    pub fn search(&self, query: &str, max_results: usize) -> Result<Vec<Show>, TvdbError> {
        let doc = self.fetch_document(&self.config.search_url(query))?;

        let show_ids: Vec<String> = doc
            .descendants(SERIES_ELEMENT)
            .take(max_results)
            .map(|series| series.field("seriesid").to_string())
            .collect();

        tracing::debug!(
            "Search for '{}' returned {} show(s) to fetch",
            query,
            show_ids.len()
        );

        show_ids.iter().map(|id| self.get_show(id)).collect()
    }

    /// Searches shows by name, fetching up to [`DEFAULT_SEARCH_RESULTS`] of them.
    pub fn search_default(&self, query: &str) -> Result<Vec<Show>, TvdbError> {
        self.search(query, DEFAULT_SEARCH_RESULTS)
    }

    /// Fetches a URL through the transport and parses the response.
    fn fetch_document(&self, url: &str) -> Result<XmlDocument, TvdbError> {
        tracing::debug!("Fetching {}", self.redact(url));
        let text = self.transport.fetch_text(url)?;
        XmlDocument::parse(&text)
    }

    /// Hides the API key path segment in log output.
    fn redact(&self, url: &str) -> String {
        let api_root = format!("{}/api/", self.config.base_url);
        let key = urlencoding::encode(&self.config.api_key);

        match url
            .strip_prefix(&api_root)
            .and_then(|rest| rest.strip_prefix(&*key))
            .and_then(|rest| rest.strip_prefix('/'))
        {
            Some(rest) if !key.is_empty() => format!("{}<api-key>/{}", api_root, rest),
            _ => url.to_string(),
        }
    }
}
