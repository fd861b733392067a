//! Mapping of show-detail documents into [`Show`] and [`Episode`] records
//!
//! The field names below are the element names used by the service. Each
//! field goes through the coercion helpers so the blank/default policy is
//! decided in one place; the per-field defaults differ on purpose (a show's
//! `lastupdated` may be absent, an episode's falls back to 0).

use crate::TvdbError;
use crate::coercion::{
    content_rating, number_or, optional_date, optional_number, optional_text, optional_time,
    optional_weekday, pipe_list, status,
};
use crate::models::{Episode, Show};
use crate::xml_document::{Element, XmlDocument};

/// Element holding the series fields of a show-detail document.
pub(crate) const SERIES_ELEMENT: &str = "Series";

/// Element holding a single episode.
pub(crate) const EPISODE_ELEMENT: &str = "Episode";

/// Builds a show, including all of its episodes, from a show-detail document.
///
/// Fails with [`TvdbError::MalformedDocument`] if the document has no series
/// element, and with [`TvdbError::Format`] if any non-blank field does not parse.
pub fn build_show(doc: &XmlDocument) -> Result<Show, TvdbError> {
    let series = doc.first(SERIES_ELEMENT).ok_or_else(|| {
        TvdbError::MalformedDocument(format!("missing <{}> element", SERIES_ELEMENT))
    })?;

    let episodes = doc
        .descendants(EPISODE_ELEMENT)
        .map(build_episode)
        .collect::<Result<Vec<_>, _>>()?;

    tracing::debug!(
        "Mapped show {} with {} episode(s)",
        series.field("id"),
        episodes.len()
    );

    Ok(Show {
        id: series.field("id").to_string(),
        imdb_id: optional_text(series.field("IMDB_ID")),
        name: series.field("SeriesName").to_string(),
        language: series.field("Language").to_string(),
        network: series.field("Network").to_string(),
        description: series.field("Overview").to_string(),
        rating: optional_number("Rating", series.field("Rating"))?,
        rating_count: number_or("RatingCount", series.field("RatingCount"), 0)?,
        runtime: optional_number("Runtime", series.field("Runtime"))?,
        banner: optional_text(series.field("banner")),
        fanart: optional_text(series.field("fanart")),
        poster: optional_text(series.field("poster")),
        last_updated: optional_number("lastupdated", series.field("lastupdated"))?,
        zap2it_id: series.field("zap2it_id").to_string(),
        first_aired: optional_date("FirstAired", series.field("FirstAired"))?,
        air_time: optional_time("Airs_Time", series.field("Airs_Time"))?,
        air_day: optional_weekday("Airs_DayOfWeek", series.field("Airs_DayOfWeek"))?,
        status: status("Status", series.field("Status"))?,
        content_rating: content_rating(series.field("ContentRating")),
        genres: pipe_list(series.field("Genre")),
        actors: pipe_list(series.field("Actors")),
        episodes,
    })
}

/// Builds a single episode from its element.
pub fn build_episode(episode: &Element) -> Result<Episode, TvdbError> {
    Ok(Episode {
        id: episode.field("id").to_string(),
        episode_number: optional_number("EpisodeNumber", episode.field("EpisodeNumber"))?,
        title: episode.field("EpisodeName").to_string(),
        description: episode.field("Overview").to_string(),
        director: episode.field("Director").to_string(),
        file_name: episode.field("filename").to_string(),
        first_aired: optional_date("FirstAired", episode.field("FirstAired"))?,
        guest_stars: pipe_list(episode.field("GuestStars")),
        imdb_id: episode.field("IMDB_ID").to_string(),
        language: episode.field("Language").to_string(),
        last_updated: number_or("lastupdated", episode.field("lastupdated"), 0)?,
        rating: optional_number("Rating", episode.field("Rating"))?,
        rating_count: number_or("RatingCount", episode.field("RatingCount"), 0)?,
        season_id: episode.field("seasonid").to_string(),
        season_number: optional_number("SeasonNumber", episode.field("SeasonNumber"))?,
        series_id: episode.field("seriesid").to_string(),
        thumb_height: optional_number("thumb_height", episode.field("thumb_height"))?,
        thumb_width: optional_number("thumb_width", episode.field("thumb_width"))?,
        writers: pipe_list(episode.field("Writer")),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentRating, Status};
    use chrono::{NaiveDate, NaiveTime, Weekday};

    const LOST: &str = r#"<?xml version="1.0" encoding="UTF-8" ?>
<Data>
  <Series>
    <id>73739</id>
    <Actors>|Jorge Garcia|Josh Holloway|Evangeline Lilly|</Actors>
    <Airs_DayOfWeek>Tuesday</Airs_DayOfWeek>
    <Airs_Time>9:00 PM</Airs_Time>
    <ContentRating>TV-14</ContentRating>
    <FirstAired>2004-09-22</FirstAired>
    <Genre>|Action|Adventure|Drama|</Genre>
    <IMDB_ID>tt0411008</IMDB_ID>
    <Language>en</Language>
    <Network>ABC (US)</Network>
    <Overview>After their plane crashes on a remote island...</Overview>
    <Rating>9.1</Rating>
    <RatingCount>912</RatingCount>
    <Runtime>60</Runtime>
    <SeriesName>Lost</SeriesName>
    <Status>Ended</Status>
    <banner>graphical/73739-g4.jpg</banner>
    <fanart>fanart/original/73739-34.jpg</fanart>
    <lastupdated>1362509400</lastupdated>
    <poster>posters/73739-7.jpg</poster>
    <zap2it_id>SH672362</zap2it_id>
  </Series>
  <Episode>
    <id>127131</id>
    <Director>J.J. Abrams</Director>
    <EpisodeName>Pilot (1)</EpisodeName>
    <EpisodeNumber>1</EpisodeNumber>
    <FirstAired>2004-09-22</FirstAired>
    <GuestStars>|Greg Grunberg|Fredric Lehne|</GuestStars>
    <IMDB_ID>tt0636289</IMDB_ID>
    <Language>en</Language>
    <Overview>Stripped of everything, the survivors...</Overview>
    <Rating>8.4</Rating>
    <RatingCount>163</RatingCount>
    <SeasonNumber>1</SeasonNumber>
    <Writer>|Jeffrey Lieber|J.J. Abrams|Damon Lindelof|</Writer>
    <filename>episodes/73739/127131.jpg</filename>
    <lastupdated>1354641318</lastupdated>
    <seasonid>16270</seasonid>
    <seriesid>73739</seriesid>
    <thumb_height>225</thumb_height>
    <thumb_width>400</thumb_width>
  </Episode>
  <Episode>
    <id>127132</id>
    <EpisodeName>Pilot (2)</EpisodeName>
    <EpisodeNumber>2</EpisodeNumber>
    <SeasonNumber>1</SeasonNumber>
    <seriesid>73739</seriesid>
  </Episode>
  <Episode>
    <id>127133</id>
    <EpisodeName>Tabula Rasa</EpisodeName>
    <EpisodeNumber>3</EpisodeNumber>
    <SeasonNumber>1</SeasonNumber>
    <seriesid>73739</seriesid>
  </Episode>
</Data>"#;

    fn parse(xml: &str) -> XmlDocument {
        XmlDocument::parse(xml).unwrap()
    }

    #[test]
    fn test_build_show_fields() {
        let show = build_show(&parse(LOST)).unwrap();

        assert_eq!(show.id, "73739");
        assert_eq!(show.imdb_id.as_deref(), Some("tt0411008"));
        assert_eq!(show.name, "Lost");
        assert_eq!(show.language, "en");
        assert_eq!(show.network, "ABC (US)");
        assert_eq!(show.rating, Some(9.1));
        assert_eq!(show.rating_count, 912);
        assert_eq!(show.runtime, Some(60));
        assert_eq!(show.banner.as_deref(), Some("graphical/73739-g4.jpg"));
        assert_eq!(show.last_updated, Some(1_362_509_400));
        assert_eq!(show.zap2it_id, "SH672362");
        assert_eq!(show.first_aired, NaiveDate::from_ymd_opt(2004, 9, 22));
        assert_eq!(show.air_time, NaiveTime::from_hms_opt(21, 0, 0));
        assert_eq!(show.air_day, Some(Weekday::Tue));
        assert_eq!(show.status, Status::Ended);
        assert_eq!(show.content_rating, ContentRating::Tv14);
        assert_eq!(show.genres, vec!["Action", "Adventure", "Drama"]);
        assert_eq!(
            show.actors,
            vec!["Jorge Garcia", "Josh Holloway", "Evangeline Lilly"]
        );
    }

    #[test]
    fn test_episodes_follow_document_order() {
        let doc = parse(LOST);
        let show = build_show(&doc).unwrap();

        assert_eq!(show.episodes.len(), doc.descendants(EPISODE_ELEMENT).count());
        let ids: Vec<&str> = show.episodes.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["127131", "127132", "127133"]);
    }

    #[test]
    fn test_build_episode_fields() {
        let show = build_show(&parse(LOST)).unwrap();
        let pilot = &show.episodes[0];

        assert_eq!(pilot.title, "Pilot (1)");
        assert_eq!(pilot.episode_number, Some(1));
        assert_eq!(pilot.season_number, Some(1));
        assert_eq!(pilot.director, "J.J. Abrams");
        assert_eq!(pilot.file_name, "episodes/73739/127131.jpg");
        assert_eq!(pilot.first_aired, NaiveDate::from_ymd_opt(2004, 9, 22));
        assert_eq!(pilot.guest_stars, vec!["Greg Grunberg", "Fredric Lehne"]);
        assert_eq!(pilot.imdb_id, "tt0636289");
        assert_eq!(pilot.last_updated, 1_354_641_318);
        assert_eq!(pilot.rating, Some(8.4));
        assert_eq!(pilot.rating_count, 163);
        assert_eq!(pilot.season_id, "16270");
        assert_eq!(pilot.series_id, "73739");
        assert_eq!(pilot.thumb_height, Some(225));
        assert_eq!(pilot.thumb_width, Some(400));
        assert_eq!(
            pilot.writers,
            vec!["Jeffrey Lieber", "J.J. Abrams", "Damon Lindelof"]
        );
    }

    #[test]
    fn test_sparse_episode_defaults() {
        let show = build_show(&parse(LOST)).unwrap();
        let sparse = &show.episodes[1];

        assert_eq!(sparse.last_updated, 0);
        assert_eq!(sparse.rating, None);
        assert_eq!(sparse.rating_count, 0);
        assert_eq!(sparse.first_aired, None);
        assert_eq!(sparse.thumb_height, None);
        assert!(sparse.guest_stars.is_empty());
        assert!(sparse.writers.is_empty());
        assert_eq!(sparse.director, "");
    }

    #[test]
    fn test_sparse_show_defaults() {
        let doc = parse(
            "<Data><Series><id>1</id><SeriesName>Bare</SeriesName>\
             <Rating> </Rating><RatingCount></RatingCount><Genre>|</Genre></Series></Data>",
        );
        let show = build_show(&doc).unwrap();

        assert_eq!(show.rating, None);
        assert_eq!(show.rating_count, 0);
        assert_eq!(show.runtime, None);
        assert_eq!(show.last_updated, None);
        assert_eq!(show.imdb_id, None);
        assert_eq!(show.banner, None);
        assert_eq!(show.air_time, None);
        assert_eq!(show.air_day, None);
        assert_eq!(show.status, Status::Unknown);
        assert_eq!(show.content_rating, ContentRating::Unknown);
        assert!(show.genres.is_empty());
        assert!(show.actors.is_empty());
        assert!(show.episodes.is_empty());
    }

    #[test]
    fn test_malformed_rating_is_format_error() {
        let doc = parse("<Data><Series><id>1</id><Rating>abc</Rating></Series></Data>");
        assert!(matches!(
            build_show(&doc),
            Err(TvdbError::Format { field: "Rating", .. })
        ));
    }

    #[test]
    fn test_unknown_status_is_format_error() {
        let doc = parse("<Data><Series><id>1</id><Status>On Hiatus</Status></Series></Data>");
        assert!(matches!(
            build_show(&doc),
            Err(TvdbError::Format { field: "Status", .. })
        ));
    }

    #[test]
    fn test_bad_episode_fails_whole_show() {
        let doc = parse(
            "<Data><Series><id>1</id></Series>\
             <Episode><id>2</id><FirstAired>yesterday</FirstAired></Episode></Data>",
        );
        assert!(matches!(
            build_show(&doc),
            Err(TvdbError::Format { field: "FirstAired", .. })
        ));
    }

    #[test]
    fn test_negative_counts_are_accepted() {
        let doc = parse(
            "<Data><Series><id>1</id><RatingCount>-1</RatingCount></Series>\
             <Episode><id>2</id><EpisodeNumber>-1</EpisodeNumber><RatingCount>-3</RatingCount></Episode></Data>",
        );
        let show = build_show(&doc).unwrap();

        assert_eq!(show.rating_count, -1);
        assert_eq!(show.episodes[0].episode_number, Some(-1));
        assert_eq!(show.episodes[0].rating_count, -3);
    }

    #[test]
    fn test_missing_series_is_malformed() {
        let doc = parse("<Data><Episode><id>2</id></Episode></Data>");
        assert!(matches!(
            build_show(&doc),
            Err(TvdbError::MalformedDocument(_))
        ));
    }
}
