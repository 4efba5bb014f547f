//! Conversion from parsed GPX documents
//!
//! Reading and parsing the XML is left to the `gpx` crate (or any other reader);
//! this module only lifts tracks, segments and points out of an already parsed
//! `gpx::Gpx` value. Routes and waypoints are ignored.

use crate::{Collection, DataError, Point, Result, Segment, Track, utils};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Configuration for building a [`Collection`] from a parsed document
#[derive(Debug, Clone)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Config {
    /// Skip points with non-finite or out-of-range coordinates instead of failing.
    /// Default: true
    pub skip_invalid_points: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            skip_invalid_points: true,
        }
    }
}

#[cfg_attr(feature = "profiling", profiling::all_functions)]
impl Collection {
    /// Build a collection from a parsed GPX document
    ///
    /// The collection name comes from `<metadata><name>`. Point order and the
    /// segment/track grouping are preserved.
    pub fn from_gpx(gpx: &gpx::Gpx, config: &Config) -> Result<Self> {
        #[cfg(feature = "profiling")]
        profiling::scope!("import::from_gpx");

        let tracks = gpx
            .tracks
            .iter()
            .map(|track| convert_track(track, config))
            .collect::<Result<Vec<_>>>()?;

        let name = gpx.metadata.as_ref().and_then(|m| m.name.clone());
        Ok(Collection::new(tracks).with_name(name))
    }
}

impl TryFrom<gpx::Gpx> for Collection {
    type Error = DataError;

    fn try_from(gpx: gpx::Gpx) -> Result<Self> {
        Collection::from_gpx(&gpx, &Config::default())
    }
}

fn convert_track(track: &gpx::Track, config: &Config) -> Result<Track> {
    let segments = track
        .segments
        .iter()
        .map(|segment| convert_segment(segment, config))
        .collect::<Result<Vec<_>>>()?;

    Ok(Track::new(segments)
        .with_name(track.name.clone())
        .with_comment(track.comment.clone())
        .with_description(track.description.clone())
        .with_number(track.number)
        .with_kind(track.type_.clone()))
}

fn convert_segment(segment: &gpx::TrackSegment, config: &Config) -> Result<Segment> {
    let mut points = Vec::with_capacity(segment.points.len());

    for waypoint in &segment.points {
        let latitude = waypoint.point().y();
        let longitude = waypoint.point().x();

        if !utils::is_valid_coordinate(latitude, longitude) {
            if config.skip_invalid_points {
                tracing::warn!(
                    "Skipping point with invalid coordinates: ({}, {})",
                    latitude,
                    longitude
                );
                continue;
            }
            return Err(DataError::InvalidCoordinate {
                latitude,
                longitude,
            });
        }

        let mut point = match waypoint.elevation {
            Some(elevation) => Point::with_elevation(latitude, longitude, elevation),
            None => Point::new(latitude, longitude),
        };
        if let Some(time) = waypoint.time.clone() {
            point = point.at(OffsetDateTime::from(time));
        }
        points.push(point);
    }

    Ok(Segment::new(points))
}

#[cfg(test)]
mod tests {
    use super::*;
    use gpx::{Gpx, Metadata, TrackSegment, Waypoint};
    use time::macros::datetime;

    fn create_test_waypoint(lat: f64, lon: f64) -> Waypoint {
        Waypoint::new(geo::Point::new(lon, lat))
    }

    fn create_test_gpx() -> Gpx {
        let mut gpx = Gpx::default();
        let mut track = gpx::Track::default();
        let mut segment = TrackSegment::default();

        let mut first = create_test_waypoint(51.5074, -0.1278);
        first.elevation = Some(11.0);
        first.time = Some(datetime!(2024-05-18 07:50:00 UTC).into());
        segment.points.push(first);
        segment.points.push(create_test_waypoint(51.5076, -0.1276));
        segment.points.push(create_test_waypoint(51.5078, -0.1274));

        track.name = Some(String::new());
        track.number = Some(2);
        track.type_ = Some("cycling".to_string());
        track.segments.push(segment);
        track.segments.push(TrackSegment::default());
        gpx.tracks.push(track);
        gpx
    }

    #[test]
    fn test_from_gpx_preserves_structure() {
        let collection = Collection::try_from(create_test_gpx()).unwrap();

        assert_eq!(collection.name(), None);
        assert_eq!(collection.tracks().len(), 1);
        let track = &collection.tracks()[0];
        assert_eq!(track.name(), Some(""));
        assert_eq!(track.comment(), None);
        assert_eq!(track.description(), None);
        assert_eq!(track.number(), Some(2));
        assert_eq!(track.kind(), Some("cycling"));
        assert_eq!(track.segments().len(), 2);
        assert!(track.segments()[1].is_empty());

        let points = track.segments()[0].points();
        assert_eq!(points.len(), 3);
        assert_eq!(points[0].latitude(), 51.5074);
        assert_eq!(points[0].longitude(), -0.1278);
        assert_eq!(points[0].elevation(), Some(11.0));
        assert_eq!(points[0].timestamp(), Some(datetime!(2024-05-18 07:50:00 UTC)));
        assert_eq!(points[1].elevation(), None);
        assert_eq!(points[1].timestamp(), None);
    }

    #[test]
    fn test_metadata_name() {
        let mut gpx = create_test_gpx();
        let mut metadata = Metadata::default();
        metadata.name = Some("Morning ride".to_string());
        gpx.metadata = Some(metadata);

        let collection = Collection::from_gpx(&gpx, &Config::default()).unwrap();
        assert_eq!(collection.name(), Some("Morning ride"));
    }

    #[test]
    fn test_invalid_points_are_skipped_by_default() {
        let mut gpx = create_test_gpx();
        gpx.tracks[0].segments[0]
            .points
            .insert(1, create_test_waypoint(95.0, 0.0));

        let collection = Collection::from_gpx(&gpx, &Config::default()).unwrap();
        assert_eq!(collection.point_count(), 3);
    }

    #[test]
    fn test_invalid_points_fail_when_not_skipped() {
        let mut gpx = create_test_gpx();
        gpx.tracks[0].segments[0]
            .points
            .push(create_test_waypoint(0.0, 200.0));

        let config = Config {
            skip_invalid_points: false,
        };
        let result = Collection::from_gpx(&gpx, &config);
        assert_eq!(
            result,
            Err(DataError::InvalidCoordinate {
                latitude: 0.0,
                longitude: 200.0
            })
        );
    }

    #[test]
    fn test_empty_document() {
        let collection = Collection::try_from(Gpx::default()).unwrap();
        assert!(collection.is_empty());
        assert_eq!(collection.length_2d(), 0.0);
        assert!(collection.bounds().is_empty());
    }
}
