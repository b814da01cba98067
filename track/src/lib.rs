#[macro_use]
extern crate anyhow;
#[macro_use]
extern crate log;

mod ingest;
mod point;
mod track;

use serde::Deserialize;

pub use self::ingest::{load_csv, points_from_json, PointRecord};
pub use self::point::TrackPoint;
pub use self::track::{EmptyTrackError, Track};

/// Identifies one moving entity (vehicle, vessel) in ingested data.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize)]
pub struct TrackName(pub String);
