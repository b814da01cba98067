use std::collections::BTreeMap;
use std::io::Read;

use anyhow::Result;
use chrono::{NaiveDateTime, Timelike};
use geom::{Angle, Duration, GPSBounds, LonLat, Pt2D, Time};
use serde::Deserialize;

use crate::{Track, TrackName, TrackPoint};

/// One entry in the JSON point-list format: coordinates already in planar
/// space, time in seconds on the track's time scale, optional heading and
/// metadata.
#[derive(Clone, Debug, Deserialize)]
pub struct PointRecord {
    pub time: f64,
    pub lat: f64,
    pub lng: f64,
    #[serde(default)]
    pub dir: Option<f64>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub info: Option<serde_json::Value>,
}

impl PointRecord {
    pub fn into_point(self) -> Result<TrackPoint> {
        if !self.time.is_finite() || !self.lat.is_finite() || !self.lng.is_finite() {
            bail!("non-finite field in point record at time {}", self.time);
        }
        if self.time < 0.0 {
            bail!("negative time {} in point record", self.time);
        }
        Ok(TrackPoint {
            time: Time::START_OF_DAY + Duration::seconds(self.time),
            pos: Pt2D::new(self.lng, self.lat),
            dir: self.dir.map(Angle::degrees),
            is_origin: true,
            color: self.color,
            info: self.info,
        })
    }
}

/// Parses a JSON array of point records.
pub fn points_from_json<R: Read>(reader: R) -> Result<Vec<TrackPoint>> {
    let records: Vec<PointRecord> = serde_json::from_reader(reader)?;
    let mut points = Vec::new();
    for rec in records {
        points.push(rec.into_point()?);
    }
    Ok(points)
}

/// Reads AVL-style CSV rows (vehicle name, datetime, geodetic position,
/// optional heading), projects everything into one planar coordinate space,
/// and groups the samples into a track per vehicle.
pub fn load_csv<R: Read>(reader: R) -> Result<(GPSBounds, BTreeMap<TrackName, Track>)> {
    // Read raw data
    let mut data_per_vehicle: BTreeMap<TrackName, Vec<(LonLat, Time, Option<Angle>)>> =
        BTreeMap::new();
    for rec in csv::Reader::from_reader(reader).deserialize() {
        let rec: Row = rec?;

        let datetime = NaiveDateTime::parse_from_str(&rec.datetime, "%Y-%m-%d %H:%M:%S")?;
        // Ignore the date
        let time = datetime.time();
        let time = Time::START_OF_DAY
            + Duration::hours(time.hour() as usize)
            + Duration::minutes(time.minute() as usize)
            + Duration::seconds(time.second() as f64);

        let pos = LonLat::new(rec.longitude, rec.latitude);

        data_per_vehicle
            .entry(rec.name)
            .or_insert_with(Vec::new)
            .push((pos, time, rec.heading.map(Angle::degrees)));
    }

    // Calculate bounds from this one file
    let mut gps_bounds = GPSBounds::new();
    for samples in data_per_vehicle.values() {
        for (pos, _, _) in samples {
            gps_bounds.update(*pos);
        }
    }

    // Build tracks
    let mut total = 0;
    let mut results = BTreeMap::new();
    for (name, samples) in data_per_vehicle {
        let mut points = Vec::new();
        for (gps, time, heading) in samples {
            let mut pt = TrackPoint::new(time, gps.to_pt(&gps_bounds));
            pt.dir = heading;
            points.push(pt);
        }
        total += points.len();
        results.insert(name, Track::new(points));
    }
    info!(
        "Loaded {} samples across {} tracks",
        total,
        results.len()
    );
    Ok((gps_bounds, results))
}

#[derive(Deserialize)]
struct Row {
    name: TrackName,
    datetime: String,
    latitude: f64,
    longitude: f64,
    #[serde(default)]
    heading: Option<f64>,
}
