use std::collections::BTreeMap;

use geom::{Angle, Distance, Pt2D, Time};
use thiserror::Error;

use crate::TrackPoint;

#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
#[error("track has no points")]
pub struct EmptyTrackError;

/// An ordered, time-indexed sequence of positions for one moving entity.
/// Answers "where was it at time t" for any t between the first and last
/// sample, synthesizing positions between samples.
#[derive(Clone)]
pub struct Track {
    // Ascending time; ties keep insertion order
    points: Vec<TrackPoint>,
    // Exact sample time to its position in `points`. For duplicate times, the
    // last-inserted point wins.
    time_index: BTreeMap<Time, usize>,
}

impl Track {
    pub fn new(mut points: Vec<TrackPoint>) -> Self {
        for pt in &mut points {
            pt.is_origin = true;
        }
        let mut track = Self {
            points,
            time_index: BTreeMap::new(),
        };
        track.update();
        track
    }

    pub fn add_point(&mut self, point: TrackPoint) {
        self.add_points(vec![point]);
    }

    /// Appends samples, in any time order. They're forcibly marked as origin
    /// points.
    pub fn add_points(&mut self, points: Vec<TrackPoint>) {
        for mut pt in points {
            pt.is_origin = true;
            self.points.push(pt);
        }
        self.update();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// All stored sample times, ascending. Duplicates are kept.
    pub fn times(&self) -> Vec<Time> {
        self.points.iter().map(|pt| pt.time).collect()
    }

    pub fn first_point(&self) -> Result<&TrackPoint, EmptyTrackError> {
        self.points.first().ok_or(EmptyTrackError)
    }

    pub fn last_point(&self) -> Result<&TrackPoint, EmptyTrackError> {
        self.points.last().ok_or(EmptyTrackError)
    }

    /// The stored sample at exactly this time, if any. Never interpolates.
    pub fn point_at(&self, time: Time) -> Option<&TrackPoint> {
        self.time_index.get(&time).map(|idx| &self.points[*idx])
    }

    /// Where the entity was at `time`: the stored sample if one exists, else
    /// a position synthesized from the two samples bracketing `time`. None if
    /// `time` falls outside the sampled range.
    pub fn interpolate(&self, time: Time) -> Option<TrackPoint> {
        if let Some(pt) = self.point_at(time) {
            return Some(pt.clone());
        }
        let first = self.points.first()?;
        let last = self.points.last()?;
        if time < first.time || time > last.time {
            return None;
        }
        if self.points.len() == 1 {
            return Some(first.clone());
        }

        // Find the adjacent pair of samples bracketing `time`. The range and
        // exact-match checks above guarantee t0 < time < t1.
        let mut left = 0;
        let mut right = self.points.len() - 1;
        while right - left != 1 {
            let mid = (left + right) / 2;
            if time > self.points[mid].time {
                left = mid;
            } else {
                right = mid;
            }
        }
        let t0 = self.points[left].time;
        let t1 = self.points[right].time;
        // Look up through the index, so a duplicated time resolves to the
        // same point an exact query would return
        let p0 = &self.points[self.time_index[&t0]];
        let p1 = &self.points[self.time_index[&t1]];

        let dist = p0.pos.dist_to(p1.pos);
        // Different times, same place: the entity is parked
        if dist <= Distance::ZERO {
            return Some(p1.clone());
        }

        // Treat motion between the two samples as constant-velocity and
        // straight-line
        let s = dist.inner_meters();
        let cosx = (p1.pos.x() - p0.pos.x()) / s;
        let sinx = (p1.pos.y() - p0.pos.y()) / s;
        let speed = s / (t1 - t0).inner_seconds();
        let step = speed * (time - t0).inner_seconds();
        let pos = Pt2D::new(p0.pos.x() + step * cosx, p0.pos.y() + step * sinx);

        Some(TrackPoint {
            time,
            pos,
            // A measured heading on the later sample beats the computed one
            dir: Some(p1.dir.unwrap_or_else(|| heading(p0.pos, p1.pos, sinx))),
            is_origin: false,
            color: p0.color.clone(),
            info: p0.info.clone(),
        })
    }

    /// Everything up to and including `time`: clones of all samples strictly
    /// before it, then the interpolated (or exact) position at `time` itself
    /// when it's within the sampled range. This is the query a renderer uses
    /// to draw a track's trail.
    pub fn points_before(&self, time: Time) -> Vec<TrackPoint> {
        let mut result: Vec<TrackPoint> = self
            .points
            .iter()
            .filter(|pt| pt.time < time)
            .cloned()
            .collect();
        result.extend(self.interpolate(time));
        result
    }

    fn update(&mut self) {
        // Stable, so samples sharing a time keep insertion order and the
        // index maps that time to the last-inserted one
        self.points.sort_by_key(|pt| pt.time);
        self.time_index.clear();
        for (idx, pt) in self.points.iter().enumerate() {
            self.time_index.insert(pt.time, idx);
        }
    }
}

/// Direction of travel in degrees [0, 360): 0 points straight up the y axis,
/// increasing clockwise.
fn heading(p0: Pt2D, p1: Pt2D, sinx: f64) -> Angle {
    let degs = if p1.x() >= p0.x() {
        90.0 - sinx.asin().to_degrees()
    } else {
        270.0 + sinx.asin().to_degrees()
    };
    Angle::degrees(degs)
}
