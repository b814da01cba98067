use geom::{Angle, Pt2D, Time};

/// One position on a track: either a recorded sample or a point synthesized
/// between two samples.
#[derive(Clone, Debug, PartialEq)]
pub struct TrackPoint {
    pub time: Time,
    /// In the same planar space used for drawing; x is longitude-like, y is
    /// latitude-like. Callers project from geodetic coordinates up front.
    pub pos: Pt2D,
    /// Heading in degrees [0, 360), measured clockwise from straight up
    pub dir: Option<Angle>,
    /// True for caller-supplied samples, false for interpolated points
    pub is_origin: bool,
    // Opaque passthrough; interpolated points inherit these from the sample
    // they emerged from
    pub color: Option<String>,
    pub info: Option<serde_json::Value>,
}

impl TrackPoint {
    pub fn new(time: Time, pos: Pt2D) -> Self {
        Self {
            time,
            pos,
            dir: None,
            is_origin: true,
            color: None,
            info: None,
        }
    }
}
