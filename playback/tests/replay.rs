//! Drives the clock against real tracks, the way a map UI would.

use geom::{Duration, Pt2D, Time};
use playback::{Clock, ClockOptions, FrameScheduler, FrameToken, TrackController};
use track::{Track, TrackPoint};

/// Owns a handful of tracks and answers the clock's three questions. Instead
/// of rendering, it records the trail length of every track at each redraw.
struct TrackSet {
    tracks: Vec<Track>,
    redraws: Vec<(Time, Vec<usize>)>,
}

impl TrackSet {
    fn new(tracks: Vec<Track>) -> Self {
        Self {
            tracks,
            redraws: Vec::new(),
        }
    }
}

impl TrackController for TrackSet {
    fn min_time(&self) -> Time {
        self.tracks
            .iter()
            .map(|t| t.first_point().unwrap().time)
            .min()
            .unwrap()
    }

    fn max_time(&self) -> Time {
        self.tracks
            .iter()
            .map(|t| t.last_point().unwrap().time)
            .max()
            .unwrap()
    }

    fn advance_to(&mut self, time: Time) {
        let trails = self
            .tracks
            .iter()
            .map(|t| t.points_before(time).len())
            .collect();
        self.redraws.push((time, trails));
    }
}

/// Hands out tokens and trusts the test to fire frames by hand.
#[derive(Default)]
struct ManualFrames {
    next: usize,
}

impl FrameScheduler for ManualFrames {
    fn schedule_frame(&mut self) -> FrameToken {
        self.next += 1;
        FrameToken(self.next)
    }
    fn cancel_frame(&mut self, _: FrameToken) {}
}

fn secs(s: f64) -> Time {
    Time::START_OF_DAY + Duration::seconds(s)
}

fn two_boats() -> Vec<Track> {
    let ferry = Track::new(vec![
        TrackPoint::new(secs(0.0), Pt2D::new(0.0, 0.0)),
        TrackPoint::new(secs(60.0), Pt2D::new(600.0, 0.0)),
        TrackPoint::new(secs(120.0), Pt2D::new(600.0, 600.0)),
    ]);
    // Leaves later, arrives later
    let tug = Track::new(vec![
        TrackPoint::new(secs(30.0), Pt2D::new(100.0, 100.0)),
        TrackPoint::new(secs(180.0), Pt2D::new(400.0, 100.0)),
    ]);
    vec![ferry, tug]
}

#[test]
fn replay_to_completion() {
    let controller = TrackSet::new(two_boats());
    let mut clock = Clock::new(
        controller,
        ManualFrames::default(),
        ClockOptions {
            speed: 1,
            max_speed: 10,
        },
    );
    assert_eq!(clock.start_time(), secs(0.0));
    assert_eq!(clock.end_time(), secs(180.0));

    clock.start();
    let mut now = 0.0;
    while clock.is_playing() {
        clock.on_frame(Duration::seconds(now));
        // An uneven frame cadence, like a real display
        now += 25.0;
    }

    let redraws = &clock.controller().redraws;
    // Simulated time only moves forward
    for pair in redraws.windows(2) {
        assert!(pair[0].0 <= pair[1].0);
    }
    // The last redraw happens exactly at the end of the data
    assert_eq!(redraws.last().unwrap().0, secs(180.0));
    // By then the ferry's whole trail is visible (3 samples, nothing
    // synthesized past its end), and the tug's 2 samples are too
    assert_eq!(redraws.last().unwrap().1, vec![3, 2]);
}

#[test]
fn trails_grow_as_time_passes() {
    let controller = TrackSet::new(two_boats());
    let mut clock = Clock::new(
        controller,
        ManualFrames::default(),
        ClockOptions::default(),
    );

    // Before the tug has left, its trail is empty; the ferry is mid-leg, so
    // its trail is one sample plus a synthesized position
    clock.seek(secs(20.0));
    // At 90s both are underway
    clock.seek(secs(90.0));

    let redraws = &clock.controller().redraws;
    assert_eq!(redraws[0], (secs(20.0), vec![2, 0]));
    assert_eq!(redraws[1], (secs(90.0), vec![3, 2]));
}

#[test]
fn observers_see_every_tick() {
    use std::cell::RefCell;
    use std::rc::Rc;

    let controller = TrackSet::new(two_boats());
    let mut clock = Clock::new(
        controller,
        ManualFrames::default(),
        ClockOptions {
            speed: 6,
            max_speed: 10,
        },
    );
    let ticks = Rc::new(RefCell::new(Vec::new()));
    let log = Rc::clone(&ticks);
    clock.on_tick(move |time| log.borrow_mut().push(time));

    clock.start();
    let mut now = 0.0;
    while clock.is_playing() {
        clock.on_frame(Duration::seconds(now));
        now += 1.0;
    }

    let ticks = ticks.borrow();
    assert_eq!(ticks.len(), clock.controller().redraws.len());
    assert_eq!(*ticks.last().unwrap(), secs(180.0));
}
