#[macro_use]
extern crate log;

mod clock;
mod events;
mod scheduler;

use geom::Time;

pub use self::clock::{Clock, ClockOptions};
pub use self::events::Subscription;
pub use self::scheduler::{FrameScheduler, FrameToken};

/// The aggregate that owns the tracks being replayed. The clock only needs
/// its overall time bounds and a way to ask for a redraw at a given time; how
/// it draws (and how many tracks it holds) is its own business.
pub trait TrackController {
    /// The earliest sample time across all tracks
    fn min_time(&self) -> Time;
    /// The latest sample time across all tracks
    fn max_time(&self) -> Time;
    /// Redraw everything as of `time`. Must tolerate being called repeatedly
    /// with the same value.
    fn advance_to(&mut self, time: Time);
}
