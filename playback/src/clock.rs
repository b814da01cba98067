use geom::{Duration, Time};

use crate::events::TickListeners;
use crate::{FrameScheduler, FrameToken, Subscription, TrackController};

/// Playback configuration, fixed at construction.
#[derive(Clone, Copy, Debug)]
pub struct ClockOptions {
    /// Speed level; each level doubles the simulated seconds per real second
    pub speed: i32,
    /// Ceiling for faster()
    pub max_speed: i32,
}

impl Default for ClockOptions {
    fn default() -> Self {
        Self {
            speed: 10,
            max_speed: 10,
        }
    }
}

/// Owns simulated time for one playback session, advancing it over scheduled
/// frames at a user-controlled speed and telling the bound controller to
/// redraw after every step.
pub struct Clock<C: TrackController, S: FrameScheduler> {
    controller: C,
    scheduler: S,
    cur_time: Time,
    speed: i32,
    max_speed: i32,
    pending: Option<FrameToken>,
    // Wall clock at the last processed frame. None whenever playback is
    // stopped, so resuming never counts idle real time as playback.
    last_frame: Option<Duration>,
    listeners: TickListeners,
}

impl<C: TrackController, S: FrameScheduler> Clock<C, S> {
    pub fn new(controller: C, scheduler: S, opts: ClockOptions) -> Self {
        let cur_time = controller.min_time();
        Self {
            controller,
            scheduler,
            cur_time,
            speed: opts.speed,
            max_speed: opts.max_speed,
            pending: None,
            last_frame: None,
            listeners: TickListeners::new(),
        }
    }

    pub fn start(&mut self) {
        if self.pending.is_some() {
            return;
        }
        debug!("Playback started at {}", self.cur_time);
        self.pending = Some(self.scheduler.schedule_frame());
    }

    pub fn stop(&mut self) {
        if let Some(token) = self.pending.take() {
            debug!("Playback stopped at {}", self.cur_time);
            self.scheduler.cancel_frame(token);
            self.last_frame = None;
        }
    }

    /// Rewind to the controller's earliest time and play from there.
    pub fn restart(&mut self) {
        self.stop();
        self.cur_time = self.controller.min_time();
        self.start();
    }

    /// Jump straight to `time`, redraw, and notify. Works whether or not
    /// playback is running, and doesn't change the running state. The
    /// elapsed-time baseline of an in-flight frame loop is left alone, so the
    /// next frame still steps from its pre-seek wall-clock reading.
    pub fn seek(&mut self, time: Time) {
        self.cur_time = time;
        self.controller.advance_to(self.cur_time);
        self.listeners.emit(self.cur_time);
    }

    /// Sets the speed level directly. Unlike slower/faster, no clamping:
    /// whatever's passed feeds the step formula on the next frame.
    pub fn set_speed(&mut self, speed: i32) {
        self.speed = speed;
        self.restart_frame_loop();
    }

    pub fn slower(&mut self) {
        if self.speed > 1 {
            self.speed -= 1;
        }
        self.restart_frame_loop();
    }

    pub fn faster(&mut self) {
        if self.speed < self.max_speed {
            self.speed += 1;
        }
        self.restart_frame_loop();
    }

    pub fn speed(&self) -> i32 {
        self.speed
    }

    pub fn current_time(&self) -> Time {
        self.cur_time
    }

    pub fn start_time(&self) -> Time {
        self.controller.min_time()
    }

    pub fn end_time(&self) -> Time {
        self.controller.max_time()
    }

    pub fn is_playing(&self) -> bool {
        self.pending.is_some()
    }

    pub fn controller(&self) -> &C {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut C {
        &mut self.controller
    }

    /// Runs `handler` after every processed frame and every seek, with the
    /// new simulated time.
    pub fn on_tick<F: FnMut(Time) + 'static>(&mut self, handler: F) -> Subscription {
        self.listeners.subscribe(Box::new(handler))
    }

    pub fn unsubscribe(&mut self, sub: Subscription) {
        self.listeners.unsubscribe(sub);
    }

    /// One step of the frame loop. The host calls this when the frame it was
    /// asked to schedule fires; `now` is its wall-clock reading, measured
    /// from any fixed epoch.
    pub fn on_frame(&mut self, now: Duration) {
        // A callback outliving stop() is dropped
        if self.pending.take().is_none() {
            return;
        }

        let elapsed = match self.last_frame {
            // First frame since starting
            None => Duration::ZERO,
            Some(last) => now - last,
        };
        self.last_frame = Some(now);

        let step = 2f64.powi(self.speed - 1) * elapsed;
        self.cur_time += step;

        let end = self.controller.max_time();
        let terminal = self.cur_time >= end;
        if terminal {
            self.cur_time = end;
        }

        self.controller.advance_to(self.cur_time);
        self.listeners.emit(self.cur_time);

        if terminal {
            debug!("Playback reached the end of the data at {}", end);
            self.last_frame = None;
        } else {
            self.pending = Some(self.scheduler.schedule_frame());
        }
    }

    // Stop and immediately start again, so the next frame's elapsed-time
    // baseline restarts at the new speed
    fn restart_frame_loop(&mut self) {
        if self.pending.is_some() {
            self.stop();
            self.start();
        }
    }
}
