/// Identifies one scheduled frame, so it can be cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameToken(pub usize);

/// The host's display-refresh scheduling primitive, injected into the clock.
///
/// A real implementation arranges for `Clock::on_frame` to be called on the
/// next repaint; tests drive frames by hand with synthetic timestamps. The
/// clock keeps at most one frame pending at a time, and a cancelled frame
/// must never fire.
pub trait FrameScheduler {
    fn schedule_frame(&mut self) -> FrameToken;
    fn cancel_frame(&mut self, token: FrameToken);
}
