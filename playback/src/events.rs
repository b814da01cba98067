use geom::Time;

/// Handle returned when subscribing to clock ticks; pass it back to
/// unsubscribe.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Subscription(usize);

// Observer list for tick notifications. Handlers run synchronously, in
// subscription order; no other ordering is guaranteed.
pub(crate) struct TickListeners {
    next_id: usize,
    handlers: Vec<(usize, Box<dyn FnMut(Time)>)>,
}

impl TickListeners {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            handlers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, handler: Box<dyn FnMut(Time)>) -> Subscription {
        let id = self.next_id;
        self.next_id += 1;
        self.handlers.push((id, handler));
        Subscription(id)
    }

    pub fn unsubscribe(&mut self, sub: Subscription) {
        self.handlers.retain(|(id, _)| *id != sub.0);
    }

    pub fn emit(&mut self, time: Time) {
        for (_, handler) in &mut self.handlers {
            handler(time);
        }
    }
}
