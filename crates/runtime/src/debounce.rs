use foundation::time::Time;

/// Holds the latest value until it has been quiet for `quiet_secs`.
///
/// Every `push` restarts the quiet period; `poll` hands the value out once the
/// deadline has passed, and only once.
#[derive(Debug, Clone, PartialEq)]
pub struct Debouncer<T> {
    quiet_secs: f64,
    pending: Option<(T, Time)>,
}

impl<T> Debouncer<T> {
    pub fn new(quiet_secs: f64) -> Self {
        Self {
            quiet_secs: quiet_secs.max(0.0),
            pending: None,
        }
    }

    pub fn push(&mut self, value: T, now: Time) {
        self.pending = Some((value, now.after(self.quiet_secs)));
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// When the pending value becomes due, if any.
    pub fn deadline(&self) -> Option<Time> {
        self.pending.as_ref().map(|(_, at)| *at)
    }

    pub fn poll(&mut self, now: Time) -> Option<T> {
        match &self.pending {
            Some((_, deadline)) if now >= *deadline => self.pending.take().map(|(v, _)| v),
            _ => None,
        }
    }
}
