use {
    chrono::{DateTime, Utc},
    core::fmt,
    std::sync::Arc,
};

pub trait ClockImpl: fmt::Debug + Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// `None` means wall-clock time.
pub type Clock = Option<Arc<dyn ClockImpl>>;

pub fn now(clock: &Clock) -> DateTime<Utc> {
    clock
        .as_ref()
        .map(|clock| clock.now())
        .unwrap_or_else(Utc::now)
}
