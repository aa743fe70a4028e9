//! Shared once-per-second signal driving the "elapsed since creation" labels.
//!
//! The ticker itself has no clock; the UI owns a repeated `slint::Timer`
//! that calls [`ElapsedTimeTicker::tick`]. Each subscriber is held by a
//! [`Subscription`] guard and is removed as soon as the guard is dropped.

use chrono::{DateTime, Utc};
use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::{Rc, Weak};

type Callback = Rc<RefCell<dyn FnMut(DateTime<Utc>)>>;

#[derive(Default)]
struct Registry {
    next_id: u64,
    subscribers: BTreeMap<u64, Callback>,
}

/// Broadcast tick source shared by all displayed items.
#[derive(Clone, Default)]
pub struct ElapsedTimeTicker {
    registry: Rc<RefCell<Registry>>,
}

impl ElapsedTimeTicker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `callback` until the returned guard is dropped.
    #[must_use = "dropping the subscription unsubscribes immediately"]
    pub fn subscribe<F>(&self, callback: F) -> Subscription
    where
        F: FnMut(DateTime<Utc>) + 'static,
    {
        let mut registry = self.registry.borrow_mut();
        let id = registry.next_id;
        registry.next_id += 1;
        registry
            .subscribers
            .insert(id, Rc::new(RefCell::new(callback)));

        Subscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Delivers `now` to every live subscriber.
    pub fn tick(&self, now: DateTime<Utc>) {
        // Callbacks may subscribe or unsubscribe, so the registry is not
        // borrowed while they run.
        let callbacks: Vec<Callback> = self
            .registry
            .borrow()
            .subscribers
            .values()
            .cloned()
            .collect();

        for callback in callbacks {
            (&mut *callback.borrow_mut())(now);
        }
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.borrow().subscribers.len()
    }
}

/// Cancellation guard of one ticker subscription.
pub struct Subscription {
    id: u64,
    registry: Weak<RefCell<Registry>>,
}

impl Subscription {
    /// Unsubscribes now instead of at drop.
    pub fn cancel(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().subscribers.remove(&self.id);
        }
    }
}

/// Formats the time between `created` and `now` as `"{d}Days, HH:MM:SS"`.
///
/// A creation date in the future renders as zero.
pub fn format_elapsed(created: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let total = (now - created).num_seconds().max(0);
    let days = total / 86_400;
    let hours = (total % 86_400) / 3_600;
    let minutes = (total % 3_600) / 60;
    let seconds = total % 60;

    format!("{}Days, {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use std::cell::Cell;

    fn at(seconds: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(1_700_000_000 + seconds, 0).unwrap()
    }

    #[test]
    fn test_format_elapsed() {
        let created = at(0);
        assert_eq!(format_elapsed(created, created), "0Days, 00:00:00");
        assert_eq!(
            format_elapsed(created, created + Duration::seconds(3_725)),
            "0Days, 01:02:05"
        );
        assert_eq!(
            format_elapsed(created, created + Duration::days(3) + Duration::seconds(59)),
            "3Days, 00:00:59"
        );
    }

    #[test]
    fn test_future_creation_clamps_to_zero() {
        assert_eq!(format_elapsed(at(10), at(0)), "0Days, 00:00:00");
    }

    #[test]
    fn test_tick_reaches_every_subscriber() {
        let ticker = ElapsedTimeTicker::new();
        let a = Rc::new(Cell::new(0));
        let b = Rc::new(Cell::new(0));

        let a_clone = a.clone();
        let _sub_a = ticker.subscribe(move |_| a_clone.set(a_clone.get() + 1));
        let b_clone = b.clone();
        let _sub_b = ticker.subscribe(move |_| b_clone.set(b_clone.get() + 1));

        ticker.tick(at(1));
        ticker.tick(at(2));

        assert_eq!((a.get(), b.get()), (2, 2));
    }

    #[test]
    fn test_dropping_subscription_unsubscribes() {
        let ticker = ElapsedTimeTicker::new();
        let count = Rc::new(Cell::new(0));

        let count_clone = count.clone();
        let sub = ticker.subscribe(move |_| count_clone.set(count_clone.get() + 1));
        ticker.tick(at(1));
        assert_eq!(ticker.subscriber_count(), 1);

        drop(sub);
        ticker.tick(at(2));

        assert_eq!(count.get(), 1);
        assert_eq!(ticker.subscriber_count(), 0);
    }

    #[test]
    fn test_cancel_is_explicit_drop() {
        let ticker = ElapsedTimeTicker::new();
        let sub = ticker.subscribe(|_| {});
        sub.cancel();
        assert_eq!(ticker.subscriber_count(), 0);
    }

    #[test]
    fn test_subscription_outliving_ticker() {
        let ticker = ElapsedTimeTicker::new();
        let sub = ticker.subscribe(|_| {});
        drop(ticker);
        drop(sub);
    }

    #[test]
    fn test_callback_receives_tick_time() {
        let ticker = ElapsedTimeTicker::new();
        let seen = Rc::new(RefCell::new(String::new()));

        let seen_clone = seen.clone();
        let created = at(0);
        let _sub = ticker.subscribe(move |now| {
            *seen_clone.borrow_mut() = format_elapsed(created, now);
        });
        ticker.tick(at(61));

        assert_eq!(*seen.borrow(), "0Days, 00:01:01");
    }
}
