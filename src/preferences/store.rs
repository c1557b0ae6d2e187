//! Observable preference cells

use super::{
    Preferences, DEFAULT_ANIMATIONS_ON, DEFAULT_ANIMATION_SPEED, DEFAULT_SOUND_ON,
    DEFAULT_UNCEASING_ANIMATIONS, DEFAULT_VOLUME,
};
use parking_lot::{Mutex, RwLock};
use std::collections::VecDeque;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Weak};

type Subscriber<T> = Arc<dyn Fn(&T) + Send + Sync>;

struct Cell<T> {
    value: RwLock<T>,
    subscribers: Mutex<Vec<(u64, Subscriber<T>)>>,
    next_id: AtomicU64,
    pending: Mutex<Pending<T>>,
}

/// Values still to be announced, oldest first
struct Pending<T> {
    values: VecDeque<T>,
    draining: bool,
}

/// A shared value that notifies subscribers when it changes.
///
/// Clones are handles to the same cell.
pub struct Observable<T> {
    cell: Arc<Cell<T>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            cell: Arc::clone(&self.cell),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Observable").field(&*self.cell.value.read()).finish()
    }
}

impl<T: Clone + Send + Sync + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            cell: Arc::new(Cell {
                value: RwLock::new(value),
                subscribers: Mutex::new(Vec::new()),
                next_id: AtomicU64::new(0),
                pending: Mutex::new(Pending {
                    values: VecDeque::new(),
                    draining: false,
                }),
            }),
        }
    }

    /// Current value
    pub fn get(&self) -> T {
        self.cell.value.read().clone()
    }

    /// Replace the value and notify every subscriber in subscription order.
    ///
    /// A `set` made from inside a subscriber is queued and announced once
    /// the current round has reached every subscriber, so each subscriber
    /// sees values in order and ends on the current one.
    pub fn set(&self, value: T) {
        *self.cell.value.write() = value.clone();
        {
            let mut pending = self.cell.pending.lock();
            pending.values.push_back(value);
            if pending.draining {
                return;
            }
            pending.draining = true;
        }

        loop {
            let next = {
                let mut pending = self.cell.pending.lock();
                match pending.values.pop_front() {
                    Some(value) => value,
                    None => {
                        pending.draining = false;
                        return;
                    }
                }
            };
            // Snapshot so subscribers may read, set or unsubscribe re-entrantly
            let subscribers: Vec<Subscriber<T>> = self
                .cell
                .subscribers
                .lock()
                .iter()
                .map(|(_, f)| Arc::clone(f))
                .collect();
            for subscriber in subscribers {
                subscriber(&next);
            }
        }
    }

    /// Register `f`, calling it once right away with the current value
    pub fn subscribe(&self, f: impl Fn(&T) + Send + Sync + 'static) -> Subscription {
        let id = self.cell.next_id.fetch_add(1, Ordering::Relaxed);
        let f: Subscriber<T> = Arc::new(f);
        self.cell.subscribers.lock().push((id, Arc::clone(&f)));
        f(&self.get());

        let weak: Weak<Cell<T>> = Arc::downgrade(&self.cell);
        Subscription {
            cancel: Box::new(move || {
                if let Some(cell) = weak.upgrade() {
                    cell.subscribers.lock().retain(|(sid, _)| *sid != id);
                }
            }),
        }
    }

    /// Number of registered subscribers
    pub fn subscriber_count(&self) -> usize {
        self.cell.subscribers.lock().len()
    }
}

/// Handle returned by [`Observable::subscribe`].
///
/// Dropping the handle keeps the subscription alive; call
/// [`Subscription::unsubscribe`] to stop notifications.
pub struct Subscription {
    cancel: Box<dyn FnOnce() + Send + Sync>,
}

impl Subscription {
    pub fn unsubscribe(self) {
        (self.cancel)();
    }
}

/// Live preference values, one observable cell per preference
#[derive(Clone, Debug)]
pub struct PreferenceStore {
    pub sound_on: Observable<bool>,
    pub volume: Observable<f64>,
    pub animations_on: Observable<bool>,
    pub unceasing_animations: Observable<bool>,
    pub animation_speed: Observable<f64>,
}

impl Default for PreferenceStore {
    fn default() -> Self {
        Self::new()
    }
}

impl PreferenceStore {
    /// Create a store holding the built-in defaults
    pub fn new() -> Self {
        Self {
            sound_on: Observable::new(DEFAULT_SOUND_ON),
            volume: Observable::new(DEFAULT_VOLUME),
            animations_on: Observable::new(DEFAULT_ANIMATIONS_ON),
            unceasing_animations: Observable::new(DEFAULT_UNCEASING_ANIMATIONS),
            animation_speed: Observable::new(DEFAULT_ANIMATION_SPEED),
        }
    }

    /// Write every set field into its cell, leaving unset cells alone
    pub fn apply_overrides(&self, overrides: &Preferences) {
        if let Some(on) = overrides.animations_on {
            self.animations_on.set(on);
        }
        if let Some(on) = overrides.unceasing_animations {
            self.unceasing_animations.set(on);
        }
        if let Some(on) = overrides.sound_on {
            self.sound_on.set(on);
        }
        if let Some(volume) = overrides.volume {
            self.volume.set(volume);
        }
        if let Some(speed) = overrides.animation_speed {
            self.animation_speed.set(speed);
        }
    }

    /// Current values with every field set
    pub fn snapshot(&self) -> Preferences {
        Preferences {
            animations_on: Some(self.animations_on.get()),
            unceasing_animations: Some(self.unceasing_animations.get()),
            sound_on: Some(self.sound_on.get()),
            volume: Some(self.volume.get()),
            animation_speed: Some(self.animation_speed.get()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subscribe_replays_current_value() {
        let cell = Observable::new(3);
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _sub = cell.subscribe(move |v| sink.lock().push(*v));
        assert_eq!(*seen.lock(), vec![3]);

        cell.set(5);
        assert_eq!(*seen.lock(), vec![3, 5]);
    }

    #[test]
    fn test_subscribers_notified_in_order() {
        let cell = Observable::new(false);
        let order = Arc::new(Mutex::new(Vec::new()));
        for name in ["first", "second", "third"] {
            let order = Arc::clone(&order);
            let _ = cell.subscribe(move |v| order.lock().push((name, *v)));
        }
        order.lock().clear();

        cell.set(true);
        assert_eq!(
            *order.lock(),
            vec![("first", true), ("second", true), ("third", true)]
        );
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let cell = Observable::new(0);
        let count = Arc::new(Mutex::new(0));
        let counter = Arc::clone(&count);
        let sub = cell.subscribe(move |_| *counter.lock() += 1);
        assert_eq!(cell.subscriber_count(), 1);

        sub.unsubscribe();
        cell.set(1);
        assert_eq!(*count.lock(), 1);
        assert_eq!(cell.subscriber_count(), 0);
    }

    #[test]
    fn test_subscriber_can_read_cell() {
        let cell = Observable::new(1);
        let reader = cell.clone();
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _ = cell.subscribe(move |_| sink.lock().push(reader.get()));
        cell.set(2);
        assert_eq!(*seen.lock(), vec![1, 2]);
    }

    #[test]
    fn test_set_from_subscriber_reaches_later_subscribers_last() {
        let cell = Observable::new(0);
        let writer = cell.clone();
        let _ = cell.subscribe(move |v| {
            if *v == 1 {
                writer.set(2);
            }
        });
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&seen);
        let _ = cell.subscribe(move |v| sink.lock().push(*v));

        cell.set(1);
        assert_eq!(cell.get(), 2);
        assert_eq!(*seen.lock(), vec![0, 1, 2]);
        assert_eq!(seen.lock().last(), Some(&cell.get()));

        // The queue is drained, so plain sets notify right away again
        cell.set(3);
        assert_eq!(seen.lock().last(), Some(&3));
    }

    #[test]
    fn test_store_defaults() {
        let store = PreferenceStore::new();
        assert!(store.sound_on.get());
        assert_eq!(store.volume.get(), 1.0);
        assert!(store.animations_on.get());
        assert!(!store.unceasing_animations.get());
        assert_eq!(store.animation_speed.get(), 4.0);
    }

    #[test]
    fn test_no_range_validation() {
        let store = PreferenceStore::new();
        store.volume.set(-3.5);
        assert_eq!(store.volume.get(), -3.5);
    }

    #[test]
    fn test_apply_overrides_skips_unset_fields() {
        let store = PreferenceStore::new();
        store.apply_overrides(&Preferences::none().with_sound_on(false).with_volume(0.8));
        assert!(!store.sound_on.get());
        assert_eq!(store.volume.get(), 0.8);
        assert!(store.animations_on.get());
        assert_eq!(store.animation_speed.get(), 4.0);
    }

    #[test]
    fn test_clones_share_cells() {
        let store = PreferenceStore::new();
        let other = store.clone();
        other.sound_on.set(false);
        assert!(!store.sound_on.get());
        assert_eq!(store.snapshot().sound_on, Some(false));
    }
}
