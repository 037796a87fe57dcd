#![forbid(unsafe_code)]

//! Deferred, ordered change notifications.
//!
//! Cores never call listeners directly. Every mutation records what changed
//! in a [`Notifications`] queue; the owning widget drains the queue once at
//! the end of each public call and hands it to [`SliderSignals::dispatch`].
//!
//! # Invariants
//!
//! 1. Dispatch order is fixed: pressed, range, value, moved, released.
//! 2. Each kind is emitted at most once per drain, carrying the latest payload.
//! 3. An empty queue emits nothing.

use bitflags::bitflags;
use slidekit_core::signal::Signal;

bitflags! {
    /// Kinds of change recorded in a [`Notifications`] queue.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Changes: u8 {
        const PRESSED  = 0b0_0001;
        const RANGE    = 0b0_0010;
        const VALUE    = 0b0_0100;
        const MOVED    = 0b0_1000;
        const RELEASED = 0b1_0000;
    }
}

/// One emitted notification, as seen by listeners.
///
/// `T` is the range endpoint type, `V` the value payload (a scalar for
/// single-handle sliders, a sequence for range sliders).
#[derive(Debug, Clone, PartialEq)]
pub enum SliderNotification<T, V> {
    Pressed,
    RangeChanged(T, T),
    ValueChanged(V),
    SliderMoved(V),
    Released,
}

/// Coalescing queue of pending notifications.
#[derive(Debug, Clone, PartialEq)]
pub struct Notifications<T, V> {
    changes: Changes,
    range: Option<(T, T)>,
    value: Option<V>,
    moved: Option<V>,
}

impl<T, V> Default for Notifications<T, V> {
    fn default() -> Self {
        Self {
            changes: Changes::empty(),
            range: None,
            value: None,
            moved: None,
        }
    }
}

impl<T, V> Notifications<T, V> {
    pub(crate) fn pressed(&mut self) {
        self.changes |= Changes::PRESSED;
    }

    pub(crate) fn released(&mut self) {
        self.changes |= Changes::RELEASED;
    }

    pub(crate) fn range(&mut self, minimum: T, maximum: T) {
        self.changes |= Changes::RANGE;
        self.range = Some((minimum, maximum));
    }

    pub(crate) fn value(&mut self, value: V) {
        self.changes |= Changes::VALUE;
        self.value = Some(value);
    }

    pub(crate) fn moved(&mut self, position: V) {
        self.changes |= Changes::MOVED;
        self.moved = Some(position);
    }

    /// Drain the queue, leaving it empty.
    pub(crate) fn take(&mut self) -> Self {
        std::mem::take(self)
    }

    /// Kinds currently queued.
    #[must_use]
    pub fn changes(&self) -> Changes {
        self.changes
    }

    /// Whether nothing is queued.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// Convert payloads, keeping the queued kinds.
    #[must_use]
    pub fn map<U, W>(
        self,
        mut range: impl FnMut(T) -> U,
        mut value: impl FnMut(V) -> W,
    ) -> Notifications<U, W> {
        Notifications {
            changes: self.changes,
            range: self.range.map(|(lo, hi)| (range(lo), range(hi))),
            value: self.value.map(&mut value),
            moved: self.moved.map(&mut value),
        }
    }

    /// The queue in dispatch order.
    #[must_use]
    pub fn into_ordered(self) -> Vec<SliderNotification<T, V>> {
        let mut out = Vec::with_capacity(self.changes.bits().count_ones() as usize);
        if self.changes.contains(Changes::PRESSED) {
            out.push(SliderNotification::Pressed);
        }
        if let Some((lo, hi)) = self.range {
            out.push(SliderNotification::RangeChanged(lo, hi));
        }
        if let Some(v) = self.value {
            out.push(SliderNotification::ValueChanged(v));
        }
        if let Some(p) = self.moved {
            out.push(SliderNotification::SliderMoved(p));
        }
        if self.changes.contains(Changes::RELEASED) {
            out.push(SliderNotification::Released);
        }
        out
    }
}

/// The notification channels a slider exposes.
///
/// Each widget owns its own set; listeners connect through
/// [`Signal::connect`] and stay connected while the returned
/// `Subscription` lives.
pub struct SliderSignals<T, V> {
    pub value_changed: Signal<V>,
    pub range_changed: Signal<(T, T)>,
    pub slider_moved: Signal<V>,
    pub slider_pressed: Signal<()>,
    pub slider_released: Signal<()>,
}

impl<T: 'static, V: 'static> Default for SliderSignals<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, V> std::fmt::Debug for SliderSignals<T, V> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SliderSignals")
            .field("value_changed", &self.value_changed)
            .field("range_changed", &self.range_changed)
            .field("slider_moved", &self.slider_moved)
            .finish_non_exhaustive()
    }
}

impl<T: 'static, V: 'static> SliderSignals<T, V> {
    /// Fresh, unconnected channels.
    #[must_use]
    pub fn new() -> Self {
        Self {
            value_changed: Signal::new("value_changed"),
            range_changed: Signal::new("range_changed"),
            slider_moved: Signal::new("slider_moved"),
            slider_pressed: Signal::new("slider_pressed"),
            slider_released: Signal::new("slider_released"),
        }
    }

    /// Emit a drained queue in dispatch order.
    pub fn dispatch(&self, notifications: Notifications<T, V>) {
        if notifications.is_empty() {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(
            message = "slider.notify",
            changes = ?notifications.changes()
        );
        for notification in notifications.into_ordered() {
            match notification {
                SliderNotification::Pressed => {
                    self.slider_pressed.emit(&());
                }
                SliderNotification::RangeChanged(lo, hi) => {
                    self.range_changed.emit(&(lo, hi));
                }
                SliderNotification::ValueChanged(v) => {
                    self.value_changed.emit(&v);
                }
                SliderNotification::SliderMoved(p) => {
                    self.slider_moved.emit(&p);
                }
                SliderNotification::Released => {
                    self.slider_released.emit(&());
                }
            }
        }
    }

    /// Block or unblock every channel at once.
    pub fn set_blocked(&self, blocked: bool) {
        self.value_changed.set_blocked(blocked);
        self.range_changed.set_blocked(blocked);
        self.slider_moved.set_blocked(blocked);
        self.slider_pressed.set_blocked(blocked);
        self.slider_released.set_blocked(blocked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn dispatch_order_is_fixed() {
        let mut queue = Notifications::<i32, i32>::default();
        queue.released();
        queue.moved(4);
        queue.value(4);
        queue.range(0, 10);
        queue.pressed();
        assert_eq!(
            queue.take().into_ordered(),
            vec![
                SliderNotification::Pressed,
                SliderNotification::RangeChanged(0, 10),
                SliderNotification::ValueChanged(4),
                SliderNotification::SliderMoved(4),
                SliderNotification::Released,
            ]
        );
        assert!(queue.is_empty());
    }

    #[test]
    fn latest_payload_wins() {
        let mut queue = Notifications::<i32, i32>::default();
        queue.value(1);
        queue.value(2);
        queue.value(3);
        assert_eq!(
            queue.into_ordered(),
            vec![SliderNotification::ValueChanged(3)]
        );
    }

    #[test]
    fn map_preserves_kinds() {
        let mut queue = Notifications::<i32, i32>::default();
        queue.range(0, 200);
        queue.moved(150);
        let mapped = queue.map(|v| f64::from(v) / 100.0, |v| f64::from(v) / 100.0);
        assert_eq!(mapped.changes(), Changes::RANGE | Changes::MOVED);
        assert_eq!(
            mapped.into_ordered(),
            vec![
                SliderNotification::RangeChanged(0.0, 2.0),
                SliderNotification::SliderMoved(1.5),
            ]
        );
    }

    #[test]
    fn signals_receive_dispatch_in_order() {
        let signals = SliderSignals::<i32, i32>::new();
        let log = Rc::new(RefCell::new(Vec::new()));
        let _subs = {
            let (a, b, c) = (Rc::clone(&log), Rc::clone(&log), Rc::clone(&log));
            (
                signals
                    .value_changed
                    .connect(move |v| a.borrow_mut().push(format!("value {v}"))),
                signals
                    .range_changed
                    .connect(move |(lo, hi)| b.borrow_mut().push(format!("range {lo} {hi}"))),
                signals
                    .slider_pressed
                    .connect(move |()| c.borrow_mut().push("pressed".to_owned())),
            )
        };

        let mut queue = Notifications::default();
        queue.value(5);
        queue.range(1, 9);
        queue.pressed();
        signals.dispatch(queue);

        assert_eq!(*log.borrow(), vec!["pressed", "range 1 9", "value 5"]);
    }

    #[test]
    fn blocked_signals_stay_silent() {
        let signals = SliderSignals::<i32, i32>::new();
        let hits = Rc::new(RefCell::new(0));
        let _sub = {
            let hits = Rc::clone(&hits);
            signals
                .value_changed
                .connect(move |_| *hits.borrow_mut() += 1)
        };
        signals.set_blocked(true);
        let mut queue = Notifications::default();
        queue.value(1);
        signals.dispatch(queue);
        assert_eq!(*hits.borrow(), 0);
    }
}
