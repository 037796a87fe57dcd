#![forbid(unsafe_code)]

//! Typed observer registry.
//!
//! # Design
//!
//! A [`Signal<T>`] owns an ordered list of slots (callbacks taking `&T`).
//! [`Signal::connect`] hands back a [`Subscription`] guard that keeps the
//! slot alive; the signal itself only stores `Weak` references, so dropping
//! the guard disconnects the slot.
//!
//! Signals are owned by exactly one widget and are not shared between
//! instances. They are single-threaded (`Rc`/`RefCell`).
//!
//! # Invariants
//!
//! 1. Slots are invoked in connection order.
//! 2. A blocked signal invokes nothing and does not count the emission.
//! 3. Dead slots (dropped [`Subscription`] guards) are pruned lazily on emit.
//! 4. Live slots are collected before any is invoked, so a slot may connect
//!    further slots to the same signal; those only see later emissions.

use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

type SlotRc<T> = Rc<dyn Fn(&T)>;
type SlotWeak<T> = Weak<dyn Fn(&T)>;

/// A named notification channel carrying values of type `T`.
pub struct Signal<T> {
    name: &'static str,
    slots: RefCell<Vec<SlotWeak<T>>>,
    blocked: Cell<bool>,
    emitted: Cell<u64>,
}

impl<T> fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Signal")
            .field("name", &self.name)
            .field("slot_count", &self.slots.borrow().len())
            .field("blocked", &self.blocked.get())
            .field("emitted", &self.emitted.get())
            .finish()
    }
}

impl<T: 'static> Signal<T> {
    /// Create a signal with no slots.
    ///
    /// `name` shows up in trace output only.
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        Self {
            name,
            slots: RefCell::new(Vec::new()),
            blocked: Cell::new(false),
            emitted: Cell::new(0),
        }
    }

    /// Name given at construction.
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Connect a slot. The slot stays connected while the returned
    /// [`Subscription`] is alive.
    #[must_use = "dropping the Subscription disconnects the slot immediately"]
    pub fn connect(&self, slot: impl Fn(&T) + 'static) -> Subscription {
        let strong: SlotRc<T> = Rc::new(slot);
        self.slots.borrow_mut().push(Rc::downgrade(&strong));
        Subscription {
            _guard: Box::new(strong),
        }
    }

    /// Invoke every live slot with `value`.
    ///
    /// Returns the number of slots invoked.
    pub fn emit(&self, value: &T) -> usize {
        if self.blocked.get() {
            tracing::trace!(signal = self.name, "signal.blocked");
            return 0;
        }

        let live: Vec<SlotRc<T>> = {
            let mut slots = self.slots.borrow_mut();
            slots.retain(|w| w.strong_count() > 0);
            slots.iter().filter_map(Weak::upgrade).collect()
        };
        self.emitted.set(self.emitted.get().saturating_add(1));

        tracing::trace!(signal = self.name, slots = live.len(), "signal.emit");
        for slot in &live {
            slot(value);
        }
        live.len()
    }

    /// Block or unblock emission. Returns the previous state.
    pub fn set_blocked(&self, blocked: bool) -> bool {
        self.blocked.replace(blocked)
    }

    /// Whether emission is currently blocked.
    #[must_use]
    pub fn is_blocked(&self) -> bool {
        self.blocked.get()
    }

    /// Number of registered slots, including dead ones not yet pruned.
    #[must_use]
    pub fn slot_count(&self) -> usize {
        self.slots.borrow().len()
    }

    /// Number of unblocked emissions so far.
    #[must_use]
    pub fn emit_count(&self) -> u64 {
        self.emitted.get()
    }
}

/// RAII guard for a connected slot.
///
/// Dropping the `Subscription` drops the strong reference to the slot; the
/// signal's `Weak` fails to upgrade from then on.
pub struct Subscription {
    _guard: Box<dyn std::any::Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use tracing::field::{Field, Visit};
    use tracing_subscriber::Layer;
    use tracing_subscriber::layer::{Context, SubscriberExt};

    #[test]
    fn slots_run_in_connection_order() {
        let signal = Signal::<i32>::new("test");
        let log = Rc::new(RefCell::new(Vec::new()));

        let a = {
            let log = Rc::clone(&log);
            signal.connect(move |v| log.borrow_mut().push(("a", *v)))
        };
        let b = {
            let log = Rc::clone(&log);
            signal.connect(move |v| log.borrow_mut().push(("b", *v)))
        };

        assert_eq!(signal.emit(&7), 2);
        assert_eq!(*log.borrow(), vec![("a", 7), ("b", 7)]);
        drop((a, b));
    }

    #[test]
    fn dropping_subscription_disconnects() {
        let signal = Signal::<i32>::new("test");
        let hits = Rc::new(Cell::new(0));
        let sub = {
            let hits = Rc::clone(&hits);
            signal.connect(move |_| hits.set(hits.get() + 1))
        };
        signal.emit(&1);
        drop(sub);
        assert_eq!(signal.emit(&2), 0);
        assert_eq!(hits.get(), 1);
        assert_eq!(signal.slot_count(), 0);
    }

    #[test]
    fn blocked_signal_is_silent() {
        let signal = Signal::<()>::new("test");
        let hits = Rc::new(Cell::new(0));
        let _sub = {
            let hits = Rc::clone(&hits);
            signal.connect(move |_| hits.set(hits.get() + 1))
        };
        assert!(!signal.set_blocked(true));
        assert_eq!(signal.emit(&()), 0);
        assert!(signal.set_blocked(false));
        signal.emit(&());
        assert_eq!(hits.get(), 1);
        assert_eq!(signal.emit_count(), 1);
    }

    #[test]
    fn connecting_from_inside_a_slot_is_safe() {
        let signal = Rc::new(Signal::<i32>::new("test"));
        let late = Rc::new(RefCell::new(Vec::<Subscription>::new()));
        let seen = Rc::new(RefCell::new(Vec::new()));

        let _outer = {
            let signal_ref = Rc::downgrade(&signal);
            let late = Rc::clone(&late);
            let seen = Rc::clone(&seen);
            signal.connect(move |_| {
                if let Some(sig) = signal_ref.upgrade() {
                    let seen = Rc::clone(&seen);
                    late.borrow_mut()
                        .push(sig.connect(move |v| seen.borrow_mut().push(*v)));
                }
            })
        };

        signal.emit(&1);
        assert!(seen.borrow().is_empty());
        signal.emit(&2);
        assert_eq!(*seen.borrow(), vec![2]);
    }

    #[derive(Default)]
    struct EmitCapture {
        emits: Arc<Mutex<Vec<(String, u64)>>>,
    }

    impl<S: tracing::Subscriber> Layer<S> for EmitCapture {
        fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
            #[derive(Default)]
            struct V {
                message: Option<String>,
                signal: Option<String>,
                slots: Option<u64>,
            }
            impl Visit for V {
                fn record_str(&mut self, field: &Field, value: &str) {
                    if field.name() == "signal" {
                        self.signal = Some(value.to_owned());
                    }
                }
                fn record_u64(&mut self, field: &Field, value: u64) {
                    if field.name() == "slots" {
                        self.slots = Some(value);
                    }
                }
                fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
                    if field.name() == "message" {
                        self.message = Some(format!("{value:?}"));
                    }
                }
            }
            let mut v = V::default();
            event.record(&mut v);
            if v.message.as_deref() == Some("signal.emit") {
                self.emits
                    .lock()
                    .expect("emit capture lock")
                    .push((v.signal.unwrap_or_default(), v.slots.unwrap_or_default()));
            }
        }
    }

    #[test]
    fn emit_is_traced_with_slot_count() {
        let emits = Arc::new(Mutex::new(Vec::new()));
        let layer = EmitCapture {
            emits: Arc::clone(&emits),
        };
        let subscriber = tracing_subscriber::registry().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            let signal = Signal::<u8>::new("value_changed");
            let _a = signal.connect(|_| {});
            let _b = signal.connect(|_| {});
            signal.emit(&3);
        });

        let emits = emits.lock().expect("emit capture lock");
        assert_eq!(emits.as_slice(), &[("value_changed".to_owned(), 2)]);
    }
}
