//! Observable state for driving surfaces from imperative updates
//!
//! [`Observable`] holds a current value and notifies subscribers
//! synchronously, in registration order, on every write. Subscribing delivers
//! the current value immediately, so a late subscriber always starts from the
//! most recent write.
//!
//! The observable keeps only `Weak` references to callbacks. The strong
//! reference lives in the [`Subscription`] returned to the subscriber, so
//! dropping it unsubscribes and the value holder never keeps its observers
//! alive.
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::{Rc, Weak};

struct Inner<T> {
    value: T,
    version: u64,
    subscribers: Vec<Weak<dyn Fn(&T)>>,
}

pub struct Observable<T> {
    inner: Rc<RefCell<Inner<T>>>,
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Observable { inner: Rc::clone(&self.inner) }
    }
}

impl<T: Clone + 'static> Observable<T> {
    pub fn new(value: T) -> Self {
        Observable {
            inner: Rc::new(RefCell::new(Inner { value, version: 0, subscribers: Vec::new() })),
        }
    }

    pub fn get(&self) -> T {
        self.inner.borrow().value.clone()
    }

    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.inner.borrow().value)
    }

    /// Number of writes since construction.
    pub fn version(&self) -> u64 {
        self.inner.borrow().version
    }

    pub fn set(&self, value: T) {
        let version = {
            let mut inner = self.inner.borrow_mut();
            inner.value = value;
            inner.version += 1;
            inner.version
        };
        self.notify(version);
    }

    /// Mutates a copy of the value, so `f` may read this observable.
    pub fn update(&self, f: impl FnOnce(&mut T)) {
        let mut value = self.get();
        f(&mut value);
        self.set(value);
    }

    pub fn subscribe(&self, callback: impl Fn(&T) + 'static) -> Subscription {
        let callback: Rc<dyn Fn(&T)> = Rc::new(callback);
        let current = self.get();
        callback(&current);
        self.inner.borrow_mut().subscribers.push(Rc::downgrade(&callback));
        Subscription { _callback: Box::new(callback) }
    }

    /// Subscribers whose `Subscription` is still alive.
    pub fn subscriber_count(&self) -> usize {
        self.inner
            .borrow()
            .subscribers
            .iter()
            .filter(|s| s.strong_count() > 0)
            .count()
    }

    fn notify(&self, version: u64) {
        // Callbacks run without the borrow held so they may write back.
        let (value, live) = {
            let mut inner = self.inner.borrow_mut();
            inner.subscribers.retain(|s| s.strong_count() > 0);
            let live: Vec<Rc<dyn Fn(&T)>> = inner.subscribers.iter().filter_map(Weak::upgrade).collect();
            (inner.value.clone(), live)
        };
        for callback in live {
            // A nested write has already delivered a newer value to everyone.
            if self.version() != version {
                return;
            }
            callback(&value);
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("Observable")
            .field("value", &inner.value)
            .field("version", &inner.version)
            .finish()
    }
}

/// Keeps a callback registered; dropping it unsubscribes.
pub struct Subscription {
    _callback: Box<dyn Any>,
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Subscription")
    }
}

/// Subscriptions owned by one subscriber, released together.
#[derive(Debug, Default)]
pub struct SubscriptionBag {
    subscriptions: Vec<Subscription>,
}

impl SubscriptionBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn hold(&mut self, subscription: Subscription) {
        self.subscriptions.push(subscription);
    }

    pub fn len(&self) -> usize {
        self.subscriptions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscriptions.is_empty()
    }

    /// Releases in reverse registration order.
    pub fn clear(&mut self) {
        while self.subscriptions.pop().is_some() {}
    }
}
