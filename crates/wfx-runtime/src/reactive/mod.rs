#![forbid(unsafe_code)]

//! Reactive primitives for Wayfarer FX.
//!
//! - [`Observable`]: a shared, version-tracked value with change
//!   notification via subscriber callbacks.
//! - [`Subscription`]: RAII guard that unsubscribes on drop.
//! - [`Binding`]: an uncached derived value, re-evaluated on every read.
//! - [`BindingScope`]: owns the subscriptions of one mounted component.
//!
//! # Architecture
//!
//! `Observable<T>` uses `Rc<RefCell<..>>` for single-threaded shared
//! ownership: the whole core runs on the UI event loop. Subscribers are
//! stored as `Weak` function pointers and cleaned up lazily during
//! notification.

pub mod binding;
pub mod observable;

pub use binding::{Binding, BindingScope, bind_mapped2};
pub use observable::{Observable, Subscription};
