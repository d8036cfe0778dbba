#![forbid(unsafe_code)]

//! Derived reads and subscription ownership.
//!
//! A [`Binding<T>`] is a closure over observables that runs on every
//! `get()`. Nothing is cached, so a binding cannot lag behind its inputs.
//! The reduced-motion signal exposes `system || override` this way.
//!
//! A [`BindingScope`] owns the subscriptions of one mounted component
//! (a scroll reveal, say) and drops them with it.
//!
//! # Invariants
//!
//! 1. `Binding::get()` reflects the inputs at the moment of the call.
//! 2. A scope releases its subscriptions on drop or `clear()`; afterwards
//!    none of their callbacks fire.
//!
//! ```
//! use wfx_runtime::reactive::{Observable, bind_mapped2};
//!
//! let os = Observable::new(false);
//! let toggle = Observable::new(false);
//! let reduced = bind_mapped2(&os, &toggle, |a, b| *a || *b);
//! toggle.set(true);
//! assert!(reduced.get());
//! ```

use std::rc::Rc;

use super::observable::{Observable, Subscription};

/// Read-only derived value, evaluated on each `get()`.
pub struct Binding<T> {
    eval: Rc<dyn Fn() -> T>,
}

impl<T> Clone for Binding<T> {
    fn clone(&self) -> Self {
        Self {
            eval: Rc::clone(&self.eval),
        }
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for Binding<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("Binding").field(&self.get()).finish()
    }
}

impl<T> Binding<T> {
    pub fn new(eval: impl Fn() -> T + 'static) -> Self {
        Self {
            eval: Rc::new(eval),
        }
    }

    #[must_use]
    pub fn get(&self) -> T {
        (self.eval)()
    }
}

/// Combine two observables into one derived read.
pub fn bind_mapped2<A, B, T>(
    a: &Observable<A>,
    b: &Observable<B>,
    combine: impl Fn(&A, &B) -> T + 'static,
) -> Binding<T>
where
    A: Clone + PartialEq + 'static,
    B: Clone + PartialEq + 'static,
{
    let (a, b) = (a.clone(), b.clone());
    Binding::new(move || a.with(|x| b.with(|y| combine(x, y))))
}

/// Subscriptions owned by one mounted component.
#[derive(Default)]
pub struct BindingScope {
    held: Vec<Subscription>,
}

impl BindingScope {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep `sub` alive until the scope is cleared or dropped.
    pub fn hold(&mut self, sub: Subscription) {
        self.held.push(sub);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.held.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.held.is_empty()
    }

    /// Release everything now. The scope can be reused.
    pub fn clear(&mut self) {
        self.held.clear();
    }
}

impl std::fmt::Debug for BindingScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BindingScope")
            .field("held", &self.held.len())
            .finish()
    }
}
