// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Typed publish/subscribe for pointer events.
//!
//! An [`Emitter`] keeps one ordered listener list per [`PointerEventKind`].
//!
//! ## Semantics
//!
//! - Listeners run in registration order.
//! - [`Emitter::emit`] works on a snapshot: a listener registered while an event is
//!   being delivered first runs on the next emit.
//! - A listener removed while an event is being delivered is not called for the
//!   rest of that delivery.
//! - A listener that is still running (because it emitted on the same emitter) is
//!   skipped rather than re-entered.
//!
//! The emitter is single-threaded: registration and emission take `&self`, and
//! listeners may hold an [`Rc`] to the emitter to register or remove listeners
//! from inside a callback.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_pointer::{Emitter, PointerEventKind};
//!
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let emitter: Emitter<u32> = Emitter::new();
//!
//! let log = Rc::clone(&seen);
//! let id = emitter.on(PointerEventKind::Down, move |n| log.borrow_mut().push(*n));
//!
//! emitter.emit(PointerEventKind::Down, &1);
//! emitter.emit(PointerEventKind::Up, &2);
//! assert!(emitter.off(PointerEventKind::Down, id));
//! emitter.emit(PointerEventKind::Down, &3);
//!
//! assert_eq!(*seen.borrow(), [1]);
//! ```

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use smallvec::SmallVec;

use crate::types::PointerEventKind;

/// Handle returned by [`Emitter::on`], used to remove the listener again.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

type Handler<P> = Rc<RefCell<dyn FnMut(&P)>>;

struct Listener<P> {
    id: ListenerId,
    handler: Handler<P>,
}

const KINDS: usize = PointerEventKind::ALL.len();

/// Listener table keyed by [`PointerEventKind`].
pub struct Emitter<P> {
    table: RefCell<[Vec<Listener<P>>; KINDS]>,
    next_id: Cell<u64>,
}

impl<P> Emitter<P> {
    /// An emitter with no listeners.
    pub fn new() -> Self {
        Self {
            table: RefCell::new(core::array::from_fn(|_| Vec::new())),
            next_id: Cell::new(0),
        }
    }

    /// Register `handler` for `kind`.
    pub fn on(&self, kind: PointerEventKind, handler: impl FnMut(&P) + 'static) -> ListenerId {
        let id = ListenerId(self.next_id.get());
        self.next_id.set(id.0 + 1);
        let handler: Handler<P> = Rc::new(RefCell::new(handler));
        self.table.borrow_mut()[kind.index()].push(Listener { id, handler });
        id
    }

    /// Remove a listener. Returns `false` if it was not registered for `kind`.
    pub fn off(&self, kind: PointerEventKind, id: ListenerId) -> bool {
        let mut table = self.table.borrow_mut();
        let list = &mut table[kind.index()];
        match list.iter().position(|l| l.id == id) {
            Some(pos) => {
                list.remove(pos);
                true
            }
            None => false,
        }
    }

    /// Deliver `payload` to every listener of `kind`.
    ///
    /// Returns how many listeners were called.
    pub fn emit(&self, kind: PointerEventKind, payload: &P) -> usize {
        let snapshot: SmallVec<[(ListenerId, Handler<P>); 4]> = self.table.borrow()
            [kind.index()]
        .iter()
        .map(|l| (l.id, Rc::clone(&l.handler)))
        .collect();

        let mut called = 0;
        for (id, handler) in snapshot {
            if !self.is_registered(kind, id) {
                continue;
            }
            let Ok(mut handler) = handler.try_borrow_mut() else {
                log::warn!("{kind}: listener {id:?} is already running; skipped");
                continue;
            };
            (*handler)(payload);
            called += 1;
        }
        called
    }

    fn is_registered(&self, kind: PointerEventKind, id: ListenerId) -> bool {
        self.table.borrow()[kind.index()].iter().any(|l| l.id == id)
    }

    /// Number of listeners registered for `kind`.
    pub fn listener_count(&self, kind: PointerEventKind) -> usize {
        self.table.borrow()[kind.index()].len()
    }

    /// Remove every listener.
    pub fn clear(&self) {
        for list in self.table.borrow_mut().iter_mut() {
            list.clear();
        }
    }
}

impl<P> Default for Emitter<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> fmt::Debug for Emitter<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.borrow();
        let mut s = f.debug_struct("Emitter");
        for kind in PointerEventKind::ALL {
            s.field(kind.name(), &table[kind.index()].len());
        }
        s.finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Weak;
    use alloc::vec;

    type Log = Rc<RefCell<Vec<&'static str>>>;

    fn log() -> Log {
        Rc::new(RefCell::new(Vec::new()))
    }

    fn push(log: &Log, entry: &'static str) -> impl FnMut(&u32) + 'static {
        let log = Rc::clone(log);
        move |_| log.borrow_mut().push(entry)
    }

    #[test]
    fn listeners_run_in_registration_order() {
        let seen = log();
        let emitter = Emitter::new();
        emitter.on(PointerEventKind::Move, push(&seen, "a"));
        emitter.on(PointerEventKind::Move, push(&seen, "b"));
        emitter.on(PointerEventKind::Move, push(&seen, "c"));
        assert_eq!(emitter.emit(PointerEventKind::Move, &0), 3);
        assert_eq!(*seen.borrow(), vec!["a", "b", "c"]);
    }

    #[test]
    fn kinds_are_isolated() {
        let seen = log();
        let emitter = Emitter::new();
        emitter.on(PointerEventKind::Down, push(&seen, "down"));
        emitter.on(PointerEventKind::Hover, push(&seen, "hover"));
        assert_eq!(emitter.emit(PointerEventKind::Up, &0), 0);
        emitter.emit(PointerEventKind::Hover, &0);
        assert_eq!(*seen.borrow(), vec!["hover"]);
        assert_eq!(emitter.listener_count(PointerEventKind::Down), 1);
        assert_eq!(emitter.listener_count(PointerEventKind::Move), 0);
    }

    #[test]
    fn off_removes_only_that_listener() {
        let seen = log();
        let emitter = Emitter::new();
        let a = emitter.on(PointerEventKind::Down, push(&seen, "a"));
        emitter.on(PointerEventKind::Down, push(&seen, "b"));
        assert!(!emitter.off(PointerEventKind::Up, a));
        assert!(emitter.off(PointerEventKind::Down, a));
        assert!(!emitter.off(PointerEventKind::Down, a));
        emitter.emit(PointerEventKind::Down, &0);
        assert_eq!(*seen.borrow(), vec!["b"]);
    }

    #[test]
    fn listener_added_during_emit_waits_for_next_emit() {
        let seen = log();
        let emitter: Rc<Emitter<u32>> = Rc::new(Emitter::new());
        let weak: Weak<Emitter<u32>> = Rc::downgrade(&emitter);
        let inner = Rc::clone(&seen);
        let mut added = false;
        emitter.on(PointerEventKind::Down, move |_| {
            inner.borrow_mut().push("outer");
            if !added {
                added = true;
                if let Some(e) = weak.upgrade() {
                    e.on(PointerEventKind::Down, push(&inner, "late"));
                }
            }
        });

        assert_eq!(emitter.emit(PointerEventKind::Down, &0), 1);
        assert_eq!(*seen.borrow(), vec!["outer"]);
        assert_eq!(emitter.emit(PointerEventKind::Down, &0), 2);
        assert_eq!(*seen.borrow(), vec!["outer", "outer", "late"]);
    }

    #[test]
    fn listener_removed_during_emit_is_not_called() {
        let seen = log();
        let emitter: Rc<Emitter<u32>> = Rc::new(Emitter::new());
        let weak = Rc::downgrade(&emitter);
        let victim = Rc::new(Cell::new(None));
        let target = Rc::clone(&victim);
        emitter.on(PointerEventKind::Up, move |_| {
            if let (Some(e), Some(id)) = (weak.upgrade(), target.get()) {
                e.off(PointerEventKind::Up, id);
            }
        });
        victim.set(Some(emitter.on(PointerEventKind::Up, push(&seen, "victim"))));

        assert_eq!(emitter.emit(PointerEventKind::Up, &0), 1);
        assert!(seen.borrow().is_empty());
        assert_eq!(emitter.listener_count(PointerEventKind::Up), 1);
    }

    #[test]
    fn reentrant_emit_skips_running_listener() {
        let seen = log();
        let emitter: Rc<Emitter<u32>> = Rc::new(Emitter::new());
        let weak = Rc::downgrade(&emitter);
        let inner = Rc::clone(&seen);
        emitter.on(PointerEventKind::Move, move |depth| {
            inner.borrow_mut().push("move");
            if *depth == 0 {
                if let Some(e) = weak.upgrade() {
                    assert_eq!(e.emit(PointerEventKind::Move, &1), 0);
                }
            }
        });
        assert_eq!(emitter.emit(PointerEventKind::Move, &0), 1);
        assert_eq!(*seen.borrow(), vec!["move"]);
    }

    #[test]
    fn clear_drops_everything() {
        let seen = log();
        let emitter = Emitter::new();
        for kind in PointerEventKind::ALL {
            emitter.on(kind, push(&seen, "x"));
        }
        emitter.clear();
        for kind in PointerEventKind::ALL {
            assert_eq!(emitter.listener_count(kind), 0);
            assert_eq!(emitter.emit(kind, &0), 0);
        }
    }
}
