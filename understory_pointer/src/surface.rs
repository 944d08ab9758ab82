// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Surface driver: raw device interactions in, pointer events out.
//!
//! [`PointerSurface`] ties a [`ContactSet`] to an [`Emitter`] for one input
//! surface. Each [`PointerInput`] picks the semantic update kind, runs one update
//! cycle, and then delivers the finished set to listeners of that kind. Listeners
//! therefore never observe a half-updated set.
//!
//! | Input                | Emitted event                                   |
//! |----------------------|-------------------------------------------------|
//! | `Down`               | `pointerdown`                                   |
//! | `Move`               | `pointermove` if any button is held, otherwise `pointerhover` |
//! | `Up`                 | `pointerup`                                     |
//! | `Cancel`             | `pointerup`, removing every contact             |
//!
//! ```
//! use std::cell::Cell;
//! use std::rc::Rc;
//! use kurbo::Point;
//! use understory_pointer::{NoParent, PointerEventKind, PointerInput, PointerSurface, RawEvent};
//!
//! let mut surface = PointerSurface::new(0_u32, NoParent);
//! let hovered = Rc::new(Cell::new(0));
//! let count = Rc::clone(&hovered);
//! surface.on(PointerEventKind::Hover, move |set| count.set(count.get() + set.len()));
//!
//! let kind = surface.handle(PointerInput::Move(RawEvent::mouse(0, Point::new(3.0, 4.0), 0))).unwrap();
//! assert_eq!(kind, PointerEventKind::Hover);
//! assert_eq!(hovered.get(), 1);
//! ```

use alloc::vec::Vec;

use crate::contact_set::ContactSet;
use crate::emitter::{Emitter, ListenerId};
use crate::error::{ProjectionError, SampleError};
use crate::projection::{ProjectedContact, SurfaceGeometry, SurfaceProjection};
use crate::scope::{ParentLookup, is_within};
use crate::types::{PointerEventKind, PointerKind, RawEvent};

/// A raw device interaction, before it is given a semantic kind.
#[derive(Clone, Debug, PartialEq)]
pub enum PointerInput<T> {
    /// A button was pressed or a finger touched down.
    Down(RawEvent<T>),
    /// A pointer or finger moved.
    Move(RawEvent<T>),
    /// A button was released or a finger lifted; samples list what is still down.
    Up(RawEvent<T>),
    /// The device lost track of every contact (pointer left, touch cancelled, blur).
    Cancel(PointerKind),
}

impl<T> PointerInput<T> {
    /// Semantic kind and raw event for this input.
    pub fn into_update(self) -> (PointerEventKind, RawEvent<T>) {
        match self {
            Self::Down(ev) => (PointerEventKind::Down, ev),
            Self::Move(ev) => {
                let kind = if ev.any_pressed() {
                    PointerEventKind::Move
                } else {
                    PointerEventKind::Hover
                };
                (kind, ev)
            }
            Self::Up(ev) => (PointerEventKind::Up, ev),
            Self::Cancel(kind) => (PointerEventKind::Up, RawEvent::removal(kind)),
        }
    }
}

/// Pointer tracking for one surface.
pub struct PointerSurface<T, L> {
    root: T,
    lookup: L,
    contacts: ContactSet<T>,
    emitter: Emitter<ContactSet<T>>,
}

impl<T: PartialEq, L: ParentLookup<T>> PointerSurface<T, L> {
    /// Track input on the subtree rooted at `root`.
    pub fn new(root: T, lookup: L) -> Self {
        Self::with_contact_set(root, lookup, ContactSet::new())
    }

    /// Track input with a preconfigured contact set.
    pub fn with_contact_set(root: T, lookup: L, contacts: ContactSet<T>) -> Self {
        Self {
            root,
            lookup,
            contacts,
            emitter: Emitter::new(),
        }
    }

    /// Process one raw interaction and emit the resulting event.
    ///
    /// Returns the emitted kind. A rejected sample emits nothing and leaves the
    /// tracked contacts as they were.
    pub fn handle(&mut self, input: PointerInput<T>) -> Result<PointerEventKind, SampleError> {
        let (kind, event) = input.into_update();
        let (root, lookup) = (&self.root, &self.lookup);
        self.contacts
            .update(kind, event, |target| is_within(root, target, lookup))?;
        let called = self.emitter.emit(kind, &self.contacts);
        log::trace!(
            "{kind}: {} contacts, {} removed, {called} listeners",
            self.contacts.len(),
            self.contacts.removed().len()
        );
        Ok(kind)
    }

    /// Register a listener; see [`Emitter::on`].
    pub fn on(
        &self,
        kind: PointerEventKind,
        handler: impl FnMut(&ContactSet<T>) + 'static,
    ) -> ListenerId {
        self.emitter.on(kind, handler)
    }

    /// Remove a listener; see [`Emitter::off`].
    pub fn off(&self, kind: PointerEventKind, id: ListenerId) -> bool {
        self.emitter.off(kind, id)
    }

    /// The emitter pointer events are delivered through.
    pub fn emitter(&self) -> &Emitter<ContactSet<T>> {
        &self.emitter
    }

    /// The tracked contacts as of the last accepted update.
    pub fn contacts(&self) -> &ContactSet<T> {
        &self.contacts
    }

    /// Root of the tracked subtree.
    pub fn root(&self) -> &T {
        &self.root
    }

    /// Forget every tracked contact. Listeners stay registered.
    pub fn reset(&mut self) {
        self.contacts.clear();
    }

    /// Project the current contacts using geometry supplied by `geometry`.
    pub fn project(
        &self,
        geometry: &impl SurfaceGeometry,
    ) -> Result<Vec<ProjectedContact<T>>, ProjectionError>
    where
        T: Clone,
    {
        let projection = SurfaceProjection::from_geometry(geometry)?;
        Ok(self.contacts.iter().map(|c| projection.project(c)).collect())
    }
}

impl<T: core::fmt::Debug, L> core::fmt::Debug for PointerSurface<T, L> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PointerSurface")
            .field("root", &self.root)
            .field("contacts", &self.contacts)
            .field("emitter", &self.emitter)
            .finish_non_exhaustive()
    }
}
