// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Per-frame contact state.
//!
//! A [`ContactSet`] owns the contacts of the current frame and the contacts that
//! disappeared in it. Each call to [`ContactSet::update`] runs one full cycle:
//!
//! 1. The current contacts become the previous frame; `removed` is cleared.
//! 2. Removal updates (`pointerup` with nothing pressed, or an explicit remove
//!    flag) capture nothing, so every previous contact is removed.
//! 3. Otherwise one contact is created per raw sample. Touch samples whose target
//!    is outside the surface are dropped; mouse samples always pass. Contacts get
//!    provisional identities `0, 1, 2, …` in sample order.
//! 4. The [`IdentityMatcher`] pairs new contacts with previous ones. Paired
//!    contacts are rebased on their predecessor and keep its identity.
//! 5. Unpaired previous contacts move to `removed`. Unpaired new contacts keep
//!    their provisional identity unless a paired contact already holds it, in
//!    which case they take the smallest free one.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_pointer::{ContactId, ContactSet, PointerEventKind, RawEvent};
//!
//! let mut set = ContactSet::new();
//! set.update(PointerEventKind::Down, RawEvent::mouse((), Point::new(5.0, 5.0), 1), |_| true).unwrap();
//! set.update(PointerEventKind::Move, RawEvent::mouse((), Point::new(8.0, 5.0), 1), |_| true).unwrap();
//!
//! let c = &set.contacts()[0];
//! assert_eq!(c.id(), ContactId(0));
//! assert_eq!(c.movement(), Vec2::new(3.0, 0.0));
//! assert_eq!(c.distance(), Vec2::new(3.0, 0.0));
//!
//! set.update(PointerEventKind::Up, RawEvent::mouse((), Point::new(8.0, 5.0), 0), |_| true).unwrap();
//! assert!(set.is_empty());
//! assert_eq!(set.removed()[0].position(), Point::new(8.0, 5.0));
//! ```

use alloc::vec::Vec;

use kurbo::Point;
use smallvec::{SmallVec, smallvec};

use crate::contact::Contact;
use crate::error::SampleError;
use crate::matcher::IdentityMatcher;
use crate::types::{ContactId, INLINE_CONTACTS, PointerEventKind, PointerKind, RawEvent};

/// Current and removed contacts for one surface.
#[derive(Clone, Debug)]
pub struct ContactSet<T> {
    current: Vec<Contact<T>>,
    /// Working buffer; empty outside of `update`.
    previous: Vec<Contact<T>>,
    removed: Vec<Contact<T>>,
    kind: Option<PointerEventKind>,
    matcher: IdentityMatcher,
}

impl<T> ContactSet<T> {
    /// An empty set with unlimited matching distance.
    pub fn new() -> Self {
        Self::with_matcher(IdentityMatcher::new())
    }

    /// An empty set that never continues a contact across a jump larger than
    /// `max_distance`.
    pub fn with_max_distance(max_distance: Option<f64>) -> Self {
        Self::with_matcher(IdentityMatcher::with_max_distance(max_distance))
    }

    fn with_matcher(matcher: IdentityMatcher) -> Self {
        Self {
            current: Vec::new(),
            previous: Vec::new(),
            removed: Vec::new(),
            kind: None,
            matcher,
        }
    }

    /// Run one update cycle.
    ///
    /// `in_scope` is asked about the target of every touch sample; samples it
    /// rejects are ignored. It is not consulted for mouse events.
    ///
    /// Returns [`SampleError`] without touching any state when a sample that would
    /// be captured has a non-finite position.
    pub fn update(
        &mut self,
        kind: PointerEventKind,
        event: RawEvent<T>,
        mut in_scope: impl FnMut(&T) -> bool,
    ) -> Result<(), SampleError> {
        let removal = event.remove || (kind == PointerEventKind::Up && !event.any_pressed());
        let mut keep: SmallVec<[bool; INLINE_CONTACTS]> = SmallVec::new();
        if !removal {
            let scoped = event.kind == PointerKind::Touch;
            keep.extend(
                event
                    .samples
                    .iter()
                    .map(|sample| !scoped || in_scope(&sample.target)),
            );
            validate(&event, &keep)?;
        }

        core::mem::swap(&mut self.previous, &mut self.current);
        self.current.clear();
        self.removed.clear();
        self.kind = Some(kind);

        log::trace!(
            "{kind}: {} samples, {} previous contacts{}",
            event.samples.len(),
            self.previous.len(),
            if removal { ", removal" } else { "" }
        );

        let mut claimed: SmallVec<[bool; INLINE_CONTACTS]> = smallvec![false; self.previous.len()];
        if !removal {
            let mut provisional = 0;
            let captured = event.samples.into_iter().zip(keep).filter(|&(_, kept)| kept);
            for (sample, _) in captured {
                let contact = Contact::new(
                    ContactId(provisional),
                    sample.target,
                    kind,
                    event.kind,
                    sample.position,
                )
                .with_buttons(sample.buttons)
                .with_modifiers(event.modifiers);
                self.current.push(contact);
                provisional += 1;
            }
            self.resolve_identities(&mut claimed);
        }

        // Popping walks the previous frame back to front.
        let mut idx = self.previous.len();
        while let Some(contact) = self.previous.pop() {
            idx -= 1;
            if !claimed[idx] {
                log::debug!("{kind}: contact {} removed", contact.id());
                self.removed.push(contact);
            }
        }

        Ok(())
    }

    fn resolve_identities(&mut self, claimed: &mut [bool]) {
        let current: SmallVec<[Point; INLINE_CONTACTS]> =
            self.current.iter().map(Contact::position).collect();
        let previous: SmallVec<[Point; INLINE_CONTACTS]> =
            self.previous.iter().map(Contact::position).collect();
        let assignments = self.matcher.resolve(&current, &previous);

        let mut held: SmallVec<[ContactId; INLINE_CONTACTS]> = SmallVec::new();
        for (contact, assigned) in self.current.iter_mut().zip(assignments) {
            if let Some(j) = *assigned {
                contact.rebase(&self.previous[j]);
                claimed[j] = true;
                held.push(contact.id());
            }
        }

        for (contact, assigned) in self.current.iter_mut().zip(assignments) {
            if assigned.is_some() {
                continue;
            }
            let mut id = contact.id();
            if held.contains(&id) {
                id = ContactId(0);
                while held.contains(&id) {
                    id.0 += 1;
                }
                contact.set_id(id);
            }
            log::debug!("{}: contact {id} added", contact.event());
            held.push(id);
        }
    }

    /// Contacts of the current frame, in sample order.
    pub fn contacts(&self) -> &[Contact<T>] {
        &self.current
    }

    /// Contacts present in the previous frame but not in this one.
    ///
    /// The order is unspecified.
    pub fn removed(&self) -> &[Contact<T>] {
        &self.removed
    }

    /// Number of current contacts.
    pub fn len(&self) -> usize {
        self.current.len()
    }

    /// Whether there are no current contacts.
    pub fn is_empty(&self) -> bool {
        self.current.is_empty()
    }

    /// Kind of the most recent update, or `None` before the first one.
    pub fn kind(&self) -> Option<PointerEventKind> {
        self.kind
    }

    /// Iterate current contacts.
    pub fn iter(&self) -> core::slice::Iter<'_, Contact<T>> {
        self.current.iter()
    }

    /// Find a current contact by identity.
    pub fn get(&self, id: ContactId) -> Option<&Contact<T>> {
        self.current.iter().find(|c| c.id() == id)
    }

    /// The identity matcher, for inspecting its configuration.
    pub fn matcher(&self) -> &IdentityMatcher {
        &self.matcher
    }

    /// Forget every contact without reporting removals.
    pub fn clear(&mut self) {
        self.current.clear();
        self.previous.clear();
        self.removed.clear();
        self.kind = None;
    }
}

impl<T> Default for ContactSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a, T> IntoIterator for &'a ContactSet<T> {
    type Item = &'a Contact<T>;
    type IntoIter = core::slice::Iter<'a, Contact<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Check the samples that `keep` marks for capture.
fn validate<T>(event: &RawEvent<T>, keep: &[bool]) -> Result<(), SampleError> {
    for (index, (sample, _)) in event
        .samples
        .iter()
        .zip(keep)
        .enumerate()
        .filter(|(_, (_, kept))| **kept)
    {
        if !sample.position.is_finite() {
            let err = SampleError::NonFinitePosition {
                index,
                x: sample.position.x,
                y: sample.position.y,
            };
            log::warn!("rejecting pointer update: {err}");
            return Err(err);
        }
    }
    Ok(())
}
