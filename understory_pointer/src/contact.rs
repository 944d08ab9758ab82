// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single tracked contact and its per-frame kinematics.
//!
//! A [`Contact`] is a snapshot of one pointer or touch point in one frame. The
//! kinematic fields are derived rather than stored independently:
//!
//! - `movement == position - predecessor.position`
//! - `distance == position - start`
//!
//! A fresh contact has `start == position` and zero kinematics. The only way to
//! change kinematics is [`Contact::rebase`], which adopts a matched predecessor's
//! identity and origin.
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_pointer::{Contact, ContactId, PointerEventKind, PointerKind};
//!
//! let prev = Contact::new(ContactId(3), (), PointerEventKind::Down, PointerKind::Touch, Point::new(5.0, 5.0));
//! let mut next = Contact::new(ContactId(0), (), PointerEventKind::Move, PointerKind::Touch, Point::new(8.0, 4.0));
//! next.rebase(&prev);
//!
//! assert_eq!(next.id(), ContactId(3));
//! assert_eq!(next.start(), Point::new(5.0, 5.0));
//! assert_eq!(next.movement(), Vec2::new(3.0, -1.0));
//! assert_eq!(next.distance(), Vec2::new(3.0, -1.0));
//! ```

use kurbo::{Affine, Point, Rect, Size, Vec2};

use crate::error::ProjectionError;
use crate::projection::{ProjectedContact, SurfaceProjection};
use crate::types::{Button, Buttons, ContactId, Modifiers, PointerEventKind, PointerKind};

/// One tracked contact in one frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Contact<T> {
    id: ContactId,
    target: T,
    event: PointerEventKind,
    kind: PointerKind,
    start: Point,
    position: Point,
    movement: Vec2,
    distance: Vec2,
    button: Button,
    buttons: Buttons,
    modifiers: Modifiers,
}

impl<T> Contact<T> {
    /// Create a fresh contact at `position` with zero kinematics.
    pub fn new(
        id: ContactId,
        target: T,
        event: PointerEventKind,
        kind: PointerKind,
        position: Point,
    ) -> Self {
        Self {
            id,
            target,
            event,
            kind,
            start: position,
            position,
            movement: Vec2::ZERO,
            distance: Vec2::ZERO,
            button: Button::None,
            buttons: Buttons::empty(),
            modifiers: Modifiers::empty(),
        }
    }

    /// Set the pressed-button state from a raw device bitmask.
    ///
    /// Unknown bits are kept in [`Contact::buttons`]; the dominant
    /// [`Contact::button`] follows [`Button::from_buttons`].
    #[must_use]
    pub fn with_buttons(mut self, mask: u16) -> Self {
        self.buttons = Buttons::from_bits_retain(mask);
        self.button = Button::from_buttons(self.buttons);
        self
    }

    /// Set the keyboard modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Continue a matched predecessor.
    ///
    /// Adopts the predecessor's identity and origin, then recomputes movement and
    /// distance from this contact's position. Call at most once per frame, right
    /// after identity resolution; a second call would measure movement against the
    /// wrong frame.
    pub fn rebase(&mut self, previous: &Self) {
        self.id = previous.id;
        self.start = previous.start;
        self.movement = self.position - previous.position;
        self.distance = self.position - self.start;
    }

    pub(crate) fn set_id(&mut self, id: ContactId) {
        self.id = id;
    }

    /// Identity, stable while the contact is matched across frames.
    pub fn id(&self) -> ContactId {
        self.id
    }

    /// Element the contact's sample originated from.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Update kind of the frame that produced this contact.
    pub fn event(&self) -> PointerEventKind {
        self.event
    }

    /// Device family.
    pub fn kind(&self) -> PointerKind {
        self.kind
    }

    /// Where the contact first appeared.
    pub fn start(&self) -> Point {
        self.start
    }

    /// Current position.
    pub fn position(&self) -> Point {
        self.position
    }

    /// Displacement since the previous frame.
    pub fn movement(&self) -> Vec2 {
        self.movement
    }

    /// Displacement since [`Contact::start`].
    pub fn distance(&self) -> Vec2 {
        self.distance
    }

    /// Dominant button.
    pub fn button(&self) -> Button {
        self.button
    }

    /// Every button held, as reported by the device.
    pub fn buttons(&self) -> Buttons {
        self.buttons
    }

    /// Keyboard modifiers held when the sample was taken.
    pub fn modifiers(&self) -> Modifiers {
        self.modifiers
    }

    /// Whether any button is held.
    pub fn is_pressed(&self) -> bool {
        !self.buttons.is_empty()
    }
}

impl<T: Clone> Contact<T> {
    /// Map this contact through `affine`.
    ///
    /// Points (`start`, `position`) use the full transform; vectors (`movement`,
    /// `distance`) use only its linear part, so the kinematic relations still hold
    /// in the target space.
    pub fn transformed(&self, affine: Affine) -> Self {
        Self {
            start: affine * self.start,
            position: affine * self.position,
            movement: linear(affine, self.movement),
            distance: linear(affine, self.distance),
            target: self.target.clone(),
            ..*self
        }
    }

    /// Project into surface-local pixels and normalized device coordinates.
    ///
    /// `bounds` is the surface's box in the input coordinate space and `viewport` the
    /// size of its render target. See [`SurfaceProjection`].
    pub fn project_to_surface(
        &self,
        bounds: Rect,
        viewport: Size,
    ) -> Result<ProjectedContact<T>, ProjectionError> {
        Ok(SurfaceProjection::new(bounds, viewport)?.project(self))
    }
}

fn linear(affine: Affine, v: Vec2) -> Vec2 {
    let [a, b, c, d, _, _] = affine.as_coeffs();
    Vec2::new(a * v.x + c * v.y, b * v.x + d * v.y)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch(id: u32, x: f64, y: f64) -> Contact<u32> {
        Contact::new(
            ContactId(id),
            7,
            PointerEventKind::Move,
            PointerKind::Touch,
            Point::new(x, y),
        )
    }

    #[test]
    fn fresh_contact_has_zero_kinematics() {
        let c = touch(2, 5.0, 6.0);
        assert_eq!(c.id(), ContactId(2));
        assert_eq!(c.start(), Point::new(5.0, 6.0));
        assert_eq!(c.position(), c.start());
        assert_eq!(c.movement(), Vec2::ZERO);
        assert_eq!(c.distance(), Vec2::ZERO);
        assert_eq!(c.button(), Button::None);
        assert!(!c.is_pressed());
    }

    #[test]
    fn buttons_and_modifiers_are_captured() {
        let c = touch(0, 0.0, 0.0)
            .with_buttons(0b110)
            .with_modifiers(Modifiers::SHIFT | Modifiers::CTRL);
        assert_eq!(c.button(), Button::Secondary);
        assert_eq!(c.buttons(), Buttons::SECONDARY | Buttons::AUXILIARY);
        assert!(c.modifiers().contains(Modifiers::SHIFT));
        assert!(!c.modifiers().contains(Modifiers::ALT));
        assert!(c.is_pressed());
    }

    #[test]
    fn rebase_chains_across_frames() {
        let a = touch(4, 1.0, 1.0);
        let mut b = touch(0, 4.0, 5.0);
        b.rebase(&a);
        let mut c = touch(1, 6.0, 5.0);
        c.rebase(&b);

        assert_eq!(c.id(), ContactId(4));
        assert_eq!(c.start(), Point::new(1.0, 1.0));
        assert_eq!(c.movement(), Vec2::new(2.0, 0.0));
        assert_eq!(c.distance(), Vec2::new(5.0, 4.0));
    }

    #[test]
    fn clone_is_independent() {
        let a = touch(1, 1.0, 1.0);
        let snapshot = a.clone();
        let mut live = a;
        live.rebase(&touch(9, 0.0, 0.0));
        assert_eq!(snapshot.id(), ContactId(1));
        assert_eq!(live.id(), ContactId(9));
        assert_eq!(snapshot.movement(), Vec2::ZERO);
    }

    #[test]
    fn transform_keeps_kinematics_consistent() {
        let prev = touch(0, 2.0, 3.0);
        let mut c = touch(0, 6.0, 1.0);
        c.rebase(&prev);

        let affine = Affine::new([2.0, 0.0, 0.0, -0.5, 10.0, 4.0]);
        let t = c.transformed(affine);
        let t_prev = prev.transformed(affine);

        assert_eq!(t.position(), Point::new(22.0, 3.5));
        assert_eq!(t.movement(), t.position() - t_prev.position());
        assert_eq!(t.distance(), t.position() - t.start());
        // Receiver is untouched.
        assert_eq!(c.position(), Point::new(6.0, 1.0));
    }
}
