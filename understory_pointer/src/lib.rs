// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_pointer --heading-base-level=0

//! Understory Pointer: per-frame contact tracking for mouse and touch input.
//!
//! ## Overview
//!
//! Raw pointer input arrives as snapshots: a mouse event carries one sample, a touch
//! event carries every finger currently on the screen. This crate turns those
//! snapshots into a stream of [`Contact`]s with identities that stay stable from
//! frame to frame, plus movement and distance-from-origin for each contact, and
//! reports contacts that disappeared.
//!
//! It does not attach to any windowing system and does not recognize gestures.
//! Feed it [`RawEvent`]s from whatever input source you have.
//!
//! ## Pieces
//!
//! - [`Contact`]: one tracked point, with [`Contact::rebase`] as the only way its
//!   kinematics change.
//! - [`IdentityMatcher`]: mutual-nearest pairing of this frame's positions with
//!   last frame's.
//! - [`ContactSet`]: owns the current and removed contacts and runs the update
//!   cycle.
//! - [`Emitter`]: listener table keyed by [`PointerEventKind`].
//! - [`PointerSurface`]: routes [`PointerInput`] through a [`ContactSet`] and
//!   emits `pointerdown`, `pointermove`, `pointerhover`, or `pointerup`.
//! - [`SurfaceProjection`]: maps contacts into surface pixels and normalized
//!   device coordinates.
//!
//! ## Identity
//!
//! Contacts are matched by Euclidean distance, and a match is accepted only when
//! both sides are each other's nearest candidate. Two fingers moving toward each
//! other keep their identities. Two fingers that jump past each other within a
//! single frame are paired by where they landed, so their identities follow the
//! positions rather than the fingers.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Vec2};
//! use understory_pointer::{
//!     ContactId, NoParent, PointerInput, PointerSurface, RawEvent, RawSample,
//! };
//!
//! let mut surface = PointerSurface::new(0_u32, NoParent);
//!
//! let down = RawEvent::touch([
//!     RawSample::new(0, Point::new(0.0, 0.0), 1),
//!     RawSample::new(0, Point::new(10.0, 0.0), 1),
//! ]);
//! surface.handle(PointerInput::Down(down)).unwrap();
//!
//! // Reported in the opposite order and moved toward each other.
//! let moved = RawEvent::touch([
//!     RawSample::new(0, Point::new(9.0, 0.0), 1),
//!     RawSample::new(0, Point::new(1.0, 0.0), 1),
//! ]);
//! surface.handle(PointerInput::Move(moved)).unwrap();
//!
//! let left = surface.contacts().get(ContactId(0)).unwrap();
//! assert_eq!(left.position(), Point::new(1.0, 0.0));
//! assert_eq!(left.movement(), Vec2::new(1.0, 0.0));
//!
//! // The last finger lifts.
//! surface.handle(PointerInput::Up(RawEvent::touch([]))).unwrap();
//! assert!(surface.contacts().is_empty());
//! assert_eq!(surface.contacts().removed().len(), 2);
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` support for `kurbo`.
//! - `libm`: `no_std` builds that rely on `libm` for floating-point math.
//!
//! Diagnostics go through the [`log`] facade; no logger is installed.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod contact;
mod contact_set;
mod emitter;
mod error;
mod matcher;
mod projection;
pub mod scope;
mod surface;
mod types;

pub use contact::Contact;
pub use contact_set::ContactSet;
pub use emitter::{Emitter, ListenerId};
pub use error::{ProjectionError, SampleError};
pub use matcher::IdentityMatcher;
pub use projection::{ProjectedContact, SurfaceGeometry, SurfaceProjection};
pub use scope::{NoParent, ParentLookup};
pub use surface::{PointerInput, PointerSurface};
pub use types::{
    Button, Buttons, ContactId, INLINE_CONTACTS, Modifiers, PointerEventKind, PointerKind,
    RawEvent, RawSample,
};
