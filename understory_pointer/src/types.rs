// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shared input types: contact identity, device kinds, buttons, modifiers, and raw samples.

use core::fmt;

use kurbo::Point;
use smallvec::SmallVec;

/// Identity of a tracked contact.
///
/// Identities are small integers. A contact keeps its identity for as long as it is
/// matched from frame to frame; a fresh contact takes the smallest identity that is
/// not held by another contact in the same frame.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ContactId(pub u32);

impl fmt::Display for ContactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Device family a contact originates from.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerKind {
    /// A mouse or other single hovering pointer.
    Mouse,
    /// A finger or stylus on a touch surface.
    Touch,
}

/// Semantic update kind; selects the update branch and names the emitted event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerEventKind {
    /// A contact was pressed.
    Down,
    /// A contact moved while pressed.
    Move,
    /// A pointer moved with no buttons pressed.
    Hover,
    /// A contact was released.
    Up,
}

impl PointerEventKind {
    /// All kinds, in table order.
    pub const ALL: [Self; 4] = [Self::Down, Self::Move, Self::Hover, Self::Up];

    /// Event name as emitted to subscribers.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Down => "pointerdown",
            Self::Move => "pointermove",
            Self::Hover => "pointerhover",
            Self::Up => "pointerup",
        }
    }

    /// Parse an event name produced by [`PointerEventKind::name`].
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Down => 0,
            Self::Move => 1,
            Self::Hover => 2,
            Self::Up => 3,
        }
    }
}

impl fmt::Display for PointerEventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

bitflags::bitflags! {
    /// Raw bitmask of every button currently held, in DOM `buttons` bit order.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Buttons: u16 {
        /// Primary button (usually left, or a touch contact).
        const PRIMARY   = 0b0000_0001;
        /// Secondary button (usually right).
        const SECONDARY = 0b0000_0010;
        /// Auxiliary button (usually the wheel).
        const AUXILIARY = 0b0000_0100;
        /// Fourth button (browser back).
        const BACK      = 0b0000_1000;
        /// Fifth button (browser forward).
        const FORWARD   = 0b0001_0000;
    }
}

/// The single dominant button reported for a sample.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub enum Button {
    /// Nothing pressed, or a chord with no dominant button.
    #[default]
    None,
    /// Primary button.
    Primary,
    /// Secondary button.
    Secondary,
    /// Auxiliary button.
    Auxiliary,
}

impl Button {
    /// Derive the dominant button from a chorded bitmask.
    ///
    /// Masks containing the primary bit among the first three buttons report
    /// [`Button::Primary`]; secondary wins over auxiliary. Any bit beyond the first
    /// three, or an empty mask, reports [`Button::None`].
    ///
    /// ```
    /// use understory_pointer::{Button, Buttons};
    ///
    /// assert_eq!(Button::from_buttons(Buttons::PRIMARY | Buttons::AUXILIARY), Button::Primary);
    /// assert_eq!(Button::from_buttons(Buttons::SECONDARY | Buttons::AUXILIARY), Button::Secondary);
    /// assert_eq!(Button::from_buttons(Buttons::BACK), Button::None);
    /// ```
    pub const fn from_buttons(buttons: Buttons) -> Self {
        match buttons.bits() {
            1 | 3 | 5 | 7 => Self::Primary,
            2 | 6 => Self::Secondary,
            4 => Self::Auxiliary,
            _ => Self::None,
        }
    }
}

bitflags::bitflags! {
    /// Keyboard modifiers held while a sample was taken.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    pub struct Modifiers: u8 {
        /// Alt / Option.
        const ALT   = 0b0001;
        /// Control.
        const CTRL  = 0b0010;
        /// Meta / Command / Super.
        const META  = 0b0100;
        /// Shift.
        const SHIFT = 0b1000;
    }
}

/// One raw contact point as delivered by the input source.
#[derive(Clone, Debug, PartialEq)]
pub struct RawSample<T> {
    /// Element the sample originated from.
    pub target: T,
    /// Position in the input source's coordinate space.
    pub position: Point,
    /// Raw pressed-button bitmask for this sample.
    pub buttons: u16,
}

impl<T> RawSample<T> {
    /// Create a sample.
    pub const fn new(target: T, position: Point, buttons: u16) -> Self {
        Self {
            target,
            position,
            buttons,
        }
    }
}

/// Inline capacity for per-frame contact buffers; covers typical multi-touch hardware.
pub const INLINE_CONTACTS: usize = 10;

/// A raw device interaction: one mouse sample or a list of touch samples.
#[derive(Clone, Debug, PartialEq)]
pub struct RawEvent<T> {
    /// Device family of every sample in this event.
    pub kind: PointerKind,
    /// Active samples. Mouse events carry exactly one; touch events carry every
    /// contact still on the surface.
    pub samples: SmallVec<[RawSample<T>; INLINE_CONTACTS]>,
    /// Keyboard modifiers at the time of the event.
    pub modifiers: Modifiers,
    /// Explicit removal signal: every tracked contact is lifted.
    pub remove: bool,
}

impl<T> RawEvent<T> {
    /// A single-sample mouse event.
    pub fn mouse(target: T, position: Point, buttons: u16) -> Self {
        let mut samples = SmallVec::new();
        samples.push(RawSample::new(target, position, buttons));
        Self {
            kind: PointerKind::Mouse,
            samples,
            modifiers: Modifiers::empty(),
            remove: false,
        }
    }

    /// A touch event listing every contact still on the surface.
    pub fn touch(samples: impl IntoIterator<Item = RawSample<T>>) -> Self {
        Self {
            kind: PointerKind::Touch,
            samples: samples.into_iter().collect(),
            modifiers: Modifiers::empty(),
            remove: false,
        }
    }

    /// An explicit removal signal carrying no samples.
    pub fn removal(kind: PointerKind) -> Self {
        Self {
            kind,
            samples: SmallVec::new(),
            modifiers: Modifiers::empty(),
            remove: true,
        }
    }

    /// Attach keyboard modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Whether any sample reports a pressed button.
    pub fn any_pressed(&self) -> bool {
        self.samples.iter().any(|s| s.buttons != 0)
    }
}
