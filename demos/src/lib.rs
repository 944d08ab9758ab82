// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scripted input traces shared by the demos.

use kurbo::Point;
use understory_pointer::{Modifiers, PointerInput, PointerKind, RawEvent, RawSample};

/// Element handles used by the scripted traces.
pub mod nodes {
    /// The tracked surface.
    pub const CANVAS: u32 = 1;
    /// A child of the canvas.
    pub const HANDLE: u32 = 2;
    /// A sibling of the canvas, outside the tracked subtree.
    pub const TOOLBAR: u32 = 3;
    /// Common root of everything.
    pub const ROOT: u32 = 0;
}

/// Parent relationships for [`nodes`].
pub fn parent_of(node: &u32) -> Option<u32> {
    match *node {
        nodes::HANDLE => Some(nodes::CANVAS),
        nodes::CANVAS | nodes::TOOLBAR => Some(nodes::ROOT),
        _ => None,
    }
}

fn finger(target: u32, x: f64, y: f64) -> RawSample<u32> {
    RawSample::new(target, Point::new(x, y), 1)
}

/// Two fingers pinch inward while a third rests on the toolbar, then lift one at
/// a time.
pub fn pinch() -> Vec<PointerInput<u32>> {
    let mut script = Vec::new();
    script.push(PointerInput::Down(RawEvent::touch([
        finger(nodes::CANVAS, 20.0, 50.0),
        finger(nodes::TOOLBAR, 300.0, 10.0),
    ])));
    script.push(PointerInput::Down(RawEvent::touch([
        finger(nodes::CANVAS, 20.0, 50.0),
        finger(nodes::TOOLBAR, 300.0, 10.0),
        finger(nodes::HANDLE, 180.0, 50.0),
    ])));
    for step in 1..=4 {
        let d = f64::from(step) * 12.5;
        script.push(PointerInput::Move(RawEvent::touch([
            finger(nodes::HANDLE, 180.0 - d, 50.0),
            finger(nodes::TOOLBAR, 300.0, 10.0),
            finger(nodes::CANVAS, 20.0 + d, 50.0),
        ])));
    }
    script.push(PointerInput::Up(RawEvent::touch([
        finger(nodes::TOOLBAR, 300.0, 10.0),
        finger(nodes::CANVAS, 70.0, 50.0),
    ])));
    script.push(PointerInput::Up(RawEvent::touch([finger(
        nodes::TOOLBAR,
        300.0,
        10.0,
    )])));
    script
}

/// A mouse hovers, drags with shift held, and leaves the surface.
pub fn drag() -> Vec<PointerInput<u32>> {
    let at = |x: f64, y: f64, buttons: u16| RawEvent::mouse(nodes::CANVAS, Point::new(x, y), buttons);
    vec![
        PointerInput::Move(at(10.0, 10.0, 0)),
        PointerInput::Move(at(14.0, 12.0, 0)),
        PointerInput::Down(at(14.0, 12.0, 1).with_modifiers(Modifiers::SHIFT)),
        PointerInput::Move(at(30.0, 20.0, 1).with_modifiers(Modifiers::SHIFT)),
        PointerInput::Move(at(55.0, 31.0, 1).with_modifiers(Modifiers::SHIFT)),
        PointerInput::Up(at(55.0, 31.0, 0)),
        PointerInput::Move(at(60.0, 33.0, 0)),
        PointerInput::Cancel(PointerKind::Mouse),
    ]
}
