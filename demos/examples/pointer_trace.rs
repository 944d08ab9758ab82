// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Replay scripted mouse and touch input through a `PointerSurface` and print every
//! emitted frame.
//!
//! Run:
//! - `cargo run -p understory_pointer_demos --example pointer_trace`
//! - `RUST_LOG=understory_pointer=trace cargo run -p understory_pointer_demos --example pointer_trace`
//!   to also see identity assignments and removals as they happen.

use kurbo::{Rect, Size};
use understory_pointer::{ContactSet, PointerEventKind, PointerInput, PointerSurface};
use understory_pointer_demos::{drag, nodes, parent_of, pinch};

fn print_frame(set: &ContactSet<u32>) {
    let Some(kind) = set.kind() else {
        return;
    };
    println!("{kind} ({} active)", set.len());
    for c in set {
        println!(
            "  {} target={} pos=({:.1}, {:.1}) move=({:.1}, {:.1}) dist=({:.1}, {:.1}) {:?} {:?}",
            c.id(),
            c.target(),
            c.position().x,
            c.position().y,
            c.movement().x,
            c.movement().y,
            c.distance().x,
            c.distance().y,
            c.button(),
            c.modifiers(),
        );
    }
    for c in set.removed() {
        println!("  {} removed at ({:.1}, {:.1})", c.id(), c.position().x, c.position().y);
    }
}

fn replay(name: &str, script: Vec<PointerInput<u32>>) {
    println!("== {name}");
    log::info!("replaying {name}: {} inputs", script.len());
    let mut surface = PointerSurface::new(nodes::CANVAS, parent_of);
    for kind in PointerEventKind::ALL {
        surface.on(kind, print_frame);
    }
    for input in script {
        if let Err(err) = surface.handle(input) {
            log::warn!("{name}: input rejected: {err}");
        }
    }

    let geometry = (Rect::new(0.0, 0.0, 400.0, 100.0), Size::new(800.0, 200.0));
    match surface.project(&geometry) {
        Ok(projected) => println!("  {} contacts left after replay", projected.len()),
        Err(err) => println!("  projection failed: {err}"),
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .init();

    replay("pinch", pinch());
    replay("drag", drag());
}
