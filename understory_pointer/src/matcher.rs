// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Identity matcher: pair this frame's contacts with last frame's.
//!
//! ## Rule
//!
//! A current contact `c` is paired with a previous contact `p` when:
//!
//! 1. `p` is the nearest previous contact to `c` among those not yet claimed this
//!    frame, and
//! 2. `c` is the nearest current contact to `p` among **all** current contacts.
//!
//! The second check is what makes the pairing mutual. Without it, two current
//! contacts processed in a favorable order could both reach for the same previous
//! contact, and the later one would silently steal its identity.
//!
//! Distances are Euclidean in the input coordinate space (compared squared). Ties
//! go to the first candidate in iteration order on both sides, so results are
//! deterministic.
//!
//! ## Passes
//!
//! 1. Fill an `n × m` distance matrix.
//! 2. For each previous contact, find its nearest current contact.
//! 3. Walk current contacts in order, pick the nearest unclaimed previous contact,
//!    and accept it if step 2 picked the same pairing.
//!
//! The working buffers live in the matcher and are reused across frames.
//!
//! ```
//! use kurbo::Point;
//! use understory_pointer::IdentityMatcher;
//!
//! let mut matcher = IdentityMatcher::new();
//! let previous = [Point::new(0.0, 0.0), Point::new(10.0, 0.0)];
//! let current = [Point::new(9.0, 0.0), Point::new(1.0, 0.0)];
//! assert_eq!(matcher.resolve(&current, &previous), &[Some(1), Some(0)]);
//! ```

use alloc::vec::Vec;

use kurbo::Point;

/// Reusable mutual-nearest matcher.
#[derive(Clone, Debug, Default)]
pub struct IdentityMatcher {
    max_distance: Option<f64>,
    /// Row-major `current × previous` squared distances.
    distances: Vec<f64>,
    /// Nearest current index for each previous contact.
    nearest_current: Vec<Option<usize>>,
    claimed: Vec<bool>,
    assignments: Vec<Option<usize>>,
}

impl IdentityMatcher {
    /// A matcher with no distance limit.
    pub fn new() -> Self {
        Self::default()
    }

    /// A matcher that never pairs contacts farther apart than `max_distance`.
    ///
    /// `None` means unlimited. Negative and NaN limits are clamped to zero, so only
    /// contacts that did not move at all are paired.
    pub fn with_max_distance(max_distance: Option<f64>) -> Self {
        Self {
            max_distance: clamp_limit(max_distance),
            ..Self::default()
        }
    }

    /// The configured distance limit.
    pub fn max_distance(&self) -> Option<f64> {
        self.max_distance
    }

    /// Change the distance limit, clamped as in [`Self::with_max_distance`].
    pub fn set_max_distance(&mut self, max_distance: Option<f64>) {
        self.max_distance = clamp_limit(max_distance);
    }

    /// Pair `current` positions with `previous` positions.
    ///
    /// Returns one entry per current position: the index of its matched previous
    /// position, or `None` when it has no mutual-nearest partner. Every previous
    /// index appears at most once.
    pub fn resolve(&mut self, current: &[Point], previous: &[Point]) -> &[Option<usize>] {
        let (n, m) = (current.len(), previous.len());

        self.distances.clear();
        for c in current {
            self.distances
                .extend(previous.iter().map(|p| c.distance_squared(*p)));
        }

        self.nearest_current.clear();
        for j in 0..m {
            let best = nearest((0..n).map(|i| (i, self.distances[i * m + j])));
            self.nearest_current.push(best);
        }

        let limit = self.max_distance.map(|d| d * d);
        self.claimed.clear();
        self.claimed.resize(m, false);
        self.assignments.clear();
        for i in 0..n {
            let row = &self.distances[i * m..(i + 1) * m];
            let candidate = nearest(
                row.iter()
                    .copied()
                    .enumerate()
                    .filter(|&(j, _)| !self.claimed[j]),
            );
            let matched = candidate.filter(|&j| {
                self.nearest_current[j] == Some(i) && limit.is_none_or(|l| row[j] <= l)
            });
            if let Some(j) = matched {
                self.claimed[j] = true;
            }
            self.assignments.push(matched);
        }

        &self.assignments
    }
}

fn clamp_limit(max_distance: Option<f64>) -> Option<f64> {
    max_distance.map(|d| {
        if d >= 0.0 {
            d
        } else {
            log::warn!("max match distance {d} clamped to 0");
            0.0
        }
    })
}

/// Index of the smallest distance; the first one wins ties.
fn nearest(candidates: impl Iterator<Item = (usize, f64)>) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (idx, d) in candidates {
        if best.is_none_or(|(_, bd)| d < bd) {
            best = Some((idx, d));
        }
    }
    best.map(|(idx, _)| idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pts(coords: &[(f64, f64)]) -> Vec<Point> {
        coords.iter().map(|&(x, y)| Point::new(x, y)).collect()
    }

    #[test]
    fn approaching_contacts_keep_their_partners() {
        let mut m = IdentityMatcher::new();
        let previous = pts(&[(0.0, 0.0), (10.0, 0.0)]);
        let current = pts(&[(1.0, 0.0), (9.0, 0.0)]);
        assert_eq!(m.resolve(&current, &previous), &[Some(0), Some(1)]);
    }

    #[test]
    fn current_order_does_not_change_pairing() {
        let mut m = IdentityMatcher::new();
        let previous = pts(&[(0.0, 0.0), (10.0, 0.0)]);
        let current = pts(&[(9.0, 0.0), (1.0, 0.0)]);
        assert_eq!(m.resolve(&current, &previous), &[Some(1), Some(0)]);
    }

    // Contacts that swap sides between frames are paired by proximity, so the
    // contact now at the left inherits the left identity.
    #[test]
    fn crossing_contacts_are_paired_by_proximity() {
        let mut m = IdentityMatcher::new();
        let previous = pts(&[(0.0, 0.0), (10.0, 0.0)]);
        // The contact that started at 0 moved to 8; the one at 10 moved to 2.
        let current = pts(&[(8.0, 0.0), (2.0, 0.0)]);
        assert_eq!(m.resolve(&current, &previous), &[Some(1), Some(0)]);
    }

    #[test]
    fn one_sided_nearest_is_rejected() {
        let mut m = IdentityMatcher::new();
        let previous = pts(&[(0.0, 0.0)]);
        // Both current contacts are nearest to the single previous contact, but it
        // is nearest to the second one.
        let current = pts(&[(1.0, 0.0), (0.5, 0.0)]);
        assert_eq!(m.resolve(&current, &previous), &[None, Some(0)]);
    }

    #[test]
    fn claimed_contacts_are_skipped() {
        let mut m = IdentityMatcher::new();
        let previous = pts(&[(0.0, 0.0), (10.0, 0.0)]);
        let current = pts(&[(0.0, 0.0), (1.0, 0.0)]);
        // Second contact's nearest is claimed; the remaining one is mutual.
        assert_eq!(m.resolve(&current, &previous), &[Some(0), Some(1)]);
    }

    #[test]
    fn equidistant_candidates_pick_first() {
        let mut m = IdentityMatcher::new();
        let previous = pts(&[(-1.0, 0.0), (1.0, 0.0)]);
        let current = pts(&[(0.0, 0.0)]);
        assert_eq!(m.resolve(&current, &previous), &[Some(0)]);

        let previous = pts(&[(0.0, 0.0)]);
        let current = pts(&[(0.0, 2.0), (0.0, -2.0)]);
        assert_eq!(m.resolve(&current, &previous), &[Some(0), None]);
    }

    #[test]
    fn max_distance_blocks_far_pairs() {
        let mut m = IdentityMatcher::with_max_distance(Some(10.0));
        let previous = pts(&[(0.0, 0.0), (50.0, 0.0)]);
        let current = pts(&[(10.0, 0.0), (100.0, 0.0)]);
        assert_eq!(m.resolve(&current, &previous), &[Some(0), None]);

        let previous = pts(&[(0.0, 0.0)]);
        let current = pts(&[(20.0, 0.0)]);
        assert_eq!(m.resolve(&current, &previous), &[None]);
        m.set_max_distance(None);
        assert_eq!(m.resolve(&current, &previous), &[Some(0)]);
    }

    #[test]
    fn invalid_limits_clamp_to_zero() {
        let previous = pts(&[(0.0, 0.0)]);
        let current = pts(&[(3.0, 0.0)]);
        for limit in [-5.0, f64::NAN] {
            let mut m = IdentityMatcher::with_max_distance(Some(limit));
            assert_eq!(m.max_distance(), Some(0.0));
            assert_eq!(m.resolve(&current, &previous), &[None]);
            assert_eq!(m.resolve(&previous, &previous), &[Some(0)]);
        }

        let mut m = IdentityMatcher::new();
        m.set_max_distance(Some(-1.0));
        assert_eq!(m.max_distance(), Some(0.0));
        m.set_max_distance(Some(f64::INFINITY));
        assert_eq!(m.resolve(&current, &previous), &[Some(0)]);
    }

    #[test]
    fn empty_sides() {
        let mut m = IdentityMatcher::new();
        assert!(m.resolve(&[], &pts(&[(1.0, 1.0)])).is_empty());
        assert_eq!(m.resolve(&pts(&[(1.0, 1.0)]), &[]), &[None]);
    }

    #[test]
    fn buffers_are_reset_between_frames() {
        let mut m = IdentityMatcher::new();
        let previous = pts(&[(0.0, 0.0), (5.0, 5.0), (9.0, 9.0)]);
        let current = pts(&[(9.0, 9.0), (0.0, 0.0), (5.0, 5.0)]);
        assert_eq!(
            m.resolve(&current, &previous),
            &[Some(2), Some(0), Some(1)]
        );
        let previous = pts(&[(3.0, 3.0)]);
        let current = pts(&[(3.0, 4.0)]);
        assert_eq!(m.resolve(&current, &previous), &[Some(0)]);
    }

    #[test]
    fn every_previous_index_is_used_at_most_once() {
        let mut m = IdentityMatcher::new();
        let previous = pts(&[(0.0, 0.0), (1.0, 0.0), (2.0, 0.0), (30.0, 0.0)]);
        let current = pts(&[(0.4, 0.0), (0.6, 0.0), (1.4, 0.0), (1.6, 0.0), (29.0, 0.0)]);
        let out = m.resolve(&current, &previous).to_vec();
        let mut seen = Vec::new();
        for j in out.iter().flatten() {
            assert!(!seen.contains(j), "previous {j} matched twice");
            seen.push(*j);
        }
        assert_eq!(out[4], Some(3));
    }
}
