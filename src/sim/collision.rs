//! Collision detection against category groups
//!
//! Collisions are plain rect-vs-rect overlap tests between one object and
//! every live member of a named group. The reaction (damage, heal, ram
//! destruction) is applied by the caller in `tick`; this module only answers
//! "who did I hit this tick".

use super::rect::Rect;
use super::state::Entity;

/// Indices of every live group member overlapping `rect`.
///
/// All simultaneous overlaps are reported, not just the first: a projectile
/// passing through two stacked enemies damages both in the same tick.
/// Members already flagged dead earlier in the tick are skipped, so a target
/// removed by another object's update is treated as no target.
pub fn hits_in_group(rect: &Rect, group: &[Entity]) -> Vec<usize> {
    group
        .iter()
        .enumerate()
        .filter(|(_, e)| e.alive() && rect.intersects(&e.rect()))
        .map(|(i, _)| i)
        .collect()
}
