//! Candidate pair enumeration.
//!
//! All bodies are checked against each other in O(n^2); for the body counts
//! this engine targets that is cheaper than maintaining an acceleration
//! structure. Pairs come out in insertion order, which keeps the solver's
//! contact ordering deterministic.

use crate::collision::CollisionPair;
use crate::core::BodyStorage;

/// Enumerates every pair of bodies worth handing to the narrow phase.
///
/// Pairs where both bodies are static are skipped, as are pairs where both
/// bodies are asleep. A sleeping body paired with an awake one is kept so
/// that the awake body can wake it on contact.
pub fn candidate_pairs(bodies: &BodyStorage) -> Vec<CollisionPair> {
    let handles = bodies.handles();
    let mut pairs = Vec::new();

    for i in 0..handles.len() {
        for j in (i + 1)..handles.len() {
            let (Some(a), Some(b)) = (bodies.get(handles[i]), bodies.get(handles[j])) else {
                continue;
            };

            if a.is_static() && b.is_static() {
                continue;
            }
            if a.is_sleeping() && b.is_sleeping() {
                continue;
            }

            pairs.push(CollisionPair::new(handles[i], handles[j]));
        }
    }

    pairs
}
