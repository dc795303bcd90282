use std::collections::HashMap;

use crate::bodies::Body;
use crate::core::BodyHandle;
use crate::error::PhysicsError;
use crate::Result;

/// Insertion-ordered storage for the world's bodies.
///
/// Iteration order is the order bodies were added, which keeps broad-phase
/// pair enumeration, manifold collection and solver ordering deterministic
/// from run to run. Handles stay valid across removals of other bodies.
pub struct BodyStorage {
    items: Vec<(BodyHandle, Body)>,
    index: HashMap<BodyHandle, usize>,
    next_id: u32,
}

impl BodyStorage {
    /// Creates a new empty storage
    pub fn new() -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
            // Start at 1, so 0 can represent an invalid handle
            next_id: 1,
        }
    }

    /// Adds a body, stamps its identity, and returns its handle
    pub fn add(&mut self, mut body: Body) -> BodyHandle {
        let handle = BodyHandle(self.next_id);
        self.next_id += 1;
        body.id = handle;
        self.index.insert(handle, self.items.len());
        self.items.push((handle, body));
        handle
    }

    /// Gets a reference to a body by its handle
    pub fn get(&self, handle: BodyHandle) -> Option<&Body> {
        self.index.get(&handle).map(|&i| &self.items[i].1)
    }

    /// Gets a mutable reference to a body by its handle
    pub fn get_mut(&mut self, handle: BodyHandle) -> Option<&mut Body> {
        let i = *self.index.get(&handle)?;
        Some(&mut self.items[i].1)
    }

    /// Removes a body, preserving the insertion order of the rest
    pub fn remove(&mut self, handle: BodyHandle) -> Option<Body> {
        let i = self.index.remove(&handle)?;
        let (_, body) = self.items.remove(i);
        for (j, (h, _)) in self.items.iter().enumerate().skip(i) {
            self.index.insert(*h, j);
        }
        Some(body)
    }

    /// Returns the number of bodies in the storage
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns whether the storage is empty
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Clears all bodies from the storage
    pub fn clear(&mut self) {
        self.items.clear();
        self.index.clear();
    }

    /// Returns all handles in insertion order
    pub fn handles(&self) -> Vec<BodyHandle> {
        self.items.iter().map(|(h, _)| *h).collect()
    }

    /// Iterates bodies in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (BodyHandle, &Body)> {
        self.items.iter().map(|(h, body)| (*h, body))
    }

    /// Iterates bodies mutably in insertion order
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (BodyHandle, &mut Body)> {
        self.items.iter_mut().map(|(h, body)| (*h, body))
    }

    /// Gets a body by its handle, returning an error if not found
    pub fn get_body(&self, handle: BodyHandle) -> Result<&Body> {
        self.get(handle).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", handle))
        })
    }

    /// Gets a mutable reference to a body by its handle, returning an error
    /// if not found
    pub fn get_body_mut(&mut self, handle: BodyHandle) -> Result<&mut Body> {
        self.get_mut(handle).ok_or_else(|| {
            PhysicsError::ResourceNotFound(format!("Body with handle {:?} not found", handle))
        })
    }
}

impl Default for BodyStorage {
    fn default() -> Self {
        Self::new()
    }
}
