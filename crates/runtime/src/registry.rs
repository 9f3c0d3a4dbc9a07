//! Generational storage for world objects.
//!
//! A [`Registry`] hands out typed handles made of a slot index and a
//! generation. Removing a value bumps the slot's generation, so every handle
//! issued before the removal stops resolving even after the slot is reused.

use std::fmt;
use std::marker::PhantomData;

use pickup_core::{AgentId, ItemId};

/// Handle types a [`Registry`] can issue.
pub trait RegistryKey: Copy + Eq + fmt::Debug {
    fn from_parts(index: u32, generation: u32) -> Self;
    fn index(self) -> u32;
    fn generation(self) -> u32;
}

impl RegistryKey for ItemId {
    fn from_parts(index: u32, generation: u32) -> Self {
        ItemId::new(index, generation)
    }

    fn index(self) -> u32 {
        self.index
    }

    fn generation(self) -> u32 {
        self.generation
    }
}

impl RegistryKey for AgentId {
    fn from_parts(index: u32, generation: u32) -> Self {
        AgentId::new(index, generation)
    }

    fn index(self) -> u32 {
        self.index
    }

    fn generation(self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone)]
struct Entry<T> {
    generation: u32,
    value: Option<T>,
}

#[derive(Clone)]
pub struct Registry<K, T> {
    entries: Vec<Entry<T>>,
    free: Vec<u32>,
    len: usize,
    _key: PhantomData<fn() -> K>,
}

impl<K: RegistryKey, T> Registry<K, T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
            free: Vec::new(),
            len: 0,
            _key: PhantomData,
        }
    }

    /// Stores the value built by `make`, which receives the handle it will be
    /// stored under.
    pub fn insert_with(&mut self, make: impl FnOnce(K) -> T) -> K {
        let index = match self.free.pop() {
            Some(index) => index,
            None => {
                self.entries.push(Entry {
                    generation: 0,
                    value: None,
                });
                (self.entries.len() - 1) as u32
            }
        };
        let entry = &mut self.entries[index as usize];
        let key = K::from_parts(index, entry.generation);
        entry.value = Some(make(key));
        self.len += 1;
        key
    }

    pub fn remove(&mut self, key: K) -> Option<T> {
        let entry = self.entries.get_mut(key.index() as usize)?;
        if entry.generation != key.generation() {
            return None;
        }
        let value = entry.value.take()?;
        entry.generation = entry.generation.wrapping_add(1);
        self.free.push(key.index());
        self.len -= 1;
        Some(value)
    }

    pub fn get(&self, key: K) -> Option<&T> {
        self.entries
            .get(key.index() as usize)
            .filter(|entry| entry.generation == key.generation())
            .and_then(|entry| entry.value.as_ref())
    }

    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.entries
            .get_mut(key.index() as usize)
            .filter(|entry| entry.generation == key.generation())
            .and_then(|entry| entry.value.as_mut())
    }

    pub fn contains(&self, key: K) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Live handles in slot order.
    pub fn keys(&self) -> Vec<K> {
        self.iter().map(|(key, _)| key).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (K, &T)> {
        self.entries.iter().enumerate().filter_map(|(index, entry)| {
            entry
                .value
                .as_ref()
                .map(|value| (K::from_parts(index as u32, entry.generation), value))
        })
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (K, &mut T)> {
        self.entries
            .iter_mut()
            .enumerate()
            .filter_map(|(index, entry)| {
                let generation = entry.generation;
                entry
                    .value
                    .as_mut()
                    .map(|value| (K::from_parts(index as u32, generation), value))
            })
    }
}

impl<K: RegistryKey, T> Default for Registry<K, T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: RegistryKey, T: fmt::Debug> fmt::Debug for Registry<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}
