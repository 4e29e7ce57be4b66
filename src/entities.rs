//! Keyword entities and the ordering/filtering rules for their display.
//!
//! The keyword-extraction service returns a JSON object mapping each entity
//! to the list of epoch seconds where it is mentioned. The index keeps the
//! payload's insertion order until a sort is requested.

use std::cmp::Ordering;
use std::fmt;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::timecode::EpochSeconds;

/// Sort orders offered by the annotation UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Alphabetical,
    Chronological,
}

/// One extracted keyword with the times it is mentioned
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entity {
    pub key: String,
    /// Mention offsets in the order the extraction service emitted them
    pub mentions: Vec<EpochSeconds>,
}

impl Entity {
    pub fn new(key: impl Into<String>, mentions: Vec<EpochSeconds>) -> Self {
        Self {
            key: key.into(),
            mentions,
        }
    }
}

/// Mapping from entity key to mention times, insertion-ordered
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityIndex {
    entries: Vec<Entity>,
}

impl EntityIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Vec<Entity>) -> Self {
        Self { entries }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> &[Entity] {
        &self.entries
    }

    /// Look up an entity by exact key
    pub fn get(&self, key: &str) -> Option<&Entity> {
        self.entries.iter().find(|entity| entity.key == key)
    }

    /// Append a mention time for `key`, creating the entity on first sight.
    /// Keys keep their first-mention position.
    pub fn add_mention(&mut self, key: &str, time: EpochSeconds) {
        match self.entries.iter_mut().find(|entity| entity.key == key) {
            Some(entity) => entity.mentions.push(time),
            None => self.entries.push(Entity::new(key, vec![time])),
        }
    }

    /// Record every entity of one caption window at the window's start time
    pub fn add_mentions<I, S>(&mut self, keys: I, start_time: EpochSeconds)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for key in keys {
            self.add_mention(key.as_ref(), start_time);
        }
    }

    /// Remove and return the entity with the given key, if present
    pub fn remove(&mut self, key: &str) -> Option<Entity> {
        let position = self.entries.iter().position(|entity| entity.key == key)?;
        Some(self.entries.remove(position))
    }

    /// Sort the index in place. `Vec::sort_by` is stable and the comparators
    /// carry the full tie-break chain, so equal entries keep their order.
    pub fn sort(&mut self, order: SortOrder) {
        match order {
            SortOrder::Alphabetical => self.entries.sort_by(alphabetical),
            SortOrder::Chronological => self.entries.sort_by(chronological),
        }
    }

    /// Entities whose key contains `query`, case-insensitively, in their
    /// existing order. An empty query matches everything.
    pub fn filter(&self, query: &str) -> Vec<&Entity> {
        self.entries
            .iter()
            .filter(|entity| matches_query(&entity.key, query))
            .collect()
    }
}

/// Ascending lexicographic order on the entity key
pub fn alphabetical(a: &Entity, b: &Entity) -> Ordering {
    a.key.cmp(&b.key)
}

/// Order by earliest mentions: mention lists are compared element by element
/// up to the shorter length; with an equal prefix the shorter list sorts
/// first, and a full tie falls back to the alphabetical order.
pub fn chronological(a: &Entity, b: &Entity) -> Ordering {
    for (left, right) in a.mentions.iter().zip(&b.mentions) {
        match left.cmp(right) {
            Ordering::Equal => continue,
            unequal => return unequal,
        }
    }
    a.mentions
        .len()
        .cmp(&b.mentions.len())
        .then_with(|| alphabetical(a, b))
}

/// Case-insensitive substring predicate shared by the entity and bookmark
/// filters; an empty query matches everything.
pub fn matches_query(candidate: &str, query: &str) -> bool {
    query.is_empty() || candidate.to_lowercase().contains(&query.to_lowercase())
}

// The wire shape is a plain JSON object, `{entity: [seconds...]}`. Serde's
// map collections would reorder the keys, so the impls walk the map by hand.

impl Serialize for EntityIndex {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for entity in &self.entries {
            map.serialize_entry(&entity.key, &entity.mentions)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for EntityIndex {
    fn deserialize<D: Deserializer<'de>>(
        deserializer: D,
    ) -> std::result::Result<Self, D::Error> {
        struct IndexVisitor;

        impl<'de> Visitor<'de> for IndexVisitor {
            type Value = EntityIndex;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a map of entity keys to mention timestamps")
            }

            fn visit_map<A: MapAccess<'de>>(
                self,
                mut access: A,
            ) -> std::result::Result<Self::Value, A::Error> {
                let mut entries = Vec::with_capacity(access.size_hint().unwrap_or(0));
                while let Some((key, mentions)) =
                    access.next_entry::<String, Vec<EpochSeconds>>()?
                {
                    entries.push(Entity { key, mentions });
                }
                Ok(EntityIndex { entries })
            }
        }

        deserializer.deserialize_map(IndexVisitor)
    }
}
