//! Map entities and the in-memory arena they are looked up from.

use std::collections::{BTreeMap, HashMap};
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumString};
use utoipa::ToSchema;

use crate::error::CheckError;
use crate::traits::EntityStore;

/// Kind of map feature an entity is.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    ToSchema,
    AsRefStr,
    EnumString,
    strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ItemType {
    Node,
    Edge,
    Area,
    Relation,
}

/// Stable identifier of an entity in the dataset arena.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, ToSchema,
)]
pub struct EntityId {
    pub kind: ItemType,
    pub osm_id: i64,
}

impl EntityId {
    pub fn new(kind: ItemType, osm_id: i64) -> Self {
        Self { kind, osm_id }
    }

    pub fn node(osm_id: i64) -> Self {
        Self::new(ItemType::Node, osm_id)
    }

    pub fn edge(osm_id: i64) -> Self {
        Self::new(ItemType::Edge, osm_id)
    }

    pub fn relation(osm_id: i64) -> Self {
        Self::new(ItemType::Relation, osm_id)
    }
}

impl Display for EntityId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}/{}", self.kind, self.osm_id)
    }
}

/// Accepts `edge/42`, `relation/-7`, ...
impl FromStr for EntityId {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s.split_once('/').ok_or_else(|| {
            CheckError::InvalidFormat(format!(
                "Failed to parse entity id: missing '/' in '{s}' (expected format: kind/id)"
            ))
        })?;
        let kind = ItemType::from_str(kind).map_err(|_| {
            CheckError::InvalidFormat(format!("Failed to parse entity id: unknown kind '{kind}' in '{s}'"))
        })?;
        let osm_id = id.parse::<i64>().map_err(|e| {
            CheckError::InvalidFormat(format!("Failed to parse entity id: '{id}' in '{s}': {e}"))
        })?;
        Ok(EntityId::new(kind, osm_id))
    }
}

/// A role-labelled reference from a relation to another entity.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub struct RelationMember {
    pub role: String,
    pub member: EntityId,
}

impl RelationMember {
    pub fn new(role: impl Into<String>, member: EntityId) -> Self {
        Self {
            role: role.into(),
            member,
        }
    }
}

/// A tagged node, edge, area or relation, as seen by the checks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Entity {
    id: EntityId,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    tags: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    members: Vec<RelationMember>,
    /// Start and end node of an edge, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Vec<EntityId>>)]
    endpoints: Option<[EntityId; 2]>,
}

impl Entity {
    pub fn new(id: EntityId) -> Self {
        Self {
            id,
            tags: BTreeMap::new(),
            members: Vec::new(),
            endpoints: None,
        }
    }

    pub fn node(osm_id: i64) -> Self {
        Self::new(EntityId::node(osm_id))
    }

    pub fn edge(osm_id: i64) -> Self {
        Self::new(EntityId::edge(osm_id))
    }

    pub fn relation(osm_id: i64) -> Self {
        Self::new(EntityId::relation(osm_id))
    }

    pub fn with_tag(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.insert(key.into(), value.into());
        self
    }

    pub fn with_member(mut self, role: impl Into<String>, member: EntityId) -> Self {
        self.members.push(RelationMember::new(role, member));
        self
    }

    pub fn with_endpoints(mut self, start: EntityId, end: EntityId) -> Self {
        self.endpoints = Some([start, end]);
        self
    }

    pub fn id(&self) -> EntityId {
        self.id
    }

    pub fn kind(&self) -> ItemType {
        self.id.kind
    }

    pub fn tag(&self, key: &str) -> Option<&str> {
        self.tags.get(key).map(String::as_str)
    }

    pub fn has_tag(&self, key: &str) -> bool {
        self.tags.contains_key(key)
    }

    /// All tags, ordered by key.
    pub fn tags(&self) -> &BTreeMap<String, String> {
        &self.tags
    }

    pub fn members(&self) -> &[RelationMember] {
        &self.members
    }

    pub fn endpoints(&self) -> Option<&[EntityId; 2]> {
        self.endpoints.as_ref()
    }
}

/// In-memory entity arena keyed by [`EntityId`].
#[derive(Debug, Clone, Default)]
pub struct MapDataset {
    entities: HashMap<EntityId, Entity>,
}

impl MapDataset {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entity, returning the one it replaced.
    pub fn insert(&mut self, entity: Entity) -> Option<Entity> {
        self.entities.insert(entity.id(), entity)
    }

    pub fn with_entity(mut self, entity: Entity) -> Self {
        self.insert(entity);
        self
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.values()
    }
}

impl EntityStore for MapDataset {
    fn entity(&self, id: &EntityId) -> Option<&Entity> {
        self.entities.get(id)
    }
}

impl FromIterator<Entity> for MapDataset {
    fn from_iter<I: IntoIterator<Item = Entity>>(iter: I) -> Self {
        let mut dataset = MapDataset::new();
        for entity in iter {
            dataset.insert(entity);
        }
        dataset
    }
}
