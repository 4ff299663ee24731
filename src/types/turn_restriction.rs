//! Canonical turn-restriction structure built from a relation's members.

use std::str::FromStr;

use itertools::iproduct;
use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, EnumIter, EnumString};
use thiserror::Error;
use utoipa::ToSchema;

use crate::traits::EntityStore;

use super::entity::{Entity, EntityId, ItemType};
use super::vocabulary::TransportMode;

pub const TYPE_KEY: &str = "type";
pub const RESTRICTION_TYPE: &str = "restriction";
pub const RESTRICTION_KEY: &str = "restriction";

/// Roles that make up the route of a turn restriction.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    AsRefStr,
    EnumString,
    EnumIter,
    strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum MemberRole {
    From,
    Via,
    To,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    ToSchema,
    AsRefStr,
    EnumString,
    EnumIter,
    strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TurnRestrictionKind {
    NoLeftTurn,
    NoRightTurn,
    NoStraightOn,
    #[serde(rename = "no_u_turn")]
    #[strum(serialize = "no_u_turn")]
    NoUTurn,
    OnlyLeftTurn,
    OnlyRightTurn,
    OnlyStraightOn,
    #[serde(rename = "only_u_turn")]
    #[strum(serialize = "only_u_turn")]
    OnlyUTurn,
    NoEntry,
    NoExit,
}

impl TurnRestrictionKind {
    pub fn is_only(&self) -> bool {
        matches!(
            self,
            Self::OnlyLeftTurn | Self::OnlyRightTurn | Self::OnlyStraightOn | Self::OnlyUTurn
        )
    }
}

/// The value of `restriction` or of a `restriction:<mode>` tag.
///
/// The first value naming a known restriction kind wins, `restriction` before
/// the mode-specific keys. Without one, the first value present is returned.
pub fn restriction_tag(entity: &Entity) -> Option<&str> {
    let mode_values = entity.tags().iter().filter_map(|(key, value)| {
        let mode = key.strip_prefix("restriction:")?;
        TransportMode::from_str(mode).ok().map(|_| value.as_str())
    });
    let mut candidates = entity.tag(RESTRICTION_KEY).into_iter().chain(mode_values);
    let first = candidates.clone().next();
    candidates
        .find(|value| TurnRestrictionKind::from_str(value).is_ok())
        .or(first)
}

/// A relation tagged `type=restriction`. Whether its restriction value and
/// members make sense is for [`TurnRestriction::from_relation`] to decide.
pub fn is_turn_restriction(entity: &Entity) -> bool {
    entity.kind() == ItemType::Relation && entity.tag(TYPE_KEY) == Some(RESTRICTION_TYPE)
}

/// Why a relation could not be read as a turn restriction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TopologyError {
    #[error("{0} is not a relation")]
    NotARelation(EntityId),

    #[error("restriction tag is missing")]
    MissingRestrictionTag,

    #[error("unknown turn restriction '{0}'")]
    UnknownRestriction(String),

    #[error("member {0} does not resolve to an entity")]
    UnresolvedMember(EntityId),

    #[error("no '{0}' member")]
    MissingRole(MemberRole),

    #[error("'{role}' member {member} is a {kind}")]
    WrongMemberKind {
        role: MemberRole,
        member: EntityId,
        kind: ItemType,
    },

    #[error("via members mix nodes and edges or name more than one node")]
    AmbiguousVia,

    #[error("member {0} is used both as via and as from/to")]
    IncompatibleRoles(EntityId),

    #[error("members do not form a connected route")]
    Disconnected,
}

/// Whether [`TurnRestriction::from_relation_with`] requires the route to connect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectivityRule {
    Enforce,
    Ignore,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum Via {
    Node(EntityId),
    Edges(Vec<EntityId>),
}

/// A relation resolved into its `from`, optional `via`, and `to` parts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TurnRestriction {
    relation: EntityId,
    kind: TurnRestrictionKind,
    from: Vec<EntityId>,
    via: Option<Via>,
    to: Vec<EntityId>,
}

impl TurnRestriction {
    /// Build the structure, requiring a connected route where endpoints are known.
    pub fn from_relation(relation: &Entity, store: &dyn EntityStore) -> Result<Self, TopologyError> {
        Self::from_relation_with(relation, store, ConnectivityRule::Enforce)
    }

    pub fn from_relation_with(
        relation: &Entity,
        store: &dyn EntityStore,
        connectivity: ConnectivityRule,
    ) -> Result<Self, TopologyError> {
        if relation.kind() != ItemType::Relation {
            return Err(TopologyError::NotARelation(relation.id()));
        }
        let value = restriction_tag(relation).ok_or(TopologyError::MissingRestrictionTag)?;
        let kind = TurnRestrictionKind::from_str(value)
            .map_err(|_| TopologyError::UnknownRestriction(value.to_string()))?;

        let mut from: Vec<&Entity> = Vec::new();
        let mut via: Vec<&Entity> = Vec::new();
        let mut to: Vec<&Entity> = Vec::new();

        for member in relation.members() {
            let entity = store
                .entity(&member.member)
                .ok_or(TopologyError::UnresolvedMember(member.member))?;
            // Roles outside the route (location_hint, ...) are not our concern.
            let Ok(role) = MemberRole::from_str(&member.role) else {
                continue;
            };
            let allowed = match role {
                MemberRole::From | MemberRole::To => entity.kind() == ItemType::Edge,
                MemberRole::Via => matches!(entity.kind(), ItemType::Node | ItemType::Edge),
            };
            if !allowed {
                return Err(TopologyError::WrongMemberKind {
                    role,
                    member: entity.id(),
                    kind: entity.kind(),
                });
            }
            match role {
                MemberRole::From => from.push(entity),
                MemberRole::Via => via.push(entity),
                MemberRole::To => to.push(entity),
            }
        }

        if from.is_empty() {
            return Err(TopologyError::MissingRole(MemberRole::From));
        }
        if to.is_empty() {
            return Err(TopologyError::MissingRole(MemberRole::To));
        }
        if let Some(shared) = via
            .iter()
            .find(|v| from.iter().chain(to.iter()).any(|e| e.id() == v.id()))
        {
            return Err(TopologyError::IncompatibleRoles(shared.id()));
        }

        let via_part = resolve_via(&via)?;

        if connectivity == ConnectivityRule::Enforce && !is_connected(&from, &via, &to) {
            return Err(TopologyError::Disconnected);
        }

        Ok(TurnRestriction {
            relation: relation.id(),
            kind,
            from: from.iter().map(|e| e.id()).collect(),
            via: via_part,
            to: to.iter().map(|e| e.id()).collect(),
        })
    }

    pub fn relation(&self) -> EntityId {
        self.relation
    }

    pub fn kind(&self) -> TurnRestrictionKind {
        self.kind
    }

    pub fn from(&self) -> &[EntityId] {
        &self.from
    }

    pub fn via(&self) -> Option<&Via> {
        self.via.as_ref()
    }

    pub fn to(&self) -> &[EntityId] {
        &self.to
    }
}

fn resolve_via(via: &[&Entity]) -> Result<Option<Via>, TopologyError> {
    if via.is_empty() {
        return Ok(None);
    }
    let (nodes, edges): (Vec<_>, Vec<_>) = via
        .iter()
        .map(|e| e.id())
        .partition(|id| id.kind == ItemType::Node);
    match (nodes.as_slice(), edges.is_empty()) {
        ([node], true) => Ok(Some(Via::Node(*node))),
        ([], false) => Ok(Some(Via::Edges(edges))),
        _ => Err(TopologyError::AmbiguousVia),
    }
}

fn shares_endpoint(a: &Entity, b: &Entity) -> bool {
    match (a.endpoints(), b.endpoints()) {
        (Some(a), Some(b)) => a.iter().any(|n| b.contains(n)),
        _ => true,
    }
}

fn touches(edge: &Entity, node: &Entity) -> bool {
    edge.endpoints()
        .is_none_or(|ends| ends.contains(&node.id()))
}

/// Member order in the relation is not trusted: any from/to pairing that
/// connects through the via part is accepted.
fn is_connected(from: &[&Entity], via: &[&Entity], to: &[&Entity]) -> bool {
    match via {
        [] => iproduct!(from, to).any(|(f, t)| shares_endpoint(f, t)),
        [node] if node.kind() == ItemType::Node => {
            from.iter().any(|f| touches(f, node)) && to.iter().any(|t| touches(t, node))
        }
        edges => {
            if !is_single_chain(edges) {
                return false;
            }
            let end_nodes = chain_end_nodes(edges);
            let attaches = |edge: &Entity| match &end_nodes {
                Some(nodes) => edge
                    .endpoints()
                    .is_none_or(|ends| ends.iter().any(|n| nodes.contains(n))),
                None => edges.iter().any(|v| shares_endpoint(edge, v)),
            };
            from.iter().any(|f| attaches(*f)) && to.iter().any(|t| attaches(*t))
        }
    }
}

/// Whether the via edges form one piece, grown from the first edge.
fn is_single_chain(edges: &[&Entity]) -> bool {
    let mut reached = vec![false; edges.len()];
    let mut pending = vec![0];
    reached[0] = true;
    while let Some(current) = pending.pop() {
        for (idx, edge) in edges.iter().enumerate() {
            if !reached[idx] && shares_endpoint(edges[current], edge) {
                reached[idx] = true;
                pending.push(idx);
            }
        }
    }
    reached.into_iter().all(|r| r)
}

/// Nodes where the via chain is open: endpoints no other via edge shares.
/// `None` when some endpoint is unknown or the chain is a closed loop.
fn chain_end_nodes(edges: &[&Entity]) -> Option<Vec<EntityId>> {
    let mut nodes = Vec::new();
    for edge in edges {
        for node in edge.endpoints()? {
            let shared = edges.iter().any(|other| {
                other.id() != edge.id()
                    && other.endpoints().is_some_and(|ends| ends.contains(node))
            });
            if !shared {
                nodes.push(*node);
            }
        }
    }
    (!nodes.is_empty()).then_some(nodes)
}
