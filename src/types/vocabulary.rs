//! Closed vocabularies of the conditional restriction mini-language.
//!
//! Every token the grammar accepts is an enum variant here, so validation
//! sites can match exhaustively instead of comparing free-form strings.

use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};
use utoipa::ToSchema;

use crate::error::CheckError;

/// A transportation mode from the access-key hierarchy (`hgv`, `bicycle`, ...).
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
    EnumIter,
    strum_macros::Display,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum TransportMode {
    Foot,
    Dog,
    Ski,
    InlineSkates,
    Horse,
    Vehicle,
    Bicycle,
    ElectricBicycle,
    SpeedPedelec,
    Carriage,
    Trailer,
    Caravan,
    MotorVehicle,
    Motorcycle,
    Moped,
    Mofa,
    Motorcar,
    Motorhome,
    TouristBus,
    Coach,
    Goods,
    Hgv,
    HgvArticulated,
    Bdouble,
    Agricultural,
    GolfCart,
    Atv,
    Snowmobile,
    Psv,
    Bus,
    Taxi,
    Minibus,
    ShareTaxi,
    Hov,
    CarSharing,
    Emergency,
    Hazmat,
    Disabled,
}

/// Travel direction a conditional restriction applies to.
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
pub enum Direction {
    Forward,
    Backward,
}

/// What kind of value a restriction type takes on the left of ` @ `.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum_macros::Display)]
#[strum(serialize_all = "snake_case")]
pub enum ValueKind {
    Access,
    Oneway,
    Overtaking,
    Weight,
    Dimension,
    Speed,
    Duration,
    TurnRestriction,
}

/// The leading segment of a conditional key.
///
/// Besides the dedicated restriction keys, any transport mode can be used as
/// an access key on its own (`hgv:conditional=no @ (...)`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionType {
    Access,
    Oneway,
    Maxspeed,
    Minspeed,
    Maxstay,
    Maxweight,
    Maxweightrating,
    Maxaxleload,
    Maxheight,
    Maxwidth,
    Maxlength,
    Overtaking,
    Restriction,
    Transport(TransportMode),
}

impl RestrictionType {
    /// The vocabulary the values of this restriction type are drawn from.
    pub fn value_kind(&self) -> ValueKind {
        match self {
            Self::Access | Self::Transport(_) => ValueKind::Access,
            Self::Oneway => ValueKind::Oneway,
            Self::Overtaking => ValueKind::Overtaking,
            Self::Maxweight | Self::Maxweightrating | Self::Maxaxleload => ValueKind::Weight,
            Self::Maxheight | Self::Maxwidth | Self::Maxlength => ValueKind::Dimension,
            Self::Maxspeed | Self::Minspeed => ValueKind::Speed,
            Self::Maxstay => ValueKind::Duration,
            Self::Restriction => ValueKind::TurnRestriction,
        }
    }

    pub fn is_transport_mode(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Every restriction type: the dedicated keys, then one per transport mode.
    pub fn iter() -> impl Iterator<Item = RestrictionType> {
        [
            Self::Access,
            Self::Oneway,
            Self::Maxspeed,
            Self::Minspeed,
            Self::Maxstay,
            Self::Maxweight,
            Self::Maxweightrating,
            Self::Maxaxleload,
            Self::Maxheight,
            Self::Maxwidth,
            Self::Maxlength,
            Self::Overtaking,
            Self::Restriction,
        ]
        .into_iter()
        .chain(TransportMode::iter().map(Self::Transport))
    }
}

impl AsRef<str> for RestrictionType {
    fn as_ref(&self) -> &str {
        match self {
            Self::Access => "access",
            Self::Oneway => "oneway",
            Self::Maxspeed => "maxspeed",
            Self::Minspeed => "minspeed",
            Self::Maxstay => "maxstay",
            Self::Maxweight => "maxweight",
            Self::Maxweightrating => "maxweightrating",
            Self::Maxaxleload => "maxaxleload",
            Self::Maxheight => "maxheight",
            Self::Maxwidth => "maxwidth",
            Self::Maxlength => "maxlength",
            Self::Overtaking => "overtaking",
            Self::Restriction => "restriction",
            Self::Transport(mode) => mode.as_ref(),
        }
    }
}

impl FromStr for RestrictionType {
    type Err = CheckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = match s {
            "access" => Self::Access,
            "oneway" => Self::Oneway,
            "maxspeed" => Self::Maxspeed,
            "minspeed" => Self::Minspeed,
            "maxstay" => Self::Maxstay,
            "maxweight" => Self::Maxweight,
            "maxweightrating" => Self::Maxweightrating,
            "maxaxleload" => Self::Maxaxleload,
            "maxheight" => Self::Maxheight,
            "maxwidth" => Self::Maxwidth,
            "maxlength" => Self::Maxlength,
            "overtaking" => Self::Overtaking,
            "restriction" => Self::Restriction,
            other => Self::Transport(TransportMode::from_str(other).map_err(|_| {
                CheckError::InvalidFormat(format!("unknown restriction type '{other}'"))
            })?),
        };
        Ok(parsed)
    }
}

impl Display for RestrictionType {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.as_ref())
    }
}

/// Values legal for `access` and transport-mode restriction keys.
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
pub enum AccessValue {
    Yes,
    No,
    Private,
    Permissive,
    Destination,
    Delivery,
    Customers,
    Designated,
    UseSidepath,
    Dismount,
    Agricultural,
    Forestry,
    Discouraged,
    Permit,
    Residents,
    Emergency,
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
pub enum OnewayValue {
    Yes,
    No,
    #[serde(rename = "-1")]
    #[strum(serialize = "-1")]
    Reverse,
    Reversible,
    Alternating,
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
pub enum OvertakingValue {
    Yes,
    No,
    Caution,
    Both,
    Forward,
    Backward,
}

/// Measurement units accepted after a numeric restriction value.
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
pub enum Unit {
    #[strum(to_string = "t")]
    Tonnes,
    #[strum(to_string = "kg")]
    Kilograms,
    #[strum(to_string = "lbs")]
    Pounds,
    #[strum(to_string = "st")]
    ShortTons,
    #[strum(to_string = "m")]
    Metres,
    #[strum(to_string = "ft")]
    Feet,
    #[strum(to_string = "km/h")]
    KilometresPerHour,
    #[strum(to_string = "mph")]
    MilesPerHour,
    #[strum(to_string = "knots")]
    Knots,
    #[strum(to_string = "minutes", serialize = "minute", serialize = "min")]
    Minutes,
    #[strum(to_string = "hours", serialize = "hour", serialize = "h")]
    Hours,
    #[strum(to_string = "days", serialize = "day")]
    Days,
}

impl Unit {
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Tonnes | Self::Kilograms | Self::Pounds | Self::ShortTons => ValueKind::Weight,
            Self::Metres | Self::Feet => ValueKind::Dimension,
            Self::KilometresPerHour | Self::MilesPerHour | Self::Knots => ValueKind::Speed,
            Self::Minutes | Self::Hours | Self::Days => ValueKind::Duration,
        }
    }
}

/// Non-numeric words accepted in place of a measurement.
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
pub enum QuantityKeyword {
    #[serde(rename = "none")]
    #[strum(serialize = "none")]
    NoLimit,
    Walk,
    Signals,
    Unlimited,
    No,
}

impl QuantityKeyword {
    pub fn allowed_for(&self, kind: ValueKind) -> bool {
        match kind {
            ValueKind::Weight | ValueKind::Dimension | ValueKind::TurnRestriction => {
                matches!(self, Self::NoLimit)
            }
            ValueKind::Speed => matches!(self, Self::NoLimit | Self::Walk | Self::Signals),
            ValueKind::Duration => matches!(self, Self::No | Self::Unlimited),
            ValueKind::Access | ValueKind::Oneway | ValueKind::Overtaking => false,
        }
    }
}
