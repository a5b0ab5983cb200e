//! Attachment nodes of the Unified Identity Graph.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::config::constants::attachment as bounds;

/// Type alias for attachment identifiers (UUID v4).
pub type AttachmentId = Uuid;

/// Type alias for user identifiers.
pub type UserId = Uuid;

/// Kind of attachment a user holds.
///
/// - Value: something the user considers important in itself
/// - Goal: an outcome the user is working towards
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentKind {
    /// A held value (e.g. honesty, family).
    Value,
    /// A pursued goal (e.g. finish the degree).
    Goal,
}

impl AttachmentKind {
    /// Returns all kind variants as an array.
    #[inline]
    pub fn all() -> [AttachmentKind; 2] {
        [Self::Value, Self::Goal]
    }
}

impl fmt::Display for AttachmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Value => "value",
            Self::Goal => "goal",
        };
        write!(f, "{}", s)
    }
}

/// The numeric attributes of an attachment the Learning Engine may mutate.
///
/// Each property carries its own closed bounds; every write path clamps
/// through [`AttachmentProperty::clamp`] so the rule table's floors and
/// ceilings and the type invariant are the same code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AttachmentProperty {
    /// Importance of the attachment to the user, [1, 10].
    PowerLevel,
    /// Felt positivity, [-10, 10].
    Valence,
    /// Model confidence that this attachment is real, [0.05, 1.0].
    Certainty,
}

impl AttachmentProperty {
    /// Lower bound of the property's closed interval.
    #[inline]
    pub fn min(&self) -> f32 {
        match self {
            Self::PowerLevel => bounds::POWER_LEVEL_MIN,
            Self::Valence => bounds::VALENCE_MIN,
            Self::Certainty => bounds::CERTAINTY_MIN,
        }
    }

    /// Upper bound of the property's closed interval.
    #[inline]
    pub fn max(&self) -> f32 {
        match self {
            Self::PowerLevel => bounds::POWER_LEVEL_MAX,
            Self::Valence => bounds::VALENCE_MAX,
            Self::Certainty => bounds::CERTAINTY_MAX,
        }
    }

    /// Clamp a candidate value into the property's bounds.
    ///
    /// Out-of-range updates are clamped, never rejected.
    #[inline]
    pub fn clamp(&self, value: f32) -> f32 {
        value.clamp(self.min(), self.max())
    }

    /// Returns all property variants as an array.
    #[inline]
    pub fn all() -> [AttachmentProperty; 3] {
        [Self::PowerLevel, Self::Valence, Self::Certainty]
    }
}

impl fmt::Display for AttachmentProperty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::PowerLevel => "power_level",
            Self::Valence => "valence",
            Self::Certainty => "certainty",
        };
        write!(f, "{}", s)
    }
}

/// A typed node representing one of a user's Values or Goals.
///
/// # Fields
/// - `id`: Unique attachment identifier (UUID v4)
/// - `user_id`: Owning user (exactly one)
/// - `kind`: Value or Goal
/// - `label`: Short human-readable description
/// - `power_level`: Importance [1, 10]
/// - `valence`: Felt positivity [-10, 10]
/// - `certainty`: Model confidence [0.05, 1.0]
/// - `created_at` / `updated_at`: Lifecycle timestamps
///
/// Created by upstream profile-building; read and numerically mutated only
/// by the Learning Engine; never deleted by this crate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attachment {
    /// Unique identifier for this attachment.
    pub id: AttachmentId,

    /// The user who holds this attachment.
    pub user_id: UserId,

    /// Value or Goal.
    pub kind: AttachmentKind,

    /// Short human-readable description (e.g. "honesty").
    pub label: String,

    /// Importance [1, 10].
    pub power_level: f32,

    /// Felt positivity [-10, 10].
    pub valence: f32,

    /// Model confidence [0.05, 1.0].
    pub certainty: f32,

    /// Timestamp when this attachment was created.
    pub created_at: DateTime<Utc>,

    /// Timestamp of the last attribute mutation.
    pub updated_at: DateTime<Utc>,
}

impl Attachment {
    /// Creates a new attachment with clamped initial attributes.
    pub fn new(
        user_id: UserId,
        kind: AttachmentKind,
        label: impl Into<String>,
        power_level: f32,
        valence: f32,
        certainty: f32,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            kind,
            label: label.into(),
            power_level: AttachmentProperty::PowerLevel.clamp(power_level),
            valence: AttachmentProperty::Valence.clamp(valence),
            certainty: AttachmentProperty::Certainty.clamp(certainty),
            created_at: now,
            updated_at: now,
        }
    }

    /// Read the current value of a mutable property.
    #[inline]
    pub fn get(&self, property: AttachmentProperty) -> f32 {
        match property {
            AttachmentProperty::PowerLevel => self.power_level,
            AttachmentProperty::Valence => self.valence,
            AttachmentProperty::Certainty => self.certainty,
        }
    }

    /// Write a property, clamping into bounds and touching `updated_at`.
    ///
    /// Returns the value actually stored after clamping.
    pub fn set(&mut self, property: AttachmentProperty, value: f32) -> f32 {
        let clamped = property.clamp(value);
        match property {
            AttachmentProperty::PowerLevel => self.power_level = clamped,
            AttachmentProperty::Valence => self.valence = clamped,
            AttachmentProperty::Certainty => self.certainty = clamped,
        }
        self.updated_at = Utc::now();
        clamped
    }
}
