use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use utoipa::ToSchema;

pub use crate::kind::ComponentKind;
use crate::kind::kind_family;

/// Direction a component faces inside its learning space
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    Default,
    ToSchema,
)]
pub enum Orientation {
    #[default]
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

/// Whiteboard marker colors
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    Default,
    ToSchema,
)]
pub enum MarkerColor {
    #[default]
    Black,
    Blue,
    Red,
    Green,
}

/// Position of a component relative to the learning space origin
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Position {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}

/// Bounding box of a component
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Dimensions {
    pub width: f64,
    pub length: f64,
    pub height: f64,
}

impl Dimensions {
    pub fn new(width: f64, length: f64, height: f64) -> Self {
        Self {
            width,
            length,
            height,
        }
    }
}

/// Rectangle a projector casts onto its surface
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ProjectionArea {
    pub projected_height: f64,
    pub projected_width: f64,
}

impl ProjectionArea {
    pub fn new(projected_height: f64, projected_width: f64) -> Self {
        Self {
            projected_height,
            projected_width,
        }
    }
}

/// Attributes shared by every component kind
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComponentAttributes {
    pub orientation: Orientation,
    pub position: Position,
    pub dimensions: Dimensions,
    /// Soft-delete flag; deleted components are kept but hidden from listings
    pub is_deleted: bool,
}

impl ComponentAttributes {
    pub fn new(orientation: Orientation, position: Position, dimensions: Dimensions) -> Self {
        Self {
            orientation,
            position,
            dimensions,
            is_deleted: false,
        }
    }
}

/// Projector entity
#[derive(Debug, Clone, PartialEq)]
pub struct Projector {
    /// Assigned by the server on creation
    pub id: Option<i64>,
    pub attributes: ComponentAttributes,
    pub projected_content: String,
    pub projection_area: ProjectionArea,
}

impl Projector {
    pub fn new(
        attributes: ComponentAttributes,
        projected_content: impl Into<String>,
        projection_area: ProjectionArea,
    ) -> Self {
        Self {
            id: None,
            attributes,
            projected_content: projected_content.into(),
            projection_area,
        }
    }
}

/// Whiteboard entity
#[derive(Debug, Clone, PartialEq)]
pub struct Whiteboard {
    /// Assigned by the server on creation
    pub id: Option<i64>,
    pub attributes: ComponentAttributes,
    pub marker_color: MarkerColor,
}

impl Whiteboard {
    pub fn new(attributes: ComponentAttributes, marker_color: MarkerColor) -> Self {
        Self {
            id: None,
            attributes,
            marker_color,
        }
    }
}

/// A learning component of any kind.
///
/// Generic code (repositories, services, the dispatcher) holds this type and
/// never matches on the variant; per-kind behavior lives in mappers and
/// request builders.
#[derive(Debug, Clone, PartialEq)]
pub enum LearningComponent {
    Projector(Projector),
    Whiteboard(Whiteboard),
}

kind_family!(LearningComponent {
    Projector => Projector,
    Whiteboard => Whiteboard,
});

impl LearningComponent {
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::Projector(p) => p.id,
            Self::Whiteboard(w) => w.id,
        }
    }

    pub fn set_id(&mut self, id: i64) {
        match self {
            Self::Projector(p) => p.id = Some(id),
            Self::Whiteboard(w) => w.id = Some(id),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.set_id(id);
        self
    }

    pub fn attributes(&self) -> &ComponentAttributes {
        match self {
            Self::Projector(p) => &p.attributes,
            Self::Whiteboard(w) => &w.attributes,
        }
    }

    pub fn attributes_mut(&mut self) -> &mut ComponentAttributes {
        match self {
            Self::Projector(p) => &mut p.attributes,
            Self::Whiteboard(w) => &mut w.attributes,
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.attributes().is_deleted
    }
}

/// Query filters for listing components of a learning space
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
pub struct ComponentFilter {
    /// Only return components of this kind
    pub kind: Option<ComponentKind>,
    /// Include soft-deleted components
    #[serde(default)]
    pub include_deleted: bool,
}

impl ComponentFilter {
    pub fn matches(&self, component: &LearningComponent) -> bool {
        use crate::kind::KindFamily;

        if let Some(kind) = self.kind {
            if component.kind() != kind {
                return false;
            }
        }
        self.include_deleted || !component.is_deleted()
    }
}
