//! Wire representations of learning components.
//!
//! Every field is optional at the wire boundary so that a malformed payload
//! still decodes and can be reported field by field by `validator`. Mappers
//! only ever see DTOs that passed validation.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use utoipa::ToSchema;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::kind::kind_family;
use crate::models::{MarkerColor, Orientation};

fn validate_orientation(value: &str) -> Result<(), ValidationError> {
    Orientation::from_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_orientation"))
}

fn validate_marker_color(value: &str) -> Result<(), ValidationError> {
    MarkerColor::from_str(value)
        .map(|_| ())
        .map_err(|_| ValidationError::new("invalid_marker_color"))
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct PositionDto {
    #[validate(required)]
    pub x: Option<f64>,
    #[validate(required)]
    pub y: Option<f64>,
    #[validate(required)]
    pub z: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate, ToSchema)]
pub struct DimensionsDto {
    #[validate(required, range(min = 0.0))]
    pub width: Option<f64>,
    #[validate(required, range(min = 0.0))]
    pub length: Option<f64>,
    #[validate(required, range(min = 0.0))]
    pub height: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionAreaDto {
    #[validate(required, range(min = 0.0))]
    pub projected_height: Option<f64>,
    #[validate(required, range(min = 0.0))]
    pub projected_width: Option<f64>,
}

/// Projector as returned by reads and updates
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectorDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[validate(required, custom(function = "validate_orientation"))]
    #[schema(example = "North")]
    pub orientation: Option<String>,
    #[validate(required, nested)]
    pub position: Option<PositionDto>,
    #[validate(required, nested)]
    pub dimensions: Option<DimensionsDto>,
    #[validate(required, length(min = 1, max = 2048))]
    #[schema(example = "netflix.com")]
    pub projected_content: Option<String>,
    #[validate(required, nested)]
    pub projection_area: Option<ProjectionAreaDto>,
}

/// Projector creation/update payload
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProjectorNoIdDto {
    #[validate(required, custom(function = "validate_orientation"))]
    #[schema(example = "North")]
    pub orientation: Option<String>,
    #[validate(required, nested)]
    pub position: Option<PositionDto>,
    #[validate(required, nested)]
    pub dimensions: Option<DimensionsDto>,
    #[validate(required, length(min = 1, max = 2048))]
    #[schema(example = "netflix.com")]
    pub projected_content: Option<String>,
    #[validate(required, nested)]
    pub projection_area: Option<ProjectionAreaDto>,
}

/// Whiteboard as returned by reads and updates
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WhiteboardDto {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    #[validate(required, custom(function = "validate_orientation"))]
    #[schema(example = "North")]
    pub orientation: Option<String>,
    #[validate(required, nested)]
    pub position: Option<PositionDto>,
    #[validate(required, nested)]
    pub dimensions: Option<DimensionsDto>,
    #[validate(required, custom(function = "validate_marker_color"))]
    #[schema(example = "Blue")]
    pub marker_color: Option<String>,
}

/// Whiteboard creation/update payload
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WhiteboardNoIdDto {
    #[validate(required, custom(function = "validate_orientation"))]
    #[schema(example = "North")]
    pub orientation: Option<String>,
    #[validate(required, nested)]
    pub position: Option<PositionDto>,
    #[validate(required, nested)]
    pub dimensions: Option<DimensionsDto>,
    #[validate(required, custom(function = "validate_marker_color"))]
    #[schema(example = "Blue")]
    pub marker_color: Option<String>,
}

/// Any with-id component DTO, tagged by `componentType` on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "componentType", rename_all = "lowercase")]
pub enum ComponentDto {
    Projector(ProjectorDto),
    Whiteboard(WhiteboardDto),
}

kind_family!(ComponentDto {
    Projector => ProjectorDto,
    Whiteboard => WhiteboardDto,
});

impl ComponentDto {
    pub fn id(&self) -> Option<i64> {
        match self {
            Self::Projector(dto) => dto.id,
            Self::Whiteboard(dto) => dto.id,
        }
    }
}

/// Any no-id component DTO, tagged by `componentType` on the wire
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(tag = "componentType", rename_all = "lowercase")]
pub enum ComponentNoIdDto {
    Projector(ProjectorNoIdDto),
    Whiteboard(WhiteboardNoIdDto),
}

kind_family!(ComponentNoIdDto {
    Projector => ProjectorNoIdDto,
    Whiteboard => WhiteboardNoIdDto,
});

impl Validate for ComponentDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Self::Projector(dto) => dto.validate(),
            Self::Whiteboard(dto) => dto.validate(),
        }
    }
}

impl Validate for ComponentNoIdDto {
    fn validate(&self) -> Result<(), ValidationErrors> {
        match self {
            Self::Projector(dto) => dto.validate(),
            Self::Whiteboard(dto) => dto.validate(),
        }
    }
}
