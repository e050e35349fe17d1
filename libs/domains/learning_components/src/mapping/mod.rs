//! Entity ↔ DTO mapping.
//!
//! Each component kind has one [`ComponentMapper`] with statically typed
//! entity and DTO types. The [`MapperRegistry`] stores them behind the
//! object-safe [`KindMapper`] so callers can convert a [`LearningComponent`]
//! without knowing which kind it holds.

mod projector;
mod registry;
mod whiteboard;

pub use projector::ProjectorMapper;
pub use registry::{MapperRegistry, MapperRegistryBuilder};
pub use whiteboard::WhiteboardMapper;

use std::str::FromStr;

use crate::dto::{ComponentDto, ComponentNoIdDto, DimensionsDto, PositionDto};
use crate::error::{ComponentError, ComponentResult};
use crate::kind::{ComponentKind, KindFamily, KindMember};
use crate::models::{ComponentAttributes, Dimensions, LearningComponent, Orientation, Position};

/// Bidirectional conversion between one entity kind and its two DTO shapes.
///
/// Encoding is total. Decoding expects validated DTOs and reports a missing
/// field as [`ComponentError::MissingField`]. The soft-delete flag is not
/// carried by either DTO shape, so decoded entities are always live.
pub trait ComponentMapper: Send + Sync {
    type Entity: KindMember<LearningComponent>;
    type Dto: KindMember<ComponentDto>;
    type NoIdDto: KindMember<ComponentNoIdDto>;

    fn to_dto(&self, entity: &Self::Entity) -> Self::Dto;

    fn to_no_id_dto(&self, entity: &Self::Entity) -> Self::NoIdDto;

    fn from_dto(&self, dto: &Self::Dto) -> ComponentResult<Self::Entity>;

    fn from_no_id_dto(&self, dto: &Self::NoIdDto) -> ComponentResult<Self::Entity>;
}

/// Kind-erased mapper operating on the component families.
pub trait KindMapper: Send + Sync {
    fn kind(&self) -> ComponentKind;

    fn map_to_dto(&self, component: &LearningComponent) -> ComponentResult<ComponentDto>;

    fn map_to_no_id_dto(&self, component: &LearningComponent)
    -> ComponentResult<ComponentNoIdDto>;

    fn map_from_dto(&self, dto: &ComponentDto) -> ComponentResult<LearningComponent>;

    fn map_from_no_id_dto(&self, dto: &ComponentNoIdDto) -> ComponentResult<LearningComponent>;
}

fn member_of<'a, F, T>(family: &'a F) -> ComponentResult<&'a T>
where
    F: KindFamily,
    T: KindMember<F>,
{
    T::as_member(family).ok_or(ComponentError::ShapeMismatch {
        expected: T::TYPE_NAME,
        actual: family.type_name(),
    })
}

impl<M: ComponentMapper> KindMapper for M {
    fn kind(&self) -> ComponentKind {
        <M::Entity as KindMember<LearningComponent>>::KIND
    }

    fn map_to_dto(&self, component: &LearningComponent) -> ComponentResult<ComponentDto> {
        let entity = member_of::<_, M::Entity>(component)?;
        Ok(self.to_dto(entity).into_family())
    }

    fn map_to_no_id_dto(
        &self,
        component: &LearningComponent,
    ) -> ComponentResult<ComponentNoIdDto> {
        let entity = member_of::<_, M::Entity>(component)?;
        Ok(self.to_no_id_dto(entity).into_family())
    }

    fn map_from_dto(&self, dto: &ComponentDto) -> ComponentResult<LearningComponent> {
        let dto = member_of::<_, M::Dto>(dto)?;
        Ok(self.from_dto(dto)?.into_family())
    }

    fn map_from_no_id_dto(&self, dto: &ComponentNoIdDto) -> ComponentResult<LearningComponent> {
        let dto = member_of::<_, M::NoIdDto>(dto)?;
        Ok(self.from_no_id_dto(dto)?.into_family())
    }
}

pub(crate) fn required<T: Clone>(
    value: &Option<T>,
    kind: ComponentKind,
    field: &'static str,
) -> ComponentResult<T> {
    value
        .clone()
        .ok_or(ComponentError::MissingField { kind, field })
}

pub(crate) fn parse_vocabulary<T: FromStr>(value: &str, field: &'static str) -> ComponentResult<T> {
    T::from_str(value).map_err(|_| ComponentError::InvalidField {
        field,
        value: value.to_string(),
    })
}

pub(crate) fn position_to_dto(position: &Position) -> PositionDto {
    PositionDto {
        x: Some(position.x),
        y: Some(position.y),
        z: Some(position.z),
    }
}

pub(crate) fn dimensions_to_dto(dimensions: &Dimensions) -> DimensionsDto {
    DimensionsDto {
        width: Some(dimensions.width),
        length: Some(dimensions.length),
        height: Some(dimensions.height),
    }
}

/// Shared fields of every DTO shape, borrowed from the concrete DTO.
pub(crate) struct WireAttributes<'a> {
    pub orientation: &'a Option<String>,
    pub position: &'a Option<PositionDto>,
    pub dimensions: &'a Option<DimensionsDto>,
}

impl WireAttributes<'_> {
    pub fn decode(&self, kind: ComponentKind) -> ComponentResult<ComponentAttributes> {
        let orientation = required(self.orientation, kind, "orientation")?;
        let orientation: Orientation = parse_vocabulary(&orientation, "orientation")?;

        let position = self
            .position
            .as_ref()
            .ok_or(ComponentError::MissingField { kind, field: "position" })?;
        let dimensions = self
            .dimensions
            .as_ref()
            .ok_or(ComponentError::MissingField { kind, field: "dimensions" })?;

        Ok(ComponentAttributes::new(
            orientation,
            Position::new(
                required(&position.x, kind, "position.x")?,
                required(&position.y, kind, "position.y")?,
                required(&position.z, kind, "position.z")?,
            ),
            Dimensions::new(
                required(&dimensions.width, kind, "dimensions.width")?,
                required(&dimensions.length, kind, "dimensions.length")?,
                required(&dimensions.height, kind, "dimensions.height")?,
            ),
        ))
    }
}
