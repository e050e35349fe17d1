use std::collections::HashMap;
use std::sync::{Arc, LazyLock};

use strum::IntoEnumIterator;
use tracing::debug;

use super::{KindMapper, ProjectorMapper, WhiteboardMapper};
use crate::dto::{ComponentDto, ComponentNoIdDto};
use crate::error::{ComponentError, ComponentResult};
use crate::kind::{ComponentKind, KindFamily, KindMember};
use crate::models::LearningComponent;

static GLOBAL: LazyLock<Arc<MapperRegistry>> =
    LazyLock::new(|| Arc::new(MapperRegistry::standard()));

/// Lookup table from [`ComponentKind`] to its mapper.
///
/// Built once and read-only afterwards; cloning the `Arc` returned by
/// [`MapperRegistry::global`] is the usual way to share it.
pub struct MapperRegistry {
    mappers: HashMap<ComponentKind, Arc<dyn KindMapper>>,
}

impl std::fmt::Debug for MapperRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut kinds: Vec<_> = self.mappers.keys().map(|k| k.path_segment()).collect();
        kinds.sort_unstable();
        f.debug_struct("MapperRegistry").field("kinds", &kinds).finish()
    }
}

impl MapperRegistry {
    pub fn builder() -> MapperRegistryBuilder {
        MapperRegistryBuilder::default()
    }

    /// Registry with every built-in mapper.
    pub fn standard() -> Self {
        let mut mappers: HashMap<ComponentKind, Arc<dyn KindMapper>> = HashMap::new();
        mappers.insert(ComponentKind::Projector, Arc::new(ProjectorMapper));
        mappers.insert(ComponentKind::Whiteboard, Arc::new(WhiteboardMapper));
        Self { mappers }
    }

    /// Process-wide registry, initialized on first use.
    pub fn global() -> Arc<Self> {
        Arc::clone(&GLOBAL)
    }

    pub fn supports(&self, kind: ComponentKind) -> bool {
        self.mappers.contains_key(&kind)
    }

    pub fn missing_kinds(&self) -> Vec<ComponentKind> {
        ComponentKind::iter()
            .filter(|kind| !self.supports(*kind))
            .collect()
    }

    /// Fails with the first kind that has no mapper.
    pub fn ensure_complete(&self) -> ComponentResult<()> {
        match self.missing_kinds().first() {
            Some(kind) => Err(ComponentError::UnsupportedType {
                type_name: kind.entity_name(),
            }),
            None => Ok(()),
        }
    }

    fn mapper_for(
        &self,
        kind: ComponentKind,
        type_name: &'static str,
    ) -> ComponentResult<&dyn KindMapper> {
        self.mappers
            .get(&kind)
            .map(|mapper| mapper.as_ref())
            .ok_or(ComponentError::UnsupportedType { type_name })
    }

    /// Encode a component into its with-id DTO.
    pub fn to_dto_with_id(&self, component: &LearningComponent) -> ComponentResult<ComponentDto> {
        let kind = component.kind();
        let dto = self
            .mapper_for(kind, component.type_name())?
            .map_to_dto(component)?;
        ensure_kind(kind.dto_name(), &dto)?;
        Ok(dto)
    }

    /// Encode a component into its no-id DTO.
    pub fn to_dto_no_id(&self, component: &LearningComponent) -> ComponentResult<ComponentNoIdDto> {
        let kind = component.kind();
        let dto = self
            .mapper_for(kind, component.type_name())?
            .map_to_no_id_dto(component)?;
        ensure_kind(kind.no_id_dto_name(), &dto)?;
        Ok(dto)
    }

    /// Decode a with-id DTO into an entity.
    pub fn to_entity(&self, dto: &ComponentDto) -> ComponentResult<LearningComponent> {
        let kind = dto.kind();
        let entity = self.mapper_for(kind, dto.type_name())?.map_from_dto(dto)?;
        ensure_kind(kind.entity_name(), &entity)?;
        debug!(kind = %kind, id = ?entity.id(), "Decoded component DTO");
        Ok(entity)
    }

    /// Decode a no-id DTO into an entity without an id.
    pub fn to_entity_from_no_id(
        &self,
        dto: &ComponentNoIdDto,
    ) -> ComponentResult<LearningComponent> {
        let kind = dto.kind();
        let entity = self
            .mapper_for(kind, dto.type_name())?
            .map_from_no_id_dto(dto)?;
        ensure_kind(kind.entity_name(), &entity)?;
        Ok(entity)
    }

    /// Decode a with-id DTO and narrow the result to the entity type `T`.
    pub fn to_entity_from_id_dto<T>(&self, dto: &ComponentDto) -> ComponentResult<T>
    where
        T: KindMember<LearningComponent>,
    {
        self.to_entity(dto)?.narrow()
    }

    /// Decode a no-id DTO and narrow the result to the entity type `T`.
    pub fn to_entity_from_no_id_dto<T>(&self, dto: &ComponentNoIdDto) -> ComponentResult<T>
    where
        T: KindMember<LearningComponent>,
    {
        self.to_entity_from_no_id(dto)?.narrow()
    }
}

/// A mapper registered under one kind must produce values of that same kind.
fn ensure_kind<F: KindFamily>(expected: &'static str, produced: &F) -> ComponentResult<()> {
    if produced.type_name() == expected {
        Ok(())
    } else {
        Err(ComponentError::ShapeMismatch {
            expected,
            actual: produced.type_name(),
        })
    }
}

/// Collects mappers and rejects a second mapper for an already registered kind.
#[derive(Default)]
pub struct MapperRegistryBuilder {
    mappers: Vec<Arc<dyn KindMapper>>,
}

impl MapperRegistryBuilder {
    pub fn register<M: KindMapper + 'static>(mut self, mapper: M) -> Self {
        self.mappers.push(Arc::new(mapper));
        self
    }

    pub fn build(self) -> ComponentResult<MapperRegistry> {
        let mut mappers = HashMap::with_capacity(self.mappers.len());
        for mapper in self.mappers {
            let kind = mapper.kind();
            if mappers.insert(kind, mapper).is_some() {
                return Err(ComponentError::DuplicateRegistration(kind));
            }
        }
        Ok(MapperRegistry { mappers })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dto::{DimensionsDto, PositionDto, ProjectorDto, WhiteboardNoIdDto};
    use crate::models::{
        ComponentAttributes, Dimensions, MarkerColor, Orientation, Position, ProjectionArea,
        Projector, Whiteboard,
    };

    fn scenario_projector() -> LearningComponent {
        LearningComponent::Projector(Projector {
            id: Some(7),
            attributes: ComponentAttributes::new(
                Orientation::North,
                Position::new(1.0, 20.0, 30.0),
                Dimensions::new(100.0, 50.0, 30.0),
            ),
            projected_content: "netflix.com".to_string(),
            projection_area: ProjectionArea::new(2.0, 6.0),
        })
    }

    fn whiteboard_payload() -> ComponentNoIdDto {
        ComponentNoIdDto::Whiteboard(WhiteboardNoIdDto {
            orientation: Some("North".to_string()),
            position: Some(PositionDto {
                x: Some(2.0),
                y: Some(2.0),
                z: Some(2.0),
            }),
            dimensions: Some(DimensionsDto {
                width: Some(100.0),
                length: Some(50.0),
                height: Some(8.0),
            }),
            marker_color: Some("Blue".to_string()),
        })
    }

    #[test]
    fn test_standard_registry_is_complete() {
        let registry = MapperRegistry::standard();
        assert!(registry.missing_kinds().is_empty());
        assert!(registry.ensure_complete().is_ok());
        assert!(Arc::ptr_eq(&MapperRegistry::global(), &MapperRegistry::global()));
    }

    #[test]
    fn test_projector_encodes_with_id() {
        let dto = MapperRegistry::global()
            .to_dto_with_id(&scenario_projector())
            .unwrap();

        let ComponentDto::Projector(ProjectorDto {
            id,
            projected_content,
            projection_area,
            ..
        }) = dto
        else {
            panic!("expected a projector DTO");
        };
        assert_eq!(id, Some(7));
        assert_eq!(projected_content.as_deref(), Some("netflix.com"));
        let area = projection_area.unwrap();
        assert_eq!(area.projected_height, Some(2.0));
        assert_eq!(area.projected_width, Some(6.0));
    }

    #[test]
    fn test_whiteboard_decodes_from_no_id_payload() {
        let registry = MapperRegistry::global();
        let whiteboard: Whiteboard = registry
            .to_entity_from_no_id_dto(&whiteboard_payload())
            .unwrap();

        assert_eq!(whiteboard.id, None);
        assert_eq!(whiteboard.marker_color, MarkerColor::Blue);
        assert_eq!(whiteboard.attributes.orientation, Orientation::North);
        assert_eq!(whiteboard.attributes.position, Position::new(2.0, 2.0, 2.0));
        assert_eq!(
            whiteboard.attributes.dimensions,
            Dimensions::new(100.0, 50.0, 8.0)
        );
    }

    #[test]
    fn test_typed_decode_to_wrong_type_is_shape_mismatch() {
        let err = MapperRegistry::global()
            .to_entity_from_no_id_dto::<Projector>(&whiteboard_payload())
            .unwrap_err();
        assert!(matches!(
            err,
            ComponentError::ShapeMismatch {
                expected: "Projector",
                actual: "Whiteboard"
            }
        ));
    }

    #[test]
    fn test_unregistered_kind_is_unsupported() {
        let registry = MapperRegistry::builder()
            .register(ProjectorMapper)
            .build()
            .unwrap();
        assert_eq!(registry.missing_kinds(), vec![ComponentKind::Whiteboard]);
        assert!(matches!(
            registry.ensure_complete(),
            Err(ComponentError::UnsupportedType {
                type_name: "Whiteboard"
            })
        ));

        let err = registry.to_entity_from_no_id(&whiteboard_payload()).unwrap_err();
        assert!(matches!(
            err,
            ComponentError::UnsupportedType {
                type_name: "WhiteboardNoIdDto"
            }
        ));

        let projector = scenario_projector();
        assert!(registry.to_dto_no_id(&projector).is_ok());
    }

    fn whiteboard_entity() -> LearningComponent {
        LearningComponent::Whiteboard(Whiteboard::new(
            ComponentAttributes::new(
                Orientation::North,
                Position::new(2.0, 2.0, 2.0),
                Dimensions::new(100.0, 50.0, 8.0),
            ),
            MarkerColor::Blue,
        ))
    }

    #[test]
    fn test_encoding_unregistered_kind_names_the_type() {
        let registry = MapperRegistry::builder()
            .register(ProjectorMapper)
            .build()
            .unwrap();
        let whiteboard = whiteboard_entity().with_id(4);

        let err = registry.to_dto_with_id(&whiteboard).unwrap_err();
        assert!(matches!(
            err,
            ComponentError::UnsupportedType {
                type_name: "Whiteboard"
            }
        ));
        assert_eq!(err.to_string(), "Unsupported component type: Whiteboard");

        assert!(matches!(
            registry.to_dto_no_id(&whiteboard),
            Err(ComponentError::UnsupportedType {
                type_name: "Whiteboard"
            })
        ));
    }

    /// Registered as the projector mapper but always produces whiteboards.
    struct MislabeledMapper;

    impl KindMapper for MislabeledMapper {
        fn kind(&self) -> ComponentKind {
            ComponentKind::Projector
        }

        fn map_to_dto(&self, _: &LearningComponent) -> ComponentResult<ComponentDto> {
            WhiteboardMapper.map_to_dto(&whiteboard_entity().with_id(1))
        }

        fn map_to_no_id_dto(&self, _: &LearningComponent) -> ComponentResult<ComponentNoIdDto> {
            WhiteboardMapper.map_to_no_id_dto(&whiteboard_entity())
        }

        fn map_from_dto(&self, _: &ComponentDto) -> ComponentResult<LearningComponent> {
            Ok(whiteboard_entity().with_id(1))
        }

        fn map_from_no_id_dto(&self, _: &ComponentNoIdDto) -> ComponentResult<LearningComponent> {
            Ok(whiteboard_entity())
        }
    }

    #[test]
    fn test_mapper_producing_other_kind_is_shape_mismatch() {
        let registry = MapperRegistry::builder()
            .register(MislabeledMapper)
            .register(WhiteboardMapper)
            .build()
            .unwrap();
        let projector = scenario_projector();

        assert!(matches!(
            registry.to_dto_with_id(&projector),
            Err(ComponentError::ShapeMismatch {
                expected: "ProjectorDto",
                actual: "WhiteboardDto"
            })
        ));
        assert!(matches!(
            registry.to_dto_no_id(&projector),
            Err(ComponentError::ShapeMismatch {
                expected: "ProjectorNoIdDto",
                actual: "WhiteboardNoIdDto"
            })
        ));

        let projector_dto = ProjectorMapper.map_to_no_id_dto(&projector).unwrap();
        assert!(matches!(
            registry.to_entity_from_no_id(&projector_dto),
            Err(ComponentError::ShapeMismatch {
                expected: "Projector",
                actual: "Whiteboard"
            })
        ));
    }

    #[test]
    fn test_duplicate_mapper_is_rejected() {
        let result = MapperRegistry::builder()
            .register(ProjectorMapper)
            .register(WhiteboardMapper)
            .register(ProjectorMapper)
            .build();
        assert!(matches!(
            result,
            Err(ComponentError::DuplicateRegistration(ComponentKind::Projector))
        ));
    }

    #[test]
    fn test_round_trip_through_registry() {
        let registry = MapperRegistry::global();
        let component = scenario_projector();

        let with_id = registry.to_dto_with_id(&component).unwrap();
        assert_eq!(registry.to_entity(&with_id).unwrap(), component);

        let no_id = registry.to_dto_no_id(&component).unwrap();
        let decoded = registry.to_entity_from_no_id(&no_id).unwrap();
        assert_eq!(decoded.id(), None);
        assert_eq!(decoded.with_id(7), component);
    }

    #[test]
    fn test_soft_delete_flag_is_not_carried() {
        let registry = MapperRegistry::global();
        let mut component = scenario_projector();
        component.attributes_mut().is_deleted = true;

        let decoded = registry
            .to_entity(&registry.to_dto_with_id(&component).unwrap())
            .unwrap();
        assert!(!decoded.is_deleted());

        component.attributes_mut().is_deleted = false;
        assert_eq!(decoded, component);
    }
}
