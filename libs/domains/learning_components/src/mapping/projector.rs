use super::{
    ComponentMapper, WireAttributes, dimensions_to_dto, position_to_dto, required,
};
use crate::dto::{ProjectionAreaDto, ProjectorDto, ProjectorNoIdDto};
use crate::error::{ComponentError, ComponentResult};
use crate::kind::ComponentKind;
use crate::models::{ComponentAttributes, ProjectionArea, Projector};

const KIND: ComponentKind = ComponentKind::Projector;

#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectorMapper;

impl ProjectorMapper {
    fn decode(
        &self,
        attributes: WireAttributes<'_>,
        projected_content: &Option<String>,
        projection_area: &Option<ProjectionAreaDto>,
    ) -> ComponentResult<(ComponentAttributes, String, ProjectionArea)> {
        let attributes = attributes.decode(KIND)?;
        let projected_content = required(projected_content, KIND, "projectedContent")?;
        let area = projection_area.as_ref().ok_or(ComponentError::MissingField {
            kind: KIND,
            field: "projectionArea",
        })?;
        let projection_area = ProjectionArea::new(
            required(&area.projected_height, KIND, "projectionArea.projectedHeight")?,
            required(&area.projected_width, KIND, "projectionArea.projectedWidth")?,
        );
        Ok((attributes, projected_content, projection_area))
    }
}

fn projection_area_to_dto(area: &ProjectionArea) -> ProjectionAreaDto {
    ProjectionAreaDto {
        projected_height: Some(area.projected_height),
        projected_width: Some(area.projected_width),
    }
}

impl ComponentMapper for ProjectorMapper {
    type Entity = Projector;
    type Dto = ProjectorDto;
    type NoIdDto = ProjectorNoIdDto;

    fn to_dto(&self, entity: &Projector) -> ProjectorDto {
        ProjectorDto {
            id: entity.id,
            orientation: Some(entity.attributes.orientation.to_string()),
            position: Some(position_to_dto(&entity.attributes.position)),
            dimensions: Some(dimensions_to_dto(&entity.attributes.dimensions)),
            projected_content: Some(entity.projected_content.clone()),
            projection_area: Some(projection_area_to_dto(&entity.projection_area)),
        }
    }

    fn to_no_id_dto(&self, entity: &Projector) -> ProjectorNoIdDto {
        ProjectorNoIdDto {
            orientation: Some(entity.attributes.orientation.to_string()),
            position: Some(position_to_dto(&entity.attributes.position)),
            dimensions: Some(dimensions_to_dto(&entity.attributes.dimensions)),
            projected_content: Some(entity.projected_content.clone()),
            projection_area: Some(projection_area_to_dto(&entity.projection_area)),
        }
    }

    fn from_dto(&self, dto: &ProjectorDto) -> ComponentResult<Projector> {
        let (attributes, projected_content, projection_area) = self.decode(
            WireAttributes {
                orientation: &dto.orientation,
                position: &dto.position,
                dimensions: &dto.dimensions,
            },
            &dto.projected_content,
            &dto.projection_area,
        )?;
        Ok(Projector {
            id: dto.id,
            attributes,
            projected_content,
            projection_area,
        })
    }

    fn from_no_id_dto(&self, dto: &ProjectorNoIdDto) -> ComponentResult<Projector> {
        let (attributes, projected_content, projection_area) = self.decode(
            WireAttributes {
                orientation: &dto.orientation,
                position: &dto.position,
                dimensions: &dto.dimensions,
            },
            &dto.projected_content,
            &dto.projection_area,
        )?;
        Ok(Projector::new(attributes, projected_content, projection_area))
    }
}
