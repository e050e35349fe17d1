use super::{
    ComponentMapper, WireAttributes, dimensions_to_dto, parse_vocabulary, position_to_dto,
    required,
};
use crate::dto::{WhiteboardDto, WhiteboardNoIdDto};
use crate::error::ComponentResult;
use crate::kind::ComponentKind;
use crate::models::{MarkerColor, Whiteboard};

const KIND: ComponentKind = ComponentKind::Whiteboard;

#[derive(Debug, Clone, Copy, Default)]
pub struct WhiteboardMapper;

fn decode_marker_color(value: &Option<String>) -> ComponentResult<MarkerColor> {
    let value = required(value, KIND, "markerColor")?;
    parse_vocabulary(&value, "markerColor")
}

impl ComponentMapper for WhiteboardMapper {
    type Entity = Whiteboard;
    type Dto = WhiteboardDto;
    type NoIdDto = WhiteboardNoIdDto;

    fn to_dto(&self, entity: &Whiteboard) -> WhiteboardDto {
        WhiteboardDto {
            id: entity.id,
            orientation: Some(entity.attributes.orientation.to_string()),
            position: Some(position_to_dto(&entity.attributes.position)),
            dimensions: Some(dimensions_to_dto(&entity.attributes.dimensions)),
            marker_color: Some(entity.marker_color.to_string()),
        }
    }

    fn to_no_id_dto(&self, entity: &Whiteboard) -> WhiteboardNoIdDto {
        WhiteboardNoIdDto {
            orientation: Some(entity.attributes.orientation.to_string()),
            position: Some(position_to_dto(&entity.attributes.position)),
            dimensions: Some(dimensions_to_dto(&entity.attributes.dimensions)),
            marker_color: Some(entity.marker_color.to_string()),
        }
    }

    fn from_dto(&self, dto: &WhiteboardDto) -> ComponentResult<Whiteboard> {
        let attributes = WireAttributes {
            orientation: &dto.orientation,
            position: &dto.position,
            dimensions: &dto.dimensions,
        }
        .decode(KIND)?;

        Ok(Whiteboard {
            id: dto.id,
            attributes,
            marker_color: decode_marker_color(&dto.marker_color)?,
        })
    }

    fn from_no_id_dto(&self, dto: &WhiteboardNoIdDto) -> ComponentResult<Whiteboard> {
        let attributes = WireAttributes {
            orientation: &dto.orientation,
            position: &dto.position,
            dimensions: &dto.dimensions,
        }
        .decode(KIND)?;

        Ok(Whiteboard::new(
            attributes,
            decode_marker_color(&dto.marker_color)?,
        ))
    }
}
