//! Component kinds and the closed families that are keyed by them.
//!
//! Every value that varies per kind (entities, with-id DTOs, no-id DTOs) lives
//! in a sum type implementing [`KindFamily`]. Each per-kind struct implements
//! [`KindMember`] for its family, which gives typed narrowing and widening
//! without runtime type inspection.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};
use utoipa::ToSchema;

use crate::error::{ComponentError, ComponentResult};

/// The kinds of physical equipment a learning space can hold.
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
    IntoStaticStr,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ComponentKind {
    Projector,
    Whiteboard,
}

impl ComponentKind {
    /// Path segment used by the kind-specific endpoints.
    pub fn path_segment(self) -> &'static str {
        self.into()
    }

    pub fn entity_name(self) -> &'static str {
        match self {
            Self::Projector => "Projector",
            Self::Whiteboard => "Whiteboard",
        }
    }

    pub fn dto_name(self) -> &'static str {
        match self {
            Self::Projector => "ProjectorDto",
            Self::Whiteboard => "WhiteboardDto",
        }
    }

    pub fn no_id_dto_name(self) -> &'static str {
        match self {
            Self::Projector => "ProjectorNoIdDto",
            Self::Whiteboard => "WhiteboardNoIdDto",
        }
    }
}

/// A sum type with one variant per [`ComponentKind`].
pub trait KindFamily: Sized {
    fn kind(&self) -> ComponentKind;

    /// Name of the concrete per-kind type currently held.
    fn type_name(&self) -> &'static str;

    /// Narrow to the concrete per-kind type `T`.
    fn narrow<T: KindMember<Self>>(self) -> ComponentResult<T> {
        T::try_from_family(self).map_err(|other| ComponentError::ShapeMismatch {
            expected: T::TYPE_NAME,
            actual: other.type_name(),
        })
    }
}

/// A per-kind type held by the family `F`.
pub trait KindMember<F: KindFamily>: Sized {
    const KIND: ComponentKind;
    const TYPE_NAME: &'static str;

    fn as_member(family: &F) -> Option<&Self>;

    fn try_from_family(family: F) -> Result<Self, F>;

    fn into_family(self) -> F;
}

/// Implements [`KindMember`] for each `variant => type` pair of a family enum
/// and [`KindFamily`] for the enum itself.
macro_rules! kind_family {
    ($family:ident { $($variant:ident => $member:ident),+ $(,)? }) => {
        impl $crate::kind::KindFamily for $family {
            fn kind(&self) -> $crate::kind::ComponentKind {
                match self {
                    $($family::$variant(_) => $crate::kind::ComponentKind::$variant,)+
                }
            }

            fn type_name(&self) -> &'static str {
                match self {
                    $($family::$variant(_) => stringify!($member),)+
                }
            }
        }

        $(
            impl $crate::kind::KindMember<$family> for $member {
                const KIND: $crate::kind::ComponentKind = $crate::kind::ComponentKind::$variant;
                const TYPE_NAME: &'static str = stringify!($member);

                fn as_member(family: &$family) -> Option<&Self> {
                    match family {
                        $family::$variant(inner) => Some(inner),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }

                fn try_from_family(family: $family) -> Result<Self, $family> {
                    match family {
                        $family::$variant(inner) => Ok(inner),
                        #[allow(unreachable_patterns)]
                        other => Err(other),
                    }
                }

                fn into_family(self) -> $family {
                    $family::$variant(self)
                }
            }

            impl From<$member> for $family {
                fn from(member: $member) -> Self {
                    $family::$variant(member)
                }
            }
        )+
    };
}

pub(crate) use kind_family;

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::IntoEnumIterator;

    #[test]
    fn test_kind_path_segments() {
        assert_eq!(ComponentKind::Projector.path_segment(), "projector");
        assert_eq!(ComponentKind::Whiteboard.path_segment(), "whiteboard");
    }

    #[test]
    fn test_kind_parses_from_segment() {
        for kind in ComponentKind::iter() {
            assert_eq!(ComponentKind::from_str(kind.path_segment()).unwrap(), kind);
        }
        assert!(ComponentKind::from_str("smartboard").is_err());
    }

    #[test]
    fn test_type_names_follow_kind() {
        assert_eq!(ComponentKind::Whiteboard.entity_name(), "Whiteboard");
        assert_eq!(ComponentKind::Whiteboard.dto_name(), "WhiteboardDto");
        assert_eq!(ComponentKind::Projector.no_id_dto_name(), "ProjectorNoIdDto");
    }
}
