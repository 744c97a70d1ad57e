use std::any::TypeId;
use std::fmt::{Display, Formatter, Result as FmtResult};
use std::hash::{Hash, Hasher};

use crate::descriptor::{GenericDefinition, TypeDescriptor};

pub(crate) enum DescriptorKind {
    Concrete {
        type_id: TypeId,
        name: &'static str,
        supertypes: Vec<TypeDescriptor>,
    },
    Constructed {
        definition: GenericDefinition,
        arguments: Vec<TypeDescriptor>,
    },
}

impl Display for DescriptorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Concrete { name, .. } => write!(f, "{name}"),
            Self::Constructed {
                definition,
                arguments,
            } => {
                write!(f, "{}<", definition.name())?;
                for (i, argument) in arguments.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{argument}")?;
                }
                write!(f, ">")
            }
        }
    }
}

impl PartialEq for DescriptorKind {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Concrete { type_id: a, .. }, Self::Concrete { type_id: b, .. }) => a == b,
            (
                Self::Constructed {
                    definition: d1,
                    arguments: a1,
                },
                Self::Constructed {
                    definition: d2,
                    arguments: a2,
                },
            ) => d1 == d2 && a1 == a2,
            _ => false,
        }
    }
}

impl Eq for DescriptorKind {}

impl Hash for DescriptorKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        match self {
            Self::Concrete { type_id, .. } => {
                0u8.hash(state);
                type_id.hash(state);
            }
            Self::Constructed {
                definition,
                arguments,
            } => {
                1u8.hash(state);
                definition.hash(state);
                arguments.hash(state);
            }
        }
    }
}
