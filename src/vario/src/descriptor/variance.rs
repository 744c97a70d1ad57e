use std::fmt::{Display, Formatter, Result as FmtResult};

use crate::descriptor::implementation::DescriptorKind;
use crate::descriptor::TypeDescriptor;

/// How the assignability of a generic contract follows the assignability of
/// one of its type arguments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Variance {
    /// Arguments must be identical.
    #[default]
    Invariant,
    /// `C<Derived>` can be used where `C<Base>` is expected.
    Covariant,
    /// `C<Base>` can be used where `C<Derived>` is expected.
    Contravariant,
}

impl Variance {
    /// Tests whether a contract parameterized by `from` can stand in for the
    /// same contract parameterized by `to`, as far as this parameter is
    /// concerned.
    pub fn admits(self, from: &TypeDescriptor, to: &TypeDescriptor) -> bool {
        match self {
            Self::Invariant => from == to,
            Self::Covariant => is_assignable(from, to),
            Self::Contravariant => is_assignable(to, from),
        }
    }

    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Invariant => "invariant",
            Self::Covariant => "covariant",
            Self::Contravariant => "contravariant",
        }
    }
}

impl Display for Variance {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_str())
    }
}

/// Returns true if a service of type `from` can be used wherever a service of
/// type `to` is expected.
///
/// A plain type is assignable to itself and to anything one of its declared
/// supertypes is assignable to. Two parameterizations of the same generic
/// definition are assignable if every argument pair is admitted by the
/// variance declared on its parameter.
pub fn is_assignable(from: &TypeDescriptor, to: &TypeDescriptor) -> bool {
    if from == to {
        return true;
    }

    match (from.kind(), to.kind()) {
        (DescriptorKind::Concrete { supertypes, .. }, _) => {
            supertypes.iter().any(|supertype| is_assignable(supertype, to))
        }
        (
            DescriptorKind::Constructed {
                definition: from_definition,
                arguments: from_arguments,
            },
            DescriptorKind::Constructed {
                definition: to_definition,
                arguments: to_arguments,
            },
        ) => {
            from_definition == to_definition
                && from_arguments.len() == to_arguments.len()
                && from_definition
                    .parameters()
                    .iter()
                    .zip(from_arguments.iter().zip(to_arguments))
                    .all(|(variance, (from, to))| variance.admits(from, to))
        }
        (DescriptorKind::Constructed { .. }, DescriptorKind::Concrete { .. }) => false,
    }
}
