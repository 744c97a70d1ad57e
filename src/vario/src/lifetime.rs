use std::fmt::{Display, Formatter, Result as FmtResult};

/// A type that specifies how long an object created by a container lives.
///
/// A singleton object is constructed at most once and shared by every
/// request resolved to its registration, for the whole lifetime of the
/// container. A transient object is constructed anew on every request, and
/// only its creation is managed by the container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Lifetime {
    Singleton,
    #[default]
    Transient,
}

impl Lifetime {
    pub fn to_str(&self) -> &'static str {
        match self {
            Self::Singleton => "Singleton",
            Self::Transient => "Transient",
        }
    }
}

impl Display for Lifetime {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.to_str())
    }
}

/// Marker of bindings whose objects are [`Lifetime::Singleton`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Singleton;

/// Marker of bindings whose objects are [`Lifetime::Transient`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Transient;
