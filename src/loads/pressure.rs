//! Pressure fields and load orientation

use std::fmt;

use nalgebra::{Point3, Vector3};
use serde::{Deserialize, Serialize};

/// Frame in which a pressure vector is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoadOrientation {
    /// Components are in the face's local frame.
    Local,
    /// Components are in global coordinates.
    Global {
        /// Scale by the z-component of the face normal to project a
        /// vertical load onto an inclined face.
        projected: bool,
    },
}

/// Pressure applied over a face, constant or position-dependent.
///
/// Values are tractions (force per unit area); the tributary width converts
/// them to line intensities along the supporting edges.
pub enum PressureField {
    /// The same traction vector everywhere on the face.
    Uniform(Vector3<f64>),
    /// Traction evaluated at each sample position.
    Varying(Box<dyn Fn(&Point3<f64>) -> Vector3<f64> + Send + Sync>),
}

impl PressureField {
    /// Uniform gravity pressure of magnitude `w` acting in global -Z.
    pub fn downward(w: f64) -> Self {
        Self::Uniform(Vector3::new(0.0, 0.0, -w.abs()))
    }

    /// Position-dependent pressure from a closure.
    pub fn varying<F>(f: F) -> Self
    where
        F: Fn(&Point3<f64>) -> Vector3<f64> + Send + Sync + 'static,
    {
        Self::Varying(Box::new(f))
    }

    /// Evaluate the field at a position.
    pub fn at(&self, position: &Point3<f64>) -> Vector3<f64> {
        match self {
            Self::Uniform(p) => *p,
            Self::Varying(f) => f(position),
        }
    }

    /// Whether the field is the same everywhere.
    pub fn is_uniform(&self) -> bool {
        matches!(self, Self::Uniform(_))
    }
}

impl fmt::Debug for PressureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Uniform(p) => f.debug_tuple("Uniform").field(p).finish(),
            Self::Varying(_) => f.write_str("Varying(..)"),
        }
    }
}
