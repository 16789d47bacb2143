use thiserror::Error;

/// Errors reported while fitting or sampling a curve.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Degree `degree` needs `required` control points but only `available` were given.
    #[error("degree {degree} requires at least {required} control points, got {available}")]
    InsufficientPoints {
        degree: usize,
        required: usize,
        available: usize,
    },

    #[error("linear system of size {size} is singular")]
    SingularSystem { size: usize },

    #[error("control points share the x coordinate {0}")]
    DuplicateAbscissa(f64),

    #[error("control point ({x}, {y}) is not finite")]
    NonFinitePoint { x: f64, y: f64 },

    #[error("invalid value {value} for parameter '{name}': {reason}")]
    InvalidParameter {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("invalid sampling: {0}")]
    InvalidSampling(String),
}

pub type Result<T> = std::result::Result<T, CurveError>;
