//! Filter engine: named filters, typed parameters, and the registry.
//!
//! The five filters are a fixed, process-wide table; clients discover them
//! through [registry] and invoke them through [FilterEngine::apply].

mod engine;
mod registry;

pub use engine::FilterEngine;
pub use registry::{registry, FilterSpec, ParamSpec};

/// Filter operation errors
#[derive(Debug, thiserror::Error)]
pub enum FilterError {
    #[error("Unknown filter '{name}'. Available filters: {available}")]
    UnsupportedFilter { name: String, available: String },

    #[error("Invalid {filter} {param}: must be non-negative")]
    InvalidParameter {
        filter: &'static str,
        param: &'static str,
    },

    #[error("Error applying {filter} filter: {message}")]
    Failed {
        filter: &'static str,
        message: String,
    },
}

/// The supported filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterKind {
    Invert,
    Grayscale,
    Contrast,
    Blur,
    Sharpen,
}

impl FilterKind {
    pub const ALL: [FilterKind; 5] = [
        FilterKind::Invert,
        FilterKind::Grayscale,
        FilterKind::Contrast,
        FilterKind::Blur,
        FilterKind::Sharpen,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            FilterKind::Invert => "invert",
            FilterKind::Grayscale => "grayscale",
            FilterKind::Contrast => "contrast",
            FilterKind::Blur => "blur",
            FilterKind::Sharpen => "sharpen",
        }
    }

    /// Look up a filter by name. The error message lists the valid set.
    pub fn from_name(name: &str) -> Result<Self, FilterError> {
        Self::ALL
            .iter()
            .find(|k| k.name() == name)
            .copied()
            .ok_or_else(|| FilterError::UnsupportedFilter {
                name: name.to_string(),
                available: Self::ALL
                    .iter()
                    .map(|k| k.name())
                    .collect::<Vec<_>>()
                    .join(", "),
            })
    }
}

/// Typed filter parameters.
///
/// One variant per parameterized filter; construction through
/// [FilterParams::for_filter] applies defaults, rejects negatives, and
/// silently clamps values above the documented maximum.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FilterParams {
    NoParams,
    Contrast { factor: f32 },
    Blur { radius: f32 },
    Sharpen { factor: f32 },
}

impl FilterParams {
    pub const CONTRAST_DEFAULT: f32 = 1.5;
    pub const CONTRAST_MAX: f32 = 3.0;
    pub const BLUR_DEFAULT: f32 = 2.0;
    pub const BLUR_MAX: f32 = 10.0;
    pub const SHARPEN_DEFAULT: f32 = 2.0;
    pub const SHARPEN_MAX: f32 = 5.0;

    /// Build the parameter variant for a filter from an optional raw value.
    ///
    /// `None` selects the filter's default. Negative values are rejected;
    /// values above the maximum are capped, not rejected.
    pub fn for_filter(kind: FilterKind, value: Option<f32>) -> Result<Self, FilterError> {
        match kind {
            FilterKind::Invert | FilterKind::Grayscale => Ok(FilterParams::NoParams),
            FilterKind::Contrast => {
                let factor = value.unwrap_or(Self::CONTRAST_DEFAULT);
                if factor < 0.0 {
                    return Err(FilterError::InvalidParameter {
                        filter: "contrast",
                        param: "factor",
                    });
                }
                Ok(FilterParams::Contrast {
                    factor: factor.min(Self::CONTRAST_MAX),
                })
            }
            FilterKind::Blur => {
                let radius = value.unwrap_or(Self::BLUR_DEFAULT);
                if radius < 0.0 {
                    return Err(FilterError::InvalidParameter {
                        filter: "blur",
                        param: "radius",
                    });
                }
                Ok(FilterParams::Blur {
                    radius: radius.min(Self::BLUR_MAX),
                })
            }
            FilterKind::Sharpen => {
                let factor = value.unwrap_or(Self::SHARPEN_DEFAULT);
                if factor < 0.0 {
                    return Err(FilterError::InvalidParameter {
                        filter: "sharpen",
                        param: "factor",
                    });
                }
                Ok(FilterParams::Sharpen {
                    factor: factor.min(Self::SHARPEN_MAX),
                })
            }
        }
    }

    /// Resolved parameters as a JSON object, for the success response.
    pub fn as_json(&self) -> serde_json::Value {
        match self {
            FilterParams::NoParams => serde_json::json!({}),
            FilterParams::Contrast { factor } => serde_json::json!({ "factor": factor }),
            FilterParams::Blur { radius } => serde_json::json!({ "radius": radius }),
            FilterParams::Sharpen { factor } => serde_json::json!({ "factor": factor }),
        }
    }
}
