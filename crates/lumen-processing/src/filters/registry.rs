//! Static filter registry with parameter metadata for client discovery.

use serde::Serialize;

/// Numeric parameter metadata for a filter.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    #[serde(rename = "type")]
    pub value_type: &'static str,
    pub default: f32,
    pub min: f32,
    pub max: f32,
    pub description: &'static str,
}

/// Registry entry: name, description, zero or one numeric parameter.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FilterSpec {
    pub name: &'static str,
    pub description: &'static str,
    pub parameter: Option<ParamSpec>,
    pub category: &'static str,
    pub example_usage: &'static str,
}

static REGISTRY: [FilterSpec; 5] = [
    FilterSpec {
        name: "invert",
        description: "Invert image colors (negative effect)",
        parameter: None,
        category: "color",
        example_usage: "No additional parameters needed",
    },
    FilterSpec {
        name: "grayscale",
        description: "Convert image to grayscale",
        parameter: None,
        category: "color",
        example_usage: "No additional parameters needed",
    },
    FilterSpec {
        name: "contrast",
        description: "Adjust image contrast",
        parameter: Some(ParamSpec {
            name: "factor",
            value_type: "float",
            default: 1.5,
            min: 0.0,
            max: 3.0,
            description: "Contrast factor (0.0=gray, 1.0=original, >1.0=more contrast)",
        }),
        category: "enhancement",
        example_usage: "factor=1.5 for enhanced contrast",
    },
    FilterSpec {
        name: "blur",
        description: "Apply Gaussian blur effect",
        parameter: Some(ParamSpec {
            name: "radius",
            value_type: "float",
            default: 2.0,
            min: 0.0,
            max: 10.0,
            description: "Blur radius (higher values = more blur)",
        }),
        category: "effects",
        example_usage: "radius=3.0 for medium blur",
    },
    FilterSpec {
        name: "sharpen",
        description: "Apply sharpening filter",
        parameter: Some(ParamSpec {
            name: "factor",
            value_type: "float",
            default: 2.0,
            min: 0.0,
            max: 5.0,
            description: "Sharpening factor (1.0=original, >1.0=more sharp)",
        }),
        category: "enhancement",
        example_usage: "factor=2.5 for enhanced sharpness",
    },
];

/// The static registry of all supported filters.
pub fn registry() -> &'static [FilterSpec] {
    &REGISTRY
}
