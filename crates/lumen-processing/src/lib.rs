//! Lumen Processing Library
//!
//! Filter engine, image codec, and upload validation. All pixel math is
//! delegated to the `image` crate; this crate only orchestrates it.

pub mod codec;
pub mod filters;
pub mod validator;

pub use codec::{
    decode_image, encode_image, image_dimensions, CodecError, DecodedImage, OutputEncoding,
};
pub use filters::{
    registry, FilterEngine, FilterError, FilterKind, FilterParams, FilterSpec, ParamSpec,
};
pub use validator::{UploadValidator, ValidationError};
