//! Error types for primitive construction and sampling setup.

use crate::vec3::Vec3;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum Error {
    /// The two edge vectors of a planar primitive span no area.
    #[error("edges {u:?} and {v:?} are parallel, the plane normal is undefined")]
    DegenerateEdges { u: Vec3, v: Vec3 },

    /// A stratified grid needs at least one sample per pixel.
    #[error("samples per pixel must be positive")]
    NoSamples,
}

pub type Result<T> = std::result::Result<T, Error>;
