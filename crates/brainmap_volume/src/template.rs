//! Anatomical template volumes
//!
//! The template is a grayscale image registered to the atlas, drawn under
//! the density slice. It arrives either as raw 8-bit voxels or as a 32-bit
//! float image that is rescaled to 8 bits on load.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::volume::{Dims, Volume, VolumeError};

/// 8-bit anatomical template
pub type TemplateVolume = Volume<u8>;

/// Voxel encoding of a raw template file
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateFormat {
    /// One byte per voxel
    #[default]
    U8,
    /// Little-endian `f32` per voxel, rescaled on load
    F32,
}

impl fmt::Display for TemplateFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TemplateFormat::U8 => "u8",
            TemplateFormat::F32 => "f32",
        })
    }
}

impl std::str::FromStr for TemplateFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "u8" => Ok(TemplateFormat::U8),
            "f32" => Ok(TemplateFormat::F32),
            other => Err(format!("unknown template format '{}'", other)),
        }
    }
}

/// Decode a raw template file in the given voxel format
pub fn decode_template(
    bytes: Vec<u8>,
    format: TemplateFormat,
    dims: Dims,
) -> Result<TemplateVolume, VolumeError> {
    match format {
        TemplateFormat::U8 => decode_template_u8(bytes, dims),
        TemplateFormat::F32 => decode_template_f32_le(&bytes, dims),
    }
}

/// Wrap raw 8-bit voxels in `z * ly * lx + y * lx + x` order
pub fn decode_template_u8(bytes: Vec<u8>, dims: Dims) -> Result<TemplateVolume, VolumeError> {
    Volume::from_vec(dims, bytes)
}

/// Decode little-endian `f32` voxels and rescale their range to 0..=255
pub fn decode_template_f32_le(bytes: &[u8], dims: Dims) -> Result<TemplateVolume, VolumeError> {
    if bytes.len() != dims.len() * 4 {
        return Err(VolumeError::LengthMismatch {
            dims,
            expected: dims.len() * 4,
            actual: bytes.len(),
        });
    }
    let values: Vec<f32> = bytes
        .chunks_exact(4)
        .map(|c| f32::from_le_bytes([c[0], c[1], c[2], c[3]]))
        .collect();
    let volume = Volume::from_vec(dims, values)?;
    Ok(rescale_to_u8(&volume))
}

/// Linearly map the finite range of a float volume onto 0..=255
///
/// Non-finite voxels become 0. A constant volume maps to 0 everywhere.
pub fn rescale_to_u8(volume: &Volume<f32>) -> TemplateVolume {
    let (lo, hi) = volume
        .as_slice()
        .iter()
        .filter(|v| v.is_finite())
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), v| (lo.min(*v), hi.max(*v)));
    let span = hi - lo;
    volume.map(|v| {
        if !v.is_finite() || !(span > 0.0) {
            0
        } else {
            (((v - lo) / span) * 255.0).round().clamp(0.0, 255.0) as u8
        }
    })
}
