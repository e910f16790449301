//! Color transfer function
//!
//! Maps a normalized scalar in [0, 1] to an RGB triple by linear
//! interpolation over a table of equally spaced stops.

use std::fmt;

use crate::color_tables::NEGPOS;

/// Error building a color table
#[derive(Debug, Clone, PartialEq)]
pub enum ColorTableError {
    /// Interpolation needs at least two stops
    TooFewStops(usize),
    /// A stop channel is NaN, infinite or outside [0, 1]
    InvalidStop(usize),
}

impl fmt::Display for ColorTableError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColorTableError::TooFewStops(n) => {
                write!(f, "Color table needs at least 2 stops, got {}", n)
            }
            ColorTableError::InvalidStop(i) => {
                write!(f, "Color table stop {} has a channel outside [0, 1]", i)
            }
        }
    }
}

impl std::error::Error for ColorTableError {}

/// Ordered RGB stops spanning [0, 1]
///
/// Stop `i` of `N` sits at position `i / (N - 1)`.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorTable {
    stops: Vec<[f32; 3]>,
}

impl ColorTable {
    /// Build a table from RGB stops with channels in [0, 1]
    pub fn new(stops: Vec<[f32; 3]>) -> Result<Self, ColorTableError> {
        if stops.len() < 2 {
            return Err(ColorTableError::TooFewStops(stops.len()));
        }
        if let Some(i) = stops
            .iter()
            .position(|s| s.iter().any(|c| !(0.0..=1.0).contains(c)))
        {
            return Err(ColorTableError::InvalidStop(i));
        }
        Ok(Self { stops })
    }

    /// The blue-black-red diverging table used for density slices
    pub fn negpos() -> Self {
        Self { stops: NEGPOS.to_vec() }
    }

    /// Two-stop black to white ramp
    pub fn grayscale() -> Self {
        Self { stops: vec![[0.0; 3], [1.0; 3]] }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }

    /// Stops as `(position, [r, g, b])` pairs
    pub fn stops(&self) -> impl Iterator<Item = (f32, [f32; 3])> + '_ {
        let last = (self.stops.len() - 1) as f32;
        self.stops.iter().enumerate().map(move |(i, s)| (i as f32 / last, *s))
    }

    /// Color at `value`, each channel in [0, 255]
    ///
    /// Out-of-range input is clamped to [0, 1]; NaN maps to 0.
    pub fn color_at(&self, value: f32) -> [f32; 3] {
        let value = if value.is_nan() { 0.0 } else { value.clamp(0.0, 1.0) };
        let n = self.stops.len();
        let scaled = value * (n - 1) as f32;
        let i = (scaled.floor() as usize).min(n - 2);
        let t = scaled - i as f32;

        let a = self.stops[i];
        let b = self.stops[i + 1];
        let mut rgb = [0.0f32; 3];
        for c in 0..3 {
            rgb[c] = 255.0 * (a[c] * (1.0 - t) + b[c] * t);
        }
        rgb
    }

    /// Color at `value` rounded to 8-bit channels
    pub fn color_at_u8(&self, value: f32) -> [u8; 3] {
        let [r, g, b] = self.color_at(value);
        [to_u8(r), to_u8(g), to_u8(b)]
    }
}

impl Default for ColorTable {
    fn default() -> Self {
        Self::negpos()
    }
}

#[inline]
fn to_u8(channel: f32) -> u8 {
    channel.round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoints_match_stops() {
        let table = ColorTable::negpos();
        let first = NEGPOS[0];
        let last = NEGPOS[NEGPOS.len() - 1];
        assert_eq!(table.color_at(0.0), [first[0] * 255.0, first[1] * 255.0, first[2] * 255.0]);
        assert_eq!(table.color_at(1.0), [last[0] * 255.0, last[1] * 255.0, last[2] * 255.0]);
        assert_eq!(table.color_at_u8(0.0), [0, 0, 255]);
        assert_eq!(table.color_at_u8(1.0), [255, 0, 0]);
    }

    #[test]
    fn test_channels_in_range() {
        let table = ColorTable::negpos();
        for i in 0..=1000 {
            let v = i as f32 / 1000.0;
            for c in table.color_at(v) {
                assert!((0.0..=255.0).contains(&c), "value {} gave channel {}", v, c);
            }
        }
    }

    #[test]
    fn test_out_of_range_input_is_clamped() {
        let table = ColorTable::negpos();
        assert_eq!(table.color_at(-3.0), table.color_at(0.0));
        assert_eq!(table.color_at(7.5), table.color_at(1.0));
        assert_eq!(table.color_at(f32::NAN), table.color_at(0.0));
        assert_eq!(table.color_at(f32::INFINITY), table.color_at(1.0));
    }

    #[test]
    fn test_midpoint_is_black() {
        assert_eq!(ColorTable::negpos().color_at_u8(0.5), [0, 0, 0]);
    }

    #[test]
    fn test_linear_interpolation() {
        let table = ColorTable::new(vec![[0.0, 0.0, 0.0], [1.0, 0.5, 0.0], [1.0, 1.0, 1.0]]).unwrap();
        let mid = table.color_at(0.25);
        assert!((mid[0] - 127.5).abs() < 1e-3);
        assert!((mid[1] - 63.75).abs() < 1e-3);
        assert_eq!(mid[2], 0.0);
        assert_eq!(table.color_at(0.5), [255.0, 127.5, 0.0]);
    }

    #[test]
    fn test_grayscale() {
        let table = ColorTable::grayscale();
        assert_eq!(table.color_at_u8(0.5), [128, 128, 128]);
    }

    #[test]
    fn test_invalid_tables() {
        assert_eq!(ColorTable::new(vec![[0.0; 3]]), Err(ColorTableError::TooFewStops(1)));
        assert_eq!(
            ColorTable::new(vec![[0.0; 3], [1.0, f32::NAN, 0.0]]),
            Err(ColorTableError::InvalidStop(1))
        );
        assert_eq!(
            ColorTable::new(vec![[0.0; 3], [1.5, 0.0, 0.0]]),
            Err(ColorTableError::InvalidStop(1))
        );
    }

    #[test]
    fn test_stop_positions() {
        let positions: Vec<f32> = ColorTable::grayscale().stops().map(|(p, _)| p).collect();
        assert_eq!(positions, vec![0.0, 1.0]);
        assert_eq!(ColorTable::negpos().len(), 192);
    }
}
