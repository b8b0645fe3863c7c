//! The captured image as seen by the view core.
//!
//! Grabbing pixels from the OS is the host's job; the core only needs the
//! dimensions (to clamp crops) and a bounds-checked pixel lookup (for the
//! color picker).

use serde::{Deserialize, Serialize};

use cappy_common::error::{CappyError, CappyResult};

/// An 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Perceived brightness in `[0, 1]`.
    pub fn brightness(&self) -> f64 {
        0.299 * (self.r as f64 / 255.0)
            + 0.587 * (self.g as f64 / 255.0)
            + 0.114 * (self.b as f64 / 255.0)
    }

    /// Packed `0xRRGGBB` as a decimal integer, e.g. `16711680` for red.
    pub fn to_decimal(&self) -> String {
        let packed = (self.r as u32) << 16 | (self.g as u32) << 8 | self.b as u32;
        packed.to_string()
    }

    /// `"r, g, b"`.
    pub fn to_decimal_separated(&self) -> String {
        format!("{}, {}, {}", self.r, self.g, self.b)
    }

    /// `"0xrrggbb"`.
    pub fn to_hex(&self) -> String {
        format!("0x{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// `"0xrr, 0xgg, 0xbb"`.
    pub fn to_hex_separated(&self) -> String {
        format!("0x{:02x}, 0x{:02x}, 0x{:02x}", self.r, self.g, self.b)
    }

    /// `"0b"` followed by 24 bits.
    pub fn to_binary(&self) -> String {
        format!("0b{:08b}{:08b}{:08b}", self.r, self.g, self.b)
    }

    /// `"0brrrrrrrr, 0bgggggggg, 0bbbbbbbbb"`.
    pub fn to_binary_separated(&self) -> String {
        format!("0b{:08b}, 0b{:08b}, 0b{:08b}", self.r, self.g, self.b)
    }
}

/// Clipboard formats offered by the color picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorFormat {
    Decimal,
    Hex,
    Binary,
}

impl ColorFormat {
    /// Render a color, optionally in the per-channel separated form.
    pub fn render(&self, color: &Rgb, separated: bool) -> String {
        match (self, separated) {
            (ColorFormat::Decimal, false) => color.to_decimal(),
            (ColorFormat::Decimal, true) => color.to_decimal_separated(),
            (ColorFormat::Hex, false) => color.to_hex(),
            (ColorFormat::Hex, true) => color.to_hex_separated(),
            (ColorFormat::Binary, false) => color.to_binary(),
            (ColorFormat::Binary, true) => color.to_binary_separated(),
        }
    }
}

/// A read-only pixel buffer.
pub trait CaptureSurface {
    fn width(&self) -> u32;
    fn height(&self) -> u32;

    /// The pixel at `(x, y)`, or `None` outside the image.
    fn pixel(&self, x: i64, y: i64) -> Option<Rgb>;
}

/// An in-memory RGB image, row-major without padding.
#[derive(Debug, Clone, PartialEq)]
pub struct RgbImage {
    width: u32,
    height: u32,
    pixels: Vec<Rgb>,
}

impl RgbImage {
    /// Wrap existing pixels. Fails when the buffer does not match the size.
    pub fn from_pixels(width: u32, height: u32, pixels: Vec<Rgb>) -> CappyResult<Self> {
        let expected = width as usize * height as usize;
        if pixels.len() != expected {
            return Err(CappyError::capture(format!(
                "expected {expected} pixels for {width}x{height}, got {}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// A single-color image.
    pub fn solid(width: u32, height: u32, color: Rgb) -> Self {
        Self {
            width,
            height,
            pixels: vec![color; width as usize * height as usize],
        }
    }

    /// A deterministic test pattern: red grows left to right, green top to
    /// bottom, blue along the diagonal.
    pub fn gradient(width: u32, height: u32) -> Self {
        let mut pixels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                let r = (x as u64 * 255 / width.max(1) as u64) as u8;
                let g = (y as u64 * 255 / height.max(1) as u64) as u8;
                let b = ((x as u64 + y as u64) % 256) as u8;
                pixels.push(Rgb::new(r, g, b));
            }
        }
        Self {
            width,
            height,
            pixels,
        }
    }
}

impl CaptureSurface for RgbImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel(&self, x: i64, y: i64) -> Option<Rgb> {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_strings() {
        let c = Rgb::new(255, 8, 171);
        assert_eq!(c.to_decimal(), "16713899");
        assert_eq!(c.to_decimal_separated(), "255, 8, 171");
        assert_eq!(c.to_hex(), "0xff08ab");
        assert_eq!(c.to_hex_separated(), "0xff, 0x08, 0xab");
        assert_eq!(c.to_binary(), "0b111111110000100010101011");
        assert_eq!(c.to_binary_separated(), "0b11111111, 0b00001000, 0b10101011");
    }

    #[test]
    fn test_color_format_dispatch() {
        let c = Rgb::new(1, 2, 3);
        assert_eq!(ColorFormat::Hex.render(&c, false), "0x010203");
        assert_eq!(ColorFormat::Decimal.render(&c, true), "1, 2, 3");
    }

    #[test]
    fn test_brightness_extremes() {
        assert!(Rgb::new(255, 255, 255).brightness() > 0.99);
        assert!(Rgb::new(0, 0, 0).brightness() < 0.01);
        assert!(Rgb::new(0, 0, 255).brightness() < 0.5);
    }

    #[test]
    fn test_pixel_lookup_is_bounds_checked() {
        let image = RgbImage::gradient(4, 3);
        assert_eq!(image.pixel(0, 0), Some(Rgb::new(0, 0, 0)));
        assert_eq!(image.pixel(3, 2), Some(Rgb::new(191, 170, 5)));
        assert_eq!(image.pixel(4, 0), None);
        assert_eq!(image.pixel(0, -1), None);
    }

    #[test]
    fn test_from_pixels_checks_length() {
        assert!(RgbImage::from_pixels(2, 2, vec![Rgb::default(); 3]).is_err());
        let image = RgbImage::from_pixels(2, 1, vec![Rgb::new(9, 9, 9); 2]).unwrap();
        assert_eq!(image.width(), 2);
        assert_eq!(image.pixel(1, 0), Some(Rgb::new(9, 9, 9)));
    }
}
