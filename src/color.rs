//! Accent colors.
//!
//! Skill configs carry their accent as a CSS hex string (`#3776ab`). The
//! simulation never looks at it; it is parsed once at config validation so
//! the renderer gets a ready `Rgba` and a typo surfaces before the scene
//! starts instead of as a black disc.

use serde::{Deserialize, Serialize};

/// RGBA color (0-255 per channel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const WHITE: Self = Self { r: 255, g: 255, b: 255, a: 255 };

    /// Same color with alpha scaled by `factor` (clamped to 0..=1).
    pub fn with_alpha(self, factor: f32) -> Self {
        let a = (self.a as f32 * factor.clamp(0.0, 1.0)).round() as u8;
        Self { a, ..self }
    }
}

#[inline]
fn hex_nibble(b: u8) -> Option<u8> {
    match b {
        b'0'..=b'9' => Some(b - b'0'),
        b'a'..=b'f' => Some(b - b'a' + 10),
        b'A'..=b'F' => Some(b - b'A' + 10),
        _ => None,
    }
}

#[inline]
fn hex_byte(hi: u8, lo: u8) -> Option<u8> {
    Some(hex_nibble(hi)? << 4 | hex_nibble(lo)?)
}

/// Parse a CSS hex color.
///
/// Supports: #RGB, #RGBA, #RRGGBB, #RRGGBBAA. Returns `None` on anything else,
/// including a single bad digit.
pub fn parse_hex_color(s: &str) -> Option<Rgba> {
    let bytes = s.trim().as_bytes();
    let digits = bytes.strip_prefix(b"#")?;

    match digits.len() {
        3 | 4 => {
            // Short form: each nibble is doubled (F → FF)
            let mut ch = [255u8; 4];
            for (i, &b) in digits.iter().enumerate() {
                let n = hex_nibble(b)?;
                ch[i] = n << 4 | n;
            }
            Some(Rgba { r: ch[0], g: ch[1], b: ch[2], a: ch[3] })
        }
        6 | 8 => {
            let mut ch = [255u8; 4];
            for (i, pair) in digits.chunks_exact(2).enumerate() {
                ch[i] = hex_byte(pair[0], pair[1])?;
            }
            Some(Rgba { r: ch[0], g: ch[1], b: ch[2], a: ch[3] })
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_long_form() {
        let c = parse_hex_color("#3776ab").unwrap();
        assert_eq!(c, Rgba { r: 0x37, g: 0x76, b: 0xab, a: 255 });
    }

    #[test]
    fn test_parse_short_and_alpha_forms() {
        assert_eq!(parse_hex_color("#fff"), Some(Rgba::WHITE));
        assert_eq!(
            parse_hex_color("#ff000080"),
            Some(Rgba { r: 255, g: 0, b: 0, a: 0x80 })
        );
        assert_eq!(
            parse_hex_color("#0f08"),
            Some(Rgba { r: 0, g: 255, b: 0, a: 0x88 })
        );
    }

    #[test]
    fn test_rejects_malformed() {
        assert_eq!(parse_hex_color("3776ab"), None);
        assert_eq!(parse_hex_color("#37g6ab"), None);
        assert_eq!(parse_hex_color("#12345"), None);
        assert_eq!(parse_hex_color(""), None);
    }

    #[test]
    fn test_with_alpha() {
        let c = Rgba::WHITE.with_alpha(0.5);
        assert_eq!(c.a, 128);
        assert_eq!((c.r, c.g, c.b), (255, 255, 255));
        assert_eq!(Rgba::WHITE.with_alpha(2.0).a, 255);
        assert_eq!(Rgba::WHITE.with_alpha(-1.0).a, 0);
    }
}
