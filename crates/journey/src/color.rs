use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Normalized sRGB color with alpha, parsed from CSS-style hex.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rgba(pub [f32; 4]);

impl Rgba {
    pub const WHITE: Rgba = Rgba([1.0, 1.0, 1.0, 1.0]);

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Rgba([r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0])
    }

    /// Parses `#rrggbb` or `#rgb`. The leading `#` is optional.
    pub fn parse_hex(s: &str) -> Option<Self> {
        let hex = s.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |i: usize, w: usize| u8::from_str_radix(&hex[i..i + w], 16).ok();
        match hex.len() {
            6 => Some(Self::rgb(channel(0, 2)?, channel(2, 2)?, channel(4, 2)?)),
            3 => {
                let expand = |v: u8| v * 17;
                Some(Self::rgb(
                    expand(channel(0, 1)?),
                    expand(channel(1, 1)?),
                    expand(channel(2, 1)?),
                ))
            }
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.0;
        let q = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", q(r), q(g), q(b))
    }

    pub fn with_alpha(self, alpha: f32) -> Self {
        let [r, g, b, _] = self.0;
        Rgba([r, g, b, alpha.clamp(0.0, 1.0)])
    }
}

impl Default for Rgba {
    fn default() -> Self {
        Self::WHITE
    }
}

impl Serialize for Rgba {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Rgba {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Rgba::parse_hex(&s)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid hex color: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::Rgba;

    #[test]
    fn parses_long_and_short_hex() {
        assert_eq!(Rgba::parse_hex("#ffffff"), Some(Rgba::WHITE));
        assert_eq!(Rgba::parse_hex("#fff"), Some(Rgba::WHITE));
        assert_eq!(Rgba::parse_hex("3b82f6"), Some(Rgba::rgb(0x3b, 0x82, 0xf6)));
    }

    #[test]
    fn rejects_malformed_hex() {
        assert_eq!(Rgba::parse_hex("#12345"), None);
        assert_eq!(Rgba::parse_hex("#gggggg"), None);
        assert_eq!(Rgba::parse_hex("#ééé"), None);
        assert_eq!(Rgba::parse_hex(""), None);
    }

    #[test]
    fn hex_round_trips_through_display_form() {
        assert_eq!(Rgba::rgb(0x60, 0xa5, 0xfa).to_hex(), "#60a5fa");
    }

    #[test]
    fn alpha_is_clamped() {
        assert_eq!(Rgba::WHITE.with_alpha(2.0).0[3], 1.0);
    }
}
