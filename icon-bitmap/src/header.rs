use crate::{
    error::{Error, Result},
    pack::packed_len,
};
use std::fmt::Write;

pub const BYTES_PER_LINE: usize = 12;

/// Everything about the emitted C header that does not come from the bitmap itself
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderSpec {
    /// Prefix of every emitted define and of the array name
    pub symbol: String,
    /// Written verbatim as `//` lines at the top
    pub comments: Vec<String>,
    pub includes: Vec<String>,
    /// Memory placement attribute for the array, may be empty
    pub placement: String,
}

impl HeaderSpec {
    pub fn available_define(&self) -> String {
        format!("{}_AVAILABLE", self.symbol)
    }

    pub fn validate(&self) -> Result<()> {
        let mut chars = self.symbol.chars();
        let valid = chars
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
            && chars.all(|c| c.is_ascii_alphanumeric() || c == '_');
        if valid {
            Ok(())
        } else {
            Err(Error::InvalidSymbol(self.symbol.clone()))
        }
    }
}

impl Default for HeaderSpec {
    fn default() -> Self {
        Self {
            symbol: "FA_WIFI_ICON".to_string(),
            comments: vec![
                "Auto-generated from Font Awesome Free Solid (fa-wifi)".to_string(),
                "License: Font Awesome Free (https://fontawesome.com), CC BY 4.0 for icons"
                    .to_string(),
            ],
            includes: vec!["stdint.h".to_string(), "pgmspace.h".to_string()],
            placement: "PROGMEM".to_string(),
        }
    }
}

/// Renders `packed` as a C header declaring a `width` x `height` bitmap
pub fn serialize(packed: &[u8], width: u32, height: u32, spec: &HeaderSpec) -> Result<String> {
    spec.validate()?;
    let expected = packed_len(width, height);
    if packed.len() != expected {
        return Err(Error::PackedLength {
            expected,
            actual: packed.len(),
        });
    }

    let mut out = String::new();
    write_header(&mut out, packed, width, height, spec)?;
    Ok(out)
}

fn write_header<W: Write>(
    out: &mut W,
    packed: &[u8],
    width: u32,
    height: u32,
    spec: &HeaderSpec,
) -> std::fmt::Result {
    let symbol = &spec.symbol;

    for comment in &spec.comments {
        writeln!(out, "// {comment}")?;
    }
    writeln!(out, "#pragma once")?;
    writeln!(out)?;
    for include in &spec.includes {
        writeln!(out, "#include <{include}>")?;
    }
    writeln!(out)?;

    writeln!(out, "#define {symbol}_AVAILABLE 1")?;
    writeln!(out, "#define {symbol}_WIDTH {width}")?;
    writeln!(out, "#define {symbol}_HEIGHT {height}")?;
    writeln!(out)?;

    if spec.placement.is_empty() {
        writeln!(out, "static const uint8_t {symbol}_BITMAP[] = {{")?;
    } else {
        writeln!(
            out,
            "static const uint8_t {symbol}_BITMAP[] {} = {{",
            spec.placement
        )?;
    }
    for line in packed.chunks(BYTES_PER_LINE) {
        out.write_str("   ")?;
        for byte in line {
            write!(out, " 0x{byte:02X},")?;
        }
        writeln!(out)?;
    }
    writeln!(out, "}};")
}

#[cfg(test)]
mod test {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_three_bytes() {
        let spec = HeaderSpec::default();
        let text = serialize(&[0xAA, 0x00, 0xFF], 24, 1, &spec).unwrap();
        assert_eq!(
            text,
            indoc!(
                "// Auto-generated from Font Awesome Free Solid (fa-wifi)
                 // License: Font Awesome Free (https://fontawesome.com), CC BY 4.0 for icons
                 #pragma once

                 #include <stdint.h>
                 #include <pgmspace.h>

                 #define FA_WIFI_ICON_AVAILABLE 1
                 #define FA_WIFI_ICON_WIDTH 24
                 #define FA_WIFI_ICON_HEIGHT 1

                 static const uint8_t FA_WIFI_ICON_BITMAP[] PROGMEM = {
                     0xAA, 0x00, 0xFF,
                 };
                 "
            )
        );
    }

    #[test]
    fn test_twelve_per_line() {
        let packed: Vec<u8> = (0..30).collect();
        let text = serialize(&packed, 24, 10, &HeaderSpec::default()).unwrap();
        let lines: Vec<&str> = text
            .lines()
            .skip_while(|l| !l.ends_with('{'))
            .skip(1)
            .take_while(|l| *l != "};")
            .collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "    0x00, 0x01, 0x02, 0x03, 0x04, 0x05, 0x06, 0x07, 0x08, 0x09, 0x0A, 0x0B,"
        );
        assert_eq!(lines[2], "    0x18, 0x19, 0x1A, 0x1B, 0x1C, 0x1D,");

        let bytes: Vec<u8> = lines
            .iter()
            .flat_map(|l| l.split(','))
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(|t| u8::from_str_radix(t.trim_start_matches("0x"), 16).unwrap())
            .collect();
        assert_eq!(bytes, packed);
    }

    #[test]
    fn test_custom_spec() {
        let spec = HeaderSpec {
            symbol: "BT_ICON".to_string(),
            comments: vec![],
            includes: vec!["stdint.h".to_string()],
            placement: String::new(),
        };
        let text = serialize(&[0x0F; 2], 16, 1, &spec).unwrap();
        assert_eq!(
            text,
            indoc!(
                "#pragma once

                 #include <stdint.h>

                 #define BT_ICON_AVAILABLE 1
                 #define BT_ICON_WIDTH 16
                 #define BT_ICON_HEIGHT 1

                 static const uint8_t BT_ICON_BITMAP[] = {
                     0x0F, 0x0F,
                 };
                 "
            )
        );
        assert_eq!(spec.available_define(), "BT_ICON_AVAILABLE");
    }

    #[test]
    fn test_length_must_match_dimensions() {
        assert_eq!(
            serialize(&[0xFF; 4], 20, 2, &HeaderSpec::default()),
            Err(Error::PackedLength {
                expected: 6,
                actual: 4
            })
        );
    }

    #[test]
    fn test_symbol_validation() {
        for bad in ["", "1ICON", "FA-WIFI", "ICON NAME"] {
            let spec = HeaderSpec {
                symbol: bad.to_string(),
                ..Default::default()
            };
            assert_eq!(
                serialize(&[], 0, 0, &spec),
                Err(Error::InvalidSymbol(bad.to_string()))
            );
        }
        let spec = HeaderSpec {
            symbol: "_icon2".to_string(),
            ..Default::default()
        };
        assert!(serialize(&[], 0, 0, &spec).is_ok());
    }
}
