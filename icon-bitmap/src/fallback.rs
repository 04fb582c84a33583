//! The hand-drawn Wi-Fi icon the firmware uses when no generated icon is available

use crate::pack::PackedBitmap;

pub const WIFI_WIDTH: u32 = 16;
pub const WIFI_HEIGHT: u32 = 12;

#[rustfmt::skip]
const WIFI_DATA: [u8; 24] = [
    0b0000_0111, 0b1110_0000,
    0b0001_1111, 0b1111_1000,
    0b0011_1111, 0b1111_1100,
    0b0111_1100, 0b0011_1110,
    0b1111_0000, 0b0000_1111,
    0b1110_0011, 0b1100_0111,
    0b1100_0111, 0b1111_0011,
    0b0000_1111, 0b1111_0000,
    0b0000_0111, 0b1110_0000,
    0b0000_0011, 0b1100_0000,
    0b0000_0001, 0b1000_0000,
    0b0000_0000, 0b0000_0000,
];

pub const WIFI: PackedBitmap<'static> =
    PackedBitmap::new_const(&WIFI_DATA, WIFI_WIDTH, WIFI_HEIGHT);

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_matches_word_rows() {
        // One 16 bit word per row, leftmost pixel in bit 15
        const ROWS: [u16; 12] = [
            0b0000011111100000,
            0b0001111111111000,
            0b0011111111111100,
            0b0111110000111110,
            0b1111000000001111,
            0b1110001111000111,
            0b1100011111110011,
            0b0000111111110000,
            0b0000011111100000,
            0b0000001111000000,
            0b0000000110000000,
            0b0000000000000000,
        ];

        let raster = WIFI.to_raster();
        assert_eq!(raster.width(), 16);
        assert_eq!(raster.height(), 12);
        for (y, word) in ROWS.iter().enumerate() {
            for x in 0..16 {
                assert_eq!(raster.get(x, y as u32), word & (1 << (15 - x)) != 0);
            }
        }
    }
}
