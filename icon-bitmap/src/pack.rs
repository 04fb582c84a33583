//! 1 bit per pixel packing. Rows are stored top to bottom, each starting on a fresh
//! byte, with the leftmost pixel of every byte in its most significant bit. The last
//! byte of a row is padded with zeros in its low bits.

use crate::{
    error::{Error, Result},
    raster::Raster,
};

/// Number of bytes used by one packed row
pub const fn row_stride(width: u32) -> usize {
    (width as usize).div_ceil(8)
}

/// Number of bytes used by a packed `width` x `height` image
pub const fn packed_len(width: u32, height: u32) -> usize {
    row_stride(width) * height as usize
}

pub fn pack(raster: &Raster) -> Vec<u8> {
    let mut packed = Vec::with_capacity(packed_len(raster.width(), raster.height()));

    for row in raster.rows() {
        let mut acc = 0u8;
        let mut bits = 0u8;
        for &ink in row {
            acc = (acc << 1) | u8::from(ink);
            bits += 1;
            if bits == 8 {
                packed.push(acc);
                acc = 0;
                bits = 0;
            }
        }
        if bits != 0 {
            packed.push(acc << (8 - bits));
        }
    }

    packed
}

pub fn unpack(data: &[u8], width: u32, height: u32) -> Result<Raster> {
    Ok(PackedBitmap::new(data, width, height)?.to_raster())
}

/// A borrowed, already packed bitmap
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PackedBitmap<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> PackedBitmap<'a> {
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Result<Self> {
        let expected = packed_len(width, height);
        if data.len() != expected {
            return Err(Error::PackedLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }

    /// For compile time constants
    ///
    /// # Panics
    ///
    /// Panics if `data` has the wrong length for the dimensions
    pub const fn new_const(data: &'a [u8], width: u32, height: u32) -> Self {
        assert!(data.len() == packed_len(width, height));
        Self {
            data,
            width,
            height,
        }
    }

    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// `false` for coordinates outside the bitmap
    pub fn is_set(&self, x: u32, y: u32) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let byte = self.data[y as usize * row_stride(self.width) + x as usize / 8];
        byte & (0x80 >> (x % 8)) != 0
    }

    pub fn to_raster(&self) -> Raster {
        Raster::from_fn(self.width, self.height, |x, y| self.is_set(x, y))
    }
}
