use image::GrayImage;
use std::fmt;

/// Tight rectangle around the non-zero pixels of a render. `x1` and `y1` are exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub x0: u32,
    pub y0: u32,
    pub x1: u32,
    pub y1: u32,
}

impl BoundingBox {
    pub fn width(&self) -> u32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> u32 {
        self.y1 - self.y0
    }
}

/// Finds the bounding box of every non-zero pixel, or `None` if the image is blank
pub fn ink_bounds(img: &GrayImage) -> Option<BoundingBox> {
    img.enumerate_pixels()
        .filter(|(_, _, p)| p.0[0] != 0)
        .fold(None, |bounds, (x, y, _)| {
            Some(match bounds {
                None => BoundingBox {
                    x0: x,
                    y0: y,
                    x1: x + 1,
                    y1: y + 1,
                },
                Some(b) => BoundingBox {
                    x0: b.x0.min(x),
                    y0: b.y0.min(y),
                    x1: b.x1.max(x + 1),
                    y1: b.y1.max(y + 1),
                },
            })
        })
}

/// A binary image, stored row-major. `true` is ink.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Raster {
    width: u32,
    height: u32,
    ink: Vec<bool>,
}

impl Raster {
    pub fn blank(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            ink: vec![false; width as usize * height as usize],
        }
    }

    pub fn from_fn(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> bool) -> Self {
        let ink = (0..height)
            .flat_map(|y| (0..width).map(move |x| (x, y)))
            .map(|(x, y)| f(x, y))
            .collect();
        Self { width, height, ink }
    }

    /// Every pixel strictly brighter than `threshold` becomes ink
    pub fn binarize(img: &GrayImage, threshold: u8) -> Self {
        Self {
            width: img.width(),
            height: img.height(),
            ink: img.pixels().map(|p| p.0[0] > threshold).collect(),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// # Panics
    ///
    /// Panics if the coordinates lie outside the raster
    pub fn get(&self, x: u32, y: u32) -> bool {
        self.ink[self.index(x, y)]
    }

    /// # Panics
    ///
    /// Panics if the coordinates lie outside the raster
    pub fn set(&mut self, x: u32, y: u32, ink: bool) {
        let i = self.index(x, y);
        self.ink[i] = ink;
    }

    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        self.ink.chunks(self.width.max(1) as usize)
    }

    pub fn ink_count(&self) -> usize {
        self.ink.iter().filter(|&&p| p).count()
    }

    pub fn is_blank(&self) -> bool {
        !self.ink.contains(&true)
    }

    fn index(&self, x: u32, y: u32) -> usize {
        assert!(
            x < self.width && y < self.height,
            "({x}, {y}) is outside a {}x{} raster",
            self.width,
            self.height
        );
        y as usize * self.width as usize + x as usize
    }
}

impl fmt::Display for Raster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.rows() {
            for &ink in row {
                f.write_str(if ink { "#" } else { "." })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
