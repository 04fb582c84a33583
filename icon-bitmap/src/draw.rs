use crate::{fallback, pack::PackedBitmap};
use embedded_graphics::{prelude::*, primitives::Rectangle};

/// Draws every pixel of `bitmap` with its top left corner at `top_left`, using `fg` for
/// set bits and `bg` for the rest
pub fn draw_bitmap<D: DrawTarget>(
    display: &mut D,
    top_left: Point,
    bitmap: &PackedBitmap,
    fg: D::Color,
    bg: D::Color,
) -> Result<(), D::Error> {
    let area = Rectangle::new(Point::zero(), Size::new(bitmap.width(), bitmap.height()));
    let pixels = area.points().map(|p| {
        let color = if bitmap.is_set(p.x as u32, p.y as u32) {
            fg
        } else {
            bg
        };
        Pixel(top_left + p, color)
    });
    display.draw_iter(pixels)
}

/// Draws `icon`, or the built-in Wi-Fi icon when no icon was generated. Returns the size
/// of whatever was drawn so callers can lay out around it.
pub fn draw_icon_or_fallback<D: DrawTarget>(
    display: &mut D,
    top_left: Point,
    icon: Option<&PackedBitmap>,
    fg: D::Color,
    bg: D::Color,
) -> Result<Size, D::Error> {
    let bitmap = icon.unwrap_or(&fallback::WIFI);
    draw_bitmap(display, top_left, bitmap, fg, bg)?;
    Ok(Size::new(bitmap.width(), bitmap.height()))
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::pack::pack;
    use crate::raster::Raster;
    use embedded_graphics::{
        image::{Image, ImageRaw},
        mock_display::MockDisplay,
        pixelcolor::BinaryColor,
    };

    #[test]
    fn test_draw_bitmap() -> Result<(), Box<dyn std::error::Error>> {
        let data = [0b1010_0000, 0b0100_0000];
        let bitmap = PackedBitmap::new(&data, 3, 2)?;

        let mut display = MockDisplay::new();
        draw_bitmap(
            &mut display,
            Point::new(1, 1),
            &bitmap,
            BinaryColor::On,
            BinaryColor::Off,
        )?;
        display.assert_pattern(&[
            "    ",
            " #.#",
            " .#.",
        ]);
        Ok(())
    }

    #[test]
    fn test_same_bit_order_as_image_raw() -> Result<(), Box<dyn std::error::Error>> {
        let raster = Raster::from_fn(13, 5, |x, y| (x + 2 * y) % 3 == 0);
        let packed = pack(&raster);

        let mut ours = MockDisplay::new();
        draw_bitmap(
            &mut ours,
            Point::zero(),
            &PackedBitmap::new(&packed, 13, 5)?,
            BinaryColor::On,
            BinaryColor::Off,
        )?;

        let mut theirs = MockDisplay::new();
        let raw = ImageRaw::<BinaryColor>::new(&packed, 13);
        Image::new(&raw, Point::zero()).draw(&mut theirs)?;

        ours.assert_eq(&theirs);
        Ok(())
    }

    #[test]
    fn test_fallback_used_without_icon() -> Result<(), Box<dyn std::error::Error>> {
        let mut display = MockDisplay::<BinaryColor>::new();
        let size = draw_icon_or_fallback(
            &mut display,
            Point::zero(),
            None,
            BinaryColor::On,
            BinaryColor::Off,
        )?;
        assert_eq!(size, Size::new(16, 12));
        assert_eq!(display.get_pixel(Point::new(5, 0)), Some(BinaryColor::On));
        assert_eq!(display.get_pixel(Point::new(4, 0)), Some(BinaryColor::Off));

        let data = [0xFF];
        let icon = PackedBitmap::new(&data, 8, 1)?;
        let mut display = MockDisplay::<BinaryColor>::new();
        let size = draw_icon_or_fallback(
            &mut display,
            Point::zero(),
            Some(&icon),
            BinaryColor::On,
            BinaryColor::Off,
        )?;
        assert_eq!(size, Size::new(8, 1));
        display.assert_pattern(&["########"]);
        Ok(())
    }
}
