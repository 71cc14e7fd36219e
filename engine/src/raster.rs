use std::io::Write;

use crate::error::Result;

pub type Color = [u8; 4];

pub const BLACK: Color = [0, 0, 0, 255];
pub const WHITE: Color = [255, 255, 255, 255];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl Rect {
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    pub const fn is_empty(self) -> bool {
        self.w == 0 || self.h == 0
    }
}

/// An owned RGBA pixel buffer.
///
/// The buffer is released when the raster is dropped; nothing outside the raster holds on to
/// its pixels, so extracting bytes (`rgba`, `encode_png`) never leaks the allocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: u32,
    height: u32,
    buf: Vec<u8>,
    transparent: Option<Color>,
}

impl Raster {
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize)
            .saturating_mul(height as usize)
            .saturating_mul(4);
        Self {
            width,
            height,
            buf: vec![0u8; len],
            transparent: None,
        }
    }

    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let mut raster = Self::new(width, height);
        raster.clear(color);
        raster
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.buf
    }

    pub fn transparent_color(&self) -> Option<Color> {
        self.transparent
    }

    pub fn clear(&mut self, color: Color) {
        for px in self.buf.chunks_exact_mut(4) {
            px.copy_from_slice(&color);
        }
    }

    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        let px = self.buf.get(idx..idx + 4)?;
        Some([px[0], px[1], px[2], px[3]])
    }

    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = ((y as usize) * (self.width as usize) + x as usize) * 4;
        if let Some(px) = self.buf.get_mut(idx..idx + 4) {
            px.copy_from_slice(&color);
        }
    }

    /// Fills `rect` (clipped to the raster) with `color`.
    pub fn set_pixel_block(&mut self, rect: Rect, color: Color) {
        let max_x = rect.x.saturating_add(rect.w).min(self.width);
        let max_y = rect.y.saturating_add(rect.h).min(self.height);
        if rect.x >= max_x || rect.y >= max_y {
            return;
        }

        let stride = self.width as usize * 4;
        let row_bytes = (max_x - rect.x) as usize * 4;
        let mut row_start = rect.y as usize * stride + rect.x as usize * 4;
        for _ in rect.y..max_y {
            let row = &mut self.buf[row_start..row_start + row_bytes];
            for px in row.chunks_exact_mut(4) {
                px.copy_from_slice(&color);
            }
            row_start += stride;
        }
    }

    /// Fills the ellipse centred at (`cx`, `cy`) with diameters `w` x `h`.
    pub fn fill_ellipse(&mut self, cx: f32, cy: f32, w: f32, h: f32, color: Color) {
        let rx = w / 2.0;
        let ry = h / 2.0;
        if rx <= 0.0 || ry <= 0.0 {
            return;
        }
        let min_y = (cy - ry).floor().max(0.0) as u32;
        let max_y = ((cy + ry).ceil().max(0.0) as u32).min(self.height);
        let min_x = (cx - rx).floor().max(0.0) as u32;
        let max_x = ((cx + rx).ceil().max(0.0) as u32).min(self.width);
        for y in min_y..max_y {
            for x in min_x..max_x {
                let dx = (x as f32 + 0.5 - cx) / rx;
                let dy = (y as f32 + 0.5 - cy) / ry;
                if dx * dx + dy * dy <= 1.0 {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Draws the lower half of an elliptic ring `thickness` pixels wide.
    pub fn stroke_lower_arc(&mut self, cx: f32, cy: f32, w: f32, h: f32, thickness: f32, color: Color) {
        let rx = w / 2.0;
        let ry = h / 2.0;
        if rx <= thickness || ry <= thickness {
            return;
        }
        let min_x = (cx - rx).floor().max(0.0) as u32;
        let max_x = ((cx + rx).ceil().max(0.0) as u32).min(self.width);
        let min_y = cy.floor().max(0.0) as u32;
        let max_y = ((cy + ry).ceil().max(0.0) as u32).min(self.height);
        for y in min_y..max_y {
            for x in min_x..max_x {
                let px = x as f32 + 0.5 - cx;
                let py = y as f32 + 0.5 - cy;
                let outer = (px / rx).powi(2) + (py / ry).powi(2);
                let inner = (px / (rx - thickness)).powi(2) + (py / (ry - thickness)).powi(2);
                if outer <= 1.0 && inner > 1.0 {
                    self.set_pixel(x, y, color);
                }
            }
        }
    }

    /// Copies every non-transparent pixel of `src` onto this raster at (`x`, `y`).
    pub fn blit(&mut self, src: &Raster, x: u32, y: u32) {
        for sy in 0..src.height {
            for sx in 0..src.width {
                let Some(px) = src.pixel(sx, sy) else {
                    continue;
                };
                if px[3] == 0 {
                    continue;
                }
                self.set_pixel(x + sx, y + sy, px);
            }
        }
    }

    /// Declares `color` (compared on RGB) transparent: matching pixels get alpha 0.
    pub fn mark_transparent(&mut self, color: Color) {
        for px in self.buf.chunks_exact_mut(4) {
            if px[..3] == color[..3] {
                px[3] = 0;
            }
        }
        self.transparent = Some([color[0], color[1], color[2], 0]);
    }

    pub fn encode_png<W: Write>(&self, out: W) -> Result<()> {
        let mut encoder = png::Encoder::new(out, self.width, self.height);
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(&self.buf)?;
        writer.finish()?;
        Ok(())
    }

    pub fn to_png_bytes(&self) -> Result<Vec<u8>> {
        let mut bytes = Vec::new();
        self.encode_png(&mut bytes)?;
        Ok(bytes)
    }
}

/// First RGB value (counting up from black, red fastest) that is not one of `used`.
pub fn unused_color(used: &[Color]) -> Color {
    let mut candidate: u32 = 0;
    loop {
        let rgb = [
            (candidate & 0xff) as u8,
            ((candidate >> 8) & 0xff) as u8,
            ((candidate >> 16) & 0xff) as u8,
        ];
        if !used.iter().any(|c| c[..3] == rgb) || candidate >= 0x00ff_ffff {
            return [rgb[0], rgb[1], rgb[2], 255];
        }
        candidate += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_block_is_clipped() {
        let mut raster = Raster::filled(4, 3, BLACK);
        raster.set_pixel_block(Rect::new(2, 1, 10, 10), WHITE);
        assert_eq!(raster.pixel(1, 1), Some(BLACK));
        assert_eq!(raster.pixel(2, 1), Some(WHITE));
        assert_eq!(raster.pixel(3, 2), Some(WHITE));
        assert_eq!(raster.pixel(4, 2), None);
    }

    #[test]
    fn unused_color_counts_up_red_first() {
        assert_eq!(unused_color(&[WHITE]), [0, 0, 0, 255]);
        assert_eq!(unused_color(&[BLACK]), [1, 0, 0, 255]);
        assert_eq!(unused_color(&[BLACK, [1, 0, 0, 255]]), [2, 0, 0, 255]);
    }

    #[test]
    fn mark_transparent_clears_alpha_of_matching_pixels() {
        let key = [1, 0, 0, 255];
        let mut raster = Raster::filled(2, 1, key);
        raster.set_pixel(1, 0, WHITE);
        raster.mark_transparent(key);
        assert_eq!(raster.pixel(0, 0), Some([1, 0, 0, 0]));
        assert_eq!(raster.pixel(1, 0), Some(WHITE));
    }

    #[test]
    fn blit_skips_transparent_pixels() {
        let mut sprite = Raster::filled(2, 2, [9, 9, 9, 255]);
        sprite.set_pixel(0, 0, [5, 5, 5, 255]);
        sprite.mark_transparent([9, 9, 9, 255]);

        let mut target = Raster::filled(4, 4, BLACK);
        target.blit(&sprite, 1, 1);
        assert_eq!(target.pixel(1, 1), Some([5, 5, 5, 255]));
        assert_eq!(target.pixel(2, 2), Some(BLACK));
    }

    #[test]
    fn encodes_png_signature() {
        let raster = Raster::filled(3, 2, WHITE);
        let bytes = raster.to_png_bytes().expect("png encode");
        assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    }
}
