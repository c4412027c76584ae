//! Rendering abstraction layer.
//!
//! *The portal code never touches a pixel buffer directly.*
//! It produces vertical [`Strip`]s and hands them to a [`portal::StripSink`];
//! anything that ends up on screen goes through a type implementing
//! [`Surface`].
//!
//! * `Software` is the in-memory frame-buffer the window presents.
//! * Only `set_pixel` and `clear` are required; lines, circles, rectangles,
//!   text and strips have default implementations built on `set_pixel`.
//! * Text uses the 8×8 bitmaps of `font8x8`.

use font8x8::legacy::BASIC_LEGACY;

pub mod overlay;
pub mod portal;
pub mod projection;
pub mod queue;
pub mod software;

pub use overlay::{MapView, draw_map, draw_stats};
pub use portal::{Direct, PortalRenderer, StripSink, WorkItem};
pub use projection::Screen;
pub use queue::{Playback, RenderQueue, RenderRecord};
pub use software::Software;

/// Pixel format of the software frame-buffer (0x00RRGGBB).
pub type Rgba = u32;

#[inline]
pub const fn rgb(r: u8, g: u8, b: u8) -> Rgba {
    ((r as u32) << 16) | ((g as u32) << 8) | b as u32
}

/*──────────────────────────── palette ──────────────────────────────*/

pub const BLACK: Rgba = rgb(0, 0, 0);
pub const WHITE: Rgba = rgb(255, 255, 255);
pub const GREY: Rgba = rgb(192, 192, 192);
pub const DARK_GREY: Rgba = rgb(128, 128, 128);
pub const VERY_DARK_GREY: Rgba = rgb(64, 64, 64);
pub const RED: Rgba = rgb(255, 0, 0);
pub const DARK_RED: Rgba = rgb(128, 0, 0);
pub const GREEN: Rgba = rgb(0, 255, 0);
pub const DARK_GREEN: Rgba = rgb(0, 128, 0);
pub const BLUE: Rgba = rgb(0, 0, 255);
pub const DARK_BLUE: Rgba = rgb(0, 0, 128);
pub const CYAN: Rgba = rgb(0, 255, 255);
pub const MAGENTA: Rgba = rgb(255, 0, 255);
pub const YELLOW: Rgba = rgb(255, 255, 0);
pub const PURPLE: Rgba = rgb(191, 64, 191);

/*──────────────────────────── strips ───────────────────────────────*/

/// Colours of one vertical strip: first row, rows in between, last row.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StripColors {
    pub top: Rgba,
    pub middle: Rgba,
    pub bottom: Rgba,
}

impl StripColors {
    /// Same colour on both ends.
    pub const fn edged(edge: Rgba, middle: Rgba) -> Self {
        Self {
            top: edge,
            middle,
            bottom: edge,
        }
    }

    pub const CEILING: Self = Self::edged(DARK_GREY, VERY_DARK_GREY);
    pub const FLOOR: Self = Self::edged(BLUE, DARK_BLUE);
    pub const WALL: Self = Self::edged(BLACK, GREY);
    pub const LOWER_WALL: Self = Self::edged(BLACK, PURPLE);
    /// Wall columns at the very ends of an edge.
    pub const OUTLINE: Self = Self::edged(BLACK, BLACK);
    /// Window handed on through a portal (playback only).
    pub const WINDOW: Self = Self::edged(RED, DARK_RED);
    /// Strips of the sector playback is about to draw.
    pub const HIGHLIGHT: Self = Self::edged(GREEN, DARK_GREEN);
}

/// One screen column `x`, rows `y1..=y2`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Strip {
    pub x: i32,
    pub y1: i32,
    pub y2: i32,
    pub colors: StripColors,
}

impl Strip {
    /// `None` when `y2 < y1`.
    #[inline]
    pub fn new(x: i32, y1: i32, y2: i32, colors: StripColors) -> Option<Self> {
        (y2 >= y1).then_some(Self { x, y1, y2, colors })
    }
}

/*──────────────────────────── surface ──────────────────────────────*/

/// Pixel target for the renderer, the map overlay and playback.
///
/// Coordinates outside the surface are silently dropped.
pub trait Surface {
    fn width(&self) -> usize;
    fn height(&self) -> usize;

    fn set_pixel(&mut self, x: i32, y: i32, col: Rgba);

    fn clear(&mut self, col: Rgba);

    /// Integer Bresenham line, both endpoints included.
    fn draw_line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, col: Rgba) {
        if !line_worth_drawing(self.width(), self.height(), x0, y0, x1, y1) {
            return;
        }
        let (mut x, mut y) = (x0, y0);
        let dx = (x1 - x0).abs();
        let dy = -(y1 - y0).abs();
        let sx = if x0 < x1 { 1 } else { -1 };
        let sy = if y0 < y1 { 1 } else { -1 };
        let mut err = dx + dy;
        loop {
            self.set_pixel(x, y, col);
            if x == x1 && y == y1 {
                break;
            }
            let e2 = 2 * err;
            if e2 >= dy {
                err += dy;
                x += sx;
            }
            if e2 <= dx {
                err += dx;
                y += sy;
            }
        }
    }

    /// Midpoint circle outline.
    fn draw_circle(&mut self, cx: i32, cy: i32, r: i32, col: Rgba) {
        if r < 0 {
            return;
        }
        let (mut x, mut y, mut err) = (r, 0, 0);
        while x >= y {
            for (px, py) in [(x, y), (y, x), (-y, x), (-x, y), (-x, -y), (-y, -x), (y, -x), (x, -y)] {
                self.set_pixel(cx + px, cy + py, col);
            }
            y += 1;
            err += 1 + 2 * y;
            if 2 * (err - x) + 1 > 0 {
                x -= 1;
                err += 1 - 2 * x;
            }
        }
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, r: i32, col: Rgba) {
        for dy in -r..=r {
            for dx in -r..=r {
                if dx * dx + dy * dy <= r * r {
                    self.set_pixel(cx + dx, cy + dy, col);
                }
            }
        }
    }

    /// Filled `w × h` rectangle with its top-left corner at `(x, y)`.
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, col: Rgba) {
        let x_lo = x.max(0);
        let y_lo = y.max(0);
        let x_hi = x.saturating_add(w).min(self.width() as i32);
        let y_hi = y.saturating_add(h).min(self.height() as i32);
        for py in y_lo..y_hi {
            for px in x_lo..x_hi {
                self.set_pixel(px, py, col);
            }
        }
    }

    /// 8×8 bitmap text; `\n` starts a new line.
    fn draw_text(&mut self, x: i32, y: i32, text: &str, col: Rgba) {
        let (mut cx, mut cy) = (x, y);
        for ch in text.chars() {
            if ch == '\n' {
                cx = x;
                cy += LINE_HEIGHT;
                continue;
            }
            for (row, bits) in glyph(ch).iter().enumerate() {
                for column in 0..GLYPH_SIZE {
                    // bit 0 is the leftmost pixel
                    if (bits >> column) & 1 != 0 {
                        self.set_pixel(cx + column, cy + row as i32, col);
                    }
                }
            }
            cx += GLYPH_SIZE;
        }
    }

    /// Draw one strip with rows clamped to the surface.
    ///
    /// A one-row strip uses the middle colour; otherwise the first row gets
    /// `top`, the last row `bottom` and the rows between `middle`.
    fn draw_strip(&mut self, strip: &Strip) {
        let h = self.height() as i32;
        if h == 0 {
            return;
        }
        let y1 = strip.y1.clamp(0, h - 1);
        let y2 = strip.y2.clamp(0, h - 1);
        let c = strip.colors;
        if y2 == y1 {
            self.set_pixel(strip.x, y1, c.middle);
        } else if y2 > y1 {
            self.set_pixel(strip.x, y1, c.top);
            for y in y1 + 1..y2 {
                self.set_pixel(strip.x, y, c.middle);
            }
            self.set_pixel(strip.x, y2, c.bottom);
        }
    }
}

/// Glyph cell edge in pixels; also the advance between characters.
pub const GLYPH_SIZE: i32 = 8;
pub const LINE_HEIGHT: i32 = GLYPH_SIZE + 2;

/// Bitmap for `ch`, `?` for anything outside basic ASCII.
pub fn glyph(ch: char) -> [u8; 8] {
    BASIC_LEGACY
        .get(ch as usize)
        .copied()
        .unwrap_or(BASIC_LEGACY[b'?' as usize])
}

/// Longest extent a line may have before it is dropped outright.
const MAX_LINE_SPAN: i32 = 1 << 15;

/// Cheap reject for lines fully off one side or absurdly long.
fn line_worth_drawing(w: usize, h: usize, x0: i32, y0: i32, x1: i32, y1: i32) -> bool {
    let (w, h) = (w as i32, h as i32);
    let huge = |v: i32| !(-MAX_LINE_SPAN..=MAX_LINE_SPAN).contains(&v);
    if huge(x0) || huge(y0) || huge(x1) || huge(y1) {
        return false;
    }
    !((x0 < 0 && x1 < 0) || (y0 < 0 && y1 < 0) || (x0 >= w && x1 >= w) || (y0 >= h && y1 >= h))
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
