//! ---------------------------------------------------------------------------
//! In-memory frame-buffer
//!
//! * Pixels are **0x00RRGGBB**, row-major, `width * height` long; the exact
//!   layout `minifb::Window::update_with_buffer` expects.
//! * `end_frame` loans the finished buffer to a closure, so the window code
//!   never needs to know about this type's internals.
//! ---------------------------------------------------------------------------

use super::{BLACK, Rgba, Surface};

/// CPU frame-buffer.
#[derive(Clone, Debug, Default)]
pub struct Software {
    scratch: Vec<Rgba>,
    width: usize,
    height: usize,
}

impl Software {
    pub fn new(width: usize, height: usize) -> Self {
        let mut fb = Self::default();
        fb.resize(width, height);
        fb
    }

    /// (Re)allocate for a new resolution and clear to black.
    pub fn resize(&mut self, width: usize, height: usize) {
        self.width = width;
        self.height = height;
        self.scratch.clear();
        self.scratch.resize(width * height, BLACK);
    }

    #[inline]
    pub fn pixels(&self) -> &[Rgba] {
        &self.scratch
    }

    /// Read back one pixel, `None` outside the buffer.
    #[inline]
    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        self.index(x, y).map(|i| self.scratch[i])
    }

    /// Finish the frame and **loan** the buffer to `submit`.
    ///
    /// The window passes `|fb, w, h| window.update_with_buffer(fb, w, h)`.
    pub fn end_frame<F, T>(&self, submit: F) -> T
    where
        F: FnOnce(&[Rgba], usize, usize) -> T,
    {
        submit(&self.scratch, self.width, self.height)
    }

    #[inline(always)]
    fn index(&self, x: i32, y: i32) -> Option<usize> {
        let x = usize::try_from(x).ok().filter(|&x| x < self.width)?;
        let y = usize::try_from(y).ok().filter(|&y| y < self.height)?;
        Some(y * self.width + x)
    }
}

/*──────────────────────── Surface trait impl ─────────────────────────*/
impl Surface for Software {
    #[inline]
    fn width(&self) -> usize {
        self.width
    }

    #[inline]
    fn height(&self) -> usize {
        self.height
    }

    #[inline]
    fn set_pixel(&mut self, x: i32, y: i32, col: Rgba) {
        if let Some(i) = self.index(x, y) {
            self.scratch[i] = col;
        }
    }

    fn clear(&mut self, col: Rgba) {
        self.scratch.fill(col);
    }
}

/*====================================================================*/
/*                                Tests                                */
/*====================================================================*/
