//! Address window math.
//!
//! A window is the rectangle sent to the controller ahead of a pixel
//! stream; streamed pixels fill it row-major. Two page-to-window
//! mappings exist:
//!
//! - controllers with free-running auto-increment accept the whole page
//!   run as a single over-wide "row" window ([`run_window`]);
//! - controllers that only accept row-aligned rectangles need the run
//!   split into 1-3 scanline-aligned pieces ([`split_row_aligned`]).
//!
//! Because the page capacity rarely divides the row width, page start
//! columns repeat with a fixed period; the split shape is a pure
//! function of `page_index mod cycle_length` (see [`cycle_length`]).

use crate::page::Page;

/// Rectangle framing a subsequent pixel stream, edges inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AddressWindow {
    pub x_start: u16,
    pub x_end: u16,
    pub y_start: u16,
    pub y_end: u16,
}

impl AddressWindow {
    pub fn pixel_count(&self) -> usize {
        (self.x_end - self.x_start + 1) as usize * (self.y_end - self.y_start + 1) as usize
    }
}

/// One row-aligned piece of a page run: the window to program plus the
/// pixel range it consumes, relative to the page start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowSlice {
    pub window: AddressWindow,
    /// Pixel offset within the page run.
    pub offset: u16,
    /// Pixels in this slice.
    pub len: u16,
}

/// Up to three slices: partial lead-in row, block of whole rows,
/// partial tail row.
pub type SliceList = heapless::Vec<WindowSlice, 3>;

/// Encode a whole page run as one window, for controllers whose write
/// pointer auto-increments across row ends. The rectangle is the run
/// itself laid out as a single row; the controller wraps at the panel
/// edge, not the window edge, so `x_end` may exceed the physical width.
pub fn run_window(page: &Page) -> AddressWindow {
    AddressWindow {
        x_start: page.x,
        x_end: page.x + page.len - 1,
        y_start: page.y,
        y_end: page.y,
    }
}

/// Split a page run into row-aligned windows covering it exactly once,
/// in increasing offset order.
pub fn split_row_aligned(page: &Page, width: u16) -> SliceList {
    // At most one lead-in, one row block and one tail go in, so the
    // capacity of 3 can never overflow and the push results are moot.
    let mut slices = SliceList::new();
    let mut offset: u16 = 0;
    let mut row = page.y;

    // Partial lead-in row when the run starts mid-scanline.
    if page.x > 0 {
        let head = (width - page.x).min(page.len);
        slices
            .push(WindowSlice {
                window: AddressWindow {
                    x_start: page.x,
                    x_end: page.x + head - 1,
                    y_start: row,
                    y_end: row,
                },
                offset,
                len: head,
            })
            .ok();
        offset += head;
        row += 1;
    }

    // Whole rows.
    let full_rows = (page.len - offset) / width;
    if full_rows > 0 {
        let len = full_rows * width;
        slices
            .push(WindowSlice {
                window: AddressWindow {
                    x_start: 0,
                    x_end: width - 1,
                    y_start: row,
                    y_end: row + full_rows - 1,
                },
                offset,
                len,
            })
            .ok();
        offset += len;
        row += full_rows;
    }

    // Partial tail row.
    let tail = page.len - offset;
    if tail > 0 {
        slices
            .push(WindowSlice {
                window: AddressWindow {
                    x_start: 0,
                    x_end: tail - 1,
                    y_start: row,
                    y_end: row,
                },
                offset,
                len: tail,
            })
            .ok();
    }

    slices
}

/// Period (in pages) after which page start columns repeat, derived
/// from the capacity/width ratio instead of a per-resolution table.
pub fn cycle_length(pixels_per_page: usize, width: u16) -> usize {
    let rem = pixels_per_page % width as usize;
    if rem == 0 {
        1
    } else {
        width as usize / gcd(rem, width as usize)
    }
}

fn gcd(mut a: usize, mut b: usize) -> usize {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}
