//! Page partitioning and dirty tracking.
//!
//! The raster buffer is carved once at setup into fixed-capacity pixel
//! runs ("pages", sized from the host memory page). A page is the unit
//! of dirty tracking: drawing marks pages, the flush pass streams them.

use crate::geometry::FrameGeometry;
use crate::Error;

/// Upper bound on the page table. 128 pages covers every panel this
/// driver targets (e.g. 320x240 at 32 bpp needs 75 pages of 4 KiB).
pub const MAX_PAGES: usize = 128;

/// One fixed-capacity contiguous pixel run within the raster buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    /// Column of the first pixel.
    pub x: u16,
    /// Row of the first pixel.
    pub y: u16,
    /// Linear pixel offset of the run start.
    pub offset: usize,
    /// Run length in pixels. Every page but the last holds the full
    /// page capacity.
    pub len: u16,
    pub dirty: bool,
}

impl Page {
    /// Number of scanlines the run intersects, counting the partial
    /// lead-in and tail rows.
    pub fn rows_spanned(&self, width: u16) -> u16 {
        let end = self.x as usize + self.len as usize;
        end.div_ceil(width as usize) as u16
    }
}

/// Ordered page sequence plus the dirty flags. Built once at setup, the
/// run layout never changes afterwards; only `dirty` is mutated.
#[derive(Debug)]
pub struct PageTable {
    pages: heapless::Vec<Page, MAX_PAGES>,
    width: u16,
    pixels_per_page: usize,
}

impl PageTable {
    /// Partition `geom` (already oriented) into pages of
    /// `page_bytes / bytes_per_pixel` pixels each.
    ///
    /// The pages tile the buffer exactly: the final page takes whatever
    /// remains, which may be shorter but never longer than the capacity,
    /// and consecutive pages advance with no gap or overlap.
    pub fn partition<E: core::fmt::Debug>(
        geom: &FrameGeometry,
        page_bytes: usize,
    ) -> Result<Self, Error<E>> {
        let bytes_per_pixel = geom.bytes_per_pixel();
        if bytes_per_pixel == 0 || page_bytes < bytes_per_pixel {
            return Err(Error::Allocation {
                needed: bytes_per_pixel,
                got: page_bytes,
            });
        }
        let pixels_per_page = page_bytes / bytes_per_pixel;
        let total = geom.total_pixels();
        let count = total.div_ceil(pixels_per_page);

        let mut pages = heapless::Vec::new();
        for index in 0..count {
            let offset = index * pixels_per_page;
            let len = pixels_per_page.min(total - offset);
            let page = Page {
                x: (offset % geom.width as usize) as u16,
                y: (offset / geom.width as usize) as u16,
                offset,
                len: len as u16,
                dirty: false,
            };
            pages
                .push(page)
                .map_err(|_| Error::Allocation {
                    needed: count,
                    got: MAX_PAGES,
                })?;
            log::trace!(
                "page[{}]: x={} y={} offset={} len={}",
                index,
                page.x,
                page.y,
                offset,
                len
            );
        }

        Ok(PageTable {
            pages,
            width: geom.width,
            pixels_per_page,
        })
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Page capacity in pixels.
    pub fn pixels_per_page(&self) -> usize {
        self.pixels_per_page
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn page(&self, index: usize) -> &Page {
        &self.pages[index]
    }

    /// Mark dirty every page whose row span intersects `[y, y + h)`.
    /// Dirtying is monotonic OR between flushes; the x range is ignored
    /// because pages span whole stretches of scanlines anyway.
    pub fn touch(&mut self, _x: u16, y: u16, _w: u16, h: u16) {
        let y0 = y as u32;
        let y1 = y as u32 + h as u32;
        for page in self.pages.iter_mut() {
            let p0 = page.y as u32;
            let p1 = p0 + page.rows_spanned(self.width) as u32;
            if p0 < y1 && y0 < p1 {
                page.dirty = true;
            }
        }
    }

    /// Mark every page dirty (full-buffer writes).
    pub fn touch_all(&mut self) {
        for page in self.pages.iter_mut() {
            page.dirty = true;
        }
    }

    /// Re-arm a single page, used when its transfer was abandoned.
    pub fn mark_dirty(&mut self, index: usize) {
        self.pages[index].dirty = true;
    }

    /// Clear a page's flag, returning whether it was set. The flag is
    /// taken before the pixel data is read so a racing touch re-marks
    /// the page for the next cycle instead of being absorbed into this
    /// one; a touch landing between the read and the clear can still be
    /// lost for one cycle (known weak point, see `driver::flush`).
    pub fn take_dirty(&mut self, index: usize) -> bool {
        core::mem::replace(&mut self.pages[index].dirty, false)
    }

    pub fn dirty_count(&self) -> usize {
        self.pages.iter().filter(|p| p.dirty).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ColorOrder, Rotation};

    fn geom(width: u16, height: u16, bpp: u8) -> FrameGeometry {
        FrameGeometry {
            width,
            height,
            bits_per_pixel: bpp,
            rotation: Rotation::Deg0,
            color_order: ColorOrder::Rgb,
        }
    }

    #[test]
    fn rows_spanned_counts_partial_rows() {
        let p = Page {
            x: 64,
            y: 3,
            offset: 1024,
            len: 1024,
            dirty: false,
        };
        // 64 + 1024 = 1088 pixels from the row start -> 4 rows of 320.
        assert_eq!(p.rows_spanned(320), 4);

        let aligned = Page {
            x: 0,
            y: 0,
            offset: 0,
            len: 640,
            dirty: false,
        };
        assert_eq!(aligned.rows_spanned(320), 2);
    }

    #[test]
    fn partition_rejects_pages_smaller_than_a_pixel() {
        let err = PageTable::partition::<()>(&geom(320, 240, 32), 2).unwrap_err();
        assert_eq!(err, Error::Allocation { needed: 4, got: 2 });

        // Sub-byte depths cannot size a page at all.
        let err = PageTable::partition::<()>(&geom(320, 240, 4), 4096).unwrap_err();
        assert!(matches!(err, Error::Allocation { .. }));
    }

    #[test]
    fn partition_rejects_oversized_tables() {
        // 1024x1024 at 32 bpp would need 1024 pages.
        let err = PageTable::partition::<()>(&geom(1024, 1024, 32), 4096).unwrap_err();
        assert!(matches!(err, Error::Allocation { .. }));
    }
}
