//! Frame geometry: panel resolution, pixel format, orientation.

/// Panel rotation, applied once at init. 90/270 swap width and height
/// before the page table is built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotation {
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// True for the two orientations that exchange the panel axes.
    pub fn swaps_axes(self) -> bool {
        matches!(self, Rotation::Deg90 | Rotation::Deg270)
    }
}

/// Color channel order on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorOrder {
    Rgb,
    Bgr,
}

/// Raster buffer geometry. Immutable after setup; rotation is folded in
/// by [`FrameGeometry::oriented`] before anything downstream sees it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameGeometry {
    pub width: u16,
    pub height: u16,
    pub bits_per_pixel: u8,
    pub rotation: Rotation,
    pub color_order: ColorOrder,
}

impl FrameGeometry {
    pub fn bytes_per_pixel(&self) -> usize {
        self.bits_per_pixel as usize / 8
    }

    /// Bytes per scanline.
    pub fn stride(&self) -> usize {
        self.width as usize * self.bytes_per_pixel()
    }

    pub fn total_pixels(&self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn frame_bytes(&self) -> usize {
        self.total_pixels() * self.bytes_per_pixel()
    }

    /// Geometry with the rotation's axis swap applied. The page table
    /// and all window math are built from this view.
    pub fn oriented(&self) -> FrameGeometry {
        if self.rotation.swaps_axes() {
            FrameGeometry {
                width: self.height,
                height: self.width,
                ..*self
            }
        } else {
            *self
        }
    }
}
