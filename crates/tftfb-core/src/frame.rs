//! Frame store: the raster buffer and its geometry.
//!
//! The buffer is caller-provided (mapped region, static allocation, a
//! host `Vec`); the store only validates its size against the geometry
//! and gives typed pixel access to the flush path. Pixels are
//! host-native little-endian in memory.

use crate::geometry::FrameGeometry;
use crate::Error;

#[derive(Debug)]
pub struct FrameStore<'b> {
    buf: &'b mut [u8],
    geom: FrameGeometry,
}

impl<'b> FrameStore<'b> {
    /// Bind a buffer to an (already oriented) geometry. Fails when the
    /// buffer cannot hold a full frame; a longer buffer is fine, the
    /// excess is simply never streamed.
    pub fn new<E: core::fmt::Debug>(
        buf: &'b mut [u8],
        geom: FrameGeometry,
    ) -> Result<Self, Error<E>> {
        let needed = geom.frame_bytes();
        if buf.len() < needed {
            return Err(Error::Allocation {
                needed,
                got: buf.len(),
            });
        }
        Ok(FrameStore { buf, geom })
    }

    pub fn geometry(&self) -> &FrameGeometry {
        &self.geom
    }

    /// Writable raster surface exposed to the drawing layer.
    pub fn buffer_mut(&mut self) -> &mut [u8] {
        self.buf
    }

    pub fn buffer(&self) -> &[u8] {
        self.buf
    }

    /// 16 bpp pixel at a linear pixel offset.
    pub fn pixel16(&self, index: usize) -> u16 {
        let at = index * 2;
        u16::from_le_bytes([self.buf[at], self.buf[at + 1]])
    }

    /// 32 bpp pixel at a linear pixel offset.
    pub fn pixel32(&self, index: usize) -> u32 {
        let at = index * 4;
        u32::from_le_bytes([
            self.buf[at],
            self.buf[at + 1],
            self.buf[at + 2],
            self.buf[at + 3],
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{ColorOrder, Rotation};

    fn geom() -> FrameGeometry {
        FrameGeometry {
            width: 4,
            height: 2,
            bits_per_pixel: 16,
            rotation: Rotation::Deg0,
            color_order: ColorOrder::Rgb,
        }
    }

    #[test]
    fn rejects_short_buffers() {
        let mut buf = [0u8; 15];
        let err = FrameStore::new::<()>(&mut buf, geom()).unwrap_err();
        assert_eq!(
            err,
            Error::Allocation {
                needed: 16,
                got: 15
            }
        );
    }

    #[test]
    fn pixel_reads_are_little_endian() {
        let mut buf = [0u8; 16];
        buf[4] = 0x34;
        buf[5] = 0x12;
        let store = FrameStore::new::<()>(&mut buf, geom()).unwrap();
        assert_eq!(store.pixel16(2), 0x1234);
    }
}
