//! Window math properties: the contiguous-run encoding, and the
//! row-aligned split against the reference 320-wide/1024-px cycle.

use tftfb_core::geometry::{ColorOrder, FrameGeometry, Rotation};
use tftfb_core::page::{Page, PageTable};
use tftfb_core::window::{cycle_length, run_window, split_row_aligned, AddressWindow};

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
fn run_window_bounds_the_run_as_one_row() {
    let p = Page {
        x: 128,
        y: 8,
        offset: 2048,
        len: 2048,
        dirty: false,
    };
    assert_eq!(
        run_window(&p),
        AddressWindow {
            x_start: 128,
            x_end: 128 + 2048 - 1,
            y_start: 8,
            y_end: 8,
        }
    );
    assert_eq!(run_window(&p).pixel_count(), 2048);
}

/// The generic split must reproduce the hand-written five-case table
/// the reference driver used for 1024-pixel pages on a 320-wide panel:
/// residue 0 -> 960+64, 1 -> 256+640+128, 2 -> 192+640+192,
/// 3 -> 128+640+256, 4 -> 64+960.
#[test]
fn split_matches_the_reference_five_case_table() {
    let g = geom(320, 240, 32);
    let table = PageTable::partition::<()>(&g, 4096).unwrap();
    assert_eq!(cycle_length(table.pixels_per_page(), 320), 5);

    let expected: [&[u16]; 5] = [
        &[960, 64],
        &[256, 640, 128],
        &[192, 640, 192],
        &[128, 640, 256],
        &[64, 960],
    ];

    // 76800 px / 1024 is exact, so all 75 pages carry full runs.
    assert_eq!(table.len(), 75);
    for (index, page) in table.pages().iter().enumerate() {
        let slices = split_row_aligned(page, 320);
        let lens: Vec<u16> = slices.iter().map(|s| s.len).collect();
        assert_eq!(lens, expected[index % 5], "page {index}");
    }
}

/// Residue 1 of the reference table, rectangle by rectangle.
#[test]
fn split_residue_one_exact_rectangles() {
    let p = Page {
        x: 64,
        y: 3,
        offset: 1024,
        len: 1024,
        dirty: false,
    };
    let slices = split_row_aligned(&p, 320);
    assert_eq!(slices.len(), 3);

    // Rest of the starting row.
    assert_eq!(slices[0].window, win(64, 319, 3, 3));
    assert_eq!((slices[0].offset, slices[0].len), (0, 256));
    // Two whole rows.
    assert_eq!(slices[1].window, win(0, 319, 4, 5));
    assert_eq!((slices[1].offset, slices[1].len), (256, 640));
    // Partial tail row.
    assert_eq!(slices[2].window, win(0, 127, 6, 6));
    assert_eq!((slices[2].offset, slices[2].len), (896, 128));
}

fn win(x_start: u16, x_end: u16, y_start: u16, y_end: u16) -> AddressWindow {
    AddressWindow {
        x_start,
        x_end,
        y_start,
        y_end,
    }
}

/// For every page of several resolutions: slices partition the run
/// exactly, in increasing offset order, window areas match slice
/// lengths, and rows stay inside the page's span.
#[test]
fn split_partitions_every_page_without_gap_or_overlap() {
    for (w, h, bpp) in [(320u16, 240u16, 32u8), (240, 320, 16), (480, 272, 16)] {
        let g = geom(w, h, bpp);
        let table = PageTable::partition::<()>(&g, 4096).unwrap();
        for (index, page) in table.pages().iter().enumerate() {
            let slices = split_row_aligned(page, w);
            assert!(!slices.is_empty(), "{w}x{h} page {index}");
            assert!(slices.len() <= 3);

            let mut next_offset = 0u16;
            for s in &slices {
                assert_eq!(s.offset, next_offset, "{w}x{h} page {index}");
                assert_eq!(s.window.pixel_count(), s.len as usize);
                assert!(s.window.x_end < w);
                next_offset += s.len;
            }
            assert_eq!(next_offset, page.len, "{w}x{h} page {index}");
        }
    }
}

/// The split shape depends only on the page's residue class.
#[test]
fn split_shape_repeats_with_the_cycle() {
    let g = geom(240, 320, 16);
    let table = PageTable::partition::<()>(&g, 4096).unwrap();
    let cycle = cycle_length(table.pixels_per_page(), 240);
    assert_eq!(cycle, 15);

    for (index, page) in table.pages().iter().enumerate() {
        let twin_index = index % cycle;
        let twin = table.page(twin_index);
        if page.len != twin.len {
            continue; // the remainder page has no twin
        }
        let a = split_row_aligned(page, 240);
        let b = split_row_aligned(twin, 240);
        let shape_a: Vec<(u16, u16, u16)> =
            a.iter().map(|s| (s.window.x_start, s.window.x_end, s.len)).collect();
        let shape_b: Vec<(u16, u16, u16)> =
            b.iter().map(|s| (s.window.x_start, s.window.x_end, s.len)).collect();
        assert_eq!(shape_a, shape_b, "pages {index} and {twin_index}");
    }
}
