//! Row and column reflections.

use crate::pixel::PixelBuffer;

/// Swap row `i` with row `height - 1 - i` for the top half.
///
/// The middle row of an odd-height buffer stays put.
pub(super) fn reflect_y(buf: &mut PixelBuffer) {
    let row_len = buf.row_len();
    let height = buf.height() as usize;
    let data = buf.as_bytes_mut();
    for i in 0..height / 2 {
        let opposite = height - 1 - i;
        // Rows i and opposite are disjoint since i < height / 2 <= opposite.
        let (head, tail) = data.split_at_mut(opposite * row_len);
        head[i * row_len..(i + 1) * row_len].swap_with_slice(&mut tail[..row_len]);
    }
}

/// Swap pixel `j` with pixel `width - 1 - j` in every row.
///
/// The middle column of an odd-width buffer stays put.
pub(super) fn reflect_x(buf: &mut PixelBuffer) {
    for row in buf.rows_mut() {
        row.reverse();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec::Vec;

    fn numbered(width: u32, height: u32) -> PixelBuffer {
        let data: Vec<u8> = (0..width * height)
            .flat_map(|i| [i as u8, (i >> 8) as u8, 0xAA])
            .collect();
        PixelBuffer::from_bgr_bytes(data, width, height).unwrap()
    }

    #[test]
    fn reflect_y_swaps_rows() {
        let mut buf = numbered(2, 3);
        let before = buf.clone();
        reflect_y(&mut buf);
        assert_eq!(buf.row(0), before.row(2));
        assert_eq!(buf.row(1), before.row(1));
        assert_eq!(buf.row(2), before.row(0));
    }

    #[test]
    fn reflect_x_three_by_three() {
        let mut buf = numbered(3, 3);
        let before = buf.clone();
        reflect_x(&mut buf);
        for y in 0..3 {
            assert_eq!(buf.pixel(0, y), before.pixel(2, y));
            assert_eq!(buf.pixel(1, y), before.pixel(1, y));
            assert_eq!(buf.pixel(2, y), before.pixel(0, y));
        }
    }

    #[test]
    fn reflections_are_involutions() {
        for (w, h) in [(1, 1), (1, 4), (4, 1), (2, 2), (3, 5), (6, 7), (5, 6)] {
            let original = numbered(w, h);

            let mut buf = original.clone();
            reflect_y(&mut buf);
            reflect_y(&mut buf);
            assert_eq!(buf, original, "reflect_y {w}x{h}");

            let mut buf = original.clone();
            reflect_x(&mut buf);
            reflect_x(&mut buf);
            assert_eq!(buf, original, "reflect_x {w}x{h}");
        }
    }

    #[test]
    fn reflect_y_even_height_moves_every_row() {
        let mut buf = numbered(3, 4);
        let before = buf.clone();
        reflect_y(&mut buf);
        for y in 0..4 {
            assert_eq!(buf.row(y), before.row(3 - y));
        }
    }
}
