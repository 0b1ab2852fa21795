//! Dense separable box-filter convolution.
//!
//! A box filter is equivalent to convolving a kernel with all ones, which
//! admits an incremental recurrence: the window sum is updated by removing
//! the leaving element and adding the entering one, so each row costs
//! O(width) instead of O(width * kernel).
use crate::image::{ImageView, ImageViewMut};
use crate::kernel::{AccumCast, Accumulate};

/// Horizontal box convolution with a running sum.
///
/// Output columns `radius .. w-radius` are written; `include_border` selects
/// whether border rows (`y < radius`, `y >= h-radius`) are processed too.
/// Positions outside the written band keep whatever the caller put there.
/// Rows narrower than the window produce no output.
///
/// # Panics
/// Panics if input and output dimensions differ.
pub fn horizontal<S, D>(
    input: &ImageView<'_, S>,
    output: &mut ImageViewMut<'_, D>,
    radius: usize,
    include_border: bool,
) where
    S: Accumulate,
    D: AccumCast<S::Accum>,
{
    assert!(
        input.w == output.w && input.h == output.h,
        "input and output dimensions must match"
    );

    let kernel_width = 2 * radius + 1;
    if kernel_width > input.w {
        return;
    }

    let start_y = if include_border { 0 } else { radius };
    let end_y = if include_border {
        input.h
    } else {
        input.h.saturating_sub(radius)
    };

    for y in start_y..end_y {
        let mut index_in = input.stride * y;
        let mut index_out = output.stride * y + radius;

        let mut total = S::Accum::default();

        let mut index_end = index_in + kernel_width;
        while index_in < index_end {
            total += input.data[index_in].widen();
            index_in += 1;
        }
        output.data[index_out] = D::from_accum(total);
        index_out += 1;

        index_end = index_in + input.w - kernel_width;
        while index_in < index_end {
            total = total - input.data[index_in - kernel_width].widen()
                + input.data[index_in].widen();

            output.data[index_out] = D::from_accum(total);
            index_out += 1;
            index_in += 1;
        }
    }
}

/// Vertical box convolution with a running sum, in two phases.
///
/// Phase one seeds output row `radius` by brute-force column sums, left to
/// right. Phase two walks the remaining rows top to bottom and derives each
/// value from the previously *written* output row:
/// `out[y][x] = out[y-1][x] - in[y+r-k][x] + in[y+r][x]`. Reusing the output
/// as the accumulator history keeps the access order cache friendly and needs
/// no separate accumulator row. `include_border` widens only the column
/// range; rows outside `radius .. h-radius` are never produced by this pass.
///
/// # Panics
/// Panics if input and output dimensions differ.
pub fn vertical<S, D>(
    input: &ImageView<'_, S>,
    output: &mut ImageViewMut<'_, D>,
    radius: usize,
    include_border: bool,
) where
    S: Accumulate,
    D: AccumCast<S::Accum>,
{
    assert!(
        input.w == output.w && input.h == output.h,
        "input and output dimensions must match"
    );

    let kernel_width = 2 * radius + 1;
    if kernel_width > input.h {
        return;
    }

    let start_x = if include_border { 0 } else { radius };
    let end_x = if include_border {
        input.w
    } else {
        input.w.saturating_sub(radius)
    };
    if start_x >= end_x {
        return;
    }

    let back_step = kernel_width * input.stride;

    for x in start_x..end_x {
        let mut index_in = x;
        let index_out = output.stride * radius + x;

        let mut total = S::Accum::default();
        let index_end = index_in + input.stride * kernel_width;
        while index_in < index_end {
            total += input.data[index_in].widen();
            index_in += input.stride;
        }

        output.data[index_out] = D::from_accum(total);
    }

    // change the order it is processed in to reduce cache misses
    for y in (radius + 1)..(input.h - radius) {
        let mut index_in = (y + radius) * input.stride + start_x;
        let mut index_out = y * output.stride + start_x;

        for _ in start_x..end_x {
            let total = output.data[index_out - output.stride].into_accum()
                - input.data[index_in - back_step].widen()
                + input.data[index_in].widen();

            output.data[index_out] = D::from_accum(total);
            index_in += 1;
            index_out += 1;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image::{Image, ImageS16, ImageS32, ImageU8};

    #[test]
    fn horizontal_sliding_sums_radius_one() {
        // probe row embedded between two border rows that stay unprocessed
        let mut data = vec![0u8; 10];
        data.extend([1, 2, 3, 4, 5, 6, 7, 8, 9, 10]);
        data.extend([0u8; 10]);
        let input = ImageU8::from_vec(10, 3, data);
        let mut output = ImageS32::new(10, 3);

        horizontal(&input.as_view(), &mut output.as_view_mut(), 1, false);

        assert_eq!(&output.row(1)[1..9], &[6, 9, 12, 15, 18, 21, 24, 27]);
        assert_eq!(output.get(0, 1), 0);
        assert_eq!(output.get(9, 1), 0);
        assert!(output.row(0).iter().all(|&v| v == 0), "border row untouched");
    }

    #[test]
    fn horizontal_border_rows_follow_flag() {
        let input = ImageU8::from_vec(3, 3, vec![1; 9]);
        let mut output = ImageS32::new(3, 3);

        horizontal(&input.as_view(), &mut output.as_view_mut(), 1, false);
        assert_eq!(output.get(1, 0), 0, "border row untouched");
        assert_eq!(output.get(1, 1), 3);

        let mut output = ImageS32::new(3, 3);
        horizontal(&input.as_view(), &mut output.as_view_mut(), 1, true);
        assert_eq!(output.get(1, 0), 3, "border row processed");
        assert_eq!(output.get(1, 2), 3);
    }

    #[test]
    fn vertical_matches_brute_force_columns() {
        let w = 7;
        let h = 9;
        let radius = 2;
        let data: Vec<u8> = (0..w * h).map(|i| ((i * 37 + 11) % 251) as u8).collect();
        let input = ImageU8::from_vec(w, h, data);
        let mut output = ImageS32::new(w, h);

        vertical(&input.as_view(), &mut output.as_view_mut(), radius, false);

        for y in radius..h - radius {
            for x in radius..w - radius {
                let mut expected = 0i32;
                for dy in 0..(2 * radius + 1) {
                    expected += input.get(x, y - radius + dy) as i32;
                }
                assert_eq!(output.get(x, y), expected, "mismatch at ({x},{y})");
            }
        }
    }

    #[test]
    fn vertical_include_border_widens_columns_only() {
        let input = ImageU8::from_vec(5, 5, vec![2; 25]);
        let mut output = ImageS32::new(5, 5);

        vertical(&input.as_view(), &mut output.as_view_mut(), 1, true);

        // full column range on processed rows
        assert_eq!(output.get(0, 1), 6);
        assert_eq!(output.get(4, 3), 6);
        // rows outside radius..h-radius are never produced by the vertical pass
        assert_eq!(output.get(2, 0), 0);
        assert_eq!(output.get(2, 4), 0);
    }

    #[test]
    fn narrowing_cast_uses_bit_width_semantics() {
        let input = ImageU8::from_vec(3, 1, vec![255, 255, 255]);
        let mut output = ImageS16::new(3, 1);

        horizontal(&input.as_view(), &mut output.as_view_mut(), 1, true);
        assert_eq!(output.get(1, 0), 765);
    }

    #[test]
    fn radius_zero_copies_values() {
        let input = Image::<f32>::from_vec(4, 2, vec![1.5, 2.5, 3.5, 4.5, 5.5, 6.5, 7.5, 8.5]);
        let mut output = Image::<f32>::new(4, 2);

        horizontal(&input.as_view(), &mut output.as_view_mut(), 0, true);
        assert_eq!(output.data, input.data);
    }

    #[test]
    fn window_wider_than_image_produces_nothing() {
        let input = ImageU8::from_vec(3, 3, vec![9; 9]);
        let mut output = ImageS32::new(3, 3);
        horizontal(&input.as_view(), &mut output.as_view_mut(), 2, true);
        assert!(output.data.iter().all(|&v| v == 0));
    }
}
