//! Policies for destination pixels whose mapped source coordinate falls
//! outside the source image.
use crate::image::ImageView;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BorderPolicy {
    /// Leave the destination pixel exactly as the caller provided it.
    #[default]
    Skip,
    /// Fill with zero.
    Zero,
    /// Extend the nearest edge pixel outward.
    Extend,
}

impl BorderPolicy {
    /// Resolve an outside coordinate to a fill value, or `None` for `Skip`.
    pub(crate) fn outside(&self, src: &ImageView<'_, f32>, x: i32, y: i32) -> Option<f32> {
        match self {
            Self::Skip => None,
            Self::Zero => Some(0.0),
            Self::Extend => {
                let xi = x.clamp(0, src.w as i32 - 1) as usize;
                let yi = y.clamp(0, src.h as i32 - 1) as usize;
                Some(src.get(xi, yi))
            }
        }
    }
}
