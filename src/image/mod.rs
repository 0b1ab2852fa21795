pub mod buffer;
pub mod io;
pub mod pixel;
pub mod view;

pub use self::buffer::{u8_to_f32, Image, ImageF32, ImageS16, ImageS32, ImageU8};
pub use self::pixel::{Pixel, PixelKind};
pub use self::view::{ImageView, ImageViewMut};
