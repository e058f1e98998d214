mod hsv;
mod utils;

use smart_leds::RGB8;

pub use hsv::{Hsv, hsv2rgb};
pub use utils::{BLACK, add_colors, blend_colors, rgb_from_u32, scale_color};

pub type Rgb = RGB8;
