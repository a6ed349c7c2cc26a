//! LED control — colors, bitmaps and one-shot lighting operations.

mod bitmap;
mod color;
mod ops;

pub use bitmap::{BITMAP_HEIGHT, BITMAP_SIZE, BITMAP_WIDTH, LightingBitmap};
pub use color::{LinearColor, RgbPercent, format_color, parse_color};
pub use ops::{
    exclude_keys_from_bitmap, flash_lighting, flash_lighting_for_key, get_config_option_bool,
    get_config_option_color, get_config_option_number, pulse_lighting, pulse_lighting_for_key,
    restore_lighting, restore_lighting_for_key, save_lighting, save_lighting_for_key,
    set_config_option_label, set_lighting, set_lighting_for_key, set_lighting_from_bitmap,
    set_target_device, stop_effects, stop_effects_for_key,
};
