use anyhow::Context;
use image::RgbaImage;

use crate::foundation::error::{InterfacerError, InterfacerResult};

/// Decode any format the `image` crate recognises into straight RGBA8.
pub fn decode_image(bytes: &[u8]) -> InterfacerResult<RgbaImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    if rgba.width() == 0 || rgba.height() == 0 {
        return Err(InterfacerError::asset("decoded image has zero size"));
    }
    Ok(rgba)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
