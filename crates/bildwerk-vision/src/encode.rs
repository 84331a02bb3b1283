// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Display encoding: PNG bytes and `data:` URIs for the webview.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bildwerk_core::error::BildwerkError;
use image::{DynamicImage, ImageFormat};

/// Encode a `DynamicImage` as PNG, returning the raw bytes.
pub fn to_png_bytes(image: &DynamicImage) -> Result<Vec<u8>, BildwerkError> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image
        .write_to(&mut cursor, ImageFormat::Png)
        .map_err(|err| BildwerkError::Encode(format!("PNG encoding failed: {}", err)))?;
    Ok(buffer)
}

/// Wrap encoded bytes in a base64 `data:` URI usable as an `img` source.
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Encode an image as PNG and wrap it in a `data:` URI.
pub fn png_data_uri(image: &DynamicImage) -> Result<String, BildwerkError> {
    Ok(data_uri("image/png", &to_png_bytes(image)?))
}
