//! Status item icon decoding
//!
//! The bridge accepts the icon as raw PNG bytes; the platform wants RGBA8.
//! Decoding is split from icon construction so it can be tested without a
//! live status bar.

use crate::error::TrayMenuError;
use tray_icon::Icon;

/// Decode PNG bytes into an RGBA8 buffer plus dimensions.
///
/// Rgb, Grayscale, and GrayscaleAlpha inputs are expanded to RGBA; indexed
/// PNGs are rejected.
pub fn png_to_rgba(data: &[u8]) -> Result<(Vec<u8>, u32, u32), TrayMenuError> {
    if data.is_empty() {
        return Err(TrayMenuError::EmptyIcon);
    }

    let decoder = png::Decoder::new(std::io::Cursor::new(data));
    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    let rgba = expand_to_rgba(info.color_type, buf)?;
    Ok((rgba, info.width, info.height))
}

/// Decode PNG bytes into a platform tray icon.
pub fn icon_from_png(data: &[u8]) -> Result<Icon, TrayMenuError> {
    let (rgba, width, height) = png_to_rgba(data)?;
    Ok(Icon::from_rgba(rgba, width, height)?)
}

fn expand_to_rgba(color_type: png::ColorType, buf: Vec<u8>) -> Result<Vec<u8>, TrayMenuError> {
    let rgba = match color_type {
        png::ColorType::Rgba => buf,
        png::ColorType::Rgb => {
            let mut rgba = Vec::with_capacity(buf.len() / 3 * 4);
            for pixel in buf.chunks(3) {
                rgba.extend_from_slice(pixel);
                rgba.push(255);
            }
            rgba
        }
        png::ColorType::GrayscaleAlpha => {
            let mut rgba = Vec::with_capacity(buf.len() * 2);
            for pixel in buf.chunks(2) {
                rgba.extend_from_slice(&[pixel[0], pixel[0], pixel[0], pixel[1]]);
            }
            rgba
        }
        png::ColorType::Grayscale => {
            let mut rgba = Vec::with_capacity(buf.len() * 4);
            for &gray in &buf {
                rgba.extend_from_slice(&[gray, gray, gray, 255]);
            }
            rgba
        }
        png::ColorType::Indexed => {
            return Err(TrayMenuError::UnsupportedIconFormat("indexed"));
        }
    };
    Ok(rgba)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encode_png(color: png::ColorType, width: u32, height: u32, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        out
    }

    #[test]
    fn rgba_passes_through() {
        let pixels = [1, 2, 3, 4, 5, 6, 7, 8];
        let data = encode_png(png::ColorType::Rgba, 2, 1, &pixels);
        let (rgba, width, height) = png_to_rgba(&data).unwrap();
        assert_eq!((width, height), (2, 1));
        assert_eq!(rgba, pixels);
    }

    #[test]
    fn rgb_gains_opaque_alpha() {
        let data = encode_png(png::ColorType::Rgb, 2, 1, &[10, 20, 30, 40, 50, 60]);
        let (rgba, _, _) = png_to_rgba(&data).unwrap();
        assert_eq!(rgba, [10, 20, 30, 255, 40, 50, 60, 255]);
    }

    #[test]
    fn grayscale_expands_to_rgba() {
        let data = encode_png(png::ColorType::Grayscale, 2, 1, &[0, 128]);
        let (rgba, _, _) = png_to_rgba(&data).unwrap();
        assert_eq!(rgba, [0, 0, 0, 255, 128, 128, 128, 255]);
    }

    #[test]
    fn grayscale_alpha_expands_to_rgba() {
        let data = encode_png(png::ColorType::GrayscaleAlpha, 1, 1, &[200, 100]);
        let (rgba, _, _) = png_to_rgba(&data).unwrap();
        assert_eq!(rgba, [200, 200, 200, 100]);
    }

    #[test]
    fn indexed_rejected() {
        let mut out = Vec::new();
        {
            let mut encoder = png::Encoder::new(&mut out, 1, 1);
            encoder.set_color(png::ColorType::Indexed);
            encoder.set_depth(png::BitDepth::Eight);
            encoder.set_palette(vec![0, 0, 0]);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&[0]).unwrap();
        }
        assert!(matches!(
            png_to_rgba(&out),
            Err(TrayMenuError::UnsupportedIconFormat(_))
        ));
    }

    #[test]
    fn empty_input_rejected() {
        assert!(matches!(png_to_rgba(&[]), Err(TrayMenuError::EmptyIcon)));
    }

    #[test]
    fn garbage_input_rejected() {
        assert!(matches!(
            png_to_rgba(b"not a png"),
            Err(TrayMenuError::Png(_))
        ));
    }
}
