//! Single-image readers.
//!
//! Every reader returns a [`Frame`] in `(x, y)` axis order: the decoded
//! row-major `(height, width)` raster is transposed before it is handed out.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use ndarray::Array2;
use rayon::prelude::*;
use tiff::decoder::{Decoder, DecodingResult};
use tiff::ColorType;
use ufot_core::{subsample2, Frame};

use crate::{Error, Result};

/// File extensions handled by [`read_image`].
pub const IMAGE_EXTENSIONS: [&str; 5] = ["tif", "tiff", "png", "jpg", "jpeg"];

/// Read the first page of a grayscale TIFF file.
///
/// # Errors
/// Returns an error if the file cannot be opened or decoded, or if the
/// image is not single-channel.
pub fn read_tiff<P: AsRef<Path>>(path: P) -> Result<Frame> {
    let file = File::open(path)?;
    let mut decoder = Decoder::new(BufReader::new(file))?;

    let (width, height) = decoder.dimensions()?;
    let color_type = decoder.colortype()?;
    if !matches!(color_type, ColorType::Gray(_)) {
        return Err(Error::UnsupportedDataType(format!(
            "TIFF color type {color_type:?}; only grayscale is supported"
        )));
    }

    let pixels = decoding_result_to_f32(decoder.read_image()?)?;
    raster_to_frame(pixels, width, height)
}

#[allow(clippy::cast_precision_loss, unreachable_patterns)]
fn decoding_result_to_f32(result: DecodingResult) -> Result<Vec<f32>> {
    let pixels = match result {
        DecodingResult::U8(data) => data.into_iter().map(f32::from).collect(),
        DecodingResult::U16(data) => data.into_iter().map(f32::from).collect(),
        DecodingResult::U32(data) => data.into_iter().map(|v| v as f32).collect(),
        DecodingResult::U64(data) => data.into_iter().map(|v| v as f32).collect(),
        DecodingResult::I8(data) => data.into_iter().map(f32::from).collect(),
        DecodingResult::I16(data) => data.into_iter().map(f32::from).collect(),
        DecodingResult::I32(data) => data.into_iter().map(|v| v as f32).collect(),
        DecodingResult::I64(data) => data.into_iter().map(|v| v as f32).collect(),
        DecodingResult::F32(data) => data,
        #[allow(clippy::cast_possible_truncation)]
        DecodingResult::F64(data) => data.into_iter().map(|v| v as f32).collect(),
        _ => {
            return Err(Error::UnsupportedDataType(
                "TIFF sample format".to_string(),
            ))
        }
    };
    Ok(pixels)
}

/// Read any supported image file as a grayscale frame.
///
/// TIFF files go through [`read_tiff`] so that 16/32-bit and float samples
/// keep their values. Other formats are decoded with the `image` crate and
/// converted to luminance at their native bit depth.
///
/// # Errors
/// Returns an error if the file cannot be opened or decoded.
pub fn read_image<P: AsRef<Path>>(path: P) -> Result<Frame> {
    let path = path.as_ref();
    if is_tiff(path) {
        return read_tiff(path);
    }

    let decoded = image::open(path)?;
    let (width, height) = (decoded.width(), decoded.height());
    let pixels: Vec<f32> = match decoded {
        DynamicImage::ImageLuma8(_)
        | DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageRgb8(_)
        | DynamicImage::ImageRgba8(_) => decoded
            .to_luma8()
            .into_raw()
            .into_iter()
            .map(f32::from)
            .collect(),
        DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_) => decoded
            .to_luma16()
            .into_raw()
            .into_iter()
            .map(f32::from)
            .collect(),
        _ => decoded.to_luma32f().into_raw(),
    };
    raster_to_frame(pixels, width, height)
}

/// Read every `step`-th file and subsample each image by `step` on both axes.
///
/// Files are decoded in parallel; the result keeps the input order.
///
/// # Errors
/// Returns the first read error, or [`ufot_core::Error::InvalidStep`] for a
/// zero step.
pub fn read_image_stack(paths: &[PathBuf], step: usize) -> Result<Vec<Frame>> {
    let selected = ufot_core::subsample_items(paths, step)?;
    selected
        .par_iter()
        .map(|path| -> Result<Frame> {
            let frame = read_image(path)?;
            Ok(subsample2(&frame, step)?)
        })
        .collect()
}

/// Whether `path` has one of [`IMAGE_EXTENSIONS`] (case-insensitive).
#[must_use]
pub fn is_image_file(path: &Path) -> bool {
    extension_lowercase(path).is_some_and(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
}

fn is_tiff(path: &Path) -> bool {
    extension_lowercase(path).is_some_and(|ext| ext == "tif" || ext == "tiff")
}

fn extension_lowercase(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
}

fn raster_to_frame(pixels: Vec<f32>, width: u32, height: u32) -> Result<Frame> {
    let shape = (height as usize, width as usize);
    let raster = Array2::from_shape_vec(shape, pixels)
        .map_err(|e| Error::InvalidFormat(format!("raster size mismatch: {e}")))?;
    Ok(raster.reversed_axes())
}
