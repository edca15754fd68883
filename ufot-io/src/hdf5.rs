//! APS 32-ID / Data Exchange HDF5 projection datasets.
//!
//! Layout: `/exchange/data` holds the `(frames, rows, columns)` projection
//! stack, `/exchange/data_white` the flat fields, `/exchange/data_dark` the
//! dark fields and `/exchange/theta` the rotation angles. Frames are read
//! one at a time with hyperslab selections.

use std::path::Path;

use hdf5::{Dataset, File};
use ndarray::s;
use ufot_core::Frame;

use crate::projection::ProjectionSource;
use crate::{Error, Result};

/// Projection stack dataset path.
pub const DATA_PATH: &str = "exchange/data";
/// Flat-field stack dataset path.
pub const WHITE_PATH: &str = "exchange/data_white";
/// Dark-field stack dataset path.
pub const DARK_PATH: &str = "exchange/data_dark";
/// Rotation angle dataset path.
pub const THETA_PATH: &str = "exchange/theta";

/// An open Data Exchange file.
pub struct Aps32idDataset {
    file: File,
    data: Dataset,
    white: Option<Dataset>,
    theta: Option<Vec<f32>>,
    dims: [usize; 3],
}

impl Aps32idDataset {
    /// Open a Data Exchange file and validate its projection stack.
    ///
    /// # Errors
    /// Returns an error if the file cannot be opened, `/exchange/data` is
    /// missing, or the stack is not 3-D.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path)?;
        let data = file.dataset(DATA_PATH)?;
        let dims = dataset_dims(&data, DATA_PATH)?;

        let white = file.dataset(WHITE_PATH).ok();
        let theta = match file.dataset(THETA_PATH) {
            Ok(dataset) => Some(dataset.read_raw::<f32>()?),
            Err(_) => None,
        };

        Ok(Self {
            file,
            data,
            white,
            theta,
            dims,
        })
    }

    /// Shape of the projection stack as `[frames, rows, columns]`.
    #[must_use]
    pub fn dims(&self) -> [usize; 3] {
        self.dims
    }
}

impl ProjectionSource for Aps32idDataset {
    fn frame_count(&self) -> usize {
        self.dims[0]
    }

    fn read_projection(&self, index: usize) -> Result<Frame> {
        let count = self.frame_count();
        if index >= count {
            return Err(Error::FrameOutOfRange { index, count });
        }
        read_frame(&self.data, index)
    }

    fn read_flat(&self) -> Result<Frame> {
        let white = self
            .white
            .as_ref()
            .ok_or_else(|| Error::InvalidFormat(format!("missing {WHITE_PATH}")))?;
        let count = dataset_dims(white, WHITE_PATH)?[0];
        if count == 0 {
            return Err(Error::InvalidFormat(format!("{WHITE_PATH} is empty")));
        }
        read_frame(white, 0)
    }

    fn theta(&self, index: usize) -> Option<f32> {
        self.theta.as_ref().and_then(|t| t.get(index).copied())
    }

    fn dark_count(&self) -> usize {
        self.file
            .dataset(DARK_PATH)
            .ok()
            .and_then(|ds| ds.shape().first().copied())
            .unwrap_or(0)
    }
}

fn dataset_dims(dataset: &Dataset, name: &str) -> Result<[usize; 3]> {
    match dataset.shape().as_slice() {
        &[frames, rows, columns] => Ok([frames, rows, columns]),
        other => Err(Error::InvalidFormat(format!(
            "{name} must be 3-D, got shape {other:?}"
        ))),
    }
}

/// Read frame `index` of a 3-D dataset, converting the sample type to f32.
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
fn read_frame(dataset: &Dataset, index: usize) -> Result<Frame> {
    if let Ok(frame) = dataset.read_slice_2d::<f32, _>(s![index, .., ..]) {
        return Ok(frame);
    }
    if let Ok(frame) = dataset.read_slice_2d::<u16, _>(s![index, .., ..]) {
        return Ok(frame.mapv(f32::from));
    }
    if let Ok(frame) = dataset.read_slice_2d::<f64, _>(s![index, .., ..]) {
        return Ok(frame.mapv(|v| v as f32));
    }
    if let Ok(frame) = dataset.read_slice_2d::<u8, _>(s![index, .., ..]) {
        return Ok(frame.mapv(f32::from));
    }
    if let Ok(frame) = dataset.read_slice_2d::<i16, _>(s![index, .., ..]) {
        return Ok(frame.mapv(f32::from));
    }
    if let Ok(frame) = dataset.read_slice_2d::<u32, _>(s![index, .., ..]) {
        return Ok(frame.mapv(|v| v as f32));
    }
    Err(Error::UnsupportedDataType(format!(
        "cannot read {} as f32, u16, f64, u8, i16 or u32",
        dataset.name()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::{Array1, Array3};
    use tempfile::NamedTempFile;

    fn write_dataset(path: &Path, frames: usize, with_white: bool) {
        let file = File::create(path).unwrap();
        let exchange = file.create_group("exchange").unwrap();
        let data = Array3::from_shape_fn((frames, 3, 4), |(i, r, c)| {
            u16::try_from(i * 100 + r * 10 + c).unwrap()
        });
        exchange
            .new_dataset_builder()
            .with_data(&data)
            .create("data")
            .unwrap();
        if with_white {
            let white = Array3::<f32>::from_elem((2, 3, 4), 2.0);
            exchange
                .new_dataset_builder()
                .with_data(&white)
                .create("data_white")
                .unwrap();
        }
        let dark = Array3::<u16>::zeros((1, 3, 4));
        exchange
            .new_dataset_builder()
            .with_data(&dark)
            .create("data_dark")
            .unwrap();
        #[allow(clippy::cast_precision_loss)]
        let theta = Array1::from_shape_fn(frames, |i| i as f32);
        exchange
            .new_dataset_builder()
            .with_data(&theta)
            .create("theta")
            .unwrap();
    }

    #[test]
    fn test_open_reads_dims_and_frames() {
        let file = NamedTempFile::new().unwrap();
        write_dataset(file.path(), 10, true);

        let dataset = Aps32idDataset::open(file.path()).unwrap();
        assert_eq!(dataset.dims(), [10, 3, 4]);
        assert_eq!(dataset.frame_count(), 10);
        assert_eq!(dataset.dark_count(), 1);

        let frame = dataset.read_projection(5).unwrap();
        assert_eq!(frame.shape(), &[3, 4]);
        assert!((frame[[2, 3]] - 523.0).abs() < f32::EPSILON);

        let flat = dataset.read_flat().unwrap();
        assert!(flat.iter().all(|&v| (v - 2.0).abs() < f32::EPSILON));
        assert_eq!(dataset.theta(3), Some(3.0));
    }

    #[test]
    fn test_out_of_range_and_missing_flat() {
        let file = NamedTempFile::new().unwrap();
        write_dataset(file.path(), 2, false);

        let dataset = Aps32idDataset::open(file.path()).unwrap();
        assert!(matches!(
            dataset.read_projection(2),
            Err(Error::FrameOutOfRange { index: 2, count: 2 })
        ));
        assert!(matches!(dataset.read_flat(), Err(Error::InvalidFormat(_))));
    }

    #[test]
    fn test_open_missing_data() {
        let file = NamedTempFile::new().unwrap();
        File::create(file.path()).unwrap();
        assert!(matches!(
            Aps32idDataset::open(file.path()),
            Err(Error::Hdf5(_))
        ));
    }
}
