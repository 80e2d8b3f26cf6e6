//! End-to-end helpers working on image files.

use std::path::{Path, PathBuf};

use ::image::{ImageBuffer, ImageReader, Luma};
use log::{info, warn};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::core::{CoreError, GrayImage, GrayImageView};
use crate::export::{export_1d_logged, export_2d_logged};
use crate::sfr::{MtfError, MtfIoError, MtfMeasurement, MtfParams, MtfPipeline, MtfReport};

/// Errors produced by the file-level helpers.
#[derive(thiserror::Error, Debug)]
pub enum MeasureError {
    #[error("invalid grayscale image dimensions (width={width}, height={height})")]
    InvalidGrayDimensions { width: u32, height: u32 },

    #[error(transparent)]
    Image(#[from] ::image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] MtfIoError),

    #[error(transparent)]
    Mtf(#[from] MtfError),

    #[error(transparent)]
    Core(#[from] CoreError),
}

/// Convert an `image::GrayImage` into the lightweight core view type.
pub fn gray_view(img: &::image::GrayImage) -> GrayImageView<'_> {
    GrayImageView {
        width: img.width() as usize,
        height: img.height() as usize,
        data: img.as_raw(),
    }
}

/// Copy a row-major buffer into an owned core image.
pub fn gray_image_from_slice(
    width: u32,
    height: u32,
    pixels: &[u8],
) -> Result<GrayImage, MeasureError> {
    if width == 0 || height == 0 {
        return Err(MeasureError::InvalidGrayDimensions { width, height });
    }
    Ok(GrayImage::from_raw(
        width as usize,
        height as usize,
        pixels.to_vec(),
    )?)
}

/// Decode any supported image file and convert it to 8-bit luma.
pub fn load_gray(path: impl AsRef<Path>) -> Result<GrayImage, MeasureError> {
    let img = ImageReader::open(path)?.decode()?.to_luma8();
    gray_image_from_slice(img.width(), img.height(), img.as_raw())
}

/// Encode `img` with the format implied by the file extension.
pub fn save_gray(path: impl AsRef<Path>, img: &GrayImage) -> Result<(), MeasureError> {
    let (width, height) = (img.width as u32, img.height as u32);
    let buf = ImageBuffer::<Luma<u8>, _>::from_raw(width, height, img.data.clone())
        .ok_or(MeasureError::InvalidGrayDimensions { width, height })?;
    buf.save(path)?;
    Ok(())
}

/// Load `path` and run the full measurement.
#[cfg_attr(feature = "tracing", instrument(level = "info", skip(path, params), fields(path = %path.as_ref().display())))]
pub fn measure_file(
    path: impl AsRef<Path>,
    params: &MtfParams,
) -> Result<MtfMeasurement, MeasureError> {
    let img = load_gray(path)?;
    Ok(MtfPipeline::new(params.clone()).run(&img)?)
}

/// File names of the measurement outputs inside one directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub sum_esf: PathBuf,
    pub lsf_threshold: PathBuf,
    pub mtf: PathBuf,
    pub lsf_windowed: PathBuf,
    pub esf_segments: PathBuf,
    /// Processed image with the fitted edge, `<stem>_changed.<ext>`.
    pub changed_image: PathBuf,
    pub original_image: PathBuf,
    pub binarized_error: PathBuf,
    pub report: PathBuf,
}

impl ArtifactPaths {
    pub fn new(output_dir: impl AsRef<Path>, image_path: impl AsRef<Path>) -> Self {
        let dir = output_dir.as_ref();
        let image_path = image_path.as_ref();
        let stem = image_path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "image".to_string());
        let changed = match image_path.extension() {
            Some(ext) => format!("{stem}_changed.{}", ext.to_string_lossy()),
            None => format!("{stem}_changed.bmp"),
        };
        Self {
            sum_esf: dir.join("SumESF.csv"),
            lsf_threshold: dir.join("LSFThreshold.csv"),
            mtf: dir.join("MTF.csv"),
            lsf_windowed: dir.join("LSFThresholdw.csv"),
            esf_segments: dir.join("ESFSegments.csv"),
            changed_image: dir.join(changed),
            original_image: dir.join("original_source.bmp"),
            binarized_error: dir.join("BinarizedError.bmp"),
            report: dir.join("mtf_report.json"),
        }
    }

    /// The four tables handed to the charting tool, in its argument order.
    pub fn charts(&self) -> [&Path; 4] {
        [
            &self.sum_esf,
            &self.lsf_threshold,
            &self.mtf,
            &self.lsf_windowed,
        ]
    }
}

/// Write tables, images and the JSON report of a successful measurement.
///
/// Table export failures are logged and skipped; image and report failures
/// are returned.
pub fn write_artifacts(
    paths: &ArtifactPaths,
    m: &MtfMeasurement,
    report: &MtfReport,
    dump_segments: bool,
) -> Result<(), MeasureError> {
    export_1d_logged(&paths.sum_esf, &m.summed_esf);
    export_1d_logged(&paths.lsf_threshold, &m.lsf_threshold);
    export_1d_logged(&paths.mtf, &m.mtf);
    export_1d_logged(&paths.lsf_windowed, &m.lsf_windowed);
    if dump_segments {
        export_2d_logged(&paths.esf_segments, &m.esf_segments.segments);
    }

    save_gray(&paths.changed_image, &m.processed)?;
    save_gray(&paths.original_image, &m.oriented)?;
    report.write_json(&paths.report)?;
    info!("artifacts written next to {}", paths.report.display());
    Ok(())
}

/// Measure one image file and write every artifact into `output_dir`.
///
/// A binarization failure writes the offending image to
/// `BinarizedError.bmp` before the error is returned. The JSON report is
/// written in both cases.
pub fn measure_to_dir(
    image_path: impl AsRef<Path>,
    output_dir: impl AsRef<Path>,
    params: &MtfParams,
    dump_segments: bool,
) -> Result<(ArtifactPaths, MtfMeasurement), MeasureError> {
    let image_path = image_path.as_ref();
    let paths = ArtifactPaths::new(output_dir, image_path);
    let mut report = MtfReport::new(image_path.to_string_lossy());

    let img = load_gray(image_path)?;
    match MtfPipeline::new(params.clone()).run(&img) {
        Ok(m) => {
            report.set_measurement(&m);
            write_artifacts(&paths, &m, &report, dump_segments)?;
            Ok((paths, m))
        }
        Err(err) => {
            report.set_error(&err);
            if let MtfError::NotBinarized { image, .. } = &err {
                save_gray(&paths.binarized_error, image)?;
                warn!(
                    "binarization failed, thresholded image saved to {}",
                    paths.binarized_error.display()
                );
            }
            if let Err(io_err) = report.write_json(&paths.report) {
                warn!("failed to write {}: {io_err}", paths.report.display());
            }
            Err(err.into())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_names_follow_input_stem() {
        let paths = ArtifactPaths::new("/tmp/out", "shots/edge_01.png");
        assert_eq!(
            paths.changed_image,
            PathBuf::from("/tmp/out/edge_01_changed.png")
        );
        assert_eq!(paths.sum_esf, PathBuf::from("/tmp/out/SumESF.csv"));
        assert_eq!(paths.charts()[3], Path::new("/tmp/out/LSFThresholdw.csv"));

        let bare = ArtifactPaths::new(".", "edge");
        assert_eq!(bare.changed_image, PathBuf::from("./edge_changed.bmp"));
    }

    #[test]
    fn gray_round_trip_through_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("g.png");
        let img = GrayImage::from_fn(7, 5, |x, y| (x * 30 + y) as u8);
        save_gray(&path, &img).unwrap();
        assert_eq!(load_gray(&path).unwrap(), img);
    }

    #[test]
    fn zero_sized_buffer_is_rejected() {
        assert!(matches!(
            gray_image_from_slice(0, 4, &[]),
            Err(MeasureError::InvalidGrayDimensions { .. })
        ));
        assert!(matches!(
            gray_image_from_slice(2, 2, &[1, 2, 3]),
            Err(MeasureError::Core(CoreError::InvalidGrid { .. }))
        ));
    }

    #[test]
    fn view_shares_image_buffer() {
        let img = ::image::GrayImage::from_fn(4, 3, |x, y| Luma([(x + 4 * y) as u8]));
        let view = gray_view(&img);
        assert_eq!((view.width, view.height), (4, 3));
        assert_eq!(view.get(3, 2), 11);
    }
}
