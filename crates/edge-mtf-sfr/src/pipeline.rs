use edge_mtf_core::GrayImage;
use log::{debug, info};

#[cfg(feature = "tracing")]
use tracing::instrument;

use crate::{
    apply_window, binarize, compute_mtf, crop_lsf, cut_point, detect_orientation, dif_level,
    draw_edge_line, ensure_binarized, find_dynamic_range, fit_edge_line, hamming_window,
    line_spread, locate_peak_window, normalize, oversampling_factor, resample_segments,
    run_noise_filter, summed_esf, DynamicRange, EdgeLine, EsfSegments, MtfError, MtfParams,
    Orientation, PeakWindow,
};

/// Brightness of the fitted edge overlay.
const OVERLAY_BRIGHTNESS: u8 = 255;

/// Intermediate and final products of one measurement run.
#[derive(Clone, Debug)]
pub struct MtfMeasurement {
    pub orientation: Orientation,
    /// Input after geometric normalization; the ESF is sampled from it.
    pub oriented: GrayImage,
    pub range: DynamicRange,
    pub cut_point: u8,
    /// Binarized and despeckled image with the fitted edge drawn in.
    pub processed: GrayImage,
    pub edge_line: EdgeLine,
    pub oversampling: usize,
    pub esf_segments: EsfSegments,
    pub summed_esf: Vec<f32>,
    pub dif_level: usize,
    pub lsf: Vec<f32>,
    pub peak: PeakWindow,
    pub lsf_threshold: Vec<f32>,
    pub lsf_windowed: Vec<f32>,
    pub mtf: Vec<f32>,
}

/// Slanted-edge measurement with fixed parameters.
pub struct MtfPipeline {
    params: MtfParams,
}

impl MtfPipeline {
    pub fn new(params: MtfParams) -> Self {
        Self { params }
    }

    #[inline]
    pub fn params(&self) -> &MtfParams {
        &self.params
    }

    /// Run every stage on `img`, stopping at the first failing one.
    #[cfg_attr(
        feature = "tracing",
        instrument(level = "info", skip(self, img), fields(width = img.width, height = img.height))
    )]
    pub fn run(&self, img: &GrayImage) -> Result<MtfMeasurement, MtfError> {
        let p = &self.params;

        let orientation = detect_orientation(&img.view())?;
        let oriented = normalize(img, orientation)?;
        info!("orientation {orientation:?}");

        let range = find_dynamic_range(&oriented.histogram(), p.range.percent)?;
        let cut_point = cut_point(&range, p.binarize.percent_sensitivity);
        let binary = binarize(&oriented, &range, p.binarize.percent_sensitivity);
        ensure_binarized(&binary)?;

        let cleaned = run_noise_filter(&binary, &p.noise)?;
        let columns = cleaned.view().black_count_per_column();
        let edge_line = fit_edge_line(&columns)?;
        info!(
            "edge fit y = {:.5} x + {:.3}",
            edge_line.slope, edge_line.intercept
        );
        let processed = draw_edge_line(&cleaned, &edge_line, OVERLAY_BRIGHTNESS);

        let oversampling = oversampling_factor(&edge_line)?;
        let esf_segments = resample_segments(&oriented, oversampling)?;
        let summed_esf = summed_esf(&oriented, oversampling)?;
        let dif_level = dif_level(oversampling, &p.lsf);
        let lsf = line_spread(&summed_esf, dif_level)?;
        let peak = locate_peak_window(&lsf, &p.lsf)?;
        let lsf_threshold = crop_lsf(&lsf, &peak)?;
        debug!(
            "oversampling {oversampling}, ESF {} samples, LSF {} samples, window {}",
            summed_esf.len(),
            lsf.len(),
            lsf_threshold.len()
        );

        let window = hamming_window(lsf_threshold.len());
        let lsf_windowed = apply_window(&lsf_threshold, &window);
        let mtf = compute_mtf(&lsf_windowed, oversampling, &p.mtf);
        info!("MTF computed at {} frequencies", mtf.len());

        Ok(MtfMeasurement {
            orientation,
            oriented,
            range,
            cut_point,
            processed,
            edge_line,
            oversampling,
            esf_segments,
            summed_esf,
            dif_level,
            lsf,
            peak,
            lsf_threshold,
            lsf_windowed,
            mtf,
        })
    }
}
