use edge_mtf_core::{CoreError, GrayImage};

/// Errors returned by the measurement stages.
#[derive(thiserror::Error, Debug)]
pub enum MtfError {
    #[error("edge orientation is ambiguous (quadrant means {means:?})")]
    AmbiguousOrientation { means: [f32; 4] },

    #[error("histogram crossing of level {level} not found")]
    RangeNotFound { level: u32 },

    #[error("binarization left {residual} non-binary pixels")]
    NotBinarized {
        residual: usize,
        /// Thresholded image, kept for diagnostics.
        image: Box<GrayImage>,
    },

    #[error("edge line fit is degenerate ({samples} column samples)")]
    DegenerateFit { samples: usize },

    #[error("edge slope {slope} gives no usable oversampling factor")]
    InvalidOversampling { slope: f64 },

    #[error("edge spread function is empty (width={width}, height={height}, oversampling={oversampling})")]
    EmptyEsf {
        width: usize,
        height: usize,
        oversampling: usize,
    },

    #[error("line spread function is empty")]
    EmptyLsf,

    #[error("LSF crop window [{left}, {right}) does not fit into 0..{len}")]
    LsfWindowOutOfRange { left: i64, right: i64, len: usize },

    #[error(transparent)]
    Core(#[from] CoreError),
}
