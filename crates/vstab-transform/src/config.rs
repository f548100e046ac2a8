use serde::{Deserialize, Serialize};

use crate::interpolation::InterpolationMode;
use crate::parallel::ExecutionStrategy;

/// Fill value of every channel of a packed frame under [`BorderPolicy::FillBlack`].
pub const PACKED_FILL: u8 = 16;

/// What destination pixels without a source counterpart become.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderPolicy {
    /// Fade towards black: `0` on the luma plane and `0x80` on the chroma planes.
    FillBlack,
    /// Fade towards the destination's current content, typically the
    /// previous output frame.
    #[default]
    ExtendEdge,
}

impl BorderPolicy {
    /// Default sample for a planar plane, `None` when the destination sample
    /// itself is the default.
    pub fn fill_value(self, plane: usize) -> Option<u8> {
        match self {
            BorderPolicy::FillBlack if plane == 0 => Some(0),
            BorderPolicy::FillBlack => Some(0x80),
            BorderPolicy::ExtendEdge => None,
        }
    }

    /// Default sample for the channels of a packed frame.
    pub fn packed_fill_value(self) -> Option<u8> {
        match self {
            BorderPolicy::FillBlack => Some(PACKED_FILL),
            BorderPolicy::ExtendEdge => None,
        }
    }
}

/// Settings of a [`Transformer`](crate::Transformer).
///
/// Missing fields take their default when deserializing.
///
/// # Examples
///
/// ```
/// use vstab_transform::{BorderPolicy, InterpolationMode, TransformConfig};
///
/// let config = TransformConfig::default()
///     .with_border(BorderPolicy::FillBlack)
///     .with_interpolation(InterpolationMode::Bicubic);
///
/// assert_eq!(config.threads, 0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Handling of pixels mapped from outside the source frame.
    pub border: BorderPolicy,
    /// Interpolation mode.
    pub interpolation: InterpolationMode,
    /// Number of worker threads, `0` to pick automatically.
    pub threads: usize,
    /// Serial or parallel row processing.
    pub execution: ExecutionStrategy,
}

impl TransformConfig {
    /// Set the border policy.
    pub fn with_border(mut self, border: BorderPolicy) -> Self {
        self.border = border;
        self
    }

    /// Set the interpolation mode.
    pub fn with_interpolation(mut self, interpolation: InterpolationMode) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Set the number of worker threads.
    pub fn with_threads(mut self, threads: usize) -> Self {
        self.threads = threads;
        self
    }

    /// Set the execution strategy.
    pub fn with_execution(mut self, execution: ExecutionStrategy) -> Self {
        self.execution = execution;
        self
    }
}
