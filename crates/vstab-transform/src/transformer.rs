use std::sync::Arc;

use vstab_frame::{FrameMut, FrameRef};

use crate::accel::{AccelContext, AccelError};
use crate::config::TransformConfig;
use crate::error::TransformError;
use crate::parallel::RowExecutor;
use crate::transform::AffineTransform;
use crate::warp::{warp_packed, warp_planar};

/// Where a resampling ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionPath {
    /// On the CPU, no accelerator involved.
    Cpu,
    /// On the acceleration backend.
    Accelerated,
    /// On the CPU after the acceleration backend was unavailable or failed.
    CpuFallback,
}

/// What a transform call did to the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformOutcome {
    /// Nothing was written.
    Unchanged,
    /// The transform was an identity and the source was copied.
    Copied,
    /// Every destination pixel was resampled.
    Resampled(ExecutionPath),
}

/// Applies affine transforms to frames with a fixed configuration.
///
/// The worker pool is built when the transformer is created and shared by
/// its clones, so per-frame calls do not spawn threads.
///
/// # Examples
///
/// ```
/// use vstab_frame::{Frame, FrameInfo, PixelFormat};
/// use vstab_transform::{AffineTransform, TransformConfig, TransformOutcome, Transformer};
///
/// let info = FrameInfo::new(32, 16, PixelFormat::Yuv420p).unwrap();
/// let src = Frame::filled(info, &[16, 128, 128]).unwrap();
/// let mut dst = Frame::new(info).unwrap();
///
/// let transformer = Transformer::new(TransformConfig::default());
/// let outcome = transformer
///     .apply(&src.view(), &mut dst.view_mut(), &AffineTransform::identity())
///     .unwrap();
///
/// assert_eq!(outcome, TransformOutcome::Copied);
/// assert!(dst.same_content(&src));
/// ```
#[derive(Debug, Clone)]
pub struct Transformer {
    config: TransformConfig,
    executor: Arc<RowExecutor>,
}

impl Transformer {
    /// Create a transformer.
    ///
    /// If the worker pool cannot be built, rows are processed serially; use
    /// [`Transformer::try_new`] to get the error instead.
    pub fn new(config: TransformConfig) -> Self {
        Self::try_new(config).unwrap_or_else(|e| {
            log::warn!("{}, transforming serially", e);
            Self {
                config,
                executor: Arc::new(RowExecutor::serial()),
            }
        })
    }

    /// Create a transformer and its worker pool.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::ThreadPool`] if the worker pool cannot be
    /// created.
    pub fn try_new(config: TransformConfig) -> Result<Self, TransformError> {
        let executor = RowExecutor::new(config.execution, config.threads)?;
        Ok(Self {
            config,
            executor: Arc::new(executor),
        })
    }

    /// The configuration in use.
    pub fn config(&self) -> &TransformConfig {
        &self.config
    }

    /// The row executor shared by every call.
    pub fn executor(&self) -> &RowExecutor {
        &self.executor
    }

    /// Transform `src` into `dst` on the CPU.
    ///
    /// Identity transforms copy the source. Otherwise the packed or planar
    /// driver is chosen from the pixel format.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::FrameMismatch`] if the frames differ in format
    /// or size.
    pub fn apply(
        &self,
        src: &FrameRef<'_>,
        dst: &mut FrameMut<'_>,
        transform: &AffineTransform,
    ) -> Result<TransformOutcome, TransformError> {
        check_frames(src, dst)?;
        if transform.is_identity() {
            return copy_identity(src, dst);
        }
        self.resample(src, dst, transform)?;
        Ok(TransformOutcome::Resampled(ExecutionPath::Cpu))
    }

    /// Like [`Transformer::apply`], but planar frames go to the acceleration
    /// backend first.
    ///
    /// Packed frames always run on the CPU. When the backend is unavailable
    /// or fails, the CPU path runs instead and the outcome reports
    /// [`ExecutionPath::CpuFallback`].
    ///
    /// # Errors
    ///
    /// Same as [`Transformer::apply`]. Backend errors are never returned.
    pub fn apply_accelerated(
        &self,
        accel: &mut AccelContext,
        src: &FrameRef<'_>,
        dst: &mut FrameMut<'_>,
        transform: &AffineTransform,
    ) -> Result<TransformOutcome, TransformError> {
        check_frames(src, dst)?;
        if transform.is_identity() {
            return copy_identity(src, dst);
        }
        if src.info().is_packed() {
            self.resample(src, dst, transform)?;
            return Ok(TransformOutcome::Resampled(ExecutionPath::Cpu));
        }

        match accel.try_transform(src, dst, transform, &self.config) {
            Ok(()) => return Ok(TransformOutcome::Resampled(ExecutionPath::Accelerated)),
            Err(AccelError::Unavailable) => {
                log::debug!("acceleration unavailable, transforming on the CPU");
            }
            Err(e) => {
                log::warn!(
                    "acceleration backend '{}' failed, falling back to the CPU: {}",
                    accel.backend_name(),
                    e
                );
            }
        }
        self.resample(src, dst, transform)?;
        Ok(TransformOutcome::Resampled(ExecutionPath::CpuFallback))
    }

    /// Transform a frame onto itself.
    ///
    /// Resampling reads pixels the same pass has already written, so only
    /// identity transforms are accepted, and they leave the frame as is.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::AliasedFrames`] for any other transform.
    pub fn apply_in_place(
        &self,
        frame: &mut FrameMut<'_>,
        transform: &AffineTransform,
    ) -> Result<TransformOutcome, TransformError> {
        if transform.is_identity() {
            log::debug!("identity transform on {}, nothing to do", frame.info());
            Ok(TransformOutcome::Unchanged)
        } else {
            Err(TransformError::AliasedFrames)
        }
    }

    /// Resample a packed frame, ignoring the identity shortcut.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::UnsupportedLayout`] for planar frames, plus
    /// the errors of [`Transformer::apply`].
    pub fn transform_packed(
        &self,
        src: &FrameRef<'_>,
        dst: &mut FrameMut<'_>,
        transform: &AffineTransform,
    ) -> Result<(), TransformError> {
        check_frames(src, dst)?;
        if !src.info().is_packed() {
            return Err(TransformError::UnsupportedLayout(src.info().format(), "packed"));
        }
        self.resample(src, dst, transform)
    }

    /// Resample a planar frame on the CPU, ignoring the identity shortcut.
    ///
    /// # Errors
    ///
    /// Returns [`TransformError::UnsupportedLayout`] for packed frames, plus
    /// the errors of [`Transformer::apply`].
    pub fn transform_planar(
        &self,
        src: &FrameRef<'_>,
        dst: &mut FrameMut<'_>,
        transform: &AffineTransform,
    ) -> Result<(), TransformError> {
        check_frames(src, dst)?;
        if src.info().is_packed() {
            return Err(TransformError::UnsupportedLayout(src.info().format(), "planar"));
        }
        self.resample(src, dst, transform)
    }

    fn resample(
        &self,
        src: &FrameRef<'_>,
        dst: &mut FrameMut<'_>,
        transform: &AffineTransform,
    ) -> Result<(), TransformError> {
        let executor = self.executor.as_ref();
        log::debug!(
            "transforming {} with {:?}, {}, {:?}",
            src.info(),
            transform,
            self.config.interpolation,
            self.config.border
        );
        if src.info().is_packed() {
            warp_packed(src, dst, transform, self.config.border, executor)?;
        } else {
            warp_planar(
                src,
                dst,
                transform,
                self.config.border,
                self.config.interpolation,
                executor,
            );
        }
        Ok(())
    }
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new(TransformConfig::default())
    }
}

fn check_frames(src: &FrameRef<'_>, dst: &FrameMut<'_>) -> Result<(), TransformError> {
    if src.info() != dst.info() {
        return Err(TransformError::FrameMismatch {
            src: *src.info(),
            dst: *dst.info(),
        });
    }
    Ok(())
}

fn copy_identity(
    src: &FrameRef<'_>,
    dst: &mut FrameMut<'_>,
) -> Result<TransformOutcome, TransformError> {
    log::debug!("identity transform on {}, copying", src.info());
    dst.copy_from(src)?;
    Ok(TransformOutcome::Copied)
}
