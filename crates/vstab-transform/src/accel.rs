//! Seam for hardware accelerated planar transforms.
//!
//! A backend (GPU, DSP, ...) implements [`AccelerationBackend`] and is owned by
//! an [`AccelContext`], which the caller passes to
//! [`Transformer::apply_accelerated`](crate::Transformer::apply_accelerated).
//! Whenever the backend is unavailable or fails, the transform runs on the CPU
//! instead and produces the same output the CPU path would have produced.

use vstab_frame::{FrameMut, FrameRef};

use crate::config::TransformConfig;
use crate::transform::AffineTransform;

/// Errors reported by an acceleration backend.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum AccelError {
    /// No device is present, or the backend was not compiled in.
    #[error("Acceleration backend is not available")]
    Unavailable,

    /// The device could not be initialised.
    #[error("Acceleration device error: {0}")]
    Device(String),

    /// A transform was submitted but did not complete.
    #[error("Accelerated transform failed: {0}")]
    Execution(String),
}

/// Backend that can resample planar frames.
///
/// Implementations write the whole destination on success and leave it
/// untouched on error: the CPU fallback under
/// [`BorderPolicy::ExtendEdge`](crate::BorderPolicy::ExtendEdge) reads the
/// destination's previous content.
pub trait AccelerationBackend: Send {
    /// Short name of the backend, used in logs.
    fn name(&self) -> &str;

    /// Prepare the device.
    ///
    /// Called at most once per [`AccelContext`].
    ///
    /// # Errors
    ///
    /// Returns an error if the device cannot be used.
    fn initialize(&mut self) -> Result<(), AccelError>;

    /// Resample `src` into `dst`.
    ///
    /// # Arguments
    ///
    /// * `src` - The planar source frame.
    /// * `dst` - The planar destination frame with the same descriptor.
    /// * `transform` - The transform to apply.
    /// * `config` - Border, interpolation and threading settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the transform cannot be completed on the device.
    fn transform_planar(
        &mut self,
        src: &FrameRef<'_>,
        dst: &mut FrameMut<'_>,
        transform: &AffineTransform,
        config: &TransformConfig,
    ) -> Result<(), AccelError>;
}

/// Backend that is never available.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoAcceleration;

impl AccelerationBackend for NoAcceleration {
    fn name(&self) -> &str {
        "none"
    }

    fn initialize(&mut self) -> Result<(), AccelError> {
        Err(AccelError::Unavailable)
    }

    fn transform_planar(
        &mut self,
        _src: &FrameRef<'_>,
        _dst: &mut FrameMut<'_>,
        _transform: &AffineTransform,
        _config: &TransformConfig,
    ) -> Result<(), AccelError> {
        Err(AccelError::Unavailable)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AccelState {
    Uninitialized,
    Ready,
    Unavailable,
}

/// Caller-owned handle to an acceleration backend.
///
/// The backend is initialised lazily on first use and the outcome is cached,
/// so a missing device is probed only once.
pub struct AccelContext {
    backend: Box<dyn AccelerationBackend>,
    state: AccelState,
}

impl AccelContext {
    /// Wrap a backend. Nothing is initialised yet.
    pub fn new(backend: Box<dyn AccelerationBackend>) -> Self {
        Self {
            backend,
            state: AccelState::Uninitialized,
        }
    }

    /// A context without acceleration.
    pub fn none() -> Self {
        Self::new(Box::new(NoAcceleration))
    }

    /// Name of the wrapped backend.
    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Whether the backend can be used, initialising it on the first call.
    pub fn is_available(&mut self) -> bool {
        if self.state == AccelState::Uninitialized {
            self.state = match self.backend.initialize() {
                Ok(()) => {
                    log::info!("acceleration backend '{}' initialised", self.backend.name());
                    AccelState::Ready
                }
                Err(e) => {
                    log::debug!("acceleration backend '{}': {}", self.backend.name(), e);
                    AccelState::Unavailable
                }
            };
        }
        self.state == AccelState::Ready
    }

    pub(crate) fn try_transform(
        &mut self,
        src: &FrameRef<'_>,
        dst: &mut FrameMut<'_>,
        transform: &AffineTransform,
        config: &TransformConfig,
    ) -> Result<(), AccelError> {
        if !self.is_available() {
            return Err(AccelError::Unavailable);
        }
        self.backend.transform_planar(src, dst, transform, config)
    }
}

impl Default for AccelContext {
    fn default() -> Self {
        Self::none()
    }
}

impl std::fmt::Debug for AccelContext {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.debug_struct("AccelContext")
            .field("backend", &self.backend.name())
            .field("state", &self.state)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingBackend {
        inits: Arc<AtomicUsize>,
        result: Result<(), AccelError>,
    }

    impl AccelerationBackend for CountingBackend {
        fn name(&self) -> &str {
            "counting"
        }

        fn initialize(&mut self) -> Result<(), AccelError> {
            self.inits.fetch_add(1, Ordering::SeqCst);
            self.result.clone()
        }

        fn transform_planar(
            &mut self,
            _src: &FrameRef<'_>,
            _dst: &mut FrameMut<'_>,
            _transform: &AffineTransform,
            _config: &TransformConfig,
        ) -> Result<(), AccelError> {
            Ok(())
        }
    }

    #[test]
    fn no_acceleration_is_unavailable() {
        let mut ctx = AccelContext::none();
        assert_eq!(ctx.backend_name(), "none");
        assert!(!ctx.is_available());
        assert!(!ctx.is_available());
    }

    #[test]
    fn initialize_runs_once() {
        for (result, available) in [
            (Ok(()), true),
            (Err(AccelError::Device("no device".into())), false),
        ] {
            let inits = Arc::new(AtomicUsize::new(0));
            let mut ctx = AccelContext::new(Box::new(CountingBackend {
                inits: inits.clone(),
                result,
            }));
            assert_eq!(ctx.is_available(), available);
            assert_eq!(ctx.is_available(), available);
            assert_eq!(inits.load(Ordering::SeqCst), 1);
        }
    }
}
