//! Error types for the rain overlay.
//!
//! Setup can fail in a handful of ways (no event loop, no window, no GPU, a
//! nonsensical configuration). All of those are fatal and surface as
//! [`OverlayError`]. Missing optional platform features are reported as a
//! [`Degradation`] instead: they get logged and the overlay keeps running.
//!
//! Once the first frame is drawn nothing in the simulation can fail.

use std::fmt;

/// Ways acquiring the overlay's drawing surface can fail.
#[derive(Debug)]
pub enum GpuError {
    /// wgpu could not wrap the overlay window in a surface.
    SurfaceCreation(wgpu::CreateSurfaceError),
    /// No adapter can present to the overlay surface.
    NoAdapter,
    /// The adapter refused to open a device with default limits.
    DeviceCreation(wgpu::RequestDeviceError),
    /// The surface reports no texture formats for the chosen adapter.
    NoSurfaceFormat,
}

impl fmt::Display for GpuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GpuError::SurfaceCreation(e) => {
                write!(f, "Cannot draw into the overlay window: {}", e)
            }
            GpuError::NoAdapter => write!(
                f,
                "No GPU adapter can present to the overlay window (Vulkan, Metal or DX12 required)"
            ),
            GpuError::DeviceCreation(e) => write!(f, "GPU device request was refused: {}", e),
            GpuError::NoSurfaceFormat => write!(f, "Surface is not supported by the selected adapter"),
        }
    }
}

impl std::error::Error for GpuError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GpuError::SurfaceCreation(e) => Some(e),
            GpuError::DeviceCreation(e) => Some(e),
            _ => None,
        }
    }
}

impl From<wgpu::CreateSurfaceError> for GpuError {
    fn from(e: wgpu::CreateSurfaceError) -> Self {
        GpuError::SurfaceCreation(e)
    }
}

impl From<wgpu::RequestDeviceError> for GpuError {
    fn from(e: wgpu::RequestDeviceError) -> Self {
        GpuError::DeviceCreation(e)
    }
}

/// A [`RainConfig`](crate::RainConfig) value that would break the simulation.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Vertical speed range is empty or not finite.
    EmptySpeedRange { min: f32, max: f32 },
    /// Frame rate must be at least one frame per second.
    ZeroFrameRate,
    /// A scalar that must be strictly positive and finite was not.
    NotPositive { field: &'static str, value: f32 },
    /// A scalar that must be finite was not.
    NotFinite { field: &'static str, value: f32 },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptySpeedRange { min, max } => {
                write!(f, "Vertical speed range {}..{} is empty", min, max)
            }
            ConfigError::ZeroFrameRate => write!(f, "Frame rate must be at least 1"),
            ConfigError::NotPositive { field, value } => {
                write!(f, "`{}` must be positive, got {}", field, value)
            }
            ConfigError::NotFinite { field, value } => {
                write!(f, "`{}` must be finite, got {}", field, value)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Fatal errors raised while setting up the overlay.
#[derive(Debug)]
pub enum OverlayError {
    /// Failed to create event loop.
    EventLoop(winit::error::EventLoopError),
    /// Failed to create window.
    Window(winit::error::OsError),
    /// GPU initialization failed.
    Gpu(GpuError),
    /// The configuration was rejected before anything was acquired.
    Config(ConfigError),
}

impl fmt::Display for OverlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverlayError::EventLoop(e) => write!(f, "Failed to create event loop: {}", e),
            OverlayError::Window(e) => write!(f, "Failed to create overlay window: {}", e),
            OverlayError::Gpu(e) => write!(f, "GPU error: {}", e),
            OverlayError::Config(e) => write!(f, "Invalid configuration: {}", e),
        }
    }
}

impl std::error::Error for OverlayError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OverlayError::EventLoop(e) => Some(e),
            OverlayError::Window(e) => Some(e),
            OverlayError::Gpu(e) => Some(e),
            OverlayError::Config(e) => Some(e),
        }
    }
}

impl From<winit::error::EventLoopError> for OverlayError {
    fn from(e: winit::error::EventLoopError) -> Self {
        OverlayError::EventLoop(e)
    }
}

impl From<winit::error::OsError> for OverlayError {
    fn from(e: winit::error::OsError) -> Self {
        OverlayError::Window(e)
    }
}

impl From<GpuError> for OverlayError {
    fn from(e: GpuError) -> Self {
        OverlayError::Gpu(e)
    }
}

impl From<ConfigError> for OverlayError {
    fn from(e: ConfigError) -> Self {
        OverlayError::Config(e)
    }
}

/// An optional capability that is unavailable on this platform.
///
/// Never fatal. The overlay logs it once and continues with reduced fidelity.
#[derive(Debug)]
pub enum Degradation {
    /// The window could not be made transparent to mouse input.
    ClickThrough(winit::error::ExternalError),
    /// The surface offers no alpha mode that composites with the desktop.
    OpaqueSurface(wgpu::CompositeAlphaMode),
    /// No monitor was reported; the window falls back to a default size.
    UnknownMonitorSize,
}

impl fmt::Display for Degradation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Degradation::ClickThrough(e) => {
                write!(f, "Window will not be click-through: {}", e)
            }
            Degradation::OpaqueSurface(mode) => write!(
                f,
                "No transparent alpha mode available, using {:?}; the overlay will hide the desktop",
                mode
            ),
            Degradation::UnknownMonitorSize => {
                write!(f, "No monitor reported, falling back to a default window size")
            }
        }
    }
}

impl Degradation {
    /// Log this degradation at `warn` level.
    pub fn report(&self) {
        log::warn!("{}", self);
    }
}
