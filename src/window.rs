//! The overlay window.
//!
//! Borderless, transparent, always on top, covering the primary monitor, and
//! transparent to mouse input so the desktop underneath stays usable.

use std::sync::Arc;

use winit::dpi::{PhysicalPosition, PhysicalSize};
use winit::event_loop::ActiveEventLoop;
use winit::window::{Window, WindowAttributes, WindowLevel};

use crate::error::{Degradation, OverlayError};

/// Window size used when no monitor is reported.
const FALLBACK_SIZE: PhysicalSize<u32> = PhysicalSize::new(1280, 720);

/// Attributes for an overlay covering `size` pixels at `position`.
pub fn overlay_attributes(
    size: PhysicalSize<u32>,
    position: PhysicalPosition<i32>,
) -> WindowAttributes {
    let attrs = Window::default_attributes()
        .with_title("rainfall")
        .with_inner_size(size)
        .with_position(position)
        .with_decorations(false)
        .with_transparent(true)
        .with_resizable(false)
        .with_active(false)
        .with_window_level(WindowLevel::AlwaysOnTop);

    x11_overlay(attrs)
}

/// Bypass the window manager and mark the window as a dock, which keeps
/// compositors from blurring or shadowing it.
#[cfg(target_os = "linux")]
fn x11_overlay(attrs: WindowAttributes) -> WindowAttributes {
    use winit::platform::x11::{WindowAttributesExtX11, WindowType};

    attrs
        .with_override_redirect(true)
        .with_x11_window_type(vec![WindowType::Dock])
}

#[cfg(not(target_os = "linux"))]
fn x11_overlay(attrs: WindowAttributes) -> WindowAttributes {
    attrs
}

/// Create the overlay window and make it click-through.
///
/// Failing to create the window is fatal; failing to make it click-through
/// is reported and tolerated.
pub fn create_overlay_window(event_loop: &ActiveEventLoop) -> Result<Arc<Window>, OverlayError> {
    let monitor = event_loop
        .primary_monitor()
        .or_else(|| event_loop.available_monitors().next());

    let (size, position) = match monitor {
        Some(monitor) => (monitor.size(), monitor.position()),
        None => {
            Degradation::UnknownMonitorSize.report();
            (FALLBACK_SIZE, PhysicalPosition::new(0, 0))
        }
    };
    log::info!(
        "Screen info: width={}, height={}, origin=({}, {})",
        size.width,
        size.height,
        position.x,
        position.y
    );

    let window = Arc::new(event_loop.create_window(overlay_attributes(size, position))?);

    match window.set_cursor_hittest(false) {
        Ok(()) => log::info!("Window set to click-through for mouse input"),
        Err(e) => Degradation::ClickThrough(e).report(),
    }

    Ok(window)
}
