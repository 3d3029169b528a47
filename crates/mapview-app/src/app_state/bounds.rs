//! Coordinate conversion between window sizes and wry rects.

use winit::dpi::PhysicalSize;

/// Rect covering the whole client area of a window, in logical pixels.
pub fn window_rect_to_wry(size: PhysicalSize<u32>, scale_factor: f64) -> wry::Rect {
    let logical = size.to_logical::<f64>(scale_factor);
    wry::Rect {
        position: wry::dpi::Position::Logical(wry::dpi::LogicalPosition::new(0.0, 0.0)),
        size: wry::dpi::Size::Logical(wry::dpi::LogicalSize::new(logical.width, logical.height)),
    }
}
