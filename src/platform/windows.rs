//! Win32 conversion helpers
//!
//! Small bridges between domain types and Win32 structures used by the
//! monitor queries.

use crate::domain::core::Rect;
use windows::Win32::Foundation::RECT;
use windows::Win32::Graphics::Gdi::{HMONITOR, MONITOR_DEFAULTTONEAREST, MonitorFromRect};

/// Converts a domain rectangle to Windows RECT structure
pub fn rect_to_win32_rect(rect: &Rect) -> RECT {
    RECT {
        left: rect.x,
        top: rect.y,
        right: rect.right(),
        bottom: rect.bottom(),
    }
}

/// Converts a Windows RECT to domain rectangle
pub fn win32_rect_to_rect(rect: &RECT) -> Rect {
    Rect::from_edges(rect.left, rect.top, rect.right, rect.bottom)
}

/// Resolves the monitor handle that best matches a rectangle
///
/// Never fails: Win32 falls back to the nearest monitor.
pub fn monitor_handle_for(rect: &Rect) -> HMONITOR {
    let win_rect = rect_to_win32_rect(rect);
    unsafe { MonitorFromRect(&win_rect, MONITOR_DEFAULTTONEAREST) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rect_conversion_keeps_edges() {
        let rect = Rect::new(-1920, 0, 1920, 1040);
        let win = rect_to_win32_rect(&rect);
        assert_eq!((win.left, win.top, win.right, win.bottom), (-1920, 0, 0, 1040));
        assert_eq!(win32_rect_to_rect(&win), rect);
    }
}
