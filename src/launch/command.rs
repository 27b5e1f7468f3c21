//! Launch command construction
//!
//! Every grid cell becomes one `debugchrome:` URL. The URL wraps a
//! placeholder image sized to the cell, followed by bang parameters that
//! tell the companion tool where to put the window and when to close it:
//!
//! ```text
//! debugchrome:https://placehold.co/500x302/1a2b3c/FFF?text=Grid(0,0,500,400), Monitor 0!x=0&!y=0&!w=500&!h=400&!monitor=0&!openwindow&!timeout=30
//! ```
//!
//! The string is never parsed on this side.

use std::fmt;

use rand::Rng;

use crate::config::StressConfig;
use crate::domain::grid::GridCell;

/// 24-bit color rendered as six lowercase hex digits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Rgb(
            rng.gen_range(0..=255),
            rng.gen_range(0..=255),
            rng.gen_range(0..=255),
        )
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02x}{:02x}{:02x}", self.0, self.1, self.2)
    }
}

/// One ready-to-run invocation of the companion tool
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LaunchCommand {
    cell: GridCell,
    url: String,
}

impl LaunchCommand {
    pub fn cell(&self) -> &GridCell {
        &self.cell
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for LaunchCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// The fixed parts of every launch command
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    pub placeholder_base: String,
    pub text_color: String,
    /// Pixels reserved for browser chrome above the page
    pub height_adjust: i32,
    pub timeout_secs: u64,
}

impl CommandTemplate {
    pub fn from_config(config: &StressConfig) -> Self {
        Self {
            placeholder_base: config.placeholder_base.trim_end_matches('/').to_string(),
            text_color: config.text_color.clone(),
            height_adjust: config.height_adjust,
            timeout_secs: config.timeout_secs,
        }
    }

    /// Text drawn inside the placeholder image
    pub fn label(cell: &GridCell) -> String {
        let r = cell.rect;
        format!(
            "Grid({},{},{},{}), Monitor {}",
            r.x, r.y, r.w, r.h, cell.monitor_index
        )
    }

    /// Placeholder image URL for a cell
    ///
    /// The image height leaves room for the browser chrome and never drops
    /// below one pixel.
    pub fn placeholder_url(&self, cell: &GridCell, color: Rgb) -> String {
        let image_height = cell.rect.h.saturating_sub(self.height_adjust).max(1);
        format!(
            "{}/{}x{}/{}/{}?text={}",
            self.placeholder_base,
            cell.rect.w,
            image_height,
            color,
            self.text_color,
            Self::label(cell)
        )
    }

    pub fn build(&self, cell: GridCell, color: Rgb) -> LaunchCommand {
        let r = cell.rect;
        let url = format!(
            "debugchrome:{}!x={}&!y={}&!w={}&!h={}&!monitor={}&!openwindow&!timeout={}",
            self.placeholder_url(&cell, color),
            r.x,
            r.y,
            r.w,
            r.h,
            cell.monitor_index,
            self.timeout_secs
        );
        LaunchCommand { cell, url }
    }
}
