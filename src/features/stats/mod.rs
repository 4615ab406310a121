//! Dashboard statistics rendering.
//!
//! The numbers themselves are computed by the backend; this module only lays
//! them out for the terminal.

pub mod visualization;

pub use visualization::{
    render_heatmap, render_percent_bar, render_sparkline, ActivitySummary, HeatmapGrid,
    DAY_LABELS, HEAT_CHARS,
};
