//! # Figure Model
//!
//! A renderer-agnostic description of a 2-D line plot: titles, an ordered
//! list of traces, decorative bands and the user's viewport.
//!
//! Render functions always build a fresh [`Figure`]. A front end that keeps
//! a figure on screen brings it up to date with [`Figure::diff`] and
//! [`Figure::apply`], which replace trace data by position and never touch
//! the viewport, so zoom survives parameter changes.
//!
//! ## Gaps
//!
//! Non-finite y (or x) values are gaps: the line is broken there. Quiver
//! traces rely on this to hold many disjoint segments in one trace. In JSON
//! a gap is `null`.

use serde::{Deserialize, Serialize};

use crate::errors::{FlowError, FlowResult};

/// An sRGB colour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const MEDIUM_TURQUOISE: Rgb = Rgb::new(72, 209, 204);
    pub const FIRE_BRICK: Rgb = Rgb::new(178, 34, 34);
    pub const SIENNA: Rgb = Rgb::new(160, 82, 45);
    pub const MEDIUM_PURPLE: Rgb = Rgb::new(147, 112, 219);
    pub const ROYAL_BLUE: Rgb = Rgb::new(65, 105, 225);
    pub const GREY: Rgb = Rgb::new(128, 128, 128);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Rgb { r, g, b }
    }

    /// Channels scaled to 0.0..=1.0
    pub fn to_f32(self) -> [f32; 3] {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
        ]
    }
}

/// One named series of x/y points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trace {
    /// Legend name, also the trace's identity when patching
    pub name: String,
    pub color: Rgb,
    /// Stroke width in logical pixels
    pub width: f32,
    #[serde(with = "crate::nan_json::values")]
    pub x: Vec<f64>,
    #[serde(with = "crate::nan_json::values")]
    pub y: Vec<f64>,
}

impl Trace {
    pub fn line(name: impl Into<String>, color: Rgb, x: Vec<f64>, y: Vec<f64>) -> Self {
        Trace {
            name: name.into(),
            color,
            width: 2.0,
            x,
            y,
        }
    }

    pub fn with_width(mut self, width: f32) -> Self {
        self.width = width;
        self
    }

    pub fn len(&self) -> usize {
        self.x.len().min(self.y.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Continuous runs of finite points; a non-finite x or y ends a run.
    ///
    /// Single isolated points are kept as one-point runs so they can still
    /// be drawn as markers.
    pub fn segments(&self) -> Vec<Vec<(f64, f64)>> {
        let mut segments = Vec::new();
        let mut current: Vec<(f64, f64)> = Vec::new();
        for (&x, &y) in self.x.iter().zip(&self.y) {
            if x.is_finite() && y.is_finite() {
                current.push((x, y));
            } else if !current.is_empty() {
                segments.push(std::mem::take(&mut current));
            }
        }
        if !current.is_empty() {
            segments.push(current);
        }
        segments
    }

    fn same_data(&self, other: &Trace) -> bool {
        // Bitwise comparison so NaN gaps compare equal to themselves
        fn bits(v: &[f64]) -> impl Iterator<Item = u64> + '_ {
            v.iter().map(|f| f.to_bits())
        }
        self.color == other.color
            && self.width == other.width
            && self.x.len() == other.x.len()
            && self.y.len() == other.y.len()
            && bits(&self.x).eq(bits(&other.x))
            && bits(&self.y).eq(bits(&other.y))
    }
}

/// A horizontal band spanning the full x range (e.g. the ground below y = 0).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Band {
    pub y0: f64,
    pub y1: f64,
    pub color: Rgb,
    pub opacity: f32,
}

/// Axis-aligned data window.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub x_min: f64,
    pub x_max: f64,
    pub y_min: f64,
    pub y_max: f64,
}

impl Viewport {
    pub fn width(&self) -> f64 {
        self.x_max - self.x_min
    }

    pub fn height(&self) -> f64 {
        self.y_max - self.y_min
    }

    /// Scale about a point given as fractions (0..=1) of the window.
    ///
    /// `factor < 1` zooms in.
    pub fn zoom(&self, factor: f64, fx: f64, fy: f64) -> Viewport {
        let cx = self.x_min + self.width() * fx;
        let cy = self.y_min + self.height() * fy;
        Viewport {
            x_min: cx - (cx - self.x_min) * factor,
            x_max: cx + (self.x_max - cx) * factor,
            y_min: cy - (cy - self.y_min) * factor,
            y_max: cy + (self.y_max - cy) * factor,
        }
    }

    /// Map a data point to fractions of the window (0..=1 when inside).
    pub fn normalize(&self, x: f64, y: f64) -> (f64, f64) {
        ((x - self.x_min) / self.width(), (y - self.y_min) / self.height())
    }

    /// Widen zero-height or zero-width windows so they can be drawn.
    fn ensure_extent(mut self) -> Viewport {
        if self.width().abs() < f64::EPSILON {
            self.x_min -= 1.0;
            self.x_max += 1.0;
        }
        if self.height().abs() < f64::EPSILON {
            let pad = (self.y_max.abs() * 0.1).max(1.0);
            self.y_min -= pad;
            self.y_max += pad;
        }
        self
    }
}

/// A complete plot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Figure {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    /// Fixed x-axis range; `None` autoscales to the data
    pub x_range: Option<(f64, f64)>,
    pub traces: Vec<Trace>,
    pub bands: Vec<Band>,
    /// User zoom window; `None` shows the default window
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub viewport: Option<Viewport>,
}

/// Fraction of the data height added above and below in the default window
const Y_PADDING: f64 = 0.05;

impl Figure {
    pub fn new(title: impl Into<String>) -> Self {
        Figure {
            title: title.into(),
            x_label: String::new(),
            y_label: String::new(),
            x_range: None,
            traces: Vec::new(),
            bands: Vec::new(),
            viewport: None,
        }
    }

    pub fn with_axes(mut self, x_label: impl Into<String>, y_label: impl Into<String>) -> Self {
        self.x_label = x_label.into();
        self.y_label = y_label.into();
        self
    }

    pub fn with_x_range(mut self, min: f64, max: f64) -> Self {
        self.x_range = Some((min, max));
        self
    }

    pub fn with_trace(mut self, trace: Trace) -> Self {
        self.traces.push(trace);
        self
    }

    pub fn with_band(mut self, band: Band) -> Self {
        self.bands.push(band);
        self
    }

    pub fn trace_names(&self) -> Vec<&str> {
        self.traces.iter().map(|t| t.name.as_str()).collect()
    }

    pub fn trace(&self, name: &str) -> Option<&Trace> {
        self.traces.iter().find(|t| t.name == name)
    }

    /// Bounding box of all finite trace points and band edges.
    pub fn data_bounds(&self) -> Option<Viewport> {
        let mut bounds = None;
        for trace in &self.traces {
            for (&x, &y) in trace.x.iter().zip(&trace.y) {
                bounds = extend_bounds(bounds, x, y);
            }
        }
        let x = bounds.map(|b| b.x_min)?;
        for band in &self.bands {
            bounds = extend_bounds(bounds, x, band.y0);
            bounds = extend_bounds(bounds, x, band.y1);
        }
        bounds
    }

    /// Window to draw: the user's viewport, else the x range (or data
    /// extent) with padded data heights.
    pub fn view_window(&self) -> Viewport {
        if let Some(viewport) = self.viewport {
            return viewport.ensure_extent();
        }
        let data = self.data_bounds().unwrap_or(Viewport {
            x_min: 0.0,
            x_max: 1.0,
            y_min: 0.0,
            y_max: 1.0,
        });
        let (x_min, x_max) = match self.x_range {
            Some((min, max)) if min.is_finite() && max.is_finite() => (min, max),
            _ => (data.x_min, data.x_max),
        };
        let pad = data.height() * Y_PADDING;
        Viewport {
            x_min,
            x_max,
            y_min: data.y_min - pad,
            y_max: data.y_max + pad,
        }
        .ensure_extent()
    }

    /// Compute the positional patch that turns `self` into `fresh`.
    ///
    /// Fails when the two figures do not share the same trace layout
    /// (same count, same names, same order).
    pub fn diff(&self, fresh: &Figure) -> FlowResult<FigurePatch> {
        if self.trace_names() != fresh.trace_names() {
            return Err(FlowError::trace_layout_mismatch(
                self.title.clone(),
                &self.trace_names(),
                &fresh.trace_names(),
            ));
        }

        let traces = self
            .traces
            .iter()
            .zip(&fresh.traces)
            .enumerate()
            .filter(|(_, (old, new))| !old.same_data(new))
            .map(|(index, (_, new))| TraceUpdate {
                index,
                color: new.color,
                width: new.width,
                x: new.x.clone(),
                y: new.y.clone(),
            })
            .collect();

        let layout = (self.title != fresh.title
            || self.x_label != fresh.x_label
            || self.y_label != fresh.y_label
            || self.x_range != fresh.x_range
            || self.bands != fresh.bands)
            .then(|| LayoutUpdate {
                title: fresh.title.clone(),
                x_label: fresh.x_label.clone(),
                y_label: fresh.y_label.clone(),
                x_range: fresh.x_range,
                bands: fresh.bands.clone(),
            });

        Ok(FigurePatch { traces, layout })
    }

    /// Apply a patch produced by [`Figure::diff`]. The viewport is kept.
    pub fn apply(&mut self, patch: FigurePatch) -> FlowResult<()> {
        for update in patch.traces {
            let count = self.traces.len();
            let trace = self.traces.get_mut(update.index).ok_or_else(|| FlowError::Internal {
                message: format!("Trace index {} out of range for {} traces", update.index, count),
            })?;
            trace.color = update.color;
            trace.width = update.width;
            trace.x = update.x;
            trace.y = update.y;
        }
        if let Some(layout) = patch.layout {
            self.title = layout.title;
            self.x_label = layout.x_label;
            self.y_label = layout.y_label;
            self.x_range = layout.x_range;
            self.bands = layout.bands;
        }
        Ok(())
    }

    /// Diff against `fresh` and apply in one step.
    ///
    /// Returns the number of traces that changed.
    pub fn update_from(&mut self, fresh: &Figure) -> FlowResult<usize> {
        let patch = self.diff(fresh)?;
        let changed = patch.traces.len();
        self.apply(patch)?;
        Ok(changed)
    }
}

fn extend_bounds(bounds: Option<Viewport>, x: f64, y: f64) -> Option<Viewport> {
    if !(x.is_finite() && y.is_finite()) {
        return bounds;
    }
    Some(match bounds {
        None => Viewport { x_min: x, x_max: x, y_min: y, y_max: y },
        Some(b) => Viewport {
            x_min: b.x_min.min(x),
            x_max: b.x_max.max(x),
            y_min: b.y_min.min(y),
            y_max: b.y_max.max(y),
        },
    })
}

/// New contents for one trace, addressed by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TraceUpdate {
    pub index: usize,
    pub color: Rgb,
    pub width: f32,
    #[serde(with = "crate::nan_json::values")]
    pub x: Vec<f64>,
    #[serde(with = "crate::nan_json::values")]
    pub y: Vec<f64>,
}

/// New titles, axis range and bands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutUpdate {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub x_range: Option<(f64, f64)>,
    pub bands: Vec<Band>,
}

/// Positional changes between two figures with the same trace layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FigurePatch {
    pub traces: Vec<TraceUpdate>,
    pub layout: Option<LayoutUpdate>,
}

impl FigurePatch {
    pub fn is_empty(&self) -> bool {
        self.traces.is_empty() && self.layout.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_trace_figure(scale: f64) -> Figure {
        Figure::new("q Plot")
            .with_axes("x (m)", "qx (m^2/day)")
            .with_x_range(0.0, 10.0)
            .with_trace(Trace::line("q", Rgb::MEDIUM_PURPLE, vec![0.0, 5.0, 10.0], vec![-scale, 0.0, scale]))
            .with_trace(Trace::line("0", Rgb::FIRE_BRICK, vec![0.0, 10.0], vec![0.0, 0.0]))
    }

    #[test]
    fn test_segments_split_on_gaps() {
        let trace = Trace::line(
            "qx",
            Rgb::ROYAL_BLUE,
            vec![0.0, 1.0, f64::NAN, 2.0, 3.0, f64::NAN, f64::NAN, 4.0],
            vec![0.0, 0.0, f64::NAN, 1.0, 1.0, f64::NAN, f64::NAN, 2.0],
        );
        let segments = trace.segments();
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0], vec![(0.0, 0.0), (1.0, 0.0)]);
        assert_eq!(segments[2], vec![(4.0, 2.0)]);
    }

    #[test]
    fn test_diff_only_changed_traces() {
        let old = two_trace_figure(1.0);
        let new = two_trace_figure(2.0);
        let patch = old.diff(&new).unwrap();
        assert_eq!(patch.traces.len(), 1);
        assert_eq!(patch.traces[0].index, 0);
        assert!(patch.layout.is_none());

        assert!(old.diff(&old.clone()).unwrap().is_empty());
    }

    #[test]
    fn test_patch_keeps_viewport_and_trace_count() {
        let mut shown = two_trace_figure(1.0);
        let zoom = Viewport { x_min: 2.0, x_max: 4.0, y_min: -0.5, y_max: 0.5 };
        shown.viewport = Some(zoom);

        let fresh = two_trace_figure(3.0).with_x_range(0.0, 20.0);
        let changed = shown.update_from(&fresh).unwrap();

        assert_eq!(changed, 1);
        assert_eq!(shown.traces.len(), 2);
        assert_eq!(shown.viewport, Some(zoom));
        assert_eq!(shown.x_range, Some((0.0, 20.0)));
        assert_eq!(shown.traces[0].y, vec![-3.0, 0.0, 3.0]);
    }

    #[test]
    fn test_layout_mismatch_is_rejected() {
        let mut shown = two_trace_figure(1.0);
        let mut fresh = two_trace_figure(1.0);
        fresh.traces.pop();

        let err = shown.update_from(&fresh).unwrap_err();
        assert_eq!(err.error_code(), "TRACE_LAYOUT_MISMATCH");
        assert_eq!(shown.traces.len(), 2);
    }

    #[test]
    fn test_nan_traces_are_unchanged_when_identical() {
        let trace = Trace::line("h", Rgb::MEDIUM_TURQUOISE, vec![0.0, 1.0], vec![f64::NAN, 1.0]);
        let fig = Figure::new("Elevation Plot").with_trace(trace);
        assert!(fig.diff(&fig.clone()).unwrap().traces.is_empty());
    }

    #[test]
    fn test_view_window_defaults() {
        let fig = two_trace_figure(1.0);
        let window = fig.view_window();
        assert_eq!((window.x_min, window.x_max), (0.0, 10.0));
        assert!(window.y_min < -1.0 && window.y_max > 1.0);
    }

    #[test]
    fn test_view_window_handles_flat_and_empty_data() {
        let flat = Figure::new("flat").with_trace(Trace::line("0", Rgb::GREY, vec![0.0, 1.0], vec![0.0, 0.0]));
        assert!(flat.view_window().height() > 0.0);

        let empty = Figure::new("empty");
        let window = empty.view_window();
        assert!(window.width() > 0.0 && window.height() > 0.0);
    }

    #[test]
    fn test_zoom_about_center() {
        let v = Viewport { x_min: 0.0, x_max: 10.0, y_min: 0.0, y_max: 10.0 };
        let z = v.zoom(0.5, 0.5, 0.5);
        assert_eq!(z, Viewport { x_min: 2.5, x_max: 7.5, y_min: 2.5, y_max: 7.5 });
        assert_eq!(v.normalize(5.0, 2.5), (0.5, 0.25));
    }

    #[test]
    fn test_figure_json_skips_missing_viewport() {
        let fig = two_trace_figure(1.0);
        let json = serde_json::to_string(&fig).unwrap();
        assert!(!json.contains("viewport"));
        let back: Figure = serde_json::from_str(&json).unwrap();
        assert_eq!(back, fig);
    }
}
