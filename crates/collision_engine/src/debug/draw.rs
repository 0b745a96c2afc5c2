//! Debug line drawing
//!
//! Collider visualization only ever needs line segments. Anything that can
//! draw a colored line implements [`LineRenderer`]; [`DebugDrawSystem`] is a
//! buffering implementation a frame renderer can drain.

use crate::foundation::math::{Mat4, Vec3, Vec4};

/// Sink for debug line segments
pub trait LineRenderer {
    /// Camera transform for the lines that follow
    fn set_view_projection(&mut self, _view_projection: &Mat4) {}

    /// Draw a segment; `None` uses the renderer's default color
    fn draw_line(&mut self, start: Vec3, end: Vec3, color: Option<Vec4>);
}

/// One buffered line segment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebugLine {
    /// Start point in world space
    pub start: Vec3,
    /// End point in world space
    pub end: Vec3,
    /// RGBA color
    pub color: Vec4,
}

/// Debug drawing system that buffers lines for one frame
pub struct DebugDrawSystem {
    lines: Vec<DebugLine>,
    view_projection: Mat4,
    default_color: Vec4,

    /// Master enable/disable flag
    pub enabled: bool,
}

impl DebugDrawSystem {
    /// Create a new debug draw system
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            view_projection: Mat4::identity(),
            default_color: Vec4::new(1.0, 1.0, 1.0, 1.0),
            enabled: true,
        }
    }

    /// Use a different color for lines drawn without one
    pub fn with_default_color(mut self, color: Vec4) -> Self {
        self.default_color = color;
        self
    }

    /// Lines buffered since the last clear
    pub fn lines(&self) -> &[DebugLine] {
        &self.lines
    }

    /// Get the number of buffered lines
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Camera transform set for the current frame
    pub fn view_projection(&self) -> &Mat4 {
        &self.view_projection
    }

    /// Line endpoints in homogeneous clip space
    pub fn clip_space_lines(&self) -> impl Iterator<Item = (Vec4, Vec4, Vec4)> + '_ {
        self.lines.iter().map(move |line| {
            (
                self.view_projection * line.start.push(1.0),
                self.view_projection * line.end.push(1.0),
                line.color,
            )
        })
    }

    /// Drop all buffered lines
    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

impl LineRenderer for DebugDrawSystem {
    fn set_view_projection(&mut self, view_projection: &Mat4) {
        self.view_projection = *view_projection;
    }

    fn draw_line(&mut self, start: Vec3, end: Vec3, color: Option<Vec4>) {
        if !self.enabled {
            return;
        }

        self.lines.push(DebugLine {
            start,
            end,
            color: color.unwrap_or(self.default_color),
        });
    }
}

impl Default for DebugDrawSystem {
    fn default() -> Self {
        Self::new()
    }
}
