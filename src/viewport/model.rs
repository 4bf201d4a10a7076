//! Viewport state: geometry, scroll offset and the row under the pointer.

/// A pointer position in the same units as `Geometry`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Placement of the list on screen.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Geometry {
    pub row_height: f32,
    /// First visible y coordinate.
    pub top: f32,
    /// End of the visible band (exclusive).
    pub bottom: f32,
    /// Left inset of every row.
    pub left: f32,
    pub row_width: f32,
}

impl Geometry {
    pub fn height(&self) -> f32 {
        (self.bottom - self.top).max(0.0)
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self {
            row_height: 1.0,
            top: 0.0,
            bottom: 0.0,
            left: 0.0,
            row_width: 0.0,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ListViewport {
    geometry: Geometry,
    len: usize,
    offset: f32,
    hovered: Option<usize>,
    /// Last pointer position; the hovered row is re-resolved from it whenever
    /// the offset, length or geometry changes.
    pointer: Option<Point>,
}

impl ListViewport {
    pub fn new(geometry: Geometry) -> Self {
        Self {
            geometry,
            ..Self::default()
        }
    }

    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn hovered_index(&self) -> Option<usize> {
        self.hovered
    }

    /// Largest offset that still fills the viewport, never negative.
    pub fn max_offset(&self) -> f32 {
        let content = self.len as f32 * self.geometry.row_height;
        (content - self.geometry.height()).max(0.0)
    }

    pub fn clamp(&self, offset: f32) -> f32 {
        if offset.is_nan() {
            return 0.0;
        }
        offset.clamp(0.0, self.max_offset())
    }

    /// Playlist length changed.
    pub fn set_len(&mut self, len: usize) {
        self.len = len;
        self.offset = self.clamp(self.offset);
        self.refresh_hover();
    }

    /// The list moved or was resized.
    pub fn set_geometry(&mut self, geometry: Geometry) {
        self.geometry = geometry;
        self.offset = self.clamp(self.offset);
        self.refresh_hover();
    }

    pub fn scroll_by(&mut self, delta: f32) {
        self.offset = self.clamp(self.offset + delta);
        self.refresh_hover();
    }

    /// Scroll the least amount that brings the whole row for `index` into view.
    ///
    /// A row taller than the viewport is aligned to the top.
    pub fn ensure_visible(&mut self, index: usize) {
        if index >= self.len {
            return;
        }
        let g = self.geometry;
        // Row edges in list coordinates, where the viewport spans [offset, offset + height).
        let start = index as f32 * g.row_height;
        let end = start + g.row_height;

        let mut offset = self.offset;
        if end > offset + g.height() {
            offset = end - g.height();
        }
        if start < offset {
            offset = start;
        }
        self.offset = self.clamp(offset);
        self.refresh_hover();
    }

    /// Screen y of the top edge of row `index` at the current offset.
    pub fn row_y(&self, index: usize) -> f32 {
        self.geometry.top + index as f32 * self.geometry.row_height - self.offset
    }

    /// Row under `point`, if it lies on a row inside the viewport.
    pub fn hit_test(&self, point: Point) -> Option<usize> {
        let g = self.geometry;
        if g.row_height <= 0.0 {
            return None;
        }
        if point.x < g.left || point.x >= g.left + g.row_width {
            return None;
        }
        if point.y < g.top || point.y >= g.bottom {
            return None;
        }

        let row = ((point.y - g.top + self.offset) / g.row_height).floor();
        if row < 0.0 || row >= self.len as f32 {
            return None;
        }
        Some(row as usize)
    }

    /// Update the hovered row from a pointer move.
    pub fn hover(&mut self, point: Point) -> Option<usize> {
        self.pointer = Some(point);
        self.refresh_hover();
        self.hovered
    }

    fn refresh_hover(&mut self) {
        self.hovered = self.pointer.and_then(|p| self.hit_test(p));
    }

    /// Rows whose vertical span intersects the viewport, with their screen y.
    pub fn visible_rows(&self) -> impl Iterator<Item = (usize, f32)> + '_ {
        let g = self.geometry;
        let first = if g.row_height > 0.0 {
            (self.offset / g.row_height).floor() as usize
        } else {
            self.len
        };
        (first..self.len)
            .map(move |i| (i, self.row_y(i)))
            .take_while(move |&(_, y)| y < g.bottom)
            .filter(move |&(_, y)| y + g.row_height > g.top)
    }
}
