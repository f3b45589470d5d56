#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use scoring::Point;

/// The capture surface's bounding box in client (viewport) coordinates,
/// plus the device pixel ratio used when sizing the backing store.
///
/// Pointer events arrive in client space; the stroke is recorded in the
/// surface's local space (origin at the surface's top-left corner). The
/// scorer never sees client coordinates.
#[derive(Debug, Clone, Copy)]
pub struct Surface {
    /// Left edge of the surface in client CSS pixels.
    pub left: f64,
    /// Top edge of the surface in client CSS pixels.
    pub top: f64,
    /// Surface width in CSS pixels.
    pub width: f64,
    /// Surface height in CSS pixels.
    pub height: f64,
    /// Device pixel ratio (backing-store pixels per CSS pixel).
    pub dpr: f64,
}

impl Default for Surface {
    fn default() -> Self {
        Self { left: 0.0, top: 0.0, width: 0.0, height: 0.0, dpr: 1.0 }
    }
}

impl Surface {
    /// Update the bounding box and device pixel ratio, typically from
    /// `getBoundingClientRect()` after a mount or resize.
    pub fn set_bounds(&mut self, left: f64, top: f64, width: f64, height: f64, dpr: f64) {
        self.left = left;
        self.top = top;
        self.width = width;
        self.height = height;
        self.dpr = dpr;
    }

    /// Convert a client-space point (viewport CSS pixels) to surface-local
    /// coordinates by subtracting the surface's top-left offset.
    #[must_use]
    pub fn client_to_local(&self, client: Point) -> Point {
        Point::new(client.x - self.left, client.y - self.top)
    }

    /// Convert a surface-local point back to client coordinates.
    #[must_use]
    pub fn local_to_client(&self, local: Point) -> Point {
        Point::new(local.x + self.left, local.y + self.top)
    }

    /// Whether a client-space point falls within the surface bounds
    /// (edges inclusive).
    #[must_use]
    pub fn contains_client(&self, client: Point) -> bool {
        client.x >= self.left
            && client.x <= self.left + self.width
            && client.y >= self.top
            && client.y <= self.top + self.height
    }
}
