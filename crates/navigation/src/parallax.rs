use serde::Serialize;

/// Peak hero drift in each direction is half of this, in CSS pixels.
pub const PARALLAX_RANGE_PX: f64 = 20.0;

/// Hero background offset that follows the pointer.
#[derive(Debug, Copy, Clone, Default, PartialEq, Serialize)]
pub struct PointerParallax {
    pub x: f64,
    pub y: f64,
}

impl PointerParallax {
    /// Maps a pointer position to `[-range/2, range/2]` on each axis,
    /// centred on the middle of the viewport.
    ///
    /// Returns `false` (offset untouched) for degenerate viewports.
    pub fn on_pointer_move(
        &mut self,
        client_x: f64,
        client_y: f64,
        width: f64,
        height: f64,
    ) -> bool {
        if !(width > 0.0 && height > 0.0) || !client_x.is_finite() || !client_y.is_finite() {
            return false;
        }
        self.x = (client_x / width - 0.5) * PARALLAX_RANGE_PX;
        self.y = (client_y / height - 0.5) * PARALLAX_RANGE_PX;
        true
    }
}
