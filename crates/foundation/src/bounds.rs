/// Viewport-relative bounding box of an element, in CSS pixels.
///
/// Mirrors the fields of a DOM `getBoundingClientRect()` result. `top` may be
/// negative once the element has scrolled past the top of the viewport.
#[derive(Copy, Clone, Debug, PartialEq, Default)]
pub struct ClientRect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl ClientRect {
    pub fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        ClientRect {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Full-width band spanning `top..bottom`.
    pub fn vertical(top: f64, bottom: f64) -> Self {
        ClientRect::new(0.0, top, 0.0, bottom)
    }

    /// True when the horizontal line at `y` touches the box (inclusive on both edges).
    pub fn straddles(&self, y: f64) -> bool {
        self.top <= y && self.bottom >= y
    }
}

#[cfg(test)]
mod tests {
    use super::ClientRect;

    #[test]
    fn straddles_is_inclusive() {
        let r = ClientRect::vertical(150.0, 300.0);
        assert!(r.straddles(150.0));
        assert!(r.straddles(300.0));
        assert!(!r.straddles(149.9));
        assert!(!r.straddles(300.1));
    }

    #[test]
    fn scrolled_past_box_has_negative_top() {
        let r = ClientRect::vertical(-500.0, 300.0);
        assert!(r.straddles(150.0));
        assert!(!r.straddles(-500.1));
    }

    #[test]
    fn inverted_box_straddles_nothing() {
        let r = ClientRect::vertical(10.0, 5.0);
        assert!(!r.straddles(7.0));
        assert!(!r.straddles(5.0));
        assert!(!r.straddles(10.0));
    }
}
