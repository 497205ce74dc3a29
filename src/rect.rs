use crate::units::*;

/// A rectangle, specified by two opposite corners.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Rect {
    /// The x-coordinate of the first (typically, lower-left) corner.
    pub x1: Pt,
    /// The y-coordinate of the first (typically, lower-left) corner.
    pub y1: Pt,
    /// The x-coordinate of the second (typically, upper-right) corner.
    pub x2: Pt,
    /// The y-coordinate of the second (typically, upper-right) corner.
    pub y2: Pt,
}

impl Rect {
    /// Build a rectangle from its lower-left corner and its size
    pub fn from_origin(x: Pt, y: Pt, width: Pt, height: Pt) -> Rect {
        Rect {
            x1: x,
            y1: y,
            x2: x + width,
            y2: y + height,
        }
    }

    pub fn width(&self) -> Pt {
        self.x2 - self.x1
    }

    pub fn height(&self) -> Pt {
        self.y2 - self.y1
    }

    /// The horizontal centre of the rectangle
    pub fn centre_x(&self) -> Pt {
        (self.x1 + self.x2) / 2.0
    }

    /// The vertical centre of the rectangle
    pub fn centre_y(&self) -> Pt {
        (self.y1 + self.y2) / 2.0
    }

    /// `true` when `other` lies entirely within this rectangle, allowing for
    /// `tolerance` of floating-point slack on every edge
    pub fn contains(&self, other: &Rect, tolerance: f32) -> bool {
        other.x1.0 >= self.x1.0 - tolerance
            && other.y1.0 >= self.y1.0 - tolerance
            && other.x2.0 <= self.x2.0 + tolerance
            && other.y2.0 <= self.y2.0 + tolerance
    }

    /// `true` when the interiors of the two rectangles intersect
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x1 < other.x2 && other.x1 < self.x2 && self.y1 < other.y2 && other.y1 < self.y2
    }
}

impl From<Rect> for pdf_writer::Rect {
    fn from(r: Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}

impl From<&Rect> for pdf_writer::Rect {
    fn from(r: &Rect) -> Self {
        pdf_writer::Rect {
            x1: r.x1.into(),
            y1: r.y1.into(),
            x2: r.x2.into(),
            y2: r.y2.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_rects_do_not_overlap() {
        let a = Rect::from_origin(Pt(0.0), Pt(0.0), Pt(10.0), Pt(10.0));
        let b = Rect::from_origin(Pt(10.0), Pt(0.0), Pt(10.0), Pt(10.0));
        assert!(!a.overlaps(&b));
        let c = Rect::from_origin(Pt(5.0), Pt(5.0), Pt(10.0), Pt(10.0));
        assert!(a.overlaps(&c));
    }

    #[test]
    fn containment_respects_tolerance() {
        let outer = Rect::from_origin(Pt(0.0), Pt(0.0), Pt(100.0), Pt(50.0));
        let inner = Rect::from_origin(Pt(10.0), Pt(10.0), Pt(90.0), Pt(40.0001));
        assert!(outer.contains(&inner, 1e-3));
        assert!(!outer.contains(&inner, 0.0));
        assert_eq!(outer.centre_x(), Pt(50.0));
        assert_eq!(outer.centre_y(), Pt(25.0));
    }
}
