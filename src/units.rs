use derive_more::{Add, AddAssign, Deref, Display, Div, From, Into, Mul, MulAssign, Sub, SubAssign, Sum};

/// Points per inch, the native PDF user-space unit
pub const POINTS_PER_INCH: f32 = 72.0;

/// Millimetres per inch
pub const MM_PER_INCH: f32 = 25.4;

/// A length in PDF points (1/72 inch). All page geometry is expressed in points.
#[derive(
    Debug,
    Default,
    Copy,
    Clone,
    PartialEq,
    PartialOrd,
    Add,
    AddAssign,
    Sub,
    SubAssign,
    Mul,
    MulAssign,
    Div,
    Sum,
    Deref,
    Display,
    From,
    Into,
)]
pub struct Pt(pub f32);

/// A length in millimetres
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Display, From, Into)]
pub struct Mm(pub f32);

/// A length in inches
#[derive(Debug, Default, Copy, Clone, PartialEq, PartialOrd, Add, Sub, Display, From, Into)]
pub struct In(pub f32);

impl Pt {
    /// The larger of two lengths
    pub fn max(self, other: Pt) -> Pt {
        Pt(self.0.max(other.0))
    }

    /// The smaller of two lengths
    pub fn min(self, other: Pt) -> Pt {
        Pt(self.0.min(other.0))
    }
}

impl From<Mm> for Pt {
    fn from(mm: Mm) -> Self {
        Pt(mm.0 * POINTS_PER_INCH / MM_PER_INCH)
    }
}

impl From<In> for Pt {
    fn from(inches: In) -> Self {
        Pt(inches.0 * POINTS_PER_INCH)
    }
}

impl From<Pt> for Mm {
    fn from(pt: Pt) -> Self {
        Mm(pt.0 * MM_PER_INCH / POINTS_PER_INCH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn millimetres_convert_to_points() {
        let pt: Pt = Mm(25.4).into();
        assert!((pt.0 - 72.0).abs() < 1e-4, "25.4mm should be 72pt, got {pt}");
    }

    #[test]
    fn inches_convert_to_points() {
        let pt: Pt = In(0.5).into();
        assert_eq!(pt, Pt(36.0));
    }

    #[test]
    fn points_support_scalar_arithmetic() {
        let a = Pt(10.0) + Pt(5.0) * 2.0;
        assert_eq!(a, Pt(20.0));
        assert_eq!(a / 4.0, Pt(5.0));
        let total: Pt = [Pt(1.0), Pt(2.0), Pt(3.0)].into_iter().sum();
        assert_eq!(total, Pt(6.0));
    }
}
