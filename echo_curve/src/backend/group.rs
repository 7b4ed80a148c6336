//! Affine and Jacobian point representations for `y² = x³ + 7`.
use super::field::FieldElement;
use crate::CURVE;
use subtle::{Choice, ConditionallySelectable};

/// A point in affine coordinates or the point at infinity.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Affine {
    pub x: FieldElement,
    pub y: FieldElement,
    pub infinity: bool,
}

pub const INFINITY: Affine = Affine {
    x: FieldElement::ZERO,
    y: FieldElement::ZERO,
    infinity: true,
};

pub const GENERATOR: Affine = Affine {
    x: FieldElement::from_be_bytes_unchecked(&CURVE.g_x),
    y: FieldElement::from_be_bytes_unchecked(&CURVE.g_y),
    infinity: false,
};

impl Affine {
    pub fn is_on_curve(&self) -> bool {
        self.infinity || self.y.square() == self.x.curve_rhs()
    }

    /// The point with x-coordinate `x` whose y-coordinate has the requested parity.
    pub fn from_x_and_parity(x: FieldElement, y_odd: bool) -> Option<Affine> {
        let y = x.curve_rhs().sqrt()?;
        let y = if y.is_even() == y_odd { -y } else { y };
        Some(Affine {
            x,
            y,
            infinity: false,
        })
    }

    pub fn neg(&self) -> Affine {
        Affine {
            x: self.x,
            y: -self.y,
            infinity: self.infinity,
        }
    }

    pub fn to_jacobian(&self) -> Jacobian {
        if self.infinity {
            return Jacobian::INFINITY;
        }
        Jacobian {
            x: self.x,
            y: self.y,
            z: FieldElement::ONE,
        }
    }
}

/// `(X, Y, Z)` representing `(X/Z², Y/Z³)`. `Z = 0` is the point at infinity.
#[derive(Clone, Copy, Debug)]
pub struct Jacobian {
    pub x: FieldElement,
    pub y: FieldElement,
    pub z: FieldElement,
}

impl Jacobian {
    pub const INFINITY: Jacobian = Jacobian {
        x: FieldElement::ONE,
        y: FieldElement::ONE,
        z: FieldElement::ZERO,
    };

    pub fn is_infinity(&self) -> bool {
        self.z.is_zero()
    }

    pub fn to_affine(&self) -> Affine {
        let zinv = match self.z.invert() {
            Ok(zinv) => zinv,
            Err(_) => return INFINITY,
        };
        let zinv2 = zinv.square();
        Affine {
            x: self.x * zinv2,
            y: self.y * zinv2 * zinv,
            infinity: false,
        }
    }

    pub fn double(&self) -> Jacobian {
        if self.is_infinity() || self.y.is_zero() {
            return Jacobian::INFINITY;
        }
        let a = self.x.square();
        let b = self.y.square();
        let c = b.square();
        let xb = self.x + b;
        let d = xb.square() - a - c;
        let d = d + d;
        let e = a + a + a;
        let f = e.square();
        let x3 = f - (d + d);
        let c8 = {
            let c2 = c + c;
            let c4 = c2 + c2;
            c4 + c4
        };
        let y3 = e * (d - x3) - c8;
        let yz = self.y * self.z;
        Jacobian {
            x: x3,
            y: y3,
            z: yz + yz,
        }
    }

    pub fn add(&self, rhs: &Jacobian) -> Jacobian {
        if self.is_infinity() {
            return *rhs;
        }
        if rhs.is_infinity() {
            return *self;
        }
        let z1z1 = self.z.square();
        let z2z2 = rhs.z.square();
        let u1 = self.x * z2z2;
        let u2 = rhs.x * z1z1;
        let s1 = self.y * rhs.z * z2z2;
        let s2 = rhs.y * self.z * z1z1;
        if u1 == u2 {
            return if s1 == s2 {
                self.double()
            } else {
                Jacobian::INFINITY
            };
        }
        let h = u2 - u1;
        let r = s2 - s1;
        let h2 = h.square();
        let h3 = h * h2;
        let u1h2 = u1 * h2;
        let x3 = r.square() - h3 - (u1h2 + u1h2);
        let y3 = r * (u1h2 - x3) - s1 * h3;
        Jacobian {
            x: x3,
            y: y3,
            z: self.z * rhs.z * h,
        }
    }

    pub fn neg(&self) -> Jacobian {
        Jacobian {
            x: self.x,
            y: -self.y,
            z: self.z,
        }
    }
}

impl ConditionallySelectable for Jacobian {
    fn conditional_select(a: &Self, b: &Self, choice: Choice) -> Self {
        Jacobian {
            x: FieldElement::conditional_select(&a.x, &b.x, choice),
            y: FieldElement::conditional_select(&a.y, &b.y, choice),
            z: FieldElement::conditional_select(&a.z, &b.z, choice),
        }
    }
}
