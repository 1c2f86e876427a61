//! Trigonometric and hyperbolic functions. Angles are in radians.

use rug::Complex;

unary_complex! {
    /// The sine.
    Sin; Complex::sin,
    /// The cosine.
    Cos; Complex::cos,
    /// The tangent.
    Tan; Complex::tan,
    /// The cosecant, `1/Sin[x]`.
    Csc; |n: Complex| n.sin().recip(),
    /// The secant, `1/Cos[x]`.
    Sec; |n: Complex| n.cos().recip(),
    /// The cotangent, `1/Tan[x]`.
    Cot; |n: Complex| n.tan().recip(),
    /// The inverse sine.
    ArcSin; Complex::asin,
    /// The inverse cosine.
    ArcCos; Complex::acos,
    /// The inverse tangent.
    ArcTan; Complex::atan,
    /// The hyperbolic sine.
    Sinh; Complex::sinh,
    /// The hyperbolic cosine.
    Cosh; Complex::cosh,
    /// The hyperbolic tangent.
    Tanh; Complex::tanh,
}
