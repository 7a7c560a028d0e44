//! Distance functions between palette points.
//!
//! Every algorithm in this crate is generic over a [`Metric`]. Any closure
//! `Fn(&P, &P) -> f32` is a metric, so ad-hoc distances need no wrapper type:
//!
//! ```rust
//! use swatchbook::Metric;
//!
//! let abs = |a: &f32, b: &f32| (a - b).abs();
//! assert_eq!(abs.distance(&1.0, &4.0), 3.0);
//! ```
//!
//! The named metrics cover the color spaces the role layers work in. They are
//! expected to be symmetric and non-negative, and zero for equal points; the
//! triangle inequality is not required.

use palette::color_difference::Ciede2000 as _;
use palette::Lab;

use crate::color::{Hsl, Rgb};

/// A symmetric dissimilarity between two points.
pub trait Metric<P> {
    /// Compute the distance between `a` and `b`.
    fn distance(&self, a: &P, b: &P) -> f32;
}

impl<P, F> Metric<P> for F
where
    F: Fn(&P, &P) -> f32,
{
    #[inline]
    fn distance(&self, a: &P, b: &P) -> f32 {
        self(a, b)
    }
}

/// Circular hue distance in degrees: `min(|h1 - h2|, 360 - |h1 - h2|)`.
///
/// Ranges over `[0, 180]`. Saturation and lightness are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct HueDistance;

impl HueDistance {
    /// Distance between two raw hue angles in degrees.
    pub fn between(h1: f32, h2: f32) -> f32 {
        let diff = (h1 - h2).abs() % 360.0;
        diff.min(360.0 - diff)
    }
}

impl Metric<f32> for HueDistance {
    fn distance(&self, a: &f32, b: &f32) -> f32 {
        Self::between(*a, *b)
    }
}

impl Metric<Hsl> for HueDistance {
    fn distance(&self, a: &Hsl, b: &Hsl) -> f32 {
        Self::between(a.hue, b.hue)
    }
}

impl Metric<Rgb> for HueDistance {
    fn distance(&self, a: &Rgb, b: &Rgb) -> f32 {
        Self::between(a.to_hsl().hue, b.to_hsl().hue)
    }
}

/// Absolute lightness difference on HSL colors.
#[derive(Debug, Clone, Copy, Default)]
pub struct LightnessDistance;

impl Metric<Hsl> for LightnessDistance {
    fn distance(&self, a: &Hsl, b: &Hsl) -> f32 {
        (a.lightness - b.lightness).abs()
    }
}

/// CIEDE2000 color difference, computed in CIELAB (D65).
#[derive(Debug, Clone, Copy, Default)]
pub struct Ciede2000;

impl Metric<Lab> for Ciede2000 {
    fn distance(&self, a: &Lab, b: &Lab) -> f32 {
        a.difference(*b)
    }
}

impl Metric<Rgb> for Ciede2000 {
    fn distance(&self, a: &Rgb, b: &Rgb) -> f32 {
        a.to_lab().difference(b.to_lab())
    }
}

/// Euclidean distance over 8-bit sRGB channels.
#[derive(Debug, Clone, Copy, Default)]
pub struct EuclideanRgb;

impl Metric<Rgb> for EuclideanRgb {
    fn distance(&self, a: &Rgb, b: &Rgb) -> f32 {
        let dr = a.r as f32 - b.r as f32;
        let dg = a.g as f32 - b.g as f32;
        let db = a.b as f32 - b.b as f32;
        (dr * dr + dg * dg + db * db).sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hue_distance_wraps_around() {
        assert_eq!(HueDistance::between(50.0, 100.0), 50.0);
        assert_eq!(HueDistance::between(0.0, 100.0), 100.0);
        assert_eq!(HueDistance::between(359.0, 1.0), 2.0);
        assert_eq!(HueDistance::between(0.0, 359.0), 1.0);
        assert_eq!(HueDistance::between(0.0, 180.0), 180.0);
    }

    #[test]
    fn hue_distance_on_hsl_ignores_saturation_and_lightness() {
        let a = Hsl::new(10.0, 0.2, 0.5);
        let b = Hsl::new(350.0, 0.9, 0.1);
        assert_eq!(HueDistance.distance(&a, &b), 20.0);
    }

    #[test]
    fn closures_are_metrics() {
        let abs = |a: &i32, b: &i32| (a - b).abs() as f32;
        assert_eq!(abs.distance(&-2, &5), 7.0);
    }

    #[test]
    fn ciede2000_is_zero_for_equal_colors() {
        let c = Rgb::new(120, 40, 200);
        assert!(Ciede2000.distance(&c, &c).abs() < 1e-4);
    }

    #[test]
    fn ciede2000_is_symmetric_and_orders_differences() {
        let red = Rgb::new(200, 30, 30);
        let dark_red = Rgb::new(180, 30, 30);
        let blue = Rgb::new(30, 30, 200);

        let near = Ciede2000.distance(&red, &dark_red);
        let far = Ciede2000.distance(&red, &blue);
        assert!(near < far, "near {near} should be below far {far}");
        assert!((far - Ciede2000.distance(&blue, &red)).abs() < 1e-3);
    }

    #[test]
    fn euclidean_rgb_black_white() {
        let d = EuclideanRgb.distance(&Rgb::new(0, 0, 0), &Rgb::new(255, 255, 255));
        assert!((d - 441.673).abs() < 0.01);
    }

    #[test]
    fn lightness_distance() {
        let a = Hsl::new(0.0, 0.0, 0.25);
        let b = Hsl::new(0.0, 0.0, 0.75);
        assert_eq!(LightnessDistance.distance(&a, &b), 0.5);
    }
}
