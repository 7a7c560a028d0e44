use tracing::debug;

use crate::cluster::{Cluster, Pam};
use crate::color::{Hsl, Rgb};
use crate::error::Result;
use crate::metric::{HueDistance, LightnessDistance, Metric};

/// Number of hue families: the eight ANSI colors minus black and white.
const HUE_FAMILIES: usize = 6;

/// How hue families are placed on ANSI slots 1-6 (and 9-14).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnsiLayout {
    /// Families in cluster order.
    #[default]
    Simple,
    /// Reserve slot 1 for a red family and slot 2 for a green one, falling
    /// back to stock red/green when the palette has none.
    RedGreen,
}

/// A 16-color terminal palette.
#[derive(Debug, Clone, PartialEq)]
pub struct AnsiPalette {
    slots: [Rgb; 16],
}

/// A color with its HSL coordinates cached for the hue and lightness metrics.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tone {
    rgb: Rgb,
    hsl: Hsl,
}

impl Tone {
    fn new(rgb: Rgb) -> Self {
        Self {
            rgb,
            hsl: rgb.to_hsl(),
        }
    }

    fn from_hsl(hue: f32, saturation: f32, lightness: f32) -> Self {
        Self::new(Rgb::from_hsl(Hsl::new(hue, saturation, lightness)))
    }
}

/// Normal and bright variant of one hue family.
type Pair = (Tone, Tone);

impl AnsiPalette {
    /// Classify `colors` into six hue families, each split into a darker
    /// "normal" and a lighter "bright" variant.
    pub fn classify(colors: &[Rgb], layout: AnsiLayout) -> Result<Self> {
        let tones: Vec<Tone> = colors.iter().copied().map(Tone::new).collect();
        let hue = |a: &Tone, b: &Tone| HueDistance.distance(&a.hsl, &b.hsl);
        let families = Pam::new(HUE_FAMILIES).cluster(&tones, &hue)?;
        let pairs = families
            .iter()
            .map(split_lightness)
            .collect::<Result<Vec<Pair>>>()?;

        let accents = match layout {
            AnsiLayout::Simple => pairs,
            AnsiLayout::RedGreen => red_green_order(pairs),
        };

        let gray = |lightness: f32| Rgb::from_hsl(Hsl::new(0.0, 0.0, lightness));
        let mut slots = [Rgb::new(0, 0, 0); 16];
        slots[0] = gray(0.0);
        slots[8] = gray(0.3);
        slots[7] = gray(0.7);
        slots[15] = gray(1.0);
        for (i, (normal, bright)) in accents.into_iter().take(HUE_FAMILIES).enumerate() {
            slots[1 + i] = normal.rgb;
            slots[9 + i] = bright.rgb;
        }

        debug!(n = colors.len(), ?layout, "ansi palette classified");
        Ok(Self { slots })
    }

    /// All sixteen slots, ANSI order.
    pub fn slots(&self) -> &[Rgb; 16] {
        &self.slots
    }

    /// Color of ANSI slot `index`, if it is below 16.
    pub fn slot(&self, index: usize) -> Option<Rgb> {
        self.slots.get(index).copied()
    }
}

/// Split a hue family on lightness; a single color serves as both variants.
fn split_lightness(family: &Cluster<Tone>) -> Result<Pair> {
    if family.members.len() < 2 {
        return Ok((family.medoid, family.medoid));
    }
    let lightness = |a: &Tone, b: &Tone| LightnessDistance.distance(&a.hsl, &b.hsl);
    let halves = Pam::new(2).cluster(&family.members, &lightness)?;
    let (a, b) = (halves[0].medoid, halves[1].medoid);
    Ok(if a.hsl.lightness < b.hsl.lightness {
        (a, b)
    } else {
        (b, a)
    })
}

fn is_red(hue: f32) -> bool {
    !(25.0..=345.0).contains(&hue)
}

fn is_green(hue: f32) -> bool {
    hue > 60.0 && hue < 160.0
}

/// Red first, green second, then the remaining families in order.
fn red_green_order(pairs: Vec<Pair>) -> Vec<Pair> {
    let mut red = None;
    let mut green = None;
    let mut others = Vec::with_capacity(pairs.len());
    for pair in pairs {
        let hue = pair.0.hsl.hue;
        if red.is_none() && is_red(hue) {
            red = Some(pair);
        } else if green.is_none() && is_green(hue) {
            green = Some(pair);
        } else {
            others.push(pair);
        }
    }

    let red = red.unwrap_or_else(|| {
        (
            Tone::from_hsl(0.0, 1.0, 0.45),
            Tone::from_hsl(0.0, 1.0, 0.75),
        )
    });
    let green = green.unwrap_or_else(|| {
        (
            Tone::from_hsl(140.0, 1.0, 0.3),
            Tone::from_hsl(120.0, 1.0, 0.7),
        )
    });

    let mut ordered = vec![red, green];
    ordered.extend(others);
    ordered
}
