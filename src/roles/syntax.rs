use tracing::debug;

use crate::assign::Qap;
use crate::cluster::{Cluster, Pam};
use crate::color::Rgb;
use crate::error::{Error, Result};
use crate::metric::{Ciede2000, HueDistance, Metric};

/// Major syntax highlighting groups of an editor colorscheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxGroup {
    /// Comments.
    Comment,
    /// Literals: strings, characters, numbers, booleans.
    Constant,
    /// Variable and function names.
    Identifier,
    /// Keywords, conditionals, loops and operators.
    Statement,
    /// Preprocessor directives and macros.
    PreProc,
    /// Type names and storage classes.
    Type,
    /// Special characters, tags and delimiters.
    Special,
    /// Links and other underlined text.
    Underlined,
}

impl SyntaxGroup {
    /// All groups, in slot order.
    pub const ALL: [SyntaxGroup; 8] = [
        SyntaxGroup::Comment,
        SyntaxGroup::Constant,
        SyntaxGroup::Identifier,
        SyntaxGroup::Statement,
        SyntaxGroup::PreProc,
        SyntaxGroup::Type,
        SyntaxGroup::Special,
        SyntaxGroup::Underlined,
    ];

    fn index(self) -> usize {
        self as usize
    }

    /// Highlight group name.
    pub fn name(self) -> &'static str {
        self.members()[0]
    }

    /// The group name followed by the minor groups that share its color family.
    pub fn members(self) -> &'static [&'static str] {
        match self {
            SyntaxGroup::Comment => &["Comment"],
            SyntaxGroup::Constant => &[
                "Constant",
                "String",
                "Character",
                "Number",
                "Boolean",
                "Float",
            ],
            SyntaxGroup::Identifier => &["Identifier", "Function"],
            SyntaxGroup::Statement => &[
                "Statement",
                "Conditional",
                "Repeat",
                "Label",
                "Operator",
                "Keyword",
                "Exception",
            ],
            SyntaxGroup::PreProc => &["PreProc", "Include", "Define", "Macro", "PreCondit"],
            SyntaxGroup::Type => &["Type", "StorageClass", "Structure", "Typedef"],
            SyntaxGroup::Special => &[
                "Special",
                "SpecialChar",
                "Tag",
                "Delimiter",
                "SpecialComment",
                "Debug",
            ],
            SyntaxGroup::Underlined => &["Underlined"],
        }
    }
}

/// Relative usage weight of each syntax group.
#[derive(Debug, Clone, PartialEq)]
pub struct RoleFrequencies {
    weights: [f32; 8],
}

impl RoleFrequencies {
    /// Equal weight for every group.
    pub fn uniform() -> Self {
        Self {
            weights: [1.0 / 8.0; 8],
        }
    }

    /// Set the weight of one group. Weights must be finite and positive.
    pub fn with(mut self, group: SyntaxGroup, weight: f32) -> Self {
        self.weights[group.index()] = weight;
        self
    }

    /// Weight of one group.
    pub fn get(&self, group: SyntaxGroup) -> f32 {
        self.weights[group.index()]
    }

    /// Weights in [`SyntaxGroup::ALL`] order.
    pub fn as_slice(&self) -> &[f32] {
        &self.weights
    }
}

impl Default for RoleFrequencies {
    /// Rough share of highlighted tokens per group in typical source code.
    fn default() -> Self {
        Self::uniform()
            .with(SyntaxGroup::Comment, 0.10)
            .with(SyntaxGroup::Constant, 0.15)
            .with(SyntaxGroup::Identifier, 0.25)
            .with(SyntaxGroup::Statement, 0.20)
            .with(SyntaxGroup::PreProc, 0.05)
            .with(SyntaxGroup::Type, 0.12)
            .with(SyntaxGroup::Special, 0.10)
            .with(SyntaxGroup::Underlined, 0.03)
    }
}

/// Colors bound to each [`SyntaxGroup`].
#[derive(Debug, Clone)]
pub struct SyntaxPalette {
    /// One cluster per group, in [`SyntaxGroup::ALL`] order.
    clusters: Vec<Cluster<Rgb>>,
}

impl SyntaxPalette {
    /// Group `colors` into one perceptual cluster per syntax group, then give
    /// the most frequent groups the most hue-separated clusters.
    pub fn bind(colors: &[Rgb], frequencies: &RoleFrequencies) -> Result<Self> {
        let groups = SyntaxGroup::ALL.len();
        if colors.len() < groups {
            return Err(Error::InvalidClusterCount {
                requested: groups,
                n_items: colors.len(),
            });
        }

        let clusters = Pam::new(groups).cluster(colors, &Ciede2000)?;

        let slots: Vec<usize> = (0..clusters.len()).collect();
        let medoid_hue =
            |a: &usize, b: &usize| HueDistance.distance(&clusters[*a].medoid, &clusters[*b].medoid);
        let assignment = Qap::new().assign(&slots, frequencies.as_slice(), &medoid_hue)?;
        debug!(cost = assignment.cost, "syntax groups bound");

        let clusters = assignment
            .pairs
            .iter()
            .map(|&(cluster, _)| clusters[cluster].clone())
            .collect();
        Ok(Self { clusters })
    }

    /// The cluster bound to `group`.
    pub fn cluster(&self, group: SyntaxGroup) -> &Cluster<Rgb> {
        &self.clusters[group.index()]
    }

    /// Representative color of `group`.
    pub fn color(&self, group: SyntaxGroup) -> Rgb {
        self.cluster(group).medoid
    }

    /// Endless iterator over the members of the group's cluster.
    pub fn colors(&self, group: SyntaxGroup) -> impl Iterator<Item = Rgb> + '_ {
        self.cluster(group).members.iter().copied().cycle()
    }

    /// `n` colors for the group, cycling through its cluster.
    pub fn cast(&self, group: SyntaxGroup, n: usize) -> Vec<Rgb> {
        self.colors(group).take(n).collect()
    }

    /// Every highlight group name with its color.
    pub fn bindings(&self) -> Vec<(&'static str, Rgb)> {
        SyntaxGroup::ALL
            .iter()
            .flat_map(|&group| {
                let members = group.members();
                members
                    .iter()
                    .copied()
                    .zip(self.cast(group, members.len()))
            })
            .collect()
    }
}
