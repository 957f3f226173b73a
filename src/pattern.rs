//! Step patterns: the transition grammar of the alignment lattice.
//!
//! A step pattern lists the local moves allowed while searching for the
//! minimum-cost path, together with per-edge weights and a normalization
//! guide. The built-in catalog reproduces the published families: the
//! well-known symmetric1/symmetric2/asymmetric patterns, the Sakoe-Chiba
//! P-family (Sakoe1978), the Rabiner-Myers type I-IV sub-variants a-d with
//! their smoothed `s` versions (Myers1980), mori2006, and unitary.

use std::fmt;
use std::str::FromStr;

use crate::error::ConfigError;

/// Rule for scaling the total alignment cost by a function of the sequence
/// lengths, so that distances are comparable across lengths.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NormalizeGuide {
    /// Divide by the query length.
    N,
    /// Divide by the per-column reference index `1..=m`.
    M,
    /// Divide by query length plus the per-column reference index.
    NPlusM,
    /// Not normalizable; only the raw distance is defined.
    None,
}

impl NormalizeGuide {
    /// Return true unless the guide is [`NormalizeGuide::None`].
    #[must_use]
    pub fn is_normalizable(self) -> bool {
        self != Self::None
    }

    /// Return the guide's canonical string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::N => "N",
            Self::M => "M",
            Self::NPlusM => "N+M",
            Self::None => "none",
        }
    }
}

impl FromStr for NormalizeGuide {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "N" => Ok(Self::N),
            "M" => Ok(Self::M),
            "N+M" => Ok(Self::NPlusM),
            "none" => Ok(Self::None),
            _ => Err(ConfigError::InvalidNormalizeGuide {
                guide: s.to_string(),
            }),
        }
    }
}

/// One transition rule: a chain of relative `(di, dj)` offsets from the
/// target cell, earliest predecessor first, terminating at `(0, 0)`, with
/// one weight per edge. `weights[k]` applies to the pairwise distance at
/// `offsets[k + 1]`; the first chain node carries no incoming weight.
#[derive(Debug, Clone, PartialEq)]
pub struct StepRule {
    offsets: Vec<(i32, i32)>,
    weights: Vec<f64>,
}

impl StepRule {
    /// Create a rule, validating the chain shape.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ConfigError::RuleTooShort`] | Fewer than two offsets |
    /// | [`ConfigError::RuleNotTerminated`] | Last offset is not `(0, 0)` |
    /// | [`ConfigError::ZeroFirstOffset`] | First offset is `(0, 0)` |
    /// | [`ConfigError::PositiveOffset`] | Any offset is positive in either axis |
    /// | [`ConfigError::WeightCountMismatch`] | `weights.len() != offsets.len() - 1` |
    /// | [`ConfigError::InvalidWeight`] | Any weight is NaN, infinite, or negative |
    pub fn new(offsets: Vec<(i32, i32)>, weights: Vec<f64>) -> Result<Self, ConfigError> {
        if offsets.len() < 2 {
            return Err(ConfigError::RuleTooShort);
        }
        let last = offsets[offsets.len() - 1];
        if last != (0, 0) {
            return Err(ConfigError::RuleNotTerminated {
                di: last.0,
                dj: last.1,
            });
        }
        if offsets[0] == (0, 0) {
            return Err(ConfigError::ZeroFirstOffset);
        }
        if let Some(&(di, dj)) = offsets.iter().find(|&&(di, dj)| di > 0 || dj > 0) {
            return Err(ConfigError::PositiveOffset { di, dj });
        }
        if weights.len() != offsets.len() - 1 {
            return Err(ConfigError::WeightCountMismatch {
                offsets: offsets.len(),
                expected: offsets.len() - 1,
                got: weights.len(),
            });
        }
        if let Some(&w) = weights.iter().find(|w| !w.is_finite() || **w < 0.0) {
            return Err(ConfigError::InvalidWeight { weight: w });
        }
        Ok(Self { offsets, weights })
    }

    /// Return the offset chain, earliest predecessor first.
    #[must_use]
    pub fn offsets(&self) -> &[(i32, i32)] {
        &self.offsets
    }

    /// Return the edge weights; `weights()[k]` applies to `offsets()[k + 1]`.
    #[must_use]
    pub fn weights(&self) -> &[f64] {
        &self.weights
    }

    /// Return the first predecessor offset of the chain.
    pub(crate) fn first(&self) -> (i32, i32) {
        self.offsets[0]
    }
}

/// Immutable transition grammar: an ordered rule set plus a normalization
/// guide. Rule order matters: on cost ties the lowest-indexed rule wins,
/// both in the DP and in the backtracker.
#[derive(Debug, Clone, PartialEq)]
pub struct StepPattern {
    name: String,
    rules: Vec<StepRule>,
    guide: NormalizeGuide,
}

type RuleSpec = (&'static [(i32, i32)], &'static [f64]);

// Catalog tables, rule/weight values from the published definitions.
// Several names share a table (symmetricP0 is symmetric2; typeIbs is typeIb).

const SYMMETRIC1: &[RuleSpec] = &[
    (&[(-1, 0), (0, 0)], &[1.0]),
    (&[(-1, -1), (0, 0)], &[1.0]),
    (&[(0, -1), (0, 0)], &[1.0]),
];

const SYMMETRIC2: &[RuleSpec] = &[
    (&[(-1, 0), (0, 0)], &[1.0]),
    (&[(-1, -1), (0, 0)], &[2.0]),
    (&[(0, -1), (0, 0)], &[1.0]),
];

const SYMMETRIC_P05: &[RuleSpec] = &[
    (&[(-1, -3), (0, -2), (0, -1), (0, 0)], &[2.0, 1.0, 1.0]),
    (&[(-1, -2), (0, -1), (0, 0)], &[2.0, 1.0]),
    (&[(-1, -1), (0, 0)], &[2.0]),
    (&[(-2, -1), (-1, 0), (0, 0)], &[2.0, 1.0]),
    (&[(-3, -1), (-2, 0), (-1, 0), (0, 0)], &[2.0, 1.0, 1.0]),
];

const SYMMETRIC_P1: &[RuleSpec] = &[
    (&[(-2, -1), (-1, 0), (0, 0)], &[2.0, 1.0]),
    (&[(-1, -1), (0, 0)], &[2.0]),
    (&[(-1, -2), (0, -1), (0, 0)], &[2.0, 1.0]),
];

const SYMMETRIC_P2: &[RuleSpec] = &[
    (&[(-3, -2), (-2, -1), (-1, 0), (0, 0)], &[2.0, 2.0, 1.0]),
    (&[(-1, -1), (0, 0)], &[2.0]),
    (&[(-2, -3), (-1, -2), (0, -1), (0, 0)], &[2.0, 2.0, 1.0]),
];

const ASYMMETRIC: &[RuleSpec] = &[
    (&[(-1, 0), (0, 0)], &[1.0]),
    (&[(-1, -1), (0, 0)], &[1.0]),
    (&[(-1, -2), (0, 0)], &[1.0]),
];

const ASYMMETRIC_P0: &[RuleSpec] = &[
    (&[(0, -1), (0, 0)], &[0.0]),
    (&[(-1, -1), (0, 0)], &[1.0]),
    (&[(-1, 0), (0, 0)], &[1.0]),
];

const ASYMMETRIC_P05: &[RuleSpec] = &[
    (
        &[(-1, -3), (0, -2), (0, -1), (0, 0)],
        &[1.0 / 3.0, 1.0 / 3.0, 1.0 / 3.0],
    ),
    (&[(-1, -2), (0, -1), (0, 0)], &[0.5, 0.5]),
    (&[(-1, -1), (0, 0)], &[1.0]),
    (&[(-2, -1), (-1, 0), (0, 0)], &[1.0, 1.0]),
    (&[(-3, -1), (-2, 0), (-1, 0), (0, 0)], &[1.0, 1.0, 1.0]),
];

const ASYMMETRIC_P1: &[RuleSpec] = &[
    (&[(-1, -2), (0, -1), (0, 0)], &[0.5, 0.5]),
    (&[(-1, -1), (0, 0)], &[1.0]),
    (&[(-2, -1), (-1, 0), (0, 0)], &[1.0, 1.0]),
];

const ASYMMETRIC_P2: &[RuleSpec] = &[
    (
        &[(-2, -3), (-1, -2), (0, -1), (0, 0)],
        &[2.0 / 3.0, 2.0 / 3.0, 2.0 / 3.0],
    ),
    (&[(-1, -1), (0, 0)], &[1.0]),
    (&[(-3, -2), (-2, -1), (-1, 0), (0, 0)], &[1.0, 1.0, 1.0]),
];

const TYPE_IA: &[RuleSpec] = &[
    (&[(-2, -1), (-1, 0), (0, 0)], &[1.0, 0.0]),
    (&[(-1, -1), (0, 0)], &[1.0]),
    (&[(-1, -2), (0, -1), (0, 0)], &[1.0, 0.0]),
];

const TYPE_IB: &[RuleSpec] = &[
    (&[(-2, -1), (-1, 0), (0, 0)], &[1.0, 1.0]),
    (&[(-1, -1), (0, 0)], &[1.0]),
    (&[(-1, -2), (0, -1), (0, 0)], &[1.0, 1.0]),
];

const TYPE_IC: &[RuleSpec] = &[
    (&[(-2, -1), (-1, 0), (0, 0)], &[1.0, 1.0]),
    (&[(-1, -1), (0, 0)], &[1.0]),
    (&[(-1, -2), (0, -1), (0, 0)], &[1.0, 0.0]),
];

const TYPE_ID: &[RuleSpec] = &[
    (&[(-2, -1), (-1, 0), (0, 0)], &[2.0, 1.0]),
    (&[(-1, -1), (0, 0)], &[2.0]),
    (&[(-1, -2), (0, -1), (0, 0)], &[2.0, 1.0]),
];

const TYPE_IAS: &[RuleSpec] = &[
    (&[(-2, -1), (-1, 0), (0, 0)], &[0.5, 0.5]),
    (&[(-1, -1), (0, 0)], &[1.0]),
    (&[(-1, -2), (0, -1), (0, 0)], &[0.5, 0.5]),
];

const TYPE_ICS: &[RuleSpec] = &[
    (&[(-2, -1), (-1, 0), (0, 0)], &[1.0, 1.0]),
    (&[(-1, -1), (0, 0)], &[1.0]),
    (&[(-1, -2), (0, -1), (0, 0)], &[0.5, 0.5]),
];

const TYPE_IDS: &[RuleSpec] = &[
    (&[(-2, -1), (-1, 0), (0, 0)], &[1.5, 1.5]),
    (&[(-1, -1), (0, 0)], &[2.0]),
    (&[(-1, -2), (0, -1), (0, 0)], &[1.5, 1.5]),
];

const TYPE_IIA: &[RuleSpec] = &[
    (&[(-1, -1), (0, 0)], &[1.0]),
    (&[(-1, -2), (0, 0)], &[1.0]),
    (&[(-2, -1), (0, 0)], &[1.0]),
];

const TYPE_IIB: &[RuleSpec] = &[
    (&[(-1, -1), (0, 0)], &[1.0]),
    (&[(-1, -2), (0, 0)], &[2.0]),
    (&[(-2, -1), (0, 0)], &[2.0]),
];

const TYPE_IIC: &[RuleSpec] = &[
    (&[(-1, -1), (0, 0)], &[1.0]),
    (&[(-1, -2), (0, 0)], &[1.0]),
    (&[(-2, -1), (0, 0)], &[2.0]),
];

const TYPE_IID: &[RuleSpec] = &[
    (&[(-1, -1), (0, 0)], &[2.0]),
    (&[(-1, -2), (0, 0)], &[3.0]),
    (&[(-2, -1), (0, 0)], &[3.0]),
];

const TYPE_IIIC: &[RuleSpec] = &[
    (&[(-1, -2), (0, 0)], &[1.0]),
    (&[(-1, -1), (0, 0)], &[1.0]),
    (&[(-2, -1), (-1, 0), (0, 0)], &[1.0, 1.0]),
    (&[(-2, -2), (-1, 0), (0, 0)], &[1.0, 1.0]),
];

const TYPE_IVC: &[RuleSpec] = &[
    (&[(-1, -1), (0, 0)], &[1.0]),
    (&[(-1, -2), (0, 0)], &[1.0]),
    (&[(-1, -3), (0, 0)], &[1.0]),
    (&[(-2, -1), (-1, 0), (0, 0)], &[1.0, 1.0]),
    (&[(-2, -2), (-1, 0), (0, 0)], &[1.0, 1.0]),
    (&[(-2, -3), (-1, 0), (0, 0)], &[1.0, 1.0]),
    (&[(-3, -1), (-2, 0), (-1, 0), (0, 0)], &[1.0, 1.0, 1.0]),
    (&[(-3, -2), (-2, 0), (-1, 0), (0, 0)], &[1.0, 1.0, 1.0]),
    (&[(-3, -3), (-2, 0), (-1, 0), (0, 0)], &[1.0, 1.0, 1.0]),
];

const MORI2006: &[RuleSpec] = &[
    (&[(-2, -1), (-1, 0), (0, 0)], &[2.0, 1.0]),
    (&[(-1, -1), (0, 0)], &[3.0]),
    (&[(-1, -2), (0, -1), (0, 0)], &[3.0, 3.0]),
];

const UNITARY: &[RuleSpec] = &[(&[(-1, -1), (0, 0)], &[1.0])];

fn catalog(name: &str) -> Option<(&'static [RuleSpec], NormalizeGuide)> {
    use NormalizeGuide::{NPlusM, None as NoGuide, M, N};
    Some(match name {
        "symmetric1" => (SYMMETRIC1, NoGuide),
        "symmetric2" => (SYMMETRIC2, NPlusM),
        "symmetricP0" => (SYMMETRIC2, NPlusM),
        "symmetricP05" => (SYMMETRIC_P05, NPlusM),
        "symmetricP1" => (SYMMETRIC_P1, NPlusM),
        "symmetricP2" => (SYMMETRIC_P2, NPlusM),
        "asymmetric" => (ASYMMETRIC, N),
        "asymmetricP0" => (ASYMMETRIC_P0, N),
        "asymmetricP05" => (ASYMMETRIC_P05, N),
        "asymmetricP1" => (ASYMMETRIC_P1, N),
        "asymmetricP2" => (ASYMMETRIC_P2, N),
        "typeIa" => (TYPE_IA, NoGuide),
        "typeIb" => (TYPE_IB, NoGuide),
        "typeIc" => (TYPE_IC, N),
        "typeId" => (TYPE_ID, NPlusM),
        "typeIas" => (TYPE_IAS, NoGuide),
        "typeIbs" => (TYPE_IB, NoGuide),
        "typeIcs" => (TYPE_ICS, N),
        "typeIds" => (TYPE_IDS, NPlusM),
        "typeIIa" => (TYPE_IIA, NoGuide),
        "typeIIb" => (TYPE_IIB, NoGuide),
        "typeIIc" => (TYPE_IIC, NoGuide),
        "typeIId" => (TYPE_IID, NPlusM),
        "typeIIIc" => (TYPE_IIIC, N),
        "typeIVc" => (TYPE_IVC, N),
        "mori2006" => (MORI2006, M),
        "unitary" => (UNITARY, N),
        _ => return None,
    })
}

/// Names of every built-in pattern, in catalog order.
pub const BUILTIN_PATTERNS: &[&str] = &[
    "symmetric1",
    "symmetric2",
    "symmetricP0",
    "symmetricP05",
    "symmetricP1",
    "symmetricP2",
    "asymmetric",
    "asymmetricP0",
    "asymmetricP05",
    "asymmetricP1",
    "asymmetricP2",
    "typeIa",
    "typeIb",
    "typeIc",
    "typeId",
    "typeIas",
    "typeIbs",
    "typeIcs",
    "typeIds",
    "typeIIa",
    "typeIIb",
    "typeIIc",
    "typeIId",
    "typeIIIc",
    "typeIVc",
    "mori2006",
    "unitary",
];

impl StepPattern {
    /// Resolve a built-in pattern by name.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ConfigError::UnknownPattern`] | `name` is not in [`BUILTIN_PATTERNS`] |
    pub fn named(name: &str) -> Result<Self, ConfigError> {
        let (specs, guide) = catalog(name).ok_or_else(|| ConfigError::UnknownPattern {
            name: name.to_string(),
        })?;
        let rules = specs
            .iter()
            .map(|&(offsets, weights)| StepRule::new(offsets.to_vec(), weights.to_vec()))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            name: name.to_string(),
            rules,
            guide,
        })
    }

    /// Build a user-defined pattern from validated rules and a guide.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`ConfigError::EmptyPattern`] | `rules` is empty |
    pub fn custom(rules: Vec<StepRule>, guide: NormalizeGuide) -> Result<Self, ConfigError> {
        if rules.is_empty() {
            return Err(ConfigError::EmptyPattern);
        }
        Ok(Self {
            name: "user".to_string(),
            rules,
            guide,
        })
    }

    /// Return the pattern name (`"user"` for custom patterns).
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Return the ordered rule set.
    #[must_use]
    pub fn rules(&self) -> &[StepRule] {
        &self.rules
    }

    /// Return the normalization guide.
    #[must_use]
    pub fn guide(&self) -> NormalizeGuide {
        self.guide
    }

    /// Return true if a normalized distance is defined for this pattern.
    #[must_use]
    pub fn is_normalizable(&self) -> bool {
        self.guide.is_normalizable()
    }

    /// Normalize a cumulative cost at terminal column `j` (0-based) for a
    /// query of length `n`. Returns `None` when the pattern is
    /// non-normalizable.
    #[must_use]
    pub fn normalize(&self, cost: f64, n: usize, j: usize) -> Option<f64> {
        match self.guide {
            NormalizeGuide::N => Some(cost / n as f64),
            NormalizeGuide::M => Some(cost / (j + 1) as f64),
            NormalizeGuide::NPlusM => Some(cost / (n + j + 1) as f64),
            NormalizeGuide::None => None,
        }
    }

    /// Normalize an entire terminal row for a query of length `n`.
    /// Element `j` is divided by the guide's denominator at column `j`.
    #[must_use]
    pub fn normalize_row(&self, row: &[f64], n: usize) -> Option<Vec<f64>> {
        if !self.is_normalizable() {
            return None;
        }
        Some(
            row.iter()
                .enumerate()
                .map(|(j, &v)| self.normalize(v, n, j).unwrap_or(v))
                .collect(),
        )
    }
}

impl fmt::Display for StepPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} pattern:", self.name)?;
        for (ridx, rule) in self.rules.iter().enumerate() {
            write!(f, "rule {ridx}: ({}, {})", rule.offsets[0].0, rule.offsets[0].1)?;
            for (k, &(di, dj)) in rule.offsets.iter().enumerate().skip(1) {
                write!(f, " - [{}] - ({di}, {dj})", rule.weights[k - 1])?;
            }
            writeln!(f)?;
        }
        write!(f, "normalization guide: {}", self.guide.as_str())
    }
}
