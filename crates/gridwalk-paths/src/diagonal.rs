//! Diagonal movement policy and the finder configuration bundle.

use std::fmt;
use std::str::FromStr;

use crate::error::ParsePolicyError;

/// Which diagonal steps a search may take.
///
/// A diagonal step from `p` to `p + (dx, dy)` is flanked by the two
/// orthogonal cells `p + (dx, 0)` and `p + (0, dy)`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "kebab-case")
)]
pub enum DiagonalMovement {
    /// Orthogonal (4-way) movement only.
    #[default]
    Never,
    /// Diagonal step allowed when at least one flanking cell is walkable.
    IfAtMostOneObstacle,
    /// Diagonal step allowed only when both flanking cells are walkable.
    OnlyWhenNoObstacles,
    /// Diagonal step allowed regardless of the flanking cells.
    Always,
}

impl DiagonalMovement {
    /// Every policy, from most to least restrictive about flanks.
    pub const ALL: [DiagonalMovement; 4] = [
        DiagonalMovement::Never,
        DiagonalMovement::IfAtMostOneObstacle,
        DiagonalMovement::OnlyWhenNoObstacles,
        DiagonalMovement::Always,
    ];

    /// Whether any diagonal step can ever be taken under this policy.
    #[inline]
    pub fn allows_diagonals(self) -> bool {
        self != DiagonalMovement::Never
    }

    /// Whether a diagonal step whose flanking cells have the given
    /// walkability is admitted.
    #[inline]
    pub fn admits(self, flank_a: bool, flank_b: bool) -> bool {
        match self {
            DiagonalMovement::Never => false,
            DiagonalMovement::IfAtMostOneObstacle => flank_a || flank_b,
            DiagonalMovement::OnlyWhenNoObstacles => flank_a && flank_b,
            DiagonalMovement::Always => true,
        }
    }

    fn name(self) -> &'static str {
        match self {
            DiagonalMovement::Never => "never",
            DiagonalMovement::IfAtMostOneObstacle => "if-at-most-one-obstacle",
            DiagonalMovement::OnlyWhenNoObstacles => "only-when-no-obstacles",
            DiagonalMovement::Always => "always",
        }
    }
}

impl fmt::Display for DiagonalMovement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DiagonalMovement {
    type Err = ParsePolicyError;

    /// Accepts the kebab-case names, case-insensitively, with `_` allowed
    /// in place of `-`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let norm = s.trim().to_ascii_lowercase().replace('_', "-");
        DiagonalMovement::ALL
            .into_iter()
            .find(|m| m.name() == norm)
            .ok_or_else(|| ParsePolicyError(s.to_string()))
    }
}

/// Configuration bundle for a finder.
///
/// `allow_diagonal` and `dont_cross_corners` are legacy switches kept for
/// older configurations; an explicit `diagonal_movement` overrides both.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct FinderOptions {
    #[cfg_attr(feature = "serde", serde(alias = "diagonalMovement"))]
    pub diagonal_movement: Option<DiagonalMovement>,
    #[cfg_attr(feature = "serde", serde(alias = "allowDiagonal"))]
    pub allow_diagonal: bool,
    #[cfg_attr(feature = "serde", serde(alias = "dontCrossCorners"))]
    pub dont_cross_corners: bool,
}

impl FinderOptions {
    /// Options that select `policy` directly.
    pub fn with_policy(policy: DiagonalMovement) -> Self {
        Self {
            diagonal_movement: Some(policy),
            ..Self::default()
        }
    }

    /// Options expressed through the two legacy flags only.
    pub fn legacy(allow_diagonal: bool, dont_cross_corners: bool) -> Self {
        Self {
            diagonal_movement: None,
            allow_diagonal,
            dont_cross_corners,
        }
    }

    /// Resolve the options into one concrete policy.
    pub fn resolve(&self) -> DiagonalMovement {
        if let Some(policy) = self.diagonal_movement {
            return policy;
        }
        match (self.allow_diagonal, self.dont_cross_corners) {
            (false, _) => DiagonalMovement::Never,
            (true, true) => DiagonalMovement::OnlyWhenNoObstacles,
            (true, false) => DiagonalMovement::IfAtMostOneObstacle,
        }
    }
}

impl From<DiagonalMovement> for FinderOptions {
    fn from(policy: DiagonalMovement) -> Self {
        Self::with_policy(policy)
    }
}
