//! Penalty policy for incomplete and infeasible decodings.

/// How decodings that are not legal assignments are scored.
///
/// - Incomplete (some demand unmet, or surplus bitmap genes):
///   `large_penalty + penalty_scale × (missing + excess)`
/// - Complete but violating a separation: `large_penalty`
///
/// `large_penalty` must exceed every span a decoder can produce, so an
/// illegal candidate always ranks worse than a legal one. The severity term
/// gives a search something to follow among incomplete candidates.
///
/// # Examples
///
/// ```
/// use u_fap::objective::PenaltyPolicy;
///
/// let policy = PenaltyPolicy::default().with_penalty_scale(10.0);
/// assert_eq!(policy.incomplete(3), 1e9 + 30.0);
/// assert_eq!(policy.infeasible(), 1e9);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PenaltyPolicy {
    /// Base penalty for any illegal decoding.
    pub large_penalty: f64,

    /// Added per missing or surplus frequency.
    pub penalty_scale: f64,
}

impl PenaltyPolicy {
    /// Default base penalty.
    pub const DEFAULT_LARGE_PENALTY: f64 = 1e9;

    /// Default per-unit penalty.
    pub const DEFAULT_PENALTY_SCALE: f64 = 1e6;

    /// Default policy with `large_penalty` raised above `frequency_bound`
    /// when necessary.
    pub fn for_bound(frequency_bound: i64) -> Self {
        let floor = frequency_bound as f64 + 1.0;
        Self {
            large_penalty: Self::DEFAULT_LARGE_PENALTY.max(floor),
            ..Self::default()
        }
    }

    /// Sets the base penalty.
    pub fn with_large_penalty(mut self, penalty: f64) -> Self {
        self.large_penalty = penalty;
        self
    }

    /// Sets the per-unit penalty.
    pub fn with_penalty_scale(mut self, scale: f64) -> Self {
        self.penalty_scale = scale;
        self
    }

    /// Fitness of a decoding short of (or over) demand by `shortfall` units.
    pub fn incomplete(&self, shortfall: usize) -> f64 {
        self.large_penalty + self.penalty_scale * shortfall as f64
    }

    /// Fitness of a complete decoding that violates a separation.
    pub fn infeasible(&self) -> f64 {
        self.large_penalty
    }

    /// Validates the policy against an exclusive bound on decoded frequencies.
    pub fn validate(&self, frequency_bound: i64) -> Result<(), String> {
        if !self.large_penalty.is_finite() {
            return Err("large_penalty must be finite".into());
        }
        if !self.penalty_scale.is_finite() || self.penalty_scale < 0.0 {
            return Err(format!(
                "penalty_scale must be finite and non-negative, got {}",
                self.penalty_scale
            ));
        }
        if self.large_penalty <= frequency_bound as f64 {
            return Err(format!(
                "large_penalty ({}) must exceed the largest achievable span (< {})",
                self.large_penalty, frequency_bound
            ));
        }
        Ok(())
    }
}

impl Default for PenaltyPolicy {
    fn default() -> Self {
        Self {
            large_penalty: Self::DEFAULT_LARGE_PENALTY,
            penalty_scale: Self::DEFAULT_PENALTY_SCALE,
        }
    }
}
