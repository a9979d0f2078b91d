//! Fixed FMEA scoring limits and RPN risk bands
//!
//! The band edges are not operator-tunable: a mean RPN sitting exactly on an
//! edge belongs to the lower band (strict `>` comparison).

/// FMEA factor and RPN ranges
pub mod rpn_limits {
    /// Lowest valid severity / occurrence / detection score
    pub const FACTOR_MIN: u8 = 1;
    /// Highest valid severity / occurrence / detection score
    pub const FACTOR_MAX: u8 = 10;
    /// Lowest possible RPN (1 × 1 × 1)
    pub const RPN_MIN: u32 = 1;
    /// Highest possible RPN (10 × 10 × 10)
    pub const RPN_MAX: u32 = 1000;
}

/// Mean-RPN band edges
pub mod risk_bands {
    /// Mean RPN strictly above this is HIGH
    pub const HIGH_ABOVE: f64 = 200.0;
    /// Mean RPN strictly above this (and not HIGH) is MODERATE
    pub const MODERATE_ABOVE: f64 = 150.0;
}
