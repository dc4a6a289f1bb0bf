//! Protocol constants. All monetary values in the smallest unit (yocto, 1 NEAR = 10^24).

/// Smallest units per whole token.
pub const YOCTO_PER_NEAR: u128 = 1_000_000_000_000_000_000_000_000;

/// Default CLR threshold: 25 whole tokens.
pub const DEFAULT_THRESHOLD: u128 = 25 * YOCTO_PER_NEAR;

/// Environment variable names read by the CLI.
pub const ENV_THRESHOLD: &str = "CLR_THRESHOLD";
pub const ENV_TOTAL_POOL: &str = "CLR_TOTAL_POOL";
pub const ENV_ROUNDING: &str = "CLR_ROUNDING";
pub const ENV_UNDERSATURATION: &str = "CLR_UNDERSATURATION";
