//! colorseg-test - Regression test framework for colorseg
//!
//! Supports two modes:
//!
//! - **Compare**: Check results against expected values built by the test
//! - **Display**: Only write outputs to `tests/regout` (visual inspection)
//!
//! # Usage
//!
//! ```ignore
//! use colorseg_test::RegParams;
//!
//! let mut rp = RegParams::new("segment");
//! rp.compare_values(1.0, accepted as f64, 0.0);
//! assert!(rp.cleanup());
//! ```
//!
//! # Environment Variables
//!
//! - `REGTEST_MODE`: Set to "compare" or "display"

mod error;
mod params;

pub use error::{TestError, TestResult};
pub use params::{RegParams, RegTestMode};

/// Get the path to the workspace root
fn workspace_root() -> String {
    let manifest_dir = env!("CARGO_MANIFEST_DIR");
    // colorseg-test is at crates/colorseg-test, so go up two directories
    format!("{}/../..", manifest_dir)
}

/// Get the path to the regout (regression output) directory
pub fn regout_dir() -> String {
    format!("{}/tests/regout", workspace_root())
}
