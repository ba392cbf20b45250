//! Regression test parameters and operations

use crate::error::{TestError, TestResult};
use crate::regout_dir;
use colorseg_core::{ImageFormat, Pix};
use std::fs;

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Check results against expected values (default)
    #[default]
    Compare,
    /// Only write outputs for visual inspection
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the state of a regression test: the test name, the current
/// check index, the mode, and every recorded failure.
pub struct RegParams {
    /// Name of the test (e.g., "segment")
    pub test_name: String,
    /// Current test index (incremented before each check)
    index: usize,
    /// Test mode (compare or display)
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// The mode is taken from the `REGTEST_MODE` environment variable.
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        let _ = fs::create_dir_all(regout_dir());

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn record_failure(&mut self, msg: String) {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
    }

    /// Compare two floating-point values
    ///
    /// Returns `true` if `|expected - actual| <= delta`.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        let diff = (expected - actual).abs();

        if diff > delta {
            let msg = format!(
                "Failure in {}_reg: value comparison for index {}\n\
                 difference = {} but allowed delta = {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, diff, delta, expected, actual
            );
            self.record_failure(msg);
            false
        } else {
            true
        }
    }

    /// Compare two images for exact equality
    ///
    /// Geometry, depth, samples per pixel and every pixel word must match.
    pub fn compare_pix(&mut self, pix1: &Pix, pix2: &Pix) -> bool {
        self.index += 1;
        self.check_pix(pix1, pix2, "pix comparison")
    }

    /// Write a Pix to the regout directory and check it against `expected`
    ///
    /// In display mode the file is only written.
    pub fn write_pix_and_check(
        &mut self,
        pix: &Pix,
        expected: &Pix,
        format: ImageFormat,
    ) -> TestResult<()> {
        self.index += 1;

        let local_path = format!(
            "{}/{}.{:02}.{}",
            regout_dir(),
            self.test_name,
            self.index,
            format.extension()
        );

        colorseg_io::write_image(pix, &local_path, format).map_err(|e| {
            TestError::ImageWrite {
                path: local_path.clone(),
                message: e.to_string(),
            }
        })?;

        if self.display() {
            eprintln!("Wrote: {}", local_path);
            return Ok(());
        }

        let what = format!("check of {}", local_path);
        self.check_pix(expected, pix, &what);
        Ok(())
    }

    fn check_pix(&mut self, pix1: &Pix, pix2: &Pix, what: &str) -> bool {
        if pix1.width() != pix2.width()
            || pix1.height() != pix2.height()
            || pix1.depth() != pix2.depth()
            || pix1.spp() != pix2.spp()
        {
            let msg = format!(
                "Failure in {}_reg: {} for index {} - dimension mismatch",
                self.test_name, what, self.index
            );
            self.record_failure(msg);
            return false;
        }

        let width = pix1.width();
        for (i, (p1, p2)) in pix1.data().iter().zip(pix2.data()).enumerate() {
            if p1 != p2 {
                let (x, y) = (i as u32 % width, i as u32 / width);
                let msg = format!(
                    "Failure in {}_reg: {} for index {} - pixel mismatch at ({}, {}): {:#010x} vs {:#010x}",
                    self.test_name, what, self.index, x, y, p1, p2
                );
                self.record_failure(msg);
                return false;
            }
        }

        true
    }

    /// Clean up and report results
    ///
    /// Returns `true` if all checks passed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
