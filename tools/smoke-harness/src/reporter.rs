//! Step reporter — formats PASS/FAIL output and prints a summary.

pub struct Reporter {
    passed: usize,
    failed: usize,
}

impl Default for Reporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter {
    pub fn new() -> Self {
        Self {
            passed: 0,
            failed: 0,
        }
    }

    pub fn pass(&mut self, name: &str) {
        self.passed += 1;
        println!("PASS  {name}");
    }

    pub fn fail(&mut self, name: &str, err: &anyhow::Error) {
        self.failed += 1;
        println!("FAIL  {name}");
        println!("        error: {err:#}");
    }

    pub fn print_summary(&self) {
        println!();
        println!("────────────────────────────────────────────────────");
        println!("Results: {} passed, {} failed", self.passed, self.failed);
    }

    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}
