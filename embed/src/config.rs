/// Knobs for the randomized algorithms of this crate.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ProbeConfig {
    /// Upper bound on the number of random draws made by any single call. Each draw succeeds with
    /// probability bounded away from zero, so hitting this bound signals a broken input (or a very
    /// small field) rather than bad luck.
    pub max_attempts: usize,
}

impl ProbeConfig {
    pub const fn new(max_attempts: usize) -> Self {
        Self { max_attempts }
    }
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self::new(64)
    }
}
