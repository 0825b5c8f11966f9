/// Knobs for one optimization run. A fixed seed (and chain count) makes the
/// run fully reproducible.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    /// Iteration budget per chain.
    pub max_iterations: u32,
    /// Consecutive iterations without an objective improvement before a
    /// chain stops early.
    pub plateau_limit: u32,
    pub seed: u64,
    /// Independent restarts, merged by best score. Chains beyond the first
    /// run in parallel.
    pub chains: u32,
}

impl Default for SearchOptions {
    fn default() -> Self {
        SearchOptions {
            max_iterations: 50_000,
            plateau_limit: 5_000,
            seed: 0,
            chains: 1,
        }
    }
}
