use crate::squad::Squad;

/// Mutable state of one search chain.
///
/// Under strict greedy acceptance the working squad and the best-seen squad
/// move together; both are kept so the loop invariant (best score never
/// decreases) is explicit and checkable.
#[derive(Debug, Clone)]
pub struct SearchState {
    pub current: Squad,
    pub current_score: f32,
    pub best: Squad,
    pub best_score: f32,
    pub iteration: u32,
    pub plateau: u32,
    pub improvements: u32,
}

impl SearchState {
    pub fn new(initial: Squad, initial_score: f32) -> Self {
        SearchState {
            best: initial.clone(),
            best_score: initial_score,
            current: initial,
            current_score: initial_score,
            iteration: 0,
            plateau: 0,
            improvements: 0,
        }
    }
}
