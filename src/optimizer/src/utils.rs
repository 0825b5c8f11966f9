use std::time::Instant;

pub struct TimeEstimation;

impl TimeEstimation {
    pub fn estimate<F, T>(action: F) -> (T, u128)
    where
        F: FnOnce() -> T,
    {
        let now = Instant::now();
        let result = action();
        (result, now.elapsed().as_millis())
    }
}
