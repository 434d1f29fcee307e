/// Library-wide defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Bound applied by [`Future::get`](crate::Future::get).
    pub result_timeout: time::Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            result_timeout: time::Duration::seconds(30),
        }
    }
}
