use std::time::Duration;

use rand::Rng;

use crate::config::ChatConfig;

/// How long to wait before answering, to mimic someone typing.
///
/// Kept behind a trait so tests can answer immediately.
pub trait ResponsePacer: Send + Sync {
    fn delay(&self) -> Duration;
}

/// Uniformly random delay between `min` and `max`, inclusive.
#[derive(Debug, Clone)]
pub struct RandomPacer {
    min_ms: u64,
    max_ms: u64,
}

impl RandomPacer {
    pub fn new(min_ms: u64, max_ms: u64) -> Self {
        Self {
            min_ms: min_ms.min(max_ms),
            max_ms: min_ms.max(max_ms),
        }
    }

    pub fn from_config(config: &ChatConfig) -> Self {
        Self::new(config.typing_delay_min_ms, config.typing_delay_max_ms)
    }
}

impl ResponsePacer for RandomPacer {
    fn delay(&self) -> Duration {
        let ms = rand::rng().random_range(self.min_ms..=self.max_ms);
        Duration::from_millis(ms)
    }
}

#[derive(Debug, Clone, Default)]
pub struct FixedPacer(pub Duration);

impl ResponsePacer for FixedPacer {
    fn delay(&self) -> Duration {
        self.0
    }
}
