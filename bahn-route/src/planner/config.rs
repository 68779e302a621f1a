//! Leg resolution configuration.

/// Configuration parameters for leg resolution.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// Maximum hour slices to fetch when looking for the departure.
    /// Exhausting this fails the leg.
    pub departure_attempts: usize,

    /// Maximum hour slices to fetch when looking for the arrival.
    /// Exhausting this leaves the arrival time unset.
    pub arrival_attempts: usize,
}

impl ResolverConfig {
    /// Create a new configuration with the given attempt budgets.
    pub fn new(departure_attempts: usize, arrival_attempts: usize) -> Self {
        Self {
            departure_attempts,
            arrival_attempts,
        }
    }
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            departure_attempts: 4,
            arrival_attempts: 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ResolverConfig::default();

        assert_eq!(config.departure_attempts, 4);
        assert_eq!(config.arrival_attempts, 4);
    }

    #[test]
    fn custom_config() {
        let config = ResolverConfig::new(2, 6);

        assert_eq!(config.departure_attempts, 2);
        assert_eq!(config.arrival_attempts, 6);
    }
}
