//! Search configuration.

/// Run parameters for the evolutionary search.
///
/// The three population bands must satisfy
/// `elite_fraction + mutant_fraction <= 1.0`; whatever remains is filled
/// by crossover offspring.
///
/// # Examples
///
/// ```
/// use wave_pick::search::SearchConfig;
///
/// let config = SearchConfig::new()
///     .with_population_size(50)
///     .with_elite_fraction(0.30)
///     .with_mutant_fraction(0.20)
///     .with_seed(42);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of generations to run.
    pub n_generations: usize,

    /// Total population size.
    pub population_size: usize,

    /// Fraction of the population carried over unchanged each generation.
    pub elite_fraction: f64,

    /// Fraction of the population replaced by fresh random individuals.
    pub mutant_fraction: f64,

    /// Probability that a crossover offspring inherits the elite parent's
    /// gene.
    pub elite_inheritance_prob: f64,

    /// Overall wall-clock budget in milliseconds.
    pub time_budget_ms: u64,

    /// Reserve threshold: once remaining budget drops below this, the run
    /// stops at the next cooperative checkpoint.
    pub reserve_ms: u64,

    /// Random seed for reproducible runs (`None` = seed from entropy).
    pub seed: Option<u64>,
}

impl SearchConfig {
    /// Creates a configuration with the reference defaults.
    pub fn new() -> Self {
        Self {
            n_generations: 1000,
            population_size: 50,
            elite_fraction: 0.30,
            mutant_fraction: 0.20,
            elite_inheritance_prob: 0.70,
            time_budget_ms: 600_000,
            reserve_ms: 10_000,
            seed: None,
        }
    }

    pub fn with_generations(mut self, n: usize) -> Self {
        self.n_generations = n;
        self
    }

    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    pub fn with_elite_fraction(mut self, fraction: f64) -> Self {
        self.elite_fraction = fraction;
        self
    }

    pub fn with_mutant_fraction(mut self, fraction: f64) -> Self {
        self.mutant_fraction = fraction;
        self
    }

    pub fn with_elite_inheritance_prob(mut self, probability: f64) -> Self {
        self.elite_inheritance_prob = probability;
        self
    }

    pub fn with_time_budget_ms(mut self, ms: u64) -> Self {
        self.time_budget_ms = ms;
        self
    }

    pub fn with_reserve_ms(mut self, ms: u64) -> Self {
        self.reserve_ms = ms;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Number of elite slots implied by the current settings.
    pub fn elite_count(&self) -> usize {
        (self.population_size as f64 * self.elite_fraction) as usize
    }

    /// Number of mutant slots implied by the current settings.
    pub fn mutant_count(&self) -> usize {
        (self.population_size as f64 * self.mutant_fraction) as usize
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if self.n_generations == 0 {
            return Err("n_generations must be at least 1".into());
        }
        if self.population_size == 0 {
            return Err("population_size must be at least 1".into());
        }
        for (name, value) in [
            ("elite_fraction", self.elite_fraction),
            ("mutant_fraction", self.mutant_fraction),
            ("elite_inheritance_prob", self.elite_inheritance_prob),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(format!("{name} ({value}) must lie in [0, 1]"));
            }
        }
        if self.elite_fraction + self.mutant_fraction > 1.0 {
            return Err(format!(
                "elite_fraction ({}) + mutant_fraction ({}) must be <= 1.0",
                self.elite_fraction, self.mutant_fraction
            ));
        }
        if self.n_generations > 1 && self.elite_count() == 0 {
            return Err("elite_fraction too small: no elite individuals to cross".into());
        }
        Ok(())
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::new()
    }
}
