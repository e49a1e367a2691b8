//! Genetic search over partition parameters.
//!
//! A chromosome is ten bits read as five 2-bit genes:
//! intervals, holding period, target profit ratio, confidence (the fifth gene
//! is unused). Fitness rewards buy buckets that are profitable, likely and
//! well sampled.

use rand::distributions::WeightedIndex;
use rand::prelude::*;
use rand::rngs::StdRng;
use std::collections::HashMap;

use crate::services::estimator::ForwardReturnEstimator;
use crate::services::partition::partition;
use crate::types::{AnalysisParams, ConfidenceThreshold, OptimizationOutcome};

pub const CHROMOSOME_LENGTH: usize = 10;

type Chromosome = [bool; CHROMOSOME_LENGTH];

/// Search settings.
#[derive(Debug, Clone)]
pub struct OptimizerConfig {
    pub population_size: usize,
    pub generations: usize,
    pub crossover_rate: f64,
    pub mutation_rate: f64,
    pub seed: u64,
}

impl Default for OptimizerConfig {
    fn default() -> Self {
        Self {
            population_size: 50,
            generations: 50,
            crossover_rate: 0.8,
            mutation_rate: 0.1,
            seed: 42,
        }
    }
}

pub struct GeneticOptimizer {
    config: OptimizerConfig,
    rng: StdRng,
}

impl GeneticOptimizer {
    pub fn new(config: OptimizerConfig) -> Self {
        let rng = StdRng::seed_from_u64(config.seed);
        Self { config, rng }
    }

    /// Best parameters for `prices`, or `None` if no candidate produced a
    /// buy bucket. `base` supplies the fields the chromosome does not encode.
    pub fn optimize(&mut self, prices: &[f64], base: &AnalysisParams) -> Option<OptimizationOutcome> {
        let population_size = self.config.population_size.max(2);
        let mut population: Vec<Chromosome> =
            (0..population_size).map(|_| self.random_chromosome()).collect();

        let mut memo: HashMap<Chromosome, f64> = HashMap::new();
        let mut best: Option<(Chromosome, f64)> = None;

        for _ in 0..self.config.generations {
            let scores: Vec<f64> = population
                .iter()
                .map(|c| {
                    *memo
                        .entry(*c)
                        .or_insert_with(|| fitness(prices, &decode(c, base)))
                })
                .collect();

            for (chromosome, score) in population.iter().zip(&scores) {
                if score.is_finite() && best.map_or(true, |(_, b)| *score > b) {
                    best = Some((*chromosome, *score));
                }
            }

            let mut next = Vec::with_capacity(population_size);
            while next.len() < population_size {
                let (a, b) = self.select_parents(&population, &scores);
                let (a, b) = self.crossover(a, b);
                next.push(self.mutate(a));
                if next.len() < population_size {
                    next.push(self.mutate(b));
                }
            }
            population = next;
        }

        best.map(|(chromosome, fitness)| OptimizationOutcome {
            params: decode(&chromosome, base),
            fitness,
            generations: self.config.generations,
        })
    }

    fn random_chromosome(&mut self) -> Chromosome {
        let mut chromosome = [false; CHROMOSOME_LENGTH];
        for bit in chromosome.iter_mut() {
            *bit = self.rng.gen_bool(0.5);
        }
        chromosome
    }

    /// Roulette selection over finite scores; uniform when fewer than two are finite.
    fn select_parents(&mut self, population: &[Chromosome], scores: &[f64]) -> (Chromosome, Chromosome) {
        let valid: Vec<usize> = (0..scores.len()).filter(|&i| scores[i].is_finite()).collect();

        if valid.len() >= 2 {
            let min = valid.iter().map(|&i| scores[i]).fold(f64::INFINITY, f64::min);
            let weights: Vec<f64> = valid.iter().map(|&i| scores[i] - min + 1e-6).collect();
            if let Ok(dist) = WeightedIndex::new(&weights) {
                let a = valid[dist.sample(&mut self.rng)];
                let b = valid[dist.sample(&mut self.rng)];
                return (population[a], population[b]);
            }
        }

        let a = population[self.rng.gen_range(0..population.len())];
        let b = population[self.rng.gen_range(0..population.len())];
        (a, b)
    }

    fn crossover(&mut self, a: Chromosome, b: Chromosome) -> (Chromosome, Chromosome) {
        if !self.rng.gen_bool(self.config.crossover_rate.clamp(0.0, 1.0)) {
            return (a, b);
        }

        let point = self.rng.gen_range(1..CHROMOSOME_LENGTH);
        let mut child_a = a;
        let mut child_b = b;
        child_a[point..].copy_from_slice(&b[point..]);
        child_b[point..].copy_from_slice(&a[point..]);
        (child_a, child_b)
    }

    fn mutate(&mut self, mut chromosome: Chromosome) -> Chromosome {
        if self.rng.gen_bool(self.config.mutation_rate.clamp(0.0, 1.0)) {
            let point = self.rng.gen_range(0..CHROMOSOME_LENGTH);
            chromosome[point] = !chromosome[point];
        }
        chromosome
    }
}

fn gene(chromosome: &Chromosome, index: usize) -> usize {
    let hi = chromosome[index * 2] as usize;
    let lo = chromosome[index * 2 + 1] as usize;
    hi * 2 + lo
}

/// Map a chromosome onto parameters.
fn decode(chromosome: &Chromosome, base: &AnalysisParams) -> AnalysisParams {
    let confidence = 0.3 + gene(chromosome, 3) as f64 * 0.1;
    AnalysisParams {
        intervals: 3 + gene(chromosome, 0),
        holding_period: 5 + gene(chromosome, 1) * 5,
        target_profit_ratio: 0.5 + gene(chromosome, 2) as f64 * 0.2,
        confidence: ConfidenceThreshold::from_fraction(confidence).unwrap_or(base.confidence),
        volume_days: base.volume_days,
    }
}

/// Total buy-bucket profit x mean buy probability x ln(1 + mean sample size).
fn fitness(prices: &[f64], params: &AnalysisParams) -> f64 {
    let estimator =
        ForwardReturnEstimator::new(prices, params.holding_period, params.target_profit_ratio);
    let Ok(intervals) = partition(prices, params.intervals, params.confidence, &estimator) else {
        return f64::NEG_INFINITY;
    };

    let buys: Vec<_> = intervals.iter().filter(|i| i.is_buy_signal).collect();
    if buys.is_empty() {
        return f64::NEG_INFINITY;
    }

    let count = buys.len() as f64;
    let total_profit: f64 = buys.iter().filter_map(|i| i.avg_profit).sum();
    let avg_probability = buys.iter().map(|i| i.probability_fraction()).sum::<f64>() / count;
    let avg_samples = buys.iter().map(|i| i.sample_size as f64).sum::<f64>() / count;

    let score = total_profit * avg_probability * avg_samples.ln_1p();
    if score.is_finite() {
        score
    } else {
        f64::NEG_INFINITY
    }
}
