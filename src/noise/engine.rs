use crate::chaincode::geometry::{step, trace};
use crate::chaincode::lookup::{TableSelector, find_replacement};
use crate::chaincode::{Alphabet, ChainCode, Direction, Pixel};
use crate::io::configuration::{DEFAULT_ITERATIONS, DEFAULT_NOISE_PROBABILITY, DEFAULT_SEED};
use crate::io::error::{Result, invalid_parameter};
use crate::noise::boundary::{BoundarySet, NoiseSession};
use crate::noise::touch::would_cause_self_touch;
use rand::{Rng, SeedableRng, rngs::StdRng};
use std::ops::AddAssign;
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Noise run parameters
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NoiseConfig {
    /// Probability that a position is considered for a rewrite
    pub noise_probability: f64,
    /// Number of passes over the whole batch
    pub iterations: usize,
    /// Seed of the engine's random source
    pub seed: u64,
}

impl Default for NoiseConfig {
    fn default() -> Self {
        Self {
            noise_probability: DEFAULT_NOISE_PROBABILITY,
            iterations: DEFAULT_ITERATIONS,
            seed: DEFAULT_SEED,
        }
    }
}

impl NoiseConfig {
    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the probability is not within `[0, 1]`
    pub fn validate(&self) -> Result<()> {
        validate_probability(self.noise_probability)
    }
}

/// Outcome counters of one or more mutation passes
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Positions whose random draw fell below the noise probability
    pub attempts: usize,
    /// Rewrites spliced into the chain code
    pub accepted: usize,
    /// Attempts on a pair without a table entry
    pub rejected_empty: usize,
    /// Attempts that would have made the boundary touch itself
    pub rejected_touch: usize,
}

impl AddAssign for PassStats {
    fn add_assign(&mut self, other: Self) {
        self.attempts += other.attempts;
        self.accepted += other.accepted;
        self.rejected_empty += other.rejected_empty;
        self.rejected_touch += other.rejected_touch;
    }
}

/// Progress of one pass over the batch
#[derive(Clone, Debug, PartialEq)]
pub struct IterationReport {
    /// 1-based iteration number
    pub iteration: usize,
    /// Total directions across the batch after this iteration
    pub segment_count: usize,
    /// Wall time of the iteration
    pub elapsed: Duration,
    /// Mutation counters summed over the batch
    pub stats: PassStats,
}

impl IterationReport {
    /// Processing throughput of the iteration
    pub fn segments_per_second(&self) -> f64 {
        self.segment_count as f64 / self.elapsed.as_secs_f64().max(f64::EPSILON)
    }
}

/// Randomized local rewriting of chain codes that keeps boundaries simple
///
/// The engine only owns the random source; the chain codes and their shared
/// boundary set live in a [`NoiseSession`] passed in by the caller.
pub struct NoiseEngine {
    rng: StdRng,
}

impl NoiseEngine {
    /// Create a deterministic engine
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create an engine seeded from a run configuration
    pub fn from_config(config: &NoiseConfig) -> Self {
        Self::new(config.seed)
    }

    /// One mutation pass over a single chain code
    ///
    /// Each consecutive direction pair is, with probability
    /// `noise_probability`, replaced by a table entry that passes the
    /// self-touch check. Accepted rewrites update `boundary` immediately so
    /// later positions (and later chain codes) are validated against them.
    /// The pair formed by the last and the first direction is never visited.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the probability is not within `[0, 1]`
    pub fn add_noise(
        &mut self,
        chain_code: &mut ChainCode,
        boundary: &mut BoundarySet,
        noise_probability: f64,
    ) -> Result<PassStats> {
        validate_probability(noise_probability)?;

        let alphabet = chain_code.alphabet();
        let source = chain_code.directions();
        let mut output = Vec::with_capacity(source.len() + source.len() / 2);
        let mut stats = PassStats::default();
        let mut current = chain_code.start();
        let mut index = 0;

        while let (Some(&incoming), Some(&outgoing)) = (source.get(index), source.get(index + 1))
        {
            let rewrite = self.draw_rewrite(
                alphabet,
                current,
                [incoming, outgoing],
                boundary,
                noise_probability,
                &mut stats,
            )?;

            if let Some((replacement, middle)) = rewrite {
                let walk = trace(alphabet, current, replacement)?;
                let interior = walk.get(1..walk.len() - 1).unwrap_or_default();
                boundary.replace_span(&[middle], interior);

                output.extend_from_slice(replacement);
                current = walk.last().copied().unwrap_or(current);
                // Both directions of the pair were consumed by the rewrite
                index += 2;
                continue;
            }

            output.push(incoming);
            current = step(alphabet, incoming, current)?;
            index += 1;
        }

        output.extend_from_slice(source.get(index..).unwrap_or_default());
        chain_code.replace_directions(output);

        Ok(stats)
    }

    /// Decide whether the pair at `current` gets rewritten
    ///
    /// Returns the replacement and the pixel between the two old directions.
    fn draw_rewrite(
        &mut self,
        alphabet: Alphabet,
        current: Pixel,
        [incoming, outgoing]: [Direction; 2],
        boundary: &BoundarySet,
        noise_probability: f64,
        stats: &mut PassStats,
    ) -> Result<Option<(&'static [Direction], Pixel)>> {
        if self.rng.random::<f64>() >= noise_probability {
            return Ok(None);
        }
        stats.attempts += 1;

        let selector = TableSelector::from_coin(self.rng.random::<f64>() < 0.5);
        let replacement = find_replacement(alphabet, selector, incoming, outgoing)?;
        if replacement.is_empty() {
            stats.rejected_empty += 1;
            return Ok(None);
        }

        // The rewritten span must stay connected to these, so they never count as touches
        let middle = step(alphabet, incoming, current)?;
        let end = step(alphabet, outgoing, middle)?;
        let excluded = [current, middle, end];

        if would_cause_self_touch(alphabet, current, replacement, boundary, &excluded)? {
            stats.rejected_touch += 1;
            return Ok(None);
        }

        stats.accepted += 1;
        Ok(Some((replacement, middle)))
    }

    /// Run `iterations` mutation passes over every chain code of the session
    ///
    /// Chain codes are processed in session order, so a fixed seed gives a
    /// reproducible result. After each iteration the report is logged and
    /// handed to `observer` together with the session; neither affects the
    /// outcome.
    ///
    /// # Errors
    ///
    /// Returns `InvalidParameter` if the probability is not within `[0, 1]`
    pub fn apply_noise<F>(
        &mut self,
        session: &mut NoiseSession,
        noise_probability: f64,
        iterations: usize,
        mut observer: F,
    ) -> Result<Vec<IterationReport>>
    where
        F: FnMut(&IterationReport, &NoiseSession),
    {
        validate_probability(noise_probability)?;

        let mut reports = Vec::with_capacity(iterations);
        for iteration in 1..=iterations {
            let started = Instant::now();
            let mut stats = PassStats::default();

            let (chain_codes, boundary) = session.parts_mut();
            for chain_code in chain_codes.iter_mut() {
                stats += self.add_noise(chain_code, boundary, noise_probability)?;
            }

            let report = IterationReport {
                iteration,
                segment_count: session.segment_count(),
                elapsed: started.elapsed(),
                stats,
            };

            info!(
                iteration,
                iterations,
                segments = report.segment_count,
                elapsed = ?report.elapsed,
                segments_per_second = report.segments_per_second(),
                "Noise iteration complete",
            );
            debug!(
                attempts = stats.attempts,
                accepted = stats.accepted,
                rejected_empty = stats.rejected_empty,
                rejected_touch = stats.rejected_touch,
                "Rewrite outcomes",
            );

            observer(&report, &*session);
            reports.push(report);
        }

        Ok(reports)
    }
}

fn validate_probability(noise_probability: f64) -> Result<()> {
    if (0.0..=1.0).contains(&noise_probability) {
        Ok(())
    } else {
        Err(invalid_parameter(
            "noise_probability",
            &noise_probability,
            &"must be within [0, 1]",
        ))
    }
}
