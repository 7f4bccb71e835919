//! Tests for the noise engine: mutation passes, iteration loop and invariants

#[cfg(test)]
mod tests {
    use chainnoise::NoiseError;
    use chainnoise::chaincode::geometry::decode;
    use chainnoise::chaincode::{Alphabet, ChainCode, Pixel};
    use chainnoise::io::configuration::{DEFAULT_ITERATIONS, DEFAULT_NOISE_PROBABILITY, DEFAULT_SEED};
    use chainnoise::noise::{BoundarySet, NoiseConfig, NoiseEngine, NoiseSession, PassStats};
    use std::collections::HashSet;
    use std::time::Duration;

    fn code(alphabet: Alphabet, start: (i32, i32), digits: &str) -> ChainCode {
        ChainCode::from_digits(alphabet, Pixel::from(start), digits).unwrap()
    }

    // Closed square contour with `side` steps per edge
    fn square(alphabet: Alphabet, start: (i32, i32), side: usize) -> ChainCode {
        let turn = alphabet.direction_count() / 4;
        let directions = (0..4u8)
            .flat_map(|edge| std::iter::repeat_n(edge * turn, side))
            .collect();
        ChainCode::new(alphabet, Pixel::from(start), directions).unwrap()
    }

    // Pixel pairs of two codes that lie in each other's neighborhood
    fn contacts(alphabet: Alphabet, a: &ChainCode, b: &ChainCode) -> HashSet<(Pixel, Pixel)> {
        let other: HashSet<Pixel> = decode(b).into_iter().collect();
        let mut pairs = HashSet::new();
        for pixel in decode(a) {
            for dy in -1..=1 {
                for dx in -1..=1 {
                    let neighbor = pixel.offset(dx, dy);
                    if !alphabet.skips_neighbor(dx, dy) && other.contains(&neighbor) {
                        pairs.insert((pixel, neighbor));
                    }
                }
            }
        }
        pairs
    }

    // Tests zero probability leaves codes and boundary untouched
    // Verified by ignoring the noise probability
    #[test]
    fn test_zero_probability_is_identity() {
        let batch = vec![square(Alphabet::F8, (0, 0), 6), square(Alphabet::F4, (20, 0), 5)];
        let mut session = NoiseSession::new(batch.clone()).unwrap();
        let before = session.boundary().clone();
        let mut engine = NoiseEngine::new(DEFAULT_SEED);

        let reports = engine.apply_noise(&mut session, 0.0, 3, |_, _| {}).unwrap();

        assert_eq!(session.chain_codes(), batch.as_slice());
        assert_eq!(session.boundary(), &before);
        assert_eq!(reports.len(), 3);
        assert!(reports.iter().all(|r| r.stats == PassStats::default()));
    }

    // Tests the boundary set stays equal to a from-scratch rebuild after every iteration
    // Verified by skipping the boundary update on accepted rewrites
    #[test]
    fn test_boundary_consistency_over_iterations() {
        for alphabet in Alphabet::ALL {
            let batch = vec![
                square(alphabet, (0, 0), 12),
                square(alphabet, (16, 3), 8),
            ];
            let mut session = NoiseSession::new(batch).unwrap();
            let mut engine = NoiseEngine::new(7);
            let mut consistent = Vec::new();

            let reports = engine
                .apply_noise(&mut session, 0.3, 20, |_, state| {
                    consistent.push(state.boundary().matches(state.chain_codes()));
                })
                .unwrap();

            assert_eq!(consistent.len(), 20);
            assert!(consistent.iter().all(|&ok| ok), "{alphabet}");
            assert!(reports.iter().any(|r| r.stats.accepted > 0), "{alphabet}");
        }
    }

    // Tests accepted rewrites keep directions valid and the end pixel fixed
    // Verified by splicing the replacement one position late
    #[test]
    fn test_rewrites_preserve_end_pixel() {
        for alphabet in Alphabet::ALL {
            let original = code(alphabet, (0, 0), &"0".repeat(30));
            let mut noised = original.clone();
            let mut boundary = BoundarySet::from_chain_codes(&[noised.clone()]);
            let mut engine = NoiseEngine::new(3);

            let stats = engine.add_noise(&mut noised, &mut boundary, 1.0).unwrap();

            assert!(stats.accepted > 0);
            assert!(noised.len() > original.len());
            assert_eq!(decode(&noised).last(), decode(&original).last());
            assert_eq!(noised.start(), original.start());
            assert!(
                ChainCode::new(alphabet, noised.start(), noised.directions().to_vec()).is_ok()
            );
            assert!(boundary.matches(&[noised]));
        }
    }

    // Tests a rewrite that drops a pixel the walk visits again keeps it occupied
    // Verified by removing the old middle pixel from the set outright
    #[test]
    fn test_rewrite_on_spur_keeps_boundary_consistent() {
        let mut accepted = 0;
        for seed in 0..64 {
            let mut spur = code(Alphabet::F4, (0, 0), "0132");
            let mut boundary = BoundarySet::from_chain_codes(&[spur.clone()]);

            let stats = NoiseEngine::new(seed)
                .add_noise(&mut spur, &mut boundary, 1.0)
                .unwrap();

            accepted += stats.accepted;
            assert!(boundary.matches(&[spur.clone()]), "seed {seed}: {spur}");
            assert_eq!(
                boundary.contains(Pixel::new(1, 0)),
                decode(&spur).contains(&Pixel::new(1, 0))
            );
        }
        assert!(accepted > 0);
    }

    // Tests rewrites never bring two shapes into contact they did not have before
    // Verified by validating rewrites against the rewritten code's own pixels only
    #[test]
    fn test_rewrites_respect_neighboring_shapes() {
        for alphabet in Alphabet::ALL {
            for gap in [1, 2] {
                let left = square(alphabet, (0, 0), 8);
                let right = square(alphabet, (8 + gap, 0), 8);
                let initial = contacts(alphabet, &left, &right);
                let mut session = NoiseSession::new(vec![left, right]).unwrap();
                let mut engine = NoiseEngine::new(17);
                let mut violations = 0;

                let reports = engine
                    .apply_noise(&mut session, 0.6, 40, |_, state| {
                        if let [first, second] = state.chain_codes() {
                            violations += contacts(alphabet, first, second)
                                .difference(&initial)
                                .count();
                        }
                    })
                    .unwrap();

                assert_eq!(violations, 0, "{alphabet} gap {gap}");
                assert_eq!(initial.is_empty(), gap > 1, "{alphabet} gap {gap}");
                assert!(reports.iter().map(|r| r.stats.accepted).sum::<usize>() > 0);
                assert!(session.boundary().matches(session.chain_codes()));
            }
        }
    }

    // Tests every attempt ends in exactly one outcome
    // Verified by counting touch rejections twice
    #[test]
    fn test_stats_partition_attempts() {
        let mut session =
            NoiseSession::new(vec![square(Alphabet::F8, (0, 0), 10), square(Alphabet::F8, (0, 12), 10)])
                .unwrap();
        let mut engine = NoiseEngine::new(11);

        let reports = engine.apply_noise(&mut session, 0.5, 5, |_, _| {}).unwrap();

        for report in &reports {
            let stats = report.stats;
            assert_eq!(
                stats.attempts,
                stats.accepted + stats.rejected_empty + stats.rejected_touch
            );
        }
        assert_eq!(reports.last().map(|r| r.segment_count), Some(session.segment_count()));
    }

    // Tests reversal pairs have no rewrite and the pass advances past them
    // Verified by stopping the pass at the first empty entry
    #[test]
    fn test_reversal_pairs_are_rejected() {
        let mut zigzag = code(Alphabet::F4, (0, 0), "0202");
        let mut boundary = BoundarySet::from_chain_codes(&[zigzag.clone()]);
        let mut engine = NoiseEngine::new(1);

        let stats = engine.add_noise(&mut zigzag, &mut boundary, 1.0).unwrap();

        assert_eq!(stats.attempts, 3);
        assert_eq!(stats.rejected_empty, 3);
        assert_eq!(zigzag.directions(), &[0, 2, 0, 2]);
    }

    // Tests codes shorter than a pair are never rewritten
    // Verified by treating the last direction as a pair with the first
    #[test]
    fn test_short_codes_unchanged() {
        let mut single = code(Alphabet::F8, (0, 0), "0");
        let mut empty = code(Alphabet::F8, (5, 5), "");
        let mut boundary =
            BoundarySet::from_chain_codes(&[single.clone(), empty.clone()]);
        let mut engine = NoiseEngine::new(1);

        let first = engine.add_noise(&mut single, &mut boundary, 1.0).unwrap();
        let second = engine.add_noise(&mut empty, &mut boundary, 1.0).unwrap();

        assert_eq!(first.attempts + second.attempts, 0);
        assert_eq!(single.directions(), &[0]);
        assert!(empty.is_empty());
    }

    // Tests a fixed seed reproduces the run exactly
    // Verified by seeding from entropy
    #[test]
    fn test_seed_reproducibility() {
        let run = |seed: u64| {
            let mut session = NoiseSession::new(vec![square(Alphabet::F8, (0, 0), 15)]).unwrap();
            NoiseEngine::new(seed)
                .apply_noise(&mut session, 0.4, 4, |_, _| {})
                .unwrap();
            session.into_chain_codes()
        };

        assert_eq!(run(99), run(99));
        assert_ne!(run(99), run(100));
    }

    // Tests the observer sees every iteration in order
    // Verified by calling the observer before the pass
    #[test]
    fn test_observer_called_per_iteration() {
        let mut session = NoiseSession::new(vec![square(Alphabet::F4, (0, 0), 6)]).unwrap();
        let mut seen = Vec::new();

        NoiseEngine::from_config(&NoiseConfig::default())
            .apply_noise(&mut session, 0.2, 4, |report, state| {
                seen.push((report.iteration, report.segment_count == state.segment_count()));
            })
            .unwrap();

        assert_eq!(seen, vec![(1, true), (2, true), (3, true), (4, true)]);
    }

    // Tests probabilities outside [0, 1] and NaN are rejected
    // Verified by clamping the probability
    #[test]
    fn test_invalid_probability() {
        let mut session = NoiseSession::new(vec![square(Alphabet::F8, (0, 0), 3)]).unwrap();
        let mut engine = NoiseEngine::new(0);

        for probability in [-0.1, 1.5, f64::NAN] {
            assert!(matches!(
                engine.apply_noise(&mut session, probability, 1, |_, _| {}),
                Err(NoiseError::InvalidParameter {
                    parameter: "noise_probability",
                    ..
                })
            ));
        }

        let mut chain = code(Alphabet::F8, (0, 0), "00");
        let mut boundary = BoundarySet::from_chain_codes(&[chain.clone()]);
        assert!(engine.add_noise(&mut chain, &mut boundary, 2.0).is_err());
    }

    // Tests configuration defaults and validation
    // Verified by changing the default seed
    #[test]
    fn test_noise_config() {
        let config = NoiseConfig::default();

        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.iterations, DEFAULT_ITERATIONS);
        assert!((config.noise_probability - DEFAULT_NOISE_PROBABILITY).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());

        let invalid = NoiseConfig {
            noise_probability: 1.01,
            ..config
        };
        assert!(invalid.validate().is_err());
    }

    // Tests stats accumulate field by field
    // Verified by overwriting instead of adding
    #[test]
    fn test_pass_stats_accumulate() {
        let mut total = PassStats {
            attempts: 4,
            accepted: 1,
            rejected_empty: 2,
            rejected_touch: 1,
        };
        total += PassStats {
            attempts: 2,
            accepted: 2,
            rejected_empty: 0,
            rejected_touch: 0,
        };

        assert_eq!(total.attempts, 6);
        assert_eq!(total.accepted, 3);
        assert_eq!(total.rejected_empty, 2);
        assert_eq!(total.rejected_touch, 1);
    }

    // Tests throughput stays finite for instantaneous iterations
    // Verified by dividing by the raw elapsed seconds
    #[test]
    fn test_segments_per_second() {
        let mut session = NoiseSession::new(vec![square(Alphabet::F4, (0, 0), 4)]).unwrap();
        let reports = NoiseEngine::new(5)
            .apply_noise(&mut session, 0.0, 1, |_, _| {})
            .unwrap();

        let mut report = reports.into_iter().next().unwrap();
        report.elapsed = Duration::ZERO;
        assert!(report.segments_per_second().is_finite());
        report.elapsed = Duration::from_secs(2);
        assert!((report.segments_per_second() - 8.0).abs() < 1e-9);
    }
}
