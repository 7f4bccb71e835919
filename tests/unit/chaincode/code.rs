//! Tests for chain code construction, reconstruction from pixels and display

#[cfg(test)]
mod tests {
    use chainnoise::NoiseError;
    use chainnoise::chaincode::geometry::decode;
    use chainnoise::chaincode::{Alphabet, ChainCode, Pixel};
    use chainnoise::io::configuration::COORDINATE_LIMIT;
    use proptest::prelude::*;

    // Tests construction rejects the first direction outside the alphabet
    // Verified by validating against the F8 range for every alphabet
    #[test]
    fn test_new_rejects_invalid_direction() {
        let result = ChainCode::new(Alphabet::F4, Pixel::default(), vec![0, 1, 5, 4]);

        assert!(matches!(
            result,
            Err(NoiseError::InvalidDirection {
                alphabet: Alphabet::F4,
                direction: 5
            })
        ));
        assert!(ChainCode::new(Alphabet::F8, Pixel::default(), vec![0, 1, 5, 7]).is_ok());
    }

    // Tests construction rejects walks that could leave the coordinate range
    // Verified by checking only the start pixel against the limit
    #[test]
    fn test_new_rejects_walks_past_coordinate_limit() {
        let edge = Pixel::new(0, -COORDINATE_LIMIT);

        assert!(ChainCode::new(Alphabet::F4, edge, Vec::new()).is_ok());
        assert!(matches!(
            ChainCode::new(Alphabet::F4, edge, vec![3]),
            Err(NoiseError::InvalidParameter {
                parameter: "start",
                ..
            })
        ));
        assert!(ChainCode::new(Alphabet::F8, Pixel::new(i32::MAX, 0), Vec::new()).is_err());
        assert!(ChainCode::from_pixels(Alphabet::F8, &[Pixel::new(i32::MIN, 0)]).is_err());
    }

    // Tests digit strings map one character to one direction
    // Verified by parsing digits in reverse order
    #[test]
    fn test_from_digits() {
        let code = ChainCode::from_digits(Alphabet::F4, Pixel::new(2, -1), "0123").unwrap();

        assert_eq!(code.directions(), &[0, 1, 2, 3]);
        assert_eq!(code.alphabet(), Alphabet::F4);
        assert_eq!(code.start(), Pixel::new(2, -1));
        assert_eq!(code.len(), 4);
        assert!(!code.is_empty());
    }

    // Tests non-digit characters are format errors and out-of-range digits direction errors
    // Verified by skipping characters that are not digits
    #[test]
    fn test_from_digits_rejects_bad_input() {
        assert!(matches!(
            ChainCode::from_digits(Alphabet::F8, Pixel::default(), "01x2"),
            Err(NoiseError::Format { .. })
        ));
        assert!(matches!(
            ChainCode::from_digits(Alphabet::F4, Pixel::default(), "0124"),
            Err(NoiseError::InvalidDirection { direction: 4, .. })
        ));
    }

    // Tests an empty direction string is a valid zero-length code
    // Verified by treating empty input as an error
    #[test]
    fn test_empty_code() {
        let code = ChainCode::from_digits(Alphabet::F8, Pixel::new(1, 1), "").unwrap();

        assert!(code.is_empty());
        assert_eq!(decode(&code), vec![Pixel::new(1, 1)]);
    }

    // Tests reconstruction from pixels reproduces the directions
    // Verified by computing deltas as from - to
    #[test]
    fn test_from_pixels() {
        let pixels = [
            Pixel::new(0, 0),
            Pixel::new(1, 0),
            Pixel::new(1, -1),
            Pixel::new(2, -1),
            Pixel::new(2, -2),
        ];

        let code = ChainCode::from_pixels(Alphabet::F8, &pixels).unwrap();

        assert_eq!(code.directions(), &[0, 6, 0, 6]);
        assert_eq!(code.start(), Pixel::new(0, 0));
    }

    // Tests reconstruction rejects gaps and diagonal F4 steps
    // Verified by accepting any neighboring pixel pair
    #[test]
    fn test_from_pixels_rejects_non_adjacent() {
        let gap = [Pixel::new(0, 0), Pixel::new(2, 0)];
        let diagonal = [Pixel::new(0, 0), Pixel::new(1, 1)];

        assert!(matches!(
            ChainCode::from_pixels(Alphabet::F8, &gap),
            Err(NoiseError::InvalidParameter { .. })
        ));
        assert!(ChainCode::from_pixels(Alphabet::F4, &diagonal).is_err());
        assert!(ChainCode::from_pixels(Alphabet::F8, &diagonal).is_ok());
        assert!(matches!(
            ChainCode::from_pixels(Alphabet::F4, &[]),
            Err(NoiseError::EmptyInput { .. })
        ));
    }

    // Tests moving the start keeps the directions
    // Verified by clearing directions in with_start
    #[test]
    fn test_with_start() {
        let code = ChainCode::from_digits(Alphabet::F8, Pixel::default(), "0246").unwrap();
        let moved = code.clone().with_start(Pixel::new(5, 5));

        assert_eq!(moved.start(), Pixel::new(5, 5));
        assert_eq!(moved.directions(), code.directions());
    }

    // Tests display writes the digit string back
    // Verified by separating digits with commas
    #[test]
    fn test_display() {
        let code = ChainCode::from_digits(Alphabet::F8, Pixel::default(), "0606").unwrap();
        assert_eq!(code.to_string(), "0606");
    }

    fn alphabet_strategy() -> impl Strategy<Value = Alphabet> {
        prop_oneof![Just(Alphabet::F4), Just(Alphabet::F8)]
    }

    proptest! {
        /// Decoding and re-deriving from pixels reproduces any valid code
        #[test]
        fn prop_decode_round_trip(
            alphabet in alphabet_strategy(),
            raw in prop::collection::vec(0u8..8, 0..64),
            x in -100i32..100,
            y in -100i32..100,
        ) {
            let directions: Vec<u8> = raw
                .into_iter()
                .map(|d| d % alphabet.direction_count())
                .collect();
            let code = ChainCode::new(alphabet, Pixel::new(x, y), directions).unwrap();

            let rebuilt = ChainCode::from_pixels(alphabet, &decode(&code)).unwrap();
            prop_assert_eq!(rebuilt, code);
        }
    }
}
