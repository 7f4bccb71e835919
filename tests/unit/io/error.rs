//! Tests for error types including source chaining, message formatting and context

#[cfg(test)]
mod tests {
    use chainnoise::NoiseError;
    use chainnoise::chaincode::Alphabet;
    use chainnoise::io::error::{
        ErrorContext, WithContext, computation_error, format_error, invalid_parameter,
    };
    use std::error::Error;
    use std::path::PathBuf;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = NoiseError::FileSystem {
            path: "/tmp/shapes.txt".into(),
            operation: "read dataset",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("read dataset"));
        assert!(error.to_string().contains("/tmp/shapes.txt"));
    }

    // Tests ImageExport error carries the path and the image error
    // Verified by excluding source error from message
    #[test]
    fn test_image_export_error() {
        let image_error = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));
        let error = NoiseError::ImageExport {
            path: PathBuf::from("/restricted/shape_noisy.png"),
            source: image_error,
        };

        let message = error.to_string();
        assert!(message.contains("/restricted/shape_noisy.png"));
        assert!(message.contains("access denied"));
        assert!(error.source().is_some());
    }

    // Tests direction errors name the alphabet and the valid range
    // Verified by omitting the alphabet from the message
    #[test]
    fn test_invalid_direction_message() {
        let error = NoiseError::InvalidDirection {
            alphabet: Alphabet::F4,
            direction: 6,
        };

        let message = error.to_string();
        assert!(message.contains("Direction 6"));
        assert!(message.contains("F4"));
        assert!(message.contains("0..4"));
        assert!(error.source().is_none());
    }

    // Tests format errors mention the line only when it is known
    // Verified by always printing the line number
    #[test]
    fn test_format_error_line() {
        let without = format_error(&"bad record");
        assert_eq!(without.to_string(), "Invalid chain code dataset: bad record");

        let with = NoiseError::Format {
            line: 3,
            reason: "bad record".to_string(),
        };
        assert!(with.to_string().contains("line 3"));
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("noise_probability", &1.5, &"must be within [0, 1]");

        let message = error.to_string();
        assert!(message.contains("noise_probability"));
        assert!(message.contains("1.5"));
        assert!(message.contains("must be within [0, 1]"));
    }

    // Tests Computation and UnsupportedAlphabet formatting
    // Verified by omitting reason from message
    #[test]
    fn test_other_messages() {
        let computation = computation_error("fractal_dimension", &"zero logarithm");
        assert!(computation.to_string().contains("fractal_dimension"));
        assert!(computation.to_string().contains("zero logarithm"));

        let unsupported = NoiseError::UnsupportedAlphabet {
            token: "VCC".to_string(),
        };
        assert!(unsupported.to_string().contains("'VCC'"));

        let empty = NoiseError::EmptyInput {
            operation: "noise session",
        };
        assert!(empty.to_string().contains("noise session"));
    }

    // Tests with_line attaches the line to format errors
    // Verified by leaving the line at zero
    #[test]
    fn test_with_line_sets_format_line() {
        let result: Result<(), NoiseError> = Err(format_error(&"unterminated record"));

        let located = result.with_line(7);
        assert!(
            matches!(&located, Err(NoiseError::Format { line: 7, reason }) if reason == "unterminated record"),
            "got {located:?}"
        );
    }

    // Tests direction errors become format errors once a line is known
    // Verified by passing direction errors through unchanged
    #[test]
    fn test_with_line_converts_direction_errors() {
        let result: Result<(), NoiseError> = Err(NoiseError::InvalidDirection {
            alphabet: Alphabet::F8,
            direction: 9,
        });

        let converted = result.with_line(4);
        assert!(matches!(converted, Err(NoiseError::Format { line: 4, .. })));
    }

    // Tests other errors pass through and the operation can be overridden
    // Verified by converting every error into a format error
    #[test]
    fn test_with_context_passthrough_and_operation() {
        let unsupported: Result<(), NoiseError> = Err(NoiseError::UnsupportedAlphabet {
            token: "3OT".to_string(),
        });
        assert!(matches!(
            unsupported.with_line(2),
            Err(NoiseError::UnsupportedAlphabet { .. })
        ));

        let empty: Result<(), NoiseError> = Err(NoiseError::EmptyInput { operation: "inner" });
        let context = ErrorContext {
            line: None,
            operation: Some("dataset processing"),
        };
        assert!(matches!(
            empty.with_context(context),
            Err(NoiseError::EmptyInput {
                operation: "dataset processing"
            })
        ));
    }

    // Tests conversions from library errors
    // Verified by mapping io errors to image errors
    #[test]
    fn test_from_conversions() {
        let from_io: NoiseError = std::io::Error::other("disk full").into();
        assert!(matches!(from_io, NoiseError::FileSystem { .. }));

        let from_image: NoiseError = image::ImageError::IoError(std::io::Error::other("x")).into();
        assert!(matches!(from_image, NoiseError::ImageExport { .. }));
    }
}
