#[cfg(test)]
mod file_tests {
    use std::fs;

    use tempfile::tempdir;

    use hex2file_core::cancel::{CancelToken, NeverCancel};
    use hex2file_core::config::{ConvertConfig, Verbosity};
    use hex2file_core::progress::NullProgress;
    use hex2file_core::stream::{convert_file, run, ConversionOutcome, StreamingConverter};
    use hex2file_core::types::{ConvertError, ErrorKind};

    #[test]
    fn converts_file_to_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.hex");
        let output = dir.path().join("out.bin");
        fs::write(&input, "48656c6c6f\n2c20776f726c64\n").unwrap();

        let outcome = convert_file(&input, &output, ConvertConfig::default(), NeverCancel, NullProgress).unwrap();

        assert!(outcome.is_completed());
        assert_eq!(fs::read(&output).unwrap(), b"Hello, world");

        let report = outcome.report();
        assert_eq!(report.bytes_written(), 12);
        let path = report.output_path.as_ref().expect("file runs record the output path");
        assert!(path.is_absolute());
        assert!(path.ends_with("out.bin"));
    }

    #[test]
    fn missing_input_creates_no_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("absent.hex");
        let output = dir.path().join("out.bin");

        let err = convert_file(&input, &output, ConvertConfig::default(), NeverCancel, NullProgress).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InputNotFound);
        assert!(!err.leaves_partial_output());
        assert!(!output.exists());
    }

    #[test]
    fn unopenable_output_is_reported() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.hex");
        fs::write(&input, "00").unwrap();
        let output = dir.path().join("no_such_dir").join("out.bin");

        let err = convert_file(&input, &output, ConvertConfig::default(), NeverCancel, NullProgress).unwrap_err();

        assert!(matches!(err, ConvertError::OutputOpenFailure { .. }));
        assert!(!err.leaves_partial_output());
    }

    #[test]
    fn directory_input_fails_preflight_and_keeps_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("sub");
        fs::create_dir(&input).unwrap();
        let output = dir.path().join("out.bin");
        fs::write(&output, b"precious").unwrap();

        let err = convert_file(&input, &output, ConvertConfig::default(), NeverCancel, NullProgress).unwrap_err();

        assert_eq!(err.kind(), ErrorKind::InputOpenFailure);
        assert!(!err.leaves_partial_output());
        assert_eq!(fs::read(&output).unwrap(), b"precious");
    }

    #[test]
    fn existing_output_is_truncated() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.hex");
        let output = dir.path().join("out.bin");
        fs::write(&input, "ff").unwrap();
        fs::write(&output, vec![0u8; 1024]).unwrap();

        convert_file(&input, &output, ConvertConfig::default(), NeverCancel, NullProgress).unwrap();

        assert_eq!(fs::read(&output).unwrap(), vec![0xff]);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("empty.hex");
        let output = dir.path().join("out.bin");
        fs::write(&input, "").unwrap();

        let outcome = convert_file(&input, &output, ConvertConfig::default(), NeverCancel, NullProgress).unwrap();

        assert!(outcome.is_completed());
        assert_eq!(fs::metadata(&output).unwrap().len(), 0);
    }

    #[test]
    fn invalid_input_leaves_partial_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("bad.hex");
        let output = dir.path().join("out.bin");
        fs::write(&input, "00112233\n44zz\n").unwrap();

        let config = ConvertConfig::default().with_chunk_size(4).with_workers(2);
        let err = convert_file(&input, &output, config, NeverCancel, NullProgress).unwrap_err();

        assert!(matches!(err, ConvertError::InvalidInputFormat { line: 2, column: 3, found: 'z', byte: b'z' }));
        assert_eq!(fs::read(&output).unwrap(), vec![0x00, 0x11, 0x22, 0x33]);
    }

    #[test]
    fn truncated_input_leaves_partial_file() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("odd.hex");
        let output = dir.path().join("out.bin");
        fs::write(&input, "aabbc").unwrap();

        let config = ConvertConfig::default().with_chunk_size(2);
        let err = convert_file(&input, &output, config, NeverCancel, NullProgress).unwrap_err();

        assert!(matches!(err, ConvertError::TruncatedInput { pending: 1 }));
        assert_eq!(fs::read(&output).unwrap(), vec![0xaa, 0xbb]);
    }

    #[test]
    fn cancelled_run_keeps_written_chunks() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.hex");
        let output = dir.path().join("out.bin");
        fs::write(&input, "0102030405060708").unwrap();

        let token = CancelToken::new();
        let config = ConvertConfig::default().with_chunk_size(8);
        let mut converter = StreamingConverter::with_parts(config, token.clone(), NullProgress).unwrap();
        token.cancel();

        let outcome = converter.run(&input, &output).unwrap();

        assert!(matches!(outcome, ConversionOutcome::Cancelled(_)));
        assert_eq!(fs::read(&output).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn debug_verbosity_still_converts() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.hex");
        let output = dir.path().join("out.bin");
        fs::write(&input, "cafe").unwrap();

        let config = ConvertConfig::default().with_verbosity(Verbosity::Debug);
        let outcome = convert_file(&input, &output, config, NeverCancel, NullProgress).unwrap();

        assert!(outcome.is_completed());
        assert_eq!(fs::read(&output).unwrap(), vec![0xca, 0xfe]);
    }

    #[test]
    fn run_maps_outcomes_to_bool() {
        let dir = tempdir().unwrap();
        let input = dir.path().join("in.hex");
        let output = dir.path().join("out.bin");
        fs::write(&input, "0a0b").unwrap();

        assert!(run(&input, &output, ConvertConfig::default(), NeverCancel, NullProgress));

        let missing = dir.path().join("missing.hex");
        assert!(!run(&missing, &output, ConvertConfig::default(), NeverCancel, NullProgress));

        let token = CancelToken::new();
        token.cancel();
        fs::write(&input, "0a0b0c0d").unwrap();
        let config = ConvertConfig::default().with_chunk_size(2);
        assert!(!run(&input, &output, config, token, NullProgress));
    }
}
