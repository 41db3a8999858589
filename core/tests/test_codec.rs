#[cfg(test)]
mod codec_tests {
    use proptest::prelude::*;

    use hex2file_core::codec::{
        decode_parallel, is_hex_byte, is_hex_digit, is_space, partition, strip_and_validate, DecodeError,
        InvalidDigit, ParallelHexDecoder,
    };

    // --- Validator ---

    #[test]
    fn hex_digit_accepts_all_cases() {
        for c in "0123456789abcdefABCDEF".chars() {
            assert!(is_hex_digit(c), "{c:?} should be a hex digit");
        }
    }

    #[test]
    fn hex_digit_rejects_neighbours() {
        for c in ['g', 'G', 'z', ' ', '\n', '/', ':', '@', '`', 'é'] {
            assert!(!is_hex_digit(c), "{c:?} should not be a hex digit");
        }
    }

    #[test]
    fn vertical_tab_counts_as_space() {
        assert!(is_space(0x0b));
        assert!(is_space(b'\r'));
        assert!(!is_space(b'0'));
        assert!(!is_hex_byte(b' '));
    }

    #[test]
    fn strip_and_validate_removes_whitespace() {
        let mut out = Vec::new();
        let n = strip_and_validate(b" 4 1\t42\r\n", &mut out).unwrap();
        assert_eq!(n, 4);
        assert_eq!(out, b"4142");
    }

    #[test]
    fn strip_and_validate_restores_buffer_on_error() {
        let mut out = b"ab".to_vec();
        let err = strip_and_validate(b"12 3x4", &mut out).unwrap_err();
        assert_eq!(err, InvalidDigit { offset: 4, byte: b'x' });
        assert_eq!(err.found(), 'x');
        assert_eq!(out, b"ab", "rejected piece must not reach the buffer");
    }

    #[test]
    fn non_ascii_byte_is_not_named_as_latin1() {
        let mut out = Vec::new();
        let err = strip_and_validate("0é".as_bytes(), &mut out).unwrap_err();
        assert_eq!(err, InvalidDigit { offset: 1, byte: 0xc3 });
        assert_eq!(err.found(), char::REPLACEMENT_CHARACTER);
    }

    // --- Partitioning ---

    #[test]
    fn partition_gives_leftover_to_first_ranges() {
        assert_eq!(partition(10, 3), vec![0..4, 4..7, 7..10]);
    }

    #[test]
    fn partition_with_more_workers_than_units() {
        assert_eq!(partition(2, 4), vec![0..1, 1..2, 2..2, 2..2]);
    }

    #[test]
    fn partition_zero_workers_is_one_range() {
        assert_eq!(partition(5, 0), vec![0..5]);
    }

    // --- Decoding ---

    #[test]
    fn decode_simple_pairs() {
        assert_eq!(decode_parallel(b"4142", 2).unwrap(), vec![0x41, 0x42]);
        assert_eq!(decode_parallel(b"ffFF00", 3).unwrap(), vec![0xff, 0xff, 0x00]);
    }

    #[test]
    fn decode_empty_is_empty() {
        assert!(decode_parallel(b"", 4).unwrap().is_empty());
    }

    #[test]
    fn decode_rejects_odd_length() {
        match decode_parallel(b"abc", 2) {
            Err(DecodeError::OddLength { len }) => assert_eq!(len, 3),
            other => panic!("expected OddLength, got {other:?}"),
        }
    }

    #[test]
    fn decode_reports_failing_span() {
        // 4 bytes over 2 workers: second span starts at hex offset 4.
        match decode_parallel(b"0011zz33", 2) {
            Err(DecodeError::InvalidPair { offset, .. }) => assert_eq!(offset, 4),
            other => panic!("expected InvalidPair, got {other:?}"),
        }
    }

    #[test]
    fn decoder_clamps_worker_count() {
        let decoder = ParallelHexDecoder::new(0);
        assert_eq!(decoder.workers(), 1);
        assert_eq!(&decoder.decode(b"0a0b").unwrap()[..], &[0x0a, 0x0b]);
    }

    #[test]
    fn detected_decoder_has_at_least_one_worker() {
        assert!(ParallelHexDecoder::detect().workers() >= 1);
    }

    proptest! {
        #[test]
        fn prop_decode_reencodes_to_lowercase_input(bytes in proptest::collection::vec(any::<u8>(), 0..512), workers in 1usize..16) {
            let text = hex::encode_upper(&bytes);
            let decoded = decode_parallel(text.as_bytes(), workers).unwrap();
            prop_assert_eq!(hex::encode(&decoded), text.to_lowercase());
        }

        #[test]
        fn prop_decode_independent_of_worker_count(bytes in proptest::collection::vec(any::<u8>(), 0..512), w1 in 1usize..16, w2 in 1usize..16) {
            let text = hex::encode(&bytes);
            let a = decode_parallel(text.as_bytes(), w1).unwrap();
            let b = decode_parallel(text.as_bytes(), w2).unwrap();
            prop_assert_eq!(a, b);
        }

        #[test]
        fn prop_partition_covers_range_in_order(units in 0usize..10_000, workers in 1usize..64) {
            let ranges = partition(units, workers);
            prop_assert_eq!(ranges.len(), workers);
            let mut next = 0;
            for r in &ranges {
                prop_assert_eq!(r.start, next);
                prop_assert!(r.len() == units / workers || r.len() == units / workers + 1);
                next = r.end;
            }
            prop_assert_eq!(next, units);
        }
    }
}
