#[cfg(test)]
mod session_tests {
    use hex2file_core::stream::parallelism::{detect_worker_count, ParallelismProfile};
    use hex2file_core::stream::session::{crossed_step, ConversionSession, SessionState};
    use hex2file_core::config::ConvertConfig;
    use hex2file_core::constants::{MAX_WORKERS, MIN_WORKERS};

    use SessionState::*;

    #[test]
    fn happy_path_transitions() {
        let path = [Idle, Reading, Decoding, Reading, Flushing, Done];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn cancellation_only_after_a_chunk() {
        assert!(Decoding.can_transition(Cancelled));
        assert!(!Reading.can_transition(Cancelled));
        assert!(!Flushing.can_transition(Cancelled));
    }

    #[test]
    fn terminal_states_are_final() {
        for terminal in [Done, Failed, Cancelled] {
            assert!(terminal.is_terminal());
            for to in [Idle, Reading, Decoding, Flushing, Done, Failed, Cancelled] {
                assert!(!terminal.can_transition(to), "{terminal} -> {to}");
            }
        }
    }

    #[test]
    fn failure_from_any_active_state() {
        for from in [Idle, Reading, Decoding, Flushing] {
            assert!(!from.is_terminal());
            assert!(from.can_transition(Failed));
        }
    }

    #[test]
    fn state_names() {
        assert_eq!(Reading.to_string(), "reading");
        assert_eq!(Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn fresh_session() {
        let session = ConversionSession::new(8);
        assert_eq!(session.state(), Idle);
        assert_eq!(session.buffered_digits(), 0);
        assert!(!session.has_full_chunk());
        assert_eq!(session.estimated_total(), 0);
        assert_eq!(session.counters().bytes_written, 0);
    }

    #[test]
    fn step_crossing() {
        assert!(crossed_step(0, 2, 2));
        assert!(crossed_step(3, 4, 4));
        assert!(crossed_step(1, 9, 4));
        assert!(!crossed_step(4, 7, 4));
        assert!(!crossed_step(0, 0, 4));
        assert!(!crossed_step(0, 100, 0));
    }

    #[test]
    fn worker_detection_is_bounded() {
        let n = detect_worker_count();
        assert!((MIN_WORKERS..=MAX_WORKERS).contains(&n) || n == 1);
    }

    #[test]
    fn profile_follows_config() {
        let config = ConvertConfig::default().with_chunk_size(64).with_workers(3).with_read_piece_limit(16);
        let profile = ParallelismProfile::from_config(&config);
        assert_eq!(profile.worker_count, 3);
        assert_eq!(profile.chunk_size_hex, 64);
        assert_eq!(profile.piece_limit, 16);
        assert_eq!(profile.peak_buffer_bytes(), (64 + 16) + 16 + 32);
    }
}
