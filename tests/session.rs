mod tests {
    use myrtio_grid_composer::color::{Rgb, hex_to_rgb};
    use myrtio_grid_composer::frame_scheduler::pattern_time;
    use myrtio_grid_composer::pattern::solid_color;
    use myrtio_grid_composer::suggestion::parse_suggestion;
    use myrtio_grid_composer::{
        AnimationState, ConfigError, DeviceError, DisplayDevice, Duration, GridFrame, GridSize,
        Instant, IntentChannel, NoDisplayDevice, OutputDriver, Palette, PaletteSuggester, PatternId,
        ResolutionPolicy, SessionConfig, SessionController, SessionIntent, SuggestionError,
    };
    use rand::SeedableRng;
    use rand::rngs::SmallRng;

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const GREEN: Rgb = Rgb { r: 0, g: 255, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };

    const STATIC_SIZE: GridSize = GridSize::new(16, 16);
    const ANIMATED_SIZE: GridSize = GridSize::new(8, 8);

    struct Published {
        cells: Vec<Rgb>,
        size: GridSize,
        time: f64,
        brightness: f32,
    }

    #[derive(Default)]
    struct RecordingOutput {
        frames: Vec<Published>,
    }

    impl RecordingOutput {
        fn last(&self) -> &Published {
            self.frames.last().expect("no frame published")
        }
    }

    impl OutputDriver for RecordingOutput {
        fn write(&mut self, frame: &GridFrame<'_>, brightness: f32) {
            self.frames.push(Published {
                cells: frame.cells().to_vec(),
                size: frame.size(),
                time: frame.time(),
                brightness,
            });
        }
    }

    #[derive(Default)]
    struct MockDevice {
        fullscreen_fails: bool,
        wake_lock_fails: bool,
        fullscreen_requests: usize,
        fullscreen_exits: usize,
        issued_locks: u32,
        released_locks: Vec<u32>,
    }

    impl DisplayDevice for MockDevice {
        type WakeLock = u32;

        fn request_fullscreen(&mut self) -> Result<(), DeviceError> {
            self.fullscreen_requests += 1;
            if self.fullscreen_fails {
                return Err(DeviceError::Rejected);
            }
            Ok(())
        }

        fn exit_fullscreen(&mut self) -> Result<(), DeviceError> {
            self.fullscreen_exits += 1;
            Ok(())
        }

        fn acquire_wake_lock(&mut self) -> Result<u32, DeviceError> {
            if self.wake_lock_fails {
                return Err(DeviceError::Unsupported);
            }
            self.issued_locks += 1;
            Ok(self.issued_locks)
        }

        fn release_wake_lock(&mut self, lock: u32) {
            self.released_locks.push(lock);
        }
    }

    struct FixedSuggester {
        answer: Result<[&'static str; 6], SuggestionError>,
        calls: usize,
    }

    impl PaletteSuggester for FixedSuggester {
        fn suggest(&mut self, _theme: &str) -> Result<Palette, SuggestionError> {
            self.calls += 1;
            parse_suggestion(&self.answer.clone()?)
        }
    }

    type TestSession<'a> = SessionController<'a, RecordingOutput, SmallRng, MockDevice, 256, 8>;

    fn config(pattern: PatternId) -> SessionConfig {
        SessionConfig {
            pattern,
            palette: Palette::new(&[RED, GREEN, BLUE]).unwrap(),
            resolution: ResolutionPolicy {
                static_size: STATIC_SIZE,
                animated_size: ANIMATED_SIZE,
            },
            frame_duration: Duration::from_millis(10),
            ..SessionConfig::default()
        }
    }

    fn session_with(
        channel: &IntentChannel<8>,
        pattern: PatternId,
        device: MockDevice,
    ) -> TestSession<'_> {
        SessionController::new(
            channel.receiver(),
            RecordingOutput::default(),
            SmallRng::seed_from_u64(11),
            device,
            &config(pattern),
        )
        .unwrap()
    }

    fn session(channel: &IntentChannel<8>, pattern: PatternId) -> TestSession<'_> {
        session_with(channel, pattern, MockDevice::default())
    }

    fn ms(millis: u64) -> Instant {
        Instant::from_millis(millis)
    }

    fn assert_time(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected t={expected}, got t={actual}"
        );
    }

    #[test]
    fn test_static_start_renders_once() {
        let channel = IntentChannel::<8>::new();
        let mut session = session(&channel, PatternId::SolidColor);

        assert_eq!(session.state(), AnimationState::Paused);
        assert!(!session.params().animation_enabled());
        assert_eq!(session.params().size(), STATIC_SIZE);

        let frames = &session.output().frames;
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0].size, STATIC_SIZE);
        assert_eq!(frames[0].cells.len(), 256);
        assert_time(frames[0].time, 0.0);
        assert!(frames[0].cells.iter().all(|&c| c == hex_to_rgb("#e60000")));

        assert!(session.on_frame(ms(16)).is_none());
        assert_eq!(session.output().frames.len(), 1);
    }

    #[test]
    fn test_animated_start_runs() {
        let channel = IntentChannel::<8>::new();
        let mut session = session(&channel, PatternId::Plasma);

        assert_eq!(session.state(), AnimationState::Running);
        assert!(session.params().animation_enabled());
        assert_eq!(session.params().size(), ANIMATED_SIZE);
        assert!(session.output().frames.is_empty());

        assert!(session.on_frame(ms(100)).is_some());
        let frame = session.output().last();
        assert_eq!(frame.size, ANIMATED_SIZE);
        assert_time(frame.time, 2.0);
    }

    #[test]
    fn test_pause_freezes_time() {
        let channel = IntentChannel::<8>::new();
        let mut session = session(&channel, PatternId::Plasma);

        session.on_frame(ms(5000));
        let moving = session.output().last().cells.clone();

        session.set_animation_enabled(false, ms(5100));
        assert_eq!(session.state(), AnimationState::Paused);
        let frozen = pattern_time(ms(5000), session.params().speed());
        assert_time(session.output().last().time, frozen);
        assert_eq!(session.output().last().cells, moving);

        session.set_palette(Palette::new(&[GREEN, BLUE]).unwrap());
        let frame = session.output().last();
        assert_time(frame.time, frozen);
        assert_ne!(frame.cells, moving);

        let published = session.output().frames.len();
        assert!(session.on_frame(ms(9000)).is_none());
        assert_eq!(session.output().frames.len(), published);

        session.set_animation_enabled(true, ms(9000));
        assert_eq!(session.state(), AnimationState::Running);
        session.on_frame(ms(9000));
        assert_time(session.output().last().time, 180.0);
    }

    #[test]
    fn test_select_pattern_switches_mode_and_size() {
        let channel = IntentChannel::<8>::new();
        let mut session = session(&channel, PatternId::Plasma);

        session.on_frame(ms(1000));
        session.select_pattern(PatternId::SolidColor, ms(1020));
        assert_eq!(session.state(), AnimationState::Paused);
        assert_eq!(session.params().pattern(), PatternId::SolidColor);

        let frame = session.output().last();
        assert_eq!(frame.size, STATIC_SIZE);
        assert_time(frame.time, 20.0);
        assert_eq!(frame.cells[0], solid_color(0, 0, 20.0, STATIC_SIZE, &[RED]));

        session.select_pattern(PatternId::Twinkle, ms(2000));
        assert_eq!(session.state(), AnimationState::Running);
        assert_eq!(session.params().size(), ANIMATED_SIZE);
        assert!(session.params().animation_enabled());
    }

    #[test]
    fn test_disabled_animation_follows_pattern_choice() {
        let channel = IntentChannel::<8>::new();
        let mut session = session(&channel, PatternId::Gradient);

        session.set_animation_enabled(false, ms(0));
        session.select_pattern(PatternId::Sparkle, ms(500));
        assert_eq!(session.state(), AnimationState::Running);
    }

    #[test]
    fn test_cycle_primary_color() {
        let channel = IntentChannel::<8>::new();
        let mut session = session(&channel, PatternId::SolidColor);

        assert!(session.cycle_primary_color());
        assert_eq!(session.params().palette().as_slice(), &[GREEN, RED, BLUE]);
        assert!(session.output().last().cells[0].g > 0);

        assert!(session.cycle_primary_color());
        assert_eq!(session.params().palette().as_slice(), &[BLUE, RED, GREEN]);

        assert!(session.cycle_primary_color());
        assert_eq!(session.params().palette().as_slice(), &[RED, GREEN, BLUE]);
    }

    #[test]
    fn test_cycle_primary_color_ignored_when_animated() {
        let channel = IntentChannel::<8>::new();
        let mut session = session(&channel, PatternId::RainbowWave);

        assert!(!session.cycle_primary_color());
        assert_eq!(session.params().palette().as_slice(), &[RED, GREEN, BLUE]);
    }

    #[test]
    fn test_set_color() {
        let channel = IntentChannel::<8>::new();
        let mut session = session(&channel, PatternId::SolidColor);

        session.set_color(0, BLUE);
        assert_eq!(session.params().palette().primary(), BLUE);
        assert_eq!(session.output().frames.len(), 2);
        assert!(session.output().last().cells[0].b > 0);

        session.set_color(3, GREEN);
        assert_eq!(session.params().palette().as_slice(), &[BLUE, GREEN, BLUE]);
        assert_eq!(session.output().frames.len(), 2);
    }

    #[test]
    fn test_speed_and_brightness() {
        let channel = IntentChannel::<8>::new();
        let mut session = session(&channel, PatternId::SolidColor);

        session.set_brightness(0.3);
        assert!((session.output().last().brightness - 0.3).abs() < f32::EPSILON);

        session.set_speed(5.0);
        assert!((session.params().speed() - 5.0).abs() < f32::EPSILON);

        session.set_speed(f32::NAN);
        assert!((session.params().speed() - 5.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_intents_from_channel() {
        let channel = IntentChannel::<8>::new();
        let mut session = session(&channel, PatternId::Plasma);
        let sender = channel.sender();

        sender
            .try_send(SessionIntent::SelectPattern(PatternId::SolidColor))
            .unwrap();
        sender.try_send(SessionIntent::SetBrightness(0.4)).unwrap();
        sender.try_send(SessionIntent::SetSpeed(5.0)).unwrap();
        sender.try_send(SessionIntent::CyclePrimaryColor).unwrap();

        assert!(session.on_frame(ms(100)).is_none());
        assert!(channel.is_empty());

        let params = session.params();
        assert_eq!(params.pattern(), PatternId::SolidColor);
        assert!((params.speed() - 5.0).abs() < f32::EPSILON);
        assert_eq!(params.palette().primary(), GREEN);
        assert!((session.output().last().brightness - 0.4).abs() < f32::EPSILON);
    }

    #[test]
    fn test_full_channel_rejects_intent() {
        let channel = IntentChannel::<8>::new();
        let sender = channel.sender();
        for _ in 0..8 {
            sender.try_send(SessionIntent::ToggleFullscreen).unwrap();
        }
        let err = sender.try_send(SessionIntent::SetSpeed(1.0)).unwrap_err();
        assert_eq!(err.0, SessionIntent::SetSpeed(1.0));
        assert_eq!(channel.len(), 8);
    }

    #[test]
    fn test_fullscreen_with_wake_lock() {
        let channel = IntentChannel::<8>::new();
        let mut session = session(&channel, PatternId::Plasma);

        session.toggle_fullscreen();
        assert!(session.is_fullscreen());
        assert!(session.holds_wake_lock());

        session.toggle_fullscreen();
        assert!(!session.is_fullscreen());
        assert!(!session.holds_wake_lock());
        assert_eq!(session.device().fullscreen_exits, 1);
        assert_eq!(session.device().released_locks, vec![1]);
    }

    #[test]
    fn test_fullscreen_without_wake_lock() {
        let channel = IntentChannel::<8>::new();
        let device = MockDevice {
            wake_lock_fails: true,
            ..MockDevice::default()
        };
        let mut session = session_with(&channel, PatternId::Plasma, device);

        session.toggle_fullscreen();
        assert!(session.is_fullscreen());
        assert!(!session.holds_wake_lock());

        session.toggle_fullscreen();
        assert!(!session.is_fullscreen());
        assert!(session.device().released_locks.is_empty());
    }

    #[test]
    fn test_fullscreen_rejected() {
        let channel = IntentChannel::<8>::new();
        let device = MockDevice {
            fullscreen_fails: true,
            ..MockDevice::default()
        };
        let mut session = session_with(&channel, PatternId::Plasma, device);

        session.toggle_fullscreen();
        assert!(!session.is_fullscreen());
        assert!(!session.holds_wake_lock());
        assert_eq!(session.device().issued_locks, 0);

        session.toggle_fullscreen();
        assert_eq!(session.device().fullscreen_requests, 2);
    }

    #[test]
    fn test_fullscreen_unsupported() {
        let channel = IntentChannel::<8>::new();
        let mut session = SessionController::<_, _, _, 256, 8>::new(
            channel.receiver(),
            RecordingOutput::default(),
            SmallRng::seed_from_u64(0),
            NoDisplayDevice,
            &config(PatternId::Plasma),
        )
        .unwrap();

        session.toggle_fullscreen();
        assert!(!session.is_fullscreen());
        assert!(!session.holds_wake_lock());

        session.on_frame(ms(20));
        assert_eq!(session.output().frames.len(), 1);
    }

    #[test]
    fn test_platform_exit_releases_wake_lock() {
        let channel = IntentChannel::<8>::new();
        let mut session = session(&channel, PatternId::Plasma);

        session.apply(SessionIntent::ToggleFullscreen, ms(0));
        session.apply(SessionIntent::FullscreenExited, ms(10));

        assert!(!session.is_fullscreen());
        assert!(!session.holds_wake_lock());
        assert_eq!(session.device().released_locks, vec![1]);
        assert_eq!(session.device().fullscreen_exits, 0);

        // Entering again takes a fresh lock
        session.toggle_fullscreen();
        assert!(session.holds_wake_lock());
        assert_eq!(session.device().issued_locks, 2);
    }

    #[test]
    fn test_suggestion_applied() {
        let channel = IntentChannel::<8>::new();
        let mut session = session(&channel, PatternId::Gradient);
        let mut suggester = FixedSuggester {
            answer: Ok([
                "#000000", "#111111", "#222222", "#333333", "#444444", "#555555",
            ]),
            calls: 0,
        };

        session.request_palette(&mut suggester, "  deep sea  ").unwrap();
        assert_eq!(session.params().palette().len(), 6);
        assert_eq!(session.params().palette()[1], hex_to_rgb("#111111"));
    }

    #[test]
    fn test_suggestion_failure_keeps_palette() {
        let channel = IntentChannel::<8>::new();
        let mut session = session(&channel, PatternId::Gradient);
        let mut suggester = FixedSuggester {
            answer: Err(SuggestionError::Unavailable),
            calls: 0,
        };

        let err = session.request_palette(&mut suggester, "autumn").unwrap_err();
        assert_eq!(err, SuggestionError::Unavailable);
        assert_eq!(session.params().palette().as_slice(), &[RED, GREEN, BLUE]);

        let err = session.request_palette(&mut suggester, "ab").unwrap_err();
        assert_eq!(err, SuggestionError::ThemeTooShort);
        assert_eq!(suggester.calls, 1);

        let err = session
            .apply_suggestion(parse_suggestion(&["#ffffff", "#000000"]))
            .unwrap_err();
        assert_eq!(err, SuggestionError::WrongColorCount(2));
        assert_eq!(session.params().palette().as_slice(), &[RED, GREEN, BLUE]);
    }

    #[test]
    fn test_shutdown() {
        let channel = IntentChannel::<8>::new();
        let mut session = session(&channel, PatternId::Plasma);

        session.on_frame(ms(0));
        session.toggle_fullscreen();
        session.shutdown();

        assert_eq!(session.state(), AnimationState::Stopped);
        assert!(!session.holds_wake_lock());
        assert_eq!(session.device().released_locks, vec![1]);

        let published = session.output().frames.len();
        assert!(session.on_frame(ms(16)).is_none());
        session.set_palette(Palette::default());
        session.select_pattern(PatternId::SolidColor, ms(32));
        assert_eq!(session.output().frames.len(), published);
        assert_eq!(session.state(), AnimationState::Stopped);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let channel = IntentChannel::<8>::new();
        let build = |config: &SessionConfig| {
            TestSession::new(
                channel.receiver(),
                RecordingOutput::default(),
                SmallRng::seed_from_u64(0),
                MockDevice::default(),
                config,
            )
            .err()
        };

        let mut too_large = config(PatternId::Plasma);
        too_large.resolution.static_size = GridSize::new(32, 32);
        assert!(matches!(
            build(&too_large),
            Some(ConfigError::GridTooLarge {
                cells: 1024,
                max_cells: 256
            })
        ));

        let mut empty = config(PatternId::Plasma);
        empty.resolution.animated_size = GridSize::new(0, 8);
        assert!(matches!(build(&empty), Some(ConfigError::EmptyGrid)));

        let slow = SessionConfig {
            speed: 0.0,
            ..config(PatternId::Plasma)
        };
        assert!(matches!(build(&slow), Some(ConfigError::InvalidSpeed)));

        let dark = SessionConfig {
            brightness: f32::NAN,
            ..config(PatternId::Plasma)
        };
        assert!(matches!(build(&dark), Some(ConfigError::InvalidBrightness)));
    }
}
