mod tests {
    use embassy_time::{Duration, Instant};
    use sculpture_light_engine::audio::{Silence, SpectrumFrame};
    use sculpture_light_engine::channel::TrySendError;
    use sculpture_light_engine::color::{BLACK, Rgb};
    use sculpture_light_engine::filter::{BrightnessFilter, BrightnessFilterConfig, Filter};
    use sculpture_light_engine::frame_scheduler::{DEFAULT_FRAME_DURATION, FrameScheduler};
    use sculpture_light_engine::graph::{LedGraph, NUM_LEDS, RING, Spoke};
    use sculpture_light_engine::input::{InputChannel, InputEvent, InputProcessor, InputTargets};
    use sculpture_light_engine::pattern::{PatternId, PatternManager, PatternManagerConfig};
    use sculpture_light_engine::random::Random;
    use sculpture_light_engine::renderer::{Renderer, RendererConfig};
    use sculpture_light_engine::spoke::{SpokeManagerConfig, SpokePatternManager};
    use sculpture_light_engine::welcome::WelcomeAnimation;
    use sculpture_light_engine::OutputDriver;

    const WHITE: Rgb = Rgb::new(255, 255, 255);

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn quiet_config() -> RendererConfig {
        RendererConfig {
            welcome: false,
            ..RendererConfig::default()
        }
    }

    #[derive(Default)]
    struct RecordingDriver {
        frames: usize,
        last_len: usize,
    }

    impl OutputDriver for RecordingDriver {
        fn write(&mut self, colors: &[Rgb]) {
            self.frames += 1;
            self.last_len = colors.len();
        }
    }

    #[test]
    fn test_channel_rejects_when_full() {
        let channel: InputChannel<2> = InputChannel::new();
        let sender = channel.sender();
        assert!(sender.try_send(InputEvent::NextPattern).is_ok());
        assert!(sender.try_send(InputEvent::NextPalette).is_ok());
        assert_eq!(
            sender.try_send(InputEvent::Poke),
            Err(TrySendError(InputEvent::Poke))
        );
        assert_eq!(channel.try_receive(), Ok(InputEvent::NextPattern));
    }

    #[test]
    fn test_channel_evicts_oldest() {
        let channel: InputChannel<2> = InputChannel::new();
        let sender = channel.sender();
        assert_eq!(sender.send_evicting(InputEvent::NextPattern), None);
        assert_eq!(sender.send_evicting(InputEvent::NextPalette), None);
        assert_eq!(
            sender.send_evicting(InputEvent::Poke),
            Some(InputEvent::NextPattern)
        );
        assert_eq!(channel.len(), 2);
        assert_eq!(channel.try_receive(), Ok(InputEvent::NextPalette));
        assert_eq!(channel.try_receive(), Ok(InputEvent::Poke));
        assert!(channel.is_empty());

        sender.try_send(InputEvent::Poke).unwrap();
        channel.clear();
        assert!(channel.try_receive().is_err());
    }

    #[test]
    fn test_input_processor_drains_queue() {
        let channel: InputChannel<4> = InputChannel::new();
        let mut processor = InputProcessor::new(channel.receiver());
        let graph = LedGraph::sculpture();
        let audio = SpectrumFrame::silent();
        let mut patterns = PatternManager::new(&PatternManagerConfig::default(), Random::new(1));
        let mut spokes = SpokePatternManager::new(&SpokeManagerConfig::default(), Random::new(2));

        channel.try_send(InputEvent::ToggleAutoRotate).unwrap();
        channel
            .try_send(InputEvent::SpokeLongPress(Spoke::Earth))
            .unwrap();
        channel
            .try_send(InputEvent::SpokeNextPalette(Spoke::Earth))
            .unwrap();

        let mut targets = InputTargets {
            now: at(0),
            graph: &graph,
            audio: &audio,
            patterns: &mut patterns,
            spokes: &mut spokes,
        };
        assert_eq!(processor.process_pending(&mut targets), 3);
        assert_eq!(processor.process_pending(&mut targets), 0);

        assert!(!patterns.auto_rotate());
        assert!(spokes.is_latched(Spoke::Earth));
        assert!(spokes.colors(Spoke::Earth).is_some());
    }

    #[test]
    fn test_welcome_plays_before_patterns() {
        let channel: InputChannel<4> = InputChannel::new();
        let mut renderer = Renderer::new(channel.receiver(), &RendererConfig::default());
        let silent = SpectrumFrame::silent();

        renderer.render(at(0), &silent, 255);
        assert!(renderer.is_welcoming());
        renderer.render(at(600), &silent, 255);
        assert!(renderer.is_welcoming());

        let total = WelcomeAnimation::total_duration().as_millis();
        renderer.render(at(total), &silent, 255);
        assert!(!renderer.is_welcoming());
        assert_eq!(renderer.patterns().active_id(), Some(PatternId::FlagBands));

        let frame = renderer.render(at(total + 10), &silent, 255);
        assert_ne!(frame[usize::from(RING[0])], BLACK);
    }

    #[test]
    fn test_render_applies_queued_input() {
        let channel: InputChannel<4> = InputChannel::new();
        let mut renderer = Renderer::new(channel.receiver(), &quiet_config());
        let silent = SpectrumFrame::silent();

        channel.try_send(InputEvent::NextPattern).unwrap();
        channel
            .try_send(InputEvent::SpokeTouchDown(Spoke::Venus))
            .unwrap();
        renderer.render(at(0), &silent, 255);

        assert_eq!(renderer.patterns().active_id(), Some(PatternId::Downstream));
        assert!(renderer.spokes().is_touched(Spoke::Venus));

        channel
            .try_send(InputEvent::SpokeTouchUp(
                Spoke::Venus,
                Duration::from_millis(1000),
            ))
            .unwrap();
        renderer.render(at(10), &silent, 255);
        assert!(!renderer.spokes().is_touched(Spoke::Venus));
    }

    #[test]
    fn test_spokes_draw_over_device_pattern() {
        let channel: InputChannel<4> = InputChannel::new();
        let mut renderer = Renderer::new(channel.receiver(), &quiet_config());
        let silent = SpectrumFrame::silent();

        renderer.render(at(0), &silent, 255);
        renderer.render(at(400), &silent, 255);
        let before = renderer.render(at(410), &silent, 255)[usize::from(Spoke::Mars.base())];

        channel
            .try_send(InputEvent::SpokeTouchDown(Spoke::Mars))
            .unwrap();
        let after = renderer.render(at(420), &silent, 255)[usize::from(Spoke::Mars.base())];
        assert_ne!(before, BLACK);
        assert_ne!(after, before);
    }

    #[test]
    fn test_render_eases_brightness() {
        let channel: InputChannel<4> = InputChannel::new();
        let mut renderer = Renderer::new(channel.receiver(), &quiet_config());
        let silent = SpectrumFrame::silent();

        let frame = renderer.render(at(0), &silent, 128);
        assert!(frame.iter().all(|led| *led == BLACK));
        assert_eq!(renderer.brightness(), 0);

        renderer.render(at(400), &silent, 128);
        assert_eq!(renderer.brightness(), 128);
    }

    #[test]
    fn test_brightness_filter() {
        let mut filter = BrightnessFilter::new(255, &BrightnessFilterConfig::default());
        let mut frame = [WHITE; 3];
        filter.apply(&mut frame);
        assert_eq!(frame, [WHITE; 3]);

        filter.set(128, at(0));
        assert!(filter.is_transitioning());
        filter.tick(at(300));
        assert_eq!(filter.current(), 128);
        filter.apply(&mut frame);
        assert_eq!(frame[0], Rgb::new(128, 128, 128));

        filter.set_immediate(0, at(400));
        filter.apply(&mut frame);
        assert_eq!(frame, [BLACK; 3]);
    }

    #[test]
    fn test_brightness_filter_correction() {
        let config = BrightnessFilterConfig {
            min_brightness: 20,
            scale: 128,
            ..BrightnessFilterConfig::default()
        };
        let mut filter = BrightnessFilter::new(0, &config);
        filter.set(200, at(0));
        filter.tick(at(300));
        assert_eq!(filter.current(), 110);

        filter.set(0, at(300));
        filter.tick(at(600));
        assert_eq!(filter.current(), 0);
    }

    #[test]
    fn test_welcome_animation() {
        let mut welcome = WelcomeAnimation::new(&mut Random::new(3));
        let mut out = [WHITE; NUM_LEDS];

        assert!(welcome.render(at(1000), &mut out));
        assert!(out.iter().all(|led| *led == BLACK));

        assert!(welcome.render(at(1600), &mut out));
        assert!(out.iter().any(|led| *led != BLACK));

        assert!(!welcome.render(at(2300), &mut out));
        assert!(welcome.is_finished());
        assert!(out.iter().all(|led| *led == BLACK));
        assert!(!welcome.render(at(2400), &mut out));
    }

    #[test]
    fn test_frame_scheduler_paces_frames() {
        let channel: InputChannel<4> = InputChannel::new();
        let renderer = Renderer::new(channel.receiver(), &quiet_config());
        let mut scheduler = FrameScheduler::new(renderer, RecordingDriver::default(), Silence);
        let frame_ms = DEFAULT_FRAME_DURATION.as_millis();

        let result = scheduler.tick(at(0), 255);
        assert_eq!(result.next_deadline, at(frame_ms));
        assert_eq!(result.sleep_duration, DEFAULT_FRAME_DURATION);

        let result = scheduler.tick(at(frame_ms), 255);
        assert_eq!(result.next_deadline, at(2 * frame_ms));

        // Far behind schedule: the backlog is dropped
        let result = scheduler.tick(at(100), 255);
        assert_eq!(result.next_deadline, at(100 + frame_ms));

        assert_eq!(scheduler.output().frames, 3);
        assert_eq!(scheduler.output().last_len, NUM_LEDS);
        assert!(!scheduler.renderer().is_welcoming());
    }
}
