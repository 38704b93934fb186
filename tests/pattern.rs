mod tests {
    use embassy_time::{Duration, Instant};
    use sculpture_light_engine::audio::SpectrumFrame;
    use sculpture_light_engine::bits::FlowRule;
    use sculpture_light_engine::color::{BLACK, Rgb};
    use sculpture_light_engine::graph::{LedGraph, NUM_LEDS, RING};
    use sculpture_light_engine::palette::{ColorMode, FlagColors};
    use sculpture_light_engine::pattern::{
        Lifecycle, Pattern, PatternContext, PatternId, PatternInstance, PatternManager,
        PatternManagerConfig, PatternSlot, SoundRipplePattern,
    };
    use sculpture_light_engine::random::Random;

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    fn loud() -> SpectrumFrame {
        SpectrumFrame {
            amplitude: 1000,
            ..SpectrumFrame::silent()
        }
    }

    #[test]
    fn test_lifecycle() {
        let mut lifecycle = Lifecycle::default();
        assert!(!lifecycle.is_running());
        assert_eq!(lifecycle.run_time(at(100)), Duration::from_millis(0));

        lifecycle.start(at(100));
        assert!(lifecycle.is_running());
        assert_eq!(lifecycle.run_time(at(150)), Duration::from_millis(50));
        assert_eq!(lifecycle.frame_time(at(150)), Duration::from_millis(0));

        lifecycle.mark_updated(at(160));
        assert_eq!(lifecycle.frame_time(at(176)), Duration::from_millis(16));

        lifecycle.stop();
        assert!(!lifecycle.is_running());
        assert_eq!(lifecycle.run_time(at(200)), Duration::from_millis(0));
    }

    #[test]
    fn test_pattern_instance_runs_only_while_started() {
        let graph = LedGraph::sculpture();
        let audio = SpectrumFrame::silent();
        let mut colors = FlagColors::new(Random::new(1), 0);
        let mut rng = Random::new(2);
        let mut instance = PatternInstance::new(PatternId::FlagBands.to_slot(&mut rng));

        let mut ctx = PatternContext::new(at(0), &graph, &mut colors, &audio);
        instance.run(&mut ctx);
        assert!(instance.slot().leds().iter().all(|led| *led == BLACK));

        instance.start(&mut ctx);
        ctx.now = at(20);
        instance.run(&mut ctx);
        assert!(instance.is_running());
        assert_eq!(ctx.run_time, Duration::from_millis(20));
        assert_ne!(instance.slot().leds()[usize::from(RING[0])], BLACK);

        instance.stop();
        assert!(!instance.is_running());
        assert_eq!(instance.id(), PatternId::FlagBands);
    }

    #[test]
    fn test_pattern_id_names() {
        for (raw, id) in PatternId::ALL.iter().enumerate() {
            assert_eq!(PatternId::from_raw(raw as u8), Some(*id));
            assert_eq!(PatternId::parse_from_str(id.as_str()), Some(*id));
        }
        assert_eq!(PatternId::from_raw(42), None);
        assert_eq!(PatternId::parse_from_str("unknown"), None);
        assert_eq!(PatternId::SoundRipple.as_str(), "sound_ripple");
    }

    #[test]
    fn test_slot_reports_its_id() {
        let mut rng = Random::new(3);
        for id in PatternId::ALL {
            assert_eq!(id.to_slot(&mut rng).id(), id);
        }
    }

    #[test]
    fn test_sound_ripple_needs_sound() {
        let pattern = SoundRipplePattern::new(Random::new(4));
        assert!(!pattern.wants_to_run(&SpectrumFrame::silent()));
        assert!(pattern.wants_to_run(&loud()));

        assert_eq!(SoundRipplePattern::ripples_for(0), 0);
        assert_eq!(SoundRipplePattern::ripples_for(399), 0);
        assert_eq!(SoundRipplePattern::ripples_for(400), 1);
        assert_eq!(SoundRipplePattern::ripples_for(600), 2);
        assert_eq!(SoundRipplePattern::ripples_for(u32::MAX), 10);
    }

    #[test]
    fn test_next_pattern_skips_unwilling() {
        let graph = LedGraph::sculpture();
        let silent = SpectrumFrame::silent();
        let mut manager = PatternManager::new(&PatternManagerConfig::default(), Random::new(5));

        assert!(manager.next_pattern(at(0), &graph, &silent));
        assert_eq!(manager.active_id(), Some(PatternId::Downstream));
        assert_eq!(manager.pattern_index(), Some(0));

        assert!(manager.next_pattern(at(10), &graph, &silent));
        assert_eq!(manager.active_id(), Some(PatternId::Coupling));

        assert!(manager.next_pattern(at(20), &graph, &silent));
        assert_eq!(manager.active_id(), Some(PatternId::FlagBands));
        assert_eq!(manager.pattern_index(), Some(3));

        assert!(manager.next_pattern(at(30), &graph, &silent));
        assert_eq!(manager.active_id(), Some(PatternId::Downstream));

        assert!(manager.previous_pattern(at(40), &graph, &silent));
        assert_eq!(manager.active_id(), Some(PatternId::FlagBands));
        assert!(manager.previous_pattern(at(50), &graph, &silent));
        assert_eq!(manager.active_id(), Some(PatternId::Coupling));
    }

    #[test]
    fn test_sound_pattern_runs_when_loud() {
        let graph = LedGraph::sculpture();
        let mut manager = PatternManager::new(&PatternManagerConfig::default(), Random::new(6));
        manager.start_pattern_at_index(1, at(0), &graph, &loud());
        assert!(manager.next_pattern(at(0), &graph, &loud()));
        assert_eq!(manager.active_id(), Some(PatternId::SoundRipple));

        let mut out = [BLACK; NUM_LEDS];
        manager.tick(at(0), &graph, &loud(), &mut out);
        assert!(out.iter().any(|led| *led != BLACK));
    }

    #[test]
    fn test_all_patterns_refusing_leaves_nothing_running() {
        let graph = LedGraph::sculpture();
        let silent = SpectrumFrame::silent();
        let config = PatternManagerConfig {
            patterns: &[PatternId::SoundRipple],
            idle_pattern: None,
            ..PatternManagerConfig::default()
        };
        let mut manager = PatternManager::new(&config, Random::new(7));

        assert!(!manager.next_pattern(at(0), &graph, &silent));
        assert!(manager.active().is_none());

        let mut out = [Rgb::new(1, 2, 3); NUM_LEDS];
        manager.tick(at(10), &graph, &silent, &mut out);
        assert!(manager.active().is_none());
        assert!(out.iter().all(|led| *led == BLACK));
    }

    #[test]
    fn test_start_pattern_hands_back_refused_slot() {
        let graph = LedGraph::sculpture();
        let mut manager = PatternManager::new(&PatternManagerConfig::default(), Random::new(8));
        let slot = PatternId::SoundRipple.to_slot(&mut Random::new(9));

        let result = manager.start_pattern(slot, at(0), &graph, &SpectrumFrame::silent());
        assert!(matches!(result, Err(PatternSlot::SoundRipple(_))));
        assert!(manager.active().is_none());
    }

    #[test]
    fn test_idle_pattern_starts_when_nothing_runs() {
        let graph = LedGraph::sculpture();
        let silent = SpectrumFrame::silent();
        let mut manager = PatternManager::new(&PatternManagerConfig::default(), Random::new(10));
        let mut out = [BLACK; NUM_LEDS];

        manager.tick(at(0), &graph, &silent, &mut out);
        assert!(out.iter().all(|led| *led == BLACK));
        assert_eq!(manager.active_id(), Some(PatternId::FlagBands));

        manager.tick(at(10), &graph, &silent, &mut out);
        for &px in &RING {
            assert_ne!(out[usize::from(px)], BLACK, "ring pixel {px}");
        }
    }

    #[test]
    fn test_auto_rotate_retires_to_idle_pattern() {
        let graph = LedGraph::sculpture();
        let silent = SpectrumFrame::silent();
        let config = PatternManagerConfig {
            patterns: &[PatternId::Downstream],
            auto_rotate_timeout: Duration::from_millis(1000),
            ..PatternManagerConfig::default()
        };
        let mut manager = PatternManager::new(&config, Random::new(11));
        let mut out = [BLACK; NUM_LEDS];

        assert!(manager.next_pattern(at(0), &graph, &silent));
        manager.tick(at(500), &graph, &silent, &mut out);
        assert_eq!(manager.active_id(), Some(PatternId::Downstream));

        manager.tick(at(1001), &graph, &silent, &mut out);
        assert_eq!(manager.active_id(), Some(PatternId::FlagBands));

        // The idle pattern is never retired
        manager.tick(at(5000), &graph, &silent, &mut out);
        assert_eq!(manager.active_id(), Some(PatternId::FlagBands));
    }

    #[test]
    fn test_auto_rotate_can_be_disabled() {
        let graph = LedGraph::sculpture();
        let silent = SpectrumFrame::silent();
        let config = PatternManagerConfig {
            patterns: &[PatternId::Downstream],
            auto_rotate_timeout: Duration::from_millis(1000),
            ..PatternManagerConfig::default()
        };
        let mut manager = PatternManager::new(&config, Random::new(12));
        let mut out = [BLACK; NUM_LEDS];

        assert!(!manager.toggle_auto_rotate());
        assert!(manager.next_pattern(at(0), &graph, &silent));
        manager.tick(at(5000), &graph, &silent, &mut out);
        assert_eq!(manager.active_id(), Some(PatternId::Downstream));

        manager.set_auto_rotate(true);
        assert!(manager.auto_rotate());
        manager.tick(at(5010), &graph, &silent, &mut out);
        assert_eq!(manager.active_id(), Some(PatternId::FlagBands));
    }

    #[test]
    fn test_downstream_draws_flag_colors() {
        let graph = LedGraph::sculpture();
        let silent = SpectrumFrame::silent();
        let mut manager = PatternManager::new(&PatternManagerConfig::default(), Random::new(13));
        let mut out = [BLACK; NUM_LEDS];

        assert!(manager.next_pattern(at(0), &graph, &silent));
        manager.tick(at(0), &graph, &silent, &mut out);
        assert!(out.iter().any(|led| *led != BLACK));
    }

    #[test]
    fn test_poke_reaches_active_pattern() {
        let graph = LedGraph::sculpture();
        let silent = SpectrumFrame::silent();
        let mut manager = PatternManager::new(&PatternManagerConfig::default(), Random::new(14));
        assert!(manager.next_pattern(at(0), &graph, &silent));

        let flow_rule = |manager: &PatternManager| match manager.active().map(PatternInstance::slot) {
            Some(PatternSlot::Downstream(pattern)) => Some(pattern.flow_rule()),
            _ => None,
        };
        assert_eq!(flow_rule(&manager), Some(FlowRule::Random));
        manager.poke(at(10));
        assert_eq!(flow_rule(&manager), Some(FlowRule::Split));
    }

    #[test]
    fn test_palette_steps_through_color_modes() {
        let mut manager = PatternManager::new(&PatternManagerConfig::default(), Random::new(15));
        assert_eq!(manager.colors().color_mode(), ColorMode::Flag(0));

        manager.next_palette();
        assert_eq!(manager.colors().color_mode(), ColorMode::Flag(1));
        manager.previous_palette();
        manager.previous_palette();
        assert_eq!(manager.colors().color_mode(), ColorMode::Rotating);
    }

    #[test]
    fn test_rotating_config_starts_unpinned() {
        let config = PatternManagerConfig {
            color_mode: ColorMode::Rotating,
            ..PatternManagerConfig::default()
        };
        let manager = PatternManager::new(&config, Random::new(16));
        assert_eq!(manager.colors().flag_index(), None);
    }
}
