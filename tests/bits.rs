mod tests {
    use embassy_time::{Duration, Instant};
    use sculpture_light_engine::bits::{
        Bit, BitHooks, BitsFiller, BitsFillerConfig, FlowRule, SpawnRule,
    };
    use sculpture_light_engine::color::{BLACK, Rgb};
    use sculpture_light_engine::graph::{
        Edge, EdgeTypes, EdgeTypesPair, LedGraph, NUM_LEDS, PixelGraph, PixelMask,
    };
    use sculpture_light_engine::random::Random;

    const CW_OUT: EdgeTypes = EdgeTypes::CLOCKWISE.union(EdgeTypes::OUTBOUND);

    fn ring4() -> PixelGraph<4> {
        let mut graph = PixelGraph::new();
        for px in 0..4 {
            graph.add_edge(Edge::new(px, (px + 1) % 4, CW_OUT), true).unwrap();
        }
        graph
    }

    fn manual(speed: u16) -> BitsFillerConfig {
        BitsFillerConfig {
            speed,
            spawn_rule: SpawnRule::Manual,
            ..BitsFillerConfig::default()
        }
    }

    fn at(ms: u64) -> Instant {
        Instant::from_millis(ms)
    }

    #[test]
    fn test_ring_flow_lands_on_next_node() {
        let graph = ring4();
        let mut filler = BitsFiller::<4, 4>::new(manual(10), Random::new(1));
        filler
            .spawn_bit(0, EdgeTypesPair::single(EdgeTypes::CLOCKWISE), at(0))
            .unwrap();

        for ms in (0..1000).step_by(10) {
            filler.update(at(ms), &graph);
        }

        assert_eq!(filler.bits().len(), 1);
        // Nine quanta of 100 ms elapsed, nine steps around a ring of four
        assert_eq!(filler.bits()[0].px, 1);
    }

    #[test]
    fn test_bit_moves_once_per_quantum() {
        let graph = ring4();
        let mut filler = BitsFiller::<4, 4>::new(manual(10), Random::new(1));
        filler
            .spawn_bit(0, EdgeTypesPair::single(EdgeTypes::CLOCKWISE), at(0))
            .unwrap();

        filler.update(at(0), &graph);
        assert_eq!(filler.bits()[0].px, 0);
        filler.update(at(99), &graph);
        assert_eq!(filler.bits()[0].px, 0);
        filler.update(at(100), &graph);
        assert_eq!(filler.bits()[0].px, 1);
    }

    #[test]
    fn test_fresh_bit_is_drawn_before_moving() {
        let graph = ring4();
        let mut filler = BitsFiller::<4, 4>::new(manual(1000), Random::new(1));
        filler
            .spawn_bit(2, EdgeTypesPair::single(EdgeTypes::CLOCKWISE), at(0))
            .unwrap();
        assert!(filler.bits()[0].is_first_frame());

        filler.update(at(5), &graph);
        assert_eq!(filler.bits()[0].px, 2);
        assert!(!filler.bits()[0].is_first_frame());
        assert_ne!(filler.leds()[2], BLACK);
    }

    #[test]
    fn test_priority_falls_back_to_second_tier() {
        let mut graph = PixelGraph::<3>::new();
        graph
            .add_edge(Edge::new(0, 1, EdgeTypes::CLOCKWISE), false)
            .unwrap();
        let config = BitsFillerConfig {
            flow_rule: FlowRule::Priority,
            ..manual(10)
        };
        let mut filler = BitsFiller::<3, 4>::new(config, Random::new(2));
        filler
            .spawn_bit(
                0,
                EdgeTypesPair::new(EdgeTypes::OUTBOUND, EdgeTypes::CLOCKWISE),
                at(0),
            )
            .unwrap();

        filler.update(at(0), &graph);
        filler.update(at(100), &graph);
        assert_eq!(filler.bits().len(), 1);
        assert_eq!(filler.bits()[0].px, 1);
    }

    #[test]
    fn test_priority_prefers_first_tier() {
        let mut graph = PixelGraph::<3>::new();
        graph
            .add_edge(Edge::new(0, 1, EdgeTypes::CLOCKWISE), false)
            .unwrap();
        graph
            .add_edge(Edge::new(0, 2, EdgeTypes::OUTBOUND), false)
            .unwrap();
        let config = BitsFillerConfig {
            flow_rule: FlowRule::Priority,
            ..manual(10)
        };
        let mut filler = BitsFiller::<3, 4>::new(config, Random::new(2));
        filler
            .spawn_bit(
                0,
                EdgeTypesPair::new(EdgeTypes::OUTBOUND, EdgeTypes::CLOCKWISE),
                at(0),
            )
            .unwrap();

        filler.update(at(0), &graph);
        filler.update(at(100), &graph);
        assert_eq!(filler.bits()[0].px, 2);
    }

    #[test]
    fn test_split_clones_into_every_branch() {
        let mut graph = PixelGraph::<4>::new();
        for to in 1..4 {
            graph
                .add_edge(Edge::new(0, to, EdgeTypes::OUTBOUND), true)
                .unwrap();
        }
        let config = BitsFillerConfig {
            flow_rule: FlowRule::Split,
            split_directions: EdgeTypes::OUTBOUND,
            ..manual(10)
        };
        let mut filler = BitsFiller::<4, 8>::new(config, Random::new(3));
        filler
            .spawn_bit(0, EdgeTypesPair::single(EdgeTypes::OUTBOUND), at(0))
            .unwrap();

        filler.update(at(0), &graph);
        filler.update(at(100), &graph);

        let mut positions: Vec<u16> = filler.bits().iter().map(|bit| bit.px).collect();
        positions.sort_unstable();
        assert_eq!(positions, vec![1, 2, 3]);
        assert!(filler.bits().iter().all(|bit| !bit.is_first_frame()));
    }

    #[test]
    fn test_split_ignores_other_directions() {
        let mut graph = PixelGraph::<4>::new();
        graph
            .add_edge(Edge::new(0, 1, EdgeTypes::OUTBOUND), false)
            .unwrap();
        graph
            .add_edge(Edge::new(0, 2, EdgeTypes::CLOCKWISE), false)
            .unwrap();
        let config = BitsFillerConfig {
            flow_rule: FlowRule::Split,
            split_directions: EdgeTypes::OUTBOUND,
            ..manual(10)
        };
        let mut filler = BitsFiller::<4, 8>::new(config, Random::new(3));
        filler
            .spawn_bit(
                0,
                EdgeTypesPair::new(EdgeTypes::OUTBOUND, EdgeTypes::CLOCKWISE),
                at(0),
            )
            .unwrap();

        filler.update(at(0), &graph);
        filler.update(at(100), &graph);
        // The clockwise branch is not a split direction
        assert_eq!(filler.bits().len(), 1);
    }

    #[test]
    fn test_bit_without_exit_is_removed() {
        let graph = PixelGraph::<2>::new();
        let mut filler = BitsFiller::<2, 4>::new(manual(10), Random::new(4));
        filler
            .spawn_bit(0, EdgeTypesPair::single(EdgeTypes::ANY), at(0))
            .unwrap();

        filler.update(at(0), &graph);
        assert_eq!(filler.bits().len(), 1);
        filler.update(at(100), &graph);
        assert!(filler.bits().is_empty());
    }

    #[test]
    fn test_allowed_pixels_block_movement() {
        let graph = ring4();
        let config = BitsFillerConfig {
            allowed_pixels: Some(PixelMask::from_pixels(&[0, 1])),
            ..manual(10)
        };
        let mut filler = BitsFiller::<4, 4>::new(config, Random::new(5));
        filler
            .spawn_bit(0, EdgeTypesPair::single(EdgeTypes::CLOCKWISE), at(0))
            .unwrap();

        filler.update(at(0), &graph);
        filler.update(at(100), &graph);
        assert_eq!(filler.bits()[0].px, 1);
        filler.update(at(200), &graph);
        assert!(filler.bits().is_empty());
    }

    #[test]
    fn test_lifespan_expiry() {
        let graph = PixelGraph::<2>::new();
        let config = BitsFillerConfig {
            lifespan: Duration::from_millis(500),
            ..manual(0)
        };
        let mut filler = BitsFiller::<2, 4>::new(config, Random::new(6));
        filler
            .spawn_bit(0, EdgeTypesPair::single(EdgeTypes::ANY), at(0))
            .unwrap();

        filler.update(at(0), &graph);
        filler.update(at(500), &graph);
        assert_eq!(filler.bits().len(), 1);
        filler.update(at(501), &graph);
        assert!(filler.bits().is_empty());
    }

    #[test]
    fn test_spawn_throttle() {
        let graph = PixelGraph::<4>::new();
        let config = BitsFillerConfig {
            max_spawn_bits: 5,
            max_bits_per_second: 2,
            speed: 0,
            ..BitsFillerConfig::default()
        };
        let mut filler = BitsFiller::<4, 8>::new(config, Random::new(7));

        filler.update(at(0), &graph);
        assert_eq!(filler.bits().len(), 1);
        filler.update(at(499), &graph);
        assert_eq!(filler.bits().len(), 1);
        filler.update(at(500), &graph);
        assert_eq!(filler.bits().len(), 2);
    }

    #[test]
    fn test_population_without_throttle() {
        let graph = PixelGraph::<4>::new();
        let config = BitsFillerConfig {
            max_spawn_bits: 5,
            max_bits_per_second: 0,
            speed: 0,
            ..BitsFillerConfig::default()
        };
        let mut filler = BitsFiller::<4, 8>::new(config, Random::new(8));
        filler.update(at(0), &graph);
        assert_eq!(filler.bits().len(), 5);
        filler.update(at(10), &graph);
        assert_eq!(filler.bits().len(), 5);
    }

    #[test]
    fn test_population_is_capped_by_capacity() {
        let graph = PixelGraph::<4>::new();
        let config = BitsFillerConfig {
            max_spawn_bits: 10,
            speed: 0,
            ..BitsFillerConfig::default()
        };
        let mut filler = BitsFiller::<4, 3>::new(config, Random::new(9));
        filler.update(at(0), &graph);
        assert_eq!(filler.bits().len(), 3);
    }

    #[test]
    fn test_spawn_bit_rejects_invalid_requests() {
        let mut filler = BitsFiller::<4, 2>::new(manual(1), Random::new(10));
        let any = EdgeTypesPair::single(EdgeTypes::ANY);
        assert!(filler.spawn_bit(9, any, at(0)).is_none());
        assert!(filler.spawn_bit(0, any, at(0)).is_some());
        assert!(filler.spawn_bit(1, any, at(0)).is_some());
        assert!(filler.spawn_bit(2, any, at(0)).is_none());
        assert_eq!(filler.bits().len(), 2);
    }

    #[test]
    fn test_spawned_direction_is_a_single_flag() {
        let mut filler = BitsFiller::<4, 2>::new(manual(1), Random::new(11));
        let bit = filler
            .spawn_bit(
                0,
                EdgeTypesPair::new(EdgeTypes::ANY, EdgeTypes::empty()),
                at(0),
            )
            .unwrap();
        assert_eq!(bit.directions.first.bits().count_ones(), 1);
        assert!(bit.directions.second.is_empty());
    }

    #[test]
    fn test_fade_down_is_time_proportional() {
        let graph = PixelGraph::<2>::new();
        let config = BitsFillerConfig {
            lifespan: Duration::from_millis(100),
            fade_down: 1,
            ..manual(0)
        };
        let mut filler = BitsFiller::<2, 4>::new(config, Random::new(12));
        filler
            .spawn_bit(0, EdgeTypesPair::single(EdgeTypes::ANY), at(0))
            .unwrap();

        filler.update(at(0), &graph);
        assert_eq!(filler.leds()[0], Rgb::new(255, 255, 255));

        filler.update(at(101), &graph);
        assert!(filler.bits().is_empty());
        assert_eq!(filler.leds()[0], Rgb::new(154, 154, 154));

        filler.update(at(356), &graph);
        assert_eq!(filler.leds()[0], BLACK);
    }

    #[test]
    fn test_fade_up_lights_pixel_ahead() {
        let graph = ring4();
        let config = BitsFillerConfig {
            fade_up_distance: 1,
            ..manual(10)
        };
        let mut filler = BitsFiller::<4, 4>::new(config, Random::new(13));
        filler
            .spawn_bit(0, EdgeTypesPair::single(EdgeTypes::CLOCKWISE), at(0))
            .unwrap();

        filler.update(at(0), &graph);
        assert_eq!(filler.leds()[1], BLACK);

        filler.update(at(50), &graph);
        let ahead = filler.leds()[1];
        assert!(ahead.r > 0 && ahead.r < 255);
        assert_eq!(filler.leds()[3], BLACK);
    }

    #[test]
    fn test_reset_clears_bits_and_buffer() {
        let graph = ring4();
        let mut filler = BitsFiller::<4, 4>::new(manual(10), Random::new(14));
        filler
            .spawn_bit(0, EdgeTypesPair::single(EdgeTypes::CLOCKWISE), at(0))
            .unwrap();
        filler.update(at(0), &graph);

        filler.reset();
        assert!(filler.bits().is_empty());
        assert!(filler.leds().iter().all(|led| *led == BLACK));
    }

    struct Recolor {
        spawned: usize,
    }

    impl BitHooks for Recolor {
        fn bit_spawned(&mut self, bit: &mut Bit, _now: Instant) {
            self.spawned += 1;
            bit.color_index = 7;
        }

        fn update_bit(&mut self, bit: &mut Bit, _now: Instant) {
            bit.color = Rgb::new(0, 0, bit.color_index);
        }
    }

    #[test]
    fn test_hooks_see_every_bit() {
        let graph = PixelGraph::<4>::new();
        let config = BitsFillerConfig {
            max_spawn_bits: 2,
            speed: 0,
            ..BitsFillerConfig::default()
        };
        let mut filler = BitsFiller::<4, 4>::new(config, Random::new(15));
        let mut hooks = Recolor { spawned: 0 };

        filler.update_with(at(0), &graph, &mut hooks);
        assert_eq!(hooks.spawned, 2);
        for bit in filler.bits() {
            assert_eq!(bit.color, Rgb::new(0, 0, 7));
            assert_eq!(filler.leds()[usize::from(bit.px)], Rgb::new(0, 0, 7));
        }
    }

    #[test]
    fn test_bits_stay_inside_the_sculpture() {
        let graph = LedGraph::sculpture();
        let config = BitsFillerConfig {
            max_spawn_bits: 20,
            speed: 30,
            lifespan: Duration::from_millis(300),
            flow_rule: FlowRule::Split,
            ..BitsFillerConfig::default()
        };
        let mut filler = BitsFiller::<NUM_LEDS, 32>::new(config, Random::new(16));

        for ms in (0..3000).step_by(7) {
            filler.update(at(ms), &graph);
            for bit in filler.bits() {
                assert!(usize::from(bit.px) < NUM_LEDS);
                assert!(bit.age(at(ms)) <= Duration::from_millis(300));
            }
        }
    }
}
