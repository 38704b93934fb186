//! Bits born on the ring drift clockwise and wander down the spokes

use embassy_time::{Duration, Instant};

use super::paint::PalettePaint;
use super::{PATTERN_MAX_BITS, Pattern, PatternContext};
use crate::bits::{BitsFiller, BitsFillerConfig, FlowRule, SpawnRule};
use crate::color::Rgb;
use crate::graph::{EdgeTypes, EdgeTypesPair, NUM_LEDS, RING};
use crate::random::Random;

#[derive(Debug, Clone)]
pub struct DownstreamPattern {
    filler: BitsFiller<NUM_LEDS, PATTERN_MAX_BITS>,
    rng: Random,
}

impl DownstreamPattern {
    pub fn new(mut rng: Random) -> Self {
        let config = BitsFillerConfig {
            max_spawn_bits: 12,
            max_bits_per_second: 6,
            speed: 12,
            lifespan: Duration::from_millis(8000),
            directions: EdgeTypesPair::new(EdgeTypes::CLOCKWISE, EdgeTypes::OUTBOUND),
            flow_rule: FlowRule::Random,
            spawn_rule: SpawnRule::MaintainPopulation,
            split_directions: EdgeTypes::OUTBOUND,
            spawn_pixels: Some(&RING),
            fade_down: 2,
            ..BitsFillerConfig::default()
        };
        Self {
            filler: BitsFiller::new(config, rng.fork()),
            rng,
        }
    }

    pub fn flow_rule(&self) -> FlowRule {
        self.filler.config().flow_rule
    }
}

impl Pattern for DownstreamPattern {
    fn setup(&mut self, _ctx: &mut PatternContext<'_>) {
        self.filler.reset();
    }

    fn update(&mut self, ctx: &mut PatternContext<'_>) {
        let mut paint = PalettePaint::new(ctx.colors, &mut self.rng);
        self.filler.update_with(ctx.now, ctx.graph, &mut paint);
    }

    fn leds(&self) -> &[Rgb; NUM_LEDS] {
        self.filler.leds()
    }

    /// Toggle between wandering and splitting at every spoke
    fn poke(&mut self, _now: Instant) {
        let config = self.filler.config_mut();
        config.flow_rule = match config.flow_rule {
            FlowRule::Split => FlowRule::Random,
            _ => FlowRule::Split,
        };
    }

    fn description(&self) -> &'static str {
        "downstream"
    }
}
