//! Bits fall in from the spoke tips and then chase around the ring

use embassy_time::{Duration, Instant};

use super::paint::PalettePaint;
use super::{PATTERN_MAX_BITS, Pattern, PatternContext};
use crate::bits::{BitsFiller, BitsFillerConfig, FlowRule, SpawnRule};
use crate::color::Rgb;
use crate::graph::{EdgeTypes, EdgeTypesPair, NUM_LEDS, SPOKE_TIPS};
use crate::random::Random;

#[derive(Debug, Clone)]
pub struct CouplingPattern {
    filler: BitsFiller<NUM_LEDS, PATTERN_MAX_BITS>,
    rng: Random,
}

impl CouplingPattern {
    pub fn new(mut rng: Random) -> Self {
        let config = BitsFillerConfig {
            max_spawn_bits: 6,
            max_bits_per_second: 3,
            speed: 16,
            lifespan: Duration::from_millis(5000),
            directions: EdgeTypesPair::new(
                EdgeTypes::INBOUND,
                EdgeTypes::CLOCKWISE.union(EdgeTypes::COUNTERCLOCKWISE),
            ),
            flow_rule: FlowRule::Priority,
            spawn_rule: SpawnRule::MaintainPopulation,
            spawn_pixels: Some(&SPOKE_TIPS),
            fade_down: 3,
            fade_up_distance: 2,
            ..BitsFillerConfig::default()
        };
        Self {
            filler: BitsFiller::new(config, rng.fork()),
            rng,
        }
    }
}

impl Pattern for CouplingPattern {
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

    /// Send every bit on the ring the other way round
    fn poke(&mut self, _now: Instant) {
        for bit in self.filler.bits_mut() {
            bit.directions.second = bit.directions.second.transpose();
        }
    }

    fn description(&self) -> &'static str {
        "coupling"
    }
}
