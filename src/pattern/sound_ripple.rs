//! Sound driven ripples splitting from the ring into the spokes

use embassy_time::Duration;

use super::paint::PalettePaint;
use super::{PATTERN_MAX_BITS, Pattern, PatternContext};
use crate::audio::{SPECTRUM_BINS, SpectrumFrame};
use crate::bits::{BitsFiller, BitsFillerConfig, FlowRule, SpawnRule};
use crate::color::Rgb;
use crate::graph::{EdgeTypes, EdgeTypesPair, NUM_LEDS, RING};
use crate::random::Random;

/// Amplitude below which the pattern considers the room silent
pub const SOUND_THRESHOLD: u32 = 400;

/// Amplitude worth one more live ripple
const AMPLITUDE_PER_BIT: u32 = 200;

const MAX_RIPPLES: usize = 10;

#[derive(Debug, Clone)]
pub struct SoundRipplePattern {
    filler: BitsFiller<NUM_LEDS, PATTERN_MAX_BITS>,
    rng: Random,
}

impl SoundRipplePattern {
    pub fn new(mut rng: Random) -> Self {
        let config = BitsFillerConfig {
            max_spawn_bits: 0,
            max_bits_per_second: 12,
            speed: 20,
            lifespan: Duration::from_millis(1500),
            directions: EdgeTypesPair::new(
                EdgeTypes::CLOCKWISE.union(EdgeTypes::COUNTERCLOCKWISE),
                EdgeTypes::OUTBOUND,
            ),
            flow_rule: FlowRule::Split,
            spawn_rule: SpawnRule::MaintainPopulation,
            split_directions: EdgeTypes::OUTBOUND,
            spawn_pixels: Some(&RING),
            fade_down: 3,
            ..BitsFillerConfig::default()
        };
        Self {
            filler: BitsFiller::new(config, rng.fork()),
            rng,
        }
    }

    /// Live ripple target for a given loudness, zero below the threshold
    pub fn ripples_for(amplitude: u32) -> usize {
        if amplitude < SOUND_THRESHOLD {
            return 0;
        }
        let extra = (amplitude - SOUND_THRESHOLD) / AMPLITUDE_PER_BIT;
        usize::try_from(extra)
            .map_or(MAX_RIPPLES, |extra| extra.saturating_add(1))
            .min(MAX_RIPPLES)
    }
}

impl Pattern for SoundRipplePattern {
    fn setup(&mut self, _ctx: &mut PatternContext<'_>) {
        self.filler.reset();
    }

    #[allow(clippy::cast_possible_truncation)]
    fn update(&mut self, ctx: &mut PatternContext<'_>) {
        // Silence stops new ripples; live ones run out their lifespan.
        self.filler.config_mut().max_spawn_bits = Self::ripples_for(ctx.audio.amplitude);

        let index = ctx
            .audio
            .loudest_bin()
            .map_or(0, |bin| (bin * 0xFF / SPECTRUM_BINS) as u8);
        let mut paint = PalettePaint::fixed(ctx.colors, &mut self.rng, index);
        self.filler.update_with(ctx.now, ctx.graph, &mut paint);
    }

    fn leds(&self) -> &[Rgb; NUM_LEDS] {
        self.filler.leds()
    }

    fn wants_to_run(&self, audio: &SpectrumFrame) -> bool {
        audio.amplitude >= SOUND_THRESHOLD
    }

    fn description(&self) -> &'static str {
        "sound ripple"
    }
}
