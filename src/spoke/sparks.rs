use embassy_time::{Duration, Instant};

use super::{SpokeFrame, SpokePattern};
use crate::bits::{BitsFiller, BitsFillerConfig, FlowRule, SpawnRule};
use crate::color::{BLACK, Rgb};
use crate::graph::{EdgeTypes, EdgeTypesPair, NUM_LEDS, PixelMask, RING, Spoke};
use crate::random::Random;

const SPARK_MAX_BITS: usize = 16;

/// Time between two sparks while the spoke is held
const SPARK_INTERVAL: Duration = Duration::from_millis(100);

/// Sparks fired by a single tap
const TAP_BURST: u8 = 3;

/// Time the trails need to fade after the last spark died
const FADE_OUT: Duration = Duration::from_millis(600);

/// Sweep offset between spokes, keeps neighbouring spokes apart in color
const SPOKE_COLOR_OFFSET_MS: u64 = 1000;

/// Sparks running out along the spoke
///
/// In split mode they start on the ring root instead and also run around
/// the ring in both directions.
#[derive(Debug, Clone)]
pub struct SparksPattern {
    spoke: Spoke,
    split: bool,
    filler: BitsFiller<NUM_LEDS, SPARK_MAX_BITS>,
    rng: Random,
    pressed: bool,
    burst: u8,
    last_spark: Option<Instant>,
    last_active: Option<Instant>,
}

impl SparksPattern {
    pub fn new(spoke: Spoke, split: bool, mut rng: Random) -> Self {
        let spoke_pixels = PixelMask::from_pixels(spoke.pixels());
        let config = if split {
            BitsFillerConfig {
                max_spawn_bits: 0,
                speed: 24,
                lifespan: Duration::from_millis(1500),
                directions: EdgeTypesPair::new(
                    EdgeTypes::OUTBOUND,
                    EdgeTypes::CLOCKWISE.union(EdgeTypes::COUNTERCLOCKWISE),
                ),
                flow_rule: FlowRule::Split,
                spawn_rule: SpawnRule::Manual,
                split_directions: EdgeTypes::ANY,
                allowed_pixels: Some(spoke_pixels.union(PixelMask::from_pixels(&RING))),
                fade_down: 4,
                ..BitsFillerConfig::default()
            }
        } else {
            BitsFillerConfig {
                max_spawn_bits: 0,
                speed: 20,
                directions: EdgeTypesPair::single(EdgeTypes::OUTBOUND),
                flow_rule: FlowRule::Random,
                spawn_rule: SpawnRule::Manual,
                allowed_pixels: Some(spoke_pixels),
                fade_down: 4,
                fade_up_distance: 1,
                ..BitsFillerConfig::default()
            }
        };
        Self {
            spoke,
            split,
            filler: BitsFiller::new(config, rng.fork()),
            rng,
            pressed: false,
            burst: 0,
            last_spark: None,
            last_active: None,
        }
    }

    pub fn spoke(&self) -> Spoke {
        self.spoke
    }

    pub fn is_split(&self) -> bool {
        self.split
    }

    pub fn bit_count(&self) -> usize {
        self.filler.bits().len()
    }

    fn spark_due(&self, now: Instant) -> bool {
        (self.pressed || self.burst > 0)
            && self
                .last_spark
                .is_none_or(|last| now.saturating_duration_since(last) >= SPARK_INTERVAL)
    }

    fn fire(&mut self, frame: &SpokeFrame<'_>) {
        let px = if self.split {
            self.spoke.root()
        } else {
            self.spoke.base()
        };
        let offset = Duration::from_millis(SPOKE_COLOR_OFFSET_MS * u64::from(self.spoke as u8));
        let (color, index) = frame
            .colors
            .flag_sample(true, frame.now, offset, &mut self.rng);

        let directions = self.filler.config().directions;
        if let Some(bit) = self.filler.spawn_bit(px, directions, frame.now) {
            bit.color = color;
            bit.color_index = index;
        }
        self.burst = self.burst.saturating_sub(1);
        self.last_spark = Some(frame.now);
    }
}

impl SpokePattern for SparksPattern {
    fn press(&mut self, now: Instant) {
        self.pressed = true;
        self.last_active = Some(now);
    }

    fn release(&mut self, now: Instant) {
        self.pressed = false;
        self.last_active = Some(now);
    }

    fn tap(&mut self, now: Instant) {
        self.pressed = false;
        self.burst = TAP_BURST;
        self.last_active = Some(now);
    }

    fn update(&mut self, frame: &SpokeFrame<'_>) {
        if self.spark_due(frame.now) {
            self.fire(frame);
        }

        self.filler.update(frame.now, frame.graph);
        if !self.filler.bits().is_empty() {
            self.last_active = Some(frame.now);
        }

        let foreign = frame.context.hidden_by_others(self.spoke);
        if !foreign.is_empty() {
            for (px, led) in self.filler.leds_mut().iter_mut().enumerate() {
                if u16::try_from(px).is_ok_and(|px| foreign.contains(px)) {
                    *led = BLACK;
                }
            }
        }
    }

    fn leds(&self) -> &[Rgb; NUM_LEDS] {
        self.filler.leds()
    }

    fn hidden_pixels(&self) -> PixelMask {
        PixelMask::from_pixels(self.spoke.pixels())
    }

    fn suppression(&self) -> u8 {
        if self.pressed || self.burst > 0 || !self.filler.bits().is_empty() {
            0xFF
        } else {
            0
        }
    }

    fn is_idle(&self, now: Instant) -> bool {
        !self.pressed
            && self.burst == 0
            && self.filler.bits().is_empty()
            && self
                .last_active
                .is_none_or(|last| now.saturating_duration_since(last) >= FADE_OUT)
    }

    fn description(&self) -> &'static str {
        if self.split { "split sparks" } else { "sparks" }
    }
}
