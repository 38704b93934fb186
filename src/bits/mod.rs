//! Particle engine moving colored "bits" along a [`PixelGraph`]
//!
//! A [`BitsFiller`] owns its own pixel buffer and a bounded set of bits.
//! Every [`BitsFiller::update`] runs one simulation step:
//!
//! 1. fade the buffer proportionally to the time since the previous step
//! 2. spawn bits up to the configured population, throttled per second
//! 3. move every bit one edge once per movement quantum (`1000 / speed` ms)
//! 4. retire bits that outlived their lifespan
//! 5. run caller hooks, then draw bits and their fade-up glow
//!
//! Bits spawned during a step are not moved until the next quantum so a
//! fresh bit always shows at its spawn pixel for at least one frame.

use embassy_time::{Duration, Instant};
use heapless::Vec;

use crate::color::{BLACK, Rgb, blend_colors, scale_color};
use crate::drawing::fade_to_black_by;
use crate::graph::{Adjacency, Edge, EdgeTypes, EdgeTypesPair, PixelGraph, PixelIndex, PixelMask};
use crate::math8::{fade_amount, progress8, scale8};
use crate::random::Random;

/// How a bit picks its next pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowRule {
    /// Uniformly among all allowed neighbours matching either direction tier
    Random,
    /// First allowed neighbour of the first tier that has one
    Priority,
    /// Follow the first allowed neighbour and clone into every other one
    /// matching the split directions
    Split,
}

/// How new bits come into existence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnRule {
    /// Only through [`BitsFiller::spawn_bit`]
    Manual,
    /// Keep the population at `max_spawn_bits`
    MaintainPopulation,
}

/// A single particle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bit {
    pub px: PixelIndex,
    /// Resolved direction tiers, each holding at most one flag
    pub directions: EdgeTypesPair,
    /// Zero means the bit never expires
    pub lifespan: Duration,
    pub color: Rgb,
    pub brightness: u8,
    /// Free slot for patterns, e.g. the palette index the color came from
    pub color_index: u8,
    born: Instant,
    first_frame: bool,
}

impl Bit {
    pub fn age(&self, now: Instant) -> Duration {
        now.saturating_duration_since(self.born)
    }

    pub const fn born(&self) -> Instant {
        self.born
    }

    /// Spawned during the current step and not moved yet
    pub const fn is_first_frame(&self) -> bool {
        self.first_frame
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        self.lifespan.as_millis() != 0 && self.age(now) > self.lifespan
    }
}

/// Per-bit callbacks invoked by [`BitsFiller::update_with`]
pub trait BitHooks {
    /// Called once for every bit created by the spawn policy
    fn bit_spawned(&mut self, _bit: &mut Bit, _now: Instant) {}

    /// Called for every live bit after movement, before drawing
    fn update_bit(&mut self, _bit: &mut Bit, _now: Instant) {}
}

impl BitHooks for () {}

/// Parameters of a [`BitsFiller`]
#[derive(Debug, Clone, Copy)]
pub struct BitsFillerConfig {
    /// Population kept by [`SpawnRule::MaintainPopulation`]
    pub max_spawn_bits: usize,
    /// Spawn throttle, zero disables throttling
    pub max_bits_per_second: u16,
    /// Moves per second, zero freezes every bit
    pub speed: u16,
    /// Lifespan given to spawned bits, zero for immortal bits
    pub lifespan: Duration,
    /// Direction tiers given to spawned bits
    pub directions: EdgeTypesPair,
    pub flow_rule: FlowRule,
    pub spawn_rule: SpawnRule,
    /// Edge types that produce a clone under [`FlowRule::Split`]
    pub split_directions: EdgeTypes,
    /// Bits never move onto pixels outside this mask
    pub allowed_pixels: Option<PixelMask>,
    /// Spawn locations, every pixel when `None`
    pub spawn_pixels: Option<&'static [PixelIndex]>,
    /// Fade applied per millisecond
    pub fade_down: u8,
    /// Number of pixels ahead of a bit that start glowing before it arrives
    pub fade_up_distance: u8,
    pub color: Rgb,
    pub brightness: u8,
}

impl Default for BitsFillerConfig {
    fn default() -> Self {
        Self {
            max_spawn_bits: 1,
            max_bits_per_second: 0,
            speed: 1,
            lifespan: Duration::from_millis(0),
            directions: EdgeTypesPair::single(EdgeTypes::ANY),
            flow_rule: FlowRule::Random,
            spawn_rule: SpawnRule::MaintainPopulation,
            split_directions: EdgeTypes::ANY,
            allowed_pixels: None,
            spawn_pixels: None,
            fade_down: 0,
            fade_up_distance: 0,
            color: Rgb {
                r: 0xFF,
                g: 0xFF,
                b: 0xFF,
            },
            brightness: 0xFF,
        }
    }
}

/// Glow parameters shared by every pixel ahead of one bit
struct FadeUp {
    directions: EdgeTypesPair,
    allowed: Option<PixelMask>,
    color: Rgb,
    max_distance: u8,
    since_move_ms: u64,
    quantum_ms: u64,
    ramp_in: u8,
}

/// Bounded particle system drawing into its own `N` pixel buffer
#[derive(Debug, Clone)]
pub struct BitsFiller<const N: usize, const MAX_BITS: usize> {
    config: BitsFillerConfig,
    bits: Vec<Bit, MAX_BITS>,
    leds: [Rgb; N],
    rng: Random,
    last_update: Option<Instant>,
    last_move: Option<Instant>,
    last_spawn: Option<Instant>,
}

impl<const N: usize, const MAX_BITS: usize> BitsFiller<N, MAX_BITS> {
    pub fn new(config: BitsFillerConfig, rng: Random) -> Self {
        Self {
            config,
            bits: Vec::new(),
            leds: [BLACK; N],
            rng,
            last_update: None,
            last_move: None,
            last_spawn: None,
        }
    }

    pub fn config(&self) -> &BitsFillerConfig {
        &self.config
    }

    /// Parameters can be changed between steps
    pub fn config_mut(&mut self) -> &mut BitsFillerConfig {
        &mut self.config
    }

    pub fn bits(&self) -> &[Bit] {
        &self.bits
    }

    pub fn bits_mut(&mut self) -> &mut [Bit] {
        &mut self.bits
    }

    pub fn leds(&self) -> &[Rgb; N] {
        &self.leds
    }

    pub fn leds_mut(&mut self) -> &mut [Rgb; N] {
        &mut self.leds
    }

    /// Drop every bit and clear the buffer
    pub fn reset(&mut self) {
        self.bits.clear();
        self.leds = [BLACK; N];
        self.last_update = None;
        self.last_move = None;
        self.last_spawn = None;
    }

    /// Place a new bit at `px`
    ///
    /// Each direction tier is reduced to one of its flags at random. Returns
    /// `None` when `px` is outside the graph or the bit capacity is reached.
    pub fn spawn_bit(
        &mut self,
        px: PixelIndex,
        directions: EdgeTypesPair,
        now: Instant,
    ) -> Option<&mut Bit> {
        if usize::from(px) >= N {
            return None;
        }
        let directions = EdgeTypesPair {
            first: pick_flag(&mut self.rng, directions.first),
            second: pick_flag(&mut self.rng, directions.second),
        };
        let bit = Bit {
            px,
            directions,
            lifespan: self.config.lifespan,
            color: self.config.color,
            brightness: self.config.brightness,
            color_index: 0,
            born: now,
            first_frame: true,
        };
        self.bits.push(bit).ok()?;
        self.last_spawn = Some(now);
        self.bits.last_mut()
    }

    /// Run one simulation step without hooks
    pub fn update(&mut self, now: Instant, graph: &PixelGraph<N>) {
        self.update_with(now, graph, &mut ());
    }

    /// Run one simulation step
    pub fn update_with<H: BitHooks>(&mut self, now: Instant, graph: &PixelGraph<N>, hooks: &mut H) {
        let elapsed = self
            .last_update
            .map_or(Duration::from_millis(0), |last| now.saturating_duration_since(last));
        self.last_update = Some(now);

        if self.config.fade_down > 0 {
            let amount = fade_amount(self.config.fade_down, elapsed.as_millis());
            fade_to_black_by(&mut self.leds, amount);
        }

        if self.config.spawn_rule == SpawnRule::MaintainPopulation {
            self.maintain_population(now, hooks);
        }

        self.flow(now, graph);
        self.bits.retain(|bit| !bit.is_expired(now));

        for bit in &mut self.bits {
            hooks.update_bit(bit, now);
        }

        self.render(now, graph);

        for bit in &mut self.bits {
            bit.first_frame = false;
        }
    }

    fn spawn_interval(&self) -> Option<Duration> {
        match self.config.max_bits_per_second {
            0 => None,
            per_second => Some(Duration::from_millis(1000 / u64::from(per_second))),
        }
    }

    fn maintain_population<H: BitHooks>(&mut self, now: Instant, hooks: &mut H) {
        let population = self.config.max_spawn_bits.min(MAX_BITS);
        while self.bits.len() < population {
            if let (Some(interval), Some(last)) = (self.spawn_interval(), self.last_spawn) {
                if now.saturating_duration_since(last) < interval {
                    break;
                }
            }

            let px = self.pick_spawn_pixel();
            let directions = self.config.directions;
            let Some(bit) = self.spawn_bit(px, directions, now) else {
                break;
            };
            hooks.bit_spawned(bit, now);
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn pick_spawn_pixel(&mut self) -> PixelIndex {
        match self.config.spawn_pixels {
            Some(pixels) if !pixels.is_empty() => pixels[self.rng.index_below(pixels.len())],
            _ => self.rng.index_below(N) as PixelIndex,
        }
    }

    fn movement_quantum(&self) -> Option<Duration> {
        match self.config.speed {
            0 => None,
            speed => Some(Duration::from_millis((1000 / u64::from(speed)).max(1))),
        }
    }

    fn flow(&mut self, now: Instant, graph: &PixelGraph<N>) {
        let Some(quantum) = self.movement_quantum() else {
            return;
        };
        let last_move = *self.last_move.get_or_insert(now);
        let since_move = now.saturating_duration_since(last_move);
        if since_move < quantum {
            return;
        }
        // Advance by whole quanta so move timing does not drift with the
        // frame rate, but drop the backlog after a long stall.
        self.last_move = Some(if since_move > quantum + quantum {
            now
        } else {
            last_move + quantum
        });

        let mut i = 0;
        while i < self.bits.len() {
            let bit = self.bits[i];
            if bit.first_frame {
                i += 1;
                continue;
            }

            let next = next_edges(
                &bit,
                graph,
                self.config.flow_rule,
                self.config.allowed_pixels,
                &mut self.rng,
            );
            let Some(first) = next.first() else {
                self.bits.remove(i);
                continue;
            };
            self.bits[i].px = first.to;

            if self.config.flow_rule == FlowRule::Split {
                for edge in next.iter().skip(1) {
                    if !edge.types.intersects(self.config.split_directions) {
                        continue;
                    }
                    let clone = Bit {
                        px: edge.to,
                        born: now,
                        first_frame: true,
                        ..bit
                    };
                    if self.bits.push(clone).is_err() {
                        break;
                    }
                }
            }
            i += 1;
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn render(&mut self, now: Instant, graph: &PixelGraph<N>) {
        let quantum_ms = self.movement_quantum().map_or(0, |q| q.as_millis());
        let since_move_ms = self
            .last_move
            .map_or(0, |last| now.saturating_duration_since(last).as_millis());
        let max_distance = self.config.fade_up_distance;

        for bit in &self.bits {
            let color = scale_color(bit.color, bit.brightness);
            if let Some(led) = self.leds.get_mut(usize::from(bit.px)) {
                *led = color;
            }

            if max_distance == 0 || quantum_ms == 0 {
                continue;
            }
            let total = Duration::from_millis(u64::from(max_distance) * quantum_ms);
            let ramp = FadeUp {
                directions: bit.directions,
                allowed: self.config.allowed_pixels,
                color,
                max_distance,
                since_move_ms: since_move_ms.min(quantum_ms),
                quantum_ms,
                ramp_in: progress8(bit.age(now), total),
            };
            fade_up(&mut self.leds, graph, &ramp, bit.px, 1);
        }
    }
}

/// Reduce a tier to one of its flags, chosen uniformly
fn pick_flag(rng: &mut Random, tier: EdgeTypes) -> EdgeTypes {
    let flags: Vec<EdgeTypes, 4> = tier.iter().collect();
    match flags.len() {
        0 => EdgeTypes::empty(),
        1 => flags[0],
        len => flags[rng.index_below(len)],
    }
}

fn is_allowed(allowed: Option<PixelMask>, edge: &Edge) -> bool {
    allowed.is_none_or(|mask| mask.contains(edge.to))
}

/// Candidate edges for `bit`, the first one is where the bit moves
fn next_edges<const N: usize>(
    bit: &Bit,
    graph: &PixelGraph<N>,
    rule: FlowRule,
    allowed: Option<PixelMask>,
    rng: &mut Random,
) -> Adjacency {
    match rule {
        FlowRule::Priority => bit
            .directions
            .tiers()
            .find_map(|tier| {
                graph
                    .adjacencies(bit.px, tier)
                    .into_iter()
                    .find(|edge| is_allowed(allowed, edge))
            })
            .into_iter()
            .collect(),
        FlowRule::Random => {
            let mut candidates: Adjacency = graph
                .adjacencies(bit.px, bit.directions)
                .into_iter()
                .filter(|edge| is_allowed(allowed, edge))
                .collect();
            if candidates.len() > 1 {
                let pick = rng.index_below(candidates.len());
                candidates.swap(0, pick);
                candidates.truncate(1);
            }
            candidates
        }
        FlowRule::Split => graph
            .adjacencies(bit.px, bit.directions)
            .into_iter()
            .filter(|edge| is_allowed(allowed, edge))
            .collect(),
    }
}

/// Light up pixels ahead of a bit, brighter the closer the bit is to them
#[allow(clippy::cast_possible_truncation)]
fn fade_up<const N: usize>(
    leds: &mut [Rgb; N],
    graph: &PixelGraph<N>,
    ramp: &FadeUp,
    px: PixelIndex,
    distance: u8,
) {
    if distance > ramp.max_distance {
        return;
    }
    let total = u64::from(ramp.max_distance) * ramp.quantum_ms;
    let remaining = u64::from(ramp.max_distance - distance);
    let level = ((ramp.since_move_ms + remaining * ramp.quantum_ms) * 255 / total).min(255) as u8;
    let level = scale8(level, ramp.ramp_in);

    for edge in graph.adjacencies(px, ramp.directions) {
        if !is_allowed(ramp.allowed, &edge) {
            continue;
        }
        if let Some(led) = leds.get_mut(usize::from(edge.to)) {
            *led = blend_colors(*led, ramp.color, level);
        }
        fade_up(leds, graph, ramp, edge.to, distance + 1);
    }
}
