use embassy_time::Instant;

use crate::audio::SpectrumFrame;
use crate::color::{BLACK, Rgb};
use crate::drawing::{BlendMode, blend_into};
use crate::filter::{BrightnessFilter, BrightnessFilterConfig, Filter};
use crate::graph::{LedGraph, NUM_LEDS};
use crate::input::{InputProcessor, InputReceiver, InputTargets};
use crate::pattern::{PatternManager, PatternManagerConfig};
use crate::random::Random;
use crate::spoke::{SpokeManagerConfig, SpokePatternManager};
use crate::welcome::WelcomeAnimation;

/// Configuration for the renderer
#[derive(Debug, Clone)]
pub struct RendererConfig {
    /// Seed for every random source in the engine
    pub seed: u64,
    pub patterns: PatternManagerConfig,
    pub spokes: SpokeManagerConfig,
    pub brightness: BrightnessFilterConfig,
    /// Play the welcome animation before the first pattern
    pub welcome: bool,
}

impl Default for RendererConfig {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            patterns: PatternManagerConfig::default(),
            spokes: SpokeManagerConfig::default(),
            brightness: BrightnessFilterConfig::default(),
            welcome: true,
        }
    }
}

/// Frame orchestrator
///
/// Owns the sculpture graph, both pattern managers and the output filters.
/// Each call to [`Renderer::render`] produces one finished frame.
pub struct Renderer<'a, const INPUT_CHANNEL_SIZE: usize> {
    input: InputProcessor<'a, INPUT_CHANNEL_SIZE>,
    graph: LedGraph,

    patterns: PatternManager,
    spokes: SpokePatternManager,
    welcome: Option<WelcomeAnimation>,
    brightness: BrightnessFilter,

    frame: [Rgb; NUM_LEDS],
    brighten: [Rgb; NUM_LEDS],
    subtract: [Rgb; NUM_LEDS],
}

impl<'a, const INPUT_CHANNEL_SIZE: usize> Renderer<'a, INPUT_CHANNEL_SIZE> {
    pub fn new(events: InputReceiver<'a, INPUT_CHANNEL_SIZE>, config: &RendererConfig) -> Self {
        let mut rng = Random::new(config.seed);
        let welcome = config.welcome.then(|| WelcomeAnimation::new(&mut rng));
        Self {
            input: InputProcessor::new(events),
            graph: LedGraph::sculpture(),
            patterns: PatternManager::new(&config.patterns, rng.fork()),
            spokes: SpokePatternManager::new(&config.spokes, rng.fork()),
            welcome,
            brightness: BrightnessFilter::new(0, &config.brightness),
            frame: [BLACK; NUM_LEDS],
            brighten: [BLACK; NUM_LEDS],
            subtract: [BLACK; NUM_LEDS],
        }
    }

    /// Process one frame
    ///
    /// `brightness` is the externally sampled target brightness; the output
    /// eases toward it.
    pub fn render(&mut self, now: Instant, audio: &SpectrumFrame, brightness: u8) -> &[Rgb] {
        self.brightness.set(brightness, now);
        self.brightness.tick(now);

        self.process_input(now, audio);

        let welcoming = self
            .welcome
            .as_mut()
            .is_some_and(|welcome| welcome.render(now, &mut self.frame));
        if !welcoming {
            self.welcome = None;
            self.compose(now, audio);
        }

        self.brightness.apply(&mut self.frame);
        &self.frame
    }

    fn process_input(&mut self, now: Instant, audio: &SpectrumFrame) {
        let mut targets = InputTargets {
            now,
            graph: &self.graph,
            audio,
            patterns: &mut self.patterns,
            spokes: &mut self.spokes,
        };
        self.input.process_pending(&mut targets);
    }

    /// Device pattern, minus what the spokes hide, plus the spokes
    fn compose(&mut self, now: Instant, audio: &SpectrumFrame) {
        self.patterns.tick(now, &self.graph, audio, &mut self.frame);
        self.spokes.tick(
            now,
            &self.graph,
            self.patterns.colors(),
            &mut self.brighten,
            &mut self.subtract,
        );
        blend_into(&self.subtract, &mut self.frame, BlendMode::Subtract, 0xFF);
        blend_into(&self.brighten, &mut self.frame, BlendMode::Brighten, 0xFF);
    }

    pub fn is_welcoming(&self) -> bool {
        self.welcome.is_some()
    }

    pub fn graph(&self) -> &LedGraph {
        &self.graph
    }

    pub fn patterns(&self) -> &PatternManager {
        &self.patterns
    }

    pub fn patterns_mut(&mut self) -> &mut PatternManager {
        &mut self.patterns
    }

    pub fn spokes(&self) -> &SpokePatternManager {
        &self.spokes
    }

    pub fn spokes_mut(&mut self) -> &mut SpokePatternManager {
        &mut self.spokes
    }

    pub fn brightness(&self) -> u8 {
        self.brightness.current()
    }
}
