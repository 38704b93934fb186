//! Frame scheduling and timing utilities.
//!
//! Provides portable frame pacing without async/await or platform-specific timers.
//! The caller is responsible for sleeping/waiting between frames.

use embassy_time::{Duration, Instant};

use crate::audio::SpectrumSource;
use crate::{OutputDriver, Renderer};

/// Default target frame rate (120 FPS).
pub const DEFAULT_FPS: u32 = 120;

/// Default frame duration based on target FPS.
pub const DEFAULT_FRAME_DURATION: Duration = Duration::from_millis(1000 / DEFAULT_FPS as u64);

/// Result of a frame tick operation.
#[derive(Debug, Clone, Copy)]
pub struct FrameResult {
    /// The deadline for the next frame.
    pub next_deadline: Instant,
    /// How long to wait until the next frame (may be zero if behind schedule).
    pub sleep_duration: Duration,
}

/// Portable frame scheduler that manages timing without async.
///
/// This scheduler:
/// - Tracks frame timing with drift correction
/// - Samples the audio source and renders one frame
/// - Writes the frame to the output driver
///
/// # Usage
///
/// ```ignore
/// let mut scheduler = FrameScheduler::new(renderer, driver, microphone);
///
/// loop {
///     let now = get_current_time_ms();
///     let result = scheduler.tick(Instant::from_millis(now), read_dial());
///
///     // Platform-specific sleep
///     sleep_ms(result.sleep_duration.as_millis() as u64);
/// }
/// ```
pub struct FrameScheduler<'a, O: OutputDriver, A: SpectrumSource, const INPUT_CHANNEL_SIZE: usize>
{
    output: O,
    audio: A,
    renderer: Renderer<'a, INPUT_CHANNEL_SIZE>,
    next_frame: Instant,
    frame_duration: Duration,
}

impl<'a, O: OutputDriver, A: SpectrumSource, const INPUT_CHANNEL_SIZE: usize>
    FrameScheduler<'a, O, A, INPUT_CHANNEL_SIZE>
{
    /// Create a new frame scheduler.
    ///
    /// Uses `DEFAULT_FRAME_DURATION` (120 FPS) for frame timing.
    pub fn new(renderer: Renderer<'a, INPUT_CHANNEL_SIZE>, driver: O, audio: A) -> Self {
        Self::with_frame_duration(renderer, driver, audio, DEFAULT_FRAME_DURATION)
    }

    /// Create a new frame scheduler with custom frame duration.
    pub fn with_frame_duration(
        renderer: Renderer<'a, INPUT_CHANNEL_SIZE>,
        driver: O,
        audio: A,
        frame_duration: Duration,
    ) -> Self {
        Self {
            output: driver,
            audio,
            renderer,
            next_frame: Instant::from_millis(0),
            frame_duration,
        }
    }

    /// Process one frame and return timing information.
    ///
    /// `brightness` is sampled by the caller once per frame. The caller is
    /// responsible for waiting until `next_deadline` before calling `tick`
    /// again.
    pub fn tick(&mut self, now: Instant, brightness: u8) -> FrameResult {
        // Fallen more than two frames behind: skip the backlog
        let max_drift = self.frame_duration.as_millis() * 2;
        if now.as_millis() > self.next_frame.as_millis() + max_drift {
            self.next_frame = now;
        }

        let audio = self.audio.current_frame();
        let frame = self.renderer.render(now, &audio, brightness);
        self.output.write(frame);

        self.next_frame += self.frame_duration;

        let sleep_duration = if self.next_frame.as_millis() > now.as_millis() {
            Duration::from_millis(self.next_frame.as_millis() - now.as_millis())
        } else {
            Duration::from_millis(0)
        };

        FrameResult {
            next_deadline: self.next_frame,
            sleep_duration,
        }
    }

    /// Get a reference to the renderer.
    pub fn renderer(&self) -> &Renderer<'a, INPUT_CHANNEL_SIZE> {
        &self.renderer
    }

    /// Get a mutable reference to the renderer.
    pub fn renderer_mut(&mut self) -> &mut Renderer<'a, INPUT_CHANNEL_SIZE> {
        &mut self.renderer
    }

    pub fn output(&self) -> &O {
        &self.output
    }
}
