//! User input processing
//!
//! Touch and button handlers run outside the frame loop and only queue
//! [`InputEvent`]s; the renderer drains them at the start of every frame.

use embassy_time::{Duration, Instant};

#[cfg(feature = "esp32-log")]
use esp_println::println;

use crate::audio::SpectrumFrame;
use crate::channel::{Channel, Receiver, Sender};
use crate::graph::{LedGraph, Spoke};
use crate::pattern::PatternManager;
use crate::spoke::SpokePatternManager;

/// Discrete user input, already debounced by the caller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    NextPattern,
    PreviousPattern,
    NextPalette,
    PreviousPalette,
    ToggleAutoRotate,
    SetAutoRotate(bool),
    /// Nudge the running device pattern
    Poke,
    SpokeTouchDown(Spoke),
    /// Finger lifted, with the time it was down
    SpokeTouchUp(Spoke, Duration),
    SpokeLongPress(Spoke),
    SpokeNextPattern(Spoke),
    SpokePreviousPattern(Spoke),
    SpokeNextPalette(Spoke),
    SpokePreviousPalette(Spoke),
}

/// Type alias for input sender
pub type InputSender<'a, const SIZE: usize> = Sender<'a, InputEvent, SIZE>;

/// Type alias for input receiver
pub type InputReceiver<'a, const SIZE: usize> = Receiver<'a, InputEvent, SIZE>;

/// Type alias for the input channel
pub type InputChannel<const SIZE: usize> = Channel<InputEvent, SIZE>;

/// Everything an input event may act on during one frame
pub struct InputTargets<'a> {
    pub now: Instant,
    pub graph: &'a LedGraph,
    pub audio: &'a SpectrumFrame,
    pub patterns: &'a mut PatternManager,
    pub spokes: &'a mut SpokePatternManager,
}

/// Drains queued input and routes it to the pattern managers
pub struct InputProcessor<'a, const SIZE: usize> {
    events: InputReceiver<'a, SIZE>,
}

impl<'a, const SIZE: usize> InputProcessor<'a, SIZE> {
    pub const fn new(events: InputReceiver<'a, SIZE>) -> Self {
        Self { events }
    }

    /// Handle the events queued before the call, returns how many were handled
    ///
    /// Events sent while the frame is being processed wait for the next one.
    pub fn process_pending(&mut self, targets: &mut InputTargets<'_>) -> usize {
        let queued = self.events.len();
        let mut handled = 0;
        while handled < queued {
            let Ok(event) = self.events.try_receive() else {
                break;
            };
            Self::dispatch(event, targets);
            handled += 1;
        }
        handled
    }

    /// Apply a single event
    pub fn dispatch(event: InputEvent, targets: &mut InputTargets<'_>) {
        #[cfg(feature = "esp32-log")]
        println!("[InputProcessor.dispatch] {:?}", event);

        let now = targets.now;
        match event {
            InputEvent::NextPattern => {
                targets
                    .patterns
                    .next_pattern(now, targets.graph, targets.audio);
            }
            InputEvent::PreviousPattern => {
                targets
                    .patterns
                    .previous_pattern(now, targets.graph, targets.audio);
            }
            InputEvent::NextPalette => targets.patterns.next_palette(),
            InputEvent::PreviousPalette => targets.patterns.previous_palette(),
            InputEvent::ToggleAutoRotate => {
                targets.patterns.toggle_auto_rotate();
            }
            InputEvent::SetAutoRotate(enabled) => targets.patterns.set_auto_rotate(enabled),
            InputEvent::Poke => targets.patterns.poke(now),
            InputEvent::SpokeTouchDown(spoke) => targets.spokes.touch_down(spoke, now),
            InputEvent::SpokeTouchUp(spoke, held_for) => {
                targets.spokes.touch_up(spoke, held_for, now);
            }
            InputEvent::SpokeLongPress(spoke) => targets.spokes.long_press(spoke, now),
            InputEvent::SpokeNextPattern(spoke) => targets.spokes.next_pattern(spoke, now),
            InputEvent::SpokePreviousPattern(spoke) => {
                targets.spokes.previous_pattern(spoke, now);
            }
            InputEvent::SpokeNextPalette(spoke) => {
                targets
                    .spokes
                    .next_palette(spoke, targets.patterns.colors());
            }
            InputEvent::SpokePreviousPalette(spoke) => {
                targets
                    .spokes
                    .previous_palette(spoke, targets.patterns.colors());
            }
        }
    }
}
