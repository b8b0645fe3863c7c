//! Generic single-active-mode state machine.
//!
//! A [`StateMachine`] owns exactly one boxed [`Mode`]. Input events and
//! frame calls go to that mode only. A mode asks for a transition by
//! returning the next mode from `handle_event`; the machine then runs the
//! old mode's `on_exit` and the new mode's `on_enter`, each exactly once.
//! There is no history: the replaced mode is dropped.

use std::fmt::Debug;

use cappy_view_model::event::InputEvent;

use crate::render::RenderSink;

/// One interaction mode over a shared context `C`, identified by tag `T`.
pub trait Mode<C, T> {
    fn tag(&self) -> T;

    /// Runs once when the mode becomes active.
    fn on_enter(&mut self, _ctx: &mut C) {}

    /// Runs once when the mode is replaced.
    fn on_exit(&mut self, _ctx: &mut C) {}

    fn handle_event(&mut self, ctx: &mut C, event: &InputEvent) -> EventOutcome<C, T>;

    /// Advance time-based state and draw one frame. Returns whether
    /// anything is still animating.
    fn draw_frame(&mut self, ctx: &mut C, sink: &mut dyn RenderSink) -> bool;
}

/// Result of offering an event to a mode.
pub struct EventOutcome<C, T> {
    /// The event was handled; the caller should skip its own handling.
    pub consumed: bool,
    /// Mode to switch to after this event.
    pub transition: Option<Box<dyn Mode<C, T>>>,
}

impl<C, T> EventOutcome<C, T> {
    /// Not handled; falls through to the caller's default handling.
    pub fn ignored() -> Self {
        Self {
            consumed: false,
            transition: None,
        }
    }

    pub fn consumed() -> Self {
        Self {
            consumed: true,
            transition: None,
        }
    }

    /// Consume the event and switch to `next`.
    pub fn switch_to(next: impl Mode<C, T> + 'static) -> Self {
        let next: Box<dyn Mode<C, T>> = Box::new(next);
        Self {
            consumed: true,
            transition: Some(next),
        }
    }
}

/// Owner of the active mode.
pub struct StateMachine<C, T> {
    current: Box<dyn Mode<C, T>>,
}

impl<C, T: Copy + PartialEq + Debug> StateMachine<C, T> {
    /// Create the machine and enter `initial`.
    pub fn new(ctx: &mut C, initial: impl Mode<C, T> + 'static) -> Self {
        let mut current: Box<dyn Mode<C, T>> = Box::new(initial);
        current.on_enter(ctx);
        tracing::debug!(mode = ?current.tag(), "Entered initial mode");
        Self { current }
    }

    /// Replace the active mode with `mode`.
    pub fn set_mode(&mut self, ctx: &mut C, mode: impl Mode<C, T> + 'static) {
        self.replace(ctx, Box::new(mode));
    }

    /// Replace the active mode with an already boxed one.
    pub fn replace(&mut self, ctx: &mut C, mut next: Box<dyn Mode<C, T>>) {
        let from = self.current.tag();
        self.current.on_exit(ctx);
        next.on_enter(ctx);
        self.current = next;
        tracing::debug!(from = ?from, to = ?self.current.tag(), "Mode transition");
    }

    /// Offer `event` to the active mode, applying any transition it asks
    /// for. Returns whether the event was consumed.
    pub fn handle_event(&mut self, ctx: &mut C, event: &InputEvent) -> bool {
        let outcome = self.current.handle_event(ctx, event);
        if let Some(next) = outcome.transition {
            self.replace(ctx, next);
        }
        outcome.consumed
    }

    /// Run the active mode's frame. Returns whether it is still animating.
    pub fn advance_and_render(&mut self, ctx: &mut C, sink: &mut dyn RenderSink) -> bool {
        self.current.draw_frame(ctx, sink)
    }

    pub fn current_tag(&self) -> T {
        self.current.tag()
    }

    pub fn is_active(&self, tag: T) -> bool {
        self.current.tag() == tag
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::RecordingSink;
    use cappy_view_model::event::Modifiers;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Tag {
        Idle,
        Busy,
    }

    #[derive(Default)]
    struct Log {
        entries: Vec<String>,
    }

    struct Idle;
    struct Busy;

    impl Mode<Log, Tag> for Idle {
        fn tag(&self) -> Tag {
            Tag::Idle
        }

        fn on_enter(&mut self, ctx: &mut Log) {
            ctx.entries.push("enter idle".into());
        }

        fn on_exit(&mut self, ctx: &mut Log) {
            ctx.entries.push("exit idle".into());
        }

        fn handle_event(&mut self, _ctx: &mut Log, event: &InputEvent) -> EventOutcome<Log, Tag> {
            match event {
                InputEvent::KeyDown { key, .. } if key == "b" => EventOutcome::switch_to(Busy),
                _ => EventOutcome::ignored(),
            }
        }

        fn draw_frame(&mut self, ctx: &mut Log, _sink: &mut dyn RenderSink) -> bool {
            ctx.entries.push("draw idle".into());
            false
        }
    }

    impl Mode<Log, Tag> for Busy {
        fn tag(&self) -> Tag {
            Tag::Busy
        }

        fn on_enter(&mut self, ctx: &mut Log) {
            ctx.entries.push("enter busy".into());
        }

        fn handle_event(&mut self, _ctx: &mut Log, event: &InputEvent) -> EventOutcome<Log, Tag> {
            match event {
                InputEvent::KeyDown { key, .. } if key == "i" => EventOutcome::switch_to(Idle),
                InputEvent::KeyDown { .. } => EventOutcome::consumed(),
                _ => EventOutcome::ignored(),
            }
        }

        fn draw_frame(&mut self, _ctx: &mut Log, _sink: &mut dyn RenderSink) -> bool {
            true
        }
    }

    #[test]
    fn test_initial_mode_is_entered_once() {
        let mut log = Log::default();
        let machine = StateMachine::new(&mut log, Idle);
        assert_eq!(machine.current_tag(), Tag::Idle);
        assert_eq!(log.entries, vec!["enter idle"]);
    }

    #[test]
    fn test_transition_runs_exit_then_enter() {
        let mut log = Log::default();
        let mut machine = StateMachine::new(&mut log, Idle);

        assert!(machine.handle_event(&mut log, &InputEvent::key("b", Modifiers::NONE)));
        assert!(machine.is_active(Tag::Busy));
        assert_eq!(log.entries, vec!["enter idle", "exit idle", "enter busy"]);
    }

    #[test]
    fn test_unhandled_events_are_not_consumed() {
        let mut log = Log::default();
        let mut machine = StateMachine::new(&mut log, Idle);
        assert!(!machine.handle_event(&mut log, &InputEvent::key("z", Modifiers::NONE)));
        assert!(!machine.handle_event(&mut log, &InputEvent::Quit));
        assert_eq!(machine.current_tag(), Tag::Idle);
    }

    #[test]
    fn test_frames_go_to_active_mode() {
        let mut log = Log::default();
        let mut sink = RecordingSink::new();
        let mut machine = StateMachine::new(&mut log, Idle);

        assert!(!machine.advance_and_render(&mut log, &mut sink));
        machine.set_mode(&mut log, Busy);
        assert!(machine.advance_and_render(&mut log, &mut sink));
        assert_eq!(log.entries.iter().filter(|e| *e == "draw idle").count(), 1);
    }
}
