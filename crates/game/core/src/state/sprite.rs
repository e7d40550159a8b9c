//! Tick-driven sprite stand-in for the presentation layer.

use std::collections::VecDeque;

use crate::config::CombatConfig;
use crate::env::Sprite;

/// Animation state of an entity in the reference world.
///
/// A command list plays one command per `ticks_per_command` ticks; once
/// drained the sprite returns to [`CombatConfig::READY_STATE`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SpriteState {
    state: String,
    pending: VecDeque<String>,
    remaining_ticks: u32,
    ticks_per_command: u32,
    barrier: Option<String>,
}

impl SpriteState {
    pub fn new(ticks_per_command: u32) -> Self {
        Self {
            state: CombatConfig::READY_STATE.to_string(),
            pending: VecDeque::new(),
            remaining_ticks: 0,
            ticks_per_command,
            barrier: None,
        }
    }

    /// Starts a command list, optionally released at a named barrier.
    pub fn run<I, S>(&mut self, commands: I, barrier: Option<&str>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut commands: VecDeque<String> = commands.into_iter().map(Into::into).collect();
        let Some(first) = commands.pop_front() else {
            return;
        };
        self.state = first;
        self.pending = commands;
        self.remaining_ticks = self.ticks_per_command;
        self.barrier = barrier.map(str::to_string);
    }

    /// Advances the animation by one tick.
    pub fn advance(&mut self) {
        if self.is_ready() {
            return;
        }
        self.remaining_ticks = self.remaining_ticks.saturating_sub(1);
        if self.remaining_ticks > 0 {
            return;
        }
        match self.pending.pop_front() {
            Some(next) => {
                self.state = next;
                self.remaining_ticks = self.ticks_per_command;
            }
            None => {
                self.state = CombatConfig::READY_STATE.to_string();
                self.barrier = None;
            }
        }
    }

    pub(crate) fn set_ticks_per_command(&mut self, ticks_per_command: u32) {
        self.ticks_per_command = ticks_per_command;
    }

    /// Commands queued after the current one.
    pub fn pending(&self) -> impl Iterator<Item = &str> {
        self.pending.iter().map(String::as_str)
    }

    /// Barrier the current command list was released at, if any.
    pub fn barrier(&self) -> Option<&str> {
        self.barrier.as_deref()
    }
}

impl Default for SpriteState {
    fn default() -> Self {
        Self::new(CombatConfig::DEFAULT_ANIMATION_TICKS)
    }
}

impl Sprite for SpriteState {
    fn state(&self) -> &str {
        &self.state
    }

    fn play(&mut self, animation: &str) {
        self.run([animation], None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_list_drains_back_to_ready() {
        let mut sprite = SpriteState::new(2);
        sprite.run(["defend", "damaged"], Some("hit"));
        assert_eq!(sprite.state(), "defend");
        assert_eq!(sprite.barrier(), Some("hit"));

        sprite.advance();
        assert_eq!(sprite.state(), "defend");
        sprite.advance();
        assert_eq!(sprite.state(), "damaged");
        sprite.advance();
        sprite.advance();
        assert!(sprite.is_ready());
        assert_eq!(sprite.barrier(), None);
    }

    #[test]
    fn empty_command_list_is_ignored() {
        let mut sprite = SpriteState::new(1);
        sprite.run(Vec::<String>::new(), None);
        assert!(sprite.is_ready());
    }
}
