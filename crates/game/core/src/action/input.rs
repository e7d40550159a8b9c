//! Pre-resolved input events.
//!
//! Key bindings are resolved upstream; actions only see logical keys.

/// Logical input key.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::EnumString)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum InputKey {
    /// Select / confirm (left click).
    PrimarySelect,
    /// Context / back (right click).
    SecondarySelect,
    Cancel,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case")]
pub enum InputKind {
    Press,
    Release,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InputEvent {
    pub key: InputKey,
    pub kind: InputKind,
}

impl InputEvent {
    pub fn press(key: InputKey) -> Self {
        Self {
            key,
            kind: InputKind::Press,
        }
    }

    pub fn release(key: InputKey) -> Self {
        Self {
            key,
            kind: InputKind::Release,
        }
    }
}

/// Events delivered in one input frame.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EventGroup {
    events: Vec<InputEvent>,
}

impl EventGroup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, event: InputEvent) -> Self {
        self.events.push(event);
        self
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    /// First event for `key` in this frame, if any.
    pub fn find_event(&self, key: InputKey) -> Option<&InputEvent> {
        self.events.iter().find(|event| event.key == key)
    }

    /// True if the frame contains a press of `key`.
    pub fn pressed(&self, key: InputKey) -> bool {
        self.events
            .iter()
            .any(|event| event.key == key && event.kind == InputKind::Press)
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn events(&self) -> &[InputEvent] {
        &self.events
    }
}

impl FromIterator<InputEvent> for EventGroup {
    fn from_iter<I: IntoIterator<Item = InputEvent>>(iter: I) -> Self {
        Self {
            events: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn release_is_not_a_press() {
        let group = EventGroup::new().with(InputEvent::release(InputKey::PrimarySelect));
        assert!(group.find_event(InputKey::PrimarySelect).is_some());
        assert!(!group.pressed(InputKey::PrimarySelect));
        assert!(!group.pressed(InputKey::Cancel));
    }

    #[test]
    fn keys_parse_case_insensitively() {
        assert_eq!("Primary_Select".parse::<InputKey>(), Ok(InputKey::PrimarySelect));
    }
}
