//! Editable numeric fields and the typed result of the input form.

use bevy::input::keyboard::Key;
use bevy::prelude::*;

use crate::error::{validate_mass_sum, SimResult};

/// The four form fields, in the fixed order their values are returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldSlot {
    Mass1,
    Velocity1,
    Mass2,
    Velocity2,
}

impl FieldSlot {
    pub const ALL: [FieldSlot; 4] = [
        FieldSlot::Mass1,
        FieldSlot::Velocity1,
        FieldSlot::Mass2,
        FieldSlot::Velocity2,
    ];

    #[inline]
    pub fn label(self) -> &'static str {
        match self {
            FieldSlot::Mass1 => "Mass 1 (kg):",
            FieldSlot::Velocity1 => "Velocity 1 (m/s):",
            FieldSlot::Mass2 => "Mass 2 (kg):",
            FieldSlot::Velocity2 => "Velocity 2 (m/s):",
        }
    }

    /// Text the field is pre-populated with.
    #[inline]
    pub fn default_text(self) -> &'static str {
        match self {
            FieldSlot::Mass1 => "2",
            FieldSlot::Velocity1 => "3",
            FieldSlot::Mass2 => "1",
            FieldSlot::Velocity2 => "-2",
        }
    }

    /// Row index in the form layout.
    #[inline]
    pub fn row(self) -> usize {
        match self {
            FieldSlot::Mass1 => 0,
            FieldSlot::Velocity1 => 1,
            FieldSlot::Mass2 => 2,
            FieldSlot::Velocity2 => 3,
        }
    }
}

/// Parse a field's text as a number.
///
/// Surrounding whitespace is ignored.  Anything that is not a finite
/// floating-point literal (including `inf` and `NaN`) reads as `0.0`.
pub fn parse_field_value(text: &str) -> f32 {
    match text.trim().parse::<f32>() {
        Ok(v) if v.is_finite() => v,
        _ => 0.0,
    }
}

/// Caret visibility accumulator.
///
/// Driven by frame deltas rather than a timer subscription, so the blink
/// period is the same at any frame rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CaretBlink {
    elapsed: f32,
    pub visible: bool,
}

impl Default for CaretBlink {
    fn default() -> Self {
        Self {
            elapsed: 0.0,
            visible: true,
        }
    }
}

impl CaretBlink {
    /// Advance by `dt` seconds, flipping visibility once per elapsed `period`.
    ///
    /// `period` must be positive (enforced by `SimConfig::validate`).
    pub fn tick(&mut self, dt: f32, period: f32) {
        self.elapsed += dt;
        while self.elapsed >= period {
            self.elapsed -= period;
            self.visible = !self.visible;
        }
    }
}

/// One editable text field on the input form.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct InputField {
    pub slot: FieldSlot,
    pub text: String,
    pub active: bool,
    pub caret: CaretBlink,
}

impl InputField {
    pub fn new(slot: FieldSlot) -> Self {
        Self {
            slot,
            text: slot.default_text().to_string(),
            active: false,
            caret: CaretBlink::default(),
        }
    }

    /// Focus or unfocus the field.  A newly focused field shows its caret
    /// immediately.
    pub fn set_active(&mut self, active: bool) {
        if active && !self.active {
            self.caret = CaretBlink::default();
        }
        self.active = active;
    }

    /// Apply one key press.  Returns `true` if the field changed.
    ///
    /// Inactive fields ignore every key.  Enter only unfocuses; it never
    /// submits the form.
    pub fn apply_key(&mut self, key: &Key) -> bool {
        if !self.active {
            return false;
        }
        match key {
            Key::Enter => self.active = false,
            Key::Backspace => {
                self.text.pop();
            }
            Key::Space => self.text.push(' '),
            Key::Character(s) if !s.chars().any(char::is_control) => self.text.push_str(s),
            _ => return false,
        }
        true
    }

    pub fn tick_caret(&mut self, dt: f32, period: f32) {
        self.caret.tick(dt, period);
    }

    /// Parsed numeric value, `0.0` when the text is not a number.
    pub fn value(&self) -> f32 {
        parse_field_value(&self.text)
    }

    /// Text to render: the buffer plus a `|` caret while focused and visible.
    pub fn display_text(&self) -> String {
        if self.active && self.caret.visible {
            format!("{}|", self.text)
        } else {
            self.text.clone()
        }
    }
}

/// Values collected by the input form, consumed once by
/// [`crate::simulation::SimulationState::new`].
///
/// Velocities are physical (m/s), not yet scaled to display units.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CollisionInputs {
    pub mass1: f32,
    pub velocity1: f32,
    pub mass2: f32,
    pub velocity2: f32,
}

impl Default for CollisionInputs {
    fn default() -> Self {
        Self::from_fields(&FieldSlot::ALL.map(InputField::new))
    }
}

impl CollisionInputs {
    /// Read each field by slot.  A slot with no field reads as `0.0`.
    pub fn from_fields<'a>(fields: impl IntoIterator<Item = &'a InputField>) -> Self {
        let mut inputs = Self {
            mass1: 0.0,
            velocity1: 0.0,
            mass2: 0.0,
            velocity2: 0.0,
        };
        for field in fields {
            let value = field.value();
            match field.slot {
                FieldSlot::Mass1 => inputs.mass1 = value,
                FieldSlot::Velocity1 => inputs.velocity1 = value,
                FieldSlot::Mass2 => inputs.mass2 = value,
                FieldSlot::Velocity2 => inputs.velocity2 = value,
            }
        }
        inputs
    }

    /// The collision law needs `mass1 + mass2 > 0`.
    pub fn validate(&self) -> SimResult<()> {
        validate_mass_sum(self.mass1, self.mass2)
    }
}
