/// Indeterminate progress indicator
///
/// The hosted API gives no progress information, so the bar just sweeps back
/// and forth while at least one request is outstanding.

/// Percent advanced per animation tick
const STEP: f32 = 2.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spinner {
    value: f32,
    forward: bool,
}

impl Default for Spinner {
    fn default() -> Self {
        Self {
            value: 0.0,
            forward: true,
        }
    }
}

impl Spinner {
    /// Move one step, bouncing off 0 and 100
    pub fn advance(&mut self) {
        if self.forward {
            self.value += STEP;
            if self.value >= 100.0 {
                self.value = 100.0;
                self.forward = false;
            }
        } else {
            self.value -= STEP;
            if self.value <= 0.0 {
                self.value = 0.0;
                self.forward = true;
            }
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Current position in 0.0..=100.0
    pub fn value(&self) -> f32 {
        self.value
    }
}
