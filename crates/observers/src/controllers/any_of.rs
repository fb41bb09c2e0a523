use std::fmt;

use odekit_core::{ControlError, Controller, Decision};

/// Aggregates controllers, stopping as soon as any of them does.
///
/// Sub-controllers are evaluated in insertion order. The first error is
/// returned immediately. The first [`Decision::Stop`] short-circuits the
/// remaining checks. An empty aggregate always continues.
#[derive(Default)]
pub struct AnyOf {
    controllers: Vec<Box<dyn Controller>>,
}

impl AnyOf {
    /// Creates an empty aggregate.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a controller, evaluated after the ones already added.
    #[must_use]
    pub fn with<C: Controller + 'static>(mut self, controller: C) -> Self {
        self.push(controller);
        self
    }

    /// Appends a controller, evaluated after the ones already added.
    pub fn push<C: Controller + 'static>(&mut self, controller: C) {
        self.controllers.push(Box::new(controller));
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.controllers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.controllers.is_empty()
    }
}

impl From<Vec<Box<dyn Controller>>> for AnyOf {
    fn from(controllers: Vec<Box<dyn Controller>>) -> Self {
        Self { controllers }
    }
}

impl fmt::Debug for AnyOf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnyOf")
            .field("controllers", &self.controllers.len())
            .finish()
    }
}

impl Controller for AnyOf {
    fn decide(&mut self, t: f64, x: &[f64]) -> Result<Decision, ControlError> {
        for controller in &mut self.controllers {
            if controller.decide(t, x)?.is_stop() {
                return Ok(Decision::Stop);
            }
        }
        Ok(Decision::Continue)
    }
}
