//! Assembles the two composites by hand. `Dispatcher::from_config` drives this
//! from configuration; tests and embedders can drive it directly.

use super::Dispatcher;
use crate::config::DEFAULT_SERVICE;
use crate::output::{Composite, CompositeKind, Output};

pub struct DispatcherBuilder {
    service: String,
    text: Vec<Box<dyn Output>>,
    json: Vec<Box<dyn Output>>,
}

impl Default for DispatcherBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DispatcherBuilder {
    /// Service tag `APP`, no outputs.
    #[must_use]
    pub fn new() -> Self {
        Self {
            service: DEFAULT_SERVICE.to_string(),
            text: Vec::new(),
            json: Vec::new(),
        }
    }

    /// Tag attached to every record of both composites.
    #[must_use]
    pub fn service(mut self, service: impl Into<String>) -> Self {
        self.service = service.into();
        self
    }

    /// Appends to the composite that receives level and raw text.
    #[must_use]
    pub fn text_output(mut self, output: impl Output + 'static) -> Self {
        self.text.push(Box::new(output));
        self
    }

    /// Appends to the composite that receives serialized records.
    #[must_use]
    pub fn json_output(mut self, output: impl Output + 'static) -> Self {
        self.json.push(Box::new(output));
        self
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.text.len()
    }

    #[must_use]
    pub fn json_count(&self) -> usize {
        self.json.len()
    }

    /// Composites without outputs are left out entirely.
    #[must_use]
    pub fn build(self) -> Dispatcher {
        let assemble = |kind, outputs: Vec<Box<dyn Output>>| {
            if outputs.is_empty() {
                return None;
            }
            let mut composite = Composite::new(kind, self.service.clone());
            for output in outputs {
                composite.push(output);
            }
            Some(composite)
        };

        Dispatcher {
            text: assemble(CompositeKind::Text, self.text),
            json: assemble(CompositeKind::Json, self.json),
        }
    }
}
