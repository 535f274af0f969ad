//! Engine configuration.

use derive_builder::Builder;

/// Configuration for the processing orchestrator.
///
/// There is deliberately no timeout or cancellation setting: a hung
/// external call leaves its node `Running` indefinitely, an accepted
/// gap of the current model.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), build_fn(validate = "Self::validate"))]
pub struct EngineConfig {
    /// Horizontal offset applied to a synthesized result node so it
    /// renders to the right of the node that produced it.
    #[builder(default = "400.0")]
    pub result_offset_x: f32,
}

impl EngineConfigBuilder {
    fn validate(&self) -> Result<(), String> {
        if let Some(offset) = self.result_offset_x {
            if !offset.is_finite() || offset <= 0.0 {
                return Err("result_offset_x must be a positive finite number".into());
            }
        }
        Ok(())
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            result_offset_x: 400.0,
        }
    }
}
