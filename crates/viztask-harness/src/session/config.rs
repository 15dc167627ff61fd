use winit::dpi::LogicalSize;

use crate::viewport::LayoutConfig;

/// Session configuration.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    pub title: String,

    /// Initial window size; the drawable rect inside it follows `layout`.
    pub initial_size: LogicalSize<f64>,

    /// Layout constants for the viewport manager.
    pub layout: LayoutConfig,

    /// Whether the task requires a GPU context.
    ///
    /// When set and no context can be acquired, setup fails loudly and no
    /// frames are ever produced.
    pub needs_gpu: bool,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            title: "viztask".to_string(),
            initial_size: LogicalSize::new(860.0, 500.0),
            layout: LayoutConfig::default(),
            needs_gpu: true,
        }
    }
}
