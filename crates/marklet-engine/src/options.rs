/// Settings that affect the generated HTML.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// CSS colour of the span wrapping unparseable text.
    pub error_color: String,
}

impl RenderOptions {
    pub const DEFAULT_ERROR_COLOR: &'static str = "red";

    pub fn with_error_color(mut self, color: impl Into<String>) -> Self {
        self.error_color = color.into();
        self
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            error_color: Self::DEFAULT_ERROR_COLOR.to_string(),
        }
    }
}
