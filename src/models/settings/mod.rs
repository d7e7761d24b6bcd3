use serde::{Deserialize, Serialize};

/// How incoming props are merged into the recurrence editor's local state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReconcileMode {
    /// Skip the update when either field already matches; otherwise replace both.
    #[default]
    Legacy,
    /// Replace each field independently when the incoming value differs.
    PerField,
}

/// User-editable settings, persisted as TOML.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorSettings {
    pub theme: String,
    pub date_format: String,
    pub reconcile_mode: ReconcileMode,
    /// Number of upcoming occurrences listed under the editor.
    pub preview_count: u16,
    pub window_width: f32,
    pub window_height: f32,
}

impl Default for EditorSettings {
    fn default() -> Self {
        Self {
            theme: "light".to_string(),
            date_format: "MM/DD/YYYY".to_string(),
            reconcile_mode: ReconcileMode::Legacy,
            preview_count: 5,
            window_width: 640.0,
            window_height: 720.0,
        }
    }
}

impl EditorSettings {
    pub fn validate(&self) -> Result<(), String> {
        if !matches!(self.theme.as_str(), "light" | "dark") {
            return Err(format!("Unknown theme '{}'", self.theme));
        }
        if !matches!(
            self.date_format.as_str(),
            "MM/DD/YYYY" | "DD/MM/YYYY" | "YYYY/MM/DD"
        ) {
            return Err(format!("Unsupported date format '{}'", self.date_format));
        }
        if !(1..=50).contains(&self.preview_count) {
            return Err("Preview count must be between 1 and 50".to_string());
        }
        Ok(())
    }
}
