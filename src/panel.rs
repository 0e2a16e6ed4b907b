//! Keyboard-driven debug panel over the parameter store.

use glam::Vec3;

use crate::store::{ParamError, ParamValue, ParameterStore};

/// Steps across a declared range
const RANGE_STEPS: f32 = 50.0;

/// Step for parameters without a range
const UNRANGED_STEP: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PanelCommand {
    Next,
    Previous,
    Increase,
    Decrease,
    Toggle,
}

/// Selection cursor over the editable parameters of a store
#[derive(Debug, Clone)]
pub struct DebugPanel {
    entries: Vec<String>,
    cursor: usize,
}

impl DebugPanel {
    /// List every parameter of `store` except the `hidden` ones, in definition order
    pub fn new(store: &ParameterStore, hidden: &[&str]) -> Self {
        let entries = store
            .names()
            .filter(|name| !hidden.contains(name))
            .map(str::to_string)
            .collect();
        Self { entries, cursor: 0 }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn selected(&self) -> Option<&str> {
        self.entries.get(self.cursor).map(String::as_str)
    }

    /// Run one command. Returns the stored value when a parameter was edited.
    pub fn apply(
        &mut self,
        command: PanelCommand,
        store: &mut ParameterStore,
    ) -> Result<Option<ParamValue>, ParamError> {
        if self.entries.is_empty() {
            return Ok(None);
        }

        let count = self.entries.len();
        match command {
            PanelCommand::Next | PanelCommand::Previous => {
                self.cursor = if command == PanelCommand::Next {
                    (self.cursor + 1) % count
                } else {
                    (self.cursor + count - 1) % count
                };
                let name = &self.entries[self.cursor];
                match store.get(name) {
                    Some(value) => log::info!("selected {name} = {value}"),
                    None => log::info!("selected {name}"),
                }
                Ok(None)
            }
            PanelCommand::Increase | PanelCommand::Decrease | PanelCommand::Toggle => {
                let name = self.entries[self.cursor].clone();
                let current = store
                    .get(&name)
                    .ok_or_else(|| ParamError::Unknown(name.clone()))?;
                let step = store
                    .range(&name)
                    .map_or(UNRANGED_STEP, |range| range.span() / RANGE_STEPS);
                let sign = if command == PanelCommand::Decrease { -1.0 } else { 1.0 };

                let next = match current {
                    ParamValue::Bool(v) => ParamValue::Bool(!v),
                    _ if command == PanelCommand::Toggle => {
                        log::debug!("{name} is not a toggle");
                        return Ok(None);
                    }
                    ParamValue::Float(v) => ParamValue::Float(v + sign * step),
                    ParamValue::Vec3(v) => ParamValue::Vec3(v + Vec3::splat(sign * step)),
                };

                let stored = store.set(&name, next)?;
                log::info!("{name} = {stored}");
                Ok(Some(stored))
            }
        }
    }

    /// One line per entry, the selected one marked with `>`
    pub fn describe(&self, store: &ParameterStore) -> String {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let marker = if i == self.cursor { '>' } else { ' ' };
                match store.get(name) {
                    Some(value) => format!("{marker} {name} = {value}"),
                    None => format!("{marker} {name}"),
                }
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::ParamRange;

    fn store() -> ParameterStore {
        let mut store = ParameterStore::new();
        store.define("time", 0.0_f32, None).unwrap();
        store
            .define("exposure", 2.0_f32, Some(ParamRange::new(0.0, 10.0)))
            .unwrap();
        store.define("smoothStepLighting", true, None).unwrap();
        store
            .define(
                "color",
                Vec3::splat(0.5),
                Some(ParamRange::vec3(Vec3::ZERO, Vec3::ONE)),
            )
            .unwrap();
        store.define("drift", 1.0_f32, None).unwrap();
        store
    }

    #[test]
    fn test_hidden_parameters_are_skipped() {
        let store = store();
        let panel = DebugPanel::new(&store, &["time"]);
        assert_eq!(
            panel.entries(),
            ["exposure", "smoothStepLighting", "color", "drift"]
        );
        assert_eq!(panel.selected(), Some("exposure"));
    }

    #[test]
    fn test_selection_wraps() {
        let mut store = store();
        let mut panel = DebugPanel::new(&store, &["time"]);

        panel.apply(PanelCommand::Previous, &mut store).unwrap();
        assert_eq!(panel.selected(), Some("drift"));
        panel.apply(PanelCommand::Next, &mut store).unwrap();
        assert_eq!(panel.selected(), Some("exposure"));
    }

    #[test]
    fn test_float_steps_by_range_fraction() {
        let mut store = store();
        let mut panel = DebugPanel::new(&store, &["time"]);

        let value = panel.apply(PanelCommand::Increase, &mut store).unwrap();
        let exposure = value.and_then(|v| v.as_f32()).unwrap();
        assert!((exposure - 2.2).abs() < 1e-6);

        for _ in 0..100 {
            panel.apply(PanelCommand::Increase, &mut store).unwrap();
        }
        assert_eq!(store.get_f32("exposure"), Some(10.0));

        // Toggle leaves floats alone
        let value = panel.apply(PanelCommand::Toggle, &mut store).unwrap();
        assert_eq!(value, None);
        assert_eq!(store.get_f32("exposure"), Some(10.0));
    }

    #[test]
    fn test_unranged_float_steps_by_tenth() {
        let mut store = store();
        let mut panel = DebugPanel::new(&store, &["time"]);
        panel.apply(PanelCommand::Previous, &mut store).unwrap();

        panel.apply(PanelCommand::Decrease, &mut store).unwrap();
        let drift = store.get_f32("drift").unwrap();
        assert!((drift - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_bool_flips_on_any_edit() {
        let mut store = store();
        let mut panel = DebugPanel::new(&store, &["time"]);
        panel.apply(PanelCommand::Next, &mut store).unwrap();

        panel.apply(PanelCommand::Toggle, &mut store).unwrap();
        assert_eq!(store.get_bool("smoothStepLighting"), Some(false));
        panel.apply(PanelCommand::Decrease, &mut store).unwrap();
        assert_eq!(store.get_bool("smoothStepLighting"), Some(true));
    }

    #[test]
    fn test_vector_steps_every_component() {
        let mut store = store();
        let mut panel = DebugPanel::new(&store, &["time"]);
        panel.apply(PanelCommand::Next, &mut store).unwrap();
        panel.apply(PanelCommand::Next, &mut store).unwrap();

        panel.apply(PanelCommand::Increase, &mut store).unwrap();
        let color = store.get_vec3("color").unwrap();
        assert!((color - Vec3::splat(0.52)).abs().max_element() < 1e-6);
    }

    #[test]
    fn test_empty_panel_ignores_commands() {
        let mut store = ParameterStore::new();
        let mut panel = DebugPanel::new(&store, &[]);
        assert_eq!(panel.selected(), None);
        assert_eq!(panel.apply(PanelCommand::Increase, &mut store), Ok(None));
        assert_eq!(panel.describe(&store), "");
    }

    #[test]
    fn test_describe_marks_selection() {
        let store = store();
        let panel = DebugPanel::new(&store, &["time", "color", "smoothStepLighting"]);
        let text = panel.describe(&store);
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("> exposure"));
        assert!(lines[1].starts_with("  drift"));
    }
}
