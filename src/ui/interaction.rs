//! Interaction state for a rendered tree: current input values, active
//! tabs, and focus, plus the mapping from user actions to protocol events.
//!
//! One `InteractionState` belongs to one rendered turn and is owned by the
//! event loop; there is no locking because there is no parallelism. Events
//! flow out through the `dispatch` callback exactly once per interaction
//! and are never stored.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::core::event::{UiEvent, DEFAULT_SUBMIT_ACTION};
use crate::core::schema::Component;
use crate::ui::render::{FormScope, InteractiveTarget, RenderedUi};

#[derive(Debug, Default, Clone)]
pub struct InteractionState {
    values: BTreeMap<String, Value>,
    active_tabs: BTreeMap<String, usize>,
    /// Index into [`RenderedUi::interactive`] of the focused element.
    pub focus: Option<usize>,
}

impl InteractionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds default values for every named input in the forest, so a form
    /// submitted untouched still reports all of its fields. Existing values
    /// (from earlier edits of the same turn) are preserved.
    pub fn seed(&mut self, components: &[Component]) {
        for component in components {
            if let Some((name, default)) = seed_value(component) {
                self.values.entry(name).or_insert(default);
            }
            for slot in component.child_slots() {
                self.seed(slot);
            }
        }
    }

    pub fn value_of(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    /// Stores a new input value and dispatches the change event.
    pub fn set_value(
        &mut self,
        name: impl Into<String>,
        value: Value,
        dispatch: &mut dyn FnMut(UiEvent),
    ) {
        let name = name.into();
        self.values.insert(name.clone(), value.clone());
        dispatch(UiEvent::InputChange { name, value });
    }

    /// Flips a switch value and dispatches the change event.
    pub fn toggle(&mut self, name: impl Into<String>, dispatch: &mut dyn FnMut(UiEvent)) {
        let name = name.into();
        let current = matches!(self.values.get(&name), Some(Value::Bool(true)));
        self.set_value(name, Value::Bool(!current), dispatch);
    }

    pub fn active_tab(&self, key: &str) -> usize {
        self.active_tabs.get(key).copied().unwrap_or(0)
    }

    /// Selects a tab and dispatches the change event.
    pub fn select_tab(
        &mut self,
        key: impl Into<String>,
        index: usize,
        dispatch: &mut dyn FnMut(UiEvent),
    ) {
        self.active_tabs.insert(key.into(), index);
        dispatch(UiEvent::TabChange { index });
    }

    /// Activates the interactive element at `index` in the rendered
    /// registry. Buttons inside a form scope submit the form with their own
    /// action id; bare buttons click. Disabled buttons and non-button
    /// targets are no-ops here.
    pub fn activate(
        &self,
        rendered: &RenderedUi,
        index: usize,
        dispatch: &mut dyn FnMut(UiEvent),
    ) {
        let Some(node) = rendered.interactive.get(index) else {
            return;
        };
        let InteractiveTarget::Button {
            action_id,
            disabled,
            form,
        } = &node.target
        else {
            return;
        };
        if *disabled {
            return;
        }
        match form.and_then(|form_index| rendered.forms.get(form_index)) {
            Some(scope) => dispatch(UiEvent::FormSubmit {
                action_id: action_id.clone(),
                data: self.collect(&scope.fields),
            }),
            None => dispatch(UiEvent::ButtonClick {
                action_id: action_id.clone(),
            }),
        }
    }

    /// Submits a form scope directly (e.g. Enter pressed inside a form).
    /// Without a button in the scope the action id falls back to
    /// `form_submit`.
    pub fn submit_form(&self, form: &FormScope, dispatch: &mut dyn FnMut(UiEvent)) {
        let action_id = form
            .action_id
            .clone()
            .unwrap_or_else(|| DEFAULT_SUBMIT_ACTION.to_string());
        dispatch(UiEvent::FormSubmit {
            action_id,
            data: self.collect(&form.fields),
        });
    }

    fn collect(&self, fields: &[String]) -> Map<String, Value> {
        let mut data = Map::new();
        for field in fields {
            let value = self.values.get(field).cloned().unwrap_or(Value::Null);
            data.insert(field.clone(), value);
        }
        data
    }
}

fn seed_value(component: &Component) -> Option<(String, Value)> {
    match component {
        Component::TextInput(input) => Some((
            input.name.clone(),
            Value::String(input.default_value.clone().unwrap_or_default()),
        )),
        Component::NumberInput(input) => Some((
            input.name.clone(),
            input
                .default_value
                .and_then(|v| serde_json::Number::from_f64(v).map(Value::Number))
                .unwrap_or(Value::Null),
        )),
        Component::DateInput(input) => Some((
            input.name.clone(),
            Value::String(input.default_value.clone().unwrap_or_default()),
        )),
        Component::Slider(input) => Some((
            input.name.clone(),
            input
                .default_value
                .or(input.min)
                .and_then(|v| serde_json::Number::from_f64(v).map(Value::Number))
                .unwrap_or(Value::Null),
        )),
        Component::Select(input) => Some((
            input.name.clone(),
            Value::String(input.default_value.clone().unwrap_or_default()),
        )),
        Component::MultiSelect(input) => Some((
            input.name.clone(),
            Value::Array(
                input
                    .default_value
                    .iter()
                    .map(|v| Value::String(v.clone()))
                    .collect(),
            ),
        )),
        Component::Switch(input) => {
            Some((input.name.clone(), Value::Bool(input.default_value)))
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::schema::*;
    use crate::ui::render::render;
    use crate::ui::theme::Theme;
    use serde_json::json;

    fn registration_card() -> Vec<Component> {
        vec![Component::Card(Card {
            id: None,
            title: Some("Register".into()),
            description: None,
            content: vec![
                Component::TextInput(TextInput {
                    id: None,
                    name: "email".into(),
                    label: "Email".into(),
                    placeholder: None,
                    required: true,
                    default_value: None,
                    error: None,
                }),
                Component::TextInput(TextInput {
                    id: None,
                    name: "city".into(),
                    label: "City".into(),
                    placeholder: None,
                    required: false,
                    default_value: Some("Lyon".into()),
                    error: None,
                }),
            ],
            footer: Some(vec![Component::Button(Button {
                id: None,
                label: "Save".into(),
                action_id: "save_profile".into(),
                variant: ButtonVariant::Primary,
                disabled: false,
            })]),
        })]
    }

    #[test]
    fn submitted_card_reports_every_field_by_name() {
        let components = registration_card();
        let mut state = InteractionState::new();
        state.seed(&components);

        let mut events = Vec::new();
        state.set_value("email", json!("ada@example.org"), &mut |event| {
            events.push(event)
        });

        let rendered = render(&components, &state, &Theme::dark_default(), 80);
        let button_index = rendered
            .interactive
            .iter()
            .position(|node| matches!(node.target, InteractiveTarget::Button { .. }))
            .expect("button registered");
        state.activate(&rendered, button_index, &mut |event| events.push(event));

        let submit = events
            .iter()
            .find_map(|event| match event {
                UiEvent::FormSubmit { action_id, data } => Some((action_id, data)),
                _ => None,
            })
            .expect("form submitted");
        assert_eq!(submit.0, "save_profile");
        assert_eq!(submit.1.get("email"), Some(&json!("ada@example.org")));
        // untouched fields still report their seeded defaults
        assert_eq!(submit.1.get("city"), Some(&json!("Lyon")));
    }

    #[test]
    fn buttonless_form_submits_with_default_action() {
        let form = FormScope {
            action_id: None,
            fields: vec!["email".into()],
        };
        let mut state = InteractionState::new();
        state.set_value("email", json!("x@y.z"), &mut |_| {});

        let mut events = Vec::new();
        state.submit_form(&form, &mut |event| events.push(event));
        match &events[..] {
            [UiEvent::FormSubmit { action_id, .. }] => assert_eq!(action_id, "form_submit"),
            other => panic!("expected one submit, got {other:?}"),
        }
    }

    #[test]
    fn bare_button_emits_click() {
        let components = vec![Component::Button(Button {
            id: None,
            label: "Go".into(),
            action_id: "go".into(),
            variant: ButtonVariant::Primary,
            disabled: false,
        })];
        let state = InteractionState::new();
        let rendered = render(&components, &state, &Theme::dark_default(), 80);

        let mut events = Vec::new();
        state.activate(&rendered, 0, &mut |event| events.push(event));
        assert_eq!(events, vec![UiEvent::button_click("go")]);
    }

    #[test]
    fn disabled_button_dispatches_nothing() {
        let components = vec![Component::Button(Button {
            id: None,
            label: "Nope".into(),
            action_id: "nope".into(),
            variant: ButtonVariant::Primary,
            disabled: true,
        })];
        let state = InteractionState::new();
        let rendered = render(&components, &state, &Theme::dark_default(), 80);

        let mut events = Vec::new();
        state.activate(&rendered, 0, &mut |event| events.push(event));
        assert!(events.is_empty());
    }

    #[test]
    fn toggle_flips_and_dispatches() {
        let mut state = InteractionState::new();
        let mut events = Vec::new();
        state.toggle("newsletter", &mut |event| events.push(event));
        assert_eq!(state.value_of("newsletter"), Some(&json!(true)));
        state.toggle("newsletter", &mut |event| events.push(event));
        assert_eq!(state.value_of("newsletter"), Some(&json!(false)));
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn input_change_event_carries_name_and_value() {
        let mut state = InteractionState::new();
        let mut events = Vec::new();
        state.set_value("age", json!(30), &mut |event| events.push(event));
        assert_eq!(
            events,
            vec![UiEvent::input_change("age", json!(30))]
        );
    }
}
