use crate::features::calculator::{handle_calculator_action, render_calculator_screen};
use crate::features::{catalog, render_menu};
use crate::i18n;
use crate::state::{AppState, Screen};
use serde::Deserialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::Mutex;

// One logical session. Mutation funnels through this lock; evaluation and
// rendering only read.
static STATE: Mutex<AppState> = Mutex::new(AppState::new());

#[derive(Deserialize)]
struct Command {
    action: String,
    bindings: Option<HashMap<String, String>>,
    locale: Option<String>,
}

#[derive(Debug)]
enum Action {
    Init,
    Reset,
    Back,
    SetLocale { locale: String },
    CalculatorScreen,
    Calculator {
        action: String,
        bindings: HashMap<String, String>,
    },
}

fn parse_command(command: Command) -> Result<Action, String> {
    let bindings = command.bindings.clone().unwrap_or_default();
    let action = match command.action.as_str() {
        "init" => Action::Init,
        "reset" => Action::Reset,
        "back" => Action::Back,
        "set_locale" => Action::SetLocale {
            locale: command.locale.clone().unwrap_or_default(),
        },
        "calc_screen" => Action::CalculatorScreen,
        action if action.starts_with("calc_") => Action::Calculator {
            action: action.to_string(),
            bindings,
        },
        other => return Err(format!("unknown_action:{other}")),
    };
    Ok(action)
}

fn apply_action(state: &mut AppState, action: Action) {
    match action {
        Action::Init => state.ensure_navigation(),
        Action::Reset => {
            state.reset_runtime();
            state.reset_navigation();
        }
        Action::Back => state.pop_screen(),
        Action::SetLocale { locale } => i18n::update_locale(state, &locale),
        Action::CalculatorScreen => state.push_screen(Screen::Calculator),
        Action::Calculator { action, bindings } => {
            handle_calculator_action(state, &action, &bindings);
        }
    }
}

pub fn render_screen(state: &AppState) -> Value {
    match state.current_screen() {
        Screen::Home => render_menu(state, catalog()),
        Screen::Calculator => render_calculator_screen(state),
    }
}

/// Parse one command envelope, apply it and render the resulting screen.
pub fn process(state: &mut AppState, message: &str) -> Result<Value, String> {
    let command: Command =
        serde_json::from_str(message).map_err(|e| format!("invalid_command:{e}"))?;
    let action = parse_command(command)?;
    apply_action(state, action);
    Ok(render_screen(state))
}

/// Entry point for a host shell: takes a command as JSON, returns the next
/// UI tree as JSON. Errors render as an error node instead of panicking.
pub fn handle_message(message: &str) -> String {
    let mut state = STATE.lock().expect("ui mutex poisoned");
    match process(&mut state, message) {
        Ok(rendered) => rendered.to_string(),
        Err(err) => json!({ "type": "Error", "message": err }).to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_renders_the_menu() {
        let mut state = AppState::new();
        let rendered = process(&mut state, r#"{"action":"init"}"#).unwrap();
        assert_eq!(rendered["type"], "Column");
        assert_eq!(state.current_screen(), Screen::Home);

        // Features are grouped under category columns tagged for UI tests.
        let math_sections = rendered["children"]
            .as_array()
            .unwrap()
            .iter()
            .filter(|child| child["content_description"] == "Math")
            .count();
        assert_eq!(math_sections, 1);
    }

    #[test]
    fn catalog_action_opens_the_calculator() {
        let mut state = AppState::new();
        process(&mut state, r#"{"action":"calc_screen"}"#).unwrap();
        assert_eq!(state.current_screen(), Screen::Calculator);
    }

    #[test]
    fn back_returns_home() {
        let mut state = AppState::new();
        process(&mut state, r#"{"action":"calc_screen"}"#).unwrap();
        process(&mut state, r#"{"action":"back"}"#).unwrap();
        assert_eq!(state.current_screen(), Screen::Home);
    }

    #[test]
    fn reset_restores_a_fresh_session() {
        let mut state = AppState::new();
        process(&mut state, r#"{"action":"calc_screen"}"#).unwrap();
        process(
            &mut state,
            r#"{"action":"calc_key","bindings":{"key":"7"}}"#,
        )
        .unwrap();
        process(&mut state, r#"{"action":"reset"}"#).unwrap();
        assert_eq!(state.current_screen(), Screen::Home);
        assert!(state.calculator.brain.log().is_empty());
        assert_eq!(state.calculator.display, "");
    }

    #[test]
    fn unknown_actions_are_rejected() {
        let mut state = AppState::new();
        let err = process(&mut state, r#"{"action":"frobnicate"}"#).unwrap_err();
        assert!(err.starts_with("unknown_action:"));
    }

    #[test]
    fn malformed_envelopes_are_rejected() {
        let mut state = AppState::new();
        let err = process(&mut state, "not json").unwrap_err();
        assert!(err.starts_with("invalid_command:"));
    }

    #[test]
    fn set_locale_normalizes_the_tag() {
        let mut state = AppState::new();
        process(
            &mut state,
            r#"{"action":"set_locale","locale":"is-IS"}"#,
        )
        .unwrap();
        assert_eq!(state.locale, "is");
    }

    #[test]
    fn handle_message_reports_errors_as_nodes() {
        let rendered: Value =
            serde_json::from_str(&handle_message(r#"{"action":"nope"}"#)).unwrap();
        assert_eq!(rendered["type"], "Error");
    }
}
