use crate::features::brain::{CalculatorBrain, Evaluation};
use crate::state::AppState;
use crate::ui::{maybe_push_back, Column as UiColumn, Grid as UiGrid, Text as UiText};
use rust_i18n::t;
use serde_json::{json, Value};
use std::collections::HashMap;

// Keypad as rendered, five keys per row.
const KEYPAD: [&str; 30] = [
    "π", "e", "√", "cos", "sin", //
    "±", "x²", "x³", "x⁻¹", "x⁻²", //
    "7", "8", "9", "÷", "C", //
    "4", "5", "6", "×", "←", //
    "1", "2", "3", "−", "M", //
    "0", ".", "=", "+", "→M",
];

/// Screen state for the calculator tool. Everything numeric is derived from
/// the brain's log on demand; only input-entry state lives here.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CalculatorState {
    pub brain: CalculatorBrain,
    pub display: String,
    pub typing: bool,
    pub memory: Option<f64>,
    pub error: Option<String>,
}

impl CalculatorState {
    pub const fn new() -> Self {
        Self {
            brain: CalculatorBrain::new(),
            display: String::new(),
            typing: false,
            memory: None,
            error: None,
        }
    }

    pub fn display_text(&self) -> &str {
        if self.display.is_empty() {
            "0"
        } else {
            &self.display
        }
    }

    /// Binding table handed to the evaluator; the single `M` slot is the
    /// only variable the keypad can produce.
    pub fn bindings(&self) -> Option<HashMap<String, f64>> {
        self.memory
            .map(|value| HashMap::from([("M".to_string(), value)]))
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

pub fn render_calculator_screen(state: &AppState) -> Value {
    let calc = &state.calculator;
    let evaluation = calc.brain.evaluate(calc.bindings().as_ref());

    let mut children = vec![
        serde_json::to_value(UiText::new(&t!("calculator_title")).size(20.0)).unwrap(),
        serde_json::to_value(UiText::new(&t!("calculator_description")).size(14.0)).unwrap(),
        serde_json::to_value(
            UiText::new(&sequence_line(&evaluation))
                .size(14.0)
                .content_description("calc_sequence"),
        )
        .unwrap(),
        serde_json::to_value(
            UiText::new(calc.display_text())
                .size(28.0)
                .content_description("calc_display"),
        )
        .unwrap(),
    ];

    let keys: Vec<Value> = KEYPAD.iter().map(|key| key_button(key)).collect();
    children.push(
        serde_json::to_value(
            UiGrid::new(keys)
                .columns(5)
                .padding(8)
                .content_description("calc_keypad"),
        )
        .unwrap(),
    );

    if let Some(value) = calc.memory {
        children.push(
            serde_json::to_value(
                UiText::new(&format!("M = {}", format_result(value))).size(12.0),
            )
            .unwrap(),
        );
    }

    if let Some(err) = &calc.error {
        children
            .push(serde_json::to_value(UiText::new(&format!("Error: {err}")).size(12.0)).unwrap());
    }

    maybe_push_back(&mut children, state);
    serde_json::to_value(UiColumn::new(children).padding(20)).unwrap()
}

fn key_button(key: &str) -> Value {
    json!({
        "type": "Button",
        "text": key,
        "action": "calc_key",
        "payload": { "key": key }
    })
}

pub fn handle_calculator_action(
    state: &mut AppState,
    action: &str,
    bindings: &HashMap<String, String>,
) {
    match action {
        "calc_key" => {
            if let Some(key) = bindings.get("key") {
                press_key(&mut state.calculator, key);
            }
        }
        _ => {}
    }
}

/// One keypad press. Digits edit the display; everything else goes through
/// the recording API and refreshes the display from a fresh replay.
pub fn press_key(calc: &mut CalculatorState, key: &str) {
    if is_digit_key(key) {
        type_digit(calc, key);
        return;
    }
    match key {
        "M" => {
            calc.typing = false;
            calc.brain.record_variable("M");
            calc.error = None;
            refresh_display(calc);
        }
        "→M" => {
            // Stores the display value without touching the log; the next
            // replay picks the new binding up.
            calc.memory = Some(calc.display_text().parse().unwrap_or(0.0));
            calc.typing = false;
            refresh_display(calc);
        }
        _ => press_operation(calc, key),
    }
}

fn is_digit_key(key: &str) -> bool {
    key == "." || (!key.is_empty() && key.chars().all(|c| c.is_ascii_digit()))
}

fn type_digit(calc: &mut CalculatorState, digit: &str) {
    if calc.typing {
        // At most one decimal point per typed operand.
        if digit == "." && calc.display.contains('.') {
            return;
        }
        calc.display.push_str(digit);
    } else {
        calc.display = if digit == "." {
            "0.".to_string()
        } else {
            digit.to_string()
        };
        calc.typing = true;
    }
}

fn press_operation(calc: &mut CalculatorState, symbol: &str) {
    if calc.typing {
        let operand = calc.display.parse().unwrap_or(0.0);
        calc.brain.record_number(operand);
        calc.typing = false;
    }
    calc.error = calc.brain.record_symbol(symbol).err();
    if symbol == "C" {
        calc.display.clear();
    }
    refresh_display(calc);
}

fn refresh_display(calc: &mut CalculatorState) {
    let evaluation = calc.brain.evaluate(calc.bindings().as_ref());
    if let Some(value) = evaluation.result {
        calc.display = format_result(value);
    }
}

/// Sequence line under the title: trailing `...` while an operation is
/// waiting for its second operand, `=` once the chain is settled.
fn sequence_line(evaluation: &Evaluation) -> String {
    if evaluation.is_pending {
        format!("{} ...", evaluation.description)
    } else if !evaluation.description.is_empty() {
        format!("{} =", evaluation.description)
    } else {
        String::new()
    }
}

pub fn format_result(value: f64) -> String {
    let mut out = format!("{value:.10}");
    while out.contains('.') && out.ends_with('0') {
        out.pop();
    }
    if out.ends_with('.') {
        out.pop();
    }
    out
}
