#[cfg(test)]
mod tests {
    use crate::router::process;
    use crate::state::AppState;
    use serde_json::Value;

    fn open_calculator() -> AppState {
        let mut state = AppState::new();
        process(&mut state, r#"{"action":"calc_screen"}"#).unwrap();
        state
    }

    fn press(state: &mut AppState, key: &str) -> Value {
        process(
            state,
            &format!(r#"{{"action":"calc_key","bindings":{{"key":"{key}"}}}}"#),
        )
        .unwrap()
    }

    fn find_node<'a>(node: &'a Value, cd: &str) -> Option<&'a Value> {
        if node["content_description"] == cd {
            return Some(node);
        }
        node["children"]
            .as_array()?
            .iter()
            .find_map(|child| find_node(child, cd))
    }

    fn find_text<'a>(node: &'a Value, cd: &str) -> Option<&'a str> {
        find_node(node, cd)?["text"].as_str()
    }

    fn sequence_tokens(rendered: &Value) -> Vec<String> {
        find_text(rendered, "calc_sequence")
            .unwrap_or_default()
            .split_whitespace()
            .map(str::to_string)
            .collect()
    }

    #[test]
    fn keypad_renders_every_key() {
        let mut state = AppState::new();
        let rendered = process(&mut state, r#"{"action":"calc_screen"}"#).unwrap();
        let keypad = find_node(&rendered, "calc_keypad").unwrap();
        assert_eq!(keypad["type"], "Grid");
        assert_eq!(keypad["children"].as_array().unwrap().len(), 30);
    }

    #[test]
    fn chained_arithmetic_folds_left_to_right() {
        let mut state = open_calculator();
        for key in ["3", "+", "4", "×", "2"] {
            press(&mut state, key);
        }
        let rendered = press(&mut state, "=");
        assert_eq!(find_text(&rendered, "calc_display"), Some("14"));
        assert_eq!(sequence_tokens(&rendered), ["3", "+", "4", "×", "2", "="]);
    }

    #[test]
    fn pending_sequence_shows_ellipsis() {
        let mut state = open_calculator();
        press(&mut state, "3");
        let rendered = press(&mut state, "+");
        assert_eq!(sequence_tokens(&rendered), ["3", "+", "..."]);
        // The display still shows the last committed operand.
        assert_eq!(find_text(&rendered, "calc_display"), Some("3"));
    }

    #[test]
    fn typed_decimals_flow_through_the_log() {
        let mut state = open_calculator();
        for key in ["1", ".", "5", "+", "2", ".", "5"] {
            press(&mut state, key);
        }
        let rendered = press(&mut state, "=");
        assert_eq!(find_text(&rendered, "calc_display"), Some("4"));
    }

    #[test]
    fn memory_binds_at_evaluation_time() {
        let mut state = open_calculator();
        press(&mut state, "7");
        press(&mut state, "→M");
        assert_eq!(state.calculator.memory, Some(7.0));

        press(&mut state, "M");
        let rendered = press(&mut state, "x²");
        assert_eq!(find_text(&rendered, "calc_display"), Some("49"));
        assert!(find_text(&rendered, "calc_sequence")
            .unwrap()
            .contains("(M)²"));

        // Re-binding M re-derives the result from the unchanged log.
        let rendered = press(&mut state, "→M");
        assert_eq!(state.calculator.memory, Some(49.0));
        assert_eq!(find_text(&rendered, "calc_display"), Some("2401"));
    }

    #[test]
    fn undo_reverts_the_last_entry() {
        let mut state = open_calculator();
        press(&mut state, "3");
        press(&mut state, "+");
        let rendered = press(&mut state, "←");
        assert_eq!(state.calculator.brain.log().len(), 1);
        assert_eq!(find_text(&rendered, "calc_display"), Some("3"));

        press(&mut state, "+");
        press(&mut state, "4");
        let rendered = press(&mut state, "=");
        assert_eq!(find_text(&rendered, "calc_display"), Some("7"));
    }

    #[test]
    fn undo_on_empty_log_surfaces_the_error() {
        let mut state = open_calculator();
        let rendered = press(&mut state, "←");
        assert_eq!(state.calculator.error.as_deref(), Some("empty_log"));
        assert!(rendered.to_string().contains("empty_log"));

        // The session stays usable and the next operation clears the error.
        press(&mut state, "2");
        press(&mut state, "=");
        assert_eq!(state.calculator.error, None);
    }

    #[test]
    fn clear_empties_log_and_display() {
        let mut state = open_calculator();
        for key in ["8", "×", "2", "="] {
            press(&mut state, key);
        }
        let rendered = press(&mut state, "C");
        assert!(state.calculator.brain.log().is_empty());
        assert_eq!(find_text(&rendered, "calc_display"), Some("0"));
        assert_eq!(find_text(&rendered, "calc_sequence"), Some(""));
    }

    #[test]
    fn constants_and_unary_keys_compose() {
        let mut state = open_calculator();
        press(&mut state, "π");
        press(&mut state, "cos");
        let rendered = press(&mut state, "=");
        assert_eq!(find_text(&rendered, "calc_display"), Some("-1"));
        let sequence = find_text(&rendered, "calc_sequence").unwrap();
        assert!(sequence.contains("cos"));
        assert!(sequence.contains("(π)"));
    }
}
