pub mod brain;
pub mod calculator;

#[cfg(test)]
mod calculator_test;

use crate::state::AppState;
use crate::ui::{maybe_push_back, Button as UiButton, Column as UiColumn, Text as UiText};
use serde_json::Value;
use std::collections::BTreeMap;

/// A feature entry for the home menu.
pub struct Feature {
    pub id: &'static str,
    pub name: &'static str,
    pub category: &'static str,
    pub action: &'static str,
    pub description: &'static str,
}

pub fn catalog() -> &'static [Feature] {
    static CATALOG: [Feature; 1] = [Feature {
        id: "calculator",
        name: "Calculator",
        category: "Math",
        action: "calc_screen",
        description: "Keypad calculator with a replayable input sequence, memory and undo.",
    }];
    &CATALOG
}

/// Render the home screen using a catalog of features.
pub fn render_menu(state: &AppState, catalog: &[Feature]) -> Value {
    let mut children = vec![
        serde_json::to_value(UiText::new("Reikniverk").size(22.0)).unwrap(),
        serde_json::to_value(UiText::new("Select a tool.").size(14.0)).unwrap(),
    ];

    let mut grouped: BTreeMap<&str, Vec<&Feature>> = BTreeMap::new();
    for feature in catalog {
        grouped.entry(feature.category).or_default().push(feature);
    }

    for (category, features) in grouped {
        let mut section: Vec<Value> =
            vec![serde_json::to_value(UiText::new(category).size(16.0)).unwrap()];
        for feature in features {
            section.push(
                serde_json::to_value(UiButton::new(feature.name, feature.action).id(feature.id))
                    .unwrap(),
            );
            section.push(
                serde_json::to_value(UiText::new(feature.description).size(12.0)).unwrap(),
            );
        }
        children.push(
            serde_json::to_value(UiColumn::new(section).padding(4).content_description(category))
                .unwrap(),
        );
    }

    maybe_push_back(&mut children, state);
    serde_json::to_value(UiColumn::new(children).padding(20)).unwrap()
}
