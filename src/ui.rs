use crate::state::AppState;
use serde::Serialize;
use serde_json::Value;

#[derive(Serialize)]
pub struct Text {
    #[serde(rename = "type")]
    kind: &'static str,
    text: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_description: Option<String>,
}

impl Text {
    pub fn new(text: &str) -> Self {
        Self {
            kind: "Text",
            text: text.to_string(),
            size: None,
            content_description: None,
        }
    }

    pub fn size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn content_description(mut self, cd: &str) -> Self {
        self.content_description = Some(cd.to_string());
        self
    }
}

#[derive(Serialize)]
pub struct Button {
    #[serde(rename = "type")]
    kind: &'static str,
    text: String,
    action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_description: Option<String>,
}

impl Button {
    pub fn new(text: &str, action: &str) -> Self {
        Self {
            kind: "Button",
            text: text.to_string(),
            action: action.to_string(),
            id: None,
            content_description: None,
        }
    }

    pub fn id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    pub fn content_description(mut self, cd: &str) -> Self {
        self.content_description = Some(cd.to_string());
        self
    }
}

#[derive(Serialize)]
pub struct Column {
    #[serde(rename = "type")]
    kind: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    padding: Option<u32>,
    children: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_description: Option<String>,
}

impl Column {
    pub fn new(children: Vec<Value>) -> Self {
        Self {
            kind: "Column",
            padding: None,
            children,
            content_description: None,
        }
    }

    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn content_description(mut self, cd: &str) -> Self {
        self.content_description = Some(cd.to_string());
        self
    }
}

#[derive(Serialize)]
pub struct Grid {
    #[serde(rename = "type")]
    kind: &'static str,
    children: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    columns: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    padding: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    content_description: Option<String>,
}

impl Grid {
    pub fn new(children: Vec<Value>) -> Self {
        Self {
            kind: "Grid",
            children,
            columns: None,
            padding: None,
            content_description: None,
        }
    }

    pub fn columns(mut self, cols: u32) -> Self {
        self.columns = Some(cols);
        self
    }

    pub fn padding(mut self, padding: u32) -> Self {
        self.padding = Some(padding);
        self
    }

    pub fn content_description(mut self, cd: &str) -> Self {
        self.content_description = Some(cd.to_string());
        self
    }
}

/// Appends a back button below the screen content whenever the user is not
/// on the home screen.
pub fn maybe_push_back(children: &mut Vec<Value>, state: &AppState) {
    if state.nav_depth() > 1 {
        children.push(
            serde_json::to_value(Button::new("← Back", "back").content_description("nav_back"))
                .unwrap(),
        );
    }
}
