use crate::state::AppState;

pub fn update_locale(state: &mut AppState, locale_str: &str) {
    let normalized = normalize_locale(locale_str);
    state.locale = normalized.to_string();
    rust_i18n::set_locale(normalized);
}

// Host shells send full BCP-47 tags ("is-IS", "en_US"); only the language
// part matters for the compiled locales.
fn normalize_locale(locale_str: &str) -> &'static str {
    let lower = locale_str.trim().to_ascii_lowercase().replace('_', "-");
    match lower.split('-').next() {
        Some("is") => "is",
        _ => "en",
    }
}
