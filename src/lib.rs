pub mod features;
pub mod i18n;
pub mod router;
pub mod state;
pub mod ui;

rust_i18n::i18n!("locales", fallback = "en");
