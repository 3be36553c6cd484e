//! Catalog builders shared by the integration tests.

#![allow(dead_code)]

use launcher_search::domain::ItemId;
use launcher_search::models::{ItemKind, SearchableItem};

pub fn app(key: &str, name: &str) -> SearchableItem {
    SearchableItem::new(
        ItemId::from_parts("app", key).unwrap(),
        name,
        ItemKind::Application {
            package_name: format!("org.example.{}", key),
            activity_name: None,
        },
    )
}

pub fn tagged_app(key: &str, name: &str, tags: &str) -> SearchableItem {
    app(key, name).with_tags(tags)
}

pub fn contact(key: &str, name: &str, nickname: Option<&str>) -> SearchableItem {
    SearchableItem::new(
        ItemId::from_parts("contact", key).unwrap(),
        name,
        ItemKind::Contact {
            lookup_key: key.to_string(),
            phone: format!("+1 (555) 01{:0>2}", key),
            nickname: nickname.map(str::to_string),
        },
    )
}

pub fn setting(key: &str, name: &str) -> SearchableItem {
    SearchableItem::new(
        ItemId::from_parts("setting", key).unwrap(),
        name,
        ItemKind::Setting {
            setting_name: format!("android.settings.{}", key.to_uppercase()),
            package_name: String::new(),
        },
    )
}

/// A small application catalog covering every tier.
pub fn sample_apps() -> Vec<SearchableItem> {
    vec![
        app("calendar", "Calendar"),
        app("weather", "Local Weather"),
        app("recall", "Recall"),
        app("google", "Google"),
        tagged_app("mail", "Mail", "work email"),
        tagged_app("games", "Game Center", "fun"),
        app("cafe", "Café Noir"),
    ]
}
