//! Settings menu data.
//!
//! Menu entries carry a tagged [`SettingsCommand`] the presentation layer
//! dispatches on; the data model itself holds no behavior.

use serde::{Deserialize, Serialize};

/// What tapping a settings item should do, dispatched by the presentation
/// layer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingsCommand {
    OpenSystemNotificationSettings,
    ToggleDarkMode,
    OpenUrl(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SettingsItemKind {
    Toggle,
    Navigation,
    Destructive,
    Info,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsItem {
    pub title: String,
    pub icon: String,
    pub kind: SettingsItemKind,
    pub command: SettingsCommand,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SettingsSection {
    pub title: String,
    pub items: Vec<SettingsItem>,
}

const HELP_URL: &str =
    "https://docs.google.com/document/d/1PR90g9mA0l8tYqH3-fFWQ1Ou1uuD7kGpEBWNbvgjf0U/edit?usp=sharing";
const PRIVACY_URL: &str =
    "https://docs.google.com/document/d/1WVh48rU1Xi34PkKJCkq09WOd4dQSJyqd5Ir6Ncq2048/edit?tab=t.0";

/// The default settings menu.
pub fn default_sections() -> Vec<SettingsSection> {
    vec![
        SettingsSection {
            title: "App settings".to_string(),
            items: vec![
                SettingsItem {
                    title: "Notifications".to_string(),
                    icon: "bell.fill".to_string(),
                    kind: SettingsItemKind::Toggle,
                    command: SettingsCommand::OpenSystemNotificationSettings,
                },
                SettingsItem {
                    title: "Dark mode".to_string(),
                    icon: "moon.fill".to_string(),
                    kind: SettingsItemKind::Toggle,
                    command: SettingsCommand::ToggleDarkMode,
                },
            ],
        },
        SettingsSection {
            title: "Support & info".to_string(),
            items: vec![
                SettingsItem {
                    title: "Help & support".to_string(),
                    icon: "questionmark.circle.fill".to_string(),
                    kind: SettingsItemKind::Navigation,
                    command: SettingsCommand::OpenUrl(HELP_URL.to_string()),
                },
                SettingsItem {
                    title: "Privacy policy".to_string(),
                    icon: "lock.fill".to_string(),
                    kind: SettingsItemKind::Navigation,
                    command: SettingsCommand::OpenUrl(PRIVACY_URL.to_string()),
                },
                SettingsItem {
                    title: "About".to_string(),
                    icon: "info.circle.fill".to_string(),
                    kind: SettingsItemKind::Navigation,
                    command: SettingsCommand::OpenUrl(HELP_URL.to_string()),
                },
            ],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_menu_has_two_sections() {
        let sections = default_sections();
        assert_eq!(sections.len(), 2);
        assert_eq!(sections[0].items.len(), 2);
        assert_eq!(sections[1].items.len(), 3);
    }

    #[test]
    fn navigation_items_carry_urls() {
        let sections = default_sections();
        for item in &sections[1].items {
            assert_eq!(item.kind, SettingsItemKind::Navigation);
            assert!(matches!(item.command, SettingsCommand::OpenUrl(_)));
        }
    }
}
