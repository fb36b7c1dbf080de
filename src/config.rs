use std::path::PathBuf;

/// Application-level constants
pub const APP_NAME: &str = "Dosetime";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Get the application data directory
pub fn app_data_dir() -> PathBuf {
    let home = dirs::home_dir().expect("Cannot determine home directory");
    home.join("Dosetime")
}

/// Get the default database path
pub fn database_path() -> PathBuf {
    app_data_dir().join("dosetime.db")
}

pub fn default_log_filter() -> &'static str {
    "dosetime=info"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn app_data_dir_under_home() {
        let dir = app_data_dir();
        let home = dirs::home_dir().unwrap();
        assert!(dir.starts_with(home));
        assert!(dir.ends_with("Dosetime"));
    }

    #[test]
    fn database_under_app_data() {
        let db = database_path();
        let app = app_data_dir();
        assert!(db.starts_with(app));
        assert!(db.ends_with("dosetime.db"));
    }

    #[test]
    fn app_version_matches_cargo() {
        assert_eq!(APP_VERSION, "0.1.0");
    }
}
