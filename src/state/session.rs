/// Persisted view token: which of the two views the user last had open.
///
/// The token lives in the user's config directory:
/// - Linux: ~/.config/borderless/view
/// - macOS: ~/Library/Application Support/borderless/view
/// - Windows: %APPDATA%\borderless\view
///
/// It is written on every tab change and read once at startup. All IO is
/// best-effort; a failure costs nothing but the restored tab.
use std::fs;
use std::path::PathBuf;

/// The two navigable views.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    About,
    Photos,
}

impl Tab {
    /// Parse a persisted token; absent or unrecognized values fall back
    /// to the default view.
    pub fn from_token(token: &str) -> Tab {
        match token.trim() {
            "photos" => Tab::Photos,
            _ => Tab::About,
        }
    }

    pub fn token(self) -> &'static str {
        match self {
            Tab::About => "about",
            Tab::Photos => "photos",
        }
    }
}

/// Get the path where the view token is stored.
fn token_path() -> Option<PathBuf> {
    let mut path = dirs::config_dir()?;
    path.push("borderless");
    path.push("view");
    Some(path)
}

/// Read the view restored at startup.
pub fn load_view_token() -> Tab {
    let Some(path) = token_path() else {
        return Tab::default();
    };
    match fs::read_to_string(&path) {
        Ok(token) => Tab::from_token(&token),
        Err(_) => Tab::default(),
    }
}

/// Persist the active view.
pub fn save_view_token(tab: Tab) {
    let Some(path) = token_path() else {
        return;
    };
    if let Some(parent) = path.parent() {
        if let Err(error) = fs::create_dir_all(parent) {
            eprintln!("⚠️  Could not create config directory: {}", error);
            return;
        }
    }
    if let Err(error) = fs::write(&path, tab.token()) {
        eprintln!("⚠️  Could not persist view token: {}", error);
    }
}
