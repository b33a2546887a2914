//! Where the translator keeps its files.
//!
//! Settings and the user's polish rules live under the platform config dir
//! (`~/.config/tamil-translator` on Linux). Generated audio and PDFs go to
//! `output/` under the local data dir (`~/.local/share/tamil-translator`).

use std::path::{Path, PathBuf};

const APP_DIR: &str = "tamil-translator";
const SETTINGS_FILE: &str = "settings.toml";
const POLISH_RULES_FILE: &str = "polish-rules.json";
const OUTPUT_DIR: &str = "output";

#[derive(Debug, Clone)]
pub struct AppPaths {
    pub config_dir: PathBuf,
    pub settings_file: PathBuf,
    /// User polish rules, applied after the builtin table.
    pub polish_rules_file: PathBuf,
    /// Default destination for audio and PDF files; `output_dir` in the
    /// config takes precedence.
    pub output_dir: PathBuf,
}

impl AppPaths {
    /// Paths under the platform's config and local data dirs, or the
    /// working directory on platforms that report neither.
    pub fn new() -> Self {
        let here = || PathBuf::from(".");
        Self::with_roots(
            &dirs::config_dir().unwrap_or_else(here),
            &dirs::data_local_dir().unwrap_or_else(here),
        )
    }

    /// Lay the app out under explicit roots.
    pub fn with_roots(config_root: &Path, data_root: &Path) -> Self {
        let config_dir = config_root.join(APP_DIR);
        Self {
            settings_file: config_dir.join(SETTINGS_FILE),
            polish_rules_file: config_dir.join(POLISH_RULES_FILE),
            output_dir: data_root.join(APP_DIR).join(OUTPUT_DIR),
            config_dir,
        }
    }
}

impl Default for AppPaths {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_sit_in_the_app_config_dir() {
        let paths = AppPaths::with_roots(Path::new("/cfg"), Path::new("/data"));
        assert_eq!(paths.config_dir, Path::new("/cfg/tamil-translator"));
        assert_eq!(paths.settings_file.parent(), Some(paths.config_dir.as_path()));
        assert_eq!(
            paths.polish_rules_file,
            Path::new("/cfg/tamil-translator/polish-rules.json")
        );
    }

    #[test]
    fn output_goes_to_data_dir() {
        let paths = AppPaths::with_roots(Path::new("/cfg"), Path::new("/data"));
        assert_eq!(paths.output_dir, Path::new("/data/tamil-translator/output"));
    }

    #[test]
    fn platform_paths_resolve() {
        let paths = AppPaths::new();
        assert!(paths.settings_file.ends_with("tamil-translator/settings.toml"));
        assert!(paths.output_dir.ends_with("tamil-translator/output"));
    }
}
