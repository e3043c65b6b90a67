use log::{error, info, warn};
use std::fs;
use std::path::Path;
use std::process;

use crate::config::SiteConfig;

/// Required directories that will be created if missing
const REQUIRED_DIRS: &[&str] = &[
    "website",
    "website/assets",
    "website/assets/json",
    "website/static",
    "website/static/css",
    "website/static/js",
];

/// Static assets the page shell links to
const SHELL_ASSETS: &[&str] = &["website/static/css/styles.css", "website/static/js/main.js"];

/// Run all boot checks. Call this before Rocket launches.
/// Creates missing directories and warns about missing data files;
/// aborts only when a directory cannot be created.
pub fn run(cfg: &SiteConfig) {
    info!("Workfolio boot check starting...");

    let mut warnings = 0u32;
    let mut errors = 0u32;

    // ── 1. Directories ─────────────────────────────────
    for dir in REQUIRED_DIRS {
        let path = Path::new(dir);
        if !path.exists() {
            match fs::create_dir_all(path) {
                Ok(_) => info!("  Created directory: {}", dir),
                Err(e) => {
                    error!("  FAILED to create directory {}: {}", dir, e);
                    errors += 1;
                }
            }
        }
    }

    // ── 2. Catalogs ────────────────────────────────────
    let works_path = Path::new(&cfg.catalog.works_path);
    if !works_path.exists() {
        if cfg.catalog.inline.is_some() {
            info!("  {} not found, inline catalog will be used", works_path.display());
        } else {
            warn!("  Missing works catalog: {} (project pages will be empty)", works_path.display());
            warnings += 1;
        }
    }
    if !Path::new(&cfg.catalog.cards_path).exists() {
        warn!("  Missing cards catalog: {} (home grid will be empty)", cfg.catalog.cards_path);
        warnings += 1;
    }

    // ── 3. Shell assets ────────────────────────────────
    for file in SHELL_ASSETS {
        if !Path::new(file).exists() {
            warn!("  Missing static asset: {} (pages will be unstyled or static)", file);
            warnings += 1;
        }
    }

    // ── 4. Contact relay ───────────────────────────────
    if cfg.contact.enabled && cfg.contact.action.trim().is_empty() {
        warn!("  contact.action is empty (contact submissions will fail)");
        warnings += 1;
    }

    // ── Summary ─────────────────────────────────────────
    if errors > 0 {
        error!(
            "Boot check FAILED: {} error(s), {} warning(s). Aborting.",
            errors, warnings
        );
        process::exit(1);
    }

    if warnings > 0 {
        warn!(
            "Boot check passed with {} warning(s). Some features may not work correctly.",
            warnings
        );
    } else {
        info!("Boot check passed. All systems go.");
    }
}
