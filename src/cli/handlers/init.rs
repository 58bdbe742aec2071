use std::fs;
use std::path::Path;

use crate::cli::commands::ConfigInitArgs;

const CONFIG_TOML_TEMPLATE: &str = r##"# taskboard settings

[store]
# Base URL of the board's JSON store. A local file works too:
# url = "file:///home/me/board.json"
{store}

[session]
# Directory holding session.json (default: the platform data dir)
# dir = "/home/me/.local/share/taskboard"

[ui]
# show_key_hints = false
# Pointer movement in pixels before a press becomes a drag (one cell is 8x16)
# drag_threshold = 10
#
# [ui.colors]
# background = "#0C001B"
# text = "#B0AAFF"
# text_bright = "#FFFFFF"
# highlight = "#29ABE2"
# dim = "#7D78BF"
# red = "#FF3D00"
# yellow = "#FFA800"
# green = "#7AE229"
# drop_target = "#29ABE2"
"##;

/// Render config.toml, filling in the store URL when one is known
fn render_config_toml(store_url: Option<&str>) -> String {
    let store_line = match store_url {
        Some(url) => format!("url = \"{}\"", url.replace('\\', "\\\\").replace('"', "\\\"")),
        None => "# url = \"https://example.firebaseio.com\"".to_string(),
    };
    CONFIG_TOML_TEMPLATE.replace("{store}", &store_line)
}

pub fn cmd_config_init(
    args: ConfigInitArgs,
    config_path: &Path,
    store_url: Option<&str>,
) -> Result<(), Box<dyn std::error::Error>> {
    if config_path.exists() && !args.force {
        return Err(format!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        )
        .into());
    }
    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(config_path, render_config_toml(store_url))?;
    tracing::info!(path = %config_path.display(), "config written");
    println!("Wrote {}", config_path.display());
    Ok(())
}
