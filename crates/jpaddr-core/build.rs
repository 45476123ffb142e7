const SETTINGS_PATH: &str = "src/default_settings.toml";

fn main() {
    println!("cargo:rerun-if-changed={SETTINGS_PATH}");
    check_settings(include_str!("src/default_settings.toml"));
}

/// The embedded defaults must parse and carry every section the loader reads.
fn check_settings(content: &str) {
    let value: toml::Value = content
        .parse()
        .unwrap_or_else(|e| panic!("{SETTINGS_PATH} contains invalid TOML: {e}"));
    for section in ["postal", "output"] {
        if !value.get(section).is_some_and(toml::Value::is_table) {
            panic!("{SETTINGS_PATH} is missing the [{section}] table");
        }
    }
}
