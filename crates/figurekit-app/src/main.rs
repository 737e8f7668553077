//! Headless replay of a recorded curve editor session (native).
//!
//! Usage: `figurekit <script.json> [config.json]`. The script holds a list of
//! events and optionally an editor config; a config file given as the second
//! argument takes its place. The final editor state is printed as JSON.

#[cfg(feature = "native")]
fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let path = args
        .next()
        .ok_or("usage: figurekit <script.json> [config.json]")?;
    log::info!("Replaying {}", path);

    let json = std::fs::read_to_string(&path)?;
    let mut script = figurekit_app::ReplayScript::from_json(&json)?;
    if let Some(config_path) = args.next() {
        log::info!("Using config {}", config_path);
        let config = figurekit_core::EditorConfig::from_json(&std::fs::read_to_string(&config_path)?)?;
        script = script.with_config(config);
    }
    let editor = script.replay()?;

    println!("{}", serde_json::to_string_pretty(&editor.snapshot())?);
    Ok(())
}

#[cfg(not(feature = "native"))]
fn main() {
    panic!("Native feature not enabled. Use `cargo run --features native`");
}
