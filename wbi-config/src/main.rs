use wbi_config::{init_tracing, load_layout};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    // Config file from the first argument, otherwise CONFIG_PATH or the default
    let path = match std::env::args().nth(1) {
        Some(path) => path,
        None => {
            let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config".to_string());
            format!("{}/wbi.toml", config_path)
        }
    };

    let layout = load_layout(&path)?;
    tracing::info!(
        "[main] {} joint(s) on {} control board(s)",
        layout.joints.len(),
        layout.control_boards.len()
    );

    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}
