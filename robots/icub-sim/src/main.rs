use wbi_config::{init_tracing, load_property_store, resolve_configured_layout, PropertyStore};
use wbi_config_icub_sim::{control_board_options, get_config_path, joint_pids, robot_name, ROBOT_NAME, WBI_TOML};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    init_tracing();

    // Use the file on disk when CONFIG_PATH points somewhere, the embedded copy otherwise
    let store = match std::env::var("CONFIG_PATH") {
        Ok(_) => {
            let path = format!("{}/wbi.toml", get_config_path());
            tracing::info!("[{}] Configuration path: {}", ROBOT_NAME, path);
            load_property_store(&path)?
        }
        Err(_) => {
            tracing::info!("[{}] Using embedded configuration", ROBOT_NAME);
            PropertyStore::from_toml_str(WBI_TOML)?
        }
    };

    let layout = resolve_configured_layout(&store)?;
    let robot = robot_name(&store);
    for options in control_board_options(&store, &layout.control_boards) {
        tracing::info!("[{}] control board {}: {} -> {}", robot, options.part, options.local, options.remote);
    }
    for (joint, pid) in joint_pids(&store) {
        tracing::info!("[{}] {} pid {:?}", robot, joint, pid);
    }

    println!("{}", serde_json::to_string_pretty(&layout)?);
    Ok(())
}
