use std::env;
use std::fs;

use agentsphere_placement::api::{active_targets, load_targets_json, PositionFix, TargetRecord};
use agentsphere_placement::{
    ConfigurationManager, GeoPoint, LayoutSession, PlacementReport, TextFormatter, ViewerState,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

const CONFIG_ENV: &str = "AGENTSPHERE_CONFIG";

fn init_logging(debug: bool) {
    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).with_target(false).init();
}

fn sample_records() -> Vec<TargetRecord> {
    let rows = [
        ("demo-guide", "City Hall Guide", "video-guide", 34.0535, -118.2428),
        ("demo-tutor", "Library Tutor", "video-tutor", 34.0505, -118.2551),
        ("demo-assistant", "Plaza Assistant", "video-assistant", 34.0522, -118.2440),
    ];

    rows.iter()
        .map(|&(id, name, object_type, latitude, longitude)| TargetRecord {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            object_type: object_type.to_string(),
            latitude,
            longitude,
            altitude: None,
            precise_latitude: None,
            precise_longitude: None,
            precise_altitude: None,
            accuracy: None,
            correction_applied: None,
            range_meters: None,
            is_active: true,
        })
        .collect()
}

fn parse_fix(lat: Option<&String>, lon: Option<&String>) -> Result<PositionFix, Box<dyn std::error::Error>> {
    match (lat, lon) {
        (Some(lat), Some(lon)) => Ok(PositionFix::Resolved(GeoPoint::new(lat.parse()?, lon.parse()?))),
        (Some(_), None) => Err("viewer latitude given without longitude".into()),
        _ => Ok(PositionFix::Unsupported),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().skip(1).collect();

    let config_manager = match env::var(CONFIG_ENV) {
        Ok(path) => ConfigurationManager::from_file(path)?,
        Err(_) => ConfigurationManager::new(),
    };
    let config = config_manager.config().clone();
    init_logging(config.debug_logging);

    let records = match args.first() {
        Some(path) => {
            let (records, malformed) = load_targets_json(&fs::read_to_string(path)?)?;
            for error in &malformed {
                warn!(%error, "skipping malformed target row");
            }
            records
        }
        None => {
            info!("no target file given, using built-in sample agents");
            sample_records()
        }
    };

    let (targets, rejected) = active_targets(records, config.default_display_radius_m);
    for error in &rejected {
        warn!(%error, "dropping target record");
    }

    let fix = parse_fix(args.get(1), args.get(2))?;
    let viewer = ViewerState::from_fix(fix, config.fallback_location);

    let mut session = LayoutSession::new(config_manager.build_engine()?);
    session.refresh_targets(targets);
    let outcome = session.update_viewer(viewer).clone();

    let report = PlacementReport::build(&outcome, session.targets());
    print!("{}", TextFormatter::new().format_text(&report));

    Ok(())
}
