use std::path::Path;

use bevy::log::{Level, LogPlugin};
use bevy::prelude::*;

use rts_camera::world::DemoWorldPlugin;
use rts_camera::{RtsCameraPlugin, RtsCameraSettings};

const WINDOW_TITLE: &str = "RTS Camera Demo";
const WINDOW_WIDTH: f32 = 1600.0;
const WINDOW_HEIGHT: f32 = 900.0;
const SETTINGS_PATH: &str = "config/rts_camera.toml";

#[cfg(rts_camera_log = "warn")]
const LOG_LEVEL: Level = Level::WARN;
#[cfg(rts_camera_log = "info")]
const LOG_LEVEL: Level = Level::INFO;
#[cfg(not(any(rts_camera_log = "warn", rts_camera_log = "info")))]
const LOG_LEVEL: Level = Level::DEBUG;

#[cfg(feature = "logging")]
mod flame {
    use std::fs::File;
    use std::io::BufWriter;

    use bevy::log::BoxedLayer;
    use bevy::prelude::*;
    use bevy::utils::synccell::SyncCell;
    use tracing_flame::{FlameLayer, FlushGuard};
    use tracing_subscriber::{Layer, Registry};

    /// Set to a file path to record a flame graph of the run.
    pub const FLAME_ENV: &str = "RTS_CAMERA_FLAME";

    /// Keeps the flame output flushed until the app exits.
    #[derive(Resource)]
    struct FlameGuard(#[allow(dead_code)] SyncCell<FlushGuard<BufWriter<File>>>);

    pub fn flame_layer(app: &mut App) -> Option<BoxedLayer> {
        let path = std::env::var(FLAME_ENV).ok()?;
        match FlameLayer::<Registry, _>::with_file(&path) {
            Ok((layer, guard)) => {
                app.insert_resource(FlameGuard(SyncCell::new(guard)));
                Some(layer.boxed())
            }
            Err(err) => {
                eprintln!("Could not open flame output {}: {}", path, err);
                None
            }
        }
    }
}

fn log_plugin() -> LogPlugin {
    LogPlugin {
        level: LOG_LEVEL,
        filter: "wgpu=error,naga=warn".to_string(),
        #[cfg(feature = "logging")]
        custom_layer: flame::flame_layer,
        ..default()
    }
}

/// Settings from the demo's TOML file, or the defaults and the reason they
/// were used. Logging isn't up until the app is built, so the reason is
/// reported from a startup system.
fn load_settings() -> (RtsCameraSettings, Option<String>) {
    let path = Path::new(SETTINGS_PATH);
    if !path.exists() {
        return (
            RtsCameraSettings::default(),
            Some(format!("{} not found, using default camera settings", SETTINGS_PATH)),
        );
    }
    match RtsCameraSettings::load(path) {
        Ok(settings) => (settings, None),
        Err(err) => (
            RtsCameraSettings::default(),
            Some(format!("Ignoring {}: {}", SETTINGS_PATH, err)),
        ),
    }
}

fn main() {
    let (settings, fallback) = load_settings();

    App::new()
        .add_plugins((
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: WINDOW_TITLE.into(),
                        resolution: (WINDOW_WIDTH, WINDOW_HEIGHT).into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(log_plugin()),
            RtsCameraPlugin { settings },
            DemoWorldPlugin,
        ))
        .add_systems(Startup, move || {
            match &fallback {
                Some(reason) => warn!("{}", reason),
                None => info!("Loaded camera settings from {}", SETTINGS_PATH),
            }
        })
        .run();
}
