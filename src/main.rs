use std::path::Path;
use std::time::Duration;

use bevy::app::ScheduleRunnerPlugin;
use bevy::log::LogPlugin;
use bevy::prelude::*;
use swarm_core::{Bounds, SimulationConfig};
use swarm_sim::{
    OrbitingPointer, PlacementOutput, PointerInput, RunLimits, SimulationPlugin, Swarm,
    VirtualDesktop,
};

/// Screen of the in-process desktop the headless run drives
const SCREEN: Bounds = Bounds {
    width: 1920.0,
    height: 1080.0,
};
const DESKTOP_SLOTS: usize = 48;

/// An absent frame limit runs forever; a malformed one is an error
fn parse_max_frames(arg: Option<&str>) -> Result<Option<u64>, String> {
    arg.map(|arg| {
        arg.parse::<u64>()
            .map_err(|err| format!("Invalid max_frames {arg:?}: {err}"))
    })
    .transpose()
}

/// Usage: `swarm [config.json] [max_frames]`
fn main() -> AppExit {
    let mut args = std::env::args().skip(1);
    let config_path = args.next();
    let max_frames = match parse_max_frames(args.next().as_deref()) {
        Ok(frames) => frames,
        Err(err) => {
            eprintln!("{err}");
            return AppExit::error();
        }
    };

    let config = match config_path.as_deref() {
        Some(path) => match SimulationConfig::load_json(Path::new(path)) {
            Ok(config) => config,
            Err(err) => {
                eprintln!("Failed to load config {path}: {err}");
                return AppExit::error();
            }
        },
        None => SimulationConfig::default(),
    };

    let mut app = App::new();
    app.add_plugins(
        MinimalPlugins.set(ScheduleRunnerPlugin::run_loop(Duration::from_secs_f32(
            config.dt,
        ))),
    )
    .add_plugins(LogPlugin::default());

    let mut desktop = VirtualDesktop::new(DESKTOP_SLOTS, SCREEN);
    let swarm = match Swarm::discover(config, &mut desktop) {
        Ok(swarm) => swarm,
        Err(err) => {
            error!("Cannot start simulation: {err}");
            return AppExit::error();
        }
    };

    app.insert_resource(swarm)
        .insert_resource(PointerInput::new(OrbitingPointer::new(
            SCREEN.center(),
            260.0,
            0.02,
        )))
        .insert_resource(PlacementOutput::new(desktop))
        .insert_resource(RunLimits {
            max_frames,
            ..default()
        })
        .add_plugins(SimulationPlugin)
        .run()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_frames_argument() {
        assert_eq!(parse_max_frames(None), Ok(None));
        assert_eq!(parse_max_frames(Some("120")), Ok(Some(120)));
        for bad in ["12x", "-5", ""] {
            assert!(parse_max_frames(Some(bad)).is_err(), "accepted {bad:?}");
        }
    }
}
