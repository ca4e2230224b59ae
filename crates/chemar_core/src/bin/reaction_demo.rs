//! # Reaction Demo
//!
//! Headless run of the CO2 scenario against recording collaborators.
//!
//! ```text
//! reaction_demo [scene.toml]
//! RUST_LOG=chemar_core=debug reaction_demo
//! ```

use chemar_core::{
    ChemarResult, OrbitAnimator, ReactionScene, SceneConfig, SceneEvent, SceneEventBus, SceneHost,
    SceneRecorder,
};
use chemar_shared::{MarkerEvent, Pose, Quaternion, TrackingState, Vec3};
use tracing_subscriber::filter::EnvFilter;

fn main() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    if let Err(err) = run() {
        tracing::error!("Demo failed: {}", err);
        std::process::exit(1);
    }
}

fn run() -> ChemarResult<()> {
    let config = match std::env::args().nth(1) {
        Some(path) => SceneConfig::from_file(path)?,
        None => SceneConfig::default(),
    };

    let bus = SceneEventBus::new(config.bus_capacity);
    let ui = bus.receiver();
    let recorder = SceneRecorder::new();
    let host = SceneHost {
        factory: Box::new(recorder.clone()),
        spawner: Box::new(recorder.clone()),
        sink: Box::new(bus.sender()),
        audio: Box::new(bus.sender()),
    };
    let mut orbit = OrbitAnimator::from_config(&config);
    let mut scene = ReactionScene::new(config, host)?;

    // Cards lying flat on a table, 15 cm apart
    let card = |x: f32| Pose::new(Vec3::new(x, 0.0, -0.5), Quaternion::IDENTITY);

    let frames = [
        vec![
            MarkerEvent::added("card-c", "Carbon", card(0.0)),
            MarkerEvent::added("card-h", "Hydrogen", card(0.45)),
            MarkerEvent::added("card-x", "Uranium", card(0.6)),
        ],
        vec![MarkerEvent::added("card-o1", "Oxygen1", card(-0.15))],
        vec![
            MarkerEvent::added("card-o2", "Oxygen2", card(0.15)),
            MarkerEvent::updated("card-o1", "Oxygen1", card(-0.15), TrackingState::NotTracking),
        ],
        vec![MarkerEvent::updated("card-o1", "Oxygen1", card(-0.16), TrackingState::Tracking)],
    ];

    for (index, frame) in frames.iter().enumerate() {
        scene.handle_batch(frame);
        let yaw = orbit.advance(1.0 / 30.0);
        tracing::info!(
            "Frame {}: {} atoms ({} visible), ready={}, orbit yaw {:.1}",
            index,
            scene.synchronizer().len(),
            scene.synchronizer().visible_count(),
            scene.is_ready(),
            yaw
        );
        for event in ui.drain() {
            match event {
                SceneEvent::ReadinessChanged { ready } => {
                    tracing::info!("React button {}", if ready { "enabled" } else { "disabled" });
                }
                SceneEvent::ReactionPerformed => tracing::info!("*fizz*"),
            }
        }
    }

    let outcome = scene.trigger()?;
    tracing::info!(
        "Reaction consumed {} atoms, product at ({:.3}, {:.3}, {:.3})",
        outcome.consumed.len(),
        outcome.anchor.position.x,
        outcome.anchor.position.y,
        outcome.anchor.position.z
    );
    for event in ui.drain() {
        tracing::info!("UI event: {:?}", event);
    }

    if let Err(err) = scene.trigger() {
        tracing::info!("Second trigger rejected as expected: {}", err);
    }

    tracing::info!("Stats: {:?}", scene.stats());
    tracing::info!("Products spawned: {}", recorder.products().len());
    Ok(())
}
