//! rgb-ambientd entrypoint: discover devices, spread initial colors, animate forever.

use anyhow::Context;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use rgb_ambient::{
    AnimationDriver, AppConfig, DeviceConfig, LightDevice, LogDevice, SleepPacer,
    discover_sysfs_devices, generate_spread_colors,
};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load().context("loading configuration")?;
    let devices = open_devices(&config.devices)?;

    let distance = config.spread.resolve(devices.len());
    let colors = generate_spread_colors(devices.len(), Some(distance));
    let schedule = config.build_schedule().context("building schedule")?;
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };

    info!(
        devices = devices.len(),
        distance,
        entries = schedule.len(),
        steps_per_cycle = schedule.steps_per_cycle(),
        "starting animation"
    );

    let mut driver = AnimationDriver::new(devices, colors, schedule, rng, SleepPacer)
        .with_context(|| format!("setting up animation driver for {:?}", config.devices))?;
    if let Err(err) = driver.run() {
        error!(error = %err, "animation aborted");
        return Err(err).context("running animation");
    }
    Ok(())
}

/// Opens the configured device set.
fn open_devices(config: &DeviceConfig) -> anyhow::Result<Vec<Box<dyn LightDevice>>> {
    let devices: Vec<Box<dyn LightDevice>> = match config {
        DeviceConfig::Sysfs { root } => discover_sysfs_devices(root)
            .with_context(|| format!("discovering devices under {}", root.display()))?
            .into_iter()
            .map(|d| Box::new(d) as Box<dyn LightDevice>)
            .collect(),
        DeviceConfig::Log { count } => (0..*count)
            .map(|i| Box::new(LogDevice::new(format!("log-{i}"))) as Box<dyn LightDevice>)
            .collect(),
    };
    Ok(devices)
}

/// Configure tracing from `RUST_LOG`, defaulting to `info`.
fn init_tracing() {
    let env_filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
