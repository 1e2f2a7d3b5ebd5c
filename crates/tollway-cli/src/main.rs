//! Tollway lane emulator binary.
//!
//! Wires a mock button panel and a mock beacon into the trigger manager,
//! feeds their events to a lane controller, and prints the virtual screen
//! after every change. Operator commands arrive on stdin.

mod cli;
mod command;
mod input;

use anyhow::Context;
use tollway_core::LaneConfig;
use tollway_lane::{LaneController, LaneOutcome, MockQrEncoder, VirtualScreen};
use tollway_triggers::devices::{AnyButtonPanel, AnyProximityService};
use tollway_triggers::mock::{MockBeacon, MockButtonPanel};
use tollway_triggers::{MonitoredRegion, MonitoringConfig, TriggerConfig, TriggerManager};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::command::{HELP, LaneCommand};

type Lane = LaneController<VirtualScreen, MockQrEncoder>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse_args();

    // Logs go to stderr so the screen on stdout stays readable
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();

    info!("Tollway v{}", tollway_core::VERSION);

    let config = match &cli.config {
        Some(path) => LaneConfig::load(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => LaneConfig::default(),
    };
    config.validate().context("invalid lane configuration")?;

    let region = MonitoredRegion::new(cli.region.clone(), &cli.region_uuid)
        .context("invalid beacon region")?;
    let mut manager = TriggerManager::new(TriggerConfig {
        proximity_enabled: !cli.no_beacon,
        monitoring: MonitoringConfig {
            region,
            scan_period: cli.scan_period(),
        },
        ..TriggerConfig::default()
    });

    let (panel, buttons) = MockButtonPanel::new();
    manager.register_button_panel(AnyButtonPanel::Mock(panel));

    let radio = if cli.no_beacon {
        None
    } else {
        let (beacon, radio) = MockBeacon::new();
        manager.register_proximity(AnyProximityService::Mock(beacon));
        Some(radio)
    };

    let mut triggers = manager.start();
    let mut lane = LaneController::new(config, VirtualScreen::new(cli.columns), MockQrEncoder::new());
    let mut lines = input::stdin_lines();

    println!("{HELP}");
    draw(&mut lane);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                info!("Received Ctrl+C, shutting down");
                break;
            }
            line = lines.recv() => {
                let Some(line) = line.transpose()? else { break };
                match line.parse::<LaneCommand>() {
                    Ok(LaneCommand::Quit) => break,
                    Ok(LaneCommand::Help) => println!("{HELP}"),
                    Ok(LaneCommand::Show) => draw(&mut lane),
                    Ok(LaneCommand::Press(button)) => buttons.press(button).await?,
                    Ok(LaneCommand::Cross(transition)) => match &radio {
                        Some(radio) => radio.cross(transition).await?,
                        None => warn!("Beacon is disabled, ignoring {:?}", transition),
                    },
                    Err(e) => println!("{e}"),
                }
            }
            event = triggers.recv() => {
                let Some(event) = event else { break };
                report(&lane.handle(event));
                draw(&mut lane);
            }
        }
    }

    triggers.shutdown().await?;
    info!("Lane stopped in state {}", lane.current_state());
    Ok(())
}

fn report(outcome: &LaneOutcome) {
    match outcome {
        LaneOutcome::Applied(transition) if transition.is_state_change() => {
            println!("{} -> {} ({})", transition.from, transition.to, transition.event);
        }
        LaneOutcome::Refused(e) => println!("refused: {e}"),
        LaneOutcome::PaymentResolved(outcome) => println!("payment: {}", outcome.answer),
        LaneOutcome::Applied(_) | LaneOutcome::Notice => {}
    }
}

fn draw(lane: &mut Lane) {
    let screen = lane.renderer_mut();
    screen.update();

    let border = format!("+{}+", "-".repeat(screen.columns()));
    println!("{border}");
    for line in screen.render_lines() {
        println!("|{line}|");
    }
    println!("{border}");
}
