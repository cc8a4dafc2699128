//! Lateral path planner host loop (§5.1).
//!
//! Stands in for "the periodic bus loop external to the core" (§5): reads
//! one simulated tick of inputs, calls [`LateralPlanner::update`], logs the
//! result, and sleeps the remainder of `DT_MDL`. No `SCHED_FIFO`/`mlockall`
//! machinery here — that belongs to hard-real-time motor control and has
//! no counterpart in a software-only lateral planner.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use lateral_planner::config::PlannerConfig;
use lateral_planner::planner::{LateralPlanner, PlannerInputs};
use lateral_planner::reference::{ReferenceLaneLines, ReferenceMpcSolver, ReferenceVehicleModel};
use planner_common::config::ConfigLoader;
use planner_common::consts::DT_MDL;
use planner_common::messages::{
    CarState, ControlsState, LanePrediction, LiveParameters, ModelMsg, Poly3, UpstreamLiveness,
};

/// Lateral path planner demo host.
#[derive(Debug, Parser)]
#[command(name = "lateral_planner", about = "Lateral path planner host loop")]
struct Args {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "lateral_planner.toml")]
    config: PathBuf,

    /// Number of ticks to run before exiting (0 = run forever).
    #[arg(long, default_value_t = 200)]
    ticks: u64,
}

fn simulated_inputs(tick: u64) -> PlannerInputs {
    let left_blinker = (200..800).contains(&tick);
    PlannerInputs {
        car_state: CarState {
            v_ego: 22.0,
            steering_angle: 0.0,
            steering_torque: 0,
            steering_pressed: false,
            left_blinker,
            right_blinker: false,
            left_blindspot: false,
            right_blindspot: false,
        },
        controls_state: ControlsState { active: true },
        live_parameters: LiveParameters {
            angle_offset: 0.0,
            stiffness_factor: 1.0,
            steer_ratio: 15.0,
            valid: true,
        },
        model: ModelMsg {
            left_lane: LanePrediction {
                poly: Poly3([1.85, 0.0, 0.0, 0.0]),
                prob: 1.0,
            },
            right_lane: LanePrediction {
                poly: Poly3([-1.85, 0.0, 0.0, 0.0]),
                prob: 1.0,
            },
            left_lane_change_prob: 0.0,
            right_lane_change_prob: 0.0,
            lane_width: 3.7,
        },
        liveness: UpstreamLiveness {
            car_state: true,
            controls_state: true,
            live_parameters: true,
            model: true,
        },
    }
}

fn build_planner(
    config: &PlannerConfig,
) -> LateralPlanner<ReferenceMpcSolver, ReferenceLaneLines, ReferenceVehicleModel> {
    LateralPlanner::new(
        ReferenceMpcSolver::new(20),
        ReferenceLaneLines::default(),
        ReferenceVehicleModel::default(),
        config,
        20,
    )
}

fn main() {
    let args = Args::parse();

    let config = match PlannerConfig::load(&args.config) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("failed to load config from {:?}: {err}", args.config);
            std::process::exit(1);
        }
    };
    if let Err(err) = config.validate() {
        eprintln!("invalid config: {err}");
        std::process::exit(1);
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(config.shared.log_level.as_filter_str()))
        .init();

    tracing::info!(service = %config.shared.service_name, "lateral planner starting");

    let mut planner = build_planner(&config);
    let period = Duration::from_secs_f64(DT_MDL);

    let mut tick: u64 = 0;
    loop {
        let tick_start = Instant::now();

        let inputs = simulated_inputs(tick);
        let (plan, error) = planner.update_checked(&inputs);

        if let Some(error) = error {
            tracing::warn!(?error, "tick completed with a recoverable solver condition");
        }
        tracing::debug!(
            tick,
            angle_steers = plan.angle_steers,
            rate_steers = plan.rate_steers,
            lane_change_state = ?plan.lane_change_state,
            desire = ?plan.desire,
            "tick complete"
        );
        if let Some(live_mpc) = planner.live_mpc() {
            tracing::debug!(
                tick,
                cost = live_mpc.cost,
                horizon = live_mpc.delta.len(),
                "liveMpc"
            );
        }

        tick += 1;
        if args.ticks != 0 && tick >= args.ticks {
            break;
        }

        let elapsed = tick_start.elapsed();
        if elapsed < period {
            std::thread::sleep(period - elapsed);
        }
    }

    tracing::info!(ticks = tick, "lateral planner exiting");
}
