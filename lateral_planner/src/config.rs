//! Planner configuration (§1.1, §5 "Shared resources").
//!
//! Lane-change enablement, the auto-start delay, and the actuator delay are
//! read once at construction and cached for the planner's whole lifetime —
//! changes to the parameter store take effect on the next construction, not
//! mid-run. Loaded the same way every binary in this workspace loads its
//! config: a TOML file via [`planner_common::config::ConfigLoader`].

use serde::Deserialize;

use planner_common::config::{ConfigError, ConfigLoader, SharedConfig};

/// Lateral-planner configuration, loaded once at process startup.
#[derive(Debug, Clone, Deserialize)]
pub struct PlannerConfig {
    /// Fields shared across every binary in this workspace.
    pub shared: SharedConfig,
    /// Whether the lane-change state machine may leave `Off`.
    #[serde(default = "default_lane_change_enabled")]
    pub lane_change_enabled: bool,
    /// Seconds to wait in `PreLaneChange` before auto-starting absent driver
    /// torque. `0.0` disables auto-start (torque is then required).
    #[serde(default)]
    pub lane_change_auto_delay: f64,
    /// Actuator delay compensated for before seeding the solver [s].
    #[serde(default = "default_steer_actuator_delay")]
    pub steer_actuator_delay: f64,
    /// MPC steer-rate cost weight.
    #[serde(default = "default_steer_rate_cost")]
    pub steer_rate_cost: f64,
}

fn default_lane_change_enabled() -> bool {
    true
}

fn default_steer_actuator_delay() -> f64 {
    0.2
}

fn default_steer_rate_cost() -> f64 {
    1.0
}

impl PlannerConfig {
    /// Validate the configuration, beyond what `serde` already enforces.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.shared.validate()?;
        if self.lane_change_auto_delay < 0.0 {
            return Err(ConfigError::ValidationError(
                "lane_change_auto_delay must be non-negative".to_string(),
            ));
        }
        if self.steer_actuator_delay < 0.0 {
            return Err(ConfigError::ValidationError(
                "steer_actuator_delay must be non-negative".to_string(),
            ));
        }
        if self.steer_rate_cost <= 0.0 {
            return Err(ConfigError::ValidationError(
                "steer_rate_cost must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use planner_common::config::LogLevel;

    fn valid_config() -> PlannerConfig {
        PlannerConfig {
            shared: SharedConfig {
                log_level: LogLevel::Info,
                service_name: "lateral_planner".to_string(),
            },
            lane_change_enabled: true,
            lane_change_auto_delay: 2.0,
            steer_actuator_delay: 0.2,
            steer_rate_cost: 1.0,
        }
    }

    #[test]
    fn valid_config_passes() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn negative_auto_delay_rejected() {
        let mut cfg = valid_config();
        cfg.lane_change_auto_delay = -1.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn zero_rate_cost_rejected() {
        let mut cfg = valid_config();
        cfg.steer_rate_cost = 0.0;
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn loads_from_toml_with_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("planner.toml");
        std::fs::write(
            &path,
            "lane_change_auto_delay = 1.5\n\n[shared]\nservice_name = \"lateral_planner\"\n",
        )
        .unwrap();
        let cfg = PlannerConfig::load(&path).unwrap();
        assert!(cfg.lane_change_enabled);
        assert_eq!(cfg.lane_change_auto_delay, 1.5);
        assert_eq!(cfg.steer_actuator_delay, 0.2);
    }
}
