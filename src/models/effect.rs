use serde::Serialize;

use crate::error::AppError;

pub const MAX_CYCLES: f64 = 1000.0;
pub const MAX_PERIOD_SECS: f64 = 3600.0;
/// Longest transition the API accepts (100 years).
pub const MAX_DURATION_SECS: f64 = 3_155_760_000.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WaveformKind {
    Breathe,
    Pulse,
}

impl WaveformKind {
    pub fn path(&self) -> &'static str {
        match self {
            WaveformKind::Breathe => "breathe",
            WaveformKind::Pulse => "pulse",
        }
    }
}

/// Parameters of a breathe or pulse effect. Absent fields are omitted from
/// the request so the API applies its own defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EffectParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub from_color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cycles: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub peak: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub persist: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power_on: Option<bool>,
}

impl EffectParams {
    /// Field-level merge: a value set on `self` wins, otherwise the value
    /// from `defaults` is kept.
    pub fn overlay(self, defaults: EffectParams) -> EffectParams {
        EffectParams {
            color: self.color.or(defaults.color),
            from_color: self.from_color.or(defaults.from_color),
            period: self.period.or(defaults.period),
            cycles: self.cycles.or(defaults.cycles),
            peak: self.peak.or(defaults.peak),
            persist: self.persist.or(defaults.persist),
            power_on: self.power_on.or(defaults.power_on),
        }
    }

    pub fn validate(&self, kind: WaveformKind) -> Result<(), AppError> {
        match self.color.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => {}
            _ => {
                return Err(AppError::validation(format!(
                    "color is required for the {} effect",
                    kind.path()
                )))
            }
        }
        if let Some(from) = &self.from_color {
            if from.trim().is_empty() {
                return Err(AppError::validation("from_color must not be empty"));
            }
        }
        if let Some(period) = self.period {
            check_positive("period", period, MAX_PERIOD_SECS)?;
        }
        if let Some(cycles) = self.cycles {
            check_positive("cycles", cycles, MAX_CYCLES)?;
        }
        if let Some(peak) = self.peak {
            if kind == WaveformKind::Pulse {
                return Err(AppError::validation(
                    "peak is only supported by the breathe effect",
                ));
            }
            check_unit("peak", peak)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Power {
    On,
    Off,
}

/// Body of a set-state request.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct StateChange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub power: Option<Power>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brightness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub infrared: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fast: Option<bool>,
}

impl StateChange {
    pub fn is_empty(&self) -> bool {
        *self == StateChange::default()
    }

    pub fn validate(&self) -> Result<(), AppError> {
        if self.is_empty() {
            return Err(AppError::validation("No state fields were provided."));
        }
        if let Some(color) = &self.color {
            if color.trim().is_empty() {
                return Err(AppError::validation("color must not be empty"));
            }
        }
        if let Some(brightness) = self.brightness {
            check_unit("brightness", brightness)?;
        }
        if let Some(infrared) = self.infrared {
            check_unit("infrared", infrared)?;
        }
        if let Some(duration) = self.duration {
            check_duration(duration)?;
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TogglePower {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
}

impl TogglePower {
    pub fn validate(&self) -> Result<(), AppError> {
        match self.duration {
            Some(duration) => check_duration(duration),
            None => Ok(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SceneActivation {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fast: Option<bool>,
}

impl SceneActivation {
    pub fn validate(&self) -> Result<(), AppError> {
        match self.duration {
            Some(duration) => check_duration(duration),
            None => Ok(()),
        }
    }
}

fn check_positive(field: &str, value: f64, max: f64) -> Result<(), AppError> {
    if !value.is_finite() || value <= 0.0 || value > max {
        return Err(AppError::validation(format!(
            "{} must be greater than 0 and at most {}, got {}",
            field, max, value
        )));
    }
    Ok(())
}

fn check_unit(field: &str, value: f64) -> Result<(), AppError> {
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(AppError::validation(format!(
            "{} must be between 0.0 and 1.0, got {}",
            field, value
        )));
    }
    Ok(())
}

fn check_duration(value: f64) -> Result<(), AppError> {
    if !value.is_finite() || value < 0.0 || value > MAX_DURATION_SECS {
        return Err(AppError::validation(format!(
            "duration must be between 0 and {} seconds, got {}",
            MAX_DURATION_SECS, value
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> EffectParams {
        EffectParams {
            color: Some("red".into()),
            ..Default::default()
        }
    }

    #[test]
    fn test_overlay_explicit_value_wins() {
        let defaults = EffectParams {
            color: Some("red".into()),
            cycles: Some(10.0),
            period: Some(0.7),
            ..Default::default()
        };
        let overrides = EffectParams {
            color: Some("purple".into()),
            ..Default::default()
        };
        let merged = overrides.overlay(defaults);
        assert_eq!(merged.color.as_deref(), Some("purple"));
        assert_eq!(merged.cycles, Some(10.0));
        assert_eq!(merged.period, Some(0.7));
        assert_eq!(merged.peak, None);
    }

    #[test]
    fn test_overlay_over_empty_defaults_is_identity() {
        let params = EffectParams {
            color: Some("blue".into()),
            cycles: Some(2.0),
            persist: Some(true),
            ..Default::default()
        };
        assert_eq!(params.clone().overlay(EffectParams::default()), params);
    }

    #[test]
    fn test_effect_requires_color() {
        let err = EffectParams::default()
            .validate(WaveformKind::Breathe)
            .unwrap_err();
        assert!(err.to_string().contains("color is required"));
    }

    #[test]
    fn test_effect_rejects_bad_cycles_and_period() {
        for cycles in [0.0, -1.0, f64::NAN, f64::INFINITY, MAX_CYCLES + 1.0] {
            let params = EffectParams {
                cycles: Some(cycles),
                ..red()
            };
            assert!(params.validate(WaveformKind::Pulse).is_err(), "cycles={cycles}");
        }
        for period in [0.0, -0.5, f64::NAN, MAX_PERIOD_SECS * 2.0] {
            let params = EffectParams {
                period: Some(period),
                ..red()
            };
            assert!(params.validate(WaveformKind::Breathe).is_err(), "period={period}");
        }
        let ok = EffectParams {
            period: Some(1.5),
            cycles: Some(5.0),
            ..red()
        };
        assert!(ok.validate(WaveformKind::Breathe).is_ok());
    }

    #[test]
    fn test_peak_only_for_breathe() {
        let params = EffectParams {
            peak: Some(0.5),
            ..red()
        };
        assert!(params.validate(WaveformKind::Breathe).is_ok());
        assert!(params.validate(WaveformKind::Pulse).is_err());
        let out_of_range = EffectParams {
            peak: Some(1.5),
            ..red()
        };
        assert!(out_of_range.validate(WaveformKind::Breathe).is_err());
    }

    #[test]
    fn test_state_change_requires_a_field() {
        let err = StateChange::default().validate().unwrap_err();
        assert_eq!(err.kind(), "validation");
        let change = StateChange {
            fast: Some(true),
            ..Default::default()
        };
        assert!(change.validate().is_ok());
    }

    #[test]
    fn test_state_change_ranges() {
        let bright = StateChange {
            brightness: Some(1.2),
            ..Default::default()
        };
        assert!(bright.validate().is_err());
        let infrared = StateChange {
            infrared: Some(-0.1),
            ..Default::default()
        };
        assert!(infrared.validate().is_err());
        let duration = StateChange {
            power: Some(Power::On),
            duration: Some(-3.0),
            ..Default::default()
        };
        assert!(duration.validate().is_err());
        let ok = StateChange {
            power: Some(Power::Off),
            brightness: Some(0.0),
            infrared: Some(1.0),
            ..Default::default()
        };
        assert!(ok.validate().is_ok());
    }

    #[test]
    fn test_state_change_serializes_only_present_fields() {
        let change = StateChange {
            power: Some(Power::On),
            brightness: Some(0.5),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&change).unwrap(),
            serde_json::json!({"power": "on", "brightness": 0.5})
        );
    }

    #[test]
    fn test_toggle_and_scene_durations() {
        assert!(TogglePower::default().validate().is_ok());
        assert!(TogglePower { duration: Some(f64::NAN) }.validate().is_err());
        assert!(SceneActivation {
            duration: Some(2.0),
            fast: Some(false)
        }
        .validate()
        .is_ok());
        assert!(SceneActivation {
            duration: Some(-2.0),
            fast: None
        }
        .validate()
        .is_err());
    }
}
