//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.
//! They are deserialized directly and converted into application config by
//! [`FileConfig::surface_config`] and [`FileConfig::field_of_play_config`].

mod audio;
mod log;
mod surface;
mod timing;

pub use audio::{AUDIBLE_RANGE_HZ, FileAudioConfig};
pub use log::FileLogConfig;
pub use surface::FileSurfaceConfig;
pub use timing::FileTimingConfig;

use refbox_application::config::{FieldOfPlayConfig, SurfaceConfig};
use refbox_domain::SurfaceId;
use refbox_domain::config::{ConfigIssue, ConfigIssueCode};
use serde::{Deserialize, Serialize};

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Display orientation, role and arming
    pub surface: FileSurfaceConfig,
    /// Down-signal cue
    pub audio: FileAudioConfig,
    /// Auto-hide and reveal delays
    pub timing: FileTimingConfig,
    /// Vote report log
    pub log: FileLogConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.timing.down_display_ms == 0 {
            issues.push(ConfigIssue::error(
                ConfigIssueCode::ZeroDuration {
                    field: "timing.down_display_ms".to_string(),
                },
                "timing.down_display_ms: the down arrow would never be visible",
            ));
        }

        if self.timing.decision_reveal_ms == 0 {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::ZeroDuration {
                    field: "timing.decision_reveal_ms".to_string(),
                },
                "timing.decision_reveal_ms is 0, boards will show the decision with the down signal",
            ));
        }

        if self.audio.enabled {
            if self.audio.duration_ms == 0 {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::ZeroDuration {
                        field: "audio.duration_ms".to_string(),
                    },
                    "audio.duration_ms is 0, the down cue will be silent",
                ));
            }
            if !AUDIBLE_RANGE_HZ.contains(&self.audio.frequency_hz) {
                issues.push(ConfigIssue::warning(
                    ConfigIssueCode::InaudibleFrequency {
                        value: self.audio.frequency_hz,
                    },
                    format!(
                        "audio.frequency_hz: {} Hz is outside {}..={} Hz",
                        self.audio.frequency_hz,
                        AUDIBLE_RANGE_HZ.start(),
                        AUDIBLE_RANGE_HZ.end()
                    ),
                ));
            }
        }

        if self.surface.jury && self.surface.enabled {
            issues.push(ConfigIssue::warning(
                ConfigIssueCode::JuryArmed,
                "surface.enabled has no effect on a jury console",
            ));
        }

        issues
    }

    /// Build the configuration of the surface described by `[surface]`.
    pub fn surface_config(&self, id: SurfaceId) -> SurfaceConfig {
        let mut config = SurfaceConfig::new(id)
            .armed(self.surface.enabled)
            .with_down_display(self.timing.down_display());
        if !self.surface.public_facing {
            config = config.athlete_facing();
        }
        if self.surface.jury {
            config = config.jury();
        }
        if !self.audio.enabled {
            config = config.without_audio();
        }
        config
    }

    pub fn field_of_play_config(&self) -> FieldOfPlayConfig {
        FieldOfPlayConfig {
            decision_reveal: self.timing.decision_reveal(),
            emit_sounds_on_server: self.audio.emit_on_server,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use refbox_domain::DisplayOrientation;
    use refbox_domain::config::Severity;
    use std::time::Duration;

    #[test]
    fn test_deserialize_full_config() {
        let toml_str = r#"
[surface]
public_facing = false
jury = false
enabled = false

[audio]
enabled = true
emit_on_server = true
frequency_hz = 880
duration_ms = 250

[timing]
down_display_ms = 1500
decision_reveal_ms = 4000

[log]
vote_report_file = "/var/log/refbox/votes.jsonl"
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert!(!config.surface.public_facing);
        assert!(!config.surface.enabled);
        assert!(config.audio.emit_on_server);
        assert_eq!(config.audio.frequency_hz, 880);
        assert_eq!(config.audio.duration(), Duration::from_millis(250));
        assert_eq!(config.timing.down_display(), Duration::from_millis(1500));
        assert_eq!(config.timing.decision_reveal(), Duration::from_millis(4000));
        assert_eq!(
            config.log.vote_report_file.as_deref(),
            Some(std::path::Path::new("/var/log/refbox/votes.jsonl"))
        );
    }

    #[test]
    fn test_deserialize_partial_config() {
        let toml_str = r#"
[timing]
down_display_ms = 1000
"#;

        let config: FileConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.timing.down_display_ms, 1000);
        // Defaults should apply
        assert_eq!(config.timing.decision_reveal_ms, 3000);
        assert!(config.surface.public_facing);
        assert!(config.audio.enabled);
        assert!(config.log.vote_report_file.is_none());
    }

    #[test]
    fn test_validate_valid_config() {
        let config = FileConfig::default();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_validate_reports_every_issue() {
        let mut config = FileConfig::default();
        config.timing.down_display_ms = 0;
        config.audio.frequency_hz = 5;
        config.surface.jury = true;

        let issues = config.validate();
        assert_eq!(issues.len(), 3);
        assert!(issues[0].is_error());
        assert!(matches!(
            issues[1].code,
            ConfigIssueCode::InaudibleFrequency { value: 5 }
        ));
        assert_eq!(issues[2].severity, Severity::Warning);
        assert_eq!(issues[2].code, ConfigIssueCode::JuryArmed);
    }

    #[test]
    fn test_audio_checks_skipped_when_disabled() {
        let mut config = FileConfig::default();
        config.audio.enabled = false;
        config.audio.duration_ms = 0;
        config.audio.frequency_hz = 0;
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_surface_config_conversion() {
        let mut config = FileConfig::default();
        config.surface.public_facing = false;
        config.audio.enabled = false;
        config.timing.down_display_ms = 750;

        let surface = config.surface_config(SurfaceId(4));
        assert_eq!(surface.id, SurfaceId(4));
        assert_eq!(surface.orientation(), DisplayOrientation::AthleteFacing);
        assert!(!surface.audio_enabled);
        assert!(surface.enabled);
        assert_eq!(surface.down_display, Duration::from_millis(750));
    }

    #[test]
    fn test_field_of_play_conversion() {
        let mut config = FileConfig::default();
        config.audio.emit_on_server = true;
        let fop = config.field_of_play_config();
        assert!(fop.emit_sounds_on_server);
        assert_eq!(fop.decision_reveal, Duration::from_millis(3000));
    }
}
