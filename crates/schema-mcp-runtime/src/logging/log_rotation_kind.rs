use schemars::JsonSchema;
use serde::Deserialize;
use tracing_appender::rolling::Rotation;

/// How often a new log file is started
#[derive(Debug, Clone, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum LogRotationKind {
    Minutely,
    Hourly,
    Daily,
    Never,
}

impl From<LogRotationKind> for Rotation {
    fn from(value: LogRotationKind) -> Self {
        match value {
            LogRotationKind::Minutely => Rotation::MINUTELY,
            LogRotationKind::Hourly => Rotation::HOURLY,
            LogRotationKind::Daily => Rotation::DAILY,
            LogRotationKind::Never => Rotation::NEVER,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::LogRotationKind;
    use rstest::rstest;
    use tracing_appender::rolling::Rotation;

    #[rstest]
    #[case("minutely", LogRotationKind::Minutely, Rotation::MINUTELY)]
    #[case("hourly", LogRotationKind::Hourly, Rotation::HOURLY)]
    #[case("daily", LogRotationKind::Daily, Rotation::DAILY)]
    #[case("never", LogRotationKind::Never, Rotation::NEVER)]
    fn maps_yaml_values_to_rotations(
        #[case] yaml_value: &str,
        #[case] expected: LogRotationKind,
        #[case] rotation: Rotation,
    ) {
        let actual: LogRotationKind = serde_yaml::from_str(yaml_value).unwrap();
        assert_eq!(actual, expected);
        assert_eq!(Rotation::from(actual), rotation);
    }

    #[test]
    fn rejects_unknown_rotations() {
        let result: Result<LogRotationKind, _> = serde_yaml::from_str("weekly");
        assert!(
            result
                .unwrap_err()
                .to_string()
                .contains("unknown variant")
        );
    }
}
