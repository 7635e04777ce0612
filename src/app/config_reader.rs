use crate::app::*;

use std::time::Duration;

use serde::{Deserialize, Serialize};

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct InputSource {
    /// One of `csv`, `xlsx` or `text`.
    pub provider: String,
    #[serde(rename = "filePath")]
    pub file_path: Option<String>,
    /// The names themselves, for the `text` provider.
    pub names: Option<String>,
    #[serde(rename = "excelWorksheetName")]
    pub excel_worksheet_name: Option<String>,
}

impl InputSource {
    pub fn text(names: &str) -> InputSource {
        InputSource {
            provider: "text".to_string(),
            file_path: None,
            names: Some(names.to_string()),
            excel_worksheet_name: None,
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct LotteryConfig {
    #[serde(rename = "allowRepeats")]
    pub allow_repeats: Option<bool>,
    pub draws: Option<u32>,
    #[serde(rename = "animationFrames")]
    pub animation_frames: Option<u32>,
    #[serde(rename = "frameIntervalMs")]
    pub frame_interval_ms: Option<u64>,
}

impl LotteryConfig {
    pub fn settings(&self) -> LotterySettings {
        let default = LotterySettings::DEFAULT_SETTINGS;
        LotterySettings {
            allow_repeats: self.allow_repeats.unwrap_or(default.allow_repeats),
            animation_frames: self.animation_frames.unwrap_or(default.animation_frames),
            frame_interval: self
                .frame_interval_ms
                .map(Duration::from_millis)
                .unwrap_or(default.frame_interval),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Default, Serialize, Deserialize)]
pub struct GroupingConfig {
    /// A number or a string.
    #[serde(rename = "groupSize")]
    _group_size: Option<JSValue>,
}

impl GroupingConfig {
    pub fn group_size(&self) -> AppResult<usize> {
        match &self._group_size {
            None => Ok(GroupingSettings::DEFAULT_SETTINGS.group_size),
            Some(JSValue::Number(n)) => match n.as_u64() {
                Some(x) if x >= 1 => Ok(x as usize),
                _ => Err(DrawError::InvalidGroupSize {
                    input: n.to_string(),
                })
                .context(CoreSnafu {}),
            },
            Some(JSValue::String(s)) => parse_group_size(s).context(CoreSnafu {}),
            Some(x) => Err(DrawError::InvalidGroupSize {
                input: x.to_string(),
            })
            .context(CoreSnafu {}),
        }
    }
}

#[derive(Eq, PartialEq, Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub inputs: Vec<InputSource>,
    #[serde(rename = "removeDuplicates")]
    pub remove_duplicates: Option<bool>,
    #[serde(default)]
    pub lottery: LotteryConfig,
    #[serde(default)]
    pub grouping: GroupingConfig,
}

pub fn read_config(path: &str) -> AppResult<AppConfig> {
    let contents = fs::read_to_string(path).context(OpeningJsonSnafu { path })?;
    debug!("read_config: content: {:?}", contents);
    let config: AppConfig = serde_json::from_str(contents.as_str()).context(ParsingJsonSnafu {})?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(s: &str) -> AppConfig {
        serde_json::from_str(s).unwrap()
    }

    #[test]
    fn minimal_config() {
        let config = parse("{}");
        assert!(config.inputs.is_empty());
        assert_eq!(config.lottery.settings(), LotterySettings::DEFAULT_SETTINGS);
        assert_eq!(config.grouping.group_size().unwrap(), 4);
    }

    #[test]
    fn lottery_settings() {
        let config = parse(r#"{"lottery": {"allowRepeats": true, "animationFrames": 5, "frameIntervalMs": 10}}"#);
        let settings = config.lottery.settings();
        assert!(settings.allow_repeats);
        assert_eq!(settings.animation_frames, 5);
        assert_eq!(settings.frame_interval, Duration::from_millis(10));
    }

    #[test]
    fn group_size_forms() {
        assert_eq!(parse(r#"{"grouping": {"groupSize": 3}}"#).grouping.group_size().unwrap(), 3);
        assert_eq!(parse(r#"{"grouping": {"groupSize": "5"}}"#).grouping.group_size().unwrap(), 5);
        assert!(parse(r#"{"grouping": {"groupSize": 0}}"#).grouping.group_size().is_err());
        assert!(parse(r#"{"grouping": {"groupSize": -1}}"#).grouping.group_size().is_err());
        assert!(parse(r#"{"grouping": {"groupSize": "many"}}"#).grouping.group_size().is_err());
    }

    #[test]
    fn missing_file() {
        assert!(matches!(
            read_config("/nonexistent/luckydraw.json"),
            Err(AppError::OpeningJson { .. })
        ));
    }
}
