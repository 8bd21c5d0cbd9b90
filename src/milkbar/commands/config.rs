use crate::commands::{CmdMessage, CmdResult};
use crate::config::MilkbarConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(config_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    match action {
        ConfigAction::ShowAll => {
            let config = MilkbarConfig::load(config_dir)?;
            Ok(CmdResult::default().with_config(config))
        }
        ConfigAction::ShowKey(key) => {
            let config = MilkbarConfig::load(config_dir)?;
            let mut result = CmdResult::default();
            match config.get(&key) {
                Some(val) => {
                    result.add_message(CmdMessage::info(val));
                    Ok(result)
                }
                None => {
                    result.add_message(CmdMessage::error(format!("Unknown config key: {}", key)));
                    Ok(result)
                }
            }
        }
        ConfigAction::Set(key, value) => {
            let mut config = MilkbarConfig::load(config_dir)?;
            if let Err(e) = config.set(&key, &value) {
                let mut res = CmdResult::default();
                res.add_message(CmdMessage::error(e));
                return Ok(res);
            }
            config.save(config_dir)?;
            let mut result = CmdResult::default().with_config(config.clone());
            let display_val = config.get(&key).unwrap_or(value);
            result.add_message(CmdMessage::success(format!(
                "{} set to {}",
                key, display_val
            )));
            Ok(result)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn show_all_returns_defaults_when_unset() {
        let dir = tempdir().unwrap();
        let result = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(result.config, Some(MilkbarConfig::default()));
    }

    #[test]
    fn set_then_show_key() {
        let dir = tempdir().unwrap();
        run(
            dir.path(),
            ConfigAction::Set("low-stock-threshold".into(), "5".into()),
        )
        .unwrap();

        let result = run(dir.path(), ConfigAction::ShowKey("low-stock-threshold".into())).unwrap();
        assert_eq!(result.messages[0].content, "5");
    }

    #[test]
    fn unknown_key_reports_error_message() {
        let dir = tempdir().unwrap();
        let result = run(dir.path(), ConfigAction::ShowKey("volume".into())).unwrap();
        assert!(result.messages[0].content.contains("Unknown config key"));
    }
}
