//! Settings layering contracts
//!
//! A key present on disk is never overwritten with its default. A key
//! absent on disk receives the default and a comment built from the
//! setting's description. Comments on untouched keys survive.

use std::fs;

use marginalia::{
    Comment, ConfigError, ConfigResult, ConfigSetting, KeyPath, LayerState, SettingsContext,
    SettingsExtension, SettingsLayer, YamlDocument,
};
use tempfile::tempdir;

use crate::common::*;

#[derive(Default)]
struct HomesPlugin {
    max_homes: Option<ConfigSetting>,
    cooldown: Option<ConfigSetting>,
}

impl SettingsExtension for HomesPlugin {
    fn load_settings(&mut self, ctx: &mut SettingsContext) -> ConfigResult<()> {
        self.max_homes = Some(ConfigSetting::new(
            ctx,
            "Homes.Max",
            3,
            Comment::new(["Maximum number of homes per player"]),
        )?);
        self.cooldown = Some(ConfigSetting::new(
            ctx,
            "Homes.Cooldown",
            30,
            Comment::new(["Seconds between teleports"]),
        )?);
        Ok(())
    }
}

fn key(path: &str) -> KeyPath {
    KeyPath::parse(path).unwrap()
}

#[test]
fn contract_empty_file_gets_defaults_with_comments() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yml");
    let mut plugin = HomesPlugin::default();
    let mut layer = SettingsLayer::new();

    let outcome = layer
        .load_settings(Box::new(YamlDocument::new(&path)), &mut plugin)
        .unwrap();

    assert!(outcome.is_persisted());
    assert_eq!(layer.state(), LayerState::Persisted);
    assert_eq!(layer.builtins().unwrap().locale(), "en_US");
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "\
Settings:
  # The language file to use for the plugin
  # More language files (if available) can be found in the plugins locale folder.
  Locale: en_US
Homes:
  # Maximum number of homes per player
  Max: 3
  # Seconds between teleports
  Cooldown: 30
"
    );
}

#[test]
fn contract_present_keys_are_never_overwritten() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yml");
    fs::write(&path, COMMENTED_CONFIG).unwrap();
    let mut plugin = HomesPlugin::default();
    let mut layer = SettingsLayer::new();

    layer
        .load_settings(Box::new(YamlDocument::new(&path)), &mut plugin)
        .unwrap();

    assert_eq!(layer.builtins().unwrap().locale(), "de_DE");
    assert_eq!(plugin.max_homes.unwrap().as_i64(), Some(5));
    assert_eq!(plugin.cooldown.unwrap().as_i64(), Some(30));

    let ctx = layer.context().unwrap();
    assert_eq!(
        ctx.document().comment(&key("Homes")).unwrap().lines(),
        ["Maximum number of homes per player"]
    );
    assert_eq!(
        ctx.document().comment(&key("Homes.Cooldown")).unwrap().lines(),
        ["Seconds between teleports"]
    );
}

#[test]
fn contract_untouched_comments_survive_persist() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yml");
    fs::write(&path, COMMENTED_CONFIG).unwrap();

    SettingsLayer::new()
        .load_settings(
            Box::new(YamlDocument::new(&path)),
            &mut marginalia::BuiltinsOnly,
        )
        .unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), COMMENTED_CONFIG);
}

#[test]
fn contract_template_is_copied_on_first_run() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yml");
    let template = "# Shipped with the plugin\nSettings:\n  Locale: fr_FR\n";
    let mut layer = SettingsLayer::new();

    layer
        .load_settings(
            Box::new(YamlDocument::new(&path).with_template(template)),
            &mut marginalia::BuiltinsOnly,
        )
        .unwrap();

    assert_eq!(layer.builtins().unwrap().locale(), "fr_FR");
    assert_eq!(fs::read_to_string(&path).unwrap(), template);
}

#[test]
fn contract_load_failure_aborts() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yml");
    fs::write(&path, "Settings:\n  Locale en_US\n").unwrap();
    let mut plugin = HomesPlugin::default();
    let mut layer = SettingsLayer::new();

    let err = layer
        .load_settings(Box::new(YamlDocument::new(&path)), &mut plugin)
        .unwrap_err();

    assert!(err.is_format_error());
    assert_eq!(layer.state(), LayerState::Bound);
    assert!(plugin.max_homes.is_none());
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "Settings:\n  Locale en_US\n"
    );
}

#[test]
fn contract_operator_value_blocking_a_default_is_an_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.yml");
    fs::write(&path, "# Mine\nSettings: keep-me\n").unwrap();
    let mut layer = SettingsLayer::new();

    let err = layer
        .load_settings(
            Box::new(YamlDocument::new(&path)),
            &mut marginalia::BuiltinsOnly,
        )
        .unwrap_err();

    match err {
        ConfigError::Coercion { key, .. } => assert_eq!(key, "Settings"),
        other => panic!("unexpected error: {other}"),
    }
    assert_eq!(layer.state(), LayerState::Bound);
    assert_eq!(
        fs::read_to_string(&path).unwrap(),
        "# Mine\nSettings: keep-me\n"
    );
}
