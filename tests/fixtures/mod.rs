//! Shared test fixtures for end-to-end tests.
#![allow(dead_code)] // Not every test binary uses every fixture

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::Arc;

use tempfile::TempDir;
use trime_config::prefs::PreferenceFile;
use trime_config::store::{ResourceDirs, YamlThemeStore};
use trime_config::Config;

/// The stock theme: every resolution feature in one document.
pub const TRIME_THEME: &str = r##"
config_version: "3.0"
name: Trime
style:
  key_height: 40
  key_text_size: 22.5
  candidate_font: "0x10"
  horizontal: true
  color_scheme: classic
  keyboards: [.default, letter, number, letter]
  keyboard_back_color: bg.png
  label_font: label.ttf
  layout:
    position: right
    alpha: 0.8
android_keys:
  name: [VoidSymbol, SOFT_LEFT, SOFT_RIGHT, A, B]
  symbols: "ABC"
fallback_colors:
  candidate_text_color: text_color
  hilited_text_color: text_color
  back_color: border_color
  loop_a: loop_b
  loop_b: loop_a
preset_color_schemes:
  default:
    name: Default
    text_color: 0x000000
    border_color: "#FF808080"
    keyboard_back_color: 0xFFEEEEEE
  classic:
    name: Classic
    text_color: "#FF0000"
    back_color: "0x80112233"
    key_back_color: keyboard_back_color
    candidate_back_color: bg.png
    self_ref: self_ref
preset_keyboards:
  default: {name: Default, width: 10}
  qwerty: {name: QWERTY}
  qwerty0: {name: QWERTY with digits}
  luna:
    name: Luna
    width: 12.5
    key_text_color: candidate_text_color
    key_back_color: "#FF00FF00"
    hilited_key_back_color: bg.png
  letter: {import_preset: qwerty}
  number: {import_preset: nowhere}
  cangjie5: {name: Cangjie}
"##;

/// A second theme with its own schemes and no fallback table.
pub const TONGWENFENG_THEME: &str = r##"
config_version: "3.0"
name: Tongwenfeng
style:
  key_height: 36
  color_scheme: tongwenfeng
preset_color_schemes:
  default:
    name: Default
    text_color: "#FFFFFF"
  tongwenfeng:
    name: Tongwenfeng
    text_color: "#123456"
preset_keyboards:
  default: {name: Default}
"##;

const LUNA_PINYIN_SCHEMA: &str = r#"
schema:
  schema_id: luna_pinyin
style:
  key_height: 48
  layout:
    alpha: 0.5
speller:
  alphabet: zyxwvutsrqponmlkjihgfedcba
"#;

const CANGJIE5_SCHEMA: &str = r#"
schema:
  schema_id: cangjie5
speller:
  alphabet: abcdefghijklmnopqrstuvwxyz
"#;

const STROKE_SCHEMA: &str = r#"
schema:
  schema_id: stroke
speller:
  alphabet: "hspnz01"
"#;

const DEFAULT_CONFIG: &str = r#"
schema_list:
  - schema: luna_pinyin
  - schema: cangjie5
  - schema: stroke
"#;

/// Isolated data and preference directories for one test.
pub struct TrimeEnv {
    /// Shared Rime data directory
    pub shared: TempDir,
    /// User Rime data directory
    pub user: TempDir,
    /// Directory holding `preferences.toml`
    pub config: TempDir,
}

impl TrimeEnv {
    /// Creates a data directory with two themes, three schemas and resource
    /// files.
    pub fn new() -> Self {
        let env = Self {
            shared: TempDir::new().expect("Failed to create shared dir"),
            user: TempDir::new().expect("Failed to create user dir"),
            config: TempDir::new().expect("Failed to create config dir"),
        };
        env.write_shared("trime.yaml", TRIME_THEME);
        env.write_shared("tongwenfeng.trime.yaml", TONGWENFENG_THEME);
        env.write_shared("luna_pinyin.schema.yaml", LUNA_PINYIN_SCHEMA);
        env.write_shared("cangjie5.schema.yaml", CANGJIE5_SCHEMA);
        env.write_shared("stroke.schema.yaml", STROKE_SCHEMA);
        env.write_shared("default.yaml", DEFAULT_CONFIG);
        env.write_shared("backgrounds/bg.png", "png");
        env.write_shared("fonts/label.ttf", "ttf");
        env.write_shared("opencc/t2s.txt", "");
        env
    }

    /// Writes `content` to `name` under the shared directory.
    pub fn write_shared(&self, name: &str, content: &str) {
        write_file(self.shared.path(), name, content);
    }

    /// Writes `content` to `name` under the user directory.
    pub fn write_user(&self, name: &str, content: &str) {
        write_file(self.user.path(), name, content);
    }

    /// Makes `schema_id` the engine's selected schema.
    pub fn select_schema(&self, schema_id: &str) {
        self.write_user(
            "user.yaml",
            &format!("var:\n  previously_selected_schema: {schema_id}\n"),
        );
    }

    /// Path of the preference file.
    pub fn preferences_path(&self) -> PathBuf {
        self.config.path().join("preferences.toml")
    }

    /// Writes the preference file.
    pub fn write_preferences(&self, content: &str) {
        fs::write(self.preferences_path(), content).expect("Failed to write preferences");
    }

    /// Raw content of the preference file, empty when it does not exist.
    pub fn preferences(&self) -> String {
        fs::read_to_string(self.preferences_path()).unwrap_or_default()
    }

    /// Opens the engine over this environment through the library API.
    pub fn open_config(&self) -> Config {
        let prefs = PreferenceFile::open(self.preferences_path()).expect("Failed to open preferences");
        let store = YamlThemeStore::new(self.shared.path(), self.user.path());
        Config::create(
            Arc::new(store),
            Box::new(prefs),
            ResourceDirs::new(self.shared.path(), self.user.path()),
        )
        .expect("Failed to create config")
    }

    /// Builds a `trime-config` invocation against this environment.
    pub fn command(&self, args: &[&str]) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_trime-config"));
        cmd.env("TRIME_CONFIG_DIR", self.config.path());
        cmd.env_remove("RUST_LOG");
        cmd.arg("--shared-dir").arg(self.shared.path());
        cmd.arg("--user-dir").arg(self.user.path());
        cmd.args(args);
        cmd
    }

    /// Runs `trime-config` and returns its output.
    pub fn run(&self, args: &[&str]) -> Output {
        self.command(args)
            .output()
            .expect("Failed to execute command")
    }

    /// Runs `trime-config`, asserts success and parses stdout as JSON.
    pub fn run_json(&self, args: &[&str]) -> serde_json::Value {
        let output = self.run(args);
        assert_eq!(
            output.status.code(),
            Some(0),
            "{:?} should succeed. stderr: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        serde_json::from_slice(&output.stdout).expect("Should parse JSON output")
    }
}

fn write_file(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create fixture dir");
    }
    fs::write(path, content).expect("Failed to write fixture");
}

/// Stdout of `output` as text.
pub fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

/// Stderr of `output` as text.
pub fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}
