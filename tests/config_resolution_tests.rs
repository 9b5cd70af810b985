//! Library-level resolution tests over real data directories.

use std::thread;

use trime_config::models::{Color, Drawable};
use trime_config::ConfigError;

mod fixtures;
use fixtures::*;

// ============================================================================
// Lifecycle Tests
// ============================================================================

#[test]
fn test_create_reads_selection_from_data_dir() {
    let env = TrimeEnv::new();
    let config = env.open_config();

    assert_eq!(config.theme().as_deref(), Some("trime"));
    assert_eq!(config.schema_id().as_deref(), Some("luna_pinyin"));
    assert_eq!(config.get_int("key_height"), 48);
    assert_eq!(config.get_string("layout/position"), "right");
}

#[test]
fn test_reset_picks_up_schema_change() {
    let env = TrimeEnv::new();
    let config = env.open_config();

    env.select_schema("cangjie5");
    config.reset().expect("reset");
    assert_eq!(config.schema_id().as_deref(), Some("cangjie5"));
    assert_eq!(config.get_int("key_height"), 40);

    env.select_schema("luna_pinyin");
    config.reset().expect("reset");
    assert_eq!(config.get_int("key_height"), 48);
}

#[test]
fn test_switch_theme_survives_reopen() {
    let env = TrimeEnv::new();
    let config = env.open_config();
    config.switch_theme("tongwenfeng.trime").expect("switch theme");
    drop(config);

    let reopened = env.open_config();
    assert_eq!(reopened.theme().as_deref(), Some("tongwenfeng.trime"));
    assert_eq!(
        reopened.color("text_color").map(Color::argb),
        Some(0xFFFF_FFFF)
    );
}

#[test]
fn test_switch_theme_sees_edited_files() {
    let env = TrimeEnv::new();
    let config = env.open_config();
    assert!((config.get_double("key_text_size") - 22.5).abs() < f64::EPSILON);

    env.write_shared(
        "trime.yaml",
        &TRIME_THEME.replace("key_text_size: 22.5", "key_text_size: 30"),
    );
    config.switch_theme("trime").expect("switch theme");
    assert_eq!(config.get_int("key_text_size"), 30);
    assert_eq!(config.get_int("key_height"), 48, "schema style is kept");
}

#[test]
fn test_close_then_lookups_degrade() {
    let env = TrimeEnv::new();
    let config = env.open_config();
    config.close();

    assert!(!config.is_open());
    assert!(config.resolve("key_height").is_none());
    assert!(config.color("text_color").is_none());
    assert!(matches!(
        config.try_color("text_color"),
        Err(ConfigError::NotInitialized(_))
    ));
    assert!(matches!(
        config.keyboard_name(".default"),
        Err(ConfigError::NotInitialized(_))
    ));
}

// ============================================================================
// Color Resolution Tests
// ============================================================================

#[test]
fn test_self_heal_persists_to_preference_file() {
    let env = TrimeEnv::new();
    env.write_preferences("pref_selected_color_scheme = \"nonexistent\"\n");
    let config = env.open_config();

    assert_eq!(config.color_scheme(), "classic");
    assert_eq!(
        config.color("text_color").map(Color::argb),
        Some(0xFFFF_0000)
    );
    assert!(env
        .preferences()
        .contains("pref_selected_color_scheme = \"classic\""));
}

#[test]
fn test_fallback_errors_are_distinguished() {
    let env = TrimeEnv::new();
    let config = env.open_config();

    assert!(matches!(
        config.try_color("loop_a"),
        Err(ConfigError::FallbackCycle { .. })
    ));
    assert_eq!(config.color("loop_a"), None);
    assert_eq!(config.try_color("nothing_here").expect("lookup"), None);
}

#[test]
fn test_transparent_hex_colors_from_files() {
    let env = TrimeEnv::new();
    env.write_shared(
        "trime.yaml",
        &TRIME_THEME.replace(
            "    border_color: \"#FF808080\"\n",
            "    border_color: \"#FF808080\"\n    shadow_color: 0x00FF0000\n    clear_color: 0x00000000\n    quoted_clear: '0x00000000'\n    blue_color: 255\n",
        ),
    );
    let config = env.open_config();

    assert_eq!(config.color("clear_color").map(Color::argb), Some(0));
    assert_eq!(config.color("clear_color"), config.color("quoted_clear"));
    assert_eq!(
        config.color("shadow_color").map(Color::argb),
        Some(0x00FF_0000)
    );
    assert_eq!(config.color("blue_color").map(Color::argb), Some(0x0000_00FF));
    assert_eq!(
        config.color("keyboard_back_color").map(Color::argb),
        Some(0xFFEE_EEEE)
    );
    assert_eq!(config.get_string("candidate_font"), "0x10");
}

#[test]
fn test_key_spec_colors() {
    let env = TrimeEnv::new();
    let config = env.open_config();
    let spec = config.keyboard("luna").expect("luna keyboard");

    assert_eq!(
        config.color_of(&spec, "key_text_color").map(Color::argb),
        Some(0xFF00_0000),
        "symbolic names resolve through the active scheme"
    );
    assert_eq!(
        config.color_of(&spec, "key_back_color").map(Color::argb),
        Some(0xFF00_FF00)
    );
    assert_eq!(
        config.color_drawable_of(&spec, "hilited_key_back_color"),
        Some(Drawable::Bitmap(env.shared.path().join("backgrounds/bg.png")))
    );
    assert_eq!(config.color_of(&spec, "missing"), None);
}

#[test]
fn test_user_background_used_when_shared_has_none() {
    let env = TrimeEnv::new();
    std::fs::remove_dir_all(env.shared.path().join("backgrounds")).expect("remove");
    env.write_user("backgrounds/bg.png", "png");
    let config = env.open_config();

    assert_eq!(
        config.drawable("keyboard_back_color"),
        Some(Drawable::Bitmap(env.user.path().join("backgrounds/bg.png")))
    );
}

// ============================================================================
// Typed Accessor Tests
// ============================================================================

#[test]
fn test_typed_accessors() {
    let env = TrimeEnv::new();
    let config = env.open_config();

    assert_eq!(config.get_int("candidate_font"), 16);
    assert!((config.get_float("layout/alpha") - 0.5).abs() < f32::EPSILON);
    assert!((config.get_double("key_text_size") - 22.5).abs() < f64::EPSILON);
    assert!(config.get_boolean("horizontal"));
    assert!(config.get_boolean("no_such_flag"));
    assert_eq!(config.get_string("no_such_text"), "");
    assert_eq!(config.get_int("keyboards"), 0);
    assert!(config.try_get_int("keyboards").is_err());
}

#[test]
fn test_font_lookup() {
    let env = TrimeEnv::new();
    let config = env.open_config();

    assert_eq!(
        config.font("label_font"),
        Some(env.shared.path().join("fonts/label.ttf"))
    );
    assert_eq!(config.font("no_such_font"), None);
}

#[test]
fn test_keyboard_scope_accessors() {
    let env = TrimeEnv::new();
    let config = env.open_config();
    let default = config.keyboard("default").expect("default keyboard");
    assert_eq!(default.int("width"), Some(10));
    assert_eq!(default.int_or("height", 7), 7);

    let luna = config.keyboard("luna").expect("luna keyboard");
    assert!((luna.double_or("width", 0.0) - 12.5).abs() < f64::EPSILON);
    assert_eq!(luna.int("width"), None, "fractional values are not integers");
    assert_eq!(luna.string_or("name", ""), "Luna");
}

// ============================================================================
// Concurrency Tests
// ============================================================================

#[test]
fn test_concurrent_reads_during_schema_switches() {
    let env = TrimeEnv::new();
    let config = env.open_config();

    thread::scope(|scope| {
        scope.spawn(|| {
            for i in 0..50 {
                let schema = if i % 2 == 0 { "cangjie5" } else { "luna_pinyin" };
                config.switch_schema(schema).expect("switch schema");
            }
        });
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..50 {
                    let height = config.get_int("key_height");
                    assert!(height == 40 || height == 48, "unexpected height {height}");
                    assert_eq!(
                        config.color("text_color").map(Color::argb),
                        Some(0xFF00_0000)
                    );
                }
            });
        }
    });
}
