use std::fs;
use std::path::Path;

use tempfile::TempDir;

use blok::core::{AppPaths, SimpleRng, ThemeConfig, ThemeWarning};
use blok::layout::HudStyle;
use blok::types::{Rgb, Rgba};

fn write(root: &Path, rel: &str, contents: &str) {
    let path = root.join(rel);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, contents).unwrap();
}

fn roots() -> (TempDir, TempDir) {
    (TempDir::new().unwrap(), TempDir::new().unwrap())
}

#[test]
fn missing_theme_loads_defaults_silently() {
    let (config, data) = roots();
    let (theme, warnings) = ThemeConfig::load(AppPaths::new(config.path(), data.path()), "nope");

    assert!(warnings.is_empty());
    assert_eq!(theme.colors.primary, Rgb::from_hex(0x0A0AFF));
    assert!(theme.gameplay.draw_wellbg && theme.gameplay.draw_labels && theme.gameplay.draw_panels);
}

#[test]
fn valid_settings_are_applied() {
    let (config, data) = roots();
    write(
        data.path(),
        "themes/neon/theme.cfg",
        "[meta]\nname = Neon\n\n[colors]\nprimary = #102030\naccent = #ff00ff\n\n[gameplay]\ndraw_panels = off\ndraw_labels = no\n",
    );

    let (theme, warnings) = ThemeConfig::load(AppPaths::new(config.path(), data.path()), "neon");
    assert!(warnings.is_empty(), "{warnings:?}");
    assert_eq!(theme.colors.primary, Rgb::new(0x10, 0x20, 0x30));
    assert_eq!(theme.colors.accent, Rgb::new(0xff, 0x00, 0xff));
    assert!(!theme.gameplay.draw_panels);
    assert!(!theme.gameplay.draw_labels);
    assert!(theme.gameplay.draw_wellbg);

    let style = HudStyle::from_theme(&theme);
    assert_eq!(style.panel, Rgba::new(0x10, 0x20, 0x30, 0x80));
    assert_eq!(style.highlight, theme.colors.accent);
    assert!(!style.draw_panels);
    assert_eq!(style.label_font, data.path().join("fonts").join("PTN57F.ttf"));
}

#[test]
fn bad_lines_become_warnings_and_are_skipped() {
    let (config, data) = roots();
    write(
        data.path(),
        "themes/broken/theme.cfg",
        "[sound]\nvolume = 3\n[gameplay]\ndraw_wellbg = Maybe\ndraw_panels = sometimes\nwobble = on\n[colors]\ntext = red\nprimary = #000000\n",
    );

    let (theme, warnings) =
        ThemeConfig::load(AppPaths::new(config.path(), data.path()), "broken");

    assert_eq!(
        warnings,
        vec![
            ThemeWarning::UnknownBlock {
                block: "sound".to_string()
            },
            ThemeWarning::InvalidValue {
                block: "gameplay".to_string(),
                key: "draw_wellbg".to_string(),
                value: "Maybe".to_string(),
                line: 4,
            },
            ThemeWarning::InvalidValue {
                block: "gameplay".to_string(),
                key: "draw_panels".to_string(),
                value: "sometimes".to_string(),
                line: 5,
            },
            ThemeWarning::UnknownOption {
                block: "gameplay".to_string(),
                key: "wobble".to_string(),
                line: 6,
            },
            ThemeWarning::InvalidColor {
                key: "text".to_string(),
                value: "red".to_string(),
                line: 8,
            },
        ]
    );
    // untouched by the bad lines
    assert!(theme.gameplay.draw_wellbg);
    assert!(theme.gameplay.draw_panels);
    assert_eq!(theme.colors.text, Rgb::from_hex(0xEEEEEE));
    // good line after the bad ones still applies
    assert_eq!(theme.colors.primary, Rgb::new(0, 0, 0));
}

#[test]
fn malformed_file_is_reported_as_unreadable() {
    let (config, data) = roots();
    write(data.path(), "themes/odd/theme.cfg", "draw_wellbg = on\n");

    let (theme, warnings) = ThemeConfig::load(AppPaths::new(config.path(), data.path()), "odd");
    assert_eq!(warnings.len(), 1);
    assert!(matches!(warnings[0], ThemeWarning::Unreadable { .. }));
    assert!(theme.gameplay.draw_wellbg);
}

#[test]
fn user_theme_overrides_installed_then_default() {
    let (config, data) = roots();
    write(config.path(), "themes/mine/graphics/well.png", "user");
    write(data.path(), "themes/mine/graphics/well.png", "installed");
    write(data.path(), "themes/mine/sfx/lock.wav", "installed");

    let theme = ThemeConfig::new(AppPaths::new(config.path(), data.path()), "mine");
    assert_eq!(
        theme.texture("well.png"),
        config.path().join("themes/mine/graphics/well.png")
    );
    assert_eq!(theme.sfx("lock.wav"), data.path().join("themes/mine/sfx/lock.wav"));
    assert_eq!(
        theme.sfx("clear.wav"),
        data.path().join("themes/default/sfx/clear.wav")
    );
}

#[test]
fn random_picks_are_reproducible_per_seed() {
    let (config, data) = roots();
    for name in ["c.ogg", "a.ogg", "b.ogg"] {
        write(data.path(), &format!("themes/default/music/gameplay/{name}"), "ogg");
    }
    fs::create_dir_all(data.path().join("themes/default/music/gameplay/not_a_file")).unwrap();

    let theme = ThemeConfig::new(AppPaths::new(config.path(), data.path()), "default");
    let first = theme.random_game_music(&mut SimpleRng::new(9));
    let again = theme.random_game_music(&mut SimpleRng::new(9));
    assert_eq!(first, again);
    assert!(first.is_file());

    let mut rng = SimpleRng::new(1);
    for _ in 0..20 {
        let pick = theme.random_game_music(&mut rng);
        assert_eq!(pick.extension().and_then(|e| e.to_str()), Some("ogg"));
    }
}

#[test]
fn empty_music_dir_falls_back_to_default_track() {
    let (config, data) = roots();
    let theme = ThemeConfig::new(AppPaths::new(config.path(), data.path()), "default");
    let mut rng = SimpleRng::new(4);

    assert_eq!(
        theme.random_menu_music(&mut rng),
        data.path().join("themes/default/music/menu/menu.ogg")
    );
    assert_eq!(theme.random_game_background(&mut rng), None);
}
