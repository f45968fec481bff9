use crate::{commands::keyboard::KeyBinding, style::Color};
use serde::Deserialize;
use std::{fs, io, path::Path};

#[derive(Clone, Debug, Default, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// The default configuration for every deck.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// The feature item reveal animation.
    #[serde(default)]
    pub animation: AnimationConfig,

    #[serde(default)]
    pub bindings: KeyBindingsConfig,
}

impl Config {
    /// Load the config from a path.
    pub fn load(path: &Path) -> Result<Self, ConfigLoadError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Err(ConfigLoadError::NotFound),
            Err(e) => return Err(e.into()),
        };
        let config = serde_yaml::from_str(&contents)?;
        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigLoadError {
    #[error("io: {0}")]
    Io(#[from] io::Error),

    #[error("config file not found")]
    NotFound,

    #[error("invalid configuration: {0}")]
    Invalid(#[from] serde_yaml::Error),
}

#[derive(Clone, Debug, Default, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct DefaultsConfig {
    /// The colors used to draw the deck.
    #[serde(default)]
    pub theme: ThemeConfig,
}

#[derive(Clone, Debug, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct ThemeConfig {
    /// The color of regular text.
    #[serde(default = "default_foreground")]
    #[cfg_attr(feature = "json-schema", schemars(with = "String"))]
    pub foreground: Color,

    /// The color of the background.
    #[serde(default = "default_background")]
    #[cfg_attr(feature = "json-schema", schemars(with = "String"))]
    pub background: Color,

    /// The color used for slide titles and the active dot.
    #[serde(default = "default_accent")]
    #[cfg_attr(feature = "json-schema", schemars(with = "String"))]
    pub accent: Color,

    /// The color used for disabled buttons and inactive dots.
    #[serde(default = "default_dimmed")]
    #[cfg_attr(feature = "json-schema", schemars(with = "String"))]
    pub dimmed: Color,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            foreground: default_foreground(),
            background: default_background(),
            accent: default_accent(),
            dimmed: default_dimmed(),
        }
    }
}

fn default_foreground() -> Color {
    Color::new(0xe6, 0xe6, 0xe6)
}

fn default_background() -> Color {
    Color::new(0x1c, 0x1c, 0x1c)
}

fn default_accent() -> Color {
    Color::new(0x6a, 0xa9, 0xff)
}

fn default_dimmed() -> Color {
    Color::new(0x5c, 0x5c, 0x5c)
}

#[derive(Clone, Debug, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct AnimationConfig {
    /// Whether feature items fade in when their slide is shown.
    #[serde(default = "default_animation_enabled")]
    pub enabled: bool,

    /// The delay before the first feature item starts its reveal.
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,

    /// The extra delay for each subsequent feature item.
    #[serde(default = "default_stagger_ms")]
    pub stagger_ms: u64,

    /// How long each feature item takes to fade in.
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u64,

    /// How often the screen is redrawn while a reveal is in progress.
    #[serde(default = "default_frame_interval_ms")]
    pub frame_interval_ms: u64,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            enabled: default_animation_enabled(),
            base_delay_ms: default_base_delay_ms(),
            stagger_ms: default_stagger_ms(),
            duration_ms: default_duration_ms(),
            frame_interval_ms: default_frame_interval_ms(),
        }
    }
}

fn default_animation_enabled() -> bool {
    true
}

fn default_base_delay_ms() -> u64 {
    200
}

fn default_stagger_ms() -> u64 {
    150
}

fn default_duration_ms() -> u64 {
    800
}

fn default_frame_interval_ms() -> u64 {
    33
}

#[derive(Clone, Debug, Deserialize)]
#[cfg_attr(feature = "json-schema", derive(schemars::JsonSchema))]
#[serde(deny_unknown_fields)]
pub struct KeyBindingsConfig {
    /// The keys that move to the next slide.
    #[serde(default = "default_next_bindings")]
    pub(crate) next: Vec<KeyBinding>,

    /// The keys that move to the previous slide.
    #[serde(default = "default_previous_bindings")]
    pub(crate) previous: Vec<KeyBinding>,

    /// The key binding to jump to the first slide.
    #[serde(default = "default_first_slide_bindings")]
    pub(crate) first_slide: Vec<KeyBinding>,

    /// The key binding to jump to the last slide.
    #[serde(default = "default_last_slide_bindings")]
    pub(crate) last_slide: Vec<KeyBinding>,

    /// The key binding to jump to a specific slide.
    #[serde(default = "default_go_to_slide_bindings")]
    pub(crate) go_to_slide: Vec<KeyBinding>,

    /// The keys that move the focus to the next control.
    #[serde(default = "default_focus_next_bindings")]
    pub(crate) focus_next: Vec<KeyBinding>,

    /// The keys that move the focus to the previous control.
    #[serde(default = "default_focus_previous_bindings")]
    pub(crate) focus_previous: Vec<KeyBinding>,

    /// The keys that activate the focused control.
    #[serde(default = "default_activate_bindings")]
    pub(crate) activate: Vec<KeyBinding>,

    /// The key binding to close the application.
    #[serde(default = "default_exit_bindings")]
    pub(crate) exit: Vec<KeyBinding>,
}

impl Default for KeyBindingsConfig {
    fn default() -> Self {
        Self {
            next: default_next_bindings(),
            previous: default_previous_bindings(),
            first_slide: default_first_slide_bindings(),
            last_slide: default_last_slide_bindings(),
            go_to_slide: default_go_to_slide_bindings(),
            focus_next: default_focus_next_bindings(),
            focus_previous: default_focus_previous_bindings(),
            activate: default_activate_bindings(),
            exit: default_exit_bindings(),
        }
    }
}

fn make_keybindings<const N: usize>(raw_bindings: [&str; N]) -> Vec<KeyBinding> {
    let mut bindings = Vec::new();
    for binding in raw_bindings {
        bindings.push(binding.parse().expect("invalid binding"));
    }
    bindings
}

fn default_next_bindings() -> Vec<KeyBinding> {
    make_keybindings(["<right>", "l", "<page_down>"])
}

fn default_previous_bindings() -> Vec<KeyBinding> {
    make_keybindings(["<left>", "h", "<page_up>"])
}

fn default_first_slide_bindings() -> Vec<KeyBinding> {
    make_keybindings(["gg", "<home>"])
}

fn default_last_slide_bindings() -> Vec<KeyBinding> {
    make_keybindings(["G", "<end>"])
}

fn default_go_to_slide_bindings() -> Vec<KeyBinding> {
    make_keybindings(["<number>G"])
}

fn default_focus_next_bindings() -> Vec<KeyBinding> {
    make_keybindings(["<tab>"])
}

fn default_focus_previous_bindings() -> Vec<KeyBinding> {
    make_keybindings(["<backtab>"])
}

fn default_activate_bindings() -> Vec<KeyBinding> {
    make_keybindings(["<enter>", " "])
}

fn default_exit_bindings() -> Vec<KeyBinding> {
    make_keybindings(["<c-c>", "q"])
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::commands::keyboard::CommandKeyBindings;
    use std::io::Write;

    #[test]
    fn default_bindings() {
        let config = KeyBindingsConfig::default();
        CommandKeyBindings::try_from(config).expect("construction failed");
    }

    #[test]
    fn default_animation_serde() {
        let config: AnimationConfig = serde_yaml::from_str("stagger_ms: 100").expect("failed to parse");
        assert_eq!(config.stagger_ms, 100);
        assert_eq!(config.base_delay_ms, 200);
        assert_eq!(config.duration_ms, 800);
        assert!(config.enabled);
    }

    #[test]
    fn theme_colors() {
        let config: ThemeConfig = serde_yaml::from_str("accent: ff0000\nbackground: black").expect("failed to parse");
        assert_eq!(config.accent.as_rgb(), Some((255, 0, 0)));
        assert_eq!(config.background.to_string(), "black");
        assert_eq!(config.foreground, default_foreground());
    }

    #[test]
    fn unknown_fields_rejected() {
        serde_yaml::from_str::<Config>("potato: 42").expect_err("not an error");
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("failed to create file");
        writeln!(file, "animation:\n  enabled: false\nbindings:\n  next: [\"n\"]").expect("write failed");
        let config = Config::load(file.path()).expect("load failed");
        assert!(!config.animation.enabled);
        assert_eq!(config.bindings.next, vec!["n".parse::<KeyBinding>().unwrap()]);
    }

    #[test]
    fn load_missing_file() {
        let result = Config::load(Path::new("/this/path/does/not/exist.yaml"));
        assert!(matches!(result, Err(ConfigLoadError::NotFound)));
    }
}
