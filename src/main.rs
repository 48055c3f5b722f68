use settings_mapper::configuration::{ConfigurationDataBuilder, SettingsHolder};
use settings_mapper::impl_config_enum;
use settings_mapper::properties::{EnumProperty, IntegerProperty, StringProperty};
use settings_mapper::resource::JsonResource;
use settings_mapper::settings::{setup_tracing, SettingsManager};
use std::sync::LazyLock;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Color {
    Blue,
    Orange,
    Green,
}

impl_config_enum!(Color { Blue, Orange, Green });

static TITLE_TEXT: LazyLock<StringProperty> =
    LazyLock::new(|| StringProperty::new("title.text", "Test".to_owned()));
static TITLE_SIZE: LazyLock<IntegerProperty> =
    LazyLock::new(|| IntegerProperty::new("title.size", 12));
static SUBTITLE_TEXT: LazyLock<StringProperty> =
    LazyLock::new(|| StringProperty::new("subtitle.text", "hello world".to_owned()));
static SUBTITLE_SIZE: LazyLock<IntegerProperty> =
    LazyLock::new(|| IntegerProperty::new("subtitle.size", 10));
static SUBTITLE_COLOR: LazyLock<EnumProperty<Color>> =
    LazyLock::new(|| EnumProperty::new("subtitle.color", Color::Orange));

struct TitleConfig;

impl SettingsHolder for TitleConfig {
    fn register_properties(builder: &mut ConfigurationDataBuilder) {
        builder
            .add(&TITLE_TEXT)
            .add(&TITLE_SIZE)
            .add(&SUBTITLE_TEXT)
            .add(&SUBTITLE_SIZE)
            .add(&SUBTITLE_COLOR);
    }
}

fn run(path: &str) -> Result<(), settings_mapper::ConfigError> {
    let settings = SettingsManager::builder(JsonResource::new(path))
        .holder::<TitleConfig>()?
        .build()?;

    let title = settings.property(&TITLE_TEXT)?;
    let title_size = settings.property(&TITLE_SIZE)?;
    info!(text = %title, size = title_size, "Title");

    let subtitle = settings.property(&SUBTITLE_TEXT)?;
    let subtitle_size = settings.property(&SUBTITLE_SIZE)?;
    let color = settings.property(&SUBTITLE_COLOR)?;
    info!(text = %subtitle, size = subtitle_size, color = ?color, "Subtitle");
    Ok(())
}

fn main() {
    setup_tracing();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "settings.json".to_owned());
    if let Err(e) = run(&path) {
        error!(path = %path, error = %e, "Failed to load settings");
        std::process::exit(1);
    }
}
