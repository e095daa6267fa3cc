//! # Theme Commands

use coursehub_core::Theme;
use coursehub_store::KeyValueStore;
use serde::Serialize;
use tracing::debug;

use super::Render;
use crate::config::ConfigState;
use crate::state::AppContext;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeResponse {
    pub theme: Theme,
    /// Class a web front end puts on the root element, if any.
    pub css_class: Option<&'static str>,
}

impl From<Theme> for ThemeResponse {
    fn from(theme: Theme) -> Self {
        ThemeResponse {
            theme,
            css_class: theme.css_class(),
        }
    }
}

impl Render for ThemeResponse {
    fn render(&self, _config: &ConfigState) -> String {
        format!("Theme: {}", self.theme)
    }
}

pub fn get_theme<S: KeyValueStore>(ctx: &AppContext<S>) -> ThemeResponse {
    ThemeResponse::from(ctx.store.theme())
}

pub fn toggle_theme<S: KeyValueStore>(ctx: &AppContext<S>) -> ThemeResponse {
    debug!("toggle_theme command");
    ThemeResponse::from(ctx.store.toggle_theme())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::testing::context;

    #[test]
    fn test_toggle_round_trip() {
        let ctx = context();
        assert_eq!(get_theme(&ctx).theme, Theme::Light);

        let dark = toggle_theme(&ctx);
        assert_eq!(dark.theme, Theme::Dark);
        assert_eq!(dark.css_class, Some("dark"));

        let light = toggle_theme(&ctx);
        assert_eq!(light.css_class, None);
    }

    #[test]
    fn test_json_shape() {
        let ctx = context();
        let json = serde_json::to_value(toggle_theme(&ctx)).unwrap();
        assert_eq!(json["theme"], "dark");
        assert_eq!(json["cssClass"], "dark");
    }
}
