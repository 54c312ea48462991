//! Theme management.
//!
//! Light/dark mode plus an accent color, both persisted in localStorage and
//! exposed to CSS through `data-theme` / `data-accent` on `<body>`.

use leptos::prelude::*;
use web_sys::window;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Theme::Light => "Light",
            Theme::Dark => "Dark",
        }
    }

    /// Unknown values fall back to the default theme.
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "dark" => Theme::Dark,
            _ => Theme::Light,
        }
    }

    pub fn toggled(&self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }

    pub fn all() -> [Theme; 2] {
        [Theme::Light, Theme::Dark]
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Accent {
    #[default]
    Blue,
    Green,
    Purple,
    Orange,
}

impl Accent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Accent::Blue => "blue",
            Accent::Green => "green",
            Accent::Purple => "purple",
            Accent::Orange => "orange",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Accent::Blue => "Blue",
            Accent::Green => "Green",
            Accent::Purple => "Purple",
            Accent::Orange => "Orange",
        }
    }

    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "green" => Accent::Green,
            "purple" => Accent::Purple,
            "orange" => Accent::Orange,
            _ => Accent::Blue,
        }
    }

    pub fn all() -> [Accent; 4] {
        [Accent::Blue, Accent::Green, Accent::Purple, Accent::Orange]
    }
}

const THEME_STORAGE_KEY: &str = "app-theme";
const ACCENT_STORAGE_KEY: &str = "app-accent";

fn load_from_storage(key: &str) -> Option<String> {
    window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|storage| storage.get_item(key).ok().flatten())
}

fn save_to_storage(key: &str, value: &str) {
    if let Some(storage) = window().and_then(|w| w.local_storage().ok().flatten()) {
        let _ = storage.set_item(key, value);
    }
}

fn apply_to_body(theme: Theme, accent: Accent) {
    if let Some(body) = window().and_then(|w| w.document()).and_then(|d| d.body()) {
        let _ = body.set_attribute("data-theme", theme.as_str());
        let _ = body.set_attribute("data-accent", accent.as_str());
    }
}

#[derive(Clone, Copy)]
pub struct ThemeContext {
    pub theme: RwSignal<Theme>,
    pub accent: RwSignal<Accent>,
}

impl ThemeContext {
    pub fn set_theme(&self, theme: Theme) {
        self.theme.set(theme);
        save_to_storage(THEME_STORAGE_KEY, theme.as_str());
        apply_to_body(theme, self.accent.get_untracked());
    }

    pub fn set_accent(&self, accent: Accent) {
        self.accent.set(accent);
        save_to_storage(ACCENT_STORAGE_KEY, accent.as_str());
        apply_to_body(self.theme.get_untracked(), accent);
    }

    pub fn toggle_theme(&self) {
        self.set_theme(self.theme.get_untracked().toggled());
    }
}

#[component]
pub fn ThemeProvider(children: Children) -> impl IntoView {
    let theme = load_from_storage(THEME_STORAGE_KEY)
        .map(|s| Theme::parse(&s))
        .unwrap_or_default();
    let accent = load_from_storage(ACCENT_STORAGE_KEY)
        .map(|s| Accent::parse(&s))
        .unwrap_or_default();
    apply_to_body(theme, accent);

    provide_context(ThemeContext {
        theme: RwSignal::new(theme),
        accent: RwSignal::new(accent),
    });

    children()
}

pub fn use_theme() -> ThemeContext {
    use_context::<ThemeContext>().expect("ThemeContext not found. Wrap your app with ThemeProvider.")
}

/// Header dropdown: mode toggle plus accent swatches.
#[component]
pub fn ThemeSelect() -> impl IntoView {
    let ctx = use_theme();
    let is_open = RwSignal::new(false);

    view! {
        <div class="theme-select-wrapper">
            <button
                class="top-header-icon-btn"
                title="Theme"
                on:click=move |_| is_open.update(|v| *v = !*v)
            >
                {crate::shared::icons::icon("palette")}
            </button>

            <Show when=move || is_open.get()>
                <div class="theme-dropdown">
                    {Theme::all()
                        .into_iter()
                        .map(|theme| {
                            view! {
                                <button
                                    class=move || {
                                        if ctx.theme.get() == theme {
                                            "theme-dropdown__item theme-dropdown__item--active"
                                        } else {
                                            "theme-dropdown__item"
                                        }
                                    }
                                    on:click=move |_| ctx.set_theme(theme)
                                >
                                    {theme.display_name()}
                                </button>
                            }
                        })
                        .collect_view()}
                    <div class="theme-dropdown__accents">
                        {Accent::all()
                            .into_iter()
                            .map(|accent| {
                                view! {
                                    <button
                                        class=move || {
                                            if ctx.accent.get() == accent {
                                                format!("accent-swatch accent-swatch--{} accent-swatch--active", accent.as_str())
                                            } else {
                                                format!("accent-swatch accent-swatch--{}", accent.as_str())
                                            }
                                        }
                                        title=accent.display_name()
                                        on:click=move |_| {
                                            ctx.set_accent(accent);
                                            is_open.set(false);
                                        }
                                    ></button>
                                }
                            })
                            .collect_view()}
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stored_values_parse_with_fallback() {
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("forest"), Theme::Light);
        assert_eq!(Accent::parse("purple"), Accent::Purple);
        assert_eq!(Accent::parse(""), Accent::Blue);
    }

    #[test]
    fn toggle_flips_mode() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled().as_str(), "light");
    }
}
