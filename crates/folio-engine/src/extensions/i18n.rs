// extensions/i18n.rs
//
// Persian/English copy for the bilingual pages.
// Only static tables and the current-language toggle; the bridge writes them
// into the document.

/// Display language. Persian (right-to-left) is the page default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Language {
    #[default]
    Fa,
    En,
}

const FA_PHRASES: &[&str] = &[
    "توسعه‌دهنده بک‌اند",
    "متخصص ASP.NET Core",
    "3 سال تجربه در توسعه بک‌اند",
    "علاقه‌مند به یادگیری",
];

const EN_PHRASES: &[&str] = &["Backend Developer", "ASP.NET Core Specialist", "Learning Enthusiast"];

const FA_NAV: &[&str] = &["خانه", "درباره من", "مهارت‌ها", "پروژه‌ها", "تماس"];
const EN_NAV: &[&str] = &["Home", "About Me", "Skills", "Projects", "Contact"];

const FA_SECTIONS: &[&str] = &["درباره من", "مهارت‌های من", "پروژه‌های برجسته", "تماس با من"];
const EN_SECTIONS: &[&str] = &["About Me", "My Skills", "Featured Projects", "Contact Me"];

impl Language {
    /// Parse a `lang` attribute. Anything starting with `en` is English.
    pub fn from_tag(tag: &str) -> Self {
        if tag.trim().to_ascii_lowercase().starts_with("en") {
            Language::En
        } else {
            Language::Fa
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Language::Fa => Language::En,
            Language::En => Language::Fa,
        }
    }

    /// Value of the root `lang` attribute.
    pub fn tag(self) -> &'static str {
        match self {
            Language::Fa => "fa",
            Language::En => "en",
        }
    }

    /// Value of the root `dir` attribute.
    pub fn dir(self) -> &'static str {
        match self {
            Language::Fa => "rtl",
            Language::En => "ltr",
        }
    }

    pub fn is_rtl(self) -> bool {
        self == Language::Fa
    }

    /// Text on the toggle button: it names the language you switch *to*.
    pub fn toggle_label(self) -> &'static str {
        match self {
            Language::Fa => "EN",
            Language::En => "فا",
        }
    }

    pub fn typing_phrases(self) -> &'static [&'static str] {
        match self {
            Language::Fa => FA_PHRASES,
            Language::En => EN_PHRASES,
        }
    }

    /// Labels of the navigation links, in document order.
    pub fn nav_labels(self) -> &'static [&'static str] {
        match self {
            Language::Fa => FA_NAV,
            Language::En => EN_NAV,
        }
    }

    /// Titles of the about, skills, projects and contact sections.
    pub fn section_titles(self) -> &'static [&'static str] {
        match self {
            Language::Fa => FA_SECTIONS,
            Language::En => EN_SECTIONS,
        }
    }

    /// Hero heading markup. Contains a highlighted name span.
    pub fn hero_title_html(self) -> &'static str {
        match self {
            Language::Fa => "سلام، من <span class=\"highlight\">مهدی</span> هستم",
            Language::En => "Hi, I'm <span class=\"highlight\">Mahdi</span>",
        }
    }

    pub fn hero_description(self) -> &'static str {
        match self {
            Language::Fa => "\"کد مثل طنز است. وقتی باید توضیحش بدی، بده.\"",
            Language::En => "\"Code is like humor. When you have to explain it, it's bad.\"",
        }
    }
}

/// Delay between switching language and restarting the typewriter.
pub const TYPING_RESTART_MS: u32 = 500;

/// Label markup for an icon-prefixed element (nav link, section title):
/// the existing icon's markup, a space, then the text.
pub fn with_icon(icon_html: Option<&str>, label: &str) -> String {
    match icon_html {
        Some(icon) => format!("{} {}", icon, label),
        None => label.to_string(),
    }
}
