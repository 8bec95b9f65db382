// extensions/device.rs
//
// Device classification for the responsive fixups.
// The bridge probes the browser, this module decides what to apply.

/// What the browser told us about the device.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DeviceProbe {
    pub user_agent: String,
    /// Viewport width in CSS pixels.
    pub width: f32,
    /// Whether `window.orientation` exists (a handheld).
    pub has_orientation: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DeviceClass {
    Mobile,
    Tablet,
    Desktop,
}

pub const MOBILE_MAX_WIDTH: f32 = 768.0;
pub const TABLET_MAX_WIDTH: f32 = 1024.0;

/// Re-evaluate this long after the last resize event.
pub const RESIZE_SETTLE_MS: u32 = 100;

const MOBILE_AGENTS: &[&str] = &[
    "android", "webos", "iphone", "ipad", "ipod", "blackberry", "iemobile", "opera mini",
];
const TABLET_AGENTS: &[&str] = &["ipad", "android", "tablet"];

fn agent_matches(user_agent: &str, needles: &[&str]) -> bool {
    let ua = user_agent.to_ascii_lowercase();
    needles.iter().any(|n| ua.contains(n))
}

/// Mobile wins over tablet: an Android tablet narrower than 769px is mobile,
/// and so is any agent on the mobile list regardless of width.
pub fn classify(probe: &DeviceProbe) -> DeviceClass {
    let mobile = probe.has_orientation
        || agent_matches(&probe.user_agent, MOBILE_AGENTS)
        || probe.width <= MOBILE_MAX_WIDTH;
    if mobile {
        return DeviceClass::Mobile;
    }
    let tablet = agent_matches(&probe.user_agent, TABLET_AGENTS)
        && probe.width > MOBILE_MAX_WIDTH
        && probe.width <= TABLET_MAX_WIDTH;
    if tablet {
        DeviceClass::Tablet
    } else {
        DeviceClass::Desktop
    }
}

impl DeviceClass {
    pub const ALL: [DeviceClass; 3] = [DeviceClass::Mobile, DeviceClass::Tablet, DeviceClass::Desktop];

    /// Class set on both `<html>` and `<body>`.
    pub fn class_name(self) -> &'static str {
        match self {
            DeviceClass::Mobile => "mobile-device",
            DeviceClass::Tablet => "tablet-device",
            DeviceClass::Desktop => "desktop-device",
        }
    }

    /// `--section-padding` custom property.
    pub fn section_padding(self) -> &'static str {
        match self {
            DeviceClass::Mobile => "50px 0",
            DeviceClass::Tablet => "70px 0",
            DeviceClass::Desktop => "100px 0",
        }
    }

    /// `--container-padding` custom property. Only phones override it.
    pub fn container_padding(self) -> Option<&'static str> {
        match self {
            DeviceClass::Mobile => Some("0 10px"),
            _ => None,
        }
    }

    pub fn shows_particles(self) -> bool {
        self != DeviceClass::Mobile
    }

    /// Content written into `meta[name="viewport"]`. Only phones lock the zoom;
    /// other classes leave the page's own tag alone.
    pub fn viewport_content(self) -> Option<&'static str> {
        match self {
            DeviceClass::Mobile => Some(MOBILE_VIEWPORT),
            _ => None,
        }
    }
}

pub const VIEWPORT_SELECTOR: &str = "meta[name=\"viewport\"]";
pub const MOBILE_VIEWPORT: &str =
    "width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no";

/// Extra classes added to page furniture on phones: (selector, class).
pub const MOBILE_FIXUPS: &[(&str, &str)] = &[
    (".navbar", "mobile-nav"),
    (".navbar-collapse", "mobile-collapse"),
    (".hero", "mobile-hero"),
    (".hero-buttons", "mobile-buttons"),
    (".profile-image", "mobile-profile"),
    (".skills-grid, .projects-grid, .about-stats, .expertise-grid", "mobile-grid"),
    (".skills-progress-grid", "mobile-progress-grid"),
];

#[cfg(test)]
mod tests {
    use super::*;

    fn probe(ua: &str, width: f32) -> DeviceProbe {
        DeviceProbe {
            user_agent: ua.to_string(),
            width,
            has_orientation: false,
        }
    }

    const DESKTOP_UA: &str = "Mozilla/5.0 (X11; Linux x86_64) Firefox/128.0";

    #[test]
    fn narrow_viewport_is_mobile() {
        assert_eq!(classify(&probe(DESKTOP_UA, 768.0)), DeviceClass::Mobile);
        assert_eq!(classify(&probe(DESKTOP_UA, 769.0)), DeviceClass::Desktop);
    }

    #[test]
    fn handheld_agents_are_mobile_at_any_width() {
        assert_eq!(classify(&probe("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)", 1200.0)), DeviceClass::Mobile);
        assert_eq!(classify(&probe("Opera Mini/8.0", 1000.0)), DeviceClass::Mobile);
    }

    #[test]
    fn orientation_support_means_mobile() {
        let p = DeviceProbe {
            has_orientation: true,
            ..probe(DESKTOP_UA, 1400.0)
        };
        assert_eq!(classify(&p), DeviceClass::Mobile);
    }

    #[test]
    fn generic_tablet_in_tablet_width_range() {
        assert_eq!(classify(&probe("Mozilla/5.0 (Tablet; rv:120.0)", 900.0)), DeviceClass::Tablet);
        assert_eq!(classify(&probe("Mozilla/5.0 (Tablet; rv:120.0)", 1100.0)), DeviceClass::Desktop);
    }

    #[test]
    fn padding_per_class() {
        assert_eq!(DeviceClass::Mobile.section_padding(), "50px 0");
        assert_eq!(DeviceClass::Mobile.container_padding(), Some("0 10px"));
        assert_eq!(DeviceClass::Tablet.section_padding(), "70px 0");
        assert_eq!(DeviceClass::Desktop.container_padding(), None);
        assert!(!DeviceClass::Mobile.shows_particles());
        assert!(DeviceClass::Desktop.shows_particles());
    }

    #[test]
    fn only_phones_lock_the_viewport() {
        assert_eq!(
            DeviceClass::Mobile.viewport_content(),
            Some("width=device-width, initial-scale=1.0, maximum-scale=1.0, user-scalable=no")
        );
        assert_eq!(DeviceClass::Tablet.viewport_content(), None);
        assert_eq!(DeviceClass::Desktop.viewport_content(), None);
    }
}
