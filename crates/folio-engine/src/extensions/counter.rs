// extensions/counter.rs
//
// Count-up animation for the about-section statistics ("3+", "20").
// Driven by animation frames; each frame asks for the text at a timestamp.

use super::easing::Easing;

pub const COUNT_UP_MS: f64 = 2000.0;

/// Split a statistic into its number and trailing suffix.
/// `data_target`, when present and numeric, overrides the displayed number.
pub fn parse_counter(text: &str, data_target: Option<&str>) -> Option<(u64, String)> {
    let text = text.trim();
    let digits_end = text.find(|c: char| !c.is_ascii_digit()).unwrap_or(text.len());
    let shown = text[..digits_end].parse::<u64>().ok();
    let suffix = text[digits_end..].trim().to_string();
    let target = data_target.and_then(|t| t.trim().parse::<u64>().ok()).or(shown)?;
    Some((target, suffix))
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountUp {
    target: u64,
    suffix: String,
    easing: Easing,
    duration_ms: f64,
    started_at: Option<f64>,
}

impl CountUp {
    pub fn new(target: u64, suffix: impl Into<String>) -> Self {
        Self {
            target,
            suffix: suffix.into(),
            easing: Easing::QuartOut,
            duration_ms: COUNT_UP_MS,
            started_at: None,
        }
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Build from a statistic element's text and its `data-target` and
    /// `data-easing` attributes. Unknown curve names keep the default.
    pub fn from_markup(text: &str, data_target: Option<&str>, data_easing: Option<&str>) -> Option<Self> {
        let (target, suffix) = parse_counter(text, data_target)?;
        let easing = data_easing.and_then(Easing::from_name).unwrap_or_default();
        Some(Self::new(target, suffix).with_easing(easing))
    }

    pub fn easing(&self) -> Easing {
        self.easing
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    /// Text at `now_ms`, and whether the count is finished.
    /// The first call fixes the start time.
    pub fn frame(&mut self, now_ms: f64) -> (String, bool) {
        let start = *self.started_at.get_or_insert(now_ms);
        let t = ((now_ms - start) / self.duration_ms) as f32;
        if t >= 1.0 {
            return (self.final_text(), true);
        }
        let value = (self.easing.apply(t) * self.target as f32).floor() as u64;
        (self.text_for(value.min(self.target)), false)
    }

    /// Text once finished. Shown immediately under reduced motion.
    pub fn final_text(&self) -> String {
        self.text_for(self.target)
    }

    fn text_for(&self, value: u64) -> String {
        format!("{}{}", value, self.suffix)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_number_and_suffix() {
        assert_eq!(parse_counter("3+", None), Some((3, "+".to_string())));
        assert_eq!(parse_counter(" 20 ", None), Some((20, String::new())));
        assert_eq!(parse_counter("0+", Some("15")), Some((15, "+".to_string())));
        assert_eq!(parse_counter("many", None), None);
        assert_eq!(parse_counter("many", Some("4")), Some((4, "many".to_string())));
    }

    #[test]
    fn counts_up_and_lands_on_target() {
        let mut c = CountUp::new(100, "+");
        assert_eq!(c.frame(1000.0), ("0+".to_string(), false));
        let (mid, done) = c.frame(2000.0);
        assert!(!done);
        // Quartic ease-out is at 93.75% halfway through.
        assert_eq!(mid, "93+");
        assert_eq!(c.frame(3000.0), ("100+".to_string(), true));
        assert_eq!(c.frame(9000.0), ("100+".to_string(), true));
    }

    #[test]
    fn linear_curve_is_proportional() {
        let mut c = CountUp::new(10, "").with_easing(Easing::Linear);
        c.frame(0.0);
        assert_eq!(c.frame(1000.0).0, "5");
    }

    #[test]
    fn markup_picks_the_curve() {
        let c = CountUp::from_markup("20+", None, Some("linear")).unwrap();
        assert_eq!((c.target(), c.easing()), (20, Easing::Linear));
        let c = CountUp::from_markup("5", Some("12"), Some("wobble")).unwrap();
        assert_eq!((c.target(), c.easing()), (12, Easing::QuartOut));
        let mut c = CountUp::from_markup("8", None, Some("easeInOutQuart")).unwrap();
        c.frame(0.0);
        assert_eq!(c.frame(1000.0).0, "4");
        assert!(CountUp::from_markup("n/a", None, None).is_none());
    }

    #[test]
    fn final_text_skips_the_animation() {
        assert_eq!(CountUp::new(3, "+").final_text(), "3+");
    }
}
