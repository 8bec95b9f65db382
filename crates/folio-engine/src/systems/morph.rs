//! Clip-path shape morphing: a fixed cycle of polygons.

/// The cycle. The last shape repeats the first so the loop closes smoothly.
pub const MORPH_SHAPES: [&str; 4] = [
    "polygon(50% 0%, 0% 100%, 100% 100%)",
    "polygon(50% 0%, 100% 50%, 50% 100%, 0% 50%)",
    "polygon(30% 0%, 70% 0%, 100% 30%, 100% 70%, 70% 100%, 30% 100%, 0% 70%, 0% 30%)",
    "polygon(50% 0%, 0% 100%, 100% 100%)",
];

/// Position in the morph cycle. Starts at 0 and never terminates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MorphState {
    index: usize,
}

impl MorphState {
    pub fn new() -> Self {
        Self { index: 0 }
    }

    /// Index of the shape the next tick will apply.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Return the current shape and advance, wrapping after the last one.
    pub fn tick(&mut self) -> &'static str {
        let shape = MORPH_SHAPES[self.index];
        self.index = (self.index + 1) % MORPH_SHAPES.len();
        shape
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cycles_in_order() {
        let mut m = MorphState::new();
        assert_eq!(m.tick(), MORPH_SHAPES[0]);
        assert_eq!(m.tick(), MORPH_SHAPES[1]);
        assert_eq!(m.tick(), MORPH_SHAPES[2]);
        assert_eq!(m.tick(), MORPH_SHAPES[3]);
    }

    #[test]
    fn wraps_after_four_ticks() {
        let mut m = MorphState::new();
        for _ in 0..4 {
            m.tick();
        }
        assert_eq!(m.index(), 0);
        assert_eq!(m.tick(), MORPH_SHAPES[0]);
    }
}
