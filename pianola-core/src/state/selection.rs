use pianola_types::{PitchClass, PitchLabel};

/// Index of the selected key. Always within `0..=PitchClass::MAX_INDEX`;
/// moves clamp at both ends instead of wrapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection(usize);

impl Selection {
    pub fn new(index: usize) -> Self {
        Self(index.min(PitchClass::MAX_INDEX))
    }

    pub fn index(&self) -> usize {
        self.0
    }

    pub fn up(&mut self) {
        self.0 = (self.0 + 1).min(PitchClass::MAX_INDEX);
    }

    pub fn down(&mut self) {
        self.0 = self.0.saturating_sub(1);
    }

    pub fn set(&mut self, index: usize) {
        self.0 = index.min(PitchClass::MAX_INDEX);
    }

    pub fn pitch_class(&self) -> PitchClass {
        PitchClass::from_index(self.0)
    }

    /// Label of the selected key at the playing octave
    pub fn pitch(&self) -> PitchLabel {
        PitchLabel::at_default_octave(self.pitch_class())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn up_clamps_at_top() {
        let mut sel = Selection::new(0);
        for _ in 0..20 {
            sel.up();
        }
        assert_eq!(sel.index(), 6);
        assert_eq!(sel.pitch().to_string(), "B4");
    }

    #[test]
    fn down_clamps_at_bottom() {
        let mut sel = Selection::new(6);
        for _ in 0..20 {
            sel.down();
        }
        assert_eq!(sel.index(), 0);
        assert_eq!(sel.pitch().to_string(), "C4");
    }

    #[test]
    fn set_and_new_clamp() {
        let mut sel = Selection::new(99);
        assert_eq!(sel.index(), 6);
        sel.set(2);
        assert_eq!(sel.pitch_class(), PitchClass::E);
        sel.set(7);
        assert_eq!(sel.index(), 6);
    }
}
