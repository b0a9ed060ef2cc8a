//! Armor-class inference from observed attack totals.
//!
//! The monster's AC is hidden. Every informative player attack narrows a
//! bracket: a hit with total `T` proves `AC <= T`, a miss proves `AC > T`.
//! Once the lowest hit sits exactly one above the highest miss the AC is known.

/// What the presentation layer may show about the monster's AC.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ArmorClassDisplay {
    Known(i32),
    /// `at_most` is absent until the first hit is observed.
    Bracket { at_least: i32, at_most: Option<i32> },
    Unknown,
}

impl core::fmt::Display for ArmorClassDisplay {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Known(ac) => write!(f, "AC {ac}"),
            Self::Bracket {
                at_least,
                at_most: Some(at_most),
            } => write!(f, "AC {at_least}-{at_most}"),
            Self::Bracket { at_least, at_most: None } => write!(f, "AC {at_least}+"),
            Self::Unknown => f.write_str("AC ?"),
        }
    }
}

/// Running hit/miss extrema for one encounter.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArmorClassTracker {
    /// `None` stands for +∞ (no hit observed yet).
    lowest_hit: Option<i32>,
    highest_miss: i32,
    discovered: bool,
    /// Known from the codex before the encounter started; tracking is skipped.
    already_known: bool,
}

impl ArmorClassTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tracker for a species whose AC was unlocked in an earlier encounter.
    pub fn known() -> Self {
        Self {
            already_known: true,
            ..Self::default()
        }
    }

    /// Records one informative attack total. Returns true only on the call
    /// that closes the bracket.
    pub fn observe(&mut self, total: i32, hit: bool) -> bool {
        if self.is_known() {
            return false;
        }
        if hit {
            self.lowest_hit = Some(self.lowest_hit.map_or(total, |lowest| lowest.min(total)));
        } else {
            self.highest_miss = self.highest_miss.max(total);
        }
        self.discovered = self.lowest_hit == Some(self.highest_miss + 1);
        self.discovered
    }

    pub fn is_known(&self) -> bool {
        self.discovered || self.already_known
    }

    /// Discovered during this encounter (not carried over from the codex).
    pub fn discovered_here(&self) -> bool {
        self.discovered
    }

    pub fn lowest_hit(&self) -> Option<i32> {
        self.lowest_hit
    }

    pub fn highest_miss(&self) -> i32 {
        self.highest_miss
    }

    pub fn display(&self, true_ac: i32) -> ArmorClassDisplay {
        if self.is_known() {
            return ArmorClassDisplay::Known(true_ac);
        }
        if self.lowest_hit.is_none() && self.highest_miss == 0 {
            return ArmorClassDisplay::Unknown;
        }
        ArmorClassDisplay::Bracket {
            at_least: self.highest_miss + 1,
            at_most: self.lowest_hit,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_hit_and_miss_discover() {
        let mut tracker = ArmorClassTracker::new();
        assert!(!tracker.observe(12, false));
        assert!(tracker.observe(13, true));
        assert!(tracker.is_known());
        assert_eq!(tracker.display(13), ArmorClassDisplay::Known(13));
    }

    #[test]
    fn discovery_is_sticky() {
        let mut tracker = ArmorClassTracker::new();
        tracker.observe(14, true);
        tracker.observe(13, false);
        assert!(tracker.is_known());
        assert!(!tracker.observe(20, true));
        assert!(!tracker.observe(5, false));
        assert!(tracker.is_known());
    }

    #[test]
    fn bracket_narrows() {
        let mut tracker = ArmorClassTracker::new();
        assert_eq!(tracker.display(15), ArmorClassDisplay::Unknown);

        tracker.observe(11, false);
        assert_eq!(
            tracker.display(15),
            ArmorClassDisplay::Bracket {
                at_least: 12,
                at_most: None
            }
        );

        tracker.observe(18, true);
        tracker.observe(16, true);
        assert_eq!(
            tracker.display(15),
            ArmorClassDisplay::Bracket {
                at_least: 12,
                at_most: Some(16)
            }
        );
        assert_eq!(tracker.display(15).to_string(), "AC 12-16");
    }

    #[test]
    fn known_species_skips_tracking() {
        let mut tracker = ArmorClassTracker::known();
        assert!(!tracker.observe(9, false));
        assert!(!tracker.observe(10, true));
        assert!(!tracker.discovered_here());
        assert_eq!(tracker.lowest_hit(), None);
        assert_eq!(tracker.display(10), ArmorClassDisplay::Known(10));
    }
}
