//! The three 16-bit event/reading mask words of full and compact sensor records.
//!
//! Each word is dual-purpose: threshold sensors read it as per-threshold event
//! and comparison flags, discrete sensors read it as a set of 15 state flags.
//! Which interpretation applies is decided by the event/reading type of the
//! sensor, see [`Mask::view`].
//!
//! Reference: IPMI 2.0 Specification, Table 43-1, bytes 15 to 20.

use super::EventReadingTypeCodes;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ThresholdKind {
    LowerNonCritical,
    LowerCritical,
    LowerNonRecoverable,
    UpperNonCritical,
    UpperCritical,
    UpperNonRecoverable,
}

impl ThresholdKind {
    /// All kinds, in mask bit order.
    pub const ALL: [Self; 6] = [
        Self::LowerNonCritical,
        Self::LowerCritical,
        Self::LowerNonRecoverable,
        Self::UpperNonCritical,
        Self::UpperCritical,
        Self::UpperNonRecoverable,
    ];

    pub fn is_upper(&self) -> bool {
        matches!(
            self,
            Self::UpperNonCritical | Self::UpperCritical | Self::UpperNonRecoverable
        )
    }

    pub fn short_name(&self) -> &'static str {
        match self {
            Self::LowerNonCritical => "lnc",
            Self::LowerCritical => "lc",
            Self::LowerNonRecoverable => "lnr",
            Self::UpperNonCritical => "unc",
            Self::UpperCritical => "uc",
            Self::UpperNonRecoverable => "unr",
        }
    }

    pub fn flag(&self) -> Thresholds {
        match self {
            Self::LowerNonCritical => Thresholds::LOWER_NON_CRITICAL,
            Self::LowerCritical => Thresholds::LOWER_CRITICAL,
            Self::LowerNonRecoverable => Thresholds::LOWER_NON_RECOVERABLE,
            Self::UpperNonCritical => Thresholds::UPPER_NON_CRITICAL,
            Self::UpperCritical => Thresholds::UPPER_CRITICAL,
            Self::UpperNonRecoverable => Thresholds::UPPER_NON_RECOVERABLE,
        }
    }
}

impl core::fmt::Display for ThresholdKind {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let name = match self {
            Self::LowerNonCritical => "Lower non-critical",
            Self::LowerCritical => "Lower critical",
            Self::LowerNonRecoverable => "Lower non-recoverable",
            Self::UpperNonCritical => "Upper non-critical",
            Self::UpperCritical => "Upper critical",
            Self::UpperNonRecoverable => "Upper non-recoverable",
        };
        write!(f, "{name}")
    }
}

bitflags::bitflags! {
    /// A set of threshold levels.
    pub struct Thresholds: u8 {
        const LOWER_NON_CRITICAL = 1 << 0;
        const LOWER_CRITICAL = 1 << 1;
        const LOWER_NON_RECOVERABLE = 1 << 2;
        const UPPER_NON_CRITICAL = 1 << 3;
        const UPPER_CRITICAL = 1 << 4;
        const UPPER_NON_RECOVERABLE = 1 << 5;
    }
}

impl Thresholds {
    pub fn kinds(&self) -> impl Iterator<Item = ThresholdKind> + '_ {
        ThresholdKind::ALL
            .into_iter()
            .filter(move |kind| self.contains(kind.flag()))
    }
}

bitflags::bitflags! {
    /// Threshold crossing events, going-low and going-high per level.
    pub struct ThresholdEvents: u16 {
        const LNC_GOING_LOW = 1 << 0;
        const LNC_GOING_HIGH = 1 << 1;
        const LC_GOING_LOW = 1 << 2;
        const LC_GOING_HIGH = 1 << 3;
        const LNR_GOING_LOW = 1 << 4;
        const LNR_GOING_HIGH = 1 << 5;
        const UNC_GOING_LOW = 1 << 6;
        const UNC_GOING_HIGH = 1 << 7;
        const UC_GOING_LOW = 1 << 8;
        const UC_GOING_HIGH = 1 << 9;
        const UNR_GOING_LOW = 1 << 10;
        const UNR_GOING_HIGH = 1 << 11;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventSlope {
    GoingLow,
    GoingHigh,
}

/// A single threshold crossing event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ThresholdEvent {
    pub kind: ThresholdKind,
    pub slope: EventSlope,
}

const THRESHOLD_EVENT_TABLE: [(ThresholdEvents, ThresholdKind, EventSlope); 12] = {
    use EventSlope::*;
    use ThresholdKind::*;

    [
        (ThresholdEvents::LNC_GOING_LOW, LowerNonCritical, GoingLow),
        (ThresholdEvents::LNC_GOING_HIGH, LowerNonCritical, GoingHigh),
        (ThresholdEvents::LC_GOING_LOW, LowerCritical, GoingLow),
        (ThresholdEvents::LC_GOING_HIGH, LowerCritical, GoingHigh),
        (
            ThresholdEvents::LNR_GOING_LOW,
            LowerNonRecoverable,
            GoingLow,
        ),
        (
            ThresholdEvents::LNR_GOING_HIGH,
            LowerNonRecoverable,
            GoingHigh,
        ),
        (ThresholdEvents::UNC_GOING_LOW, UpperNonCritical, GoingLow),
        (ThresholdEvents::UNC_GOING_HIGH, UpperNonCritical, GoingHigh),
        (ThresholdEvents::UC_GOING_LOW, UpperCritical, GoingLow),
        (ThresholdEvents::UC_GOING_HIGH, UpperCritical, GoingHigh),
        (
            ThresholdEvents::UNR_GOING_LOW,
            UpperNonRecoverable,
            GoingLow,
        ),
        (
            ThresholdEvents::UNR_GOING_HIGH,
            UpperNonRecoverable,
            GoingHigh,
        ),
    ]
};

impl ThresholdEvents {
    pub fn events(&self) -> Vec<ThresholdEvent> {
        THRESHOLD_EVENT_TABLE
            .iter()
            .filter(|(flag, _, _)| self.contains(*flag))
            .map(|(_, kind, slope)| ThresholdEvent {
                kind: *kind,
                slope: *slope,
            })
            .collect()
    }
}

/// Up to 15 discrete state offsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiscreteStates(u16);

impl DiscreteStates {
    pub const MASK: u16 = 0x7FFF;

    pub fn from_bits(value: u16) -> Self {
        Self(value & Self::MASK)
    }

    pub fn bits(&self) -> u16 {
        self.0
    }

    pub fn is_set(&self, offset: u8) -> bool {
        offset < 15 && (self.0 >> offset) & 1 == 1
    }

    pub fn offsets(&self) -> impl Iterator<Item = u8> + '_ {
        (0..15u8).filter(move |offset| self.is_set(*offset))
    }
}

fn comparison_bits(word: u16, levels: [Thresholds; 3]) -> Thresholds {
    levels
        .into_iter()
        .enumerate()
        .filter(|(idx, _)| (word >> (12 + idx)) & 1 == 1)
        .fold(Thresholds::empty(), |acc, (_, level)| acc | level)
}

/// Assertion event mask / lower threshold reading mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssertionLowerMask(u16);

impl AssertionLowerMask {
    pub fn parse(word: u16) -> Self {
        Self(word)
    }

    pub fn raw(&self) -> u16 {
        self.0
    }

    pub fn assertion_events(&self) -> ThresholdEvents {
        ThresholdEvents::from_bits_truncate(self.0)
    }

    /// Lower thresholds that are compared by the reading command.
    pub fn lower_comparisons(&self) -> Thresholds {
        comparison_bits(
            self.0,
            [
                Thresholds::LOWER_NON_CRITICAL,
                Thresholds::LOWER_CRITICAL,
                Thresholds::LOWER_NON_RECOVERABLE,
            ],
        )
    }

    pub fn states(&self) -> DiscreteStates {
        DiscreteStates::from_bits(self.0)
    }
}

/// Deassertion event mask / upper threshold reading mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeassertionUpperMask(u16);

impl DeassertionUpperMask {
    pub fn parse(word: u16) -> Self {
        Self(word)
    }

    pub fn raw(&self) -> u16 {
        self.0
    }

    pub fn deassertion_events(&self) -> ThresholdEvents {
        ThresholdEvents::from_bits_truncate(self.0)
    }

    pub fn upper_comparisons(&self) -> Thresholds {
        comparison_bits(
            self.0,
            [
                Thresholds::UPPER_NON_CRITICAL,
                Thresholds::UPPER_CRITICAL,
                Thresholds::UPPER_NON_RECOVERABLE,
            ],
        )
    }

    pub fn states(&self) -> DiscreteStates {
        DiscreteStates::from_bits(self.0)
    }
}

/// Settable / readable threshold mask, or the discrete reading mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReadingMask(u16);

impl ReadingMask {
    pub fn parse(word: u16) -> Self {
        Self(word)
    }

    pub fn raw(&self) -> u16 {
        self.0
    }

    pub fn readable(&self) -> Thresholds {
        Thresholds::from_bits_truncate((self.0 & 0x3F) as u8)
    }

    pub fn settable(&self) -> Thresholds {
        Thresholds::from_bits_truncate(((self.0 >> 8) & 0x3F) as u8)
    }

    pub fn states(&self) -> DiscreteStates {
        DiscreteStates::from_bits(self.0)
    }
}

/// The assertion and deassertion events a threshold sensor may generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportedThresholdEvents {
    pub assert: ThresholdEvents,
    pub deassert: ThresholdEvents,
}

impl SupportedThresholdEvents {
    pub fn filter_assert(&self) -> Vec<ThresholdEvent> {
        self.assert.events()
    }

    pub fn filter_deassert(&self) -> Vec<ThresholdEvent> {
        self.deassert.events()
    }
}

/// The threshold interpretation of a [`Mask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThresholdMask {
    pub readable: Thresholds,
    pub settable: Thresholds,
    pub comparisons: Thresholds,
    pub events: SupportedThresholdEvents,
}

/// The discrete interpretation of a [`Mask`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DiscreteMask {
    pub assertion: DiscreteStates,
    pub deassertion: DiscreteStates,
    pub readable: DiscreteStates,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MaskView {
    Threshold(ThresholdMask),
    Discrete(DiscreteMask),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mask {
    pub assertion_lower: AssertionLowerMask,
    pub deassertion_upper: DeassertionUpperMask,
    pub reading: ReadingMask,
}

impl Mask {
    pub const SIZE: usize = 6;

    /// Decode the three little-endian words at the start of `data`.
    pub fn parse(data: &[u8]) -> Option<Self> {
        if data.len() < Self::SIZE {
            return None;
        }

        let word = |idx: usize| u16::from_le_bytes([data[idx], data[idx + 1]]);

        Some(Self {
            assertion_lower: AssertionLowerMask::parse(word(0)),
            deassertion_upper: DeassertionUpperMask::parse(word(2)),
            reading: ReadingMask::parse(word(4)),
        })
    }

    pub fn readable_thresholds(&self) -> Thresholds {
        self.reading.readable()
    }

    pub fn settable_thresholds(&self) -> Thresholds {
        self.reading.settable()
    }

    pub fn supported_threshold_events(&self) -> SupportedThresholdEvents {
        SupportedThresholdEvents {
            assert: self.assertion_lower.assertion_events(),
            deassert: self.deassertion_upper.deassertion_events(),
        }
    }

    pub fn view(&self, event_reading_type: &EventReadingTypeCodes) -> MaskView {
        if event_reading_type.is_threshold() {
            MaskView::Threshold(ThresholdMask {
                readable: self.readable_thresholds(),
                settable: self.settable_thresholds(),
                comparisons: self.assertion_lower.lower_comparisons()
                    | self.deassertion_upper.upper_comparisons(),
                events: self.supported_threshold_events(),
            })
        } else {
            MaskView::Discrete(DiscreteMask {
                assertion: self.assertion_lower.states(),
                deassertion: self.deassertion_upper.states(),
                readable: self.reading.states(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_assert_matches_set_bits() {
        for word in 0..=u16::MAX {
            let mask = Mask {
                assertion_lower: AssertionLowerMask::parse(word),
                deassertion_upper: DeassertionUpperMask::parse(0),
                reading: ReadingMask::parse(0),
            };

            let events = mask.supported_threshold_events().filter_assert();
            assert_eq!(events.len() as u32, (word & 0x0FFF).count_ones());

            for event in events {
                let idx = ThresholdKind::ALL
                    .iter()
                    .position(|k| *k == event.kind)
                    .unwrap();
                let bit = idx * 2 + usize::from(event.slope == EventSlope::GoingHigh);
                assert!(word & (1 << bit) != 0);
            }
        }
    }

    #[test]
    fn comparisons() {
        let lower = AssertionLowerMask::parse(0b0101 << 12);
        assert_eq!(
            lower.lower_comparisons(),
            Thresholds::LOWER_NON_CRITICAL | Thresholds::LOWER_NON_RECOVERABLE
        );

        let upper = DeassertionUpperMask::parse(0b0110 << 12);
        assert_eq!(
            upper.upper_comparisons(),
            Thresholds::UPPER_CRITICAL | Thresholds::UPPER_NON_RECOVERABLE
        );
    }

    #[test]
    fn views() {
        let mask = Mask::parse(&[0x95, 0x7A, 0x95, 0x7A, 0x3F, 0x1B]).unwrap();

        match mask.view(&EventReadingTypeCodes::Threshold) {
            MaskView::Threshold(view) => {
                assert_eq!(view.readable, Thresholds::all());
                assert_eq!(
                    view.settable,
                    Thresholds::LOWER_NON_CRITICAL
                        | Thresholds::LOWER_CRITICAL
                        | Thresholds::UPPER_NON_CRITICAL
                        | Thresholds::UPPER_CRITICAL
                );
                assert_eq!(
                    view.settable.kinds().collect::<Vec<_>>(),
                    vec![
                        ThresholdKind::LowerNonCritical,
                        ThresholdKind::LowerCritical,
                        ThresholdKind::UpperNonCritical,
                        ThresholdKind::UpperCritical,
                    ]
                );
                assert_eq!(view.comparisons, Thresholds::all());
            }
            MaskView::Discrete(_) => panic!("Expected threshold view"),
        }

        match mask.view(&EventReadingTypeCodes::SensorSpecific) {
            MaskView::Discrete(view) => {
                assert_eq!(view.assertion.bits(), 0x7A95);
                assert!(view.readable.is_set(0));
                assert!(!view.readable.is_set(15));
            }
            MaskView::Threshold(_) => panic!("Expected discrete view"),
        }
    }
}
