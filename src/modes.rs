// src/modes.rs

/// One partition's row span, embedded literally into its filename.
///
/// `end` may be `-1` ("to end of data"); it is only ever formatted, never
/// used for arithmetic.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangePair {
    pub start: i64,
    pub end: i64,
}

const fn rp(start: i64, end: i64) -> RangePair {
    RangePair { start, end }
}

/// Which filename layout a mode's partitions use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// `<dataset>/<mode>_<start>_<end>.csv`
    Partitioned,
    /// `<dataset>/validated/cc12m_images_pos_neg_<start>_<end>_filtered.csv`
    Validated,
}

#[derive(Debug)]
pub struct Mode {
    pub name: &'static str,
    pub ranges: &'static [RangePair],
    pub template: Template,
}

pub const DEFAULT_MODE: &str = "cc12m_images_extracted_pos";

static EXTRACTED_POS_RANGES: &[RangePair] = &[
    rp(0, 666925),
    rp(666925, 1333850),
    rp(1333850, 2000775),
    rp(2000775, 2667700),
    rp(2667700, 3334625),
    rp(3334625, 4001550),
    rp(4001550, 4668475),
    rp(4668475, 5335400),
    rp(5335400, 6002325),
    rp(6002325, 6669250),
    rp(6669250, 7336175),
    rp(7336175, 8003100),
    rp(8003100, 8670025),
    rp(8670025, 9336950),
    rp(9336950, 10003875),
    rp(10003875, 10003876), // remaining rows
];

static POS_NEG_RANGES: &[RangePair] = &[
    rp(0, 625242),
    rp(625242, 1250484),
    rp(1250484, 1875726),
    rp(1875726, 2500968),
    rp(2500968, 3126210),
    rp(3126210, 3751452),
    rp(3751452, 4376694),
    rp(4376694, 5001936),
    rp(5001936, 5627178),
    rp(5627178, 6252420),
    rp(6252420, 6877662),
    rp(6877662, 7502904),
    rp(7502904, 8128146),
    rp(8128146, 8753388),
    rp(8753388, 9378630),
    rp(9378630, 10003876), // remaining rows
];

static POS_NEG_FILTERED_RANGES: &[RangePair] = &[
    rp(0, 416828),
    rp(416828, 833656),
    rp(833656, 1250484),
    rp(1250484, 1667312),
    rp(1667312, 2084140),
    rp(2084140, 2500968),
    rp(2500968, 2917796),
    rp(2917796, 3334624),
    rp(3334624, 3751452),
    rp(3751452, 4168280),
    rp(4168280, 4585108),
    rp(4585108, 5001936),
    rp(5001936, 5418764),
    rp(5418764, 5835592),
    rp(5835592, 6252420),
    rp(6252420, 6669248),
    rp(6669248, 7086076),
    rp(7086076, 7502904),
    rp(7502904, 7919732),
    rp(7919732, 8336560),
    rp(8336560, 8753388),
    rp(8753388, 9170216),
    rp(9170216, 9587044),
    rp(9587044, -1), // remaining rows
];

/// Every supported `csv_type`, in the order they are listed to users.
pub static MODES: &[Mode] = &[
    Mode {
        name: "cc12m_images_extracted_pos",
        ranges: EXTRACTED_POS_RANGES,
        template: Template::Partitioned,
    },
    Mode {
        name: "cc12m_images_extracted_pos_neg",
        ranges: POS_NEG_RANGES,
        template: Template::Partitioned,
    },
    Mode {
        name: "cc12m_images_captioned_llama3.1_neg_captions",
        ranges: POS_NEG_RANGES,
        template: Template::Partitioned,
    },
    Mode {
        name: "cc12m_images_pos_neg_validated",
        ranges: POS_NEG_RANGES,
        template: Template::Validated,
    },
    Mode {
        name: "cc12m_images_pos_neg_filtered",
        ranges: POS_NEG_FILTERED_RANGES,
        template: Template::Partitioned,
    },
];

/// Exact, case-sensitive lookup of a mode by name.
pub fn lookup(name: &str) -> Option<&'static Mode> {
    MODES.iter().find(|m| m.name == name)
}

pub fn names() -> impl Iterator<Item = &'static str> {
    MODES.iter().map(|m| m.name)
}
