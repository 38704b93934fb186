//! Built-in gradient and flag palettes
use super::{GradientStop, stop};
use crate::color::rgb_from_u32;

/// Named gradient in the rotation table
#[derive(Debug, Clone, Copy)]
pub struct Gradient {
    pub name: &'static str,
    pub stops: &'static [GradientStop],
}

/// Flag gradient and the number of distinct bands worth tracking
#[derive(Debug, Clone, Copy)]
pub struct FlagGradient {
    pub name: &'static str,
    pub stops: &'static [GradientStop],
    /// Bands laid out in the gradient, one per pair of stops
    pub bands: u8,
    /// Bands exposed as tracked colors, fewer when the flag repeats itself
    pub tracked_bands: u8,
}

const fn hex(pos: u8, color: u32) -> GradientStop {
    GradientStop {
        pos,
        color: rgb_from_u32(color),
    }
}

const SUNSET_REAL: [GradientStop; 7] = [
    stop(0, 120, 0, 0),
    stop(22, 179, 22, 0),
    stop(51, 255, 104, 0),
    stop(85, 167, 22, 18),
    stop(135, 100, 0, 103),
    stop(198, 16, 0, 130),
    stop(255, 0, 0, 160),
];

const ES_RIVENDELL_15: [GradientStop; 5] = [
    stop(0, 1, 14, 5),
    stop(101, 16, 36, 14),
    stop(165, 56, 68, 30),
    stop(242, 150, 156, 99),
    stop(255, 150, 156, 99),
];

const ES_OCEAN_BREEZE_036: [GradientStop; 4] = [
    stop(0, 1, 6, 7),
    stop(89, 1, 99, 111),
    stop(153, 144, 209, 255),
    stop(255, 0, 73, 82),
];

const RGI_15: [GradientStop; 9] = [
    stop(0, 4, 1, 31),
    stop(31, 55, 1, 16),
    stop(63, 197, 3, 7),
    stop(95, 59, 2, 17),
    stop(127, 6, 2, 34),
    stop(159, 39, 6, 33),
    stop(191, 112, 13, 32),
    stop(223, 56, 9, 35),
    stop(255, 22, 6, 38),
];

const RETRO2_16: [GradientStop; 2] = [
    stop(0, 188, 135, 1),
    stop(255, 46, 7, 1),
];

const ANALOGOUS_1: [GradientStop; 5] = [
    stop(0, 3, 0, 255),
    stop(63, 23, 0, 255),
    stop(127, 67, 0, 255),
    stop(191, 142, 0, 45),
    stop(255, 255, 0, 0),
];

const ES_PINKSPLASH_08: [GradientStop; 5] = [
    stop(0, 126, 11, 255),
    stop(127, 197, 1, 22),
    stop(175, 210, 157, 172),
    stop(221, 157, 3, 112),
    stop(255, 157, 3, 112),
];

const CORAL_REEF: [GradientStop; 6] = [
    stop(0, 40, 199, 197),
    stop(50, 10, 152, 155),
    stop(96, 1, 111, 120),
    stop(96, 43, 127, 162),
    stop(139, 10, 73, 111),
    stop(255, 1, 34, 71),
];

const ES_OCEAN_BREEZE_068: [GradientStop; 6] = [
    stop(0, 100, 156, 153),
    stop(51, 1, 99, 137),
    stop(101, 1, 68, 84),
    stop(104, 35, 142, 168),
    stop(178, 0, 63, 117),
    stop(255, 1, 10, 10),
];

const ES_PINKSPLASH_07: [GradientStop; 7] = [
    stop(0, 229, 1, 1),
    stop(61, 242, 4, 63),
    stop(101, 255, 12, 255),
    stop(127, 249, 81, 252),
    stop(153, 255, 11, 235),
    stop(193, 244, 5, 68),
    stop(255, 232, 1, 5),
];

const ES_VINTAGE_01: [GradientStop; 8] = [
    stop(0, 4, 1, 1),
    stop(51, 16, 0, 1),
    stop(76, 97, 104, 3),
    stop(101, 255, 131, 19),
    stop(127, 67, 9, 4),
    stop(153, 16, 0, 1),
    stop(229, 4, 1, 1),
    stop(255, 4, 1, 1),
];

const DEPARTURE: [GradientStop; 12] = [
    stop(0, 8, 3, 0),
    stop(42, 23, 7, 0),
    stop(63, 75, 38, 6),
    stop(84, 169, 99, 38),
    stop(106, 213, 169, 119),
    stop(116, 255, 255, 255),
    stop(138, 135, 255, 138),
    stop(148, 22, 255, 24),
    stop(170, 0, 255, 0),
    stop(191, 0, 136, 0),
    stop(212, 0, 55, 0),
    stop(255, 0, 55, 0),
];

const ES_LANDSCAPE_64: [GradientStop; 9] = [
    stop(0, 0, 0, 0),
    stop(37, 2, 25, 1),
    stop(76, 15, 115, 5),
    stop(127, 79, 213, 1),
    stop(128, 126, 211, 47),
    stop(130, 188, 209, 247),
    stop(153, 144, 182, 205),
    stop(204, 59, 117, 250),
    stop(255, 1, 37, 192),
];

const ES_LANDSCAPE_33: [GradientStop; 6] = [
    stop(0, 1, 5, 0),
    stop(19, 32, 23, 1),
    stop(38, 161, 55, 1),
    stop(63, 229, 144, 1),
    stop(66, 39, 142, 74),
    stop(255, 1, 4, 1),
];

const RAINBOWSHERBET: [GradientStop; 7] = [
    stop(0, 255, 33, 4),
    stop(43, 255, 68, 25),
    stop(86, 255, 7, 25),
    stop(127, 255, 82, 103),
    stop(170, 255, 255, 242),
    stop(209, 42, 255, 22),
    stop(255, 87, 255, 65),
];

const GR65_HULT: [GradientStop; 6] = [
    stop(0, 247, 176, 247),
    stop(48, 255, 136, 255),
    stop(89, 220, 29, 226),
    stop(160, 7, 82, 178),
    stop(216, 1, 124, 109),
    stop(255, 1, 124, 109),
];

const GR64_HULT: [GradientStop; 8] = [
    stop(0, 1, 124, 109),
    stop(66, 1, 93, 79),
    stop(104, 52, 65, 1),
    stop(130, 115, 127, 1),
    stop(150, 52, 65, 1),
    stop(201, 1, 86, 72),
    stop(239, 0, 55, 45),
    stop(255, 0, 55, 45),
];

const GMT_DRYWET: [GradientStop; 7] = [
    stop(0, 47, 30, 2),
    stop(42, 213, 147, 24),
    stop(84, 103, 219, 52),
    stop(127, 3, 219, 207),
    stop(170, 1, 48, 214),
    stop(212, 1, 1, 111),
    stop(255, 1, 7, 33),
];

const IB_JUL01: [GradientStop; 4] = [
    stop(0, 194, 1, 1),
    stop(94, 1, 29, 18),
    stop(132, 57, 131, 28),
    stop(255, 113, 1, 1),
];

const ES_VINTAGE_57: [GradientStop; 5] = [
    stop(0, 2, 1, 1),
    stop(53, 18, 1, 0),
    stop(104, 69, 29, 1),
    stop(153, 167, 135, 10),
    stop(255, 46, 56, 4),
];

const IB15: [GradientStop; 6] = [
    stop(0, 113, 91, 147),
    stop(72, 157, 88, 78),
    stop(89, 208, 85, 33),
    stop(107, 255, 29, 11),
    stop(141, 137, 31, 39),
    stop(255, 59, 33, 89),
];

const FUSCHIA_7: [GradientStop; 5] = [
    stop(0, 43, 3, 153),
    stop(63, 100, 4, 103),
    stop(127, 188, 5, 66),
    stop(191, 161, 11, 115),
    stop(255, 135, 20, 182),
];

const ES_EMERALD_DRAGON_08: [GradientStop; 4] = [
    stop(0, 97, 255, 1),
    stop(101, 47, 133, 1),
    stop(178, 13, 43, 1),
    stop(255, 2, 10, 1),
];

const LAVA: [GradientStop; 13] = [
    stop(0, 0, 0, 0),
    stop(46, 18, 0, 0),
    stop(96, 113, 0, 0),
    stop(108, 142, 3, 1),
    stop(119, 175, 17, 1),
    stop(146, 213, 44, 2),
    stop(174, 255, 82, 4),
    stop(188, 255, 115, 4),
    stop(202, 255, 156, 4),
    stop(218, 255, 203, 4),
    stop(234, 255, 255, 4),
    stop(244, 255, 255, 71),
    stop(255, 255, 255, 255),
];

const FIRE: [GradientStop; 7] = [
    stop(0, 1, 1, 0),
    stop(76, 32, 5, 0),
    stop(146, 192, 24, 0),
    stop(197, 220, 105, 5),
    stop(240, 252, 255, 31),
    stop(250, 252, 255, 111),
    stop(255, 255, 255, 255),
];

const COLORFULL: [GradientStop; 11] = [
    stop(0, 10, 85, 5),
    stop(25, 29, 109, 18),
    stop(60, 59, 138, 42),
    stop(93, 83, 99, 52),
    stop(106, 110, 66, 64),
    stop(109, 123, 49, 65),
    stop(113, 139, 35, 66),
    stop(116, 192, 117, 98),
    stop(124, 255, 255, 137),
    stop(168, 100, 180, 155),
    stop(255, 22, 121, 174),
];

const MAGENTA_EVENING: [GradientStop; 7] = [
    stop(0, 71, 27, 39),
    stop(31, 130, 11, 51),
    stop(63, 213, 2, 64),
    stop(70, 232, 1, 66),
    stop(76, 252, 1, 69),
    stop(108, 123, 2, 51),
    stop(255, 46, 9, 35),
];

const PINK_PURPLE: [GradientStop; 11] = [
    stop(0, 19, 2, 39),
    stop(25, 26, 4, 45),
    stop(51, 33, 6, 52),
    stop(76, 68, 62, 125),
    stop(102, 118, 187, 240),
    stop(109, 163, 215, 247),
    stop(114, 217, 244, 255),
    stop(122, 159, 149, 221),
    stop(149, 113, 78, 188),
    stop(183, 128, 57, 155),
    stop(255, 146, 40, 123),
];

const ES_AUTUMN_19: [GradientStop; 13] = [
    stop(0, 26, 1, 1),
    stop(51, 67, 4, 1),
    stop(84, 118, 14, 1),
    stop(104, 137, 152, 52),
    stop(112, 113, 65, 1),
    stop(122, 133, 149, 59),
    stop(124, 137, 152, 52),
    stop(135, 113, 65, 1),
    stop(142, 139, 154, 46),
    stop(163, 113, 13, 1),
    stop(204, 55, 3, 1),
    stop(249, 17, 1, 1),
    stop(255, 17, 1, 1),
];

const BLACK_BLUE_MAGENTA_WHITE: [GradientStop; 7] = [
    stop(0, 0, 0, 0),
    stop(42, 0, 0, 45),
    stop(84, 0, 0, 255),
    stop(127, 42, 0, 255),
    stop(170, 255, 0, 255),
    stop(212, 255, 55, 255),
    stop(255, 255, 255, 255),
];

const BLACK_MAGENTA_RED: [GradientStop; 5] = [
    stop(0, 0, 0, 0),
    stop(63, 42, 0, 45),
    stop(127, 255, 0, 255),
    stop(191, 255, 0, 45),
    stop(255, 255, 0, 0),
];

const BLACK_RED_MAGENTA_YELLOW: [GradientStop; 7] = [
    stop(0, 0, 0, 0),
    stop(42, 42, 0, 0),
    stop(84, 255, 0, 0),
    stop(127, 255, 0, 45),
    stop(170, 255, 0, 255),
    stop(212, 255, 55, 45),
    stop(255, 255, 255, 0),
];

const BLUE_CYAN_YELLOW: [GradientStop; 5] = [
    stop(0, 0, 0, 255),
    stop(63, 0, 55, 255),
    stop(127, 0, 255, 255),
    stop(191, 42, 255, 45),
    stop(255, 255, 255, 0),
];

const TRANS_FLAG: [GradientStop; 10] = [
    hex(0, 0x2A9FFA),
    hex(50, 0x2A9FFA),
    hex(51, 0xF15570),
    hex(101, 0xF15570),
    hex(102, 0xFFFFFF),
    hex(152, 0xFFFFFF),
    hex(153, 0xF15570),
    hex(203, 0xF15570),
    hex(204, 0x2A9FFA),
    hex(255, 0x2A9FFA),
];

const ENBY_FLAG: [GradientStop; 6] = [
    hex(0, 0xFFF430),
    hex(85, 0xFFF430),
    hex(86, 0xFFFFFF),
    hex(170, 0xFFFFFF),
    hex(171, 0x6E07D7),
    hex(255, 0x6E07D7),
];

const GENDERQUEER_FLAG: [GradientStop; 6] = [
    hex(0, 0x8E20D7),
    hex(85, 0x8E20D7),
    hex(86, 0xFFFFFF),
    hex(170, 0xFFFFFF),
    hex(171, 0x288210),
    hex(255, 0x288210),
];

const PRIDE_FLAG: [GradientStop; 12] = [
    hex(0, 0xF40303),
    hex(42, 0xF40303),
    hex(43, 0xCF3500),
    hex(85, 0xCF3500),
    hex(86, 0xFFED00),
    hex(127, 0xFFED00),
    hex(128, 0x00C026),
    hex(170, 0x00C026),
    hex(171, 0x002DFF),
    hex(212, 0x002DFF),
    hex(213, 0x7507B7),
    hex(255, 0x7507B7),
];

const BI_FLAG: [GradientStop; 6] = [
    hex(0, 0xB60240),
    hex(101, 0xB60240),
    hex(102, 0x6E07D7),
    hex(152, 0x6E07D7),
    hex(153, 0x0038D8),
    hex(255, 0x0038D8),
];

const LESBIAN_FLAG: [GradientStop; 10] = [
    hex(0, 0xD62900),
    hex(50, 0xD62900),
    hex(51, 0xCF5F20),
    hex(101, 0xCF5F20),
    hex(102, 0xFFFFFF),
    hex(152, 0xFFFFFF),
    hex(153, 0xD15060),
    hex(204, 0xD15570),
    hex(205, 0x900052),
    hex(255, 0x900052),
];

const PAN_FLAG: [GradientStop; 6] = [
    hex(0, 0xFF1B8D),
    hex(85, 0xFF1B8D),
    hex(86, 0xFFDA00),
    hex(170, 0xFFDA00),
    hex(171, 0x1BB3FF),
    hex(255, 0x1BB3FF),
];

const INTERSEX_FLAG: [GradientStop; 8] = [
    hex(0, 0x6E07D7),
    hex(63, 0x6E07D7),
    hex(64, 0xFFFF00),
    hex(127, 0xFFFF00),
    hex(128, 0x6E07D7),
    hex(191, 0x6E07D7),
    hex(192, 0xFFFF00),
    hex(255, 0xFFFF00),
];

/// Gradients picked from by palette rotation
pub static GRADIENTS: [Gradient; 40] = [
    Gradient {
        name: "sunset_real",
        stops: &SUNSET_REAL,
    },
    Gradient {
        name: "es_rivendell_15",
        stops: &ES_RIVENDELL_15,
    },
    Gradient {
        name: "es_ocean_breeze_036",
        stops: &ES_OCEAN_BREEZE_036,
    },
    Gradient {
        name: "rgi_15",
        stops: &RGI_15,
    },
    Gradient {
        name: "retro2_16",
        stops: &RETRO2_16,
    },
    Gradient {
        name: "analogous_1",
        stops: &ANALOGOUS_1,
    },
    Gradient {
        name: "es_pinksplash_08",
        stops: &ES_PINKSPLASH_08,
    },
    Gradient {
        name: "coral_reef",
        stops: &CORAL_REEF,
    },
    Gradient {
        name: "es_ocean_breeze_068",
        stops: &ES_OCEAN_BREEZE_068,
    },
    Gradient {
        name: "es_pinksplash_07",
        stops: &ES_PINKSPLASH_07,
    },
    Gradient {
        name: "es_vintage_01",
        stops: &ES_VINTAGE_01,
    },
    Gradient {
        name: "departure",
        stops: &DEPARTURE,
    },
    Gradient {
        name: "es_landscape_64",
        stops: &ES_LANDSCAPE_64,
    },
    Gradient {
        name: "es_landscape_33",
        stops: &ES_LANDSCAPE_33,
    },
    Gradient {
        name: "rainbowsherbet",
        stops: &RAINBOWSHERBET,
    },
    Gradient {
        name: "gr65_hult",
        stops: &GR65_HULT,
    },
    Gradient {
        name: "gr64_hult",
        stops: &GR64_HULT,
    },
    Gradient {
        name: "gmt_drywet",
        stops: &GMT_DRYWET,
    },
    Gradient {
        name: "ib_jul01",
        stops: &IB_JUL01,
    },
    Gradient {
        name: "es_vintage_57",
        stops: &ES_VINTAGE_57,
    },
    Gradient {
        name: "ib15",
        stops: &IB15,
    },
    Gradient {
        name: "fuschia_7",
        stops: &FUSCHIA_7,
    },
    Gradient {
        name: "es_emerald_dragon_08",
        stops: &ES_EMERALD_DRAGON_08,
    },
    Gradient {
        name: "lava",
        stops: &LAVA,
    },
    Gradient {
        name: "fire",
        stops: &FIRE,
    },
    Gradient {
        name: "colorfull",
        stops: &COLORFULL,
    },
    Gradient {
        name: "magenta_evening",
        stops: &MAGENTA_EVENING,
    },
    Gradient {
        name: "pink_purple",
        stops: &PINK_PURPLE,
    },
    Gradient {
        name: "es_autumn_19",
        stops: &ES_AUTUMN_19,
    },
    Gradient {
        name: "black_blue_magenta_white",
        stops: &BLACK_BLUE_MAGENTA_WHITE,
    },
    Gradient {
        name: "black_magenta_red",
        stops: &BLACK_MAGENTA_RED,
    },
    Gradient {
        name: "black_red_magenta_yellow",
        stops: &BLACK_RED_MAGENTA_YELLOW,
    },
    Gradient {
        name: "blue_cyan_yellow",
        stops: &BLUE_CYAN_YELLOW,
    },
    Gradient {
        name: "trans_flag",
        stops: &TRANS_FLAG,
    },
    Gradient {
        name: "enby_flag",
        stops: &ENBY_FLAG,
    },
    Gradient {
        name: "genderqueer_flag",
        stops: &GENDERQUEER_FLAG,
    },
    Gradient {
        name: "pride_flag",
        stops: &PRIDE_FLAG,
    },
    Gradient {
        name: "bi_flag",
        stops: &BI_FLAG,
    },
    Gradient {
        name: "lesbian_flag",
        stops: &LESBIAN_FLAG,
    },
    Gradient {
        name: "pan_flag",
        stops: &PAN_FLAG,
    },
];

/// Flags in stepping order
pub static FLAGS: [FlagGradient; 8] = [
    FlagGradient {
        name: "trans",
        stops: &TRANS_FLAG,
        bands: 5,
        tracked_bands: 3,
    },
    FlagGradient {
        name: "enby",
        stops: &ENBY_FLAG,
        bands: 3,
        tracked_bands: 3,
    },
    FlagGradient {
        name: "genderqueer",
        stops: &GENDERQUEER_FLAG,
        bands: 3,
        tracked_bands: 3,
    },
    FlagGradient {
        name: "intersex",
        stops: &INTERSEX_FLAG,
        bands: 4,
        tracked_bands: 4,
    },
    FlagGradient {
        name: "pride",
        stops: &PRIDE_FLAG,
        bands: 6,
        tracked_bands: 6,
    },
    FlagGradient {
        name: "bi",
        stops: &BI_FLAG,
        bands: 3,
        tracked_bands: 3,
    },
    FlagGradient {
        name: "lesbian",
        stops: &LESBIAN_FLAG,
        bands: 5,
        tracked_bands: 5,
    },
    FlagGradient {
        name: "pan",
        stops: &PAN_FLAG,
        bands: 3,
        tracked_bands: 3,
    },
];
