//! Design tokens shared by every rendering of the UI.
//!
//! The tables mirror a `theme.extend` block: colors, animation, keyframes,
//! boxShadow, backgroundImage and backgroundSize. [`tokens`] exports them as
//! one JSON document; the terminal views only need the score colors.

use console::Style;
use serde_json::{json, Map, Value};

use crate::format::ScoreGrade;

pub type TokenTable = &'static [(&'static str, &'static str)];

pub const PRIMARY: TokenTable = &[
    ("50", "#eff6ff"),
    ("100", "#dbeafe"),
    ("200", "#bfdbfe"),
    ("300", "#93c5fd"),
    ("400", "#60a5fa"),
    ("500", "#3b82f6"),
    ("600", "#2563eb"),
    ("700", "#1d4ed8"),
    ("800", "#1e40af"),
    ("900", "#1e3a8a"),
];

pub const SCORE_COLORS: TokenTable = &[
    ("score-excellent", "#10b981"),
    ("score-good", "#3b82f6"),
    ("score-medium", "#f59e0b"),
    ("score-poor", "#ef4444"),
];

pub const AURORA: TokenTable = &[
    ("blue", "#60a5fa"),
    ("purple", "#a78bfa"),
    ("pink", "#f472b6"),
    ("cyan", "#22d3d3"),
];

pub const ANIMATIONS: TokenTable = &[
    ("fade-in", "fadeIn 0.3s ease-out"),
    ("slide-up", "slideUp 0.4s ease-out"),
    ("slide-down", "slideDown 0.3s ease-out"),
    ("scale-in", "scaleIn 0.2s ease-out"),
    ("pulse-slow", "pulse 3s infinite"),
    ("bounce-soft", "bounceSoft 0.5s ease-out"),
    ("progress", "progress 1.5s ease-out forwards"),
    ("shimmer", "shimmer 2s linear infinite"),
    ("gradient-flow", "gradientFlow 8s ease infinite"),
    ("float", "float 6s ease-in-out infinite"),
    ("float-delayed", "float 6s ease-in-out 2s infinite"),
    ("aurora-pulse", "auroraPulse 4s ease-in-out infinite"),
    ("star-twinkle", "starTwinkle 3s ease-in-out infinite"),
    ("glow-pulse", "glowPulse 2s ease-in-out infinite"),
    ("score-pop", "scorePop 0.6s cubic-bezier(0.68, -0.55, 0.265, 1.55)"),
    ("confetti", "confetti 1s ease-out forwards"),
    ("border-dance", "borderDance 4s linear infinite"),
    ("spin-slow", "spin 8s linear infinite"),
    ("wave", "wave 2s ease-in-out infinite"),
];

/// One keyframe step: the offset selector and its CSS declarations.
pub type KeyframeStep = (&'static str, TokenTable);

pub const KEYFRAMES: &[(&str, &[KeyframeStep])] = &[
    ("fadeIn", &[("0%", &[("opacity", "0")]), ("100%", &[("opacity", "1")])]),
    (
        "slideUp",
        &[
            ("0%", &[("opacity", "0"), ("transform", "translateY(20px)")]),
            ("100%", &[("opacity", "1"), ("transform", "translateY(0)")]),
        ],
    ),
    (
        "slideDown",
        &[
            ("0%", &[("opacity", "0"), ("transform", "translateY(-10px)")]),
            ("100%", &[("opacity", "1"), ("transform", "translateY(0)")]),
        ],
    ),
    (
        "scaleIn",
        &[
            ("0%", &[("opacity", "0"), ("transform", "scale(0.95)")]),
            ("100%", &[("opacity", "1"), ("transform", "scale(1)")]),
        ],
    ),
    (
        "bounceSoft",
        &[
            ("0%, 100%", &[("transform", "translateY(0)")]),
            ("50%", &[("transform", "translateY(-5px)")]),
        ],
    ),
    (
        "progress",
        &[
            ("0%", &[("width", "0%")]),
            ("100%", &[("width", "var(--progress-width, 100%)")]),
        ],
    ),
    (
        "shimmer",
        &[
            ("0%", &[("backgroundPosition", "-200% 0")]),
            ("100%", &[("backgroundPosition", "200% 0")]),
        ],
    ),
    (
        "gradientFlow",
        &[
            ("0%, 100%", &[("backgroundPosition", "0% 50%")]),
            ("50%", &[("backgroundPosition", "100% 50%")]),
        ],
    ),
    (
        "float",
        &[
            ("0%, 100%", &[("transform", "translateY(0) rotate(0deg)")]),
            ("33%", &[("transform", "translateY(-10px) rotate(1deg)")]),
            ("66%", &[("transform", "translateY(5px) rotate(-1deg)")]),
        ],
    ),
    (
        "auroraPulse",
        &[
            ("0%, 100%", &[("opacity", "0.4"), ("transform", "scale(1)")]),
            ("50%", &[("opacity", "0.8"), ("transform", "scale(1.05)")]),
        ],
    ),
    (
        "starTwinkle",
        &[
            ("0%, 100%", &[("opacity", "0.3"), ("transform", "scale(0.8)")]),
            ("50%", &[("opacity", "1"), ("transform", "scale(1.2)")]),
        ],
    ),
    (
        "glowPulse",
        &[
            ("0%, 100%", &[("boxShadow", "0 0 20px rgba(59, 130, 246, 0.3)")]),
            ("50%", &[("boxShadow", "0 0 40px rgba(59, 130, 246, 0.6)")]),
        ],
    ),
    (
        "scorePop",
        &[
            ("0%", &[("transform", "scale(0)"), ("opacity", "0")]),
            ("50%", &[("transform", "scale(1.2)")]),
            ("100%", &[("transform", "scale(1)"), ("opacity", "1")]),
        ],
    ),
    (
        "confetti",
        &[
            ("0%", &[("transform", "translateY(0) rotate(0deg)"), ("opacity", "1")]),
            ("100%", &[("transform", "translateY(-100px) rotate(720deg)"), ("opacity", "0")]),
        ],
    ),
    (
        "borderDance",
        &[
            ("0%, 100%", &[("backgroundPosition", "0% 50%")]),
            ("50%", &[("backgroundPosition", "100% 50%")]),
        ],
    ),
    (
        "wave",
        &[
            ("0%, 100%", &[("transform", "scaleY(1)")]),
            ("50%", &[("transform", "scaleY(0.6)")]),
        ],
    ),
];

pub const BOX_SHADOWS: TokenTable = &[
    ("card", "0 4px 6px -1px rgba(0, 0, 0, 0.05), 0 2px 4px -1px rgba(0, 0, 0, 0.03)"),
    ("card-hover", "0 10px 15px -3px rgba(0, 0, 0, 0.08), 0 4px 6px -2px rgba(0, 0, 0, 0.04)"),
    ("glow-blue", "0 0 20px rgba(59, 130, 246, 0.3)"),
    ("glow-green", "0 0 20px rgba(16, 185, 129, 0.3)"),
    ("glow-purple", "0 0 20px rgba(167, 139, 250, 0.3)"),
    ("glow-pink", "0 0 20px rgba(244, 114, 182, 0.3)"),
    ("inner-soft", "inset 0 2px 4px 0 rgba(0, 0, 0, 0.05)"),
    ("aurora", "0 0 60px rgba(96, 165, 250, 0.4), 0 0 120px rgba(167, 139, 250, 0.2)"),
    ("celebration", "0 0 30px rgba(16, 185, 129, 0.5), 0 0 60px rgba(16, 185, 129, 0.3)"),
];

pub const BACKGROUND_IMAGES: TokenTable = &[
    ("gradient-radial", "radial-gradient(var(--tw-gradient-stops))"),
    ("hero-pattern", "linear-gradient(135deg, #667eea 0%, #764ba2 100%)"),
    ("score-gradient", "linear-gradient(135deg, var(--tw-gradient-from) 0%, var(--tw-gradient-to) 100%)"),
    ("aurora-gradient", "linear-gradient(135deg, #60a5fa 0%, #a78bfa 50%, #f472b6 100%)"),
    ("shimmer-gradient", "linear-gradient(90deg, transparent 0%, rgba(255,255,255,0.4) 50%, transparent 100%)"),
    (
        "mesh-gradient",
        "radial-gradient(at 40% 20%, #60a5fa 0px, transparent 50%), radial-gradient(at 80% 0%, #a78bfa 0px, transparent 50%), radial-gradient(at 0% 50%, #f472b6 0px, transparent 50%)",
    ),
];

pub const BACKGROUND_SIZES: TokenTable = &[("shimmer", "200% 100%"), ("gradient-flow", "200% 200%")];

/// Looks up `name` in a token table.
pub fn lookup(table: TokenTable, name: &str) -> Option<&'static str> {
    table.iter().find(|(key, _)| *key == name).map(|(_, value)| *value)
}

fn table_json(table: TokenTable) -> Value {
    Value::Object(
        table
            .iter()
            .map(|(k, v)| (k.to_string(), Value::String(v.to_string())))
            .collect::<Map<_, _>>(),
    )
}

/// Every token as a `theme.extend` JSON document.
pub fn tokens() -> Value {
    let mut colors = Map::new();
    colors.insert("primary".into(), table_json(PRIMARY));
    for (name, hex) in SCORE_COLORS {
        colors.insert(name.to_string(), Value::String(hex.to_string()));
    }
    colors.insert("aurora".into(), table_json(AURORA));

    let keyframes: Map<String, Value> = KEYFRAMES
        .iter()
        .map(|(name, steps)| {
            let steps: Map<String, Value> = steps
                .iter()
                .map(|(offset, decls)| (offset.to_string(), table_json(*decls)))
                .collect();
            (name.to_string(), Value::Object(steps))
        })
        .collect();

    json!({
        "colors": colors,
        "animation": table_json(ANIMATIONS),
        "keyframes": keyframes,
        "boxShadow": table_json(BOX_SHADOWS),
        "backgroundImage": table_json(BACKGROUND_IMAGES),
        "backgroundSize": table_json(BACKGROUND_SIZES),
    })
}

pub fn score_color(grade: ScoreGrade) -> &'static str {
    let name = match grade {
        ScoreGrade::Excellent => "score-excellent",
        ScoreGrade::Good => "score-good",
        ScoreGrade::Medium => "score-medium",
        ScoreGrade::Poor => "score-poor",
    };
    lookup(SCORE_COLORS, name).unwrap_or("#6b7280")
}

pub fn parse_hex(hex: &str) -> Option<(u8, u8, u8)> {
    let hex = hex.strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

/// Nearest entry of the xterm 6x6x6 color cube.
pub fn ansi256(r: u8, g: u8, b: u8) -> u8 {
    let level = |c: u8| -> u8 {
        if c < 48 {
            0
        } else if c < 115 {
            1
        } else {
            (c - 35) / 40
        }
    };
    16 + 36 * level(r) + 6 * level(g) + level(b)
}

/// Terminal style carrying the theme color for a score.
pub fn score_style(score: f64) -> Style {
    let hex = score_color(ScoreGrade::from_score(score));
    match parse_hex(hex) {
        Some((r, g, b)) => Style::new().color256(ansi256(r, g, b)).bold(),
        None => Style::new().bold(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_colors_follow_grades() {
        assert_eq!(score_color(ScoreGrade::Excellent), "#10b981");
        assert_eq!(score_color(ScoreGrade::Poor), "#ef4444");
    }

    #[test]
    fn hex_parsing() {
        assert_eq!(parse_hex("#10b981"), Some((0x10, 0xb9, 0x81)));
        assert_eq!(parse_hex("10b981"), None);
        assert_eq!(parse_hex("#fff"), None);
        assert_eq!(parse_hex("#zzzzzz"), None);
    }

    #[test]
    fn cube_mapping() {
        assert_eq!(ansi256(0, 0, 0), 16);
        assert_eq!(ansi256(255, 255, 255), 231);
        assert_eq!(ansi256(255, 0, 0), 196);
    }

    #[test]
    fn exported_document_has_every_section() {
        let doc = tokens();
        assert_eq!(doc["colors"]["primary"]["500"], "#3b82f6");
        assert_eq!(doc["colors"]["score-good"], "#3b82f6");
        assert_eq!(doc["colors"]["aurora"]["cyan"], "#22d3d3");
        assert_eq!(doc["animation"]["fade-in"], "fadeIn 0.3s ease-out");
        assert_eq!(doc["keyframes"]["float"]["33%"]["transform"], "translateY(-10px) rotate(1deg)");
        assert_eq!(doc["boxShadow"]["glow-green"], "0 0 20px rgba(16, 185, 129, 0.3)");
        assert_eq!(doc["backgroundSize"]["shimmer"], "200% 100%");
        assert_eq!(doc["animation"].as_object().unwrap().len(), ANIMATIONS.len());
    }

    #[test]
    fn every_animation_names_a_known_keyframe() {
        let builtin = ["pulse", "spin"];
        for (name, value) in ANIMATIONS {
            let keyframe = value.split_whitespace().next().unwrap();
            assert!(
                builtin.contains(&keyframe) || KEYFRAMES.iter().any(|(k, _)| *k == keyframe),
                "{name} refers to unknown keyframe {keyframe}"
            );
        }
    }
}
