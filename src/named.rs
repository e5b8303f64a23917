//! Built-in named color tables.
//!
//! CSS4/SVG names resolve through `palette::named`. The single-letter base
//! colors and the Tableau `tab:` colors are listed here directly.

use std::collections::BTreeMap;

use palette::Srgb;

use crate::color::Color;

const BASE: [(&str, [f32; 3]); 8] = [
    ("b", [0.0, 0.0, 1.0]),
    ("g", [0.0, 0.5, 0.0]),
    ("r", [1.0, 0.0, 0.0]),
    ("c", [0.0, 0.75, 0.75]),
    ("m", [0.75, 0.0, 0.75]),
    ("y", [0.75, 0.75, 0.0]),
    ("k", [0.0, 0.0, 0.0]),
    ("w", [1.0, 1.0, 1.0]),
];

const TABLEAU: [(&str, [u8; 3]); 10] = [
    ("tab:blue", [0x1f, 0x77, 0xb4]),
    ("tab:orange", [0xff, 0x7f, 0x0e]),
    ("tab:green", [0x2c, 0xa0, 0x2c]),
    ("tab:red", [0xd6, 0x27, 0x28]),
    ("tab:purple", [0x94, 0x67, 0xbd]),
    ("tab:brown", [0x8c, 0x56, 0x4b]),
    ("tab:pink", [0xe3, 0x77, 0xc2]),
    ("tab:gray", [0x7f, 0x7f, 0x7f]),
    ("tab:olive", [0xbc, 0xbd, 0x22]),
    ("tab:cyan", [0x17, 0xbe, 0xcf]),
];

const CSS4: [&str; 147] = [
    "aliceblue", "antiquewhite", "aqua", "aquamarine", "azure", "beige", "bisque", "black",
    "blanchedalmond", "blue", "blueviolet", "brown", "burlywood", "cadetblue", "chartreuse",
    "chocolate", "coral", "cornflowerblue", "cornsilk", "crimson", "cyan", "darkblue",
    "darkcyan", "darkgoldenrod", "darkgray", "darkgreen", "darkgrey", "darkkhaki",
    "darkmagenta", "darkolivegreen", "darkorange", "darkorchid", "darkred", "darksalmon",
    "darkseagreen", "darkslateblue", "darkslategray", "darkslategrey", "darkturquoise",
    "darkviolet", "deeppink", "deepskyblue", "dimgray", "dimgrey", "dodgerblue", "firebrick",
    "floralwhite", "forestgreen", "fuchsia", "gainsboro", "ghostwhite", "gold", "goldenrod",
    "gray", "green", "greenyellow", "grey", "honeydew", "hotpink", "indianred", "indigo",
    "ivory", "khaki", "lavender", "lavenderblush", "lawngreen", "lemonchiffon", "lightblue",
    "lightcoral", "lightcyan", "lightgoldenrodyellow", "lightgray", "lightgreen", "lightgrey",
    "lightpink", "lightsalmon", "lightseagreen", "lightskyblue", "lightslategray",
    "lightslategrey", "lightsteelblue", "lightyellow", "lime", "limegreen", "linen", "magenta",
    "maroon", "mediumaquamarine", "mediumblue", "mediumorchid", "mediumpurple",
    "mediumseagreen", "mediumslateblue", "mediumspringgreen", "mediumturquoise",
    "mediumvioletred", "midnightblue", "mintcream", "mistyrose", "moccasin", "navajowhite",
    "navy", "oldlace", "olive", "olivedrab", "orange", "orangered", "orchid", "palegoldenrod",
    "palegreen", "paleturquoise", "palevioletred", "papayawhip", "peachpuff", "peru", "pink",
    "plum", "powderblue", "purple", "red", "rosybrown", "royalblue", "saddlebrown", "salmon",
    "sandybrown", "seagreen", "seashell", "sienna", "silver", "skyblue", "slateblue",
    "slategray", "slategrey", "snow", "springgreen", "steelblue", "tan", "teal", "thistle",
    "tomato", "turquoise", "violet", "wheat", "white", "whitesmoke", "yellow", "yellowgreen",
];

/// Which built-in table to draw a palette from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Table {
    /// Base, Tableau and CSS4 combined.
    #[default]
    All,
    Base,
    Tableau,
    Css4,
}

pub fn base() -> BTreeMap<String, Color> {
    BASE.iter()
        .map(|(name, [r, g, b])| (name.to_string(), Color::new(*r, *g, *b)))
        .collect()
}

pub fn tableau() -> BTreeMap<String, Color> {
    TABLEAU
        .iter()
        .map(|(name, [r, g, b])| {
            (
                name.to_string(),
                Color::from_srgb_u8(Srgb::new(*r, *g, *b)),
            )
        })
        .collect()
}

pub fn css4() -> BTreeMap<String, Color> {
    CSS4.iter()
        .filter_map(|name| {
            palette::named::from_str(name).map(|c| (name.to_string(), Color::from_srgb_u8(c)))
        })
        .collect()
}

/// Every built-in table merged. Later tables win on a name collision.
pub fn all() -> BTreeMap<String, Color> {
    let mut colors = base();
    colors.extend(tableau());
    colors.extend(css4());
    colors
}

pub fn table(table: Table) -> BTreeMap<String, Color> {
    match table {
        Table::All => all(),
        Table::Base => base(),
        Table::Tableau => tableau(),
        Table::Css4 => css4(),
    }
}

/// Resolve a built-in color name, case-insensitively.
pub fn lookup(name: &str) -> Option<Color> {
    let name = name.to_ascii_lowercase();
    if let Some((_, [r, g, b])) = BASE.iter().find(|(n, _)| *n == name) {
        return Some(Color::new(*r, *g, *b));
    }
    if let Some((_, [r, g, b])) = TABLEAU.iter().find(|(n, _)| *n == name) {
        return Some(Color::from_srgb_u8(Srgb::new(*r, *g, *b)));
    }
    palette::named::from_str(&name).map(Color::from_srgb_u8)
}
