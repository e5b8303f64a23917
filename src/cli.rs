use std::path::PathBuf;

use clap::Parser;

use crate::color::Color;
use crate::index::{IndexOptions, Layout, Palette, SortOrder, DEFAULT_BIN_WIDTH};
use crate::named::{self, Table};
use crate::picker::{DisplayConfig, PickerConfig};
use crate::viewer::ViewerConfig;

/// Browse named colors grouped by hue and assign them to named slots.
#[derive(Parser, Debug)]
#[command(name = "swatchbook", version, about)]
pub struct Args {
    /// Hue bin width in degrees
    #[arg(short, long, default_value_t = DEFAULT_BIN_WIDTH)]
    pub bin_width: f32,

    /// Order of swatches within a bin, as a permutation of h, s and v
    #[arg(short, long, default_value = "vsh")]
    pub sort_order: SortOrder,

    /// Run hue bins along columns (row-major) or rows (column-major)
    #[arg(short, long, value_enum, default_value_t = Layout::RowMajor)]
    pub layout: Layout,

    /// Built-in color table to browse
    #[arg(short, long, value_enum, default_value_t = Table::All)]
    pub palette: Table,

    /// Named slot with an optional initial color (name or #rrggbb); repeatable
    #[arg(long = "slot", value_name = "NAME[=COLOR]", value_parser = parse_slot)]
    pub slots: Vec<SlotArg>,

    /// Label font size in points
    #[arg(long, default_value_t = 8.0)]
    pub font_size: f32,

    /// Padding between slot rows in points
    #[arg(long, default_value_t = 4.0)]
    pub pad: f32,

    /// Write logs to this file (RUST_LOG filters, default swatchbook=info)
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SlotArg {
    pub name: String,
    pub color: Option<Color>,
}

fn parse_slot(s: &str) -> Result<SlotArg, String> {
    let (name, color) = match s.split_once('=') {
        Some((name, color)) => {
            let color = color.parse::<Color>().map_err(|e| e.to_string())?;
            (name, Some(color))
        }
        None => (s, None),
    };
    let name = name.trim();
    if name.is_empty() {
        return Err(format!("slot needs a name: {s:?}"));
    }
    Ok(SlotArg {
        name: name.to_string(),
        color,
    })
}

impl Args {
    pub fn picker_config(&self) -> PickerConfig {
        PickerConfig {
            viewer: ViewerConfig {
                palette: Palette::from(named::table(self.palette)),
                index: IndexOptions {
                    bin_width: self.bin_width,
                    sort_order: self.sort_order,
                    layout: self.layout,
                },
            },
            display: DisplayConfig {
                font_size: self.font_size,
                pad: self.pad,
            },
            slots: self
                .slots
                .iter()
                .map(|slot| (slot.name.clone(), slot.color))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::HsvKey;

    #[test]
    fn defaults() {
        let args = Args::try_parse_from(["swatchbook"]).unwrap();
        let config = args.picker_config();
        assert_eq!(config.viewer.index, IndexOptions::default());
        assert_eq!(config.display, DisplayConfig::default());
        assert_eq!(config.viewer.palette, Palette::named());
        assert!(config.slots.is_empty());
        assert!(args.log_file.is_none());
    }

    #[test]
    fn parses_every_option() {
        let args = Args::try_parse_from([
            "swatchbook",
            "--bin-width",
            "10",
            "--sort-order",
            "hsv",
            "--layout",
            "column-major",
            "--palette",
            "tableau",
            "--slot",
            "accent=#ff0000",
            "--slot",
            "muted",
            "--font-size",
            "10",
            "--pad",
            "2",
        ])
        .unwrap();
        let config = args.picker_config();

        assert_eq!(config.viewer.index.bin_width, 10.0);
        assert_eq!(
            config.viewer.index.sort_order.keys(),
            [HsvKey::Hue, HsvKey::Saturation, HsvKey::Value]
        );
        assert_eq!(config.viewer.index.layout, Layout::ColumnMajor);
        assert_eq!(config.viewer.palette.len(), 10);
        assert_eq!(
            config.slots,
            [
                ("accent".to_string(), Some(Color::new(1.0, 0.0, 0.0))),
                ("muted".to_string(), None),
            ]
        );
        assert_eq!(config.display.font_size, 10.0);
    }

    #[test]
    fn slot_accepts_color_names() {
        let slot = parse_slot("link=navy").unwrap();
        assert_eq!(slot.color.unwrap().to_hex(), "#000080");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(Args::try_parse_from(["swatchbook", "--sort-order", "hhv"]).is_err());
        assert!(Args::try_parse_from(["swatchbook", "--slot", "=red"]).is_err());
        assert!(Args::try_parse_from(["swatchbook", "--slot", "x=#12"]).is_err());
        assert!(Args::try_parse_from(["swatchbook", "--layout", "diagonal"]).is_err());
    }
}
