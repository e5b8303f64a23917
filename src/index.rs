//! Hue-binned swatch layout.
//!
//! Greys are dropped, the remaining colors are bucketed into fixed-width hue
//! bins, and each bin is sorted by a configurable permutation of the HSV key.
//! Bins become one grid axis and the rank within a bin the other.

use std::cmp::Ordering;
use std::collections::btree_map;
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::color::{Color, Hsv};
use crate::error::{Error, Result};
use crate::named;

pub const DEFAULT_BIN_WIDTH: f32 = 5.0;

/// A color paired with its palette name.
#[derive(Debug, Clone, PartialEq)]
pub struct NamedColor {
    pub name: String,
    pub color: Color,
}

/// A name → color mapping. Inserting an existing name replaces its color.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Palette {
    colors: BTreeMap<String, Color>,
}

impl Palette {
    pub fn new() -> Self {
        Self::default()
    }

    /// The full built-in named color table.
    pub fn named() -> Self {
        Self {
            colors: named::all(),
        }
    }

    pub fn insert(&mut self, name: impl Into<String>, color: Color) -> Option<Color> {
        self.colors.insert(name.into(), color)
    }

    pub fn get(&self, name: &str) -> Option<Color> {
        self.colors.get(name).copied()
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn iter(&self) -> btree_map::Iter<'_, String, Color> {
        self.colors.iter()
    }
}

impl From<BTreeMap<String, Color>> for Palette {
    fn from(colors: BTreeMap<String, Color>) -> Self {
        Self { colors }
    }
}

impl<S: Into<String>> FromIterator<(S, Color)> for Palette {
    fn from_iter<I: IntoIterator<Item = (S, Color)>>(iter: I) -> Self {
        let mut palette = Palette::new();
        for (name, color) in iter {
            palette.insert(name, color);
        }
        palette
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HsvKey {
    Hue,
    Saturation,
    Value,
}

impl HsvKey {
    fn of(self, hsv: &Hsv) -> f32 {
        match self {
            HsvKey::Hue => hsv.hue,
            HsvKey::Saturation => hsv.saturation,
            HsvKey::Value => hsv.value,
        }
    }
}

/// A permutation of hue, saturation and value used to order swatches
/// within a bin. Parses from strings like `vsh`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder([HsvKey; 3]);

impl SortOrder {
    pub fn new(keys: [HsvKey; 3]) -> Result<Self> {
        let distinct = keys[0] != keys[1] && keys[1] != keys[2] && keys[0] != keys[2];
        if !distinct {
            return Err(Error::InvalidArgument(format!(
                "sort order must use each of hue, saturation and value once: {keys:?}"
            )));
        }
        Ok(Self(keys))
    }

    pub fn keys(&self) -> [HsvKey; 3] {
        self.0
    }

    fn compare(&self, a: &Hsv, b: &Hsv) -> Ordering {
        self.0
            .iter()
            .map(|key| key.of(a).total_cmp(&key.of(b)))
            .find(|ord| ord.is_ne())
            .unwrap_or(Ordering::Equal)
    }
}

impl Default for SortOrder {
    fn default() -> Self {
        Self([HsvKey::Value, HsvKey::Saturation, HsvKey::Hue])
    }
}

impl FromStr for SortOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let keys: Vec<HsvKey> = s
            .chars()
            .map(|c| match c.to_ascii_lowercase() {
                'h' => Ok(HsvKey::Hue),
                's' => Ok(HsvKey::Saturation),
                'v' => Ok(HsvKey::Value),
                other => Err(Error::InvalidArgument(format!(
                    "unknown sort key '{other}' (expected h, s or v)"
                ))),
            })
            .collect::<Result<_>>()?;
        let keys: [HsvKey; 3] = keys.try_into().map_err(|_| {
            Error::InvalidArgument(format!("sort order needs exactly three keys: {s}"))
        })?;
        SortOrder::new(keys)
    }
}

/// Which grid axis the hue bins run along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum Layout {
    /// One column per bin, bin members stacked along y.
    #[default]
    RowMajor,
    /// One row per bin, bin members laid out along x.
    ColumnMajor,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IndexOptions {
    /// Hue bin width in degrees.
    pub bin_width: f32,
    pub sort_order: SortOrder,
    pub layout: Layout,
}

impl Default for IndexOptions {
    fn default() -> Self {
        Self {
            bin_width: DEFAULT_BIN_WIDTH,
            sort_order: SortOrder::default(),
            layout: Layout::default(),
        }
    }
}

impl IndexOptions {
    pub fn validate(&self) -> Result<()> {
        if !self.bin_width.is_finite() || self.bin_width <= 0.0 {
            return Err(Error::InvalidArgument(format!(
                "bin width must be a positive number of degrees, got {}",
                self.bin_width
            )));
        }
        if 360.0 / f64::from(self.bin_width) >= u64::MAX as f64 {
            return Err(Error::InvalidArgument(format!(
                "bin width {} is too fine to index the hue circle",
                self.bin_width
            )));
        }
        Ok(())
    }
}

/// One placed swatch.
#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    pub x: usize,
    pub y: usize,
    pub entry: NamedColor,
    pub hsv: Hsv,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PaletteIndex {
    cells: Vec<GridCell>,
    bins: usize,
    columns: usize,
    rows: usize,
}

impl PaletteIndex {
    /// Cells in bin order, then rank order within each bin.
    pub fn cells(&self) -> &[GridCell] {
        &self.cells
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    /// Grid extents as `(columns, rows)`.
    pub fn grid_size(&self) -> (usize, usize) {
        (self.columns, self.rows)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Lay out every non-grey palette entry on a hue-binned grid.
pub fn index(palette: &Palette, options: &IndexOptions) -> Result<PaletteIndex> {
    options.validate()?;

    // Bin ids partition the hue circle in ascending order, so iterating the
    // map yields bins ordered by the minimum hue of their members.
    let mut bins: BTreeMap<u64, Vec<(NamedColor, Hsv)>> = BTreeMap::new();
    for (name, color) in palette.iter() {
        if color.is_grey() {
            continue;
        }
        let hsv = color.hsv();
        let bin = (f64::from(hsv.hue) * 360.0 / f64::from(options.bin_width)).floor() as u64;
        bins.entry(bin).or_default().push((
            NamedColor {
                name: name.clone(),
                color: *color,
            },
            hsv,
        ));
    }

    let bin_count = bins.len();
    let mut longest = 0;
    let mut cells = Vec::with_capacity(palette.len());
    for (column, mut members) in bins.into_values().enumerate() {
        members.sort_by(|(a, a_hsv), (b, b_hsv)| {
            options
                .sort_order
                .compare(a_hsv, b_hsv)
                .then_with(|| a.name.cmp(&b.name))
        });
        longest = longest.max(members.len());
        for (rank, (entry, hsv)) in members.into_iter().enumerate() {
            let (x, y) = match options.layout {
                Layout::RowMajor => (column, rank),
                Layout::ColumnMajor => (rank, column),
            };
            cells.push(GridCell { x, y, entry, hsv });
        }
    }

    let (columns, rows) = match options.layout {
        Layout::RowMajor => (bin_count, longest),
        Layout::ColumnMajor => (longest, bin_count),
    };

    Ok(PaletteIndex {
        cells,
        bins: bin_count,
        columns,
        rows,
    })
}
