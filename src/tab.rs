//! # Tablature Renderer
//!
//! Converts a note sequence into ASCII tablature wrapped into staves.
//!
//! ## Layout
//! A tablature is a list of columns, each holding one cell per string:
//! ```text
//! E5|----------------1-2-3-4-||
//! B4|--------1-2-3-4---------||
//! ...
//! ```
//! - heading columns: the tuning labels and a `|-` bar, repeated on every staff
//! - one column per note (the fret on its string, `-` elsewhere), each
//!   followed by a `-` spacer column
//! - the final spacer becomes the closing `-||` column
//!
//! Every cell is right-padded with `-` to its column's width, so all rows of
//! a staff have the same length. Staves are filled greedily; a staff that is
//! broken early is padded with a filler column to exactly the line width.

use std::fmt;

use crate::error::GtpmError;
use crate::exercise::Note;
use crate::guitar::Guitar;

const BAR: &str = "|-";
const SPACER: &str = "-";
const CLOSING: &str = "-||";

/// One rendered time-step: a text cell per string
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TabColumn {
    cells: Vec<String>,
}

impl TabColumn {
    /// Column with the same text on every string
    pub fn filled(text: &str, num_strings: usize) -> Self {
        Self {
            cells: vec![text.to_string(); num_strings],
        }
    }

    /// Column with `text` on one string and `-` on the others
    pub fn with_cell(index: usize, text: String, num_strings: usize) -> Self {
        let mut column = Self::filled(SPACER, num_strings);
        column.cells[index] = text;
        column
    }

    fn from_cells(cells: Vec<String>) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[String] {
        &self.cells
    }

    /// Display width in characters (widest cell)
    pub fn width(&self) -> usize {
        self.cells.iter().map(|c| c.chars().count()).max().unwrap_or(0)
    }

    /// Right-pad every cell with `-` to the column width
    pub fn pad(&mut self) {
        let width = self.width();
        for cell in &mut self.cells {
            let missing = width - cell.chars().count();
            cell.extend(std::iter::repeat('-').take(missing));
        }
    }
}

/// Total display width of a run of columns
fn columns_width(columns: &[TabColumn]) -> usize {
    columns.iter().map(TabColumn::width).sum()
}

/// One wrapped block of columns
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Staff {
    pub columns: Vec<TabColumn>,
}

impl Staff {
    pub fn width(&self) -> usize {
        columns_width(&self.columns)
    }
}

/// A laid out tablature: heading columns plus the wrapped staves
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tablature {
    pub heading: Vec<TabColumn>,
    pub staves: Vec<Staff>,
    num_strings: usize,
}

impl Tablature {
    pub fn heading_width(&self) -> usize {
        columns_width(&self.heading)
    }

    /// Text rows of one staff, heading included
    pub fn staff_rows(&self, staff: &Staff) -> Vec<String> {
        (0..self.num_strings)
            .map(|row| {
                self.heading
                    .iter()
                    .chain(&staff.columns)
                    .map(|col| col.cells[row].as_str())
                    .collect()
            })
            .collect()
    }
}

impl fmt::Display for Tablature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for staff in &self.staves {
            for row in self.staff_rows(staff) {
                writeln!(f, "{}", row)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Build the padded heading and body columns for a note sequence.
///
/// Returns `(heading, body)`. Notes must reference strings of the guitar.
pub fn tab_columns(
    guitar: &Guitar,
    notes: &[Note],
) -> Result<(Vec<TabColumn>, Vec<TabColumn>), GtpmError> {
    let num_strings = guitar.len();
    if num_strings == 0 {
        return Err(GtpmError::RenderError("guitar has no strings".to_string()));
    }

    let mut heading = vec![
        TabColumn::from_cells(guitar.tunes().into_iter().map(String::from).collect()),
        TabColumn::filled(BAR, num_strings),
    ];

    let mut body = Vec::with_capacity(notes.len() * 2);
    for note in notes {
        if note.string_index >= num_strings {
            return Err(GtpmError::RenderError(format!(
                "note on string {} but the guitar has {} strings",
                note.string_index, num_strings
            )));
        }
        body.push(TabColumn::with_cell(
            note.string_index,
            note.fret.to_string(),
            num_strings,
        ));
        body.push(TabColumn::filled(SPACER, num_strings));
    }
    // The last spacer closes the piece; with no notes the closing bar stands alone
    match body.last_mut() {
        Some(last) => *last = TabColumn::filled(CLOSING, num_strings),
        None => body.push(TabColumn::filled(CLOSING, num_strings)),
    }

    for col in heading.iter_mut().chain(body.iter_mut()) {
        col.pad();
    }
    Ok((heading, body))
}

/// Break body columns into staves no wider than `available_width`.
///
/// Every column must fit in `available_width` on its own.
pub fn wrap_staves(columns: Vec<TabColumn>, available_width: usize) -> Vec<Staff> {
    let num_strings = columns.first().map_or(0, |c| c.cells.len());
    let mut staves = Vec::new();
    let mut staff = Staff::default();
    let mut total_length = 0;

    for col in columns {
        let length = col.width();
        if !staff.columns.is_empty() && total_length + length > available_width {
            if total_length < available_width {
                let filler = "-".repeat(available_width - total_length);
                staff.columns.push(TabColumn::filled(&filler, num_strings));
            }
            staves.push(std::mem::take(&mut staff));
            total_length = 0;
        }
        staff.columns.push(col);
        total_length += length;
    }
    if !staff.columns.is_empty() {
        staves.push(staff);
    }
    staves
}

/// Lay out a note sequence as tablature no wider than `width` characters.
pub fn layout(guitar: &Guitar, notes: &[Note], width: usize) -> Result<Tablature, GtpmError> {
    let (heading, body) = tab_columns(guitar, notes)?;
    let heading_width = columns_width(&heading);
    let widest = body.iter().map(TabColumn::width).max().unwrap_or(0);

    let available_width = width
        .checked_sub(heading_width)
        .filter(|available| *available >= widest)
        .ok_or_else(|| {
            GtpmError::RenderError(format!(
                "width {} cannot hold the {}-character heading plus a {}-character column",
                width, heading_width, widest
            ))
        })?;

    let staves = wrap_staves(body, available_width);
    tracing::debug!(staves = staves.len(), available_width, "laid out tablature");

    Ok(Tablature {
        heading,
        staves,
        num_strings: guitar.len(),
    })
}

/// Render a note sequence as tablature text.
///
/// Each staff is followed by a blank line.
///
/// ```
/// use gtpm::{render_tab, Guitar, Note};
///
/// let guitar = Guitar::new("E3");
/// let tab = render_tab(&guitar, &[Note::new(0, 1), Note::new(0, 2)], 79).unwrap();
/// assert_eq!(tab, "E3|-1-2-||\n\n");
/// ```
pub fn render_tab(guitar: &Guitar, notes: &[Note], width: usize) -> Result<String, GtpmError> {
    Ok(layout(guitar, notes, width)?.to_string())
}
