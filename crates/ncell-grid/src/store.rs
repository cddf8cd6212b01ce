//! Double-buffered bordered grid store.
//!
//! [`GridStore`] holds two full copies of the grid (interior plus border):
//! one read buffer and one write buffer. Reads address the read buffer,
//! writes address the write buffer, and [`GridStore::flip`] swaps their
//! roles. A step of an automaton is therefore: flip, then compute every
//! interior cell of the write buffer from the (now frozen) read buffer.
//!
//! # Buffer layout
//!
//! ```text
//! states[0]:     Vec<State>  ←── read (even flips) / write (odd)
//! states[1]:     Vec<State>  ←── write (even flips) / read (odd)
//! attributes[i]: Vec<f64>    ←── same roles, `attribute_count` per cell
//! ```
//!
//! Both buffers span the full grid, row-major, last axis fastest.

use ncell_core::types::checked_volume;
use ncell_core::{Cell, Dims, Mask, Neighbors, State};

use crate::array::{AttributeArray, GridSnapshot, StateArray};
use crate::config::GridConfig;
use crate::error::GridError;
use crate::layout::{write_cell, Layout};
use crate::positions::InteriorPositions;
use crate::region::Region;
use crate::view::{BufferReader, SlabWriter};

/// Selects one of the two buffers by its current role.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BufferRole {
    /// The buffer reads address (the previous generation during a step).
    Read,
    /// The buffer writes address (the generation being computed).
    Write,
}

/// Double-buffered N-dimensional grid with a border.
///
/// # Examples
///
/// ```
/// use ncell_core::Cell;
/// use ncell_grid::{GridConfig, GridStore};
///
/// let mut grid = GridStore::new(GridConfig::new(&[3, 3], &[1, 1], 0)).unwrap();
/// grid.update_cell(&[1, 1], &Cell::new(5)).unwrap();
///
/// // Writes land in the write buffer; reads see them after a flip.
/// assert_eq!(grid.get_cell(&[1, 1]).unwrap().state, 0);
/// grid.flip();
/// assert_eq!(grid.get_cell(&[1, 1]).unwrap().state, 5);
/// ```
#[derive(Clone, Debug)]
pub struct GridStore {
    layout: Layout,
    states: [Vec<State>; 2],
    attributes: Option<[Vec<f64>; 2]>,
    read: usize,
}

impl GridStore {
    /// Create a grid with both buffers zeroed (state 0, attributes 0.0).
    ///
    /// Returns `Err(GridError::InvalidParameter)` if `config` fails
    /// [`GridConfig::validate`].
    pub fn new(config: GridConfig) -> Result<Self, GridError> {
        let layout = Layout::new(config)?;
        let volume = layout.volume;
        let k = layout.attribute_count();
        let attributes = (k > 0).then(|| [vec![0.0; volume * k], vec![0.0; volume * k]]);
        Ok(Self {
            states: [vec![0; volume], vec![0; volume]],
            attributes,
            read: 0,
            layout,
        })
    }

    /// Rebuild a grid from a snapshot.
    ///
    /// The snapshot's interior is written into both buffers; borders are
    /// zeroed.
    pub fn from_snapshot(snapshot: &GridSnapshot) -> Result<Self, GridError> {
        let mut grid = Self::new(snapshot.config.clone())?;
        let attributes = snapshot.attributes.as_ref();
        grid.set_values_from_configuration(&snapshot.states, attributes)?;
        grid.flip();
        grid.set_values_from_configuration(&snapshot.states, attributes)?;
        Ok(grid)
    }

    // ── Shape ──────────────────────────────────────────────────────

    /// The configuration this grid was built from.
    pub fn config(&self) -> &GridConfig {
        &self.layout.config
    }

    /// Number of axes.
    pub fn ndim(&self) -> usize {
        self.layout.ndim()
    }

    /// Interior extent per axis.
    pub fn interior_dimensions(&self) -> &[usize] {
        &self.layout.config.interior_dimensions
    }

    /// Border width per axis.
    pub fn border_widths(&self) -> &[usize] {
        &self.layout.config.border_widths
    }

    /// `interior + 2 * border` per axis.
    pub fn full_dimensions(&self) -> &[usize] {
        &self.layout.full
    }

    /// Attributes per cell.
    pub fn attribute_count(&self) -> usize {
        self.layout.attribute_count()
    }

    /// Number of interior (updatable) cells.
    pub fn interior_cell_count(&self) -> usize {
        self.layout.interior_volume()
    }

    /// `true` if `position` is an interior position.
    pub fn is_interior(&self, position: &[usize]) -> bool {
        self.layout.is_interior(position)
    }

    /// A fresh iterator over every interior position, row-major.
    pub fn positions(&self) -> InteriorPositions {
        self.layout.interior_positions()
    }

    // ── Buffer roles ───────────────────────────────────────────────

    /// Index (0 or 1) of the buffer currently read.
    pub fn read_buffer_index(&self) -> usize {
        self.read
    }

    /// Index (0 or 1) of the buffer currently written.
    pub fn write_buffer_index(&self) -> usize {
        1 - self.read
    }

    /// Swap the read and write roles.
    pub fn flip(&mut self) {
        self.read = 1 - self.read;
    }

    fn index_of(&self, role: BufferRole) -> usize {
        match role {
            BufferRole::Read => self.read,
            BufferRole::Write => 1 - self.read,
        }
    }

    /// Shared view of the buffer currently playing `role`.
    pub fn reader(&self, role: BufferRole) -> BufferReader<'_> {
        let b = self.index_of(role);
        BufferReader::new(
            &self.layout,
            &self.states[b],
            self.attributes.as_ref().map(|a| a[b].as_slice()),
        )
    }

    /// Borrow the read buffer shared and the write buffer as disjoint
    /// axis-0 slabs, for a concurrent update sweep.
    ///
    /// Each slab owns the cells whose axis-0 coordinate is one interior
    /// index. A zero-dimensional grid yields one slab holding its only
    /// cell.
    pub fn split_for_update(&mut self) -> (BufferReader<'_>, Vec<SlabWriter<'_>>) {
        let read = self.read;
        let layout = &self.layout;
        let (first, second) = self.states.split_at_mut(1);
        let (read_states, write_states) = if read == 0 {
            (&first[0][..], &mut second[0][..])
        } else {
            (&second[0][..], &mut first[0][..])
        };
        let (read_attrs, write_attrs) = match self.attributes.as_mut() {
            Some(pair) => {
                let (a, b) = pair.split_at_mut(1);
                if read == 0 {
                    (Some(&a[0][..]), Some(&mut b[0][..]))
                } else {
                    (Some(&b[0][..]), Some(&mut a[0][..]))
                }
            }
            None => (None, None),
        };

        let reader = BufferReader::new(layout, read_states, read_attrs);
        let slabs = slabs_of(layout, write_states, write_attrs);
        (reader, slabs)
    }

    // ── Reads (read buffer unless a role is given) ─────────────────

    /// The cell at a full-grid position of the read buffer.
    ///
    /// Border positions are allowed. Returns `OutOfRange` outside the
    /// full dimensions and `InvalidParameter` for a position of the wrong
    /// dimensionality.
    pub fn get_cell(&self, position: &[usize]) -> Result<Cell, GridError> {
        self.reader(BufferRole::Read).get_cell(position)
    }

    /// [`get_cell`](Self::get_cell) against an explicit buffer.
    pub fn get_cell_of(&self, role: BufferRole, position: &[usize]) -> Result<Cell, GridError> {
        self.reader(role).get_cell(position)
    }

    /// Interior states of the read buffer.
    pub fn get_states(&self) -> StateArray {
        self.get_states_of(BufferRole::Read)
    }

    /// Interior states of the buffer playing `role`.
    pub fn get_states_of(&self, role: BufferRole) -> StateArray {
        self.reader(role).states()
    }

    /// Every state of the read buffer, border included.
    pub fn get_states_with_border(&self) -> StateArray {
        self.reader(BufferRole::Read).states_with_border()
    }

    /// Interior attributes of the read buffer, or `None` for
    /// attribute-less grids.
    pub fn get_attributes(&self) -> Option<AttributeArray> {
        self.get_attributes_of(BufferRole::Read)
    }

    /// Interior attributes of the buffer playing `role`.
    pub fn get_attributes_of(&self, role: BufferRole) -> Option<AttributeArray> {
        self.reader(role).attributes()
    }

    /// Extract the neighborhood selected by `mask` with its origin at
    /// `position`, from the read buffer.
    ///
    /// Returns `InvalidParameter` if the mask or position has the wrong
    /// dimensionality and `OutOfRange` if the mask box leaves the full
    /// grid.
    pub fn apply_mask(&self, position: &[usize], mask: &Mask) -> Result<Neighbors, GridError> {
        self.reader(BufferRole::Read).apply_mask(position, mask)
    }

    /// [`apply_mask`](Self::apply_mask) into a reusable buffer.
    pub fn apply_mask_into(
        &self,
        position: &[usize],
        mask: &Mask,
        out: &mut Neighbors,
    ) -> Result<(), GridError> {
        self.reader(BufferRole::Read).apply_mask_into(position, mask, out)
    }

    /// States of the read buffer inside `region` (full-grid coordinates).
    pub fn region_states(&self, region: &Region) -> Result<StateArray, GridError> {
        self.reader(BufferRole::Read).region_states(region)
    }

    /// Attributes of the read buffer inside `region`, or `None` for
    /// attribute-less grids.
    pub fn region_attributes(&self, region: &Region) -> Result<Option<AttributeArray>, GridError> {
        self.reader(BufferRole::Read).region_attributes(region)
    }

    /// Interior snapshot of the buffer playing `role`.
    pub fn snapshot(&self, role: BufferRole) -> GridSnapshot {
        let reader = self.reader(role);
        GridSnapshot {
            config: self.layout.config.clone(),
            states: reader.states(),
            attributes: reader.attributes(),
        }
    }

    // ── Writes (write buffer) ──────────────────────────────────────

    fn write_parts(&mut self) -> (&Layout, &mut [State], Option<&mut [f64]>) {
        let w = 1 - self.read;
        (
            &self.layout,
            self.states[w].as_mut_slice(),
            self.attributes.as_mut().map(|a| a[w].as_mut_slice()),
        )
    }

    /// Write `cell` at an interior position of the write buffer.
    ///
    /// Returns `InvalidParameter` if the position has the wrong
    /// dimensionality or the cell's attributes disagree with the grid, and
    /// `OutOfRange` for positions outside the interior. Nothing is written
    /// on error.
    pub fn update_cell(&mut self, position: &[usize], cell: &Cell) -> Result<(), GridError> {
        let flat = self.layout.flat_index(position)?;
        self.layout.check_cell(cell)?;
        self.layout.check_interior(position)?;
        let (layout, states, attrs) = self.write_parts();
        write_cell(states, attrs, layout.attribute_count(), flat, cell);
        Ok(())
    }

    /// Set every border cell of the write buffer to `cell`. The interior
    /// is untouched.
    pub fn set_border_values(&mut self, cell: &Cell) -> Result<(), GridError> {
        self.layout.check_cell(cell)?;
        let (layout, states, mut attrs) = self.write_parts();
        let k = layout.attribute_count();
        let origin: Dims = smallvec::smallvec![0; layout.ndim()];
        for (flat, position) in InteriorPositions::from_box(&origin, &layout.full).enumerate() {
            if !layout.is_interior(&position) {
                write_cell(states, attrs.as_deref_mut(), k, flat, cell);
            }
        }
        Ok(())
    }

    /// Set every interior cell of the write buffer to `cell`.
    pub fn set_values_from(&mut self, cell: &Cell) -> Result<(), GridError> {
        self.layout.check_cell(cell)?;
        let (layout, states, mut attrs) = self.write_parts();
        let k = layout.attribute_count();
        for position in layout.interior_positions() {
            let flat = layout.flat_unchecked(&position);
            write_cell(states, attrs.as_deref_mut(), k, flat, cell);
        }
        Ok(())
    }

    /// Set every cell of `region` (full-grid coordinates, border
    /// included) in the write buffer to `cell`.
    pub fn fill_region(&mut self, region: &Region, cell: &Cell) -> Result<(), GridError> {
        self.layout.check_box(&region.origin, &region.extent)?;
        self.layout.check_cell(cell)?;
        let (layout, states, mut attrs) = self.write_parts();
        let k = layout.attribute_count();
        for position in region.positions() {
            let flat = layout.flat_unchecked(&position);
            write_cell(states, attrs.as_deref_mut(), k, flat, cell);
        }
        Ok(())
    }

    /// Bulk-assign the interior of the write buffer.
    ///
    /// `states` must be shaped like the interior; `attributes` must be
    /// present iff the grid has attributes and then shaped
    /// `interior ++ [attribute_count]`. Returns `ShapeMismatch` otherwise,
    /// with nothing written.
    pub fn set_values_from_configuration(
        &mut self,
        states: &StateArray,
        attributes: Option<&AttributeArray>,
    ) -> Result<(), GridError> {
        let origin = self.layout.config.border_widths.clone();
        let extent = self.layout.config.interior_dimensions.clone();
        self.write_arrays(&origin, &extent, states, attributes)
    }

    /// Bulk-assign the cells of `region` (full-grid coordinates, border
    /// included) in the write buffer.
    ///
    /// Same array rules as
    /// [`set_values_from_configuration`](Self::set_values_from_configuration)
    /// with the region's extent in place of the interior. Returns
    /// `OutOfRange` if the region leaves the full grid. Nothing is written
    /// on error.
    pub fn set_region_from_configuration(
        &mut self,
        region: &Region,
        states: &StateArray,
        attributes: Option<&AttributeArray>,
    ) -> Result<(), GridError> {
        self.layout.check_box(&region.origin, &region.extent)?;
        self.write_arrays(&region.origin, &region.extent, states, attributes)
    }

    fn write_arrays(
        &mut self,
        origin: &[usize],
        extent: &[usize],
        states: &StateArray,
        attributes: Option<&AttributeArray>,
    ) -> Result<(), GridError> {
        check_arrays(extent, self.layout.attribute_count(), states, attributes)?;
        let (layout, dst_states, mut dst_attrs) = self.write_parts();
        let k = layout.attribute_count();
        for (i, position) in InteriorPositions::from_box(origin, extent).enumerate() {
            let flat = layout.flat_unchecked(&position);
            dst_states[flat] = states.as_slice()[i];
            if let (Some(dst), Some(src)) = (dst_attrs.as_deref_mut(), attributes) {
                dst[flat * k..(flat + 1) * k].copy_from_slice(&src.as_slice()[i * k..(i + 1) * k]);
            }
        }
        Ok(())
    }
}

/// Check that `states` and `attributes` cover a box of `extent` exactly,
/// shapes and element counts both.
fn check_arrays(
    extent: &[usize],
    k: usize,
    states: &StateArray,
    attributes: Option<&AttributeArray>,
) -> Result<(), GridError> {
    let cells = checked_volume(extent);
    if states.shape() != extent || cells != Some(states.len()) {
        return Err(GridError::ShapeMismatch {
            expected: Dims::from_slice(extent),
            actual: Dims::from_slice(states.shape()),
        });
    }
    let mut expected_attrs = Dims::from_slice(extent);
    expected_attrs.push(k);
    let values = cells.and_then(|c| c.checked_mul(k));
    match (attributes, k) {
        (None, 0) => Ok(()),
        (Some(a), k) if k > 0 && a.shape() == expected_attrs.as_slice() && values == Some(a.len()) => {
            Ok(())
        }
        (Some(a), _) => Err(GridError::ShapeMismatch {
            expected: if k == 0 { Dims::new() } else { expected_attrs },
            actual: Dims::from_slice(a.shape()),
        }),
        (None, _) => Err(GridError::ShapeMismatch {
            expected: expected_attrs,
            actual: Dims::new(),
        }),
    }
}

/// Cut the write buffer into one slab per interior axis-0 index.
fn slabs_of<'a>(
    layout: &'a Layout,
    states: &'a mut [State],
    attributes: Option<&'a mut [f64]>,
) -> Vec<SlabWriter<'a>> {
    let k = layout.attribute_count();
    if layout.ndim() == 0 {
        return vec![SlabWriter::new(
            layout,
            0,
            InteriorPositions::from_box(&[], &[]),
            states,
            attributes,
        )];
    }

    let interior = &layout.config.interior_dimensions;
    let border = &layout.config.border_widths;
    let row = layout.strides[0];
    if row == 0 || checked_volume(interior).unwrap_or(0) == 0 {
        return Vec::new();
    }

    let first = border[0];
    let rows = interior[0];
    let state_rows = states.chunks_mut(row).skip(first).take(rows);
    let attr_rows: Box<dyn Iterator<Item = Option<&'a mut [f64]>> + 'a> = match attributes {
        Some(a) => Box::new(a.chunks_mut(row * k).skip(first).take(rows).map(Some)),
        None => Box::new(std::iter::repeat_with(|| None)),
    };

    state_rows
        .zip(attr_rows)
        .enumerate()
        .map(|(i, (s, a))| {
            let index = first + i;
            let mut origin = border.clone();
            origin[0] = index;
            let mut extent = interior.clone();
            extent[0] = 1;
            SlabWriter::new(
                layout,
                index * row,
                InteriorPositions::from_box(&origin, &extent),
                s,
                a,
            )
        })
        .collect()
}
