//! Borrowed views of one grid buffer.
//!
//! [`BufferReader`] is a shared view of a single buffer: every read
//! operation of the store is implemented here. [`SlabWriter`] is an
//! exclusive view of one axis-0 slab of the write buffer; the slabs of a
//! buffer are disjoint, so they can be filled concurrently while a reader
//! borrows the other buffer.

use ncell_core::{Attributes, Cell, Coord, Mask, Neighbors, State};

use crate::array::{AttributeArray, StateArray};
use crate::error::GridError;
use crate::layout::{write_cell, Layout};
use crate::positions::InteriorPositions;
use crate::region::Region;

// ── BufferReader ───────────────────────────────────────────────────

/// Read-only view of one buffer of a [`GridStore`](crate::GridStore).
///
/// Obtained from [`GridStore::reader`](crate::GridStore::reader) or
/// [`GridStore::split_for_update`](crate::GridStore::split_for_update).
#[derive(Clone, Copy, Debug)]
pub struct BufferReader<'a> {
    layout: &'a Layout,
    states: &'a [State],
    attributes: Option<&'a [f64]>,
}

impl<'a> BufferReader<'a> {
    pub(crate) fn new(layout: &'a Layout, states: &'a [State], attributes: Option<&'a [f64]>) -> Self {
        Self {
            layout,
            states,
            attributes,
        }
    }

    /// The cell at a full-grid position. Border positions are allowed.
    pub fn get_cell(&self, position: &[usize]) -> Result<Cell, GridError> {
        let flat = self.layout.flat_index(position)?;
        Ok(self.cell_at(flat))
    }

    fn cell_at(&self, flat: usize) -> Cell {
        let k = self.layout.attribute_count();
        Cell {
            state: self.states[flat],
            attributes: self
                .attributes
                .map(|a| Attributes::from_slice(&a[flat * k..(flat + 1) * k])),
        }
    }

    /// Extract the neighborhood selected by `mask` placed at `position`.
    ///
    /// Reads the box `[position[i], position[i] + mask.shape()[i])` and
    /// keeps the cells where the mask is `true`, in row-major order. The
    /// position is the mask origin; no offset is applied here.
    pub fn apply_mask(&self, position: &[usize], mask: &Mask) -> Result<Neighbors, GridError> {
        let mut out = Neighbors::with_capacity(mask.selected_count(), self.layout.attribute_count());
        self.apply_mask_into(position, mask, &mut out)?;
        Ok(out)
    }

    /// [`apply_mask`](Self::apply_mask) into a reusable buffer.
    ///
    /// `out` is cleared first. On error its contents are unspecified but
    /// the grid is untouched.
    pub fn apply_mask_into(
        &self,
        position: &[usize],
        mask: &Mask,
        out: &mut Neighbors,
    ) -> Result<(), GridError> {
        self.layout.check_rank("mask", mask.ndim())?;
        self.layout.check_box(position, mask.shape())?;

        let k = self.layout.attribute_count();
        out.reset(k);
        let base = self.layout.flat_unchecked(position);
        let shape = mask.shape();
        let strides = &self.layout.strides;
        let rank = shape.len();

        let mut rel: Coord = smallvec::smallvec![0; rank];
        let mut offset = 0usize;
        for &selected in mask.as_slice() {
            if selected {
                let flat = base + offset;
                out.states.push(self.states[flat]);
                if let (Some(dst), Some(src)) = (out.attributes.as_mut(), self.attributes) {
                    dst.extend_from_slice(&src[flat * k..(flat + 1) * k]);
                }
            }
            for axis in (0..rank).rev() {
                rel[axis] += 1;
                offset += strides[axis];
                if rel[axis] < shape[axis] {
                    break;
                }
                offset -= strides[axis] * rel[axis];
                rel[axis] = 0;
            }
        }
        Ok(())
    }

    /// Interior states as a fresh array shaped like the interior.
    pub fn states(&self) -> StateArray {
        let data = self
            .layout
            .interior_positions()
            .map(|p| self.states[self.layout.flat_unchecked(&p)])
            .collect();
        StateArray::from_parts(&self.layout.config.interior_dimensions, data)
    }

    /// Interior attributes shaped `interior ++ [attribute_count]`, or
    /// `None` for attribute-less grids.
    pub fn attributes(&self) -> Option<AttributeArray> {
        let attrs = self.attributes?;
        let k = self.layout.attribute_count();
        let mut data = Vec::with_capacity(self.layout.interior_volume() * k);
        for p in self.layout.interior_positions() {
            let flat = self.layout.flat_unchecked(&p);
            data.extend_from_slice(&attrs[flat * k..(flat + 1) * k]);
        }
        let mut shape = self.layout.config.interior_dimensions.clone();
        shape.push(k);
        Some(AttributeArray::from_parts(&shape, data))
    }

    /// Every state of the buffer, border included, shaped like the full
    /// grid.
    pub fn states_with_border(&self) -> StateArray {
        StateArray::from_parts(&self.layout.full, self.states.to_vec())
    }

    /// States inside `region` (full-grid coordinates).
    pub fn region_states(&self, region: &Region) -> Result<StateArray, GridError> {
        self.layout.check_box(&region.origin, &region.extent)?;
        let data = region
            .positions()
            .map(|p| self.states[self.layout.flat_unchecked(&p)])
            .collect();
        Ok(StateArray::from_parts(&region.extent, data))
    }

    /// Attributes inside `region`, shaped `extent ++ [attribute_count]`,
    /// or `None` for attribute-less grids.
    pub fn region_attributes(&self, region: &Region) -> Result<Option<AttributeArray>, GridError> {
        self.layout.check_box(&region.origin, &region.extent)?;
        let Some(attrs) = self.attributes else {
            return Ok(None);
        };
        let k = self.layout.attribute_count();
        let mut data = Vec::with_capacity(region.volume().saturating_mul(k));
        for p in region.positions() {
            let flat = self.layout.flat_unchecked(&p);
            data.extend_from_slice(&attrs[flat * k..(flat + 1) * k]);
        }
        let mut shape = region.extent.clone();
        shape.push(k);
        Ok(Some(AttributeArray::from_parts(&shape, data)))
    }

    /// Number of interior cells holding `state`.
    pub fn count_state(&self, state: State) -> usize {
        self.layout
            .interior_positions()
            .filter(|p| self.states[self.layout.flat_unchecked(p)] == state)
            .count()
    }

    /// Raw buffer contents, border included, row-major over the full grid.
    pub fn raw_states(&self) -> &'a [State] {
        self.states
    }

    /// Raw attribute contents, border included, cell-major.
    pub fn raw_attributes(&self) -> Option<&'a [f64]> {
        self.attributes
    }
}

// ── SlabWriter ─────────────────────────────────────────────────────

/// Exclusive view of one axis-0 slab of the write buffer.
///
/// A slab is the hyperplane of cells sharing one interior index on axis 0
/// (the whole grid for a zero-dimensional grid). Only interior positions
/// within the slab can be written.
#[derive(Debug)]
pub struct SlabWriter<'a> {
    layout: &'a Layout,
    start: usize,
    positions: InteriorPositions,
    states: &'a mut [State],
    attributes: Option<&'a mut [f64]>,
}

impl<'a> SlabWriter<'a> {
    pub(crate) fn new(
        layout: &'a Layout,
        start: usize,
        positions: InteriorPositions,
        states: &'a mut [State],
        attributes: Option<&'a mut [f64]>,
    ) -> Self {
        Self {
            layout,
            start,
            positions,
            states,
            attributes,
        }
    }

    /// Interior positions of this slab, row-major.
    pub fn positions(&self) -> InteriorPositions {
        self.positions.clone()
    }

    /// Write `cell` at an interior position of this slab.
    ///
    /// Same validation as
    /// [`GridStore::update_cell`](crate::GridStore::update_cell), plus
    /// `OutOfRange` for positions owned by another slab.
    pub fn write(&mut self, position: &[usize], cell: &Cell) -> Result<(), GridError> {
        let flat = self.layout.flat_index(position)?;
        self.layout.check_cell(cell)?;
        self.layout.check_interior(position)?;
        let local = flat
            .checked_sub(self.start)
            .filter(|&i| i < self.states.len())
            .ok_or_else(|| GridError::OutOfRange {
                position: position.to_vec(),
                bounds: format!("slab starting at flat index {}", self.start),
            })?;
        write_cell(
            &mut *self.states,
            self.attributes.as_deref_mut(),
            self.layout.attribute_count(),
            local,
            cell,
        );
        Ok(())
    }
}
