//! Double-buffered, bordered N-dimensional grid storage for ncell.
//!
//! The [`GridStore`] keeps two full copies of the grid. During a step the
//! read buffer holds generation N-1 and is never written, while every
//! interior cell of the write buffer receives generation N. Cells outside
//! the interior form a border (halo) that is only written explicitly, so
//! every interior cell sees a complete neighborhood.
//!
//! # Architecture
//!
//! ```text
//! GridStore
//! ├── Layout (GridConfig + full extents + strides)
//! ├── states: [Vec<State>; 2]
//! ├── attributes: Option<[Vec<f64>; 2]>
//! └── read selector (0 | 1), write = 1 - read
//!
//! BufferReader  ── shared view of one buffer (reads, mask application)
//! SlabWriter    ── exclusive view of one axis-0 slab of the write buffer
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod array;
pub mod config;
pub mod error;
mod layout;
pub mod positions;
pub mod region;
pub mod store;
pub mod view;

pub use array::{AttributeArray, GridSnapshot, StateArray};
pub use config::GridConfig;
pub use error::GridError;
pub use positions::InteriorPositions;
pub use region::Region;
pub use store::{BufferRole, GridStore};
pub use view::{BufferReader, SlabWriter};
