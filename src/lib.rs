//! Fetches a Figma node subtree and reduces it to compact, presentation-oriented JSON.
//!
//! The reduction itself ([`reduce`]) is a pure function of a [`RawNode`]. Everything that
//! touches the network or the filesystem lives at the edges: [`FigmaClient`] fetches a node,
//! [`server`] exposes `POST /api/reduce`, and the `figma-reduce` binary drives the one-shot flow.
#![forbid(unsafe_code)]

mod foundation;

pub mod color;
pub mod compact;
pub mod config;
pub mod fetch;
pub mod locate;
pub mod logging;
pub mod model;
pub mod reduce;
pub mod server;
mod verbose;

pub use crate::foundation::error;

pub use color::normalize;
pub use compact::{compact, is_vacant};
pub use config::{FetchConfig, ServerConfig};
pub use error::{ReduceError, ReduceResult};
pub use fetch::FigmaClient;
pub use locate::{DocumentRef, locate};
pub use model::{BoundingBox, Color, Paint, RawNode, TypeStyle};
pub use reduce::{Profile, ReducedNode, reduce};
