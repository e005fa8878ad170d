//! HTTP handlers.
//!
//! Entry and form handlers are generic over the record type; the routes
//! module instantiates them once per kind.

pub mod auth;
pub mod entry;
pub mod form;
pub mod resolve;

use inventory_core::form::FormMapping;
use inventory_core::presenter::Presentable;

/// Everything a record type needs to be served under `/{kind}`.
pub trait Listing: FormMapping + Presentable {}

impl<R: FormMapping + Presentable> Listing for R {}
