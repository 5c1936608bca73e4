//! Route descriptors and routers.
//!
//! This crate defines the route side of the gantry registry:
//!
//! - [`RouteDescriptor`], the opaque contract every stored route satisfies
//! - [`ApiRoute`], the concrete endpoint descriptor
//! - [`APIRouter`] and the [`RouteCollection`] accessor used to merge routers
//! - [`IncludeOptions`], accepted when a router is included
//!
//! Nothing in this crate matches requests. Path parameters are parsed only
//! so they can be documented.

#![forbid(unsafe_code)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::must_use_candidate)]

mod api_router;
mod depends;
mod params;
mod route;

pub use api_router::{APIRouter, IncludeOptions, RouteCollection};
pub use depends::{Dependency, DependencyScope};
pub use params::{Converter, ParamInfo, extract_path_params, strip_converters};
pub use route::{
    ApiRoute, IntoRoute, OperationMeta, ResponseClass, ResponseDef, RouteDescriptor, SharedRoute,
    default_operation_id,
};
