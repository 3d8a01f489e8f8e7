//! Request dispatch
//!
//! - `bind` - Pure mapping of an argument object onto a tool's path, query and headers
//! - `HttpTransport` - Seam over the HTTP client (`ReqwestTransport` in production)
//! - `Dispatcher` - Binds, sends and checks the status of a single tool call

mod binding;
mod dispatcher;
mod transport;

pub use binding::{bind, percent_encode_path_param, render_value, BoundRequest};
pub use dispatcher::Dispatcher;
pub use transport::{HttpResponse, HttpTransport, ReqwestTransport};
