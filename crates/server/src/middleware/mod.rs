//! HTTP middleware and extractors for the wallet server.
//!
//! Transport concerns only: request ids, the per-exchange log span, and the calling origin.
//! Everything about chains and approvals lives in `chainswitch_core`.

pub mod origin;
pub mod request_id;

pub use origin::{origin_from_headers, RequestOrigin, ORIGIN_HEADER};
pub use request_id::{
    create_request_id_layers, make_request_span, UuidRequestIdGenerator, X_REQUEST_ID,
};
