pub mod headers;

pub use headers::json_headers_middleware;
