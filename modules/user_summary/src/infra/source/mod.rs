mod http;

pub use http::HttpUserSource;
