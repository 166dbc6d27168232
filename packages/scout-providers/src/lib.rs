pub mod assist;

mod error;

pub use assist::{AssistRequest, AssistResponse, RawCard, RequestMeta, ResponseMeta, ask};
pub use error::{Error, Result};
