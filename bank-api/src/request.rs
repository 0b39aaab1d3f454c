use serde::Serialize;
use serde::de::DeserializeOwned;
use std::borrow::Cow;

/// HTTP methods used by the backend contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

/// Payload attached to a request, if any.
pub enum RequestData<'a, T: Serialize> {
    Empty,
    Json(&'a T),
}

/// A typed request against the backend REST contract.
///
/// Each endpoint is a struct implementing this trait; `Client::send`
/// turns it into an HTTP call and deserializes the typed response.
pub trait Request {
    type Body: Serialize;
    type Response: DeserializeOwned;

    fn endpoint(&self) -> Cow<'_, str>;

    fn method(&self) -> Method {
        Method::Get
    }

    fn data(&self) -> RequestData<'_, Self::Body> {
        RequestData::Empty
    }
}
