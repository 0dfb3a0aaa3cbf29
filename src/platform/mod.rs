// src/platform/mod.rs - Transport abstraction and its native implementation

pub mod native;
pub mod network;

pub use native::{create_network, NativeNetwork};
pub use network::{
    FormPart, HttpMethod, MultipartForm, NetworkArc, NetworkProvider, NetworkRequest,
    NetworkResponse, RequestBody,
};
