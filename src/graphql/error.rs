//! GraphQL error conversion

use crate::error::GatewayError;
use async_graphql::{Error, ErrorExtensions};

impl ErrorExtensions for GatewayError {
    fn extend(&self) -> Error {
        Error::new(self.to_string()).extend_with(|_, ext| {
            ext.set("code", self.code());
            match self {
                GatewayError::IndexNotFound(uid) => ext.set("index", uid.as_str()),
                GatewayError::InvalidArgument { code, .. } => ext.set("engineCode", code.as_str()),
                GatewayError::Engine { status, .. } => ext.set("status", i32::from(*status)),
                GatewayError::SearchEngineUnavailable(_) | GatewayError::Decode(_) => {}
            }
        })
    }
}
