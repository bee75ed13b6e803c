//! Request bodies accepted by the user routes.
//!
//! The validation gate checks presence and format only. Once a request is
//! accepted its body is handed on exactly as the client sent it: no field is
//! typed, trimmed, renamed or dropped, and fields no rule mentions travel
//! along with the rest.

use serde::Serialize;
use serde_json::{Map, Value};

/// A JSON object body.
pub type JsonObject = Map<String, Value>;

macro_rules! accepted_body {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Default, PartialEq, Serialize)]
        #[serde(transparent)]
        pub struct $name(JsonObject);

        impl $name {
            pub fn new(body: JsonObject) -> Self {
                Self(body)
            }
        }
    };
}

accepted_body! {
    /// Request to register a new user.
    ///
    /// # JSON Example
    ///
    /// ```json
    /// {
    ///   "username": "alice",
    ///   "email": "alice@example.com",
    ///   "password": "hunter22"
    /// }
    /// ```
    RegisterRequest
}

accepted_body! {
    /// Request to log in with `email` and `password`.
    LoginRequest
}

accepted_body! {
    /// Request to set the avatar of the user named in the path.
    ///
    /// # JSON Example
    ///
    /// ```json
    /// {
    ///   "avatar": "https://cdn.example.com/a.png"
    /// }
    /// ```
    SetAvatarRequest
}

accepted_body! {
    /// Request to delete several users at once.
    ///
    /// # JSON Example
    ///
    /// ```json
    /// {
    ///   "userIds": ["64f0c2", "64f0c3"]
    /// }
    /// ```
    ///
    /// Ids are forwarded as-is; their format belongs to the user service.
    DeleteUsersRequest
}

impl DeleteUsersRequest {
    /// The `userIds` array, or an empty slice if it is not an array.
    pub fn user_ids(&self) -> &[Value] {
        self.0
            .get("userIds")
            .and_then(Value::as_array)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> JsonObject {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn serializes_back_to_the_same_body() {
        let body = json!({"username": "alice", "password": 123456, "referrer": "ads"});

        let request = RegisterRequest::new(object(body.clone()));

        assert_eq!(serde_json::to_value(&request).unwrap(), body);
    }

    #[test]
    fn user_ids_reads_the_array() {
        let request = DeleteUsersRequest::new(object(json!({"userIds": ["a", 2]})));

        assert_eq!(request.user_ids(), [json!("a"), json!(2)]);
        assert!(DeleteUsersRequest::default().user_ids().is_empty());
    }
}
