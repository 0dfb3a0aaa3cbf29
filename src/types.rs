use std::collections::HashMap;
use serde_json::Value;

/// Generic metadata container
pub type Metadata = HashMap<String, Value>;
