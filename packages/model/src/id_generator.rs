use uuid::Uuid;

/// Number of hex digits in a node identifier
pub const ID_LENGTH: usize = 10;

/// Generate a fresh node identifier (10 lowercase hex digits)
pub fn new_id() -> String {
    let mut id = Uuid::new_v4().simple().to_string();
    id.truncate(ID_LENGTH);
    id
}

/// Check whether a string has the shape of a generated identifier
pub fn is_generated_id(id: &str) -> bool {
    id.len() == ID_LENGTH && id.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'))
}
