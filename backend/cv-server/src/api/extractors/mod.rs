pub mod session;
pub mod validated_json;
