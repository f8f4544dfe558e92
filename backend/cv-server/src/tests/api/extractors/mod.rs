mod session;
mod validated_json;
