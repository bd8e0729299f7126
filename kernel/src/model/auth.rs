/// Opaque bearer token planted by the session provider.
pub struct AccessToken(pub String);
