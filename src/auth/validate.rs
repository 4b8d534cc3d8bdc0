use super::dto::SignupRequest;

pub const USERNAME_REQUIRED: &str = "Username is required.";
pub const PASSWORD_REQUIRED: &str = "Password is required.";

#[derive(Debug)]
pub struct ValidSignup {
    pub username: String,
    pub password: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
}

/// Collects every violation, username first.
pub fn validate_signup(req: SignupRequest) -> Result<ValidSignup, Vec<String>> {
    let mut errors = Vec::new();

    let username = req.username.filter(|u| !u.is_empty());
    if username.is_none() {
        errors.push(USERNAME_REQUIRED.to_string());
    }
    let password = req.password.filter(|p| !p.is_empty());
    if password.is_none() {
        errors.push(PASSWORD_REQUIRED.to_string());
    }

    match (username, password) {
        (Some(username), Some(password)) => Ok(ValidSignup {
            username,
            password,
            bio: req.bio,
            image_url: req.image_url,
        }),
        _ => Err(errors),
    }
}
