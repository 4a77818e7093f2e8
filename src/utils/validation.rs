// src/utils/validation.rs
use regex::Regex;

// GitHub limits
const MAX_USERNAME_LENGTH: usize = 39;
const MAX_REPO_NAME_LENGTH: usize = 100;

lazy_static::lazy_static! {
    static ref USERNAME_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9](?:[a-zA-Z0-9-]*[a-zA-Z0-9])?$").unwrap();
    static ref REPO_NAME_REGEX: Regex = Regex::new(r"^[a-zA-Z0-9._-]+$").unwrap();
}

/// Validates a GitHub account name: alphanumerics and inner hyphens, at most 39 characters.
pub fn validate_username(username: &str) -> Result<(), String> {
    if username.is_empty() {
        return Err("Username cannot be empty".to_string());
    }

    if username.len() > MAX_USERNAME_LENGTH {
        return Err(format!(
            "Username must be at most {} characters",
            MAX_USERNAME_LENGTH
        ));
    }

    if !USERNAME_REGEX.is_match(username) {
        return Err("Username can only contain letters, numbers and single inner hyphens".to_string());
    }

    if username.contains("--") {
        return Err("Username cannot contain consecutive hyphens".to_string());
    }

    Ok(())
}

/// Validates a repository name as GitHub accepts it.
pub fn validate_repo_name(name: &str) -> Result<(), String> {
    if name.is_empty() || name.len() > MAX_REPO_NAME_LENGTH {
        return Err(format!(
            "Repository name must be between 1 and {} characters",
            MAX_REPO_NAME_LENGTH
        ));
    }

    if name == "." || name == ".." {
        return Err("Repository name cannot be a relative path".to_string());
    }

    if !REPO_NAME_REGEX.is_match(name) {
        return Err("Repository name can only contain letters, numbers, '.', '-' and '_'".to_string());
    }

    Ok(())
}
