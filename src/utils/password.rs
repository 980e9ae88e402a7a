// utils/password.rs
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, SaltString},
    Argon2,
};

pub fn hash(password: impl Into<String>) -> Result<String, String> {
    let password = password.into();

    if password.is_empty() {
        return Err("Password cannot be empty".to_string());
    }

    let salt = SaltString::generate(&mut OsRng);
    let hashed = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| format!("Error while hashing password: {}", e))?;

    Ok(hashed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hashes_are_salted() {
        let a = hash("hunter2hunter2").unwrap();
        let b = hash("hunter2hunter2").unwrap();
        assert_ne!(a, b);
        assert!(a.starts_with("$argon2"));
    }

    #[test]
    fn empty_password_is_rejected() {
        assert!(hash("").is_err());
    }
}
