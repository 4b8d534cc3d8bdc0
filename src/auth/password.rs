use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use tracing::error;

/// Argon2id hash with default parameters and no known preimage. Logins for
/// unknown usernames verify against it so they cost as much as a wrong
/// password.
pub const DUMMY_HASH: &str =
    "$argon2id$v=19$m=19456,t=2,p=1$eL+IyLjxPALhk2yBNbNxNw$aOACPUPn33j8ksNzGjsmpRBQbbLHm301WVkSSAtjG98";

pub fn hash_password(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

/// Argon2 compares digests in constant time. A missing or unparsable stored
/// hash is a failed match, not an error.
pub fn verify_password(plain: &str, hash: Option<&str>) -> bool {
    let Some(hash) = hash else {
        return false;
    };
    let parsed = match PasswordHash::new(hash) {
        Ok(p) => p,
        Err(e) => {
            error!(error = %e, "argon2 parse hash error");
            return false;
        }
    };
    Argon2::default()
        .verify_password(plain.as_bytes(), &parsed)
        .is_ok()
}

/// Runs a full verification against `DUMMY_HASH` and always fails.
pub fn verify_unknown_user(plain: &str) -> bool {
    verify_password(plain, Some(DUMMY_HASH));
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = hash_password(password).expect("hashing should succeed");
        assert!(verify_password(password, Some(&hash)));
    }

    #[test]
    fn verify_rejects_wrong_password() {
        let hash = hash_password("correct-horse-battery-staple").expect("hashing should succeed");
        assert!(!verify_password("wrong-password", Some(&hash)));
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let a = hash_password("repeat").unwrap();
        let b = hash_password("repeat").unwrap();
        assert_ne!(a, b);
        assert!(!a.contains("repeat"));
    }

    #[test]
    fn verify_is_false_without_hash() {
        assert!(!verify_password("anything", None));
    }

    #[test]
    fn dummy_hash_costs_the_same_as_a_real_one() {
        use argon2::{Algorithm, Params};

        let dummy = PasswordHash::new(DUMMY_HASH).expect("dummy hash parses");
        let real_hash = hash_password("pw").unwrap();
        let real = PasswordHash::new(&real_hash).unwrap();
        assert_eq!(dummy.algorithm, real.algorithm);
        assert_eq!(Algorithm::try_from(dummy.algorithm).unwrap(), Algorithm::Argon2id);

        let dummy_params = Params::try_from(&dummy).unwrap();
        let real_params = Params::try_from(&real).unwrap();
        assert_eq!(dummy_params.m_cost(), real_params.m_cost());
        assert_eq!(dummy_params.t_cost(), real_params.t_cost());
        assert_eq!(dummy_params.p_cost(), real_params.p_cost());
    }

    #[test]
    fn unknown_user_never_verifies() {
        assert!(!verify_unknown_user(""));
        assert!(!verify_unknown_user("pw"));
    }

    #[test]
    fn verify_is_false_on_malformed_hash() {
        assert!(!verify_password("anything", Some("not-a-valid-hash")));
    }
}
