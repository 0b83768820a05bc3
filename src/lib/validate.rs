//! Shape checks for credentials, CIDs, cloud regions and profile names.
//!
//! Every check runs before anything is persisted.

use std::sync::LazyLock;

use regex::Regex;

use crate::{
    api::Cloud,
    config::{profile_env_infix, ConfigKey, Profile, ENV_PREFIX},
    lib::errors::ValidationError,
};

static CID_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new("^[0-9a-fA-F]{32}-[0-9a-fA-F]{2}$").expect("CID pattern compiles")
});
static CLIENT_ID_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[0-9a-z]{32}$").expect("client ID pattern compiles"));
static CLIENT_SECRET_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[0-9a-zA-Z]{40}$").expect("client secret pattern compiles"));
static PROFILE_NAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new("^[A-Za-z0-9][A-Za-z0-9_-]*$").expect("profile pattern compiles"));

/// CID and member CID: 32 hex digits, a dash, 2 hex digits. Empty means unset.
pub fn validate_cid(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || CID_PATTERN.is_match(value) {
        return Ok(());
    }
    Err(ValidationError::new(
        field,
        "expected 32 hexadecimal characters, a dash and a 2 character checksum",
    ))
}

pub fn validate_client_id(value: &str) -> Result<(), ValidationError> {
    if CLIENT_ID_PATTERN.is_match(value) {
        return Ok(());
    }
    Err(ValidationError::new(
        "client ID",
        "expected 32 lowercase alphanumeric characters",
    ))
}

pub fn validate_client_secret(value: &str) -> Result<(), ValidationError> {
    if CLIENT_SECRET_PATTERN.is_match(value) {
        return Ok(());
    }
    Err(ValidationError::new(
        "client secret",
        "expected 40 alphanumeric characters",
    ))
}

/// Empty is accepted and later resolves to `autodiscover`.
pub fn validate_cloud(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    value.parse::<Cloud>().map(|_| ()).map_err(|_| {
        ValidationError::new(
            "cloud",
            format!(
                "expected one of {}",
                Cloud::ALL.map(|cloud| cloud.as_str()).join(", ")
            ),
        )
    })
}

/// Profile names become environment variable infixes and top-level YAML keys,
/// so they are restricted to letters, digits, `-` and `_`, and may not shadow
/// an unscoped configuration key.
pub fn validate_profile_name(name: &str) -> Result<(), ValidationError> {
    if !PROFILE_NAME_PATTERN.is_match(name) {
        return Err(ValidationError::new(
            "profile name",
            "use letters, digits, '-' or '_' and start with a letter or digit",
        ));
    }
    if ConfigKey::ALL.iter().any(|key| key.as_str() == name) {
        return Err(ValidationError::new(
            "profile name",
            format!("`{name}` is reserved for unscoped configuration values"),
        ));
    }
    Ok(())
}

/// Two profiles may not share a `FALCON_<PROFILE>__` namespace, so `prod-eu`
/// cannot join a store that already holds `prod_eu`.
pub fn validate_profile_env_namespace<'a>(
    name: &str,
    existing: impl IntoIterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    let infix = profile_env_infix(name);
    match existing
        .into_iter()
        .find(|other| *other != name && profile_env_infix(other) == infix)
    {
        Some(other) => Err(ValidationError::new(
            "profile name",
            format!(
                "`{name}` and existing profile `{other}` share the environment prefix {ENV_PREFIX}_{infix}__"
            ),
        )),
        None => Ok(()),
    }
}

/// Run every check for a profile about to be persisted.
pub fn validate_profile(name: &str, profile: &Profile) -> Result<(), ValidationError> {
    validate_profile_name(name)?;
    validate_client_id(&profile.client_id)?;
    validate_client_secret(&profile.client_secret)?;
    validate_cid("CID", &profile.cid)?;
    validate_cid("member CID", &profile.member_cid)?;
    validate_cloud(&profile.cloud)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CLIENT_ID: &str = "0123456789abcdef0123456789abcdef";
    const CLIENT_SECRET: &str = "0123456789ABCDEFGHIJabcdefghij0123456789";
    const CID: &str = "0123456789ABCDEF0123456789abcdef-1A";

    fn valid_profile() -> Profile {
        Profile {
            cid: CID.into(),
            client_id: CLIENT_ID.into(),
            client_secret: CLIENT_SECRET.into(),
            member_cid: String::new(),
            cloud: "us-2".into(),
        }
    }

    #[test]
    fn well_formed_profile_passes() {
        validate_profile("default", &valid_profile()).expect("profile is valid");
    }

    #[test]
    fn client_id_must_be_exact_length_and_lowercase() {
        assert!(validate_client_id(CLIENT_ID).is_ok());
        assert!(validate_client_id(&CLIENT_ID.to_uppercase()).is_err());
        assert!(validate_client_id(&format!("{CLIENT_ID}0")).is_err());
        assert!(validate_client_id("").is_err());
    }

    #[test]
    fn profiles_sharing_an_env_prefix_are_rejected() {
        let existing = ["default", "prod_eu"];

        let error = validate_profile_env_namespace("prod-eu", existing)
            .expect_err("prod-eu collides with prod_eu");
        assert_eq!(error.field, "profile name");
        assert!(error.to_string().contains("FALCON_PROD_EU__"), "{error}");
        assert!(validate_profile_env_namespace("PROD_EU", existing).is_err());
        assert!(validate_profile_env_namespace("prod_eu", existing).is_ok());
        assert!(validate_profile_env_namespace("prod-us", existing).is_ok());
    }

    #[test]
    fn client_secret_rejects_symbols() {
        let mut secret = CLIENT_SECRET.to_string();
        secret.replace_range(0..1, "!");
        let error = validate_client_secret(&secret).expect_err("symbol is invalid");
        assert_eq!(error.field, "client secret");
        assert!(!error.to_string().contains(&secret));
    }

    #[test]
    fn cid_is_optional_but_checked_when_present() {
        assert!(validate_cid("CID", "").is_ok());
        assert!(validate_cid("CID", CID).is_ok());
        assert!(validate_cid("CID", "0123456789abcdef0123456789abcdef").is_err());
        let error = validate_cid("member CID", "not-a-cid").expect_err("bad member cid");
        assert_eq!(error.field, "member CID");
    }

    #[test]
    fn cloud_must_be_known_region() {
        assert!(validate_cloud("").is_ok());
        assert!(validate_cloud("eu-1").is_ok());
        assert!(validate_cloud("autodiscover").is_ok());
        let error = validate_cloud("mars-1").expect_err("unknown region");
        assert!(error.message.contains("us-gov-1"));
    }

    #[test]
    fn profile_name_rules() {
        assert!(validate_profile_name("prod-eu_2").is_ok());
        assert!(validate_profile_name("").is_err());
        assert!(validate_profile_name("has.dot").is_err());
        assert!(validate_profile_name("-leading").is_err());
        assert!(validate_profile_name("client_id").is_err());
        assert!(validate_profile_name("profile").is_err());
    }
}
