//! Persisted profile store: a YAML mapping from profile name to credential record.
//!
//! Top-level scalar entries are kept alongside the profiles. They are the
//! unscoped values older releases wrote (`client_id: ...` at the root) and
//! take part in resolution below the profile-scoped values.
use std::{collections::BTreeMap, fmt, fs, io, path::Path};

use serde::{
    de::{self, DeserializeSeed, MapAccess, Visitor},
    Deserialize, Deserializer, Serialize,
};
use serde_yaml::Value as YamlValue;
use tracing::{debug, info};

use super::{redacted, ConfigKey};
use crate::lib::{errors::StoreError, fs as store_fs};

/// One named credential bundle. Field names are the on-disk keys.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub cid: String,
    #[serde(default, deserialize_with = "scalar_text")]
    pub client_id: String,
    #[serde(default, deserialize_with = "scalar_text")]
    pub client_secret: String,
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub member_cid: String,
    #[serde(
        default,
        deserialize_with = "scalar_text",
        skip_serializing_if = "String::is_empty"
    )]
    pub cloud: String,
}

impl Profile {
    /// Stored value for `key`; the profile name itself is not a field.
    pub fn get(&self, key: ConfigKey) -> &str {
        match key {
            ConfigKey::Cid => &self.cid,
            ConfigKey::ClientId => &self.client_id,
            ConfigKey::ClientSecret => &self.client_secret,
            ConfigKey::MemberCid => &self.member_cid,
            ConfigKey::Cloud => &self.cloud,
            ConfigKey::Profile => "",
        }
    }
}

impl fmt::Debug for Profile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Profile")
            .field("cid", &self.cid)
            .field("client_id", &self.client_id)
            .field("client_secret", &redacted(&self.client_secret))
            .field("member_cid", &self.member_cid)
            .field("cloud", &self.cloud)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
enum StoreEntry {
    Profile(Profile),
    Value(String),
}

/// A scalar exactly as written. `0123` and 40-digit numbers stay text; `~`
/// and an empty value read as "".
fn scalar_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EntryShape {
    Profile,
    Scalar,
}

enum ParseFailure {
    Yaml(serde_yaml::Error),
    Entry { key: String, message: String },
}

impl From<serde_yaml::Error> for ParseFailure {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Yaml(source)
    }
}

/// Read the top-level mapping with key case preserved.
///
/// The first pass only classifies entries. The second reads scalars as raw
/// text, since a parsed `serde_yaml::Value` has already turned digit-only
/// credentials into numbers.
fn parse_entries(text: &str) -> Result<BTreeMap<String, StoreEntry>, ParseFailure> {
    if text
        .lines()
        .all(|line| line.trim().is_empty() || line.trim_start().starts_with('#'))
    {
        return Ok(BTreeMap::new());
    }

    let Some(outline) = serde_yaml::from_str::<Option<BTreeMap<String, YamlValue>>>(text)? else {
        return Ok(BTreeMap::new());
    };
    let mut shapes = BTreeMap::new();
    for (key, value) in outline {
        let shape = match value {
            YamlValue::Mapping(_) => EntryShape::Profile,
            YamlValue::Null | YamlValue::Bool(_) | YamlValue::Number(_) | YamlValue::String(_) => {
                EntryShape::Scalar
            }
            YamlValue::Sequence(_) | YamlValue::Tagged(_) => {
                return Err(ParseFailure::Entry {
                    key,
                    message: "expected a profile mapping or a scalar value".into(),
                })
            }
        };
        shapes.insert(key, shape);
    }

    let entries = serde_yaml::Deserializer::from_str(text)
        .next()
        .map(|document| EntriesSeed { shapes: &shapes }.deserialize(document))
        .transpose()?
        .unwrap_or_default();
    Ok(entries)
}

struct EntriesSeed<'a> {
    shapes: &'a BTreeMap<String, EntryShape>,
}

impl<'de> DeserializeSeed<'de> for EntriesSeed<'_> {
    type Value = BTreeMap<String, StoreEntry>;

    fn deserialize<D>(self, deserializer: D) -> Result<Self::Value, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(self)
    }
}

impl<'de> Visitor<'de> for EntriesSeed<'_> {
    type Value = BTreeMap<String, StoreEntry>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a mapping of profile names to profiles")
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut entries = BTreeMap::new();
        while let Some(key) = map.next_key::<String>()? {
            let entry = match self.shapes.get(&key) {
                Some(EntryShape::Profile) => StoreEntry::Profile(map.next_value()?),
                Some(EntryShape::Scalar) => {
                    StoreEntry::Value(map.next_value::<ScalarText>()?.0)
                }
                None => return Err(de::Error::custom(format!("unexpected entry `{key}`"))),
            };
            entries.insert(key, entry);
        }
        Ok(entries)
    }
}

struct ScalarText(String);

impl<'de> Deserialize<'de> for ScalarText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        scalar_text(deserializer).map(Self)
    }
}

/// In-memory view of the store file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProfileStore {
    entries: BTreeMap<String, StoreEntry>,
}

impl ProfileStore {
    /// Load the store from `path`.
    ///
    /// Fails with [`StoreError::NotFound`] when the file is absent and with
    /// [`StoreError::Parse`] when it is not a YAML mapping. An empty file is an
    /// empty store.
    pub fn load(path: &Path) -> Result<Self, StoreError> {
        match fs::metadata(path) {
            Ok(_) => {}
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                return Err(StoreError::NotFound {
                    path: path.to_path_buf(),
                })
            }
            Err(err) => return Err(StoreError::from_io_error(path.to_path_buf(), err)),
        }

        let text = fs::read_to_string(path)
            .map_err(|err| StoreError::from_io_error(path.to_path_buf(), err))?;
        let entries = parse_entries(&text).map_err(|err| match err {
            ParseFailure::Yaml(source) => StoreError::from_parse_error(path.to_path_buf(), source),
            ParseFailure::Entry { key, message } => StoreError::InvalidEntry {
                path: path.to_path_buf(),
                key,
                message,
            },
        })?;

        debug!(
            target: "falcon::store",
            path = %path.display(),
            entries = entries.len(),
            "Loaded profile store"
        );
        Ok(Self { entries })
    }

    /// Load the store, treating a missing file as an empty store.
    pub fn load_or_default(path: &Path) -> Result<Self, StoreError> {
        match Self::load(path) {
            Err(err) if err.is_not_found() => {
                debug!(
                    target: "falcon::store",
                    path = %path.display(),
                    "Profile store not found; using defaults"
                );
                Ok(Self::default())
            }
            other => other,
        }
    }

    /// Atomically replace the file at `path` with this store.
    pub fn save(&self, path: &Path) -> Result<(), StoreError> {
        let serialized =
            serde_yaml::to_string(&self.entries).map_err(|source| StoreError::Serialize {
                path: path.to_path_buf(),
                source,
            })?;
        store_fs::write_atomic(path, serialized.as_bytes())
            .map_err(|err| StoreError::from_io_error(path.to_path_buf(), err))?;
        info!(
            target: "falcon::store",
            path = %path.display(),
            profiles = self.profile_names().count(),
            "Saved profile store"
        );
        Ok(())
    }

    /// Create parent directories and an empty store file when absent.
    pub fn ensure_exists(path: &Path) -> Result<(), StoreError> {
        store_fs::ensure_file(path).map_err(|err| StoreError::from_io_error(path.to_path_buf(), err))
    }

    pub fn profile(&self, name: &str) -> Option<&Profile> {
        match self.entries.get(name) {
            Some(StoreEntry::Profile(profile)) => Some(profile),
            _ => None,
        }
    }

    /// Insert or replace one profile. Every other entry is left as loaded.
    pub fn upsert_profile(&mut self, name: &str, profile: Profile) {
        self.entries
            .insert(name.to_string(), StoreEntry::Profile(profile));
    }

    pub fn profile_names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().filter_map(|(name, entry)| match entry {
            StoreEntry::Profile(_) => Some(name.as_str()),
            StoreEntry::Value(_) => None,
        })
    }

    /// Top-level scalar value stored outside any profile.
    pub fn unscoped(&self, key: &str) -> Option<&str> {
        match self.entries.get(key) {
            Some(StoreEntry::Value(value)) => Some(value.as_str()),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
