//! The base entity record and the trait concrete entity types implement.
//!
//! A record is either fresh (generated id, both timestamps stamped to the
//! same instant) or reconstructed from a mapping produced by `to_dict`.
//! Reconstruction trusts the caller: keys it does not supply stay absent,
//! and the accessors for absent known fields return
//! [`ModelError::MissingAttribute`].

pub mod call;
mod render;
pub mod timestamp;

use std::collections::BTreeMap;
use std::fmt;

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};
use tracing::debug;
use uuid::Uuid;

use crate::error::{ModelError, Result};
use crate::storage::StorageHook;

/// Serialized key carrying the concrete type name.
pub const CLASS_KEY: &str = "__class__";

pub const ID_KEY: &str = "id";
pub const CREATED_AT_KEY: &str = "created_at";
pub const UPDATED_AT_KEY: &str = "updated_at";

/// Serialized form of a record.
pub type Mapping = Map<String, Value>;

/// Identity and timestamp fields shared by all entities, plus any extra
/// attributes carried over from reconstruction.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseModel {
    id: Option<String>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
    extra: BTreeMap<String, Value>,
}

impl BaseModel {
    pub const CLASS_NAME: &'static str = "BaseModel";

    /// Fresh record with a new UUID v4 id and `created_at == updated_at`.
    pub fn new() -> Self {
        let now = timestamp::now();
        let model = Self {
            id: Some(Uuid::new_v4().to_string()),
            created_at: Some(now),
            updated_at: Some(now),
            extra: BTreeMap::new(),
        };
        debug!(id = model.id.as_deref(), "created record");
        model
    }

    /// Build a record from serialized data.
    ///
    /// An empty mapping yields a fresh record. Otherwise every key becomes an
    /// attribute, `created_at`/`updated_at` are parsed from ISO strings and
    /// `__class__` is dropped.
    pub fn from_mapping(mapping: Mapping) -> Result<Self> {
        if mapping.is_empty() {
            return Ok(Self::new());
        }

        let mut model = Self {
            id: None,
            created_at: None,
            updated_at: None,
            extra: BTreeMap::new(),
        };
        for (key, value) in mapping {
            model.set_attribute(key, value)?;
        }
        debug!(
            id = model.id.as_deref(),
            extra = model.extra.len(),
            "reconstructed record"
        );
        Ok(model)
    }

    pub fn id(&self) -> Result<&str> {
        self.id
            .as_deref()
            .ok_or_else(|| ModelError::MissingAttribute(ID_KEY.to_string()))
    }

    pub fn created_at(&self) -> Result<DateTime<Utc>> {
        self.created_at
            .ok_or_else(|| ModelError::MissingAttribute(CREATED_AT_KEY.to_string()))
    }

    pub fn updated_at(&self) -> Result<DateTime<Utc>> {
        self.updated_at
            .ok_or_else(|| ModelError::MissingAttribute(UPDATED_AT_KEY.to_string()))
    }

    /// Attributes other than the identity and timestamp fields.
    pub fn extra(&self) -> &BTreeMap<String, Value> {
        &self.extra
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.extra.get(key)
    }

    /// Set an attribute by name, with the same rules as reconstruction.
    pub fn set_attribute(&mut self, key: impl Into<String>, value: Value) -> Result<()> {
        let key = key.into();
        match key.as_str() {
            CLASS_KEY => {}
            ID_KEY => match value {
                Value::String(id) => self.id = Some(id),
                _ => {
                    return Err(ModelError::InvalidAttribute {
                        field: ID_KEY.to_string(),
                        expected: "a string".to_string(),
                    })
                }
            },
            CREATED_AT_KEY => self.created_at = Some(parse_timestamp(&key, &value)?),
            UPDATED_AT_KEY => self.updated_at = Some(parse_timestamp(&key, &value)?),
            _ => {
                self.extra.insert(key, value);
            }
        }
        Ok(())
    }

    /// Advance `updated_at` to now, always strictly past its prior value.
    pub fn save(&mut self) {
        let next = match self.updated_at {
            Some(previous) => timestamp::next_after(previous),
            None => timestamp::now(),
        };
        self.updated_at = Some(next);
        debug!(id = self.id.as_deref(), updated_at = %timestamp::format(&next), "saved record");
    }

    fn to_mapping_as(&self, class_name: &str) -> Result<Mapping> {
        let created_at = self.created_at()?;
        let updated_at = self.updated_at()?;

        let mut mapping = Mapping::new();
        for (key, value) in &self.extra {
            mapping.insert(key.clone(), value.clone());
        }
        if let Some(id) = &self.id {
            mapping.insert(ID_KEY.to_string(), Value::String(id.clone()));
        }
        mapping.insert(
            CREATED_AT_KEY.to_string(),
            Value::String(timestamp::format(&created_at)),
        );
        mapping.insert(
            UPDATED_AT_KEY.to_string(),
            Value::String(timestamp::format(&updated_at)),
        );
        mapping.insert(CLASS_KEY.to_string(), Value::String(class_name.to_string()));
        Ok(mapping)
    }

    fn render_as(&self, class_name: &str) -> String {
        format!(
            "[{}] ({}) {}",
            class_name,
            self.id.as_deref().unwrap_or_default(),
            render::attribute_repr(self)
        )
    }
}

impl Default for BaseModel {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for BaseModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_as(Self::CLASS_NAME))
    }
}

fn parse_timestamp(field: &str, value: &Value) -> Result<DateTime<Utc>> {
    match value {
        Value::String(s) => timestamp::parse(field, s),
        other => Err(ModelError::InvalidTimestamp {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}

/// An entity type built on [`BaseModel`].
///
/// Implementors embed a `BaseModel` and name themselves through
/// `CLASS_NAME`, which tags serialized mappings and the display form.
pub trait Model: Sized {
    const CLASS_NAME: &'static str;

    fn base(&self) -> &BaseModel;

    fn base_mut(&mut self) -> &mut BaseModel;

    fn from_base(base: BaseModel) -> Self;

    /// Reconstruct from a mapping; see [`BaseModel::from_mapping`].
    fn from_dict(mapping: Mapping) -> Result<Self> {
        BaseModel::from_mapping(mapping).map(Self::from_base)
    }

    /// Snapshot of every attribute with timestamps as ISO strings and
    /// `__class__` set to `CLASS_NAME`.
    ///
    /// # Errors
    /// `MissingAttribute` if either timestamp is absent.
    fn to_dict(&self) -> Result<Mapping> {
        self.base().to_mapping_as(Self::CLASS_NAME)
    }

    /// `[<ClassName>] (<id>) <attributes>`, requiring an id.
    fn render(&self) -> Result<String> {
        self.base().id()?;
        Ok(self.base().render_as(Self::CLASS_NAME))
    }

    fn save(&mut self) {
        self.base_mut().save();
    }

    /// `<ClassName>.<id>`
    fn storage_key(&self) -> Result<String> {
        Ok(format!("{}.{}", Self::CLASS_NAME, self.base().id()?))
    }

    /// Save, then hand the post-save snapshot to `hook`.
    fn save_to<H: StorageHook + ?Sized>(&mut self, hook: &mut H) -> Result<()> {
        self.save();
        let key = self.storage_key()?;
        let snapshot = self.to_dict()?;
        debug!(%key, "notifying storage");
        hook.record_saved(&key, &snapshot)
    }
}

impl Model for BaseModel {
    const CLASS_NAME: &'static str = BaseModel::CLASS_NAME;

    fn base(&self) -> &BaseModel {
        self
    }

    fn base_mut(&mut self) -> &mut BaseModel {
        self
    }

    fn from_base(base: BaseModel) -> Self {
        base
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapping(value: Value) -> Mapping {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    struct Place {
        base: BaseModel,
    }

    impl Model for Place {
        const CLASS_NAME: &'static str = "Place";

        fn base(&self) -> &BaseModel {
            &self.base
        }

        fn base_mut(&mut self) -> &mut BaseModel {
            &mut self.base
        }

        fn from_base(base: BaseModel) -> Self {
            Self { base }
        }
    }

    #[test]
    fn test_new_sets_identity_and_equal_timestamps() {
        let model = BaseModel::new();
        let id = model.id().unwrap();
        assert!(!id.trim().is_empty());
        assert!(Uuid::parse_str(id).is_ok());
        assert_eq!(model.created_at().unwrap(), model.updated_at().unwrap());
        assert!(model.extra().is_empty());
    }

    #[test]
    fn test_empty_mapping_is_fresh() {
        let model = BaseModel::from_mapping(Mapping::new()).unwrap();
        assert!(model.id().is_ok());
        assert_eq!(model.created_at().unwrap(), model.updated_at().unwrap());
    }

    #[test]
    fn test_class_key_is_discarded() {
        let model = BaseModel::from_mapping(mapping(json!({
            "id": "abc",
            "__class__": "BaseModel"
        })))
        .unwrap();
        assert!(model.get(CLASS_KEY).is_none());
        assert!(model.extra().is_empty());
    }

    #[test]
    fn test_only_class_key_leaves_everything_absent() {
        let model = BaseModel::from_mapping(mapping(json!({ "__class__": "BaseModel" }))).unwrap();
        assert!(matches!(model.id(), Err(ModelError::MissingAttribute(k)) if k == "id"));
        assert!(model.created_at().is_err());
        assert!(model.updated_at().is_err());
    }

    #[test]
    fn test_non_string_id_is_rejected() {
        let err = BaseModel::from_mapping(mapping(json!({ "id": 7 }))).unwrap_err();
        assert!(matches!(err, ModelError::InvalidAttribute { field, .. } if field == "id"));
    }

    #[test]
    fn test_non_string_timestamp_is_rejected() {
        let err = BaseModel::from_mapping(mapping(json!({ "created_at": 12 }))).unwrap_err();
        assert!(matches!(err, ModelError::InvalidTimestamp { field, .. } if field == "created_at"));
    }

    #[test]
    fn test_save_without_updated_at_stamps_now() {
        let mut model = BaseModel::from_mapping(mapping(json!({ "id": "abc" }))).unwrap();
        model.save();
        assert!(model.updated_at().is_ok());
        assert!(model.created_at().is_err());
    }

    #[test]
    fn test_save_moves_past_future_timestamp() {
        let mut model = BaseModel::from_mapping(mapping(json!({
            "id": "abc",
            "created_at": "2999-01-01T00:00:00.000000Z",
            "updated_at": "2999-01-01T00:00:00.000000Z"
        })))
        .unwrap();
        let before = model.updated_at().unwrap();
        model.save();
        assert!(model.updated_at().unwrap() > before);
        assert_eq!(
            timestamp::format(&model.updated_at().unwrap()),
            "2999-01-01T00:00:00.000001Z"
        );
    }

    #[test]
    fn test_timestamp_at_end_of_range_is_rejected() {
        let err = BaseModel::from_mapping(mapping(json!({
            "id": "a",
            "created_at": "+262142-12-31T23:59:59.999999",
            "updated_at": "+262142-12-31T23:59:59.999999"
        })))
        .unwrap_err();
        assert!(matches!(err, ModelError::InvalidTimestamp { .. }));
    }

    #[test]
    fn test_save_at_latest_accepted_timestamp() {
        let mut model = BaseModel::from_mapping(mapping(json!({
            "id": "a",
            "created_at": "+262142-12-31T23:59:59.999998",
            "updated_at": "+262142-12-31T23:59:59.999998"
        })))
        .unwrap();
        let before = model.updated_at().unwrap();
        model.save();
        assert!(model.updated_at().unwrap() > before);
        assert!(model.to_dict().is_ok());
    }

    #[test]
    fn test_set_attribute_routes_known_fields() {
        let mut model = BaseModel::new();
        model
            .set_attribute("updated_at", json!("2020-05-06T07:08:09.100000Z"))
            .unwrap();
        model.set_attribute("name", json!("Holberton")).unwrap();
        assert_eq!(
            timestamp::format(&model.updated_at().unwrap()),
            "2020-05-06T07:08:09.100000Z"
        );
        assert_eq!(model.get("name"), Some(&json!("Holberton")));
        assert!(model.get("updated_at").is_none());
    }

    #[test]
    fn test_to_dict_omits_absent_id() {
        let model = BaseModel::from_mapping(mapping(json!({
            "created_at": "2020-05-06T07:08:09.100000Z",
            "updated_at": "2020-05-06T07:08:09.100000Z"
        })))
        .unwrap();
        let dict = model.to_dict().unwrap();
        assert!(!dict.contains_key("id"));
        assert_eq!(dict[CLASS_KEY], "BaseModel");
    }

    #[test]
    fn test_render_requires_id() {
        let model = BaseModel::from_mapping(mapping(json!({ "name": "x" }))).unwrap();
        assert!(matches!(model.render(), Err(ModelError::MissingAttribute(_))));
        assert_eq!(model.to_string(), "[BaseModel] () {\"name\": \"x\"}");
    }

    #[test]
    fn test_concrete_model_uses_own_class_name() {
        let place = Place::from_base(BaseModel::new());
        let id = place.base().id().unwrap().to_string();

        let dict = place.to_dict().unwrap();
        assert_eq!(dict[CLASS_KEY], "Place");
        assert!(place.render().unwrap().starts_with(&format!("[Place] ({})", id)));
        assert_eq!(place.storage_key().unwrap(), format!("Place.{}", id));

        let again = Place::from_dict(dict).unwrap();
        assert_eq!(again.base(), place.base());
    }
}
