use bson::{oid::ObjectId, Bson};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ApiError;

/// Parse a client-supplied id into a store key. Anything that is not a
/// well-formed ObjectId is rejected before it gets near a query.
pub fn parse_object_id(raw: &str) -> Result<ObjectId, ApiError> {
    ObjectId::parse_str(raw).map_err(|_| ApiError::MalformedId)
}

/// Owner reference on a project record.
///
/// Projects written today store the owner as a real ObjectId, but records
/// from before the storage-format change carry the same id as its hex
/// string. Both shapes are still live in the collection, so ownership
/// comparison has to accept either until a data migration lands.
#[derive(Debug, Clone, PartialEq)]
pub enum OwnerRef {
    /// Current encoding: a BSON ObjectId.
    Id(ObjectId),
    /// Legacy encoding: the hex string form of the same id.
    Hex(String),
}

impl OwnerRef {
    /// True if this stored reference and `user` name the same logical
    /// user, whichever encoding the record was written with.
    pub fn matches(&self, user: &ObjectId) -> bool {
        match self {
            OwnerRef::Id(oid) => oid == user,
            OwnerRef::Hex(s) => ObjectId::parse_str(s)
                .map(|oid| oid == *user)
                .unwrap_or(false),
        }
    }
}

impl Serialize for OwnerRef {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            OwnerRef::Id(oid) => oid.serialize(serializer),
            OwnerRef::Hex(s) => serializer.serialize_str(s),
        }
    }
}

impl<'de> Deserialize<'de> for OwnerRef {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match Bson::deserialize(deserializer)? {
            Bson::ObjectId(oid) => Ok(OwnerRef::Id(oid)),
            Bson::String(s) => Ok(OwnerRef::Hex(s)),
            other => Err(de::Error::custom(format!(
                "owner reference must be an ObjectId or string, got {}",
                other
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_rejects_malformed_ids() {
        assert!(parse_object_id("not-an-id").is_err());
        assert!(parse_object_id("").is_err());
        // one hex digit short
        assert!(parse_object_id("507f1f77bcf86cd79943901").is_err());
    }

    #[test]
    fn parse_accepts_well_formed_ids() {
        let oid = ObjectId::new();
        assert_eq!(parse_object_id(&oid.to_hex()).unwrap(), oid);
    }

    #[test]
    fn both_encodings_authorize_the_same_user() {
        let user = ObjectId::new();
        let current = OwnerRef::Id(user);
        let legacy = OwnerRef::Hex(user.to_hex());
        assert!(current.matches(&user));
        assert!(legacy.matches(&user));
    }

    #[test]
    fn neither_encoding_authorizes_a_different_user() {
        let owner = ObjectId::new();
        let intruder = ObjectId::new();
        assert!(!OwnerRef::Id(owner).matches(&intruder));
        assert!(!OwnerRef::Hex(owner.to_hex()).matches(&intruder));
    }

    #[test]
    fn garbage_legacy_reference_never_matches() {
        let user = ObjectId::new();
        assert!(!OwnerRef::Hex("corrupted".into()).matches(&user));
        assert!(!OwnerRef::Hex(String::new()).matches(&user));
    }

    #[test]
    fn deserializes_from_both_bson_shapes() {
        let oid = ObjectId::new();

        let as_oid = bson::from_bson::<OwnerRef>(Bson::ObjectId(oid)).unwrap();
        assert_eq!(as_oid, OwnerRef::Id(oid));

        let as_str = bson::from_bson::<OwnerRef>(Bson::String(oid.to_hex())).unwrap();
        assert_eq!(as_str, OwnerRef::Hex(oid.to_hex()));

        assert!(bson::from_bson::<OwnerRef>(Bson::Int32(7)).is_err());
    }

    #[test]
    fn current_encoding_serializes_as_object_id() {
        let oid = ObjectId::new();
        assert_eq!(
            bson::to_bson(&OwnerRef::Id(oid)).unwrap(),
            Bson::ObjectId(oid)
        );
        assert_eq!(
            bson::to_bson(&OwnerRef::Hex(oid.to_hex())).unwrap(),
            Bson::String(oid.to_hex())
        );
    }
}
