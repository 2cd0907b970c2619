//! Unit tests for the Identifiers module

use core_kernel::{DeceasedId, HeirId};
use std::str::FromStr;
use uuid::Uuid;

mod heir_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        assert_ne!(HeirId::new(), HeirId::new());
    }

    #[test]
    fn test_from_uuid() {
        let uuid = Uuid::new_v4();
        let id = HeirId::from_uuid(uuid);
        assert_eq!(*id.as_uuid(), uuid);
    }

    #[test]
    fn test_from_u128_orders_numerically() {
        assert!(HeirId::from_u128(1) < HeirId::from_u128(2));
        assert!(HeirId::from_u128(9) < HeirId::from_u128(10));
    }

    #[test]
    fn test_display_has_prefix() {
        let id = HeirId::from_u128(1);
        assert!(id.to_string().starts_with("HEIR-"));
        assert_eq!(HeirId::prefix(), "HEIR");
    }

    #[test]
    fn test_parse_with_and_without_prefix() {
        let id = HeirId::from_u128(7);
        assert_eq!(HeirId::from_str(&id.to_string()).unwrap(), id);
        assert_eq!(HeirId::from_str(&id.as_uuid().to_string()).unwrap(), id);
        assert!(HeirId::from_str("not-a-uuid").is_err());
    }

    #[test]
    fn test_serializes_as_bare_uuid() {
        let id = HeirId::from_u128(1);
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.as_uuid()));
    }
}

mod deceased_id_tests {
    use super::*;

    #[test]
    fn test_display_has_prefix() {
        assert!(DeceasedId::from_u128(1).to_string().starts_with("DEC-"));
    }

    #[test]
    fn test_converts_to_uuid() {
        let id = DeceasedId::from_u128(3);
        let uuid: Uuid = id.into();
        assert_eq!(uuid, Uuid::from_u128(3));
    }
}
