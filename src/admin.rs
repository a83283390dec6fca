use serde::Serialize;

/// How the external admin tool should edit an entity's relation fields:
/// everything listed here is entered as a raw id rather than picked from a
/// searchable widget.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct AdminRegistration {
    pub entity: &'static str,
    pub raw_id_fields: &'static [&'static str],
}

pub const REGISTRY: &[AdminRegistration] = &[
    AdminRegistration {
        entity: "comment",
        raw_id_fields: &["post", "author"],
    },
    AdminRegistration {
        entity: "post",
        raw_id_fields: &["likes", "tags"],
    },
    AdminRegistration {
        entity: "tag",
        raw_id_fields: &[],
    },
];

/// `None` if the entity is not registered at all.
pub fn raw_id_fields(entity: &str) -> Option<&'static [&'static str]> {
    REGISTRY
        .iter()
        .find(|registration| registration.entity.eq_ignore_ascii_case(entity))
        .map(|registration| registration.raw_id_fields)
}
