//! Per-member pass request assembly

use super::models::{PassField, PassImage, PassRequest};
use crate::roster::MemberRecord;

/// Template field slots each roster column is shown in
pub mod field_keys {
    pub const NAME: &str = "field3";
    pub const LICENSE_NUMBER: &str = "field6";
    pub const ID_NUMBER: &str = "field10";
    pub const EXPIRATION_DATE: &str = "field7";
}

pub const THUMBNAIL: &str = "thumbnail";

/// Build the create-pass body for one member.
///
/// `expiration` is the normalized timestamp; the visible expiration field
/// carries the member's raw cell text instead.
pub fn build_pass_request(
    member: &MemberRecord,
    expiration: &str,
    image_hex: Option<String>,
) -> PassRequest {
    let fields = vec![
        PassField::new(field_keys::NAME, member.name.as_str()),
        PassField::new(field_keys::LICENSE_NUMBER, member.license_number.to_string()),
        PassField::new(field_keys::ID_NUMBER, member.id_number.to_string()),
        PassField::new(field_keys::EXPIRATION_DATE, member.expiration_date.to_string()),
    ];

    let images = image_hex
        .map(|hex| PassImage {
            kind: THUMBNAIL.to_string(),
            hex,
        })
        .into_iter()
        .collect();

    PassRequest {
        expiration_date: expiration.to_string(),
        fields,
        images,
    }
}
