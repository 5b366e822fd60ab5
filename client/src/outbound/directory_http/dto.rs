//! DTOs for the directory's JSON wire formats.
//!
//! The list endpoint returns snake_case rows while the write endpoints take a
//! camelCase body with `userName`, so each direction has its own DTO.

use serde::{Deserialize, Serialize};

use crate::domain::UserRecord;

#[derive(Debug, Deserialize)]
pub(super) struct UserRowDto {
    pub(super) first_name: String,
    pub(super) last_name: String,
    pub(super) username: String,
    pub(super) age: u32,
    pub(super) marital_status: String,
    pub(super) is_employed: bool,
    pub(super) is_founder: bool,
}

impl From<UserRowDto> for UserRecord {
    fn from(row: UserRowDto) -> Self {
        Self {
            first_name: row.first_name,
            last_name: row.last_name,
            username: row.username,
            age: row.age,
            marital_status: row.marital_status,
            is_employed: row.is_employed,
            is_founder: row.is_founder,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct UserPayloadDto<'a> {
    pub(super) first_name: &'a str,
    pub(super) last_name: &'a str,
    pub(super) user_name: &'a str,
    pub(super) age: u32,
    pub(super) marital_status: &'a str,
    pub(super) is_employed: bool,
    pub(super) is_founder: bool,
}

impl<'a> From<&'a UserRecord> for UserPayloadDto<'a> {
    fn from(record: &'a UserRecord) -> Self {
        Self {
            first_name: &record.first_name,
            last_name: &record.last_name,
            user_name: &record.username,
            age: record.age,
            marital_status: &record.marital_status,
            is_employed: record.is_employed,
            is_founder: record.is_founder,
        }
    }
}
