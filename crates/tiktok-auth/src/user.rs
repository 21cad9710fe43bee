//! Basic profile of the authorizing user

use serde::Serialize;

use crate::envelope::UserInfoData;

/// Profile fields returned by the user info endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UserInfo {
    pub open_id: String,
    pub union_id: String,
    pub avatar: String,
    pub avatar_larger: String,
    pub display_name: String,
}

impl From<UserInfoData> for UserInfo {
    fn from(data: UserInfoData) -> Self {
        Self {
            open_id: data.open_id,
            union_id: data.union_id,
            avatar: data.avatar,
            avatar_larger: data.avatar_larger,
            display_name: data.display_name,
        }
    }
}
