use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::listmodel::{ContactList, ContactListWithCount};

use super::subscriberdtos::FilterSubscriberDto;

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct CreateListDto {
    #[validate(length(min = 1, message = "Name is required"))]
    pub name: String,

    pub description: Option<String>,

    /// When true, confirmed subscribers join this list automatically.
    pub auto_assign: Option<bool>,
}

#[derive(Validate, Debug, Default, Clone, Serialize, Deserialize)]
pub struct UpdateListDto {
    #[validate(length(min = 1, message = "Name cannot be empty"))]
    pub name: Option<String>,

    pub description: Option<String>,
    pub auto_assign: Option<bool>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListData {
    pub list: ContactList,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListResponseDto {
    pub status: String,
    pub data: ListData,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListsResponseDto {
    pub status: String,
    pub lists: Vec<ContactListWithCount>,
    pub results: i64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListMembersResponseDto {
    pub status: String,
    pub members: Vec<FilterSubscriberDto>,
    pub results: i64,
}
