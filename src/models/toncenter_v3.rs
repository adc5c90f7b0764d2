use serde::{Deserialize, Serialize};
use crate::models::basic::StringOrInt;


#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "snake_case")]
pub enum StackItemType {
    Num,
    Cell,
    Slice,
}


#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct V2StackEntity {
    pub r#type: Option<StackItemType>,
    pub value: Option<StringOrInt>,
}


#[derive(Debug, Serialize, Deserialize)]
pub struct V2RunGetMethodRequest {
    pub address: Option<String>,
    pub method: Option<String>,
    pub stack: Option<Vec<V2StackEntity>>,
}


#[derive(Debug, Serialize, Deserialize)]
pub struct RunGetMethodResult {
    pub gas_used: Option<i64>,
    pub exit_code: Option<i32>,
    pub stack: Option<Vec<V2StackEntity>>,
}


/// Body toncenter sends along with a non-2xx status
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub error: Option<String>,
    pub code: Option<i32>,
}
