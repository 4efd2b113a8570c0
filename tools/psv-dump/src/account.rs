//! Typed shape for account extracts.

use chrono::NaiveDateTime;
use psv_decoder::impl_unmarshal;
use serde::Serialize;

/// One row of an account extract.
#[derive(Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct Account {
    #[serde(rename = "AccountID")]
    pub account_id: String,
    pub account_number: String,
    #[serde(rename = "PlanID")]
    pub plan_id: u32,
    #[serde(rename = "TranID")]
    pub tran_id: u64,
    pub outstd_principal: f32,
    pub plan_seg_create_date: NaiveDateTime,
}

impl_unmarshal!(Account {
    "AccountID" => account_id,
    "AccountNumber" => account_number,
    "PlanID" => plan_id,
    "TranID" => tran_id,
    "OutstdPrincipal" => outstd_principal,
    "PlanSegCreateDate" => plan_seg_create_date @ "2006-01-02 15:04:05",
});
