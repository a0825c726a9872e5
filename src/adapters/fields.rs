//! Field maps for every Pipedrive entity the adapters read

use crate::mapping::{FieldMap, FieldSpec, PrimaryAttr};

const fn f(name: &'static str) -> FieldSpec {
    FieldSpec::scalar(name)
}

const fn r(name: &'static str, source: &'static str) -> FieldSpec {
    FieldSpec::renamed(name, source)
}

/// `/v1/activities`
pub const ACTIVITY: FieldMap = FieldMap::new(&[
    f("id"),
    f("user_id"),
    f("created_by_user_id"),
    f("org_id"),
    f("org_name"),
    f("person_id"),
    f("person_name"),
    f("lead_id"),
    f("lead_title"),
    f("deal_id"),
    f("deal_title"),
    f("subject"),
    f("type"),
    f("done"),
    f("marked_as_done_time"),
    f("due_date"),
    f("due_time"),
    f("duration"),
    f("add_time"),
    f("update_time"),
    f("last_notification_time"),
    f("busy_flag"),
    f("public_description"),
    f("note"),
    f("location_subpremise"),
    f("location_street_number"),
    f("location_route"),
    f("location_sublocality"),
    f("location_locality"),
    f("location_admin_area_level_1"),
    f("location_admin_area_level_2"),
    f("location_country"),
    f("location_postal_code"),
    f("location_formatted_address"),
    f("conference_meeting_client"),
    f("conference_meeting_url"),
]);

/// `/v1/deals`
pub const DEALS: FieldMap = FieldMap::new(&[
    f("id"),
    f("title"),
    f("label"),
    f("value"),
    f("currency"),
    f("add_time"),
    f("update_time"),
    f("active"),
    f("deleted"),
    f("status"),
    f("probability"),
    FieldSpec::relation("creator_user_id", "creator_user_id", "id"),
    FieldSpec::relation("creator_user_name", "creator_user_id", "name"),
    FieldSpec::relation("creator_user_email", "creator_user_id", "email"),
    FieldSpec::relation("user_id", "user_id", "id"),
    FieldSpec::relation("user_name", "user_id", "name"),
    FieldSpec::relation("user_email", "user_id", "email"),
    FieldSpec::relation("person_name", "person_id", "name"),
    FieldSpec::relation("org_name", "org_id", "name"),
    FieldSpec::relation("org_address", "org_id", "address"),
    f("pipeline_id"),
    f("stage_id"),
    f("stage_change_time"),
    f("last_activity_id"),
    f("last_activity_date"),
    f("next_activity_id"),
    f("next_activity_date"),
    f("next_activity_subject"),
    f("next_activity_type"),
    f("next_activity_duration"),
    f("next_activity_note"),
    f("expected_close_date"),
    f("close_time"),
    f("won_time"),
    f("lost_time"),
    f("lost_reason"),
    f("products_count"),
    f("files_count"),
    f("notes_count"),
    f("email_messages_count"),
    f("activities_count"),
    f("done_activities_count"),
    f("undone_activities_count"),
    f("reference_activities_count"),
    f("participants_count"),
    f("followers_count"),
]);

/// `/v1/persons`
pub const PEOPLE: FieldMap = FieldMap::new(&[
    f("id"),
    f("label"),
    f("name"),
    f("first_name"),
    f("last_name"),
    FieldSpec::primary("phone", "phone", PrimaryAttr::Value),
    FieldSpec::primary("phone_label", "phone", PrimaryAttr::Label),
    FieldSpec::primary("email", "email", PrimaryAttr::Value),
    FieldSpec::primary("email_label", "email", PrimaryAttr::Label),
    FieldSpec::relation("org_name", "org_id", "name"),
    FieldSpec::relation("org_address", "org_id", "address"),
    f("active_flag"),
    f("add_time"),
    f("update_time"),
    f("last_activity_id"),
    f("last_activity_date"),
    f("next_activity_id"),
    f("next_activity_date"),
    f("activities_count"),
    f("done_activities_count"),
    f("undone_activities_count"),
    f("reference_activities_count"),
    f("open_deals_count"),
    f("closed_deals_count"),
    f("won_deals_count"),
    f("lost_deals_count"),
    f("related_won_deals_count"),
    f("related_lost_deals_count"),
    f("related_open_deals_count"),
    f("related_closed_deals_count"),
    f("participant_open_deals_count"),
    f("participant_closed_deals_count"),
    f("files_count"),
    f("notes_count"),
    f("followers_count"),
    f("email_messages_count"),
]);

/// `/v1/products`, one row per price
pub const PRODUCTS: FieldMap = FieldMap::new(&[
    f("id"),
    f("name"),
    f("code"),
    f("description"),
    f("unit"),
    f("category"),
    f("tax"),
    FieldSpec::price("price_id", "id"),
    FieldSpec::price("price", "price"),
    FieldSpec::price("cost", "cost"),
    FieldSpec::price("overhead_cost", "overhead_cost"),
    FieldSpec::price("currency", "currency"),
    f("active_flag"),
    FieldSpec::relation("owner_id", "owner_id", "id"),
    FieldSpec::relation("owner_name", "owner_id", "name"),
    FieldSpec::relation("owner_email", "owner_id", "email"),
    f("followers_count"),
    f("add_time"),
    f("update_time"),
]);

/// Key of the price list on a product record
pub const PRODUCT_PRICES: &str = "prices";

/// `/v1/organizations`, shared by the table and enrichment adapters
pub const ORGANIZATIONS: FieldMap = FieldMap::new(&[
    f("id"),
    f("name"),
    f("label"),
    r("people_cnt", "people_count"),
    r("open_deals_cnt", "open_deals_count"),
    r("add_date", "add_time"),
    r("update_date", "update_time"),
    f("next_activity_date"),
    f("last_activity_date"),
    r("won_deals_cnt", "won_deals_count"),
    r("lost_deals_cnt", "lost_deals_count"),
    r("closed_deals_cnt", "closed_deals_count"),
    r("activities_cnt", "activities_count"),
    r("done_activities_cnt", "done_activities_count"),
    r("undone_activities_cnt", "undone_activities_count"),
    r("email_messages_cnt", "email_messages_count"),
    f("picture_id"),
    f("address"),
    r("address_suite", "address_subpremise"),
    r("address_number", "address_street_number"),
    r("address_street", "address_route"),
    r("address_district", "address_sublocality"),
    r("address_city", "address_locality"),
    r("address_state", "address_admin_area_level_1"),
    r("address_region", "address_admin_area_level_2"),
    f("address_country"),
    f("address_postal_code"),
    r("address_combined", "address_formatted_address"),
]);

/// `/v1/deals` in the legacy table layout
pub const LEGACY_DEALS: FieldMap = FieldMap::new(&[
    r("deal_name", "title"),
    r("deal_owner", "owner_name"),
    r("deal_status", "status"),
    r("amt", "value"),
    r("amt_home", "weighted_value"),
    f("lost_reason"),
    r("close_date", "close_time"),
    f("pipeline_id"),
    r("participants_cnt", "participants_count"),
    r("activities_cnt", "activities_count"),
    f("last_activity_date"),
    f("next_activity_date"),
    r("created_date", "add_time"),
    r("updated_date", "update_time"),
]);

/// `/v1/persons` in the legacy table layout, shared with person enrichment
pub const LEGACY_PEOPLE: FieldMap = FieldMap::new(&[
    f("id"),
    f("name"),
    f("label"),
    FieldSpec::primary("phone", "phone", PrimaryAttr::Value),
    FieldSpec::primary("email", "email", PrimaryAttr::Value),
    r("add_date", "add_time"),
    r("update_date", "update_time"),
    r("open_deals_cnt", "open_deals_count"),
    f("next_activity_date"),
    f("last_activity_date"),
    r("won_deals_cnt", "won_deals_count"),
    r("lost_deals_cnt", "lost_deals_count"),
    r("closed_deals_cnt", "closed_deals_count"),
    r("activities_cnt", "activities_count"),
    r("done_activities_cnt", "done_activities_count"),
    r("undone_activities_cnt", "undone_activities_count"),
    r("email_messages_cnt", "email_messages_count"),
    f("picture_id"),
    r("last_incoming_mail_date", "last_incoming_mail_time"),
    r("last_outgoing_mail_date", "last_outgoing_mail_time"),
]);
