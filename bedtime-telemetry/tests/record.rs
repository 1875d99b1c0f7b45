use bedtime_core::{ChildInfo, Language, StoryRequest};
use bedtime_telemetry::{NewUsageRecord, MODERATED_PREFIX};
use serde_json::json;

fn request() -> StoryRequest {
    StoryRequest::new(
        vec![ChildInfo::new("Mia", 3), ChildInfo::new("Ada", 11)],
        "teddy bear, slide",
        "kindness",
        Language::English,
    )
    .unwrap()
}

#[test]
fn generated_record_aggregates_children() {
    let record = NewUsageRecord::generated(&request(), "gpt-4o", 3.4);

    assert_eq!(record.selected_language, "English");
    assert_eq!(record.num_children, 2);
    assert_eq!(record.ages, "3,11");
    assert_eq!(record.values_to_teach, "kindness");
    assert_eq!(record.selected_model, "gpt-4o");
    assert_eq!(record.generation_time, 3.4);
    assert!(record.moderated_inputs.is_none());
    assert!(!record.is_moderated());
    assert!(chrono::DateTime::parse_from_rfc3339(&record.datetime).is_ok());
}

#[test]
fn moderated_record_keeps_raw_inputs_and_zero_time() {
    let record = NewUsageRecord::moderated(&request(), "gpt-4o").unwrap();

    assert_eq!(record.values_to_teach, format!("{MODERATED_PREFIX}kindness"));
    assert_eq!(record.generation_time, 0.0);
    assert!(record.is_moderated());

    let payload: serde_json::Value =
        serde_json::from_str(record.moderated_inputs.as_deref().unwrap()).unwrap();
    assert_eq!(
        payload,
        json!({
            "children": [{"name": "Mia", "age": 3}, {"name": "Ada", "age": 11}],
            "activities_and_toys": "teddy bear, slide"
        })
    );
}

#[test]
fn raw_inputs_are_omitted_from_serialized_success_rows() {
    let record = NewUsageRecord::generated(&request(), "gpt-4o", 1.0);
    let value = serde_json::to_value(&record).unwrap();
    assert!(value.get("moderated_inputs").is_none());
    assert!(value.get("rating").is_none());
}
