use crowdtask_core::*;
use pretty_assertions::assert_eq;
use rstest::rstest;
use rust_decimal::Decimal;
use std::str::FromStr;

struct WhatIsIt;

impl AnswerSchema for WhatIsIt {
    fn schema() -> Schema {
        Schema::new().field("prop", AnswerField::text("WhatIsIt").with_default("This"))
    }
}

struct Flag;

impl AnswerSchema for Flag {
    fn schema() -> Schema {
        Schema::new().field("prop", AnswerField::boolean("Herp").with_default(false))
    }
}

struct AlternateFlag;

impl AnswerSchema for AlternateFlag {
    fn schema() -> Schema {
        Schema::new().field(
            "prop",
            AnswerField::boolean_with_mapping("Herp", [("T", true), ("F", false)]).with_default(false),
        )
    }
}

struct Count;

impl AnswerSchema for Count {
    fn schema() -> Schema {
        Schema::new().field("prop", AnswerField::integer("Herp").with_default(0_i64))
    }
}

struct Amount;

impl AnswerSchema for Amount {
    fn schema() -> Schema {
        Schema::new().field("prop", AnswerField::decimal("Herp").with_default(Decimal::ZERO))
    }
}

struct BodyParts;

impl AnswerSchema for BodyParts {
    fn schema() -> Schema {
        Schema::new().field("prop", AnswerField::multi_choice("Herp"))
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ===== Base field behaviour =====

#[test]
fn test_field_keeps_question_name_and_default() {
    let field = AnswerField::text("WhatIsIt").with_default("This");

    assert_eq!(field.question_name(), "WhatIsIt");
    assert_eq!(field.default_value(), Some(&AnswerValue::from("This")));
}

#[test]
fn test_fresh_sheet_starts_unset() {
    let sheet = AnswerSheet::for_schema::<WhatIsIt>();
    assert!(sheet.is_unset("prop"));
}

#[test]
fn test_returns_default_value_if_empty() {
    let sheet = AnswerSheet::for_schema::<WhatIsIt>();
    assert_eq!(sheet.text("prop"), Some("This".to_string()));
}

#[test]
fn test_returns_value_once_set() {
    let mut sheet = AnswerSheet::for_schema::<WhatIsIt>();
    sheet.set("prop", AnswerValue::Integer(123)).unwrap();
    assert_eq!(sheet.get("prop"), Some(AnswerValue::Integer(123)));
}

#[test]
fn test_text_stores_empty_string_verbatim() {
    let mut sheet = AnswerSheet::for_schema::<WhatIsIt>();
    sheet.set("prop", "").unwrap();
    assert_eq!(sheet.text("prop"), Some(String::new()));
}

#[test]
fn test_text_without_default_reads_none() {
    let sheet = AnswerSheet::new(Schema::new().field("age", AnswerField::text("Age")));
    assert_eq!(sheet.get("age"), None);
}

#[test]
fn test_preserves_values_across_separate_instances() {
    let mut first = AnswerSheet::for_schema::<WhatIsIt>();
    let mut second = AnswerSheet::for_schema::<WhatIsIt>();
    first.set("prop", "1").unwrap();
    second.set("prop", "2").unwrap();

    assert_eq!(first.text("prop"), Some("1".to_string()));
    assert_eq!(second.text("prop"), Some("2".to_string()));
}

#[test]
fn test_setting_one_instance_leaves_other_at_default() {
    let mut first = AnswerSheet::for_schema::<Flag>();
    let second = AnswerSheet::for_schema::<Flag>();
    first.set("prop", "1").unwrap();

    assert_eq!(first.boolean("prop"), Some(true));
    assert_eq!(second.boolean("prop"), Some(false));
}

// ===== Boolean =====

#[rstest]
#[case("1", true)]
#[case("0", false)]
fn test_boolean_from_string(#[case] raw: &str, #[case] expected: bool) {
    let mut sheet = AnswerSheet::for_schema::<Flag>();
    sheet.set("prop", raw).unwrap();
    assert_eq!(sheet.boolean("prop"), Some(expected));
}

#[rstest]
#[case(true)]
#[case(false)]
fn test_boolean_literal_stored_verbatim(#[case] value: bool) {
    let mut sheet = AnswerSheet::for_schema::<Flag>();
    sheet.set("prop", value).unwrap();
    assert_eq!(sheet.boolean("prop"), Some(value));
}

#[test]
fn test_boolean_unmapped_string_falls_back_to_default() {
    let mut sheet = AnswerSheet::new(Schema::new().field("prop", AnswerField::boolean("Herp").with_default(true)));
    sheet.set("prop", "yes").unwrap();

    assert!(sheet.is_unset("prop"));
    assert_eq!(sheet.boolean("prop"), Some(true));
}

#[test]
fn test_boolean_absent_leaves_default() {
    let mut sheet = AnswerSheet::for_schema::<Flag>();
    sheet.set("prop", AnswerInput::Absent).unwrap();
    assert_eq!(sheet.boolean("prop"), Some(false));
}

#[rstest]
#[case("T", true)]
#[case("F", false)]
fn test_boolean_custom_mapping(#[case] raw: &str, #[case] expected: bool) {
    let mut sheet = AnswerSheet::for_schema::<AlternateFlag>();
    sheet.set("prop", raw).unwrap();
    assert_eq!(sheet.boolean("prop"), Some(expected));
}

#[test]
fn test_boolean_custom_mapping_replaces_default_table() {
    let mut sheet = AnswerSheet::for_schema::<AlternateFlag>();
    sheet.set("prop", "1").unwrap();
    assert!(sheet.is_unset("prop"));
}

// ===== Integer =====

#[test]
fn test_integer_initially_default() {
    let sheet = AnswerSheet::for_schema::<Count>();
    assert_eq!(sheet.integer("prop"), Some(0));
}

#[test]
fn test_integer_set_to_zero_is_not_unset() {
    let mut sheet = AnswerSheet::for_schema::<Count>();
    sheet.set("prop", 0_i64).unwrap();

    assert!(!sheet.is_unset("prop"));
    assert_eq!(sheet.integer("prop"), Some(0));
}

#[test]
fn test_integer_from_string() {
    let mut sheet = AnswerSheet::for_schema::<Count>();
    sheet.set("prop", "123456").unwrap();
    assert_eq!(sheet.integer("prop"), Some(123456));
}

#[test]
fn test_integer_rejects_non_numeric_text() {
    let mut sheet = AnswerSheet::for_schema::<Count>();
    let err = sheet.set("prop", "hello").unwrap_err();

    assert_eq!(
        err,
        CoreError::Coercion {
            question: "Herp".to_string(),
            value: "hello".to_string(),
            expected: "integer",
        }
    );
    assert_eq!(sheet.integer("prop"), Some(0));
}

#[test]
fn test_integer_instances_are_isolated() {
    let mut first = AnswerSheet::for_schema::<Count>();
    let mut second = AnswerSheet::for_schema::<Count>();
    first.set("prop", "123").unwrap();
    second.set("prop", "245").unwrap();

    assert_eq!(first.integer("prop"), Some(123));
    assert_eq!(second.integer("prop"), Some(245));
}

// ===== Decimal =====

#[test]
fn test_decimal_from_string_is_exact() {
    let mut sheet = AnswerSheet::for_schema::<Amount>();
    sheet.set("prop", "1.2345").unwrap();
    assert_eq!(sheet.decimal("prop"), Some(Decimal::from_str("1.2345").unwrap()));
}

#[test]
fn test_decimal_rejects_invalid_text() {
    let mut sheet = AnswerSheet::for_schema::<Amount>();
    let err = sheet.set("prop", "hello").unwrap_err();
    assert!(matches!(err, CoreError::Coercion { expected: "decimal", .. }));
}

#[test]
fn test_decimal_instances_are_isolated() {
    let mut first = AnswerSheet::for_schema::<Amount>();
    let mut second = AnswerSheet::for_schema::<Amount>();
    first.set("prop", "1.23").unwrap();
    second.set("prop", "4.56").unwrap();

    assert_eq!(first.decimal("prop"), Some(Decimal::new(123, 2)));
    assert_eq!(second.decimal("prop"), Some(Decimal::new(456, 2)));
}

// ===== Multi choice =====

#[test]
fn test_multi_choice_unset_is_empty_list() {
    let sheet = AnswerSheet::for_schema::<BodyParts>();
    assert_eq!(sheet.choices("prop"), Vec::<String>::new());
    assert_eq!(sheet.get("prop"), Some(AnswerValue::Choices(vec![])));
}

#[rstest]
#[case("", &[])]
#[case("Face", &["Face"])]
#[case("Face|Neck|Hands", &["Face", "Neck", "Hands"])]
fn test_multi_choice_from_string(#[case] raw: &str, #[case] expected: &[&str]) {
    let mut sheet = AnswerSheet::for_schema::<BodyParts>();
    sheet.set("prop", raw).unwrap();
    assert_eq!(sheet.choices("prop"), strings(expected));
}

#[test]
fn test_multi_choice_list_kept_unchanged() {
    let mut sheet = AnswerSheet::for_schema::<BodyParts>();
    sheet.set("prop", vec!["Face", "Neck", "Hands"]).unwrap();
    assert_eq!(sheet.choices("prop"), strings(&["Face", "Neck", "Hands"]));
}

#[test]
fn test_multi_choice_empty_text_uses_declared_default() {
    let mut sheet = AnswerSheet::new(
        Schema::new().field("prop", AnswerField::multi_choice("Herp").with_default(vec!["None"])),
    );
    sheet.set("prop", "").unwrap();
    assert_eq!(sheet.choices("prop"), strings(&["None"]));
}

#[test]
fn test_multi_choice_instances_are_isolated() {
    let mut first = AnswerSheet::for_schema::<BodyParts>();
    let mut second = AnswerSheet::for_schema::<BodyParts>();
    first.set("prop", "Hand|Foot").unwrap();
    second.set("prop", "Foot|Mouth").unwrap();

    assert_eq!(first.choices("prop"), strings(&["Hand", "Foot"]));
    assert_eq!(second.choices("prop"), strings(&["Foot", "Mouth"]));
}
